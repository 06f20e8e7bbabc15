//! Property-based tests for answer refinement and config assembly.
//!
//! Uses proptest to check the refinement invariants over arbitrary sparse
//! answer sets, on both Apple and non-Apple hosts.

use nightwatch_init::{
    assemble, render, select_packages, select_webdrivers, Backend, Browser, Catalog, CatalogId,
    CloudProvider, DeclaredPackages, HostCapabilities, LanguageRunner, MobilePlatform,
    RawAnswers, RefinedAnswers, Refiner, TestingType, UiFramework, DEFAULT_ENV, FALLBACK_BROWSER,
};
use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use proptest::sample::select;

fn browsers() -> impl Strategy<Value = Vec<Browser>> {
    vec(select(Browser::all()), 0..5)
}

prop_compose! {
    fn raw_answers()(
        testing_type in option::of(vec(select(TestingType::all()), 0..3)),
        language_runner_setup in option::of(select(LanguageRunner::all())),
        ui_framework in option::of(select(UiFramework::all())),
        (backend, cloud_provider) in (
            option::of(select(Backend::all())),
            option::of(select(CloudProvider::all())),
        ),
        (local, remote, mobile_browsers) in (
            option::of(browsers()),
            option::of(browsers()),
            option::of(browsers()),
        ),
        (mobile, mobile_platform) in (
            option::of(any::<bool>()),
            option::of(select(MobilePlatform::all())),
        ),
        selenium_server in option::of(any::<bool>()),
        tests_location in option::of("[a-z]{0,8}")
    ) -> RawAnswers {
        RawAnswers {
            testing_type,
            language_runner_setup,
            ui_framework,
            backend,
            cloud_provider,
            browsers: local,
            remote_browsers: remote,
            mobile_browsers,
            mobile_platform,
            mobile,
            selenium_server,
            tests_location,
            ..RawAnswers::default()
        }
    }
}

fn host() -> impl Strategy<Value = HostCapabilities> {
    prop_oneof![
        Just(HostCapabilities::apple()),
        Just(HostCapabilities::other())
    ]
}

fn refine(host: HostCapabilities, raw: RawAnswers) -> RefinedAnswers {
    Refiner::new(Catalog::new(host)).refine(raw)
}

fn keys(refined: &RefinedAnswers) -> serde_json::Map<String, serde_json::Value> {
    match serde_json::to_value(refined) {
        Ok(serde_json::Value::Object(map)) => map,
        other => panic!("refined answers did not serialize to an object: {other:?}"),
    }
}

fn all_lists(refined: &RefinedAnswers) -> Vec<Browser> {
    refined
        .local_browsers()
        .iter()
        .chain(refined.local_mobile_browsers())
        .chain(refined.grid_browsers())
        .copied()
        .collect()
}

// === Topology ===

proptest! {
    /// A local+remote backend always yields both browser lists.
    #[test]
    fn prop_both_has_both_lists(raw in raw_answers(), host in host()) {
        let mut raw = raw;
        raw.backend = Some(Backend::Both);
        let map = keys(&refine(host, raw));
        prop_assert!(map.contains_key("browsers"));
        prop_assert!(map.contains_key("remoteBrowsers"));
        prop_assert!(map.contains_key("remoteName"));
        prop_assert!(map.contains_key("remoteEnv"));
    }

    /// A remote-only backend never yields a local browser list.
    #[test]
    fn prop_remote_only_has_no_browsers(raw in raw_answers(), host in host()) {
        let mut raw = raw;
        raw.backend = Some(Backend::Remote);
        let refined = refine(host, raw);
        prop_assert!(!keys(&refined).contains_key("browsers"));
        let expected = refined.grid_browsers().first().copied().unwrap_or(FALLBACK_BROWSER);
        prop_assert_eq!(refined.default_browser, Some(expected));
    }

    /// Without a remote backend no remote field survives.
    #[test]
    fn prop_local_only_has_no_remote_fields(raw in raw_answers(), host in host()) {
        let mut raw = raw;
        raw.backend = Some(Backend::Local);
        let map = keys(&refine(host, raw));
        for key in ["remoteBrowsers", "cloudProvider", "remoteName", "remoteEnv"] {
            prop_assert!(!map.contains_key(key), "unexpected key {}", key);
        }
        prop_assert!(map.contains_key("mobileBrowsers"));
    }

    /// The default browser is set exactly when a backend was chosen.
    #[test]
    fn prop_default_browser_follows_backend(raw in raw_answers(), host in host()) {
        let has_backend = raw.backend.is_some();
        let refined = refine(host, raw);
        prop_assert_eq!(refined.default_browser.is_some(), has_backend);
    }
}

// === Host filtering ===

proptest! {
    /// Safari never survives on a host without Apple automation.
    #[test]
    fn prop_no_safari_on_other_hosts(raw in raw_answers()) {
        let refined = refine(HostCapabilities::other(), raw);
        prop_assert!(!all_lists(&refined).contains(&Browser::Safari));
        prop_assert_ne!(refined.default_browser, Some(Browser::Safari));
    }

    /// No iOS platform, and so no iOS environment, without Apple automation.
    #[test]
    fn prop_no_ios_platform_on_other_hosts(raw in raw_answers()) {
        let refined = refine(HostCapabilities::other(), raw);
        prop_assert!(!refined.mobile_platform.is_some_and(MobilePlatform::includes_ios));
        let model = assemble(&refined);
        prop_assert!(!model.environment_names().iter().any(|name| name.starts_with("app.ios")));
    }

    /// Safari chosen as a local browser is kept on an Apple host.
    #[test]
    fn prop_safari_kept_on_apple(local in browsers()) {
        let mut local = local;
        local.push(Browser::Safari);
        let raw = RawAnswers::new().with_backend(Backend::Local).with_browsers(local);
        let refined = refine(HostCapabilities::apple(), raw);
        prop_assert!(refined.local_browsers().contains(&Browser::Safari));
    }

    /// Refined browser lists never repeat a browser.
    #[test]
    fn prop_browser_lists_distinct(raw in raw_answers(), host in host()) {
        let refined = refine(host, raw);
        for list in [
            refined.local_browsers(),
            refined.local_mobile_browsers(),
            refined.grid_browsers(),
        ] {
            let mut unique = list.to_vec();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(unique.len(), list.len());
        }
    }
}

// === Defaulting ===

proptest! {
    /// Refining refined answers changes nothing.
    #[test]
    fn prop_refine_is_idempotent(
        raw in raw_answers(),
        host in host(),
        config_only in any::<bool>()
    ) {
        let refiner = Refiner::new(Catalog::new(host)).with_config_only(config_only);
        let once = refiner.refine(raw);
        let twice = refiner.refine(RawAnswers::from(&once));
        prop_assert_eq!(once, twice);
    }

    /// Explicit mobile browsers always determine a matching platform.
    #[test]
    fn prop_platform_matches_mobile_browsers(mobile_browsers in browsers(), host in host()) {
        let raw = RawAnswers::new()
            .with_backend(Backend::Local)
            .with_mobile(true)
            .with_mobile_browsers(mobile_browsers);
        let refined = refine(host, raw);
        let list = refined.local_mobile_browsers();
        let ios = list.contains(&Browser::Safari);
        let android = list.iter().any(|b| Browser::ANDROID.contains(b));
        let platform = refined.mobile_platform;
        prop_assert_eq!(platform.is_some_and(MobilePlatform::includes_ios), ios);
        prop_assert_eq!(platform.is_some_and(MobilePlatform::includes_android), android);
    }
}

// === Selection and assembly ===

proptest! {
    /// Each driver is listed at most once.
    #[test]
    fn prop_webdrivers_unique(raw in raw_answers(), host in host()) {
        let drivers = select_webdrivers(&refine(host, raw));
        let mut sorted = drivers.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), drivers.len());
    }

    /// Declared packages are never selected again.
    #[test]
    fn prop_declared_packages_skipped(raw in raw_answers(), host in host()) {
        let refined = refine(host, raw);
        let all = select_packages(&refined, &DeclaredPackages::new());
        let declared: DeclaredPackages = all
            .iter()
            .step_by(2)
            .map(|p| (p.clone(), String::new()))
            .collect();
        let remaining = select_packages(&refined, &declared);
        prop_assert!(remaining.iter().all(|p| !declared.contains_key(p)));
        prop_assert_eq!(remaining.len() + declared.len(), all.len());
    }

    /// Environment names are unique and the default environment comes first.
    #[test]
    fn prop_environments_well_formed(raw in raw_answers(), host in host()) {
        let model = assemble(&refine(host, raw));
        let names = model.environment_names();
        prop_assert_eq!(names.first().copied(), Some(DEFAULT_ENV));
        let mut unique = names.clone();
        unique.sort_unstable();
        unique.dedup();
        prop_assert_eq!(unique.len(), names.len());
    }

    /// Rendering the same answers twice gives the same text.
    #[test]
    fn prop_render_stable(raw in raw_answers(), host in host()) {
        let refiner = Refiner::new(Catalog::new(host));
        let first = render(&assemble(&refiner.refine(raw.clone())));
        let second = render(&assemble(&refiner.refine(raw)));
        prop_assert_eq!(first, second);
    }
}

// === Scenarios ===

#[test]
fn scenario_local_only_two_browsers() {
    let raw = RawAnswers::new()
        .with_backend(Backend::Local)
        .with_browsers(vec![Browser::Chrome, Browser::Firefox]);
    let refined = refine(HostCapabilities::other(), raw);
    let map = keys(&refined);
    assert_eq!(map["browsers"], serde_json::json!(["chrome", "firefox"]));
    assert_eq!(map["mobileBrowsers"], serde_json::json!([]));
    assert_eq!(map["defaultBrowser"], "chrome");
    assert!(!map.contains_key("remoteBrowsers"));
    assert!(!map.contains_key("cloudProvider"));
}

#[test]
fn scenario_remote_other_no_local() {
    let raw = RawAnswers::new()
        .with_backend(Backend::Remote)
        .with_cloud_provider(CloudProvider::Other);
    let map = keys(&refine(HostCapabilities::other(), raw));
    assert!(!map.contains_key("browsers"));
    assert_eq!(map["remoteBrowsers"], serde_json::json!([]));
    assert_eq!(map["remoteName"], "remote");
    assert_eq!(
        map["remoteEnv"],
        serde_json::json!({ "username": "REMOTE_USERNAME", "access_key": "REMOTE_ACCESS_KEY" })
    );
    assert_eq!(map["defaultBrowser"], "chrome");
}

#[test]
fn scenario_default_browser_precedence() {
    let host = HostCapabilities::other();
    let firefox_first = RawAnswers::new()
        .with_backend(Backend::Local)
        .with_browsers(vec![Browser::Firefox, Browser::Chrome]);
    assert_eq!(refine(host, firefox_first).default_browser, Some(Browser::Firefox));

    let mobile_only = RawAnswers::new()
        .with_backend(Backend::Local)
        .with_browsers(vec![])
        .with_mobile(true)
        .with_mobile_browsers(vec![Browser::Chrome]);
    assert_eq!(refine(host, mobile_only).default_browser, Some(Browser::Chrome));

    let nothing = RawAnswers::new()
        .with_backend(Backend::Local)
        .with_browsers(vec![])
        .with_mobile(true)
        .with_mobile_browsers(vec![]);
    assert_eq!(refine(host, nothing).default_browser, Some(Browser::Chrome));
}

#[test]
fn scenario_webdrivers_for_three_browsers() {
    let raw = RawAnswers::new()
        .with_backend(Backend::Local)
        .with_browsers(vec![Browser::Chrome, Browser::Firefox, Browser::Safari])
        .with_mobile(true);
    let refined = refine(HostCapabilities::apple(), raw);
    let ids: Vec<&str> = select_webdrivers(&refined).iter().map(|d| d.id()).collect();
    assert_eq!(ids, vec!["chromedriver", "geckodriver", "safaridriver"]);
}

#[test]
fn scenario_typescript_mocha_with_declared_typescript() {
    let raw = RawAnswers::new().with_language_runner(LanguageRunner::TsMocha);
    let refined = refine(HostCapabilities::other(), raw);
    let declared = DeclaredPackages::from([("typescript".to_string(), String::new())]);
    let packages = select_packages(&refined, &declared);
    assert!(!packages.iter().any(|p| p == "typescript"));
    assert!(packages.iter().any(|p| p == "@types/nightwatch"));
    assert!(packages.iter().any(|p| p == "ts-node"));
}
