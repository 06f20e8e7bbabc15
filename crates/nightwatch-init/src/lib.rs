//! nightwatch-init: answer refinement and config derivation for Nightwatch projects
//!
//! Takes a sparse set of choices (from prompts, command-line flags or an
//! embedded defaults table) and expands it into a complete, consistent
//! project configuration: browsers, local/remote topology, mobile platforms,
//! example paths, packages and webdrivers to install, and the text of
//! `nightwatch.conf.js`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────┐   ┌──────────┐   ┌───────────────┐
//! │ QuestionFlow │   │          │   │          │──►│ select_*      │
//! │   or         │──►│ Intent   │──►│ Refiner  │   └───────────────┘
//! │ DefaultsTable│   │ (seed)   │   │          │   ┌───────────────┐
//! └──────────────┘   └──────────┘   └──────────┘──►│ assemble      │
//!        ▲                               ▲         │   └► render   │
//!        └──────────── Catalog ──────────┘         └───────────────┘
//! ```
//!
//! Everything here is pure apart from [`read_declared_packages`]. Host
//! facts come in through [`HostCapabilities`]; prompting goes through the
//! [`Prompter`] trait.

#![warn(missing_docs)]

mod answers;
mod catalog;
mod config_model;
mod defaults;
mod intent;
mod questions;
mod refine;
mod render;
mod result;
mod select;

pub use answers::{join_path, RawAnswers, RefinedAnswers};
pub use catalog::{
    choices_of, Backend, Browser, Catalog, CatalogId, Choice, CloudProvider, HostCapabilities,
    Language, LanguageRunner, MobilePlatform, RemoteEnv, Runner, TestingType, UiFramework,
};
pub use config_model::{
    assemble, ConfigModel, Environment, TestRunnerSettings, ANDROID_AVD, APPIUM_PORT, DEFAULT_ENV,
    SELENIUM_PORT, SELENIUM_SERVER_ENV,
};
pub use defaults::DefaultsTable;
pub use intent::{seed_from_flags, Intent, LaunchFlags};
pub use questions::{
    questions, Answer, Prompt, Prompter, Question, QuestionFlow, QuestionId, QuestionKind,
    DEFAULT_BASE_URL, DEFAULT_COMPONENT_BASE_URL, SELECT_AT_LEAST_ONE, VALUE_REQUIRED,
};
pub use refine::{
    infer_platform, Refiner, DEFAULT_TESTS_LOCATION, EXAMPLES_FOLDER, FALLBACK_BROWSER,
    FEATURES_FOLDER,
};
pub use render::render;
pub use result::{InitError, InitResult};
pub use select::{
    parse_declared_packages, read_declared_packages, select_packages, select_webdrivers,
    webdrivers_for, DeclaredPackages, Webdriver, APPIUM_PACKAGE, BASE_PACKAGE, CUCUMBER_PACKAGE,
    MOBILE_HELPER_PACKAGE, SELENIUM_SERVER_PACKAGE, TYPESCRIPT_PACKAGES,
};

/// Refine, assemble and render in one step
#[must_use]
pub fn generate_config(refiner: &Refiner, raw: RawAnswers) -> (RefinedAnswers, String) {
    let refined = refiner.refine(raw);
    let text = render(&assemble(&refined));
    (refined, text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod pipeline_tests {
        use super::*;

        #[test]
        fn test_unattended_web_run() {
            let table = DefaultsTable::load().unwrap();
            let flags = LaunchFlags::new().with_non_interactive(true);
            let refiner = Refiner::new(Catalog::new(HostCapabilities::other()));
            let (refined, text) = generate_config(&refiner, table.answers_for(&flags));

            assert_eq!(refined.default_browser, Some(Browser::Chrome));
            assert_eq!(select_webdrivers(&refined), vec![Webdriver::Chromedriver]);
            assert_eq!(
                select_packages(&refined, &DeclaredPackages::new()),
                vec![BASE_PACKAGE]
            );
            assert!(text.contains("    chrome: {\n"));
        }

        #[test]
        fn test_unattended_native_run() {
            let table = DefaultsTable::load().unwrap();
            let flags = LaunchFlags::new()
                .with_non_interactive(true)
                .with_native(true);
            let refiner = Refiner::new(Catalog::new(HostCapabilities::other()));
            let (refined, text) = generate_config(&refiner, table.answers_for(&flags));

            assert_eq!(refined.testing_type, vec![TestingType::App]);
            assert_eq!(refined.mobile_platform, Some(MobilePlatform::Android));
            assert!(select_webdrivers(&refined).is_empty());
            assert!(select_packages(&refined, &DeclaredPackages::new())
                .contains(&APPIUM_PACKAGE.to_string()));
            assert!(text.contains("'app.android.emulator': {"));
            assert!(!text.contains("app.ios"));
        }

        #[test]
        fn test_unattended_mobile_run_on_apple() {
            let table = DefaultsTable::load().unwrap();
            let flags = LaunchFlags::new()
                .with_non_interactive(true)
                .with_mobile(true)
                .with_browsers(vec![Browser::Chrome, Browser::Safari]);
            let refiner = Refiner::new(Catalog::new(HostCapabilities::apple()));
            let (refined, _) = generate_config(&refiner, table.answers_for(&flags));

            assert_eq!(
                refined.mobile_browsers,
                Some(vec![Browser::Chrome, Browser::Safari])
            );
            assert_eq!(refined.mobile_platform, Some(MobilePlatform::Both));
            assert_eq!(
                select_webdrivers(&refined),
                vec![Webdriver::Chromedriver, Webdriver::Safaridriver]
            );
        }
    }
}
