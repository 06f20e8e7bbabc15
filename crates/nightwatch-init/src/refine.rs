//! Answer refinement engine.
//!
//! [`Refiner::refine`] completes a sparse [`RawAnswers`] into a consistent
//! [`RefinedAnswers`]. The steps run in a fixed order because later steps
//! read fields filled by earlier ones:
//!
//! 1. backend topology split
//! 2. remote branch (name, credentials, remote browsers, remote-only default)
//! 3. local branch (host filtering, mobile browsers, default browser)
//! 4. examples flag
//! 5. tests location
//! 6. examples location
//! 7. mobile platform inference
//! 8. UI-framework plugin
//!
//! Refinement is total: unknown or missing values fall back to defaults.
//! Defaults only fill absent fields, so refining a refined record again
//! changes nothing.

use crate::answers::{join_path, RawAnswers, RefinedAnswers};
use crate::catalog::{Browser, Catalog, CloudProvider, MobilePlatform, Runner};
use crate::intent::Intent;

/// Test folder used when none was given
pub const DEFAULT_TESTS_LOCATION: &str = "test";

/// Folder generated examples are placed in
pub const EXAMPLES_FOLDER: &str = "nightwatch";

/// Sub-folder of the tests folder holding cucumber feature files
pub const FEATURES_FOLDER: &str = "features";

/// Browser used when no other browser was chosen
pub const FALLBACK_BROWSER: Browser = Browser::Chrome;

/// Completes raw answers into refined answers
#[derive(Debug, Clone)]
pub struct Refiner {
    catalog: Catalog,
    config_only: bool,
}

impl Refiner {
    /// Refiner for a catalog
    #[must_use]
    pub const fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            config_only: false,
        }
    }

    /// Only the config file is generated; examples are not forced on
    #[must_use]
    pub const fn with_config_only(mut self, config_only: bool) -> Self {
        self.config_only = config_only;
        self
    }

    /// Catalog used for host filtering
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Drop browsers the host cannot automate, and repeats
    fn host_filter(&self, browsers: &[Browser]) -> Vec<Browser> {
        let mut seen = Vec::with_capacity(browsers.len());
        for browser in self.catalog.strip_unsupported(browsers) {
            if !seen.contains(&browser) {
                seen.push(browser);
            }
        }
        seen
    }

    /// Complete a raw answer set
    #[must_use]
    pub fn refine(&self, raw: RawAnswers) -> RefinedAnswers {
        let intent = Intent::of(&raw);
        let setup = raw.language_runner_setup.unwrap_or_default();
        let runner = setup.runner();
        let host = self.catalog.host();

        // 1. topology
        let has_local = raw.has_local();
        let has_remote = raw.has_remote();

        let mut browsers = raw.browsers;
        let mut remote_browsers = raw.remote_browsers;
        let mut mobile_browsers = raw.mobile_browsers;
        let mut cloud_provider = raw.cloud_provider;
        let mut default_browser = raw.default_browser.filter(|b| host.supports(*b));
        let mut remote_name = None;
        let mut remote_env = None;
        let mut mobile_remote = false;

        // 2. remote branch
        if has_remote {
            remote_name = Some(CloudProvider::remote_name(cloud_provider).to_string());
            remote_env = Some(CloudProvider::remote_env(cloud_provider));
            let seeded = remote_browsers.unwrap_or_else(|| browsers.clone().unwrap_or_default());
            let remote = self.host_filter(&seeded);
            mobile_remote = intent.mobile;
            if !has_local {
                browsers = None;
                default_browser = Some(remote.first().copied().unwrap_or(FALLBACK_BROWSER));
            }
            remote_browsers = Some(remote);
        } else {
            remote_browsers = None;
            cloud_provider = None;
        }

        // 3. local branch
        if has_local {
            let desktop = browsers
                .map(|b| self.host_filter(&b))
                .unwrap_or_default();
            let mobile = if intent.mobile {
                match mobile_browsers {
                    Some(explicit) => self.host_filter(&explicit),
                    None => {
                        let family = self.catalog.mobile_family();
                        desktop
                            .iter()
                            .copied()
                            .filter(|b| family.contains(b))
                            .collect()
                    }
                }
            } else {
                Vec::new()
            };
            if default_browser.is_none() {
                default_browser = Some(
                    desktop
                        .first()
                        .or_else(|| mobile.first())
                        .copied()
                        .unwrap_or(FALLBACK_BROWSER),
                );
            }
            browsers = Some(desktop);
            mobile_browsers = Some(mobile);
        } else {
            mobile_browsers = mobile_browsers.map(|m| self.host_filter(&m));
        }

        // 4. examples
        let add_examples = !self.config_only || raw.add_examples.unwrap_or(false);

        // 5. tests location
        let tests_location = raw
            .tests_location
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TESTS_LOCATION.to_string());

        let feature_path = if runner == Runner::Cucumber {
            Some(
                raw.feature_path
                    .unwrap_or_else(|| join_path(&tests_location, FEATURES_FOLDER)),
            )
        } else {
            raw.feature_path
        };

        // 6. examples location
        let mut examples_location = raw.examples_location;
        if add_examples && examples_location.is_none() {
            examples_location = Some(match (runner, feature_path.as_deref()) {
                (Runner::Cucumber, Some(features)) => join_path(features, EXAMPLES_FOLDER),
                _ => EXAMPLES_FOLDER.to_string(),
            });
        }

        // 7. mobile platform
        let mut mobile_platform = raw
            .mobile_platform
            .map(|p| self.catalog.narrow_platform(p));
        if intent.mobile && mobile_platform.is_none() {
            mobile_platform = infer_platform(mobile_browsers.as_deref().unwrap_or_default());
        }

        // 8. plugins
        let mut plugins = raw.plugins;
        if let Some(framework) = raw.ui_framework {
            let list = plugins.get_or_insert_with(Vec::new);
            if !list.iter().any(|p| p == framework.plugin()) {
                list.push(framework.plugin().to_string());
            }
        }

        let testing_type = match raw.testing_type {
            Some(types) if !types.is_empty() => types,
            _ => intent.testing_types(),
        };

        let refined = RefinedAnswers {
            testing_type,
            language_runner_setup: setup,
            language: setup.language(),
            runner,
            ui_framework: raw.ui_framework,
            backend: raw.backend,
            cloud_provider,
            selenium_server: has_local && raw.selenium_server.unwrap_or(false),
            browsers,
            remote_browsers,
            mobile_browsers,
            mobile_platform,
            mobile: intent.mobile,
            mobile_remote,
            remote_name,
            remote_env,
            default_browser,
            tests_location,
            feature_path,
            add_examples,
            examples_location,
            base_url: raw.base_url,
            allow_anonymous_metrics: raw.allow_anonymous_metrics.unwrap_or(false),
            plugins,
        };
        tracing::debug!(
            backend = ?refined.backend,
            default_browser = refined.default_browser_id(),
            mobile = refined.mobile,
            "answers refined"
        );
        refined
    }
}

/// Mobile platform implied by a set of mobile browsers
#[must_use]
pub fn infer_platform(mobile_browsers: &[Browser]) -> Option<MobilePlatform> {
    let ios = mobile_browsers.contains(&Browser::Safari);
    let android = mobile_browsers.iter().any(|b| Browser::ANDROID.contains(b));
    match (ios, android) {
        (true, true) => Some(MobilePlatform::Both),
        (true, false) => Some(MobilePlatform::Ios),
        (false, true) => Some(MobilePlatform::Android),
        (false, false) => None,
    }
}
