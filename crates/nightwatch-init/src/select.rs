//! Package and webdriver selection.
//!
//! Both selectors are pure. The only I/O is [`read_declared_packages`],
//! whose failure callers treat as "nothing declared yet".

use crate::answers::RefinedAnswers;
use crate::catalog::{Browser, Language, Runner, TestingType};
use crate::result::{InitError, InitResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

/// Package every project gets
pub const BASE_PACKAGE: &str = "nightwatch";

/// TypeScript toolchain packages
pub const TYPESCRIPT_PACKAGES: [&str; 3] = ["typescript", "@types/nightwatch", "ts-node"];

/// Cucumber runner package
pub const CUCUMBER_PACKAGE: &str = "@cucumber/cucumber";

/// Helper that downloads and starts a Selenium Server
pub const SELENIUM_SERVER_PACKAGE: &str = "@nightwatch/selenium-server";

/// Helper that prepares Android/iOS devices
pub const MOBILE_HELPER_PACKAGE: &str = "@nightwatch/mobile-helper";

/// Native app automation server
pub const APPIUM_PACKAGE: &str = "appium";

/// Packages already listed in a project manifest, name to version range
pub type DeclaredPackages = BTreeMap<String, String>;

/// Native driver a browser family needs locally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Webdriver {
    /// Chrome, desktop and Android
    Chromedriver,
    /// Firefox, desktop and Android
    Geckodriver,
    /// Safari; ships with macOS and only needs enabling
    Safaridriver,
}

impl Webdriver {
    /// Driver id
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Chromedriver => "chromedriver",
            Self::Geckodriver => "geckodriver",
            Self::Safaridriver => "safaridriver",
        }
    }

    /// Driver for a browser family, if it needs one
    #[must_use]
    pub const fn for_browser(browser: Browser) -> Option<Self> {
        match browser {
            Browser::Chrome => Some(Self::Chromedriver),
            Browser::Firefox => Some(Self::Geckodriver),
            Browser::Safari => Some(Self::Safaridriver),
            Browser::Edge => None,
        }
    }

    /// npm package providing the driver; safaridriver is installed with the OS
    #[must_use]
    pub const fn npm_package(self) -> Option<&'static str> {
        match self {
            Self::Chromedriver => Some("chromedriver"),
            Self::Geckodriver => Some("geckodriver"),
            Self::Safaridriver => None,
        }
    }
}

impl fmt::Display for Webdriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Drivers needed by a set of browsers, each once, in driver order
pub fn webdrivers_for(browsers: impl IntoIterator<Item = Browser>) -> Vec<Webdriver> {
    browsers
        .into_iter()
        .filter_map(Webdriver::for_browser)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Drivers for the local desktop and mobile browsers
#[must_use]
pub fn select_webdrivers(refined: &RefinedAnswers) -> Vec<Webdriver> {
    webdrivers_for(
        refined
            .local_browsers()
            .iter()
            .chain(refined.local_mobile_browsers())
            .copied(),
    )
}

/// Packages to install, minus those already declared
#[must_use]
pub fn select_packages(refined: &RefinedAnswers, declared: &DeclaredPackages) -> Vec<String> {
    let mut packages = vec![BASE_PACKAGE.to_string()];

    if refined.language == Language::Ts {
        packages.extend(TYPESCRIPT_PACKAGES.iter().map(ToString::to_string));
    }
    if refined.runner == Runner::Cucumber {
        packages.push(CUCUMBER_PACKAGE.to_string());
    }
    if refined.selenium_server {
        packages.push(SELENIUM_SERVER_PACKAGE.to_string());
    }
    if refined.mobile {
        packages.push(MOBILE_HELPER_PACKAGE.to_string());
    }
    if refined.has_testing_type(TestingType::App) {
        packages.push(APPIUM_PACKAGE.to_string());
    }
    packages.extend(refined.plugin_list().iter().cloned());

    let mut seen = BTreeSet::new();
    packages.retain(|p| !declared.contains_key(p) && seen.insert(p.clone()));
    packages
}

/// Read `dependencies` and `devDependencies` from a `package.json`
pub fn read_declared_packages(manifest: &Path) -> InitResult<DeclaredPackages> {
    let text = std::fs::read_to_string(manifest)
        .map_err(|e| InitError::manifest(manifest.display().to_string(), e.to_string()))?;
    parse_declared_packages(&text)
        .map_err(|e| InitError::manifest(manifest.display().to_string(), e.to_string()))
}

/// Parse the dependency tables out of manifest text
pub fn parse_declared_packages(text: &str) -> InitResult<DeclaredPackages> {
    let manifest: serde_json::Value = serde_json::from_str(text)?;
    let mut declared = DeclaredPackages::new();
    for table in ["dependencies", "devDependencies"] {
        if let Some(entries) = manifest.get(table).and_then(serde_json::Value::as_object) {
            for (name, version) in entries {
                let version = version.as_str().unwrap_or_default().to_string();
                declared.insert(name.clone(), version);
            }
        }
    }
    Ok(declared)
}
