//! Option catalog: the choice sets offered by the wizard.
//!
//! Every enumerated answer has a stable string id (used in prompts, the
//! defaults tables and the rendered config) and a human label. Apple-only
//! entries are filtered through a single injected [`HostCapabilities`] fact.

use crate::result::{InitError, InitResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A `(label, id)` pair shown by the prompt engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    /// Human readable label
    pub label: &'static str,
    /// Stable id stored in the answers
    pub id: &'static str,
}

impl Choice {
    /// Create a new choice
    #[must_use]
    pub const fn new(label: &'static str, id: &'static str) -> Self {
        Self { label, id }
    }
}

/// Enumerated answer values with a stable id and label
pub trait CatalogId: Copy + Sized + 'static {
    /// Field name used in error messages
    const FIELD: &'static str;

    /// Every variant, in catalog order
    fn all() -> &'static [Self];

    /// Stable id
    fn id(self) -> &'static str;

    /// Human readable label
    fn label(self) -> &'static str;

    /// Choice pair for the prompt engine
    fn choice(self) -> Choice {
        Choice::new(self.label(), self.id())
    }

    /// Look a variant up by id
    fn from_id(id: &str) -> InitResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|v| v.id() == id)
            .ok_or_else(|| InitError::unknown_choice(Self::FIELD, id))
    }
}

macro_rules! catalog_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => ($id:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $id)] $variant ),+
        }

        impl CatalogId for $name {
            const FIELD: &'static str = $field;

            fn all() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn id(self) -> &'static str {
                match self {
                    $(Self::$variant => $id),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = InitError;

            fn from_str(s: &str) -> InitResult<Self> {
                Self::from_id(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.id())
            }
        }
    };
}

catalog_enum! {
    /// Browser families, desktop and mobile
    Browser, "browser" {
        /// Mozilla Firefox
        Firefox => ("firefox", "Firefox"),
        /// Google Chrome
        Chrome => ("chrome", "Chrome"),
        /// Microsoft Edge
        Edge => ("edge", "Edge"),
        /// Apple Safari
        Safari => ("safari", "Safari"),
    }
}

impl Browser {
    /// Browsers that can run on a mobile device
    pub const MOBILE: [Self; 3] = [Self::Chrome, Self::Firefox, Self::Safari];

    /// Mobile browsers available on Android
    pub const ANDROID: [Self; 2] = [Self::Chrome, Self::Firefox];

    /// Whether this browser only runs on Apple platforms
    #[must_use]
    pub const fn is_apple_only(self) -> bool {
        matches!(self, Self::Safari)
    }

    /// Capability name used by the W3C WebDriver `browserName`
    #[must_use]
    pub const fn capability_name(self) -> &'static str {
        match self {
            Self::Firefox => "firefox",
            Self::Chrome => "chrome",
            Self::Edge => "MicrosoftEdge",
            Self::Safari => "safari",
        }
    }
}

catalog_enum! {
    /// Mobile platforms to run tests on
    MobilePlatform, "mobile platform" {
        /// Android devices
        Android => ("android", "Android"),
        /// iOS devices
        Ios => ("ios", "iOS"),
        /// Android and iOS
        Both => ("both", "Both"),
    }
}

impl MobilePlatform {
    /// Whether Android is targeted
    #[must_use]
    pub const fn includes_android(self) -> bool {
        matches!(self, Self::Android | Self::Both)
    }

    /// Whether iOS is targeted
    #[must_use]
    pub const fn includes_ios(self) -> bool {
        matches!(self, Self::Ios | Self::Both)
    }
}

catalog_enum! {
    /// Kind of testing to set up
    TestingType, "testing type" {
        /// End-to-end testing
        E2e => ("e2e", "End-to-End testing"),
        /// Component testing
        Component => ("component", "Component testing"),
        /// Native mobile app testing
        App => ("app", "Mobile app testing"),
    }
}

catalog_enum! {
    /// Combined language and test runner setup
    #[derive(Default)]
    LanguageRunner, "language/runner" {
        /// JavaScript with the built-in runner
        #[default]
        JsNightwatch => ("js-nightwatch", "JavaScript / default"),
        /// TypeScript with the built-in runner
        TsNightwatch => ("ts-nightwatch", "TypeScript / default"),
        /// JavaScript with Mocha
        JsMocha => ("js-mocha", "JavaScript / Mocha"),
        /// TypeScript with Mocha
        TsMocha => ("ts-mocha", "TypeScript / Mocha"),
        /// JavaScript with CucumberJS
        JsCucumber => ("js-cucumber", "JavaScript / CucumberJS"),
        /// TypeScript with CucumberJS
        TsCucumber => ("ts-cucumber", "TypeScript / CucumberJS"),
    }
}

impl LanguageRunner {
    /// Language half of the setup
    #[must_use]
    pub const fn language(self) -> Language {
        match self {
            Self::JsNightwatch | Self::JsMocha | Self::JsCucumber => Language::Js,
            Self::TsNightwatch | Self::TsMocha | Self::TsCucumber => Language::Ts,
        }
    }

    /// Runner half of the setup
    #[must_use]
    pub const fn runner(self) -> Runner {
        match self {
            Self::JsNightwatch | Self::TsNightwatch => Runner::Nightwatch,
            Self::JsMocha | Self::TsMocha => Runner::Mocha,
            Self::JsCucumber | Self::TsCucumber => Runner::Cucumber,
        }
    }
}

catalog_enum! {
    /// Language the tests are written in
    Language, "language" {
        /// JavaScript
        Js => ("js", "JavaScript"),
        /// TypeScript
        Ts => ("ts", "TypeScript"),
    }
}

catalog_enum! {
    /// Test runner
    Runner, "runner" {
        /// Built-in Nightwatch runner
        Nightwatch => ("nightwatch", "Nightwatch"),
        /// Mocha
        Mocha => ("mocha", "Mocha"),
        /// CucumberJS (BDD)
        Cucumber => ("cucumber", "CucumberJS"),
    }
}

catalog_enum! {
    /// UI framework for component testing
    UiFramework, "UI framework" {
        /// React
        React => ("react", "React"),
        /// Vue.js
        Vue => ("vue", "Vue.js"),
        /// Storybook
        Storybook => ("storybook", "Storybook"),
    }
}

impl UiFramework {
    /// Plugin package that adds component testing for this framework
    #[must_use]
    pub const fn plugin(self) -> &'static str {
        match self {
            Self::React => "@nightwatch/react",
            Self::Vue => "@nightwatch/vue",
            Self::Storybook => "@nightwatch/storybook",
        }
    }
}

catalog_enum! {
    /// Where the tests run
    Backend, "backend" {
        /// Local browsers
        Local => ("local", "On my local machine"),
        /// Remote grid or cloud provider
        Remote => ("remote", "On a remote machine (cloud)"),
        /// Both local and remote
        Both => ("both", "Both"),
    }
}

impl Backend {
    /// Whether local browsers are used
    #[must_use]
    pub const fn has_local(self) -> bool {
        matches!(self, Self::Local | Self::Both)
    }

    /// Whether a remote grid is used
    #[must_use]
    pub const fn has_remote(self) -> bool {
        matches!(self, Self::Remote | Self::Both)
    }
}

catalog_enum! {
    /// Cloud browser-grid provider
    CloudProvider, "cloud provider" {
        /// BrowserStack
        BrowserStack => ("browserstack", "BrowserStack"),
        /// Sauce Labs
        SauceLabs => ("saucelabs", "Sauce Labs"),
        /// Any other Selenium grid
        Other => ("other", "Other providers or remote selenium-server"),
    }
}

/// Environment variable names holding remote grid credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEnv {
    /// Variable holding the user name
    pub username: String,
    /// Variable holding the access key
    pub access_key: String,
}

impl RemoteEnv {
    /// Create a new credential mapping
    #[must_use]
    pub fn new(username: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            access_key: access_key.into(),
        }
    }
}

impl CloudProvider {
    /// Credential variable names for a provider; unknown providers get the generic pair
    #[must_use]
    pub fn remote_env(provider: Option<Self>) -> RemoteEnv {
        match provider {
            Some(Self::BrowserStack) => {
                RemoteEnv::new("BROWSERSTACK_USERNAME", "BROWSERSTACK_ACCESS_KEY")
            }
            Some(Self::SauceLabs) => RemoteEnv::new("SAUCE_USERNAME", "SAUCE_ACCESS_KEY"),
            Some(Self::Other) | None => RemoteEnv::new("REMOTE_USERNAME", "REMOTE_ACCESS_KEY"),
        }
    }

    /// Name used for the remote environment group
    #[must_use]
    pub fn remote_name(provider: Option<Self>) -> &'static str {
        match provider {
            Some(Self::Other) | None => "remote",
            Some(p) => p.id(),
        }
    }

    /// Selenium hub host and port
    #[must_use]
    pub const fn hub(self) -> (&'static str, u16) {
        match self {
            Self::BrowserStack => ("hub.browserstack.com", 443),
            Self::SauceLabs => ("ondemand.saucelabs.com", 443),
            Self::Other => ("localhost", 4444),
        }
    }
}

/// Facts about the machine the wizard runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    /// Whether Safari / iOS automation is available on this host
    pub apple_automation: bool,
}

impl HostCapabilities {
    /// Detect the capabilities of the current host
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            apple_automation: cfg!(target_os = "macos"),
        }
    }

    /// An Apple desktop host
    #[must_use]
    pub const fn apple() -> Self {
        Self {
            apple_automation: true,
        }
    }

    /// Any non-Apple host
    #[must_use]
    pub const fn other() -> Self {
        Self {
            apple_automation: false,
        }
    }

    /// Whether a browser can be automated on this host
    #[must_use]
    pub const fn supports(self, browser: Browser) -> bool {
        self.apple_automation || !browser.is_apple_only()
    }
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self::detect()
    }
}

/// The choice sets offered by the wizard, filtered for one host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    host: HostCapabilities,
    desktop_browsers: Vec<Browser>,
    mobile_browsers: Vec<Browser>,
}

impl Catalog {
    /// Standard catalog for a host
    #[must_use]
    pub fn new(host: HostCapabilities) -> Self {
        Self {
            host,
            desktop_browsers: Browser::all().to_vec(),
            mobile_browsers: Browser::MOBILE.to_vec(),
        }
    }

    /// Catalog with substituted browser sets
    #[must_use]
    pub fn with_browsers(
        host: HostCapabilities,
        desktop_browsers: Vec<Browser>,
        mobile_browsers: Vec<Browser>,
    ) -> Self {
        Self {
            host,
            desktop_browsers,
            mobile_browsers,
        }
    }

    /// Host facts this catalog was built for
    #[must_use]
    pub const fn host(&self) -> HostCapabilities {
        self.host
    }

    /// Browsers that belong to the mobile-capable family
    #[must_use]
    pub fn mobile_family(&self) -> &[Browser] {
        &self.mobile_browsers
    }

    /// Desktop browsers offered on this host
    #[must_use]
    pub fn desktop_browser_choices(&self) -> Vec<Choice> {
        self.desktop_browsers
            .iter()
            .filter(|b| self.host.supports(**b))
            .map(|b| b.choice())
            .collect()
    }

    /// Mobile browsers offered on this host
    #[must_use]
    pub fn mobile_browser_choices(&self) -> Vec<Choice> {
        self.mobile_browsers
            .iter()
            .filter(|b| self.host.supports(**b))
            .map(|b| {
                if b.is_apple_only() {
                    Choice::new("Safari (iOS)", b.id())
                } else {
                    b.choice()
                }
            })
            .collect()
    }

    /// Mobile platforms offered on this host
    #[must_use]
    pub fn mobile_platform_choices(&self) -> Vec<Choice> {
        MobilePlatform::all()
            .iter()
            .filter(|p| self.host.apple_automation || !p.includes_ios())
            .map(|p| p.choice())
            .collect()
    }

    /// Narrow a platform to what the host can set up; iOS falls back to Android
    #[must_use]
    pub const fn narrow_platform(&self, platform: MobilePlatform) -> MobilePlatform {
        if self.host.apple_automation || !platform.includes_ios() {
            platform
        } else {
            MobilePlatform::Android
        }
    }

    /// Remove browsers the host cannot automate
    #[must_use]
    pub fn strip_unsupported(&self, browsers: &[Browser]) -> Vec<Browser> {
        browsers
            .iter()
            .copied()
            .filter(|b| self.host.supports(*b))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(HostCapabilities::detect())
    }
}

/// Choices for any fully enumerated answer
#[must_use]
pub fn choices_of<T: CatalogId>() -> Vec<Choice> {
    T::all().iter().map(|v| v.choice()).collect()
}
