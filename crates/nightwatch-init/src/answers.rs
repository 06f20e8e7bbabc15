//! Answer records: the sparse set produced by prompts or defaults, and the
//! refined set every downstream step consumes.
//!
//! Presence of a key is meaningful. Both records serialize with camelCase
//! keys and omit absent fields, so the JSON form mirrors the truth table the
//! refinement engine guarantees. The one exception is the refined
//! `defaultBrowser`, which is `""` rather than absent when there is no backend.

use crate::catalog::{
    Backend, Browser, CatalogId, CloudProvider, Language, LanguageRunner, MobilePlatform,
    RemoteEnv, Runner, TestingType, UiFramework,
};
use crate::result::InitResult;
use serde::{Deserialize, Serialize};

/// Sparse record of user choices; any field may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnswers {
    /// Kinds of testing selected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testing_type: Option<Vec<TestingType>>,
    /// Language and runner variant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_runner_setup: Option<LanguageRunner>,
    /// UI framework for component testing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_framework: Option<UiFramework>,
    /// Local desktop browsers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browsers: Option<Vec<Browser>>,
    /// Browsers on the remote grid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_browsers: Option<Vec<Browser>>,
    /// Mobile browsers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_browsers: Option<Vec<Browser>>,
    /// Mobile platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_platform: Option<MobilePlatform>,
    /// Backend topology
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<Backend>,
    /// Cloud provider for the remote grid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_provider: Option<CloudProvider>,
    /// Whether a local Selenium Server should be set up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selenium_server: Option<bool>,
    /// Test source folder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests_location: Option<String>,
    /// Feature-file folder (cucumber runner)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_path: Option<String>,
    /// Folder the examples are generated into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples_location: Option<String>,
    /// Base URL of the application under test
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Whether anonymous usage metrics may be sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_anonymous_metrics: Option<bool>,
    /// Whether mobile devices are targeted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<bool>,
    /// Whether example files are generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_examples: Option<bool>,
    /// Name of the remote environment group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_name: Option<String>,
    /// Remote credential variable names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_env: Option<RemoteEnv>,
    /// Whether mobile devices on the remote grid are targeted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_remote: Option<bool>,
    /// Browser used by the default environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_browser: Option<Browser>,
    /// Nightwatch plugins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<String>>,
}

impl RawAnswers {
    /// Create an empty answer set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse answers from a JSON document
    pub fn from_json(json: &str) -> InitResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether a testing type was selected
    #[must_use]
    pub fn has_testing_type(&self, kind: TestingType) -> bool {
        self.testing_type
            .as_ref()
            .is_some_and(|types| types.contains(&kind))
    }

    /// Backend includes local browsers
    #[must_use]
    pub fn has_local(&self) -> bool {
        self.backend.is_some_and(Backend::has_local)
    }

    /// Backend includes a remote grid
    #[must_use]
    pub fn has_remote(&self) -> bool {
        self.backend.is_some_and(Backend::has_remote)
    }

    /// Runner implied by the language/runner answer
    #[must_use]
    pub fn runner(&self) -> Runner {
        self.language_runner_setup.unwrap_or_default().runner()
    }

    /// Set the testing types
    #[must_use]
    pub fn with_testing_type(mut self, types: Vec<TestingType>) -> Self {
        self.testing_type = Some(types);
        self
    }

    /// Set the language/runner variant
    #[must_use]
    pub const fn with_language_runner(mut self, setup: LanguageRunner) -> Self {
        self.language_runner_setup = Some(setup);
        self
    }

    /// Set the backend
    #[must_use]
    pub const fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set the cloud provider
    #[must_use]
    pub const fn with_cloud_provider(mut self, provider: CloudProvider) -> Self {
        self.cloud_provider = Some(provider);
        self
    }

    /// Set the local desktop browsers
    #[must_use]
    pub fn with_browsers(mut self, browsers: Vec<Browser>) -> Self {
        self.browsers = Some(browsers);
        self
    }

    /// Set the remote browsers
    #[must_use]
    pub fn with_remote_browsers(mut self, browsers: Vec<Browser>) -> Self {
        self.remote_browsers = Some(browsers);
        self
    }

    /// Set the mobile browsers
    #[must_use]
    pub fn with_mobile_browsers(mut self, browsers: Vec<Browser>) -> Self {
        self.mobile_browsers = Some(browsers);
        self
    }

    /// Set whether mobile devices are targeted
    #[must_use]
    pub const fn with_mobile(mut self, mobile: bool) -> Self {
        self.mobile = Some(mobile);
        self
    }

    /// Set the UI framework
    #[must_use]
    pub const fn with_ui_framework(mut self, framework: UiFramework) -> Self {
        self.ui_framework = Some(framework);
        self
    }

    /// Set the test source folder
    #[must_use]
    pub fn with_tests_location(mut self, location: impl Into<String>) -> Self {
        self.tests_location = Some(location.into());
        self
    }
}

/// Answers after refinement; internally consistent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinedAnswers {
    /// Kinds of testing selected
    pub testing_type: Vec<TestingType>,
    /// Language and runner variant
    pub language_runner_setup: LanguageRunner,
    /// Language split out of the variant
    pub language: Language,
    /// Runner split out of the variant
    pub runner: Runner,
    /// UI framework for component testing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_framework: Option<UiFramework>,
    /// Backend topology
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<Backend>,
    /// Cloud provider, present only with a remote backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_provider: Option<CloudProvider>,
    /// Whether a local Selenium Server is set up
    pub selenium_server: bool,
    /// Local desktop browsers, present only with a local backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browsers: Option<Vec<Browser>>,
    /// Remote browsers, present only with a remote backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_browsers: Option<Vec<Browser>>,
    /// Mobile browsers, present with a local backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_browsers: Option<Vec<Browser>>,
    /// Mobile platform, explicit or inferred
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_platform: Option<MobilePlatform>,
    /// Whether mobile devices are targeted
    pub mobile: bool,
    /// Whether mobile devices on the remote grid are targeted
    pub mobile_remote: bool,
    /// Name of the remote environment group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_name: Option<String>,
    /// Remote credential variable names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_env: Option<RemoteEnv>,
    /// Browser used by the default environment; `""` in JSON when no backend was chosen
    #[serde(default, with = "default_browser_field")]
    pub default_browser: Option<Browser>,
    /// Test source folder
    pub tests_location: String,
    /// Feature-file folder (cucumber runner)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_path: Option<String>,
    /// Whether example files are generated
    pub add_examples: bool,
    /// Folder the examples are generated into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples_location: Option<String>,
    /// Base URL of the application under test
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Whether anonymous usage metrics may be sent
    pub allow_anonymous_metrics: bool,
    /// Nightwatch plugins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<String>>,
}

impl RefinedAnswers {
    /// Whether a testing type was selected
    #[must_use]
    pub fn has_testing_type(&self, kind: TestingType) -> bool {
        self.testing_type.contains(&kind)
    }

    /// Backend includes local browsers
    #[must_use]
    pub fn has_local(&self) -> bool {
        self.backend.is_some_and(Backend::has_local)
    }

    /// Backend includes a remote grid
    #[must_use]
    pub fn has_remote(&self) -> bool {
        self.backend.is_some_and(Backend::has_remote)
    }

    /// Local desktop browsers, empty when absent
    #[must_use]
    pub fn local_browsers(&self) -> &[Browser] {
        self.browsers.as_deref().unwrap_or_default()
    }

    /// Mobile browsers, empty when absent
    #[must_use]
    pub fn local_mobile_browsers(&self) -> &[Browser] {
        self.mobile_browsers.as_deref().unwrap_or_default()
    }

    /// Remote browsers, empty when absent
    #[must_use]
    pub fn grid_browsers(&self) -> &[Browser] {
        self.remote_browsers.as_deref().unwrap_or_default()
    }

    /// Plugins, empty when absent
    #[must_use]
    pub fn plugin_list(&self) -> &[String] {
        self.plugins.as_deref().unwrap_or_default()
    }

    /// Default browser id, empty when no backend was chosen
    #[must_use]
    pub fn default_browser_id(&self) -> &'static str {
        self.default_browser.map_or("", Browser::id)
    }
}

/// `defaultBrowser` is always present once refined: a browser id, or `""`
mod default_browser_field {
    use crate::catalog::Browser;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Browser>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(browser) => browser.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Browser>, D::Error> {
        let id = String::deserialize(deserializer)?;
        if id.is_empty() {
            return Ok(None);
        }
        id.parse().map(Some).map_err(D::Error::custom)
    }
}

impl From<&RefinedAnswers> for RawAnswers {
    fn from(refined: &RefinedAnswers) -> Self {
        Self {
            testing_type: Some(refined.testing_type.clone()),
            language_runner_setup: Some(refined.language_runner_setup),
            ui_framework: refined.ui_framework,
            browsers: refined.browsers.clone(),
            remote_browsers: refined.remote_browsers.clone(),
            mobile_browsers: refined.mobile_browsers.clone(),
            mobile_platform: refined.mobile_platform,
            backend: refined.backend,
            cloud_provider: refined.cloud_provider,
            selenium_server: Some(refined.selenium_server),
            tests_location: Some(refined.tests_location.clone()),
            feature_path: refined.feature_path.clone(),
            examples_location: refined.examples_location.clone(),
            base_url: refined.base_url.clone(),
            allow_anonymous_metrics: Some(refined.allow_anonymous_metrics),
            mobile: Some(refined.mobile),
            add_examples: Some(refined.add_examples),
            remote_name: refined.remote_name.clone(),
            remote_env: refined.remote_env.clone(),
            mobile_remote: Some(refined.mobile_remote),
            default_browser: refined.default_browser,
            plugins: refined.plugins.clone(),
        }
    }
}

/// Join two relative folder paths with `/`, as written into the config file
#[must_use]
pub fn join_path(base: &str, child: &str) -> String {
    let base = base.trim_end_matches('/');
    let child = child.trim_start_matches("./").trim_start_matches('/');
    if base.is_empty() || base == "." {
        child.to_string()
    } else {
        format!("{base}/{child}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, HostCapabilities};
    use crate::refine::Refiner;

    #[test]
    fn test_default_browser_empty_without_backend() {
        let refined = Refiner::new(Catalog::new(HostCapabilities::other())).refine(RawAnswers::new());
        assert!(refined.backend.is_none());
        let json = serde_json::to_value(&refined).unwrap();
        assert_eq!(json["defaultBrowser"], "");

        let back: RefinedAnswers = serde_json::from_value(json).unwrap();
        assert_eq!(back.default_browser, None);
    }

    #[test]
    fn test_default_browser_id_serialized() {
        let refined = Refiner::new(Catalog::new(HostCapabilities::other())).refine(
            RawAnswers::new()
                .with_backend(Backend::Local)
                .with_browsers(vec![Browser::Firefox]),
        );
        let json = serde_json::to_value(&refined).unwrap();
        assert_eq!(json["defaultBrowser"], "firefox");
    }

    #[test]
    fn test_empty_raw_serializes_to_empty_object() {
        let json = serde_json::to_string(&RawAnswers::new()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_raw_from_camel_case_json() {
        let raw = RawAnswers::from_json(
            r#"{"testingType":["e2e"],"languageRunnerSetup":"ts-mocha","backend":"both","browsers":["chrome"],"cloudProvider":"saucelabs","testsLocation":"specs"}"#,
        )
        .unwrap();
        assert_eq!(raw.testing_type, Some(vec![TestingType::E2e]));
        assert_eq!(raw.language_runner_setup, Some(LanguageRunner::TsMocha));
        assert_eq!(raw.backend, Some(Backend::Both));
        assert_eq!(raw.cloud_provider, Some(CloudProvider::SauceLabs));
        assert_eq!(raw.tests_location.as_deref(), Some("specs"));
        assert!(raw.mobile.is_none());
    }

    #[test]
    fn test_raw_rejects_unknown_browser() {
        assert!(RawAnswers::from_json(r#"{"browsers":["netscape"]}"#).is_err());
    }

    #[test]
    fn test_topology_helpers() {
        let raw = RawAnswers::new().with_backend(Backend::Both);
        assert!(raw.has_local());
        assert!(raw.has_remote());
        assert!(!RawAnswers::new().has_local());
        assert!(!RawAnswers::new().has_remote());
    }

    #[test]
    fn test_runner_defaults_to_nightwatch() {
        assert_eq!(RawAnswers::new().runner(), Runner::Nightwatch);
        let raw = RawAnswers::new().with_language_runner(LanguageRunner::JsCucumber);
        assert_eq!(raw.runner(), Runner::Cucumber);
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("test", "features"), "test/features");
        assert_eq!(join_path("test/", "/features"), "test/features");
        assert_eq!(join_path(".", "nightwatch"), "nightwatch");
        assert_eq!(join_path("", "nightwatch"), "nightwatch");
    }

    #[test]
    fn test_has_testing_type() {
        let raw = RawAnswers::new().with_testing_type(vec![TestingType::Component]);
        assert!(raw.has_testing_type(TestingType::Component));
        assert!(!raw.has_testing_type(TestingType::E2e));
    }
}
