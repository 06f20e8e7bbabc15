//! Config model assembly.
//!
//! [`assemble`] turns refined answers into the structure rendered into
//! `nightwatch.conf.js`. Environments are emitted in a fixed category order
//! (default, local desktop, local mobile, remote, selenium server), so the
//! same answers always produce the same text.

use crate::answers::{join_path, RefinedAnswers};
use crate::catalog::{
    Browser, CatalogId, CloudProvider, Language, MobilePlatform, Runner, TestingType,
};
use crate::questions::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Name of the environment every other one falls back to
pub const DEFAULT_ENV: &str = "default";

/// Name of the local Selenium Server environment
pub const SELENIUM_SERVER_ENV: &str = "selenium_server";

/// Android virtual device created by the mobile helper
pub const ANDROID_AVD: &str = "nightwatch-android-11";

/// Port appium listens on
pub const APPIUM_PORT: u16 = 4723;

/// Port a local Selenium Server listens on
pub const SELENIUM_PORT: u16 = 4444;

/// One entry of the `test_settings` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Environment name passed to `--env`
    pub name: String,
    /// Settings object for this environment
    pub settings: Value,
}

impl Environment {
    fn new(name: impl Into<String>, settings: Value) -> Self {
        Self {
            name: name.into(),
            settings,
        }
    }
}

/// Third-party test runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRunnerSettings {
    /// Runner type
    pub runner: Runner,
    /// Runner options
    pub options: Value,
}

impl TestRunnerSettings {
    /// Settings for a runner; the built-in runner needs none
    #[must_use]
    pub fn for_answers(refined: &RefinedAnswers) -> Option<Self> {
        match refined.runner {
            Runner::Nightwatch => None,
            Runner::Mocha => Some(Self {
                runner: Runner::Mocha,
                options: json!({ "ui": "bdd", "reporter": "list" }),
            }),
            Runner::Cucumber => Some(Self {
                runner: Runner::Cucumber,
                options: json!({
                    "feature_path": refined.feature_path.clone().unwrap_or_default(),
                }),
            }),
        }
    }
}

/// Everything written into the generated config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigModel {
    /// Folders scanned for tests
    pub src_folders: Vec<String>,
    /// Page object folders
    pub page_objects_path: Vec<String>,
    /// Custom command folders
    pub custom_commands_path: Vec<String>,
    /// Custom assertion folders
    pub custom_assertions_path: Vec<String>,
    /// Nightwatch plugins
    pub plugins: Vec<String>,
    /// Feature-file folder for the cucumber runner
    pub feature_path: Option<String>,
    /// Runner settings when not using the built-in runner
    pub test_runner: Option<TestRunnerSettings>,
    /// URL opened by `browser.url()` without arguments
    pub launch_url: String,
    /// Browser of the default environment; empty when none was chosen
    pub default_browser: String,
    /// Named environments, in emission order
    pub environments: Vec<Environment>,
}

impl ConfigModel {
    /// Look an environment up by name
    #[must_use]
    pub fn environment(&self, name: &str) -> Option<&Environment> {
        self.environments.iter().find(|e| e.name == name)
    }

    /// Environment names, in emission order
    #[must_use]
    pub fn environment_names(&self) -> Vec<&str> {
        self.environments.iter().map(|e| e.name.as_str()).collect()
    }
}

/// Build the config model for a refined answer set
#[must_use]
pub fn assemble(refined: &RefinedAnswers) -> ConfigModel {
    let (src_folders, helpers) = source_folders(refined);
    let (page_objects_path, custom_commands_path, custom_assertions_path) =
        helpers.unwrap_or_default();
    let launch_url = refined
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let mut environments = vec![default_environment(refined, &launch_url)];
    environments.extend(desktop_environments(refined));
    environments.extend(mobile_environments(refined));
    environments.extend(remote_environments(refined));
    if refined.selenium_server {
        environments.push(selenium_server_environment(refined));
    }

    ConfigModel {
        src_folders,
        page_objects_path,
        custom_commands_path,
        custom_assertions_path,
        plugins: refined.plugin_list().to_vec(),
        feature_path: refined.feature_path.clone(),
        test_runner: TestRunnerSettings::for_answers(refined),
        launch_url,
        default_browser: refined.default_browser_id().to_string(),
        environments,
    }
}

type HelperFolders = (Vec<String>, Vec<String>, Vec<String>);

fn source_folders(refined: &RefinedAnswers) -> (Vec<String>, Option<HelperFolders>) {
    let mut folders = vec![refined.tests_location.clone()];
    let mut helpers = None;

    let examples = refined
        .examples_location
        .as_deref()
        .filter(|_| refined.add_examples);
    if let Some(examples) = examples {
        match (refined.language, refined.runner) {
            (Language::Js, Runner::Nightwatch) => {
                folders.push(join_path(examples, "specs"));
                helpers = Some((
                    vec![join_path(examples, "page-objects")],
                    vec![join_path(examples, "custom-commands")],
                    vec![join_path(examples, "custom-assertions")],
                ));
            }
            (Language::Js, Runner::Mocha) => folders.push(join_path(examples, "specs")),
            (Language::Ts, Runner::Nightwatch) => folders.push(examples.to_string()),
            _ => {}
        }
    }

    let mut seen = std::collections::HashSet::new();
    folders.retain(|f| seen.insert(f.clone()));
    (folders, helpers)
}

fn local_webdriver() -> Value {
    json!({ "start_process": true, "server_path": "" })
}

fn default_environment(refined: &RefinedAnswers, launch_url: &str) -> Environment {
    let browser_name = refined.default_browser.map_or("", Browser::capability_name);
    Environment::new(
        DEFAULT_ENV,
        json!({
            "disable_error_log": false,
            "launch_url": launch_url,
            "screenshots": {
                "enabled": false,
                "path": "screens",
                "on_failure": true,
            },
            "desiredCapabilities": { "browserName": browser_name },
            "webdriver": {
                "start_process": refined.has_local(),
                "server_path": "",
            },
        }),
    )
}

fn desktop_capabilities(browser: Browser) -> Value {
    let name = browser.capability_name();
    match browser {
        Browser::Chrome => json!({ "browserName": name, "goog:chromeOptions": { "args": [] } }),
        Browser::Firefox => json!({ "browserName": name, "moz:firefoxOptions": { "args": [] } }),
        Browser::Edge => json!({ "browserName": name, "ms:edgeOptions": { "args": [] } }),
        Browser::Safari => json!({ "browserName": name }),
    }
}

fn desktop_environments(refined: &RefinedAnswers) -> Vec<Environment> {
    refined
        .local_browsers()
        .iter()
        .map(|b| {
            Environment::new(
                b.id(),
                json!({
                    "desiredCapabilities": desktop_capabilities(*b),
                    "webdriver": local_webdriver(),
                }),
            )
        })
        .collect()
}

fn android_browser(browser: Browser, real: bool) -> Value {
    let mut caps = match browser {
        Browser::Firefox => json!({
            "browserName": "firefox",
            "moz:firefoxOptions": { "androidPackage": "org.mozilla.firefox" },
        }),
        _ => json!({
            "browserName": "chrome",
            "goog:chromeOptions": { "androidPackage": "com.android.chrome", "w3c": true },
        }),
    };
    caps["real_mobile"] = json!(real);
    if !real {
        caps["avd"] = json!(ANDROID_AVD);
    }
    json!({ "desiredCapabilities": caps, "webdriver": local_webdriver() })
}

fn ios_safari(real: bool) -> Value {
    json!({
        "desiredCapabilities": {
            "browserName": "safari",
            "platformName": "iOS",
            "safari:useSimulator": !real,
            "safari:deviceName": "iPhone 13",
        },
        "webdriver": local_webdriver(),
    })
}

fn appium_app(platform: &str, real: bool) -> Value {
    let options = if platform == "Android" {
        let mut options = json!({
            "automationName": "UiAutomator2",
            "app": "",
            "appPackage": "",
            "appActivity": "",
            "newCommandTimeout": 0,
        });
        if !real {
            options["avd"] = json!(ANDROID_AVD);
        }
        options
    } else {
        let mut options = json!({
            "automationName": "XCUITest",
            "app": "",
            "newCommandTimeout": 0,
        });
        if real {
            options["udid"] = json!("");
        } else {
            options["deviceName"] = json!("iPhone 13");
        }
        options
    };
    json!({
        "selenium": {
            "start_process": true,
            "use_appium": true,
            "host": "localhost",
            "port": APPIUM_PORT,
            "server_path": "",
            "cli_args": [],
        },
        "webdriver": { "timeout_options": { "timeout": 150_000, "retry_attempts": 3 } },
        "desiredCapabilities": {
            "browserName": "",
            "platformName": platform,
            "appium:options": options,
        },
    })
}

fn mobile_environments(refined: &RefinedAnswers) -> Vec<Environment> {
    let mut envs = Vec::new();
    if !refined.has_local() || !refined.mobile {
        return envs;
    }
    let platform = refined.mobile_platform;
    let android = platform.is_some_and(MobilePlatform::includes_android);
    let ios = platform.is_some_and(MobilePlatform::includes_ios);
    let mobile_browsers = refined.local_mobile_browsers();

    if android {
        for browser in mobile_browsers.iter().filter(|b| Browser::ANDROID.contains(b)) {
            envs.push(Environment::new(
                format!("android.real.{}", browser.id()),
                android_browser(*browser, true),
            ));
            envs.push(Environment::new(
                format!("android.emulator.{}", browser.id()),
                android_browser(*browser, false),
            ));
        }
    }
    if ios && mobile_browsers.contains(&Browser::Safari) {
        envs.push(Environment::new("ios.real.safari", ios_safari(true)));
        envs.push(Environment::new("ios.simulator.safari", ios_safari(false)));
    }

    if refined.has_testing_type(TestingType::App) {
        if android {
            envs.push(Environment::new("app.android.emulator", appium_app("Android", false)));
            envs.push(Environment::new("app.android.real", appium_app("Android", true)));
        }
        if ios {
            envs.push(Environment::new("app.ios.simulator", appium_app("iOS", false)));
            envs.push(Environment::new("app.ios.real", appium_app("iOS", true)));
        }
    }
    envs
}

fn remote_environments(refined: &RefinedAnswers) -> Vec<Environment> {
    let (Some(name), Some(env)) = (refined.remote_name.as_deref(), refined.remote_env.as_ref())
    else {
        return Vec::new();
    };
    let (host, port) = refined.cloud_provider.unwrap_or(CloudProvider::Other).hub();

    let mut envs = vec![Environment::new(
        name,
        json!({
            "selenium": { "start_process": false, "host": host, "port": port },
            "webdriver": {
                "start_process": false,
                "username": format!("${{{}}}", env.username),
                "access_key": format!("${{{}}}", env.access_key),
            },
        }),
    )];

    for browser in refined.grid_browsers() {
        envs.push(Environment::new(
            format!("{name}.{}", browser.id()),
            json!({
                "extends": name,
                "desiredCapabilities": desktop_capabilities(*browser),
            }),
        ));
    }

    if refined.mobile_remote {
        envs.push(Environment::new(
            format!("{name}.android.chrome"),
            json!({
                "extends": name,
                "desiredCapabilities": {
                    "browserName": "chrome",
                    "platformName": "android",
                    "goog:chromeOptions": { "w3c": true },
                },
            }),
        ));
        envs.push(Environment::new(
            format!("{name}.ios.safari"),
            json!({
                "extends": name,
                "desiredCapabilities": { "browserName": "safari", "platformName": "iOS" },
            }),
        ));
    }
    envs
}

fn selenium_server_environment(refined: &RefinedAnswers) -> Environment {
    let browser_name = refined.default_browser.map_or("", Browser::capability_name);
    Environment::new(
        SELENIUM_SERVER_ENV,
        json!({
            "selenium": {
                "start_process": true,
                "port": SELENIUM_PORT,
                "server_path": "",
                "cli_args": {},
            },
            "webdriver": { "start_process": false, "default_path_prefix": "/wd/hub" },
            "desiredCapabilities": { "browserName": browser_name },
        }),
    )
}
