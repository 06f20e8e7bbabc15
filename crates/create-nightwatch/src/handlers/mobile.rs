//! Mobile device setup step

use crate::mobile::{AndroidSetup, IosSetup, MobileSetup};
use crate::output::ProgressReporter;
use nightwatch_init::{Browser, RefinedAnswers, MOBILE_HELPER_PACKAGE};
use serde::Serialize;
use std::path::Path;

/// Devices prepared during the run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MobileReport {
    /// Android outcome, when Android was targeted and setup succeeded
    pub android: Option<AndroidSetup>,
    /// iOS outcome, when iOS was targeted and setup succeeded
    pub ios: Option<IosSetup>,
}

/// Whether the run needs device setup at all
#[must_use]
pub fn needs_setup(refined: &RefinedAnswers) -> bool {
    refined.mobile && refined.has_local() && refined.mobile_platform.is_some()
}

/// Run Android and/or iOS setup for the targeted platform
pub fn setup_devices(
    root: &Path,
    refined: &RefinedAnswers,
    setup: &mut dyn MobileSetup,
    reporter: &ProgressReporter,
) -> MobileReport {
    let mut report = MobileReport::default();
    let Some(platform) = refined.mobile_platform else {
        return report;
    };

    if platform.includes_android() {
        let browsers: Vec<Browser> = refined
            .local_mobile_browsers()
            .iter()
            .copied()
            .filter(|b| Browser::ANDROID.contains(b))
            .collect();
        reporter.info("Setting up Android devices");
        match setup.android(root, &browsers) {
            Ok(outcome) if outcome.status => {
                reporter.success("Android setup complete");
                report.android = Some(outcome);
            }
            Ok(_) => manual_step(reporter, "android", "Android setup did not finish"),
            Err(e) => {
                tracing::warn!(error = %e, "android setup failed");
                manual_step(reporter, "android", "Android setup failed");
            }
        }
    }

    if platform.includes_ios() {
        reporter.info("Checking iOS prerequisites");
        match setup.ios(root) {
            Ok(outcome) => {
                reporter.success("iOS setup complete");
                report.ios = Some(outcome);
            }
            Err(e) => {
                tracing::warn!(error = %e, "ios setup failed");
                manual_step(reporter, "ios", "iOS setup failed");
            }
        }
    }

    report
}

fn manual_step(reporter: &ProgressReporter, platform: &str, what: &str) {
    reporter.warning(&format!(
        "{what}. Run `npx {MOBILE_HELPER_PACKAGE} {platform} --setup` to finish it manually."
    ));
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::{CliError, CliResult};
    use crate::mobile::AndroidMode;
    use nightwatch_init::{
        Backend, Catalog, HostCapabilities, MobilePlatform, RawAnswers, Refiner, TestingType,
    };

    #[derive(Default)]
    struct FakeDevices {
        android_browsers: Option<Vec<Browser>>,
        ios_called: bool,
        fail_android: bool,
    }

    impl MobileSetup for FakeDevices {
        fn android(&mut self, _dir: &Path, browsers: &[Browser]) -> CliResult<AndroidSetup> {
            self.android_browsers = Some(browsers.to_vec());
            if self.fail_android {
                return Err(CliError::command("npx @nightwatch/mobile-helper android", "exit 1"));
            }
            Ok(AndroidSetup {
                status: true,
                mode: AndroidMode::Emulator,
            })
        }

        fn ios(&mut self, _dir: &Path) -> CliResult<IosSetup> {
            self.ios_called = true;
            Ok(IosSetup {
                real: false,
                simulator: true,
            })
        }
    }

    fn quiet() -> ProgressReporter {
        ProgressReporter::new(false, true)
    }

    fn refine_on(host: HostCapabilities, raw: RawAnswers) -> RefinedAnswers {
        Refiner::new(Catalog::new(host)).refine(raw)
    }

    #[test]
    fn test_web_only_needs_nothing() {
        let refined = refine_on(
            HostCapabilities::other(),
            RawAnswers::new()
                .with_backend(Backend::Local)
                .with_browsers(vec![Browser::Chrome]),
        );
        assert!(!needs_setup(&refined));
    }

    #[test]
    fn test_android_gets_android_browsers() {
        let refined = refine_on(
            HostCapabilities::apple(),
            RawAnswers::new()
                .with_backend(Backend::Local)
                .with_browsers(vec![Browser::Chrome, Browser::Safari])
                .with_mobile(true),
        );
        assert!(needs_setup(&refined));
        assert_eq!(refined.mobile_platform, Some(MobilePlatform::Both));

        let mut devices = FakeDevices::default();
        let report = setup_devices(Path::new("."), &refined, &mut devices, &quiet());
        assert_eq!(devices.android_browsers, Some(vec![Browser::Chrome]));
        assert!(devices.ios_called);
        assert_eq!(report.android.map(|a| a.mode), Some(AndroidMode::Emulator));
        assert_eq!(report.ios.map(|i| i.simulator), Some(true));
    }

    #[test]
    fn test_android_failure_is_not_fatal() {
        let mut raw = RawAnswers::new().with_mobile(true);
        raw.testing_type = Some(vec![TestingType::App]);
        raw.mobile_platform = Some(MobilePlatform::Android);
        let refined = refine_on(HostCapabilities::other(), raw);

        let mut devices = FakeDevices {
            fail_android: true,
            ..FakeDevices::default()
        };
        let report = setup_devices(Path::new("."), &refined, &mut devices, &quiet());
        assert!(report.android.is_none());
        assert!(!devices.ios_called);
    }
}
