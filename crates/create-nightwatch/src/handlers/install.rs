//! Package and webdriver installation

use crate::output::ProgressReporter;
use crate::package_manager::PackageManager;
use crate::workspace::Workspace;
use nightwatch_init::{
    parse_declared_packages, select_packages, select_webdrivers, DeclaredPackages, InitError,
    RefinedAnswers, Webdriver,
};
use serde::Serialize;
use std::path::Path;

/// What the install step did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    /// Packages installed
    pub installed: Vec<String>,
    /// Packages whose install failed
    pub failed: Vec<String>,
    /// Manual steps left for the user
    pub manual: Vec<String>,
}

impl InstallReport {
    /// Whether everything went through
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.manual.is_empty()
    }
}

/// Packages already declared in the project's `package.json`; none when it can't be read
pub fn declared_packages(workspace: &dyn Workspace, root: &Path) -> DeclaredPackages {
    let manifest = root.join("package.json");
    workspace
        .read_to_string(&manifest)
        .map_err(InitError::from)
        .and_then(|text| parse_declared_packages(&text))
        .unwrap_or_else(|e| {
            tracing::debug!(path = %manifest.display(), error = %e, "no declared packages");
            DeclaredPackages::new()
        })
}

fn install_one(
    root: &Path,
    package: &str,
    packages: &mut dyn PackageManager,
    reporter: &mut ProgressReporter,
    report: &mut InstallReport,
) {
    reporter.start_spinner(&format!("Installing {package}"));
    let result = packages.install(root, package);
    reporter.finish_spinner();

    match result {
        Ok(()) => {
            reporter.success(&format!("Installed {package}"));
            report.installed.push(package.to_string());
        }
        Err(e) => {
            tracing::warn!(package, error = %e, "install failed");
            reporter.warning(&format!(
                "Failed to install {package}. Please run `npm install {package} --save-dev` manually."
            ));
            report.failed.push(package.to_string());
        }
    }
}

/// Install the selected packages, then the webdrivers; failures are reported, not fatal
pub fn install_all(
    root: &Path,
    refined: &RefinedAnswers,
    workspace: &dyn Workspace,
    packages: &mut dyn PackageManager,
    reporter: &mut ProgressReporter,
    interactive: bool,
) -> InstallReport {
    let declared = declared_packages(workspace, root);
    let mut report = InstallReport::default();

    let selected = select_packages(refined, &declared);
    if selected.is_empty() {
        reporter.info("All required packages are already installed");
    }
    for package in &selected {
        install_one(root, package, packages, reporter, &mut report);
    }

    for driver in select_webdrivers(refined) {
        match driver.npm_package() {
            Some(package) if declared.contains_key(package) => {
                tracing::debug!(%driver, "already declared");
            }
            Some(package) => install_one(root, package, packages, reporter, &mut report),
            None => enable_safaridriver(driver, packages, reporter, &mut report, interactive),
        }
    }
    report
}

fn enable_safaridriver(
    driver: Webdriver,
    packages: &mut dyn PackageManager,
    reporter: &ProgressReporter,
    report: &mut InstallReport,
    interactive: bool,
) {
    const MANUAL: &str = "sudo safaridriver --enable";

    if !interactive {
        reporter.info(&format!("Run `{MANUAL}` once to allow Safari automation"));
        report.manual.push(MANUAL.to_string());
        return;
    }

    reporter.info("Enabling safaridriver; you may be asked for your password");
    match packages.enable_safaridriver() {
        Ok(()) => reporter.success(&format!("Enabled {driver}")),
        Err(e) => {
            tracing::warn!(error = %e, "safaridriver not enabled");
            reporter.warning(&format!(
                "Could not enable {driver}. Please run `{MANUAL}` manually."
            ));
            report.manual.push(MANUAL.to_string());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::{CliError, CliResult};
    use crate::workspace::LocalWorkspace;
    use nightwatch_init::{
        Backend, Browser, Catalog, HostCapabilities, LanguageRunner, RawAnswers, Refiner,
    };
    use tempfile::TempDir;

    /// Records installs, fails the listed packages
    #[derive(Default)]
    struct FakeNpm {
        installed: Vec<String>,
        broken: Vec<&'static str>,
        safari_enabled: bool,
    }

    impl PackageManager for FakeNpm {
        fn init_manifest(&mut self, _dir: &Path) -> CliResult<()> {
            Ok(())
        }

        fn install(&mut self, _dir: &Path, package: &str) -> CliResult<()> {
            if self.broken.contains(&package) {
                return Err(CliError::command(format!("npm install {package}"), "E404"));
            }
            self.installed.push(package.to_string());
            Ok(())
        }

        fn enable_safaridriver(&mut self) -> CliResult<()> {
            self.safari_enabled = true;
            Ok(())
        }
    }

    fn refine_on(host: HostCapabilities, raw: RawAnswers) -> RefinedAnswers {
        Refiner::new(Catalog::new(host)).refine(raw)
    }

    fn quiet() -> ProgressReporter {
        ProgressReporter::new(false, true)
    }

    #[test]
    fn test_declared_packages_from_manifest() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{"devDependencies":{"nightwatch":"^3.0.0"}}"#,
        )
        .unwrap();
        let declared = declared_packages(&LocalWorkspace, temp.path());
        assert!(declared.contains_key("nightwatch"));
    }

    #[test]
    fn test_declared_packages_missing_manifest() {
        let temp = TempDir::new().unwrap();
        assert!(declared_packages(&LocalWorkspace, temp.path()).is_empty());
    }

    #[test]
    fn test_installs_packages_then_drivers() {
        let temp = TempDir::new().unwrap();
        let refined = refine_on(
            HostCapabilities::other(),
            RawAnswers::new()
                .with_backend(Backend::Local)
                .with_browsers(vec![Browser::Chrome, Browser::Firefox])
                .with_language_runner(LanguageRunner::JsCucumber),
        );
        let mut npm = FakeNpm::default();
        let report = install_all(
            temp.path(),
            &refined,
            &LocalWorkspace,
            &mut npm,
            &mut quiet(),
            false,
        );
        assert_eq!(
            npm.installed,
            vec!["nightwatch", "@cucumber/cucumber", "chromedriver", "geckodriver"]
        );
        assert!(report.is_clean());
    }

    #[test]
    fn test_failure_is_not_fatal() {
        let temp = TempDir::new().unwrap();
        let refined = refine_on(
            HostCapabilities::other(),
            RawAnswers::new()
                .with_backend(Backend::Local)
                .with_browsers(vec![Browser::Chrome]),
        );
        let mut npm = FakeNpm {
            broken: vec!["nightwatch"],
            ..FakeNpm::default()
        };
        let report = install_all(
            temp.path(),
            &refined,
            &LocalWorkspace,
            &mut npm,
            &mut quiet(),
            false,
        );
        assert_eq!(report.failed, vec!["nightwatch"]);
        assert_eq!(report.installed, vec!["chromedriver"]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_declared_driver_skipped() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("package.json"),
            r#"{"devDependencies":{"nightwatch":"^3.0.0","chromedriver":"^120.0.0"}}"#,
        )
        .unwrap();
        let refined = refine_on(
            HostCapabilities::other(),
            RawAnswers::new()
                .with_backend(Backend::Local)
                .with_browsers(vec![Browser::Chrome]),
        );
        let mut npm = FakeNpm::default();
        let report = install_all(
            temp.path(),
            &refined,
            &LocalWorkspace,
            &mut npm,
            &mut quiet(),
            false,
        );
        assert!(npm.installed.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn test_safaridriver_manual_when_unattended() {
        let temp = TempDir::new().unwrap();
        let refined = refine_on(
            HostCapabilities::apple(),
            RawAnswers::new()
                .with_backend(Backend::Local)
                .with_browsers(vec![Browser::Safari]),
        );
        let mut npm = FakeNpm::default();
        let report = install_all(
            temp.path(),
            &refined,
            &LocalWorkspace,
            &mut npm,
            &mut quiet(),
            false,
        );
        assert!(!npm.safari_enabled);
        assert_eq!(report.manual, vec!["sudo safaridriver --enable"]);
    }

    #[test]
    fn test_safaridriver_enabled_interactively() {
        let temp = TempDir::new().unwrap();
        let refined = refine_on(
            HostCapabilities::apple(),
            RawAnswers::new()
                .with_backend(Backend::Local)
                .with_browsers(vec![Browser::Safari]),
        );
        let mut npm = FakeNpm::default();
        let report = install_all(
            temp.path(),
            &refined,
            &LocalWorkspace,
            &mut npm,
            &mut quiet(),
            true,
        );
        assert!(npm.safari_enabled);
        assert!(report.is_clean());
    }
}
