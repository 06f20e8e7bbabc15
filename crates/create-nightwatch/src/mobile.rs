//! Device setup for mobile testing, delegated to `@nightwatch/mobile-helper`.

use crate::error::{CliError, CliResult};
use crate::package_manager::describe;
use nightwatch_init::{Browser, CatalogId, MOBILE_HELPER_PACKAGE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;

/// Which Android devices ended up usable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AndroidMode {
    /// A real device over USB/Wi-Fi
    Real,
    /// The AVD emulator
    Emulator,
    /// Both
    Both,
}

impl AndroidMode {
    /// Whether a real device was set up
    #[must_use]
    pub const fn real(self) -> bool {
        matches!(self, Self::Real | Self::Both)
    }

    /// Whether the emulator was set up
    #[must_use]
    pub const fn emulator(self) -> bool {
        matches!(self, Self::Emulator | Self::Both)
    }
}

/// Outcome of the Android setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidSetup {
    /// Whether setup finished
    pub status: bool,
    /// Devices that are ready
    pub mode: AndroidMode,
}

/// Outcome of the iOS setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IosSetup {
    /// A real device is ready
    pub real: bool,
    /// The simulator is ready
    pub simulator: bool,
}

/// Prepares devices for mobile test runs
pub trait MobileSetup {
    /// Install the Android SDK pieces needed for the given browsers
    fn android(&mut self, dir: &Path, browsers: &[Browser]) -> CliResult<AndroidSetup>;

    /// Check the iOS real device and simulator prerequisites
    fn ios(&mut self, dir: &Path) -> CliResult<IosSetup>;
}

/// [`MobileSetup`] running the mobile helper through `npx`, attached to the terminal
#[derive(Debug, Clone, Default)]
pub struct MobileHelper;

impl MobileHelper {
    /// `npx @nightwatch/mobile-helper <platform> --setup ...`
    #[must_use]
    pub fn command(platform: &str, browsers: &[Browser], dir: &Path) -> Command {
        let npx = if cfg!(windows) { "npx.cmd" } else { "npx" };
        let mut command = Command::new(npx);
        command
            .args([MOBILE_HELPER_PACKAGE, platform, "--setup"])
            .current_dir(dir);
        if !browsers.is_empty() {
            let ids: Vec<&str> = browsers.iter().map(|b| b.id()).collect();
            command.arg("--browsers").arg(ids.join(","));
        }
        command
    }

    fn run_attached(mut command: Command) -> CliResult<()> {
        let line = describe(&command);
        tracing::info!(command = %line, "running mobile helper");
        let status = command
            .status()
            .map_err(|e| CliError::command(&line, e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(CliError::command(line, status.to_string()))
        }
    }
}

impl MobileSetup for MobileHelper {
    fn android(&mut self, dir: &Path, browsers: &[Browser]) -> CliResult<AndroidSetup> {
        Self::run_attached(Self::command("android", browsers, dir))?;
        // the helper walks the user through both device kinds
        Ok(AndroidSetup {
            status: true,
            mode: AndroidMode::Both,
        })
    }

    fn ios(&mut self, dir: &Path) -> CliResult<IosSetup> {
        Self::run_attached(Self::command("ios", &[], dir))?;
        Ok(IosSetup {
            real: true,
            simulator: true,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_android_command_line() {
        let command =
            MobileHelper::command("android", &[Browser::Chrome, Browser::Firefox], Path::new("."));
        let line = describe(&command);
        assert!(line.ends_with("@nightwatch/mobile-helper android --setup --browsers chrome,firefox"));
    }

    #[test]
    fn test_ios_command_line() {
        let line = describe(&MobileHelper::command("ios", &[], Path::new(".")));
        assert!(line.ends_with("@nightwatch/mobile-helper ios --setup"));
    }

    #[test]
    fn test_android_modes() {
        assert!(AndroidMode::Real.real());
        assert!(!AndroidMode::Real.emulator());
        assert!(AndroidMode::Both.real() && AndroidMode::Both.emulator());
    }

    #[test]
    fn test_mode_serialization() {
        let json = serde_json::to_string(&AndroidMode::Emulator).unwrap();
        assert_eq!(json, "\"emulator\"");
    }
}
