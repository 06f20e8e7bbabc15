//! npm and the other external commands a run shells out to.

use crate::error::{CliError, CliResult};
use std::path::Path;
use std::process::{Command, Stdio};

/// Installs packages into the target project
pub trait PackageManager {
    /// Create a `package.json` in `dir`
    fn init_manifest(&mut self, dir: &Path) -> CliResult<()>;

    /// Install one package as a dev dependency
    fn install(&mut self, dir: &Path, package: &str) -> CliResult<()>;

    /// Turn on Safari's automation support (macOS only, asks for a password)
    fn enable_safaridriver(&mut self) -> CliResult<()>;
}

/// [`PackageManager`] backed by the `npm` executable
#[derive(Debug, Clone, Default)]
pub struct Npm;

impl Npm {
    /// Name of the npm executable on this platform
    #[must_use]
    pub const fn program() -> &'static str {
        if cfg!(windows) {
            "npm.cmd"
        } else {
            "npm"
        }
    }
}

impl PackageManager for Npm {
    fn init_manifest(&mut self, dir: &Path) -> CliResult<()> {
        let mut command = Command::new(Self::program());
        command.arg("init").arg("-y").current_dir(dir);
        run(&mut command)
    }

    fn install(&mut self, dir: &Path, package: &str) -> CliResult<()> {
        let mut command = Command::new(Self::program());
        command
            .args(["install", package, "--save-dev"])
            .current_dir(dir);
        run(&mut command)
    }

    fn enable_safaridriver(&mut self) -> CliResult<()> {
        let mut command = Command::new("sudo");
        command.args(["safaridriver", "--enable"]);
        run(&mut command)
    }
}

/// The command line as a user would type it
pub fn describe(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run a command to completion, failing on a non-zero exit
pub fn run(command: &mut Command) -> CliResult<()> {
    let line = describe(command);
    tracing::info!(command = %line, "running");
    let output = command
        .stdin(Stdio::null())
        .output()
        .map_err(|e| CliError::command(&line, e.to_string()))?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = stderr
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .map_or_else(|| output.status.to_string(), ToString::to_string);
    tracing::debug!(command = %line, stderr = %stderr, "command failed");
    Err(CliError::command(line, detail))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let mut command = Command::new("npm");
        command.args(["install", "nightwatch", "--save-dev"]);
        assert_eq!(describe(&command), "npm install nightwatch --save-dev");
    }

    #[test]
    fn test_program_name() {
        assert!(Npm::program().starts_with("npm"));
    }

    #[test]
    fn test_missing_program_is_command_error() {
        let mut command = Command::new("definitely-not-a-real-program-4723");
        let err = run(&mut command).unwrap_err();
        assert!(matches!(err, CliError::Command { .. }));
        assert!(err.to_string().contains("definitely-not-a-real-program-4723"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit() {
        let mut command = Command::new("sh");
        command.args(["-c", "echo broken >&2; exit 3"]);
        let err = run(&mut command).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[cfg(unix)]
    #[test]
    fn test_success() {
        let mut command = Command::new("true");
        assert!(run(&mut command).is_ok());
    }
}
