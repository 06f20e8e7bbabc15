//! Writes `nightwatch.conf.js` without touching an existing one

use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;
use crate::workspace::Workspace;
use std::path::{Path, PathBuf};

/// Config file name Nightwatch looks for
pub const CONFIG_FILE: &str = "nightwatch.conf.js";

/// Name used when a config file is already present
pub const NEW_CONFIG_FILE: &str = "new-nightwatch.conf.js";

/// Where the config should go, or `None` when both names are taken
#[must_use]
pub fn config_target(workspace: &dyn Workspace, root: &Path) -> Option<PathBuf> {
    [CONFIG_FILE, NEW_CONFIG_FILE]
        .iter()
        .map(|name| root.join(name))
        .find(|path| !workspace.exists(path))
}

/// Write the rendered config; returns the path written
pub fn write_config(
    workspace: &dyn Workspace,
    root: &Path,
    text: &str,
    reporter: &ProgressReporter,
) -> CliResult<Option<PathBuf>> {
    let Some(path) = config_target(workspace, root) else {
        reporter.warning(&format!(
            "Both {CONFIG_FILE} and {NEW_CONFIG_FILE} already exist; no config file written"
        ));
        return Ok(None);
    };

    workspace
        .write_file(&path, text)
        .map_err(|e| CliError::project_setup(root, format!("could not write {}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), "config written");

    if path.ends_with(NEW_CONFIG_FILE) {
        reporter.warning(&format!(
            "{CONFIG_FILE} already exists; the new config was written to {NEW_CONFIG_FILE}. \
             Merge the two files by hand."
        ));
    } else {
        reporter.success(&format!("Generated {}", path.display()));
    }
    Ok(Some(path))
}
