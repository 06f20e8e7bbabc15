//! create-nightwatch: sets up Nightwatch tests in a JavaScript project
//!
//! Asks a handful of questions (or takes the defaults with `--yes`), then:
//!
//! 1. creates the project directory and `package.json` if needed,
//! 2. installs Nightwatch, its plugins and the webdrivers for the chosen browsers,
//! 3. writes `nightwatch.conf.js`,
//! 4. adds example tests,
//! 5. prepares Android/iOS devices for mobile runs.
//!
//! Answer handling and config generation live in `nightwatch-init`; this
//! crate is the terminal, filesystem, npm and network side of the wizard.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod mobile;
pub mod network;
mod output;
pub mod package_manager;
pub mod prompt;
pub mod workspace;

pub use commands::{Cli, ColorArg};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use handlers::{execute_init, Collaborators, InitOutcome};
pub use mobile::{AndroidMode, AndroidSetup, IosSetup, MobileHelper, MobileSetup};
pub use network::NetworkClient;
pub use output::ProgressReporter;
pub use package_manager::{Npm, PackageManager};
pub use prompt::TerminalPrompter;
pub use workspace::{LocalWorkspace, Workspace};
