//! Steps of a scaffolding run, each testable on its own
//!
//! [`init::execute_init`] drives them in order; the others only touch the
//! outside world through the traits in [`crate::workspace`],
//! [`crate::package_manager`] and [`crate::mobile`].

pub mod config_file;
pub mod examples;
pub mod init;
pub mod install;
pub mod mobile;
pub mod summary;

pub use config_file::{config_target, write_config, CONFIG_FILE, NEW_CONFIG_FILE};
pub use examples::{installed_examples, templates, write_examples};
pub use init::{execute_init, gather_answers, is_valid_init_path, Collaborators, InitOutcome};
pub use install::{declared_packages, install_all, InstallReport};
pub use mobile::{needs_setup, setup_devices, MobileReport};
pub use summary::{next_steps, print_next_steps, run_target};
