//! create-nightwatch: set up Nightwatch in a new or existing project
//!
//! ## Usage
//!
//! ```bash
//! create-nightwatch                          # Ask, then set up in the current directory
//! create-nightwatch my-app -y                # Defaults, no questions
//! create-nightwatch -b firefox,chrome        # Preselect browsers
//! create-nightwatch --generate-config        # Only write nightwatch.conf.js
//! create-nightwatch --mobile / --native      # Mobile web / native app testing
//! ```

use clap::Parser;
use create_nightwatch::{
    execute_init, Cli, CliConfig, CliResult, ColorChoice, Collaborators, LocalWorkspace,
    MobileHelper, Npm, ProgressReporter, TerminalPrompter, Verbosity,
};
use nightwatch_init::{Catalog, HostCapabilities};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity);

    let use_color = config.color.should_color();
    let mut reporter = ProgressReporter::new(use_color, config.verbosity.is_quiet());
    let mut packages = Npm;
    let mut devices = MobileHelper;
    let mut prompter = TerminalPrompter::stdin(use_color);
    let catalog = Catalog::new(HostCapabilities::detect());

    let mut deps = Collaborators {
        workspace: &LocalWorkspace,
        packages: &mut packages,
        mobile: &mut devices,
        prompter: &mut prompter,
        reporter: &mut reporter,
    };
    let outcome = execute_init(&config, &cli.path, &catalog, &mut deps)?;
    tracing::debug!(
        installed = outcome.install.installed.len(),
        failed = outcome.install.failed.len(),
        examples = outcome.examples.len(),
        "init finished"
    );
    Ok(())
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_non_interactive(cli.yes)
        .with_config_only(cli.generate_config)
        .with_mobile(cli.mobile)
        .with_native(cli.native)
        .with_browsers(cli.browsers.clone())
        .with_offline(cli.offline)
}

/// Logs go to stderr; `RUST_LOG` overrides the level picked by -v/-q
fn init_tracing(verbosity: Verbosity) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
