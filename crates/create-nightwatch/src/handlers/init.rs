//! Init handler: one complete scaffolding run

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::handlers::config_file::write_config;
use crate::handlers::examples::write_examples;
use crate::handlers::install::{install_all, InstallReport};
use crate::handlers::mobile::{needs_setup, setup_devices, MobileReport};
use crate::handlers::summary::print_next_steps;
use crate::mobile::MobileSetup;
use crate::network::{upgrade_notice, MetricsPayload, NetworkClient};
use crate::output::ProgressReporter;
use crate::package_manager::PackageManager;
use crate::workspace::Workspace;
use nightwatch_init::{
    assemble, render, seed_from_flags, Catalog, DefaultsTable, Prompter, QuestionFlow, RawAnswers,
    RefinedAnswers, Refiner,
};
use std::fmt;
use std::path::{Path, PathBuf};

/// The external systems a run talks to
pub struct Collaborators<'a> {
    /// Project files
    pub workspace: &'a dyn Workspace,
    /// npm
    pub packages: &'a mut dyn PackageManager,
    /// Device setup
    pub mobile: &'a mut dyn MobileSetup,
    /// Question answering
    pub prompter: &'a mut dyn Prompter,
    /// User-facing output
    pub reporter: &'a mut ProgressReporter,
}

impl fmt::Debug for Collaborators<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators")
            .field("reporter", &self.reporter)
            .finish_non_exhaustive()
    }
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct InitOutcome {
    /// Final answers
    pub refined: RefinedAnswers,
    /// Config file written, if any
    pub config_file: Option<PathBuf>,
    /// Install results
    pub install: InstallReport,
    /// Example files created
    pub examples: Vec<PathBuf>,
    /// Device setup results
    pub mobile: MobileReport,
}

/// Execute the init command
pub fn execute_init(
    config: &CliConfig,
    root: &Path,
    catalog: &Catalog,
    deps: &mut Collaborators<'_>,
) -> CliResult<InitOutcome> {
    if !is_valid_init_path(root) {
        return Err(CliError::invalid_argument(format!(
            "{} is a file, not a project directory",
            root.display()
        )));
    }

    deps.reporter
        .info(&format!("Setting up Nightwatch in {}", root.display()));
    if !config.offline {
        check_version(deps.reporter);
    }

    prepare_project(config, root, deps)?;

    let raw = gather_answers(config, catalog, deps.prompter)?;
    let refined = Refiner::new(catalog.clone())
        .with_config_only(config.config_only)
        .refine(raw);
    tracing::debug!(?refined, "refined answers");

    let install = if config.config_only {
        InstallReport::default()
    } else {
        install_all(
            root,
            &refined,
            deps.workspace,
            deps.packages,
            deps.reporter,
            !config.non_interactive,
        )
    };

    let text = render(&assemble(&refined));
    let config_file = write_config(deps.workspace, root, &text, deps.reporter)?;

    let examples = if refined.add_examples {
        write_examples(deps.workspace, root, &refined, deps.reporter)
    } else {
        Vec::new()
    };

    let mobile = if !config.config_only && needs_setup(&refined) {
        setup_devices(root, &refined, deps.mobile, deps.reporter)
    } else {
        MobileReport::default()
    };

    if refined.allow_anonymous_metrics && !config.offline {
        send_metrics(&refined);
    }

    print_next_steps(deps.reporter, root, &refined);

    Ok(InitOutcome {
        refined,
        config_file,
        install,
        examples,
        mobile,
    })
}

/// Create the project directory and its `package.json`; failures here end the run
fn prepare_project(config: &CliConfig, root: &Path, deps: &mut Collaborators<'_>) -> CliResult<()> {
    if !deps.workspace.exists(root) {
        deps.workspace
            .make_dir(root)
            .map_err(|e| CliError::project_setup(root, e.to_string()))?;
        tracing::info!(path = %root.display(), "created project directory");
    }

    if config.config_only || deps.workspace.exists(&root.join("package.json")) {
        return Ok(());
    }

    deps.reporter
        .info("No package.json found; running `npm init -y`");
    deps.packages
        .init_manifest(root)
        .map_err(|e| CliError::project_setup(root, e.to_string()))?;
    deps.reporter.success("Created package.json");
    Ok(())
}

/// Answers from the defaults table or the question flow
pub fn gather_answers(
    config: &CliConfig,
    catalog: &Catalog,
    prompter: &mut dyn Prompter,
) -> CliResult<RawAnswers> {
    let flags = config.launch_flags();
    if flags.non_interactive {
        return Ok(DefaultsTable::load()?.answers_for(&flags));
    }
    let flow = QuestionFlow::new(catalog.clone());
    Ok(flow.run(prompter, seed_from_flags(&flags))?)
}

fn check_version(reporter: &ProgressReporter) {
    match NetworkClient::new().and_then(|client| client.latest_version()) {
        Ok(latest) => {
            if let Some(notice) = upgrade_notice(&latest, env!("CARGO_PKG_VERSION")) {
                reporter.warning(&notice);
            }
        }
        Err(e) => tracing::debug!(error = %e, "version check skipped"),
    }
}

fn send_metrics(refined: &RefinedAnswers) {
    let payload = MetricsPayload::for_answers(uuid::Uuid::new_v4(), refined);
    if let Err(e) = NetworkClient::new().and_then(|client| client.send_metrics(&payload)) {
        tracing::debug!(error = %e, "metrics not sent");
    }
}

/// Check if a path is a sensible place to set up a project
#[must_use]
pub fn is_valid_init_path(path: &Path) -> bool {
    !path.exists() || path.is_dir()
}
