//! "Next steps" printed at the end of a run

use crate::output::ProgressReporter;
use nightwatch_init::{assemble, join_path, Language, RefinedAnswers, Runner, DEFAULT_ENV};
use std::path::Path;

/// What `npx nightwatch` should be pointed at
#[must_use]
pub fn run_target(refined: &RefinedAnswers) -> String {
    let examples = refined
        .examples_location
        .as_deref()
        .filter(|_| refined.add_examples);
    match (examples, refined.language, refined.runner) {
        (_, _, Runner::Cucumber) => String::new(),
        (Some(dir), Language::Ts, _) => format!("./{}", join_path(dir, "github.ts")),
        (Some(dir), Language::Js, _) => format!("./{}", join_path(dir, "specs")),
        (None, _, _) => format!("./{}", refined.tests_location),
    }
}

/// Commands to try the new setup, one per environment
#[must_use]
pub fn next_steps(root: &Path, refined: &RefinedAnswers) -> Vec<String> {
    let mut steps = Vec::new();
    if root != Path::new(".") {
        steps.push(format!("cd {}", root.display()));
    }

    let target = run_target(refined);
    let base = if target.is_empty() {
        "npx nightwatch".to_string()
    } else {
        format!("npx nightwatch {target}")
    };

    let model = assemble(refined);
    let envs: Vec<&str> = model
        .environment_names()
        .into_iter()
        .filter(|name| *name != DEFAULT_ENV)
        .filter(|name| refined.remote_name.as_deref() != Some(*name))
        .collect();

    if envs.is_empty() {
        steps.push(base);
    } else {
        steps.extend(envs.iter().map(|env| format!("{base} --env {env}")));
    }
    steps
}

/// Print the next steps
pub fn print_next_steps(reporter: &ProgressReporter, root: &Path, refined: &RefinedAnswers) {
    reporter.header("Next steps");
    if refined.has_remote() {
        if let Some(env) = &refined.remote_env {
            reporter.line(&format!(
                "Set {} and {} before running on the remote grid.",
                env.username, env.access_key
            ));
        }
    }
    for step in next_steps(root, refined) {
        reporter.command(&step);
    }
    reporter.line("");
    reporter.line("Docs: https://nightwatchjs.org/guide/");
}
