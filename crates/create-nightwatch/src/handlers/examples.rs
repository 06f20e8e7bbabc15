//! Example tests for a fresh project

use crate::output::ProgressReporter;
use crate::workspace::Workspace;
use nightwatch_init::{Language, RefinedAnswers, Runner};
use std::path::{Path, PathBuf};

/// Example file: path under the examples folder, contents
pub type Template = (&'static str, &'static str);

const JS_NIGHTWATCH: &[Template] = &[
    ("specs/ecosia.js", include_str!("../../assets/js/specs/ecosia.js")),
    ("page-objects/search.js", include_str!("../../assets/js/page-objects/search.js")),
    (
        "custom-commands/strictClick.js",
        include_str!("../../assets/js/custom-commands/strictClick.js"),
    ),
    (
        "custom-assertions/elementHasCount.js",
        include_str!("../../assets/js/custom-assertions/elementHasCount.js"),
    ),
];

const JS_MOCHA: &[Template] = &[("specs/ecosia.js", include_str!("../../assets/mocha/specs/ecosia.js"))];

const TYPESCRIPT: &[Template] = &[("github.ts", include_str!("../../assets/ts/github.ts"))];

const TSCONFIG: Template = ("tsconfig.json", include_str!("../../assets/ts/tsconfig.json"));

const CUCUMBER_JS: &[Template] = &[
    ("ecosia.feature", include_str!("../../assets/cucumber/ecosia.feature")),
    (
        "step_definitions/steps.js",
        include_str!("../../assets/cucumber/step_definitions/steps.js"),
    ),
];

const CUCUMBER_TS: &[Template] = &[
    ("ecosia.feature", include_str!("../../assets/cucumber/ecosia.feature")),
    (
        "step_definitions/steps.ts",
        include_str!("../../assets/cucumber/step_definitions/steps.ts"),
    ),
];

/// Examples shipped inside the installed `nightwatch` package
#[must_use]
pub fn installed_examples(root: &Path) -> PathBuf {
    root.join("node_modules").join("nightwatch").join("examples")
}

/// Embedded examples for a language/runner pair
#[must_use]
pub fn templates(language: Language, runner: Runner) -> Vec<Template> {
    let mut files = match (language, runner) {
        (Language::Js, Runner::Nightwatch) => JS_NIGHTWATCH.to_vec(),
        (Language::Js, Runner::Mocha) => JS_MOCHA.to_vec(),
        (Language::Js, Runner::Cucumber) => CUCUMBER_JS.to_vec(),
        (Language::Ts, Runner::Cucumber) => CUCUMBER_TS.to_vec(),
        (Language::Ts, _) => TYPESCRIPT.to_vec(),
    };
    if language == Language::Ts {
        files.push(TSCONFIG);
    }
    files
}

/// Write example tests into the examples folder; returns the files created.
///
/// Nothing is written when the folder already has content. Plain JavaScript
/// projects get a copy of the installed package's examples when present.
pub fn write_examples(
    workspace: &dyn Workspace,
    root: &Path,
    refined: &RefinedAnswers,
    reporter: &ProgressReporter,
) -> Vec<PathBuf> {
    let Some(location) = refined.examples_location.as_deref() else {
        return Vec::new();
    };
    let target = root.join(location);
    if !workspace.is_empty_dir(&target) {
        reporter.info(&format!(
            "{} already has files; examples not written",
            target.display()
        ));
        return Vec::new();
    }

    let source = installed_examples(root);
    let copy_installed = refined.language == Language::Js
        && refined.runner != Runner::Cucumber
        && workspace.exists(&source);

    let written = if copy_installed {
        workspace.copy_tree(&source, &target)
    } else {
        write_templates(workspace, &target, &templates(refined.language, refined.runner))
    };

    match written {
        Ok(files) => {
            tracing::info!(count = files.len(), dir = %target.display(), "examples written");
            reporter.success(&format!("Example tests added to {}", target.display()));
            files
        }
        Err(e) => {
            tracing::warn!(error = %e, "examples not written");
            reporter.warning(&format!(
                "Could not write the example tests to {}: {e}",
                target.display()
            ));
            Vec::new()
        }
    }
}

fn write_templates(
    workspace: &dyn Workspace,
    target: &Path,
    files: &[Template],
) -> std::io::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for (name, contents) in files {
        let path = target.join(name);
        if workspace.exists(&path) {
            continue;
        }
        workspace.write_file(&path, contents)?;
        written.push(path);
    }
    Ok(written)
}
