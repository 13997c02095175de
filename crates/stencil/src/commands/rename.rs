//! `stencil rename` command handler

use anyhow::{anyhow, Context, Result};
use camino::Utf8Path;
use serde::Serialize;
use stencil_core::StencilConfig;
use stencil_projects::{
    relocate_project, rename_project, validate_project_name, RelocateOutcome, RenameOptions,
    RenameReport, ScopeSource,
};

use crate::cli::RenameArgs;
use crate::output;
use crate::utils::current_dir_utf8;

/// JSON shape printed by `rename --json`
#[derive(Debug, Serialize)]
struct RenameSummary<'a> {
    report: Option<&'a RenameReport>,
    error: Option<String>,
    relocation: Option<&'a RelocateOutcome>,
}

/// Rename an existing project and move its folder to match
pub async fn run(args: RenameArgs, config: &StencilConfig) -> Result<()> {
    validate_project_name(&args.new_name)?;

    if !args.path.is_dir() {
        return Err(anyhow!("Project directory not found: {}", args.path));
    }

    let options = RenameOptions::from_config(&config.boilerplate)
        .context("Invalid boilerplate configuration")?;

    if !args.json {
        output::header("Rename Project");
        output::kv("Project", args.path.as_str());
        output::kv("New name", &args.new_name);
        println!();
    }

    let cwd = current_dir_utf8()?;
    let renamed =
        rename_and_relocate(&args.path, &args.new_name, &options, &cwd, !args.json).await;

    if !args.json {
        if let Ok(report) = &renamed.outcome {
            print_report(report, &args.path);
        }
    }

    let relocation = match renamed.relocation {
        Some(Ok(relocation)) => Some(relocation),
        Some(Err(e)) => {
            output::warning(&format!("Could not move project folder: {}", e));
            tracing::warn!("Relocation of {} failed: {}", args.path, e);
            None
        }
        None => None,
    };
    let outcome = renamed.outcome;

    if args.json {
        let summary = RenameSummary {
            report: outcome.as_ref().ok(),
            error: outcome.as_ref().err().map(|e| e.to_string()),
            relocation: relocation.as_ref(),
        };
        return output::json(&summary);
    }

    if let Some(relocation) = &relocation {
        print_relocation(relocation, &args.new_name);
    }

    if outcome.is_ok() {
        println!();
        output::success(&format!("Project renamed to '{}'", args.new_name));
    }

    Ok(())
}

/// A single rename and the folder move that follows it
pub(crate) struct RenameRun {
    pub outcome: stencil_projects::Result<RenameReport>,
    /// `None` when the rename failed and the folder was left in place
    pub relocation: Option<stencil_projects::Result<RelocateOutcome>>,
}

/// Rename the project, then move its folder only if the rename succeeded
pub(crate) async fn rename_and_relocate(
    root: &Utf8Path,
    new_name: &str,
    options: &RenameOptions,
    cwd: &Utf8Path,
    show_progress: bool,
) -> RenameRun {
    let outcome = apply_rename(root, new_name, options, show_progress).await;

    let relocation = match &outcome {
        Ok(_) => Some(relocate_project(root, new_name, cwd).await),
        Err(_) => {
            tracing::debug!("Leaving {} in place after failed rename", root);
            None
        }
    };

    RenameRun {
        outcome,
        relocation,
    }
}

/// Run the renamer once under a spinner
///
/// A failure is printed and handed back instead of aborting the command.
pub(crate) async fn apply_rename(
    root: &Utf8Path,
    new_name: &str,
    options: &RenameOptions,
    show_progress: bool,
) -> stencil_projects::Result<RenameReport> {
    let spinner = show_progress.then(|| output::spinner("Rewriting project files..."));

    let result = rename_project(root, new_name, options).await;

    match &result {
        Ok(report) => {
            let msg = format!("Rewrote {} file(s)", report.files_written());
            match spinner {
                Some(pb) => output::finish_spinner(pb, true, &msg),
                None => tracing::info!("{}", msg),
            }
        }
        Err(e) => {
            let msg = format!("Rename failed: {}", e);
            match spinner {
                Some(pb) => output::finish_spinner(pb, false, &msg),
                None => output::error(&msg),
            }
            tracing::error!("Rename of {} failed: {}", root, e);
        }
    }

    result
}

/// Print what the renamer changed
pub(crate) fn print_report(report: &RenameReport, root: &Utf8Path) {
    let source = match report.scope_source {
        ScopeSource::Detected => "detected",
        ScopeSource::Fallback => "fallback",
    };
    output::kv(
        "Scope",
        &format!("{} -> {} ({})", report.old_scope, report.new_scope, source),
    );
    output::path_list("Manifests", &report.manifests, root);
    output::path_list("Sources", &report.sources, root);
    output::path_list("Docs", &report.docs, root);

    for warning in &report.warnings {
        output::warning(&format!("Skipped {}", warning));
    }
}

fn print_relocation(relocation: &RelocateOutcome, new_name: &str) {
    match relocation {
        RelocateOutcome::Moved { from, to } => {
            output::info(&format!("Moved {} -> {}", from, to));
        }
        RelocateOutcome::AlreadyNamed => {}
        RelocateOutcome::SkippedCurrentDir => {
            output::warning(&format!(
                "Running inside the project; folder left as is. Rename it to '{}' manually.",
                new_name
            ));
        }
        RelocateOutcome::TargetExists { path } => {
            output::warning(&format!("{} already exists; folder left as is", path));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Utf8PathBuf, Utf8PathBuf) {
        let temp = TempDir::new().unwrap();
        let base = Utf8PathBuf::from_path_buf(temp.path().canonicalize().unwrap()).unwrap();
        let root = base.join("fullstack-boilerplate");
        std::fs::create_dir_all(root.join("packages/web")).unwrap();
        std::fs::write(root.join("package.json"), r#"{"name": "fullstack-boilerplate"}"#).unwrap();
        std::fs::write(
            root.join("packages/web/package.json"),
            r#"{"name": "@fullstack-boilerplate/web"}"#,
        )
        .unwrap();
        (temp, base, root)
    }

    #[tokio::test]
    async fn test_failed_rename_leaves_folder_in_place() {
        let (_temp, base, root) = setup();
        // A directory where a doc file is expected makes the doc rewrite fail
        std::fs::create_dir_all(root.join("README.md")).unwrap();

        let run =
            rename_and_relocate(&root, "newname", &RenameOptions::default(), &base, false).await;

        assert!(run.outcome.is_err());
        assert!(run.relocation.is_none());
        assert!(root.is_dir());
        assert!(!base.join("newname").exists());
    }

    #[tokio::test]
    async fn test_successful_rename_moves_folder() {
        let (_temp, base, root) = setup();

        let run =
            rename_and_relocate(&root, "newname", &RenameOptions::default(), &base, false).await;

        assert!(run.outcome.is_ok());
        assert!(matches!(
            run.relocation,
            Some(Ok(RelocateOutcome::Moved { .. }))
        ));
        assert!(base.join("newname/package.json").is_file());
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_rename_from_inside_project_keeps_folder() {
        let (_temp, base, root) = setup();
        let cwd = root.join("packages/web");

        let run =
            rename_and_relocate(&root, "newname", &RenameOptions::default(), &cwd, false).await;

        assert!(run.outcome.is_ok());
        assert!(matches!(
            run.relocation,
            Some(Ok(RelocateOutcome::SkippedCurrentDir))
        ));
        assert!(root.is_dir());
        assert!(!base.join("newname").exists());
    }

    #[tokio::test]
    async fn test_rename_with_existing_sibling_keeps_folder() {
        let (_temp, base, root) = setup();
        std::fs::create_dir_all(base.join("newname")).unwrap();

        let run =
            rename_and_relocate(&root, "newname", &RenameOptions::default(), &base, false).await;

        assert!(run.outcome.is_ok());
        match run.relocation {
            Some(Ok(RelocateOutcome::TargetExists { path })) => {
                assert_eq!(path, base.join("newname"));
            }
            other => panic!("unexpected relocation: {:?}", other.map(|r| r.is_ok())),
        }
        assert!(root.is_dir());
    }
}
