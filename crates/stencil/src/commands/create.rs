//! `stencil create` command handler

use anyhow::{anyhow, Context, Result};
use camino::Utf8Path;
use dialoguer::Input;
use stencil_core::StencilConfig;
use stencil_projects::git::{
    clone_repository, commit_all, init_repository, reset_history, CloneOptions, InitOptions,
};
use stencil_projects::{is_valid_project_name, validate_project_name, RenameOptions};

use super::rename::{apply_rename, print_report};
use crate::cli::CreateArgs;
use crate::output;
use crate::utils::current_dir_utf8;

/// Create a new project from the boilerplate
pub async fn run(args: CreateArgs, config: &StencilConfig) -> Result<()> {
    let name = match args.name {
        Some(name) => name,
        None => prompt_project_name()?,
    };
    validate_project_name(&name)?;

    let project_dir = current_dir_utf8()?.join(&name);
    if project_dir.exists() {
        return Err(anyhow!(
            "Project '{}' already exists at {}",
            name,
            project_dir
        ));
    }

    let options = RenameOptions::from_config(&config.boilerplate)
        .context("Invalid boilerplate configuration")?;
    let repository = args
        .template
        .unwrap_or_else(|| config.template.repository.clone());
    let branch = args.branch.or_else(|| config.template.branch.clone());

    output::header("Create New Project");
    output::kv("Project name", &name);
    output::kv("Template", &repository);
    if let Some(branch) = &branch {
        output::kv("Branch", branch);
    }
    output::kv("Location", project_dir.as_str());
    println!();

    let clone_options = CloneOptions {
        depth: config.template.depth,
        branch,
    };
    let spinner = output::spinner("Cloning boilerplate...");
    match clone_repository(&repository, &project_dir, &clone_options).await {
        Ok(_) => output::finish_spinner(spinner, true, "Cloned boilerplate"),
        Err(e) => {
            output::finish_spinner(spinner, false, "Clone failed");
            return Err(e).context(format!("Failed to clone {}", repository));
        }
    }

    if let Err(e) = reset_history(&project_dir).await {
        output::warning(&format!("Could not remove boilerplate git history: {}", e));
    }

    let init_options = InitOptions {
        default_branch: config.git.default_branch.clone(),
    };
    match init_repository(&project_dir, &init_options).await {
        Ok(()) => output::info(&format!(
            "Initialized git repository on '{}'",
            init_options.default_branch
        )),
        Err(e) => output::warning(&format!("Could not initialize git repository: {}", e)),
    }

    let renamed = match apply_rename(&project_dir, &name, &options, true).await {
        Ok(report) => {
            print_report(&report, &project_dir);
            true
        }
        Err(_) => false,
    };

    if args.initial_commit && renamed {
        if let Err(e) = commit_project(&project_dir, &config.git.initial_commit_message).await {
            output::warning(&format!("Could not create initial commit: {}", e));
        }
    }

    println!();
    if renamed {
        output::success(&format!("Project '{}' created successfully", name));
    } else {
        output::warning(&format!(
            "Project '{}' cloned but not fully renamed; run `stencil rename {} {}` to retry",
            name, project_dir, name
        ));
    }

    println!();
    output::info("Next steps:");
    println!("   1. cd {}", name);
    println!("   2. npm install");

    Ok(())
}

/// Ask for a project name until a valid one is entered
fn prompt_project_name() -> Result<String> {
    let name: String = Input::new()
        .with_prompt("Project name")
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            if is_valid_project_name(input) {
                Ok(())
            } else {
                Err("use lowercase letters, digits, '-' or '_'".to_string())
            }
        })
        .interact_text()?;
    Ok(name)
}

/// Stage and commit the renamed project
async fn commit_project(project_dir: &Utf8Path, message: &str) -> Result<()> {
    let spinner = output::spinner("Creating initial commit...");
    match commit_all(project_dir, message).await {
        Ok(()) => {
            output::finish_spinner(spinner, true, "Created initial commit");
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            Err(e.into())
        }
    }
}
