//! Repository history reset and initialization

use crate::error::{Error, Result};
use camino::Utf8Path;
use tokio::process::Command;
use tracing::{debug, info};

/// Options for initializing a git repository
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Initial branch name
    pub default_branch: String,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            default_branch: "main".to_string(),
        }
    }
}

/// Discard the version-control history of a cloned project
///
/// Removes `path/.git`. A missing `.git` is not an error.
pub async fn reset_history(path: &Utf8Path) -> Result<()> {
    let git_dir = path.join(".git");
    if !git_dir.exists() {
        debug!("No git history at {}", git_dir);
        return Ok(());
    }

    tokio::fs::remove_dir_all(&git_dir)
        .await
        .map_err(|e| Error::file_access(git_dir.as_str(), e))?;
    info!("Removed git history at {}", git_dir);
    Ok(())
}

/// Initialize a new git repository
///
/// # Errors
/// Returns error if:
/// - Directory doesn't exist
/// - Git is not installed
/// - Git init fails
pub async fn init_repository(path: &Utf8Path, options: &InitOptions) -> Result<()> {
    info!("Initializing git repository at: {}", path);

    check_git_available().await?;

    if !path.exists() {
        return Err(Error::project_not_found(path.as_str()));
    }

    if path.join(".git").exists() {
        debug!("Git repository already exists at: {}", path);
        return Ok(());
    }

    debug!("Running: git init with branch {}", options.default_branch);
    run_git(
        path,
        &["init", "--initial-branch", options.default_branch.as_str()],
        "git init",
    )
    .await?;

    info!("Repository initialized successfully");

    Ok(())
}

/// Stage everything in the working tree and commit it
pub async fn commit_all(path: &Utf8Path, message: &str) -> Result<()> {
    debug!("Committing working tree at {}", path);
    run_git(path, &["add", "--all"], "git add").await?;
    run_git(path, &["commit", "-m", message], "git commit").await?;
    info!("Committed working tree at {}", path);
    Ok(())
}

async fn run_git(path: &Utf8Path, args: &[&str], label: &str) -> Result<()> {
    let output = Command::new("git")
        .current_dir(path)
        .args(args)
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::git_operation(format!(
            "{} failed: {}",
            label,
            stderr.trim()
        )));
    }

    Ok(())
}

/// Check if git is available in PATH
pub async fn check_git_available() -> Result<()> {
    let output = Command::new("git")
        .arg("--version")
        .output()
        .await
        .map_err(|_| Error::GitNotFound)?;

    if !output.status.success() {
        return Err(Error::GitNotFound);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reset_history_removes_git_dir() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8Path::from_path(temp_dir.path()).unwrap();
        std::fs::create_dir_all(path.join(".git/objects")).unwrap();
        std::fs::write(path.join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
        std::fs::write(path.join("README.md"), "# Demo\n").unwrap();

        reset_history(path).await.unwrap();

        assert!(!path.join(".git").exists());
        assert!(path.join("README.md").exists());
    }

    #[tokio::test]
    async fn test_reset_history_without_git_dir() {
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8Path::from_path(temp_dir.path()).unwrap();
        assert!(reset_history(path).await.is_ok());
    }

    #[tokio::test]
    async fn test_init_repository() {
        if check_git_available().await.is_err() {
            return;
        }
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8Path::from_path(temp_dir.path()).unwrap();

        let options = InitOptions {
            default_branch: "develop".to_string(),
        };
        init_repository(path, &options).await.unwrap();

        assert!(path.join(".git").exists());
    }

    #[tokio::test]
    async fn test_init_repository_creates_no_commit() {
        if check_git_available().await.is_err() {
            return;
        }
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8Path::from_path(temp_dir.path()).unwrap();
        std::fs::write(path.join("README.md"), "# Demo\n").unwrap();

        init_repository(path, &InitOptions::default()).await.unwrap();

        let branches = std::fs::read_dir(path.join(".git/refs/heads")).unwrap();
        assert_eq!(branches.count(), 0);
    }

    #[tokio::test]
    async fn test_init_missing_directory() {
        if check_git_available().await.is_err() {
            return;
        }
        let temp_dir = TempDir::new().unwrap();
        let path = Utf8Path::from_path(temp_dir.path()).unwrap().join("missing");

        let result = init_repository(&path, &InitOptions::default()).await;
        assert!(matches!(result, Err(Error::ProjectNotFound { .. })));
    }
}
