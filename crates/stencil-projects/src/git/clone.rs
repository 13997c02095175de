//! Cloning the boilerplate repository

use crate::error::{Error, Result};
use crate::git::init::check_git_available;
use camino::{Utf8Path, Utf8PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

/// Options for cloning a repository
#[derive(Debug, Clone, Default)]
pub struct CloneOptions {
    /// Shallow clone with specified depth
    pub depth: Option<u32>,
    /// Branch to checkout after clone
    pub branch: Option<String>,
}

/// Clone a repository
///
/// # Arguments
/// * `url` - Repository URL to clone
/// * `destination` - Destination directory path
/// * `options` - Clone options
///
/// # Errors
/// Returns error if:
/// - Git is not installed
/// - Invalid repository URL
/// - Destination already exists
/// - Clone operation fails (git's stderr is carried in the error)
pub async fn clone_repository(
    url: &str,
    destination: &Utf8Path,
    options: &CloneOptions,
) -> Result<Utf8PathBuf> {
    info!("Cloning repository: {} -> {}", url, destination);

    check_git_available().await?;

    if !is_valid_repo_url(url) {
        return Err(Error::invalid_repo_url(url));
    }

    if destination.exists() {
        return Err(Error::repo_exists(destination.as_str()));
    }

    let mut cmd = Command::new("git");
    cmd.arg("clone");

    if let Some(depth) = options.depth {
        cmd.arg("--depth").arg(depth.to_string());
    }

    if let Some(branch) = &options.branch {
        cmd.arg("--branch").arg(branch);
    }

    cmd.arg(url).arg(destination.as_str());

    debug!("Running: git clone");
    let output = cmd.output().await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::clone_failed(stderr.trim()));
    }

    info!("Repository cloned successfully");
    Ok(destination.to_path_buf())
}

/// Validate if a string is a valid repository URL
///
/// Local `file://` URLs are accepted for mirrors of the boilerplate.
pub fn is_valid_repo_url(url: &str) -> bool {
    url.starts_with("https://")
        || url.starts_with("git@")
        || url.starts_with("http://")
        || url.starts_with("file://")
}
