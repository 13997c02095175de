//! Moving a renamed project to a sibling directory named after it

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tracing::{debug, info};

/// What happened to the project directory after a rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum RelocateOutcome {
    /// Directory moved
    Moved { from: Utf8PathBuf, to: Utf8PathBuf },
    /// Directory already carries the new name
    AlreadyNamed,
    /// The working directory is the project or lies inside it
    SkippedCurrentDir,
    /// A sibling with the new name already exists
    TargetExists { path: Utf8PathBuf },
}

/// Move `root` to `<parent>/<new_name>`
///
/// `cwd` is the caller's working directory; a process cannot move the folder
/// it runs in, so that case is reported instead of attempted.
pub async fn relocate_project(
    root: &Utf8Path,
    new_name: &str,
    cwd: &Utf8Path,
) -> Result<RelocateOutcome> {
    let resolved = canonicalize_utf8(root).await?;
    let cwd = canonicalize_utf8(cwd)
        .await
        .unwrap_or_else(|_| cwd.to_path_buf());

    if cwd.starts_with(&resolved) {
        debug!("{} contains the working directory {}", resolved, cwd);
        return Ok(RelocateOutcome::SkippedCurrentDir);
    }

    if resolved.file_name() == Some(new_name) {
        return Ok(RelocateOutcome::AlreadyNamed);
    }

    let parent = resolved
        .parent()
        .ok_or_else(|| Error::invalid_path(resolved.as_str()))?;
    let destination = parent.join(new_name);

    if tokio::fs::try_exists(&destination).await.unwrap_or(true) {
        return Ok(RelocateOutcome::TargetExists { path: destination });
    }

    tokio::fs::rename(&resolved, &destination)
        .await
        .map_err(|e| Error::file_access(resolved.as_str(), e))?;
    info!("Moved {} -> {}", resolved, destination);

    Ok(RelocateOutcome::Moved {
        from: resolved,
        to: destination,
    })
}

async fn canonicalize_utf8(path: &Utf8Path) -> Result<Utf8PathBuf> {
    let canonical = tokio::fs::canonicalize(path)
        .await
        .map_err(|e| Error::file_access(path.as_str(), e))?;
    Utf8PathBuf::from_path_buf(canonical).map_err(|p| Error::invalid_path(p.display().to_string()))
}
