//! Recursive file listing
//!
//! Walks a directory tree with an explicit worklist. The entries of one
//! directory are stat'ed concurrently and joined before the walk moves on.
//! Symlinks are followed; a directory whose canonical path was already
//! visited is skipped, so link cycles terminate.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use futures::future::join_all;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, trace, warn};

/// List every regular file below `dir`
///
/// Directories are expanded but not returned. Returned paths are rooted at
/// `dir` and sorted.
pub async fn list_files(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let canonical = tokio::fs::canonicalize(&current)
            .await
            .map_err(|e| Error::file_access(current.as_str(), e))?;
        if !visited.insert(canonical) {
            debug!("Skipping already visited directory: {}", current);
            continue;
        }

        let children = read_children(&current).await?;
        let stats = join_all(children.iter().map(tokio::fs::metadata)).await;

        for (path, stat) in children.into_iter().zip(stats) {
            match stat {
                Ok(meta) if meta.is_dir() => pending.push(path),
                Ok(meta) if meta.is_file() => files.push(path),
                Ok(_) => trace!("Ignoring special file: {}", path),
                Err(e) => warn!("Skipping {}: {}", path, e),
            }
        }
    }

    files.sort();
    Ok(files)
}

async fn read_children(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| Error::file_access(dir.as_str(), e))?;

    let mut children = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::file_access(dir.as_str(), e))?
    {
        match Utf8PathBuf::from_path_buf(entry.path()) {
            Ok(path) => children.push(path),
            Err(path) => warn!("Skipping non UTF-8 path: {}", path.display()),
        }
    }
    Ok(children)
}
