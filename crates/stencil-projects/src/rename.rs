//! Boilerplate rename
//!
//! Rewrites a project cloned from the boilerplate so that it carries a new
//! identity. In order:
//! 1. Detect the current package scope from `packages/*/package.json`
//! 2. Set the root manifest name
//! 3. Rescope every sub-package name and its scoped dependencies
//! 4. Replace the scope and boilerplate identifier in `packages/*/src`
//! 5. Replace the display name and identifier in documentation files
//!
//! There is no rollback. Manifests or sources that cannot be parsed are
//! skipped and reported as warnings; I/O failures on files that do exist
//! abort the remaining steps and leave earlier writes in place.

use crate::error::{Error, Result};
use crate::manifest::{self, DEPENDENCY_FIELDS, MANIFEST_FILE};
use crate::types::{
    RenameReport, RenameTarget, RenameWarning, ScopeSource, ScopeToken, WarningKind,
};
use crate::walk::list_files;
use camino::{Utf8Path, Utf8PathBuf};
use stencil_core::types::BoilerplateConfig;
use tracing::{debug, info, warn};

/// Directory holding the sub-packages of a project
pub const PACKAGES_DIR: &str = "packages";

/// Directory inside each package whose files are rewritten
pub const SOURCE_DIR: &str = "src";

/// Boilerplate identity the rename replaces
#[derive(Debug, Clone)]
pub struct RenameOptions {
    /// Scope assumed when no sub-package declares one
    pub fallback_scope: ScopeToken,
    /// Literal identifier replaced by the new name
    pub boilerplate_name: String,
    /// Literal phrase in documentation replaced by the title-cased new name
    pub display_name: String,
    /// Extensions (without dot) of rewritten source files
    pub source_extensions: Vec<String>,
    /// Documentation files relative to the project root
    pub doc_files: Vec<Utf8PathBuf>,
}

impl RenameOptions {
    /// Build options from the `boilerplate` config section
    pub fn from_config(config: &BoilerplateConfig) -> Result<Self> {
        Ok(Self {
            fallback_scope: ScopeToken::parse(&config.fallback_scope)?,
            boilerplate_name: config.name.clone(),
            display_name: config.display_name.clone(),
            source_extensions: config.source_extensions.clone(),
            doc_files: config.doc_files.iter().map(Utf8PathBuf::from).collect(),
        })
    }

    fn is_source_file(&self, path: &Utf8Path) -> bool {
        path.extension()
            .is_some_and(|ext| self.source_extensions.iter().any(|e| e == ext))
    }
}

impl Default for RenameOptions {
    fn default() -> Self {
        let config = BoilerplateConfig::default();
        Self {
            fallback_scope: ScopeToken::for_name(&config.name),
            boilerplate_name: config.name,
            display_name: config.display_name,
            source_extensions: config.source_extensions,
            doc_files: config.doc_files.into_iter().map(Utf8PathBuf::from).collect(),
        }
    }
}

/// Rename the project at `root` to `new_name`
///
/// `new_name` is expected to be validated by the caller
/// (see [`crate::naming::validate_project_name`]). Running it again with the
/// same name leaves every file unchanged, including when `new_name` embeds
/// the boilerplate identifier.
pub async fn rename_project(
    root: &Utf8Path,
    new_name: &str,
    options: &RenameOptions,
) -> Result<RenameReport> {
    if !tokio::fs::metadata(root).await.is_ok_and(|m| m.is_dir()) {
        return Err(Error::project_not_found(root.as_str()));
    }

    info!("Renaming project at {} to {}", root, new_name);
    let target = RenameTarget::new(new_name);
    let packages = list_package_dirs(root).await?;

    let (old_scope, scope_source) = detect_in_packages(&packages, &options.fallback_scope).await;
    info!(
        "Replacing scope {} with {} ({:?})",
        old_scope,
        target.scope(),
        scope_source
    );

    let mut report = RenameReport::new(&target, old_scope, scope_source);

    update_root_manifest(root, &target, &mut report).await?;

    for package in &packages {
        update_package_manifest(package, &mut report).await?;
    }

    for package in &packages {
        rewrite_sources(package, &target, options, &mut report).await?;
    }

    rewrite_docs(root, &target, options, &mut report).await?;

    info!(
        "Rename complete: {} file(s) written, {} warning(s)",
        report.files_written(),
        report.warnings.len()
    );
    Ok(report)
}

/// Detect the scope currently used by the project's sub-packages
///
/// Packages are scanned in lexicographic order and the first manifest whose
/// name is scoped wins. Falls back to `fallback` when none is.
pub async fn detect_scope(
    root: &Utf8Path,
    fallback: &ScopeToken,
) -> Result<(ScopeToken, ScopeSource)> {
    let packages = list_package_dirs(root).await?;
    Ok(detect_in_packages(&packages, fallback).await)
}

async fn detect_in_packages(
    packages: &[Utf8PathBuf],
    fallback: &ScopeToken,
) -> (ScopeToken, ScopeSource) {
    for package in packages {
        let path = package.join(MANIFEST_FILE);
        match manifest::read_manifest(&path).await {
            Ok(Some(m)) => {
                let scope = manifest::package_name(&m).and_then(ScopeToken::from_package_name);
                if let Some(scope) = scope {
                    debug!("Detected scope {} from {}", scope, path);
                    return (scope, ScopeSource::Detected);
                }
            }
            Ok(None) => {}
            // Reported by the per-package update
            Err(warning) => debug!("Scope detection skipped {}", warning),
        }
    }

    (fallback.clone(), ScopeSource::Fallback)
}

/// Sorted sub-package directories under `root/packages`
async fn list_package_dirs(root: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let packages_dir = root.join(PACKAGES_DIR);
    if !tokio::fs::metadata(&packages_dir).await.is_ok_and(|m| m.is_dir()) {
        debug!("No {} directory in {}", PACKAGES_DIR, root);
        return Ok(Vec::new());
    }

    let mut entries = tokio::fs::read_dir(&packages_dir)
        .await
        .map_err(|e| Error::file_access(packages_dir.as_str(), e))?;

    let mut packages = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::file_access(packages_dir.as_str(), e))?
    {
        let Ok(path) = Utf8PathBuf::from_path_buf(entry.path()) else {
            warn!("Skipping non UTF-8 package path: {}", entry.path().display());
            continue;
        };
        if tokio::fs::metadata(&path).await.is_ok_and(|m| m.is_dir()) {
            packages.push(path);
        }
    }

    packages.sort();
    Ok(packages)
}

async fn update_root_manifest(
    root: &Utf8Path,
    target: &RenameTarget,
    report: &mut RenameReport,
) -> Result<()> {
    let path = root.join(MANIFEST_FILE);
    let mut root_manifest = match manifest::read_manifest(&path).await {
        Ok(Some(m)) => m,
        Ok(None) => {
            debug!("No root manifest at {}", path);
            return Ok(());
        }
        Err(warning) => {
            warn!("Skipping root manifest: {}", warning);
            report.warnings.push(warning);
            return Ok(());
        }
    };

    manifest::set_package_name(&mut root_manifest, target.name());
    manifest::write_manifest(&path, &root_manifest).await?;
    report.manifests.push(path);
    Ok(())
}

async fn update_package_manifest(package: &Utf8Path, report: &mut RenameReport) -> Result<()> {
    let path = package.join(MANIFEST_FILE);
    let mut package_manifest = match manifest::read_manifest(&path).await {
        Ok(Some(m)) => m,
        Ok(None) => return Ok(()),
        Err(warning) => {
            warn!("Skipping package manifest: {}", warning);
            report.warnings.push(warning);
            return Ok(());
        }
    };

    if manifest::rescope_name(&mut package_manifest, &report.old_scope, &report.new_scope) {
        debug!("Rescoped package name in {}", path);
    }

    for field in DEPENDENCY_FIELDS {
        let rekeyed = manifest::rescope_dependencies(
            &mut package_manifest,
            field,
            &report.old_scope,
            &report.new_scope,
        );
        if rekeyed.moved > 0 {
            debug!("Rekeyed {} {} entr(ies) in {}", rekeyed.moved, field, path);
        }
        for (old_key, new_key) in rekeyed.collisions {
            let warning = RenameWarning::new(
                WarningKind::DependencyCollision,
                path.clone(),
                format!("{}: dropped {}, kept existing {}", field, old_key, new_key),
            );
            warn!("{}", warning);
            report.warnings.push(warning);
        }
    }

    manifest::write_manifest(&path, &package_manifest).await?;
    report.manifests.push(path);
    Ok(())
}

async fn rewrite_sources(
    package: &Utf8Path,
    target: &RenameTarget,
    options: &RenameOptions,
    report: &mut RenameReport,
) -> Result<()> {
    let src = package.join(SOURCE_DIR);
    if !tokio::fs::metadata(&src).await.is_ok_and(|m| m.is_dir()) {
        return Ok(());
    }

    let old_scope = report.old_scope.clone();
    let new_scope = report.new_scope.clone();
    let replacements = [
        (old_scope.as_str(), new_scope.as_str()),
        (options.boilerplate_name.as_str(), target.name()),
    ];

    for file in list_files(&src).await? {
        if !options.is_source_file(&file) {
            continue;
        }
        if rewrite_file(&file, &replacements, report).await? {
            debug!("Rewrote source {}", file);
            report.sources.push(file);
        }
    }

    Ok(())
}

async fn rewrite_docs(
    root: &Utf8Path,
    target: &RenameTarget,
    options: &RenameOptions,
    report: &mut RenameReport,
) -> Result<()> {
    let display_name = target.display_name();
    let replacements = [
        (options.display_name.as_str(), display_name.as_str()),
        (options.boilerplate_name.as_str(), target.name()),
    ];

    for doc in &options.doc_files {
        let path = root.join(doc);
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            continue;
        }
        if rewrite_file(&path, &replacements, report).await? {
            debug!("Rewrote document {}", path);
            report.docs.push(path);
        }
    }

    Ok(())
}

/// Apply each `(from, to)` replacement in turn, writing only when the
/// content changed. Returns whether the file was written.
async fn rewrite_file(
    path: &Utf8Path,
    replacements: &[(&str, &str)],
    report: &mut RenameReport,
) -> Result<bool> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::file_access(path.as_str(), e))?;

    let original = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(_) => {
            report.warnings.push(RenameWarning::new(
                WarningKind::NonUtf8Source,
                path,
                "file is not valid UTF-8",
            ));
            return Ok(false);
        }
    };

    let mut content = original.clone();
    for &(from, to) in replacements {
        if !from.is_empty() && from != to && content.contains(from) {
            content = replace_token(&content, from, to);
        }
    }

    if content == original {
        return Ok(false);
    }

    tokio::fs::write(path, content)
        .await
        .map_err(|e| Error::file_access(path.as_str(), e))?;
    Ok(true)
}

/// Replace `from` with `to`
///
/// When `to` contains `from` (`app` -> `app-2`), existing occurrences of `to`
/// are left alone so a repeated rename does not grow the name again.
fn replace_token(content: &str, from: &str, to: &str) -> String {
    if !to.contains(from) {
        return content.replace(from, to);
    }
    content
        .split(to)
        .map(|segment| segment.replace(from, to))
        .collect::<Vec<_>>()
        .join(to)
}
