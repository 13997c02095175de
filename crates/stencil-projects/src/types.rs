//! Core types for project renaming

use crate::error::{Error, Result};
use crate::naming::title_case;
use camino::Utf8PathBuf;
use serde::Serialize;
use std::fmt;

/// A package scope prefix, always of the form `@scope/`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ScopeToken(String);

impl ScopeToken {
    /// Parse a configured scope such as `@acme/`
    pub fn parse(raw: &str) -> Result<Self> {
        let inner = raw
            .strip_prefix('@')
            .and_then(|rest| rest.strip_suffix('/'))
            .ok_or_else(|| Error::invalid_scope(raw))?;

        if inner.is_empty() || inner.contains('/') {
            return Err(Error::invalid_scope(raw));
        }

        Ok(Self(raw.to_string()))
    }

    /// Scope a new project name owns (`@name/`)
    pub fn for_name(name: &str) -> Self {
        Self(format!("@{}/", name))
    }

    /// Extract the scope of a package name like `@acme/web`
    ///
    /// Returns `None` for unscoped names.
    pub fn from_package_name(name: &str) -> Option<Self> {
        if !name.starts_with('@') {
            return None;
        }
        let slash = name.find('/')?;
        Some(Self(name[..=slash].to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the old scope of a rename came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeSource {
    /// Read from the first scoped sub-package manifest
    Detected,
    /// No sub-package carried a scope, configured fallback used
    Fallback,
}

/// The new identity a project is renamed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTarget {
    name: String,
}

impl RenameTarget {
    /// Wrap an already validated project name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `@name/`
    pub fn scope(&self) -> ScopeToken {
        ScopeToken::for_name(&self.name)
    }

    /// Title-cased form used in documentation (`my-app` -> `My App`)
    pub fn display_name(&self) -> String {
        title_case(&self.name)
    }
}

/// Why a file was skipped or only partly rewritten during a rename
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// Manifest could not be read
    UnreadableManifest,
    /// Manifest is not a JSON object
    MalformedManifest,
    /// Source file is not valid UTF-8
    NonUtf8Source,
    /// A rescoped dependency key was already present; the existing entry was kept
    DependencyCollision,
}

/// A per-file problem that did not stop the rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameWarning {
    pub kind: WarningKind,
    pub path: Utf8PathBuf,
    pub message: String,
}

impl RenameWarning {
    pub fn new(
        kind: WarningKind,
        path: impl Into<Utf8PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for RenameWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Outcome of a completed rename
#[derive(Debug, Clone, Serialize)]
pub struct RenameReport {
    /// New project name
    pub name: String,
    /// Scope that was replaced
    pub old_scope: ScopeToken,
    /// Scope it was replaced with
    pub new_scope: ScopeToken,
    pub scope_source: ScopeSource,
    /// Manifests written back, root first
    pub manifests: Vec<Utf8PathBuf>,
    /// Source files whose content changed
    pub sources: Vec<Utf8PathBuf>,
    /// Documentation files whose content changed
    pub docs: Vec<Utf8PathBuf>,
    pub warnings: Vec<RenameWarning>,
}

impl RenameReport {
    pub(crate) fn new(
        target: &RenameTarget,
        old_scope: ScopeToken,
        scope_source: ScopeSource,
    ) -> Self {
        Self {
            name: target.name().to_string(),
            old_scope,
            new_scope: target.scope(),
            scope_source,
            manifests: Vec::new(),
            sources: Vec::new(),
            docs: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Total number of files written
    pub fn files_written(&self) -> usize {
        self.manifests.len() + self.sources.len() + self.docs.len()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_parse() {
        assert_eq!(ScopeToken::parse("@acme/").unwrap().as_str(), "@acme/");
        assert!(ScopeToken::parse("acme/").is_err());
        assert!(ScopeToken::parse("@acme").is_err());
        assert!(ScopeToken::parse("@/").is_err());
        assert!(ScopeToken::parse("@a/b/").is_err());
    }

    #[test]
    fn test_scope_from_package_name() {
        assert_eq!(
            ScopeToken::from_package_name("@acme/web"),
            Some(ScopeToken::for_name("acme"))
        );
        assert_eq!(ScopeToken::from_package_name("web"), None);
        assert_eq!(ScopeToken::from_package_name("@acme"), None);
    }

    #[test]
    fn test_rename_target_derivations() {
        let target = RenameTarget::new("shop-front");
        assert_eq!(target.scope().as_str(), "@shop-front/");
        assert_eq!(target.display_name(), "Shop Front");
    }

    #[test]
    fn test_warning_display() {
        let warning = RenameWarning::new(
            WarningKind::MalformedManifest,
            "packages/api/package.json",
            "expected value at line 1 column 1",
        );
        assert_eq!(
            warning.to_string(),
            "packages/api/package.json: expected value at line 1 column 1"
        );
    }
}
