//! `package.json` reading, rescoping and writing
//!
//! Manifests are handled as order-preserving JSON objects so that fields the
//! rename does not touch keep their position. Rekeyed dependencies move to
//! the end of their map.

use crate::error::{Error, Result};
use crate::types::{RenameWarning, ScopeToken, WarningKind};
use camino::Utf8Path;
use serde_json::{Map, Value};
use tracing::debug;

/// File name of a package manifest
pub const MANIFEST_FILE: &str = "package.json";

/// Dependency maps whose keys are rescoped
pub const DEPENDENCY_FIELDS: [&str; 2] = ["dependencies", "devDependencies"];

/// A parsed manifest object
pub type Manifest = Map<String, Value>;

/// Read and parse a manifest
///
/// Returns `Ok(None)` when the file does not exist. A manifest that cannot be
/// read or is not a JSON object comes back as a warning for the caller to
/// collect.
pub async fn read_manifest(
    path: &Utf8Path,
) -> std::result::Result<Option<Manifest>, RenameWarning> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Ok(None);
    }

    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        RenameWarning::new(WarningKind::UnreadableManifest, path, e.to_string())
    })?;

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(_) => Err(RenameWarning::new(
            WarningKind::MalformedManifest,
            path,
            "manifest is not a JSON object",
        )),
        Err(e) => Err(RenameWarning::new(
            WarningKind::MalformedManifest,
            path,
            e.to_string(),
        )),
    }
}

/// Write a manifest with 2-space indentation and a trailing newline
pub async fn write_manifest(path: &Utf8Path, manifest: &Manifest) -> Result<()> {
    let mut content = serde_json::to_string_pretty(manifest)?;
    content.push('\n');
    tokio::fs::write(path, content)
        .await
        .map_err(|e| Error::file_access(path.as_str(), e))?;
    debug!("Wrote manifest {}", path);
    Ok(())
}

/// The `name` field, when it is a string
pub fn package_name(manifest: &Manifest) -> Option<&str> {
    manifest.get("name").and_then(Value::as_str)
}

/// Set `name` unconditionally
pub fn set_package_name(manifest: &mut Manifest, name: &str) {
    manifest.insert("name".to_string(), Value::String(name.to_string()));
}

/// Swap the scope prefix of `name` if it starts with `old`
pub fn rescope_name(manifest: &mut Manifest, old: &ScopeToken, new: &ScopeToken) -> bool {
    let renamed = match package_name(manifest) {
        Some(name) => match name.strip_prefix(old.as_str()) {
            Some(rest) => format!("{}{}", new, rest),
            None => return false,
        },
        None => return false,
    };
    set_package_name(manifest, &renamed);
    true
}

/// Keys touched by [`rescope_dependencies`]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Rekeyed {
    /// Entries moved to the new scope
    pub moved: usize,
    /// `(old, new)` keys where `new` already existed; `old` was dropped
    pub collisions: Vec<(String, String)>,
}

/// Rekey entries of one dependency map whose key starts with `old`
///
/// Version values are kept as they are. When the rescoped key is already
/// present its existing version wins and the old entry is dropped.
pub fn rescope_dependencies(
    manifest: &mut Manifest,
    field: &str,
    old: &ScopeToken,
    new: &ScopeToken,
) -> Rekeyed {
    let mut rekeyed = Rekeyed::default();
    if old == new {
        return rekeyed;
    }
    let Some(Value::Object(deps)) = manifest.get_mut(field) else {
        return rekeyed;
    };

    let scoped: Vec<String> = deps
        .keys()
        .filter(|key| key.starts_with(old.as_str()))
        .cloned()
        .collect();

    for key in scoped {
        let renamed = format!("{}{}", new, &key[old.as_str().len()..]);
        let Some(version) = deps.shift_remove(&key) else {
            continue;
        };
        if deps.contains_key(&renamed) {
            debug!("{} already has {}, dropping {}", field, renamed, key);
            rekeyed.collisions.push((key, renamed));
        } else {
            deps.insert(renamed, version);
            rekeyed.moved += 1;
        }
    }

    rekeyed
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use serde_json::json;
    use tempfile::TempDir;

    fn manifest(value: Value) -> Manifest {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    fn scopes() -> (ScopeToken, ScopeToken) {
        (ScopeToken::for_name("old"), ScopeToken::for_name("new"))
    }

    #[test]
    fn test_rescope_name() {
        let (old, new) = scopes();
        let mut m = manifest(json!({ "name": "@old/web", "version": "1.0.0" }));
        assert!(rescope_name(&mut m, &old, &new));
        assert_eq!(package_name(&m), Some("@new/web"));
    }

    #[test]
    fn test_rescope_name_leaves_other_scopes() {
        let (old, new) = scopes();
        let mut m = manifest(json!({ "name": "@older/web" }));
        assert!(!rescope_name(&mut m, &old, &new));
        assert_eq!(package_name(&m), Some("@older/web"));

        let mut unnamed = manifest(json!({ "private": true }));
        assert!(!rescope_name(&mut unnamed, &old, &new));
        assert!(package_name(&unnamed).is_none());
    }

    #[test]
    fn test_rescope_dependencies_keeps_versions() {
        let (old, new) = scopes();
        let mut m = manifest(json!({
            "dependencies": {
                "@old/shared": "workspace:*",
                "react": "^18.2.0",
                "@other/lib": "1.2.3"
            }
        }));

        assert_eq!(rescope_dependencies(&mut m, "dependencies", &old, &new).moved, 1);

        let deps = m["dependencies"].as_object().unwrap();
        assert_eq!(deps["@new/shared"], json!("workspace:*"));
        assert_eq!(deps["react"], json!("^18.2.0"));
        assert_eq!(deps["@other/lib"], json!("1.2.3"));
        assert!(!deps.contains_key("@old/shared"));
        assert_eq!(deps.len(), 3);
    }

    #[test]
    fn test_rescope_dependencies_missing_field() {
        let (old, new) = scopes();
        let mut m = manifest(json!({ "name": "x", "devDependencies": "oops" }));
        assert_eq!(
            rescope_dependencies(&mut m, "dependencies", &old, &new),
            Rekeyed::default()
        );
        assert_eq!(
            rescope_dependencies(&mut m, "devDependencies", &old, &new),
            Rekeyed::default()
        );
    }

    #[test]
    fn test_rescope_dependencies_keeps_existing_new_key() {
        let (old, new) = scopes();
        let mut m = manifest(json!({
            "dependencies": {
                "@old/shared": "1.0.0",
                "@new/shared": "2.0.0",
                "@old/ui": "3.0.0"
            }
        }));

        let rekeyed = rescope_dependencies(&mut m, "dependencies", &old, &new);

        assert_eq!(rekeyed.moved, 1);
        assert_eq!(
            rekeyed.collisions,
            vec![("@old/shared".to_string(), "@new/shared".to_string())]
        );
        assert_eq!(
            m["dependencies"],
            json!({ "@new/shared": "2.0.0", "@new/ui": "3.0.0" })
        );
    }

    #[tokio::test]
    async fn test_read_manifest_outcomes() {
        let temp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();

        assert_eq!(read_manifest(&root.join("absent.json")).await, Ok(None));

        let broken = root.join("broken.json");
        std::fs::write(&broken, "{ \"name\": ").unwrap();
        let warning = read_manifest(&broken).await.unwrap_err();
        assert_eq!(warning.kind, WarningKind::MalformedManifest);

        let array = root.join("array.json");
        std::fs::write(&array, "[]").unwrap();
        assert!(read_manifest(&array).await.is_err());
    }

    #[tokio::test]
    async fn test_write_manifest_format() {
        let temp = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join(MANIFEST_FILE)).unwrap();
        let m = manifest(json!({ "name": "demo", "version": "0.1.0" }));

        write_manifest(&path, &m).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"name\": \"demo\",\n  \"version\": \"0.1.0\"\n}\n");
    }
}
