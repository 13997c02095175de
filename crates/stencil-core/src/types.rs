//! Configuration types for the stencil CLI
//!
//! Every field has a serde default so a partial `config.yaml` only needs to
//! name the values it overrides.

use serde::{Deserialize, Serialize};

/// Top-level stencil configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StencilConfig {
    /// Remote boilerplate repository used by `create`
    #[serde(default)]
    pub template: TemplateConfig,

    /// Identity of the boilerplate that `rename` rewrites away from
    #[serde(default)]
    pub boilerplate: BoilerplateConfig,

    /// Git defaults for freshly created projects
    #[serde(default)]
    pub git: GitConfig,

    /// Settings for `install`
    #[serde(default)]
    pub install: InstallConfig,
}

/// Boilerplate template repository
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TemplateConfig {
    /// Clone URL of the boilerplate
    #[serde(default = "default_template_repository")]
    pub repository: String,

    /// Branch to clone, remote HEAD when unset
    #[serde(default)]
    pub branch: Option<String>,

    /// Shallow clone depth
    #[serde(default = "default_clone_depth")]
    pub depth: Option<u32>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            repository: default_template_repository(),
            branch: None,
            depth: default_clone_depth(),
        }
    }
}

fn default_template_repository() -> String {
    "https://github.com/stencil-dev/fullstack-boilerplate.git".to_string()
}
fn default_clone_depth() -> Option<u32> {
    Some(1)
}

/// The literal tokens a freshly cloned boilerplate carries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BoilerplateConfig {
    /// Literal identifier replaced by the new project name
    #[serde(default = "default_boilerplate_name")]
    pub name: String,

    /// Title phrase in documentation replaced by the title-cased new name
    #[serde(default = "default_display_name")]
    pub display_name: String,

    /// Scope assumed when no sub-package declares one (`@name/`)
    #[serde(default = "default_fallback_scope")]
    pub fallback_scope: String,

    /// File extensions (without dot) rewritten under `packages/*/src`
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,

    /// Documentation files, relative to the project root
    #[serde(default = "default_doc_files")]
    pub doc_files: Vec<String>,
}

impl Default for BoilerplateConfig {
    fn default() -> Self {
        Self {
            name: default_boilerplate_name(),
            display_name: default_display_name(),
            fallback_scope: default_fallback_scope(),
            source_extensions: default_source_extensions(),
            doc_files: default_doc_files(),
        }
    }
}

fn default_boilerplate_name() -> String {
    "fullstack-boilerplate".to_string()
}
fn default_display_name() -> String {
    "Fullstack Boilerplate".to_string()
}
fn default_fallback_scope() -> String {
    "@fullstack-boilerplate/".to_string()
}
fn default_source_extensions() -> Vec<String> {
    ["ts", "tsx", "js", "jsx", "mjs", "cjs", "vue", "svelte"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_doc_files() -> Vec<String> {
    vec![
        "README.md".to_string(),
        "packages/frontend/index.html".to_string(),
    ]
}

/// Git workflow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitConfig {
    /// Initial branch of the re-initialised repository
    #[serde(default = "default_git_branch")]
    pub default_branch: String,

    /// Message of the optional initial commit
    #[serde(default = "default_initial_commit_message")]
    pub initial_commit_message: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            default_branch: default_git_branch(),
            initial_commit_message: default_initial_commit_message(),
        }
    }
}

fn default_git_branch() -> String {
    "main".to_string()
}
fn default_initial_commit_message() -> String {
    "chore: initial commit".to_string()
}

/// Install configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InstallConfig {
    /// Directory the binary is linked into, `~/.local/bin` when unset
    #[serde(default)]
    pub bin_dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stencil_config_defaults() {
        let config = StencilConfig::default();
        assert_eq!(config.boilerplate.name, "fullstack-boilerplate");
        assert_eq!(config.boilerplate.fallback_scope, "@fullstack-boilerplate/");
        assert_eq!(config.template.depth, Some(1));
        assert_eq!(config.git.default_branch, "main");
        assert!(config.install.bin_dir.is_none());
        assert!(config.boilerplate.source_extensions.contains(&"tsx".to_string()));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
boilerplate:
  display-name: "Acme Starter"
"#;
        let config: StencilConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.boilerplate.display_name, "Acme Starter");
        assert_eq!(config.boilerplate.name, "fullstack-boilerplate");
        assert_eq!(
            config.template.repository,
            "https://github.com/stencil-dev/fullstack-boilerplate.git"
        );
        assert_eq!(config.boilerplate.doc_files.len(), 2);
    }
}
