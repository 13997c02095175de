//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Built-in defaults
//! 2. Global config (~/.stencil/config.yaml) or an explicit `--config` file
//! 3. Environment variables (STENCIL_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::types::StencilConfig;
use crate::utils::get_home_dir;
use camino::{Utf8Path, Utf8PathBuf};
use std::env;
use std::fs;
use tracing::debug;

/// File name of the global config inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Configuration hierarchy loader
pub struct ConfigLoader {
    /// Base directory for configuration files
    config_dir: Utf8PathBuf,
}

impl ConfigLoader {
    /// Create a loader rooted at the standard config directory (~/.stencil)
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self { config_dir })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    fn get_config_dir() -> Result<Utf8PathBuf> {
        let home = get_home_dir()
            .map_err(|_| Error::invalid_config("Could not determine home directory"))?;
        let home = Utf8PathBuf::from_path_buf(home)
            .map_err(|p| {
                Error::invalid_config(format!("Non UTF-8 home directory: {}", p.display()))
            })?;
        Ok(home.join(".stencil"))
    }

    /// Load configuration with hierarchical precedence
    ///
    /// An explicit `path` replaces the global config file and must exist.
    pub fn load(&self, path: Option<&Utf8Path>) -> Result<StencilConfig> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::config_not_found(path.as_str()));
                }
                self.load_yaml_file(path)?
            }
            None => {
                let global = self.config_dir.join(CONFIG_FILE_NAME);
                if global.exists() {
                    self.load_yaml_file(&global)?
                } else {
                    debug!("No config at {}, using defaults", global);
                    StencilConfig::default()
                }
            }
        };

        config = self.apply_env_overrides(config)?;
        Ok(config)
    }

    fn load_yaml_file(&self, path: &Utf8Path) -> Result<StencilConfig> {
        debug!("Loading config from {}", path);
        let content = fs::read_to_string(path)?;
        let config: StencilConfig = serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&self, mut config: StencilConfig) -> Result<StencilConfig> {
        if let Ok(val) = env::var("STENCIL_TEMPLATE_REPOSITORY") {
            config.template.repository = val;
        }

        if let Ok(val) = env::var("STENCIL_TEMPLATE_BRANCH") {
            config.template.branch = Some(val);
        }

        if let Ok(val) = env::var("STENCIL_FALLBACK_SCOPE") {
            if !(val.starts_with('@') && val.ends_with('/')) {
                return Err(Error::invalid_config(
                    "STENCIL_FALLBACK_SCOPE must have the form @scope/",
                ));
            }
            config.boilerplate.fallback_scope = val;
        }

        if let Ok(val) = env::var("STENCIL_BOILERPLATE_NAME") {
            config.boilerplate.name = val;
        }

        if let Ok(val) = env::var("STENCIL_DISPLAY_NAME") {
            config.boilerplate.display_name = val;
        }

        if let Ok(val) = env::var("STENCIL_DEFAULT_BRANCH") {
            config.git.default_branch = val;
        }

        if let Ok(val) = env::var("STENCIL_INSTALL_DIR") {
            config.install.bin_dir = Some(val);
        }

        Ok(config)
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}
