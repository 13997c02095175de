//! Utility functions shared across CLI commands

use anyhow::{anyhow, Context, Result};
use camino::Utf8PathBuf;
use stencil_core::{get_home_dir, StencilConfig};

/// Current working directory as a UTF-8 path
pub fn current_dir_utf8() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow!("Current directory is not valid UTF-8: {}", p.display()))
}

/// Directory `install` links into
///
/// An explicit `--dir` wins over `install.bin-dir`, which wins over
/// `~/.local/bin`.
pub fn install_dir(explicit: Option<Utf8PathBuf>, config: &StencilConfig) -> Result<Utf8PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = &config.install.bin_dir {
        return Ok(Utf8PathBuf::from(dir));
    }

    let home = get_home_dir()?;
    let home = Utf8PathBuf::from_path_buf(home)
        .map_err(|p| anyhow!("Home directory is not valid UTF-8: {}", p.display()))?;
    Ok(home.join(".local").join("bin"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_dir_precedence() {
        let mut config = StencilConfig::default();
        config.install.bin_dir = Some("/opt/tools/bin".to_string());

        let explicit = install_dir(Some(Utf8PathBuf::from("/custom")), &config).unwrap();
        assert_eq!(explicit, Utf8PathBuf::from("/custom"));

        let configured = install_dir(None, &config).unwrap();
        assert_eq!(configured, Utf8PathBuf::from("/opt/tools/bin"));
    }

    #[test]
    fn test_install_dir_default_under_home() {
        let config = StencilConfig::default();
        if let Ok(dir) = install_dir(None, &config) {
            assert!(dir.ends_with(".local/bin"));
        }
    }
}
