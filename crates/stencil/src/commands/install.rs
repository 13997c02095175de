//! `stencil install` command handler

use anyhow::{anyhow, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use stencil_core::StencilConfig;

use crate::cli::InstallArgs;
use crate::output;
use crate::utils::install_dir;

#[cfg(windows)]
const BINARY_NAME: &str = "stencil.exe";
#[cfg(not(windows))]
const BINARY_NAME: &str = "stencil";

/// Link the running executable into a bin directory
pub fn run(args: InstallArgs, config: &StencilConfig) -> Result<()> {
    let exe = std::env::current_exe().context("Failed to locate the stencil executable")?;
    let exe = Utf8PathBuf::from_path_buf(exe)
        .map_err(|p| anyhow!("Executable path is not valid UTF-8: {}", p.display()))?;

    let bin_dir = install_dir(args.dir, config)?;
    let link = bin_dir.join(BINARY_NAME);

    output::header("Install stencil");
    output::kv("Executable", exe.as_str());
    output::kv("Link", link.as_str());
    println!();

    if link == exe {
        output::info("stencil is already running from the install location");
        return Ok(());
    }

    std::fs::create_dir_all(&bin_dir)
        .with_context(|| format!("Failed to create {}", bin_dir))?;

    if link.symlink_metadata().is_ok() {
        if !args.force {
            return Err(anyhow!(
                "{} already exists; pass --force to replace it",
                link
            ));
        }
        std::fs::remove_file(&link).with_context(|| format!("Failed to remove {}", link))?;
        tracing::debug!("Removed existing {}", link);
    }

    place_binary(&exe, &link)?;
    output::success(&format!("Installed {}", link));

    if !is_on_path(&bin_dir) {
        output::warning(&format!(
            "{} is not on your PATH; add it to run `stencil` from anywhere",
            bin_dir
        ));
    } else if let Ok(found) = which::which("stencil") {
        if found != link.as_std_path() {
            output::warning(&format!("`stencil` on PATH resolves to {}", found.display()));
        }
    }

    Ok(())
}

#[cfg(unix)]
fn place_binary(exe: &Utf8Path, link: &Utf8Path) -> Result<()> {
    std::os::unix::fs::symlink(exe, link)
        .with_context(|| format!("Failed to link {} -> {}", link, exe))
}

#[cfg(not(unix))]
fn place_binary(exe: &Utf8Path, link: &Utf8Path) -> Result<()> {
    std::fs::copy(exe, link)
        .map(|_| ())
        .with_context(|| format!("Failed to copy {} -> {}", exe, link))
}

fn is_on_path(dir: &Utf8Path) -> bool {
    let Some(path) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&path).any(|entry| entry == dir.as_std_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_place_binary() {
        let temp = TempDir::new().unwrap();
        let base = Utf8Path::from_path(temp.path()).unwrap();
        let exe = base.join("stencil-build");
        std::fs::write(&exe, "binary").unwrap();
        let link = base.join("bin").join(BINARY_NAME);
        std::fs::create_dir_all(link.parent().unwrap()).unwrap();

        place_binary(&exe, &link).unwrap();

        assert_eq!(std::fs::read_to_string(&link).unwrap(), "binary");
    }

    #[test]
    fn test_root_is_not_on_path() {
        let temp = TempDir::new().unwrap();
        let dir = Utf8Path::from_path(temp.path()).unwrap();
        assert!(!is_on_path(dir));
    }
}
