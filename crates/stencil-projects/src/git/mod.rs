//! Git operations module
//!
//! Async wrappers around the `git` binary used by `create`:
//! - Cloning the boilerplate
//! - Discarding its history
//! - Re-initializing a fresh repository
//!
//! # Examples
//!
//! ```no_run
//! use stencil_projects::git::{
//!     clone_repository, init_repository, reset_history, CloneOptions, InitOptions,
//! };
//! use camino::Utf8Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dest = Utf8Path::new("/tmp/my-app");
//! let options = CloneOptions {
//!     depth: Some(1),
//!     ..Default::default()
//! };
//! clone_repository("https://github.com/user/boilerplate.git", dest, &options).await?;
//! reset_history(dest).await?;
//! init_repository(dest, &InitOptions::default()).await?;
//! # Ok(())
//! # }
//! ```

mod clone;
mod init;

pub use clone::{clone_repository, is_valid_repo_url, CloneOptions};
pub use init::{check_git_available, commit_all, init_repository, reset_history, InitOptions};
