//! # stencil-core
//!
//! Core library for the stencil CLI providing:
//! - Hierarchical configuration loading (defaults, `~/.stencil/config.yaml`, `STENCIL_*` env)
//! - Type definitions for the boilerplate template and install settings
//! - Shared helpers

pub mod config;
pub mod error;
pub mod types;
pub mod utils;

pub use config::ConfigLoader;
pub use error::{Error, Result};
pub use types::StencilConfig;
pub use utils::get_home_dir;
