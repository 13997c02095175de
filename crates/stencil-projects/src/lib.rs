//! # stencil-projects
//!
//! Project library for the stencil CLI providing:
//! - Renaming a project cloned from the boilerplate (manifests, scoped
//!   package names, source references, documentation)
//! - Recursive file listing with symlink-cycle protection
//! - Project name rules
//! - Relocating a renamed project directory
//! - Git clone, history reset and init
//!
//! # Examples
//!
//! ```no_run
//! use stencil_projects::{rename_project, validate_project_name, RenameOptions};
//! use camino::Utf8Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! validate_project_name("shop-front")?;
//! let report = rename_project(
//!     Utf8Path::new("./fullstack-boilerplate"),
//!     "shop-front",
//!     &RenameOptions::default(),
//! )
//! .await?;
//!
//! for warning in &report.warnings {
//!     eprintln!("skipped {}", warning);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod git;
pub mod manifest;
pub mod naming;
pub mod relocate;
pub mod rename;
pub mod types;
pub mod walk;

pub use error::{Error, Result};
pub use naming::{is_valid_project_name, title_case, validate_project_name};
pub use relocate::{relocate_project, RelocateOutcome};
pub use rename::{detect_scope, rename_project, RenameOptions};
pub use types::{RenameReport, RenameTarget, RenameWarning, ScopeSource, ScopeToken, WarningKind};
pub use walk::list_files;
