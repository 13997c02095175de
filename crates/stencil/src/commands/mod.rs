//! Command implementations

pub mod create;
pub mod install;
pub mod rename;
