//! Core traits and types for the wired mod platform.
//!
//! This crate defines the foundational abstractions used across the project:
//! the `Modification` contract every mod implements, the process-wide
//! `ModRegistry`, and the on-disk layout mods persist into.

pub mod config;
pub mod error;
pub mod fs;
pub mod modification;
pub mod registry;

pub use error::{ModError, Result};
pub use fs::mod_dir;
pub use modification::{DynModification, ModInfo, Modification};
pub use registry::ModRegistry;

/// Re-exports commonly used types.
pub mod prelude {
    pub use crate::config::{paths, roots};
    pub use crate::error::{ModError, Result};
    pub use crate::fs::mod_dir;
    pub use crate::modification::{DynModification, ModInfo, Modification};
    pub use crate::registry::ModRegistry;
}
