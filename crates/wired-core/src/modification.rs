//! The `Modification` contract.
//!
//! A mod is a named, independently loadable change to device configuration
//! or behavior files. Common identity fields live in [`ModInfo`] and are
//! held by composition; variant behavior (`load`, `save`, `apply`,
//! `current`, `set_fs_root`) is implemented per concrete mod type.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::fs::mod_dir;

/// Common fields shared by every mod.
#[derive(Debug, Clone)]
pub struct ModInfo {
    /// Stable unique identifier; also the leaf directory name under the
    /// mod storage tree.
    pub name: String,
    /// Human-readable summary.
    pub description: String,
    /// Whether applying this mod mandates a platform restart.
    pub restart_required: bool,
}

impl ModInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            restart_required: false,
        }
    }

    /// Mark the mod as requiring a platform restart after `save`/`apply`.
    pub fn restart_required(mut self) -> Self {
        self.restart_required = true;
        self
    }
}

/// Capability set every mod variant implements.
///
/// Instances are constructed at process start, registered once, have
/// [`load`](Modification::load) invoked exactly once during initialization,
/// and then live for the process lifetime.
#[async_trait]
pub trait Modification: Send + Sync {
    /// Identity fields for this mod.
    fn info(&self) -> &ModInfo;

    /// Content-type tag the mod expects for `save`/`apply` payloads.
    fn accepts(&self) -> &str;

    /// Baseline configuration, used to pre-populate callers.
    fn default_json(&self) -> Value;

    /// One-time setup, run during registry initialization in registration
    /// order. A failure is reported by the registry but does not stop the
    /// remaining mods from loading.
    async fn load(&mut self) -> Result<()>;

    /// Current materialized settings. Recomputed from on-disk state on
    /// every call, never cached.
    async fn current(&self) -> String;

    /// Rebind the filesystem root the mod operates on, switching between
    /// the live system and an offline mounted image.
    fn set_fs_root(&mut self, root: PathBuf);

    /// Validate the content type and persist the payload as the mod's new
    /// configuration.
    async fn save(&self, content_type: &str, payload: &str) -> Result<()>;

    /// Apply an action with the given payload. Mod-specific, idempotent for
    /// repeated identical calls, and returns an error rather than panicking
    /// on any failure.
    async fn apply(&self, content_type: &str, payload: &str) -> Result<()>;

    /// Convenience accessors over [`info`](Modification::info).
    fn name(&self) -> &str {
        &self.info().name
    }

    fn description(&self) -> &str {
        &self.info().description
    }

    fn restart_required(&self) -> bool {
        self.info().restart_required
    }

    /// Persistent directory for this mod under `root`, created on demand.
    fn data_dir(&self, root: &Path) -> Result<PathBuf> {
        mod_dir(root, self.name())
    }

    /// Check a submitted content type against [`accepts`](Modification::accepts),
    /// ignoring surrounding whitespace.
    fn check_content_type(&self, content_type: &str) -> Result<()> {
        if content_type.trim() == self.accepts() {
            Ok(())
        } else {
            Err(crate::error::ModError::unsupported_content_type(
                content_type,
                self.accepts(),
            ))
        }
    }
}

/// Shared handle to a registered mod.
///
/// The lock serializes `save`/`apply`/`current` against the mutating
/// `load` and `set_fs_root` entry points. Concurrent `save`/`apply`
/// calls against the same mod must still be serialized by the caller.
pub type DynModification = Arc<RwLock<Box<dyn Modification>>>;

#[cfg(test)]
mod tests {
    use super::*;

    struct NullMod {
        info: ModInfo,
    }

    #[async_trait]
    impl Modification for NullMod {
        fn info(&self) -> &ModInfo {
            &self.info
        }

        fn accepts(&self) -> &str {
            "application/json"
        }

        fn default_json(&self) -> Value {
            serde_json::json!({})
        }

        async fn load(&mut self) -> Result<()> {
            Ok(())
        }

        async fn current(&self) -> String {
            String::new()
        }

        fn set_fs_root(&mut self, _root: PathBuf) {}

        async fn save(&self, content_type: &str, _payload: &str) -> Result<()> {
            self.check_content_type(content_type)
        }

        async fn apply(&self, content_type: &str, _payload: &str) -> Result<()> {
            self.check_content_type(content_type)
        }
    }

    #[test]
    fn accessors_delegate_to_info() {
        let m = NullMod {
            info: ModInfo::new("LED", "LED control").restart_required(),
        };
        assert_eq!(m.name(), "LED");
        assert_eq!(m.description(), "LED control");
        assert!(m.restart_required());
    }

    #[tokio::test]
    async fn content_type_check_trims_whitespace() {
        let m = NullMod {
            info: ModInfo::new("LED", "LED control"),
        };
        assert!(m.save(" application/json ", "{}").await.is_ok());
        assert!(m.save("text/plain", "{}").await.is_err());
    }
}
