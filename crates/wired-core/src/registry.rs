//! Registry of all mods known to the process.
//!
//! The registry is an explicit object constructed once at startup and
//! shared by reference with every consumer. Insertion order is load order;
//! mods that provide configuration other mods depend on must be registered
//! first.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::error::{ModError, Result};
use crate::modification::{DynModification, Modification};

struct Entry {
    /// Mod names are fixed at construction, so the registry caches them and
    /// lookups need not take the mod lock.
    name: String,
    handle: DynModification,
}

/// Ordered, unique-by-name collection of mod instances.
#[derive(Default)]
pub struct ModRegistry {
    entries: Vec<Entry>,
    initialized: AtomicBool,
}

impl ModRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mod. Registration order is significant: `init_mods` loads
    /// mods in this order.
    pub fn register<M: Modification + 'static>(&mut self, modification: M) -> Result<()> {
        let name = modification.name().to_string();
        if self.entries.iter().any(|e| e.name == name) {
            return Err(ModError::AlreadyRegistered(name));
        }
        self.entries.push(Entry {
            name,
            handle: Arc::new(RwLock::new(Box::new(modification))),
        });
        Ok(())
    }

    /// Look up a mod by name. Surrounding whitespace in the query is
    /// ignored; the first exact match in registration order wins.
    pub fn find(&self, name: &str) -> Result<DynModification> {
        let wanted = name.trim();
        self.entries
            .iter()
            .find(|e| e.name == wanted)
            .map(|e| Arc::clone(&e.handle))
            .ok_or_else(|| ModError::NotFound(wanted.to_string()))
    }

    /// Run every mod's one-time `load`, in registration order.
    ///
    /// Must be called exactly once, after registration and before any mod
    /// is invoked. A mod whose `load` fails is reported and skipped; the
    /// remaining mods still load. A repeated call is a logged no-op.
    pub async fn init_mods(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            warn!("init_mods called more than once, ignoring");
            return;
        }
        for entry in &self.entries {
            info!(mod_name = %entry.name, "loading mod");
            if let Err(err) = entry.handle.write().await.load().await {
                error!(mod_name = %entry.name, %err, "mod failed to load");
            }
        }
    }

    /// Names of all registered mods, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Handles to all registered mods, in registration order.
    pub fn all(&self) -> Vec<DynModification> {
        self.entries
            .iter()
            .map(|e| Arc::clone(&e.handle))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
