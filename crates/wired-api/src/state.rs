//! Shared server state.

use std::path::PathBuf;
use std::sync::Arc;

use wired_core::ModRegistry;
use wired_device::DeviceLifecycle;

/// State handed to every handler.
#[derive(Clone)]
pub struct ServerState {
    /// Registry populated and initialized before the server starts.
    pub registry: Arc<ModRegistry>,
    /// Lifecycle controller for restarts around mod application.
    pub lifecycle: Arc<DeviceLifecycle>,
    /// Filesystem root the platform operates on.
    pub root: PathBuf,
}

impl ServerState {
    pub fn new(
        registry: Arc<ModRegistry>,
        lifecycle: Arc<DeviceLifecycle>,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            registry,
            lifecycle,
            root: root.into(),
        }
    }
}
