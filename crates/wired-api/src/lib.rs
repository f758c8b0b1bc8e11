//! HTTP surface for the wired mod platform.
//!
//! Thin routing layer: it resolves mods in the registry, forwards raw
//! payloads with their content-type tag, and renders results through the
//! platform's JSON status envelope. The core never parses HTTP itself.

pub mod handlers;
pub mod models;
pub mod router;
pub mod state;

pub use models::{ModSummary, StatusResponse};
pub use router::create_router;
pub use state::ServerState;
