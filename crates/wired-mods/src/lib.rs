//! Mods shipped with the wired platform.

pub mod backpack_lights;
pub mod eye_color;

pub use backpack_lights::BackpackLights;
pub use eye_color::EyeColor;

use std::path::Path;

use wired_core::{ModRegistry, Result};

/// Registry populated with the shipped mods, bound to `root`.
///
/// Registration order is load order: BackpackLights first, then EyeColor.
pub fn builtin_registry(root: &Path) -> Result<ModRegistry> {
    let mut registry = ModRegistry::new();
    registry.register(BackpackLights::new(root))?;
    registry.register(EyeColor::new(root))?;
    Ok(registry)
}
