//! Platform path configuration.
//!
//! All fixed filesystem locations live here so no crate redefines them.
//! Mods operate either on the live filesystem or on an offline image
//! mounted under an alternate root.

/// Filesystem roots a mod can be bound to.
pub mod roots {
    /// Root of the live filesystem the robot is running from.
    pub const SYSTEM: &str = "/";
    /// Root of a mounted update image, used when mutating an offline
    /// partition instead of the running system.
    pub const UPDATE: &str = "/mnt/";
}

/// Well-known paths relative to a filesystem root.
pub mod paths {
    /// Robot resource tree holding engine configuration and assets.
    pub const ROBOT_RESOURCES: &str = "anki/data/assets/cozmo_resources/";
    /// Per-mod persistent storage, one directory per mod name.
    pub const MOD_STORAGE: &str = "data/wired/mods/";
    /// Backpack light configuration inside the resource tree.
    pub const BACKPACK_LIGHTS: &str = "config/engine/lights/backpackLights/";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roots_end_with_separator() {
        assert!(roots::SYSTEM.ends_with('/'));
        assert!(roots::UPDATE.ends_with('/'));
        assert!(paths::MOD_STORAGE.ends_with('/'));
    }
}
