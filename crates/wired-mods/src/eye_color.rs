//! Eye color mod.
//!
//! Persists a hue/saturation override and renders it as an engine-side
//! settings file under the resource tree. Read at engine startup, so a
//! restart is required.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use wired_core::config::paths;
use wired_core::{ModError, ModInfo, Modification, Result};

const CONFIG_FILE: &str = "config.json";
/// Override file the engine reads from the resource tree.
const RENDERED_FILE: &str = "config/engine/wired_eye_color.json";

/// Eye color as hue and saturation, both in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeConfig {
    pub hue: f64,
    pub saturation: f64,
}

impl Default for EyeConfig {
    fn default() -> Self {
        // Stock Vector green.
        Self {
            hue: 0.42,
            saturation: 1.0,
        }
    }
}

impl EyeConfig {
    fn parse(payload: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(payload)
            .map_err(|err| ModError::Validation(format!("bad eye config: {err}")))?;
        for (label, value) in [("hue", config.hue), ("saturation", config.saturation)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ModError::Validation(format!(
                    "{label} {value} outside 0.0..=1.0"
                )));
            }
        }
        Ok(config)
    }
}

/// Mod overriding the robot's eye color.
pub struct EyeColor {
    info: ModInfo,
    fs_root: PathBuf,
}

impl EyeColor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            info: ModInfo::new("EyeColor", "Overrides the robot's eye color").restart_required(),
            fs_root: root.into(),
        }
    }

    fn config_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir(&self.fs_root)?.join(CONFIG_FILE))
    }

    fn rendered_path(&self) -> PathBuf {
        self.fs_root.join(paths::ROBOT_RESOURCES).join(RENDERED_FILE)
    }
}

#[async_trait]
impl Modification for EyeColor {
    fn info(&self) -> &ModInfo {
        &self.info
    }

    fn accepts(&self) -> &str {
        "application/json"
    }

    fn default_json(&self) -> Value {
        serde_json::to_value(EyeConfig::default()).expect("default eye config serializes")
    }

    async fn load(&mut self) -> Result<()> {
        let path = self.config_path()?;
        if !path.exists() {
            tokio::fs::write(&path, self.default_json().to_string()).await?;
        }
        Ok(())
    }

    async fn current(&self) -> String {
        match self.config_path() {
            Ok(path) => match tokio::fs::read_to_string(&path).await {
                Ok(config) => config,
                Err(err) => {
                    warn!(%err, "eye color config unreadable, reporting defaults");
                    self.default_json().to_string()
                }
            },
            Err(err) => {
                warn!(%err, "eye color mod dir unavailable, reporting defaults");
                self.default_json().to_string()
            }
        }
    }

    fn set_fs_root(&mut self, root: PathBuf) {
        self.fs_root = root;
    }

    async fn save(&self, content_type: &str, payload: &str) -> Result<()> {
        self.check_content_type(content_type)?;
        EyeConfig::parse(payload)?;
        tokio::fs::write(self.config_path()?, payload).await?;
        Ok(())
    }

    async fn apply(&self, content_type: &str, payload: &str) -> Result<()> {
        self.check_content_type(content_type)?;
        let config = EyeConfig::parse(payload)?;
        tokio::fs::write(self.config_path()?, payload).await?;

        let rendered = self.rendered_path();
        if let Some(parent) = rendered.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_string(&config)?;
        tokio::fs::write(&rendered, body).await?;
        Ok(())
    }
}
