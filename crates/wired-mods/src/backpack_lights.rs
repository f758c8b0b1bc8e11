//! Backpack light color mod.
//!
//! Stores a three-segment color configuration in its mod directory and
//! renders it into the engine's backpack light resource tree when applied.
//! The engine only reads that tree at startup, so applying this mod
//! requires a platform restart.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use wired_core::config::paths;
use wired_core::{ModError, ModInfo, Modification, Result};

const CONFIG_FILE: &str = "config.json";
/// Rendered engine file inside the backpack light resource directory.
const RENDERED_FILE: &str = "wired_backpack.json";

/// Colors for the three backpack LED segments, as `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightConfig {
    pub front: String,
    pub middle: String,
    pub back: String,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            front: "#00ff00".to_string(),
            middle: "#00ff00".to_string(),
            back: "#00ff00".to_string(),
        }
    }
}

impl LightConfig {
    fn parse(payload: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(payload)
            .map_err(|err| ModError::Validation(format!("bad light config: {err}")))?;
        for color in [&config.front, &config.middle, &config.back] {
            parse_hex_color(color)?;
        }
        Ok(config)
    }

    /// Engine-side representation: RGB triples per segment.
    fn render(&self) -> Result<Value> {
        Ok(serde_json::json!({
            "front": parse_hex_color(&self.front)?,
            "middle": parse_hex_color(&self.middle)?,
            "back": parse_hex_color(&self.back)?,
        }))
    }
}

fn parse_hex_color(color: &str) -> Result<[u8; 3]> {
    let hex = color.strip_prefix('#').ok_or_else(|| {
        ModError::Validation(format!("color {color:?} must start with '#'"))
    })?;
    if hex.len() != 6 {
        return Err(ModError::Validation(format!(
            "color {color:?} must be #rrggbb"
        )));
    }
    let channel = |range| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|_| ModError::Validation(format!("color {color:?} has non-hex digits")))
    };
    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

/// Mod changing the backpack LED colors.
pub struct BackpackLights {
    info: ModInfo,
    fs_root: PathBuf,
}

impl BackpackLights {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            info: ModInfo::new("BackpackLights", "Changes the backpack LED colors")
                .restart_required(),
            fs_root: root.into(),
        }
    }

    fn config_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir(&self.fs_root)?.join(CONFIG_FILE))
    }

    fn rendered_path(&self) -> PathBuf {
        self.fs_root
            .join(paths::ROBOT_RESOURCES)
            .join(paths::BACKPACK_LIGHTS)
            .join(RENDERED_FILE)
    }

    async fn persist(&self, payload: &str) -> Result<()> {
        // Stored verbatim so `current` reflects exactly what was saved.
        tokio::fs::write(self.config_path()?, payload).await?;
        Ok(())
    }
}

#[async_trait]
impl Modification for BackpackLights {
    fn info(&self) -> &ModInfo {
        &self.info
    }

    fn accepts(&self) -> &str {
        "application/json"
    }

    fn default_json(&self) -> Value {
        serde_json::to_value(LightConfig::default()).expect("default light config serializes")
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
                    warn!(%err, "backpack light config unreadable, reporting defaults");
                    self.default_json().to_string()
                }
            },
            Err(err) => {
                warn!(%err, "backpack light mod dir unavailable, reporting defaults");
                self.default_json().to_string()
            }
        }
    }

    fn set_fs_root(&mut self, root: PathBuf) {
        self.fs_root = root;
    }

    async fn save(&self, content_type: &str, payload: &str) -> Result<()> {
        self.check_content_type(content_type)?;
        LightConfig::parse(payload)?;
        self.persist(payload).await
    }

    async fn apply(&self, content_type: &str, payload: &str) -> Result<()> {
        self.check_content_type(content_type)?;
        let config = LightConfig::parse(payload)?;
        self.persist(payload).await?;

        let rendered = self.rendered_path();
        if let Some(parent) = rendered.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&rendered, config.render()?.to_string()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse() {
        assert_eq!(parse_hex_color("#ff8000").unwrap(), [255, 128, 0]);
        assert!(parse_hex_color("ff8000").is_err());
        assert!(parse_hex_color("#ff80").is_err());
        assert!(parse_hex_color("#gg8000").is_err());
    }

    #[test]
    fn bad_payload_is_validation_error() {
        let err = LightConfig::parse(r##"{"front":"#123456"}"##).unwrap_err();
        assert!(matches!(err, ModError::Validation(_)));
    }
}
