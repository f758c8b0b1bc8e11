//! Engine command channel.
//!
//! Delivers a single behavior-selection command to the robot's local
//! control service over WebSocket, then drops the connection. One
//! connection per command; nothing is pooled and no response is read.

use futures_util::SinkExt;
use serde::{Deserialize, Serialize};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::warn;

/// Fixed endpoint of the local engine control service.
pub const ENGINE_SOCKET_URL: &str = "ws://localhost:8888/socket";

/// Wire envelope for a behavior selection.
///
/// Serializes as
/// `{"type":"data","module":"behaviors","data":{"behaviorName":"...","presetConditions":false}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorCommand {
    #[serde(rename = "type")]
    pub kind: String,
    pub module: String,
    pub data: BehaviorData,
}

/// Payload of a [`BehaviorCommand`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorData {
    #[serde(rename = "behaviorName")]
    pub behavior_name: String,
    #[serde(rename = "presetConditions")]
    pub preset_conditions: bool,
}

impl BehaviorCommand {
    /// Command selecting `behavior` without preset conditions.
    pub fn select(behavior: &str) -> Self {
        Self {
            kind: "data".to_string(),
            module: "behaviors".to_string(),
            data: BehaviorData {
                behavior_name: behavior.to_string(),
                preset_conditions: false,
            },
        }
    }
}

/// Transient connection to the engine control service.
#[derive(Debug, Clone)]
pub struct CommandChannel {
    url: String,
}

impl Default for CommandChannel {
    fn default() -> Self {
        Self {
            url: ENGINE_SOCKET_URL.to_string(),
        }
    }
}

impl CommandChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the endpoint. Test hook; production callers use the fixed
    /// local endpoint.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Send one behavior-selection command as a single text frame.
    ///
    /// Connection and send failures are logged and swallowed: the engine
    /// being unreachable must never take the caller down, so the command is
    /// simply dropped. The connection is released on every exit path.
    pub async fn send_behavior(&self, behavior: &str) {
        // The command has a fixed shape; failing to encode it is a bug in
        // this crate, not a runtime condition.
        let frame = serde_json::to_string(&BehaviorCommand::select(behavior))
            .expect("behavior command serializes");

        let mut socket = match connect_async(&self.url).await {
            Ok((socket, _response)) => socket,
            Err(err) => {
                warn!(url = %self.url, %err, "engine socket dial failed, behavior command dropped");
                return;
            }
        };

        if let Err(err) = socket.send(Message::Text(frame)).await {
            warn!(url = %self.url, %err, "behavior command send failed");
        }
    }
}
