use serde::{Deserialize, Serialize};

/// Where outbound requests are issued from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum TransportMode {
    /// Call the API directly; the key must be available locally.
    #[default]
    Direct,
    /// Go through `techxy-relay`, which holds the key.
    Relay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct TransportConfig {
    pub mode: TransportMode,
}

/// Relay settings, shared by the relay server and its clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// WebSocket URL clients connect to.
    pub url: String,
    /// Port the relay server listens on.
    pub port: u32,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            url: "ws://127.0.0.1:8787".into(),
            port: 8787,
        }
    }
}
