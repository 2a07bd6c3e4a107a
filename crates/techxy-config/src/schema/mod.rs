//! Configuration schema types for Techxy.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod api;
mod system;
mod transport;

pub use api::*;
pub use system::*;
pub use transport::*;

use serde::{Deserialize, Serialize};

/// Root configuration for Techxy.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct TechxyConfig {
    pub api: ApiConfig,
    pub transport: TransportConfig,
    pub relay: RelayConfig,
    pub logging: LoggingConfig,
}
