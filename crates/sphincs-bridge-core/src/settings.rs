//! Host-supplied bridge settings.
//!
//! Read once when the module starts, from an optional JSON object the host
//! places at `globalThis.SPHINCS_BRIDGE_CONFIG`. Nothing sensitive lives
//! here; the parameter configuration is fixed and not overridable.

use serde::{Deserialize, Serialize};
use tracing::Level;

/// Bridge settings. All fields have defaults via [`Default`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BridgeSettings {
    /// Minimum log level: `"trace"`, `"debug"`, `"info"`, `"warn"`, `"error"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether to install `GenerateSphincsKeyPair` / `SignMessage` on the
    /// host's global object. Module exports are available either way.
    #[serde(default = "default_register_globals")]
    pub register_globals: bool,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            register_globals: default_register_globals(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}
const fn default_register_globals() -> bool {
    true
}

impl BridgeSettings {
    /// Parse settings from JSON.
    ///
    /// Returns [`Default::default()`] when the JSON is invalid, so a broken
    /// host config never prevents the entry points from registering.
    #[must_use]
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_default()
    }

    /// Parsed log level; unknown names fall back to `INFO`.
    #[must_use]
    pub fn level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}
