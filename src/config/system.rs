//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::turntable::TurntableConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemConfig {
    /// Named turntable configurations.
    pub turntables: FnvIndexMap<String<32>, TurntableConfig, 8>,
}

impl SystemConfig {
    /// Get a turntable configuration by name.
    pub fn turntable(&self, name: &str) -> Option<&TurntableConfig> {
        self.turntables
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }
}
