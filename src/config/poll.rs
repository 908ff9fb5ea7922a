//! Hardware wait bounds.

use serde::Deserialize;

/// Bounds applied to every wait on the encoder or limit switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PollConfig {
    /// Longest single wait before giving up, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u32,

    /// Delay between consecutive samples, in microseconds.
    #[serde(default = "default_sample_interval_us")]
    pub sample_interval_us: u32,
}

fn default_timeout_ms() -> u32 {
    30_000
}

fn default_sample_interval_us() -> u32 {
    100
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            sample_interval_us: default_sample_interval_us(),
        }
    }
}
