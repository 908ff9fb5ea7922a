//! Turntable configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::lines::LineConfig;
use super::poll::PollConfig;

/// How quarter turns handle encoder ranges that are not a multiple of four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QuarterRounding {
    /// Move to exact quarter boundaries so four quarters make one revolution.
    #[default]
    Carry,
    /// Move `rotation * (max / 4)` ticks and drop the remainder.
    Truncate,
}

/// Complete turntable configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct TurntableConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Quarter-turn remainder handling.
    #[serde(default)]
    pub quarter_rounding: QuarterRounding,

    /// Hardware wait bounds.
    #[serde(default)]
    pub poll: PollConfig,

    /// Line edge and polarity settings.
    #[serde(default)]
    pub lines: LineConfig,
}

impl TurntableConfig {
    /// Create a configuration with defaults for everything but the name.
    pub fn named(name: &str) -> Self {
        Self {
            name: String::try_from(name).unwrap_or_default(),
            quarter_rounding: QuarterRounding::default(),
            poll: PollConfig::default(),
            lines: LineConfig::default(),
        }
    }

    /// Longest single wait in microseconds.
    pub fn timeout_us(&self) -> u64 {
        u64::from(self.poll.timeout_ms) * 1_000
    }
}
