//! Signal line settings.

use serde::Deserialize;

use crate::port::Edge;

/// Edge and polarity settings for the three turntable lines.
///
/// The limit switch always marks arrival at home on its inactive to active
/// transition; only its polarity is configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineConfig {
    /// Encoder transition counted as one tick.
    #[serde(default)]
    pub encoder_edge: Edge,

    /// Limit switch reads low when pressed.
    #[serde(default)]
    pub invert_limit_switch: bool,

    /// Motor driver is energized by a low output.
    #[serde(default)]
    pub invert_motor: bool,
}
