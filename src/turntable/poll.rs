//! Bounded hardware waits.

use embedded_hal::delay::DelayNs;

use crate::config::PollConfig;
use crate::error::Fault;
use crate::port::Line;

use super::abort::AbortSignal;

/// Bounds for a single wait on the encoder or limit switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Longest wait in microseconds.
    pub timeout_us: u64,
    /// Delay between samples in microseconds.
    pub sample_interval_us: u32,
}

impl PollSettings {
    /// Create poll settings.
    #[inline]
    pub const fn new(timeout_us: u64, sample_interval_us: u32) -> Self {
        Self {
            timeout_us,
            sample_interval_us,
        }
    }

    /// Derive poll settings from configuration.
    pub fn from_config(config: &PollConfig) -> Self {
        Self::new(
            u64::from(config.timeout_ms) * 1_000,
            config.sample_interval_us,
        )
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self::from_config(&PollConfig::default())
    }
}

/// Sample until `condition` holds, the abort signal fires, or time runs out.
///
/// Elapsed time is the sum of the delays issued between samples. Returns the
/// time waited in microseconds.
pub(crate) fn wait_until<D, A, F>(
    delay: &mut D,
    settings: &PollSettings,
    abort: &A,
    line: Line,
    mut condition: F,
) -> Result<u64, Fault>
where
    D: DelayNs,
    A: AbortSignal,
    F: FnMut() -> Result<bool, Fault>,
{
    let interval = settings.sample_interval_us.max(1);
    let mut waited_us: u64 = 0;

    loop {
        if condition()? {
            return Ok(waited_us);
        }
        if abort.is_aborted() {
            return Err(Fault::Aborted { line });
        }
        if waited_us >= settings.timeout_us {
            return Err(Fault::Timeout { line, waited_us });
        }
        delay.delay_us(interval);
        waited_us = waited_us.saturating_add(u64::from(interval));
    }
}
