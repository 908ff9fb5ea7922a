//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{SystemConfig, TurntableConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Turntable names are not empty
/// - Sample interval is positive
/// - Timeout covers at least one sample interval
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (key, turntable) in config.turntables.iter() {
        validate_turntable(key.as_str(), turntable)?;
    }

    Ok(())
}

pub(crate) fn validate_turntable(key: &str, config: &TurntableConfig) -> Result<()> {
    if config.name.trim().is_empty() {
        return Err(Error::Config(ConfigError::InvalidName(
            heapless::String::try_from(key).unwrap_or_default(),
        )));
    }

    let poll = &config.poll;
    if poll.sample_interval_us == 0 {
        return Err(Error::Config(ConfigError::InvalidSampleInterval(
            poll.sample_interval_us,
        )));
    }

    if config.timeout_us() < u64::from(poll.sample_interval_us) {
        return Err(Error::Config(ConfigError::InvalidTimeout {
            timeout_ms: poll.timeout_ms,
            sample_interval_us: poll.sample_interval_us,
        }));
    }

    Ok(())
}
