//! Builder pattern for MotionController.

use embedded_hal::delay::DelayNs;

use crate::config::{self, QuarterRounding, SystemConfig, TurntableConfig};
use crate::error::{ConfigError, Error, Result};
use crate::port::GpioPort;

use super::abort::{AbortSignal, NeverAbort};
use super::controller::MotionController;
use super::poll::PollSettings;

/// Builder for creating MotionController instances.
pub struct MotionControllerBuilder<P, D, A = NeverAbort>
where
    P: GpioPort,
    D: DelayNs,
    A: AbortSignal,
{
    port: Option<P>,
    delay: Option<D>,
    abort: A,
    name: Option<heapless::String<32>>,
    /// Prefix of a name that did not fit, reported by `build`.
    rejected_name: Option<heapless::String<32>>,
    poll: PollSettings,
    quarter_rounding: QuarterRounding,
}

impl<P, D> Default for MotionControllerBuilder<P, D, NeverAbort>
where
    P: GpioPort,
    D: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, D> MotionControllerBuilder<P, D, NeverAbort>
where
    P: GpioPort,
    D: DelayNs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            port: None,
            delay: None,
            abort: NeverAbort,
            name: None,
            rejected_name: None,
            poll: PollSettings::default(),
            quarter_rounding: QuarterRounding::default(),
        }
    }
}

impl<P, D, A> MotionControllerBuilder<P, D, A>
where
    P: GpioPort,
    D: DelayNs,
    A: AbortSignal,
{
    /// Set the GPIO port.
    pub fn port(mut self, port: P) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the turntable name (at most 32 bytes).
    pub fn name(mut self, name: &str) -> Self {
        match heapless::String::try_from(name) {
            Ok(name) => {
                self.name = Some(name);
                self.rejected_name = None;
            }
            Err(_) => {
                let prefix = config::truncate(name, 32);
                self.rejected_name = Some(heapless::String::try_from(prefix).unwrap_or_default());
            }
        }
        self
    }

    /// Set the wait bounds.
    pub fn poll(mut self, poll: PollSettings) -> Self {
        self.poll = poll;
        self
    }

    /// Set quarter-turn remainder handling.
    pub fn quarter_rounding(mut self, rounding: QuarterRounding) -> Self {
        self.quarter_rounding = rounding;
        self
    }

    /// Set the signal that aborts hardware waits.
    pub fn abort_signal<B: AbortSignal>(self, abort: B) -> MotionControllerBuilder<P, D, B> {
        MotionControllerBuilder {
            port: self.port,
            delay: self.delay,
            abort,
            name: self.name,
            rejected_name: self.rejected_name,
            poll: self.poll,
            quarter_rounding: self.quarter_rounding,
        }
    }

    /// Configure from a TurntableConfig.
    pub fn from_turntable_config(mut self, config: &TurntableConfig) -> Self {
        self.name = Some(config.name.clone());
        self.rejected_name = None;
        self.poll = PollSettings::from_config(&config.poll);
        self.quarter_rounding = config.quarter_rounding;
        self
    }

    /// Configure from SystemConfig by turntable name.
    pub fn from_config(self, config: &SystemConfig, turntable: &str) -> Result<Self> {
        let turntable_config = config.turntable(turntable).ok_or_else(|| {
            Error::Config(ConfigError::TurntableNotFound(
                heapless::String::try_from(turntable).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_turntable_config(turntable_config))
    }

    /// Build the MotionController.
    ///
    /// Initializes the hardware: the motor is de-energized and the limit
    /// switch sampled.
    ///
    /// # Errors
    ///
    /// Returns an error if the port or delay is missing, if the name given to
    /// [`name`](Self::name) was too long, or `Fault::InitFailure` if the
    /// hardware cannot be initialized.
    pub fn build(self) -> Result<MotionController<P, D, A>> {
        if let Some(name) = self.rejected_name {
            return Err(Error::Config(ConfigError::InvalidName(name)));
        }

        let port = self
            .port
            .ok_or(Error::Config(ConfigError::MissingComponent("port")))?;

        let delay = self
            .delay
            .ok_or(Error::Config(ConfigError::MissingComponent("delay")))?;

        let name = match self.name {
            Some(name) => name,
            None => heapless::String::try_from("turntable").unwrap_or_default(),
        };

        let controller = MotionController::new(
            port,
            delay,
            self.abort,
            self.poll,
            self.quarter_rounding,
            name,
        )?;
        Ok(controller)
    }
}
