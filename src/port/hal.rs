//! [`GpioPort`] over embedded-hal 1.0 pins.
//!
//! Edge flags are latched in software: every sample of an input is compared
//! with the previous one, so edges are only seen between samples. Clearing a
//! flag re-samples the input, so a transition that happened while the line was
//! not being watched is never reported afterwards.
//!
//! The limit switch always latches on arrival (inactive to active). Use
//! [`HalPort::invert_limit_switch`] for a switch that pulls its pin low.

use core::fmt;

use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::LineConfig;

use super::{Edge, GpioPort, Line};

/// Errors raised by [`HalPort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortError {
    /// The pin behind the line reported an error.
    Pin(Line),
    /// Output operation on an input line, or edge operation on the output line.
    WrongDirection(Line),
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortError::Pin(line) => write!(f, "pin error on {} line", line),
            PortError::WrongDirection(line) => {
                write!(f, "operation not supported on {} line", line)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PortError {}

/// One input pin with its edge latch.
#[derive(Debug)]
struct InputChannel<P> {
    pin: P,
    inverted: bool,
    edge: Edge,
    /// Previous logical sample; `None` until the first sample.
    last: Option<bool>,
    latched: bool,
}

impl<P: InputPin> InputChannel<P> {
    fn new(pin: P) -> Self {
        Self {
            pin,
            inverted: false,
            edge: Edge::Rising,
            last: None,
            latched: false,
        }
    }

    fn level(&mut self, line: Line) -> Result<bool, PortError> {
        Ok(self.pin.is_high().map_err(|_| PortError::Pin(line))? != self.inverted)
    }

    fn sample(&mut self, line: Line) -> Result<bool, PortError> {
        let level = self.level(line)?;
        if let Some(previous) = self.last {
            if self.edge.matches(previous, level) {
                self.latched = true;
            }
        }
        self.last = Some(level);
        Ok(level)
    }

    /// Drop the latch and restart the history from the current level.
    fn reseed(&mut self, line: Line) -> Result<(), PortError> {
        self.latched = false;
        self.last = Some(self.level(line)?);
        Ok(())
    }
}

/// Turntable GPIO built from two input pins and one output pin.
///
/// Generic over:
/// - `ENC`: encoder pin (must implement `InputPin`)
/// - `SW`: limit-switch pin (must implement `InputPin`)
/// - `MOT`: motor enable pin (must implement `OutputPin`)
pub struct HalPort<ENC, SW, MOT>
where
    ENC: InputPin,
    SW: InputPin,
    MOT: OutputPin,
{
    encoder: InputChannel<ENC>,
    limit_switch: InputChannel<SW>,
    motor: MOT,
    invert_motor: bool,
}

impl<ENC, SW, MOT> HalPort<ENC, SW, MOT>
where
    ENC: InputPin,
    SW: InputPin,
    MOT: OutputPin,
{
    /// Create a port with rising-edge detection and no inversion.
    pub fn new(encoder: ENC, limit_switch: SW, motor: MOT) -> Self {
        Self {
            encoder: InputChannel::new(encoder),
            limit_switch: InputChannel::new(limit_switch),
            motor,
            invert_motor: false,
        }
    }

    /// Apply edge and polarity settings from configuration.
    pub fn with_lines(self, lines: &LineConfig) -> Self {
        self.encoder_edge(lines.encoder_edge)
            .invert_limit_switch(lines.invert_limit_switch)
            .invert_motor(lines.invert_motor)
    }

    /// Set which encoder transition counts as an edge.
    pub fn encoder_edge(mut self, edge: Edge) -> Self {
        self.encoder.edge = edge;
        self
    }

    /// Treat a low limit-switch pin as active.
    pub fn invert_limit_switch(mut self, invert: bool) -> Self {
        self.limit_switch.inverted = invert;
        self
    }

    /// Drive the motor pin low to energize.
    pub fn invert_motor(mut self, invert: bool) -> Self {
        self.invert_motor = invert;
        self
    }

    /// Consume the port and return the pins.
    pub fn release(self) -> (ENC, SW, MOT) {
        (self.encoder.pin, self.limit_switch.pin, self.motor)
    }

    fn sample(&mut self, line: Line) -> Result<bool, PortError> {
        match line {
            Line::Encoder => self.encoder.sample(line),
            Line::LimitSwitch => self.limit_switch.sample(line),
            Line::Motor => Err(PortError::WrongDirection(line)),
        }
    }

    fn drive(&mut self, line: Line, active: bool) -> Result<(), PortError> {
        if line.is_input() {
            return Err(PortError::WrongDirection(line));
        }
        let result = if active != self.invert_motor {
            self.motor.set_high()
        } else {
            self.motor.set_low()
        };
        result.map_err(|_| PortError::Pin(line))
    }
}

impl<ENC, SW, MOT> GpioPort for HalPort<ENC, SW, MOT>
where
    ENC: InputPin,
    SW: InputPin,
    MOT: OutputPin,
{
    type Error = PortError;

    fn read_level(&mut self, line: Line) -> Result<bool, Self::Error> {
        self.sample(line)
    }

    fn set_high(&mut self, line: Line) -> Result<(), Self::Error> {
        self.drive(line, true)
    }

    fn set_low(&mut self, line: Line) -> Result<(), Self::Error> {
        self.drive(line, false)
    }

    fn edge_detected(&mut self, line: Line) -> Result<bool, Self::Error> {
        self.sample(line)?;
        Ok(match line {
            Line::Encoder => self.encoder.latched,
            Line::LimitSwitch => self.limit_switch.latched,
            Line::Motor => false,
        })
    }

    fn clear_edge_flag(&mut self, line: Line) -> Result<(), Self::Error> {
        match line {
            Line::Encoder => self.encoder.reseed(line),
            Line::LimitSwitch => self.limit_switch.reseed(line),
            Line::Motor => Err(PortError::WrongDirection(line)),
        }
    }
}
