//! GPIO access for the turntable's three signal lines.
//!
//! The controller talks to hardware only through [`GpioPort`]. [`HalPort`]
//! implements it over embedded-hal 1.0 pins.

use core::fmt;

use serde::Deserialize;

mod hal;

pub use hal::{HalPort, PortError};

/// Logical signal lines of a turntable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Encoder pulse input.
    Encoder,
    /// Home-position limit switch input.
    LimitSwitch,
    /// Motor enable output.
    Motor,
}

impl Line {
    /// Whether the line is an input.
    #[inline]
    pub const fn is_input(self) -> bool {
        !matches!(self, Line::Motor)
    }

    /// Line name for display/debugging.
    pub const fn name(self) -> &'static str {
        match self {
            Line::Encoder => "encoder",
            Line::LimitSwitch => "limit switch",
            Line::Motor => "motor",
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Transition that sets an input's edge-detected flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Inactive to active.
    #[default]
    Rising,
    /// Active to inactive.
    Falling,
    /// Any change.
    Both,
}

impl Edge {
    /// Whether a transition between two samples matches this edge.
    #[inline]
    pub fn matches(self, previous: bool, current: bool) -> bool {
        match self {
            Edge::Rising => !previous && current,
            Edge::Falling => previous && !current,
            Edge::Both => previous != current,
        }
    }
}

/// Narrow GPIO interface consumed by the controller.
///
/// Levels are logical: `true` means active (switch pressed, motor energized).
/// Sampling an input may latch its edge flag, hence `&mut self` throughout.
pub trait GpioPort {
    /// Error raised by the underlying hardware.
    type Error: fmt::Debug;

    /// Sample the current level of a line.
    fn read_level(&mut self, line: Line) -> Result<bool, Self::Error>;

    /// Drive an output line active.
    fn set_high(&mut self, line: Line) -> Result<(), Self::Error>;

    /// Drive an output line inactive.
    fn set_low(&mut self, line: Line) -> Result<(), Self::Error>;

    /// Whether an edge has been detected on an input since the flag was last cleared.
    fn edge_detected(&mut self, line: Line) -> Result<bool, Self::Error>;

    /// Clear an input's edge-detected flag.
    ///
    /// No transition that happened before the clear may be reported by a
    /// later `edge_detected`.
    fn clear_edge_flag(&mut self, line: Line) -> Result<(), Self::Error>;
}

impl<T: GpioPort + ?Sized> GpioPort for &mut T {
    type Error = T::Error;

    fn read_level(&mut self, line: Line) -> Result<bool, Self::Error> {
        (**self).read_level(line)
    }

    fn set_high(&mut self, line: Line) -> Result<(), Self::Error> {
        (**self).set_high(line)
    }

    fn set_low(&mut self, line: Line) -> Result<(), Self::Error> {
        (**self).set_low(line)
    }

    fn edge_detected(&mut self, line: Line) -> Result<bool, Self::Error> {
        (**self).edge_detected(line)
    }

    fn clear_edge_flag(&mut self, line: Line) -> Result<(), Self::Error> {
        (**self).clear_edge_flag(line)
    }
}
