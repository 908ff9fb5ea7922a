//! Turn instructions consumed by the motion controller.
//!
//! Wire command codes are fixed:
//!
//! | code | command        |
//! |------|----------------|
//! | 0    | `Reset`        |
//! | 1    | `Calibrate`    |
//! | 2    | `QuarterTurn`  |
//! | 3    | `FineTurn`     |

#[cfg(feature = "std")]
pub mod codec;

use core::fmt;

use crate::error::Fault;

/// Commands understood by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Drive to the home switch and clear calibration.
    Reset,
    /// Count encoder ticks over one full revolution.
    Calibrate,
    /// Rotate by whole quarter revolutions.
    QuarterTurn,
    /// Rotate by encoder ticks.
    FineTurn,
}

impl Command {
    /// Wire code for this command.
    #[inline]
    pub const fn code(self) -> i64 {
        match self {
            Command::Reset => 0,
            Command::Calibrate => 1,
            Command::QuarterTurn => 2,
            Command::FineTurn => 3,
        }
    }

    /// Look up a command by wire code.
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Command::Reset),
            1 => Some(Command::Calibrate),
            2 => Some(Command::QuarterTurn),
            3 => Some(Command::FineTurn),
            _ => None,
        }
    }

    /// Whether the command moves relative to the calibrated range.
    #[inline]
    pub const fn is_turn(self) -> bool {
        matches!(self, Command::QuarterTurn | Command::FineTurn)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Command::Reset => "reset",
            Command::Calibrate => "calibrate",
            Command::QuarterTurn => "quarter turn",
            Command::FineTurn => "fine turn",
        })
    }
}

/// Rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Toward increasing encoder position; also the homing direction.
    #[default]
    Forward,
    /// Toward decreasing encoder position.
    Reverse,
}

impl Direction {
    /// Decode a wire value: negative is `Reverse`, anything else `Forward`.
    #[inline]
    pub const fn from_wire(value: i64) -> Self {
        if value < 0 {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }

    /// Wire value: `0` for `Forward`, `-1` for `Reverse`.
    #[inline]
    pub const fn to_wire(self) -> i64 {
        match self {
            Direction::Forward => 0,
            Direction::Reverse => -1,
        }
    }

    /// Sign applied to encoder position (+1 or -1).
    #[inline]
    pub const fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        })
    }
}

/// One decoded instruction.
///
/// The command is kept as its raw wire code so that an unrecognized code
/// surfaces from `execute` as [`Fault::UnknownCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TurnInstruction {
    command: i64,
    rotation: u32,
    direction: Direction,
}

impl TurnInstruction {
    /// Create an instruction for a known command.
    #[inline]
    pub const fn new(command: Command, rotation: u32, direction: Direction) -> Self {
        Self::from_code(command.code(), rotation, direction)
    }

    /// Create an instruction from a raw command code.
    #[inline]
    pub const fn from_code(command: i64, rotation: u32, direction: Direction) -> Self {
        Self {
            command,
            rotation,
            direction,
        }
    }

    /// Reset instruction.
    pub const fn reset() -> Self {
        Self::new(Command::Reset, 0, Direction::Forward)
    }

    /// Calibrate instruction.
    pub const fn calibrate() -> Self {
        Self::new(Command::Calibrate, 0, Direction::Forward)
    }

    /// Quarter-turn instruction.
    pub const fn quarter_turn(direction: Direction, quarters: u32) -> Self {
        Self::new(Command::QuarterTurn, quarters, direction)
    }

    /// Fine-turn instruction.
    pub const fn fine_turn(direction: Direction, ticks: u32) -> Self {
        Self::new(Command::FineTurn, ticks, direction)
    }

    /// The command, or [`Fault::UnknownCommand`] for an unrecognized code.
    pub fn command(&self) -> Result<Command, Fault> {
        Command::from_code(self.command).ok_or(Fault::UnknownCommand(self.command))
    }

    /// Raw command code.
    #[inline]
    pub const fn command_code(&self) -> i64 {
        self.command
    }

    /// Quarters for `QuarterTurn`, ticks for `FineTurn`.
    #[inline]
    pub const fn rotation(&self) -> u32 {
        self.rotation
    }

    /// Requested direction.
    #[inline]
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}
