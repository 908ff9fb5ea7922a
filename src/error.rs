//! Error types for turntable-control.
//!
//! Provides unified error handling across configuration, instruction decoding,
//! and controller execution.

use core::fmt;

use crate::port::Line;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all turntable-control operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Malformed wire message
    Decode(DecodeError),
    /// Controller fault raised while executing a command
    Fault(Fault),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Turntable name not found in configuration
    TurntableNotFound(heapless::String<32>),
    /// A builder component was never supplied
    MissingComponent(&'static str),
    /// Sample interval must be > 0
    InvalidSampleInterval(u32),
    /// Timeout shorter than one sample interval
    InvalidTimeout {
        /// Configured timeout in milliseconds
        timeout_ms: u32,
        /// Configured sample interval in microseconds
        sample_interval_us: u32,
    },
    /// Turntable display name is empty
    InvalidName(heapless::String<32>),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Instruction decoding errors.
///
/// Each variant carries enough context to log a diagnostic. A decode error
/// never reaches the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Message is not well-formed JSON
    Syntax {
        /// Line of the offending input (1-based)
        line: usize,
        /// Column of the offending input (1-based)
        column: usize,
    },
    /// The `TurnInstruction` object is absent
    MissingObject,
    /// `TurnInstruction` is present but is not an object
    NotAnObject,
    /// A required field is absent
    MissingField(&'static str),
    /// A field has the wrong JSON type
    WrongType {
        /// Field name
        field: &'static str,
        /// Expected type
        expected: &'static str,
    },
    /// An integer field does not fit its range
    OutOfRange {
        /// Field name
        field: &'static str,
    },
}

/// Faults surfaced by `MotionController::execute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// GPIO subsystem failed to initialize; no operation is possible
    InitFailure,
    /// Instruction carries a command code outside the recognized set
    UnknownCommand(i64),
    /// Turn requested before a successful calibration
    NotCalibrated,
    /// Calibrate requested without an immediately preceding reset
    NotHomed,
    /// A hardware wait exceeded its bound
    Timeout {
        /// Line being waited on
        line: Line,
        /// Time spent waiting in microseconds
        waited_us: u64,
    },
    /// A hardware wait was aborted by the caller's abort signal
    Aborted {
        /// Line being waited on
        line: Line,
    },
    /// A GPIO operation on the line failed
    Pin(Line),
    /// Another caller holds the controller
    Busy,
}

impl Fault {
    /// Whether the fault happened before any hardware was touched.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Fault::UnknownCommand(_) | Fault::NotCalibrated | Fault::NotHomed | Fault::Busy
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Decode(e) => write!(f, "Decode error: {}", e),
            Error::Fault(e) => write!(f, "Turntable fault: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::TurntableNotFound(name) => write!(f, "Turntable '{}' not found", name),
            ConfigError::MissingComponent(what) => write!(f, "{} is required", what),
            ConfigError::InvalidSampleInterval(v) => {
                write!(f, "Invalid sample interval: {}us. Must be > 0", v)
            }
            ConfigError::InvalidTimeout {
                timeout_ms,
                sample_interval_us,
            } => write!(
                f,
                "Invalid timeout: {}ms is shorter than the {}us sample interval",
                timeout_ms, sample_interval_us
            ),
            ConfigError::InvalidName(key) => write!(f, "Turntable '{}' has an empty name", key),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Syntax { line, column } => {
                write!(f, "malformed JSON at line {}, column {}", line, column)
            }
            DecodeError::MissingObject => write!(f, "missing 'TurnInstruction' object"),
            DecodeError::NotAnObject => write!(f, "'TurnInstruction' must be an object"),
            DecodeError::MissingField(field) => write!(f, "missing field '{}'", field),
            DecodeError::WrongType { field, expected } => {
                write!(f, "field '{}' must be {}", field, expected)
            }
            DecodeError::OutOfRange { field } => write!(f, "field '{}' is out of range", field),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::InitFailure => write!(f, "GPIO initialization failed"),
            Fault::UnknownCommand(code) => write!(f, "Unknown command code {}", code),
            Fault::NotCalibrated => write!(f, "Turntable is not calibrated"),
            Fault::NotHomed => write!(f, "Calibrate must immediately follow reset"),
            Fault::Timeout { line, waited_us } => {
                write!(f, "Timed out after {}us waiting on {} line", waited_us, line)
            }
            Fault::Aborted { line } => write!(f, "Aborted while waiting on {} line", line),
            Fault::Pin(line) => write!(f, "GPIO operation on {} line failed", line),
            Fault::Busy => write!(f, "Controller is busy with another command"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Error::Decode(e)
    }
}

impl From<Fault> for Error {
    fn from(e: Fault) -> Self {
        Error::Fault(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

#[cfg(feature = "std")]
impl std::error::Error for Fault {}
