//! # turntable-control
//!
//! Encoder-tracked turntable motion control over embedded-hal 1.0 GPIO.
//!
//! A turntable has three digital lines: an encoder pulse input, a home limit
//! switch, and a motor enable output. The [`MotionController`] executes
//! [`TurnInstruction`]s against them, tracking absolute position by counting
//! encoder edges.
//!
//! ## Features
//!
//! - **Reset and calibrate**: home on the limit switch, then count ticks per revolution
//! - **Quarter and fine turns**: position tracked modulo the calibrated range
//! - **Bounded waits**: every hardware wait has a timeout and an abort signal
//! - **JSON instructions**: decode `{"TurnInstruction": {...}}` wire messages
//! - **Configuration-driven**: define turntables in TOML files
//! - **no_std compatible**: core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use turntable_control::{HalPort, MotionController, TurnInstruction, Direction};
//!
//! let config = turntable_control::load_config("turntable.toml")?;
//! let lines = config.turntable("main").unwrap().lines;
//!
//! let mut controller = MotionController::builder()
//!     .from_config(&config, "main")?
//!     .port(HalPort::new(encoder_pin, switch_pin, motor_pin).with_lines(&lines))
//!     .delay(delay)
//!     .build()?;
//!
//! controller.execute(TurnInstruction::reset())?;
//! controller.execute(TurnInstruction::calibrate())?;
//! controller.execute(TurnInstruction::quarter_turn(Direction::Forward, 1))?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing, the JSON codec and `SharedController`
//! - `defmt`: Enables defmt logging for embedded targets
//! - `log`: Enables `log` facade logging for hosted targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod instruction;
pub mod port;
pub mod turntable;

// Re-exports for ergonomic API
pub use config::{validate_config, LineConfig, PollConfig, QuarterRounding, SystemConfig, TurntableConfig};
pub use error::{ConfigError, DecodeError, Error, Fault, Result};
pub use instruction::{Command, Direction, TurnInstruction};
pub use port::{Edge, GpioPort, HalPort, Line, PortError};
pub use turntable::{
    AbortSignal, MotionController, MotionControllerBuilder, NeverAbort, PollSettings,
    TurntableState,
};

#[cfg(feature = "std")]
pub use turntable::SharedController;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
