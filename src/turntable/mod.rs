//! Turntable module for turntable-control.
//!
//! Provides the motion controller, its state record, and the bounded-wait
//! primitives it is built on.

mod abort;
mod builder;
mod controller;
mod poll;
#[cfg(feature = "std")]
mod shared;
mod state;

pub use abort::{AbortSignal, NeverAbort};
pub use builder::MotionControllerBuilder;
pub use controller::MotionController;
pub use poll::PollSettings;
#[cfg(feature = "std")]
pub use shared::SharedController;
pub use state::TurntableState;
