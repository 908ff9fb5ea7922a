//! Configuration module for turntable-control.
//!
//! Provides types for loading and validating turntable configurations
//! from TOML files (with `std` feature) or pre-parsed data.

mod lines;
mod poll;
mod system;
mod turntable;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use lines::LineConfig;
pub use poll::PollConfig;
pub use system::SystemConfig;
pub use turntable::{QuarterRounding, TurntableConfig};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

/// Longest prefix of `s` within `max` bytes that ends on a char boundary.
pub(crate) fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
