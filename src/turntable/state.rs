//! Calibration and position record of one turntable.

use crate::config::QuarterRounding;
use crate::instruction::Direction;

/// State owned by a `MotionController`.
///
/// Once calibrated, `0 <= current_encoder < max_encoder` holds between
/// commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurntableState {
    /// Encoder ticks per revolution; 0 while uncalibrated.
    max_encoder: u32,
    /// Absolute position in ticks from home.
    current_encoder: u32,
    /// Ticks counted by the turn in progress (or the last one).
    encoder_accumulator: u64,
    /// Last sampled limit-switch state.
    limit_switch_active: bool,
    /// Motor output energized.
    driver_enabled: bool,
    /// Quarter boundary the table was last moved to, 0..4.
    quarter_phase: u8,
    /// Set by a successful reset, consumed by the next command.
    homed: bool,
}

impl TurntableState {
    /// Create a zeroed, uncalibrated state.
    #[inline]
    pub const fn new() -> Self {
        Self {
            max_encoder: 0,
            current_encoder: 0,
            encoder_accumulator: 0,
            limit_switch_active: false,
            driver_enabled: false,
            quarter_phase: 0,
            homed: false,
        }
    }

    /// Encoder ticks per revolution (0 = uncalibrated).
    #[inline]
    pub fn max_encoder(&self) -> u32 {
        self.max_encoder
    }

    /// Current position in ticks.
    #[inline]
    pub fn current_encoder(&self) -> u32 {
        self.current_encoder
    }

    /// Ticks counted by the most recent turn.
    #[inline]
    pub fn encoder_accumulator(&self) -> u64 {
        self.encoder_accumulator
    }

    /// Last sampled limit-switch state.
    #[inline]
    pub fn limit_switch_active(&self) -> bool {
        self.limit_switch_active
    }

    /// Whether the motor output is energized.
    #[inline]
    pub fn driver_enabled(&self) -> bool {
        self.driver_enabled
    }

    /// Quarter boundary the table was last moved to.
    #[inline]
    pub fn quarter_phase(&self) -> u8 {
        self.quarter_phase
    }

    /// Whether turns are possible.
    #[inline]
    pub fn is_calibrated(&self) -> bool {
        self.max_encoder > 0
    }

    /// Whether the previous command was a successful reset.
    #[inline]
    pub fn is_homed(&self) -> bool {
        self.homed
    }

    /// Ticks needed to move `quarters` quarter revolutions from the current phase.
    pub fn quarter_ticks(
        &self,
        direction: Direction,
        quarters: u32,
        rounding: QuarterRounding,
    ) -> u64 {
        let max = u64::from(self.max_encoder);
        match rounding {
            QuarterRounding::Truncate => u64::from(quarters) * (max / 4),
            QuarterRounding::Carry => {
                let whole = u64::from(quarters / 4) * max;
                let part = i64::from(quarters % 4);
                let phase = i64::from(self.quarter_phase);
                let boundary = |k: i64| (k * max as i64).div_euclid(4);
                let partial = match direction {
                    Direction::Forward => boundary(phase + part) - boundary(phase),
                    Direction::Reverse => boundary(phase) - boundary(phase - part),
                };
                whole + partial as u64
            }
        }
    }

    pub(crate) fn set_limit_switch_active(&mut self, active: bool) {
        self.limit_switch_active = active;
    }

    pub(crate) fn set_driver_enabled(&mut self, enabled: bool) {
        self.driver_enabled = enabled;
    }

    pub(crate) fn mark_homed(&mut self) {
        self.homed = true;
    }

    pub(crate) fn clear_homed(&mut self) {
        self.homed = false;
    }

    /// Consume the homed mark, returning whether it was set.
    pub(crate) fn take_homed(&mut self) -> bool {
        core::mem::replace(&mut self.homed, false)
    }

    /// Forget calibration and position.
    pub(crate) fn clear_calibration(&mut self) {
        self.max_encoder = 0;
        self.current_encoder = 0;
        self.encoder_accumulator = 0;
        self.quarter_phase = 0;
    }

    pub(crate) fn count_calibration_tick(&mut self) {
        self.max_encoder = self.max_encoder.saturating_add(1);
    }

    pub(crate) fn finish_calibration(&mut self) {
        self.current_encoder = 0;
        self.encoder_accumulator = 0;
        self.quarter_phase = 0;
    }

    pub(crate) fn begin_turn(&mut self) {
        self.encoder_accumulator = 0;
    }

    /// Record one encoder tick in `direction`.
    pub(crate) fn step(&mut self, direction: Direction) {
        self.encoder_accumulator += 1;
        if self.max_encoder == 0 {
            return;
        }
        self.current_encoder = match direction {
            Direction::Forward => (self.current_encoder + 1) % self.max_encoder,
            Direction::Reverse if self.current_encoder == 0 => self.max_encoder - 1,
            Direction::Reverse => self.current_encoder - 1,
        };
    }

    pub(crate) fn advance_quarter_phase(&mut self, direction: Direction, quarters: u32) {
        let part = i64::from(quarters % 4) * direction.sign();
        self.quarter_phase = (i64::from(self.quarter_phase) + part).rem_euclid(4) as u8;
    }

    #[cfg(test)]
    pub(crate) fn calibrated(max_encoder: u32) -> Self {
        Self {
            max_encoder,
            ..Self::new()
        }
    }
}
