//! Simulated turntable hardware for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use turntable_control::{GpioPort, Line, PollSettings};

/// Delay that returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Wait bounds generous enough for a few hundred ticks per revolution.
pub const TEST_POLL: PollSettings = PollSettings::new(100_000, 10);

/// Single-direction turntable driven by the number of input samples taken.
///
/// While the motor is on, every `samples_per_tick`-th input sample moves the
/// table one tick forward and latches an encoder edge. The limit switch is
/// active over the first `home_width` ticks; entering that zone latches a
/// switch edge.
#[derive(Debug, Clone)]
pub struct SimTurntable {
    pub ticks_per_rev: u32,
    pub samples_per_tick: u32,
    pub home_width: u32,
    pub position: u32,
    pub motor: bool,
    /// Table cannot move.
    pub jammed: bool,
    /// Jam once this many encoder edges have been produced.
    pub jam_at: Option<u64>,
    samples: u32,
    encoder_flag: bool,
    switch_flag: bool,
    /// Encoder edges produced so far.
    pub edges: u64,
    /// Edges produced while the motor was last on.
    pub edges_this_run: u64,
    pub motor_starts: u32,
    pub motor_stops: u32,
}

/// Error type for the simulation (never produced).
#[derive(Debug)]
pub struct SimError;

impl SimTurntable {
    pub fn new(ticks_per_rev: u32) -> Self {
        Self {
            ticks_per_rev,
            samples_per_tick: 4,
            home_width: 3,
            position: 0,
            motor: false,
            jammed: false,
            jam_at: None,
            samples: 0,
            encoder_flag: false,
            switch_flag: false,
            edges: 0,
            edges_this_run: 0,
            motor_starts: 0,
            motor_stops: 0,
        }
    }

    pub fn at(mut self, position: u32) -> Self {
        self.position = position % self.ticks_per_rev;
        self
    }

    pub fn jam_after(mut self, edges: u64) -> Self {
        self.jam_at = Some(edges);
        self
    }

    pub fn switch_active(&self) -> bool {
        self.position < self.home_width
    }

    fn sample(&mut self) {
        if !self.motor || self.jammed {
            return;
        }
        self.samples += 1;
        if self.samples >= self.samples_per_tick {
            self.samples = 0;
            self.advance();
            if self.jam_at.is_some_and(|at| self.edges >= at) {
                self.jammed = true;
            }
        }
    }

    fn advance(&mut self) {
        let was_home = self.switch_active();
        self.position = (self.position + 1) % self.ticks_per_rev;
        self.encoder_flag = true;
        self.edges += 1;
        self.edges_this_run += 1;
        if !was_home && self.switch_active() {
            self.switch_flag = true;
        }
    }
}

impl GpioPort for SimTurntable {
    type Error = SimError;

    fn read_level(&mut self, line: Line) -> Result<bool, SimError> {
        self.sample();
        Ok(match line {
            Line::Encoder => self.encoder_flag,
            Line::LimitSwitch => self.switch_active(),
            Line::Motor => self.motor,
        })
    }

    fn set_high(&mut self, _line: Line) -> Result<(), SimError> {
        if !self.motor {
            self.motor_starts += 1;
            self.edges_this_run = 0;
        }
        self.motor = true;
        Ok(())
    }

    fn set_low(&mut self, _line: Line) -> Result<(), SimError> {
        if self.motor {
            self.motor_stops += 1;
        }
        self.motor = false;
        Ok(())
    }

    fn edge_detected(&mut self, line: Line) -> Result<bool, SimError> {
        self.sample();
        Ok(match line {
            Line::Encoder => self.encoder_flag,
            Line::LimitSwitch => self.switch_flag,
            Line::Motor => false,
        })
    }

    fn clear_edge_flag(&mut self, line: Line) -> Result<(), SimError> {
        match line {
            Line::Encoder => self.encoder_flag = false,
            Line::LimitSwitch => self.switch_flag = false,
            Line::Motor => {}
        }
        Ok(())
    }
}

// =============================================================================
// Pin-level bench for HalPort
// =============================================================================

/// Turntable seen only through raw pin levels.
///
/// The encoder pin is high on even positions, so every position change is one
/// transition and every second one is rising. Home is position 0, reached on a
/// rising transition. The table moves one position every fourth input pin read
/// while the motor is energized, counted from the moment it is energized.
#[derive(Debug)]
pub struct BenchState {
    pub positions: u32,
    pub home_width: u32,
    pub position: u32,
    pub energized: bool,
    pub switch_active_low: bool,
    pub motor_active_low: bool,
    pub motor_stops: u32,
    samples: u32,
}

/// Shared handle to a [`BenchState`]; pins borrow it on every access.
#[derive(Debug, Clone)]
pub struct Bench(Rc<RefCell<BenchState>>);

impl Bench {
    pub fn new(positions: u32) -> Self {
        Self(Rc::new(RefCell::new(BenchState {
            positions,
            home_width: 3,
            position: 0,
            energized: false,
            switch_active_low: false,
            motor_active_low: false,
            motor_stops: 0,
            samples: 0,
        })))
    }

    pub fn at(self, position: u32) -> Self {
        {
            let mut state = self.0.borrow_mut();
            state.position = position % state.positions;
        }
        self
    }

    /// Switch pulls its pin low when pressed.
    pub fn switch_active_low(self) -> Self {
        self.0.borrow_mut().switch_active_low = true;
        self
    }

    /// Driver is enabled by a low output.
    pub fn motor_active_low(self) -> Self {
        self.0.borrow_mut().motor_active_low = true;
        self
    }

    pub fn position(&self) -> u32 {
        self.0.borrow().position
    }

    pub fn energized(&self) -> bool {
        self.0.borrow().energized
    }

    pub fn motor_stops(&self) -> u32 {
        self.0.borrow().motor_stops
    }

    pub fn encoder_pin(&self) -> EncoderPin {
        EncoderPin(self.clone())
    }

    pub fn switch_pin(&self) -> SwitchPin {
        SwitchPin(self.clone())
    }

    pub fn motor_pin(&self) -> MotorPin {
        MotorPin(self.clone())
    }

    fn sample(&self) -> std::cell::RefMut<'_, BenchState> {
        let mut state = self.0.borrow_mut();
        if state.energized {
            state.samples += 1;
            if state.samples % 4 == 0 {
                state.position = (state.position + 1) % state.positions;
            }
        }
        state
    }
}

pub struct EncoderPin(Bench);
pub struct SwitchPin(Bench);
pub struct MotorPin(Bench);

impl ErrorType for EncoderPin {
    type Error = Infallible;
}

impl InputPin for EncoderPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.sample().position % 2 == 0)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

impl ErrorType for SwitchPin {
    type Error = Infallible;
}

impl InputPin for SwitchPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        let state = self.0.sample();
        let pressed = state.position < state.home_width;
        Ok(pressed != state.switch_active_low)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

impl MotorPin {
    fn drive(&mut self, high: bool) {
        let mut state = self.0 .0.borrow_mut();
        let energized = high != state.motor_active_low;
        if energized && !state.energized {
            state.samples = 0;
        }
        if !energized && state.energized {
            state.motor_stops += 1;
        }
        state.energized = energized;
    }
}

impl ErrorType for MotorPin {
    type Error = Infallible;
}

impl OutputPin for MotorPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.drive(true);
        Ok(())
    }
}
