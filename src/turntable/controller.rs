//! Turntable motion controller.
//!
//! Generic over a [`GpioPort`], an embedded-hal 1.0 delay, and an abort signal.

use embedded_hal::delay::DelayNs;

use crate::config::QuarterRounding;
use crate::error::Fault;
use crate::instruction::{Command, Direction, TurnInstruction};
use crate::port::{GpioPort, Line};

use super::abort::{AbortSignal, NeverAbort};
use super::builder::MotionControllerBuilder;
use super::poll::{self, PollSettings};
use super::state::TurntableState;

/// Controller owning one turntable's GPIO lines and state.
///
/// Commands run to completion on the calling thread. Callers sharing a
/// controller must serialize access (see `SharedController`).
pub struct MotionController<P, D, A = NeverAbort>
where
    P: GpioPort,
    D: DelayNs,
    A: AbortSignal,
{
    /// Encoder, limit-switch and motor lines.
    port: P,

    /// Delay provider for sampling intervals.
    delay: D,

    /// Checked at every sample of a wait.
    abort: A,

    /// Wait bounds.
    poll: PollSettings,

    /// Quarter-turn remainder handling.
    quarter_rounding: QuarterRounding,

    /// Turntable name for logging/debugging.
    name: heapless::String<32>,

    state: TurntableState,
}

impl<P, D> MotionController<P, D, NeverAbort>
where
    P: GpioPort,
    D: DelayNs,
{
    /// Start building a controller.
    pub fn builder() -> MotionControllerBuilder<P, D> {
        MotionControllerBuilder::new()
    }
}

impl<P, D, A> MotionController<P, D, A>
where
    P: GpioPort,
    D: DelayNs,
    A: AbortSignal,
{
    /// Create a controller, de-energizing the motor and sampling the limit switch.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::InitFailure`] if either line cannot be accessed.
    pub(crate) fn new(
        mut port: P,
        delay: D,
        abort: A,
        poll: PollSettings,
        quarter_rounding: QuarterRounding,
        name: heapless::String<32>,
    ) -> Result<Self, Fault> {
        port.set_low(Line::Motor).map_err(|_| Fault::InitFailure)?;
        let limit_switch_active = port
            .read_level(Line::LimitSwitch)
            .map_err(|_| Fault::InitFailure)?;

        let mut state = TurntableState::new();
        state.set_limit_switch_active(limit_switch_active);

        info!("{}: initialized", name.as_str());

        Ok(Self {
            port,
            delay,
            abort,
            poll,
            quarter_rounding,
            name,
            state,
        })
    }

    /// Get the turntable name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the calibration and position record.
    #[inline]
    pub fn state(&self) -> &TurntableState {
        &self.state
    }

    /// Get the wait bounds.
    #[inline]
    pub fn poll_settings(&self) -> &PollSettings {
        &self.poll
    }

    /// Get the quarter-turn remainder handling.
    #[inline]
    pub fn quarter_rounding(&self) -> QuarterRounding {
        self.quarter_rounding
    }

    /// Get the GPIO port.
    #[inline]
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Consume the controller and return its parts.
    pub fn release(self) -> (P, D, A) {
        (self.port, self.delay, self.abort)
    }

    /// Execute one instruction to completion.
    ///
    /// # Errors
    ///
    /// - [`Fault::UnknownCommand`] for an unrecognized command code
    /// - [`Fault::NotCalibrated`] for a turn before calibration
    /// - [`Fault::NotHomed`] for a calibrate not directly after a reset
    /// - [`Fault::Timeout`] or [`Fault::Aborted`] when a hardware wait ends early
    /// - [`Fault::Pin`] when a GPIO operation fails
    ///
    /// The first three are raised before any line is touched. For the rest the
    /// motor is de-energized before returning.
    pub fn execute(&mut self, instruction: TurnInstruction) -> Result<(), Fault> {
        let command = instruction.command()?;
        let direction = instruction.direction();
        let rotation = instruction.rotation();

        debug!(
            "{}: {} rotation={} direction={}",
            self.name.as_str(),
            command,
            rotation,
            direction
        );

        let result = if command.is_turn() && !self.state.is_calibrated() {
            Err(Fault::NotCalibrated)
        } else {
            match command {
                Command::Reset => self.reset(),
                Command::Calibrate => self.calibrate(),
                Command::QuarterTurn => self.quarter_turn(direction, rotation),
                Command::FineTurn => self.fine_turn(direction, rotation),
            }
        };

        match result {
            Err(fault) if fault.is_rejection() => {
                debug!("{}: {} rejected: {}", self.name.as_str(), command, fault);
            }
            Err(fault) => {
                warn!("{}: {} failed: {}", self.name.as_str(), command, fault);
            }
            Ok(()) => {}
        }
        result
    }

    /// Decode a wire message and execute it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Decode` without touching hardware if the message is
    /// malformed, otherwise any fault from [`execute`](Self::execute).
    #[cfg(feature = "std")]
    pub fn execute_message(&mut self, message: &[u8]) -> crate::error::Result<()> {
        let instruction = crate::instruction::codec::decode(message)?;
        self.execute(instruction)?;
        Ok(())
    }

    /// Forget calibration and de-energize the motor (best effort).
    ///
    /// Used when a command was interrupted and the table position is unknown.
    pub fn invalidate(&mut self) {
        let _ = self.de_energize();
        self.state.clear_calibration();
        self.state.clear_homed();
    }

    /// Drive to home and clear calibration.
    fn reset(&mut self) -> Result<(), Fault> {
        self.state.clear_homed();

        // Leave the switch, then arrive back on it
        let result = self.while_driving(|c| {
            c.wait_level(Line::LimitSwitch, false)?;
            c.wait_level(Line::LimitSwitch, true)
        });

        self.state.clear_calibration();
        if result.is_ok() {
            self.state.mark_homed();
            info!("{}: at home", self.name.as_str());
        }
        result
    }

    /// Count encoder ticks over one revolution starting at home.
    fn calibrate(&mut self) -> Result<(), Fault> {
        if !self.state.take_homed() {
            return Err(Fault::NotHomed);
        }

        self.state.clear_calibration();
        let result = self.sweep();

        match result {
            Ok(()) => {
                self.state.finish_calibration();
                info!(
                    "{}: calibrated, {} ticks per revolution",
                    self.name.as_str(),
                    self.state.max_encoder()
                );
            }
            Err(_) => self.state.clear_calibration(),
        }
        result
    }

    /// Consume stale edges, then count encoder edges until the switch edge.
    fn sweep(&mut self) -> Result<(), Fault> {
        self.clear_edge(Line::LimitSwitch)?;
        self.clear_edge(Line::Encoder)?;

        self.while_driving(|c| {
            while !c.edge_detected(Line::LimitSwitch)? {
                c.wait_edge(Line::Encoder)?;
                c.state.count_calibration_tick();
            }
            c.clear_edge(Line::LimitSwitch)?;
            c.state.set_limit_switch_active(true);
            Ok(())
        })
    }

    fn quarter_turn(&mut self, direction: Direction, quarters: u32) -> Result<(), Fault> {
        let target = self
            .state
            .quarter_ticks(direction, quarters, self.quarter_rounding);
        self.turn(direction, target)?;
        self.state.advance_quarter_phase(direction, quarters);
        Ok(())
    }

    fn fine_turn(&mut self, direction: Direction, ticks: u32) -> Result<(), Fault> {
        self.turn(direction, u64::from(ticks))
    }

    /// Move `target` encoder ticks, tracking position as ticks arrive.
    fn turn(&mut self, direction: Direction, target: u64) -> Result<(), Fault> {
        self.state.clear_homed();
        self.state.begin_turn();
        if target == 0 {
            return Ok(());
        }

        self.clear_edge(Line::Encoder)?;
        let result = self.while_driving(|c| {
            while c.state.encoder_accumulator() < target {
                c.wait_edge(Line::Encoder)?;
                c.state.step(direction);
            }
            Ok(())
        });

        debug!(
            "{}: moved {} of {} ticks, position {}",
            self.name.as_str(),
            self.state.encoder_accumulator(),
            target,
            self.state.current_encoder()
        );
        result
    }

    /// Run `motion` with the motor energized.
    ///
    /// The motor is de-energized exactly once afterwards, whether or not
    /// `motion` succeeds.
    fn while_driving<T>(
        &mut self,
        motion: impl FnOnce(&mut Self) -> Result<T, Fault>,
    ) -> Result<T, Fault> {
        if let Err(fault) = self.energize() {
            let _ = self.de_energize();
            return Err(fault);
        }

        match motion(self) {
            Ok(value) => {
                self.de_energize()?;
                Ok(value)
            }
            Err(fault) => {
                let _ = self.de_energize();
                Err(fault)
            }
        }
    }

    fn energize(&mut self) -> Result<(), Fault> {
        self.port
            .set_high(Line::Motor)
            .map_err(|_| Fault::Pin(Line::Motor))?;
        self.state.set_driver_enabled(true);
        trace!("{}: motor on", self.name.as_str());
        Ok(())
    }

    fn de_energize(&mut self) -> Result<(), Fault> {
        self.port
            .set_low(Line::Motor)
            .map_err(|_| Fault::Pin(Line::Motor))?;
        self.state.set_driver_enabled(false);
        trace!("{}: motor off", self.name.as_str());
        Ok(())
    }

    fn edge_detected(&mut self, line: Line) -> Result<bool, Fault> {
        self.port
            .edge_detected(line)
            .map_err(|_| Fault::Pin(line))
    }

    fn clear_edge(&mut self, line: Line) -> Result<(), Fault> {
        self.port
            .clear_edge_flag(line)
            .map_err(|_| Fault::Pin(line))
    }

    /// Wait until `line` reads `level`.
    fn wait_level(&mut self, line: Line, level: bool) -> Result<(), Fault> {
        let port = &mut self.port;
        poll::wait_until(&mut self.delay, &self.poll, &self.abort, line, || {
            let current = port.read_level(line).map_err(|_| Fault::Pin(line))?;
            Ok(current == level)
        })?;

        if line == Line::LimitSwitch {
            self.state.set_limit_switch_active(level);
        }
        Ok(())
    }

    /// Wait for an edge on `line` and consume it.
    fn wait_edge(&mut self, line: Line) -> Result<(), Fault> {
        let port = &mut self.port;
        poll::wait_until(&mut self.delay, &self.poll, &self.abort, line, || {
            port.edge_detected(line).map_err(|_| Fault::Pin(line))
        })?;
        self.clear_edge(line)
    }
}
