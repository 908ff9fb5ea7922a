//! Exclusive access to one controller from several threads (std only).

use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

use embedded_hal::delay::DelayNs;

use crate::error::{Fault, Result};
use crate::instruction::TurnInstruction;
use crate::port::GpioPort;

use super::abort::{AbortSignal, NeverAbort};
use super::controller::MotionController;
use super::state::TurntableState;

/// A controller behind a mutex.
///
/// Each command holds the lock for its whole run, so edge flags and the
/// motor line are never shared between two commands in flight.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use turntable_control::{SharedController, TurnInstruction};
///
/// let shared = Arc::new(SharedController::new(controller));
/// shared.execute(TurnInstruction::reset())?;
/// shared.execute(TurnInstruction::calibrate())?;
/// ```
pub struct SharedController<P, D, A = NeverAbort>
where
    P: GpioPort,
    D: DelayNs,
    A: AbortSignal,
{
    inner: Mutex<MotionController<P, D, A>>,
}

impl<P, D, A> SharedController<P, D, A>
where
    P: GpioPort,
    D: DelayNs,
    A: AbortSignal,
{
    /// Wrap a controller.
    pub fn new(controller: MotionController<P, D, A>) -> Self {
        Self {
            inner: Mutex::new(controller),
        }
    }

    /// Execute an instruction, waiting for any command in progress.
    ///
    /// # Errors
    ///
    /// Any fault from `MotionController::execute`.
    pub fn execute(&self, instruction: TurnInstruction) -> core::result::Result<(), Fault> {
        self.lock().execute(instruction)
    }

    /// Execute an instruction only if no other command is running.
    ///
    /// # Errors
    ///
    /// [`Fault::Busy`] if the controller is held, otherwise any fault from
    /// `MotionController::execute`.
    pub fn try_execute(&self, instruction: TurnInstruction) -> core::result::Result<(), Fault> {
        let mut controller = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => return Err(Fault::Busy),
            Err(TryLockError::Poisoned(poisoned)) => self.recover(poisoned),
        };
        controller.execute(instruction)
    }

    /// Decode a wire message and execute it.
    ///
    /// # Errors
    ///
    /// `Error::Decode` for a malformed message (the lock is never taken),
    /// otherwise any fault from `MotionController::execute`.
    pub fn execute_message(&self, message: &[u8]) -> Result<()> {
        let instruction = crate::instruction::codec::decode(message)?;
        self.execute(instruction)?;
        Ok(())
    }

    /// Snapshot of the turntable state.
    pub fn state(&self) -> TurntableState {
        *self.lock().state()
    }

    /// Hold the controller for several operations.
    pub fn lock(&self) -> MutexGuard<'_, MotionController<P, D, A>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => self.recover(poisoned),
        }
    }

    /// Unwrap the controller.
    pub fn into_inner(self) -> MotionController<P, D, A> {
        match self.inner.into_inner() {
            Ok(controller) => controller,
            Err(poisoned) => {
                let mut controller = poisoned.into_inner();
                controller.invalidate();
                controller
            }
        }
    }

    /// A command panicked mid-motion; the position can no longer be trusted.
    fn recover<'a>(
        &'a self,
        poisoned: PoisonError<MutexGuard<'a, MotionController<P, D, A>>>,
    ) -> MutexGuard<'a, MotionController<P, D, A>> {
        let mut controller = poisoned.into_inner();
        warn!("{}: recovering from interrupted command", controller.name());
        controller.invalidate();
        self.inner.clear_poison();
        controller
    }
}

impl<P, D, A> From<MotionController<P, D, A>> for SharedController<P, D, A>
where
    P: GpioPort,
    D: DelayNs,
    A: AbortSignal,
{
    fn from(controller: MotionController<P, D, A>) -> Self {
        Self::new(controller)
    }
}
