//! Caller-controlled abort of hardware waits.

use core::sync::atomic::{AtomicBool, Ordering};

/// Signal checked at every sample of a hardware wait.
///
/// Once asserted, the wait in progress ends with `Fault::Aborted` and the
/// motor is de-energized. The controller never clears the signal.
pub trait AbortSignal {
    /// Whether the wait in progress should stop.
    fn is_aborted(&self) -> bool;
}

/// Signal that is never asserted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverAbort;

impl AbortSignal for NeverAbort {
    #[inline]
    fn is_aborted(&self) -> bool {
        false
    }
}

impl AbortSignal for AtomicBool {
    #[inline]
    fn is_aborted(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

impl<T: AbortSignal + ?Sized> AbortSignal for &T {
    #[inline]
    fn is_aborted(&self) -> bool {
        (**self).is_aborted()
    }
}

#[cfg(feature = "std")]
impl<T: AbortSignal + ?Sized> AbortSignal for std::sync::Arc<T> {
    #[inline]
    fn is_aborted(&self) -> bool {
        (**self).is_aborted()
    }
}
