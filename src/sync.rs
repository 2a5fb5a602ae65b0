//! Single-slot producer/consumer handoff between tick context and the main loop.
//!
//! [`SyncFlag`] is a shared counter with contractual range {-1, 0, 1}:
//! 1 means a frame is staged for the next consumption point, 0 means the
//! producer may run, and a negative value is a latched deadline-miss fault.
//! Consumption happens in interrupt context and production in the main loop,
//! so every operation that decides "clear" or "missed" is a single atomic step.

use portable_atomic::{AtomicI8, Ordering};

/// Outcome of a consumption event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Release {
    /// A staged frame was consumed on schedule.
    Consumed,

    /// The consumer fired before the producer re-armed: a deadline miss.
    Missed,
}

/// One-slot synchronization flag with deadline-miss detection.
///
/// Starts at 0; startup primes it to 1 with [`SyncFlag::arm`] so the first
/// cycle proceeds without waiting for a real consumption event. Safe to share
/// between the tick interrupt and the main loop; place it in a `static` in
/// firmware builds.
pub struct SyncFlag(AtomicI8);

impl SyncFlag {
    /// Creates a flag with no frame staged.
    pub const fn new() -> Self {
        Self(AtomicI8::new(0))
    }

    /// Consumes the staged frame. Called from tick context.
    ///
    /// Decrements the counter. Returns [`Release::Missed`] when no frame was
    /// staged; the counter is left at its decremented negative value as a
    /// latched fault indicator and is not restored.
    pub fn release(&self) -> Release {
        if self.0.fetch_sub(1, Ordering::SeqCst) <= 0 {
            Release::Missed
        } else {
            Release::Consumed
        }
    }

    /// Stages a frame for the next consumption event. Called from the main
    /// loop after the frame has been handed to the sink.
    ///
    /// Returns `false` without touching the counter when a miss has latched,
    /// so a late producer never repairs the fault. The check and increment
    /// are one atomic step relative to [`SyncFlag::release`].
    pub fn arm(&self) -> bool {
        self.0
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |value| {
                if value < 0 { None } else { Some(value + 1) }
            })
            .is_ok()
    }

    /// Spins until the previously armed cycle has been consumed.
    ///
    /// The only blocking primitive in the core; a pure spin-wait, since the
    /// main loop has no other work to perform meanwhile.
    pub fn wait_until_clear(&self) {
        while self.0.load(Ordering::SeqCst) > 0 {
            core::hint::spin_loop();
        }
    }

    /// Returns true while a frame is staged.
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst) > 0
    }

    /// Returns true once a deadline miss has latched.
    pub fn is_faulted(&self) -> bool {
        self.0.load(Ordering::SeqCst) < 0
    }

    /// Current counter value; {-1, 0, 1} under correct operation.
    pub fn value(&self) -> i8 {
        self.0.load(Ordering::SeqCst)
    }
}

impl Default for SyncFlag {
    fn default() -> Self {
        Self::new()
    }
}
