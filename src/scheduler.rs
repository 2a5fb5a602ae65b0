//! Fixed-slot periodic callback scheduling driven off a single hardware tick.
//!
//! [`TickScheduler`] holds a fixed list of (callback, period) entries and
//! dispatches them from [`TickScheduler::on_tick`], which the platform layer
//! calls once per hardware timer interrupt. Callbacks receive an explicit
//! shared context instead of reaching for globals.

use heapless::Vec;

/// Scheduler configuration errors. All are fatal at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// Registration attempted after the scheduler started.
    AlreadyStarted,

    /// The fixed callback table is full.
    CapacityExceeded,

    /// A period of zero ticks can never elapse.
    ZeroPeriod,
}

impl core::fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SchedulerError::AlreadyStarted => {
                write!(f, "callbacks must be registered before the scheduler starts")
            }
            SchedulerError::CapacityExceeded => {
                write!(f, "callback table capacity exceeded")
            }
            SchedulerError::ZeroPeriod => {
                write!(f, "callback period must be at least one tick")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SchedulerError {}

struct Entry<C> {
    callback: fn(&C),
    period: u32,
    elapsed: u32,
}

/// Dispatches registered callbacks at fixed tick periods.
///
/// Entries are fixed for the process lifetime once [`TickScheduler::start`]
/// is called; registration order is invocation order when several entries
/// fall due on the same tick. The `&mut self` receiver on
/// [`TickScheduler::on_tick`] encodes that dispatch is re-entered only via
/// the single hardware tick path (no nested tick dispatch).
///
/// # Type Parameters
/// * `C` - Shared context type passed to every callback
/// * `N` - Maximum number of callback entries
pub struct TickScheduler<C, const N: usize> {
    entries: Vec<Entry<C>, N>,
    ticks: u32,
    started: bool,
}

impl<C, const N: usize> TickScheduler<C, N> {
    /// Creates a scheduler with an empty callback table.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            ticks: 0,
            started: false,
        }
    }

    /// Adds a callback invoked every `period_ticks` ticks.
    ///
    /// # Errors
    /// * `AlreadyStarted` - the scheduler is already dispatching
    /// * `CapacityExceeded` - the fixed table is full
    /// * `ZeroPeriod` - `period_ticks` is zero
    pub fn register(&mut self, callback: fn(&C), period_ticks: u32) -> Result<(), SchedulerError> {
        if self.started {
            return Err(SchedulerError::AlreadyStarted);
        }
        if period_ticks == 0 {
            return Err(SchedulerError::ZeroPeriod);
        }

        self.entries
            .push(Entry {
                callback,
                period: period_ticks,
                elapsed: 0,
            })
            .map_err(|_| SchedulerError::CapacityExceeded)
    }

    /// Begins dispatch from the next hardware tick.
    pub fn start(&mut self) {
        self.started = true;
    }

    /// Advances the scheduler by one hardware tick.
    ///
    /// Increments the free-running tick counter, then invokes every entry
    /// whose accumulated count has reached its period and resets that count
    /// to zero, in registration order. No-op until [`TickScheduler::start`].
    pub fn on_tick(&mut self, ctx: &C) {
        if !self.started {
            return;
        }

        self.ticks = self.ticks.wrapping_add(1);

        for entry in &mut self.entries {
            entry.elapsed += 1;
            if entry.elapsed >= entry.period {
                (entry.callback)(ctx);
                entry.elapsed = 0;
            }
        }
    }

    /// Returns true once dispatch has started.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Free-running tick count since start.
    pub fn tick_count(&self) -> u32 {
        self.ticks
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C, const N: usize> Default for TickScheduler<C, N> {
    fn default() -> Self {
        Self::new()
    }
}
