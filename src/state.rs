//! Lifecycle states and the terminal-latching shared state cell.

use portable_atomic::{AtomicU8, Ordering};

/// Lifecycle and fault states of the control core.
///
/// Exactly one value is live at a time. `Finished` and every `Error*` variant
/// are terminal: once entered, the machine never returns to `Initializing` or
/// `Running`, and the only recovery is a power cycle. Each state maps to a
/// fixed indicator pattern (see [`crate::indicator::render_status`]), which is
/// the device's only diagnostic output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SystemState {
    /// Startup checks in progress.
    Initializing = 0,

    /// Producing one frame per synchronization cycle.
    Running = 1,

    /// The program source is exhausted.
    Finished = 2,

    /// The storage medium could not be opened.
    ErrorNoStorage = 3,

    /// No program file was found on otherwise usable storage.
    ErrorNoProgram = 4,

    /// The program file failed header verification.
    ErrorBadProgram = 5,

    /// The producer failed to stage a frame before a consumption point.
    ErrorDeadlineMissed = 6,

    /// The frame sink hardware path could not be brought up.
    ErrorSinkUnavailable = 7,
}

impl SystemState {
    /// Returns true for states with no outgoing transitions.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, SystemState::Initializing | SystemState::Running)
    }

    const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => SystemState::Initializing,
            1 => SystemState::Running,
            2 => SystemState::Finished,
            3 => SystemState::ErrorNoStorage,
            4 => SystemState::ErrorNoProgram,
            5 => SystemState::ErrorBadProgram,
            6 => SystemState::ErrorDeadlineMissed,
            _ => SystemState::ErrorSinkUnavailable,
        }
    }
}

/// Shared state cell with the terminal-class invariant enforced on write.
///
/// Written only by the main control loop and by the deadline-miss branch of
/// the fast tick callback; read by the indicator renderer. Reads and writes
/// are single atomic steps relative to the tick interrupt. Place it in a
/// `static` in firmware builds.
pub struct StateCell(AtomicU8);

impl StateCell {
    /// Creates a cell in `Initializing`.
    pub const fn new() -> Self {
        Self(AtomicU8::new(SystemState::Initializing as u8))
    }

    /// Current state snapshot.
    pub fn get(&self) -> SystemState {
        SystemState::from_raw(self.0.load(Ordering::SeqCst))
    }

    /// Transitions to `next`, unless the current state is terminal.
    ///
    /// The refusal is atomic with the read, so a terminal state can never be
    /// overwritten by a racing writer.
    pub fn set(&self, next: SystemState) {
        let _ = self.0.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |raw| {
            if SystemState::from_raw(raw).is_terminal() {
                None
            } else {
                Some(next as u8)
            }
        });
    }
}

impl Default for StateCell {
    fn default() -> Self {
        Self::new()
    }
}
