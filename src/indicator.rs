//! Logical status indicators and the per-state rendering table.

use crate::state::SystemState;

/// A logical status indicator, mapped to a physical LED by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Indicator {
    /// Heartbeat of the frame cycle.
    Activity,
    /// Fault signaling.
    Error,
    /// Program playback complete.
    Done,
}

/// Trait for the physical indicator drive.
///
/// Implement this for your status LED hardware. Methods take `&self` because
/// the panel is driven from tick context as well as the main loop;
/// implementations provide their own interior mutability. Handle any hardware
/// errors internally - these methods cannot fail.
pub trait IndicatorPanel {
    /// Prepares the indicator outputs.
    fn init(&self);

    /// Drives an indicator fully on or off.
    fn set(&self, indicator: Indicator, on: bool);

    /// Inverts an indicator's current level.
    fn toggle(&self, indicator: Indicator);
}

/// Renders the indicator pattern for `state`.
///
/// Invoked on every slow tick, not only on transitions, so toggle-based
/// patterns blink continuously. The mapping is fixed: field technicians read
/// these patterns as the device's status API, so every state drives all three
/// indicators explicitly.
pub fn render_status<P: IndicatorPanel>(state: SystemState, panel: &P) {
    match state {
        SystemState::Initializing => {
            panel.set(Indicator::Activity, false);
            panel.set(Indicator::Error, false);
            panel.set(Indicator::Done, false);
        }
        SystemState::Running => {
            panel.toggle(Indicator::Activity);
            panel.set(Indicator::Error, false);
            panel.set(Indicator::Done, false);
        }
        SystemState::Finished => {
            panel.set(Indicator::Activity, false);
            panel.set(Indicator::Error, false);
            panel.set(Indicator::Done, true);
        }
        SystemState::ErrorNoStorage => {
            panel.set(Indicator::Activity, false);
            panel.set(Indicator::Error, true);
            panel.set(Indicator::Done, false);
        }
        SystemState::ErrorNoProgram => {
            panel.set(Indicator::Activity, false);
            panel.set(Indicator::Error, true);
            panel.set(Indicator::Done, true);
        }
        SystemState::ErrorBadProgram => {
            panel.set(Indicator::Activity, true);
            panel.set(Indicator::Error, true);
            panel.set(Indicator::Done, false);
        }
        SystemState::ErrorDeadlineMissed => {
            panel.toggle(Indicator::Activity);
            panel.toggle(Indicator::Error);
            panel.set(Indicator::Done, false);
        }
        SystemState::ErrorSinkUnavailable => {
            panel.set(Indicator::Activity, false);
            panel.toggle(Indicator::Error);
            panel.set(Indicator::Done, false);
        }
    }
}
