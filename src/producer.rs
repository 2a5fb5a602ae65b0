//! Pluggable per-cycle frame production.
//!
//! The encoding of the stored light program is owned by the storage layer;
//! the core only requires something that can fill one [`IntensityFrame`] per
//! synchronization cycle. A program decoder is just another
//! [`FrameProducer`].

use crate::sink::{INTENSITY_MAX, IntensityFrame};

/// Outcome of one production step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProducerStatus {
    /// The frame was filled and is ready for submission.
    Frame,

    /// The program source is exhausted; no frame was produced.
    Exhausted,
}

/// Trait for the per-cycle frame source.
pub trait FrameProducer<const CHANNELS: usize> {
    /// Fills `frame` with the next set of channel intensities.
    ///
    /// Returning [`ProducerStatus::Exhausted`] ends playback; the control
    /// loop transitions to [`crate::SystemState::Finished`] and stops
    /// producing.
    fn next_frame(&mut self, frame: &mut IntensityFrame<CHANNELS>) -> ProducerStatus;
}

/// Built-in producer that walks a single full-intensity channel across the
/// array, one channel per cycle. Never exhausts.
pub struct MovingDot<const CHANNELS: usize> {
    cursor: usize,
}

impl<const CHANNELS: usize> MovingDot<CHANNELS> {
    /// Creates a producer with the dot on channel 0.
    pub const fn new() -> Self {
        Self { cursor: 0 }
    }
}

impl<const CHANNELS: usize> Default for MovingDot<CHANNELS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CHANNELS: usize> FrameProducer<CHANNELS> for MovingDot<CHANNELS> {
    fn next_frame(&mut self, frame: &mut IntensityFrame<CHANNELS>) -> ProducerStatus {
        frame.fill(0);
        frame.set(self.cursor, INTENSITY_MAX);

        self.cursor += 1;
        if self.cursor >= CHANNELS {
            self.cursor = 0;
        }

        ProducerStatus::Frame
    }
}
