//! Frame sink interface and the per-cycle intensity frame.

/// Largest representable channel intensity (12-bit grayscale range).
pub const INTENSITY_MAX: u16 = 4095;

/// Errors reported by the frame sink hardware path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SinkError {
    /// The driver hardware could not be brought up.
    Unavailable,
}

impl core::fmt::Display for SinkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SinkError::Unavailable => write!(f, "frame sink hardware unavailable"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SinkError {}

/// One complete set of channel intensities, ready for transmission.
///
/// Produced fresh each cycle by the control loop and exclusively owned by it
/// while being filled; the values are handed to the sink channel by channel
/// on submission. Writes clamp to [`INTENSITY_MAX`] and ignore out-of-range
/// channels, matching the driver chip's behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntensityFrame<const CHANNELS: usize> {
    values: [u16; CHANNELS],
}

impl<const CHANNELS: usize> IntensityFrame<CHANNELS> {
    /// Creates a blank frame with all channels off.
    pub const fn new() -> Self {
        Self {
            values: [0; CHANNELS],
        }
    }

    /// Sets one channel, clamped to [`INTENSITY_MAX`].
    pub fn set(&mut self, channel: usize, value: u16) {
        if let Some(slot) = self.values.get_mut(channel) {
            *slot = value.min(INTENSITY_MAX);
        }
    }

    /// Returns one channel's intensity, or `None` for an out-of-range channel.
    pub fn get(&self, channel: usize) -> Option<u16> {
        self.values.get(channel).copied()
    }

    /// Sets every channel to `value`, clamped to [`INTENSITY_MAX`].
    pub fn fill(&mut self, value: u16) {
        self.values = [value.min(INTENSITY_MAX); CHANNELS];
    }

    /// All channel intensities in channel order.
    pub fn as_slice(&self) -> &[u16] {
        &self.values
    }

    /// Number of channels in the frame.
    pub const fn len(&self) -> usize {
        CHANNELS
    }

    /// Returns true for a zero-channel frame.
    pub const fn is_empty(&self) -> bool {
        CHANNELS == 0
    }
}

impl<const CHANNELS: usize> Default for IntensityFrame<CHANNELS> {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for abstracting the downstream LED driver.
///
/// Implement this for your driver hardware (SPI, shift register, PWM bank).
/// The sink is shared between the main loop and the tick handler -
/// [`FrameSink::flush_async`] is issued from tick context - so methods take
/// `&self` and implementations provide their own interior mutability.
pub trait FrameSink<const CHANNELS: usize> {
    /// Brings up the hardware path.
    ///
    /// # Errors
    /// Returns [`SinkError::Unavailable`] if the driver cannot be reached.
    fn begin(&self) -> Result<(), SinkError>;

    /// Stages one channel's intensity for the next flush.
    fn set_intensity(&self, channel: usize, value: u16);

    /// Stages the same intensity on every channel.
    fn set_all(&self, value: u16);

    /// Requests transmission of the staged frame. Non-blocking; completion
    /// is observable through [`FrameSink::has_pending_flush`].
    fn flush_async(&self);

    /// Returns true while a requested transmission is still in flight.
    fn has_pending_flush(&self) -> bool;
}
