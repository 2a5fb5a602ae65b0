//! Shared test infrastructure for led-runtime integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};
use led_runtime::{
    FrameProducer, FrameSink, Indicator, IndicatorPanel, IntensityFrame, ProducerStatus,
    SinkError, Storage, StorageError,
};

// ============================================================================
// Mock Indicator Panel
// ============================================================================

/// One recorded panel command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    Set(Indicator, bool),
    Toggle(Indicator),
}

/// Mock panel that tracks indicator levels and records every command.
pub struct MockPanel {
    initialized: Cell<bool>,
    activity: Cell<bool>,
    error: Cell<bool>,
    done: Cell<bool>,
    commands: RefCell<heapless::Vec<PanelCommand, 64>>,
}

impl MockPanel {
    pub fn new() -> Self {
        Self {
            initialized: Cell::new(false),
            activity: Cell::new(false),
            error: Cell::new(false),
            done: Cell::new(false),
            commands: RefCell::new(heapless::Vec::new()),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    pub fn level(&self, indicator: Indicator) -> bool {
        self.cell(indicator).get()
    }

    pub fn commands(&self) -> heapless::Vec<PanelCommand, 64> {
        self.commands.borrow().clone()
    }

    /// Drops recorded commands so a test can assert on one window in isolation.
    pub fn clear_commands(&self) {
        self.commands.borrow_mut().clear();
    }

    fn cell(&self, indicator: Indicator) -> &Cell<bool> {
        match indicator {
            Indicator::Activity => &self.activity,
            Indicator::Error => &self.error,
            Indicator::Done => &self.done,
        }
    }
}

impl IndicatorPanel for MockPanel {
    fn init(&self) {
        self.initialized.set(true);
    }

    fn set(&self, indicator: Indicator, on: bool) {
        self.cell(indicator).set(on);
        let _ = self
            .commands
            .borrow_mut()
            .push(PanelCommand::Set(indicator, on));
    }

    fn toggle(&self, indicator: Indicator) {
        let cell = self.cell(indicator);
        cell.set(!cell.get());
        let _ = self
            .commands
            .borrow_mut()
            .push(PanelCommand::Toggle(indicator));
    }
}

// ============================================================================
// Mock Frame Sink
// ============================================================================

/// Mock LED driver that stages intensities and simulates flush latency.
///
/// Each flush request loads a countdown; every `has_pending_flush` query
/// decrements it, so spin-waits in the code under test terminate after a
/// bounded number of polls.
pub struct MockSink<const CHANNELS: usize> {
    pub fail_begin: bool,
    pub flush_latency: u32,
    began: Cell<bool>,
    intensities: RefCell<[u16; CHANNELS]>,
    set_all_values: RefCell<heapless::Vec<u16, 16>>,
    flush_requests: Cell<u32>,
    pending: Cell<u32>,
}

impl<const CHANNELS: usize> MockSink<CHANNELS> {
    pub fn new() -> Self {
        Self {
            fail_begin: false,
            flush_latency: 0,
            began: Cell::new(false),
            intensities: RefCell::new([0; CHANNELS]),
            set_all_values: RefCell::new(heapless::Vec::new()),
            flush_requests: Cell::new(0),
            pending: Cell::new(0),
        }
    }

    pub fn with_latency(polls: u32) -> Self {
        let mut sink = Self::new();
        sink.flush_latency = polls;
        sink
    }

    pub fn began(&self) -> bool {
        self.began.get()
    }

    pub fn intensities(&self) -> [u16; CHANNELS] {
        *self.intensities.borrow()
    }

    pub fn set_all_values(&self) -> heapless::Vec<u16, 16> {
        self.set_all_values.borrow().clone()
    }

    pub fn flush_requests(&self) -> u32 {
        self.flush_requests.get()
    }
}

impl<const CHANNELS: usize> FrameSink<CHANNELS> for MockSink<CHANNELS> {
    fn begin(&self) -> Result<(), SinkError> {
        if self.fail_begin {
            return Err(SinkError::Unavailable);
        }
        self.began.set(true);
        Ok(())
    }

    fn set_intensity(&self, channel: usize, value: u16) {
        if let Some(slot) = self.intensities.borrow_mut().get_mut(channel) {
            *slot = value;
        }
    }

    fn set_all(&self, value: u16) {
        *self.intensities.borrow_mut() = [value; CHANNELS];
        let _ = self.set_all_values.borrow_mut().push(value);
    }

    fn flush_async(&self) {
        self.flush_requests.set(self.flush_requests.get() + 1);
        self.pending.set(self.flush_latency);
    }

    fn has_pending_flush(&self) -> bool {
        let remaining = self.pending.get();
        if remaining == 0 {
            return false;
        }
        self.pending.set(remaining - 1);
        true
    }
}

// ============================================================================
// Mock Storage
// ============================================================================

/// Mock program storage with switchable failure points.
pub struct MockStorage {
    pub fail_open: bool,
    pub fail_file: bool,
    pub fail_verify: bool,
    opened: bool,
    opened_file: Option<heapless::String<32>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self {
            fail_open: false,
            fail_file: false,
            fail_verify: false,
            opened: false,
            opened_file: None,
        }
    }

    pub fn is_opened(&self) -> bool {
        self.opened
    }

    pub fn opened_file(&self) -> Option<&str> {
        self.opened_file.as_deref()
    }
}

impl Storage for MockStorage {
    type ProgramHandle = u32;

    fn open(&mut self) -> Result<(), StorageError> {
        if self.fail_open {
            return Err(StorageError::Unavailable);
        }
        self.opened = true;
        Ok(())
    }

    fn open_program_file(&mut self, name: &str) -> Result<u32, StorageError> {
        if self.fail_file {
            return Err(StorageError::FileMissing);
        }
        self.opened_file = Some(heapless::String::try_from(name).unwrap());
        Ok(42)
    }

    fn verify_program(&mut self, _program: &u32) -> Result<(), StorageError> {
        if self.fail_verify {
            return Err(StorageError::InvalidProgram);
        }
        Ok(())
    }
}

// ============================================================================
// Finite Frame Producer
// ============================================================================

/// Producer that emits a fixed number of constant frames, then exhausts.
pub struct FiniteProducer {
    pub remaining: u32,
    pub fill_value: u16,
}

impl FiniteProducer {
    pub fn new(frames: u32, fill_value: u16) -> Self {
        Self {
            remaining: frames,
            fill_value,
        }
    }
}

impl<const CHANNELS: usize> FrameProducer<CHANNELS> for FiniteProducer {
    fn next_frame(&mut self, frame: &mut IntensityFrame<CHANNELS>) -> ProducerStatus {
        if self.remaining == 0 {
            return ProducerStatus::Exhausted;
        }
        self.remaining -= 1;
        frame.fill(self.fill_value);
        ProducerStatus::Frame
    }
}
