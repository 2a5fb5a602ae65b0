//! Main control loop orchestration and the two periodic tick callbacks.
//!
//! Provides [`ControlLoop`], which sequences startup, then produces one
//! [`IntensityFrame`] per synchronization cycle while the system is running,
//! and the [`frame_tick`] / [`status_tick`] callbacks the platform layer's
//! timer interrupt drives through the [`TickScheduler`].

use crate::indicator::{IndicatorPanel, render_status};
use crate::producer::{FrameProducer, ProducerStatus};
use crate::scheduler::{SchedulerError, TickScheduler};
use crate::sink::{FrameSink, IntensityFrame};
use crate::state::{StateCell, SystemState};
use crate::storage::Storage;
use crate::sync::{Release, SyncFlag};
use crate::{FRAME_PERIOD_TICKS, PROGRAM_FILE_NAME, STATUS_PERIOD_TICKS};

/// Shared context handed to the periodic callbacks and the control loop.
///
/// Bundles the only data crossing the interrupt/main-loop boundary: the
/// synchronization flag, the state cell, and the two tick-driven hardware
/// seams. Plain `Copy`, so the tick handler and the loop each hold their own
/// copy of the same borrows.
///
/// # Type Parameters
/// * `'a` - Lifetime of the shared borrows
/// * `S` - Frame sink implementation type
/// * `P` - Indicator panel implementation type
/// * `CHANNELS` - Number of LED channels per frame
pub struct CycleContext<'a, S, P, const CHANNELS: usize>
where
    S: FrameSink<CHANNELS>,
    P: IndicatorPanel,
{
    flag: &'a SyncFlag,
    state: &'a StateCell,
    sink: &'a S,
    indicators: &'a P,
}

impl<'a, S, P, const CHANNELS: usize> CycleContext<'a, S, P, CHANNELS>
where
    S: FrameSink<CHANNELS>,
    P: IndicatorPanel,
{
    /// Creates a context over the shared core state and hardware seams.
    pub fn new(flag: &'a SyncFlag, state: &'a StateCell, sink: &'a S, indicators: &'a P) -> Self {
        Self {
            flag,
            state,
            sink,
            indicators,
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> SystemState {
        self.state.get()
    }
}

// Manual impls: the derives would demand S: Copy and P: Copy, but only
// references are stored.
impl<S, P, const CHANNELS: usize> Clone for CycleContext<'_, S, P, CHANNELS>
where
    S: FrameSink<CHANNELS>,
    P: IndicatorPanel,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, P, const CHANNELS: usize> Copy for CycleContext<'_, S, P, CHANNELS>
where
    S: FrameSink<CHANNELS>,
    P: IndicatorPanel,
{
}

/// Fast periodic callback: the consumption point of the frame cycle.
///
/// While the system is running, consumes the staged frame and latches
/// [`SystemState::ErrorDeadlineMissed`] when the producer did not re-arm in
/// time. The flush request is skipped once the flag is fault-latched, so a
/// half-written frame is never pushed to hardware.
pub fn frame_tick<S, P, const CHANNELS: usize>(ctx: &CycleContext<'_, S, P, CHANNELS>)
where
    S: FrameSink<CHANNELS>,
    P: IndicatorPanel,
{
    if ctx.state.get() == SystemState::Running && ctx.flag.release() == Release::Missed {
        ctx.state.set(SystemState::ErrorDeadlineMissed);
    }

    if !ctx.flag.is_faulted() {
        ctx.sink.flush_async();
    }
}

/// Slow periodic callback: re-renders the indicator pattern for the current
/// state so toggle-based patterns animate.
pub fn status_tick<S, P, const CHANNELS: usize>(ctx: &CycleContext<'_, S, P, CHANNELS>)
where
    S: FrameSink<CHANNELS>,
    P: IndicatorPanel,
{
    render_status(ctx.state.get(), ctx.indicators);
}

/// Sequences startup and runs the produce/submit/arm cycle.
///
/// Owns the storage source, the frame producer, and the frame buffer; the
/// frame buffer is exclusively the loop's while being filled and is handed to
/// the sink channel by channel on submission.
///
/// # Type Parameters
/// * `'a` - Lifetime of the shared context borrows
/// * `S` - Frame sink implementation type
/// * `P` - Indicator panel implementation type
/// * `G` - Storage source implementation type
/// * `F` - Frame producer implementation type
/// * `CHANNELS` - Number of LED channels per frame
pub struct ControlLoop<'a, S, P, G, F, const CHANNELS: usize>
where
    S: FrameSink<CHANNELS>,
    P: IndicatorPanel,
    G: Storage,
    F: FrameProducer<CHANNELS>,
{
    ctx: CycleContext<'a, S, P, CHANNELS>,
    storage: G,
    producer: F,
    program: Option<G::ProgramHandle>,
    frame: IntensityFrame<CHANNELS>,
}

impl<'a, S, P, G, F, const CHANNELS: usize> ControlLoop<'a, S, P, G, F, CHANNELS>
where
    S: FrameSink<CHANNELS>,
    P: IndicatorPanel,
    G: Storage,
    F: FrameProducer<CHANNELS>,
{
    /// Creates a control loop over the shared context.
    pub fn new(ctx: CycleContext<'a, S, P, CHANNELS>, storage: G, producer: F) -> Self {
        Self {
            ctx,
            storage,
            producer,
            program: None,
            frame: IntensityFrame::new(),
        }
    }

    /// Runs the startup sequence and starts the scheduler.
    ///
    /// Fatal hardware or storage failures latch the matching terminal error
    /// state and skip the remaining checks, but the scheduler always starts,
    /// so the indicators keep rendering the outcome. Only scheduler
    /// configuration errors propagate; they mean the build itself is wrong.
    ///
    /// # Errors
    /// Returns the [`SchedulerError`] if callback registration fails.
    pub fn init<const N: usize>(
        &mut self,
        scheduler: &mut TickScheduler<CycleContext<'a, S, P, CHANNELS>, N>,
    ) -> Result<(), SchedulerError> {
        // Bring up the sink, blank all channels, and force one synchronous
        // flush before the timed loop starts.
        if self.ctx.sink.begin().is_err() {
            self.ctx.state.set(SystemState::ErrorSinkUnavailable);
        } else {
            self.ctx.sink.set_all(0);
            self.ctx.sink.flush_async();
            while self.ctx.sink.has_pending_flush() {
                core::hint::spin_loop();
            }
        }

        // Prime the flag so the first cycle proceeds without waiting for a
        // real consumption event.
        self.ctx.flag.arm();

        self.ctx.indicators.init();

        scheduler.register(frame_tick, FRAME_PERIOD_TICKS)?;
        scheduler.register(status_tick, STATUS_PERIOD_TICKS)?;
        scheduler.start();

        if self.ctx.state.get() == SystemState::Initializing && self.storage.open().is_err() {
            self.ctx.state.set(SystemState::ErrorNoStorage);
        }

        if self.ctx.state.get() == SystemState::Initializing {
            match self.storage.open_program_file(PROGRAM_FILE_NAME) {
                Ok(program) => self.program = Some(program),
                Err(_) => self.ctx.state.set(SystemState::ErrorNoProgram),
            }
        }

        if self.ctx.state.get() == SystemState::Initializing
            && let Some(program) = self.program.as_ref()
            && self.storage.verify_program(program).is_err()
        {
            self.ctx.state.set(SystemState::ErrorBadProgram);
        }

        if self.ctx.state.get() == SystemState::Initializing {
            self.ctx.state.set(SystemState::Running);
        }

        Ok(())
    }

    /// One steady-state iteration: no-op unless the system is running.
    ///
    /// Waits for the previously armed cycle to be consumed and for any
    /// in-flight transmission to finish, produces the next frame, hands it to
    /// the sink, and re-arms the flag.
    pub fn run_cycle(&mut self) {
        if self.ctx.state.get() != SystemState::Running {
            return;
        }

        self.ctx.flag.wait_until_clear();

        while self.ctx.sink.has_pending_flush() {
            core::hint::spin_loop();
        }

        match self.producer.next_frame(&mut self.frame) {
            ProducerStatus::Frame => {
                for (channel, value) in self.frame.as_slice().iter().enumerate() {
                    self.ctx.sink.set_intensity(channel, *value);
                }

                // arm() refuses when a miss latched mid-cycle; the tick side
                // has already moved the state machine off Running.
                let _ = self.ctx.flag.arm();
            }
            ProducerStatus::Exhausted => {
                self.ctx.state.set(SystemState::Finished);
            }
        }
    }

    /// Runs forever. After the state leaves `Running`, the loop keeps
    /// spinning without producing while the periodic callbacks render the
    /// indicators.
    pub fn run(&mut self) -> ! {
        loop {
            self.run_cycle();
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> SystemState {
        self.ctx.state.get()
    }

    /// Returns true once a program file has been opened.
    pub fn has_program(&self) -> bool {
        self.program.is_some()
    }

    /// Borrows the storage source, for inspection after startup.
    pub fn storage(&self) -> &G {
        &self.storage
    }
}
