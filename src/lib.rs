#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ControlLoop`**: Sequences startup checks, then produces one intensity frame per cycle
//! - **`TickScheduler`**: Dispatches registered callbacks on fixed tick periods
//! - **`SyncFlag`**: Counting flag pairing the main loop's frame production with the tick handler's consumption
//! - **`StateCell`**: Atomic holder of the [`SystemState`] machine, latching terminal states
//! - **`IntensityFrame`**: One complete set of channel intensities, 12-bit range
//! - **`FrameProducer`**: Trait for the per-cycle frame source (a program decoder, or [`MovingDot`])
//! - **`FrameSink`**: Trait to implement for your LED driver hardware
//! - **`IndicatorPanel`**: Trait to implement for your status LED hardware
//! - **`Storage`**: Trait to implement for the program file medium
//!
//! The core never talks to hardware directly. The platform layer implements
//! the three hardware traits, calls [`TickScheduler::on_tick`] from its timer
//! interrupt, and hands everything to [`ControlLoop::run`].

pub mod control;
pub mod indicator;
pub mod producer;
pub mod scheduler;
pub mod sink;
pub mod state;
pub mod storage;
pub mod sync;

pub use control::{ControlLoop, CycleContext, frame_tick, status_tick};
pub use indicator::{Indicator, IndicatorPanel, render_status};
pub use producer::{FrameProducer, MovingDot, ProducerStatus};
pub use scheduler::{SchedulerError, TickScheduler};
pub use sink::{FrameSink, INTENSITY_MAX, IntensityFrame, SinkError};
pub use state::{StateCell, SystemState};
pub use storage::{Storage, StorageError};
pub use sync::{Release, SyncFlag};

/// Frame-cycle callback period, in scheduler ticks.
pub const FRAME_PERIOD_TICKS: u32 = 10;

/// Status-rendering callback period, in scheduler ticks.
pub const STATUS_PERIOD_TICKS: u32 = 500;

/// Name of the light program file opened during startup.
pub const PROGRAM_FILE_NAME: &str = "program.lpf";
