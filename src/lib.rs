#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`LapTimer`**: Session state for one gate: idle/running, lap origin, last lap text
//! - **`CaptureOutcome`**: What a falling edge meant (`Started`, `Lap`, or `Ignored`)
//! - **`BlinkScheduler`**: Non-blocking on/off toggle for the last-lap readout
//! - **`LapText`**: Fixed eight-character `MM:SS:CC` duration text
//! - **`EdgeSource`**: Trait for anything that delivers falling-edge timestamps
//! - **`PolledEdge`** / **`EdgeLatch`**: Busy-poll and interrupt-fed edge sources
//! - **`LapDisplay`** / **`Notifier`**: Traits to implement for your display and buzzer
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`Instrument`**: Main-loop driver wiring all of the above together
//! - **`TimerConfig`**: Build-time configuration (hysteresis, blink, tone, edge mode)

#[macro_use]
mod logging;

pub mod blink;
pub mod config;
pub mod edge;
pub mod format;
pub mod instrument;
pub mod output;
pub mod time;
pub mod timer;

pub use blink::{BlinkScheduler, BlinkState};
pub use config::{
    DEFAULT_BLINK_COUNT, DEFAULT_BLINK_INTERVAL_MS, DEFAULT_HYSTERESIS_MS, DEFAULT_TONE, EdgeMode,
    TimerConfig,
};
pub use edge::{Edge, EdgeDetector, EdgeLatch, EdgeSource, LatchedEdges, PolledEdge};
pub use format::{LAP_TEXT_LEN, LapText, format_duration};
pub use instrument::{Instrument, MAX_EDGES_PER_TICK, StartupError};
pub use output::{LapDisplay, Notifier, TextRegion, Tone};
pub use time::{MillisCounter, MillisDuration, MillisInstant, TimeDuration, TimeInstant, TimeSource};
pub use timer::{CaptureOutcome, Frame, LapTimer};
