//! Lap timer state machine.
//!
//! Provides [`LapTimer`], which holds the session state (idle or running),
//! the lap origin, the latest clock sample and the last completed lap, and
//! classifies every falling edge from the gate sensor as a start, a lap or a
//! spurious re-trigger.

use crate::blink::BlinkScheduler;
use crate::config::TimerConfig;
use crate::format::{LapText, format_duration};
use crate::time::{TimeDuration, TimeInstant};

/// Result of feeding one falling edge into the timer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureOutcome {
    /// First crossing. The session is now running.
    Started,
    /// A lap completed; carries its formatted duration.
    Lap(LapText),
    /// Edge arrived inside the hysteresis window and was discarded.
    Ignored,
}

impl CaptureOutcome {
    /// Returns true for outcomes that should be announced with a tone.
    pub fn is_notable(&self) -> bool {
        !matches!(self, CaptureOutcome::Ignored)
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Running time of the current lap.
    pub elapsed: LapText,
    /// Duration of the last completed lap.
    pub last_lap: LapText,
    /// Whether the last-lap text is drawn this frame.
    pub lap_visible: bool,
}

/// Session state for a single gate.
///
/// Created once at startup and kept for the whole run. Edges are applied
/// with [`capture`](Self::capture) or [`capture_at`](Self::capture_at), the
/// main loop samples the clock with [`refresh`](Self::refresh) and reads
/// back [`current_elapsed`](Self::current_elapsed) or [`frame`](Self::frame).
///
/// Capturing never performs I/O and never loops, so a timer shared with an
/// interrupt handler (for example inside a `critical_section::Mutex`) keeps
/// the handler short. A lap updates `last_lap` before `lap_origin`, so a
/// reader that sees only part of the update still renders valid values.
///
/// # Type Parameters
/// * `I` - Time instant type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LapTimer<I: TimeInstant> {
    running: bool,
    lap_origin: I,
    now: I,
    last_lap: LapText,
    hysteresis: I::Duration,
    blink: BlinkScheduler<I>,
}

impl<I: TimeInstant> LapTimer<I> {
    /// Creates an idle timer. `startup` is the clock sample at power-up.
    pub fn new(config: &TimerConfig, startup: I) -> Self {
        Self {
            running: false,
            lap_origin: startup,
            now: startup,
            last_lap: LapText::zero(),
            hysteresis: I::Duration::from_millis(config.hysteresis_ms),
            blink: BlinkScheduler::new(
                I::Duration::from_millis(config.blink_interval_ms),
                config.blink_count,
            ),
        }
    }

    /// Records the clock sample for this main-loop iteration.
    ///
    /// Call exactly once per iteration, before reading any derived value.
    pub fn refresh(&mut self, now: I) {
        self.now = now;
    }

    /// Handles a falling edge stamped with the latest clock sample.
    pub fn capture(&mut self) -> CaptureOutcome {
        self.capture_at(self.now)
    }

    /// Handles a falling edge that occurred at `at`.
    ///
    /// * Idle: starts the session with the lap origin at `at`.
    /// * Running, less than the hysteresis window since the lap origin: ignored,
    ///   no state changes.
    /// * Running otherwise: completes the lap, moves the origin to `at` and
    ///   restarts the readout blink.
    pub fn capture_at(&mut self, at: I) -> CaptureOutcome {
        if !self.running {
            self.lap_origin = at;
            self.running = true;
            return CaptureOutcome::Started;
        }

        let delta = at.duration_since(self.lap_origin);
        if delta.as_millis() < self.hysteresis.as_millis() {
            return CaptureOutcome::Ignored;
        }

        let text = format_duration(delta.as_millis());
        self.last_lap = text.clone();
        self.lap_origin = at;
        self.blink.restart(at);
        CaptureOutcome::Lap(text)
    }

    /// Advances the readout blink using the current clock sample.
    pub fn tick_blink(&mut self) {
        self.blink.tick(self.now);
    }

    /// Time since the lap origin, or zero before the first start.
    pub fn current_elapsed(&self) -> I::Duration {
        if self.running {
            self.now.duration_since(self.lap_origin)
        } else {
            I::Duration::ZERO
        }
    }

    /// Builds the frame for the current clock sample.
    pub fn frame(&self) -> Frame {
        Frame {
            elapsed: format_duration(self.current_elapsed().as_millis()),
            last_lap: self.last_lap.clone(),
            lap_visible: self.blink.is_visible(),
        }
    }

    /// Returns true once the first crossing has been seen.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start of the lap currently being timed.
    pub fn lap_origin(&self) -> I {
        self.lap_origin
    }

    /// Latest clock sample.
    pub fn now(&self) -> I {
        self.now
    }

    /// Formatted duration of the last completed lap.
    pub fn last_lap(&self) -> &LapText {
        &self.last_lap
    }

    /// Readout blink scheduler.
    pub fn blink(&self) -> &BlinkScheduler<I> {
        &self.blink
    }
}
