//! Non-blocking blink scheduler for the lap readout.
//!
//! After each new lap the readout toggles off and on a fixed number of times
//! and then stays visible. The scheduler never waits: the main loop calls
//! [`BlinkScheduler::tick`] once per iteration and asks
//! [`BlinkScheduler::is_visible`] whether to draw the text this frame.

use crate::time::{TimeDuration, TimeInstant};

/// State of a blink sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkState<I> {
    /// Not blinking. Text is always visible.
    Idle,
    /// Blink sequence in progress.
    Blinking {
        /// Time of the last visibility toggle.
        anchor: I,
        /// Toggles elapsed since the sequence began. Even phases are visible.
        phase: u16,
    },
}

/// Time-sliced visibility toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlinkScheduler<I: TimeInstant> {
    state: BlinkState<I>,
    interval: I::Duration,
    count: u8,
}

impl<I: TimeInstant> BlinkScheduler<I> {
    /// Creates an idle scheduler that blinks `count` times, each on and off
    /// half lasting `interval`.
    pub fn new(interval: I::Duration, count: u8) -> Self {
        Self {
            state: BlinkState::Idle,
            interval,
            count,
        }
    }

    /// Begins a fresh sequence at phase 0, anchored at `at`.
    ///
    /// Any sequence already in progress is abandoned. With a blink count of
    /// zero the scheduler stays idle.
    pub fn restart(&mut self, at: I) {
        if self.count == 0 {
            self.state = BlinkState::Idle;
            return;
        }
        self.state = BlinkState::Blinking {
            anchor: at,
            phase: 0,
        };
    }

    /// Advances the sequence. Call once per main-loop iteration.
    pub fn tick(&mut self, now: I) {
        let BlinkState::Blinking { anchor, phase } = self.state else {
            return;
        };

        if now.duration_since(anchor).as_millis() <= self.interval.as_millis() {
            return;
        }

        let phase = phase + 1;
        self.state = if phase > self.last_phase() {
            BlinkState::Idle
        } else {
            BlinkState::Blinking { anchor: now, phase }
        };
    }

    /// Returns true if the lap text should be drawn this frame.
    pub fn is_visible(&self) -> bool {
        match self.state {
            BlinkState::Idle => true,
            BlinkState::Blinking { phase, .. } => phase % 2 == 0,
        }
    }

    /// Returns true while a sequence is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, BlinkState::Blinking { .. })
    }

    /// Returns the current phase, or `None` when idle.
    pub fn phase(&self) -> Option<u16> {
        match self.state {
            BlinkState::Idle => None,
            BlinkState::Blinking { phase, .. } => Some(phase),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> BlinkState<I> {
        self.state
    }

    // Highest phase of a sequence: one on and one off per blink.
    // Never called with a zero count; restart() keeps such a scheduler idle.
    fn last_phase(&self) -> u16 {
        u16::from(self.count) * 2 - 1
    }
}
