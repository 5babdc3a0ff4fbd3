//! Build-time configuration for the lap timer.
//!
//! All values are meant to be fixed at compile time, typically as a single
//! `const` in the firmware crate:
//!
//! ```
//! use lap_timer::{EdgeMode, TimerConfig};
//!
//! const CONFIG: TimerConfig = TimerConfig::DEFAULT
//!     .with_hysteresis_ms(3_000)
//!     .with_edge_mode(EdgeMode::Poll);
//! ```

use crate::output::Tone;

/// Minimum time between two gate crossings for the second to count as a lap.
pub const DEFAULT_HYSTERESIS_MS: u64 = 4_000;

/// Time each half of a blink (on or off) lasts.
pub const DEFAULT_BLINK_INTERVAL_MS: u64 = 250;

/// Number of times the lap readout blinks after a new lap.
pub const DEFAULT_BLINK_COUNT: u8 = 3;

/// Chirp played on start and on every lap.
pub const DEFAULT_TONE: Tone = Tone::new(4_000, 60);

/// How falling edges reach the timer.
///
/// Each [`EdgeSource`](crate::EdgeSource) declares the mode it implements;
/// [`Instrument::new`](crate::Instrument::new) refuses a source whose mode
/// differs from [`TimerConfig::edge_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeMode {
    /// A pin interrupt records edges into an [`EdgeLatch`](crate::EdgeLatch).
    Interrupt,
    /// The main loop samples the pin every iteration via [`PolledEdge`](crate::PolledEdge).
    Poll,
}

/// Timer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    /// Debounce window in milliseconds.
    pub hysteresis_ms: u64,
    /// Blink half-period in milliseconds.
    pub blink_interval_ms: u64,
    /// Number of on/off blinks after each lap. Zero disables blinking.
    pub blink_count: u8,
    /// Tone played for every genuine start or lap.
    pub tone: Tone,
    /// Edge delivery mode.
    pub edge_mode: EdgeMode,
}

impl TimerConfig {
    /// Default configuration.
    pub const DEFAULT: Self = Self {
        hysteresis_ms: DEFAULT_HYSTERESIS_MS,
        blink_interval_ms: DEFAULT_BLINK_INTERVAL_MS,
        blink_count: DEFAULT_BLINK_COUNT,
        tone: DEFAULT_TONE,
        edge_mode: EdgeMode::Interrupt,
    };

    /// Sets the debounce window.
    pub const fn with_hysteresis_ms(mut self, hysteresis_ms: u64) -> Self {
        self.hysteresis_ms = hysteresis_ms;
        self
    }

    /// Sets the blink half-period and repeat count.
    pub const fn with_blink(mut self, interval_ms: u64, count: u8) -> Self {
        self.blink_interval_ms = interval_ms;
        self.blink_count = count;
        self
    }

    /// Sets the notification tone.
    pub const fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    /// Sets the edge delivery mode.
    pub const fn with_edge_mode(mut self, edge_mode: EdgeMode) -> Self {
        self.edge_mode = edge_mode;
        self
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
