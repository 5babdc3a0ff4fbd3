//! Main-loop driver tying the timer to its hardware.
//!
//! Provides [`Instrument`], which owns the edge source, display and buzzer,
//! and runs one non-blocking refresh per call to [`Instrument::tick`].

use crate::config::{EdgeMode, TimerConfig};
use crate::edge::EdgeSource;
use crate::output::{LapDisplay, Notifier, TextRegion, Tone};
use crate::time::{TimeInstant, TimeSource};
use crate::timer::{CaptureOutcome, Frame, LapTimer};

/// Upper bound on edges applied in a single tick, so a chattering sensor
/// cannot hold up the refresh.
pub const MAX_EDGES_PER_TICK: usize = 8;

/// Fatal startup failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupError<E> {
    /// The display driver failed to initialize.
    DisplayInit(E),
    /// The edge source does not implement the configured edge mode.
    EdgeModeMismatch {
        /// Mode requested by [`TimerConfig::edge_mode`].
        configured: EdgeMode,
        /// Mode of the edge source passed to [`Instrument::new`].
        source: EdgeMode,
    },
}

impl<E> StartupError<E> {
    /// Parks the device, calling `report` forever.
    ///
    /// A lap timer without a readable display is useless, so there is no
    /// way out of this state except a reset. `report` typically blinks an
    /// LED or writes the error to a debug probe.
    pub fn halt(self, mut report: impl FnMut(&Self)) -> ! {
        loop {
            report(&self);
        }
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for StartupError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StartupError::DisplayInit(err) => {
                write!(f, "display initialization failed: {:?}", err)
            }
            StartupError::EdgeModeMismatch { configured, source } => {
                write!(
                    f,
                    "edge mode mismatch: configured {:?}, source is {:?}",
                    configured, source
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for StartupError<E> {}

/// A complete lap-timing instrument.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `S` - Edge source ([`PolledEdge`](crate::PolledEdge) or [`LatchedEdges`](crate::LatchedEdges))
/// * `D` - Display implementation type
/// * `B` - Buzzer implementation type
pub struct Instrument<'t, I, T, S, D, B>
where
    I: TimeInstant,
    T: TimeSource<I>,
    S: EdgeSource<I>,
    D: LapDisplay,
    B: Notifier,
{
    time_source: &'t T,
    edges: S,
    display: D,
    notifier: B,
    timer: LapTimer<I>,
    tone: Tone,
}

impl<'t, I, T, S, D, B> Instrument<'t, I, T, S, D, B>
where
    I: TimeInstant,
    T: TimeSource<I>,
    S: EdgeSource<I>,
    D: LapDisplay,
    B: Notifier,
{
    /// Initializes the display and creates an idle instrument.
    ///
    /// # Errors
    /// * [`StartupError::EdgeModeMismatch`] if `edges` is not the kind of
    ///   source `config.edge_mode` asks for
    /// * [`StartupError::DisplayInit`] if the display does not come up
    ///
    /// Callers are expected to [`halt`](StartupError::halt) on either.
    pub fn new(
        config: &TimerConfig,
        time_source: &'t T,
        edges: S,
        mut display: D,
        notifier: B,
    ) -> Result<Self, StartupError<D::Error>> {
        if config.edge_mode != S::MODE {
            log_error!(
                "edge mode mismatch: configured {}, source {}",
                config.edge_mode,
                S::MODE
            );
            return Err(StartupError::EdgeModeMismatch {
                configured: config.edge_mode,
                source: S::MODE,
            });
        }

        if let Err(err) = display.init() {
            log_error!("display initialization failed");
            return Err(StartupError::DisplayInit(err));
        }

        log_info!(
            "lap timer ready: edge mode {}, hysteresis {=u64} ms",
            config.edge_mode,
            config.hysteresis_ms
        );

        Ok(Self {
            time_source,
            edges,
            display,
            notifier,
            timer: LapTimer::new(config, time_source.now()),
            tone: config.tone,
        })
    }

    /// Runs one main-loop iteration and returns the frame that was drawn.
    ///
    /// Pending edges are applied first, then the clock is sampled once and
    /// every derived value for the frame comes from that single sample.
    pub fn tick(&mut self) -> Frame {
        for _ in 0..MAX_EDGES_PER_TICK {
            let Some(at) = self.edges.next_edge() else {
                break;
            };
            let outcome = self.timer.capture_at(at);
            self.announce(&outcome);
        }

        self.timer.refresh(self.time_source.now());
        self.timer.tick_blink();

        let frame = self.timer.frame();
        self.render(&frame);
        frame
    }

    /// Ticks forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.tick();
        }
    }

    /// Returns the timer state.
    pub fn timer(&self) -> &LapTimer<I> {
        &self.timer
    }

    /// Returns the display driver.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Returns the buzzer driver.
    pub fn notifier(&self) -> &B {
        &self.notifier
    }

    fn announce(&mut self, outcome: &CaptureOutcome) {
        match outcome {
            CaptureOutcome::Started => log_info!("session started"),
            CaptureOutcome::Lap(text) => log_info!("lap {}", text),
            CaptureOutcome::Ignored => log_debug!("edge inside hysteresis window ignored"),
        }

        if outcome.is_notable() {
            self.notifier.play(self.tone);
        }
    }

    fn render(&mut self, frame: &Frame) {
        self.display.clear();
        self.display.draw_text(TextRegion::Elapsed, &frame.elapsed);
        if frame.lap_visible {
            self.display.draw_text(TextRegion::LastLap, &frame.last_lap);
        }
        self.display.flush();
    }
}
