//! Falling-edge capture from the break-beam sensor.
//!
//! Two interchangeable [`EdgeSource`] implementations feed the timer:
//!
//! - [`PolledEdge`] samples an [`InputPin`] once per main-loop iteration
//!   (busy-poll mode).
//! - [`EdgeLatch`] is filled from a pin interrupt and drained by the main
//!   loop through [`LatchedEdges`] (interrupt mode).
//!
//! Either way the timer only ever sees timestamps of falling edges, i.e. the
//! moment the beam was broken.

use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal::digital::InputPin;
use heapless::Deque;

use crate::config::EdgeMode;
use crate::time::{TimeInstant, TimeSource};

/// A transition of the sensor signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Beam went from intact to broken. An object is in the gate.
    Falling,
    /// Beam went from broken to intact.
    Rising,
}

/// Turns a stream of level samples into edges.
///
/// The first sample only seeds the detector, so a beam that is already
/// blocked at power-up does not count as a crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeDetector {
    last_intact: Option<bool>,
}

impl EdgeDetector {
    /// Creates an unseeded detector.
    pub const fn new() -> Self {
        Self { last_intact: None }
    }

    /// Feeds one sample, `true` meaning the beam is intact.
    pub fn update(&mut self, intact: bool) -> Option<Edge> {
        let previous = self.last_intact.replace(intact)?;
        match (previous, intact) {
            (true, false) => Some(Edge::Falling),
            (false, true) => Some(Edge::Rising),
            _ => None,
        }
    }
}

/// Source of falling-edge timestamps.
pub trait EdgeSource<I: TimeInstant> {
    /// Delivery mode this source implements. Checked against
    /// [`TimerConfig::edge_mode`](crate::TimerConfig::edge_mode) at startup.
    const MODE: EdgeMode;

    /// Returns the time of the next pending falling edge, if any.
    ///
    /// Every returned instant must not be later than a clock sample taken
    /// after this call returns.
    fn next_edge(&mut self) -> Option<I>;
}

/// Busy-poll edge source.
///
/// Samples the pin on every [`next_edge`](EdgeSource::next_edge) call and
/// stamps falling edges with the clock. Rising edges are dropped. A failed
/// pin read counts as "no change".
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `P` - Sensor input pin
/// * `I` - Time instant type
/// * `T` - Time source implementation type
pub struct PolledEdge<'t, P: InputPin, I: TimeInstant, T: TimeSource<I>> {
    pin: P,
    time_source: &'t T,
    detector: EdgeDetector,
    intact_high: bool,
    _instant: core::marker::PhantomData<I>,
}

impl<'t, P: InputPin, I: TimeInstant, T: TimeSource<I>> PolledEdge<'t, P, I, T> {
    /// Creates a poller for a sensor that drives the pin high while the beam
    /// is intact.
    pub fn new(pin: P, time_source: &'t T) -> Self {
        Self {
            pin,
            time_source,
            detector: EdgeDetector::new(),
            intact_high: true,
            _instant: core::marker::PhantomData,
        }
    }

    /// Treats a low pin as "beam intact" instead.
    pub fn inverted(mut self) -> Self {
        self.intact_high = !self.intact_high;
        self
    }

    /// Releases the pin.
    pub fn into_pin(self) -> P {
        self.pin
    }
}

impl<P: InputPin, I: TimeInstant, T: TimeSource<I>> EdgeSource<I> for PolledEdge<'_, P, I, T> {
    const MODE: EdgeMode = EdgeMode::Poll;

    fn next_edge(&mut self) -> Option<I> {
        let high = self.pin.is_high().ok()?;
        match self.detector.update(high == self.intact_high) {
            Some(Edge::Falling) => Some(self.time_source.now()),
            _ => None,
        }
    }
}

/// Interrupt-fed queue of falling-edge timestamps.
///
/// Meant to live in a `static`. The pin interrupt calls
/// [`record`](Self::record) with the current time. The main loop drains the
/// queue through [`edges`](Self::edges). Each side holds the critical section
/// for a single push or pop only.
///
/// ```ignore
/// static EDGES: EdgeLatch<MillisInstant, 4> = EdgeLatch::new();
///
/// #[interrupt]
/// fn EXTI0_1() {
///     clear_pending();
///     EDGES.record(CLOCK.now());
/// }
/// ```
pub struct EdgeLatch<I, const N: usize> {
    pending: Mutex<RefCell<Deque<I, N>>>,
}

impl<I: TimeInstant, const N: usize> EdgeLatch<I, N> {
    /// Creates an empty latch.
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Queues an edge. Returns false, dropping the edge, if the queue is full.
    pub fn record(&self, at: I) -> bool {
        critical_section::with(|cs| self.pending.borrow_ref_mut(cs).push_back(at).is_ok())
    }

    /// Removes the oldest queued edge.
    pub fn take(&self) -> Option<I> {
        critical_section::with(|cs| self.pending.borrow_ref_mut(cs).pop_front())
    }

    /// Number of queued edges.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.pending.borrow_ref(cs).len())
    }

    /// Returns true if no edges are queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Main-loop view of the latch.
    pub fn edges(&self) -> LatchedEdges<'_, I, N> {
        LatchedEdges { latch: self }
    }
}

impl<I: TimeInstant, const N: usize> Default for EdgeLatch<I, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// [`EdgeSource`] that drains an [`EdgeLatch`] in arrival order.
pub struct LatchedEdges<'a, I, const N: usize> {
    latch: &'a EdgeLatch<I, N>,
}

impl<I: TimeInstant, const N: usize> EdgeSource<I> for LatchedEdges<'_, I, N> {
    const MODE: EdgeMode = EdgeMode::Interrupt;

    fn next_edge(&mut self) -> Option<I> {
        self.latch.take()
    }
}
