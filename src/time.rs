//! Time abstraction traits for platform-agnostic timing.
//!
//! Also provides [`MillisInstant`] / [`MillisDuration`], a ready-made pair for
//! the common case of a wrapping 32-bit millisecond tick counter, and
//! [`MillisCounter`], an interrupt-driven source for it.

use core::cell::Cell;
use critical_section::Mutex;

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Implementations must return [`TimeDuration::ZERO`] rather than panic
    /// when `earlier` is actually later than `self`.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// Millisecond duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MillisDuration(pub u64);

impl TimeDuration for MillisDuration {
    const ZERO: Self = MillisDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        MillisDuration(millis)
    }
}

/// Point in time on a wrapping 32-bit millisecond counter.
///
/// The counter wraps after ~49.7 days. Differences are computed with
/// wrapping arithmetic, so a lap spanning the wrap is still measured
/// correctly. A difference larger than half the counter range is taken to
/// mean `earlier` is in the future and saturates to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MillisInstant(pub u32);

impl MillisInstant {
    /// Returns the raw counter value.
    pub fn as_millis(&self) -> u32 {
        self.0
    }
}

impl TimeInstant for MillisInstant {
    type Duration = MillisDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        let diff = self.0.wrapping_sub(earlier.0);
        if diff > u32::MAX / 2 {
            MillisDuration::ZERO
        } else {
            MillisDuration(diff as u64)
        }
    }
}

/// Millisecond counter advanced from a periodic 1 kHz interrupt.
///
/// Place it in a `static`, call [`tick`](Self::tick) from the SysTick (or
/// equivalent) handler and hand a reference to the main loop as its
/// [`TimeSource`].
pub struct MillisCounter {
    millis: Mutex<Cell<u32>>,
}

impl MillisCounter {
    /// Creates a counter starting at zero.
    pub const fn new() -> Self {
        Self {
            millis: Mutex::new(Cell::new(0)),
        }
    }

    /// Advances the counter by one millisecond, wrapping on overflow.
    pub fn tick(&self) {
        critical_section::with(|cs| {
            let counter = self.millis.borrow(cs);
            counter.set(counter.get().wrapping_add(1));
        });
    }
}

impl Default for MillisCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource<MillisInstant> for MillisCounter {
    fn now(&self) -> MillisInstant {
        critical_section::with(|cs| MillisInstant(self.millis.borrow(cs).get()))
    }
}
