//! Shared test infrastructure for lap-timer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use core::convert::Infallible;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin};
use heapless::String;
use lap_timer::{LapDisplay, Notifier, TextRegion, TimeDuration, TimeInstant, TimeSource, Tone};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, millis: u64) {
        self.current_time.set(TestInstant(millis));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Display
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayUnavailable;

/// Mock display that records what was drawn since the last clear
pub struct MockDisplay {
    fail_init: bool,
    pub initialized: bool,
    pub clears: u32,
    pub flushes: u32,
    drawn: heapless::Vec<(TextRegion, String<8>), 4>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            fail_init: false,
            initialized: false,
            clears: 0,
            flushes: 0,
            drawn: heapless::Vec::new(),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_init: true,
            ..Self::new()
        }
    }

    /// Text drawn in `region` during the current frame, if any
    pub fn text_in(&self, region: TextRegion) -> Option<&str> {
        self.drawn
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, text)| text.as_str())
    }
}

impl LapDisplay for MockDisplay {
    type Error = DisplayUnavailable;

    fn init(&mut self) -> Result<(), Self::Error> {
        if self.fail_init {
            return Err(DisplayUnavailable);
        }
        self.initialized = true;
        Ok(())
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.drawn.clear();
    }

    fn draw_text(&mut self, region: TextRegion, text: &str) {
        let mut owned = String::new();
        let _ = owned.push_str(text);
        let _ = self.drawn.push((region, owned));
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

// ============================================================================
// Mock Buzzer
// ============================================================================

/// Mock buzzer that records every tone request
pub struct MockNotifier {
    tones: heapless::Vec<Tone, 32>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            tones: heapless::Vec::new(),
        }
    }

    pub fn tones(&self) -> &[Tone] {
        &self.tones
    }
}

impl Notifier for MockNotifier {
    fn play(&mut self, tone: Tone) {
        let _ = self.tones.push(tone);
    }
}

// ============================================================================
// Mock Sensor Pins
// ============================================================================

/// Input pin whose level is controlled through a shared cell
pub struct MockPin<'a> {
    level: &'a Cell<bool>,
}

impl<'a> MockPin<'a> {
    pub fn new(level: &'a Cell<bool>) -> Self {
        Self { level }
    }
}

impl ErrorType for MockPin<'_> {
    type Error = Infallible;
}

impl InputPin for MockPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level.get())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Input pin that can be switched into a failing state
pub struct FlakyPin<'a> {
    level: &'a Cell<bool>,
    failing: &'a Cell<bool>,
}

impl<'a> FlakyPin<'a> {
    pub fn new(level: &'a Cell<bool>, failing: &'a Cell<bool>) -> Self {
        Self { level, failing }
    }
}

impl ErrorType for FlakyPin<'_> {
    type Error = PinFault;
}

impl InputPin for FlakyPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.failing.get() {
            return Err(PinFault);
        }
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}
