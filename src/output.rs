//! Display and buzzer abstraction traits.
//!
//! The timer never touches pixels or PWM directly. Implement [`LapDisplay`]
//! for your screen (SSD1306, ST7735, ...) and [`Notifier`] for your buzzer.

/// The two fixed text positions on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextRegion {
    /// Running time of the current lap.
    Elapsed,
    /// Duration of the last completed lap.
    LastLap,
}

/// Trait for abstracting the bitmap display.
pub trait LapDisplay {
    /// Initialization error reported by the driver.
    type Error;

    /// Brings up the display. Called once at startup.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Clears the frame buffer.
    fn clear(&mut self);

    /// Draws `text` at the position assigned to `region`.
    fn draw_text(&mut self, region: TextRegion, text: &str);

    /// Pushes the frame buffer to the panel.
    ///
    /// Must be bounded in time; the main loop calls it every iteration.
    fn flush(&mut self);
}

/// A fixed frequency and duration pair for the buzzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tone {
    frequency_hz: u32,
    duration_ms: u32,
}

impl Tone {
    /// Creates a tone.
    pub const fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }

    /// Tone frequency in hertz.
    pub const fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    /// Tone length in milliseconds.
    pub const fn duration_ms(&self) -> u32 {
        self.duration_ms
    }
}

/// Trait for abstracting the buzzer.
pub trait Notifier {
    /// Starts playing `tone` and returns without waiting for it to finish.
    fn play(&mut self, tone: Tone);
}

