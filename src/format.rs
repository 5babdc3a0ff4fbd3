//! Duration formatting for the readout.

use core::fmt::{self, Write};
use core::ops::Deref;
use heapless::String;

/// Length of a formatted duration, `MM:SS:CC`.
pub const LAP_TEXT_LEN: usize = 8;

/// A duration rendered as `MM:SS:CC` (minutes, seconds, centiseconds).
///
/// Always exactly [`LAP_TEXT_LEN`] ASCII characters. The only ways to build
/// one are [`format_duration`] and [`LapText::zero`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LapText(String<LAP_TEXT_LEN>);

impl LapText {
    /// `"00:00:00"`.
    pub fn zero() -> Self {
        format_duration(0)
    }

    /// Returns the text as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for LapText {
    fn default() -> Self {
        Self::zero()
    }
}

impl Deref for LapText {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<&str> for LapText {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<str> for LapText {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl fmt::Display for LapText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LapText {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str())
    }
}

/// Formats a millisecond duration as `MM:SS:CC`.
///
/// Milliseconds are truncated to centiseconds. Both the seconds and the
/// minutes field wrap at 60, so an hour-long lap reads `00:00:00` again.
pub fn format_duration(millis: u64) -> LapText {
    let centis = millis / 10;
    let cs = centis % 100;
    let secs = (centis / 100) % 60;
    let mins = (centis / 6_000) % 60;

    let mut text = String::new();
    // Every field is below 100, so the output is exactly LAP_TEXT_LEN bytes
    // and cannot overflow the buffer.
    let _ = write!(text, "{:02}:{:02}:{:02}", mins, secs, cs);
    LapText(text)
}
