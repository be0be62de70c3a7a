//! Pattern profiles and output polarity
//!
//! A profile is one operating point of the pattern: four phase durations
//! plus the peak brightness reached between fade-in and fade-out.

use embassy_time::Duration;

/// Fade-in duration of the excited profile
pub const EXCITED_FADE_IN: Duration = Duration::from_millis(100);
/// On duration of the excited profile
pub const EXCITED_ON: Duration = Duration::from_millis(100);
/// Fade-out duration of the excited profile
pub const EXCITED_FADE_OUT: Duration = Duration::from_millis(100);
/// Off duration of the excited profile
pub const EXCITED_OFF: Duration = Duration::from_millis(200);

/// Output level convention of the brightness sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Higher levels are brighter: 0 is off, 255 is full brightness.
    ///
    /// Matches a common-cathode RGB LED driven straight from PWM pins.
    #[default]
    ActiveHigh,
    /// Lower levels are brighter: 255 is off, 0 is full brightness.
    ///
    /// Matches a common-anode RGB LED, where the pin sinks current.
    ActiveLow,
}

impl Polarity {
    /// Level that turns the output fully off
    pub const fn off_level(self) -> u8 {
        match self {
            Self::ActiveHigh => 0,
            Self::ActiveLow => u8::MAX,
        }
    }

    /// Level that drives the output at full brightness
    pub const fn full_level(self) -> u8 {
        match self {
            Self::ActiveHigh => u8::MAX,
            Self::ActiveLow => 0,
        }
    }
}

/// One operating point of the fading pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternProfile {
    /// Time spent ramping from off to peak
    pub fade_in: Duration,
    /// Time spent holding the peak
    pub on: Duration,
    /// Time spent ramping from peak back to off
    pub fade_out: Duration,
    /// Time spent fully off
    pub off: Duration,
    /// Level written while the pattern is on
    pub peak: u8,
}

impl PatternProfile {
    pub const fn new(
        fade_in: Duration,
        on: Duration,
        fade_out: Duration,
        off: Duration,
        peak: u8,
    ) -> Self {
        Self {
            fade_in,
            on,
            fade_out,
            off,
            peak,
        }
    }

    /// Fastest, brightest profile for the given output polarity
    pub const fn excited(polarity: Polarity) -> Self {
        Self::new(
            EXCITED_FADE_IN,
            EXCITED_ON,
            EXCITED_FADE_OUT,
            EXCITED_OFF,
            polarity.full_level(),
        )
    }

    /// Copy of this profile with the durations of `other`
    pub(crate) const fn with_durations_of(self, other: &Self) -> Self {
        Self {
            fade_in: other.fade_in,
            on: other.on,
            fade_out: other.fade_out,
            off: other.off,
            peak: self.peak,
        }
    }

    /// Total length of one off/fade-in/on/fade-out cycle
    pub fn cycle(&self) -> Duration {
        self.fade_in + self.on + self.fade_out + self.off
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_levels() {
        assert_eq!(Polarity::ActiveHigh.off_level(), 0);
        assert_eq!(Polarity::ActiveHigh.full_level(), 255);
        assert_eq!(Polarity::ActiveLow.off_level(), 255);
        assert_eq!(Polarity::ActiveLow.full_level(), 0);
    }

    #[test]
    fn test_excited_peak_follows_polarity() {
        assert_eq!(PatternProfile::excited(Polarity::ActiveHigh).peak, 255);
        assert_eq!(PatternProfile::excited(Polarity::ActiveLow).peak, 0);
        assert_eq!(
            PatternProfile::excited(Polarity::ActiveLow).cycle(),
            Duration::from_millis(500)
        );
    }
}
