//! Timestamps accepted by the pattern engine
//!
//! Counters are free-running and may wrap, so elapsed time is always a
//! wrapping subtraction in the counter's own width.

use embassy_time::{Duration, Instant};

/// A monotonically increasing, possibly wrapping, time counter
pub trait Timestamp: Copy {
    /// Time elapsed from `earlier` to `self`
    fn elapsed_since(self, earlier: Self) -> Duration;

    /// Timestamp lying `by` before `self`
    fn rewind(self, by: Duration) -> Self;
}

impl Timestamp for Instant {
    fn elapsed_since(self, earlier: Self) -> Duration {
        Duration::from_ticks(self.as_ticks().wrapping_sub(earlier.as_ticks()))
    }

    fn rewind(self, by: Duration) -> Self {
        Instant::from_ticks(self.as_ticks().wrapping_sub(by.as_ticks()))
    }
}

/// Millisecond counter, as returned by Arduino-style `millis()`
impl Timestamp for u32 {
    fn elapsed_since(self, earlier: Self) -> Duration {
        Duration::from_millis(u64::from(self.wrapping_sub(earlier)))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn rewind(self, by: Duration) -> Self {
        self.wrapping_sub(by.as_millis() as u32)
    }
}

/// Millisecond counter
impl Timestamp for u64 {
    fn elapsed_since(self, earlier: Self) -> Duration {
        Duration::from_millis(self.wrapping_sub(earlier))
    }

    fn rewind(self, by: Duration) -> Self {
        self.wrapping_sub(by.as_millis())
    }
}
