//! Sample scheduling and timing utilities.
//!
//! Provides portable pacing of pattern updates without async/await or
//! platform-specific timers. The caller is responsible for sleeping between
//! samples.

use embassy_time::{Duration, Instant};

use crate::Pattern;
use crate::engine::DEFAULT_SAMPLING_INTERVAL;

/// Result of a scheduler tick.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next sample.
    pub next_deadline: Instant,
    /// How long to wait until the next sample (zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable scheduler that advances a pattern at a fixed cadence.
///
/// This scheduler:
/// - Tracks sample timing with drift correction
/// - Advances the pattern
/// - Returns timing info so the caller can sleep appropriately
///
/// Blend step sizes assume the pattern is advanced once per sampling
/// interval, so pace it with the same interval it was configured with.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = SampleScheduler::new(fader);
///
/// loop {
///     let now = get_current_time_ms();
///     let result = scheduler.tick(Instant::from_millis(now));
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct SampleScheduler<P: Pattern> {
    pattern: P,
    next_sample: Option<Instant>,
    interval: Duration,
}

impl<P: Pattern> SampleScheduler<P> {
    /// Create a new scheduler.
    ///
    /// Uses `DEFAULT_SAMPLING_INTERVAL` (100 ms).
    pub fn new(pattern: P) -> Self {
        Self::with_interval(pattern, DEFAULT_SAMPLING_INTERVAL)
    }

    /// Create a new scheduler with a custom sampling interval.
    pub fn with_interval(pattern: P, interval: Duration) -> Self {
        Self {
            pattern,
            next_sample: None,
            interval,
        }
    }

    /// Advance the pattern once and return timing information.
    ///
    /// This method:
    /// 1. Resets the schedule if we've fallen more than two intervals behind
    /// 2. Advances the pattern
    /// 3. Returns the deadline for the next sample
    pub fn tick(&mut self, now: Instant) -> TickResult {
        // Skip the backlog after a long stall instead of bursting through it
        let max_drift = self.interval + self.interval;
        let scheduled = match self.next_sample {
            Some(deadline) if now <= deadline + max_drift => deadline,
            _ => now,
        };

        self.pattern.advance(now);

        let next_deadline = scheduled + self.interval;
        self.next_sample = Some(next_deadline);

        let sleep_duration = if next_deadline > now {
            next_deadline - now
        } else {
            Duration::from_ticks(0)
        };

        TickResult {
            next_deadline,
            sleep_duration,
        }
    }

    /// Sampling interval used for pacing.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Get a reference to the pattern.
    pub fn pattern(&self) -> &P {
        &self.pattern
    }

    /// Get a mutable reference to the pattern.
    pub fn pattern_mut(&mut self) -> &mut P {
        &mut self.pattern
    }
}
