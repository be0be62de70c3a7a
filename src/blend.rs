//! Per-sample blending between the idle and excited profiles
//!
//! Step sizes are derived once from the two profiles so that a full
//! idle-to-excited morph takes the ramp-up window and the way back takes the
//! ramp-down window, assuming `advance` runs once per sampling interval.

use embassy_time::Duration;

use crate::profile::PatternProfile;

/// Smallest per-sample change of a duration field
const MIN_DURATION_STEP: Duration = Duration::from_millis(1);

/// Change applied to each profile field per sampling interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSteps {
    pub fade_in: Duration,
    pub on: Duration,
    pub fade_out: Duration,
    pub off: Duration,
    pub peak: u8,
}

/// Step sizes toward the excited profile (`up`) and back to idle (`down`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendSteps {
    pub up: FieldSteps,
    pub down: FieldSteps,
}

impl FieldSteps {
    fn derive(
        idle: &PatternProfile,
        excited: &PatternProfile,
        sampling: Duration,
        window: Duration,
    ) -> Self {
        Self {
            fade_in: duration_step(idle.fade_in, excited.fade_in, sampling, window),
            on: duration_step(idle.on, excited.on, sampling, window),
            fade_out: duration_step(idle.fade_out, excited.fade_out, sampling, window),
            off: duration_step(idle.off, excited.off, sampling, window),
            peak: brightness_step(idle.peak, excited.peak, sampling, window),
        }
    }
}

impl BlendSteps {
    /// Derive step sizes for the given profiles and ramp windows
    ///
    /// A zero window makes the corresponding direction instantaneous.
    /// Equal profiles produce a flat blend.
    pub fn new(
        idle: &PatternProfile,
        excited: &PatternProfile,
        sampling: Duration,
        ramp_up: Duration,
        ramp_down: Duration,
    ) -> Self {
        Self {
            up: FieldSteps::derive(idle, excited, sampling, ramp_up),
            down: FieldSteps::derive(idle, excited, sampling, ramp_down),
        }
    }

    /// Move `current` one step toward `target`, never past it
    ///
    /// Returns `true` if any field changed.
    pub(crate) fn apply(
        &self,
        current: &mut PatternProfile,
        target: &PatternProfile,
        toward_excited: bool,
    ) -> bool {
        let steps = if toward_excited { &self.up } else { &self.down };
        let before = *current;

        current.fade_in = approach_duration(current.fade_in, target.fade_in, steps.fade_in);
        current.on = approach_duration(current.on, target.on, steps.on);
        current.fade_out = approach_duration(current.fade_out, target.fade_out, steps.fade_out);
        current.off = approach_duration(current.off, target.off, steps.off);
        current.peak = approach_level(current.peak, target.peak, steps.peak);

        before != *current
    }
}

/// `max(1 ms, |idle - excited| * sampling / window)`
fn duration_step(idle: Duration, excited: Duration, sampling: Duration, window: Duration) -> Duration {
    let distance = u128::from(idle.as_ticks().abs_diff(excited.as_ticks()));
    let window = u128::from(window.as_ticks());
    let ticks = if window == 0 {
        distance
    } else {
        distance * u128::from(sampling.as_ticks()) / window
    };
    let step = Duration::from_ticks(u64::try_from(ticks).unwrap_or(u64::MAX));
    step.max(MIN_DURATION_STEP)
}

/// `ceil(|idle - excited| * sampling / window)`
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn brightness_step(idle: u8, excited: u8, sampling: Duration, window: Duration) -> u8 {
    let distance = idle.abs_diff(excited);
    if window.as_ticks() == 0 {
        return distance;
    }
    let exact = f64::from(distance) * sampling.as_ticks() as f64 / window.as_ticks() as f64;
    libm::ceil(exact).min(f64::from(u8::MAX)) as u8
}

fn approach_duration(current: Duration, target: Duration, step: Duration) -> Duration {
    let (current, target, step) = (current.as_ticks(), target.as_ticks(), step.as_ticks());
    let next = if current < target {
        current.saturating_add(step).min(target)
    } else {
        current.saturating_sub(step).max(target)
    };
    Duration::from_ticks(next)
}

const fn approach_level(current: u8, target: u8, step: u8) -> u8 {
    if current < target {
        let next = current.saturating_add(step);
        if next > target { target } else { next }
    } else {
        let next = current.saturating_sub(step);
        if next < target { target } else { next }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_duration_step_scales_with_window() {
        assert_eq!(duration_step(ms(2000), ms(100), ms(100), ms(2000)), ms(95));
        let down = duration_step(ms(2000), ms(100), ms(100), ms(15000));
        assert!(down > ms(12) && down < ms(13));
    }

    #[test]
    fn test_duration_step_has_floor() {
        assert_eq!(duration_step(ms(100), ms(100), ms(100), ms(2000)), ms(1));
        // A 10 ms gap over a 15 s window still moves a whole millisecond per sample
        assert_eq!(duration_step(ms(210), ms(200), ms(100), ms(15000)), ms(1));
        // Misconfigured idle shorter than excited still yields a positive step
        assert_eq!(duration_step(ms(50), ms(100), ms(100), ms(1000)), ms(5));
    }

    #[test]
    fn test_zero_window_is_instant() {
        assert_eq!(duration_step(ms(2000), ms(100), ms(100), ms(0)), ms(1900));
        assert_eq!(brightness_step(200, 255, ms(100), ms(0)), 55);
    }

    #[test]
    fn test_brightness_step_rounds_up() {
        assert_eq!(brightness_step(200, 255, ms(100), ms(2000)), 3);
        assert_eq!(brightness_step(200, 255, ms(100), ms(15000)), 1);
        assert_eq!(brightness_step(200, 200, ms(100), ms(15000)), 0);
        assert_eq!(brightness_step(255, 0, ms(100), ms(1000)), 26);
    }

    #[test]
    fn test_approach_never_crosses_target() {
        assert_eq!(approach_level(250, 255, 3), 253);
        assert_eq!(approach_level(254, 255, 3), 255);
        assert_eq!(approach_level(2, 0, 3), 0);
        assert_eq!(approach_duration(ms(150), ms(100), ms(95)), ms(100));
        assert_eq!(approach_duration(ms(50), ms(100), ms(95)), ms(100));
    }
}
