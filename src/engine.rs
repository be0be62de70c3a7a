//! Excitable fading pattern engine
//!
//! The pattern cycles forever through four phases:
//!
//! ```text
//!                ____________
//!               /            \
//!              /              \
//!   __________/                \__________
//!      off     fade-in   on    fade-out
//! ```
//!
//! Every call to [`PatternEngine::advance`] first morphs the current timings
//! and peak one step toward the idle or the excited profile, then evaluates
//! the state machine. Blending happens in every phase, so a fade already in
//! progress speeds up or slows down without restarting.

use embassy_time::{Duration, Instant};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::Pattern;
use crate::blend::BlendSteps;
use crate::math8::{clamp_between, fade8};
use crate::observer::{PatternEvent, PatternObserver};
use crate::profile::{PatternProfile, Polarity};
use crate::signal::ExcitementSignal;
use crate::sink::BrightnessSink;
use crate::time::Timestamp;

/// Default cadence of `advance` calls
pub const DEFAULT_SAMPLING_INTERVAL: Duration = Duration::from_millis(100);
/// Default time to morph from idle to fully excited
pub const DEFAULT_RAMP_UP: Duration = Duration::from_millis(8_000);
/// Default time to relax from fully excited back to idle
pub const DEFAULT_RAMP_DOWN: Duration = Duration::from_millis(15_000);

const PHASE_NAME_OFF: &str = "off";
const PHASE_NAME_FADE_IN: &str = "fade_in";
const PHASE_NAME_ON: &str = "on";
const PHASE_NAME_FADE_OUT: &str = "fade_out";

/// Phase of the fading pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Off,
    FadeIn,
    On,
    FadeOut,
}

impl Phase {
    /// Phase that follows this one in the cycle
    pub const fn next(self) -> Self {
        match self {
            Self::Off => Self::FadeIn,
            Self::FadeIn => Self::On,
            Self::On => Self::FadeOut,
            Self::FadeOut => Self::Off,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => PHASE_NAME_OFF,
            Self::FadeIn => PHASE_NAME_FADE_IN,
            Self::On => PHASE_NAME_ON,
            Self::FadeOut => PHASE_NAME_FADE_OUT,
        }
    }
}

/// Configuration for a pattern engine
#[derive(Debug, Clone, Copy)]
pub struct FaderConfig {
    /// Relaxed behavior, used when not excited
    pub idle: PatternProfile,
    /// Fastest, brightest behavior
    pub excited: PatternProfile,
    /// Expected time between two `advance` calls
    pub sampling_interval: Duration,
    /// Time to morph from idle to excited
    pub ramp_up: Duration,
    /// Time to morph from excited back to idle
    pub ramp_down: Duration,
    /// Output level convention
    pub polarity: Polarity,
    /// Jump straight to full excitement instead of blending
    pub quick_ramp: bool,
    /// Seed for a random initial phase offset, to desynchronize channels
    pub jitter_seed: Option<u64>,
}

impl FaderConfig {
    /// Configuration with the default excited profile and timings
    pub const fn new(idle: PatternProfile, polarity: Polarity) -> Self {
        Self {
            idle,
            excited: PatternProfile::excited(polarity),
            sampling_interval: DEFAULT_SAMPLING_INTERVAL,
            ramp_up: DEFAULT_RAMP_UP,
            ramp_down: DEFAULT_RAMP_DOWN,
            polarity,
            quick_ramp: false,
            jitter_seed: None,
        }
    }
}

/// Fading pattern state machine driving a single brightness sink
///
/// `T` is the time source: an embassy [`Instant`] or a raw `u32`/`u64`
/// millisecond counter.
pub struct PatternEngine<S, T = Instant, O = ()> {
    // External dependencies
    sink: S,
    observer: O,

    // Configuration
    idle: PatternProfile,
    excited: PatternProfile,
    steps: BlendSteps,
    polarity: Polarity,
    quick_ramp: bool,

    // Internal state
    current: PatternProfile,
    phase: Phase,
    phase_start: T,
    is_excited: bool,
    holding: bool,
    last_advance: Option<T>,
}

impl<S: BrightnessSink, T: Timestamp> PatternEngine<S, T> {
    /// Create a new engine that does not report events
    pub fn new(sink: S, config: &FaderConfig, now: T) -> Self {
        Self::with_observer(sink, (), config, now)
    }
}

impl<S: BrightnessSink, T: Timestamp, O: PatternObserver> PatternEngine<S, T, O> {
    /// Create a new engine reporting events to `observer`
    ///
    /// The pattern starts in [`Phase::Off`] at `now`, or slightly earlier when
    /// a jitter seed is configured.
    pub fn with_observer(sink: S, observer: O, config: &FaderConfig, now: T) -> Self {
        let phase_start = match config.jitter_seed {
            Some(seed) => now.rewind(jitter(seed, config.idle.fade_in)),
            None => now,
        };
        Self {
            sink,
            observer,
            idle: config.idle,
            excited: config.excited,
            steps: BlendSteps::new(
                &config.idle,
                &config.excited,
                config.sampling_interval,
                config.ramp_up,
                config.ramp_down,
            ),
            polarity: config.polarity,
            quick_ramp: config.quick_ramp,
            current: config.idle,
            phase: Phase::Off,
            phase_start,
            is_excited: false,
            holding: false,
            last_advance: None,
        }
    }

    /// Set the excitement signal
    ///
    /// Takes effect on the next [`advance`](Self::advance).
    pub fn set_excited(&mut self, excited: bool) {
        if self.is_excited != excited {
            self.observer.on_event(PatternEvent::ExcitementChanged(excited));
        }
        self.is_excited = excited;
    }

    /// Copy the excitement flag from a shared signal
    pub fn follow(&mut self, signal: &ExcitementSignal) {
        self.set_excited(signal.is_set());
    }

    /// Process one sampling interval
    ///
    /// Call this once per configured sampling interval. A repeated call with
    /// the same timestamp still blends, but never changes phase.
    pub fn advance(&mut self, now: T) {
        let repeated = self
            .last_advance
            .is_some_and(|last| now.elapsed_since(last).as_ticks() == 0);
        self.last_advance = Some(now);

        self.blend();

        if self.is_excited && self.quick_ramp {
            self.hold_excited(now);
            return;
        }
        self.holding = false;

        let elapsed = now.elapsed_since(self.phase_start);
        let due = |duration: Duration| !repeated && elapsed >= duration;
        match self.phase {
            Phase::Off => {
                if due(self.current.off) {
                    self.enter_next_phase(now);
                } else {
                    self.sink.write(self.polarity.off_level());
                }
            }
            Phase::FadeIn => {
                if due(self.current.fade_in) {
                    self.enter_next_phase(now);
                    self.sink.write(self.current.peak);
                } else {
                    let level = self.fade_in_level(elapsed);
                    self.sink.write(level);
                }
            }
            Phase::On => {
                // Output already sits at the peak
                if due(self.current.on) {
                    self.enter_next_phase(now);
                    self.sink.write(self.current.peak);
                }
            }
            Phase::FadeOut => {
                if due(self.current.fade_out) {
                    self.enter_next_phase(now);
                    self.sink.write(self.polarity.off_level());
                } else {
                    let level = self.fade_out_level(elapsed);
                    self.sink.write(level);
                }
            }
        }
    }

    /// Move the current profile one step toward its target
    fn blend(&mut self) {
        let target = if self.is_excited {
            self.excited
        } else {
            self.idle
        };
        let changed = self
            .steps
            .apply(&mut self.current, &target, self.is_excited);
        if !changed {
            return;
        }
        self.observer.on_event(PatternEvent::ProfileBlended(self.current));
        if self.current == target {
            self.observer.on_event(PatternEvent::ProfileSettled {
                excited: self.is_excited,
            });
        }
    }

    /// Pin the pattern at full excitement
    fn hold_excited(&mut self, now: T) {
        if !self.holding {
            self.holding = true;
            self.observer.on_event(PatternEvent::QuickRampEngaged);
        }
        if self.phase != Phase::On {
            self.observer.on_event(PatternEvent::PhaseChanged {
                from: self.phase,
                to: Phase::On,
            });
            self.phase = Phase::On;
        }
        self.phase_start = now;
        self.current = self.current.with_durations_of(&self.excited);
        self.sink.write(self.excited.peak);
    }

    fn enter_next_phase(&mut self, now: T) {
        let next = self.phase.next();
        self.observer.on_event(PatternEvent::PhaseChanged {
            from: self.phase,
            to: next,
        });
        self.phase = next;
        self.phase_start = now;
    }

    fn fade_in_level(&self, elapsed: Duration) -> u8 {
        let off = self.polarity.off_level();
        let level = fade8(off, self.current.peak, elapsed, self.current.fade_in);
        clamp_between(level, off, self.current.peak)
    }

    fn fade_out_level(&self, elapsed: Duration) -> u8 {
        let off = self.polarity.off_level();
        let level = fade8(self.current.peak, off, elapsed, self.current.fade_out);
        clamp_between(level, self.current.peak, off)
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Timestamp at which the current phase began
    pub const fn phase_start(&self) -> T {
        self.phase_start
    }

    pub const fn is_excited(&self) -> bool {
        self.is_excited
    }

    /// Profile currently in effect, somewhere between idle and excited
    pub const fn current_profile(&self) -> &PatternProfile {
        &self.current
    }

    pub const fn idle_profile(&self) -> &PatternProfile {
        &self.idle
    }

    pub const fn excited_profile(&self) -> &PatternProfile {
        &self.excited
    }

    pub const fn blend_steps(&self) -> &BlendSteps {
        &self.steps
    }

    pub const fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub const fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Release the sink and the observer
    pub fn into_parts(self) -> (S, O) {
        (self.sink, self.observer)
    }
}

impl<S: BrightnessSink, O: PatternObserver> Pattern for PatternEngine<S, Instant, O> {
    fn advance(&mut self, now: Instant) {
        PatternEngine::advance(self, now);
    }
}

/// Random offset in `[0, bound)`
fn jitter(seed: u64, bound: Duration) -> Duration {
    if bound.as_ticks() == 0 {
        return Duration::from_ticks(0);
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    Duration::from_ticks(rng.random_range(0..bound.as_ticks()))
}
