#![no_std]

pub mod blend;
pub mod engine;
pub mod math8;
pub mod observer;
pub mod profile;
pub mod rgb;
pub mod scheduler;
pub mod signal;
pub mod sink;
pub mod time;

pub use blend::{BlendSteps, FieldSteps};
pub use engine::{
    DEFAULT_RAMP_DOWN, DEFAULT_RAMP_UP, DEFAULT_SAMPLING_INTERVAL, FaderConfig, PatternEngine,
    Phase,
};
#[cfg(feature = "esp32-log")]
pub use observer::PrintObserver;
pub use observer::{EventLog, PatternEvent, PatternObserver};
pub use profile::{PatternProfile, Polarity};
pub use rgb::{Channel, Rgb, RgbFader};
pub use scheduler::{SampleScheduler, TickResult};
pub use signal::ExcitementSignal;
pub use sink::{BrightnessSink, LevelLatch};
pub use time::Timestamp;

pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The RGB fader is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}

/// Anything that is advanced once per sampling interval
pub trait Pattern {
    fn advance(&mut self, now: Instant);
}
