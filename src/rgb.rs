//! RGB fader
//!
//! Drives a single RGB LED with three independent pattern engines, one per
//! color channel. All channels share the idle profile, while each one can be
//! excited on its own, so the LED drifts toward the color of whatever input
//! is active.

use embassy_time::Instant;
use smart_leds::RGB8;

use crate::engine::{FaderConfig, PatternEngine};
use crate::sink::LevelLatch;
use crate::{OutputDriver, Pattern};

pub type Rgb = RGB8;

/// Color channel of an RGB LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl Channel {
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    const fn index(self) -> usize {
        self as usize
    }
}

pub type ChannelEngine = PatternEngine<LevelLatch, Instant>;

/// Three pattern engines composed into one pixel
pub struct RgbFader<D: OutputDriver> {
    driver: D,
    channels: [ChannelEngine; 3],
}

impl<D: OutputDriver> RgbFader<D> {
    /// Create a new RGB fader
    ///
    /// With a jitter seed, every channel gets its own seed derived from it so
    /// the three channels start out of step.
    pub fn new(driver: D, config: &FaderConfig, now: Instant) -> Self {
        let channels = Channel::ALL.map(|channel| {
            let mut channel_config = *config;
            channel_config.jitter_seed = config
                .jitter_seed
                .map(|seed| seed.wrapping_add(channel.index() as u64));
            PatternEngine::new(
                LevelLatch::new(config.polarity.off_level()),
                &channel_config,
                now,
            )
        });
        Self { driver, channels }
    }

    /// Excite or relax one channel
    pub fn set_excited(&mut self, channel: Channel, excited: bool) {
        self.channels[channel.index()].set_excited(excited);
    }

    /// Advance all channels and write the composed pixel
    pub fn advance(&mut self, now: Instant) {
        for engine in &mut self.channels {
            engine.advance(now);
        }
        let pixel = self.pixel();
        self.driver.write(&[pixel]);
    }

    /// Pixel made of the last level of every channel
    ///
    /// Components are raw output levels in the configured polarity.
    pub fn pixel(&self) -> Rgb {
        let [red, green, blue] = &self.channels;
        Rgb {
            r: red.sink().level(),
            g: green.sink().level(),
            b: blue.sink().level(),
        }
    }

    pub fn engine(&self, channel: Channel) -> &ChannelEngine {
        &self.channels[channel.index()]
    }

    pub fn engine_mut(&mut self, channel: Channel) -> &mut ChannelEngine {
        &mut self.channels[channel.index()]
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }
}

impl<D: OutputDriver> Pattern for RgbFader<D> {
    fn advance(&mut self, now: Instant) {
        RgbFader::advance(self, now);
    }
}
