//! Brightness sinks
//!
//! A sink receives one brightness level per write and applies it to the
//! hardware (a PWM channel, a pixel component, ...). Writes cannot fail.

/// Output channel accepting a brightness level
///
/// Implement this trait for each platform's PWM or LED output.
pub trait BrightnessSink {
    /// Apply a brightness level to the output
    fn write(&mut self, level: u8);
}

impl<S: BrightnessSink + ?Sized> BrightnessSink for &mut S {
    fn write(&mut self, level: u8) {
        (**self).write(level);
    }
}

/// Sink that keeps the last written level
///
/// Used to compose several engines into one pixel, and handy in tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelLatch {
    level: u8,
    writes: u32,
}

impl LevelLatch {
    /// Create a latch holding `initial` until the first write
    pub const fn new(initial: u8) -> Self {
        Self {
            level: initial,
            writes: 0,
        }
    }

    /// Last written level
    pub const fn level(&self) -> u8 {
        self.level
    }

    /// Number of writes so far (wrapping)
    pub const fn writes(&self) -> u32 {
        self.writes
    }
}

impl BrightnessSink for LevelLatch {
    fn write(&mut self, level: u8) {
        self.level = level;
        self.writes = self.writes.wrapping_add(1);
    }
}
