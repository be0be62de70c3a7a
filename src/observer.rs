//! Observation of pattern events
//!
//! The engine never prints. Phase transitions and parameter events are
//! reported to a [`PatternObserver`] chosen by the application: `()` ignores
//! them, [`EventLog`] buffers them for later draining, and `PrintObserver`
//! (feature `esp32-log`) prints them over the ESP32 serial console.

use heapless::Deque;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::engine::Phase;
use crate::profile::PatternProfile;

/// Print one out of this many blend events
#[cfg(feature = "esp32-log")]
const PRINT_BLEND_EVERY: u32 = 10;

/// Something the pattern engine did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternEvent {
    /// The state machine moved to the next phase
    PhaseChanged { from: Phase, to: Phase },
    /// The excitement flag flipped
    ExcitementChanged(bool),
    /// Quick ramp took over and pinned the pattern at full excitement
    QuickRampEngaged,
    /// Blending reached its target profile
    ProfileSettled { excited: bool },
    /// Blending moved the current profile; carries the new values
    ProfileBlended(PatternProfile),
}

/// Receiver of pattern events
pub trait PatternObserver {
    fn on_event(&mut self, event: PatternEvent);
}

impl PatternObserver for () {
    fn on_event(&mut self, _event: PatternEvent) {}
}

impl<O: PatternObserver + ?Sized> PatternObserver for &mut O {
    fn on_event(&mut self, event: PatternEvent) {
        (**self).on_event(event);
    }
}

/// Fixed-capacity event buffer
///
/// When full, the oldest event is discarded to make room.
#[derive(Debug, Default)]
pub struct EventLog<const N: usize> {
    events: Deque<PatternEvent, N>,
    dropped: u32,
}

impl<const N: usize> EventLog<N> {
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
            dropped: 0,
        }
    }

    /// Take the oldest buffered event
    pub fn pop(&mut self) -> Option<PatternEvent> {
        self.events.pop_front()
    }

    /// Iterate buffered events, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &PatternEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events discarded because the buffer had no room
    pub const fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }
}

impl<const N: usize> PatternObserver for EventLog<N> {
    fn on_event(&mut self, event: PatternEvent) {
        if N == 0 {
            self.dropped = self.dropped.wrapping_add(1);
            return;
        }
        if self.events.is_full() {
            self.events.pop_front();
            self.dropped = self.dropped.wrapping_add(1);
        }
        if self.events.push_back(event).is_err() {
            self.dropped = self.dropped.wrapping_add(1);
        }
    }
}

/// Prints events, prefixed with a channel label
///
/// Blend events arrive every sample while morphing, so only one in
/// `PRINT_BLEND_EVERY` is printed.
#[cfg(feature = "esp32-log")]
#[derive(Debug, Clone)]
pub struct PrintObserver {
    label: &'static str,
    blends: u32,
}

#[cfg(feature = "esp32-log")]
impl PrintObserver {
    pub const fn new(label: &'static str) -> Self {
        Self { label, blends: 0 }
    }
}

#[cfg(feature = "esp32-log")]
impl PatternObserver for PrintObserver {
    fn on_event(&mut self, event: PatternEvent) {
        match event {
            PatternEvent::PhaseChanged { from, to } => {
                println!("[{}] {} -> {}", self.label, from.as_str(), to.as_str());
            }
            PatternEvent::ExcitementChanged(excited) => {
                println!("[{}] excited: {}", self.label, excited);
            }
            PatternEvent::QuickRampEngaged => {
                println!("[{}] quick ramp engaged", self.label);
            }
            PatternEvent::ProfileSettled { excited } => {
                let target = if excited { "excited" } else { "idle" };
                println!("[{}] settled at {} profile", self.label, target);
            }
            PatternEvent::ProfileBlended(profile) => {
                self.blends = self.blends.wrapping_add(1);
                if self.blends % PRINT_BLEND_EVERY == 0 {
                    println!(
                        "[{}] fade_in={}ms on={}ms fade_out={}ms off={}ms peak={}",
                        self.label,
                        profile.fade_in.as_millis(),
                        profile.on.as_millis(),
                        profile.fade_out.as_millis(),
                        profile.off.as_millis(),
                        profile.peak
                    );
                }
            }
        }
    }
}
