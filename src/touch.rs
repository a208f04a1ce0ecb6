//! Touch gesture classification.
//!
//! The touch interrupt only records timestamps in a [`TouchSensor`]. The tick
//! loop owns a [`TouchClassifier`] that turns those timestamps into discrete
//! [`TouchEvent`]s: `Down`, then optionally `Long` and `Hold`, then `Up`.
//! After every release the sensor ignores new edges for a cooldown window.

use core::cell::Cell;

use critical_section::Mutex;
use embassy_time::Instant;
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::config::TouchTimings;

/// Maximum number of events a single poll can emit
pub const MAX_TOUCH_EVENTS: usize = 4;

/// Events emitted by a poll, in emission order
pub type TouchEvents = Vec<TouchEvent, MAX_TOUCH_EVENTS>;

/// Classified touch gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchEvent {
    /// A touch started
    Down,
    /// The touch lasted past the long threshold
    Long,
    /// The touch lasted past the hold threshold
    Hold,
    /// The touch was released
    Up,
}

#[derive(Debug, Clone, Copy, Default)]
struct TouchEdges {
    /// Start of the current press
    pressed_at: Option<Instant>,
    /// Most recent interrupt edge
    last_edge: Option<Instant>,
    /// Release of the last press, set while cooling down
    released_at: Option<Instant>,
}

/// Timestamps shared between the touch interrupt and the tick loop.
///
/// Every access goes through a short critical section, so the tick loop never
/// observes a half-written timestamp.
pub struct TouchSensor {
    edges: Mutex<Cell<TouchEdges>>,
}

impl Default for TouchSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchSensor {
    pub const fn new() -> Self {
        Self {
            edges: Mutex::new(Cell::new(TouchEdges {
                pressed_at: None,
                last_edge: None,
                released_at: None,
            })),
        }
    }

    /// Record an interrupt edge.
    ///
    /// Safe to call from interrupt context: no allocation, bounded time.
    /// Starts a press unless one is already in progress or the sensor is
    /// cooling down after a release.
    pub fn on_edge(&self, now: Instant) {
        critical_section::with(|cs| {
            let cell = self.edges.borrow(cs);
            let mut edges = cell.get();
            edges.last_edge = Some(now);
            if edges.pressed_at.is_none() && edges.released_at.is_none() {
                edges.pressed_at = Some(now);
            }
            cell.set(edges);
        });
    }

    /// Inject a touch that did not come from the sensor interrupt
    pub fn register_outside_touch(&self, now: Instant) {
        self.on_edge(now);
    }

    fn snapshot(&self) -> TouchEdges {
        critical_section::with(|cs| self.edges.borrow(cs).get())
    }

    fn update(&self, apply: impl FnOnce(&mut TouchEdges)) {
        critical_section::with(|cs| {
            let cell = self.edges.borrow(cs);
            let mut edges = cell.get();
            apply(&mut edges);
            cell.set(edges);
        });
    }
}

/// Turns sensor timestamps into gesture events
pub struct TouchClassifier<'a> {
    sensor: &'a TouchSensor,
    timings: TouchTimings,
    down_registered: bool,
    long_registered: bool,
    hold_registered: bool,
}

impl<'a> TouchClassifier<'a> {
    pub const fn new(sensor: &'a TouchSensor, timings: TouchTimings) -> Self {
        Self {
            sensor,
            timings,
            down_registered: false,
            long_registered: false,
            hold_registered: false,
        }
    }

    /// Classify the current press at `now`.
    ///
    /// Emits each of `Down`, `Long`, `Hold` and `Up` at most once per press
    /// and always in that order.
    pub fn poll(&mut self, now: Instant) -> TouchEvents {
        let mut events = TouchEvents::new();
        let edges = self.sensor.snapshot();

        let Some(pressed_at) = edges.pressed_at else {
            if let Some(released_at) = edges.released_at {
                if elapsed(released_at, now) > self.timings.cooldown.as_millis() {
                    self.sensor.update(|edges| edges.released_at = None);

                    #[cfg(feature = "esp32-log")]
                    println!("[TouchClassifier.poll] touch enabled");
                }
            }
            return events;
        };

        let touch_time = elapsed(pressed_at, now);
        let since_last_edge = edges.last_edge.map_or(touch_time, |edge| elapsed(edge, now));

        if !self.down_registered {
            self.down_registered = true;
            let _ = events.push(TouchEvent::Down);

            #[cfg(feature = "esp32-log")]
            println!("[TouchClassifier.poll] touch down");
        }
        if !self.long_registered && touch_time > self.timings.long.as_millis() {
            self.long_registered = true;
            let _ = events.push(TouchEvent::Long);

            #[cfg(feature = "esp32-log")]
            println!("[TouchClassifier.poll] long touch {}ms", touch_time);
        }
        if !self.hold_registered && touch_time > self.timings.hold.as_millis() {
            self.hold_registered = true;
            let _ = events.push(TouchEvent::Hold);

            #[cfg(feature = "esp32-log")]
            println!("[TouchClassifier.poll] hold touch {}ms", touch_time);
        }
        if since_last_edge > self.timings.release.as_millis() {
            self.sensor.update(|edges| {
                edges.pressed_at = None;
                edges.released_at = Some(now);
            });
            self.down_registered = false;
            self.long_registered = false;
            self.hold_registered = false;
            let _ = events.push(TouchEvent::Up);

            #[cfg(feature = "esp32-log")]
            println!("[TouchClassifier.poll] touch up {}ms", since_last_edge);
        }

        events
    }

    /// Check if a new edge would start a press
    pub fn is_armed(&self) -> bool {
        let edges = self.sensor.snapshot();
        edges.pressed_at.is_none() && edges.released_at.is_none()
    }

    /// Check if a press is in progress
    pub fn is_pressed(&self) -> bool {
        self.sensor.snapshot().pressed_at.is_some()
    }
}

/// Milliseconds from `since` to `now`, zero if the clock went backwards
fn elapsed(since: Instant, now: Instant) -> u64 {
    now.as_millis().saturating_sub(since.as_millis())
}
