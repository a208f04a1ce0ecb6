//! Device orchestration.
//!
//! [`Blossom`] owns the animation scheduler, both controllers, the pixel
//! output and the touch classifier, and advances all of them from a single
//! periodic [`Blossom::tick`]. Frame pacing works like a frame scheduler: the
//! caller sleeps for the returned duration between ticks.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animation::{AnimationTask, Animations};
use crate::color::{Rgb, brightness};
use crate::config::DeviceConfig;
use crate::effect::ColorMode;
use crate::light::LightController;
use crate::petals::PetalController;
use crate::protocol::{STATE_PACKET_SIZE, encode_state};
use crate::touch::{TouchClassifier, TouchEvents, TouchSensor};
use crate::{ActuatorDriver, PixelDriver};

/// Default target frame rate (90 FPS).
pub const DEFAULT_FPS: u32 = 90;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Result of a device tick.
#[derive(Debug, Clone)]
pub struct TickResult {
    /// Touch gestures recognized during this tick, in order
    pub touch_events: TouchEvents,
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Blossom lamp core
pub struct Blossom<'a, A: ActuatorDriver, P: PixelDriver> {
    // External dependencies
    pixels: P,
    touch: TouchClassifier<'a>,

    // Internal state
    animations: Animations,
    petals: PetalController<A>,
    light: LightController,
    pixels_powered: bool,
    changed: bool,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, A: ActuatorDriver, P: PixelDriver> Blossom<'a, A, P> {
    /// Create the device core with petals closed and the ring dark.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (90 FPS) for tick pacing.
    pub fn new(actuator: A, mut pixels: P, sensor: &'a TouchSensor, config: &DeviceConfig) -> Self {
        let light = LightController::new(config.random_seed);
        pixels.set_power(false);
        pixels.write(&light.frame());

        Self {
            pixels,
            touch: TouchClassifier::new(sensor, config.touch),
            animations: Animations::new(),
            petals: PetalController::new(actuator, config.calibration),
            light,
            pixels_powered: false,
            changed: false,
            next_frame: Instant::from_millis(0),
            frame_duration: DEFAULT_FRAME_DURATION,
        }
    }

    /// Use a custom tick duration.
    #[must_use]
    pub fn with_frame_duration(mut self, frame_duration: Duration) -> Self {
        self.frame_duration = frame_duration;
        self
    }

    /// Process one tick and return timing information.
    ///
    /// This method:
    /// 1. Advances both animation channels
    /// 2. Runs the actuator power timer
    /// 3. Writes the pixel frame, switching the ring power as needed
    /// 4. Polls the touch classifier
    pub fn tick(&mut self, now: Instant) -> TickResult {
        // Skip the backlog after long stalls instead of catching up
        let max_drift = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift {
            self.next_frame = now;
        }

        let Self {
            animations,
            petals,
            light,
            ..
        } = self;
        animations.tick(now, |update| match update.task {
            AnimationTask::Petals => petals.on_update(update, now),
            AnimationTask::Light(_) => light.on_update(update),
        });
        self.petals.handle_timers(now);
        self.show_pixels();

        let touch_events = self.touch.poll(now);

        self.next_frame += self.frame_duration;
        let sleep_duration = if self.next_frame > now {
            self.next_frame - now
        } else {
            Duration::from_millis(0)
        };

        TickResult {
            touch_events,
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Move the petals to `level` percent
    pub fn set_open_level(&mut self, level: u8, transition: Duration, now: Instant) -> bool {
        let accepted = self
            .petals
            .set_open_level(&mut self.animations, level, transition, now);
        self.changed |= accepted;
        accepted
    }

    /// Change the ring color
    pub fn set_color(
        &mut self,
        color: Rgb,
        mode: ColorMode,
        transition: Duration,
        now: Instant,
    ) -> bool {
        let accepted = self
            .light
            .set_color(&mut self.animations, color, mode, transition, now);
        self.changed |= accepted;
        accepted
    }

    /// Stop the running color effect
    pub fn stop_effect(&mut self, retain_color: bool) {
        self.light.stop_effect(&mut self.animations, retain_color);
    }

    pub fn set_low_power_mode(&mut self, low_power: bool) {
        if self.light.set_low_power_mode(low_power) {
            self.show_pixels();
        }
    }

    pub fn is_low_power_mode(&self) -> bool {
        self.light.is_low_power_mode()
    }

    /// Commanded open level
    pub fn open_level(&self) -> Option<u8> {
        self.petals.target_open_level()
    }

    /// Open level of the petals right now
    pub fn current_open_level(&self) -> Option<u8> {
        self.petals.current_open_level(&self.animations)
    }

    /// Requested color
    pub fn color(&self) -> Rgb {
        self.light.color()
    }

    /// Displayed color
    pub fn current_color(&self) -> Rgb {
        self.light.current_color()
    }

    pub fn is_moving(&self) -> bool {
        self.petals.is_moving(&self.animations)
    }

    pub fn is_changing_color(&self) -> bool {
        self.light.is_changing_color(&self.animations)
    }

    pub fn is_animating(&self) -> bool {
        self.animations.is_animating()
    }

    /// Petals settled and no color transition in progress.
    ///
    /// Ambient effects (flash, rainbow, candle) loop forever and do not keep
    /// the device busy.
    pub fn is_idle(&self) -> bool {
        !self.is_moving() && !self.is_changing_color()
    }

    /// Check if the LED ring is powered
    pub fn is_lit(&self) -> bool {
        self.pixels_powered
    }

    /// State packet for the remote link; an unknown open level reads as 0
    pub fn state_packet(&self) -> [u8; STATE_PACKET_SIZE] {
        encode_state(self.open_level().unwrap_or(0), self.color())
    }

    /// Returns `true` once after any accepted petal or color command
    pub fn take_changed(&mut self) -> bool {
        core::mem::take(&mut self.changed)
    }

    pub fn petals(&self) -> &PetalController<A> {
        &self.petals
    }

    pub fn light(&self) -> &LightController {
        &self.light
    }

    pub fn animations(&self) -> &Animations {
        &self.animations
    }

    pub fn pixels(&self) -> &P {
        &self.pixels
    }

    /// Write the frame, powering the ring only while something is lit
    fn show_pixels(&mut self) {
        let frame = self.light.frame();
        if brightness(self.light.current_color()) > 0 {
            self.set_pixels_power(true);
            self.pixels.write(&frame);
        } else {
            self.pixels.write(&frame);
            self.set_pixels_power(false);
        }
    }

    fn set_pixels_power(&mut self, on: bool) {
        if self.pixels_powered == on {
            return;
        }
        self.pixels_powered = on;

        #[cfg(feature = "esp32-log")]
        println!(
            "[Blossom.set_pixels_power] LEDs power {}",
            if on { "ON" } else { "OFF" }
        );

        self.pixels.set_power(on);
    }
}
