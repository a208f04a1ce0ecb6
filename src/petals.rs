//! Petal actuator motion controller.
//!
//! Openness is the external unit (0-100 %), the actuator angle is the internal
//! one. The two are related by a linear map between the calibrated closed and
//! open angles.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::ActuatorDriver;
use crate::animation::{AfterUpdate, AnimationTask, AnimationUpdate, Animations, PETALS_CHANNEL};
use crate::config::Calibration;
use crate::math8::lerp;

/// How long the actuator stays powered after a move completes
pub const SERVO_POWER_OFF_DELAY: Duration = Duration::from_millis(500);

/// Fully open petals
pub const MAX_OPEN_LEVEL: u8 = 100;

/// Petal actuator state and motion
#[derive(Debug)]
pub struct PetalController<A: ActuatorDriver> {
    driver: A,
    calibration: Calibration,
    angle: u16,
    origin: u16,
    target: u16,
    /// `None` until the first command
    open_level: Option<u8>,
    powered: bool,
    power_off_at: Option<Instant>,
}

impl<A: ActuatorDriver> PetalController<A> {
    /// Create a controller with the petals assumed closed and the actuator
    /// unpowered
    pub fn new(mut driver: A, calibration: Calibration) -> Self {
        let closed = calibration.closed_angle;

        #[cfg(feature = "esp32-log")]
        if !calibration.calibrated {
            println!("[PetalController.new] actuator not calibrated, moving without bounds");
        }

        driver.set_power(false);
        let mut controller = Self {
            driver,
            calibration,
            angle: closed,
            origin: closed,
            target: closed,
            open_level: None,
            powered: false,
            power_off_at: None,
        };
        let initial = controller.bounded(closed);
        controller.driver.write_angle(initial);
        controller
    }

    /// Move the petals to `level` percent over `transition`.
    ///
    /// Levels above 100 are stored and reported as 100. Requesting the level
    /// that is already targeted is a no-op, so a move in progress keeps its
    /// original pace. Returns `true` if a move started.
    pub fn set_open_level(
        &mut self,
        animations: &mut Animations,
        level: u8,
        transition: Duration,
        now: Instant,
    ) -> bool {
        let level = level.min(MAX_OPEN_LEVEL);
        if self.open_level == Some(level) {
            return false;
        }
        self.open_level = Some(level);
        self.origin = self.angle;
        self.target = self.angle_for(level);

        #[cfg(feature = "esp32-log")]
        println!(
            "[PetalController.set_open_level] petals {}% ({}) in {}ms",
            level,
            self.target,
            transition.as_millis()
        );

        animations.start(PETALS_CHANNEL, transition, AnimationTask::Petals, now);
        true
    }

    /// Advance the move for one update of the petals channel
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn on_update(
        &mut self,
        update: AnimationUpdate<AnimationTask>,
        now: Instant,
    ) -> AfterUpdate<AnimationTask> {
        let angle = lerp(
            f32::from(self.origin),
            f32::from(self.target),
            update.progress,
        );
        self.angle = libm::roundf(angle) as u16;

        self.set_power(true);
        self.driver.write_angle(self.bounded(self.angle));

        if update.is_completed() {
            self.power_off_at = Some(now + SERVO_POWER_OFF_DELAY);
        }
        AfterUpdate::Continue
    }

    /// Power the actuator down once the settle delay has passed
    pub fn handle_timers(&mut self, now: Instant) {
        if let Some(deadline) = self.power_off_at {
            if now > deadline {
                self.set_power(false);
            }
        }
    }

    /// Commanded open level
    pub const fn target_open_level(&self) -> Option<u8> {
        self.open_level
    }

    /// Open level derived from the live angle while moving
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn current_open_level(&self, animations: &Animations) -> Option<u8> {
        if !self.is_moving(animations) {
            return self.open_level;
        }
        let closed = f32::from(self.calibration.closed_angle);
        let range = f32::from(self.calibration.open_angle) - closed;
        if range == 0.0 {
            return self.open_level;
        }
        let level = (f32::from(self.angle) - closed) / range * 100.0;
        Some(level.clamp(0.0, 100.0) as u8)
    }

    pub fn is_moving(&self, animations: &Animations) -> bool {
        animations.is_active(PETALS_CHANNEL)
    }

    pub const fn target_angle(&self) -> u16 {
        self.target
    }

    pub const fn current_angle(&self) -> u16 {
        self.angle
    }

    pub const fn is_calibrated(&self) -> bool {
        self.calibration.calibrated
    }

    pub const fn is_powered(&self) -> bool {
        self.powered
    }

    pub fn driver(&self) -> &A {
        &self.driver
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn angle_for(&self, level: u8) -> u16 {
        let Calibration {
            closed_angle,
            open_angle,
            ..
        } = self.calibration;
        if level >= MAX_OPEN_LEVEL {
            return open_angle;
        }
        let angle = lerp(
            f32::from(closed_angle),
            f32::from(open_angle),
            f32::from(level) / 100.0,
        );
        libm::roundf(angle) as u16
    }

    /// Clamp to the calibrated range; uncalibrated angles pass through
    fn bounded(&self, angle: u16) -> u16 {
        if !self.calibration.calibrated {
            return angle;
        }
        let low = self.calibration.closed_angle.min(self.calibration.open_angle);
        let high = self.calibration.closed_angle.max(self.calibration.open_angle);
        angle.clamp(low, high)
    }

    fn set_power(&mut self, on: bool) {
        self.power_off_at = None;
        if self.powered == on {
            return;
        }
        self.powered = on;

        #[cfg(feature = "esp32-log")]
        println!(
            "[PetalController.set_power] actuator power {}",
            if on { "ON" } else { "OFF" }
        );

        self.driver.set_power(on);
    }
}
