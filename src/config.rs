//! Start-up configuration supplied by the storage layer.
//!
//! The core only reads these values; loading, saving and factory defaults
//! live outside of this crate.

use embassy_time::Duration;
use heapless::Vec;

use crate::color::{self, Rgb};

/// Maximum number of color presets
pub const COLOR_SCHEME_MAX_LENGTH: usize = 10;

pub const DEFAULT_TOUCH_THRESHOLD: u8 = 45;
pub const DEFAULT_BEHAVIOR: u8 = 0;
/// In 0.1 s units, 5 seconds to open or close
pub const DEFAULT_SPEED: u8 = 50;
pub const DEFAULT_MAX_OPEN_LEVEL: u8 = 100;
pub const DEFAULT_LIGHT_INTENSITY: u8 = 70;

/// Safe actuator position used until the device is calibrated
pub const DEFAULT_SERVO_ANGLE: u16 = 1000;

/// Actuator calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    /// Angle of fully closed petals, in the actuator's native unit
    pub closed_angle: u16,
    /// Angle of fully open petals, in the actuator's native unit
    pub open_angle: u16,
    /// Bounds were verified; uncalibrated devices move without clamping
    pub calibrated: bool,
    pub hardware_revision: u8,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            closed_angle: DEFAULT_SERVO_ANGLE,
            open_angle: DEFAULT_SERVO_ANGLE,
            calibrated: false,
            hardware_revision: 0,
        }
    }
}

/// Touch gesture timing thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchTimings {
    /// Silence after the last edge before the touch counts as released
    pub release: Duration,
    /// Press duration to recognize a long touch
    pub long: Duration,
    /// Press duration to recognize a hold touch
    pub hold: Duration,
    /// Refractory period after release
    pub cooldown: Duration,
}

impl Default for TouchTimings {
    fn default() -> Self {
        Self {
            release: Duration::from_millis(75),
            long: Duration::from_millis(2000),
            hold: Duration::from_millis(5000),
            cooldown: Duration::from_millis(300),
        }
    }
}

/// Device configuration.
///
/// `calibration`, `touch`, `color_scheme` and `random_seed` are consumed by
/// the core. `touch_threshold`, `behavior`, `speed`, `max_open_level` and
/// `light_intensity` are carried for the caller: interrupt registration and
/// the gesture behaviors that turn touch events into commands.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    pub calibration: Calibration,
    pub touch: TouchTimings,
    /// Sensitivity for the touch interrupt registration
    pub touch_threshold: u8,
    pub behavior: u8,
    /// Default transition speed in 0.1 s units
    pub speed: u8,
    /// Open level used by local gestures (0-100)
    pub max_open_level: u8,
    /// Light intensity in percent
    pub light_intensity: u8,
    /// Color presets published over the remote link
    pub color_scheme: Vec<Rgb, COLOR_SCHEME_MAX_LENGTH>,
    /// Seed for the candle flicker generator
    pub random_seed: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            calibration: Calibration::default(),
            touch: TouchTimings::default(),
            touch_threshold: DEFAULT_TOUCH_THRESHOLD,
            behavior: DEFAULT_BEHAVIOR,
            speed: DEFAULT_SPEED,
            max_open_level: DEFAULT_MAX_OPEN_LEVEL,
            light_intensity: DEFAULT_LIGHT_INTENSITY,
            color_scheme: default_color_scheme(),
            random_seed: 0x5eed_b105_50f7_ca7e,
        }
    }
}

impl DeviceConfig {
    /// Transition duration for gesture commands, derived from `speed`
    pub fn speed_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.speed) * 100)
    }
}

/// Factory color presets
pub fn default_color_scheme() -> Vec<Rgb, COLOR_SCHEME_MAX_LENGTH> {
    let mut scheme = Vec::new();
    for preset in [
        color::WHITE,
        color::YELLOW,
        color::ORANGE,
        color::RED,
        color::PINK,
        color::PURPLE,
        color::BLUE,
        color::GREEN,
    ] {
        let _ = scheme.push(preset);
    }
    scheme
}
