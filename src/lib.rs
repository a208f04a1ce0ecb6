#![cfg_attr(not(test), no_std)]

//! Core of a blossom lamp: petal actuator motion, LED ring effects, touch
//! gestures and the remote control packets.
//!
//! Everything is driven from one cooperative tick ([`Blossom::tick`]). The
//! touch interrupt and the wireless stack only touch the critical-section
//! guarded [`TouchSensor`] and [`RemoteLink`].

pub mod animation;
pub mod battery;
pub mod color;
pub mod config;
pub mod device;
pub mod effect;
pub mod light;
pub mod mailbox;
pub mod math8;
pub mod petals;
pub mod protocol;
pub mod remote;
pub mod rng;
pub mod touch;

pub use animation::{AfterUpdate, AnimationScheduler, AnimationState, AnimationUpdate};
pub use battery::{BatteryMonitor, BatteryState};
pub use config::{Calibration, DeviceConfig, TouchTimings};
pub use device::{Blossom, TickResult};
pub use effect::ColorMode;
pub use light::LightController;
pub use petals::PetalController;
pub use protocol::{DecodeError, RemoteCommand, decode_command, encode_state};
pub use remote::RemoteLink;
pub use touch::{TouchClassifier, TouchEvent, TouchSensor};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Petal actuator driver
///
/// Implement this trait for the servo or motor hardware. Drivers handle
/// their own errors; these calls cannot fail.
pub trait ActuatorDriver {
    /// Drive the actuator to `angle`, in its native unit
    fn write_angle(&mut self, angle: u16);

    /// Switch the actuator drive circuit
    fn set_power(&mut self, on: bool);
}

/// Addressable LED ring driver
pub trait PixelDriver {
    /// Write and latch colors for the whole ring
    fn write(&mut self, colors: &[Rgb]);

    /// Switch the ring supply
    fn set_power(&mut self, on: bool);
}

/// Raw 12-bit (0-4095) analog samples
pub trait AnalogReader {
    fn read_battery(&mut self) -> u16;

    fn read_usb(&mut self) -> u16;
}
