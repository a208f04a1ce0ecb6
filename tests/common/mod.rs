//! Shared mocks for the integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use myrtio_blossom::{ActuatorDriver, AnalogReader, Instant, PixelDriver, Rgb};

pub fn ms(millis: u64) -> Instant {
    Instant::from_millis(millis)
}

/// Actuator that records every write and power switch
#[derive(Debug, Default)]
pub struct MockActuator {
    pub angles: Vec<u16>,
    pub power: Vec<bool>,
}

impl MockActuator {
    pub fn last_angle(&self) -> Option<u16> {
        self.angles.last().copied()
    }

    pub fn is_powered(&self) -> bool {
        self.power.last().copied().unwrap_or(false)
    }
}

impl ActuatorDriver for MockActuator {
    fn write_angle(&mut self, angle: u16) {
        self.angles.push(angle);
    }

    fn set_power(&mut self, on: bool) {
        self.power.push(on);
    }
}

/// LED ring that keeps the last written frame and power history
#[derive(Debug, Default)]
pub struct MockPixels {
    pub frame: Vec<Rgb>,
    pub writes: usize,
    pub power: Vec<bool>,
}

impl MockPixels {
    pub fn is_powered(&self) -> bool {
        self.power.last().copied().unwrap_or(false)
    }
}

impl PixelDriver for MockPixels {
    fn write(&mut self, colors: &[Rgb]) {
        self.frame = colors.to_vec();
        self.writes += 1;
    }

    fn set_power(&mut self, on: bool) {
        self.power.push(on);
    }
}

/// Fixed analog samples
pub struct MockAnalog {
    pub battery: u16,
    pub usb: u16,
}

impl AnalogReader for MockAnalog {
    fn read_battery(&mut self) -> u16 {
        self.battery
    }

    fn read_usb(&mut self) -> u16 {
        self.usb
    }
}
