//! Battery level and charger detection from raw analog samples.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::AnalogReader;

/// Volts per raw 12-bit sample: 3.6 V reference, 1:1 divider, adjusted
const VOLTS_PER_SAMPLE: f32 = 0.00181;
/// Voltage of an empty battery
const EMPTY_VOLTAGE: f32 = 3.3;
/// Percent per volt above empty, 4.2 V is full
const LEVEL_PER_VOLT: f32 = 111.0;
/// USB sample threshold, about 2900 at 5 V
const USB_THRESHOLD: u16 = 2000;
/// Boards up to this revision cannot detect USB power
const LAST_REVISION_WITHOUT_USB_SENSE: u8 = 5;

/// Battery snapshot, recomputed on every read
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryState {
    pub voltage: f32,
    /// Charge level in percent (0-100)
    pub level: u8,
    pub charging: bool,
}

/// Reads battery state from the analog sample source
pub struct BatteryMonitor<R: AnalogReader> {
    reader: R,
    hardware_revision: u8,
}

impl<R: AnalogReader> BatteryMonitor<R> {
    pub const fn new(reader: R, hardware_revision: u8) -> Self {
        Self {
            reader,
            hardware_revision,
        }
    }

    /// Read voltage and level; `charging` is left unset
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn read_state(&mut self) -> BatteryState {
        let reading = self.reader.read_battery();
        let voltage = f32::from(reading) * VOLTS_PER_SAMPLE;
        let level = ((voltage - EMPTY_VOLTAGE).max(0.0) * LEVEL_PER_VOLT).min(100.0) as u8;

        #[cfg(feature = "esp32-log")]
        println!(
            "[BatteryMonitor.read_state] battery {} {}V {}%",
            reading, voltage, level
        );

        BatteryState {
            voltage,
            level,
            charging: false,
        }
    }

    /// Check if the device runs from USB power
    pub fn is_usb_powered(&mut self) -> bool {
        if self.hardware_revision <= LAST_REVISION_WITHOUT_USB_SENSE {
            return true;
        }
        self.reader.read_usb() > USB_THRESHOLD
    }

    /// Read the full snapshot including the charging flag
    pub fn read_snapshot(&mut self) -> BatteryState {
        let charging = self.is_usb_powered();
        BatteryState {
            charging,
            ..self.read_state()
        }
    }
}
