//! Remote control link glue.
//!
//! The wireless stack calls into [`RemoteLink`] from its own context; the tick
//! loop drains the pending command with [`RemoteLink::process`]. At most one
//! command is pending: a newer write replaces an unapplied older one.

use core::cell::Cell;

use critical_section::Mutex;
use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::battery::BatteryState;
use crate::color::BLACK;
use crate::config::DeviceConfig;
use crate::device::Blossom;
use crate::effect::ColorMode;
use crate::mailbox::Mailbox;
use crate::protocol::{
    BATTERY_PACKET_SIZE, COLOR_SCHEME_PACKET_MAX_SIZE, DecodeError, RemoteCommand,
    STATE_PACKET_SIZE, decode_command, encode_battery, encode_color_scheme,
};
use crate::{ActuatorDriver, PixelDriver};

/// Fade applied when the remote client goes away
pub const DISCONNECT_FADE: Duration = Duration::from_millis(100);

impl RemoteCommand {
    /// Apply the requested color fade and petal move
    pub fn apply<A: ActuatorDriver, P: PixelDriver>(
        &self,
        device: &mut Blossom<'_, A, P>,
        now: Instant,
    ) {
        if let Some(color) = self.color {
            device.set_color(color, ColorMode::Fade, self.duration, now);
        }
        if let Some(level) = self.open_level {
            device.set_open_level(level, self.duration, now);
        }
    }
}

/// Shared state between the wireless callbacks and the tick loop
pub struct RemoteLink {
    commands: Mailbox<RemoteCommand>,
    connected: Mutex<Cell<bool>>,
}

impl Default for RemoteLink {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteLink {
    pub const fn new() -> Self {
        Self {
            commands: Mailbox::new(),
            connected: Mutex::new(Cell::new(false)),
        }
    }

    /// Handle a write to the state change characteristic.
    ///
    /// Malformed packets are rejected without touching any state.
    pub fn on_write(&self, bytes: &[u8]) -> Result<(), DecodeError> {
        let command = decode_command(bytes).inspect_err(|_error| {
            #[cfg(feature = "esp32-log")]
            println!("[RemoteLink.on_write] rejected packet: {}", _error);
        })?;
        self.commands.post(command);
        Ok(())
    }

    pub fn on_connect(&self) {
        #[cfg(feature = "esp32-log")]
        println!("[RemoteLink.on_connect] connected to client");

        critical_section::with(|cs| self.connected.borrow(cs).set(true));
    }

    /// Mark the link down and fade the ring out
    pub fn on_disconnect(&self) {
        #[cfg(feature = "esp32-log")]
        println!("[RemoteLink.on_disconnect] disconnected");

        critical_section::with(|cs| self.connected.borrow(cs).set(false));
        self.commands.post(RemoteCommand {
            color: Some(BLACK),
            open_level: None,
            duration: DISCONNECT_FADE,
        });
    }

    pub fn is_connected(&self) -> bool {
        critical_section::with(|cs| self.connected.borrow(cs).get())
    }

    /// Take the pending command without applying it
    pub fn take_command(&self) -> Option<RemoteCommand> {
        self.commands.take()
    }

    /// Apply the pending command, if any. Call from the tick loop.
    pub fn process<A: ActuatorDriver, P: PixelDriver>(
        &self,
        device: &mut Blossom<'_, A, P>,
        now: Instant,
    ) -> bool {
        let Some(command) = self.take_command() else {
            return false;
        };
        command.apply(device, now);
        true
    }

    /// Color presets packet, published once when the link starts
    pub fn color_scheme_packet(
        &self,
        config: &DeviceConfig,
    ) -> Vec<u8, COLOR_SCHEME_PACKET_MAX_SIZE> {
        encode_color_scheme(&config.color_scheme)
    }

    /// State packet to publish, only while the device is idle
    pub fn state_packet<A: ActuatorDriver, P: PixelDriver>(
        &self,
        device: &Blossom<'_, A, P>,
    ) -> Option<[u8; STATE_PACKET_SIZE]> {
        device.is_idle().then(|| device.state_packet())
    }

    /// Battery notification, only while connected and idle
    pub fn battery_packet<A: ActuatorDriver, P: PixelDriver>(
        &self,
        device: &Blossom<'_, A, P>,
        battery: &BatteryState,
    ) -> Option<[u8; BATTERY_PACKET_SIZE]> {
        if !self.is_connected() || !device.is_idle() {
            return None;
        }
        Some(encode_battery(battery.level, battery.charging))
    }
}
