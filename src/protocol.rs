//! Binary packets exchanged with the remote control link.
//!
//! All packets are fixed width:
//!
//! - state (read): `[open_level, r, g, b]`
//! - command (write): `[mode, r, g, b, open_level, duration]`, where `mode`
//!   bit 0 applies the color, bit 1 applies the open level, and `duration`
//!   is in 100 ms units
//! - battery (notify): `[level]` and `[power_state]`

use core::fmt;

use embassy_time::Duration;
use heapless::Vec;

use crate::color::Rgb;
use crate::config::COLOR_SCHEME_MAX_LENGTH;

pub const STATE_PACKET_SIZE: usize = 4;
pub const COMMAND_PACKET_SIZE: usize = 6;
pub const BATTERY_PACKET_SIZE: usize = 2;
pub const COLOR_SCHEME_PACKET_MAX_SIZE: usize = COLOR_SCHEME_MAX_LENGTH * 3;

/// Command mode bit: apply the color
pub const MODE_COLOR: u8 = 0b01;
/// Command mode bit: apply the open level
pub const MODE_OPEN_LEVEL: u8 = 0b10;

/// Duration byte unit
pub const DURATION_UNIT_MS: u64 = 100;

/// Errors produced while decoding remote packets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// The packet does not have the fixed command size
    InvalidLength { expected: usize, actual: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidLength { expected, actual } => {
                write!(
                    f,
                    "invalid packet length: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl core::error::Error for DecodeError {}

/// Decoded state change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteCommand {
    /// Color to fade to, if requested
    pub color: Option<Rgb>,
    /// Open level to move to, if requested
    pub open_level: Option<u8>,
    /// Transition for both changes
    pub duration: Duration,
}

/// Battery power state byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BatteryPowerState {
    Charging = 0b0011_1011,
    Discharging = 0b0010_1111,
}

impl BatteryPowerState {
    pub const fn from_charging(charging: bool) -> Self {
        if charging {
            Self::Charging
        } else {
            Self::Discharging
        }
    }
}

/// Decode a command packet.
///
/// Anything but exactly [`COMMAND_PACKET_SIZE`] bytes is rejected.
pub fn decode_command(bytes: &[u8]) -> Result<RemoteCommand, DecodeError> {
    let Ok(&[mode, r, g, b, open_level, duration]) = <&[u8; COMMAND_PACKET_SIZE]>::try_from(bytes)
    else {
        return Err(DecodeError::InvalidLength {
            expected: COMMAND_PACKET_SIZE,
            actual: bytes.len(),
        });
    };

    Ok(RemoteCommand {
        color: (mode & MODE_COLOR != 0).then_some(Rgb { r, g, b }),
        open_level: (mode & MODE_OPEN_LEVEL != 0).then_some(open_level),
        duration: Duration::from_millis(u64::from(duration) * DURATION_UNIT_MS),
    })
}

/// Encode a command packet
#[allow(clippy::cast_possible_truncation)]
pub fn encode_command(command: &RemoteCommand) -> [u8; COMMAND_PACKET_SIZE] {
    let mut mode = 0;
    let color = command.color.unwrap_or_default();
    if command.color.is_some() {
        mode |= MODE_COLOR;
    }
    if command.open_level.is_some() {
        mode |= MODE_OPEN_LEVEL;
    }
    let duration = (command.duration.as_millis() / DURATION_UNIT_MS).min(u64::from(u8::MAX)) as u8;
    [
        mode,
        color.r,
        color.g,
        color.b,
        command.open_level.unwrap_or(0),
        duration,
    ]
}

/// Encode the state packet
pub const fn encode_state(open_level: u8, color: Rgb) -> [u8; STATE_PACKET_SIZE] {
    [open_level, color.r, color.g, color.b]
}

/// Encode the battery level and power state bytes
pub const fn encode_battery(level: u8, charging: bool) -> [u8; BATTERY_PACKET_SIZE] {
    [level, BatteryPowerState::from_charging(charging) as u8]
}

/// Encode color presets, three bytes per color
pub fn encode_color_scheme(colors: &[Rgb]) -> Vec<u8, COLOR_SCHEME_PACKET_MAX_SIZE> {
    let mut bytes = Vec::new();
    for color in colors.iter().take(COLOR_SCHEME_MAX_LENGTH) {
        let _ = bytes.extend_from_slice(&[color.r, color.g, color.b]);
    }
    bytes
}
