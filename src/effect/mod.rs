//! Color effects with compile-time known variants
//!
//! All effects are stored in an enum to avoid heap allocations and dynamic
//! callbacks. Each effect implements the `Effect` trait and is driven by the
//! linear progress of the light animation channel.

mod candle;
mod fade;
mod flash;
mod rainbow;

use embassy_time::Duration;

pub use candle::{CANDLE_FIRST_RUN, CandleEffect};
pub use fade::FadeEffect;
pub use flash::FlashEffect;
pub use rainbow::{RAINBOW_CYCLE, RainbowEffect};

use crate::{color::Rgb, rng::Prng};

/// Number of pixels on the LED ring
pub const PIXEL_COUNT: usize = 7;
/// Pixels surrounding the primary pixel
pub const SECONDARY_PIXEL_COUNT: usize = PIXEL_COUNT - 1;

const MODE_NAME_FADE: &str = "fade";
const MODE_NAME_FLASH: &str = "flash";
const MODE_NAME_RAINBOW_LOOP: &str = "rainbow_loop";
const MODE_NAME_CANDLE: &str = "candle";

const MODE_ID_FADE: u8 = 0;
const MODE_ID_FLASH: u8 = 1;
const MODE_ID_RAINBOW_LOOP: u8 = 2;
const MODE_ID_CANDLE: u8 = 3;

/// How the LED ring animates toward a requested color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ColorMode {
    /// Single linear blend to the target
    Fade = MODE_ID_FADE,
    /// Eased pulse to the target and back, repeated while the target is lit
    Flash = MODE_ID_FLASH,
    /// Continuous hue rotation
    RainbowLoop = MODE_ID_RAINBOW_LOOP,
    /// Flickering flame on the secondary pixels
    Candle = MODE_ID_CANDLE,
}

impl ColorMode {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_FADE => Self::Fade,
            MODE_ID_FLASH => Self::Flash,
            MODE_ID_RAINBOW_LOOP => Self::RainbowLoop,
            MODE_ID_CANDLE => Self::Candle,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fade => MODE_NAME_FADE,
            Self::Flash => MODE_NAME_FLASH,
            Self::RainbowLoop => MODE_NAME_RAINBOW_LOOP,
            Self::Candle => MODE_NAME_CANDLE,
        }
    }

    /// Ambient effects may be replaced at any time and are not reported as
    /// a color change in progress
    pub const fn is_interruptible(self) -> bool {
        !matches!(self, Self::Fade)
    }
}

/// What to do once an effect run completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Settle on the last rendered frame
    Stop,
    /// Run again with the same duration
    Again,
    /// Run again with a new duration
    After(Duration),
}

pub trait Effect {
    /// Render the frame for the given linear progress (0.0-1.0)
    fn render(&mut self, progress: f32, leds: &mut [Rgb]);

    /// Called once when a run completes
    fn on_complete(&mut self, _rng: &mut Prng) -> Repeat {
        Repeat::Stop
    }
}

/// Effect slot - enum containing all possible effects
#[derive(Debug, Clone)]
pub enum EffectSlot {
    Fade(FadeEffect),
    Flash(FlashEffect),
    RainbowLoop(RainbowEffect),
    Candle(CandleEffect),
}

impl EffectSlot {
    /// Render the current effect
    pub fn render(&mut self, progress: f32, leds: &mut [Rgb]) {
        match self {
            Self::Fade(effect) => effect.render(progress, leds),
            Self::Flash(effect) => effect.render(progress, leds),
            Self::RainbowLoop(effect) => effect.render(progress, leds),
            Self::Candle(effect) => effect.render(progress, leds),
        }
    }

    /// Finish a run of the current effect
    pub fn on_complete(&mut self, rng: &mut Prng) -> Repeat {
        match self {
            Self::Fade(effect) => effect.on_complete(rng),
            Self::Flash(effect) => effect.on_complete(rng),
            Self::RainbowLoop(effect) => effect.on_complete(rng),
            Self::Candle(effect) => effect.on_complete(rng),
        }
    }
}

/// Fill every pixel with one color
pub(crate) fn fill(leds: &mut [Rgb], color: Rgb) {
    for led in leds {
        *led = color;
    }
}
