//! Rainbow hue rotation
//!
//! One run rotates the hue through the full color circle starting from the
//! hue of the color that was displayed when the effect started. Saturation
//! and value stay fixed.

use embassy_time::Duration;

use super::{Effect, Repeat, fill};
use crate::{
    color::{Hsv, Rgb, brightness, hsv2rgb, rgb2hsv},
    rng::Prng,
};

/// Duration of one full hue rotation
pub const RAINBOW_CYCLE: Duration = Duration::from_millis(10_000);

const SATURATION: u8 = 255;
/// 40% of full value
const VALUE: u8 = 102;

#[derive(Debug, Clone)]
pub struct RainbowEffect {
    base_hue: u8,
    /// Requested color; the loop runs while it is lit
    target: Rgb,
}

impl RainbowEffect {
    pub fn new(origin: Rgb, target: Rgb) -> Self {
        Self {
            base_hue: rgb2hsv(origin).hue,
            target,
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn hue_at(&self, progress: f32) -> u8 {
        // 256 steps per cycle so the hue wraps exactly at the end of a run
        let offset = (progress.clamp(0.0, 1.0) * 256.0) as u32;
        self.base_hue.wrapping_add(offset as u8)
    }
}

impl Effect for RainbowEffect {
    fn render(&mut self, progress: f32, leds: &mut [Rgb]) {
        let color = hsv2rgb(Hsv {
            hue: self.hue_at(progress),
            sat: SATURATION,
            val: VALUE,
        });
        fill(leds, color);
    }

    fn on_complete(&mut self, _rng: &mut Prng) -> Repeat {
        if brightness(self.target) > 0 {
            Repeat::Again
        } else {
            Repeat::Stop
        }
    }
}
