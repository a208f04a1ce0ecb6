//! Candle flicker
//!
//! The primary pixel holds the flame color while every secondary pixel blends
//! between two randomly dimmed versions of it. Each run picks new targets and
//! a new short duration, so the flame never settles.

use embassy_time::Duration;

use super::{Effect, Repeat, SECONDARY_PIXEL_COUNT};
use crate::{
    color::{Hsv, Rgb, blend_colors, hsv2rgb, rgb2hsv},
    math8::unit8,
    rng::Prng,
};

/// Duration of the first flicker run
pub const CANDLE_FIRST_RUN: Duration = Duration::from_millis(100);

const MIN_RUN_MS: u32 = 10;
const MAX_RUN_MS: u32 = 400;
/// Flicker brightness band in percent of full value
const MIN_BRIGHTNESS: u32 = 20;
const MAX_BRIGHTNESS: u32 = 100;

#[derive(Debug, Clone)]
pub struct CandleEffect {
    flame: Rgb,
    origins: [Rgb; SECONDARY_PIXEL_COUNT],
    targets: [Rgb; SECONDARY_PIXEL_COUNT],
}

impl CandleEffect {
    pub const fn new(flame: Rgb) -> Self {
        Self {
            flame,
            origins: [flame; SECONDARY_PIXEL_COUNT],
            targets: [flame; SECONDARY_PIXEL_COUNT],
        }
    }

    pub const fn flame(&self) -> Rgb {
        self.flame
    }

    pub fn targets(&self) -> &[Rgb; SECONDARY_PIXEL_COUNT] {
        &self.targets
    }
}

impl Effect for CandleEffect {
    fn render(&mut self, progress: f32, leds: &mut [Rgb]) {
        let Some((primary, secondary)) = leds.split_first_mut() else {
            return;
        };
        *primary = self.flame;

        let amount = unit8(progress);
        for ((led, origin), target) in secondary.iter_mut().zip(&self.origins).zip(&self.targets) {
            *led = blend_colors(*origin, *target, amount);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn on_complete(&mut self, rng: &mut Prng) -> Repeat {
        let flame = rgb2hsv(self.flame);
        for (origin, target) in self.origins.iter_mut().zip(self.targets.iter_mut()) {
            let percent = rng.range(MIN_BRIGHTNESS, MAX_BRIGHTNESS);
            let val = (255 * percent / 100) as u8;
            *origin = *target;
            *target = hsv2rgb(Hsv { val, ..flame });
        }

        let run = rng.range(MIN_RUN_MS, MAX_RUN_MS);
        Repeat::After(Duration::from_millis(u64::from(run)))
    }
}
