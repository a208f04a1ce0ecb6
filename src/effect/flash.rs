//! Flash pulse
//!
//! The first half of a run eases from the origin to the target, the second
//! half mirrors it back. The pulse repeats for as long as the target is lit.

use super::{Effect, Repeat, fill};
use crate::{
    color::{Rgb, blend_colors, brightness},
    math8::{ease_in_out_cubic, unit8},
    rng::Prng,
};

#[derive(Debug, Clone)]
pub struct FlashEffect {
    origin: Rgb,
    target: Rgb,
}

impl FlashEffect {
    pub const fn new(origin: Rgb, target: Rgb) -> Self {
        Self { origin, target }
    }
}

impl Effect for FlashEffect {
    fn render(&mut self, progress: f32, leds: &mut [Rgb]) {
        let eased = if progress < 0.5 {
            ease_in_out_cubic(progress * 2.0)
        } else {
            ease_in_out_cubic((1.0 - progress) * 2.0)
        };
        fill(leds, blend_colors(self.origin, self.target, unit8(eased)));
    }

    fn on_complete(&mut self, _rng: &mut Prng) -> Repeat {
        if brightness(self.target) > 0 {
            Repeat::Again
        } else {
            Repeat::Stop
        }
    }
}
