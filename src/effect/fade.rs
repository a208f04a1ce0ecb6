use super::{Effect, fill};
use crate::{
    color::{Rgb, blend_colors},
    math8::unit8,
};

/// Linear blend from the displayed color to a new one
#[derive(Debug, Clone)]
pub struct FadeEffect {
    origin: Rgb,
    target: Rgb,
}

impl FadeEffect {
    pub const fn new(origin: Rgb, target: Rgb) -> Self {
        Self { origin, target }
    }
}

impl Effect for FadeEffect {
    fn render(&mut self, progress: f32, leds: &mut [Rgb]) {
        fill(leds, blend_colors(self.origin, self.target, unit8(progress)));
    }
}
