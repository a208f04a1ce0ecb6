//! LED ring color controller.
//!
//! Owns the color state and the pixel frame, and drives the light animation
//! channel with the effect selected by the last accepted command.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animation::{AfterUpdate, AnimationTask, AnimationUpdate, Animations, LIGHT_CHANNEL};
use crate::color::{BLACK, CANDLE_COLOR, Rgb};
use crate::effect::{
    CANDLE_FIRST_RUN, CandleEffect, ColorMode, EffectSlot, FadeEffect, FlashEffect, PIXEL_COUNT,
    RAINBOW_CYCLE, RainbowEffect, Repeat, fill,
};
use crate::rng::Prng;

/// Color state of the LED ring
#[derive(Debug, Clone)]
pub struct LightController {
    effect: EffectSlot,
    mode: ColorMode,
    /// Displayed color
    color: Rgb,
    /// Requested color
    target: Rgb,
    frame: [Rgb; PIXEL_COUNT],
    low_power: bool,
    rng: Prng,
}

impl LightController {
    /// Create a controller with the ring dark
    pub fn new(seed: u64) -> Self {
        Self {
            effect: EffectSlot::Fade(FadeEffect::new(BLACK, BLACK)),
            mode: ColorMode::Fade,
            color: BLACK,
            target: BLACK,
            frame: [BLACK; PIXEL_COUNT],
            low_power: false,
            rng: Prng::new(seed),
        }
    }

    /// Request a new color.
    ///
    /// Repeating the current target color and mode is a no-op, even while a
    /// transition toward it is still running. A zero `transition` applies
    /// fade and flash colors immediately; rainbow and candle keep their own
    /// timing. Candle ignores `color` and targets [`CANDLE_COLOR`]. Returns
    /// `true` if the command was accepted.
    pub fn set_color(
        &mut self,
        animations: &mut Animations,
        color: Rgb,
        mode: ColorMode,
        transition: Duration,
        now: Instant,
    ) -> bool {
        // Candle always burns with its own flame color
        let color = if mode == ColorMode::Candle {
            CANDLE_COLOR
        } else {
            color
        };
        if color == self.target && mode == self.mode {
            return false;
        }
        self.mode = mode;
        self.target = color;

        #[cfg(feature = "esp32-log")]
        println!(
            "[LightController.set_color] color {},{},{} mode {} in {}ms",
            color.r,
            color.g,
            color.b,
            mode.as_str(),
            transition.as_millis()
        );

        let task = AnimationTask::Light(mode);
        match mode {
            ColorMode::Fade | ColorMode::Flash if transition.as_ticks() == 0 => {
                animations.stop(LIGHT_CHANNEL, false);
                self.effect = EffectSlot::Fade(FadeEffect::new(color, color));
                self.show(color);
            }
            ColorMode::Fade => {
                self.effect = EffectSlot::Fade(FadeEffect::new(self.color, color));
                animations.start(LIGHT_CHANNEL, transition, task, now);
            }
            ColorMode::Flash => {
                self.effect = EffectSlot::Flash(FlashEffect::new(BLACK, color));
                animations.start(LIGHT_CHANNEL, transition, task, now);
            }
            ColorMode::RainbowLoop => {
                self.effect = EffectSlot::RainbowLoop(RainbowEffect::new(self.color, color));
                animations.start(LIGHT_CHANNEL, RAINBOW_CYCLE, task, now);
            }
            ColorMode::Candle => {
                self.effect = EffectSlot::Candle(CandleEffect::new(color));
                self.show(color);
                animations.start(LIGHT_CHANNEL, CANDLE_FIRST_RUN, task, now);
            }
        }
        true
    }

    /// Stop the running effect.
    ///
    /// With `retain_color` the displayed color becomes the new target.
    pub fn stop_effect(&mut self, animations: &mut Animations, retain_color: bool) {
        animations.stop(LIGHT_CHANNEL, retain_color);
        if retain_color {
            self.target = self.color;
        }
    }

    /// Advance the effect for one update of the light channel
    pub fn on_update(
        &mut self,
        update: AnimationUpdate<AnimationTask>,
    ) -> AfterUpdate<AnimationTask> {
        self.effect.render(update.progress, &mut self.frame);
        self.color = self.frame[0];

        if !update.is_completed() {
            return AfterUpdate::Continue;
        }
        match self.effect.on_complete(&mut self.rng) {
            Repeat::Stop => AfterUpdate::Continue,
            Repeat::Again => AfterUpdate::Restart,
            Repeat::After(duration) => AfterUpdate::Start {
                duration,
                task: update.task,
            },
        }
    }

    /// Check if a non-interruptible color transition is running
    pub fn is_changing_color(&self, animations: &Animations) -> bool {
        !self.mode.is_interruptible() && animations.is_active(LIGHT_CHANNEL)
    }

    /// Render only the primary pixel while in low power mode.
    ///
    /// Returns `true` if the mode changed.
    pub fn set_low_power_mode(&mut self, low_power: bool) -> bool {
        if self.low_power == low_power {
            return false;
        }
        self.low_power = low_power;
        true
    }

    pub const fn is_low_power_mode(&self) -> bool {
        self.low_power
    }

    /// Requested color
    pub const fn color(&self) -> Rgb {
        self.target
    }

    /// Displayed color
    pub const fn current_color(&self) -> Rgb {
        self.color
    }

    pub const fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Pixel frame as it should be written to the ring
    pub fn frame(&self) -> [Rgb; PIXEL_COUNT] {
        let mut frame = self.frame;
        if self.low_power {
            fill(&mut frame[1..], BLACK);
        }
        frame
    }

    fn show(&mut self, color: Rgb) {
        self.color = color;
        fill(&mut self.frame, color);
    }
}
