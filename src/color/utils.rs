pub use smart_leds::hsv::hsv2rgb;

use crate::{
    color::{Hsv, Rgb},
    math8::blend8,
};

/// Blend two RGB colors
///
/// # Arguments
/// * `a` - First color
/// * `b` - Second color
/// * `amount_of_b` - Blend factor (0 = all a, 255 = all b)
#[inline]
pub fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Perceived brightness as the mean of the three channels
#[allow(clippy::cast_possible_truncation)]
pub fn brightness(color: Rgb) -> u8 {
    ((u16::from(color.r) + u16::from(color.g) + u16::from(color.b)) / 3) as u8
}

/// Convert RGB to HSV (all channels are 0-255).
///
/// Hue is represented on a 0-255 circle, matching `smart_leds::hsv::Hsv`.
#[allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn rgb2hsv(rgb: Rgb) -> Hsv {
    let r = rgb.r;
    let g = rgb.g;
    let b = rgb.b;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max.wrapping_sub(min);

    let val = max;

    let sat = if max == 0 {
        0
    } else {
        ((u16::from(delta) * 255) / u16::from(max)) as u8
    };

    // 0, 85, 171 offsets for the R/G/B sectors
    let hue = if delta == 0 {
        0
    } else if max == r {
        let h = (43i16 * (i16::from(g) - i16::from(b))) / i16::from(delta);
        if h < 0 { (h + 256) as u8 } else { h as u8 }
    } else if max == g {
        let h = 85i16 + (43i16 * (i16::from(b) - i16::from(r))) / i16::from(delta);
        if h < 0 { (h + 256) as u8 } else { h as u8 }
    } else {
        let h = 171i16 + (43i16 * (i16::from(r) - i16::from(g))) / i16::from(delta);
        if h < 0 { (h + 256) as u8 } else { h as u8 }
    };

    Hsv { hue, sat, val }
}
