//! Small integer and unit-float helpers shared by the animation code.

/// Blend two 8-bit values
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i16 - a as i16;

    let mut partial: u32 = (a as u32) << 16; // a * 65536
    partial = partial.wrapping_add(
        (delta as u32)
            .wrapping_mul(amount_of_b as u32)
            .wrapping_mul(257),
    ); // (b - a) * amount_of_b * 257
    partial = partial.wrapping_add(0x8000); // + 32768 for rounding

    (partial >> 16) as u8
}

/// Convert a unit value (0.0-1.0) to an 8-bit fraction (0-255)
///
/// Values outside of the unit range are clamped.
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn unit8(value: f32) -> u8 {
    libm::roundf(value.clamp(0.0, 1.0) * 255.0) as u8
}

/// Linear interpolation between two floats
#[inline]
pub fn lerp(from: f32, to: f32, progress: f32) -> f32 {
    from + (to - from) * progress
}

/// Cubic ease-in-out over the unit range
pub fn ease_in_out_cubic(value: f32) -> f32 {
    let value = value.clamp(0.0, 1.0) * 2.0;
    if value < 1.0 {
        return 0.5 * value * value * value;
    }
    let value = value - 2.0;
    0.5 * (value * value * value + 2.0)
}
