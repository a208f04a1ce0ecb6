mod utils;

use smart_leds::RGB8;
use smart_leds::hsv::Hsv as HSV;

pub use utils::{blend_colors, brightness, hsv2rgb, rgb2hsv};

pub type Rgb = RGB8;
pub type Hsv = HSV;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

// Preset palette, tuned to 70% intensity
pub const RED: Rgb = Rgb { r: 156, g: 0, b: 0 };
pub const GREEN: Rgb = Rgb {
    r: 40,
    g: 178,
    b: 0,
};
pub const BLUE: Rgb = Rgb {
    r: 0,
    g: 65,
    b: 178,
};
pub const YELLOW: Rgb = Rgb {
    r: 178,
    g: 170,
    b: 0,
};
pub const ORANGE: Rgb = Rgb {
    r: 178,
    g: 64,
    b: 0,
};
pub const WHITE: Rgb = Rgb {
    r: 178,
    g: 178,
    b: 178,
};
pub const PURPLE: Rgb = Rgb {
    r: 148,
    g: 0,
    b: 178,
};
pub const PINK: Rgb = Rgb {
    r: 178,
    g: 0,
    b: 73,
};

/// Base color of the candle flame
pub const CANDLE_COLOR: Rgb = Rgb {
    r: 178,
    g: 45,
    b: 0,
};
