mod hsv;
mod ws2812;

use smart_leds::RGB8;

pub use hsv::{hsv_to_rgb, wrap_hue};
pub use ws2812::{cie1931, scale_rgb, ws2812_from_hsv};

pub type Rgb = RGB8;
