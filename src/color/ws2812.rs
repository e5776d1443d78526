//! WS2812 color conversion rules
//!
//! Every color that ends up in the pixel store passes through one of the
//! functions in this module. All of them share the same ceiling rule: a
//! channel that is logically on never rounds down to a literal zero, so the
//! dimmest requested light is still emitted.

use libm::ceilf;

use super::{Rgb, hsv_to_rgb};

/// CIE 1931 lightness to relative luminance
///
/// Maps a perceived brightness in `[0, 1]` to the linear LED duty
/// needed to produce it. Input is clamped to `[0, 1]`.
pub fn cie1931(lightness: f32) -> f32 {
    let lightness = lightness.clamp(0.0, 1.0) * 100.0;
    if lightness <= 8.0 {
        lightness / 903.3
    } else {
        let t = (lightness + 16.0) / 116.0;
        t * t * t
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn perceptual_channel(linear: f32) -> u8 {
    ceilf(cie1931(linear) * 255.0) as u8
}

/// Convert an HSV request to the 8-bit color sent to a WS2812 LED
///
/// `value <= 0` is exactly black regardless of hue and saturation.
/// Otherwise every channel goes through [`cie1931`] and is rounded up, so
/// `saturation <= 0` gives a gray that is never fully dark.
pub fn ws2812_from_hsv(hue: f32, saturation: f32, value: f32) -> Rgb {
    if value.is_nan() || value <= 0.0 {
        return Rgb::default();
    }

    let (r, g, b) = hsv_to_rgb(hue, saturation, value);
    Rgb {
        r: perceptual_channel(r),
        g: perceptual_channel(g),
        b: perceptual_channel(b),
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_channel(channel: u8, fraction: f32) -> u8 {
    if channel == 0 || fraction.is_nan() || fraction <= 0.0 {
        return 0;
    }
    ceilf(f32::from(channel) * fraction.min(1.0)) as u8
}

/// Scale a raw RGB color by a brightness fraction
///
/// No perceptual curve is applied; raw colors are sent as requested
/// apart from the linear scale and the ceiling rule.
pub fn scale_rgb(color: Rgb, fraction: f32) -> Rgb {
    Rgb {
        r: scale_channel(color.r, fraction),
        g: scale_channel(color.g, fraction),
        b: scale_channel(color.b, fraction),
    }
}
