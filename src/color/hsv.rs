use libm::{fabsf, fmodf};

/// Wrap an angle in degrees into `[0, 360)`
#[inline]
pub fn wrap_hue(hue: f32) -> f32 {
    let wrapped = fmodf(hue, 360.0);
    let wrapped = if wrapped < 0.0 { wrapped + 360.0 } else { wrapped };
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert an HSV color to linear RGB fractions
///
/// # Arguments
/// * `hue` - Hue in degrees, wrapped into `[0, 360)`
/// * `saturation` - Saturation, clamped to `[0, 1]`
/// * `value` - Value, clamped to `[0, 1]`
///
/// Returns `(r, g, b)` with every channel in `[0, 1]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> (f32, f32, f32) {
    let hue = wrap_hue(hue);
    let saturation = saturation.clamp(0.0, 1.0);
    let value = value.clamp(0.0, 1.0);

    let chroma = value * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - fabsf(fmodf(sector, 2.0) - 1.0));
    let m = value - chroma;

    let (r, g, b) = match sector as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    (r + m, g + m, b + m)
}
