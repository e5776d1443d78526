//! WS2812 bit encoder and transmit frame layout
//!
//! The SPI peripheral is clocked at three cells per protocol bit. Each data
//! bit becomes a 3-cell symbol, `100` for a zero and `110` for a one, so one
//! 8-bit channel expands to exactly 3 bytes on the wire.
//!
//! A frame is laid out as:
//!
//! ```text
//! | lead-in (zeros) | pixel 0 | pixel 1 | ... | trail-out (zeros) |
//! ```
//!
//! with every pixel sent as G, R, B.

use crate::color::Rgb;

/// SPI clock rate: 2.4 MHz gives 417 ns cells and 1.25 µs per protocol bit.
pub const SPI_FREQUENCY_HZ: u32 = 2_400_000;

/// Zero bytes sent before the pixel data (~300 µs at 2.4 MHz).
///
/// Settles the line at logic low before the first LED sees data.
pub const LEAD_IN_BYTES: usize = 90;

/// Zero bytes sent after the pixel data (~300 µs at 2.4 MHz).
///
/// Holds the line low long enough for the LEDs to latch the frame.
pub const TRAIL_OUT_BYTES: usize = 90;

/// Encoded bytes per color channel
pub const CHANNEL_BYTES: usize = 3;

/// Encoded bytes per LED (three channels)
pub const PIXEL_BYTES: usize = 3 * CHANNEL_BYTES;

/// Symbol pattern with every bit encoded as zero (`100` repeated 8 times)
const ZERO_SYMBOLS: u32 = 0b100_100_100_100_100_100_100_100;

/// Mask of the middle cell of a 3-cell symbol
const SYMBOL_MASK: u32 = 0b111;

/// Total transmit frame length for `led_count` LEDs
pub const fn frame_len(led_count: usize) -> usize {
    LEAD_IN_BYTES + PIXEL_BYTES * led_count + TRAIL_OUT_BYTES
}

/// Encode one color channel into its 3-byte symbol pattern
///
/// Bits are sent most significant first.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn encode_channel(value: u8) -> [u8; CHANNEL_BYTES] {
    let mut bits = ZERO_SYMBOLS;
    let mut bit = 0;
    while bit < 8 {
        if value & (1 << bit) != 0 {
            bits |= 1 << (bit * 3 + 1);
        }
        bit += 1;
    }

    [(bits >> 16) as u8, (bits >> 8) as u8, bits as u8]
}

/// Decode a 3-byte symbol pattern back into a channel value
///
/// Returns `None` if any symbol is neither `100` nor `110`.
#[allow(clippy::cast_lossless)]
pub const fn decode_channel(encoded: [u8; CHANNEL_BYTES]) -> Option<u8> {
    let bits = ((encoded[0] as u32) << 16) | ((encoded[1] as u32) << 8) | encoded[2] as u32;

    let mut value = 0u8;
    let mut bit = 0;
    while bit < 8 {
        match (bits >> (bit * 3)) & SYMBOL_MASK {
            0b100 => {}
            0b110 => value |= 1 << bit,
            _ => return None,
        }
        bit += 1;
    }

    Some(value)
}

/// Encode one LED into `out` in wire order (G, R, B)
///
/// `out` must be exactly [`PIXEL_BYTES`] long.
#[inline]
pub fn encode_pixel(color: Rgb, out: &mut [u8]) {
    debug_assert_eq!(out.len(), PIXEL_BYTES);
    out[..CHANNEL_BYTES].copy_from_slice(&encode_channel(color.g));
    out[CHANNEL_BYTES..2 * CHANNEL_BYTES].copy_from_slice(&encode_channel(color.r));
    out[2 * CHANNEL_BYTES..].copy_from_slice(&encode_channel(color.b));
}

/// Decode one LED from its wire bytes
///
/// Returns `None` if `encoded` is not [`PIXEL_BYTES`] long or holds an
/// invalid symbol.
pub fn decode_pixel(encoded: &[u8]) -> Option<Rgb> {
    if encoded.len() != PIXEL_BYTES {
        return None;
    }
    let channel = |offset: usize| {
        decode_channel([encoded[offset], encoded[offset + 1], encoded[offset + 2]])
    };

    Some(Rgb {
        g: channel(0)?,
        r: channel(CHANNEL_BYTES)?,
        b: channel(2 * CHANNEL_BYTES)?,
    })
}
