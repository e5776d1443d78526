//! Logical pixel store
//!
//! Keeps the last request made for every LED next to the color derived from
//! it. The request is kept so a change of the global max brightness can
//! recompute every LED from what was asked for, instead of rescaling
//! already scaled values.

use crate::color::{Rgb, scale_rgb, ws2812_from_hsv};
use crate::error::Error;

/// The last color request made for one LED
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PixelRequest {
    /// HSV color, hue in degrees, saturation and value in `[0, 1]`
    Hsv { hue: f32, saturation: f32, value: f32 },
    /// Raw 8-bit color
    Rgb(Rgb),
}

impl PixelRequest {
    /// Dark white
    pub const OFF: Self = Self::Hsv {
        hue: 0.0,
        saturation: 0.0,
        value: 0.0,
    };

    /// White at the given perceptual brightness
    pub const fn white(value: f32) -> Self {
        Self::Hsv {
            hue: 0.0,
            saturation: 0.0,
            value,
        }
    }

    /// Convert the request to the color sent to the LED
    pub fn resolve(self, max_brightness: f32) -> Rgb {
        match self {
            Self::Hsv {
                hue,
                saturation,
                value,
            } => ws2812_from_hsv(hue, saturation, value * max_brightness),
            Self::Rgb(color) => scale_rgb(color, max_brightness),
        }
    }
}

/// Pixel store for up to `MAX_LEDS` LEDs
#[derive(Debug, Clone)]
pub struct PixelStore<const MAX_LEDS: usize> {
    requests: [PixelRequest; MAX_LEDS],
    colors: [Rgb; MAX_LEDS],
    count: u16,
}

impl<const MAX_LEDS: usize> PixelStore<MAX_LEDS> {
    /// Create a dark store with `count` active LEDs
    ///
    /// `count` must not exceed `MAX_LEDS`.
    pub(crate) fn new(count: u16) -> Self {
        debug_assert!(usize::from(count) <= MAX_LEDS);
        Self {
            requests: [PixelRequest::OFF; MAX_LEDS],
            colors: [Rgb::default(); MAX_LEDS],
            count,
        }
    }

    /// Number of active LEDs
    pub const fn count(&self) -> u16 {
        self.count
    }

    pub(crate) fn set_count(&mut self, count: u16) {
        debug_assert!(usize::from(count) <= MAX_LEDS);
        self.count = count;
    }

    /// Store a request for one LED and derive its color
    pub(crate) fn set(
        &mut self,
        index: u16,
        request: PixelRequest,
        max_brightness: f32,
    ) -> Result<(), Error> {
        let slot = self.slot(index)?;
        self.requests[slot] = request;
        self.colors[slot] = request.resolve(max_brightness);
        Ok(())
    }

    /// Store a request for every active LED, produced from its index
    pub(crate) fn paint(
        &mut self,
        max_brightness: f32,
        mut request_at: impl FnMut(u16) -> PixelRequest,
    ) {
        let count = usize::from(self.count);
        let slots = self.requests[..count]
            .iter_mut()
            .zip(self.colors[..count].iter_mut());
        for (index, (stored, color)) in (0..self.count).zip(slots) {
            let request = request_at(index);
            *stored = request;
            *color = request.resolve(max_brightness);
        }
    }

    /// Store the same request for every active LED
    pub(crate) fn fill(&mut self, request: PixelRequest, max_brightness: f32) {
        self.paint(max_brightness, |_| request);
    }

    /// Recompute every color from its stored request
    pub(crate) fn rescale(&mut self, max_brightness: f32) {
        for (color, request) in self.colors.iter_mut().zip(self.requests.iter()) {
            *color = request.resolve(max_brightness);
        }
    }

    /// Color of one LED
    pub fn color(&self, index: u16) -> Result<Rgb, Error> {
        self.slot(index).map(|slot| self.colors[slot])
    }

    /// Last request made for one LED
    pub fn request(&self, index: u16) -> Result<PixelRequest, Error> {
        self.slot(index).map(|slot| self.requests[slot])
    }

    /// Colors of all active LEDs
    pub fn colors(&self) -> &[Rgb] {
        &self.colors[..usize::from(self.count)]
    }

    fn slot(&self, index: u16) -> Result<usize, Error> {
        if index >= self.count {
            return Err(Error::OutOfRange {
                index,
                count: self.count,
            });
        }
        Ok(usize::from(index))
    }
}
