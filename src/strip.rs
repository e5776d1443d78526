//! WS2812 strip driver
//!
//! [`Ws2812Strip`] keeps the logical strip state (pixel store, splash,
//! rainbow) and turns it into SPI frames. Setters only mark the state dirty;
//! [`Ws2812Strip::tick`] encodes and hands at most one frame to the bus,
//! skipping the transfer while the previous one is still in flight.

use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{Rgb, ws2812_from_hsv};
use crate::effect::{Mode, RainbowConfig, RainbowEffect, Splash};
use crate::encoder::{LEAD_IN_BYTES, PIXEL_BYTES, TRAIL_OUT_BYTES, encode_pixel, frame_len};
use crate::error::Error;
use crate::pixel::{PixelRequest, PixelStore};
use crate::{Clock, TransferBus};

/// Configuration for the strip driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripConfig {
    /// Number of LEDs to drive
    pub led_count: u16,
    /// Address the strip from its far end: logical LED 0 is sent last
    pub reverse: bool,
    /// Global brightness fraction (0.0 - 1.0) applied to every pixel setter
    pub max_brightness: f32,
}

impl StripConfig {
    pub const fn new(led_count: u16) -> Self {
        Self {
            led_count,
            reverse: false,
            max_brightness: 1.0,
        }
    }

    /// Set the addressing direction
    #[must_use]
    pub const fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Set the global brightness fraction
    #[must_use]
    pub const fn with_max_brightness(mut self, max_brightness: f32) -> Self {
        self.max_brightness = max_brightness;
        self
    }
}

/// Result of one driver tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing changed since the last transfer
    Idle,
    /// There is new content, but the previous frame is still being sent
    Deferred,
    /// A new frame was encoded and handed to the bus
    Transferred,
}

/// WS2812 strip driver
///
/// Owns the bus, the pixel store and the transmit frame. Setters only
/// update state and mark it dirty; [`Ws2812Strip::tick`] does the encoding
/// and starts at most one transfer, never waiting for the bus.
///
/// `MAX_LEDS` is the pixel store capacity and `FRAME_BYTES` the transmit
/// buffer capacity, which must be at least [`frame_len`]`(MAX_LEDS)`:
///
/// ```ignore
/// const LEDS: usize = 8;
/// let mut strip: Ws2812Strip<_, _, LEDS, { frame_len(LEDS) }> =
///     Ws2812Strip::new(BlockingSpi::new(spi), SystemClock, &StripConfig::new(8))?;
/// strip.begin();
///
/// loop {
///     strip.tick();
///     // ...
/// }
/// ```
pub struct Ws2812Strip<B, C, const MAX_LEDS: usize, const FRAME_BYTES: usize> {
    // External dependencies
    bus: B,
    clock: C,

    // Configuration
    reverse: bool,
    max_brightness: f32,

    // Internal state
    pixels: PixelStore<MAX_LEDS>,
    mode: Mode,
    splash: Option<Splash>,
    frame: Vec<u8, FRAME_BYTES>,
    dirty: bool,
}

impl<B, C, const MAX_LEDS: usize, const FRAME_BYTES: usize>
    Ws2812Strip<B, C, MAX_LEDS, FRAME_BYTES>
where
    B: TransferBus,
    C: Clock,
{
    /// Create a new strip driver
    ///
    /// Fails with [`Error::Capacity`] if the buffers cannot hold the
    /// configured strip. No data is sent until the first [`tick`](Self::tick).
    pub fn new(bus: B, clock: C, config: &StripConfig) -> Result<Self, Error> {
        if FRAME_BYTES < frame_len(MAX_LEDS) {
            return Err(Error::Capacity {
                requested: MAX_LEDS,
                capacity: FRAME_BYTES.saturating_sub(LEAD_IN_BYTES + TRAIL_OUT_BYTES)
                    / PIXEL_BYTES,
            });
        }
        check_led_count::<MAX_LEDS>(config.led_count)?;

        let mut frame = Vec::new();
        frame
            .resize(frame_len(usize::from(config.led_count)), 0)
            .map_err(|()| Error::Capacity {
                requested: usize::from(config.led_count),
                capacity: MAX_LEDS,
            })?;

        #[cfg(feature = "esp32-log")]
        println!(
            "[Ws2812Strip.new] {} LEDs, {} frame bytes",
            config.led_count,
            frame.len()
        );

        Ok(Self {
            bus,
            clock,
            reverse: config.reverse,
            max_brightness: sanitize_fraction(config.max_brightness),
            pixels: PixelStore::new(config.led_count),
            mode: Mode::Static,
            splash: None,
            frame,
            dirty: true,
        })
    }

    /// Bring the strip into its dark, idle state
    ///
    /// The next tick sends an all-dark frame.
    pub fn begin(&mut self) {
        self.reset();
    }

    /// Stop all animations and switch every LED off
    ///
    /// Waits for an in-flight transfer to finish first, spinning in place.
    pub fn reset(&mut self) {
        self.reset_with(core::hint::spin_loop);
    }

    /// Like [`reset`](Self::reset), calling `yield_now` between bus polls
    ///
    /// A bus that never finishes its transfer keeps this looping; stalled
    /// buses are not detected.
    pub fn reset_with(&mut self, mut yield_now: impl FnMut()) {
        self.drain(&mut yield_now);
        self.clear();
    }

    /// Wait for the bus and hand back the bus and the clock
    pub fn release(self) -> (B, C) {
        self.release_with(core::hint::spin_loop)
    }

    /// Like [`release`](Self::release), calling `yield_now` between bus polls
    pub fn release_with(mut self, mut yield_now: impl FnMut()) -> (B, C) {
        self.drain(&mut yield_now);
        (self.bus, self.clock)
    }

    fn clear(&mut self) {
        self.splash = None;
        self.mode = Mode::Static;
        self.fill(PixelRequest::OFF);
    }

    /// Advance animations and push pending changes to the bus
    ///
    /// Call this continuously. It never blocks: with nothing to send it
    /// returns [`TickOutcome::Idle`], and while the previous frame is still
    /// being shifted out it returns [`TickOutcome::Deferred`].
    pub fn tick(&mut self) -> TickOutcome {
        let now = self.clock.now();

        if self.splash.is_some_and(|splash| splash.is_expired(now)) {
            #[cfg(feature = "esp32-log")]
            println!("[Ws2812Strip.tick] splash expired");
            self.splash = None;
            self.dirty = true;
        }

        if let Mode::Rainbow(rainbow) = &mut self.mode {
            if rainbow.render(now, &mut self.pixels, self.max_brightness) {
                self.dirty = true;
            }
        }

        if !self.dirty {
            return TickOutcome::Idle;
        }

        if self.bus.is_busy() {
            return TickOutcome::Deferred;
        }

        self.render();
        self.bus.start_transfer(&self.frame);
        self.dirty = false;

        TickOutcome::Transferred
    }

    /// Encode the current logical state into the transmit frame
    fn render(&mut self) {
        let count = self.pixels.count();
        let payload_end = LEAD_IN_BYTES + PIXEL_BYTES * usize::from(count);
        let payload = &mut self.frame[LEAD_IN_BYTES..payload_end];
        let colors = self.pixels.colors();

        for (slot, out) in (0..count).zip(payload.chunks_exact_mut(PIXEL_BYTES)) {
            let index = if self.reverse { count - 1 - slot } else { slot };
            let color = match &self.splash {
                Some(splash) => splash.color_at(index),
                None => colors[usize::from(index)],
            };
            encode_pixel(color, out);
        }
    }

    fn drain(&mut self, yield_now: &mut impl FnMut()) {
        while self.bus.is_busy() {
            yield_now();
        }
    }

    /// Number of LEDs driven
    pub const fn led_count(&self) -> u16 {
        self.pixels.count()
    }

    /// Change the number of LEDs driven
    ///
    /// Waits for the bus like [`reset`](Self::reset), resets the strip and
    /// rebuilds the transmit frame for the new length.
    pub fn set_led_count(&mut self, count: u16) -> Result<(), Error> {
        self.set_led_count_with(count, core::hint::spin_loop)
    }

    /// Like [`set_led_count`](Self::set_led_count), calling `yield_now`
    /// between bus polls
    pub fn set_led_count_with(
        &mut self,
        count: u16,
        mut yield_now: impl FnMut(),
    ) -> Result<(), Error> {
        check_led_count::<MAX_LEDS>(count)?;
        self.drain(&mut yield_now);

        self.frame.clear();
        self.frame
            .resize(frame_len(usize::from(count)), 0)
            .map_err(|()| Error::Capacity {
                requested: usize::from(count),
                capacity: MAX_LEDS,
            })?;
        self.pixels.set_count(count);

        #[cfg(feature = "esp32-log")]
        println!("[Ws2812Strip.set_led_count] {} LEDs", count);

        self.clear();
        Ok(())
    }

    /// Set the addressing direction
    pub fn set_direction(&mut self, reverse: bool) {
        self.reverse = reverse;
        self.dirty = true;
    }

    /// Addressing direction, `true` if reversed
    pub const fn direction(&self) -> bool {
        self.reverse
    }

    /// Set the global brightness fraction (0.0 - 1.0)
    ///
    /// Every LED is recomputed from its last request on the next frame.
    pub fn set_max_brightness(&mut self, fraction: f32) {
        self.max_brightness = sanitize_fraction(fraction);
        self.pixels.rescale(self.max_brightness);
        self.dirty = true;
    }

    /// Global brightness fraction
    pub const fn max_brightness(&self) -> f32 {
        self.max_brightness
    }

    /// Set one LED to white at perceptual brightness `value` (0.0 - 1.0)
    pub fn set_brightness(&mut self, index: u16, value: f32) -> Result<(), Error> {
        self.set_request(index, PixelRequest::white(value))
    }

    /// Set every LED to white at perceptual brightness `value` (0.0 - 1.0)
    pub fn set_brightness_all(&mut self, value: f32) -> Result<(), Error> {
        self.fill_request(PixelRequest::white(value))
    }

    /// Set one LED to an HSV color, hue in degrees
    pub fn set_hsv(
        &mut self,
        index: u16,
        hue: f32,
        saturation: f32,
        value: f32,
    ) -> Result<(), Error> {
        self.set_request(
            index,
            PixelRequest::Hsv {
                hue,
                saturation,
                value,
            },
        )
    }

    /// Set every LED to an HSV color, hue in degrees
    pub fn set_hsv_all(&mut self, hue: f32, saturation: f32, value: f32) -> Result<(), Error> {
        self.fill_request(PixelRequest::Hsv {
            hue,
            saturation,
            value,
        })
    }

    /// Set one LED to a raw RGB color
    pub fn set_rgb(&mut self, index: u16, r: u8, g: u8, b: u8) -> Result<(), Error> {
        self.set_request(index, PixelRequest::Rgb(Rgb { r, g, b }))
    }

    /// Set every LED to a raw RGB color
    pub fn set_rgb_all(&mut self, r: u8, g: u8, b: u8) -> Result<(), Error> {
        self.fill_request(PixelRequest::Rgb(Rgb { r, g, b }))
    }

    fn set_request(&mut self, index: u16, request: PixelRequest) -> Result<(), Error> {
        self.ensure_static()?;
        self.pixels.set(index, request, self.max_brightness)?;
        self.dirty = true;
        Ok(())
    }

    fn fill_request(&mut self, request: PixelRequest) -> Result<(), Error> {
        self.ensure_static()?;
        self.fill(request);
        Ok(())
    }

    fn fill(&mut self, request: PixelRequest) {
        self.pixels.fill(request, self.max_brightness);
        self.dirty = true;
    }

    fn ensure_static(&self) -> Result<(), Error> {
        if self.mode.is_rainbow() {
            return Err(Error::ModeConflict);
        }
        Ok(())
    }

    /// Show a color on the first `count` LEDs for `duration`
    ///
    /// The remaining LEDs are dark while the splash is shown. Afterwards
    /// the strip returns to the pixel store contents. A new splash replaces
    /// the running one. The global max brightness is not applied.
    pub fn splash_hsv(
        &mut self,
        duration: Duration,
        count: u16,
        hue: f32,
        saturation: f32,
        value: f32,
    ) {
        let color = ws2812_from_hsv(hue, saturation, value);
        self.splash = Some(Splash::new(color, count, self.clock.now(), duration));
        self.dirty = true;
    }

    /// Show a color on the whole strip for `duration`
    pub fn splash_hsv_all(&mut self, duration: Duration, hue: f32, saturation: f32, value: f32) {
        self.splash_hsv(duration, self.pixels.count(), hue, saturation, value);
    }

    /// Running splash, if any
    pub const fn splash(&self) -> Option<&Splash> {
        self.splash.as_ref()
    }

    /// Check if a splash is shown
    pub const fn is_splashing(&self) -> bool {
        self.splash.is_some()
    }

    /// Start a rotating rainbow
    ///
    /// The rainbow owns the pixels from now on: the direct setters return
    /// [`Error::ModeConflict`] until [`reset`](Self::reset) is called.
    /// Reconfiguring a running rainbow keeps its current hue. A config with
    /// zero cycles, or an empty strip, leaves the strip unchanged.
    pub fn rainbow(&mut self, config: &RainbowConfig) {
        let Some(rainbow) = RainbowEffect::new(config, self.pixels.count()) else {
            return;
        };

        let rainbow = match &self.mode {
            Mode::Rainbow(running) => rainbow.with_hue(running.hue()),
            Mode::Static => rainbow,
        };

        #[cfg(feature = "esp32-log")]
        println!(
            "[Ws2812Strip.rainbow] cycle step {:?}, move step {:?}",
            rainbow.cycle_step(),
            rainbow.move_step()
        );

        self.mode = Mode::Rainbow(rainbow);
    }

    /// Check if the rainbow owns the pixels
    pub const fn is_rainbow(&self) -> bool {
        self.mode.is_rainbow()
    }

    /// Current pixel ownership mode
    pub const fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Time until the next rainbow step, `None` without a rainbow
    pub fn rainbow_due_in(&self) -> Option<Duration> {
        match &self.mode {
            Mode::Rainbow(rainbow) => Some(rainbow.due_in(self.clock.now())),
            Mode::Static => None,
        }
    }

    /// Logical color of one LED, ignoring any splash
    pub fn pixel(&self, index: u16) -> Result<Rgb, Error> {
        self.pixels.color(index)
    }

    /// Logical colors of all LEDs, ignoring any splash
    pub fn pixels(&self) -> &[Rgb] {
        self.pixels.colors()
    }

    /// Last request made for one LED
    pub fn request(&self, index: u16) -> Result<PixelRequest, Error> {
        self.pixels.request(index)
    }

    /// The transmit frame as last encoded
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Check if there are changes not sent yet
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Get a reference to the bus
    pub const fn bus(&self) -> &B {
        &self.bus
    }

    /// Get a mutable reference to the bus
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Get a reference to the clock
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Current time of the driver clock
    pub fn now(&self) -> Instant {
        self.clock.now()
    }
}

fn check_led_count<const MAX_LEDS: usize>(count: u16) -> Result<(), Error> {
    if usize::from(count) > MAX_LEDS {
        return Err(Error::Capacity {
            requested: usize::from(count),
            capacity: MAX_LEDS,
        });
    }
    Ok(())
}

fn sanitize_fraction(fraction: f32) -> f32 {
    if fraction.is_nan() {
        return 0.0;
    }
    fraction.clamp(0.0, 1.0)
}
