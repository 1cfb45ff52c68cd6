//! Dashboard frame composition
//!
//! Composes the time/weather layout into a packed 1-bpp frame in the
//! panel's native format: one bit per pixel, MSB first, 1 = white.

use embedded_graphics::mono_font::iso_8859_1::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use epdash_core::{TimeRecord, WeatherSnapshot};
use std::convert::Infallible;

const MARGIN_X: i32 = 10;

/// Packed monochrome frame buffer
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl Frame {
    /// Create an all-white frame
    pub fn new(width: u32, height: u32) -> Self {
        let bytes_per_row = (width as usize).div_ceil(8);
        Self {
            width,
            height,
            buffer: vec![0xFF; bytes_per_row * height as usize],
        }
    }

    fn set_pixel(&mut self, x: u32, y: u32, ink: bool) {
        let bytes_per_row = (self.width as usize).div_ceil(8);
        let idx = y as usize * bytes_per_row + x as usize / 8;
        let mask = 0x80 >> (x % 8);
        if ink {
            self.buffer[idx] &= !mask;
        } else {
            self.buffer[idx] |= mask;
        }
    }

    /// Whether the pixel carries ink (black)
    pub fn get_pixel(&self, x: u32, y: u32) -> bool {
        let bytes_per_row = (self.width as usize).div_ceil(8);
        let idx = y as usize * bytes_per_row + x as usize / 8;
        let mask = 0x80 >> (x % 8);
        self.buffer[idx] & mask == 0
    }

    /// Packed buffer in the panel's native format
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0
                && point.y >= 0
                && (point.x as u32) < self.width
                && (point.y as u32) < self.height
            {
                self.set_pixel(point.x as u32, point.y as u32, color.is_on());
            }
        }
        Ok(())
    }
}

/// Cut long condition descriptions so they fit the panel
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() > 20 {
        let head: String = description.chars().take(17).collect();
        format!("{}...", head)
    } else {
        description.to_string()
    }
}

/// The small-font lines below time and date
pub fn weather_lines(weather: Option<&WeatherSnapshot>) -> Vec<String> {
    match weather {
        Some(w) => vec![
            format!("{}\u{b0}C  feels {}\u{b0}C", w.temperature, w.feels_like),
            truncate_description(&w.description),
            format!("H {}\u{b0}  L {}\u{b0}  UV {}", w.high, w.low, w.uv_index),
            format!("Wind {} km/h", w.wind_speed),
            format!(
                "Sun {} - {}",
                w.sunrise.format("%H:%M"),
                w.sunset.format("%H:%M")
            ),
            w.location.clone(),
        ],
        None => vec!["Weather unavailable".to_string()],
    }
}

/// Compose one full dashboard frame.
///
/// Time always renders; the weather block degrades to an explicit
/// unavailable marker when no snapshot resolved this cycle.
pub fn render(time: &TimeRecord, weather: Option<&WeatherSnapshot>, width: u32, height: u32) -> Frame {
    let mut frame = Frame::new(width, height);

    let large = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
    let small = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

    let mut y = 8;
    let _ = Text::with_baseline(&time.time, Point::new(MARGIN_X, y), large, Baseline::Top)
        .draw(&mut frame);
    y += 22;

    let _ = Text::with_baseline(&time.date, Point::new(MARGIN_X, y), small, Baseline::Top)
        .draw(&mut frame);
    y += 16;

    for line in weather_lines(weather) {
        let _ = Text::with_baseline(&line, Point::new(MARGIN_X, y), small, Baseline::Top)
            .draw(&mut frame);
        y += 12;
    }

    let _ = Rectangle::new(Point::new(2, 2), Size::new(width - 4, height - 4))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(&mut frame);

    frame
}
