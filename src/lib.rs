//! Analog dial watch face: time, date, step count and a ring of hour markers
//! with a five-minute marker, redrawn once per minute.

pub use embedded_graphics::{pixelcolor::Rgb565, prelude::DrawTarget};

pub mod angle;
pub mod clock;
pub mod config;
pub mod dial;
mod error;
pub mod face;
pub mod health;
pub mod quantize;
pub mod text;
pub mod tick;

pub use error::FaceError;

pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0);
pub const WHITE: Rgb565 = Rgb565::new(0b11111, 0b111111, 0b11111);
pub const RED: Rgb565 = Rgb565::new(0b11111, 0, 0);
pub const YELLOW: Rgb565 = Rgb565::new(0b11111, 0b111111, 0);
pub const DARK_GRAY: Rgb565 = Rgb565::new(0b01_010, 0b010_101, 0b01_010);

/// Something that paints itself onto the display.
///
/// Returns `Ok(true)` if anything was drawn and the display should be flushed.
pub trait Draw<D: DrawTarget<Color = Rgb565>> {
	fn draw(&self, disp: &mut D) -> Result<bool, D::Error>;
}
