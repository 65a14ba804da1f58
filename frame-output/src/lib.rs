use std::path::Path;

use embedded_graphics::{
	pixelcolor::Rgb565,
	prelude::{DrawTarget, OriginDimensions, Point, RgbColor, Size},
	primitives::Rectangle,
	Pixel,
};
use image::{ImageBuffer, ImageResult, Rgba};

/// Off-screen RGB565 surface backed by an RGBA image.
/// Used for the desktop preview, snapshots and pixel checks in tests.
pub struct FrameOutput {
	pub buffer: ImageBuffer<Rgba<u8>, Vec<u8>>,
}

impl FrameOutput {
	pub fn new(width: u32, height: u32) -> Self {
		FrameOutput {
			buffer: ImageBuffer::new(width, height),
		}
	}

	fn contains(&self, at: Point) -> bool {
		at.x >= 0 && at.y >= 0 && (at.x as u32) < self.buffer.width() && (at.y as u32) < self.buffer.height()
	}

	/// Color last drawn at `at`, `None` outside the frame.
	pub fn pixel(&self, at: Point) -> Option<Rgb565> {
		if !self.contains(at) {
			return None;
		}
		let px = self.buffer.get_pixel(at.x as u32, at.y as u32);
		Some(Rgb565::new(px.0[0] >> 3, px.0[1] >> 2, px.0[2] >> 3))
	}

	pub fn count(&self, color: Rgb565) -> usize {
		let wanted = rgba(color);
		self.buffer.pixels().filter(|px| **px == wanted).count()
	}

	/// Pixel packed as 0RGB, the layout softbuffer expects.
	pub fn xrgb(&self, x: u32, y: u32) -> u32 {
		if x >= self.buffer.width() || y >= self.buffer.height() {
			return 0;
		}
		let px = self.buffer.get_pixel(x, y);
		px.0[2] as u32 | ((px.0[1] as u32) << 8) | ((px.0[0] as u32) << 16)
	}

	pub fn save_png(&self, path: impl AsRef<Path>) -> ImageResult<()> {
		self.buffer.save_with_format(path, image::ImageFormat::Png)
	}
}

fn rgba(color: Rgb565) -> Rgba<u8> {
	Rgba([color.r() << 3, color.g() << 2, color.b() << 3, 0xff])
}

impl DrawTarget for FrameOutput {
	type Color = Rgb565;

	type Error = ();

	fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
	where
		I: IntoIterator<Item = Pixel<Self::Color>>,
	{
		for Pixel(at, color) in pixels {
			if !self.contains(at) {
				continue;
			}
			self.buffer.put_pixel(at.x as u32, at.y as u32, rgba(color));
		}
		Ok(())
	}

	fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
		let area = area.intersection(&Rectangle::new(Point::zero(), self.size()));
		let Some(bottom_right) = area.bottom_right() else {
			return Ok(());
		};
		let px = rgba(color);
		for y in area.top_left.y..=bottom_right.y {
			for x in area.top_left.x..=bottom_right.x {
				self.buffer.put_pixel(x as u32, y as u32, px);
			}
		}
		Ok(())
	}
}

impl OriginDimensions for FrameOutput {
	fn size(&self) -> Size {
		Size::new(self.buffer.width(), self.buffer.height())
	}
}

#[test]
fn test_fill_is_clipped() {
	let mut frame = FrameOutput::new(4, 4);
	let red = Rgb565::new(0b11111, 0, 0);
	frame
		.fill_solid(&Rectangle::new(Point::new(2, 2), Size::new(8, 8)), red)
		.unwrap();
	assert_eq!(4, frame.count(red));
	assert_eq!(Some(red), frame.pixel(Point::new(3, 3)));
	assert_eq!(None, frame.pixel(Point::new(4, 0)));
	assert_eq!(0xf8_00_00, frame.xrgb(2, 2));
}
