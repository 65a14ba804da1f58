use embedded_graphics::{
	mono_font::{MonoFont, MonoTextStyle},
	prelude::Point,
	primitives::Rectangle,
	text::{Alignment, Baseline, Text, TextStyleBuilder},
	Drawable,
};
use heapless::String;

use crate::{Draw, DrawTarget, FaceError, Rgb565, BLACK};

/// A line of text pinned to a region of the window.
#[derive(Clone)]
pub struct TextLayer<const N: usize> {
	frame: Rectangle,
	text: String<N>,
	font: &'static MonoFont<'static>,
	color: Rgb565,
	alignment: Alignment,
}

impl<const N: usize> TextLayer<N> {
	pub fn new(frame: Rectangle, font: &'static MonoFont<'static>) -> Self {
		TextLayer {
			frame,
			text: String::new(),
			font,
			color: BLACK,
			alignment: Alignment::Center,
		}
	}

	pub fn with_color(mut self, color: Rgb565) -> Self {
		self.color = color;
		self
	}

	pub fn with_alignment(mut self, alignment: Alignment) -> Self {
		self.alignment = alignment;
		self
	}

	/// Replaces the text. On overflow the previous text stays.
	pub fn set_text(&mut self, text: &str) -> Result<(), FaceError> {
		if text.len() > N {
			return Err(FaceError::TextOverflow);
		}
		self.text.clear();
		self.text.push_str(text).map_err(|_| FaceError::TextOverflow)
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	fn anchor(&self) -> Point {
		let x = match self.alignment {
			Alignment::Left => self.frame.top_left.x,
			Alignment::Center => self.frame.top_left.x + (self.frame.size.width / 2) as i32,
			Alignment::Right => self.frame.top_left.x + self.frame.size.width as i32 - 1,
		};
		Point::new(x, self.frame.top_left.y)
	}
}

impl<const N: usize, D: DrawTarget<Color = Rgb565>> Draw<D> for TextLayer<N> {
	fn draw(&self, disp: &mut D) -> Result<bool, D::Error> {
		if self.text.is_empty() {
			return Ok(false);
		}
		let character_style = MonoTextStyle::new(self.font, self.color);
		let text_style = TextStyleBuilder::new()
			.alignment(self.alignment)
			.baseline(Baseline::Top)
			.build();
		Text::with_text_style(&self.text, self.anchor(), character_style, text_style).draw(disp)?;
		Ok(true)
	}
}
