//! Clock positions as angles, clockwise from 12 o'clock.

use std::fmt;

use embedded_graphics::{
	prelude::{Point, Size},
	primitives::Rectangle,
};

/// Whole degrees in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AngleDegrees(u16);

impl AngleDegrees {
	pub const fn new(degrees: u16) -> Self {
		AngleDegrees(degrees % 360)
	}

	pub const fn degrees(self) -> u16 {
		self.0
	}
}

impl fmt::Display for AngleDegrees {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}°", self.0)
	}
}

/// `hour` must be in `[0, 12)`. Truncating division, 30° per hour.
pub const fn angle_for_hour(hour: u8) -> AngleDegrees {
	AngleDegrees::new(hour as u16 * 360 / 12)
}

/// `minute` must be in `[0, 60)`. Truncating division, 6° per minute.
pub const fn angle_for_minute(minute: u8) -> AngleDegrees {
	AngleDegrees::new(minute as u16 * 360 / 60)
}

/// Midpoint of `rect`, rounding towards the top left.
pub fn midpoint(rect: &Rectangle) -> Point {
	rect.top_left + Point::new((rect.size.width / 2) as i32, (rect.size.height / 2) as i32)
}

/// `rect` shrunk by `margin` on every side.
pub fn inset(rect: &Rectangle, margin: u32) -> Rectangle {
	Rectangle::new(
		rect.top_left + Point::new(margin as i32, margin as i32),
		Size::new(
			rect.size.width.saturating_sub(2 * margin),
			rect.size.height.saturating_sub(2 * margin),
		),
	)
}

/// Point at `angle` on the largest circle centered in `frame`.
pub fn point_on_frame(frame: &Rectangle, angle: AngleDegrees) -> Point {
	let center = midpoint(frame);
	let radius = frame.size.width.min(frame.size.height) as f32 / 2.0;
	let (sin, cos) = (angle.degrees() as f32).to_radians().sin_cos();
	Point::new(
		center.x + (radius * sin).round() as i32,
		center.y - (radius * cos).round() as i32,
	)
}
