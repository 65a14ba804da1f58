//! The analog dial: a filled disc with twelve hour markers around it and one
//! marker for the current five minutes.
//!
//! Marker geometry is a pure function of the surface bounds, the time and the
//! renderer's configuration, so [`DialRenderer::markers`] can be inspected
//! without a display.

use std::{fmt, str::FromStr};

use embedded_graphics::{
	prelude::{Point, Primitive},
	primitives::{Circle, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
	Drawable,
};
use serde::Deserialize;

use crate::{
	angle::{angle_for_hour, angle_for_minute, inset, midpoint, point_on_frame, AngleDegrees},
	clock::TimeSample,
	quantize::{quantize_minute_down, reduce_hour},
	DrawTarget, FaceError, Rgb565, DARK_GRAY, RED, WHITE, YELLOW,
};

pub const HOUR_MARKERS: usize = 12;
pub const MARKER_COUNT: usize = HOUR_MARKERS + 1;
pub const DIAL_RADIUS: u32 = 60;
pub const MARKER_RADIUS: u32 = 5;
pub const MUTED_MARKER_RADIUS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayShape {
	Round,
	#[default]
	Rect,
}

impl DisplayShape {
	/// Distance between the surface edge and the marker ring.
	pub const fn marker_inset(self) -> u32 {
		match self {
			DisplayShape::Round => 12,
			DisplayShape::Rect => 6,
		}
	}
}

impl FromStr for DisplayShape {
	type Err = FaceError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"round" => Ok(DisplayShape::Round),
			"rect" => Ok(DisplayShape::Rect),
			_ => Err(FaceError::InvalidSetting {
				name: "display shape",
				value: s.to_owned(),
			}),
		}
	}
}

impl fmt::Display for DisplayShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			DisplayShape::Round => "round",
			DisplayShape::Rect => "rect",
		})
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DialStyle {
	face: Rgb565,
	minute: Rgb565,
	emphasized: Rgb565,
	muted: Rgb565,
}

impl Default for DialStyle {
	fn default() -> Self {
		DialStyle {
			face: RED,
			minute: YELLOW,
			emphasized: WHITE,
			muted: DARK_GRAY,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialGeometry {
	pub center: Point,
	pub radius: u32,
	pub marker_frame: Rectangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
	Hour(u8),
	Minute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
	pub kind: MarkerKind,
	pub angle: AngleDegrees,
	pub center: Point,
	pub radius: u32,
	pub color: Rgb565,
	pub emphasized: bool,
}

impl Marker {
	fn circle(&self) -> Circle {
		Circle::with_center(self.center, self.radius * 2 + 1)
	}
}

/// The markers of one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
	minute: Marker,
	hours: [Marker; HOUR_MARKERS],
}

impl MarkerSet {
	/// All markers in paint order: the minute marker, then hours 0 to 11.
	pub fn iter(&self) -> impl Iterator<Item = &Marker> {
		std::iter::once(&self.minute).chain(self.hours.iter())
	}

	pub fn minute(&self) -> &Marker {
		&self.minute
	}

	pub fn hours(&self) -> &[Marker; HOUR_MARKERS] {
		&self.hours
	}

	/// Index of the highlighted hour marker.
	pub fn emphasized_hour(&self) -> Option<u8> {
		self.hours.iter().position(|m| m.emphasized).map(|i| i as u8)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialRenderer {
	radius: u32,
	shape: DisplayShape,
	style: DialStyle,
}

impl DialRenderer {
	pub fn new(radius: u32, shape: DisplayShape) -> Self {
		DialRenderer {
			radius,
			shape,
			style: DialStyle::default(),
		}
	}

	pub fn shape(&self) -> DisplayShape {
		self.shape
	}

	pub fn geometry(&self, bounds: &Rectangle) -> DialGeometry {
		DialGeometry {
			center: midpoint(bounds),
			radius: self.radius,
			marker_frame: inset(bounds, self.shape.marker_inset()),
		}
	}

	pub fn markers(&self, bounds: &Rectangle, time: TimeSample) -> MarkerSet {
		let frame = self.geometry(bounds).marker_frame;
		let hour = reduce_hour(time.hour);

		let angle = angle_for_minute(quantize_minute_down(time.minute));
		let minute = Marker {
			kind: MarkerKind::Minute,
			angle,
			center: point_on_frame(&frame, angle),
			radius: MARKER_RADIUS,
			color: self.style.minute,
			emphasized: false,
		};

		let hours = std::array::from_fn(|i| {
			let index = i as u8;
			let angle = angle_for_hour(index);
			let emphasized = index == hour;
			Marker {
				kind: MarkerKind::Hour(index),
				angle,
				center: point_on_frame(&frame, angle),
				radius: if emphasized { MARKER_RADIUS } else { MUTED_MARKER_RADIUS },
				color: if emphasized { self.style.emphasized } else { self.style.muted },
				emphasized,
			}
		});

		MarkerSet { minute, hours }
	}

	/// Paints the face disc and markers for `time` onto `disp`.
	pub fn render<D>(&self, disp: &mut D, bounds: &Rectangle, time: TimeSample) -> Result<MarkerSet, D::Error>
	where
		D: DrawTarget<Color = Rgb565>,
	{
		let geometry = self.geometry(bounds);
		let disc_style = PrimitiveStyleBuilder::new()
			.fill_color(self.style.face)
			.stroke_color(self.style.face)
			.stroke_width(1)
			.build();
		Circle::with_center(geometry.center, geometry.radius * 2 + 1)
			.into_styled(disc_style)
			.draw(disp)?;

		let markers = self.markers(bounds, time);
		for marker in markers.iter() {
			marker
				.circle()
				.into_styled(PrimitiveStyle::with_fill(marker.color))
				.draw(disp)?;
		}
		Ok(markers)
	}
}
