use std::cell::Cell;

use embedded_graphics::{
	mono_font::{
		ascii::{FONT_10X20, FONT_9X15_BOLD},
		MonoFont,
	},
	prelude::{Point, Primitive, Size},
	primitives::{PrimitiveStyle, Rectangle},
	Drawable,
};
use log::{debug, info, warn};

use crate::{
	clock::{format_date, format_time, Clock, TimeSample, DATE_TEXT_LEN, TIME_TEXT_LEN},
	config::FaceConfig,
	dial::{DialRenderer, DisplayShape, MarkerSet},
	health::{step_text, HealthService, STEP_TEXT_LEN},
	text::TextLayer,
	tick::MinuteTicker,
	Draw, DrawTarget, Rgb565, BLACK,
};

/// Lifecycle hooks the host calls on the face's window.
pub trait WindowHandlers {
	fn on_load(&mut self, bounds: Rectangle);
	fn on_minute_tick(&mut self);
	fn on_unload(&mut self);
}

/// Text row: top edge, height, font.
#[derive(Clone, Copy)]
struct Row {
	y: i32,
	height: u32,
	font: &'static MonoFont<'static>,
}

impl Row {
	fn frame(&self, bounds: &Rectangle) -> Rectangle {
		Rectangle::new(
			bounds.top_left + Point::new(0, self.y),
			Size::new(bounds.size.width, self.height),
		)
	}
}

/// Rows for (time, date, steps).
fn rows(shape: DisplayShape) -> (Row, Row, Row) {
	let (time_y, date_y, steps_y) = match shape {
		DisplayShape::Rect => (40, 90, 112),
		DisplayShape::Round => (65, 45, 115),
	};
	(
		Row {
			y: time_y,
			height: 50,
			font: &FONT_10X20,
		},
		Row {
			y: date_y,
			height: 21,
			font: &FONT_9X15_BOLD,
		},
		Row {
			y: steps_y,
			height: 50,
			font: &FONT_9X15_BOLD,
		},
	)
}

/// Everything created on window load and destroyed on unload.
struct Layers {
	bounds: Rectangle,
	time: Option<TimeSample>,
	time_layer: TextLayer<TIME_TEXT_LEN>,
	date_layer: TextLayer<DATE_TEXT_LEN>,
	step_layer: TextLayer<STEP_TEXT_LEN>,
}

impl Layers {
	fn new(bounds: Rectangle, shape: DisplayShape) -> Self {
		let (time_row, date_row, step_row) = rows(shape);
		let mut layers = Layers {
			bounds,
			time: None,
			time_layer: TextLayer::new(time_row.frame(&bounds), time_row.font),
			date_layer: TextLayer::new(date_row.frame(&bounds), date_row.font),
			step_layer: TextLayer::new(step_row.frame(&bounds), step_row.font),
		};
		// both fit their buffers
		let _ = layers.time_layer.set_text("00:00");
		let _ = layers.step_layer.set_text("Steps");
		layers
	}
}

/// The watch face: dial, time, date and steps, refreshed once per minute.
pub struct ClockFace<C, H> {
	dial: DialRenderer,
	background: Rgb565,
	clock: C,
	health: H,
	ticker: MinuteTicker,
	layers: Option<Layers>,
	dirty: Cell<bool>,
}

impl<C: Clock, H: HealthService> ClockFace<C, H> {
	pub fn new(config: &FaceConfig, clock: C, health: H) -> Self {
		ClockFace {
			dial: DialRenderer::new(config.dial_radius, config.shape),
			background: BLACK,
			clock,
			health,
			ticker: MinuteTicker::new(),
			layers: None,
			dirty: Cell::new(false),
		}
	}

	pub fn clock(&self) -> &C {
		&self.clock
	}

	pub fn health(&self) -> &H {
		&self.health
	}

	pub fn is_loaded(&self) -> bool {
		self.layers.is_some()
	}

	/// Whether the next [`Draw::draw`] will paint.
	pub fn needs_redraw(&self) -> bool {
		self.layers.is_some() && self.dirty.get()
	}

	pub fn time_text(&self) -> Option<&str> {
		self.layers.as_ref().map(|l| l.time_layer.text())
	}

	pub fn date_text(&self) -> Option<&str> {
		self.layers.as_ref().map(|l| l.date_layer.text())
	}

	pub fn step_text(&self) -> Option<&str> {
		self.layers.as_ref().map(|l| l.step_layer.text())
	}

	/// Time shown by the dial, once refreshed.
	pub fn time_sample(&self) -> Option<TimeSample> {
		self.layers.as_ref().and_then(|l| l.time)
	}

	/// Markers the next draw will paint.
	pub fn markers(&self) -> Option<MarkerSet> {
		let layers = self.layers.as_ref()?;
		Some(self.dial.markers(&layers.bounds, layers.time?))
	}

	/// Checks the clock and runs [`WindowHandlers::on_minute_tick`] if a new
	/// minute started. Returns whether it did.
	pub fn poll_tick(&mut self) -> bool {
		if self.layers.is_none() || !self.ticker.poll(self.clock.now()) {
			return false;
		}
		self.on_minute_tick();
		true
	}

	fn refresh(&mut self) {
		let Some(layers) = self.layers.as_mut() else {
			debug!("refresh without window ignored");
			return;
		};
		let now = self.clock.now();

		let time_text = format_time(now, self.clock.is_24h_style());
		if let Err(e) = time_text.and_then(|text| layers.time_layer.set_text(&text)) {
			warn!("time not updated: {e}");
		}
		if let Err(e) = format_date(now).and_then(|text| layers.date_layer.set_text(&text)) {
			warn!("date not updated: {e}");
		}
		let steps = step_text(&self.health, self.clock.start_of_day(now), now);
		if let Err(e) = steps.and_then(|text| layers.step_layer.set_text(&text)) {
			warn!("steps not updated: {e}");
		}

		let time = TimeSample::from(now);
		layers.time = Some(time);
		self.dirty.set(true);
		debug!(
			"refreshed at {:02}:{:02}, steps {}",
			time.hour,
			time.minute,
			layers.step_layer.text()
		);
	}
}

impl<C: Clock, H: HealthService> WindowHandlers for ClockFace<C, H> {
	fn on_load(&mut self, bounds: Rectangle) {
		info!(
			"loading {} face {}x{}",
			self.dial.shape(),
			bounds.size.width,
			bounds.size.height
		);
		self.layers = Some(Layers::new(bounds, self.dial.shape()));
		self.ticker = MinuteTicker::starting_at(self.clock.now());
		self.refresh();
	}

	fn on_minute_tick(&mut self) {
		self.refresh();
	}

	fn on_unload(&mut self) {
		if self.layers.take().is_some() {
			info!("face unloaded");
		}
		self.dirty.set(false);
	}
}

impl<C, H, D> Draw<D> for ClockFace<C, H>
where
	C: Clock,
	H: HealthService,
	D: DrawTarget<Color = Rgb565>,
{
	fn draw(&self, disp: &mut D) -> Result<bool, D::Error> {
		let Some(layers) = self.layers.as_ref() else {
			return Ok(false);
		};
		if !self.dirty.get() {
			return Ok(false);
		}
		layers
			.bounds
			.into_styled(PrimitiveStyle::with_fill(self.background))
			.draw(disp)?;
		if let Some(time) = layers.time {
			self.dial.render(disp, &layers.bounds, time)?;
		}
		layers.date_layer.draw(disp)?;
		layers.time_layer.draw(disp)?;
		layers.step_layer.draw(disp)?;
		self.dirty.set(false);
		Ok(true)
	}
}
