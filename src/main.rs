use anyhow::Context as _;
use dial_face::{
	clock::SystemClock,
	config::FaceConfig,
	face::{ClockFace, WindowHandlers},
	health::SqliteHealth,
};
use env_logger::Env;
use log::info;

type Face = ClockFace<SystemClock, SqliteHealth>;

fn main() -> anyhow::Result<()> {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

	let config = FaceConfig::from_env().context("loading configuration")?;
	let clock = SystemClock::new(&config.timezone, config.use_24h)?;
	let health = SqliteHealth::open(&config.steps_db)
		.with_context(|| format!("opening step database {}", config.steps_db.display()))?;
	let face = ClockFace::new(&config, clock, health);

	run(face, &config)
}

#[cfg(not(feature = "pc"))]
fn run(mut face: Face, config: &FaceConfig) -> anyhow::Result<()> {
	use dial_face::Draw;
	use frame_output::FrameOutput;

	let path = std::env::var("DIAL_FACE_SNAPSHOT").unwrap_or_else(|_| "face.png".to_owned());
	let size = config.size();
	let mut disp = FrameOutput::new(size.width, size.height);
	face.on_load(config.bounds());
	let _ = face.draw(&mut disp);
	face.on_unload();
	disp.save_png(&path).with_context(|| format!("writing {path}"))?;
	info!("wrote {path}");
	Ok(())
}

#[cfg(feature = "pc")]
fn run(mut face: Face, config: &FaceConfig) -> anyhow::Result<()> {
	use std::{num::NonZeroU32, time::Duration};

	use dial_face::Draw;
	use frame_output::FrameOutput;
	use winit::{
		dpi::LogicalSize,
		event::{Event, WindowEvent},
		event_loop::EventLoop,
		window::WindowBuilder,
	};

	let size = config.size();
	let event_loop = EventLoop::new();
	let window = WindowBuilder::new()
		.with_title("dial-face")
		.with_inner_size(LogicalSize::new(size.width, size.height))
		.with_resizable(false)
		.build(&event_loop)?;
	let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| anyhow::anyhow!("softbuffer: {e}"))?;
	let mut surface =
		unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| anyhow::anyhow!("softbuffer: {e}"))?;

	let mut disp = FrameOutput::new(size.width, size.height);
	face.on_load(config.bounds());

	event_loop.run(move |event, _, control_flow| {
		control_flow.set_wait_timeout(Duration::from_millis(500));

		match event {
			Event::WindowEvent {
				event: WindowEvent::CloseRequested,
				..
			} => {
				info!("window closed");
				face.on_unload();
				control_flow.set_exit();
			},
			Event::MainEventsCleared => {
				face.poll_tick();
				if face.needs_redraw() {
					window.request_redraw();
				}
			},
			Event::RedrawRequested(window_id) if window_id == window.id() => {
				let (width, height) = {
					let size = window.inner_size();
					(size.width, size.height)
				};
				let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
					return;
				};
				if surface.resize(w, h).is_err() {
					return;
				}

				// frame-output never fails
				let _ = face.draw(&mut disp);

				let Ok(mut buffer) = surface.buffer_mut() else {
					return;
				};
				for index in 0..(width * height) {
					let y = index / width;
					let x = index % width;
					buffer[index as usize] = disp.xrgb(x, y);
				}
				let _ = buffer.present();
			},
			_ => (),
		}
	});
}
