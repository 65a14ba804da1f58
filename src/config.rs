use std::{
	env, fs,
	path::{Path, PathBuf},
};

use embedded_graphics::{
	prelude::{Point, Size},
	primitives::Rectangle,
};
use serde::Deserialize;

use crate::{
	dial::{DisplayShape, DIAL_RADIUS},
	FaceError,
};

/// Path of a JSON file with a [`FaceConfig`].
pub const CONFIG_VAR: &str = "DIAL_FACE_CONFIG";
pub const SHAPE_VAR: &str = "DIAL_FACE_SHAPE";
pub const TIMEZONE_VAR: &str = "DIAL_FACE_TZ";
pub const USE_24H_VAR: &str = "DIAL_FACE_24H";
pub const STEPS_DB_VAR: &str = "DIAL_FACE_STEPS_DB";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FaceConfig {
	pub shape: DisplayShape,
	/// Defaults to the usual screen of `shape`.
	pub width: Option<u32>,
	pub height: Option<u32>,
	pub dial_radius: u32,
	/// IANA name, e.g. `Europe/Berlin`.
	pub timezone: String,
	pub use_24h: bool,
	pub steps_db: PathBuf,
}

impl Default for FaceConfig {
	fn default() -> Self {
		FaceConfig {
			shape: DisplayShape::Rect,
			width: None,
			height: None,
			dial_radius: DIAL_RADIUS,
			timezone: "Europe/Berlin".to_owned(),
			use_24h: true,
			steps_db: PathBuf::from("steps.db"),
		}
	}
}

impl FaceConfig {
	pub fn load(path: impl AsRef<Path>) -> Result<Self, FaceError> {
		let text = fs::read_to_string(path)?;
		Ok(serde_json::from_str(&text)?)
	}

	/// The file named by `DIAL_FACE_CONFIG` (or the defaults), with the
	/// other `DIAL_FACE_*` variables applied on top.
	pub fn from_env() -> Result<Self, FaceError> {
		let mut config = match env::var(CONFIG_VAR) {
			Ok(path) => Self::load(path)?,
			Err(_) => Self::default(),
		};
		config.apply_overrides(|name| env::var(name).ok())?;
		Ok(config)
	}

	pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), FaceError> {
		if let Some(shape) = lookup(SHAPE_VAR) {
			self.shape = shape.parse()?;
		}
		if let Some(timezone) = lookup(TIMEZONE_VAR) {
			self.timezone = timezone;
		}
		if let Some(flag) = lookup(USE_24H_VAR) {
			self.use_24h = parse_flag(USE_24H_VAR, &flag)?;
		}
		if let Some(path) = lookup(STEPS_DB_VAR) {
			self.steps_db = PathBuf::from(path);
		}
		Ok(())
	}

	pub fn size(&self) -> Size {
		let (width, height) = match self.shape {
			DisplayShape::Rect => (144, 168),
			DisplayShape::Round => (180, 180),
		};
		Size::new(self.width.unwrap_or(width), self.height.unwrap_or(height))
	}

	pub fn bounds(&self) -> Rectangle {
		Rectangle::new(Point::zero(), self.size())
	}
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, FaceError> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"0" | "false" | "no" | "off" => Ok(false),
		_ => Err(FaceError::InvalidSetting {
			name,
			value: value.to_owned(),
		}),
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
		move |name: &str| vars.get(name).cloned()
	}

	#[test]
	fn defaults_to_a_rectangular_screen() {
		let config = FaceConfig::default();
		assert_eq!(Size::new(144, 168), config.size());
		assert_eq!(DIAL_RADIUS, config.dial_radius);
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config: FaceConfig = serde_json::from_str(r#"{"shape": "round", "use_24h": false}"#).unwrap();
		assert_eq!(DisplayShape::Round, config.shape);
		assert!(!config.use_24h);
		assert_eq!("Europe/Berlin", config.timezone);
		assert_eq!(Size::new(180, 180), config.size());

		let config: FaceConfig = serde_json::from_str(r#"{"width": 128, "height": 128, "dial_radius": 50}"#).unwrap();
		assert_eq!(Rectangle::new(Point::zero(), Size::new(128, 128)), config.bounds());
		assert_eq!(50, config.dial_radius);
	}

	#[test]
	fn environment_overrides() {
		let mut config = FaceConfig::default();
		config
			.apply_overrides(lookup(&[
				(SHAPE_VAR, "round"),
				(TIMEZONE_VAR, "America/New_York"),
				(USE_24H_VAR, "no"),
				(STEPS_DB_VAR, "/tmp/steps.db"),
			]))
			.unwrap();
		assert_eq!(DisplayShape::Round, config.shape);
		assert_eq!("America/New_York", config.timezone);
		assert!(!config.use_24h);
		assert_eq!(PathBuf::from("/tmp/steps.db"), config.steps_db);
	}

	#[test]
	fn rejects_bad_values() {
		let mut config = FaceConfig::default();
		assert!(matches!(
			config.apply_overrides(lookup(&[(USE_24H_VAR, "maybe")])),
			Err(FaceError::InvalidSetting { name: USE_24H_VAR, .. })
		));
		assert!(config.apply_overrides(lookup(&[(SHAPE_VAR, "hexagon")])).is_err());
		assert!(matches!(
			serde_json::from_str::<FaceConfig>(r#"{"shape": "hexagon"}"#),
			Err(_)
		));
	}

	#[test]
	fn missing_file_is_io_error() {
		assert!(matches!(
			FaceConfig::load("/nonexistent/dial-face.json"),
			Err(FaceError::Io(_))
		));
	}
}
