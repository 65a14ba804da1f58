use thiserror::Error;

#[derive(Debug, Error)]
pub enum FaceError {
	#[error("step database: {0}")]
	Database(#[from] rusqlite::Error),
	#[error("config file: {0}")]
	Config(#[from] serde_json::Error),
	#[error("i/o: {0}")]
	Io(#[from] std::io::Error),
	#[error("unknown timezone `{0}`")]
	UnknownTimezone(String),
	#[error("invalid value `{value}` for {name}")]
	InvalidSetting { name: &'static str, value: String },
	#[error("formatting time: {0}")]
	Format(#[from] time::error::Format),
	#[error("text does not fit its layer")]
	TextOverflow,
}
