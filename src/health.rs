use std::{fmt::Write, ops::BitOr, path::Path};

use heapless::String;
use log::warn;
use rusqlite::{params, Connection};
use time::OffsetDateTime;

use crate::FaceError;

/// Longest step count shown, plus the placeholder.
pub const STEP_TEXT_LEN: usize = 8;

pub type StepText = String<STEP_TEXT_LEN>;

/// Shown when no step data exists for today.
pub const NO_STEPS: &str = "none";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthMetric {
	StepCount,
	ActiveSeconds,
}

/// Flags describing whether a metric can be read for a time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AccessibilityMask(u8);

impl AccessibilityMask {
	pub const NONE: AccessibilityMask = AccessibilityMask(0);
	pub const AVAILABLE: AccessibilityMask = AccessibilityMask(1 << 0);
	pub const NO_PERMISSION: AccessibilityMask = AccessibilityMask(1 << 1);
	pub const NOT_SUPPORTED: AccessibilityMask = AccessibilityMask(1 << 2);
	pub const NOT_AVAILABLE: AccessibilityMask = AccessibilityMask(1 << 3);

	pub const fn contains(self, other: AccessibilityMask) -> bool {
		self.0 & other.0 == other.0
	}
}

impl BitOr for AccessibilityMask {
	type Output = AccessibilityMask;

	fn bitor(self, rhs: AccessibilityMask) -> AccessibilityMask {
		AccessibilityMask(self.0 | rhs.0)
	}
}

/// Activity data recorded by the host.
pub trait HealthService {
	fn metric_accessible(&self, metric: HealthMetric, start: OffsetDateTime, end: OffsetDateTime) -> AccessibilityMask;

	/// Sum of `metric` over `start..=end`. Only meaningful if
	/// [`HealthService::metric_accessible`] reported `AVAILABLE`.
	fn sum(&self, metric: HealthMetric, start: OffsetDateTime, end: OffsetDateTime) -> i64;
}

/// Text for the step layer: the step count, or [`NO_STEPS`] if the host has none
/// (or refuses access).
pub fn step_text<H: HealthService + ?Sized>(
	health: &H,
	start: OffsetDateTime,
	end: OffsetDateTime,
) -> Result<StepText, FaceError> {
	let mut text = StepText::new();
	let mask = health.metric_accessible(HealthMetric::StepCount, start, end);
	if mask.contains(AccessibilityMask::AVAILABLE) {
		let steps = health.sum(HealthMetric::StepCount, start, end);
		write!(text, "{}", steps).map_err(|_| FaceError::TextOverflow)?;
	} else {
		text.push_str(NO_STEPS).map_err(|_| FaceError::TextOverflow)?;
	}
	Ok(text)
}

/// Step samples stored in sqlite, one row per sample.
pub struct SqliteHealth {
	database: Connection,
}

impl SqliteHealth {
	pub fn open(path: impl AsRef<Path>) -> Result<Self, FaceError> {
		Self::with_connection(Connection::open(path)?)
	}

	pub fn with_connection(database: Connection) -> Result<Self, FaceError> {
		database.execute(
			"
			CREATE TABLE IF NOT EXISTS step_samples(
				time INTEGER PRIMARY KEY,
				steps INTEGER NOT NULL
			)",
			[],
		)?;
		Ok(SqliteHealth { database })
	}

	pub fn record(&self, at: OffsetDateTime, steps: i64) -> Result<(), FaceError> {
		self.database.execute(
			"INSERT OR REPLACE INTO step_samples (time, steps) VALUES (?1, ?2)",
			params![at.unix_timestamp(), steps],
		)?;
		Ok(())
	}

	/// (sample count, step sum)
	fn steps_between(&self, start: OffsetDateTime, end: OffsetDateTime) -> rusqlite::Result<(i64, i64)> {
		self.database.query_row(
			"SELECT COUNT(*), COALESCE(SUM(steps), 0) FROM step_samples WHERE time >= ?1 AND time <= ?2",
			params![start.unix_timestamp(), end.unix_timestamp()],
			|row| Ok((row.get(0)?, row.get(1)?)),
		)
	}
}

impl HealthService for SqliteHealth {
	fn metric_accessible(&self, metric: HealthMetric, start: OffsetDateTime, end: OffsetDateTime) -> AccessibilityMask {
		if metric != HealthMetric::StepCount {
			return AccessibilityMask::NOT_SUPPORTED;
		}
		match self.steps_between(start, end) {
			Ok((0, _)) => AccessibilityMask::NOT_AVAILABLE,
			Ok(_) => AccessibilityMask::AVAILABLE,
			Err(e) => {
				warn!("step database unreadable: {e}");
				AccessibilityMask::NO_PERMISSION
			},
		}
	}

	fn sum(&self, metric: HealthMetric, start: OffsetDateTime, end: OffsetDateTime) -> i64 {
		if metric != HealthMetric::StepCount {
			return 0;
		}
		match self.steps_between(start, end) {
			Ok((_, steps)) => steps,
			Err(e) => {
				warn!("step database unreadable: {e}");
				0
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	struct Fixed {
		mask: AccessibilityMask,
		steps: i64,
	}

	impl HealthService for Fixed {
		fn metric_accessible(&self, _: HealthMetric, _: OffsetDateTime, _: OffsetDateTime) -> AccessibilityMask {
			self.mask
		}

		fn sum(&self, _: HealthMetric, _: OffsetDateTime, _: OffsetDateTime) -> i64 {
			self.steps
		}
	}

	const START: OffsetDateTime = datetime!(2026-10-18 0:00 +2);
	const NOW: OffsetDateTime = datetime!(2026-10-18 14:37 +2);

	#[test]
	fn shows_available_steps() {
		let health = Fixed {
			mask: AccessibilityMask::AVAILABLE,
			steps: 5234,
		};
		assert_eq!("5234", step_text(&health, START, NOW).unwrap().as_str());
	}

	#[test]
	fn placeholder_without_data() {
		for mask in [
			AccessibilityMask::NONE,
			AccessibilityMask::NOT_AVAILABLE,
			AccessibilityMask::NO_PERMISSION,
			AccessibilityMask::NO_PERMISSION | AccessibilityMask::NOT_SUPPORTED,
		] {
			let health = Fixed { mask, steps: 5234 };
			assert_eq!(NO_STEPS, step_text(&health, START, NOW).unwrap().as_str());
		}
	}

	#[test]
	fn huge_counts_overflow() {
		let health = Fixed {
			mask: AccessibilityMask::AVAILABLE,
			steps: 1_000_000_000,
		};
		assert!(matches!(step_text(&health, START, NOW), Err(FaceError::TextOverflow)));
	}

	#[test]
	fn sqlite_sums_today() {
		let health = SqliteHealth::with_connection(Connection::open_in_memory().unwrap()).unwrap();
		assert_eq!(
			AccessibilityMask::NOT_AVAILABLE,
			health.metric_accessible(HealthMetric::StepCount, START, NOW)
		);
		health.record(datetime!(2026-10-17 23:50 +2), 900).unwrap();
		health.record(datetime!(2026-10-18 8:15 +2), 4000).unwrap();
		health.record(datetime!(2026-10-18 12:00 +2), 1234).unwrap();
		assert!(health
			.metric_accessible(HealthMetric::StepCount, START, NOW)
			.contains(AccessibilityMask::AVAILABLE));
		assert_eq!(5234, health.sum(HealthMetric::StepCount, START, NOW));
		assert_eq!("5234", step_text(&health, START, NOW).unwrap().as_str());
	}

	#[test]
	fn sqlite_only_counts_steps() {
		let health = SqliteHealth::with_connection(Connection::open_in_memory().unwrap()).unwrap();
		health.record(datetime!(2026-10-18 8:15 +2), 4000).unwrap();
		assert_eq!(
			AccessibilityMask::NOT_SUPPORTED,
			health.metric_accessible(HealthMetric::ActiveSeconds, START, NOW)
		);
		assert_eq!(0, health.sum(HealthMetric::ActiveSeconds, START, NOW));
	}

	#[test]
	fn unreadable_database_is_no_permission() {
		let health = SqliteHealth::with_connection(Connection::open_in_memory().unwrap()).unwrap();
		health.database.execute("DROP TABLE step_samples", []).unwrap();
		assert_eq!(
			AccessibilityMask::NO_PERMISSION,
			health.metric_accessible(HealthMetric::StepCount, START, NOW)
		);
		assert_eq!(NO_STEPS, step_text(&health, START, NOW).unwrap().as_str());
	}
}
