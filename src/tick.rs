use time::OffsetDateTime;

/// Fires once whenever the wall clock enters a new minute.
/// Guaranteed to fire if polled at least once every minute.
#[derive(Debug, Clone, Default)]
pub struct MinuteTicker {
	last: Option<i64>,
}

impl MinuteTicker {
	pub fn new() -> Self {
		Self::default()
	}

	/// A ticker that treats `now`'s minute as already handled.
	pub fn starting_at(now: OffsetDateTime) -> Self {
		MinuteTicker {
			last: Some(key(now)),
		}
	}

	pub fn poll(&mut self, now: OffsetDateTime) -> bool {
		let key = key(now);
		if self.last == Some(key) {
			return false;
		}
		self.last = Some(key);
		true
	}
}

/// Whole minutes since the epoch.
fn key(now: OffsetDateTime) -> i64 {
	now.unix_timestamp().div_euclid(60)
}
