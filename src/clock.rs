use heapless::String;
use time::{macros::format_description, OffsetDateTime, Time};
use time_tz::{timezones, OffsetDateTimeExt, OffsetResult, PrimitiveDateTimeExt, Tz};

use crate::FaceError;

/// `hh:mm`
pub const TIME_TEXT_LEN: usize = 8;
/// `Www dd Mmm`
pub const DATE_TEXT_LEN: usize = 16;

pub type TimeText = String<TIME_TEXT_LEN>;
pub type DateText = String<DATE_TEXT_LEN>;

/// Hour and minute of one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSample {
	/// 0..=23
	pub hour: u8,
	/// 0..=59
	pub minute: u8,
}

impl TimeSample {
	pub const fn new(hour: u8, minute: u8) -> Self {
		TimeSample { hour, minute }
	}
}

impl From<OffsetDateTime> for TimeSample {
	fn from(time: OffsetDateTime) -> Self {
		TimeSample::new(time.hour(), time.minute())
	}
}

/// Wall clock of the host.
pub trait Clock {
	/// Current local time.
	fn now(&self) -> OffsetDateTime;

	/// Whether the wearer prefers 24 hour time.
	fn is_24h_style(&self) -> bool;

	/// Local midnight of the day `now` falls on. Keeps `now`'s offset, which
	/// is wrong on days the zone changes offset; zone-aware clocks override it.
	fn start_of_day(&self, now: OffsetDateTime) -> OffsetDateTime {
		now.replace_time(Time::MIDNIGHT)
	}
}

#[derive(Clone, Copy)]
pub struct SystemClock {
	tz: &'static Tz,
	use_24h: bool,
}

impl SystemClock {
	pub fn new(timezone: &str, use_24h: bool) -> Result<Self, FaceError> {
		let tz = timezones::get_by_name(timezone).ok_or_else(|| FaceError::UnknownTimezone(timezone.to_owned()))?;
		Ok(SystemClock { tz, use_24h })
	}
}

impl Clock for SystemClock {
	fn now(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc().to_timezone(self.tz)
	}

	fn is_24h_style(&self) -> bool {
		self.use_24h
	}

	fn start_of_day(&self, now: OffsetDateTime) -> OffsetDateTime {
		let now = now.to_timezone(self.tz);
		match now.date().midnight().assume_timezone(self.tz) {
			OffsetResult::Some(midnight) | OffsetResult::Ambiguous(midnight, _) => midnight,
			// midnight skipped by a transition: keep now's offset
			OffsetResult::None => now.replace_time(Time::MIDNIGHT),
		}
	}
}

pub fn format_time(now: OffsetDateTime, use_24h: bool) -> Result<TimeText, FaceError> {
	let text = if use_24h {
		now.format(format_description!("[hour]:[minute]"))?
	} else {
		now.format(format_description!("[hour repr:12]:[minute]"))?
	};
	bounded(&text)
}

pub fn format_date(now: OffsetDateTime) -> Result<DateText, FaceError> {
	let text = now.format(format_description!("[weekday repr:short] [day] [month repr:short]"))?;
	bounded(&text)
}

fn bounded<const N: usize>(text: &str) -> Result<String<N>, FaceError> {
	let mut out = String::new();
	out.push_str(text).map_err(|_| FaceError::TextOverflow)?;
	Ok(out)
}
