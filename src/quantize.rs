/// Minutes between two minute marker positions.
pub const MINUTE_STEP: u8 = 5;

/// Rounds `minute` down to the previous multiple of five.
/// Values past 59 are not clock minutes and land on 55.
pub const fn quantize_minute_down(minute: u8) -> u8 {
	let minute = if minute > 59 { 59 } else { minute };
	minute / MINUTE_STEP * MINUTE_STEP
}

/// 24 hour clock hour to its position on the twelve hour dial.
pub const fn reduce_hour(hour: u8) -> u8 {
	hour % 12
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn rounds_down_to_five() {
		for minute in 0..5 {
			assert_eq!(0, quantize_minute_down(minute));
		}
		for minute in 5..10 {
			assert_eq!(5, quantize_minute_down(minute));
		}
		assert_eq!(35, quantize_minute_down(37));
		assert_eq!(55, quantize_minute_down(59));
		assert_eq!(55, quantize_minute_down(60));
	}

	#[test]
	fn reduced_hours() {
		assert_eq!(0, reduce_hour(0));
		assert_eq!(11, reduce_hour(11));
		assert_eq!(0, reduce_hour(12));
		assert_eq!(1, reduce_hour(13));
		assert_eq!(2, reduce_hour(14));
		assert_eq!(11, reduce_hour(23));
	}

	proptest! {
		#[test]
		fn quantized_minute_is_the_tick_at_or_below(minute in 0u8..60) {
			let q = quantize_minute_down(minute);
			prop_assert_eq!(0, q % MINUTE_STEP);
			prop_assert!(q <= minute && minute < q + MINUTE_STEP);
		}

		#[test]
		fn reduced_hour_is_on_the_dial(hour in 0u8..24) {
			prop_assert!(reduce_hour(hour) < 12);
		}
	}
}
