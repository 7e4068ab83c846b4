//! The heartbeat clock.
//!
//! Pulse time does not advance uniformly: it races through the contracted
//! half of the cycle (9x), lingers near full expansion (0.2x), and walks at
//! 1x otherwise. That uneven stepping is what reads as a double beat.

/// Multiplier while `sin(time) < 0`.
const CONTRACT_RATE: f64 = 9.0;
/// Multiplier while the heart is nearly fully expanded.
const HOLD_RATE: f64 = 0.2;
/// `-cos(time)` above which the expansion hold applies.
const HOLD_THRESHOLD: f64 = 0.8;

/// Accumulating pulse time.
#[derive(Clone, Debug)]
pub struct PulseClock {
	time: f64,
	time_delta: f64,
}

impl PulseClock {
	/// Clock at time zero advancing `time_delta` per tick at the 1x rate.
	pub fn new(time_delta: f64) -> Self {
		Self {
			time: 0.0,
			time_delta,
		}
	}

	/// Accumulated pulse time.
	pub fn time(&self) -> f64 {
		self.time
	}

	/// Pulse scale in [0, 1] for the current time.
	pub fn pulse(&self) -> f64 {
		pulse_at(self.time)
	}

	/// Returns the current `(pulse_x, pulse_y)` and advances time by one tick.
	pub fn tick(&mut self) -> (f64, f64) {
		let n = -self.time.cos();
		let k = (1.0 + n) * 0.5;
		self.time += rate_at(self.time) * self.time_delta;
		(k, k)
	}
}

/// Pulse scale at `time`: `(1 - cos(time)) / 2`.
pub fn pulse_at(time: f64) -> f64 {
	(1.0 - time.cos()) * 0.5
}

/// Time-step multiplier at `time`.
pub fn rate_at(time: f64) -> f64 {
	if time.sin() < 0.0 {
		CONTRACT_RATE
	} else if -time.cos() > HOLD_THRESHOLD {
		HOLD_RATE
	} else {
		1.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use std::f64::consts::PI;

	#[test]
	fn starts_contracted() {
		let mut clock = PulseClock::new(0.01);
		assert_eq!(clock.tick(), (0.0, 0.0));
		assert!((clock.time() - 0.01).abs() < 1e-12);
	}

	#[test]
	fn rates_by_phase() {
		// Rising toward expansion.
		assert_eq!(rate_at(1.0), 1.0);
		// Near full expansion (-cos > 0.8) while sin >= 0.
		assert_eq!(rate_at(PI - 0.3), 0.2);
		// Falling half.
		assert_eq!(rate_at(PI + 0.5), 9.0);
	}

	#[test]
	fn a_full_beat_completes() {
		let mut clock = PulseClock::new(0.01);
		let mut ticks = 0;
		while clock.time() < 2.0 * PI {
			clock.tick();
			ticks += 1;
		}
		// Linger near the peak makes the beat longer than a uniform sweep of the rising half.
		assert!(ticks > 314);
		assert!(ticks < 1000);
	}

	proptest! {
		#[test]
		fn pulse_bounded_and_continuous(time in 0.0f64..1.0e4, dt in 0.001f64..0.05) {
			let mut clock = PulseClock { time, time_delta: dt };
			let (before, _) = clock.tick();
			let after = clock.pulse();
			prop_assert!((0.0..=1.0).contains(&before));
			prop_assert!((0.0..=1.0).contains(&after));
			// |d pulse / d time| <= 1/2, and time moved at most 9 * dt.
			prop_assert!((after - before).abs() <= 0.5 * CONTRACT_RATE * dt + 1e-12);
		}
	}
}
