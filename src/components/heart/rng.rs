//! Seedable pseudo-random number generator (xorshift64).
//!
//! Every random draw in the effect (spawn positions, per-particle constants,
//! re-targeting decisions) goes through one generator so a fixed seed replays
//! the same animation.

/// Xorshift64 generator. Same seed, same sequence.
#[derive(Clone, Debug)]
pub struct Xorshift64 {
	state: u64,
}

impl Xorshift64 {
	/// Replaces a zero seed, which is a fixed point of xorshift.
	const FALLBACK_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

	/// Creates a generator from `seed` (0 is remapped to a non-zero constant).
	pub fn new(seed: u64) -> Self {
		Self {
			state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
		}
	}

	/// Seeds from the browser's `Math.random` and the wall clock.
	///
	/// Only meaningful on wasm; the JS imports are not linked on native hosts.
	pub fn from_entropy() -> Self {
		let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
		let lo = js_sys::Date::now() as u64;
		Self::new((hi << 32) ^ lo)
	}

	/// Advances the state and returns the next 64-bit value (shifts 13, 7, 17).
	pub fn next_u64(&mut self) -> u64 {
		let mut x = self.state;
		x ^= x << 13;
		x ^= x >> 7;
		x ^= x << 17;
		self.state = x;
		x
	}

	/// Uniform f64 in [0, 1) from the upper 53 bits.
	pub fn next_f64(&mut self) -> f64 {
		(self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
	}

	/// Uniform f64 in [min, max).
	pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
		min + self.next_f64() * (max - min)
	}

	/// Uniform index in [0, upper). Returns 0 when `upper` is 0.
	pub fn next_index(&mut self, upper: usize) -> usize {
		if upper == 0 {
			return 0;
		}
		(self.next_u64() % upper as u64) as usize
	}

	/// True with probability `p`.
	pub fn chance(&mut self, p: f64) -> bool {
		self.next_f64() < p
	}
}
