//! Simulation context for the heart effect.
//!
//! Holds everything one frame needs: the immutable base points, the particle
//! field, the pulse clock, the caption and the current surface size. Created
//! once when the component mounts; the frame loop then calls [`HeartState::tick`]
//! followed by a render every frame.

use log::info;

use super::curve::base_points;
use super::particles::ParticleField;
use super::profile::{DeviceProfile, SimulationParams};
use super::pulse::PulseClock;
use super::rng::Xorshift64;
use super::theme::Theme;
use super::types::Point;

/// Everything the frame loop mutates, in one place.
pub struct HeartState {
	base: Vec<Point>,
	/// The particles and their current targets.
	pub field: ParticleField,
	clock: PulseClock,
	/// Caption drawn over the effect, if any.
	pub caption: Option<String>,
	/// Sizing the base points and trails were built with.
	pub profile: DeviceProfile,
	/// Surface width in CSS pixels.
	pub width: f64,
	/// Surface height in CSS pixels.
	pub height: f64,
}

impl HeartState {
	/// Samples the curve and spawns the field on a `width` x `height` surface.
	pub fn new(
		profile: DeviceProfile,
		params: SimulationParams,
		theme: &Theme,
		caption: Option<String>,
		width: f64,
		height: f64,
		rng: Xorshift64,
	) -> Self {
		let base = base_points(&profile);
		let clock = PulseClock::new(params.time_delta);
		let field = ParticleField::new(
			&base,
			profile.trail_length,
			width,
			height,
			params,
			&theme.particles,
			rng,
		);
		info!(
			"heart-pulse: {} particles ({:?} profile), trail length {}",
			field.len(),
			profile.class,
			profile.trail_length
		);

		Self {
			base,
			field,
			clock,
			caption,
			profile,
			width,
			height,
		}
	}

	/// The base points, in curve order.
	pub fn base(&self) -> &[Point] {
		&self.base
	}

	/// Surface center; the heart is drawn around it.
	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}

	/// One simulation tick: pulse, retarget, step.
	pub fn tick(&mut self) {
		let (kx, ky) = self.clock.tick();
		let center = self.center();
		self.field.retarget(kx, ky, center, &self.base);
		self.field.step();
	}

	/// Adopts a new surface size. Particles keep their state.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::heart::profile::DeviceClass;

	fn state(seed: u64) -> HeartState {
		HeartState::new(
			DeviceProfile::for_class(DeviceClass::Constrained),
			SimulationParams::default(),
			&Theme::default(),
			None,
			640.0,
			480.0,
			Xorshift64::new(seed),
		)
	}

	#[test]
	fn first_tick_targets_collapsed_heart_at_center() {
		let mut s = state(1);
		s.tick();
		// pulse starts at 0, so every target sits on the center.
		assert!(s.field.targets().iter().all(|&t| t == Point::new(320.0, 240.0)));
		assert!(s.clock.time() > 0.0);
	}

	#[test]
	fn targets_follow_the_new_center_after_resize() {
		let mut s = state(2);
		for _ in 0..50 {
			s.tick();
		}
		let heads: Vec<Point> = s.field.particles.iter().map(|p| p.head()).collect();
		s.resize(1000.0, 1000.0);
		assert_eq!(s.center(), Point::new(500.0, 500.0));
		// Resizing alone leaves particle state untouched.
		let after: Vec<Point> = s.field.particles.iter().map(|p| p.head()).collect();
		assert_eq!(heads, after);

		let pulse = s.clock.pulse();
		s.tick();
		for (t, b) in s.field.targets().iter().zip(s.base()) {
			assert_eq!(*t, Point::new(pulse * b.x + 500.0, pulse * b.y + 500.0));
		}
	}

	#[test]
	fn seeded_states_evolve_identically() {
		let mut a = state(9);
		let mut b = state(9);
		for _ in 0..120 {
			a.tick();
			b.tick();
		}
		for (pa, pb) in a.field.particles.iter().zip(&b.field.particles) {
			assert_eq!(pa.trail(), pb.trail());
		}
	}
}
