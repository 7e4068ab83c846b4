//! Particles chasing the pulsing heart curve.
//!
//! One particle per base point. Each tick every particle steers at constant
//! speed toward its current target point, and on arrival either creeps to the
//! neighboring sample (occasionally reversing) or, rarely, jumps to a random
//! point on the curve. A chain of smoothed followers behind the head gives each
//! particle its comet tail.

use super::profile::SimulationParams;
use super::rng::Xorshift64;
use super::theme::ParticleStyle;
use super::types::Point;

/// A single simulated particle.
#[derive(Clone, Debug)]
pub struct Particle {
	/// Horizontal velocity, px/tick.
	pub vx: f64,
	/// Vertical velocity, px/tick.
	pub vy: f64,
	/// Nominal size; trail points are painted at the theme's point size.
	pub radius: f64,
	/// Steering impulse added per tick, in px/tick.
	pub speed: f64,
	/// Velocity multiplier applied after each move.
	pub force_damping: f64,
	/// Index of the target point currently pursued.
	pub target_index: usize,
	/// +1 or -1: which way the target index advances when cruising.
	pub direction: isize,
	/// CSS fill style, fixed at creation.
	pub color: String,
	trail: Vec<Point>,
}

impl Particle {
	/// Creates particle `index` at rest at `spawn`, its whole trail collapsed onto that point.
	pub fn spawn(
		index: usize,
		spawn: Point,
		trail_length: usize,
		target_count: usize,
		params: &SimulationParams,
		style: &ParticleStyle,
		rng: &mut Xorshift64,
	) -> Self {
		let speed = rng.next_range(params.speed_range.0, params.speed_range.1);
		let target_index = rng.next_index(target_count);
		let force_damping = rng.next_range(params.damping_range.0, params.damping_range.1);
		let color = style.pick(rng);

		Self {
			vx: 0.0,
			vy: 0.0,
			radius: params.radius,
			speed,
			force_damping,
			target_index,
			direction: if index % 2 == 1 { 1 } else { -1 },
			color,
			trail: vec![spawn; trail_length.max(1)],
		}
	}

	/// Current head position.
	pub fn head(&self) -> Point {
		self.trail[0]
	}

	/// Head followed by its followers, oldest last.
	pub fn trail(&self) -> &[Point] {
		&self.trail
	}

	/// Picks the next target after arriving at the current one.
	fn choose_next_target(&mut self, count: usize, params: &SimulationParams, rng: &mut Xorshift64) {
		if rng.chance(params.jump_probability) {
			self.target_index = rng.next_index(count);
			return;
		}
		if rng.chance(params.flip_probability) {
			self.direction = -self.direction;
		}
		self.target_index =
			(self.target_index as isize + self.direction).rem_euclid(count as isize) as usize;
	}

	/// Steers against `(dx, dy)` (head minus target), moves the head, then applies drag.
	fn pursue(&mut self, dx: f64, dy: f64, length: f64) {
		self.vx += -dx / length * self.speed;
		self.vy += -dy / length * self.speed;
		self.trail[0] = self.trail[0].offset(self.vx, self.vy);
		self.vx *= self.force_damping;
		self.vy *= self.force_damping;
	}

	/// Pulls each follower a fraction of the way toward the point ahead of it.
	fn relax_trail(&mut self, trace_k: f64) {
		for k in 1..self.trail.len() {
			self.trail[k] = self.trail[k].approach(self.trail[k - 1], trace_k);
		}
	}
}

/// Owns every particle plus the per-tick target points they chase.
pub struct ParticleField {
	/// One particle per base point, in curve order.
	pub particles: Vec<Particle>,
	targets: Vec<Point>,
	params: SimulationParams,
	rng: Xorshift64,
}

impl ParticleField {
	/// Spawns one particle per base point at uniformly random positions on a
	/// `width` x `height` surface.
	pub fn new(
		base: &[Point],
		trail_length: usize,
		width: f64,
		height: f64,
		params: SimulationParams,
		style: &ParticleStyle,
		mut rng: Xorshift64,
	) -> Self {
		let count = base.len();
		let mut particles = Vec::with_capacity(count);

		for i in 0..count {
			let x = rng.next_f64() * width;
			let y = rng.next_f64() * height;
			particles.push(Particle::spawn(
				i,
				Point::new(x, y),
				trail_length,
				count,
				&params,
				style,
				&mut rng,
			));
		}

		Self {
			particles,
			targets: base.to_vec(),
			params,
			rng,
		}
	}

	/// Number of particles.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// True when there are no particles.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Target points from the most recent [`retarget`](Self::retarget).
	pub fn targets(&self) -> &[Point] {
		&self.targets
	}

	/// Scales the base points by the pulse and centers them on `center`.
	pub fn retarget(&mut self, pulse_x: f64, pulse_y: f64, center: Point, base: &[Point]) {
		self.targets.clear();
		self.targets.extend(
			base.iter()
				.map(|p| Point::new(pulse_x * p.x + center.x, pulse_y * p.y + center.y)),
		);
	}

	/// Advances every particle by one tick.
	pub fn step(&mut self) {
		let count = self.targets.len();
		if count == 0 {
			return;
		}
		let params = &self.params;
		let rng = &mut self.rng;

		for p in &mut self.particles {
			if p.target_index >= count {
				p.target_index %= count;
			}
			let q = self.targets[p.target_index];
			let head = p.head();
			let (dx, dy) = (head.x - q.x, head.y - q.y);
			let length = (dx * dx + dy * dy).sqrt();

			if length < params.arrival_radius {
				p.choose_next_target(count, params, rng);
			}

			p.pursue(dx, dy, length.max(params.min_length));
			p.relax_trail(params.trace_k);
		}
	}
}
