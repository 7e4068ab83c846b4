//! Device-dependent parameter sets and simulation tunables.
//!
//! Touch devices get a coarser curve (fewer particles) and shorter trails.
//! The device class is decided once at startup, before the curve is sampled.

use serde::Deserialize;

use super::types::EffectOptions;

/// User-agent fragments that mark a constrained (mobile/handheld) device.
const CONSTRAINED_AGENTS: &[&str] = &[
	"android",
	"webos",
	"iphone",
	"ipad",
	"ipod",
	"blackberry",
	"iemobile",
	"opera mini",
];

/// Broad device class selecting a [`DeviceProfile`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
	/// Handheld or low-power device.
	Constrained,
	/// Desktop-class device.
	#[default]
	Full,
}

impl DeviceClass {
	/// Classifies a user-agent string. A missing agent counts as [`DeviceClass::Full`].
	pub fn from_user_agent(agent: Option<&str>) -> Self {
		let Some(agent) = agent else {
			return Self::Full;
		};
		let agent = agent.to_lowercase();
		if CONSTRAINED_AGENTS.iter().any(|needle| agent.contains(needle)) {
			Self::Constrained
		} else {
			Self::Full
		}
	}
}

/// Curve and trail sizing for one device class.
#[derive(Clone, Debug)]
pub struct DeviceProfile {
	/// Class this profile was built for.
	pub class: DeviceClass,
	/// Angular step (radians) between curve samples.
	pub angular_step: f64,
	/// Positions kept per particle trail, head included.
	pub trail_length: usize,
	/// `(scale_x, scale_y)` of the three nested contours, outermost first.
	pub contours: [(f64, f64); 3],
}

impl DeviceProfile {
	const CONTOURS: [(f64, f64); 3] = [(210.0, 13.0), (150.0, 9.0), (90.0, 5.0)];

	/// Preset for `class`.
	pub fn for_class(class: DeviceClass) -> Self {
		match class {
			DeviceClass::Constrained => Self {
				class,
				angular_step: 0.3,
				trail_length: 20,
				contours: Self::CONTOURS,
			},
			DeviceClass::Full => Self {
				class,
				angular_step: 0.1,
				trail_length: 50,
				contours: Self::CONTOURS,
			},
		}
	}
}

impl Default for DeviceProfile {
	fn default() -> Self {
		Self::for_class(DeviceClass::Full)
	}
}

/// Physics and pacing constants.
#[derive(Clone, Debug)]
pub struct SimulationParams {
	/// Fraction of the gap each trail follower closes per tick.
	pub trace_k: f64,
	/// Base increment of the pulse clock per tick.
	pub time_delta: f64,
	/// Distance under which a particle counts as having reached its target.
	pub arrival_radius: f64,
	/// Chance of a long-range jump on arrival.
	pub jump_probability: f64,
	/// Chance of reversing cruise direction on arrival (when not jumping).
	pub flip_probability: f64,
	/// Floor for the pursuit distance used as a divisor.
	pub min_length: f64,
	/// `[min, max)` of per-particle pursuit speed.
	pub speed_range: (f64, f64),
	/// `[min, max)` of per-particle velocity damping.
	pub damping_range: (f64, f64),
	/// Nominal particle radius.
	pub radius: f64,
}

impl Default for SimulationParams {
	fn default() -> Self {
		Self {
			trace_k: 0.4,
			time_delta: 0.01,
			arrival_radius: 10.0,
			jump_probability: 0.05,
			flip_probability: 0.01,
			min_length: 0.001,
			speed_range: (5.0, 6.0),
			damping_range: (0.7, 0.9),
			radius: 2.0,
		}
	}
}

impl SimulationParams {
	/// Applies the finite, in-range overrides from `options`.
	pub fn with_options(mut self, options: &EffectOptions) -> Self {
		if let Some(k) = options.trace_k.filter(|k| k.is_finite() && (0.0..=1.0).contains(k)) {
			self.trace_k = k;
		}
		if let Some(dt) = options.time_delta.filter(|dt| dt.is_finite() && *dt > 0.0) {
			self.time_delta = dt;
		}
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn mobile_agents_are_constrained() {
		let agents = [
			"Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)",
			"Mozilla/5.0 (Linux; Android 14; Pixel 8)",
			"Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)",
		];
		for agent in agents {
			assert_eq!(
				DeviceClass::from_user_agent(Some(agent)),
				DeviceClass::Constrained,
				"{agent}"
			);
		}
	}

	#[test]
	fn desktop_and_missing_agents_are_full() {
		let desktop = "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/131.0";
		assert_eq!(DeviceClass::from_user_agent(Some(desktop)), DeviceClass::Full);
		assert_eq!(DeviceClass::from_user_agent(None), DeviceClass::Full);
	}

	#[test]
	fn profiles_differ_by_class() {
		let full = DeviceProfile::for_class(DeviceClass::Full);
		let mobile = DeviceProfile::for_class(DeviceClass::Constrained);
		assert_eq!(full.trail_length, 50);
		assert_eq!(mobile.trail_length, 20);
		assert!(mobile.angular_step > full.angular_step);
	}

	#[test]
	fn options_override_only_sane_values() {
		let opts = EffectOptions {
			trace_k: Some(0.25),
			time_delta: Some(-1.0),
			..Default::default()
		};
		let params = SimulationParams::default().with_options(&opts);
		assert_eq!(params.trace_k, 0.25);
		assert_eq!(params.time_delta, 0.01);
	}
}
