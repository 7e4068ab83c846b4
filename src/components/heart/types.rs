//! Value types shared by the simulation and the options input.

use log::warn;
use serde::Deserialize;

use super::profile::{DeviceClass, DeviceProfile, SimulationParams};
use super::theme::Theme;

/// An immutable 2D point (or displacement) in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate, growing rightward.
	pub x: f64,
	/// Vertical coordinate, growing downward.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// This point shifted by `(dx, dy)`.
	pub fn offset(self, dx: f64, dy: f64) -> Self {
		Self::new(self.x + dx, self.y + dy)
	}

	/// Moves `fraction` of the remaining gap toward `leader`.
	pub fn approach(self, leader: Point, fraction: f64) -> Self {
		Self::new(
			self.x - fraction * (self.x - leader.x),
			self.y - fraction * (self.y - leader.y),
		)
	}
}

/// Optional overrides, read from a `<script id="heart-options">` JSON block.
///
/// Every field is optional; missing fields keep the built-in defaults.
///
/// ```json
/// { "seed": 7, "device": "constrained", "trace_k": 0.35, "caption": "hello" }
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EffectOptions {
	/// Fixed RNG seed for a reproducible animation.
	pub seed: Option<u64>,
	/// Forces a device class instead of sniffing the user agent.
	pub device: Option<DeviceClass>,
	/// Trail relaxation fraction.
	pub trace_k: Option<f64>,
	/// Base pulse-time increment per tick.
	pub time_delta: Option<f64>,
	/// Caption used when the page address carries none.
	pub caption: Option<String>,
	/// Theme name (`default`, `rose`).
	pub theme: Option<String>,
}

/// Fully resolved startup settings for the effect.
#[derive(Clone, Debug)]
pub struct HeartSettings {
	/// Curve and trail sizing for the detected device.
	pub profile: DeviceProfile,
	/// Physics tunables with overrides applied.
	pub params: SimulationParams,
	/// Colors and caption style.
	pub theme: Theme,
	/// Normalized caption, `None` when blank.
	pub caption: Option<String>,
	/// RNG seed; `None` seeds from entropy.
	pub seed: Option<u64>,
}

impl HeartSettings {
	/// Combines the boundary inputs read once at startup.
	///
	/// The query caption wins over the options caption; blank captions mean no
	/// caption. An explicit `device` option wins over the user agent.
	pub fn resolve(
		options: EffectOptions,
		query_caption: Option<String>,
		user_agent: Option<&str>,
	) -> Self {
		let class = options
			.device
			.unwrap_or_else(|| DeviceClass::from_user_agent(user_agent));
		let theme = match options.theme.as_deref() {
			None => Theme::default(),
			Some(name) => Theme::by_name(name).unwrap_or_else(|| {
				warn!("heart-pulse: unknown theme '{}', using default", name);
				Theme::default()
			}),
		};
		let params = SimulationParams::default().with_options(&options);
		let caption =
			normalize_caption(query_caption).or_else(|| normalize_caption(options.caption));

		Self {
			profile: DeviceProfile::for_class(class),
			params,
			theme,
			caption,
			seed: options.seed,
		}
	}
}

/// Trims a caption; blank or missing input yields `None`.
pub fn normalize_caption(caption: Option<String>) -> Option<String> {
	caption
		.map(|c| c.trim().to_string())
		.filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn approach_moves_fraction_of_gap() {
		let follower = Point::new(10.0, -10.0);
		let moved = follower.approach(Point::new(0.0, 0.0), 0.4);
		assert!((moved.x - 6.0).abs() < 1e-12);
		assert!((moved.y + 6.0).abs() < 1e-12);
	}

	#[test]
	fn options_parse_partial_json() {
		let opts: EffectOptions =
			serde_json::from_str(r#"{ "seed": 7, "device": "constrained" }"#).unwrap();
		assert_eq!(opts.seed, Some(7));
		assert_eq!(opts.device, Some(DeviceClass::Constrained));
		assert!(opts.trace_k.is_none());
		assert!(opts.caption.is_none());
	}

	#[test]
	fn options_default_from_empty_object() {
		let opts: EffectOptions = serde_json::from_str("{}").unwrap();
		assert!(opts.seed.is_none());
		assert!(opts.device.is_none());
		assert!(opts.theme.is_none());
	}

	#[test]
	fn query_caption_wins_and_blank_is_none() {
		let opts = EffectOptions {
			caption: Some("from options".into()),
			..Default::default()
		};
		let s = HeartSettings::resolve(opts.clone(), Some("  hello  ".into()), None);
		assert_eq!(s.caption.as_deref(), Some("hello"));
		let s = HeartSettings::resolve(opts, Some("   ".into()), None);
		assert_eq!(s.caption.as_deref(), Some("from options"));
		let s = HeartSettings::resolve(EffectOptions::default(), None, None);
		assert_eq!(s.caption, None);
	}

	#[test]
	fn device_option_overrides_user_agent() {
		let iphone = Some("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)");
		let s = HeartSettings::resolve(EffectOptions::default(), None, iphone);
		assert_eq!(s.profile.class, DeviceClass::Constrained);
		let opts = EffectOptions {
			device: Some(DeviceClass::Full),
			..Default::default()
		};
		let s = HeartSettings::resolve(opts, None, iphone);
		assert_eq!(s.profile.class, DeviceClass::Full);
	}

	#[test]
	fn unknown_theme_falls_back_to_default() {
		let opts = EffectOptions {
			theme: Some("neon".into()),
			seed: Some(3),
			..Default::default()
		};
		let s = HeartSettings::resolve(opts, None, None);
		assert_eq!(s.theme.name, "default");
		assert_eq!(s.seed, Some(3));
	}
}
