//! Heart-curve sampling.
//!
//! The base points are the orbit skeleton of the effect: three nested heart
//! contours, sampled at a fixed angular step and concatenated. Adjacent
//! indices are adjacent samples on the same contour, which is what lets a
//! particle "cruise" along the curve by stepping its target index.

use std::f64::consts::TAU;

use super::profile::DeviceProfile;
use super::types::Point;

/// Unit heart curve at angle `theta`.
pub fn heart_position(theta: f64) -> Point {
	Point::new(
		theta.sin().powi(3),
		-(15.0 * theta.cos()
			- 5.0 * (2.0 * theta).cos()
			- 2.0 * (3.0 * theta).cos()
			- (4.0 * theta).cos()),
	)
}

/// Number of samples per contour for angular step `dr`.
pub fn samples_per_contour(dr: f64) -> usize {
	if !dr.is_finite() || dr <= 0.0 {
		return 0;
	}
	(TAU / dr).ceil() as usize
}

/// Samples every contour at step `dr` and concatenates them in order.
pub fn sample_contours(dr: f64, contours: &[(f64, f64)]) -> Vec<Point> {
	let per_contour = samples_per_contour(dr);
	let mut points = Vec::with_capacity(per_contour * contours.len());
	for &(sx, sy) in contours {
		for k in 0..per_contour {
			let p = heart_position(k as f64 * dr);
			points.push(Point::new(p.x * sx, p.y * sy));
		}
	}
	points
}

/// The immutable base-point sequence for a device profile.
pub fn base_points(profile: &DeviceProfile) -> Vec<Point> {
	sample_contours(profile.angular_step, &profile.contours)
}
