//! Canvas sizing and pixel density.
//!
//! The backing buffer is the viewport size times the device pixel ratio; the
//! CSS size stays at the viewport size and a `dpr` transform maps CSS pixels
//! onto the buffer, so all drawing code works in CSS pixels.
//!
//! Resizes are queued and applied at the start of the next frame, never in
//! the middle of one.

use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::theme::Color;
use super::types::Point;

/// Failure to obtain a drawable surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
	/// `getContext("2d")` returned nothing.
	#[error("canvas has no 2d context")]
	NoContext,
	/// `getContext("2d")` returned an object of another type.
	#[error("canvas context is not a CanvasRenderingContext2d")]
	WrongContext,
	/// A DOM call threw.
	#[error("canvas call failed: {0}")]
	Js(String),
}

/// Derived sizes for a viewport at a given pixel density.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceMetrics {
	/// Viewport width in CSS pixels.
	pub css_width: f64,
	/// Viewport height in CSS pixels.
	pub css_height: f64,
	/// Device pixel ratio, always positive.
	pub dpr: f64,
	/// Canvas buffer width in device pixels.
	pub buffer_width: u32,
	/// Canvas buffer height in device pixels.
	pub buffer_height: u32,
}

impl SurfaceMetrics {
	/// Metrics for a `css_width` x `css_height` viewport. A non-positive or
	/// non-finite `dpr` counts as 1.
	pub fn new(css_width: f64, css_height: f64, dpr: f64) -> Self {
		let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
		let css_width = css_width.max(0.0);
		let css_height = css_height.max(0.0);
		Self {
			css_width,
			css_height,
			dpr,
			// The DOM truncates fractional canvas sizes.
			buffer_width: (css_width * dpr) as u32,
			buffer_height: (css_height * dpr) as u32,
		}
	}

	/// `setTransform` arguments mapping CSS pixels to buffer pixels.
	pub fn transform(&self) -> [f64; 6] {
		[self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0]
	}

	/// Center of the surface in CSS pixels.
	pub fn center(&self) -> Point {
		Point::new(self.css_width / 2.0, self.css_height / 2.0)
	}
}

/// Latest viewport size waiting to be applied. Later requests replace earlier ones.
#[derive(Clone, Debug, Default)]
pub struct ResizeQueue {
	pending: Option<(f64, f64)>,
}

impl ResizeQueue {
	/// Records a new viewport size, replacing any earlier unapplied one.
	pub fn request(&mut self, width: f64, height: f64) {
		self.pending = Some((width, height));
	}

	/// Removes and returns the pending size.
	pub fn take(&mut self) -> Option<(f64, f64)> {
		self.pending.take()
	}

	/// Metrics for the pending size at the density of `current`, clearing the queue.
	pub fn apply(&mut self, current: &SurfaceMetrics) -> Option<SurfaceMetrics> {
		let (w, h) = self.take()?;
		Some(SurfaceMetrics::new(w, h, current.dpr))
	}
}

/// Reads the window's inner size in CSS pixels.
pub fn viewport(window: &Window) -> Option<(f64, f64)> {
	let w = window.inner_width().ok()?.as_f64()?;
	let h = window.inner_height().ok()?.as_f64()?;
	Some((w, h))
}

/// Owns the canvas, its 2D context and the current metrics.
pub struct SurfaceAdapter {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	metrics: SurfaceMetrics,
	background: String,
	resize: ResizeQueue,
}

impl SurfaceAdapter {
	/// Takes over `canvas`, sizes it for the viewport, and paints the background.
	pub fn attach(
		canvas: HtmlCanvasElement,
		width: f64,
		height: f64,
		dpr: f64,
		background: Color,
	) -> Result<Self, SurfaceError> {
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.map_err(|e| SurfaceError::Js(format!("{e:?}")))?
			.ok_or(SurfaceError::NoContext)?
			.dyn_into()
			.map_err(|_| SurfaceError::WrongContext)?;

		let surface = Self {
			canvas,
			ctx,
			metrics: SurfaceMetrics::new(width, height, dpr),
			background: background.with_alpha(1.0).to_css(),
			resize: ResizeQueue::default(),
		};
		surface.fit();
		Ok(surface)
	}

	/// The 2D context all drawing goes through.
	pub fn context(&self) -> &CanvasRenderingContext2d {
		&self.ctx
	}

	/// Metrics of the last applied size.
	pub fn metrics(&self) -> &SurfaceMetrics {
		&self.metrics
	}

	/// Queues a viewport change for the next frame boundary.
	pub fn request_resize(&mut self, width: f64, height: f64) {
		self.resize.request(width, height);
	}

	/// Applies a queued resize, if any, returning the new metrics.
	pub fn apply_pending(&mut self) -> Option<&SurfaceMetrics> {
		self.metrics = self.resize.apply(&self.metrics)?;
		self.fit();
		Some(&self.metrics)
	}

	/// Sizes the backing buffer to the current metrics, resets the transform
	/// and repaints the background.
	///
	/// Setting the canvas size clears it and drops the transform, so both are
	/// restored here.
	fn fit(&self) {
		let m = &self.metrics;

		self.canvas.set_width(m.buffer_width);
		self.canvas.set_height(m.buffer_height);
		let style = self.canvas.style();
		let _ = style.set_property("width", &format!("{}px", m.css_width));
		let _ = style.set_property("height", &format!("{}px", m.css_height));

		let [a, b, c, d, e, f] = m.transform();
		let _ = self.ctx.set_transform(a, b, c, d, e, f);
		self.ctx.set_fill_style_str(&self.background);
		self.ctx.fill_rect(0.0, 0.0, m.css_width, m.css_height);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn buffer_scales_by_density() {
		let m = SurfaceMetrics::new(800.0, 600.0, 2.0);
		assert_eq!((m.buffer_width, m.buffer_height), (1600, 1200));
		assert_eq!(m.transform(), [2.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
		assert_eq!(m.center(), Point::new(400.0, 300.0));
	}

	#[test]
	fn fractional_buffers_truncate() {
		let m = SurfaceMetrics::new(333.0, 100.0, 1.5);
		assert_eq!((m.buffer_width, m.buffer_height), (499, 150));
	}

	#[test]
	fn missing_density_falls_back_to_one() {
		for dpr in [0.0, -2.0, f64::NAN] {
			let m = SurfaceMetrics::new(10.0, 20.0, dpr);
			assert_eq!(m.dpr, 1.0);
			assert_eq!((m.buffer_width, m.buffer_height), (10, 20));
		}
	}

	#[test]
	fn latest_resize_wins() {
		let mut q = ResizeQueue::default();
		assert_eq!(q.take(), None);
		q.request(100.0, 100.0);
		q.request(300.0, 200.0);
		assert_eq!(q.take(), Some((300.0, 200.0)));
		assert_eq!(q.take(), None);
	}

	#[test]
	fn applied_resize_keeps_density_and_clears_queue() {
		let current = SurfaceMetrics::new(800.0, 600.0, 2.0);
		let mut q = ResizeQueue::default();
		assert_eq!(q.apply(&current), None);
		q.request(1024.5, 700.0);
		let next = q.apply(&current).unwrap();
		assert_eq!(next, SurfaceMetrics::new(1024.5, 700.0, 2.0));
		assert_eq!((next.buffer_width, next.buffer_height), (2049, 1400));
		assert_eq!(q.apply(&next), None);
	}

	proptest! {
		#[test]
		fn resize_is_idempotent(w in 0.0f64..5000.0, h in 0.0f64..5000.0, dpr in 0.5f64..4.0) {
			let start = SurfaceMetrics::new(640.0, 480.0, dpr);

			let mut single = ResizeQueue::default();
			single.request(w, h);
			let once = single.apply(&start).unwrap();

			let mut doubled = ResizeQueue::default();
			doubled.request(w, h);
			doubled.request(w, h);
			let twice = doubled.apply(&start).unwrap();
			prop_assert_eq!(&once, &twice);

			// Re-applying the same viewport on top of itself changes nothing.
			doubled.request(w, h);
			let again = doubled.apply(&twice).unwrap();
			prop_assert_eq!(&again, &once);
			prop_assert_eq!(again.transform(), once.transform());
		}
	}
}
