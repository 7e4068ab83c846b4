//! Frame compositing.
//!
//! Each frame:
//! 1. Fade: a translucent rectangle over the previous frame (this is the
//!    motion blur; never clear to blank)
//! 2. Particles: every trail point as a small square in the particle's color
//! 3. Caption: wrapped, centered lines on top

use web_sys::CanvasRenderingContext2d;

use super::particles::ParticleField;
use super::theme::{CaptionStyle, Theme};
use super::wrap::wrap;

/// The subset of the Canvas 2D API the compositor draws with.
pub trait Canvas2d {
	/// Sets the CSS color used by the fill calls.
	fn set_fill_style(&self, style: &str);
	/// Fills an axis-aligned rectangle.
	fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64);
	/// Sets the CSS font shorthand.
	fn set_font(&self, font: &str);
	/// Sets `textAlign = "center"` and `textBaseline = "middle"`.
	fn center_text(&self);
	/// Width of `text` in the current font.
	fn measure_text(&self, text: &str) -> f64;
	/// Draws `text` anchored at `(x, y)`.
	fn fill_text(&self, text: &str, x: f64, y: f64);
}

impl Canvas2d for CanvasRenderingContext2d {
	fn set_fill_style(&self, style: &str) {
		self.set_fill_style_str(style);
	}

	fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
		CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
	}

	fn set_font(&self, font: &str) {
		CanvasRenderingContext2d::set_font(self, font);
	}

	fn center_text(&self) {
		self.set_text_align("center");
		self.set_text_baseline("middle");
	}

	fn measure_text(&self, text: &str) -> f64 {
		CanvasRenderingContext2d::measure_text(self, text)
			.map(|m| m.width())
			.unwrap_or(0.0)
	}

	fn fill_text(&self, text: &str, x: f64, y: f64) {
		let _ = CanvasRenderingContext2d::fill_text(self, text, x, y);
	}
}

/// Paints one complete frame onto a `width` x `height` (CSS px) surface.
pub fn render<C: Canvas2d>(
	ctx: &C,
	width: f64,
	height: f64,
	field: &ParticleField,
	caption: Option<&str>,
	theme: &Theme,
) {
	draw_fade(ctx, width, height, theme);
	draw_particles(ctx, field, theme);
	if let Some(text) = caption {
		draw_caption(ctx, width, height, text, &theme.caption);
	}
}

fn draw_fade<C: Canvas2d>(ctx: &C, width: f64, height: f64, theme: &Theme) {
	ctx.set_fill_style(&theme.fade_css());
	ctx.fill_rect(0.0, 0.0, width, height);
}

fn draw_particles<C: Canvas2d>(ctx: &C, field: &ParticleField, theme: &Theme) {
	let size = theme.particles.point_size;
	for p in &field.particles {
		ctx.set_fill_style(&p.color);
		for t in p.trail() {
			ctx.fill_rect(t.x, t.y, size, size);
		}
	}
}

fn draw_caption<C: Canvas2d>(ctx: &C, width: f64, height: f64, text: &str, style: &CaptionStyle) {
	ctx.set_fill_style(&style.color.to_css());
	ctx.set_font(&style.font());
	ctx.center_text();

	let lines = wrap(text, |s| ctx.measure_text(s), width * style.width_ratio);
	let line_height = style.line_height_px();
	let total = lines.len() as f64 * line_height;
	let start_y = height / 2.0 - total / 2.0 + line_height / 2.0;

	for (i, line) in lines.iter().enumerate() {
		ctx.fill_text(line, width / 2.0, start_y + i as f64 * line_height);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::heart::profile::SimulationParams;
	use crate::components::heart::rng::Xorshift64;
	use crate::components::heart::types::Point;
	use std::cell::RefCell;

	#[derive(Debug, PartialEq)]
	enum Op {
		Style(String),
		Rect(f64, f64, f64, f64),
		Font(String),
		Center,
		Text(String, f64, f64),
	}

	/// Records draw calls; text is 10px per character.
	#[derive(Default)]
	struct Recorder {
		ops: RefCell<Vec<Op>>,
	}

	impl Canvas2d for Recorder {
		fn set_fill_style(&self, style: &str) {
			self.ops.borrow_mut().push(Op::Style(style.to_string()));
		}
		fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64) {
			self.ops.borrow_mut().push(Op::Rect(x, y, w, h));
		}
		fn set_font(&self, font: &str) {
			self.ops.borrow_mut().push(Op::Font(font.to_string()));
		}
		fn center_text(&self) {
			self.ops.borrow_mut().push(Op::Center);
		}
		fn measure_text(&self, text: &str) -> f64 {
			10.0 * text.chars().count() as f64
		}
		fn fill_text(&self, text: &str, x: f64, y: f64) {
			self.ops.borrow_mut().push(Op::Text(text.to_string(), x, y));
		}
	}

	fn small_field() -> ParticleField {
		let base = vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)];
		ParticleField::new(
			&base,
			3,
			100.0,
			100.0,
			SimulationParams::default(),
			&Theme::default().particles,
			Xorshift64::new(21),
		)
	}

	#[test]
	fn frame_starts_with_translucent_fade() {
		let rec = Recorder::default();
		render(&rec, 200.0, 100.0, &small_field(), None, &Theme::default());
		let ops = rec.ops.borrow();
		assert_eq!(ops[0], Op::Style("rgba(0,0,0,0.1)".into()));
		assert_eq!(ops[1], Op::Rect(0.0, 0.0, 200.0, 100.0));
	}

	#[test]
	fn every_trail_point_is_painted_in_particle_color() {
		let rec = Recorder::default();
		let field = small_field();
		render(&rec, 200.0, 100.0, &field, None, &Theme::default());
		let ops = rec.ops.borrow();
		// fade (2) + per particle: style + 3 points
		assert_eq!(ops.len(), 2 + field.len() * 4);
		for (i, p) in field.particles.iter().enumerate() {
			let at = 2 + i * 4;
			assert_eq!(ops[at], Op::Style(p.color.clone()));
			for (k, t) in p.trail().iter().enumerate() {
				assert_eq!(ops[at + 1 + k], Op::Rect(t.x, t.y, 1.0, 1.0));
			}
		}
		assert!(!ops.iter().any(|op| matches!(op, Op::Text(..))));
	}

	#[test]
	fn caption_lines_are_centered_and_stacked() {
		let rec = Recorder::default();
		// Wrap width 0.8 * 100 = 80px = 8 characters.
		render(&rec, 100.0, 200.0, &small_field(), Some("hi there friend"), &Theme::default());
		let ops = rec.ops.borrow();
		let texts: Vec<&Op> = ops.iter().filter(|op| matches!(op, Op::Text(..))).collect();
		// 2 lines at 30px line height around y = 100: centers at 85 and 115.
		assert_eq!(
			texts,
			vec![
				&Op::Text("hi there".into(), 50.0, 85.0),
				&Op::Text("friend".into(), 50.0, 115.0),
			]
		);
		assert!(ops.contains(&Op::Font("bold 25px Arial".into())));
		assert!(ops.contains(&Op::Style("rgba(255,255,255,1)".into())));
		assert!(ops.contains(&Op::Center));
	}
}
