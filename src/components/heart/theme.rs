//! Visual theming for the heart effect.
//!
//! Colors for the background and fade pass, the hue band particle colors are
//! drawn from, and the caption style.

use super::rng::Xorshift64;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color from channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same color at opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS `rgba(...)` string.
	pub fn to_css(self) -> String {
		format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
	}
}

/// Band of translucent HSL colors particles are tinted from.
#[derive(Clone, Debug)]
pub struct ParticleStyle {
	/// Hue in degrees (0 = red).
	pub hue: u16,
	/// Saturation percent, `[min, max)`.
	pub saturation: (f64, f64),
	/// Lightness percent, `[min, max)`.
	pub lightness: (f64, f64),
	/// Per-point alpha.
	pub alpha: f64,
	/// Side of the square painted for each trail point.
	pub point_size: f64,
}

impl ParticleStyle {
	/// Draws one particle color as a CSS `hsla(...)` string.
	pub fn pick(&self, rng: &mut Xorshift64) -> String {
		let s = rng.next_range(self.saturation.0, self.saturation.1).floor();
		let l = rng.next_range(self.lightness.0, self.lightness.1).floor();
		format!("hsla({},{}%,{}%,{})", self.hue, s, l, self.alpha)
	}
}

/// Caption text style.
#[derive(Clone, Debug)]
pub struct CaptionStyle {
	/// Font size in CSS pixels.
	pub font_size: f64,
	/// CSS font family.
	pub font_family: &'static str,
	/// Bold weight.
	pub bold: bool,
	/// Text fill color.
	pub color: Color,
	/// Line height as a multiple of the font size.
	pub line_height: f64,
	/// Wrap width as a fraction of the surface width.
	pub width_ratio: f64,
}

impl CaptionStyle {
	/// CSS font shorthand, e.g. `bold 25px Arial`.
	pub fn font(&self) -> String {
		if self.bold {
			format!("bold {}px {}", self.font_size, self.font_family)
		} else {
			format!("{}px {}", self.font_size, self.font_family)
		}
	}

	/// Distance between line centers, in CSS pixels.
	pub fn line_height_px(&self) -> f64 {
		self.font_size * self.line_height
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Name accepted by [`Theme::by_name`].
	pub name: &'static str,
	/// Opaque color painted on startup and after every resize.
	pub background: Color,
	/// Alpha of the per-frame fade rectangle. Lower = longer trails.
	pub fade_alpha: f64,
	/// Particle color band and point size.
	pub particles: ParticleStyle,
	/// Caption font and layout.
	pub caption: CaptionStyle,
}

impl Theme {
	/// Deep red particles on black (default).
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: Color::rgb(0, 0, 0),
			fade_alpha: 0.1,
			particles: ParticleStyle {
				hue: 0,
				saturation: (60.0, 100.0),
				lightness: (20.0, 80.0),
				alpha: 0.3,
				point_size: 1.0,
			},
			caption: CaptionStyle {
				font_size: 25.0,
				font_family: "Arial",
				bold: true,
				color: Color::rgb(255, 255, 255),
				line_height: 1.2,
				width_ratio: 0.8,
			},
		}
	}

	/// Softer pink variant with slightly longer trails.
	pub fn rose() -> Self {
		let base = Self::default_theme();
		Self {
			name: "rose",
			fade_alpha: 0.08,
			particles: ParticleStyle {
				hue: 340,
				saturation: (50.0, 90.0),
				lightness: (45.0, 80.0),
				..base.particles
			},
			..base
		}
	}

	/// Looks up a built-in theme by name.
	pub fn by_name(name: &str) -> Option<Self> {
		match name {
			"default" => Some(Self::default_theme()),
			"rose" => Some(Self::rose()),
			_ => None,
		}
	}

	/// Fill style of the fade rectangle.
	pub fn fade_css(&self) -> String {
		self.background.with_alpha(self.fade_alpha).to_css()
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
