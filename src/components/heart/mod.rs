//! Heart-curve particle effect.
//!
//! Renders particles that converge on and orbit a pulsing heart curve, with
//! decaying trails and an optional centered caption:
//! - Three nested heart contours sampled once as the orbit skeleton
//! - Constant-speed pursuit with drag, plus curve cruising and rare long jumps
//! - Exponentially smoothed trails and a translucent fade for motion blur
//! - A heartbeat clock with uneven stepping for the double-beat rhythm
//!
//! # Example
//!
//! ```ignore
//! use heart_pulse::{EffectOptions, HeartCanvas, HeartSettings};
//!
//! let settings = HeartSettings::resolve(EffectOptions::default(), Some("hi".into()), None);
//! view! { <HeartCanvas settings=settings /> }
//! ```

mod component;
pub mod curve;
pub mod driver;
pub mod particles;
pub mod profile;
pub mod pulse;
pub mod render;
pub mod rng;
pub mod state;
pub mod surface;
pub mod theme;
mod types;
pub mod wrap;

pub use component::HeartCanvas;
pub use profile::{DeviceClass, DeviceProfile, SimulationParams};
pub use theme::Theme;
pub use types::{EffectOptions, HeartSettings, Point};
