//! heart-pulse: animated heart-curve particle effect for the browser.
//!
//! This crate provides a WASM canvas component that draws particles flowing
//! along a pulsing heart curve, with trails and an optional caption taken
//! from the page address (`?text=...`).

use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlScriptElement, UrlSearchParams, Window};

pub mod components;

pub use components::heart::{DeviceClass, EffectOptions, HeartCanvas, HeartSettings, Theme};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("heart-pulse: logging initialized");
}

/// One-shot latch: the first [`StartGuard::claim`] wins, every later one loses.
pub struct StartGuard(AtomicBool);

impl StartGuard {
	/// An unclaimed guard.
	pub const fn new() -> Self {
		Self(AtomicBool::new(false))
	}

	/// True exactly once.
	pub fn claim(&self) -> bool {
		!self.0.swap(true, Ordering::SeqCst)
	}
}

impl Default for StartGuard {
	fn default() -> Self {
		Self::new()
	}
}

static STARTED: StartGuard = StartGuard::new();

/// Mounts the app. Safe to call from several ready triggers; only the first mounts.
pub fn start() {
	if !STARTED.claim() {
		return;
	}
	mount_to_body(|| {
		view! { <App /> }
	})
}

/// Runs `f` once the document is interactive.
///
/// Runs immediately unless the document is still loading, in which case it
/// waits for `DOMContentLoaded`.
pub fn when_ready(f: impl FnOnce() + 'static) {
	let Some(document) = web_sys::window().and_then(|w| w.document()) else {
		f();
		return;
	};
	if document.ready_state() != "loading" {
		f();
		return;
	}
	let cb = Closure::once_into_js(f);
	if document
		.add_event_listener_with_callback("DOMContentLoaded", cb.unchecked_ref())
		.is_err()
	{
		warn!("heart-pulse: could not wait for DOMContentLoaded");
	}
}

/// Load options from a script element with id="heart-options".
/// Expected format: JSON matching [`EffectOptions`]; every field optional.
fn load_effect_options() -> Option<EffectOptions> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("heart-options")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<EffectOptions>(&json_text) {
		Ok(options) => {
			info!("heart-pulse: loaded options {:?}", options);
			Some(options)
		}
		Err(e) => {
			warn!("heart-pulse: failed to parse options: {}", e);
			None
		}
	}
}

/// The `text` query parameter of the page address, if any.
fn caption_from_location() -> Option<String> {
	let search = web_sys::window()?.location().search().ok()?;
	UrlSearchParams::new_with_str(&search).ok()?.get("text")
}

fn user_agent() -> Option<String> {
	web_sys::window()?.navigator().user_agent().ok()
}

/// Main application component.
/// Reads the caption, device class and options once, then renders the effect.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let agent = user_agent();
	let settings = HeartSettings::resolve(
		load_effect_options().unwrap_or_default(),
		caption_from_location(),
		agent.as_deref(),
	);
	info!(
		"heart-pulse: {:?} device, theme '{}'",
		settings.profile.class, settings.theme.name
	);

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Heart" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<HeartCanvas settings=settings />
	}
}
