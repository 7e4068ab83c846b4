//! Leptos component wrapping the heart canvas.
//!
//! The component creates a full-viewport canvas, builds the simulation context
//! once the element exists, and runs the frame loop through an
//! [`AnimationDriver`]. Window resizes are queued and applied at the start of
//! the next frame. The loop stops on `pagehide` and resumes on `pageshow`.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, Window};

use super::driver::{AnimationDriver, scheduler_for};
use super::render;
use super::rng::Xorshift64;
use super::state::HeartState;
use super::surface::{SurfaceAdapter, viewport};
use super::theme::Theme;
use super::types::HeartSettings;

/// Surface, simulation state and theme, mutated together each frame.
struct HeartContext {
	surface: SurfaceAdapter,
	state: HeartState,
	theme: Theme,
}

impl HeartContext {
	/// One frame: pending resize, simulation tick, composite.
	fn frame(&mut self) {
		if let Some(m) = self.surface.apply_pending() {
			debug!("heart-pulse: resized to {}x{} @{}x", m.css_width, m.css_height, m.dpr);
			self.state.resize(m.css_width, m.css_height);
		}
		self.state.tick();
		render::render(
			self.surface.context(),
			self.state.width,
			self.state.height,
			&self.state.field,
			self.state.caption.as_deref(),
			&self.theme,
		);
	}
}

/// Keeps the driver and DOM listeners alive for the life of the component.
#[derive(Default)]
struct Handles {
	driver: Option<Rc<AnimationDriver>>,
	listeners: Vec<Closure<dyn FnMut()>>,
}

fn listen(window: &Window, event: &str, handles: &mut Handles, cb: Closure<dyn FnMut()>) {
	if window
		.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
		.is_err()
	{
		warn!("heart-pulse: could not listen for '{}'", event);
	}
	handles.listeners.push(cb);
}

/// Renders the animated heart on a full-viewport canvas.
///
/// `settings` are resolved once by the caller (device class, caption, options)
/// and never re-read.
#[component]
pub fn HeartCanvas(settings: HeartSettings) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let handles: Rc<RefCell<Handles>> = Rc::new(RefCell::new(Handles::default()));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if handles.borrow().driver.is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("heart-pulse: no window");
			return;
		};

		let (w, h) = viewport(&window).unwrap_or((800.0, 600.0));
		let settings = settings.clone();
		let surface = match SurfaceAdapter::attach(
			canvas,
			w,
			h,
			window.device_pixel_ratio(),
			settings.theme.background,
		) {
			Ok(surface) => surface,
			Err(e) => {
				warn!("heart-pulse: {}", e);
				return;
			}
		};

		let rng = settings
			.seed
			.map(Xorshift64::new)
			.unwrap_or_else(Xorshift64::from_entropy);
		let state = HeartState::new(
			settings.profile,
			settings.params,
			&settings.theme,
			settings.caption,
			w,
			h,
			rng,
		);
		info!(
			"heart-pulse: {}x{} @{}x, caption {}",
			w,
			h,
			surface.metrics().dpr,
			if state.caption.is_some() { "on" } else { "off" }
		);
		let context = Rc::new(RefCell::new(HeartContext {
			surface,
			state,
			theme: settings.theme,
		}));

		let mut held = handles.borrow_mut();

		let context_resize = context.clone();
		listen(
			&window,
			"resize",
			&mut held,
			Closure::new(move || {
				if let Some((nw, nh)) = web_sys::window().and_then(|w| viewport(&w)) {
					context_resize.borrow_mut().surface.request_resize(nw, nh);
				}
			}),
		);

		let driver = Rc::new(AnimationDriver::new(scheduler_for(&window)));
		let context_anim = context.clone();
		driver.start(move || context_anim.borrow_mut().frame());

		let driver_hide = driver.clone();
		listen(
			&window,
			"pagehide",
			&mut held,
			Closure::new(move || driver_hide.stop()),
		);
		let driver_show = driver.clone();
		listen(
			&window,
			"pageshow",
			&mut held,
			Closure::new(move || driver_show.resume()),
		);

		held.driver = Some(driver);
	});

	view! {
		<canvas
			node_ref=canvas_ref
			id="heart"
			class="heart-canvas"
			style="display: block; position: fixed; top: 0; left: 0; background: #000;"
		/>
	}
}
