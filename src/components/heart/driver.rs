//! Frame pacing and the self-rescheduling animation loop.
//!
//! [`FrameScheduler`] hides how the next frame is requested: vsync-aligned
//! `requestAnimationFrame` where the browser has it, a ~30 fps `setTimeout`
//! fallback otherwise. [`AnimationDriver`] runs one tick per frame and can be
//! stopped, cancelling the frame it has pending.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::Window;

/// Target interval of the timer fallback, in milliseconds.
const FALLBACK_FRAME_MS: f64 = 33.0;

/// Opaque id of a scheduled frame, used to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// Requests (and cancels) a single future frame callback.
pub trait FrameScheduler {
	/// Schedules `callback` once. `None` if the platform refused.
	fn schedule(&self, callback: &Closure<dyn FnMut()>) -> Option<FrameHandle>;
	/// Cancels a frame that has not run yet.
	fn cancel(&self, handle: FrameHandle);
}

/// `requestAnimationFrame` scheduling.
pub struct AnimationFrames {
	window: Window,
}

impl FrameScheduler for AnimationFrames {
	fn schedule(&self, callback: &Closure<dyn FnMut()>) -> Option<FrameHandle> {
		self.window
			.request_animation_frame(callback.as_ref().unchecked_ref())
			.ok()
			.map(FrameHandle)
	}

	fn cancel(&self, handle: FrameHandle) {
		let _ = self.window.cancel_animation_frame(handle.0);
	}
}

/// `setTimeout` scheduling paced to roughly 30 fps.
pub struct TimerFrames {
	window: Window,
	last: Cell<f64>,
}

impl FrameScheduler for TimerFrames {
	fn schedule(&self, callback: &Closure<dyn FnMut()>) -> Option<FrameHandle> {
		let (delay, next) = timer_delay(js_sys::Date::now(), self.last.get());
		self.last.set(next);
		self.window
			.set_timeout_with_callback_and_timeout_and_arguments_0(
				callback.as_ref().unchecked_ref(),
				delay as i32,
			)
			.ok()
			.map(FrameHandle)
	}

	fn cancel(&self, handle: FrameHandle) {
		self.window.clear_timeout_with_handle(handle.0);
	}
}

/// Delay until the next timer frame and the time that frame is due.
///
/// Aims for one frame every 33 ms after the previous due time, never less
/// than 1 ms away.
pub fn timer_delay(now: f64, last_due: f64) -> (f64, f64) {
	let delay = (FALLBACK_FRAME_MS - (now - last_due)).max(1.0);
	(delay, now + delay)
}

/// Picks the best scheduler the window supports.
pub fn scheduler_for(window: &Window) -> Box<dyn FrameScheduler> {
	let has_raf = js_sys::Reflect::has(window, &JsValue::from_str("requestAnimationFrame"))
		.unwrap_or(false);
	if has_raf {
		Box::new(AnimationFrames {
			window: window.clone(),
		})
	} else {
		warn!("heart-pulse: requestAnimationFrame unavailable, using timer pacing");
		Box::new(TimerFrames {
			window: window.clone(),
			last: Cell::new(0.0),
		})
	}
}

struct DriverInner {
	scheduler: Box<dyn FrameScheduler>,
	frame: RefCell<Option<Closure<dyn FnMut()>>>,
	pending: Cell<Option<FrameHandle>>,
	running: Cell<bool>,
}

impl DriverInner {
	fn request_frame(&self) {
		let frame = self.frame.borrow();
		let Some(cb) = frame.as_ref() else {
			return;
		};
		match self.scheduler.schedule(cb) {
			Some(handle) => self.pending.set(Some(handle)),
			None => {
				warn!("heart-pulse: frame scheduling failed, stopping");
				self.running.set(false);
			}
		}
	}
}

/// Runs a tick callback once per frame until stopped.
pub struct AnimationDriver {
	inner: Rc<DriverInner>,
}

impl AnimationDriver {
	/// A stopped driver that will request frames through `scheduler`.
	pub fn new(scheduler: Box<dyn FrameScheduler>) -> Self {
		Self {
			inner: Rc::new(DriverInner {
				scheduler,
				frame: RefCell::new(None),
				pending: Cell::new(None),
				running: Cell::new(false),
			}),
		}
	}

	/// Starts calling `tick` every frame. A second call while running is ignored.
	pub fn start<F>(&self, mut tick: F)
	where
		F: FnMut() + 'static,
	{
		if self.inner.running.replace(true) {
			return;
		}
		let weak = Rc::downgrade(&self.inner);
		*self.inner.frame.borrow_mut() = Some(Closure::new(move || {
			let Some(inner) = weak.upgrade() else {
				return;
			};
			inner.pending.set(None);
			if !inner.running.get() {
				return;
			}
			tick();
			inner.request_frame();
		}));
		self.inner.request_frame();
	}

	/// Restarts a stopped loop with the tick it was started with.
	pub fn resume(&self) {
		if self.inner.frame.borrow().is_none() || self.inner.running.replace(true) {
			return;
		}
		self.inner.request_frame();
	}

	/// Stops the loop and cancels the pending frame, if any.
	pub fn stop(&self) {
		self.inner.running.set(false);
		if let Some(handle) = self.inner.pending.take() {
			self.inner.scheduler.cancel(handle);
		}
	}
}
