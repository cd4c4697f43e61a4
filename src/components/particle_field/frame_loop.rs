//! `requestAnimationFrame` loop with an explicit stop.
//!
//! Frames run strictly one after another on the browser's main thread. The
//! frame callback decides each time whether to keep going; the owner can also
//! stop the loop from outside through the returned [`LoopHandle`].

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;

/// Longest frame delta handed to the field. Larger gaps (background tab,
/// debugger pause) are treated as one slow frame.
const MAX_FRAME_DELTA_MS: f64 = 100.0;

/// Returned by the frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
	/// Schedule another frame.
	Continue,
	/// Stop without scheduling another frame.
	Halt,
}

/// Turns `requestAnimationFrame` timestamps into frame deltas.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
	last: Option<f64>,
}

impl FrameClock {
	/// Clock that has not seen a frame yet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Delta since the previous timestamp, in ms. The first frame reports 0.
	pub fn tick(&mut self, timestamp_ms: f64) -> f64 {
		let dt = match self.last {
			Some(prev) => (timestamp_ms - prev).clamp(0.0, MAX_FRAME_DELTA_MS),
			None => 0.0,
		};
		self.last = Some(timestamp_ms);
		dt
	}
}

/// Requests and cancels display frames on behalf of a render loop.
pub trait FrameScheduler {
	/// Ask for one more frame; returns the request id.
	fn request_frame(&self) -> Result<i32, JsValue>;
	/// Withdraw a request that has not fired yet.
	fn cancel_frame(&self, id: i32);
}

type FrameCallback = Closure<dyn FnMut(f64)>;

/// [`FrameScheduler`] backed by `window.requestAnimationFrame`.
#[derive(Default)]
pub struct WindowScheduler {
	callback: RefCell<Option<FrameCallback>>,
}

impl WindowScheduler {
	fn install(&self, callback: FrameCallback) {
		*self.callback.borrow_mut() = Some(callback);
	}
}

impl FrameScheduler for WindowScheduler {
	fn request_frame(&self) -> Result<i32, JsValue> {
		let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
		let callback = self.callback.borrow();
		let Some(cb) = callback.as_ref() else {
			return Err(JsValue::from_str("frame callback not installed"));
		};
		window.request_animation_frame(cb.as_ref().unchecked_ref())
	}

	fn cancel_frame(&self, id: i32) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(id);
		}
	}
}

struct LoopShared<S: FrameScheduler> {
	scheduler: S,
	running: Cell<bool>,
	pending: Cell<Option<i32>>,
	frame: RefCell<Box<dyn FnMut(f64) -> FrameControl>>,
}

impl<S: FrameScheduler> LoopShared<S> {
	fn new(scheduler: S, frame: Box<dyn FnMut(f64) -> FrameControl>) -> Self {
		Self {
			scheduler,
			running: Cell::new(true),
			pending: Cell::new(None),
			frame: RefCell::new(frame),
		}
	}

	fn schedule(&self) -> Result<(), JsValue> {
		let id = self.scheduler.request_frame()?;
		self.pending.set(Some(id));
		Ok(())
	}

	/// One display frame arrived.
	fn fire(&self, timestamp: f64) {
		self.pending.set(None);
		if !self.running.get() {
			return;
		}
		let control = {
			let mut frame = self.frame.borrow_mut();
			(*frame)(timestamp)
		};
		match control {
			FrameControl::Continue => {
				if let Err(e) = self.schedule() {
					log::warn!("particle-field: could not schedule frame: {e:?}");
					self.running.set(false);
				}
			}
			FrameControl::Halt => {
				log::info!("particle-field: render loop halted");
				self.running.set(false);
			}
		}
	}
}

/// Starts render loops.
pub struct RenderLoop;

impl RenderLoop {
	/// Run `frame` once per display frame until it returns
	/// [`FrameControl::Halt`] or the handle is cancelled.
	pub fn start<F>(frame: F) -> Result<LoopHandle, JsValue>
	where
		F: FnMut(f64) -> FrameControl + 'static,
	{
		let shared = Rc::new(LoopShared::new(WindowScheduler::default(), Box::new(frame)));

		let inner: Weak<LoopShared<WindowScheduler>> = Rc::downgrade(&shared);
		shared.scheduler.install(Closure::new(move |timestamp: f64| {
			if let Some(shared) = inner.upgrade() {
				shared.fire(timestamp);
			}
		}));

		Self::launch(shared)
	}

	/// Like [`RenderLoop::start`], with frames requested through `scheduler`.
	/// Frames are delivered by calling `fire` on the shared state directly.
	#[cfg(test)]
	fn with_scheduler<S, F>(scheduler: S, frame: F) -> Result<LoopHandle<S>, JsValue>
	where
		S: FrameScheduler,
		F: FnMut(f64) -> FrameControl + 'static,
	{
		Self::launch(Rc::new(LoopShared::new(scheduler, Box::new(frame))))
	}

	fn launch<S: FrameScheduler>(shared: Rc<LoopShared<S>>) -> Result<LoopHandle<S>, JsValue> {
		shared.schedule()?;
		log::info!("particle-field: render loop started");
		Ok(LoopHandle { shared })
	}
}

/// Owner's side of a running loop. Dropping the handle also stops the loop.
pub struct LoopHandle<S: FrameScheduler = WindowScheduler> {
	shared: Rc<LoopShared<S>>,
}

impl<S: FrameScheduler> LoopHandle<S> {
	/// Stop the loop and cancel any frame already requested.
	pub fn cancel(&self) {
		let was_running = self.shared.running.replace(false);
		if let Some(id) = self.shared.pending.take() {
			self.shared.scheduler.cancel_frame(id);
		}
		if was_running {
			log::info!("particle-field: render loop cancelled");
		}
	}
}

impl<S: FrameScheduler> Drop for LoopHandle<S> {
	fn drop(&mut self) {
		self.cancel();
	}
}
