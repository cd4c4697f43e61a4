//! Leptos component wrapping the particle field canvas.
//!
//! The component creates an HTML canvas element, builds a [`ParticleField`]
//! for it and drives the field from a `requestAnimationFrame` loop. Pointer
//! and window-resize events are forwarded into the field. Everything is torn
//! down when the component is unmounted.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use super::field::ParticleField;
use super::frame_loop::{FrameClock, FrameControl, LoopHandle, RenderLoop};
use super::rng::Rng;
use super::theme::ThemeMode;
use super::types::ParticleConfig;

/// Resources released when the component goes away.
struct Teardown {
	render_loop: LoopHandle,
	resize_cb: Option<Closure<dyn FnMut()>>,
}

impl Teardown {
	fn run(self) {
		self.render_loop.cancel();
		if let (Some(cb), Some(window)) = (self.resize_cb, web_sys::window()) {
			let _ = window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	}
}

fn window_size(window: &Window) -> Option<(u32, u32)> {
	let w = window.inner_width().ok()?.as_f64()?;
	let h = window.inner_height().ok()?.as_f64()?;
	Some((w as u32, h as u32))
}

fn canvas_point(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(client_x - rect.left(), client_y - rect.top())
}

/// Start the loop, then attach the listener. A listener is never attached
/// when the loop fails to start, so nothing is left registered without a
/// [`Teardown`] to remove it.
fn start_then_listen<H, L, E>(
	start: impl FnOnce() -> Result<H, E>,
	listener: Option<L>,
	attach: impl FnOnce(&L),
) -> Result<(H, Option<L>), E> {
	let handle = start()?;
	if let Some(ref l) = listener {
		attach(l);
	}
	Ok((handle, listener))
}

/// Renders an animated particle field on a canvas element.
///
/// By default the canvas fills the window and follows window resizes; with
/// `fullscreen = false` it takes its parent's size once at mount. When a
/// `theme` is given, particle and line colors follow it.
#[component]
pub fn ParticleCanvas(
	/// Field options; defaults to [`ParticleConfig::constellation`].
	#[prop(optional)]
	config: Option<ParticleConfig>,
	/// Page theme; when set, overrides the configured colors.
	#[prop(optional, into)]
	theme: MaybeProp<ThemeMode>,
	/// Fill the window and follow its size.
	#[prop(default = true)]
	fullscreen: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let field: Rc<RefCell<Option<ParticleField>>> = Rc::new(RefCell::new(None));
	let teardown = StoredValue::new_local(None::<Teardown>);
	let config = config.unwrap_or_else(ParticleConfig::constellation);
	let field_init = field.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800, 600))
		} else {
			canvas
				.parent_element()
				.map(|p| (p.client_width() as u32, p.client_height() as u32))
				.unwrap_or((800, 600))
		};
		canvas.set_width(w);
		canvas.set_height(h);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					log::warn!("particle-field: 2d context has unexpected type");
					return;
				}
			},
			_ => {
				log::warn!("particle-field: canvas has no 2d context");
				return;
			}
		};

		let mut config = config.clone();
		if let Some(mode) = theme.get_untracked() {
			config.particle_color = mode.foreground();
			config.connect_line_color = mode.foreground();
		}
		let mut rng = Rng::from_unit(js_sys::Math::random());
		match ParticleField::initialize(w, h, config, &mut rng) {
			Ok(f) => *field_init.borrow_mut() = Some(f),
			Err(e) => {
				log::warn!("particle-field: {e}");
				return;
			}
		}

		let resize_cb = fullscreen.then(|| {
			let (field_resize, canvas_resize) = (field_init.clone(), canvas.clone());
			Closure::<dyn FnMut()>::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw);
				canvas_resize.set_height(nh);
				if let Some(ref mut f) = *field_resize.borrow_mut() {
					f.on_resize(nw, nh);
				}
			})
		});

		let (field_anim, canvas_anim) = (field_init.clone(), canvas.clone());
		let mut ctx = ctx;
		let mut clock = FrameClock::new();
		let render_frame = move |timestamp| {
			// canvas removed from the document: stop instead of drawing into nothing
			if !canvas_anim.is_connected() {
				return FrameControl::Halt;
			}
			let dt = clock.tick(timestamp);
			match *field_anim.borrow_mut() {
				Some(ref mut f) => {
					f.advance_clock(dt);
					f.step_frame(&mut ctx);
					FrameControl::Continue
				}
				None => FrameControl::Halt,
			}
		};
		let attach = |cb: &Closure<dyn FnMut()>| {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		};

		match start_then_listen(|| RenderLoop::start(render_frame), resize_cb, attach) {
			Ok((render_loop, resize_cb)) => {
				let previous = teardown.try_update_value(|slot| {
					slot.replace(Teardown {
						render_loop,
						resize_cb,
					})
				});
				if let Some(Some(old)) = previous {
					old.run();
				}
			}
			Err(e) => log::warn!("particle-field: could not start render loop: {e:?}"),
		}
	});

	let field_theme = field.clone();
	Effect::new(move |_| {
		let Some(mode) = theme.get() else {
			return;
		};
		if let Some(ref mut f) = *field_theme.borrow_mut() {
			log::debug!("particle-field: theme -> {}", mode.as_str());
			f.set_particle_color(mode.foreground());
			f.set_line_color(mode.foreground());
		}
	});

	on_cleanup(move || {
		if let Some(Some(t)) = teardown.try_update_value(Option::take) {
			t.run();
		}
	});

	let field_mm = field.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, ev.client_x() as f64, ev.client_y() as f64);
		if let Some(ref mut f) = *field_mm.borrow_mut() {
			f.on_pointer_move(x, y);
		}
	};

	let field_ml = field.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut f) = *field_ml.borrow_mut() {
			f.on_pointer_leave();
		}
	};

	let field_tm = field.clone();
	let on_touchmove = move |ev: TouchEvent| {
		let (Some(canvas), Some(touch)) = (canvas_ref.get(), ev.touches().get(0)) else {
			return;
		};
		let (x, y) = canvas_point(&canvas, touch.client_x() as f64, touch.client_y() as f64);
		if let Some(ref mut f) = *field_tm.borrow_mut() {
			f.on_pointer_move(x, y);
		}
	};

	let field_te = field;
	let on_touchend = move |_: TouchEvent| {
		if let Some(ref mut f) = *field_te.borrow_mut() {
			f.on_pointer_leave();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			on:touchmove=on_touchmove
			on:touchend=on_touchend
			style="display: block;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn listener_attached_after_loop_starts() {
		let attached = RefCell::new(Vec::new());
		let result: Result<_, String> =
			start_then_listen(|| Ok("loop"), Some("resize"), |l| attached.borrow_mut().push(*l));
		assert_eq!(result, Ok(("loop", Some("resize"))));
		assert_eq!(*attached.borrow(), vec!["resize"]);
	}

	#[test]
	fn failed_start_leaves_listener_detached() {
		let attached = RefCell::new(Vec::new());
		let result: Result<((), Option<&str>), String> = start_then_listen(
			|| Err("no window".to_string()),
			Some("resize"),
			|l| attached.borrow_mut().push(*l),
		);
		assert_eq!(result, Err("no window".to_string()));
		assert!(attached.borrow().is_empty());
	}

	#[test]
	fn no_listener_outside_fullscreen() {
		let attached = RefCell::new(Vec::<&str>::new());
		let result: Result<_, String> =
			start_then_listen(|| Ok(1), None, |l| attached.borrow_mut().push(*l));
		assert_eq!(result, Ok((1, None)));
		assert!(attached.borrow().is_empty());
	}
}
