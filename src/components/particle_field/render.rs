//! Drawing surface abstraction and its canvas implementation.
//!
//! The field only needs three primitives: clear the surface, fill a circle,
//! and stroke a straight line with an opacity. [`CanvasRenderingContext2d`]
//! provides them in the browser; [`RecordingSurface`] captures them for
//! headless use and tests.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::theme::Color;

/// Stroke parameters for one connection line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
	/// Stroke color.
	pub color: Color,
	/// Stroke width, in pixels.
	pub width: f64,
	/// Multiplies the color's own alpha, in `[0, 1]`.
	pub opacity: f64,
}

/// A 2D target the particle field can draw onto.
pub trait Surface {
	/// Clear the rectangle `(0, 0, width, height)`.
	fn clear(&mut self, width: f64, height: f64);
	/// Fill a circle centred on `(x, y)`.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
	/// Stroke a line from `from` to `to`.
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), style: LineStyle);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), style: LineStyle) {
		self.set_global_alpha(style.opacity.clamp(0.0, 1.0));
		self.set_stroke_style_str(&style.color.to_css());
		self.set_line_width(style.width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
		self.set_global_alpha(1.0);
	}
}

/// One captured draw call.
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs, reason = "fields mirror the Surface method arguments")]
pub enum DrawCall {
	/// [`Surface::clear`]
	Clear { width: f64, height: f64 },
	/// [`Surface::fill_circle`]
	Circle { x: f64, y: f64, radius: f64, color: Color },
	/// [`Surface::stroke_line`]
	Line { from: (f64, f64), to: (f64, f64), style: LineStyle },
}

/// Surface that records draw calls instead of rasterizing them.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
	/// Calls in the order they were made.
	pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
	/// Empty recording.
	pub fn new() -> Self {
		Self::default()
	}

	/// Recorded line strokes.
	pub fn lines(&self) -> impl Iterator<Item = (&(f64, f64), &(f64, f64), &LineStyle)> {
		self.calls.iter().filter_map(|call| match call {
			DrawCall::Line { from, to, style } => Some((from, to, style)),
			_ => None,
		})
	}

	/// Recorded circle fills.
	pub fn circles(&self) -> impl Iterator<Item = &DrawCall> {
		self.calls
			.iter()
			.filter(|call| matches!(call, DrawCall::Circle { .. }))
	}

	/// Drop all recorded calls.
	pub fn reset(&mut self) {
		self.calls.clear();
	}
}

impl Surface for RecordingSurface {
	fn clear(&mut self, width: f64, height: f64) {
		self.calls.push(DrawCall::Clear { width, height });
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.calls.push(DrawCall::Circle {
			x,
			y,
			radius,
			color,
		});
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), style: LineStyle) {
		self.calls.push(DrawCall::Line { from, to, style });
	}
}
