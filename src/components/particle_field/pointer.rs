//! Pointer tracking for hover connections.

/// Last known pointer position over the surface.
///
/// `position` is `None` once the pointer has left the surface or has been
/// idle longer than the configured timeout.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerState {
	position: Option<(f64, f64)>,
	activation_radius: f64,
	idle_timeout_ms: Option<f64>,
	idle_ms: f64,
}

impl PointerState {
	/// Absent pointer with the given activation radius and optional idle timeout.
	pub fn new(activation_radius: f64, idle_timeout_ms: Option<f64>) -> Self {
		Self {
			position: None,
			activation_radius,
			idle_timeout_ms,
			idle_ms: 0.0,
		}
	}

	/// Last position, or `None` when absent.
	pub fn position(&self) -> Option<(f64, f64)> {
		self.position
	}

	/// Radius within which particles count as hovered.
	pub fn activation_radius(&self) -> f64 {
		self.activation_radius
	}

	/// Whether the pointer is currently over the surface.
	pub fn is_present(&self) -> bool {
		self.position.is_some()
	}

	/// Record a pointer move and restart the idle clock.
	pub fn move_to(&mut self, x: f64, y: f64) {
		self.position = Some((x, y));
		self.idle_ms = 0.0;
	}

	/// Forget the pointer.
	pub fn leave(&mut self) {
		self.position = None;
		self.idle_ms = 0.0;
	}

	/// Count idle time; drops the position once the idle timeout is reached.
	pub fn elapse(&mut self, dt_ms: f64) {
		if self.position.is_none() {
			return;
		}
		self.idle_ms += dt_ms.max(0.0);
		if let Some(timeout) = self.idle_timeout_ms {
			if self.idle_ms >= timeout {
				log::debug!("particle-field: pointer idle for {timeout} ms, hover off");
				self.leave();
			}
		}
	}

	/// Whether `(x, y)` lies strictly within the activation radius.
	pub fn is_near(&self, x: f64, y: f64) -> bool {
		self.position.is_some_and(|(px, py)| {
			let (dx, dy) = (px - x, py - y);
			(dx * dx + dy * dy).sqrt() < self.activation_radius
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn starts_absent() {
		let pointer = PointerState::new(50.0, None);
		assert_eq!(pointer.position(), None);
		assert!(!pointer.is_near(0.0, 0.0));
	}

	#[test]
	fn move_and_leave() {
		let mut pointer = PointerState::new(50.0, None);
		pointer.move_to(10.0, 10.0);
		assert_eq!(pointer.position(), Some((10.0, 10.0)));
		assert!(pointer.is_near(40.0, 10.0));
		assert!(!pointer.is_near(60.0, 10.0));
		pointer.leave();
		assert!(!pointer.is_present());
	}

	#[test]
	fn radius_boundary_is_exclusive() {
		let mut pointer = PointerState::new(5.0, None);
		pointer.move_to(0.0, 0.0);
		assert!(!pointer.is_near(3.0, 4.0));
	}

	#[test]
	fn idle_timeout_clears_position() {
		let mut pointer = PointerState::new(50.0, Some(3000.0));
		pointer.move_to(1.0, 1.0);
		pointer.elapse(2000.0);
		assert!(pointer.is_present());
		// a new move resets the idle clock
		pointer.move_to(2.0, 2.0);
		pointer.elapse(2000.0);
		assert!(pointer.is_present());
		pointer.elapse(1000.0);
		assert!(!pointer.is_present());
	}

	#[test]
	fn no_timeout_keeps_position() {
		let mut pointer = PointerState::new(50.0, None);
		pointer.move_to(1.0, 1.0);
		pointer.elapse(1.0e9);
		assert!(pointer.is_present());
	}
}
