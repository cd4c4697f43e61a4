//! A single bouncing particle.

use super::render::Surface;
use super::rng::Rng;
use super::theme::Color;
use super::types::ParticleConfig;

/// A point particle that bounces off the viewport edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal centre, in pixels.
	pub x: f64,
	/// Vertical centre, in pixels.
	pub y: f64,
	/// Horizontal velocity, pixels per frame.
	pub vx: f64,
	/// Vertical velocity, pixels per frame.
	pub vy: f64,
	/// Disc radius, fixed after creation.
	pub radius: f64,
	/// Fill color.
	pub color: Color,
}

impl Particle {
	/// Random position inside the viewport, random velocity in
	/// `[-0.5, 0.5] * speed` on each axis.
	pub fn create(width: f64, height: f64, config: &ParticleConfig, rng: &mut Rng) -> Self {
		let radius = config.particle_radius;
		let mut particle = Self {
			x: rng.next_f64() * width,
			y: rng.next_f64() * height,
			vx: rng.range(-0.5, 0.5) * config.speed,
			vy: rng.range(-0.5, 0.5) * config.speed,
			radius,
			color: config.particle_color,
		};
		// keep the whole disc on screen from the first frame
		particle.clamp_into(width, height);
		particle
	}

	/// A particle at a fixed position and velocity.
	pub fn at(x: f64, y: f64, vx: f64, vy: f64, radius: f64, color: Color) -> Self {
		Self {
			x,
			y,
			vx,
			vy,
			radius,
			color,
		}
	}

	/// Move one frame. On each axis, if the step would push the disc past an
	/// edge the velocity on that axis is reflected and the particle stays put
	/// on that axis for this frame.
	pub fn advance(&mut self, width: f64, height: f64) {
		Self::step_axis(&mut self.x, &mut self.vx, self.radius, width);
		Self::step_axis(&mut self.y, &mut self.vy, self.radius, height);
	}

	fn step_axis(pos: &mut f64, vel: &mut f64, radius: f64, extent: f64) {
		let next = *pos + *vel;
		if next - radius < 0.0 || next + radius > extent {
			*vel = -*vel;
		} else {
			*pos = next;
		}
	}

	/// Pull the centre into `[radius, extent - radius]` on both axes.
	pub fn clamp_into(&mut self, width: f64, height: f64) {
		self.x = clamp_axis(self.x, self.radius, width);
		self.y = clamp_axis(self.y, self.radius, height);
	}

	/// Whether the centre lies in `[radius, extent - radius]` on both axes
	/// (or at the centre of an axis narrower than the disc).
	pub fn is_inside(&self, width: f64, height: f64) -> bool {
		let fits = |pos: f64, extent: f64| {
			if extent < 2.0 * self.radius {
				pos == extent / 2.0
			} else {
				pos >= self.radius && pos <= extent - self.radius
			}
		};
		fits(self.x, width) && fits(self.y, height)
	}

	/// Distance between centres.
	pub fn distance_to(&self, other: &Particle) -> f64 {
		self.distance_to_point(other.x, other.y)
	}

	/// Distance from the centre to `(x, y)`.
	pub fn distance_to_point(&self, x: f64, y: f64) -> f64 {
		let (dx, dy) = (self.x - x, self.y - y);
		(dx * dx + dy * dy).sqrt()
	}

	/// Draw the particle as a filled circle.
	pub fn render(&self, surface: &mut impl Surface) {
		surface.fill_circle(self.x, self.y, self.radius, self.color);
	}
}

/// Viewports narrower than the particle centre it on that axis.
fn clamp_axis(pos: f64, radius: f64, extent: f64) -> f64 {
	if extent < 2.0 * radius {
		extent / 2.0
	} else {
		pos.clamp(radius, extent - radius)
	}
}
