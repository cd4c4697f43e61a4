//! The particle field: particles, viewport, pointer and connection drawing.
//!
//! Owns every piece of mutable animation state. Host events reach it only
//! through [`ParticleField::on_resize`], [`ParticleField::on_pointer_move`] and
//! [`ParticleField::on_pointer_leave`]; the render loop drives it through
//! [`ParticleField::advance_clock`] and [`ParticleField::step_frame`].
//!
//! Connections are found by checking every pair, which is quadratic in the
//! particle count. That is fine for the ~100 particles of a page background;
//! fields of more than a few hundred particles would need spatial bucketing.

use super::particle::Particle;
use super::pointer::PointerState;
use super::render::{LineStyle, Surface};
use super::rng::Rng;
use super::theme::Color;
use super::types::{ConfigError, ParticleConfig};

/// Fill used for the optional pointer halo.
const HALO_COLOR: Color = Color::rgba(255, 255, 255, 0.03);

/// A fixed set of particles bound to one drawing surface.
#[derive(Clone, Debug)]
pub struct ParticleField {
	particles: Vec<Particle>,
	width: u32,
	height: u32,
	config: ParticleConfig,
	pointer: PointerState,
}

impl ParticleField {
	/// Create `config.particle_count` randomly placed particles on a
	/// `width` x `height` surface. Invalid configurations are rejected, never
	/// clamped.
	pub fn initialize(
		width: u32,
		height: u32,
		config: ParticleConfig,
		rng: &mut Rng,
	) -> Result<Self, ConfigError> {
		config.validate()?;
		check_viewport(width, height)?;

		let particles = (0..config.particle_count)
			.map(|_| Particle::create(width as f64, height as f64, &config, rng))
			.collect();

		log::info!(
			"particle-field: initialized {} particles on {}x{}",
			config.particle_count,
			width,
			height
		);
		Ok(Self::assemble(particles, width, height, config))
	}

	/// Build a field from explicit particles. The field's particle count is
	/// the length of `particles` and may be zero; each particle is pulled
	/// into bounds on entry.
	pub fn from_particles(
		config: ParticleConfig,
		width: u32,
		height: u32,
		mut particles: Vec<Particle>,
	) -> Result<Self, ConfigError> {
		config.validate_numbers()?;
		check_viewport(width, height)?;

		for p in &mut particles {
			p.clamp_into(width as f64, height as f64);
		}
		let config = ParticleConfig {
			particle_count: particles.len(),
			..config
		};
		Ok(Self::assemble(particles, width, height, config))
	}

	fn assemble(particles: Vec<Particle>, width: u32, height: u32, config: ParticleConfig) -> Self {
		let pointer = PointerState::new(config.pointer_radius(), config.hover_idle_timeout_ms);
		Self {
			particles,
			width,
			height,
			config,
			pointer,
		}
	}

	/// Particles in creation order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Current configuration, including runtime toggles.
	pub fn config(&self) -> &ParticleConfig {
		&self.config
	}

	/// Pointer tracking state.
	pub fn pointer(&self) -> &PointerState {
		&self.pointer
	}

	/// Surface dimensions as `(width, height)`.
	pub fn size(&self) -> (u32, u32) {
		(self.width, self.height)
	}

	/// Adopt new surface dimensions. Particles left outside the new bounds
	/// are clamped back in immediately. Zero-sized notifications (e.g. a
	/// collapsed container) are ignored.
	pub fn on_resize(&mut self, width: u32, height: u32) {
		if width == 0 || height == 0 {
			log::debug!("particle-field: ignoring resize to {width}x{height}");
			return;
		}
		log::debug!("particle-field: resize {}x{} -> {width}x{height}", self.width, self.height);
		self.width = width;
		self.height = height;
		let (w, h) = (width as f64, height as f64);
		for p in &mut self.particles {
			p.clamp_into(w, h);
		}
	}

	/// Pointer moved to `(x, y)` in surface coordinates.
	pub fn on_pointer_move(&mut self, x: f64, y: f64) {
		self.pointer.move_to(x, y);
	}

	/// Pointer left the surface.
	pub fn on_pointer_leave(&mut self) {
		self.pointer.leave();
	}

	/// Let `dt_ms` of wall time pass for time-based state (pointer idle timeout).
	pub fn advance_clock(&mut self, dt_ms: f64) {
		self.pointer.elapse(dt_ms);
	}

	/// Toggle unconditional connections at runtime.
	pub fn set_connect_particles(&mut self, enabled: bool) {
		self.config.connect_particles = enabled;
	}

	/// Recolor every particle in place, e.g. after a theme switch.
	pub fn set_particle_color(&mut self, color: Color) {
		self.config.particle_color = color;
		for p in &mut self.particles {
			p.color = color;
		}
	}

	/// Recolor connection lines.
	pub fn set_line_color(&mut self, color: Color) {
		self.config.connect_line_color = color;
	}

	/// Whether this frame draws any connections at all.
	pub fn connections_enabled(&self) -> bool {
		self.config.connect_particles || (self.config.connect_on_hover && self.pointer.is_present())
	}

	/// Draw a line between every pair `(i, j)`, `i < j`, closer than
	/// `connect_distance`. Without unconditional connections, only pairs whose
	/// first particle lies within the pointer's activation radius qualify.
	/// Opacity falls linearly from 1 at distance 0 to 0 at the threshold.
	pub fn connect(&self, surface: &mut impl Surface) {
		let max = self.config.connect_distance;
		let hover = self.config.connect_on_hover;

		for (i, a) in self.particles.iter().enumerate() {
			let active =
				self.config.connect_particles || (hover && self.pointer.is_near(a.x, a.y));
			if !active {
				continue;
			}
			for b in &self.particles[i + 1..] {
				let distance = a.distance_to(b);
				if distance < max {
					surface.stroke_line(
						(a.x, a.y),
						(b.x, b.y),
						LineStyle {
							color: self.config.connect_line_color,
							width: self.config.connect_line_width,
							opacity: 1.0 - distance / max,
						},
					);
				}
			}
		}
	}

	/// Produce one frame: clear, move and draw every particle, then connect.
	pub fn step_frame(&mut self, surface: &mut impl Surface) {
		let (w, h) = (self.width as f64, self.height as f64);
		surface.clear(w, h);

		if self.config.pointer_halo {
			if let Some((x, y)) = self.pointer.position() {
				surface.fill_circle(x, y, self.pointer.activation_radius(), HALO_COLOR);
			}
		}

		for p in &mut self.particles {
			p.advance(w, h);
			p.render(surface);
		}

		if self.connections_enabled() {
			self.connect(surface);
		}
	}
}

fn check_viewport(width: u32, height: u32) -> Result<(), ConfigError> {
	if width == 0 || height == 0 {
		return Err(ConfigError::EmptyViewport { width, height });
	}
	Ok(())
}
