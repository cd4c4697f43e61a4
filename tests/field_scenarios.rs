//! Headless scenarios driving a particle field through the public API.

use particle_field::components::particle_field::{DrawCall, Particle};
use particle_field::{Color, ParticleConfig, ParticleField, RecordingSurface, Rng};

fn bounded(field: &ParticleField) -> bool {
	let (w, h) = field.size();
	field
		.particles()
		.iter()
		.all(|p| p.is_inside(w as f64, h as f64))
}

#[test]
fn two_close_particles_connect_with_distance_opacity() {
	let config = ParticleConfig {
		speed: 0.0,
		connect_particles: true,
		connect_distance: 5.0,
		..ParticleConfig::default()
	};
	let mut field = ParticleField::from_particles(
		config,
		100,
		100,
		vec![
			Particle::at(10.0, 10.0, 0.0, 0.0, 2.0, Color::BLACK),
			Particle::at(12.0, 10.0, 0.0, 0.0, 2.0, Color::BLACK),
		],
	)
	.unwrap();

	let mut surface = RecordingSurface::new();
	field.step_frame(&mut surface);

	let lines: Vec<_> = surface.lines().collect();
	assert_eq!(lines.len(), 1);
	assert!((lines[0].2.opacity - 0.6).abs() < 1e-9);
	assert_eq!(surface.circles().count(), 2);
}

#[test]
fn long_run_stays_inside_bounds() {
	let config = ParticleConfig {
		particle_count: 120,
		speed: 6.0,
		connect_particles: true,
		..ParticleConfig::default()
	};
	let mut field = ParticleField::initialize(640, 360, config, &mut Rng::new(2024)).unwrap();
	let mut surface = RecordingSurface::new();
	for _ in 0..600 {
		surface.reset();
		field.step_frame(&mut surface);
		assert!(bounded(&field));
		for call in &surface.calls {
			if let DrawCall::Line { style, .. } = call {
				assert!(style.opacity > 0.0 && style.opacity <= 1.0);
			}
		}
	}
}

#[test]
fn shrinking_viewport_keeps_particles_inside() {
	let config = ParticleConfig {
		particle_count: 80,
		speed: 2.0,
		..ParticleConfig::default()
	};
	let mut field = ParticleField::initialize(1920, 1080, config, &mut Rng::new(11)).unwrap();
	let mut surface = RecordingSurface::new();

	field.on_resize(400, 300);
	assert!(bounded(&field));
	for _ in 0..100 {
		field.step_frame(&mut surface);
		assert!(bounded(&field));
	}

	field.on_resize(1280, 720);
	for _ in 0..100 {
		field.step_frame(&mut surface);
		assert!(bounded(&field));
	}
}

#[test]
fn frame_with_no_particles_only_clears() {
	let mut field =
		ParticleField::from_particles(ParticleConfig::constellation(), 320, 240, Vec::new())
			.unwrap();
	let mut surface = RecordingSurface::new();
	field.on_pointer_move(100.0, 100.0);
	field.step_frame(&mut surface);
	assert_eq!(
		surface.calls,
		vec![DrawCall::Clear {
			width: 320.0,
			height: 240.0
		}]
	);
}

#[test]
fn theme_switch_recolors_drawn_particles() {
	let config = ParticleConfig::ambient(particle_field::ThemeMode::Light);
	let mut field = ParticleField::initialize(200, 200, config, &mut Rng::new(8)).unwrap();
	field.set_particle_color(particle_field::ThemeMode::Dark.foreground());

	let mut surface = RecordingSurface::new();
	field.step_frame(&mut surface);
	assert!(surface.circles().all(|call| matches!(
		call,
		DrawCall::Circle { color, .. } if *color == Color::WHITE
	)));
}
