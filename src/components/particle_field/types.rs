//! Configuration accepted by the particle field.

use serde::Deserialize;
use thiserror::Error;

use super::theme::{Color, ThemeMode};

/// Rejected configuration or surface, reported by [`ParticleConfig::validate`]
/// and [`super::ParticleField::initialize`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
	/// No particles requested.
	#[error("particleCount must be a positive integer, got 0")]
	ZeroParticleCount,
	/// Zero or negative particle radius.
	#[error("particleRadius must be positive, got {0}")]
	NonPositiveRadius(f64),
	/// Zero or negative pointer idle timeout.
	#[error("hoverIdleTimeoutMs must be positive, got {0}")]
	NonPositiveTimeout(f64),
	/// NaN or infinite numeric option.
	#[error("{option} must be a finite number, got {value}")]
	NonFinite {
		/// Page option name.
		option: &'static str,
		/// Rejected value.
		value: f64,
	},
	/// Negative numeric option.
	#[error("{option} must not be negative, got {value}")]
	Negative {
		/// Page option name.
		option: &'static str,
		/// Rejected value.
		value: f64,
	},
	/// Surface with a zero dimension.
	#[error("drawing surface is empty ({width}x{height})")]
	EmptyViewport {
		/// Surface width in pixels.
		width: u32,
		/// Surface height in pixels.
		height: u32,
	},
}

/// Options for one particle field.
///
/// Deserializes from the camelCase option object used by the host page, e.g.
/// `{"maxParticles": 80, "connectParticles": true, "connectLineColor": "#fff"}`.
/// Missing options take the values from [`ParticleConfig::default`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticleConfig {
	/// Number of particles in the field.
	#[serde(alias = "maxParticles")]
	pub particle_count: usize,
	/// Radius of every particle, in pixels.
	pub particle_radius: f64,
	/// Fill color of every particle.
	pub particle_color: Color,
	/// Scalar applied to the random initial velocity in `[-0.5, 0.5]` per axis.
	pub speed: f64,
	/// Connect every pair of nearby particles, regardless of the pointer.
	pub connect_particles: bool,
	/// Pairs closer than this are connected.
	pub connect_distance: f64,
	/// Stroke width of connection lines.
	pub connect_line_width: f64,
	/// Stroke color of connection lines.
	pub connect_line_color: Color,
	/// Connect nearby particles only around the pointer.
	pub connect_on_hover: bool,
	/// Radius around the pointer that activates hover connections.
	/// Falls back to `connect_distance`.
	pub pointer_radius: Option<f64>,
	/// Forget the pointer after it has been still for this long.
	pub hover_idle_timeout_ms: Option<f64>,
	/// Draw a faint disc around the pointer.
	#[serde(alias = "connectOnMouseMove")]
	pub pointer_halo: bool,
}

impl Default for ParticleConfig {
	fn default() -> Self {
		Self {
			particle_count: 100,
			particle_radius: 2.0,
			particle_color: Color::BLACK,
			speed: 1.0,
			connect_particles: false,
			connect_distance: 100.0,
			connect_line_width: 1.0,
			connect_line_color: Color::BLACK,
			connect_on_hover: false,
			pointer_radius: None,
			hover_idle_timeout_ms: None,
			pointer_halo: false,
		}
	}
}

impl ParticleConfig {
	/// Slow, fine-grained field with permanent connections.
	pub fn constellation() -> Self {
		Self {
			particle_count: 100,
			particle_radius: 1.5,
			speed: 0.3,
			connect_particles: true,
			connect_distance: 140.0,
			connect_line_width: 0.5,
			..Self::default()
		}
	}

	/// Loose field that only connects around the pointer, colored for `theme`.
	pub fn ambient(theme: ThemeMode) -> Self {
		Self {
			particle_radius: 2.0,
			speed: 0.5,
			particle_color: theme.foreground(),
			connect_line_color: theme.foreground(),
			connect_on_hover: true,
			hover_idle_timeout_ms: Some(3000.0),
			..Self::default()
		}
	}

	/// Effective pointer activation radius.
	pub fn pointer_radius(&self) -> f64 {
		self.pointer_radius.unwrap_or(self.connect_distance)
	}

	/// Reject configurations that would produce an empty or degenerate animation.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.particle_count == 0 {
			return Err(ConfigError::ZeroParticleCount);
		}
		self.validate_numbers()
	}

	/// Numeric checks only; the particle count is not inspected.
	pub(crate) fn validate_numbers(&self) -> Result<(), ConfigError> {
		if !self.particle_radius.is_finite() {
			return Err(ConfigError::NonFinite {
				option: "particleRadius",
				value: self.particle_radius,
			});
		}
		if self.particle_radius <= 0.0 {
			return Err(ConfigError::NonPositiveRadius(self.particle_radius));
		}

		let mut options = vec![
			("speed", self.speed),
			("connectDistance", self.connect_distance),
			("connectLineWidth", self.connect_line_width),
		];
		if let Some(r) = self.pointer_radius {
			options.push(("pointerRadius", r));
		}
		if let Some(t) = self.hover_idle_timeout_ms {
			options.push(("hoverIdleTimeoutMs", t));
		}

		for (option, value) in options {
			if !value.is_finite() {
				return Err(ConfigError::NonFinite { option, value });
			}
			if value < 0.0 {
				return Err(ConfigError::Negative { option, value });
			}
		}

		// a zero timeout would drop the pointer on the frame it arrives
		if let Some(t) = self.hover_idle_timeout_ms {
			if t == 0.0 {
				return Err(ConfigError::NonPositiveTimeout(t));
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_validate() {
		assert_eq!(ParticleConfig::default().validate(), Ok(()));
		assert_eq!(ParticleConfig::constellation().validate(), Ok(()));
		assert_eq!(ParticleConfig::ambient(ThemeMode::Dark).validate(), Ok(()));
	}

	#[test]
	fn zero_count_is_rejected() {
		let config = ParticleConfig {
			particle_count: 0,
			..ParticleConfig::default()
		};
		assert_eq!(config.validate(), Err(ConfigError::ZeroParticleCount));
	}

	#[test]
	fn negative_option_names_the_option() {
		let config = ParticleConfig {
			connect_line_width: -1.0,
			..ParticleConfig::default()
		};
		let err = config.validate().unwrap_err();
		assert_eq!(
			err,
			ConfigError::Negative {
				option: "connectLineWidth",
				value: -1.0
			}
		);
		assert!(err.to_string().contains("connectLineWidth"));
	}

	#[test]
	fn radius_must_be_positive_and_finite() {
		let zero = ParticleConfig {
			particle_radius: 0.0,
			..ParticleConfig::default()
		};
		assert_eq!(zero.validate(), Err(ConfigError::NonPositiveRadius(0.0)));

		let nan = ParticleConfig {
			particle_radius: f64::NAN,
			..ParticleConfig::default()
		};
		assert!(matches!(nan.validate(), Err(ConfigError::NonFinite { .. })));
	}

	#[test]
	fn zero_speed_and_distance_are_allowed() {
		let config = ParticleConfig {
			speed: 0.0,
			connect_distance: 0.0,
			..ParticleConfig::default()
		};
		assert_eq!(config.validate(), Ok(()));
	}

	#[test]
	fn deserializes_page_options() {
		let json = r##"{
			"maxParticles": 40,
			"particleRadius": 1.5,
			"particleColor": "#ffffff",
			"connectParticles": true,
			"connectDistance": 140,
			"connectLineWidth": 0.5
		}"##;
		let config: ParticleConfig = serde_json::from_str(json).unwrap();
		assert_eq!(config.particle_count, 40);
		assert_eq!(config.particle_color, Color::WHITE);
		assert!(config.connect_particles);
		assert_eq!(config.connect_distance, 140.0);
		// untouched options keep their defaults
		assert_eq!(config.speed, 1.0);
		assert_eq!(config.connect_line_color, Color::BLACK);
	}

	#[test]
	fn connect_on_mouse_move_enables_halo() {
		let config: ParticleConfig =
			serde_json::from_str(r#"{"connectOnMouseMove": true}"#).unwrap();
		assert!(config.pointer_halo);
		assert!(!config.connect_on_hover);
	}

	#[test]
	fn zero_idle_timeout_is_rejected() {
		let config = ParticleConfig {
			hover_idle_timeout_ms: Some(0.0),
			..ParticleConfig::ambient(ThemeMode::Light)
		};
		assert_eq!(config.validate(), Err(ConfigError::NonPositiveTimeout(0.0)));

		let negative = ParticleConfig {
			hover_idle_timeout_ms: Some(-5.0),
			..ParticleConfig::default()
		};
		assert!(matches!(negative.validate(), Err(ConfigError::Negative { .. })));
	}

	#[test]
	fn pointer_radius_falls_back_to_connect_distance() {
		let mut config = ParticleConfig::default();
		assert_eq!(config.pointer_radius(), 100.0);
		config.pointer_radius = Some(30.0);
		assert_eq!(config.pointer_radius(), 30.0);
	}

	#[test]
	fn bad_color_fails_deserialization() {
		let json = r#"{"particleColor": "white"}"#;
		assert!(serde_json::from_str::<ParticleConfig>(json).is_err());
	}
}
