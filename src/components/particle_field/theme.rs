//! Colors and light/dark theming for the particle field.

use serde::Deserialize;
use thiserror::Error;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

/// A color string that is not `#rgb`, `#rrggbb` or `#rrggbbaa`.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("invalid color {0:?}: expected #rgb, #rrggbb or #rrggbbaa")]
pub struct ColorParseError(pub String);

impl Color {
	/// Opaque black, the light-theme foreground.
	pub const BLACK: Color = Color::rgb(0, 0, 0);
	/// Opaque white, the dark-theme foreground.
	pub const WHITE: Color = Color::rgb(255, 255, 255);

	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with an explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Parse a hex color such as `#fff`, `#1976d2` or `#00000080`.
	pub fn parse_hex(input: &str) -> Result<Self, ColorParseError> {
		let err = || ColorParseError(input.to_string());
		let hex = input.trim().strip_prefix('#').ok_or_else(err)?;
		if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
			return Err(err());
		}

		let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());
		match hex.len() {
			3 => {
				// #abc expands to #aabbcc
				let nibble = |i: usize| byte(&hex[i..i + 1]).map(|v| v * 17);
				Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
			}
			6 => Ok(Self::rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
			8 => Ok(Self::rgba(
				byte(&hex[0..2])?,
				byte(&hex[2..4])?,
				byte(&hex[4..6])?,
				byte(&hex[6..8])? as f64 / 255.0,
			)),
			_ => Err(err()),
		}
	}

	/// CSS form: `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

impl TryFrom<String> for Color {
	type Error = ColorParseError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse_hex(&value)
	}
}

/// Site-wide light/dark mode. Particles and lines contrast with the page background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
	/// Light page, dark particles.
	#[default]
	Light,
	/// Dark page, light particles.
	Dark,
}

impl ThemeMode {
	/// Color used for particles and connection lines in this mode.
	pub fn foreground(self) -> Color {
		match self {
			ThemeMode::Light => Color::BLACK,
			ThemeMode::Dark => Color::WHITE,
		}
	}

	/// The other mode.
	pub fn toggled(self) -> Self {
		match self {
			ThemeMode::Light => ThemeMode::Dark,
			ThemeMode::Dark => ThemeMode::Light,
		}
	}

	/// Name as used by the page's `data-theme` attribute and body class.
	pub fn as_str(self) -> &'static str {
		match self {
			ThemeMode::Light => "light",
			ThemeMode::Dark => "dark",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_long_and_short_hex() {
		assert_eq!(Color::parse_hex("#1976d2"), Ok(Color::rgb(0x19, 0x76, 0xd2)));
		assert_eq!(Color::parse_hex("#fff"), Ok(Color::WHITE));
		assert_eq!(Color::parse_hex("  #000000 "), Ok(Color::BLACK));
	}

	#[test]
	fn parses_alpha_channel() {
		let c = Color::parse_hex("#ffffff00").unwrap();
		assert_eq!((c.r, c.g, c.b), (255, 255, 255));
		assert_eq!(c.a, 0.0);
	}

	#[test]
	fn rejects_malformed_colors() {
		for bad in ["ffffff", "#ff", "#gggggg", "#12345", "rgb(0,0,0)", ""] {
			assert!(Color::parse_hex(bad).is_err(), "{bad:?} should not parse");
		}
	}

	#[test]
	fn css_output_switches_on_alpha() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(
			Color::rgba(255, 255, 255, 0.03).to_css(),
			"rgba(255, 255, 255, 0.03)"
		);
	}

	#[test]
	fn deserializes_from_json_string() {
		let c: Color = serde_json::from_str("\"#000\"").unwrap();
		assert_eq!(c, Color::BLACK);
		assert!(serde_json::from_str::<Color>("\"black\"").is_err());
	}

	#[test]
	fn theme_foreground_contrasts_with_background() {
		assert_eq!(ThemeMode::Light.foreground(), Color::BLACK);
		assert_eq!(ThemeMode::Dark.foreground(), Color::WHITE);
		assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
	}
}
