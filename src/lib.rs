//! particle-field: animated particle background for static site pages.
//!
//! This crate provides a WASM canvas component that fills a page background
//! with slowly drifting particles, optionally joined by fading proximity
//! lines, and recolors them with the site's light/dark theme.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{
	Color, ConfigError, ParticleCanvas, ParticleConfig, ParticleField, RecordingSurface, Rng,
	Surface, ThemeMode,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Parse a particle configuration from the JSON text of a config script.
pub fn parse_particle_config(json_text: &str) -> Result<ParticleConfig, serde_json::Error> {
	serde_json::from_str::<ParticleConfig>(json_text)
}

/// Load the particle options from a script element with id="particle-config".
/// Expected format: JSON object with the camelCase option names, e.g.
/// `{ "maxParticles": 100, "connectParticles": true }`.
fn load_particle_config() -> Option<ParticleConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match parse_particle_config(&json_text) {
		Ok(config) => {
			info!(
				"particle-field: loaded config ({} particles, connect={})",
				config.particle_count, config.connect_particles
			);
			Some(config)
		}
		Err(e) => {
			warn!("particle-field: failed to parse particle config: {}", e);
			None
		}
	}
}

/// The page theme as set by the site: a `dark` class on `<body>`.
fn initial_theme() -> ThemeMode {
	let dark = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.body())
		.is_some_and(|body| body.class_list().contains("dark"));
	if dark { ThemeMode::Dark } else { ThemeMode::Light }
}

/// Main application component.
/// Loads the particle options from the DOM and renders the animated background.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_particle_config().unwrap_or_else(|| {
		warn!("particle-field: no usable #particle-config, using constellation preset");
		ParticleConfig::constellation()
	});
	let (theme, set_theme) = signal(initial_theme());

	let toggle_theme = move |_| {
		set_theme.update(|t| *t = t.toggled());
		if let Some(body) = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.body())
		{
			let classes = body.class_list();
			let _ = classes.toggle_with_force("dark", theme.get_untracked() == ThemeMode::Dark);
		}
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=move || theme.get().as_str() />
		<Title text="DiscoBots" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="particles-background">
			<ParticleCanvas config=config theme=theme fullscreen=true />
			<button class="theme-btn" on:click=toggle_theme>
				{move || if theme.get() == ThemeMode::Dark { "Light mode" } else { "Dark mode" }}
			</button>
		</div>
	}
}
