//! Animated particle-field background.
//!
//! Renders a fixed number of bouncing particles on an HTML canvas with:
//! - Reflective bouncing inside the canvas bounds
//! - Proximity lines between nearby particles, fading with distance
//! - Optional hover mode that only connects particles around the pointer
//! - Light/dark recoloring and window-resize tracking
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{ParticleCanvas, ParticleConfig, ThemeMode};
//!
//! let (theme, set_theme) = signal(ThemeMode::Light);
//! view! { <ParticleCanvas config=ParticleConfig::constellation() theme=theme /> }
//! ```
//!
//! The simulation itself ([`ParticleField`]) does not depend on the browser:
//! it draws through the [`Surface`] trait and can be driven headlessly with a
//! [`RecordingSurface`].

mod component;
mod field;
mod frame_loop;
mod particle;
mod pointer;
mod render;
mod rng;
pub mod theme;
mod types;

pub use component::ParticleCanvas;
pub use field::ParticleField;
pub use frame_loop::{
	FrameClock, FrameControl, FrameScheduler, LoopHandle, RenderLoop, WindowScheduler,
};
pub use particle::Particle;
pub use pointer::PointerState;
pub use render::{DrawCall, LineStyle, RecordingSurface, Surface};
pub use rng::Rng;
pub use theme::{Color, ColorParseError, ThemeMode};
pub use types::{ConfigError, ParticleConfig};
