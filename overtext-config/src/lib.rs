//! Configuration system for the overtext on-screen-display renderer.
//!
//! This crate provides:
//!
//! - [`OsdConfig`]: font, colour, spacing and position settings for an overlay
//! - [`Rgba`]: the colour type used for glyph compositing
//! - YAML persistence with defaults for every field
//! - [`LogLevel`] for the debug log bridge

pub mod color;
pub mod config;
pub mod defaults;
pub mod error;

// Re-export main types for convenience
pub use color::Rgba;
pub use config::{LogLevel, OsdConfig};
pub use error::ConfigError;
