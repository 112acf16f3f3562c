//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! [`crate::OsdConfig`] fields and by its `Default` impl.

use crate::color::Rgba;
use crate::config::LogLevel;

pub fn font_name() -> String {
    "DejaVu Sans Mono".to_string()
}

pub fn font_size() -> f32 {
    16.0
}

pub fn dpi() -> u32 {
    96
}

pub fn outline_width() -> f32 {
    1.0
}

pub fn font_colour() -> Rgba {
    Rgba::opaque(0x5B, 0xE3, 0x32)
}

pub fn font_outline_colour() -> Rgba {
    Rgba::opaque(0x00, 0x00, 0x00)
}

pub fn text_spacing() -> f32 {
    0.0
}

pub fn text_position() -> i32 {
    0
}

pub fn log_level() -> LogLevel {
    LogLevel::Off
}
