//! Command-line interface for the `overtext-preview` tool.

use std::path::PathBuf;

use clap::Parser;
use overtext_config::{OsdConfig, Rgba};

/// overtext-preview - render outlined overlay text to a PNG
#[derive(Parser, Debug)]
#[command(name = "overtext-preview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to load instead of ~/.config/overtext/config.yaml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Font family name
    #[arg(long, value_name = "FAMILY")]
    pub font: Option<String>,

    /// Font size in points
    #[arg(long, value_name = "POINTS")]
    pub size: Option<f32>,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 200)]
    pub height: u32,

    /// Canvas background colour (#RRGGBB or #RRGGBBAA)
    #[arg(long, value_name = "COLOUR", default_value = "#00000000")]
    pub background: Rgba,

    /// Output PNG path
    #[arg(short, long, value_name = "PATH", default_value = "overtext.png")]
    pub output: PathBuf,

    /// Log level (off, error, warn, info, debug, trace); overrides RUST_LOG and config
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<log::LevelFilter>,

    /// Text to render; each argument is one line
    #[arg(required = true, value_name = "LINE")]
    pub lines: Vec<String>,
}

impl Cli {
    /// The lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Overlay command-line font settings onto a loaded config.
    pub fn apply_overrides(&self, config: &mut OsdConfig) {
        if let Some(font) = &self.font {
            config.font_name = font.clone();
        }
        if let Some(size) = self.size {
            config.font_size = size;
        }
    }
}
