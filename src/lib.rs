//! overtext: outlined on-screen-display text.
//!
//! The engine lives in the member crates; this crate adds the log bridge,
//! config-to-renderer wiring and the `overtext-preview` command-line tool.

pub mod cli;
pub mod debug;
pub mod overlay;

pub use overtext_config as config;
pub use overtext_fonts as fonts;
pub use overtext_render as render;

pub use overlay::{apply_config, renderer_from_config};
