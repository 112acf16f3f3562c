//! Font handling for the overtext on-screen-display renderer.
//!
//! This crate provides:
//! - System font lookup by family name ([`SystemFontResolver`], backed by fontdb)
//! - The [`GlyphRasterizer`] seam the glyph builder consumes: fill bitmaps,
//!   metrics and stroked outline bitmaps for 8-bit character codes
//! - [`FontFace`], a swash-backed rasterizer for one face at one size/DPI
//! - The construction error taxonomy ([`FontError`], [`RasterizerError`])
//!
//! All metrics cross the crate boundary in 26.6 fixed point
//! (1/64 pixel), matching the pen arithmetic in the layout engine.

pub mod error;
pub mod face;
pub mod rasterizer;
pub mod resolver;

// Re-export main types for convenience
pub use error::{FontError, RasterizerError, error_message};
pub use face::FontFace;
pub use rasterizer::{
    CoverageBitmap, GlyphMetrics, GlyphRasterizer, RasterizedGlyph, SUBPIXELS_PER_PIXEL,
    to_subpixels,
};
pub use resolver::{FontLocation, FontResolver, SystemFontResolver};
