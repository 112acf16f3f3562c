//! Outlined text rendering for on-screen-display overlays.
//!
//! This crate provides:
//!
//! - Glyph compositing: a fill bitmap centred in its stroked outline, with
//!   fill and outline colours summed per pixel ([`glyph_image`])
//! - A 256-slot, build-at-most-once glyph cache ([`glyph_cache`])
//! - 26.6 fixed-point pen layout with newline handling ([`layout`])
//! - [`FontRenderer`], the façade that ties them to a rasterizer and a
//!   [`GpuBackend`]
//! - Backends: [`WgpuGlyphBackend`] for live surfaces and [`CanvasBackend`]
//!   for CPU previews

pub mod canvas;
pub mod error;
pub mod font_renderer;
pub mod glyph;
pub mod glyph_cache;
pub mod glyph_image;
pub mod gpu;
pub mod layout;
pub mod wgpu_backend;

// Re-export main public types
pub use canvas::{CanvasBackend, CanvasGeometry};
pub use error::RenderError;
pub use font_renderer::FontRenderer;
pub use glyph::{Glyph, GlyphBuildContext, build_glyph};
pub use glyph_cache::{GLYPH_CACHE_SIZE, GlyphCache, GlyphSlot};
pub use glyph_image::{GlyphImage, GlyphStyle, centering_offset, composite};
pub use gpu::{GpuBackend, QuadMesh, Vertex};
pub use layout::{Pen, PenConfig};
pub use wgpu_backend::{MAX_PENDING_DRAWS, WgpuGeometry, WgpuGlyphBackend};

// Re-export shared types from dependencies for convenience
pub use overtext_config::Rgba;
pub use overtext_fonts::{FontError, GlyphMetrics, GlyphRasterizer};
