//! Cached glyphs and the one-shot glyph build.

use overtext_fonts::{GlyphMetrics, GlyphRasterizer, RasterizedGlyph};

use crate::glyph_image::{GlyphStyle, composite};
use crate::gpu::{GpuBackend, QuadMesh};

/// One character's layout metrics and, when it has ink, its owned geometry.
///
/// Metrics describe the unstroked glyph; the geometry spans the stroked
/// bitmap.
#[derive(Debug)]
pub struct Glyph<G> {
    geometry: Option<G>,
    metrics: GlyphMetrics,
}

impl<G> Glyph<G> {
    /// A glyph that advances the pen but draws nothing.
    pub fn blank(metrics: GlyphMetrics) -> Self {
        Self {
            geometry: None,
            metrics,
        }
    }

    pub fn with_geometry(geometry: G, metrics: GlyphMetrics) -> Self {
        Self {
            geometry: Some(geometry),
            metrics,
        }
    }

    pub fn geometry(&self) -> Option<&G> {
        self.geometry.as_ref()
    }

    pub fn metrics(&self) -> GlyphMetrics {
        self.metrics
    }
}

/// Everything a glyph build needs besides the code itself.
pub struct GlyphBuildContext<'a, R: ?Sized, B> {
    pub rasterizer: &'a mut R,
    pub gpu: &'a mut B,
    pub mesh: &'a QuadMesh,
    pub outline_width: f32,
    pub style: GlyphStyle,
}

/// Rasterize, stroke, composite and upload the glyph for `code`.
///
/// `None` means "no renderable glyph": the code is unmapped, a rasterization
/// step failed, the stroke came out empty, or the upload was rejected.
/// Rasterizer intermediates are owned values, dropped on every exit path.
pub fn build_glyph<R, B>(code: u8, ctx: GlyphBuildContext<'_, R, B>) -> Option<Glyph<B::Geometry>>
where
    R: GlyphRasterizer + ?Sized,
    B: GpuBackend,
{
    let GlyphBuildContext {
        rasterizer,
        gpu,
        mesh,
        outline_width,
        style,
    } = ctx;

    let Some(RasterizedGlyph {
        bitmap: fill,
        metrics,
    }) = rasterizer.rasterize(code)
    else {
        log::debug!("No glyph for code {:#04x}", code);
        return None;
    };

    if fill.is_empty() {
        return Some(Glyph::blank(metrics));
    }

    let stroke = rasterizer.rasterize_stroke(code, outline_width)?;
    if stroke.is_empty() {
        log::debug!("Empty stroke for code {:#04x}", code);
        return None;
    }

    let image = composite(&fill, &stroke, style);
    match gpu.create_geometry(mesh, &image) {
        Ok(geometry) => Some(Glyph::with_geometry(geometry, metrics)),
        Err(e) => {
            log::warn!("Failed to create geometry for code {:#04x}: {}", code, e);
            None
        }
    }
}
