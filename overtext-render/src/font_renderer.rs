//! The on-screen-display text renderer.

use overtext_config::Rgba;
use overtext_fonts::error::codes;
use overtext_fonts::{FontError, FontFace, FontResolver, GlyphRasterizer, SystemFontResolver};

use crate::glyph::{GlyphBuildContext, build_glyph};
use crate::glyph_cache::GlyphCache;
use crate::glyph_image::GlyphStyle;
use crate::gpu::{GpuBackend, QuadMesh};
use crate::layout::{Pen, PenConfig};

const NEWLINE: u8 = b'\n';

/// Draws outlined text with one font face at one size.
///
/// `R` is the rasterizer (normally [`FontFace`]) and `G` the geometry type
/// of the [`GpuBackend`] passed to [`render`](Self::render). Every glyph is
/// built at most once per renderer; glyphs that cannot be built are
/// remembered as absent and skipped.
///
/// Rendering must happen on the thread that owns the graphics context the
/// backend draws into. Dropping the renderer releases the face and every
/// cached glyph's geometry.
pub struct FontRenderer<R, G> {
    rasterizer: R,
    cache: GlyphCache<G>,
    mesh: QuadMesh,
    outline_width: f32,
    line_height: i32,
    pen: PenConfig,
    font_colour: Rgba,
    font_outline_colour: Rgba,
}

impl<G> FontRenderer<FontFace, G> {
    /// Resolve `name` among the system fonts and load it.
    pub fn new(
        name: &str,
        font_size: f32,
        horizontal_dpi: u32,
        vertical_dpi: u32,
        outline_width: f32,
    ) -> Result<Self, FontError> {
        let resolver = SystemFontResolver::new();
        Self::with_resolver(
            &resolver,
            name,
            font_size,
            horizontal_dpi,
            vertical_dpi,
            outline_width,
        )
    }

    /// Like [`new`](Self::new) with a caller-supplied resolver.
    ///
    /// An unresolvable name fails with [`FontError::NotFound`] before any
    /// font data is read.
    pub fn with_resolver(
        resolver: &dyn FontResolver,
        name: &str,
        font_size: f32,
        horizontal_dpi: u32,
        vertical_dpi: u32,
        outline_width: f32,
    ) -> Result<Self, FontError> {
        let face = FontFace::load(resolver, name, font_size, horizontal_dpi, vertical_dpi)?;
        log::info!(
            "Font renderer for '{}' at {}pt ({}x{} DPI)",
            name,
            font_size,
            horizontal_dpi,
            vertical_dpi
        );
        Self::from_rasterizer(face, outline_width)
    }
}

impl<R: GlyphRasterizer, G> FontRenderer<R, G> {
    /// Wrap an already-loaded rasterizer.
    ///
    /// `outline_width` is the stroke radius in pixels and must be positive.
    pub fn from_rasterizer(rasterizer: R, outline_width: f32) -> Result<Self, FontError> {
        if !outline_width.is_finite() || outline_width <= 0.0 {
            log::error!("Invalid outline width {}", outline_width);
            return Err(FontError::load(codes::INVALID_ARGUMENT));
        }

        let line_height = rasterizer.line_height();
        Ok(Self {
            rasterizer,
            cache: GlyphCache::new(),
            mesh: QuadMesh::unit(),
            outline_width,
            line_height,
            pen: PenConfig::default(),
            font_colour: overtext_config::defaults::font_colour(),
            font_outline_colour: overtext_config::defaults::font_outline_colour(),
        })
    }

    pub fn set_text_spacing_x(&mut self, spacing: f32) {
        self.pen.spacing_x = spacing;
    }

    pub fn set_text_spacing_y(&mut self, spacing: f32) {
        self.pen.spacing_y = spacing;
    }

    pub fn set_text_position_x(&mut self, position: i32) {
        self.pen.position_x = position;
    }

    pub fn set_text_position_y(&mut self, position: i32) {
        self.pen.position_y = position;
    }

    /// Fill colour for glyphs built from now on. Glyphs already cached keep
    /// the colour they were built with.
    pub fn set_font_colour(&mut self, colour: Rgba) {
        self.font_colour = colour;
    }

    /// Outline colour for glyphs built from now on.
    pub fn set_font_outline_colour(&mut self, colour: Rgba) {
        self.font_outline_colour = colour;
    }

    pub fn font_colour(&self) -> Rgba {
        self.font_colour
    }

    pub fn font_outline_colour(&self) -> Rgba {
        self.font_outline_colour
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn pen_config(&self) -> PenConfig {
        self.pen
    }

    pub fn outline_width(&self) -> f32 {
        self.outline_width
    }

    /// Line height in 26.6 fixed point.
    pub fn line_height(&self) -> i32 {
        self.line_height
    }

    /// Codes whose glyph has been built (including blank glyphs).
    pub fn cached_glyph_count(&self) -> usize {
        self.cache.present_count()
    }

    /// Codes that have been looked up at least once.
    pub fn resolved_glyph_count(&self) -> usize {
        self.cache.resolved_count()
    }

    /// Lay out `text` and draw every inked glyph through `gpu`.
    ///
    /// `text` is a sequence of 8-bit codes; `\n` starts a new line. Codes the
    /// font cannot render are skipped without moving the pen.
    pub fn render<B>(&mut self, gpu: &mut B, width: u32, height: u32, text: impl AsRef<[u8]>)
    where
        B: GpuBackend<Geometry = G>,
    {
        let mut pen = Pen::new(&self.pen, self.line_height);
        let style = GlyphStyle::new(self.font_colour, self.font_outline_colour);

        for &code in text.as_ref() {
            if code == NEWLINE {
                pen.newline();
                continue;
            }

            let rasterizer = &mut self.rasterizer;
            let mesh = &self.mesh;
            let outline_width = self.outline_width;
            let glyph = self.cache.get_or_build(code, || {
                log::debug!("Building glyph for code {:#04x}", code);
                build_glyph(
                    code,
                    GlyphBuildContext {
                        rasterizer,
                        gpu: &mut *gpu,
                        mesh,
                        outline_width,
                        style,
                    },
                )
            });
            let Some(glyph) = glyph else {
                continue;
            };

            let metrics = glyph.metrics();
            if let Some(geometry) = glyph.geometry() {
                let (x, y) = pen.screen_position(&metrics);
                gpu.draw(geometry, x, y, width, height);
            }
            pen.advance(&metrics);
        }
    }
}

impl<R, G> std::fmt::Debug for FontRenderer<R, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRenderer")
            .field("outline_width", &self.outline_width)
            .field("line_height", &self.line_height)
            .field("pen", &self.pen)
            .field("font_colour", &self.font_colour)
            .field("font_outline_colour", &self.font_outline_colour)
            .field("cached_glyphs", &self.cache.present_count())
            .finish()
    }
}
