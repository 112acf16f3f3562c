//! Shared integration test helpers for overtext-render.
//!
//! Provides a scripted rasterizer and a recording GPU backend so the engine
//! can be exercised without font files or a GPU.
//!
//! ```ignore
//! mod common;
//! use common::{RecordingBackend, ScriptedRasterizer};
//! ```

#![allow(dead_code)]

use std::collections::HashMap;

use overtext_fonts::{CoverageBitmap, GlyphMetrics, GlyphRasterizer, RasterizedGlyph};
use overtext_render::{GlyphImage, GpuBackend, QuadMesh, RenderError};

pub const LINE_HEIGHT: i32 = 20 * 64;

pub fn solid(width: u32, height: u32, coverage: u8) -> CoverageBitmap {
    CoverageBitmap::from_raw(width, height, vec![coverage; (width * height) as usize])
        .expect("solid bitmap")
}

/// Metrics for a glyph whose ink box is `width` x `height` pixels sitting on
/// the baseline, advancing `advance` pixels.
pub fn metrics(advance: i32, width: i32, height: i32) -> GlyphMetrics {
    GlyphMetrics {
        advance_x: advance * 64,
        advance_y: 0,
        bearing_x: 64,
        bearing_y: height * 64,
        width: width * 64,
        height: height * 64,
    }
}

#[derive(Debug, Clone)]
pub struct ScriptedGlyph {
    pub fill: CoverageBitmap,
    pub stroke: Option<CoverageBitmap>,
    pub metrics: GlyphMetrics,
}

/// A rasterizer that serves canned bitmaps and counts every call per code.
#[derive(Debug, Default)]
pub struct ScriptedRasterizer {
    pub line_height: i32,
    pub glyphs: HashMap<u8, ScriptedGlyph>,
    pub fill_calls: HashMap<u8, usize>,
    pub stroke_calls: HashMap<u8, usize>,
    pub stroke_widths: Vec<f32>,
}

impl ScriptedRasterizer {
    pub fn new() -> Self {
        Self {
            line_height: LINE_HEIGHT,
            ..Self::default()
        }
    }

    /// Letters `A`..=`Z` as 4x6 solid glyphs with a 6x8 stroke, plus a
    /// blank space.
    pub fn latin() -> Self {
        let mut rasterizer = Self::new();
        for code in b'A'..=b'Z' {
            rasterizer = rasterizer.with_glyph(
                code,
                solid(4, 6, 255),
                Some(solid(6, 8, 255)),
                metrics(5, 4, 6),
            );
        }
        rasterizer.with_glyph(b' ', CoverageBitmap::empty(), None, metrics(3, 0, 0))
    }

    pub fn with_glyph(
        mut self,
        code: u8,
        fill: CoverageBitmap,
        stroke: Option<CoverageBitmap>,
        metrics: GlyphMetrics,
    ) -> Self {
        self.glyphs.insert(
            code,
            ScriptedGlyph {
                fill,
                stroke,
                metrics,
            },
        );
        self
    }

    pub fn fill_calls(&self, code: u8) -> usize {
        self.fill_calls.get(&code).copied().unwrap_or(0)
    }

    pub fn stroke_calls(&self, code: u8) -> usize {
        self.stroke_calls.get(&code).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.fill_calls.values().sum::<usize>() + self.stroke_calls.values().sum::<usize>()
    }
}

impl GlyphRasterizer for ScriptedRasterizer {
    fn line_height(&self) -> i32 {
        self.line_height
    }

    fn rasterize(&mut self, code: u8) -> Option<RasterizedGlyph> {
        *self.fill_calls.entry(code).or_default() += 1;
        let glyph = self.glyphs.get(&code)?;
        Some(RasterizedGlyph {
            bitmap: glyph.fill.clone(),
            metrics: glyph.metrics,
        })
    }

    fn rasterize_stroke(&mut self, code: u8, outline_width: f32) -> Option<CoverageBitmap> {
        *self.stroke_calls.entry(code).or_default() += 1;
        self.stroke_widths.push(outline_width);
        self.glyphs.get(&code)?.stroke.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

/// Records created images and draw calls. Geometry handles are indices
/// into `images`.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub images: Vec<GlyphImage>,
    pub draws: Vec<DrawCall>,
    pub reject_uploads: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self {
            reject_uploads: true,
            ..Self::default()
        }
    }
}

impl GpuBackend for RecordingBackend {
    type Geometry = usize;

    fn create_geometry(
        &mut self,
        mesh: &QuadMesh,
        image: &GlyphImage,
    ) -> Result<usize, RenderError> {
        assert_eq!(mesh, &QuadMesh::unit());
        if self.reject_uploads {
            return Err(RenderError::TextureTooLarge {
                width: image.width(),
                height: image.height(),
                limit: 0,
            });
        }
        self.images.push(image.clone());
        Ok(self.images.len() - 1)
    }

    fn draw(
        &mut self,
        geometry: &usize,
        x: f32,
        y: f32,
        viewport_width: u32,
        viewport_height: u32,
    ) {
        self.draws.push(DrawCall {
            id: *geometry,
            x,
            y,
            viewport_width,
            viewport_height,
        });
    }
}
