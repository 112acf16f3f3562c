//! Pen arithmetic for laying out a line-broken string.
//!
//! All pen coordinates are 26.6 fixed point, held in 64 bits so any `i32`
//! pixel position converts without overflow. Y grows upward, so each new
//! line moves the pen to a more negative y.

use overtext_fonts::{GlyphMetrics, SUBPIXELS_PER_PIXEL};

/// Spacing and origin, as set on the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PenConfig {
    /// Extra pixels after every glyph
    pub spacing_x: f32,
    /// Extra pixels between lines
    pub spacing_y: f32,
    /// Left edge of every line, in pixels from the viewport's left
    pub position_x: i32,
    /// Top of the first line, in pixels below the viewport's top
    pub position_y: i32,
}

const SUBPIXELS: i64 = SUBPIXELS_PER_PIXEL as i64;

/// Fractional pixels to 26.6, truncated toward zero.
#[inline]
fn spacing_to_subpixels(pixels: f32) -> i64 {
    (pixels * SUBPIXELS_PER_PIXEL as f32) as i64
}

/// Layout cursor for one `render` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    x: i64,
    y: i64,
    origin_x: i64,
    line_advance: i64,
    spacing_x: i64,
}

impl Pen {
    /// Place the pen at the baseline of the first line.
    pub fn new(config: &PenConfig, line_height: i32) -> Self {
        let origin_x = i64::from(config.position_x) * SUBPIXELS;
        let line_height = i64::from(line_height);
        Self {
            x: origin_x,
            y: -(i64::from(config.position_y) * SUBPIXELS) - line_height,
            origin_x,
            line_advance: line_height.saturating_add(spacing_to_subpixels(config.spacing_y)),
            spacing_x: spacing_to_subpixels(config.spacing_x),
        }
    }

    pub fn x(&self) -> i64 {
        self.x
    }

    pub fn y(&self) -> i64 {
        self.y
    }

    /// Carriage return plus line feed.
    pub fn newline(&mut self) {
        self.x = self.origin_x;
        self.y = self.y.saturating_sub(self.line_advance);
    }

    /// Pixel position of the bottom-left corner of a glyph drawn at the pen.
    pub fn screen_position(&self, metrics: &GlyphMetrics) -> (f32, f32) {
        let scale = SUBPIXELS_PER_PIXEL as f32;
        let x = self.x.saturating_add(i64::from(metrics.bearing_x));
        let y = self
            .y
            .saturating_add(i64::from(metrics.bearing_y) - i64::from(metrics.height));
        (x as f32 / scale, y as f32 / scale)
    }

    /// Move past a glyph, including horizontal spacing.
    pub fn advance(&mut self, metrics: &GlyphMetrics) {
        self.x = self
            .x
            .saturating_add(i64::from(metrics.advance_x))
            .saturating_add(self.spacing_x);
        self.y = self.y.saturating_sub(i64::from(metrics.advance_y));
    }
}
