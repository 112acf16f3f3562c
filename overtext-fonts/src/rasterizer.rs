//! The rasterizer seam consumed by the glyph builder.

/// Sub-pixel units per pixel in 26.6 fixed point.
pub const SUBPIXELS_PER_PIXEL: i32 = 64;

/// Convert a pixel value to rounded 26.6 fixed point.
#[inline]
pub fn to_subpixels(pixels: f32) -> i32 {
    (pixels * SUBPIXELS_PER_PIXEL as f32).round() as i32
}

/// An 8-bit coverage bitmap, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoverageBitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl CoverageBitmap {
    /// Wrap raw coverage data. Returns `None` when `data` does not hold
    /// exactly `width * height` bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// A zero-area bitmap (e.g. for a space).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Coverage at `(x, y)`, or 0 outside the bitmap.
    #[inline]
    pub fn coverage(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return 0;
        }
        self.data[(y as usize) * self.width as usize + x as usize]
    }
}

/// Glyph layout metrics in 26.6 fixed point.
///
/// `bearing_y` is the distance from the baseline up to the top of the
/// glyph's ink; `height` is the ink height. Both describe the unstroked glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphMetrics {
    pub advance_x: i32,
    pub advance_y: i32,
    pub bearing_x: i32,
    pub bearing_y: i32,
    pub width: i32,
    pub height: i32,
}

/// A rendered fill bitmap together with its metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterizedGlyph {
    pub bitmap: CoverageBitmap,
    pub metrics: GlyphMetrics,
}

/// A loaded, sized font face that can render glyphs by 8-bit code.
///
/// Intermediate rasterizer state (scratch outlines, masks) is owned by the
/// returned values or by the implementation, so it is released on every
/// return path.
pub trait GlyphRasterizer {
    /// Line height in 26.6: the face's bounding-box vertical extent at the
    /// current size.
    fn line_height(&self) -> i32;

    /// Render the fill bitmap for `code`.
    ///
    /// Returns `None` when the font has no mapping for the code or the glyph
    /// cannot be rendered. A mapped glyph with no ink (a space) returns an
    /// empty bitmap with valid metrics.
    fn rasterize(&mut self, code: u8) -> Option<RasterizedGlyph>;

    /// Render the outline of `code` stroked with the given radius in pixels,
    /// round caps and round joins.
    fn rasterize_stroke(&mut self, code: u8, outline_width: f32) -> Option<CoverageBitmap>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_checks_length() {
        assert!(CoverageBitmap::from_raw(2, 2, vec![0; 4]).is_some());
        assert!(CoverageBitmap::from_raw(2, 2, vec![0; 3]).is_none());
    }

    #[test]
    fn test_coverage_out_of_range_is_zero() {
        let bitmap = CoverageBitmap::from_raw(2, 1, vec![10, 20]).unwrap();
        assert_eq!(bitmap.coverage(0, 0), 10);
        assert_eq!(bitmap.coverage(1, 0), 20);
        assert_eq!(bitmap.coverage(2, 0), 0);
        assert_eq!(bitmap.coverage(-1, 0), 0);
        assert_eq!(bitmap.coverage(0, 1), 0);
    }

    #[test]
    fn test_empty_bitmap() {
        assert!(CoverageBitmap::empty().is_empty());
        assert!(CoverageBitmap::from_raw(0, 5, vec![]).unwrap().is_empty());
    }

    #[test]
    fn test_to_subpixels_rounds() {
        assert_eq!(to_subpixels(1.0), 64);
        assert_eq!(to_subpixels(0.5), 32);
        assert_eq!(to_subpixels(-2.0), -128);
        assert_eq!(to_subpixels(0.01), 1);
    }
}
