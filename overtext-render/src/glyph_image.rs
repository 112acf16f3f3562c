//! Fill + stroke compositing into an RGBA glyph image.

use overtext_config::Rgba;
use overtext_fonts::CoverageBitmap;

/// Composited glyph pixels, rows top to bottom, straight RGBA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphImage {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl GlyphImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Flatten to `[r, g, b, a]` bytes for texture upload.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_array()).collect()
    }
}

/// Colours used to composite a glyph, taken as given. Alpha is only
/// weighted by coverage; blending with the destination is up to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphStyle {
    pub fill: Rgba,
    pub outline: Rgba,
}

impl GlyphStyle {
    pub fn new(fill: Rgba, outline: Rgba) -> Self {
        Self { fill, outline }
    }
}

/// Offset that centres a `fill_dim` span inside a `stroke_dim` span,
/// rounded toward negative infinity.
#[inline]
pub fn centering_offset(stroke_dim: u32, fill_dim: u32) -> i64 {
    (stroke_dim as i64 - fill_dim as i64).div_euclid(2)
}

/// Sum the fill colour weighted by fill coverage and the outline colour
/// weighted by stroke coverage, over the stroke bitmap's extent.
///
/// The two layers are added, not blended: where fill and stroke overlap
/// both colours contribute.
pub fn composite(fill: &CoverageBitmap, stroke: &CoverageBitmap, style: GlyphStyle) -> GlyphImage {
    let width = stroke.width();
    let height = stroke.height();
    let offset_x = centering_offset(width, fill.width());
    let offset_y = centering_offset(height, fill.height());

    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let fill_alpha = fill.coverage(x - offset_x, y - offset_y);
            let stroke_alpha = stroke.coverage(x, y);
            pixels.push(
                Rgba::coverage(fill_alpha) * style.fill
                    + Rgba::coverage(stroke_alpha) * style.outline,
            );
        }
    }

    GlyphImage {
        width,
        height,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bitmap(width: u32, height: u32, value: u8) -> CoverageBitmap {
        CoverageBitmap::from_raw(width, height, vec![value; (width * height) as usize]).unwrap()
    }

    #[test]
    fn test_centering_offset_floors() {
        assert_eq!(centering_offset(11, 4), 3);
        assert_eq!(centering_offset(10, 4), 3);
        assert_eq!(centering_offset(4, 4), 0);
        assert_eq!(centering_offset(3, 4), -1);
    }

    #[test]
    fn test_style_keeps_colours() {
        let style = GlyphStyle::new(Rgba::new(255, 0, 0, 128), Rgba::new(0, 0, 255, 64));
        assert_eq!(style.fill, Rgba::new(255, 0, 0, 128));
        assert_eq!(style.outline, Rgba::new(0, 0, 255, 64));
    }

    #[test]
    fn test_translucent_colours_weighted_by_coverage_only() {
        let style = GlyphStyle::new(Rgba::new(255, 0, 0, 128), Rgba::new(0, 0, 255, 64));

        let image = composite(&bitmap(1, 1, 255), &bitmap(1, 1, 0), style);
        assert_eq!(image.pixel(0, 0), Some(Rgba::new(255, 0, 0, 128)));

        let image = composite(&bitmap(1, 1, 0), &bitmap(1, 1, 255), style);
        assert_eq!(image.pixel(0, 0), Some(Rgba::new(0, 0, 255, 64)));

        // Half coverage halves every component, alpha included
        let image = composite(&bitmap(1, 1, 128), &bitmap(1, 1, 0), style);
        assert_eq!(image.pixel(0, 0), Some(Rgba::new(128, 0, 0, 64)));
    }

    #[test]
    fn test_composite_fill_sits_inside_stroke() {
        let fill = bitmap(4, 2, 255);
        let stroke = bitmap(11, 6, 0);
        let style = GlyphStyle::new(Rgba::WHITE, Rgba::BLACK);
        let image = composite(&fill, &stroke, style);

        assert_eq!((image.width(), image.height()), (11, 6));
        // Offset (3, 2): columns 3..7, rows 2..4
        assert_eq!(image.pixel(2, 2), Some(Rgba::TRANSPARENT));
        assert_eq!(image.pixel(3, 2), Some(Rgba::WHITE));
        assert_eq!(image.pixel(6, 3), Some(Rgba::WHITE));
        assert_eq!(image.pixel(7, 3), Some(Rgba::TRANSPARENT));
        assert_eq!(image.pixel(3, 4), Some(Rgba::TRANSPARENT));
        assert_eq!(image.pixel(11, 0), None);
    }

    #[test]
    fn test_composite_sums_layers() {
        let fill = bitmap(1, 1, 255);
        let stroke = bitmap(1, 1, 255);
        let style = GlyphStyle::new(Rgba::opaque(200, 0, 0), Rgba::opaque(100, 50, 0));
        let image = composite(&fill, &stroke, style);
        assert_eq!(image.pixel(0, 0), Some(Rgba::new(255, 50, 0, 255)));
    }

    #[test]
    fn test_to_rgba8_layout() {
        let style = GlyphStyle::new(Rgba::WHITE, Rgba::BLACK);
        let image = composite(&bitmap(1, 1, 255), &bitmap(2, 1, 0), style);
        assert_eq!(image.to_rgba8(), vec![255, 255, 255, 255, 0, 0, 0, 0]);
    }
}
