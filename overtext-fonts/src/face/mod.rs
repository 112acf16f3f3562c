//! Swash-backed glyph rasterizer for one face at one size.
//!
//! A [`FontFace`] is created at a point size and a horizontal/vertical DPI
//! pair. The pixel size comes from the vertical DPI; a differing horizontal
//! DPI stretches glyphs with an x-scale transform.

mod types;

pub use types::FontData;

use std::path::Path;

use swash::scale::image::Image;
use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::{Cap, Format, Join, Stroke, Transform};

use crate::error::{FontError, codes};
use crate::rasterizer::{
    CoverageBitmap, GlyphMetrics, GlyphRasterizer, RasterizedGlyph, SUBPIXELS_PER_PIXEL,
    to_subpixels,
};
use crate::resolver::{FontLocation, FontResolver};

/// Points per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// A loaded, sized face.
pub struct FontFace {
    font: FontData,
    context: ScaleContext,
    pixels_per_em: f32,
    x_scale: f32,
    line_height: i32,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("font", &self.font)
            .field("pixels_per_em", &self.pixels_per_em)
            .field("x_scale", &self.x_scale)
            .field("line_height", &self.line_height)
            .finish()
    }
}

impl FontFace {
    /// Resolve `family` and load it.
    ///
    /// Fails with [`FontError::NotFound`] before any file is touched when the
    /// resolver has no match.
    pub fn load(
        resolver: &dyn FontResolver,
        family: &str,
        size: f32,
        horizontal_dpi: u32,
        vertical_dpi: u32,
    ) -> Result<Self, FontError> {
        let location = resolver.resolve(family).ok_or_else(|| {
            log::error!("Couldn't find font: {}", family);
            FontError::NotFound {
                name: family.to_string(),
            }
        })?;
        Self::open_location(&location, size, horizontal_dpi, vertical_dpi)
    }

    pub fn open_location(
        location: &FontLocation,
        size: f32,
        horizontal_dpi: u32,
        vertical_dpi: u32,
    ) -> Result<Self, FontError> {
        Self::open(
            &location.path,
            location.face_index as usize,
            size,
            horizontal_dpi,
            vertical_dpi,
        )
    }

    /// Load face `face_index` from a font file.
    pub fn open(
        path: &Path,
        face_index: usize,
        size: f32,
        horizontal_dpi: u32,
        vertical_dpi: u32,
    ) -> Result<Self, FontError> {
        check_size(size, horizontal_dpi, vertical_dpi)?;
        let data = std::fs::read(path).map_err(|e| {
            log::error!("Failed to read font file {:?}: {}", path, e);
            FontError::load(codes::CANNOT_OPEN_RESOURCE)
        })?;
        log::info!("Loading font {:?} (face {})", path, face_index);
        Self::from_bytes(data, face_index, size, horizontal_dpi, vertical_dpi)
    }

    /// Load a face from in-memory font bytes.
    pub fn from_bytes(
        data: Vec<u8>,
        face_index: usize,
        size: f32,
        horizontal_dpi: u32,
        vertical_dpi: u32,
    ) -> Result<Self, FontError> {
        check_size(size, horizontal_dpi, vertical_dpi)?;
        let font = FontData::new_with_index(data, face_index)
            .ok_or_else(|| FontError::load(codes::UNKNOWN_FILE_FORMAT))?;

        let pixels_per_em = size * vertical_dpi as f32 / POINTS_PER_INCH;
        let x_scale = horizontal_dpi as f32 / vertical_dpi as f32;

        let metrics = font.font_ref().metrics(&[]);
        if metrics.units_per_em == 0 {
            return Err(FontError::load(codes::INVALID_TABLE));
        }
        let scale = pixels_per_em / metrics.units_per_em as f32;

        let extent = match head_bbox_extent(&font) {
            Some(extent) => extent as f32,
            None => {
                log::warn!("Font has no usable head table, using ascent + descent");
                metrics.ascent + metrics.descent.abs()
            }
        };
        let line_height = to_subpixels(extent * scale);

        log::debug!(
            "Font face ready: {} bytes, {:.2} ppem, x-scale {:.3}, line height {}",
            font.len(),
            pixels_per_em,
            x_scale,
            line_height
        );

        Ok(Self {
            font,
            context: ScaleContext::new(),
            pixels_per_em,
            x_scale,
            line_height,
        })
    }

    pub fn pixels_per_em(&self) -> f32 {
        self.pixels_per_em
    }

    /// Horizontal stretch applied when the DPIs differ.
    pub fn x_scale(&self) -> f32 {
        self.x_scale
    }

    fn transform(&self) -> Option<Transform> {
        ((self.x_scale - 1.0).abs() > f32::EPSILON).then(|| Transform::scale(self.x_scale, 1.0))
    }

    /// Codes are interpreted as Latin-1. Glyph 0 is the missing glyph.
    fn glyph_id(&self, code: u8) -> Option<u16> {
        match self.font.font_ref().charmap().map(char::from(code)) {
            0 => None,
            id => Some(id),
        }
    }

    fn advance_x(&self, id: u16) -> f32 {
        let font = self.font.font_ref();
        let units_per_em = font.metrics(&[]).units_per_em as f32;
        font.glyph_metrics(&[]).advance_width(id) * self.pixels_per_em / units_per_em
            * self.x_scale
    }
}

fn check_size(size: f32, horizontal_dpi: u32, vertical_dpi: u32) -> Result<(), FontError> {
    if !size.is_finite() || size <= 0.0 || horizontal_dpi == 0 || vertical_dpi == 0 {
        log::error!(
            "Invalid font size {} at {}x{} DPI",
            size,
            horizontal_dpi,
            vertical_dpi
        );
        return Err(FontError::load(codes::INVALID_PIXEL_SIZE));
    }
    Ok(())
}

/// `yMax - yMin` from the head table, in font units.
fn head_bbox_extent(font: &FontData) -> Option<i32> {
    let head = font.font_ref().table(swash::tag_from_bytes(b"head"))?;
    let read_i16 = |at: usize| -> Option<i16> {
        let bytes = head.get(at..at + 2)?;
        Some(i16::from_be_bytes([bytes[0], bytes[1]]))
    };
    let y_min = read_i16(38)?;
    let y_max = read_i16(42)?;
    let extent = y_max as i32 - y_min as i32;
    (extent > 0).then_some(extent)
}

impl GlyphRasterizer for FontFace {
    fn line_height(&self) -> i32 {
        self.line_height
    }

    fn rasterize(&mut self, code: u8) -> Option<RasterizedGlyph> {
        let id = self.glyph_id(code)?;
        let advance_x = to_subpixels(self.advance_x(id));
        let transform = self.transform();

        let font = self.font.font_ref();
        let mut scaler = self
            .context
            .builder(font)
            .size(self.pixels_per_em)
            .hint(true)
            .build();
        let image = Render::new(&[Source::Outline])
            .format(Format::Alpha)
            .transform(transform)
            .render(&mut scaler, id);

        glyph_from_image(image, advance_x)
    }

    fn rasterize_stroke(&mut self, code: u8, outline_width: f32) -> Option<CoverageBitmap> {
        let id = self.glyph_id(code)?;
        let transform = self.transform();

        let mut stroke = Stroke::new(2.0 * outline_width);
        stroke.cap(Cap::Round).join(Join::Round);

        let font = self.font.font_ref();
        let mut scaler = self
            .context
            .builder(font)
            .size(self.pixels_per_em)
            .hint(true)
            .build();
        let image = Render::new(&[Source::Outline])
            .format(Format::Alpha)
            .transform(transform)
            .style(stroke)
            .render(&mut scaler, id);

        let image = image?;
        CoverageBitmap::from_raw(image.placement.width, image.placement.height, image.data)
    }
}

/// Wrap a rendered fill image with its metrics.
///
/// Swash renders an empty outline (a space) as a zero-size image, which
/// becomes a blank glyph that still advances. No image at all means the
/// outline could not be loaded or drawn, so there is no glyph.
fn glyph_from_image(image: Option<Image>, advance_x: i32) -> Option<RasterizedGlyph> {
    let image = image?;
    let placement = image.placement;
    let bitmap = CoverageBitmap::from_raw(placement.width, placement.height, image.data)?;
    Some(RasterizedGlyph {
        bitmap,
        metrics: GlyphMetrics {
            advance_x,
            advance_y: 0,
            bearing_x: placement.left * SUBPIXELS_PER_PIXEL,
            bearing_y: placement.top * SUBPIXELS_PER_PIXEL,
            width: placement.width as i32 * SUBPIXELS_PER_PIXEL,
            height: placement.height as i32 * SUBPIXELS_PER_PIXEL,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_rejected() {
        let err = FontFace::from_bytes(Vec::new(), 0, 0.0, 96, 96).unwrap_err();
        assert!(matches!(err, FontError::Load(e) if e.code == codes::INVALID_PIXEL_SIZE));
    }

    #[test]
    fn test_zero_dpi_rejected() {
        let err = FontFace::from_bytes(Vec::new(), 0, 12.0, 0, 96).unwrap_err();
        assert!(matches!(err, FontError::Load(e) if e.code == codes::INVALID_PIXEL_SIZE));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let err = FontFace::from_bytes(vec![0u8; 128], 0, 12.0, 96, 96).unwrap_err();
        assert!(matches!(err, FontError::Load(e) if e.code == codes::UNKNOWN_FILE_FORMAT));
    }

    #[test]
    fn test_missing_image_is_no_glyph() {
        assert_eq!(glyph_from_image(None, 320), None);
    }

    #[test]
    fn test_zero_size_image_is_blank_glyph() {
        let glyph = glyph_from_image(Some(Image::new()), 320).unwrap();
        assert!(glyph.bitmap.is_empty());
        assert_eq!(glyph.metrics.advance_x, 320);
        assert_eq!(glyph.metrics.height, 0);
    }

    #[test]
    fn test_image_placement_becomes_metrics() {
        let mut image = Image::new();
        image.placement.left = 1;
        image.placement.top = 7;
        image.placement.width = 2;
        image.placement.height = 3;
        image.data = vec![255; 6];

        let glyph = glyph_from_image(Some(image), 448).unwrap();
        assert_eq!(glyph.bitmap.coverage(1, 2), 255);
        assert_eq!(glyph.metrics.bearing_x, 64);
        assert_eq!(glyph.metrics.bearing_y, 448);
        assert_eq!(glyph.metrics.width, 128);
        assert_eq!(glyph.metrics.height, 192);
    }
}
