//! CPU implementation of the glyph geometry seam, for previews and tests.

use std::path::Path;

use overtext_config::Rgba;

use crate::error::RenderError;
use crate::glyph_image::GlyphImage;
use crate::gpu::{GpuBackend, QuadMesh};

/// A glyph image kept in host memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasGeometry {
    image: GlyphImage,
}

impl CanvasGeometry {
    pub fn image(&self) -> &GlyphImage {
        &self.image
    }
}

/// An RGBA framebuffer that glyphs are composited onto with source-over
/// blending. Glyph pixels arrive as straight alpha; the framebuffer itself
/// is kept premultiplied.
#[derive(Debug, Clone)]
pub struct CanvasBackend {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    draw_count: usize,
}

impl CanvasBackend {
    /// A fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Rgba::TRANSPARENT)
    }

    pub fn with_background(width: u32, height: u32, background: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![background.premultiplied(); width as usize * height as usize],
            draw_count: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fill with `background` and reset the draw counter.
    pub fn clear(&mut self, background: Rgba) {
        self.pixels.fill(background.premultiplied());
        self.draw_count = 0;
    }

    /// Premultiplied pixel at `(x, y)`, rows top to bottom.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Draw calls since creation or the last [`clear`](Self::clear).
    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    /// Straight-alpha copy of the canvas.
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let pixel = self.pixel(x, y).unwrap_or(Rgba::TRANSPARENT);
            image::Rgba(pixel.unpremultiplied().to_array())
        })
    }

    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        self.to_image()
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|source| RenderError::ImageSave {
                path: path.display().to_string(),
                source,
            })?;
        log::info!("Saved {}x{} canvas to {:?}", self.width, self.height, path);
        Ok(())
    }

    fn blend(&mut self, x: i64, y: i64, src: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let index = y as usize * self.width as usize + x as usize;
        let dst = self.pixels[index];
        self.pixels[index] = src.premultiplied() + dst * Rgba::coverage(255 - src.a);
    }
}

impl GpuBackend for CanvasBackend {
    type Geometry = CanvasGeometry;

    fn create_geometry(
        &mut self,
        _mesh: &QuadMesh,
        image: &GlyphImage,
    ) -> Result<CanvasGeometry, RenderError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(RenderError::EmptyImage);
        }
        Ok(CanvasGeometry {
            image: image.clone(),
        })
    }

    /// The canvas's own size is the viewport; the passed dimensions are
    /// ignored.
    fn draw(
        &mut self,
        geometry: &CanvasGeometry,
        x: f32,
        y: f32,
        _viewport_width: u32,
        _viewport_height: u32,
    ) {
        self.draw_count += 1;
        let image = &geometry.image;
        let left = x.round() as i64;
        // Screen y grows upward from the top edge; canvas rows grow downward
        let top = -(y.round() as i64) - image.height() as i64;

        for row in 0..image.height() {
            for column in 0..image.width() {
                if let Some(src) = image.pixel(column, row) {
                    self.blend(left + column as i64, top + row as i64, src);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph_image::{GlyphStyle, composite};
    use overtext_fonts::CoverageBitmap;

    fn solid_image(width: u32, height: u32, colour: Rgba) -> GlyphImage {
        let fill = CoverageBitmap::from_raw(width, height, vec![255; (width * height) as usize])
            .unwrap();
        let stroke = CoverageBitmap::from_raw(width, height, vec![0; (width * height) as usize])
            .unwrap();
        composite(&fill, &stroke, GlyphStyle::new(colour, Rgba::BLACK))
    }

    #[test]
    fn test_draw_places_bottom_left_at_position() {
        let mut canvas = CanvasBackend::new(10, 10);
        let geometry = canvas
            .create_geometry(&QuadMesh::unit(), &solid_image(2, 3, Rgba::WHITE))
            .unwrap();
        // Bottom edge 5 pixels below the top: rows 2..5
        canvas.draw(&geometry, 4.0, -5.0, 10, 10);

        assert_eq!(canvas.draw_count(), 1);
        assert_eq!(canvas.pixel(4, 2), Some(Rgba::WHITE));
        assert_eq!(canvas.pixel(5, 4), Some(Rgba::WHITE));
        assert_eq!(canvas.pixel(4, 1), Some(Rgba::TRANSPARENT));
        assert_eq!(canvas.pixel(4, 5), Some(Rgba::TRANSPARENT));
        assert_eq!(canvas.pixel(6, 3), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_draw_clips_offscreen() {
        let mut canvas = CanvasBackend::new(4, 4);
        let geometry = canvas
            .create_geometry(&QuadMesh::unit(), &solid_image(3, 3, Rgba::WHITE))
            .unwrap();
        canvas.draw(&geometry, -2.0, 1.0, 4, 4);
        assert_eq!(canvas.pixel(0, 0), Some(Rgba::TRANSPARENT));
        canvas.draw(&geometry, 3.0, -1.0, 4, 4);
        assert_eq!(canvas.pixel(3, 0), Some(Rgba::WHITE));
    }

    #[test]
    fn test_source_over_blending() {
        let mut canvas = CanvasBackend::with_background(1, 1, Rgba::opaque(0, 0, 255));
        let geometry = canvas
            .create_geometry(&QuadMesh::unit(), &solid_image(1, 1, Rgba::new(255, 0, 0, 128)))
            .unwrap();
        canvas.draw(&geometry, 0.0, -1.0, 1, 1);
        // Red at half alpha over opaque blue
        assert_eq!(canvas.pixel(0, 0), Some(Rgba::new(128, 0, 127, 255)));
        assert_eq!(canvas.to_image().get_pixel(0, 0).0, [128, 0, 127, 255]);
    }

    #[test]
    fn test_empty_image_rejected() {
        let mut canvas = CanvasBackend::new(1, 1);
        let empty = composite(
            &CoverageBitmap::empty(),
            &CoverageBitmap::empty(),
            GlyphStyle::new(Rgba::WHITE, Rgba::BLACK),
        );
        assert!(matches!(
            canvas.create_geometry(&QuadMesh::unit(), &empty),
            Err(RenderError::EmptyImage)
        ));
    }

    #[test]
    fn test_to_image_unpremultiplies() {
        let canvas = CanvasBackend::with_background(1, 1, Rgba::new(255, 0, 0, 128));
        let image = canvas.to_image();
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0, 128]);
    }
}
