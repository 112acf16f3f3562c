//! Wiring an [`OsdConfig`] into a [`FontRenderer`].

use overtext_config::OsdConfig;
use overtext_fonts::{FontError, FontFace, FontResolver, GlyphRasterizer};
use overtext_render::FontRenderer;

/// Push spacing, position and colours from `config` into `renderer`.
///
/// Font, size, DPI and outline width are fixed at construction and are not
/// touched here.
pub fn apply_config<R, G>(renderer: &mut FontRenderer<R, G>, config: &OsdConfig)
where
    R: GlyphRasterizer,
{
    renderer.set_text_spacing_x(config.text_spacing_x);
    renderer.set_text_spacing_y(config.text_spacing_y);
    renderer.set_text_position_x(config.text_position_x);
    renderer.set_text_position_y(config.text_position_y);
    renderer.set_font_colour(config.font_colour);
    renderer.set_font_outline_colour(config.font_outline_colour);
}

/// Build a renderer for `config`, resolving its font through `resolver`.
pub fn renderer_from_config<G>(
    config: &OsdConfig,
    resolver: &dyn FontResolver,
) -> Result<FontRenderer<FontFace, G>, FontError> {
    let mut renderer = FontRenderer::with_resolver(
        resolver,
        &config.font_name,
        config.font_size,
        config.horizontal_dpi,
        config.vertical_dpi,
        config.outline_width,
    )?;
    apply_config(&mut renderer, config);
    Ok(renderer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use overtext_config::Rgba;
    use overtext_fonts::{CoverageBitmap, FontLocation, RasterizedGlyph};

    struct NoGlyphs;

    impl GlyphRasterizer for NoGlyphs {
        fn line_height(&self) -> i32 {
            64
        }

        fn rasterize(&mut self, _code: u8) -> Option<RasterizedGlyph> {
            None
        }

        fn rasterize_stroke(&mut self, _code: u8, _outline_width: f32) -> Option<CoverageBitmap> {
            None
        }
    }

    struct NoFonts;

    impl FontResolver for NoFonts {
        fn resolve(&self, _family: &str) -> Option<FontLocation> {
            None
        }
    }

    #[test]
    fn test_apply_config_sets_everything() {
        let config = OsdConfig::new()
            .with_colours(Rgba::WHITE, Rgba::opaque(10, 20, 30))
            .with_position(7, 9);
        let config = OsdConfig {
            text_spacing_x: 1.25,
            text_spacing_y: -0.5,
            ..config
        };
        let mut renderer: FontRenderer<NoGlyphs, ()> =
            FontRenderer::from_rasterizer(NoGlyphs, 1.0).unwrap();

        apply_config(&mut renderer, &config);

        let pen = renderer.pen_config();
        assert_eq!(pen.spacing_x, 1.25);
        assert_eq!(pen.spacing_y, -0.5);
        assert_eq!(pen.position_x, 7);
        assert_eq!(pen.position_y, 9);
        assert_eq!(renderer.font_colour(), Rgba::WHITE);
        assert_eq!(renderer.font_outline_colour(), Rgba::opaque(10, 20, 30));
    }

    #[test]
    fn test_renderer_from_config_reports_missing_font() {
        let config = OsdConfig::new().with_font("Missing Mono", 12.0);
        let err = renderer_from_config::<()>(&config, &NoFonts).unwrap_err();
        assert!(matches!(err, FontError::NotFound { ref name } if name == "Missing Mono"));
    }
}
