use overtext_fonts::error::codes;
use overtext_fonts::{
    FontError, FontFace, FontLocation, FontResolver, GlyphRasterizer, SystemFontResolver,
};
use std::cell::Cell;
use std::path::PathBuf;
use tempfile::TempDir;

struct NoFonts {
    calls: Cell<usize>,
}

impl FontResolver for NoFonts {
    fn resolve(&self, _family: &str) -> Option<FontLocation> {
        self.calls.set(self.calls.get() + 1);
        None
    }
}

struct FixedPath(PathBuf);

impl FontResolver for FixedPath {
    fn resolve(&self, _family: &str) -> Option<FontLocation> {
        Some(FontLocation {
            path: self.0.clone(),
            face_index: 0,
        })
    }
}

fn load_code(err: FontError) -> i32 {
    match err {
        FontError::Load(e) => e.code,
        other => panic!("expected load error, got {other}"),
    }
}

#[test]
fn test_unresolved_family_is_not_found() {
    let resolver = NoFonts {
        calls: Cell::new(0),
    };
    let err = FontFace::load(&resolver, "Nonexistent Sans", 12.0, 96, 96).unwrap_err();
    assert_eq!(err.to_string(), "Couldn't find font: Nonexistent Sans");
    assert_eq!(resolver.calls.get(), 1);
}

#[test]
fn test_missing_file_cannot_open() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let resolver = FixedPath(temp_dir.path().join("missing.ttf"));
    let err = FontFace::load(&resolver, "Anything", 12.0, 96, 96).unwrap_err();
    assert_eq!(load_code(err), codes::CANNOT_OPEN_RESOURCE);
}

#[test]
fn test_non_font_file_unknown_format() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("zeros.ttf");
    std::fs::write(&path, vec![0u8; 256]).unwrap();
    let err = FontFace::open(&path, 0, 12.0, 96, 96).unwrap_err();
    assert_eq!(load_code(err), codes::UNKNOWN_FILE_FORMAT);
}

#[test]
fn test_negative_size_invalid_pixel_size() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let err = FontFace::open(&temp_dir.path().join("a.ttf"), 0, -4.0, 96, 96).unwrap_err();
    assert_eq!(load_code(err), codes::INVALID_PIXEL_SIZE);
}

/// Exercises a real face when the machine has one; skipped otherwise.
#[test]
fn test_system_font_rasterizes_when_available() {
    let resolver = SystemFontResolver::new();
    let family = resolver
        .database()
        .faces()
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()));
    let Some(location) = family.and_then(|name| resolver.resolve(&name)) else {
        eprintln!("no system fonts; skipping");
        return;
    };
    let Ok(mut face) = FontFace::open_location(&location, 16.0, 96, 96) else {
        eprintln!("system font {:?} not loadable; skipping", location.path);
        return;
    };

    assert!(face.line_height() > 0);

    let Some(glyph) = face.rasterize(b'A') else {
        return;
    };
    assert!(glyph.metrics.advance_x > 0);
    assert_eq!(glyph.metrics.advance_y, 0);
    assert_eq!(glyph.metrics.width, glyph.bitmap.width() as i32 * 64);

    if let Some(space) = face.rasterize(b' ') {
        assert!(space.bitmap.is_empty());
        assert!(space.metrics.advance_x > 0);
    }

    if let Some(stroke) = face.rasterize_stroke(b'A', 1.0) {
        assert!(stroke.width() >= glyph.bitmap.width());
        assert!(stroke.height() >= glyph.bitmap.height());
    }
}
