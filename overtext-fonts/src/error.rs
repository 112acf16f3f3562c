//! Typed error types for overtext-fonts.
//!
//! Construction of a font face either succeeds or fails with a [`FontError`].
//! Rasterizer failures carry an integer code whose message comes from a
//! read-only table built on first use.

use std::collections::HashMap;
use std::sync::LazyLock;

use thiserror::Error;

/// Numeric rasterizer error codes.
pub mod codes {
    pub const OK: i32 = 0x00;
    pub const CANNOT_OPEN_RESOURCE: i32 = 0x01;
    pub const UNKNOWN_FILE_FORMAT: i32 = 0x02;
    pub const INVALID_FILE_FORMAT: i32 = 0x03;
    pub const INVALID_ARGUMENT: i32 = 0x06;
    pub const UNIMPLEMENTED_FEATURE: i32 = 0x07;
    pub const INVALID_TABLE: i32 = 0x08;
    pub const INVALID_GLYPH_INDEX: i32 = 0x10;
    pub const INVALID_CHARACTER_CODE: i32 = 0x11;
    pub const INVALID_GLYPH_FORMAT: i32 = 0x12;
    pub const CANNOT_RENDER_GLYPH: i32 = 0x13;
    pub const INVALID_OUTLINE: i32 = 0x14;
    pub const INVALID_PIXEL_SIZE: i32 = 0x17;
    pub const INVALID_HANDLE: i32 = 0x20;
    pub const INVALID_LIBRARY_HANDLE: i32 = 0x21;
    pub const INVALID_FACE_HANDLE: i32 = 0x23;
    pub const INVALID_SIZE_HANDLE: i32 = 0x24;
    pub const INVALID_SLOT_HANDLE: i32 = 0x25;
    pub const INVALID_CHARMAP_HANDLE: i32 = 0x26;
    pub const INVALID_STREAM_HANDLE: i32 = 0x28;
    pub const OUT_OF_MEMORY: i32 = 0x40;
    pub const CANNOT_OPEN_STREAM: i32 = 0x51;
    pub const INVALID_STREAM_SEEK: i32 = 0x52;
    pub const INVALID_STREAM_READ: i32 = 0x54;
    pub const RASTER_UNCOMPLETE: i32 = 0x60;
    pub const RASTER_OVERFLOW: i32 = 0x62;
    pub const RASTER_NEGATIVE_HEIGHT: i32 = 0x63;
    pub const TABLE_MISSING: i32 = 0x8E;
    pub const HORIZ_HEADER_MISSING: i32 = 0x8F;
    pub const LOCATIONS_MISSING: i32 = 0x90;
    pub const NAME_TABLE_MISSING: i32 = 0x91;
    pub const CMAP_TABLE_MISSING: i32 = 0x92;
    pub const HMTX_TABLE_MISSING: i32 = 0x93;
    pub const POST_TABLE_MISSING: i32 = 0x94;
}

const ERROR_DEFINITIONS: &[(i32, &str)] = &[
    (codes::OK, "no error"),
    (codes::CANNOT_OPEN_RESOURCE, "cannot open resource"),
    (codes::UNKNOWN_FILE_FORMAT, "unknown file format"),
    (codes::INVALID_FILE_FORMAT, "broken file"),
    (codes::INVALID_ARGUMENT, "invalid argument"),
    (codes::UNIMPLEMENTED_FEATURE, "unimplemented feature"),
    (codes::INVALID_TABLE, "broken table"),
    (codes::INVALID_GLYPH_INDEX, "invalid glyph index"),
    (codes::INVALID_CHARACTER_CODE, "invalid character code"),
    (codes::INVALID_GLYPH_FORMAT, "unsupported glyph image format"),
    (codes::CANNOT_RENDER_GLYPH, "cannot render this glyph format"),
    (codes::INVALID_OUTLINE, "invalid outline"),
    (codes::INVALID_PIXEL_SIZE, "invalid pixel size"),
    (codes::INVALID_HANDLE, "invalid object handle"),
    (codes::INVALID_LIBRARY_HANDLE, "invalid library handle"),
    (codes::INVALID_FACE_HANDLE, "invalid face handle"),
    (codes::INVALID_SIZE_HANDLE, "invalid size handle"),
    (codes::INVALID_SLOT_HANDLE, "invalid glyph slot handle"),
    (codes::INVALID_CHARMAP_HANDLE, "invalid charmap handle"),
    (codes::INVALID_STREAM_HANDLE, "invalid stream handle"),
    (codes::OUT_OF_MEMORY, "out of memory"),
    (codes::CANNOT_OPEN_STREAM, "cannot open stream"),
    (codes::INVALID_STREAM_SEEK, "invalid stream seek"),
    (codes::INVALID_STREAM_READ, "invalid stream read"),
    (codes::RASTER_UNCOMPLETE, "raster uncomplete"),
    (codes::RASTER_OVERFLOW, "raster overflow"),
    (codes::RASTER_NEGATIVE_HEIGHT, "negative height while rastering"),
    (codes::TABLE_MISSING, "table missing"),
    (codes::HORIZ_HEADER_MISSING, "horizontal header (hhea) table missing"),
    (codes::LOCATIONS_MISSING, "locations (loca) table missing"),
    (codes::NAME_TABLE_MISSING, "name table missing"),
    (codes::CMAP_TABLE_MISSING, "character map (cmap) table missing"),
    (codes::HMTX_TABLE_MISSING, "horizontal metrics (hmtx) table missing"),
    (codes::POST_TABLE_MISSING, "PostScript (post) table missing"),
];

static ERROR_MESSAGES: LazyLock<HashMap<i32, &'static str>> =
    LazyLock::new(|| ERROR_DEFINITIONS.iter().copied().collect());

/// Look up the human-readable message for a rasterizer error code.
pub fn error_message(code: i32) -> &'static str {
    ERROR_MESSAGES.get(&code).copied().unwrap_or("unknown error")
}

/// A rasterizer failure: numeric code plus its table message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rasterizer error {code:#04x}: {message}")]
pub struct RasterizerError {
    pub code: i32,
    pub message: &'static str,
}

impl RasterizerError {
    pub fn new(code: i32) -> Self {
        Self {
            code,
            message: error_message(code),
        }
    }
}

/// Errors that abort construction of a font face or renderer.
///
/// A renderer whose construction failed does not exist, so there is no
/// half-initialized state to misuse.
#[derive(Debug, Error)]
pub enum FontError {
    /// The font resolver had no match for the requested family.
    #[error("Couldn't find font: {name}")]
    NotFound { name: String },

    /// The face could not be loaded or sized.
    #[error("Font load failed: {0}")]
    Load(#[from] RasterizerError),
}

impl FontError {
    pub fn load(code: i32) -> Self {
        FontError::Load(RasterizerError::new(code))
    }
}
