//! Typed error types for overtext-render.

use thiserror::Error;

/// Failures while turning a composited glyph image into drawable geometry,
/// or while exporting a canvas.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The pixel buffer length does not match `width * height`.
    #[error("Invalid RGBA data size: expected {expected} pixels, got {actual} pixels")]
    InvalidTextureData {
        /// Expected pixel count (`width * height`).
        expected: usize,
        /// Actual pixel count received.
        actual: usize,
    },

    /// The image exceeds the device's maximum 2D texture dimension.
    #[error("Glyph image {width}x{height} exceeds the texture limit of {limit}")]
    TextureTooLarge { width: u32, height: u32, limit: u32 },

    /// Zero-area images have nothing to upload.
    #[error("Glyph image has zero area")]
    EmptyImage,

    /// Writing a canvas to disk failed.
    #[error("Image save failed for '{path}': {source}")]
    ImageSave {
        path: String,
        #[source]
        source: image::ImageError,
    },
}
