//! Owned font bytes for a single face.

use std::sync::Arc;

use swash::{CacheKey, FontRef};

/// Owns the font file bytes and hands out borrowed [`FontRef`]s.
///
/// Only the face offset and cache key are stored; the `FontRef` is rebuilt
/// on demand so it never outlives the bytes it points into.
#[derive(Clone)]
pub struct FontData {
    data: Arc<Vec<u8>>,
    offset: u32,
    key: CacheKey,
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontData")
            .field("data_len", &self.data.len())
            .field("offset", &self.offset)
            .finish()
    }
}

impl FontData {
    /// Parse face `face_index` out of `data` (0 for single-face files).
    ///
    /// Returns `None` if the bytes are not a font or the index is out of
    /// range for a collection.
    pub fn new_with_index(data: Vec<u8>, face_index: usize) -> Option<Self> {
        let data = Arc::new(data);
        let (offset, key) = {
            let font = FontRef::from_index(data.as_slice(), face_index)?;
            (font.offset, font.key)
        };
        Some(Self { data, offset, key })
    }

    pub fn font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: self.data.as_slice(),
            offset: self.offset,
            key: self.key,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
