//! Font file lookup by family name.

use std::path::PathBuf;

use fontdb::{Database, Family, Query};

/// Where a resolved face lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontLocation {
    pub path: PathBuf,
    /// Face index inside a collection (.ttc); 0 for single-face files.
    pub face_index: u32,
}

/// Maps a family name to a font file.
pub trait FontResolver {
    fn resolve(&self, family: &str) -> Option<FontLocation>;
}

/// Resolver over the system font database.
pub struct SystemFontResolver {
    db: Database,
}

impl SystemFontResolver {
    /// Scan the system font directories.
    pub fn new() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::info!("Loaded {} system fonts", db.len());
        Self { db }
    }

    /// Use an already-populated database.
    pub fn with_database(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl Default for SystemFontResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Generic CSS-style family names map to fontdb's generic families.
fn family_for(name: &str) -> Family<'_> {
    match name.trim().to_ascii_lowercase().as_str() {
        "monospace" | "mono" => Family::Monospace,
        "sans-serif" | "sans" => Family::SansSerif,
        "serif" => Family::Serif,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(name),
    }
}

impl FontResolver for SystemFontResolver {
    fn resolve(&self, family: &str) -> Option<FontLocation> {
        let families = [family_for(family)];
        let query = Query {
            families: &families,
            weight: fontdb::Weight::NORMAL,
            style: fontdb::Style::Normal,
            ..Query::default()
        };

        let id = self.db.query(&query)?;
        let face = self.db.face(id)?;

        let path = match &face.source {
            fontdb::Source::File(path) => path.clone(),
            fontdb::Source::SharedFile(path, _) => path.clone(),
            fontdb::Source::Binary(_) => {
                log::warn!("Font '{}' resolved to an in-memory face with no file", family);
                return None;
            }
        };

        log::info!("Resolved font '{}' to {:?} (face {})", family, path, face.index);
        Some(FontLocation {
            path,
            face_index: face.index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_database_resolves_nothing() {
        let resolver = SystemFontResolver::with_database(Database::new());
        assert_eq!(resolver.resolve("DejaVu Sans"), None);
        assert_eq!(resolver.resolve("monospace"), None);
    }

    #[test]
    fn test_generic_family_mapping() {
        assert_eq!(family_for("monospace"), Family::Monospace);
        assert_eq!(family_for("Sans-Serif"), Family::SansSerif);
        assert_eq!(family_for("Fira Code"), Family::Name("Fira Code"));
    }
}
