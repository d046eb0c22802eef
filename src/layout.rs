//! Filesystem layout conventions for map sources and generated artifacts.
//!
//! Sources:   `assets/{maps|test_maps}/<name>/{image.png, info.json}`
//! Artifacts: `generated/{maps|test_maps}/<name>/{map.bin, mini_map.bin,
//!            thumbnail.webp, manifest.json}`

use std::path::{Path, PathBuf};

use crate::catalog::MapEntry;

pub const MAP_BIN: &str = "map.bin";
pub const MINI_MAP_BIN: &str = "mini_map.bin";
pub const THUMBNAIL_WEBP: &str = "thumbnail.webp";
pub const MANIFEST_JSON: &str = "manifest.json";

/// Directory holding an entry's source files.
fn source_dir(root: &Path, entry: &MapEntry) -> PathBuf {
    root.join("assets").join(entry.category()).join(entry.name)
}

/// Source PNG for an entry.
pub fn source_image(root: &Path, entry: &MapEntry) -> PathBuf {
    source_dir(root, entry).join("image.png")
}

/// Source metadata manifest for an entry.
pub fn source_manifest(root: &Path, entry: &MapEntry) -> PathBuf {
    source_dir(root, entry).join("info.json")
}

/// Directory an entry's artifacts are written to.
pub fn output_dir(root: &Path, entry: &MapEntry) -> PathBuf {
    root.join("generated")
        .join(entry.category())
        .join(entry.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_paths() {
        let root = Path::new("/work");
        let entry = MapEntry::new("africa");
        assert_eq!(
            source_image(root, &entry),
            Path::new("/work/assets/maps/africa/image.png")
        );
        assert_eq!(
            source_manifest(root, &entry),
            Path::new("/work/assets/maps/africa/info.json")
        );
    }

    #[test]
    fn test_output_path_mirrors_category() {
        let root = Path::new("/work");
        assert_eq!(
            output_dir(root, &MapEntry::test("plains")),
            Path::new("/work/generated/test_maps/plains")
        );
        assert_eq!(
            output_dir(root, &MapEntry::new("asia")),
            Path::new("/work/generated/maps/asia")
        );
    }
}
