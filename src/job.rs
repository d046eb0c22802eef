//! Per-asset pipeline: load inputs, generate, merge, persist.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::catalog::MapEntry;
use crate::debug;
use crate::layout;
use crate::manifest::Manifest;
use crate::terrain::{GenerateRequest, TerrainGenerator};

/// A failed asset job, tagged with the asset and the failing stage.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("failed to read map image for `{name}` at {}", path.display())]
    LoadImage {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read info file for `{name}` at {}", path.display())]
    LoadManifest {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse info.json for `{name}`")]
    ParseManifest {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to generate map for `{name}`")]
    Generate {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to write {file} for `{name}`")]
    Write {
        name: String,
        file: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize manifest for `{name}`")]
    SerializeManifest {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

impl JobError {
    /// Asset the failure belongs to.
    pub fn map_name(&self) -> &str {
        match self {
            Self::LoadImage { name, .. }
            | Self::LoadManifest { name, .. }
            | Self::ParseManifest { name, .. }
            | Self::Generate { name, .. }
            | Self::Write { name, .. }
            | Self::SerializeManifest { name, .. } => name,
        }
    }
}

/// Process one catalog entry end to end.
///
/// Side effects are confined to `generated/<category>/<name>` under
/// `root`. Partial output from a failed job is left in place; reruns
/// overwrite every artifact, so stale files never outlive the next
/// successful run.
pub fn process_map(
    root: &Path,
    entry: &MapEntry,
    generator: &dyn TerrainGenerator,
) -> Result<(), JobError> {
    let name = entry.name;

    let image_path = layout::source_image(root, entry);
    let image = fs::read(&image_path).map_err(|source| JobError::LoadImage {
        name: name.to_string(),
        path: image_path,
        source,
    })?;

    let manifest_path = layout::source_manifest(root, entry);
    let raw_manifest = fs::read(&manifest_path).map_err(|source| JobError::LoadManifest {
        name: name.to_string(),
        path: manifest_path,
        source,
    })?;

    let mut manifest = Manifest::from_slice(&raw_manifest).map_err(|source| {
        JobError::ParseManifest {
            name: name.to_string(),
            source,
        }
    })?;

    let request = GenerateRequest {
        image: &image,
        name,
        // Test maps keep deliberately tiny synthetic land masses
        remove_small_islands: !entry.is_test,
    };
    let generated = generator
        .generate(&request)
        .map_err(|source| JobError::Generate {
            name: name.to_string(),
            source,
        })?;

    manifest
        .set_summaries(&generated.map_summary, &generated.mini_map_summary)
        .map_err(|source| JobError::SerializeManifest {
            name: name.to_string(),
            source,
        })?;

    // Directory creation precedes every write; the writes themselves have
    // no ordering dependency between them.
    let output_dir = layout::output_dir(root, entry);
    fs::create_dir_all(&output_dir)
        .map_err(|source| write_error(name, "output directory", source))?;

    fs::write(output_dir.join(layout::MAP_BIN), &generated.map)
        .map_err(|source| write_error(name, layout::MAP_BIN, source))?;
    fs::write(output_dir.join(layout::MINI_MAP_BIN), &generated.mini_map)
        .map_err(|source| write_error(name, layout::MINI_MAP_BIN, source))?;
    fs::write(output_dir.join(layout::THUMBNAIL_WEBP), &generated.thumbnail)
        .map_err(|source| write_error(name, layout::THUMBNAIL_WEBP, source))?;

    let manifest_bytes =
        manifest
            .to_pretty_bytes()
            .map_err(|source| JobError::SerializeManifest {
                name: name.to_string(),
                source,
            })?;
    fs::write(output_dir.join(layout::MANIFEST_JSON), manifest_bytes)
        .map_err(|source| write_error(name, layout::MANIFEST_JSON, source))?;

    debug!("assets"; "{}/{}", entry.category(), name);
    Ok(())
}

fn write_error(name: &str, file: &'static str, source: io::Error) -> JobError {
    JobError::Write {
        name: name.to_string(),
        file,
        source,
    }
}
