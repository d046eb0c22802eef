//! Terrain generation: one source image in, playable map data out.
//!
//! # Modules
//!
//! - [`grid`]: land/water grid, tile packing, mini map downsampling
//! - [`islands`]: small-island removal
//! - [`thumbnail`]: WebP thumbnail encoding

mod grid;
mod islands;
mod thumbnail;

pub use grid::TerrainGrid;

use anyhow::{Context, Result, bail};
use serde::Serialize;

/// Downsampling factor between the full map and the mini map.
const MINI_MAP_FACTOR: u32 = 2;
/// Land components smaller than this are pruned on production maps.
const MIN_ISLAND_TILES: usize = 30;
/// Longest edge of the generated thumbnail, in pixels.
const THUMBNAIL_EDGE: u32 = 512;

/// Derived dimensions recorded in the manifest for each generated buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapSummary {
    pub width: u32,
    pub height: u32,
    pub num_land_tiles: u32,
}

/// Input to a single generation call.
#[derive(Debug, Clone, Copy)]
pub struct GenerateRequest<'a> {
    /// Raw encoded source image (PNG).
    pub image: &'a [u8],
    /// Asset name, used for diagnostics only.
    pub name: &'a str,
    /// Prune land components below the island threshold.
    pub remove_small_islands: bool,
}

/// Everything derived from one source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMap {
    pub map: Vec<u8>,
    pub mini_map: Vec<u8>,
    pub thumbnail: Vec<u8>,
    pub map_summary: MapSummary,
    pub mini_map_summary: MapSummary,
}

/// Map generation strategy.
///
/// Implementations must be deterministic: identical image bytes and flags
/// produce byte-identical buffers. Reruns of the pipeline overwrite
/// previous output and rely on this to converge.
pub trait TerrainGenerator: Sync {
    fn generate(&self, request: &GenerateRequest<'_>) -> Result<GeneratedMap>;
}

/// The shipped generator: decodes the source PNG and derives all
/// artifacts from its alpha channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelGenerator;

impl TerrainGenerator for PixelGenerator {
    fn generate(&self, request: &GenerateRequest<'_>) -> Result<GeneratedMap> {
        let image = image::load_from_memory(request.image)
            .with_context(|| format!("failed to decode source image for `{}`", request.name))?
            .to_rgba8();

        // Tile buffers store dimensions as little-endian u16
        let (width, height) = image.dimensions();
        if width > u16::MAX as u32 || height > u16::MAX as u32 {
            bail!(
                "map `{}` is {}x{}, larger than the {} tile header limit",
                request.name,
                width,
                height,
                u16::MAX
            );
        }

        let mut grid = TerrainGrid::from_image(&image);
        if request.remove_small_islands {
            islands::remove_small_islands(&mut grid, MIN_ISLAND_TILES);
        }

        // The mini map derives from the post-removal grid, so both buffers
        // can be packed independently.
        let ((map, map_summary), (mini_map, mini_map_summary)) = rayon::join(
            || grid.encode(),
            || grid.downsample(MINI_MAP_FACTOR).encode(),
        );

        let thumbnail = thumbnail::encode(&image, THUMBNAIL_EDGE)
            .with_context(|| format!("failed to encode thumbnail for `{}`", request.name))?;

        Ok(GeneratedMap {
            map,
            mini_map,
            thumbnail,
            map_summary,
            mini_map_summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(image: &RgbaImage) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    const LAND: Rgba<u8> = Rgba([60, 140, 60, 255]);
    const WATER: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn request(image: &[u8], remove_small_islands: bool) -> GenerateRequest<'_> {
        GenerateRequest {
            image,
            name: "fixture",
            remove_small_islands,
        }
    }

    #[test]
    fn test_all_land_summaries() {
        let image = RgbaImage::from_pixel(10, 10, LAND);
        let bytes = png_bytes(&image);

        let generated = PixelGenerator.generate(&request(&bytes, false)).unwrap();

        assert_eq!(
            generated.map_summary,
            MapSummary {
                width: 10,
                height: 10,
                num_land_tiles: 100
            }
        );
        assert_eq!(
            generated.mini_map_summary,
            MapSummary {
                width: 5,
                height: 5,
                num_land_tiles: 25
            }
        );
        assert!(!generated.map.is_empty());
        assert!(!generated.mini_map.is_empty());
        assert!(!generated.thumbnail.is_empty());
    }

    #[test]
    fn test_small_island_pruned_on_production_maps() {
        // A 40x8 landmass (320 tiles) plus a lone land pixel far away.
        let mut image = RgbaImage::from_pixel(64, 64, WATER);
        for y in 0..8 {
            for x in 0..40 {
                image.put_pixel(x, y, LAND);
            }
        }
        image.put_pixel(60, 60, LAND);
        let bytes = png_bytes(&image);

        let pruned = PixelGenerator.generate(&request(&bytes, true)).unwrap();
        assert_eq!(pruned.map_summary.num_land_tiles, 320);

        let kept = PixelGenerator.generate(&request(&bytes, false)).unwrap();
        assert_eq!(kept.map_summary.num_land_tiles, 321);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut image = RgbaImage::from_pixel(32, 16, WATER);
        for y in 4..12 {
            for x in 8..30 {
                image.put_pixel(x, y, LAND);
            }
        }
        let bytes = png_bytes(&image);

        let first = PixelGenerator.generate(&request(&bytes, true)).unwrap();
        let second = PixelGenerator.generate(&request(&bytes, true)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_undecodable_image_fails() {
        let err = PixelGenerator
            .generate(&request(b"not a png", true))
            .unwrap_err();
        assert!(err.to_string().contains("fixture"));
    }
}
