//! Land/water grid and the on-disk tile buffer format.
//!
//! Buffer layout: little-endian u16 width and height, then one byte per
//! tile in row-major order. Bit 7 marks land, bit 6 marks shoreline (land
//! with at least one water 4-neighbor), bits 0-5 hold the magnitude: the
//! BFS distance to the nearest tile of the opposite class, capped at 63.
//! A grid with no opposite class at all (all land, all water) stores the
//! cap for every tile.

use std::collections::VecDeque;

use image::RgbaImage;

use super::MapSummary;

/// Alpha at or above this marks a source pixel as land.
const LAND_ALPHA: u8 = 128;

const LAND_BIT: u8 = 1 << 7;
const SHORE_BIT: u8 = 1 << 6;
/// Magnitude occupies the low six bits of a tile byte.
const MAX_MAGNITUDE: u32 = 63;

/// Binary land/water grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainGrid {
    width: u32,
    height: u32,
    land: Vec<bool>,
}

impl TerrainGrid {
    /// Classify every pixel of the decoded source image: opaque pixels
    /// are land, transparent pixels are water.
    pub fn from_image(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            land: image.pixels().map(|p| p[3] >= LAND_ALPHA).collect(),
        }
    }

    /// Build a grid from an explicit land mask, row-major.
    pub fn from_mask(width: u32, height: u32, land: Vec<bool>) -> Self {
        assert_eq!(land.len(), width as usize * height as usize);
        Self {
            width,
            height,
            land,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of tiles in the grid.
    pub fn len(&self) -> usize {
        self.land.len()
    }

    pub fn is_empty(&self) -> bool {
        self.land.is_empty()
    }

    pub fn land_at(&self, idx: usize) -> bool {
        self.land[idx]
    }

    pub(super) fn set_water(&mut self, idx: usize) {
        self.land[idx] = false;
    }

    /// 4-neighborhood of a tile, clipped at the grid edge.
    pub(super) fn neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        let width = self.width as usize;
        let height = self.height as usize;
        let x = idx % width;
        let y = idx / width;

        let mut out = [None; 4];
        if x > 0 {
            out[0] = Some(idx - 1);
        }
        if x + 1 < width {
            out[1] = Some(idx + 1);
        }
        if y > 0 {
            out[2] = Some(idx - width);
        }
        if y + 1 < height {
            out[3] = Some(idx + width);
        }
        out.into_iter().flatten()
    }

    /// Downsample by `factor` (ceiling dimensions). A target tile is land
    /// iff any source tile in its block is land, so narrow features
    /// survive the mini map.
    pub fn downsample(&self, factor: u32) -> Self {
        debug_assert!(factor > 0);
        let width = self.width.div_ceil(factor);
        let height = self.height.div_ceil(factor);
        let mut land = vec![false; width as usize * height as usize];

        for (idx, &tile) in self.land.iter().enumerate() {
            if !tile {
                continue;
            }
            let x = idx as u32 % self.width / factor;
            let y = idx as u32 / self.width / factor;
            land[(y * width + x) as usize] = true;
        }

        Self {
            width,
            height,
            land,
        }
    }

    /// Pack into the on-disk tile buffer plus its summary.
    ///
    /// Caller guarantees dimensions fit the u16 header.
    pub fn encode(&self) -> (Vec<u8>, MapSummary) {
        debug_assert!(self.width <= u16::MAX as u32 && self.height <= u16::MAX as u32);

        let magnitudes = self.magnitudes();
        let mut buf = Vec::with_capacity(4 + self.land.len());
        buf.extend_from_slice(&(self.width as u16).to_le_bytes());
        buf.extend_from_slice(&(self.height as u16).to_le_bytes());

        let mut num_land_tiles = 0u32;
        for (idx, &land) in self.land.iter().enumerate() {
            let mut tile = magnitudes[idx].min(MAX_MAGNITUDE) as u8;
            if land {
                num_land_tiles += 1;
                tile |= LAND_BIT;
                if self.is_shore(idx) {
                    tile |= SHORE_BIT;
                }
            }
            buf.push(tile);
        }

        let summary = MapSummary {
            width: self.width,
            height: self.height,
            num_land_tiles,
        };
        (buf, summary)
    }

    /// Land tile with at least one water 4-neighbor. The map edge itself
    /// does not count as water.
    fn is_shore(&self, idx: usize) -> bool {
        self.land[idx] && self.neighbors(idx).any(|n| !self.land[n])
    }

    /// Multi-source BFS distance to the nearest opposite-class tile,
    /// propagated within each tile's own class. Tiles with no opposite
    /// class anywhere get the magnitude cap.
    fn magnitudes(&self) -> Vec<u32> {
        let mut dist = vec![u32::MAX; self.land.len()];
        let mut queue = VecDeque::new();

        for idx in 0..self.land.len() {
            if self.neighbors(idx).any(|n| self.land[n] != self.land[idx]) {
                dist[idx] = 1;
                queue.push_back(idx);
            }
        }

        while let Some(idx) = queue.pop_front() {
            let next = dist[idx] + 1;
            for n in self.neighbors(idx) {
                if self.land[n] == self.land[idx] && dist[n] == u32::MAX {
                    dist[n] = next;
                    queue.push_back(n);
                }
            }
        }

        for d in &mut dist {
            if *d == u32::MAX {
                *d = MAX_MAGNITUDE;
            }
        }
        dist
    }
}
