//! Cached set of cells the iso surface passes through.
//!
//! Cell `c` spans grid points `c ..= c + 1`, so a grid of width `W` has
//! `W - 1` cells per axis. Bits are stored in 8³ bricks that exist only
//! where at least one cell is flagged, which keeps the mask proportional to
//! the surface area rather than the grid volume.

use std::collections::HashMap;

use glam::UVec3;

use super::cell;
use crate::constants::{region_index, CORNER_OFFSETS};
use crate::grid::SparseVoxelGrid;
use crate::types::VoxelBox;

const BRICK_SHIFT: u32 = 3;
const BRICK_MASK: u32 = (1 << BRICK_SHIFT) - 1;
/// 512 bits per brick.
const BRICK_WORDS: usize = 8;

type Brick = [u64; BRICK_WORDS];

#[derive(Clone, Debug, Default)]
pub struct OccupancyMask {
  bricks: HashMap<UVec3, Brick>,
  flagged: usize,
}

#[inline(always)]
fn split(cell: UVec3) -> (UVec3, usize, u64) {
  let local = cell & UVec3::splat(BRICK_MASK);
  let bit = ((local.x << (2 * BRICK_SHIFT)) | (local.y << BRICK_SHIFT) | local.z) as usize;
  (cell >> BRICK_SHIFT, bit / 64, 1u64 << (bit % 64))
}

impl OccupancyMask {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of flagged cells.
  #[inline]
  pub fn count(&self) -> usize {
    self.flagged
  }

  pub fn clear(&mut self) {
    self.bricks.clear();
    self.flagged = 0;
  }

  #[inline]
  pub fn contains(&self, cell: UVec3) -> bool {
    let (key, word, bit) = split(cell);
    self
      .bricks
      .get(&key)
      .is_some_and(|brick| brick[word] & bit != 0)
  }

  pub fn insert(&mut self, cell: UVec3) {
    let (key, word, bit) = split(cell);
    let brick = self.bricks.entry(key).or_insert([0; BRICK_WORDS]);
    if brick[word] & bit == 0 {
      brick[word] |= bit;
      self.flagged += 1;
    }
  }

  pub fn remove(&mut self, cell: UVec3) {
    let (key, word, bit) = split(cell);
    let Some(brick) = self.bricks.get_mut(&key) else {
      return;
    };
    if brick[word] & bit != 0 {
      brick[word] &= !bit;
      self.flagged -= 1;
      if brick.iter().all(|w| *w == 0) {
        self.bricks.remove(&key);
      }
    }
  }

  /// Recompute the bit of every cell in `cells` (inclusive, in cell
  /// coordinates) from the grid.
  ///
  /// Reads one x slab of points at a time.
  pub fn rebuild(&mut self, grid: &SparseVoxelGrid, cells: &VoxelBox) {
    for x in cells.min.x..=cells.max.x {
      let points = VoxelBox::new(
        UVec3::new(x, cells.min.y, cells.min.z),
        UVec3::new(x + 1, cells.max.y + 1, cells.max.z + 1),
      );
      let dims = points.size();
      let samples = grid.read_region(&points);

      for y in 0..dims.y - 1 {
        for z in 0..dims.z - 1 {
          let corners = CORNER_OFFSETS.map(|o| samples[region_index(o.x, y + o.y, z + o.z, dims)]);
          let cell = UVec3::new(x, cells.min.y + y, cells.min.z + z);
          if cell::has_crossing(cell::corner_mask(corners)) {
            self.insert(cell);
          } else {
            self.remove(cell);
          }
        }
      }
    }
  }
}

/// Cells touching any point of `points`, clamped to a grid of width `width`.
pub fn cells_touching(points: &VoxelBox, width: u32) -> VoxelBox {
  let last = UVec3::splat(width.saturating_sub(2));
  let max = points.max.min(last);
  let min = points.min.saturating_sub(UVec3::ONE).min(max);
  VoxelBox::new(min, max)
}

#[cfg(test)]
#[path = "occupancy_test.rs"]
mod occupancy_test;
