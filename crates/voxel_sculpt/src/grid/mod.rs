//! Sparse voxel grid - a `2^depth` cube of signed bytes stored as an octree.
//!
//! ```text
//!   depth = 3, W = 8                       octree
//!   ┌───────┬───────┐
//!   │       │ ┌─┬─┐ │                      root (branch)
//!   │ empty │ ├─┼─┤ │        ┌──────┬──────┼──────┬──── ...
//!   │       │ └─┴─┘ │      leaf   leaf  branch  leaf
//!   ├───────┼───────┤      -128   -128   / | \  -128
//!   │       │       │                   ...
//!   │ empty │ solid │      uniform octants of any size cost one slot
//!   └───────┴───────┘
//! ```
//!
//! # World Mapping
//!
//! Grid coordinates map isotropically onto object-local world space through
//! a single `scale`:
//!
//! ```text
//! world = ((grid / W) - 0.5) * scale
//! grid  = ((world / scale) + 0.5) * W
//! ```
//!
//! `grow_grid` / `shrink_grid` change `W` without touching `scale`; callers
//! that want to keep world-space meaning use `expand` / `compact`, which
//! rescale in step.
//!
//! # Concurrency
//!
//! Mutation takes `&mut self`, so there is a single writer at a time. Reads
//! take `&self` and the grid is `Sync`: bulk read-only phases (ray casting
//! across many threads) share it freely between writes.

mod data_bounds;
pub mod io;
pub mod node;
mod region;

use glam::{DVec3, UVec3};
use tracing::trace;

use crate::constants::{MAX_DEPTH, MIN_DEPTH};
use crate::error::GridError;
use crate::types::{SdfSample, VoxelBox};
pub use io::{read_grid, write_grid};
pub use node::Node;

/// Cubic grid of side `2^depth` holding one `i8` per point.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseVoxelGrid {
  root: Node,
  depth: u32,
  scale: f64,
}

impl SparseVoxelGrid {
  /// Create an empty grid (every point is the sentinel).
  ///
  /// `scale` defaults to 1.0.
  pub fn new(depth: u32) -> Result<Self, GridError> {
    if depth < MIN_DEPTH {
      return Err(GridError::InvalidDepth(depth));
    }
    if depth > MAX_DEPTH {
      return Err(GridError::DepthTooLarge(depth));
    }
    Ok(Self {
      root: Node::EMPTY,
      depth,
      scale: 1.0,
    })
  }

  pub fn with_scale(mut self, scale: f64) -> Self {
    self.scale = scale;
    self
  }

  #[inline]
  pub fn depth(&self) -> u32 {
    self.depth
  }

  /// Side of the grid in points (`2^depth`).
  #[inline]
  pub fn width(&self) -> u32 {
    1 << self.depth
  }

  /// World size of the whole cube.
  #[inline]
  pub fn scale(&self) -> f64 {
    self.scale
  }

  pub fn set_scale(&mut self, scale: f64) {
    self.scale = scale;
  }

  /// Root of the octree.
  pub fn root(&self) -> &Node {
    &self.root
  }

  #[inline]
  fn half(&self) -> u32 {
    self.width() >> 1
  }

  /// Read the sample at a grid point.
  ///
  /// Coordinates must lie in `0..width()`.
  #[inline]
  pub fn get(&self, x: u32, y: u32, z: u32) -> SdfSample {
    debug_assert!(
      x < self.width() && y < self.width() && z < self.width(),
      "({}, {}, {}) outside grid of width {}",
      x,
      y,
      z,
      self.width()
    );
    self.root.get(x, y, z, self.half())
  }

  /// Write the sample at a grid point, keeping the tree compacted.
  ///
  /// Coordinates must lie in `0..width()`.
  pub fn set(&mut self, x: u32, y: u32, z: u32, value: SdfSample) {
    debug_assert!(
      x < self.width() && y < self.width() && z < self.width(),
      "({}, {}, {}) outside grid of width {}",
      x,
      y,
      z,
      self.width()
    );
    let half = self.half();
    self.root.set(x, y, z, half, value);
  }

  /// Independent deep copy.
  pub fn duplicate(&self) -> Self {
    self.clone()
  }

  /// Double the width, keeping the content centered.
  ///
  /// Grid coordinates of existing data shift by the old `width / 2`.
  /// `scale` is left alone.
  ///
  /// An empty grid stays a single sentinel leaf. A grid uniformly holding
  /// any other value is not left uniform: its value fills the central half
  /// and the new outer shell is sentinel, like every other grown grid.
  pub fn grow_grid(&mut self) -> Result<(), GridError> {
    if self.depth >= MAX_DEPTH {
      return Err(GridError::DepthTooLarge(self.depth + 1));
    }
    let root = std::mem::take(&mut self.root);
    self.root = if root == Node::EMPTY { root } else { root.grow() };
    self.depth += 1;
    trace!(depth = self.depth, "grid grown");
    Ok(())
  }

  /// Halve the width, keeping only the central region.
  ///
  /// No-op at depth 1. At depth 2 the result is always empty. `scale` is
  /// left alone.
  pub fn shrink_grid(&mut self) {
    match self.depth {
      0 | 1 => return,
      2 => self.root = Node::EMPTY,
      _ => {
        let root = std::mem::take(&mut self.root);
        self.root = root.shrink();
      }
    }
    self.depth -= 1;
    trace!(depth = self.depth, "grid shrunk");
  }

  /// Grow and double `scale`, so world positions of the content are kept.
  pub fn expand(&mut self) -> Result<(), GridError> {
    self.grow_grid()?;
    self.scale *= 2.0;
    Ok(())
  }

  /// Shrink (halving `scale`) while all data lies in the central half.
  ///
  /// Returns how many times the grid was shrunk. Empty grids are left as
  /// they are.
  pub fn compact(&mut self) -> u32 {
    let mut shrinks = 0;
    while self.depth > 2 {
      let Some(bounds) = self.find_data_bounds() else {
        break;
      };
      let quarter = self.width() / 4;
      let central = VoxelBox::new(UVec3::splat(quarter), UVec3::splat(3 * quarter - 1));
      if !(central.contains(bounds.min) && central.contains(bounds.max)) {
        break;
      }
      self.shrink_grid();
      self.scale *= 0.5;
      shrinks += 1;
    }
    shrinks
  }

  /// Tight inclusive box of all non-sentinel points, `None` when empty.
  pub fn find_data_bounds(&self) -> Option<VoxelBox> {
    data_bounds::find(&self.root, self.width())
  }

  /// Dense copy of a box of samples (X major, Z minor).
  pub fn read_region(&self, region: &VoxelBox) -> Vec<SdfSample> {
    debug_assert!(region.max.cmplt(UVec3::splat(self.width())).all());
    region::read(&self.root, self.width(), region)
  }

  /// True when the whole grid holds a single value.
  pub fn is_uniform(&self) -> bool {
    self.root.is_leaf()
  }

  /// Number of internal nodes; 0 for a uniform grid.
  pub fn branch_count(&self) -> usize {
    self.root.branch_count()
  }

  /// Convert a grid-space position to object-local world space.
  #[inline]
  pub fn grid_to_world(&self, p: DVec3) -> DVec3 {
    (p / self.width() as f64 - 0.5) * self.scale
  }

  /// Convert an object-local world position to grid space.
  #[inline]
  pub fn world_to_grid(&self, p: DVec3) -> DVec3 {
    (p / self.scale + 0.5) * self.width() as f64
  }
}
