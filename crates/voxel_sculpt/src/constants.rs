//! Grid layout constants.
//!
//! # Octant Indexing
//!
//! Every internal octree node has exactly 8 children. The child index packs
//! the half of the parent cube the child occupies on each axis:
//!
//! ```text
//!         +Y
//!          │
//!          │
//!          │
//!          └───────── +X
//!         /
//!        /
//!       +Z
//!
//! Octant / cell corner indices (binary: ZYX):
//!   0 = (0,0,0)    4 = (0,0,1)
//!   1 = (1,0,0)    5 = (1,0,1)
//!   2 = (0,1,0)    6 = (0,1,1)
//!   3 = (1,1,0)    7 = (1,1,1)
//! ```
//!
//! The same ordering is used for the 8 corner samples of a unit cell, so
//! `7 - i` is always the octant diagonally opposite `i`. Growing a grid
//! places old child `i` at grandchild `7 - i`, which is the sub-octant
//! touching the new center.
//!
//! # Dense Region Layout
//!
//! ```text
//! index = ((x - min.x) * size.y + (y - min.y)) * size.z + (z - min.z)
//! ```
//!
//! X is the major axis and Z the minor one, matching the order in which
//! persistence writes `(x, y)` columns of `z` runs.

use glam::UVec3;

/// Smallest valid octree depth (a 2³ grid).
pub const MIN_DEPTH: u32 = 1;

/// Largest supported octree depth.
///
/// Keeps `width`, `width / 2` offsets and every coordinate comfortably inside
/// `u32` / `i32` arithmetic.
pub const MAX_DEPTH: u32 = 24;

/// Number of children of an internal node.
pub const OCTANT_COUNT: usize = 8;

/// Unit offsets of the 8 octants / cell corners (bit 0 = X, bit 1 = Y, bit 2
/// = Z).
pub const CORNER_OFFSETS: [UVec3; 8] = [
  UVec3::new(0, 0, 0),
  UVec3::new(1, 0, 0),
  UVec3::new(0, 1, 0),
  UVec3::new(1, 1, 0),
  UVec3::new(0, 0, 1),
  UVec3::new(1, 0, 1),
  UVec3::new(0, 1, 1),
  UVec3::new(1, 1, 1),
];

/// Octant of `(x, y, z)` inside a node whose children have side `half`.
#[inline(always)]
pub const fn octant_index(x: u32, y: u32, z: u32, half: u32) -> usize {
  (((x & half) != 0) as usize)
    | ((((y & half) != 0) as usize) << 1)
    | ((((z & half) != 0) as usize) << 2)
}

/// Minimum corner of octant `octant` in a node at `origin` with children of
/// side `half`.
#[inline(always)]
pub fn octant_origin(origin: UVec3, octant: usize, half: u32) -> UVec3 {
  origin + CORNER_OFFSETS[octant] * half
}

/// Linear index into a dense region of the given size.
#[inline(always)]
pub const fn region_index(x: u32, y: u32, z: u32, size: UVec3) -> usize {
  ((x as usize * size.y as usize) + y as usize) * size.z as usize + z as usize
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
