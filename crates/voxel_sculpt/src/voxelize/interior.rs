//! Inside/outside classification of the sampling lattice.
//!
//! Each vertical sampling column collects the heights where it crosses the
//! mesh. Sorted bottom-up, crossings through downward-facing triangles open
//! a solid span and crossings through upward-facing ones close it:
//!
//! ```text
//!   z ▲
//!     │   ── exit  (normal.z > 0)
//!     │  ███
//!     │  ███  samples with start <= z <= end are inside
//!     │  ███
//!     │   ── enter (normal.z < 0)
//!     └──────▶ column
//! ```
//!
//! Repeated crossings of the same kind (a column through a shared edge hits
//! both triangles) are ignored by the sweep, and an entry never matched by an
//! exit is dropped.

use glam::{IVec3, UVec3};
use rayon::prelude::*;
use smallvec::SmallVec;

/// One column/mesh crossing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnHit {
  pub z: f64,
  pub entering: bool,
}

/// Solid `[start, end]` spans of a column, bottom-up.
pub fn solid_spans(hits: &mut [ColumnHit]) -> SmallVec<[(f64, f64); 4]> {
  // Entries first on ties, so touching spans stay closed.
  hits.sort_by(|a, b| a.z.total_cmp(&b.z).then(b.entering.cmp(&a.entering)));

  let mut spans = SmallVec::new();
  let mut open: Option<f64> = None;
  for hit in hits.iter() {
    match (open, hit.entering) {
      (None, true) => open = Some(hit.z),
      (Some(start), false) => {
        spans.push((start, hit.z));
        open = None;
      }
      _ => {}
    }
  }
  spans
}

/// Bitset over the sampling lattice, one word-aligned chunk per x row.
#[derive(Clone, Debug)]
pub struct InteriorMask {
  size: UVec3,
  row_words: usize,
  words: Vec<u64>,
}

impl InteriorMask {
  pub fn new(size: UVec3) -> Self {
    let row_bits = size.y as usize * size.z as usize;
    let row_words = row_bits.div_ceil(64).max(1);
    Self {
      size,
      row_words,
      words: vec![0; row_words * size.x as usize],
    }
  }

  /// Mutable rows (index = x) for parallel filling.
  pub fn par_rows_mut(&mut self) -> impl IndexedParallelIterator<Item = &mut [u64]> + '_ {
    self.words.par_chunks_mut(self.row_words)
  }

  /// Mark samples `z_range` of column `y` inside a row.
  pub fn fill_column(row: &mut [u64], size: UVec3, y: u32, z_range: std::ops::RangeInclusive<u32>) {
    let base = y as usize * size.z as usize;
    for z in z_range {
      let bit = base + z as usize;
      row[bit / 64] |= 1 << (bit % 64);
    }
  }

  #[inline]
  pub fn get(&self, x: u32, y: u32, z: u32) -> bool {
    let bit = y as usize * self.size.z as usize + z as usize;
    self.words[x as usize * self.row_words + bit / 64] & (1 << (bit % 64)) != 0
  }

  /// Like `get`; positions off the lattice are outside.
  #[inline]
  pub fn get_signed(&self, p: IVec3) -> bool {
    if p.cmplt(IVec3::ZERO).any() || p.cmpge(self.size.as_ivec3()).any() {
      return false;
    }
    self.get(p.x as u32, p.y as u32, p.z as u32)
  }

  /// Inside samples among the 27 around (and including) `p`.
  pub fn neighborhood_count(&self, p: UVec3) -> u32 {
    let center = p.as_ivec3();
    let mut count = 0;
    for dx in -1..=1 {
      for dy in -1..=1 {
        for dz in -1..=1 {
          count += self.get_signed(center + IVec3::new(dx, dy, dz)) as u32;
        }
      }
    }
    count
  }

  pub fn count(&self) -> usize {
    self.words.iter().map(|w| w.count_ones() as usize).sum()
  }
}

#[cfg(test)]
#[path = "interior_test.rs"]
mod interior_test;
