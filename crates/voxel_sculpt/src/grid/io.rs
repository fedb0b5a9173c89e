//! Binary persistence for [`SparseVoxelGrid`].
//!
//! Only the data box is stored, as z-runs of non-sentinel samples:
//!
//! ```text
//! "SVXG"  u8 version  u8 depth  f64 scale  u8 has_data
//! [u32 min.x min.y min.z max.x max.y max.z]      if has_data
//! for x in min.x..=max.x, y in min.y..=max.y:
//!   u32 run_count
//!   run_count * (u32 start_z, u32 len, len * i8)
//! ```
//!
//! Integers and floats are little endian.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use glam::UVec3;
use tracing::debug;

use super::SparseVoxelGrid;
use crate::constants::region_index;
use crate::error::GridIoError;
use crate::types::{sdf_conversion::SENTINEL, VoxelBox};

const MAGIC: [u8; 4] = *b"SVXG";
const VERSION: u8 = 1;

/// Serialize a grid.
pub fn write_grid<W: Write>(grid: &SparseVoxelGrid, mut writer: W) -> Result<(), GridIoError> {
  writer.write_all(&MAGIC)?;
  writer.write_u8(VERSION)?;
  writer.write_u8(grid.depth() as u8)?;
  writer.write_f64::<LittleEndian>(grid.scale())?;

  let Some(bounds) = grid.find_data_bounds() else {
    writer.write_u8(0)?;
    return Ok(());
  };
  writer.write_u8(1)?;
  for v in [bounds.min, bounds.max] {
    writer.write_u32::<LittleEndian>(v.x)?;
    writer.write_u32::<LittleEndian>(v.y)?;
    writer.write_u32::<LittleEndian>(v.z)?;
  }

  let mut runs = 0usize;
  for x in bounds.min.x..=bounds.max.x {
    let slab = VoxelBox::new(
      UVec3::new(x, bounds.min.y, bounds.min.z),
      UVec3::new(x, bounds.max.y, bounds.max.z),
    );
    let dims = slab.size();
    let samples = grid.read_region(&slab);

    for y in 0..dims.y {
      let start = region_index(0, y, 0, dims);
      let column = &samples[start..start + dims.z as usize];
      let column_runs = z_runs(column);

      writer.write_u32::<LittleEndian>(column_runs.len() as u32)?;
      runs += column_runs.len();
      for (first, len) in column_runs {
        writer.write_u32::<LittleEndian>(bounds.min.z + first as u32)?;
        writer.write_u32::<LittleEndian>(len as u32)?;
        let bytes: Vec<u8> = column[first..first + len].iter().map(|v| *v as u8).collect();
        writer.write_all(&bytes)?;
      }
    }
  }

  debug!(depth = grid.depth(), runs, "grid written");
  Ok(())
}

/// Deserialize a grid written by [`write_grid`].
pub fn read_grid<R: Read>(mut reader: R) -> Result<SparseVoxelGrid, GridIoError> {
  let mut magic = [0u8; 4];
  reader.read_exact(&mut magic)?;
  if magic != MAGIC {
    return Err(GridIoError::BadMagic(magic));
  }
  let version = reader.read_u8()?;
  if version != VERSION {
    return Err(GridIoError::UnsupportedVersion(version));
  }
  let depth = reader.read_u8()? as u32;
  let scale = reader.read_f64::<LittleEndian>()?;
  if !(scale.is_finite() && scale > 0.0) {
    return Err(GridIoError::InvalidScale(scale));
  }

  let mut grid = SparseVoxelGrid::new(depth)?.with_scale(scale);
  if reader.read_u8()? == 0 {
    return Ok(grid);
  }

  let width = grid.width();
  let mut corners = [UVec3::ZERO; 2];
  for corner in &mut corners {
    corner.x = reader.read_u32::<LittleEndian>()?;
    corner.y = reader.read_u32::<LittleEndian>()?;
    corner.z = reader.read_u32::<LittleEndian>()?;
  }
  let [min, max] = corners;
  if !(min.cmple(max).all() && max.cmplt(UVec3::splat(width)).all()) {
    return Err(GridIoError::OutOfRange { width });
  }

  let mut bytes = Vec::new();
  for x in min.x..=max.x {
    for y in min.y..=max.y {
      let run_count = reader.read_u32::<LittleEndian>()?;
      for _ in 0..run_count {
        let start = reader.read_u32::<LittleEndian>()?;
        let len = reader.read_u32::<LittleEndian>()?;
        let in_range = start >= min.z && (start as u64 + len as u64) <= max.z as u64 + 1;
        if !in_range {
          return Err(GridIoError::OutOfRange { width });
        }

        bytes.resize(len as usize, 0);
        reader.read_exact(&mut bytes)?;
        for (offset, byte) in bytes.iter().enumerate() {
          grid.set(x, y, start + offset as u32, *byte as i8);
        }
      }
    }
  }

  debug!(depth, "grid read");
  Ok(grid)
}

/// Serialize into a fresh buffer.
pub fn to_bytes(grid: &SparseVoxelGrid) -> Result<Vec<u8>, GridIoError> {
  let mut out = Vec::new();
  write_grid(grid, &mut out)?;
  Ok(out)
}

pub fn from_bytes(bytes: &[u8]) -> Result<SparseVoxelGrid, GridIoError> {
  read_grid(bytes)
}

/// `(first, len)` runs of non-sentinel samples in a column.
pub(crate) fn z_runs(column: &[i8]) -> Vec<(usize, usize)> {
  let mut runs = Vec::new();
  let mut open: Option<usize> = None;
  for (i, value) in column.iter().enumerate() {
    match (open, *value != SENTINEL) {
      (None, true) => open = Some(i),
      (Some(first), false) => {
        runs.push((first, i - first));
        open = None;
      }
      _ => {}
    }
  }
  if let Some(first) = open {
    runs.push((first, column.len() - first));
  }
  runs
}

#[cfg(test)]
#[path = "io_test.rs"]
mod io_test;
