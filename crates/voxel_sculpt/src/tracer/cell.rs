//! Math on a single unit cell of the grid.
//!
//! Corner layout follows `constants::CORNER_OFFSETS`:
//! ```text
//! 0: (0,0,0)  4: (0,0,1)
//! 1: (1,0,0)  5: (1,0,1)
//! 2: (0,1,0)  6: (0,1,1)
//! 3: (1,1,0)  7: (1,1,1)
//! ```

use glam::DVec3;

use crate::types::{sdf_conversion, SdfSample};

/// Bit `i` set when corner `i` is inside.
#[inline]
pub fn corner_mask(samples: [SdfSample; 8]) -> u8 {
  samples
    .iter()
    .enumerate()
    .fold(0u8, |mask, (i, v)| mask | ((sdf_conversion::is_inside(*v) as u8) << i))
}

/// True when the iso surface passes through the cell.
#[inline(always)]
pub fn has_crossing(mask: u8) -> bool {
  mask != 0 && mask != 0xFF
}

/// Trilinear interpolation of corner values at a local position in
/// `[0, 1]³`.
#[inline]
pub fn trilinear(corners: &[f64; 8], p: DVec3) -> f64 {
  let x00 = corners[0] + (corners[1] - corners[0]) * p.x;
  let x10 = corners[2] + (corners[3] - corners[2]) * p.x;
  let x01 = corners[4] + (corners[5] - corners[4]) * p.x;
  let x11 = corners[6] + (corners[7] - corners[6]) * p.x;
  let y0 = x00 + (x10 - x00) * p.y;
  let y1 = x01 + (x11 - x01) * p.y;
  y0 + (y1 - y0) * p.z
}

/// Face-difference gradient of the corner values (not normalized).
///
/// Points towards increasing values, i.e. into the solid.
#[inline]
pub fn gradient(corners: &[f64; 8]) -> DVec3 {
  let gx = (corners[1] + corners[3] + corners[5] + corners[7])
    - (corners[0] + corners[2] + corners[4] + corners[6]);
  let gy = (corners[2] + corners[3] + corners[6] + corners[7])
    - (corners[0] + corners[1] + corners[4] + corners[5]);
  let gz = (corners[4] + corners[5] + corners[6] + corners[7])
    - (corners[0] + corners[1] + corners[2] + corners[3]);
  DVec3::new(gx, gy, gz)
}

/// Parameter interval where `origin + t * dir` is inside `[lo, hi]`.
///
/// Zero direction components are tested against the slab directly instead
/// of dividing by zero. Returns `None` when the line misses the box.
pub fn slab_interval(origin: DVec3, dir: DVec3, lo: DVec3, hi: DVec3) -> Option<(f64, f64)> {
  let mut t0 = f64::NEG_INFINITY;
  let mut t1 = f64::INFINITY;
  for axis in 0..3 {
    if dir[axis] == 0.0 {
      if origin[axis] < lo[axis] || origin[axis] > hi[axis] {
        return None;
      }
      continue;
    }
    let inv = 1.0 / dir[axis];
    let mut near = (lo[axis] - origin[axis]) * inv;
    let mut far = (hi[axis] - origin[axis]) * inv;
    if near > far {
      std::mem::swap(&mut near, &mut far);
    }
    t0 = t0.max(near);
    t1 = t1.min(far);
  }
  (t0 <= t1).then_some((t0, t1))
}

/// Blend entry and exit parameters where the interpolated value crosses
/// `ISO_LEVEL`.
///
/// `None` when both ends lie on the same side.
#[inline]
pub fn iso_crossing(t_in: f64, v_in: f64, t_out: f64, v_out: f64) -> Option<f64> {
  let d_in = v_in - sdf_conversion::ISO_LEVEL;
  let d_out = v_out - sdf_conversion::ISO_LEVEL;
  if d_in * d_out > 0.0 {
    return None;
  }
  let denom = d_in.abs() + d_out.abs();
  let w_in = if denom == 0.0 { 1.0 } else { d_out.abs() / denom };
  Some(t_in * w_in + t_out * (1.0 - w_in))
}

#[cfg(test)]
#[path = "cell_test.rs"]
mod cell_test;
