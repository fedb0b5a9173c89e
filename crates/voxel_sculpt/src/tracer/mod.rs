//! Ray casting against the implicit surface of a [`SparseVoxelGrid`].
//!
//! The surface is the `ISO_LEVEL` set of the trilinear interpolation of the
//! normalized samples. A [`SurfaceTracer`] caches which unit cells contain a
//! sign change and the padded bounds of the data, then answers ray queries
//! with a DDA walk over those cells.
//!
//! ```text
//!   ray ──▶ slab test on padded bounds ──▶ DDA over unit cells
//!                                              │ flagged?
//!                                              ▼
//!                     entry/exit values ──▶ blend at ISO_LEVEL ──▶ t
//! ```
//!
//! The tracer never owns the grid. After editing, call
//! [`SurfaceTracer::update_flags`] with the touched box.

mod cell;
mod occupancy;
mod ray;

use glam::{DVec3, IVec3, UVec3};
use rayon::prelude::*;
use tracing::{debug, trace};
use web_time::Instant;

use crate::constants::CORNER_OFFSETS;
use crate::grid::SparseVoxelGrid;
use crate::types::{sdf_conversion, VoxelBox};
use occupancy::{cells_touching, OccupancyMask};
pub use ray::{Ray, RayHit};

/// Cached acceleration state for ray queries on one grid.
#[derive(Clone, Debug)]
pub struct SurfaceTracer {
  width: u32,
  mask: OccupancyMask,
  bounds: Option<VoxelBox>,
}

impl SurfaceTracer {
  /// Build the cache for `grid`.
  pub fn new(grid: &SparseVoxelGrid) -> Self {
    let mut tracer = Self {
      width: grid.width(),
      mask: OccupancyMask::new(),
      bounds: None,
    };
    tracer.initialize(grid);
    tracer
  }

  /// Rebuild everything from scratch.
  pub fn initialize(&mut self, grid: &SparseVoxelGrid) {
    let start = Instant::now();
    self.width = grid.width();
    self.mask.clear();

    let data = grid.find_data_bounds();
    if let Some(data) = data {
      self.mask.rebuild(grid, &cells_touching(&data, self.width));
    }
    self.bounds = data.map(|b| b.padded(1, self.width - 1));

    debug!(
      width = self.width,
      flagged = self.mask.count(),
      elapsed_us = start.elapsed().as_micros() as u64,
      "tracer initialized"
    );
  }

  /// Refresh the cells around an edited box of points.
  ///
  /// `None`, or a grid whose width changed since the last update, triggers
  /// a full rebuild.
  pub fn update_flags(&mut self, grid: &SparseVoxelGrid, region: Option<VoxelBox>) {
    let Some(region) = region.filter(|_| grid.width() == self.width) else {
      self.initialize(grid);
      return;
    };

    let cells = cells_touching(&region, self.width);
    self.mask.rebuild(grid, &cells);
    self.bounds = grid.find_data_bounds().map(|b| b.padded(1, self.width - 1));
    trace!(
      region = ?region.to_array(),
      flagged = self.mask.count(),
      "tracer flags updated"
    );
  }

  /// Padded data bounds in grid points, `None` for an empty grid.
  pub fn bounds(&self) -> Option<VoxelBox> {
    self.bounds
  }

  /// Number of cells containing a sign change.
  pub fn flagged_cells(&self) -> usize {
    self.mask.count()
  }

  /// Ray parameter of the first surface hit.
  pub fn find_ray_intersection(&self, grid: &SparseVoxelGrid, ray: &Ray) -> Option<f64> {
    self.trace(grid, ray).map(|hit| hit.t)
  }

  /// First surface hit with its outward normal.
  pub fn find_ray_hit(&self, grid: &SparseVoxelGrid, ray: &Ray) -> Option<RayHit> {
    self.trace(grid, ray)
  }

  /// Trace many rays in parallel; results keep the input order.
  pub fn trace_batch(&self, grid: &SparseVoxelGrid, rays: &[Ray]) -> Vec<Option<RayHit>> {
    rays.par_iter().map(|ray| self.trace(grid, ray)).collect()
  }

  fn trace(&self, grid: &SparseVoxelGrid, ray: &Ray) -> Option<RayHit> {
    let bounds = self.bounds?;
    if ray.direction == DVec3::ZERO || grid.width() != self.width {
      return None;
    }

    // Grid-index space; the parameter t is shared with the world ray.
    let width = self.width as f64;
    let origin = grid.world_to_grid(ray.origin);
    let dir = ray.direction * (width / grid.scale());

    let lo = bounds.min.as_dvec3();
    let hi = bounds.max.as_dvec3();
    let (t_enter, t_exit) = cell::slab_interval(origin, dir, lo, hi)?;
    if t_exit < 0.0 {
      return None;
    }
    let t_start = t_enter.max(0.0);

    // Valid cells: bounds.min ..= bounds.max - 1
    let first = bounds.min.as_ivec3();
    let last = (bounds.max.as_ivec3() - IVec3::ONE).max(first);
    let entry = origin + dir * t_start;
    let mut cell = entry.floor().as_ivec3().clamp(first, last);

    let mut step = IVec3::ZERO;
    let mut t_max = DVec3::splat(f64::INFINITY);
    let mut t_delta = DVec3::splat(f64::INFINITY);
    for axis in 0..3 {
      if dir[axis] > 0.0 {
        step[axis] = 1;
        t_max[axis] = (cell[axis] as f64 + 1.0 - origin[axis]) / dir[axis];
        t_delta[axis] = 1.0 / dir[axis];
      } else if dir[axis] < 0.0 {
        step[axis] = -1;
        t_max[axis] = (cell[axis] as f64 - origin[axis]) / dir[axis];
        t_delta[axis] = -1.0 / dir[axis];
      }
    }

    loop {
      let c = cell.as_uvec3();
      if self.mask.contains(c) {
        if let Some(hit) = surface_in_cell(grid, c, origin, dir) {
          return Some(hit);
        }
      }

      let axis = if t_max.x <= t_max.y && t_max.x <= t_max.z {
        0
      } else if t_max.y <= t_max.z {
        1
      } else {
        2
      };
      if !t_max[axis].is_finite() || t_max[axis] > t_exit {
        return None;
      }
      cell[axis] += step[axis];
      if cell[axis] < first[axis] || cell[axis] > last[axis] {
        return None;
      }
      t_max[axis] += t_delta[axis];
    }
  }
}

/// Solve for the surface inside one flagged cell.
fn surface_in_cell(grid: &SparseVoxelGrid, cell: UVec3, origin: DVec3, dir: DVec3) -> Option<RayHit> {
  let lo = cell.as_dvec3();
  let (t_in, t_out) = cell::slab_interval(origin, dir, lo, lo + DVec3::ONE)?;
  if t_in < 0.0 {
    return None;
  }

  let corners = CORNER_OFFSETS.map(|o| {
    let p = cell + o;
    sdf_conversion::normalize(grid.get(p.x, p.y, p.z))
  });
  let local = |t: f64| (origin + dir * t - lo).clamp(DVec3::ZERO, DVec3::ONE);
  let v_in = cell::trilinear(&corners, local(t_in));
  let v_out = cell::trilinear(&corners, local(t_out));
  let t = cell::iso_crossing(t_in, v_in, t_out, v_out)?;

  // Isotropic scaling: grid-space normals are world-space normals.
  let normal = (-cell::gradient(&corners))
    .try_normalize()
    .unwrap_or_else(|| -dir.normalize());
  Some(RayHit { t, normal })
}
