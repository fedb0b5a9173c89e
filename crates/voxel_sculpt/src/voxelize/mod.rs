//! Closed triangle mesh to [`SparseVoxelGrid`] conversion.
//!
//! # Flow
//!
//! ```text
//! validate ──▶ sampling lattice ──▶ bin faces per (x, y) column
//!                                          │
//!              ┌───────────────────────────┘
//!              ▼
//!   Classify (rayon, per x row)      Assign (rayon, batches of x rows)
//!   column crossings, span sweep ──▶ 27-neighborhood, band distances
//!                                          │ z-runs per row
//!                                          ▼
//!                                 grid writes (single writer, per batch)
//! ```
//!
//! Assigned rows are written through `SparseVoxelGrid::set` one batch at a
//! time, so uniform octants collapse while the conversion runs and only a
//! batch of rows is ever held outside the tree.
//!
//! The lattice has spacing `accuracy` and covers the mesh bounds plus
//! `padding` samples per side. It is centered in the smallest power-of-two
//! grid that holds it, and the grid's `scale` is `width * accuracy`, so one
//! grid step is one lattice step.
//!
//! Both passes poll the cancel token once per sampling column, and the
//! writer polls it once per row; a cancelled conversion drops its partial
//! grid and returns `Ok(None)`.

mod config;
mod geometry;
mod interior;
mod mesh;
mod monitor;
mod task;

use std::sync::atomic::{AtomicU32, Ordering};

use glam::{DVec2, DVec3, UVec3};
use rayon::prelude::*;
use smallvec::SmallVec;
use tracing::{debug, info_span, trace};
use web_time::Instant;

use crate::bounds::DAabb3;
use crate::constants::{MAX_DEPTH, MIN_DEPTH};
use crate::error::{GridError, VoxelizeError};
use crate::grid::SparseVoxelGrid;
use crate::grid::io::z_runs;
use crate::types::{sdf_conversion, SdfSample, SurfaceAttributes};
pub use config::VoxelizeConfig;
use interior::{solid_spans, ColumnHit, InteriorMask};
pub use mesh::TriangleMesh;
pub use monitor::{CancelToken, ConvertMonitor, VoxelizePhase, VoxelizeProgress};
pub use task::{VoxelizeResult, VoxelizeTask};

/// Voxelized solid.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelShape {
  pub grid: SparseVoxelGrid,
  /// Copied from the source mesh.
  pub attributes: SurfaceAttributes,
  /// Mesh-space position of the grid center. Object-local positions from
  /// `grid.grid_to_world` plus `translation` give mesh-space positions.
  pub translation: DVec3,
}

/// Mesh voxelizer.
#[derive(Clone, Debug, Default)]
pub struct Voxelizer {
  config: VoxelizeConfig,
}

/// Regular sampling lattice over the padded mesh bounds.
#[derive(Clone, Copy, Debug)]
struct Lattice {
  origin: DVec3,
  size: UVec3,
  step: f64,
}

impl Lattice {
  #[inline]
  fn column(&self, x: u32, y: u32) -> DVec2 {
    self.origin.truncate() + DVec2::new(x as f64, y as f64) * self.step
  }

  #[inline]
  fn position(&self, p: UVec3) -> DVec3 {
    self.origin + p.as_dvec3() * self.step
  }

  #[inline]
  fn column_index(&self, x: u32, y: u32) -> usize {
    x as usize * self.size.y as usize + y as usize
  }

  /// Grid position of lattice sample 0 when centered in a grid of `width`.
  #[inline]
  fn offset_in(&self, width: u32) -> UVec3 {
    (UVec3::splat(width) - self.size) / 2
  }
}

struct Face {
  tri: [DVec3; 3],
  /// Bounds grown by the narrow band.
  reach: DAabb3,
  normal_z: f64,
}

type ColumnFaces = SmallVec<[u32; 8]>;

/// Non-sentinel samples of one lattice row as z-runs: lattice position of
/// the first sample and the run's values.
type RowRuns = Vec<(UVec3, Vec<SdfSample>)>;

impl Voxelizer {
  pub fn new(config: VoxelizeConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &VoxelizeConfig {
    &self.config
  }

  /// Convert a closed mesh.
  ///
  /// # Returns
  /// `Ok(None)` when cancelled through `monitor`.
  pub fn convert(
    &self,
    mesh: &TriangleMesh,
    monitor: &ConvertMonitor,
  ) -> Result<Option<VoxelShape>, VoxelizeError> {
    self.config.validate()?;
    mesh.validate()?;
    let start = Instant::now();

    let bounds = mesh.bounds().ok_or(VoxelizeError::EmptyMesh)?;
    let lattice = self.lattice(&bounds)?;
    let depth = depth_for(lattice.size)?;
    debug!(
      faces = mesh.faces.len(),
      size = ?lattice.size.to_array(),
      depth,
      "voxelize lattice"
    );

    let band = self.config.band_world();
    let faces: Vec<Face> = (0..mesh.faces.len())
      .map(|f| {
        let tri = mesh.triangle(f);
        let reach = DAabb3::from_points(tri)
          .unwrap_or_default()
          .expanded(band);
        Face {
          tri,
          reach,
          normal_z: geometry::normal_z(&tri),
        }
      })
      .collect();
    let columns = bin_faces(&faces, &lattice);

    let Some(interior) = self.classify(&faces, &columns, &lattice, monitor) else {
      debug!("voxelize cancelled during classification");
      return Ok(None);
    };

    let mut grid = SparseVoxelGrid::new(depth)?;
    let width = grid.width();
    grid.set_scale(width as f64 * lattice.step);
    let Some(written) = self.assign(&faces, &columns, &lattice, &interior, &mut grid, monitor) else {
      debug!("voxelize cancelled during assignment");
      return Ok(None);
    };

    let offset = lattice.offset_in(width);
    let translation = lattice.origin + (DVec3::splat(width as f64 / 2.0) - offset.as_dvec3()) * lattice.step;
    debug!(
      depth,
      inside = interior.count(),
      written,
      branches = grid.branch_count(),
      elapsed_ms = start.elapsed().as_millis() as u64,
      "voxelize complete"
    );

    Ok(Some(VoxelShape {
      grid,
      attributes: mesh.attributes.clone(),
      translation,
    }))
  }

  fn lattice(&self, bounds: &DAabb3) -> Result<Lattice, VoxelizeError> {
    let step = self.config.accuracy;
    let pad = self.config.padding as f64;
    let samples = (bounds.size() / step).ceil() + DVec3::splat(2.0 * pad + 1.0);

    let limit = (1u64 << MAX_DEPTH) as f64;
    if samples.max_element() > limit {
      let needed = samples.max_element().log2().ceil() as u32;
      return Err(GridError::DepthTooLarge(needed).into());
    }
    Ok(Lattice {
      origin: bounds.min - DVec3::splat(pad * step),
      size: samples.as_uvec3(),
      step,
    })
  }

  fn classify(
    &self,
    faces: &[Face],
    columns: &[ColumnFaces],
    lattice: &Lattice,
    monitor: &ConvertMonitor,
  ) -> Option<InteriorMask> {
    let _span = info_span!("voxelize_classify").entered();
    let size = lattice.size;
    let epsilon = self.config.edge_epsilon;
    let done = AtomicU32::new(0);
    let mut interior = InteriorMask::new(size);

    interior
      .par_rows_mut()
      .enumerate()
      .try_for_each(|(x, row)| {
        let x = x as u32;
        let mut hits: SmallVec<[ColumnHit; 16]> = SmallVec::new();
        for y in 0..size.y {
          if monitor.is_cancelled() {
            return None;
          }
          let p = lattice.column(x, y);
          hits.clear();
          for f in &columns[lattice.column_index(x, y)] {
            let face = &faces[*f as usize];
            if face.normal_z == 0.0 {
              continue;
            }
            if let Some(z) = geometry::column_crossing(&face.tri, p, epsilon) {
              hits.push(ColumnHit {
                z,
                entering: face.normal_z < 0.0,
              });
            }
          }

          for (lo, hi) in solid_spans(&mut hits) {
            let first = ((lo - lattice.origin.z) / lattice.step).ceil().max(0.0);
            let last = ((hi - lattice.origin.z) / lattice.step)
              .floor()
              .min((size.z - 1) as f64);
            if first <= last {
              InteriorMask::fill_column(row, size, y, first as u32..=last as u32);
            }
          }
        }

        let rows_done = done.fetch_add(1, Ordering::Relaxed) + 1;
        monitor.report(VoxelizeProgress {
          phase: VoxelizePhase::Classify,
          rows_done,
          rows_total: size.x,
        });
        Some(())
      })?;

    Some(interior)
  }

  /// Evaluate rows in parallel batches and write each batch into `grid`
  /// (lattice centered per `Lattice::offset_in`) before starting the next.
  ///
  /// Returns the number of samples written, `None` when cancelled.
  fn assign(
    &self,
    faces: &[Face],
    columns: &[ColumnFaces],
    lattice: &Lattice,
    interior: &InteriorMask,
    grid: &mut SparseVoxelGrid,
    monitor: &ConvertMonitor,
  ) -> Option<usize> {
    let _span = info_span!("voxelize_assign").entered();
    let size = lattice.size;
    let offset = lattice.offset_in(grid.width());
    let batch = self.config.resolved_batch_rows();
    let done = AtomicU32::new(0);
    let mut written = 0usize;

    let mut first = 0;
    while first < size.x {
      let last = first.saturating_add(batch).min(size.x);
      let rows = (first..last)
        .into_par_iter()
        .map(|x| {
          let row = self.assign_row(x, faces, columns, lattice, interior, monitor)?;
          let rows_done = done.fetch_add(1, Ordering::Relaxed) + 1;
          monitor.report(VoxelizeProgress {
            phase: VoxelizePhase::Assign,
            rows_done,
            rows_total: size.x,
          });
          Some(row)
        })
        .collect::<Option<Vec<RowRuns>>>()?;

      for row in rows {
        if monitor.is_cancelled() {
          return None;
        }
        for (start, values) in row {
          let g = start + offset;
          for (dz, value) in values.iter().enumerate() {
            grid.set(g.x, g.y, g.z + dz as u32, *value);
          }
          written += values.len();
        }
      }
      trace!(rows = last, branches = grid.branch_count(), "voxelize batch written");
      first = last;
    }

    Some(written)
  }

  /// Sample values of row `x` as z-runs of non-sentinel values.
  fn assign_row(
    &self,
    x: u32,
    faces: &[Face],
    columns: &[ColumnFaces],
    lattice: &Lattice,
    interior: &InteriorMask,
    monitor: &ConvertMonitor,
  ) -> Option<RowRuns> {
    let size = lattice.size;
    let band = self.config.band;
    let band_world_sq = self.config.band_world().powi(2);
    let mut runs = RowRuns::new();
    let mut column = vec![sdf_conversion::SENTINEL; size.z as usize];

    for y in 0..size.y {
      if monitor.is_cancelled() {
        return None;
      }
      let candidates = &columns[lattice.column_index(x, y)];
      for (z, slot) in column.iter_mut().enumerate() {
        let p = UVec3::new(x, y, z as u32);
        *slot = match interior.neighborhood_count(p) {
          0 => sdf_conversion::SENTINEL,
          27 => sdf_conversion::SOLID,
          _ => {
            let pos = lattice.position(p);
            let nearest_sq = candidates
              .iter()
              .map(|f| &faces[*f as usize])
              .filter(|face| face.reach.contains_point(pos))
              .map(|face| geometry::distance_squared(pos, &face.tri))
              .fold(band_world_sq, f64::min);
            let distance = (nearest_sq.sqrt() / lattice.step).min(band);
            let signed = if interior.get(p.x, p.y, p.z) { distance } else { -distance };
            sdf_conversion::to_storage(signed)
          }
        };
      }

      for (start, len) in z_runs(&column) {
        runs.push((UVec3::new(x, y, start as u32), column[start..start + len].to_vec()));
      }
    }
    Some(runs)
  }
}

/// Smallest depth whose width holds the lattice.
fn depth_for(size: UVec3) -> Result<u32, GridError> {
  let longest = size.max_element().max(1);
  let depth = longest.next_power_of_two().trailing_zeros().max(MIN_DEPTH);
  if depth > MAX_DEPTH {
    return Err(GridError::DepthTooLarge(depth));
  }
  Ok(depth)
}

/// Face indices whose band-grown bounds overlap each lattice column.
fn bin_faces(faces: &[Face], lattice: &Lattice) -> Vec<ColumnFaces> {
  let size = lattice.size;
  let mut columns = vec![ColumnFaces::new(); size.x as usize * size.y as usize];
  let max = DVec2::new((size.x - 1) as f64, (size.y - 1) as f64);

  for (i, face) in faces.iter().enumerate() {
    let lo = ((face.reach.min.truncate() - lattice.origin.truncate()) / lattice.step)
      .ceil()
      .clamp(DVec2::ZERO, max);
    let hi = ((face.reach.max.truncate() - lattice.origin.truncate()) / lattice.step)
      .floor()
      .clamp(DVec2::ZERO, max);
    for x in lo.x as u32..=hi.x as u32 {
      for y in lo.y as u32..=hi.y as u32 {
        columns[lattice.column_index(x, y)].push(i as u32);
      }
    }
  }
  columns
}
