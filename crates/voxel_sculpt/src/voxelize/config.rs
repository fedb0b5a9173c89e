//! Voxelization parameters.

use crate::error::VoxelizeError;

/// Configuration for [`super::Voxelizer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoxelizeConfig {
  /// World distance between neighboring samples (voxel size).
  pub accuracy: f64,
  /// Half width of the narrow band of exact distances, in voxels.
  pub band: f64,
  /// Empty samples added around the mesh bounds on every side.
  pub padding: u32,
  /// Barycentric tolerance of the column/triangle test.
  pub edge_epsilon: f64,
  /// Lattice rows evaluated before their samples are written to the grid.
  /// 0 picks two rows per rayon thread.
  pub batch_rows: u32,
}

impl Default for VoxelizeConfig {
  fn default() -> Self {
    Self {
      accuracy: 0.1,
      band: 2.0,
      padding: 2,
      edge_epsilon: 1e-10,
      batch_rows: 0,
    }
  }
}

impl VoxelizeConfig {
  pub fn new(accuracy: f64) -> Self {
    Self {
      accuracy,
      ..Self::default()
    }
  }

  pub fn with_accuracy(mut self, accuracy: f64) -> Self {
    self.accuracy = accuracy;
    self
  }

  pub fn with_band(mut self, band: f64) -> Self {
    self.band = band;
    self
  }

  pub fn with_padding(mut self, padding: u32) -> Self {
    self.padding = padding;
    self
  }

  pub fn with_edge_epsilon(mut self, edge_epsilon: f64) -> Self {
    self.edge_epsilon = edge_epsilon;
    self
  }

  pub fn with_batch_rows(mut self, batch_rows: u32) -> Self {
    self.batch_rows = batch_rows;
    self
  }

  pub fn validate(&self) -> Result<(), VoxelizeError> {
    if !(self.accuracy.is_finite() && self.accuracy > 0.0) {
      return Err(VoxelizeError::InvalidAccuracy(self.accuracy));
    }
    if !(self.band.is_finite() && self.band > 0.0) {
      return Err(VoxelizeError::InvalidBand(self.band));
    }
    Ok(())
  }

  /// Rows per assignment batch, resolving the automatic setting.
  pub fn resolved_batch_rows(&self) -> u32 {
    match self.batch_rows {
      0 => (rayon::current_num_threads() as u32).saturating_mul(2).max(1),
      rows => rows,
    }
  }

  /// Narrow band half width in world units.
  #[inline]
  pub fn band_world(&self) -> f64 {
    self.band * self.accuracy
  }
}
