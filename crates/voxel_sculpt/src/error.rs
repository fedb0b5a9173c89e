//! Error types.
//!
//! Only boundary violations are errors. A ray miss and a cancelled
//! conversion are ordinary results (`None`).

use thiserror::Error;

/// Grid construction and resizing errors.
///
/// Limits are `constants::MIN_DEPTH` and `constants::MAX_DEPTH`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
  #[error("grid depth must be at least 1, got {0}")]
  InvalidDepth(u32),

  #[error("grid depth {0} exceeds the supported maximum of 24")]
  DepthTooLarge(u32),
}

/// Mesh voxelization errors, raised before any work starts.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VoxelizeError {
  #[error("mesh has no faces")]
  EmptyMesh,

  #[error("mesh is not closed: {open_edges} edge(s) are not shared by an even number of faces")]
  OpenMesh { open_edges: usize },

  #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
  IndexOutOfRange {
    face: usize,
    index: u32,
    vertex_count: usize,
  },

  #[error("vertex {vertex} has a non-finite coordinate")]
  NonFiniteVertex { vertex: usize },

  #[error("accuracy must be a positive finite number, got {0}")]
  InvalidAccuracy(f64),

  #[error("narrow band must be a positive finite number of voxels, got {0}")]
  InvalidBand(f64),

  #[error("mesh needs a grid deeper than supported: {0}")]
  Grid(#[from] GridError),

  #[error("voxelization worker terminated without a result")]
  WorkerLost,
}

/// Grid persistence errors.
#[derive(Debug, Error)]
pub enum GridIoError {
  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("not a voxel grid stream (bad magic {0:?})")]
  BadMagic([u8; 4]),

  #[error("unsupported grid format version {0}")]
  UnsupportedVersion(u8),

  #[error("invalid grid header: {0}")]
  InvalidDepth(#[from] GridError),

  #[error("invalid grid scale {0}")]
  InvalidScale(f64),

  #[error("stored data lies outside a grid of width {width}")]
  OutOfRange { width: u32 },
}
