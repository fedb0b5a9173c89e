//! voxel_sculpt - sparse volumetric solids for interactive sculpting
//!
//! This crate provides the core of a volumetric modeling backend: a signed
//! byte field stored in a sparse octree, a ray caster that locates the
//! implicit surface inside that field with sub-voxel accuracy, and a
//! rasterizer that turns closed triangle meshes into such a field.
//!
//! # Features
//!
//! - **SparseVoxelGrid**: `2^depth` cube of `i8` samples with automatic
//!   collapse of uniform octants, grow/shrink around the center and a sparse
//!   run-length persistence format
//! - **SurfaceTracer**: DDA traversal over a cached occupancy mask,
//!   trilinear entry/exit surface solve and gradient normals; read-only
//!   queries run in parallel via rayon
//! - **Voxelizer**: column scan-conversion of closed meshes plus a narrow
//!   band of exact point-to-triangle distances, cancellable and reporting
//!   progress
//!
//! # Example
//!
//! ```ignore
//! use glam::DVec3;
//! use voxel_sculpt::{shapes, Ray, SurfaceTracer, Voxelizer, VoxelizeConfig, ConvertMonitor};
//!
//! let mesh = shapes::icosphere(1.0, 3);
//! let shape = Voxelizer::new(VoxelizeConfig::new(0.05))
//!   .convert(&mesh, &ConvertMonitor::new())?
//!   .expect("not cancelled");
//!
//! let tracer = SurfaceTracer::new(&shape.grid);
//! let ray = Ray::new(DVec3::new(-3.0, 0.0, 0.0) - shape.translation, DVec3::X);
//! if let Some(hit) = tracer.find_ray_hit(&shape.grid, &ray) {
//!   println!("hit at t = {}, normal = {:?}", hit.t, hit.normal);
//! }
//! ```

pub mod bounds;
pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use bounds::DAabb3;
pub use error::{GridError, GridIoError, VoxelizeError};
pub use types::{sdf_conversion, MaterialId, SdfSample, SurfaceAttributes, VoxelBox};

// Sparse octree storage
pub mod grid;
pub use grid::SparseVoxelGrid;

// Ray / implicit surface intersection
pub mod tracer;
pub use tracer::{Ray, RayHit, SurfaceTracer};

// Mesh to volume conversion
pub mod voxelize;
pub use voxelize::{
  CancelToken, ConvertMonitor, TriangleMesh, VoxelShape, VoxelizeConfig, VoxelizePhase,
  VoxelizeProgress, VoxelizeTask, Voxelizer,
};

// Deterministic shapes for tests and benchmarks
pub mod shapes;
