//! Core data types shared by the grid, tracer and voxelizer.

use glam::UVec3;

/// Signed byte stored at every grid point.
/// Positive = inside/solid, `sdf_conversion::SENTINEL` = far outside.
pub type SdfSample = i8;

/// Material identifier carried alongside a shape.
pub type MaterialId = u8;

/// Fixed-point convention for grid samples.
///
/// A sample `v` is normalized as `(v + 128) / 255`, so the raw range
/// `[-128, 127]` maps onto `[0, 1]` and the surface sits at `ISO_LEVEL`
/// (between raw `-1` and `0`). Narrow-band distances are stored at
/// `STEPS_PER_VOXEL` steps per voxel, which keeps the normalized value linear
/// in signed distance: interpolating samples and interpolating distances
/// cross the iso level at the same point.
///
/// Precision: 1/64 voxel per step, saturating about 2 voxels from the
/// surface.
pub mod sdf_conversion {
  use super::SdfSample;

  /// "Far outside" value. Uniform regions of it cost one leaf.
  pub const SENTINEL: SdfSample = -128;

  /// Solid core value, written where a point is deep inside.
  pub const SOLID: SdfSample = 127;

  /// Normalized threshold of the implicit surface.
  pub const ISO_LEVEL: f64 = 0.5;

  /// Storage steps per voxel of signed distance.
  pub const STEPS_PER_VOXEL: f64 = 64.0;

  /// Normalize a raw sample to `[0, 1]`.
  #[inline(always)]
  pub fn normalize(value: SdfSample) -> f64 {
    (value as f64 + 128.0) / 255.0
  }

  /// True when the sample lies on the inside of the surface.
  #[inline(always)]
  pub fn is_inside(value: SdfSample) -> bool {
    value >= 0
  }

  /// Encode a signed distance in voxels (positive inside).
  ///
  /// # Returns
  /// Quantized sample, clamped to the storage range
  #[inline(always)]
  pub fn to_storage(distance: f64) -> SdfSample {
    (distance * STEPS_PER_VOXEL - 0.5).round().clamp(-128.0, 127.0) as SdfSample
  }

  /// Decode a sample back to a signed distance in voxels.
  #[inline(always)]
  pub fn to_distance(value: SdfSample) -> f64 {
    (value as f64 + 0.5) / STEPS_PER_VOXEL
  }
}

/// Inclusive axis-aligned box of grid points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VoxelBox {
  /// Minimum corner (inclusive).
  pub min: UVec3,
  /// Maximum corner (inclusive).
  pub max: UVec3,
}

impl VoxelBox {
  /// Create a box from inclusive corners.
  ///
  /// # Panics
  /// Debug-asserts that min <= max on all axes.
  pub fn new(min: UVec3, max: UVec3) -> Self {
    debug_assert!(min.cmple(max).all(), "VoxelBox min must be <= max on all axes");
    Self { min, max }
  }

  /// Box covering a single grid point.
  pub fn point(p: UVec3) -> Self {
    Self { min: p, max: p }
  }

  /// Box covering the whole grid of the given width.
  pub fn full(width: u32) -> Self {
    Self {
      min: UVec3::ZERO,
      max: UVec3::splat(width - 1),
    }
  }

  /// Number of points along each axis.
  #[inline]
  pub fn size(&self) -> UVec3 {
    self.max - self.min + UVec3::ONE
  }

  /// Total number of points in the box.
  pub fn volume(&self) -> usize {
    let s = self.size();
    s.x as usize * s.y as usize * s.z as usize
  }

  #[inline]
  pub fn contains(&self, p: UVec3) -> bool {
    p.cmpge(self.min).all() && p.cmple(self.max).all()
  }

  /// Smallest box containing both.
  pub fn union(&self, other: &VoxelBox) -> Self {
    Self {
      min: self.min.min(other.min),
      max: self.max.max(other.max),
    }
  }

  /// Overlap of two boxes, if any.
  pub fn intersection(&self, other: &VoxelBox) -> Option<Self> {
    let min = self.min.max(other.min);
    let max = self.max.min(other.max);
    min.cmple(max).all().then_some(Self { min, max })
  }

  /// Grow by `pad` on every side, clamped to `[0, limit]`.
  pub fn padded(&self, pad: u32, limit: u32) -> Self {
    Self {
      min: self.min.saturating_sub(UVec3::splat(pad)),
      max: (self.max.saturating_add(UVec3::splat(pad))).min(UVec3::splat(limit)),
    }
  }

  /// `[minx, maxx, miny, maxy, minz, maxz]`.
  pub fn to_array(&self) -> [u32; 6] {
    [
      self.min.x, self.max.x, self.min.y, self.max.y, self.min.z, self.max.z,
    ]
  }
}

/// Surface attributes copied from a source mesh onto its voxel shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceAttributes {
  /// Material used when shading the shape.
  pub material: MaterialId,
  /// Optional texture reference (path or asset key).
  pub texture: Option<String>,
}

impl SurfaceAttributes {
  pub fn new(material: MaterialId) -> Self {
    Self {
      material,
      texture: None,
    }
  }

  pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
    self.texture = Some(texture.into());
    self
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
