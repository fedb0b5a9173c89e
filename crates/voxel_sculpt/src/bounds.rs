//! Double-precision boxes in mesh space.

use glam::DVec3;

/// Closed box `[min, max]` in mesh space.
///
/// The voxelizer uses it for the mesh extent and for the band-grown box of
/// each face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DAabb3 {
  pub min: DVec3,
  pub max: DVec3,
}

impl DAabb3 {
  pub fn new(min: DVec3, max: DVec3) -> Self {
    debug_assert!(min.cmple(max).all(), "box corners out of order: {:?} > {:?}", min, max);
    Self { min, max }
  }

  /// Inverted box; absorbs the first point it grows over.
  pub fn empty() -> Self {
    Self {
      min: DVec3::INFINITY,
      max: DVec3::NEG_INFINITY,
    }
  }

  /// Smallest box holding every point, `None` without points.
  pub fn from_points<I: IntoIterator<Item = DVec3>>(points: I) -> Option<Self> {
    let mut bounds = Self::empty();
    for p in points {
      bounds.grow_to(p);
    }
    bounds.is_valid().then_some(bounds)
  }

  #[inline]
  pub fn grow_to(&mut self, point: DVec3) {
    self.min = self.min.min(point);
    self.max = self.max.max(point);
  }

  /// False for `empty()` and anything else with crossed corners.
  pub fn is_valid(&self) -> bool {
    self.min.cmple(self.max).all()
  }

  /// Grown by `margin` on every side.
  #[inline]
  pub fn expanded(&self, margin: f64) -> Self {
    Self {
      min: self.min - DVec3::splat(margin),
      max: self.max + DVec3::splat(margin),
    }
  }

  /// Boundary points count as inside.
  #[inline]
  pub fn contains_point(&self, point: DVec3) -> bool {
    self.min.cmple(point).all() && point.cmple(self.max).all()
  }

  #[inline]
  pub fn size(&self) -> DVec3 {
    self.max - self.min
  }
}

impl Default for DAabb3 {
  fn default() -> Self {
    Self::empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_no_points_no_box() {
    assert!(!DAabb3::empty().is_valid());
    assert!(!DAabb3::default().is_valid());
    assert!(DAabb3::from_points(std::iter::empty()).is_none());
  }

  #[test]
  fn test_from_points_takes_per_axis_extremes() {
    let bounds = DAabb3::from_points([
      DVec3::new(1.0, -1.0, 0.0),
      DVec3::new(-2.0, 3.0, 0.5),
      DVec3::new(0.0, 0.0, -4.0),
    ])
    .unwrap();
    assert_eq!(bounds.min, DVec3::new(-2.0, -1.0, -4.0));
    assert_eq!(bounds.max, DVec3::new(1.0, 3.0, 0.5));
    assert_eq!(bounds.size(), DVec3::new(3.0, 4.0, 4.5));
  }

  #[test]
  fn test_single_point_is_valid() {
    let bounds = DAabb3::from_points([DVec3::splat(2.0)]).unwrap();
    assert!(bounds.is_valid());
    assert_eq!(bounds.size(), DVec3::ZERO);
  }

  #[test]
  fn test_expanded_band_contains_nearby_points() {
    let face = DAabb3::new(DVec3::ZERO, DVec3::new(1.0, 1.0, 0.0));
    let reach = face.expanded(0.25);

    assert!(!face.contains_point(DVec3::new(0.5, 0.5, 0.2)));
    assert!(reach.contains_point(DVec3::new(0.5, 0.5, 0.2)));
    assert!(reach.contains_point(DVec3::new(-0.25, 1.25, -0.25)), "corner is inclusive");
    assert!(!reach.contains_point(DVec3::new(0.5, 0.5, 0.3)));
  }
}
