use glam::DVec3;

/// Ray in the grid's object-local world space.
///
/// The direction does not have to be normalized; hit parameters are always
/// expressed along it (`origin + t * direction`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
  pub origin: DVec3,
  pub direction: DVec3,
}

impl Ray {
  pub fn new(origin: DVec3, direction: DVec3) -> Self {
    Self { origin, direction }
  }

  #[inline]
  pub fn at(&self, t: f64) -> DVec3 {
    self.origin + self.direction * t
  }
}

/// Surface hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
  /// Ray parameter of the hit.
  pub t: f64,
  /// Unit outward surface normal.
  pub normal: DVec3,
}
