//! Triangle queries used by the voxelizer.

use glam::{DVec2, DVec3};

/// Height at which the vertical line through `p` crosses the triangle.
///
/// Barycentric test on the XY projection; points up to `epsilon` outside an
/// edge still count as inside so shared edges never leak. Triangles with a
/// zero-area projection are skipped (`None`).
pub fn column_crossing(tri: &[DVec3; 3], p: DVec2, epsilon: f64) -> Option<f64> {
  let [a, b, c] = *tri;
  let det = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
  if det == 0.0 {
    return None;
  }
  let inv = 1.0 / det;

  let u = ((p.x - a.x) * (c.y - a.y) - (p.y - a.y) * (c.x - a.x)) * inv;
  let v = ((b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)) * inv;
  if u < -epsilon || v < -epsilon || u + v > 1.0 + epsilon {
    return None;
  }
  Some(a.z * (1.0 - u - v) + b.z * u + c.z * v)
}

/// Z component of the (unnormalized) face normal; negative means the face
/// looks down, so an upward ray enters the solid through it.
#[inline]
pub fn normal_z(tri: &[DVec3; 3]) -> f64 {
  let [a, b, c] = *tri;
  (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Closest point on a triangle (Ericson, Real-Time Collision Detection
/// 5.1.5).
pub fn closest_point(p: DVec3, tri: &[DVec3; 3]) -> DVec3 {
  let [a, b, c] = *tri;
  let ab = b - a;
  let ac = c - a;

  let ap = p - a;
  let d1 = ab.dot(ap);
  let d2 = ac.dot(ap);
  if d1 <= 0.0 && d2 <= 0.0 {
    return a;
  }

  let bp = p - b;
  let d3 = ab.dot(bp);
  let d4 = ac.dot(bp);
  if d3 >= 0.0 && d4 <= d3 {
    return b;
  }

  let vc = d1 * d4 - d3 * d2;
  if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
    return a + ab * (d1 / (d1 - d3));
  }

  let cp = p - c;
  let d5 = ab.dot(cp);
  let d6 = ac.dot(cp);
  if d6 >= 0.0 && d5 <= d6 {
    return c;
  }

  let vb = d5 * d2 - d1 * d6;
  if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
    return a + ac * (d2 / (d2 - d6));
  }

  let va = d3 * d6 - d5 * d4;
  if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
    return b + (c - b) * ((d4 - d3) / ((d4 - d3) + (d5 - d6)));
  }

  let denom = va + vb + vc;
  if denom == 0.0 {
    // Degenerate (collinear) triangle that slipped through the edge tests.
    return a;
  }
  a + ab * (vb / denom) + ac * (vc / denom)
}

#[inline]
pub fn distance_squared(p: DVec3, tri: &[DVec3; 3]) -> f64 {
  closest_point(p, tri).distance_squared(p)
}

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;
