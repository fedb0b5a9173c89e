use super::*;
use crate::types::sdf_conversion::{SENTINEL, SOLID};

/// Divergence-theorem volume; positive for outward-facing triangles.
fn signed_volume(mesh: &TriangleMesh) -> f64 {
  (0..mesh.faces.len())
    .map(|f| {
      let [a, b, c] = mesh.triangle(f);
      a.dot(b.cross(c)) / 6.0
    })
    .sum()
}

#[test]
fn test_icosahedron_counts() {
  let mesh = icosphere(1.0, 0);
  assert_eq!(mesh.vertices.len(), 12);
  assert_eq!(mesh.faces.len(), 20);
  assert_eq!(mesh.open_edge_count(), 0);
}

#[test]
fn test_icosphere_subdivision_shares_midpoints() {
  let mesh = icosphere(2.0, 2);
  // V = 10 * 4^n + 2
  assert_eq!(mesh.vertices.len(), 162);
  assert_eq!(mesh.faces.len(), 320);
  assert_eq!(mesh.open_edge_count(), 0, "Subdivided sphere must stay closed");
  for v in &mesh.vertices {
    assert!((v.length() - 2.0).abs() < 1e-12);
  }
}

#[test]
fn test_icosphere_faces_point_outward() {
  let mesh = icosphere(1.0, 3);
  let volume = signed_volume(&mesh);
  let sphere = 4.0 / 3.0 * std::f64::consts::PI;
  assert!(volume > 0.0, "Faces should be counter-clockwise from outside");
  assert!(volume < sphere && volume > 0.95 * sphere, "Volume {} too far from {}", volume, sphere);
}

#[test]
fn test_cuboid_is_closed_and_outward() {
  let mesh = cuboid(DVec3::new(1.0, 2.0, 0.5));
  assert_eq!(mesh.vertices.len(), 8);
  assert_eq!(mesh.faces.len(), 12);
  assert_eq!(mesh.open_edge_count(), 0);
  assert!((signed_volume(&mesh) - 8.0).abs() < 1e-12);

  // Every face normal points away from the center.
  for f in 0..mesh.faces.len() {
    let [a, b, c] = mesh.triangle(f);
    let normal = (b - a).cross(c - a);
    let centroid = (a + b + c) / 3.0;
    assert!(normal.dot(centroid) > 0.0, "Face {} faces inward", f);
  }
}

#[test]
fn test_sphere_grid_values() {
  let grid = sphere_grid(5, 8.0, 32.0).unwrap();
  // Center is (16, 16, 16).
  assert_eq!(grid.get(16, 16, 16), SOLID);
  assert_eq!(grid.get(0, 0, 0), SENTINEL);

  // On the surface the stored value sits right at the iso level.
  let on_surface = grid.get(24, 16, 16);
  assert!(on_surface == -1 || on_surface == 0, "Got {}", on_surface);

  // One voxel inside / outside.
  assert!(grid.get(23, 16, 16) > 0);
  assert!(grid.get(25, 16, 16) < 0);
  assert!(grid.get(25, 16, 16) > SENTINEL);
}

#[test]
fn test_sphere_grid_bounds() {
  let grid = sphere_grid(5, 8.0, 32.0).unwrap();
  let bounds = grid.find_data_bounds().unwrap();
  // Exactly 2 voxels out saturates to the sentinel, so data ends 1 voxel
  // inside the band.
  assert_eq!(bounds.min, UVec3::splat(7));
  assert_eq!(bounds.max, UVec3::splat(25));
}
