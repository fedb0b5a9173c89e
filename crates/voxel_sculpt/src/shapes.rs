//! Deterministic shapes for tests, benchmarks and debugging.
//!
//! Meshes are closed with counter-clockwise faces seen from outside, so they
//! feed straight into the voxelizer. `sphere_grid` builds an analytic sphere
//! field directly, without going through a mesh.

use std::collections::HashMap;

use glam::{DVec3, UVec3};

use crate::error::GridError;
use crate::grid::SparseVoxelGrid;
use crate::types::sdf_conversion;
use crate::voxelize::TriangleMesh;

/// Narrow band written around analytic shapes, in voxels.
const SPHERE_BAND: f64 = 2.0;

/// Subdivided icosahedron centered at the origin.
///
/// `subdivisions = 0` gives the 20-face icosahedron; each level multiplies
/// the face count by 4.
pub fn icosphere(radius: f64, subdivisions: u32) -> TriangleMesh {
  let t = (1.0 + 5f64.sqrt()) / 2.0;
  let mut vertices: Vec<DVec3> = [
    (-1.0, t, 0.0),
    (1.0, t, 0.0),
    (-1.0, -t, 0.0),
    (1.0, -t, 0.0),
    (0.0, -1.0, t),
    (0.0, 1.0, t),
    (0.0, -1.0, -t),
    (0.0, 1.0, -t),
    (t, 0.0, -1.0),
    (t, 0.0, 1.0),
    (-t, 0.0, -1.0),
    (-t, 0.0, 1.0),
  ]
  .into_iter()
  .map(|(x, y, z)| DVec3::new(x, y, z).normalize())
  .collect();

  let mut faces: Vec<[u32; 3]> = vec![
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
  ];

  for _ in 0..subdivisions {
    let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
    let mut midpoint = |a: u32, b: u32, vertices: &mut Vec<DVec3>| -> u32 {
      *midpoints.entry((a.min(b), a.max(b))).or_insert_with(|| {
        let p = ((vertices[a as usize] + vertices[b as usize]) * 0.5).normalize();
        vertices.push(p);
        (vertices.len() - 1) as u32
      })
    };

    let mut next = Vec::with_capacity(faces.len() * 4);
    for [a, b, c] in faces {
      let ab = midpoint(a, b, &mut vertices);
      let bc = midpoint(b, c, &mut vertices);
      let ca = midpoint(c, a, &mut vertices);
      next.extend([[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
    }
    faces = next;
  }

  for v in &mut vertices {
    *v *= radius;
  }
  TriangleMesh::new(vertices, faces)
}

/// Axis-aligned box centered at the origin.
pub fn cuboid(half_extents: DVec3) -> TriangleMesh {
  // Vertex i has +x when bit 0 is set, +y for bit 1, +z for bit 2.
  let vertices = (0..8)
    .map(|i| {
      let sign = |bit: u32| if i & (1 << bit) != 0 { 1.0 } else { -1.0 };
      DVec3::new(sign(0), sign(1), sign(2)) * half_extents
    })
    .collect();

  let quads: [[u32; 4]; 6] = [
    [4, 5, 7, 6], // +z
    [0, 2, 3, 1], // -z
    [1, 3, 7, 5], // +x
    [0, 4, 6, 2], // -x
    [2, 6, 7, 3], // +y
    [0, 1, 5, 4], // -y
  ];
  let faces = quads
    .iter()
    .flat_map(|[a, b, c, d]| [[*a, *b, *c], [*a, *c, *d]])
    .collect();

  TriangleMesh::new(vertices, faces)
}

/// Grid holding an analytic sphere of `radius` voxels at the grid center.
///
/// Points within the narrow band get their quantized signed distance,
/// deeper points are solid and everything else stays empty.
pub fn sphere_grid(depth: u32, radius: f64, scale: f64) -> Result<SparseVoxelGrid, GridError> {
  let mut grid = SparseVoxelGrid::new(depth)?.with_scale(scale);
  let width = grid.width();
  let center = DVec3::splat(width as f64 / 2.0);
  let reach = radius + SPHERE_BAND;

  let lo = (center - reach).floor().max(DVec3::ZERO).as_uvec3();
  let hi = (center + reach)
    .ceil()
    .as_uvec3()
    .min(UVec3::splat(width - 1));

  for x in lo.x..=hi.x {
    for y in lo.y..=hi.y {
      for z in lo.z..=hi.z {
        let distance = radius - (UVec3::new(x, y, z).as_dvec3() - center).length();
        if distance < -SPHERE_BAND {
          continue;
        }
        let value = if distance > SPHERE_BAND {
          sdf_conversion::SOLID
        } else {
          sdf_conversion::to_storage(distance)
        };
        grid.set(x, y, z, value);
      }
    }
  }
  Ok(grid)
}

#[cfg(test)]
#[path = "shapes_test.rs"]
mod shapes_test;
