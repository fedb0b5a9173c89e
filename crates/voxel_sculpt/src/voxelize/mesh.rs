//! Indexed triangle mesh input.

use std::collections::HashMap;

use glam::DVec3;

use crate::bounds::DAabb3;
use crate::error::VoxelizeError;
use crate::types::SurfaceAttributes;

/// Closed, consistently oriented triangle mesh (counter-clockwise faces seen
/// from outside).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleMesh {
  pub vertices: Vec<DVec3>,
  pub faces: Vec<[u32; 3]>,
  pub attributes: SurfaceAttributes,
}

impl TriangleMesh {
  pub fn new(vertices: Vec<DVec3>, faces: Vec<[u32; 3]>) -> Self {
    Self {
      vertices,
      faces,
      attributes: SurfaceAttributes::default(),
    }
  }

  pub fn with_attributes(mut self, attributes: SurfaceAttributes) -> Self {
    self.attributes = attributes;
    self
  }

  /// Corner positions of face `face`. Indices must already be validated.
  #[inline]
  pub fn triangle(&self, face: usize) -> [DVec3; 3] {
    self.faces[face].map(|i| self.vertices[i as usize])
  }

  /// Bounds of the referenced vertices.
  pub fn bounds(&self) -> Option<DAabb3> {
    DAabb3::from_points(self.faces.iter().flatten().map(|i| self.vertices[*i as usize]))
  }

  /// Undirected edges not used by an even, non-zero number of faces.
  pub fn open_edge_count(&self) -> usize {
    let mut uses: HashMap<(u32, u32), u32> = HashMap::with_capacity(self.faces.len() * 3 / 2);
    for [a, b, c] in &self.faces {
      for (u, v) in [(*a, *b), (*b, *c), (*c, *a)] {
        *uses.entry((u.min(v), u.max(v))).or_insert(0) += 1;
      }
    }
    uses.values().filter(|count| *count % 2 != 0).count()
  }

  /// Check that the mesh is non-empty, indexed in range, finite and closed.
  pub fn validate(&self) -> Result<(), VoxelizeError> {
    if self.faces.is_empty() {
      return Err(VoxelizeError::EmptyMesh);
    }
    let vertex_count = self.vertices.len();
    for (face, indices) in self.faces.iter().enumerate() {
      if let Some(index) = indices.iter().find(|i| **i as usize >= vertex_count) {
        return Err(VoxelizeError::IndexOutOfRange {
          face,
          index: *index,
          vertex_count,
        });
      }
    }
    if let Some(vertex) = self.vertices.iter().position(|v| !v.is_finite()) {
      return Err(VoxelizeError::NonFiniteVertex { vertex });
    }
    let open_edges = self.open_edge_count();
    if open_edges > 0 {
      return Err(VoxelizeError::OpenMesh { open_edges });
    }
    Ok(())
  }
}
