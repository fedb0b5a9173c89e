//! Dense extraction of a box of samples.
//!
//! Walks only the subtrees overlapping the requested box and fills whole
//! leaf intersections at once, so reading a mostly uniform region costs far
//! less than one `get` per point.

use glam::UVec3;

use super::node::Node;
use crate::constants::{octant_origin, region_index};
use crate::types::{sdf_conversion::SENTINEL, SdfSample, VoxelBox};

/// Read `region` from a tree of side `width` into a dense buffer.
///
/// Layout: X major, Z minor (`constants::region_index` relative to
/// `region.min`).
pub fn read(root: &Node, width: u32, region: &VoxelBox) -> Vec<SdfSample> {
  let mut out = vec![SENTINEL; region.volume()];
  fill(root, UVec3::ZERO, width, region, &mut out);
  out
}

fn fill(node: &Node, origin: UVec3, size: u32, region: &VoxelBox, out: &mut [SdfSample]) {
  let node_box = VoxelBox::new(origin, origin + UVec3::splat(size - 1));
  let Some(overlap) = node_box.intersection(region) else {
    return;
  };

  match node {
    // Buffer starts out as sentinel.
    Node::Leaf(SENTINEL) => {}
    Node::Leaf(value) => {
      let dims = region.size();
      let lo = overlap.min - region.min;
      let hi = overlap.max - region.min;
      for x in lo.x..=hi.x {
        for y in lo.y..=hi.y {
          let start = region_index(x, y, lo.z, dims);
          let end = region_index(x, y, hi.z, dims);
          out[start..=end].fill(*value);
        }
      }
    }
    Node::Branch(children) => {
      let half = size / 2;
      for (octant, child) in children.iter().enumerate() {
        fill(child, octant_origin(origin, octant, half), half, region, out);
      }
    }
  }
}
