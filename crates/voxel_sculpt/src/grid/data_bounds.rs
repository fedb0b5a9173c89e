//! Tight bounds of non-sentinel data.
//!
//! Two independent pruned traversals: one chases the minimal corner, the
//! other the maximal corner. A subtree is skipped unless it could still
//! lower (resp. raise) the running bound on at least one axis, so large
//! uniform regions and subtrees fully inside the current bound are never
//! visited.

use glam::UVec3;

use super::node::Node;
use crate::constants::{octant_origin, OCTANT_COUNT};
use crate::types::{sdf_conversion::SENTINEL, VoxelBox};

/// Bounds of every non-sentinel point under `root` (a node of side `width`).
pub fn find(root: &Node, width: u32) -> Option<VoxelBox> {
  let mut min = UVec3::splat(u32::MAX);
  search_min(root, UVec3::ZERO, width, &mut min);
  if min.x == u32::MAX {
    return None;
  }

  let mut max = None;
  search_max(root, UVec3::ZERO, width, &mut max);
  max.map(|max| VoxelBox::new(min, max))
}

fn search_min(node: &Node, origin: UVec3, size: u32, best: &mut UVec3) {
  if !origin.cmplt(*best).any() {
    return;
  }
  match node {
    Node::Leaf(value) => {
      if *value != SENTINEL {
        *best = best.min(origin);
      }
    }
    Node::Branch(children) => {
      let half = size / 2;
      for (octant, child) in children.iter().enumerate() {
        search_min(child, octant_origin(origin, octant, half), half, best);
      }
    }
  }
}

fn search_max(node: &Node, origin: UVec3, size: u32, best: &mut Option<UVec3>) {
  let corner = origin + UVec3::splat(size - 1);
  if let Some(current) = best {
    if !corner.cmpgt(*current).any() {
      return;
    }
  }
  match node {
    Node::Leaf(value) => {
      if *value != SENTINEL {
        *best = Some(best.map_or(corner, |current| current.max(corner)));
      }
    }
    Node::Branch(children) => {
      let half = size / 2;
      // Upper octants first so the bound rises early and prunes the rest.
      for octant in (0..OCTANT_COUNT).rev() {
        search_max(&children[octant], octant_origin(origin, octant, half), half, best);
      }
    }
  }
}
