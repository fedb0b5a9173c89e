//! Octree node - a uniform leaf or a branch of exactly 8 children.
//!
//! Leaves are plain values: two leaves holding the same byte are the same
//! leaf, so a uniform octant of any size costs one enum slot and comparing
//! leaves is a byte compare. Branches own their children.
//!
//! # Compaction Invariant
//!
//! A branch whose 8 children are all the same leaf is never kept; it is
//! replaced by that leaf. Every mutation restores the invariant on the way
//! back up, checking only the 8 direct children of each touched node (the
//! deeper levels were already collapsed by the recursion).
//!
//! # Sizes
//!
//! Functions here take `half`, the side of the node's children. A node of
//! side 1 (a single grid point) has `half == 0` and is always a leaf.

use crate::constants::{octant_index, OCTANT_COUNT};
use crate::types::{sdf_conversion::SENTINEL, SdfSample};

/// Octree node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
  /// Uniform octant.
  Leaf(SdfSample),
  /// Octant split into 8 children, indexed by `constants::octant_index`.
  Branch(Box<[Node; OCTANT_COUNT]>),
}

impl Node {
  /// The "far outside" leaf.
  pub const EMPTY: Node = Node::Leaf(SENTINEL);

  /// Read the sample at `(x, y, z)` in a node whose children have side `half`.
  pub fn get(&self, x: u32, y: u32, z: u32, half: u32) -> SdfSample {
    let mut node = self;
    let mut half = half;
    loop {
      match node {
        Node::Leaf(value) => return *value,
        Node::Branch(children) => {
          node = &children[octant_index(x, y, z, half)];
          half >>= 1;
        }
      }
    }
  }

  /// Write the sample at `(x, y, z)`, splitting and re-collapsing along the
  /// path.
  pub fn set(&mut self, x: u32, y: u32, z: u32, half: u32, value: SdfSample) {
    match self {
      Node::Leaf(current) if *current == value => return,
      Node::Leaf(_) if half == 0 => {
        *self = Node::Leaf(value);
        return;
      }
      Node::Leaf(current) => {
        let current = *current;
        *self = Node::Branch(Box::new(std::array::from_fn(|_| Node::Leaf(current))));
      }
      Node::Branch(_) => {}
    }

    if let Node::Branch(children) = self {
      children[octant_index(x, y, z, half)].set(x, y, z, half >> 1, value);
      if let Some(uniform) = uniform_leaf(children) {
        *self = Node::Leaf(uniform);
      }
    }
  }

  /// Build a node from 8 children, collapsing when they are the same leaf.
  pub fn from_children(children: [Node; OCTANT_COUNT]) -> Node {
    match uniform_leaf(&children) {
      Some(value) => Node::Leaf(value),
      None => Node::Branch(Box::new(children)),
    }
  }

  /// Split into 8 children. A leaf yields 8 copies of itself.
  pub fn into_children(self) -> [Node; OCTANT_COUNT] {
    match self {
      Node::Leaf(value) => std::array::from_fn(|_| Node::Leaf(value)),
      Node::Branch(children) => *children,
    }
  }

  /// Embed this node, centered, in a node of twice the side.
  ///
  /// Child `i` moves to grandchild `7 - i` of new child `i`; the remaining
  /// grandchildren are empty.
  pub fn grow(self) -> Node {
    let mut grown: [Node; OCTANT_COUNT] = std::array::from_fn(|_| Node::EMPTY);
    for (octant, child) in self.into_children().into_iter().enumerate() {
      let mut grandchildren: [Node; OCTANT_COUNT] = std::array::from_fn(|_| Node::EMPTY);
      grandchildren[7 - octant] = child;
      grown[octant] = Node::from_children(grandchildren);
    }
    Node::from_children(grown)
  }

  /// Inverse of `grow`: keep the central half, dropping everything else.
  pub fn shrink(self) -> Node {
    let mut shrunk: [Node; OCTANT_COUNT] = std::array::from_fn(|_| Node::EMPTY);
    for (octant, child) in self.into_children().into_iter().enumerate() {
      let mut grandchildren = child.into_children();
      shrunk[octant] = std::mem::replace(&mut grandchildren[7 - octant], Node::EMPTY);
    }
    Node::from_children(shrunk)
  }

  #[inline]
  pub fn is_leaf(&self) -> bool {
    matches!(self, Node::Leaf(_))
  }

  /// Number of branch nodes in this subtree.
  pub fn branch_count(&self) -> usize {
    match self {
      Node::Leaf(_) => 0,
      Node::Branch(children) => 1 + children.iter().map(Node::branch_count).sum::<usize>(),
    }
  }

  /// Depth of the deepest branch below this node (0 for a leaf).
  pub fn height(&self) -> u32 {
    match self {
      Node::Leaf(_) => 0,
      Node::Branch(children) => 1 + children.iter().map(Node::height).max().unwrap_or(0),
    }
  }
}

impl Default for Node {
  fn default() -> Self {
    Node::EMPTY
  }
}

/// The shared value if all 8 children are the same leaf.
#[inline]
fn uniform_leaf(children: &[Node; OCTANT_COUNT]) -> Option<SdfSample> {
  let Node::Leaf(first) = children[0] else {
    return None;
  };
  children[1..]
    .iter()
    .all(|child| matches!(child, Node::Leaf(value) if *value == first))
    .then_some(first)
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
