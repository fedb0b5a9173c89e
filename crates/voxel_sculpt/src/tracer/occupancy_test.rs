use super::*;

#[test]
fn test_insert_remove_counts() {
  let mut mask = OccupancyMask::new();
  mask.insert(UVec3::new(3, 9, 17));
  mask.insert(UVec3::new(3, 9, 17));
  mask.insert(UVec3::new(100, 0, 5));
  assert_eq!(mask.count(), 2, "Duplicate inserts must not double count");
  assert!(mask.contains(UVec3::new(3, 9, 17)));
  assert!(!mask.contains(UVec3::new(3, 9, 18)));

  mask.remove(UVec3::new(3, 9, 17));
  mask.remove(UVec3::new(3, 9, 17));
  assert_eq!(mask.count(), 1);
  assert!(!mask.contains(UVec3::new(3, 9, 17)));
}

#[test]
fn test_empty_bricks_are_dropped() {
  let mut mask = OccupancyMask::new();
  mask.insert(UVec3::new(1, 2, 3));
  mask.remove(UVec3::new(1, 2, 3));
  assert!(mask.bricks.is_empty());
}

/// A single inside point flags exactly the 8 cells sharing it.
#[test]
fn test_rebuild_flags_cells_around_point() {
  let mut grid = SparseVoxelGrid::new(3).unwrap();
  grid.set(4, 4, 4, 10);

  let mut mask = OccupancyMask::new();
  mask.rebuild(&grid, &VoxelBox::full(7));
  assert_eq!(mask.count(), 8);
  for offset in CORNER_OFFSETS {
    assert!(mask.contains(UVec3::splat(3) + offset), "Cell {:?} not flagged", UVec3::splat(3) + offset);
  }
}

/// Points that are set but outside (negative) never flag anything.
#[test]
fn test_rebuild_ignores_outside_values() {
  let mut grid = SparseVoxelGrid::new(3).unwrap();
  grid.set(4, 4, 4, -10);

  let mut mask = OccupancyMask::new();
  mask.rebuild(&grid, &VoxelBox::full(7));
  assert_eq!(mask.count(), 0);
}

#[test]
fn test_rebuild_clears_stale_bits() {
  let mut grid = SparseVoxelGrid::new(3).unwrap();
  grid.set(4, 4, 4, 10);
  let mut mask = OccupancyMask::new();
  mask.rebuild(&grid, &VoxelBox::full(7));

  grid.set(4, 4, 4, -128);
  let touched = cells_touching(&VoxelBox::point(UVec3::splat(4)), grid.width());
  mask.rebuild(&grid, &touched);
  assert_eq!(mask.count(), 0);
}

#[test]
fn test_cells_touching_clamps_to_grid() {
  let inner = cells_touching(&VoxelBox::point(UVec3::new(4, 0, 7)), 8);
  assert_eq!(inner.min, UVec3::new(3, 0, 6));
  assert_eq!(inner.max, UVec3::new(4, 0, 6));

  let full = cells_touching(&VoxelBox::full(8), 8);
  assert_eq!(full, VoxelBox::full(7));
}
