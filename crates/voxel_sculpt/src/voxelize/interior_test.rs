use super::*;

fn enter(z: f64) -> ColumnHit {
  ColumnHit { z, entering: true }
}

fn exit(z: f64) -> ColumnHit {
  ColumnHit { z, entering: false }
}

// =========================================================================
// Span sweep
// =========================================================================

#[test]
fn test_single_span_from_unsorted_hits() {
  let mut hits = [exit(3.0), enter(1.0)];
  assert_eq!(solid_spans(&mut hits).as_slice(), &[(1.0, 3.0)]);
}

#[test]
fn test_two_disjoint_spans() {
  let mut hits = [enter(0.0), exit(1.0), enter(2.0), exit(5.0)];
  assert_eq!(solid_spans(&mut hits).as_slice(), &[(0.0, 1.0), (2.0, 5.0)]);
}

/// A column through a shared edge reports the crossing twice.
#[test]
fn test_duplicate_crossings_are_ignored() {
  let mut hits = [enter(1.0), enter(1.0), exit(4.0), exit(4.0)];
  assert_eq!(solid_spans(&mut hits).as_slice(), &[(1.0, 4.0)]);
}

/// Grazing a silhouette edge gives an entry and exit at the same height.
#[test]
fn test_touching_crossing_makes_closed_span() {
  let mut hits = [exit(2.0), enter(2.0)];
  assert_eq!(solid_spans(&mut hits).as_slice(), &[(2.0, 2.0)]);
}

#[test]
fn test_unmatched_entry_is_dropped() {
  let mut hits = [enter(0.0), exit(1.0), enter(3.0)];
  assert_eq!(solid_spans(&mut hits).as_slice(), &[(0.0, 1.0)]);
}

#[test]
fn test_leading_exit_is_ignored() {
  let mut hits = [exit(-1.0), enter(0.0), exit(2.0)];
  assert_eq!(solid_spans(&mut hits).as_slice(), &[(0.0, 2.0)]);
}

// =========================================================================
// Mask
// =========================================================================

#[test]
fn test_fill_and_get() {
  let size = UVec3::new(3, 5, 7);
  let mut mask = InteriorMask::new(size);
  mask
    .par_rows_mut()
    .enumerate()
    .filter(|(x, _)| *x == 1)
    .for_each(|(_, row)| InteriorMask::fill_column(row, size, 4, 2..=5));

  assert_eq!(mask.count(), 4);
  for z in 0..7 {
    assert_eq!(mask.get(1, 4, z), (2..=5).contains(&z), "z = {}", z);
  }
  assert!(!mask.get(0, 4, 3));
  assert!(!mask.get(2, 4, 3));
}

#[test]
fn test_off_lattice_is_outside() {
  let size = UVec3::splat(2);
  let mut mask = InteriorMask::new(size);
  mask
    .par_rows_mut()
    .for_each(|row| {
      for y in 0..2 {
        InteriorMask::fill_column(row, size, y, 0..=1);
      }
    });
  assert!(mask.get_signed(IVec3::new(1, 1, 1)));
  assert!(!mask.get_signed(IVec3::new(-1, 0, 0)));
  assert!(!mask.get_signed(IVec3::new(0, 2, 0)));
}

#[test]
fn test_neighborhood_count() {
  let size = UVec3::splat(5);
  let mut mask = InteriorMask::new(size);
  mask.par_rows_mut().for_each(|row| {
    for y in 0..5 {
      InteriorMask::fill_column(row, size, y, 0..=4);
    }
  });

  assert_eq!(mask.neighborhood_count(UVec3::splat(2)), 27);
  // Corner: only a 2x2x2 block is on the lattice.
  assert_eq!(mask.neighborhood_count(UVec3::ZERO), 8);
  // Face center: 3x3x2.
  assert_eq!(mask.neighborhood_count(UVec3::new(0, 2, 2)), 18);
}
