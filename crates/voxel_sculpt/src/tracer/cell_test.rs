use super::*;
use crate::types::sdf_conversion::{SENTINEL, SOLID};

// =========================================================================
// Corner mask
// =========================================================================

#[test]
fn test_corner_mask_bits() {
  assert_eq!(corner_mask([SENTINEL; 8]), 0);
  assert_eq!(corner_mask([SOLID; 8]), 0xFF);

  let mut samples = [SENTINEL; 8];
  samples[0] = 0;
  samples[5] = 12;
  assert_eq!(corner_mask(samples), 0b0010_0001);
}

#[test]
fn test_zero_counts_as_inside() {
  let mut samples = [-1i8; 8];
  samples[7] = 0;
  assert_eq!(corner_mask(samples), 0b1000_0000);
}

#[test]
fn test_has_crossing() {
  assert!(!has_crossing(0));
  assert!(!has_crossing(0xFF));
  assert!(has_crossing(0b0000_0001));
  assert!(has_crossing(0b0111_1111));
}

// =========================================================================
// Interpolation and gradient
// =========================================================================

#[test]
fn test_trilinear_hits_corners() {
  let corners = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
  for (i, offset) in crate::constants::CORNER_OFFSETS.iter().enumerate() {
    let value = trilinear(&corners, offset.as_dvec3());
    assert!((value - corners[i]).abs() < 1e-12, "Corner {} mismatch", i);
  }
}

#[test]
fn test_trilinear_center_is_average() {
  let corners = [0.1, 0.9, 0.3, 0.2, 0.8, 0.4, 0.6, 0.7];
  let mean = corners.iter().sum::<f64>() / 8.0;
  assert!((trilinear(&corners, DVec3::splat(0.5)) - mean).abs() < 1e-12);
}

#[test]
fn test_gradient_of_linear_field() {
  // v = 2x - y + 0.5z
  let corners: [f64; 8] = std::array::from_fn(|i| {
    let o = crate::constants::CORNER_OFFSETS[i].as_dvec3();
    2.0 * o.x - o.y + 0.5 * o.z
  });
  let g = gradient(&corners).normalize();
  let expected = DVec3::new(2.0, -1.0, 0.5).normalize();
  assert!((g - expected).length() < 1e-12, "Gradient {:?} != {:?}", g, expected);
}

// =========================================================================
// Slab test
// =========================================================================

#[test]
fn test_slab_hit_through_box() {
  let (t0, t1) = slab_interval(
    DVec3::new(-1.0, 0.5, 0.5),
    DVec3::X,
    DVec3::ZERO,
    DVec3::ONE,
  )
  .unwrap();
  assert!((t0 - 1.0).abs() < 1e-12);
  assert!((t1 - 2.0).abs() < 1e-12);
}

#[test]
fn test_slab_parallel_outside_misses() {
  assert_eq!(
    slab_interval(DVec3::new(-1.0, 2.0, 0.5), DVec3::X, DVec3::ZERO, DVec3::ONE),
    None
  );
}

#[test]
fn test_slab_parallel_inside_is_bounded_by_other_axes() {
  let (t0, t1) = slab_interval(
    DVec3::new(0.5, 0.5, 3.0),
    DVec3::new(0.0, 0.0, -2.0),
    DVec3::ZERO,
    DVec3::ONE,
  )
  .unwrap();
  assert!((t0 - 1.0).abs() < 1e-12);
  assert!((t1 - 1.5).abs() < 1e-12);
}

#[test]
fn test_slab_box_behind_has_negative_interval() {
  let (_, t1) = slab_interval(DVec3::new(5.0, 0.5, 0.5), DVec3::X, DVec3::ZERO, DVec3::ONE).unwrap();
  assert!(t1 < 0.0);
}

// =========================================================================
// Iso crossing
// =========================================================================

#[test]
fn test_iso_crossing_blends_linearly() {
  // 0.25 below at entry, 0.25 above at exit: midway.
  let t = iso_crossing(1.0, 0.25, 2.0, 0.75).unwrap();
  assert!((t - 1.5).abs() < 1e-12);

  // Crossing close to the exit.
  let t = iso_crossing(0.0, 0.1, 1.0, 0.6).unwrap();
  assert!((t - 0.8).abs() < 1e-12);
}

#[test]
fn test_iso_crossing_same_side_misses() {
  assert_eq!(iso_crossing(0.0, 0.1, 1.0, 0.4), None);
  assert_eq!(iso_crossing(0.0, 0.9, 1.0, 0.6), None);
}

#[test]
fn test_iso_crossing_exactly_on_surface() {
  assert_eq!(iso_crossing(3.0, 0.5, 4.0, 0.5), Some(3.0));
}
