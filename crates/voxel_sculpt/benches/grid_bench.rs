//! Sparse grid benchmarks: point access, bounds, region reads and
//! persistence on an analytic sphere.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::UVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voxel_sculpt::grid::io;
use voxel_sculpt::{shapes, SparseVoxelGrid, VoxelBox};

/// Random points inside a grid of the given width.
fn random_points(count: usize, width: u32, seed: u64) -> Vec<UVec3> {
  let mut rng = StdRng::seed_from_u64(seed);
  (0..count)
    .map(|_| {
      UVec3::new(
        rng.random_range(0..width),
        rng.random_range(0..width),
        rng.random_range(0..width),
      )
    })
    .collect()
}

fn bench_point_access(c: &mut Criterion) {
  let mut group = c.benchmark_group("point_access");

  for depth in [6u32, 8] {
    let width = 1 << depth;
    let grid = shapes::sphere_grid(depth, width as f64 * 0.3, 1.0).unwrap();
    let points = random_points(4096, width, 1);

    group.bench_with_input(BenchmarkId::new("get", depth), &depth, |b, _| {
      b.iter(|| {
        let mut sum = 0i64;
        for p in &points {
          sum += grid.get(p.x, p.y, p.z) as i64;
        }
        black_box(sum)
      })
    });

    group.bench_with_input(BenchmarkId::new("set", depth), &depth, |b, _| {
      b.iter(|| {
        let mut grid = grid.duplicate();
        for (i, p) in points.iter().enumerate() {
          grid.set(p.x, p.y, p.z, (i % 200) as i8 - 100);
        }
        black_box(grid.branch_count())
      })
    });
  }

  group.finish();
}

fn bench_whole_grid(c: &mut Criterion) {
  let grid = shapes::sphere_grid(7, 40.0, 1.0).unwrap();
  let mut group = c.benchmark_group("sphere_128");

  group.bench_function("find_data_bounds", |b| b.iter(|| black_box(grid.find_data_bounds())));

  let region = VoxelBox::new(UVec3::splat(32), UVec3::splat(95));
  group.bench_function("read_region_64", |b| b.iter(|| black_box(grid.read_region(&region))));

  group.bench_function("grow_shrink", |b| {
    b.iter(|| {
      let mut copy = grid.duplicate();
      copy.grow_grid().unwrap();
      copy.shrink_grid();
      black_box(copy)
    })
  });

  let bytes = io::to_bytes(&grid).unwrap();
  group.bench_function("write", |b| b.iter(|| black_box(io::to_bytes(&grid).unwrap())));
  group.bench_function("read", |b| b.iter(|| black_box(io::from_bytes(&bytes).unwrap())));

  group.finish();
}

fn bench_empty_grid(c: &mut Criterion) {
  c.bench_function("new_and_fill_column (depth 12)", |b| {
    b.iter(|| {
      let mut grid = SparseVoxelGrid::new(12).unwrap();
      for z in 0..grid.width() {
        grid.set(100, 200, z, 0);
      }
      black_box(grid)
    })
  });
}

criterion_group!(benches, bench_point_access, bench_whole_grid, bench_empty_grid);
criterion_main!(benches);
