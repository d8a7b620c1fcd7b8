use {
  super::*,
  crate::{
    drawing::{DrawCommand, Recorder},
    error::ErrorKind,
    geometry::{BoundingBox, P2},
    quadtree::fits,
    sdf::sd_circle
  },
  itertools::Itertools
};

fn centered_canvas(half: f64) -> AABB {
  AABB::new(P2::splat(-half), P2::splat(half))
}

/// Disk of radius 50 at the origin, packed around on an 800x800 canvas.
fn disk_params() -> PackingParams {
  let _ = env_logger::builder().is_test(true).try_init();
  PackingParams::default()
    .with_canvas(centered_canvas(400.0))
    .with_sdf(|p| sd_circle(p, P2::origin(), 50.0))
    .with_radius(2.0, 20.0)
    .with_max_iterations(10_000)
    .with_max_circles(500)
    .with_sdf_margin(|_| 0.0)
    .with_sdf_threshold(1000.0)
}

fn assert_disjoint(circles: &[Circle], gap: f64) {
  circles.iter().tuple_combinations().for_each(|(a, b)| {
    let d = (a.center - b.center).length();
    assert!(d >= a.radius + b.radius + gap - 1e-9, "{a:?} overlaps {b:?}");
  });
}

#[test] fn disk_scenario() -> Result<()> {
  let packer = CirclePacker::new(disk_params())?;
  for seed in 0..4 {
    let circles = packer.pack_seeded(seed);
    assert!((50..=500).contains(&circles.len()), "{} circles", circles.len());
    for c in &circles {
      let from_origin = c.center.to_vector().length();
      assert!(from_origin > 50.0);
      assert!(from_origin - c.radius >= 50.0 - 1e-9, "{c:?} enters the disk");
    }
  }
  Ok(())
}

#[test] fn radius_bounds_are_exact() -> Result<()> {
  let circles = CirclePacker::new(disk_params())?.pack_seeded(11);
  assert!(circles.iter().all(|c| c.radius >= 2.0 && c.radius <= 20.0));
  Ok(())
}

#[test] fn circles_do_not_overlap() -> Result<()> {
  let circles = CirclePacker::new(disk_params())?.pack_seeded(3);
  assert_disjoint(&circles, 0.0);
  Ok(())
}

#[test] fn constant_margin_keeps_gaps() -> Result<()> {
  let packer = CirclePacker::new(disk_params().with_sdf_margin(|_| 3.0))?;
  for seed in 0..40 {
    let circles = packer.pack_seeded(seed);
    assert!(!circles.is_empty());
    assert_disjoint(&circles, 3.0);
  }
  Ok(())
}

#[test] fn ripple_margin_packs() -> Result<()> {
  let params = PackingParams {
    sdf_margin: margin::ripple(1.0, 1.0, 60.0),
    ..disk_params()
  };
  let circles = CirclePacker::new(params)?.pack_seeded(9);
  assert!(!circles.is_empty());
  // the margin never drops below zero, so the packing stays disjoint
  assert_disjoint(&circles, 0.0);
  Ok(())
}

#[test] fn deterministic_under_seed() -> Result<()> {
  let packer = CirclePacker::new(disk_params())?;
  let a = packer.pack_seeded(42);
  let b = packer.pack_seeded(42);
  assert_eq!(a, b);
  let c = packer.pack_seeded(43);
  assert_ne!(a, c);
  Ok(())
}

#[test] fn iterator_is_lazy() -> Result<()> {
  let packer = CirclePacker::new(disk_params())?;
  let mut rng = rand_pcg::Pcg64::seed_from_u64(1);
  let first: Vec<_> = packer.iter(&mut rng).take(5).collect();
  assert_eq!(first.len(), 5);
  // the lazy prefix equals the eager result
  let all = packer.pack_seeded(1);
  assert_eq!(&all[..5], &first[..]);
  Ok(())
}

#[test] fn stop_conditions() -> Result<()> {
  let packer = CirclePacker::new(disk_params().with_max_circles(7))?;
  let (circles, stats) = packer.pack_with_stats(&mut rand_pcg::Pcg64::seed_from_u64(0));
  assert_eq!(circles.len(), 7);
  assert_eq!(stats.accepted, 7);
  assert!(stats.iterations < 10_000);

  let packer = CirclePacker::new(disk_params().with_max_iterations(50))?;
  let (circles, stats) = packer.pack_with_stats(&mut rand_pcg::Pcg64::seed_from_u64(0));
  assert_eq!(stats.iterations, 50);
  assert_eq!(stats.accepted, circles.len());
  assert_eq!(stats.iterations, stats.accepted + stats.rejected_sdf + stats.rejected_radius);
  Ok(())
}

#[test] fn no_room_is_not_an_error() -> Result<()> {
  // every point lies inside the shape, nothing can be placed
  let packer = CirclePacker::new(disk_params()
    .with_sdf(|p| sd_circle(p, P2::origin(), 5000.0))
    .with_max_iterations(500))?;
  let (circles, stats) = packer.pack_with_stats(&mut rand_pcg::Pcg64::seed_from_u64(0));
  assert!(circles.is_empty());
  assert_eq!(stats.rejected_sdf, 500);
  Ok(())
}

#[test] fn invert_packs_inside() -> Result<()> {
  let packer = CirclePacker::new(disk_params()
    .with_canvas(centered_canvas(60.0))
    .with_invert(true)
    .with_max_iterations(5_000))?;
  let circles = packer.pack_seeded(0);
  assert!(circles.len() > 10, "{} circles", circles.len());
  assert!(circles.iter().all(|c| c.center.to_vector().length() + c.radius <= 50.0 + 1e-9));
  Ok(())
}

#[test] fn default_sdf_is_canvas() -> Result<()> {
  let canvas = AABB::new(P2::new(0.0, 0.0), P2::new(300.0, 200.0));
  let packer = CirclePacker::new(PackingParams::default()
    .with_canvas(canvas)
    .with_radius(3.0, 30.0)
    .with_max_iterations(5_000))?;
  let circles = packer.pack_seeded(0);
  assert!(!circles.is_empty());
  assert!(circles.iter().all(|c| fits(&c.bounding_box(), &canvas.inflate(1e-9, 1e-9))));
  Ok(())
}

#[test] fn obstacles() -> Result<()> {
  let hole = Circle::new(P2::new(0.0, 0.0), 100.0);
  let frame = Circle::new(P2::new(0.0, 0.0), 300.0);
  let packer = CirclePacker::new(disk_params()
    .with_obstacle(Obstacle::new(hole))
    .with_obstacle(Obstacle::container(frame)))?;
  let circles = packer.pack_seeded(2);
  assert!(!circles.is_empty());
  for c in &circles {
    let r = c.center.to_vector().length();
    assert!(r - c.radius >= 100.0 - 1e-9, "{c:?} overlaps the hole");
    assert!(r + c.radius <= 300.0 + 1e-9, "{c:?} leaves the frame");
  }
  Ok(())
}

#[test] fn closest_points_backwards() -> Result<()> {
  let circles = CirclePacker::new(disk_params())?.pack_seeded(8);
  assert!(circles.iter().any(|c| c.closest.is_some()));
  circles.iter().enumerate()
    .filter_map(|(i, c)| c.closest.map(|j| (i, j)))
    .for_each(|(i, j)| assert!(j < i));
  Ok(())
}

#[test] fn page_margin_shrinks_sampling() -> Result<()> {
  let params = disk_params().with_page_margin(250.0);
  assert_eq!(params.sampling_region(), centered_canvas(150.0));
  let circles = CirclePacker::new(params)?.pack_seeded(4);
  assert!(circles.iter().all(|c| c.center.x.abs() < 150.0 && c.center.y.abs() < 150.0));
  Ok(())
}

#[test] fn invalid_configuration() {
  let kind = |params: PackingParams| CirclePacker::new(params)
    .unwrap_err()
    .downcast::<ErrorKind>()
    .map(|k| matches!(k, ErrorKind::InvalidConfig(_)))
    .unwrap_or(false);
  assert!(kind(disk_params().with_radius(10.0, 5.0)));
  assert!(kind(disk_params().with_radius(-1.0, 5.0)));
  assert!(kind(disk_params().with_radius(1.0, f64::NAN)));
  assert!(kind(disk_params().with_page_margin(400.0)));
  assert!(kind(disk_params().with_obstacle(Obstacle::new(Circle::new(P2::origin(), -3.0)))));
  assert!(CirclePacker::new(disk_params()).is_ok());
}

#[test] fn draw_with_connectors() -> Result<()> {
  let circles = CirclePacker::new(disk_params().with_max_circles(40))?.pack_seeded(6);
  let connected = circles.iter().filter(|c| c.closest.is_some()).count();

  let mut rec = Recorder::new();
  draw_circles(&mut rec, &circles, true);
  assert_eq!(rec.circles().count(), circles.len());
  assert_eq!(rec.lines().count(), connected);
  // connectors run between the circumferences
  for (a, b) in rec.lines() {
    assert!(circles.iter().any(|c| (c.signed_distance(a)).abs() < 1e-6));
    assert!(circles.iter().any(|c| (c.signed_distance(b)).abs() < 1e-6));
  }

  let mut rec = Recorder::new();
  draw_circles(&mut rec, &circles, false);
  assert!(rec.commands.iter().all(|c| matches!(c, DrawCommand::Circle { .. })));
  Ok(())
}
