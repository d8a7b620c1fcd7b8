//! Constrained circle packing by rejection sampling.
//!
//! Every iteration samples a point, measures how large a circle centered there could grow
//! before it hits the SDF boundary, a fixed obstacle, or an already placed circle, and keeps it
//! only if that radius lands inside `[min_radius, max_radius]`. Out of range candidates are
//! discarded, not clamped, which is what keeps the size distribution from piling up at the
//! bounds.
//!
//! The packer is greedy and order dependent. With the same seed and parameters the output is
//! identical; two seeds give different but statistically similar packings. Running out of
//! room simply ends the run early.
//!
//! ```
//! # use lumic::{packer::{CirclePacker, PackingParams}, geometry::{P2, AABB}, sdf};
//! # fn main() -> lumic::error::Result<()> {
//! let packer = CirclePacker::new(PackingParams::default()
//!   .with_canvas(AABB::new(P2::new(-400.0, -400.0), P2::new(400.0, 400.0)))
//!   .with_sdf(|p| sdf::sd_circle(p, P2::origin(), 50.0))
//!   .with_radius(2.0, 20.0)
//!   .with_max_iterations(10_000)
//!   .with_max_circles(500))?;
//! let circles = packer.pack_seeded(0);
//! assert!(circles.iter().all(|c| c.center.to_vector().length() - c.radius >= 50.0 - 1e-9));
//! # Ok(())
//! # }
//! ```

use {
  crate::{
    drawing::Backend,
    error::Result,
    geometry::{box_around, direction, BoundingBox, Circle, P2, AABB},
    quadtree::QuadTree,
    sdf
  },
  rand::prelude::*,
  std::sync::Arc
};

pub mod margin;
mod params;
pub use params::{PackingParams, Obstacle, DistanceFn, MarginFn};

#[cfg(test)] mod tests;

/// Outcome counters of a packing run.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct PackStats {
  pub iterations: usize,
  pub accepted: usize,
  /// sample too close to, or too far from, the SDF boundary
  pub rejected_sdf: usize,
  /// largest fitting radius outside `[min_radius, max_radius]`
  pub rejected_radius: usize
}

#[derive(Debug, Clone)]
pub struct CirclePacker {
  params: PackingParams
}

impl CirclePacker {
  pub fn new(params: PackingParams) -> Result<Self> {
    params.validate()?;
    Ok(CirclePacker { params })
  }

  pub fn params(&self) -> &PackingParams {
    &self.params
  }

  /// Lazily place circles. The iterator ends once `max_circles` circles were yielded or
  /// `max_iterations` samples were drawn.
  pub fn iter<R: Rng>(&self, rng: R) -> PackIter<'_, R> {
    let params = &self.params;
    let sdf = params.sdf.clone()
      .unwrap_or_else(|| Arc::new(sdf::boundary_rect(params.canvas)));
    PackIter {
      params,
      sdf,
      region: params.sampling_region(),
      rng,
      tree: QuadTree::new(params.tree_levels, params.canvas, false),
      circles: vec![],
      stats: PackStats::default(),
      finished: false
    }
  }

  pub fn pack<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Circle> {
    self.pack_with_stats(rng).0
  }

  pub fn pack_with_stats<R: Rng + ?Sized>(&self, rng: &mut R) -> (Vec<Circle>, PackStats) {
    let mut iter = self.iter(rng);
    iter.by_ref().for_each(drop);
    let stats = iter.stats();
    (iter.circles, stats)
  }

  /// Pack with a `Pcg64` generator seeded from `seed`.
  pub fn pack_seeded(&self, seed: u64) -> Vec<Circle> {
    self.pack(&mut rand_pcg::Pcg64::seed_from_u64(seed))
  }
}

pub struct PackIter<'a, R> {
  params: &'a PackingParams,
  sdf: DistanceFn,
  region: AABB,
  rng: R,
  tree: QuadTree<usize>,
  circles: Vec<Circle>,
  stats: PackStats,
  finished: bool
}

impl<'a, R: Rng> PackIter<'a, R> {
  pub fn stats(&self) -> PackStats {
    self.stats
  }

  /// Circles placed so far, in placement order.
  pub fn circles(&self) -> &[Circle] {
    &self.circles
  }

  /// Largest admissible circle at `p`, if its radius is within bounds.
  fn fit(&mut self, p: P2) -> Option<Circle> {
    let params = self.params;
    let sdf = (self.sdf)(p);
    let mut max_d = if params.invert { -sdf } else { sdf };
    let margin = (params.sdf_margin)(max_d);

    if !(max_d > margin && max_d < params.sdf_threshold) {
      self.stats.rejected_sdf += 1;
      return None;
    }

    for obstacle in &params.start_circles {
      max_d = max_d.min(obstacle.signed_distance(p) - margin);
      if max_d < 0.0 { break; }
    }

    let mut closest = None;
    if max_d >= 0.0 {
      let mut closest_d = f64::INFINITY;
      // a neighbour closer than `max_d + margin` still has to shrink the radius
      let reach = max_d + margin.max(0.0);
      for &i in self.tree.get_overlapping_objects(&box_around(p, reach)) {
        let d = self.circles[i].signed_distance(p);
        if d < closest_d {
          closest_d = d;
          closest = Some(i);
        }
        max_d = max_d.min(d - margin);
        if max_d < 0.0 { break; }
      }
    }

    if max_d >= params.min_radius && max_d <= params.max_radius {
      Some(Circle { center: p, radius: max_d, closest })
    } else {
      self.stats.rejected_radius += 1;
      None
    }
  }
}

impl<'a, R: Rng> Iterator for PackIter<'a, R> {
  type Item = Circle;

  fn next(&mut self) -> Option<Circle> {
    let params = self.params;
    while self.circles.len() < params.max_circles && self.stats.iterations < params.max_iterations {
      self.stats.iterations += 1;
      let p = P2::new(
        self.rng.gen_range(self.region.min.x..self.region.max.x),
        self.rng.gen_range(self.region.min.y..self.region.max.y)
      );
      if let Some(circle) = self.fit(p) {
        let index = self.circles.len();
        self.tree.insert(index, circle.bounding_box());
        self.circles.push(circle);
        self.stats.accepted += 1;
        log::trace!("#{} placed r = {:.3} at {:?} (iteration {})",
          index, circle.radius, circle.center, self.stats.iterations);
        return Some(circle);
      }
    }
    if !self.finished {
      self.finished = true;
      log::debug!("packing finished: {:?}, index {:?}", self.stats, self.tree);
    }
    None
  }
}

/// Stroke every circle, and optionally a connector from each circle to the neighbour that
/// was nearest when it was placed.
pub fn draw_circles(backend: &mut dyn Backend, circles: &[Circle], connectors: bool) {
  circles.iter()
    .for_each(|c| backend.circle(c.center, c.radius * 2.0));
  if !connectors {
    return;
  }
  for c in circles {
    let other = match c.closest.and_then(|i| circles.get(i)) {
      Some(other) => other,
      None => continue
    };
    let dir = direction(c.center, other.center);
    backend.line(c.center + dir * c.radius, other.center - dir * other.radius);
  }
}
