use {
  super::margin,
  crate::{
    error::{invalid_config, Result},
    geometry::{Circle, P2, AABB}
  },
  std::{
    fmt::{Debug, Formatter},
    sync::Arc
  }
};

pub type DistanceFn = Arc<dyn Fn(P2) -> f64 + Send + Sync>;
pub type MarginFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// A fixed circle the packing has to flow around.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Obstacle {
  pub circle: Circle,
  /// Treat the circle as a container: its inside is free space, its outside is blocked.
  pub inverted: bool
}

impl Obstacle {
  pub fn new(circle: Circle) -> Self {
    Obstacle { circle, inverted: false }
  }

  pub fn container(circle: Circle) -> Self {
    Obstacle { circle, inverted: true }
  }

  /// Distance from `p` to the blocked region, negative inside it.
  pub fn signed_distance(&self, p: P2) -> f64 {
    let d = self.circle.signed_distance(p);
    if self.inverted { -d } else { d }
  }
}

/// Configuration of a single packing run.
///
/// Built from `Default` with the `with_*` methods:
/// ```
/// # use lumic::{packer::PackingParams, geometry::{P2, AABB}, sdf};
/// let params = PackingParams::default()
///   .with_canvas(AABB::new(P2::new(-400.0, -400.0), P2::new(400.0, 400.0)))
///   .with_radius(2.0, 20.0)
///   .with_sdf(|p| sdf::sd_circle(p, P2::origin(), 50.0));
/// assert!(params.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct PackingParams {
  /// Sampling region, also the bounds of the spatial index.
  pub canvas: AABB,
  pub start_circles: Vec<Obstacle>,
  pub min_radius: f64,
  pub max_radius: f64,
  pub max_circles: usize,
  pub max_iterations: usize,
  /// Free space is where the distance is positive. `None` packs inside the canvas.
  pub sdf: Option<DistanceFn>,
  /// Samples farther than this from the SDF boundary are rejected.
  pub sdf_threshold: f64,
  /// Safety margin as a function of the sample's SDF distance.
  pub sdf_margin: MarginFn,
  /// Shrinks the sampling region on every side.
  pub page_margin: f64,
  /// Negate the SDF, packing inside the shape instead of around it.
  pub invert: bool,
  /// Depth limit of the spatial index.
  pub tree_levels: u8
}

impl Default for PackingParams {
  fn default() -> Self {
    PackingParams {
      canvas: AABB::new(P2::new(0.0, 0.0), P2::new(800.0, 800.0)),
      start_circles: vec![],
      min_radius: 2.0,
      max_radius: 50.0,
      max_circles: 1000,
      max_iterations: 100_000,
      sdf: None,
      sdf_threshold: f64::INFINITY,
      sdf_margin: margin::none(),
      page_margin: 0.0,
      invert: false,
      tree_levels: 8
    }}}

impl PackingParams {
  pub fn with_canvas(mut self, canvas: AABB) -> Self {
    self.canvas = canvas;
    self
  }
  pub fn with_start_circles(mut self, start_circles: Vec<Obstacle>) -> Self {
    self.start_circles = start_circles;
    self
  }
  pub fn with_obstacle(mut self, obstacle: Obstacle) -> Self {
    self.start_circles.push(obstacle);
    self
  }
  /// Accepted radii, both bounds inclusive.
  pub fn with_radius(mut self, min_radius: f64, max_radius: f64) -> Self {
    self.min_radius = min_radius;
    self.max_radius = max_radius;
    self
  }
  pub fn with_max_circles(mut self, max_circles: usize) -> Self {
    self.max_circles = max_circles;
    self
  }
  pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
    self.max_iterations = max_iterations;
    self
  }
  pub fn with_sdf(mut self, sdf: impl Fn(P2) -> f64 + Send + Sync + 'static) -> Self {
    self.sdf = Some(Arc::new(sdf));
    self
  }
  pub fn with_sdf_threshold(mut self, sdf_threshold: f64) -> Self {
    self.sdf_threshold = sdf_threshold;
    self
  }
  pub fn with_sdf_margin(mut self, sdf_margin: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
    self.sdf_margin = Arc::new(sdf_margin);
    self
  }
  pub fn with_page_margin(mut self, page_margin: f64) -> Self {
    self.page_margin = page_margin;
    self
  }
  pub fn with_invert(mut self, invert: bool) -> Self {
    self.invert = invert;
    self
  }
  pub fn with_tree_levels(mut self, tree_levels: u8) -> Self {
    self.tree_levels = tree_levels;
    self
  }

  /// The canvas shrunk by `page_margin`.
  pub fn sampling_region(&self) -> AABB {
    self.canvas.inflate(-self.page_margin, -self.page_margin)
  }

  /// Reject configurations that can not produce anything meaningful.
  /// Any configuration that passes packs without errors, possibly placing nothing.
  pub fn validate(&self) -> Result<()> {
    let finite = |v: f64| v.is_finite();
    if !finite(self.min_radius) || !finite(self.max_radius) {
      return invalid_config("radius bounds must be finite");
    }
    if self.min_radius < 0.0 || self.max_radius < 0.0 {
      return invalid_config(format!(
        "negative radius bound: [{}, {}]", self.min_radius, self.max_radius));
    }
    if self.min_radius > self.max_radius {
      return invalid_config(format!(
        "min_radius {} exceeds max_radius {}", self.min_radius, self.max_radius));
    }
    if !finite(self.page_margin) {
      return invalid_config("page_margin must be finite");
    }
    if self.sdf_threshold.is_nan() {
      return invalid_config("sdf_threshold is NaN");
    }
    let region = self.sampling_region();
    let region_ok = [region.min.x, region.min.y, region.max.x, region.max.y]
      .into_iter().all(finite)
      && region.min.x < region.max.x
      && region.min.y < region.max.y;
    if !region_ok {
      return invalid_config(format!("empty sampling region: {:?}", region));
    }
    if let Some(obstacle) = self.start_circles.iter()
      .find(|o| !(o.circle.radius >= 0.0) || !finite(o.circle.center.x) || !finite(o.circle.center.y)) {
      return invalid_config(format!("malformed start circle: {:?}", obstacle));
    }
    Ok(())
  }
}

impl Debug for PackingParams {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PackingParams")
      .field("canvas", &self.canvas)
      .field("start_circles", &self.start_circles.len())
      .field("radius", &(self.min_radius..=self.max_radius))
      .field("max_circles", &self.max_circles)
      .field("max_iterations", &self.max_iterations)
      .field("sdf", &if self.sdf.is_some() { "Some(...)" } else { "canvas boundary" })
      .field("sdf_threshold", &self.sdf_threshold)
      .field("page_margin", &self.page_margin)
      .field("invert", &self.invert)
      .field("tree_levels", &self.tree_levels)
      .finish()
  }
}
