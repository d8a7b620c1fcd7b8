use {
  super::{BoundingBox, P2, V2, AABB},
  crate::sdf::{self, SDF}
};

/// A packed disk.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
  pub center: P2,
  pub radius: f64,
  /// Index of the nearest neighbour in the packer output at insertion time.
  pub closest: Option<usize>
}

impl Circle {
  pub fn new(center: P2, radius: f64) -> Self {
    Self { center, radius, closest: None }
  }

  /// Distance from `point` to the circumference, negative inside.
  pub fn signed_distance(&self, point: P2) -> f64 {
    (point - self.center).length() - self.radius
  }

  pub fn overlaps(&self, other: &Circle) -> bool {
    (self.center - other.center).length() < self.radius + other.radius
  }
}

impl BoundingBox for Circle {
  fn bounding_box(&self) -> AABB {
    AABB::new(
      self.center - V2::splat(self.radius),
      self.center + V2::splat(self.radius)
    )}}

impl SDF<f64> for Circle {
  fn sdf(&self, pixel: P2) -> f64 {
    self.signed_distance(pixel)
  }
}

/// Axis-aligned rectangle, given by its center and half extents.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
  pub center: P2,
  pub half: V2
}

impl BoundingBox for Rect {
  fn bounding_box(&self) -> AABB {
    AABB::new(self.center - self.half, self.center + self.half)
  }
}

impl SDF<f64> for Rect {
  fn sdf(&self, pixel: P2) -> f64 {
    sdf::sd_box(pixel, self.center, self.half)
  }
}

#[cfg(test)] mod tests {
  use super::*;

  #[test] fn circle() {
    let a = Circle::new(P2::new(0.0, 0.0), 10.0);
    let b = Circle::new(P2::new(25.0, 0.0), 10.0);
    assert!(!a.overlaps(&b));
    assert!(a.overlaps(&Circle { radius: 16.0, ..b }));
    assert_eq!(a.signed_distance(P2::new(0.0, 4.0)), -6.0);
    assert_eq!(b.bounding_box(), AABB::new(P2::new(15.0, -10.0), P2::new(35.0, 10.0)));
  }

  #[test] fn rect() {
    let r = Rect { center: P2::new(10.0, 10.0), half: V2::new(5.0, 2.0) };
    assert_eq!(r.sdf(P2::new(10.0, 10.0)), -2.0);
    assert_eq!(r.sdf(P2::new(18.0, 10.0)), 3.0);
    assert_eq!(r.bounding_box(), AABB::new(P2::new(5.0, 8.0), P2::new(15.0, 12.0)));
  }
}
