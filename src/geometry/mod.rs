//! Coordinate space, polar conversion and the shapes shared by the packer and the ring engine.
//!
//! Everything lives in a single canvas coordinate basis. The origin is wherever the sketch
//! puts it; mandalas are drawn around the origin, and are usually moved into place with
//! [`Backend::translate`](crate::drawing::Backend::translate).

use {
  euclid::{Point2D, Vector2D, Box2D},
  num_traits::Float
};

pub mod shapes;
pub use shapes::*;

/// Canvas coordinate basis
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CanvasSpace;

pub type P2<T = f64> = Point2D<T, CanvasSpace>;
pub type V2<T = f64> = Vector2D<T, CanvasSpace>;
pub type AABB<T = f64> = Box2D<T, CanvasSpace>;

pub trait BoundingBox<T = f64> {
  fn bounding_box(&self) -> AABB<T>;
}

impl<T: Copy> BoundingBox<T> for AABB<T> {
  fn bounding_box(&self) -> AABB<T> { *self }
}

/// Polar to cartesian, angle in radians, measured from the positive x axis.
pub fn polar2cart<T: Float>(radius: T, angle: T) -> P2<T> {
  let (sin, cos) = angle.sin_cos();
  P2::new(radius * cos, radius * sin)
}

/// Cartesian to polar, returns `(radius, angle)`.
/// A non-finite point maps to the origin at angle zero.
pub fn cart2polar<T: Float>(point: P2<T>) -> (T, T) {
  if !point.x.is_finite() || !point.y.is_finite() {
    return (T::zero(), T::zero());
  }
  (point.to_vector().length(), point.y.atan2(point.x))
}

/// Unit direction from `from` to `to`.
/// Coincident or non-finite points fall back to the positive x axis.
pub fn direction<T: Float>(from: P2<T>, to: P2<T>) -> V2<T> {
  let v = to - from;
  let len = v.length();
  if len.is_finite() && len > T::epsilon() {
    v / len
  } else {
    V2::new(T::one(), T::zero())
  }
}

/// Square box of half-width `half` around `center`.
pub fn box_around<T: Float>(center: P2<T>, half: T) -> AABB<T> {
  let half = V2::splat(half);
  AABB::new(center - half, center + half)
}

#[cfg(test)] mod tests {
  use {
    super::*,
    std::f64::consts::{PI, FRAC_PI_2}
  };

  #[test] fn polar_roundtrip_quadrants() {
    for angle in [0.0, FRAC_PI_2, PI - 0.1, -FRAC_PI_2 + 0.2] {
      let p = polar2cart(10.0, angle);
      let (r, a) = cart2polar(p);
      assert!((r - 10.0).abs() < 1e-9);
      assert!((a - angle).abs() < 1e-9, "{a} != {angle}");
    }
  }

  #[test] fn polar_axes() {
    let p = polar2cart(2.0, FRAC_PI_2);
    assert!(p.x.abs() < 1e-12);
    assert!((p.y - 2.0).abs() < 1e-12);
  }

  #[test] fn degenerate_direction() {
    let d = direction(P2::new(1.0, 1.0), P2::new(1.0, 1.0));
    assert_eq!(d, V2::new(1.0, 0.0));
    let d = direction(P2::new(0.0, 0.0), P2::new(f64::NAN, 1.0));
    assert_eq!(d, V2::new(1.0, 0.0));
    assert_eq!(cart2polar(P2::new(f64::INFINITY, 0.0)), (0.0, 0.0));
  }
}
