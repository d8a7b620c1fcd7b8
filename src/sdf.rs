//! Signed distance functions.
//!
//! Sign convention used throughout the crate: negative inside a shape, positive outside.
//! The circle packer fills the region where the distance is positive, so packing *around* a
//! shape needs no adjustment, and packing *inside* it is done with
//! [`PackingParams::invert`](crate::packer::PackingParams::with_invert) or [`Invert`].

use {
  crate::geometry::{self, P2, V2, AABB},
  num_traits::Float
};

/// Signed distance function
pub trait SDF<T> {
  fn sdf(&self, pixel: P2<T>) -> T;

  fn translate(self, offset: V2<T>) -> Translation<Self, T> where Self: Sized {
    Translation { shape: self, offset }
  }
  /// Union of two SDFs.
  fn union<U>(self, other: U) -> Union<Self, U> where Self: Sized {
    Union { s1: self, s2: other }
  }
  /// Subtracion of two SDFs. Note that this operation is *not* commutative,
  /// i.e. `Subtraction {a, b} =/= Subtraction {b, a}`.
  fn subtraction<U>(self, other: U) -> Subtraction<Self, U> where Self: Sized {
    Subtraction { s1: self, s2: other }
  }
  /// Intersection of two SDFs.
  fn intersection<U>(self, other: U) -> Intersection<Self, U> where Self: Sized {
    Intersection { s1: self, s2: other }
  }
  /// Takes the minimum of two SDFs, smoothing between them when they are close.
  ///
  /// `k` controls the radius/distance of the smoothing, in canvas units.
  fn smooth_min<U>(self, other: U, k: T) -> SmoothMin<T, Self, U> where Self: Sized {
    SmoothMin { s1: self, s2: other, k }
  }
  /// Swap inside and outside.
  fn invert(self) -> Invert<Self> where Self: Sized {
    Invert { shape: self }
  }
}

impl<T, F> SDF<T> for F where F: Fn(P2<T>) -> T {
  fn sdf(&self, pixel: P2<T>) -> T {
    self(pixel)
  }
}

/// Distance to a disk of `radius` around `center`.
pub fn sd_circle<T: Float>(pixel: P2<T>, center: P2<T>, radius: T) -> T {
  (pixel - center).length() - radius
}

/// Distance to an axis-aligned box.
pub fn sd_box<T: Float + num_traits::Signed>(pixel: P2<T>, center: P2<T>, half: V2<T>) -> T {
  let dist = (pixel - center).abs() - half;
  let outside_dist = dist
    .max(V2::splat(T::zero()))
    .length();
  let inside_dist = dist.x
    .max(dist.y)
    .min(T::zero());
  outside_dist + inside_dist
}

/// Distance to the edges of canvas, positive inside.
pub fn boundary_rect(canvas: AABB) -> impl Fn(P2) -> f64 {
  move |pixel| -geometry::Rect {
    center: canvas.center(),
    half: canvas.size().to_vector() / 2.0
  }.sdf(pixel)
}

#[derive(Clone, Copy, Debug)]
pub struct Translation<S, T> {
  pub shape: S,
  pub offset: V2<T>
}

impl<T, S> SDF<T> for Translation<S, T>
  where T: Float,
        S: SDF<T> {
  fn sdf(&self, pixel: P2<T>) -> T {
    self.shape.sdf(pixel - self.offset)
  }}

#[derive(Clone, Copy, Debug)]
pub struct Invert<S> {
  pub shape: S
}

impl<T, S> SDF<T> for Invert<S>
  where T: Float,
        S: SDF<T> {
  fn sdf(&self, pixel: P2<T>) -> T {
    -self.shape.sdf(pixel)
  }}

/// Union of two SDFs.
#[derive(Clone, Copy, Debug)]
pub struct Union<S1, S2> {
  pub s1: S1,
  pub s2: S2,
}

impl<T, S1, S2> SDF<T> for Union<S1, S2>
  where T: Float,
        S1: SDF<T>,
        S2: SDF<T> {
  fn sdf(&self, pixel: P2<T>) -> T {
    self.s1.sdf(pixel).min(self.s2.sdf(pixel))
  }}

/// Subtracion of two SDFs. Note that this operation is *not* commutative,
/// i.e. `Subtraction {a, b} =/= Subtraction {b, a}`.
#[derive(Clone, Copy, Debug)]
pub struct Subtraction<S1, S2> {
  pub s1: S1,
  pub s2: S2,
}

impl<T, S1, S2> SDF<T> for Subtraction<S1, S2>
  where T: Float,
    S1: SDF<T>,
    S2: SDF<T> {
  fn sdf(&self, pixel: P2<T>) -> T {
    (-self.s2.sdf(pixel)).max(self.s1.sdf(pixel))
  }}

/// Intersection of two SDFs.
#[derive(Clone, Copy, Debug)]
pub struct Intersection<S1, S2> {
  pub s1: S1,
  pub s2: S2,
}

impl<T, S1, S2> SDF<T> for Intersection<S1, S2>
  where T: Float,
        S1: SDF<T>,
        S2: SDF<T> {
  fn sdf(&self, pixel: P2<T>) -> T {
    self.s1.sdf(pixel).max(self.s2.sdf(pixel))
  }}

/// Takes the minimum of two SDFs, smoothing between them when they are close.
#[derive(Clone, Copy, Debug)]
pub struct SmoothMin<T, S1, S2> {
  pub s1: S1,
  pub s2: S2,
  pub k: T
}

impl<T, S1, S2> SDF<T> for SmoothMin<T, S1, S2>
  where T: Float,
        S1: SDF<T>,
        S2: SDF<T> {
  fn sdf(&self, pixel: P2<T>) -> T {
    let (s1, s2) = (self.s1.sdf(pixel), self.s2.sdf(pixel));
    let half = T::one() / (T::one() + T::one());
    // polynomial smooth min
    let h = (half + half * (s2 - s1) / self.k)
      .max(T::zero())
      .min(T::one());
    s2 + (s1 - s2) * h - self.k * h * (T::one() - h)
  }}
