//! Safety margins, as functions of the sample's distance to the SDF boundary.

use {
  super::MarginFn,
  std::{f64::consts::TAU, sync::Arc}
};

/// Circles may touch.
pub fn none() -> MarginFn {
  Arc::new(|_| 0.0)
}

/// Keep a fixed gap between circles.
pub fn constant(margin: f64) -> MarginFn {
  Arc::new(move |_| margin)
}

/// Gap that undulates with the distance from the boundary, giving rippled bands of density.
pub fn ripple(base: f64, amplitude: f64, wavelength: f64) -> MarginFn {
  Arc::new(move |d| base + amplitude * (d * TAU / wavelength).sin())
}
