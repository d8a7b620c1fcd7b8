//! Radial ring-segment engine, the building block of mandalas.
//!
//! A ring is the annulus between two radii, cut into `count` equal slices. Every slice is handed
//! to a [`SegmentKind`] as a polar box `(r1, a1, r2, a2)`, which draws into it.
//! [`MandalaContext`] keeps a radius cursor, so rings can be stacked outwards:
//!
//! ```
//! # use lumic::{drawing::Recorder, mandala::{MandalaContext, RingOptions, SegmentKind}};
//! let mut rec = Recorder::new();
//! let mut ctx = MandalaContext::new();
//! ctx.add_ring(&mut rec, &SegmentKind::Diamond(Default::default()), 40.0, &RingOptions::new().with_count(12))
//!   .add_spacer(&mut rec, 5.0, false, true)
//!   .add_ring(&mut rec, &SegmentKind::Circle(Default::default()), 20.0, &RingOptions::new().with_count(24));
//! assert_eq!(ctx.current_radius(), 65.0);
//! ```

use {
  crate::{
    drawing::Backend,
    geometry::{polar2cart, P2}
  },
  std::{f64::consts::TAU, mem}
};

mod options;
mod segments;
pub use {
  options::{RingOptions, SegmentHook, DEFAULT_COUNT},
  segments::*
};


/// Polar box of a single slice. `a1 < a2` and `r1 < r2` are not guaranteed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Segment {
  pub r1: f64,
  pub a1: f64,
  pub r2: f64,
  pub a2: f64,
  /// Slice index within the ring.
  pub i: usize
}

impl Segment {
  pub fn mid_radius(&self) -> f64 {
    (self.r1 + self.r2) / 2.0
  }

  pub fn mid_angle(&self) -> f64 {
    (self.a1 + self.a2) / 2.0
  }

  pub fn point(&self, r: f64, a: f64) -> P2 {
    polar2cart(r, a)
  }

  /// `steps + 1` points along the circle of radius `r`, from angle `from` to `to`.
  pub fn arc(&self, r: f64, from: f64, to: f64, steps: usize) -> Vec<P2> {
    let steps = steps.max(1);
    (0..=steps)
      .map(|k| polar2cart(r, from + (to - from) * k as f64 / steps as f64))
      .collect()
  }

  /// Shrink toward the center by `amount`, radially and along the arc at the mid radius.
  /// Never turns the segment inside out; an oversized inset collapses it to its center.
  pub fn inset(self, amount: f64) -> Self {
    let (rm, am) = (self.mid_radius(), self.mid_angle());
    let dr = (self.r2 - self.r1).abs() / 2.0;
    let da = (self.a2 - self.a1).abs() / 2.0;
    let arc_amount = if rm.abs() > f64::EPSILON { amount / rm.abs() } else { 0.0 };
    let shrink = |v: f64, mid: f64, half: f64, by: f64| {
      let half = (half - by).max(0.0);
      if v < mid { mid - half } else if v > mid { mid + half } else { mid }
    };
    Segment {
      r1: shrink(self.r1, rm, dr, amount),
      r2: shrink(self.r2, rm, dr, amount),
      a1: shrink(self.a1, am, da, arc_amount),
      a2: shrink(self.a2, am, da, arc_amount),
      ..self
    }
  }

  /// Scale toward the segment center.
  pub fn scaled(self, factor: f64) -> Self {
    let (rm, am) = (self.mid_radius(), self.mid_angle());
    Segment {
      r1: rm + (self.r1 - rm) * factor,
      r2: rm + (self.r2 - rm) * factor,
      a1: am + (self.a1 - am) * factor,
      a2: am + (self.a2 - am) * factor,
      ..self
    }
  }

  pub fn flipped(mut self) -> Self {
    mem::swap(&mut self.r1, &mut self.r2);
    self
  }
}

/// Stroke a full, unfilled circle around the origin.
fn stroke_circle(backend: &mut dyn Backend, radius: f64) {
  backend.push();
  backend.no_fill();
  backend.circle(P2::origin(), radius.abs() * 2.0);
  backend.pop();
}

/// Draw a single ring between `r1` and `r2`.
///
/// Per slice, in order: skip selection, `angle_shift`, `angle_shift_factor`, `inset`, `flip`,
/// `scaler`, `on_before_segment`, the segment itself, `on_after_segment`. Options a kind
/// doesn't list in its [`Capabilities`] are ignored for it. A ring of zero segments draws
/// nothing.
pub fn draw_ring(backend: &mut dyn Backend, r1: f64, r2: f64, kind: &SegmentKind, options: &RingOptions) {
  let count = options.count();
  if count == 0 {
    return;
  }
  let caps = kind.capabilities();
  let width = options.angle_range.unwrap_or(TAU) / count as f64;
  let start = options.angle_start.unwrap_or(-width / 2.0);
  let in_shape = RingOptions::flag(options.shape) && caps.contains(Capabilities::SHAPE);
  log::trace!("ring {} {:.2}..{:.2}, {} segments", kind.name(), r1, r2, count);

  for i in 0..count {
    if options.is_skipped(i) {
      continue;
    }
    let a1 = start + width * i as f64;
    let mut seg = Segment { r1, a1, r2, a2: a1 + width, i };

    if let Some(shift) = options.angle_shift {
      seg.a1 += shift;
      seg.a2 += shift;
    }
    if let Some(factor) = options.angle_shift_factor {
      if i % 2 == 1 {
        seg.a1 += factor * width;
        seg.a2 += factor * width;
      }
    }
    if let Some(inset) = options.inset {
      if caps.contains(Capabilities::INSET) {
        seg = seg.inset(inset);
      }
    }
    if RingOptions::flag(options.flip) && caps.contains(Capabilities::FLIP) {
      seg = seg.flipped();
    }
    if let Some(factor) = options.scaler {
      seg = seg.scaled(factor);
    }
    if let Some(hook) = &options.on_before_segment {
      hook(&mut seg);
    }

    if in_shape { backend.begin_shape() }
    kind.draw(backend, &seg, options, in_shape);
    if in_shape { backend.end_shape(true) }

    if let Some(hook) = &options.on_after_segment {
      hook(&mut seg);
    }
  }

  if RingOptions::flag(options.perimeter) && !RingOptions::flag(options.hide_perimeter) {
    stroke_circle(backend, r2);
  }
}

/// Radius cursor and option overrides for building a mandala ring by ring.
#[derive(Debug, Clone, Default)]
pub struct MandalaContext {
  current_radius: f64,
  overrides: RingOptions
}

impl MandalaContext {
  pub fn new() -> Self {
    Self::default()
  }

  /// Back to radius zero, without overrides.
  pub fn reset(&mut self) -> &mut Self {
    *self = Self::default();
    self
  }

  pub fn current_radius(&self) -> f64 {
    self.current_radius
  }

  pub fn set_current_radius(&mut self, radius: f64) -> &mut Self {
    self.current_radius = radius;
    self
  }

  pub fn overrides(&self) -> &RingOptions {
    &self.overrides
  }

  /// Defaults for every following ring. Options passed to a call still take precedence.
  pub fn set_overrides(&mut self, overrides: RingOptions) -> &mut Self {
    self.overrides = overrides;
    self
  }

  /// `draw_ring` with the overrides merged in. Leaves the cursor alone.
  pub fn draw_ring(&self, backend: &mut dyn Backend, r1: f64, r2: f64, kind: &SegmentKind, options: &RingOptions) {
    draw_ring(backend, r1, r2, kind, &options.merged_over(&self.overrides));
  }

  /// Draw a ring `r_step` wide at the cursor, and move the cursor past it.
  pub fn add_ring(&mut self, backend: &mut dyn Backend, kind: &SegmentKind, r_step: f64, options: &RingOptions) -> &mut Self {
    let r = self.current_radius;
    self.draw_ring(backend, r, r + r_step, kind, options);
    self.current_radius += r_step;
    self
  }

  /// Advance the cursor by `r_step`, optionally stroking circles at either side of the gap.
  pub fn add_spacer(&mut self, backend: &mut dyn Backend, r_step: f64, draw_start: bool, draw_end: bool) -> &mut Self {
    if draw_start {
      stroke_circle(backend, self.current_radius);
    }
    self.current_radius += r_step;
    if draw_end {
      stroke_circle(backend, self.current_radius);
    }
    self
  }

  /// Stroke a circle at the cursor.
  pub fn add_circle(&mut self, backend: &mut dyn Backend) -> &mut Self {
    stroke_circle(backend, self.current_radius);
    self
  }
}
