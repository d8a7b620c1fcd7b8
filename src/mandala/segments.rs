use {
  super::{RingOptions, Segment},
  crate::{
    drawing::{polyline, Backend},
    geometry::V2
  },
  bitflags::bitflags,
  std::{
    f64::consts::PI,
    fmt::{Debug, Formatter},
    sync::Arc
  }
};

bitflags! {
  /// Ring options a segment kind honors.
  #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
  pub struct Capabilities: u8 {
    /// Shrinks by `inset`.
    const INSET = 1;
    /// Draws nested copies for `repeat`.
    const REPEAT = 1 << 1;
    /// Swaps inner and outer radius for `flip`.
    const FLIP = 1 << 2;
    /// Emits a single path, so `shape` can bracket it.
    const SHAPE = 1 << 3;
    /// Has an outer edge that `hide_perimeter` leaves out.
    const PERIMETER = 1 << 4;
  }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct DiamondOpts {
  /// Radial position of the side corners, as a fraction from `r1` to `r2`. 0.5 by default.
  pub waist: Option<f64>
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct LeafOpts {
  /// Widest point as a fraction of half the segment width. 1 by default.
  pub bulge: Option<f64>,
  /// Vertices per side.
  pub resolution: Option<usize>
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct BoxOpts {
  /// Vertices per arc.
  pub resolution: Option<usize>
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct BezierOpts {
  /// Height of the control points, as a fraction of the height at which the middle of the
  /// arch touches `r2`. 1 by default. Segments wider than a sixth of a turn bulge past `r2`
  /// on either side of the middle.
  pub tension: Option<f64>,
  pub resolution: Option<usize>
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct CircleOpts {
  /// Diameter relative to the largest circle fitting the segment. 1 by default.
  pub fill_ratio: Option<f64>
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct PetalOpts {
  pub resolution: Option<usize>
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct SquareWaveOpts {
  /// Teeth per segment. 1 by default.
  pub teeth: Option<usize>
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TextOpts {
  /// Characters are handed out to segments in order, cycling.
  pub text: String,
  pub size: Option<f64>
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct CrossOpts {
  /// Arm length as a fraction of the segment extent. 1 by default.
  pub extent: Option<f64>
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct TriangleOpts {
  /// Apex on the inner radius instead of the outer one.
  pub inward: Option<bool>
}

pub type SegmentFn = Arc<dyn Fn(&mut dyn Backend, &Segment, &RingOptions) + Send + Sync>;

/// User supplied segment drawing.
#[derive(Clone)]
pub struct CustomSegment {
  pub name: &'static str,
  pub capabilities: Capabilities,
  pub draw: SegmentFn
}

impl Debug for CustomSegment {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CustomSegment")
      .field("name", &self.name)
      .field("capabilities", &self.capabilities)
      .finish()
  }
}

/// What gets drawn into every slice of a ring.
#[derive(Debug, Clone)]
pub enum SegmentKind {
  Diamond(DiamondOpts),
  Leaf(LeafOpts),
  Box(BoxOpts),
  Bezier(BezierOpts),
  Circle(CircleOpts),
  CrissCrossPetal(PetalOpts),
  SquareWave(SquareWaveOpts),
  Text(TextOpts),
  Cross(CrossOpts),
  Triangle(TriangleOpts),
  Custom(CustomSegment)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
  a + (b - a) * t
}

impl SegmentKind {
  pub fn text(text: &str) -> Self {
    SegmentKind::Text(TextOpts { text: text.to_string(), size: None })
  }

  pub fn custom(
    name: &'static str,
    capabilities: Capabilities,
    draw: impl Fn(&mut dyn Backend, &Segment, &RingOptions) + Send + Sync + 'static
  ) -> Self {
    SegmentKind::Custom(CustomSegment { name, capabilities, draw: Arc::new(draw) })
  }

  pub fn name(&self) -> &'static str {
    use SegmentKind::*;
    match self {
      Diamond(_) => "diamond",
      Leaf(_) => "leaf",
      Box(_) => "box",
      Bezier(_) => "bezier",
      Circle(_) => "circle",
      CrissCrossPetal(_) => "criss-cross petal",
      SquareWave(_) => "square wave",
      Text(_) => "text",
      Cross(_) => "cross",
      Triangle(_) => "triangle",
      Custom(custom) => custom.name
    }
  }

  pub fn capabilities(&self) -> Capabilities {
    use {Capabilities as C, SegmentKind::*};
    match self {
      Diamond(_) | Leaf(_) | Triangle(_) => C::INSET | C::REPEAT | C::FLIP | C::SHAPE,
      Box(_) => C::INSET | C::REPEAT | C::SHAPE | C::PERIMETER,
      Bezier(_) | SquareWave(_) => C::INSET | C::FLIP | C::SHAPE,
      Circle(_) => C::INSET | C::REPEAT,
      CrissCrossPetal(_) => C::INSET | C::FLIP,
      Cross(_) => C::INSET,
      Text(_) => C::empty(),
      Custom(custom) => custom.capabilities
    }
  }

  /// Draw one segment, including its `repeat` copies. Custom kinds handle `repeat` themselves.
  pub(super) fn draw(&self, backend: &mut dyn Backend, seg: &Segment, options: &RingOptions, in_shape: bool) {
    if let SegmentKind::Custom(custom) = self {
      return (custom.draw)(backend, seg, options);
    }
    let repeat = if self.capabilities().contains(Capabilities::REPEAT) {
      options.repeat.unwrap_or(1).max(1)
    } else { 1 };
    for k in 0..repeat {
      let copy = if k == 0 { *seg } else { seg.scaled((repeat - k) as f64 / repeat as f64) };
      self.draw_once(backend, &copy, options, in_shape);
    }
  }

  fn draw_once(&self, backend: &mut dyn Backend, seg: &Segment, options: &RingOptions, in_shape: bool) {
    use SegmentKind::*;
    let &Segment { r1, a1, r2, a2, i } = seg;
    let (rm, am) = (seg.mid_radius(), seg.mid_angle());
    match self {
      Diamond(o) => {
        let rw = lerp(r1, r2, o.waist.unwrap_or(0.5));
        let points = [seg.point(r1, am), seg.point(rw, a1), seg.point(r2, am), seg.point(rw, a2)];
        polyline(backend, &points, true, in_shape);
      }
      Leaf(o) => {
        let n = o.resolution.unwrap_or(12).max(2);
        let half = (a2 - a1) / 2.0 * o.bulge.unwrap_or(1.0);
        let side = |sign: f64| (0..=n).map(move |k| {
          let t = k as f64 / n as f64;
          (lerp(r1, r2, t), am + sign * half * (PI * t).sin())
        });
        let points: Vec<_> = side(1.0)
          .chain(side(-1.0).collect::<Vec<_>>().into_iter().rev().skip(1).take(n - 1))
          .map(|(r, a)| seg.point(r, a))
          .collect();
        polyline(backend, &points, true, in_shape);
      }
      Box(o) => {
        let n = o.resolution.unwrap_or(8).max(1);
        let inner = seg.arc(r1, a1, a2, n);
        if RingOptions::flag(options.hide_perimeter) {
          let points: Vec<_> = std::iter::once(seg.point(r2, a1))
            .chain(inner)
            .chain(std::iter::once(seg.point(r2, a2)))
            .collect();
          polyline(backend, &points, false, in_shape);
        } else {
          let points: Vec<_> = inner.into_iter().chain(seg.arc(r2, a2, a1, n)).collect();
          polyline(backend, &points, true, in_shape);
        }
      }
      Bezier(o) => {
        let n = o.resolution.unwrap_or(16).max(1);
        // the curve midpoint is (P0 + 3 P1 + 3 P2 + P3) / 8, which lies on the mid angle
        let cos = ((a2 - a1) / 2.0).cos();
        let peak = if cos > 1e-6 { (4.0 * r2 / cos - r1) / 3.0 } else { lerp(r1, r2, 4.0 / 3.0) };
        let rc = lerp(r1, peak, o.tension.unwrap_or(1.0));
        let control = [seg.point(r1, a1), seg.point(rc, a1), seg.point(rc, a2), seg.point(r1, a2)];
        let points: Vec<_> = (0..=n)
          .map(|k| {
            let t = k as f64 / n as f64;
            let u = 1.0 - t;
            let w = [u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t];
            control.iter().zip(w)
              .fold(V2::zero(), |acc, (p, w)| acc + p.to_vector() * w)
              .to_point()
          })
          .collect();
        polyline(backend, &points, false, in_shape);
      }
      Circle(o) => {
        let chord = 2.0 * rm.abs() * ((a2 - a1).abs() / 2.0).min(PI / 2.0).sin();
        let diameter = (r2 - r1).abs().min(chord) * o.fill_ratio.unwrap_or(1.0);
        backend.circle(seg.point(rm, am), diameter);
      }
      CrissCrossPetal(o) => {
        backend.line(seg.point(r1, a1), seg.point(r2, a2));
        backend.line(seg.point(r1, a2), seg.point(r2, a1));
        let n = o.resolution.unwrap_or(12).max(2);
        let petal: Vec<_> = (0..=n)
          .map(|k| {
            let t = k as f64 / n as f64;
            seg.point(lerp(r1, r2, (PI * t).sin()), lerp(a1, a2, t))
          })
          .collect();
        polyline(backend, &petal, false, in_shape);
      }
      SquareWave(o) => {
        let teeth = o.teeth.unwrap_or(1).max(1);
        let w = (a2 - a1) / teeth as f64;
        let mut points = Vec::with_capacity(teeth * 4 + 1);
        for k in 0..teeth {
          let a = a1 + w * k as f64;
          points.extend([
            seg.point(r1, a), seg.point(r2, a),
            seg.point(r2, a + w / 2.0), seg.point(r1, a + w / 2.0)
          ]);
        }
        points.push(seg.point(r1, a2));
        polyline(backend, &points, false, in_shape);
      }
      Text(o) => {
        let len = o.text.chars().count();
        if let Some(c) = o.text.chars().nth(i % len.max(1)) {
          let size = o.size.unwrap_or((r2 - r1).abs() * 0.6);
          backend.text(&c.to_string(), seg.point(rm, am), size);
        }
      }
      Cross(o) => {
        let e = o.extent.unwrap_or(1.0);
        let dr = (r2 - r1) * (1.0 - e) / 2.0;
        let da = (a2 - a1) / 2.0 * e;
        backend.line(seg.point(r1 + dr, am), seg.point(r2 - dr, am));
        backend.line(seg.point(rm, am - da), seg.point(rm, am + da));
      }
      Triangle(o) => {
        let (base, apex) = if o.inward.unwrap_or(false) { (r2, r1) } else { (r1, r2) };
        let points = [seg.point(base, a1), seg.point(apex, am), seg.point(base, a2)];
        polyline(backend, &points, true, in_shape);
      }
      Custom(custom) => (custom.draw)(backend, seg, options)
    }
  }
}
