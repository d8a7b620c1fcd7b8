use {
  super::Segment,
  crate::error::{invalid_config, Result},
  std::{
    fmt::{Debug, Formatter},
    sync::Arc
  }
};

/// Segments per ring when no `count` is given.
pub const DEFAULT_COUNT: usize = 8;

pub type SegmentHook = Arc<dyn Fn(&mut Segment) + Send + Sync>;

/// Ring level options.
///
/// Every field is optional so that an explicit value, a [`MandalaContext`](super::MandalaContext)
/// override and the built-in default can be told apart. Explicit values win over overrides.
#[derive(Clone, Default)]
pub struct RingOptions {
  /// Amount of segments.
  pub count: Option<usize>,
  /// Angle of the first segment's leading edge. Defaults to minus half a segment, which
  /// centers segment 0 on angle 0.
  pub angle_start: Option<f64>,
  /// Total angular span, a full turn by default.
  pub angle_range: Option<f64>,
  /// Shrink each segment inwards by this distance, radially and along the arc.
  pub inset: Option<f64>,
  /// Rotate all segments.
  pub angle_shift: Option<f64>,
  /// Rotate odd segments by this fraction of the segment width.
  pub angle_shift_factor: Option<f64>,
  /// Segments leave out their outer edge; also suppresses `perimeter`.
  pub hide_perimeter: Option<bool>,
  /// Stroke a full circle at the outer radius after the ring.
  pub perimeter: Option<bool>,
  /// Only draw every n-th segment.
  pub skip_factor: Option<usize>,
  /// Indices of segments to leave out.
  pub skip: Option<Vec<usize>>,
  /// Cycled per segment; `0`, `.`, `-` and space leave the segment out.
  pub mask: Option<String>,
  /// Draw exactly the segments that would have been skipped.
  pub invert_skip: Option<bool>,
  /// Swap inner and outer radius.
  pub flip: Option<bool>,
  /// Scale every segment toward its own center.
  pub scaler: Option<f64>,
  /// Nested copies of the segment shape, shrinking toward its center.
  pub repeat: Option<u32>,
  /// Emit each segment as a single closed path.
  pub shape: Option<bool>,
  pub on_before_segment: Option<SegmentHook>,
  pub on_after_segment: Option<SegmentHook>
}

macro_rules! setters {
  ($($(#[$doc: meta])* $name: ident: $field: ident: $t: ty;)*) => {
    $(
      $(#[$doc])*
      pub fn $name(mut self, value: $t) -> Self {
        self.$field = Some(value.into());
        self
      }
    )*
  }
}

macro_rules! merge {
  ($top: expr, $base: expr; $($field: ident),*) => {
    RingOptions {
      $($field: $top.$field.clone().or_else(|| $base.$field.clone())),*
    }
  }
}

impl RingOptions {
  pub fn new() -> Self {
    Self::default()
  }

  setters! {
    with_count: count: usize;
    with_angle_start: angle_start: f64;
    with_angle_range: angle_range: f64;
    with_inset: inset: f64;
    with_angle_shift: angle_shift: f64;
    with_angle_shift_factor: angle_shift_factor: f64;
    with_hide_perimeter: hide_perimeter: bool;
    with_perimeter: perimeter: bool;
    with_skip_factor: skip_factor: usize;
    with_skip: skip: Vec<usize>;
    with_mask: mask: &str;
    with_invert_skip: invert_skip: bool;
    with_flip: flip: bool;
    with_scaler: scaler: f64;
    with_repeat: repeat: u32;
    with_shape: shape: bool;
  }

  pub fn on_before_segment(mut self, hook: impl Fn(&mut Segment) + Send + Sync + 'static) -> Self {
    self.on_before_segment = Some(Arc::new(hook));
    self
  }

  pub fn on_after_segment(mut self, hook: impl Fn(&mut Segment) + Send + Sync + 'static) -> Self {
    self.on_after_segment = Some(Arc::new(hook));
    self
  }

  /// `self` layered over `base`: fields set here win, unset fields fall back to `base`.
  pub fn merged_over(&self, base: &RingOptions) -> RingOptions {
    merge!(self, base;
      count, angle_start, angle_range, inset, angle_shift, angle_shift_factor,
      hide_perimeter, perimeter, skip_factor, skip, mask, invert_skip, flip, scaler,
      repeat, shape, on_before_segment, on_after_segment)
  }

  pub fn count(&self) -> usize {
    self.count.unwrap_or(DEFAULT_COUNT)
  }

  pub(crate) fn flag(value: Option<bool>) -> bool {
    value.unwrap_or(false)
  }

  /// Whether segment `i` is left out by `skip_factor`, `skip`, `mask` and `invert_skip`.
  pub fn is_skipped(&self, i: usize) -> bool {
    let by_factor = matches!(self.skip_factor, Some(n) if n > 1 && i % n != 0);
    let by_list = self.skip.as_ref()
      .map_or(false, |skip| skip.contains(&i));
    let by_mask = self.mask.as_ref()
      .and_then(|mask| {
        let len = mask.chars().count();
        (len > 0).then(|| mask.chars().nth(i % len)).flatten()
      })
      .map_or(false, |c| matches!(c, '0' | '.' | '-' | ' '));
    let skipped = by_factor || by_list || by_mask;
    skipped != Self::flag(self.invert_skip)
  }

  /// Reject options no ring can be drawn with. Drawing itself never fails; this is for
  /// callers that want to catch mistakes early.
  pub fn validate(&self) -> Result<()> {
    if self.count == Some(0) {
      return invalid_config("ring segment count is zero");
    }
    if self.skip_factor == Some(0) {
      return invalid_config("skip_factor is zero");
    }
    if matches!(self.inset, Some(inset) if !(inset >= 0.0)) {
      return invalid_config(format!("inset must be non-negative: {:?}", self.inset));
    }
    let non_finite = [self.angle_start, self.angle_range, self.angle_shift,
      self.angle_shift_factor, self.scaler]
      .into_iter()
      .flatten()
      .any(|v| !v.is_finite());
    if non_finite {
      return invalid_config("non-finite angle or scale option");
    }
    Ok(())
  }
}

impl Debug for RingOptions {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let hook = |h: &Option<SegmentHook>| if h.is_some() { "Some(...)" } else { "None" };
    f.debug_struct("RingOptions")
      .field("count", &self.count)
      .field("angle_start", &self.angle_start)
      .field("angle_range", &self.angle_range)
      .field("inset", &self.inset)
      .field("angle_shift", &self.angle_shift)
      .field("angle_shift_factor", &self.angle_shift_factor)
      .field("hide_perimeter", &self.hide_perimeter)
      .field("perimeter", &self.perimeter)
      .field("skip_factor", &self.skip_factor)
      .field("skip", &self.skip)
      .field("mask", &self.mask)
      .field("invert_skip", &self.invert_skip)
      .field("flip", &self.flip)
      .field("scaler", &self.scaler)
      .field("repeat", &self.repeat)
      .field("shape", &self.shape)
      .field("on_before_segment", &hook(&self.on_before_segment))
      .field("on_after_segment", &hook(&self.on_after_segment))
      .finish()
  }
}
