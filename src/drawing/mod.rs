//! Immediate-mode drawing backend.
//!
//! The packer and the ring engine never rasterize anything themselves; they issue calls on a
//! [`Backend`]. Two backends ship with the crate:
//! - [`Recorder`], which keeps every call as a [`DrawCommand`], for tests and for exporting
//!   geometry to other formats;
//! - `Canvas` over an `image::RgbaImage` (requires `drawing` feature), an anti-aliased SDF
//!   rasterizer.

use {
  crate::geometry::{P2, V2},
  euclid::Angle
};

#[cfg(feature = "drawing")]
mod impl_backend_rgbaimage;
#[cfg(feature = "drawing")]
#[cfg_attr(docsrs, doc(cfg(feature = "drawing")))]
pub use impl_backend_rgbaimage::Canvas;
#[cfg(test)] mod tests;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Color(pub [u8; 4]);

impl Color {
  pub const BLACK: Color = Color([0, 0, 0, 255]);
  pub const WHITE: Color = Color([255, 255, 255, 255]);

  pub fn gray(v: u8) -> Self {
    Color([v, v, v, 255])
  }
  pub fn with_alpha(mut self, a: u8) -> Self {
    self.0[3] = a;
    self
  }
}

/// The subset of a creative-coding canvas used by this crate.
///
/// Style and transform state is scoped by `push`/`pop`. Paths are built with
/// `begin_shape`, `vertex`..., `end_shape`; a path is filled and stroked with the style active
/// at `end_shape`.
pub trait Backend {
  fn push(&mut self);
  fn pop(&mut self);
  fn translate(&mut self, offset: V2);
  fn rotate(&mut self, angle: Angle<f64>);
  fn scale(&mut self, factor: f64);

  fn stroke(&mut self, color: Color);
  fn no_stroke(&mut self);
  fn fill(&mut self, color: Color);
  fn no_fill(&mut self);
  fn stroke_weight(&mut self, weight: f64);

  fn circle(&mut self, center: P2, diameter: f64);
  fn line(&mut self, a: P2, b: P2);
  fn begin_shape(&mut self);
  fn vertex(&mut self, p: P2);
  fn end_shape(&mut self, close: bool);

  /// Backends without font support ignore text.
  fn text(&mut self, _text: &str, _at: P2, _size: f64) {}
}

/// A single recorded [`Backend`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
  Push,
  Pop,
  Translate(V2),
  Rotate(Angle<f64>),
  Scale(f64),
  Stroke(Option<Color>),
  Fill(Option<Color>),
  StrokeWeight(f64),
  Circle { center: P2, diameter: f64 },
  Line(P2, P2),
  BeginShape,
  Vertex(P2),
  EndShape { close: bool },
  Text { text: String, at: P2, size: f64 }
}

/// Backend that records every call.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
  pub commands: Vec<DrawCommand>
}

impl Recorder {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn circles(&self) -> impl Iterator<Item = (P2, f64)> + '_ {
    self.commands.iter()
      .filter_map(|cmd| match *cmd {
        DrawCommand::Circle { center, diameter } => Some((center, diameter)),
        _ => None
      })
  }

  pub fn lines(&self) -> impl Iterator<Item = (P2, P2)> + '_ {
    self.commands.iter()
      .filter_map(|cmd| match *cmd {
        DrawCommand::Line(a, b) => Some((a, b)),
        _ => None
      })
  }

  /// Vertex lists of every completed path, with their `close` flag.
  pub fn paths(&self) -> Vec<(Vec<P2>, bool)> {
    let mut paths = vec![];
    let mut current: Option<Vec<P2>> = None;
    for cmd in &self.commands {
      match *cmd {
        DrawCommand::BeginShape => current = Some(vec![]),
        DrawCommand::Vertex(p) => if let Some(path) = current.as_mut() { path.push(p) },
        DrawCommand::EndShape { close } => if let Some(path) = current.take() {
          paths.push((path, close))
        },
        _ => ()
      }
    }
    paths
  }

  /// Total number of geometric primitives: circles, lines, completed paths and text.
  pub fn primitive_count(&self) -> usize {
    self.commands.iter()
      .filter(|cmd| matches!(cmd,
        DrawCommand::Circle { .. } | DrawCommand::Line(..) |
        DrawCommand::EndShape { .. } | DrawCommand::Text { .. }
      ))
      .count()
  }
}

impl Backend for Recorder {
  fn push(&mut self) { self.commands.push(DrawCommand::Push) }
  fn pop(&mut self) { self.commands.push(DrawCommand::Pop) }
  fn translate(&mut self, offset: V2) { self.commands.push(DrawCommand::Translate(offset)) }
  fn rotate(&mut self, angle: Angle<f64>) { self.commands.push(DrawCommand::Rotate(angle)) }
  fn scale(&mut self, factor: f64) { self.commands.push(DrawCommand::Scale(factor)) }

  fn stroke(&mut self, color: Color) { self.commands.push(DrawCommand::Stroke(Some(color))) }
  fn no_stroke(&mut self) { self.commands.push(DrawCommand::Stroke(None)) }
  fn fill(&mut self, color: Color) { self.commands.push(DrawCommand::Fill(Some(color))) }
  fn no_fill(&mut self) { self.commands.push(DrawCommand::Fill(None)) }
  fn stroke_weight(&mut self, weight: f64) { self.commands.push(DrawCommand::StrokeWeight(weight)) }

  fn circle(&mut self, center: P2, diameter: f64) {
    self.commands.push(DrawCommand::Circle { center, diameter })
  }
  fn line(&mut self, a: P2, b: P2) { self.commands.push(DrawCommand::Line(a, b)) }
  fn begin_shape(&mut self) { self.commands.push(DrawCommand::BeginShape) }
  fn vertex(&mut self, p: P2) { self.commands.push(DrawCommand::Vertex(p)) }
  fn end_shape(&mut self, close: bool) { self.commands.push(DrawCommand::EndShape { close }) }
  fn text(&mut self, text: &str, at: P2, size: f64) {
    self.commands.push(DrawCommand::Text { text: text.to_string(), at, size })
  }
}

/// Draw an open or closed polyline.
///
/// Inside an already open path (`in_shape`), only vertices are emitted, so the caller's
/// `begin_shape`/`end_shape` pair turns all of them into one outline.
pub fn polyline(backend: &mut dyn Backend, points: &[P2], close: bool, in_shape: bool) {
  if in_shape {
    points.iter().for_each(|&p| backend.vertex(p));
    return;
  }
  match points {
    [] | [_] => (),
    [a, b] if !close => backend.line(*a, *b),
    _ => {
      backend.begin_shape();
      points.iter().for_each(|&p| backend.vertex(p));
      backend.end_shape(close);
    }
  }
}
