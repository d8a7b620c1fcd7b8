#![allow(non_snake_case)]
use {
  super::{Backend, Color},
  crate::{
    error::{ErrorKind, Result},
    geometry::{box_around, CanvasSpace, P2, V2, AABB}
  },
  euclid::{Angle, Transform2D},
  image::{Pixel, Rgba, RgbaImage},
  rayon::prelude::*,
  std::path::Path
};

type Transform = Transform2D<f64, CanvasSpace, CanvasSpace>;

#[derive(Debug, Copy, Clone)]
struct Style {
  transform: Transform,
  scale: f64,
  stroke: Option<Color>,
  fill: Option<Color>,
  weight: f64
}

impl Default for Style {
  fn default() -> Self {
    Style {
      transform: Transform::identity(),
      scale: 1.0,
      stroke: Some(Color::BLACK),
      fill: Some(Color::WHITE),
      weight: 1.0
    }}}

/// Raster backend over an `RgbaImage`, one canvas unit per pixel.
///
/// Every primitive is described by its signed distance function and shaded with a one pixel
/// wide anti-aliasing band; rows are shaded in parallel.
#[derive(Debug, Clone)]
pub struct Canvas {
  pub image: RgbaImage,
  style: Style,
  stack: Vec<Style>,
  path: Vec<P2>
}

impl Canvas {
  pub fn new(width: u32, height: u32) -> Self {
    Self::from_image(RgbaImage::new(width, height))
  }

  pub fn from_image(image: RgbaImage) -> Self {
    Canvas { image, style: Style::default(), stack: vec![], path: vec![] }
  }

  pub fn background(&mut self, color: Color) -> &mut Self {
    self.image.pixels_mut().for_each(|px| *px = Rgba(color.0));
    self
  }

  pub fn into_image(self) -> RgbaImage {
    self.image
  }

  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    self.image.save(path).map_err(ErrorKind::from)?;
    Ok(())
  }

  fn to_pixel(&self, p: P2) -> P2 {
    self.style.transform.transform_point(p)
  }

  fn shade(
    &mut self,
    domain: AABB,
    color: Color,
    sdf: impl Fn(P2) -> f64 + Sync
  ) {
    let (width, height) = self.image.dimensions();
    let domain = domain.round_out();
    let x0 = domain.min.x.max(0.0) as usize;
    let y0 = domain.min.y.max(0.0) as usize;
    let x1 = (domain.max.x.max(0.0) as usize).min(width as usize);
    let y1 = (domain.max.y.max(0.0) as usize).min(height as usize);
    if x0 >= x1 || y0 >= y1 {
      return; // primitive has no intersection with the image at all
    }
    let color = Rgba(color.0);
    let buffer: &mut [u8] = &mut self.image;

    buffer.par_chunks_mut(width as usize * 4)
      .enumerate()
      .skip(y0)
      .take(y1 - y0)
      .for_each(|(y, row)| {
        for x in x0..x1 {
          let pixel = P2::new(x as f64 + 0.5, y as f64 + 0.5);
          let px = &mut row[x * 4..x * 4 + 4];
          let dst = Rgba([px[0], px[1], px[2], px[3]]);
          px.copy_from_slice(&sdf_overlay_aa(sdf(pixel), dst, color).0);
        }
      });
  }

  fn stroke_outline(&mut self, points: Vec<P2>, close: bool) {
    let (color, half_w) = match self.style.stroke {
      Some(color) => (color, self.style.weight * self.style.scale / 2.0),
      None => return
    };
    if points.is_empty() {
      return;
    }
    let domain = AABB::from_points(&points).inflate(half_w + 1.0, half_w + 1.0);
    let n = points.len();
    let segments = if close { n } else { n - 1 };
    self.shade(domain, color, move |p| {
      let d = match segments {
        0 => (p - points[0]).length(),
        _ => (0..segments)
          .map(|i| sd_segment(p, points[i], points[(i + 1) % n]))
          .fold(f64::MAX, f64::min)
      };
      d - half_w
    });
  }
}

// one pixel wide antialiasing band
fn sdf_overlay_aa(sdf: f64, mut col1: Rgba<u8>, mut col2: Rgba<u8>) -> Rgba<u8> {
  let Δp = 1.0;
  let alpha = (0.5 * Δp - sdf).clamp(0.0, Δp) / Δp;
  if alpha <= 0.0 {
    return col1;
  }
  col2.0[3] = ((col2.0[3] as f64) * alpha) as u8;
  col1.blend(&col2);
  col1
}

fn sd_segment(p: P2, a: P2, b: P2) -> f64 {
  let (pa, ba) = (p - a, b - a);
  let len2 = ba.square_length();
  let h = if len2 > f64::EPSILON {
    (pa.dot(ba) / len2).clamp(0.0, 1.0)
  } else { 0.0 };
  (pa - ba * h).length()
}

/// Exact distance to a polygon, negative inside (even-odd rule).
fn sd_polygon(p: P2, v: &[P2]) -> f64 {
  let mut d = (p - v[0]).square_length();
  let mut s = 1.0;
  let mut j = v.len() - 1;
  for i in 0..v.len() {
    let e: V2 = v[j] - v[i];
    let w: V2 = p - v[i];
    let len2 = e.square_length();
    let h = if len2 > f64::EPSILON { (w.dot(e) / len2).clamp(0.0, 1.0) } else { 0.0 };
    d = d.min((w - e * h).square_length());
    let c = [p.y >= v[i].y, p.y < v[j].y, e.x * w.y > e.y * w.x];
    if c.iter().all(|&c| c) || c.iter().all(|&c| !c) {
      s = -s;
    }
    j = i;
  }
  s * d.sqrt()
}

impl Backend for Canvas {
  fn push(&mut self) {
    self.stack.push(self.style);
  }
  fn pop(&mut self) {
    if let Some(style) = self.stack.pop() {
      self.style = style;
    }
  }
  fn translate(&mut self, offset: V2) {
    self.style.transform = Transform::translation(offset.x, offset.y)
      .then(&self.style.transform);
  }
  fn rotate(&mut self, angle: Angle<f64>) {
    self.style.transform = Transform::rotation(angle)
      .then(&self.style.transform);
  }
  fn scale(&mut self, factor: f64) {
    self.style.transform = Transform::scale(factor, factor)
      .then(&self.style.transform);
    self.style.scale *= factor.abs();
  }

  fn stroke(&mut self, color: Color) { self.style.stroke = Some(color) }
  fn no_stroke(&mut self) { self.style.stroke = None }
  fn fill(&mut self, color: Color) { self.style.fill = Some(color) }
  fn no_fill(&mut self) { self.style.fill = None }
  fn stroke_weight(&mut self, weight: f64) { self.style.weight = weight }

  fn circle(&mut self, center: P2, diameter: f64) {
    let c = self.to_pixel(center);
    let r = diameter / 2.0 * self.style.scale;
    let half_w = self.style.weight * self.style.scale / 2.0;
    let domain = box_around(c, r + half_w + 1.0);
    if let Some(fill) = self.style.fill {
      self.shade(domain, fill, move |p| (p - c).length() - r);
    }
    if let Some(stroke) = self.style.stroke {
      self.shade(domain, stroke, move |p| ((p - c).length() - r).abs() - half_w);
    }
  }

  fn line(&mut self, a: P2, b: P2) {
    let points = vec![self.to_pixel(a), self.to_pixel(b)];
    self.stroke_outline(points, false);
  }

  fn begin_shape(&mut self) {
    self.path.clear();
  }

  fn vertex(&mut self, p: P2) {
    let p = self.to_pixel(p);
    self.path.push(p);
  }

  fn end_shape(&mut self, close: bool) {
    let points = std::mem::take(&mut self.path);
    if let (Some(fill), true) = (self.style.fill, points.len() >= 3) {
      let domain = AABB::from_points(&points).inflate(1.0, 1.0);
      let polygon = points.clone();
      self.shade(domain, fill, move |p| sd_polygon(p, &polygon));
    }
    self.stroke_outline(points, close);
  }

  fn text(&mut self, text: &str, at: P2, _size: f64) {
    log::trace!("raster canvas has no fonts, skipping text {:?} at {:?}", text, at);
  }
}

#[cfg(test)] mod tests {
  use super::*;

  #[test] fn polygon_sign() {
    let square = [
      P2::new(0.0, 0.0), P2::new(10.0, 0.0),
      P2::new(10.0, 10.0), P2::new(0.0, 10.0)
    ];
    assert!((sd_polygon(P2::new(5.0, 5.0), &square) + 5.0).abs() < 1e-9);
    assert!((sd_polygon(P2::new(13.0, 5.0), &square) - 3.0).abs() < 1e-9);
  }

  #[test] fn segment_distance() {
    let d = sd_segment(P2::new(5.0, 3.0), P2::new(0.0, 0.0), P2::new(10.0, 0.0));
    assert!((d - 3.0).abs() < 1e-12);
    let d = sd_segment(P2::new(3.0, 4.0), P2::origin(), P2::origin());
    assert!((d - 5.0).abs() < 1e-12);
  }

  #[test] fn filled_circle_and_transform() -> Result<()> {
    let mut canvas = Canvas::new(64, 64);
    canvas.background(Color::BLACK);
    canvas.push();
    canvas.translate(V2::new(32.0, 32.0));
    canvas.no_stroke();
    canvas.fill(Color::WHITE);
    canvas.circle(P2::origin(), 20.0);
    canvas.pop();

    assert_eq!(canvas.image.get_pixel(32, 32).0, [255, 255, 255, 255]);
    assert_eq!(canvas.image.get_pixel(2, 2).0, [0, 0, 0, 255]);
    // outside the 10px radius
    assert_eq!(canvas.image.get_pixel(32, 45).0, [0, 0, 0, 255]);
    Ok(())
  }

  #[test] fn closed_path_fill() {
    let mut canvas = Canvas::new(32, 32);
    canvas.no_stroke();
    canvas.fill(Color::WHITE);
    canvas.begin_shape();
    [(4.0, 4.0), (28.0, 4.0), (28.0, 28.0), (4.0, 28.0)].iter()
      .for_each(|&(x, y)| canvas.vertex(P2::new(x, y)));
    canvas.end_shape(true);
    assert_eq!(canvas.image.get_pixel(16, 16).0, [255, 255, 255, 255]);
    assert_eq!(canvas.image.get_pixel(1, 1).0, [0, 0, 0, 0]);
  }

  #[test] fn save_into_missing_dir() {
    let path = std::env::temp_dir().join("lumic-missing-dir").join("out.png");
    let err = Canvas::new(4, 4).save(&path).unwrap_err();
    assert!(matches!(err.downcast_ref::<ErrorKind>(), Some(ErrorKind::IoError(_))), "{err:?}");
  }
}
