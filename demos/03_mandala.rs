use {
  lumic::{
    error::Result,
    drawing::{Backend, Canvas, Color},
    geometry::V2,
    mandala::{
      Capabilities, DiamondOpts, MandalaContext, RingOptions, SegmentKind, SquareWaveOpts,
      TriangleOpts
    }
  },
  std::f64::consts::PI
};

fn main() -> Result<()> {
  env_logger::init();
  let path = "out.png";

  let mut canvas = Canvas::new(1024, 1024);
  canvas.background(Color::WHITE);
  canvas.translate(V2::new(512.0, 512.0));
  canvas.no_fill();
  canvas.stroke(Color::BLACK);
  canvas.stroke_weight(1.5);

  // small dot in the middle of every segment, drawn by hand
  let dot = SegmentKind::custom("dot", Capabilities::INSET, |backend, seg, _| {
    backend.circle(seg.point(seg.mid_radius(), seg.mid_angle()), 3.0);
  });

  let mut ctx = MandalaContext::new();
  ctx.set_overrides(RingOptions::new().with_perimeter(true));
  ctx.set_current_radius(30.0)
    .add_circle(&mut canvas)
    .add_ring(&mut canvas, &SegmentKind::Leaf(Default::default()), 60.0,
      &RingOptions::new().with_count(12).with_inset(2.0).with_repeat(3))
    .add_ring(&mut canvas, &SegmentKind::Diamond(DiamondOpts { waist: Some(0.3) }), 50.0,
      &RingOptions::new().with_count(24).with_angle_shift(PI / 24.0))
    .add_spacer(&mut canvas, 8.0, false, true)
    .add_ring(&mut canvas, &SegmentKind::Box(Default::default()), 30.0,
      &RingOptions::new().with_count(48).with_hide_perimeter(true).with_mask("110"))
    .add_ring(&mut canvas, &dot, 20.0, &RingOptions::new().with_count(48))
    .add_ring(&mut canvas, &SegmentKind::SquareWave(SquareWaveOpts { teeth: Some(2) }), 25.0,
      &RingOptions::new().with_count(36).with_perimeter(false))
    .add_ring(&mut canvas, &SegmentKind::CrissCrossPetal(Default::default()), 70.0,
      &RingOptions::new().with_count(18).with_inset(3.0))
    .add_ring(&mut canvas, &SegmentKind::Triangle(TriangleOpts { inward: Some(false) }), 60.0,
      &RingOptions::new().with_count(36).with_angle_shift_factor(0.5).with_shape(true)
        .on_before_segment(|seg| seg.r2 -= (seg.i % 3) as f64 * 12.0));
  println!("outer radius {}", ctx.current_radius());

  canvas.save(path)?;
  open::that(path)?;
  Ok(())
}
