use {
  lumic::{
    error::Result,
    drawing::{Backend, Canvas, Color},
    geometry::{Circle, P2, V2, AABB},
    packer::{self, margin, CirclePacker, Obstacle, PackingParams},
    sdf::{self, SDF}
  }
};

// Two overlapping disks with a hole, packed inside, with a rippled margin
fn main() -> Result<()> {
  env_logger::init();
  let path = "out.png";

  let shape = (|p: P2| sdf::sd_circle(p, P2::new(-90.0, 0.0), 220.0))
    .smooth_min(|p: P2| sdf::sd_circle(p, P2::new(130.0, 40.0), 180.0), 40.0);

  let packer = CirclePacker::new(PackingParams {
    sdf_margin: margin::ripple(1.5, 1.5, 45.0),
    ..PackingParams::default()
      .with_canvas(AABB::new(P2::new(-512.0, -512.0), P2::new(512.0, 512.0)))
      .with_sdf(move |p| shape.sdf(p))
      .with_invert(true)
      .with_obstacle(Obstacle::new(Circle::new(P2::new(-90.0, 0.0), 60.0)))
      .with_radius(1.5, 24.0)
      .with_max_circles(4000)
      .with_max_iterations(200_000)
  })?;
  let circles = packer.pack_seeded(7);
  println!("{} circles", circles.len());

  let mut canvas = Canvas::new(1024, 1024);
  canvas.background(Color::gray(16));
  canvas.translate(V2::new(512.0, 512.0));
  canvas.no_stroke();
  canvas.fill(Color::gray(230).with_alpha(220));
  packer::draw_circles(&mut canvas, &circles, false);
  canvas.save(path)?;
  open::that(path)?;
  Ok(())
}
