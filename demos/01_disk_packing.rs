use {
  lumic::{
    error::Result,
    drawing::{Backend, Canvas, Color},
    geometry::{P2, V2, AABB},
    packer::{self, CirclePacker, PackingParams},
    sdf
  },
  rand::SeedableRng
};

// 500 circles packed around a disk, with connectors to the nearest neighbour
fn main() -> Result<()> {
  env_logger::init();
  let path = "out.png";

  let packer = CirclePacker::new(PackingParams::default()
    .with_canvas(AABB::new(P2::new(-400.0, -400.0), P2::new(400.0, 400.0)))
    .with_sdf(|p| sdf::sd_circle(p, P2::origin(), 50.0))
    .with_radius(2.0, 20.0)
    .with_max_iterations(10_000)
    .with_max_circles(500)
    .with_sdf_threshold(1000.0))?;
  let (circles, stats) = packer.pack_with_stats(&mut rand_pcg::Pcg64::seed_from_u64(0));
  println!("{} circles, {:?}", circles.len(), stats);

  let mut canvas = Canvas::new(800, 800);
  canvas.background(Color::WHITE);
  canvas.translate(V2::new(400.0, 400.0));
  canvas.no_fill();
  canvas.stroke(Color::BLACK);
  packer::draw_circles(&mut canvas, &circles, true);
  canvas.save(path)?;
  open::that(path)?;
  Ok(())
}
