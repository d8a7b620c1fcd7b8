//! Building blocks for generative-art sketches in ℝ².
//!
//! Two subsystems: [`packer`], which fills free space with non-overlapping circles, and
//! [`mandala`], which lays out rings of radial segments. Neither one rasterizes anything; both
//! issue calls on a [`drawing::Backend`], or return the placed shapes for the caller to render
//! or export. Free space is described by a signed distance function, see [`sdf`].
//!
//! # Basic usage
//! ```
//! # use lumic::{
//! #   error::Result,
//! #   drawing::Recorder,
//! #   geometry::{P2, AABB},
//! #   packer::{self, CirclePacker, PackingParams},
//! #   sdf
//! # };
//! # fn main() -> Result<()> {
//! // Pack circles around a disk of radius 50, on an 800x800 canvas centered at the origin.
//! let packer = CirclePacker::new(PackingParams::default()
//!   .with_canvas(AABB::new(P2::new(-400.0, -400.0), P2::new(400.0, 400.0)))
//!   .with_sdf(|p| sdf::sd_circle(p, P2::origin(), 50.0))
//!   .with_radius(2.0, 20.0)
//!   .with_max_iterations(10_000)
//!   .with_max_circles(500))?;
//!
//! // Same seed, same packing.
//! let circles = packer.pack_seeded(0);
//! assert_eq!(circles, packer.pack_seeded(0));
//!
//! // `Recorder` keeps the draw calls; with the `drawing` feature, `Canvas` rasterizes them.
//! let mut backend = Recorder::new();
//! packer::draw_circles(&mut backend, &circles, true);
//! assert_eq!(backend.circles().count(), circles.len());
//! #   Ok(())
//! # }
//! ```
//!
//! Mandalas are stacked ring by ring from the center outwards:
//! ```
//! # use lumic::{drawing::Recorder, mandala::{MandalaContext, RingOptions, SegmentKind}};
//! let mut backend = Recorder::new();
//! let mut ctx = MandalaContext::new();
//! ctx.set_current_radius(20.0)
//!   .add_ring(&mut backend, &SegmentKind::Leaf(Default::default()), 60.0,
//!     &RingOptions::new().with_count(16).with_inset(2.0))
//!   .add_spacer(&mut backend, 4.0, false, true)
//!   .add_ring(&mut backend, &SegmentKind::Box(Default::default()), 30.0,
//!     &RingOptions::new().with_count(32).with_hide_perimeter(true));
//! assert_eq!(ctx.current_radius(), 114.0);
//! ```
//!
//! See `demos/` for complete sketches rendered to png.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod geometry;
pub mod sdf;
pub mod quadtree;
pub mod packer;
pub mod mandala;
pub mod drawing;
