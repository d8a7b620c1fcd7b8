//! Bounded spatial index over axis-aligned boxes.
//!
//! Nodes live in a flat arena and refer to their children by index. A node splits lazily, on
//! the insertion that pushes it over `max_objects`, and never rebalances afterwards: boxes that
//! straddle a quadrant seam stay at the node that saw them, so inserting many straddling boxes
//! degrades that node into a plain list. The circle packer relies on this exact behaviour.
//!
//! Queries return a *candidate superset*: every object whose stored box overlaps the query box.
//! Exact shape tests are up to the caller.

use {
  crate::{
    drawing::{self, Backend, Color},
    geometry::{P2, AABB}
  },
  std::fmt::{Debug, Formatter}
};


/// Default amount of objects a node holds before it splits.
pub const MAX_OBJECTS: usize = 2;

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// 4 sections of a node, y axis pointing down
pub enum Quadrant {
  NE = 0,
  SE = 1,
  SW = 2,
  NW = 3
}

impl Quadrant {
  pub const ALL: [Quadrant; 4] = [Quadrant::NE, Quadrant::SE, Quadrant::SW, Quadrant::NW];

  /// The part of `bounds` covered by this quadrant.
  pub fn rect(self, bounds: AABB) -> AABB {
    use Quadrant::*;
    let c = bounds.center();
    let (min, max) = (bounds.min, bounds.max);
    match self {
      NE => AABB::new(P2::new(c.x, min.y), P2::new(max.x, c.y)),
      SE => AABB::new(c, max),
      SW => AABB::new(P2::new(min.x, c.y), P2::new(c.x, max.y)),
      NW => AABB::new(min, c),
    }
  }
}

/// Half-open interval intersection, `a.x1 < b.x2 && a.x2 > b.x1 && a.y1 < b.y2 && a.y2 > b.y1`.
pub fn overlaps(a: &AABB, b: &AABB) -> bool {
  a.min.x < b.max.x && a.max.x > b.min.x &&
  a.min.y < b.max.y && a.max.y > b.min.y
}

/// `inner` lies entirely inside `outer`, edges included.
pub fn fits(inner: &AABB, outer: &AABB) -> bool {
  inner.min.x >= outer.min.x && inner.max.x <= outer.max.x &&
  inner.min.y >= outer.min.y && inner.max.y <= outer.max.y
}

#[derive(Clone)]
struct Node<T> {
  bounds: AABB,
  /// remaining splits below this node
  max_levels: u8,
  depth: u8,
  objects: Vec<(T, AABB)>,
  children: Option<[usize; 4]>
}

#[derive(Clone)]
pub struct QuadTree<T> {
  nodes: Vec<Node<T>>,
  max_objects: usize,
  debug: bool,
  len: usize
}

impl<T> QuadTree<T> {
  /// Empty tree covering `bounds`, able to split `max_levels` times.
  /// `debug` enables [`QuadTree::draw`].
  pub fn new(max_levels: u8, bounds: AABB, debug: bool) -> Self {
    QuadTree {
      nodes: vec![Node {
        bounds,
        max_levels,
        depth: 0,
        objects: vec![],
        children: None
      }],
      max_objects: MAX_OBJECTS,
      debug,
      len: 0
    }
  }

  /// Amount of objects a node may hold before it splits.
  pub fn with_max_objects(mut self, max_objects: usize) -> Self {
    self.max_objects = max_objects;
    self
  }

  pub fn bounds(&self) -> AABB {
    self.nodes[0].bounds
  }

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  /// Deepest level reached by a split, 0 for an unsplit tree.
  pub fn depth(&self) -> u8 {
    self.nodes.iter()
      .map(|node| node.depth)
      .max()
      .unwrap_or(0)
  }

  /// The single child of `node` that fully contains `bbox`, if there is exactly one.
  fn fitting_child(&self, node: usize, bbox: &AABB) -> Option<usize> {
    let children = self.nodes[node].children?;
    let mut fitting = children.iter()
      .filter(|&&child| fits(bbox, &self.nodes[child].bounds));
    match (fitting.next(), fitting.next()) {
      (Some(&child), None) => Some(child),
      _ => None
    }
  }

  pub fn insert(&mut self, object: T, bbox: AABB) {
    self.len += 1;
    self.insert_at(0, object, bbox);
  }

  fn insert_at(&mut self, mut node: usize, object: T, bbox: AABB) {
    while let Some(child) = self.fitting_child(node, &bbox) {
      node = child;
    }
    let target = &mut self.nodes[node];
    target.objects.push((object, bbox));
    if target.children.is_none()
      && target.objects.len() > self.max_objects
      && target.max_levels > 0 {
      self.split(node);
    }
  }

  fn split(&mut self, node: usize) {
    let Node { bounds, max_levels, depth, .. } = self.nodes[node];
    let first = self.nodes.len();
    self.nodes.extend(Quadrant::ALL.iter().map(|quad| Node {
      bounds: quad.rect(bounds),
      max_levels: max_levels - 1,
      depth: depth + 1,
      objects: vec![],
      children: None
    }));
    self.nodes[node].children = Some([first, first + 1, first + 2, first + 3]);

    let objects = std::mem::take(&mut self.nodes[node].objects);
    for (object, bbox) in objects {
      match self.fitting_child(node, &bbox) {
        Some(child) => self.insert_at(child, object, bbox),
        None => self.nodes[node].objects.push((object, bbox))
      }
    }
  }

  /// Every object whose stored box overlaps `query`.
  pub fn get_overlapping_objects(&self, query: &AABB) -> Vec<&T> {
    let mut result = vec![];
    self.query_at(0, query, &mut result);
    result
  }

  fn query_at<'a>(&'a self, node: usize, query: &AABB, result: &mut Vec<&'a T>) {
    let current = &self.nodes[node];
    result.extend(current.objects.iter()
      .filter(|(_, bbox)| overlaps(bbox, query))
      .map(|(object, _)| object));

    let children = match current.children {
      Some(children) => children,
      None => return
    };
    match self.fitting_child(node, query) {
      Some(child) => self.query_at(child, query, result),
      None => children.iter()
        .filter(|&&child| overlaps(&self.nodes[child].bounds, query))
        .for_each(|&child| self.query_at(child, query, result))
    }
  }

  /// Every stored object with its box, each exactly once, in no particular order.
  pub fn iter(&self) -> impl Iterator<Item = (&T, &AABB)> + '_ {
    self.nodes.iter()
      .flat_map(|node| node.objects.iter().map(|(object, bbox)| (object, bbox)))
  }

  /// Outline every node. Does nothing unless the tree was built with `debug`.
  pub fn draw(&self, backend: &mut dyn Backend) {
    if !self.debug {
      return;
    }
    backend.push();
    backend.no_fill();
    backend.stroke(Color([255, 0, 0, 96]));
    for node in &self.nodes {
      let b = node.bounds;
      let corners = [b.min, P2::new(b.max.x, b.min.y), b.max, P2::new(b.min.x, b.max.y)];
      drawing::polyline(backend, &corners, true, false);
    }
    backend.pop();
  }
}

impl<T> Debug for QuadTree<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    use humansize::{FileSize, file_size_opts as options};

    let size = self.nodes.capacity() * std::mem::size_of::<Node<T>>()
      + self.nodes.iter()
        .map(|node| node.objects.capacity() * std::mem::size_of::<(T, AABB)>())
        .sum::<usize>();
    f.debug_struct("QuadTree")
      .field("bounds", &self.bounds())
      .field("objects", &self.len)
      .field("total_nodes", &self.node_count())
      .field("max_depth", &self.depth())
      .field("size", &size.file_size(options::BINARY).unwrap_or_else(|e| e))
      .finish()
  }
}
