use {
  super::*,
  crate::geometry::{P2, V2}
};

#[test] fn recorder_keeps_call_order() {
  let mut rec = Recorder::new();
  rec.push();
  rec.translate(V2::new(10.0, 0.0));
  rec.stroke(Color::gray(32));
  rec.no_fill();
  rec.circle(P2::new(1.0, 2.0), 6.0);
  rec.line(P2::origin(), P2::new(3.0, 4.0));
  rec.pop();

  assert_eq!(rec.commands, vec![
    DrawCommand::Push,
    DrawCommand::Translate(V2::new(10.0, 0.0)),
    DrawCommand::Stroke(Some(Color([32, 32, 32, 255]))),
    DrawCommand::Fill(None),
    DrawCommand::Circle { center: P2::new(1.0, 2.0), diameter: 6.0 },
    DrawCommand::Line(P2::origin(), P2::new(3.0, 4.0)),
    DrawCommand::Pop,
  ]);
  assert_eq!(rec.circles().count(), 1);
  assert_eq!(rec.lines().count(), 1);
  assert_eq!(rec.primitive_count(), 2);
}

#[test] fn polyline_modes() {
  let pts = [P2::new(0.0, 0.0), P2::new(1.0, 0.0), P2::new(1.0, 1.0)];

  let mut rec = Recorder::new();
  polyline(&mut rec, &pts[..2], false, false);
  assert_eq!(rec.commands, vec![DrawCommand::Line(pts[0], pts[1])]);

  let mut rec = Recorder::new();
  polyline(&mut rec, &pts, true, false);
  assert_eq!(rec.paths(), vec![(pts.to_vec(), true)]);

  // inside an open path only vertices are emitted
  let mut rec = Recorder::new();
  polyline(&mut rec, &pts, true, true);
  assert!(rec.commands.iter().all(|c| matches!(c, DrawCommand::Vertex(_))));
  assert_eq!(rec.commands.len(), 3);

  let mut rec = Recorder::new();
  polyline(&mut rec, &pts[..1], false, false);
  assert!(rec.commands.is_empty());
}

#[test] fn text_is_recorded() {
  let mut rec = Recorder::new();
  rec.text("om", P2::new(0.0, 5.0), 12.0);
  assert_eq!(rec.primitive_count(), 1);
  assert!(matches!(&rec.commands[0], DrawCommand::Text { text, .. } if text == "om"));
}
