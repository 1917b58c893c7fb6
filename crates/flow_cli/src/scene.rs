//! Demo scene
//!
//! A handful of shapes, each with its own transform stack and animatable fill
//! and reveal properties, plus the timeline that animates them.

use std::cell::{Cell, RefCell};
use std::f32::consts::PI;
use std::rc::Rc;

use anyhow::Result;
use flow_animation::{
    shared, Animation, ColorProperty, Direction, Easing, FloatProperty, TransformAnimation, Timeline,
    REPEAT_INFINITE,
};
use flow_paint::{
    Canvas, Color, Path, PathStyle, Transform2D, TransformStack, TransformTarget, TransformedCanvas,
};
use slotmap::{new_key_type, SlotMap};

use crate::config::PathConfig;

new_key_type! {
    pub struct ShapeId;
}

/// Cubic bezier handle length for quarter circles
const KAPPA: f32 = 0.552_284_8;

/// A path placed in the scene
pub struct Shape {
    pub path: Path,
    pub node: Rc<RefCell<TransformStack>>,
    /// Fill color as packed ARGB
    pub fill: Rc<Cell<u32>>,
    /// Fraction of each subpath drawn, from its start
    pub reveal: Rc<Cell<f32>>,
}

impl Shape {
    pub fn new(path: Path, base: Transform2D) -> Self {
        let fill = path.style.fill.to_argb();
        Self {
            path,
            node: Rc::new(RefCell::new(TransformStack::new(base))),
            fill: Rc::new(Cell::new(fill)),
            reveal: Rc::new(Cell::new(1.0)),
        }
    }

    pub fn render<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
        self.path.style.fill = Color::from_argb(self.fill.get());
        let transform = self.node.borrow().transform();
        let mut canvas = TransformedCanvas::new(canvas, transform);
        self.path.draw(&mut canvas, 0.0, self.reveal.get());
    }

    /// Animation of this shape's fill towards `argb`
    pub fn fill_to(&self, argb: u32) -> ColorProperty {
        let get = self.fill.clone();
        let set = self.fill.clone();
        ColorProperty::new(move || get.get(), move |v| set.set(v)).target(argb)
    }

    /// Animation of this shape's reveal fraction towards `fraction`
    pub fn reveal_to(&self, fraction: f32) -> FloatProperty {
        let get = self.reveal.clone();
        let set = self.reveal.clone();
        FloatProperty::new(move || get.get(), move |v| set.set(v)).target(fraction)
    }

    pub fn transform_target(&self) -> Rc<RefCell<dyn TransformTarget>> {
        self.node.clone()
    }
}

/// Shapes in paint order
#[derive(Default)]
pub struct Scene {
    shapes: SlotMap<ShapeId, Shape>,
    order: Vec<ShapeId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape on top of the others
    pub fn add(&mut self, shape: Shape) -> ShapeId {
        let id = self.shapes.insert(shape);
        self.order.push(id);
        id
    }

    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        self.order.retain(|o| *o != id);
        self.shapes.remove(id)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Paint every shape, bottom to top
    pub fn render<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
        for id in &self.order {
            if let Some(shape) = self.shapes.get_mut(*id) {
                shape.render(canvas);
            }
        }
    }
}

fn rounded_rect(w: f32, h: f32, r: f32, seg: u32, style: PathStyle) -> Result<Path> {
    let (x0, y0, x1, y1) = (-w / 2.0, -h / 2.0, w / 2.0, h / 2.0);
    let mut path = Path::with_style(style);
    path.move_to(x0 + r, y0)
        .arc_to(x1, y0, x1, y1, r, seg)?
        .arc_to(x1, y1, x0, y1, r, seg)?
        .arc_to(x0, y1, x0, y0, r, seg)?
        .arc_to(x0, y0, x1, y0, r, seg)?
        .close()?;
    Ok(path)
}

fn circle(r: f32, seg: u32, style: PathStyle) -> Result<Path> {
    let k = KAPPA * r;
    let mut path = Path::with_style(style);
    path.move_to(r, 0.0)
        .curve_to(r, k, k, r, 0.0, r, seg)?
        .curve_to(-k, r, -r, k, -r, 0.0, seg)?
        .curve_to(-r, -k, -k, -r, 0.0, -r, seg)?
        .curve_to(k, -r, r, -k, r, 0.0, seg)?
        .close()?;
    Ok(path)
}

fn wave(width: f32, amplitude: f32, waves: u32, seg: u32, style: PathStyle) -> Result<Path> {
    let step = width / (waves * 2) as f32;
    let mut path = Path::with_style(style);
    path.move_to(-width / 2.0, 0.0);
    for i in 0..waves * 2 {
        let x = -width / 2.0 + step * i as f32;
        let peak = if i % 2 == 0 { -amplitude } else { amplitude };
        path.quad_to(x + step / 2.0, peak * 2.0, x + step, 0.0, seg)?;
    }
    Ok(path)
}

/// Build the demo scene and the timeline animating it
pub fn demo(config: &PathConfig) -> Result<(Scene, Timeline)> {
    let seg = config.segmentation;
    let mut scene = Scene::new();
    let mut timeline = Timeline::new();

    let card = Shape::new(
        rounded_rect(
            160.0,
            100.0,
            config.corner_radius,
            seg,
            PathStyle {
                fill: Color::from_argb(0xFF34_77EB),
                stroke: Color::WHITE,
                stroke_width: 2.0,
            },
        )?,
        Transform2D::translate(240.0, 270.0),
    );
    timeline.append(shared(
        Animation::new(TransformAnimation::translate(card.transform_target(), 480.0, 0.0))
            .start(0.0)
            .duration(1.5)
            .easing(Easing::EASE_IN_OUT),
    ));
    timeline.append(shared(
        Animation::new(card.fill_to(0xFFEB_3477)).start(1.5).duration(1.0),
    ));

    let ball = Shape::new(
        circle(
            40.0,
            seg,
            PathStyle {
                fill: Color::from_argb(0xFFF5_B700),
                stroke: Color::TRANSPARENT,
                stroke_width: 0.0,
            },
        )?,
        Transform2D::translate(960.0, 270.0),
    );
    timeline.append(shared(
        Animation::new(TransformAnimation::scale(ball.transform_target(), 1.5, 1.5))
            .start(0.5)
            .duration(1.0)
            .direction(Direction::ForwardBackward)
            .repeat(REPEAT_INFINITE)
            .easing(Easing::SineInOut),
    ));
    timeline.append(shared(
        Animation::new(TransformAnimation::rotate(card.transform_target(), PI / 2.0))
            .start(1.0)
            .duration(1.0)
            .easing(Easing::QuadOut),
    ));

    let line = Shape::new(
        wave(
            800.0,
            40.0,
            3,
            seg,
            PathStyle {
                fill: Color::TRANSPARENT,
                stroke: Color::from_argb(0xFF22_2222),
                stroke_width: 4.0,
            },
        )?,
        Transform2D::translate(640.0, 480.0),
    );
    line.reveal.set(0.0);
    timeline.append(shared(
        Animation::new(line.reveal_to(1.0)).start(0.25).duration(2.75).easing(Easing::EASE),
    ));

    scene.add(card);
    scene.add(ball);
    scene.add(line);

    tracing::debug!(
        shapes = scene.len(),
        animations = timeline.animation_count(),
        "demo scene built"
    );
    Ok((scene, timeline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_paint::{PaintCommand, RecordingCanvas};

    fn move_count(canvas: &RecordingCanvas) -> usize {
        canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, PaintCommand::MoveTo { .. }))
            .count()
    }

    #[test]
    fn test_scene_keeps_paint_order() {
        let mut scene = Scene::new();
        let style = PathStyle::default();
        let a = scene.add(Shape::new(circle(1.0, 4, style).unwrap(), Transform2D::identity()));
        let b = scene.add(Shape::new(circle(2.0, 4, style).unwrap(), Transform2D::identity()));
        assert_eq!(scene.len(), 2);

        assert!(scene.remove(a).is_some());
        assert!(scene.remove(a).is_none());
        assert!(scene.get(b).is_some());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_shape_renders_through_its_transform() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0).line_to(1.0, 0.0).unwrap();
        let mut shape = Shape::new(path, Transform2D::translate(5.0, 5.0));

        let mut canvas = RecordingCanvas::new();
        shape.render(&mut canvas);

        assert_eq!(
            canvas.geometry().first(),
            Some(&PaintCommand::MoveTo {
                point: flow_paint::Point::new(5.0, 5.0)
            })
        );
    }

    #[test]
    fn test_demo_draws_on_the_wave() {
        let (mut scene, timeline) = demo(&PathConfig::default()).unwrap();
        assert_eq!(scene.len(), 3);
        assert_eq!(timeline.animation_count(), 5);

        let mut start = RecordingCanvas::new();
        timeline.frame(0.0, || scene.render(&mut start));
        // The wave is hidden until its draw-on starts
        assert_eq!(move_count(&start), 2);

        let mut end = RecordingCanvas::new();
        timeline.frame(3.5, || scene.render(&mut end));
        assert_eq!(move_count(&end), 3);
    }

    #[test]
    fn test_demo_frames_leave_no_state_behind() {
        let (mut scene, timeline) = demo(&PathConfig::default()).unwrap();
        let first = {
            let mut canvas = RecordingCanvas::new();
            timeline.frame(0.0, || scene.render(&mut canvas));
            canvas.take_commands()
        };

        // Render a later frame, then the first one again
        timeline.frame(2.0, || scene.render(&mut RecordingCanvas::new()));
        let mut again = RecordingCanvas::new();
        timeline.frame(0.0, || scene.render(&mut again));

        assert_eq!(again.commands(), first.as_slice());
    }
}
