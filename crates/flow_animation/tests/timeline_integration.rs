//! Integration tests for timelines driving paths and transforms
//!
//! These tests verify that:
//! - A float property can draw a path on over time
//! - Transform animations only affect the frame being rendered
//! - Timeline order decides how animations on one property combine

use flow_animation::{shared, Animation, Easing, FloatProperty, Timeline, TransformAnimation};
use flow_paint::{
    PaintCommand, Path, Point, RecordingCanvas, Transform2D, TransformStack, TransformTarget,
    TransformedCanvas,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn square(side: f32) -> Path {
    let mut path = Path::new();
    path.move_to(0.0, 0.0)
        .line_to(side, 0.0)
        .unwrap()
        .line_to(side, side)
        .unwrap()
        .line_to(0.0, side)
        .unwrap()
        .close()
        .unwrap();
    path
}

fn float_property(cell: &Rc<Cell<f32>>, target: f32) -> FloatProperty {
    let get = cell.clone();
    let set = cell.clone();
    FloatProperty::new(move || get.get(), move |v| set.set(v)).target(target)
}

/// Test that a reveal property draws a closed square on side by side
#[test]
fn test_float_property_draws_path_on() {
    let path = square(10.0);
    let reveal = Rc::new(Cell::new(0.0f32));

    let mut timeline = Timeline::new();
    timeline.append(shared(
        Animation::new(float_property(&reveal, 1.0)).start(0.0).duration(1.0),
    ));

    let render = |time: f64| {
        let mut canvas = RecordingCanvas::new();
        timeline.frame(time, || path.draw(&mut canvas, 0.0, reveal.get()));
        canvas.geometry()
    };

    // A quarter of the way in covers exactly the first side
    assert_eq!(
        render(0.25),
        vec![
            PaintCommand::MoveTo {
                point: Point::new(0.0, 0.0)
            },
            PaintCommand::LineTo {
                point: Point::new(10.0, 0.0)
            },
        ]
    );

    // Finished: the full closed outline
    let done = render(2.0);
    assert_eq!(done.last(), Some(&PaintCommand::ClosePath));
    assert_eq!(done.len(), 6);

    // The property is only animated while a frame renders
    assert_eq!(reveal.get(), 0.0);
}

/// Test that transform frames are pushed for rendering and popped afterwards
#[test]
fn test_transform_animation_per_frame() {
    let path = square(10.0);
    let node = Rc::new(RefCell::new(TransformStack::new(Transform2D::translate(100.0, 0.0))));

    let mut timeline = Timeline::new();
    timeline.append(shared(
        Animation::new(TransformAnimation::translate(node.clone(), 0.0, 50.0))
            .start(1.0)
            .duration(2.0)
            .easing(Easing::Linear),
    ));

    let first_point = |time: f64| {
        let mut canvas = RecordingCanvas::new();
        timeline.frame(time, || {
            let transform = node.borrow().transform();
            path.draw(&mut TransformedCanvas::new(&mut canvas, transform), 0.0, 1.0);
        });
        match canvas.geometry().first() {
            Some(PaintCommand::MoveTo { point }) => *point,
            other => panic!("unexpected first command {:?}", other),
        }
    };

    assert_eq!(first_point(0.0), Point::new(100.0, 0.0));
    assert_eq!(first_point(2.0), Point::new(100.0, 25.0));
    assert_eq!(first_point(9.0), Point::new(100.0, 50.0));

    assert_eq!(node.borrow().depth(), 0);
    assert_eq!(node.borrow().transform(), Transform2D::translate(100.0, 0.0));
}

/// Test that reordering animations on one property changes the result
#[test]
fn test_timeline_order_decides_composition() {
    let value = Rc::new(Cell::new(0.0f32));
    let towards_ten = shared(
        Animation::new(float_property(&value, 10.0)).start(0.0).duration(1.0),
    );
    let towards_twenty = shared(
        Animation::new(float_property(&value, 20.0)).start(0.0).duration(1.0),
    );

    let mut timeline = Timeline::new();
    timeline.append(towards_ten.clone());
    timeline.append(towards_twenty.clone());

    let during = timeline.frame(0.5, || value.get());
    assert_eq!(during, 12.5);
    // Cleanup runs in list order, so the second animation restores last
    assert_eq!(value.get(), 5.0);
    value.set(0.0);

    assert!(timeline.insert_before(&towards_ten, towards_twenty.clone()));
    assert_eq!(timeline.index_of(&towards_twenty), Some(0));

    let during = timeline.frame(0.5, || value.get());
    assert_eq!(during, 10.0);
    value.set(0.0);

    // Removed animations no longer run
    assert!(timeline.remove(&towards_twenty));
    let during = timeline.frame(0.5, || value.get());
    assert_eq!(during, 5.0);
    assert_eq!(value.get(), 0.0);
}
