//! Canvas abstraction - the drawing API paths render into
//!
//! [`Canvas`] mirrors the small path subset of a NanoVG-style context. The
//! [`RecordingCanvas`] implementation records every call as a [`PaintCommand`],
//! which is what tests and the trace output inspect.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::path::Point;
use crate::transform::Transform2D;

/// Winding direction of a subpath
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winding {
    /// Counter-clockwise, filled
    #[default]
    Solid,
    /// Clockwise, cuts holes into solid subpaths
    Hole,
}

/// A path-drawing context
pub trait Canvas {
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn close_path(&mut self);
    fn path_winding(&mut self, winding: Winding);

    fn fill_color(&mut self, color: Color);
    fn stroke_color(&mut self, color: Color);
    fn stroke_width(&mut self, width: f32);

    fn fill(&mut self);
    fn stroke(&mut self);
}

/// A recorded canvas call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PaintCommand {
    BeginPath,
    MoveTo { point: Point },
    LineTo { point: Point },
    ClosePath,
    PathWinding { winding: Winding },
    FillColor { color: Color },
    StrokeColor { color: Color },
    StrokeWidth { width: f32 },
    Fill,
    Stroke,
}

/// A canvas that records commands instead of rasterizing them
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<PaintCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Take ownership of recorded commands
    pub fn take_commands(&mut self) -> Vec<PaintCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Just the geometry: move/line/close commands in order
    pub fn geometry(&self) -> Vec<PaintCommand> {
        self.commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    PaintCommand::MoveTo { .. }
                        | PaintCommand::LineTo { .. }
                        | PaintCommand::ClosePath
                )
            })
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Canvas for RecordingCanvas {
    fn begin_path(&mut self) {
        self.commands.push(PaintCommand::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(PaintCommand::MoveTo {
            point: Point::new(x, y),
        });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(PaintCommand::LineTo {
            point: Point::new(x, y),
        });
    }

    fn close_path(&mut self) {
        self.commands.push(PaintCommand::ClosePath);
    }

    fn path_winding(&mut self, winding: Winding) {
        self.commands.push(PaintCommand::PathWinding { winding });
    }

    fn fill_color(&mut self, color: Color) {
        self.commands.push(PaintCommand::FillColor { color });
    }

    fn stroke_color(&mut self, color: Color) {
        self.commands.push(PaintCommand::StrokeColor { color });
    }

    fn stroke_width(&mut self, width: f32) {
        self.commands.push(PaintCommand::StrokeWidth { width });
    }

    fn fill(&mut self) {
        self.commands.push(PaintCommand::Fill);
    }

    fn stroke(&mut self) {
        self.commands.push(PaintCommand::Stroke);
    }
}

/// Wraps a canvas and maps every point through a transform
pub struct TransformedCanvas<'a, C: Canvas + ?Sized> {
    inner: &'a mut C,
    transform: Transform2D,
}

impl<'a, C: Canvas + ?Sized> TransformedCanvas<'a, C> {
    pub fn new(inner: &'a mut C, transform: Transform2D) -> Self {
        Self { inner, transform }
    }
}

impl<C: Canvas + ?Sized> Canvas for TransformedCanvas<'_, C> {
    fn begin_path(&mut self) {
        self.inner.begin_path();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.transform.apply(Point::new(x, y));
        self.inner.move_to(p.x, p.y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.transform.apply(Point::new(x, y));
        self.inner.line_to(p.x, p.y);
    }

    fn close_path(&mut self) {
        self.inner.close_path();
    }

    fn path_winding(&mut self, winding: Winding) {
        self.inner.path_winding(winding);
    }

    fn fill_color(&mut self, color: Color) {
        self.inner.fill_color(color);
    }

    fn stroke_color(&mut self, color: Color) {
        self.inner.stroke_color(color);
    }

    fn stroke_width(&mut self, width: f32) {
        self.inner.stroke_width(width);
    }

    fn fill(&mut self) {
        self.inner.fill();
    }

    fn stroke(&mut self) {
        self.inner.stroke();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_call_order() {
        let mut canvas = RecordingCanvas::new();
        canvas.begin_path();
        canvas.move_to(1.0, 2.0);
        canvas.line_to(3.0, 4.0);
        canvas.close_path();
        canvas.stroke();

        assert_eq!(canvas.commands().len(), 5);
        assert_eq!(
            canvas.geometry(),
            vec![
                PaintCommand::MoveTo {
                    point: Point::new(1.0, 2.0)
                },
                PaintCommand::LineTo {
                    point: Point::new(3.0, 4.0)
                },
                PaintCommand::ClosePath,
            ]
        );

        let taken = canvas.take_commands();
        assert_eq!(taken.first(), Some(&PaintCommand::BeginPath));
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_commands_serialize_with_op_tag() {
        let json = serde_json::to_string(&PaintCommand::PathWinding {
            winding: Winding::Hole,
        })
        .unwrap();
        assert_eq!(json, r#"{"op":"path_winding","winding":"Hole"}"#);
    }

    #[test]
    fn test_transformed_canvas_maps_points() {
        let mut canvas = RecordingCanvas::new();
        {
            let mut moved = TransformedCanvas::new(&mut canvas, Transform2D::translate(10.0, -5.0));
            moved.begin_path();
            moved.move_to(1.0, 1.0);
            moved.line_to(2.0, 3.0);
            moved.stroke();
        }

        assert_eq!(
            canvas.commands(),
            &[
                PaintCommand::BeginPath,
                PaintCommand::MoveTo {
                    point: Point::new(11.0, -4.0)
                },
                PaintCommand::LineTo {
                    point: Point::new(12.0, -2.0)
                },
                PaintCommand::Stroke,
            ]
        );
    }
}
