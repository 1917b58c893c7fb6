//! Flattened paths with arc-length partial drawing
//!
//! A [`Path`] is a list of subpaths, each a polyline with a closed flag. Curves
//! and arcs are flattened into line segments as they are added, so the path
//! never stores curves. This makes it cheap to measure: [`Path::draw`] can render
//! any fraction `[start, end]` of each subpath's length, which is what
//! "draw-on" and handwriting effects are built from.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::canvas::{Canvas, Winding};
use crate::color::Color;
use crate::error::{PathError, Result};

/// A 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn lerp(&self, other: Point, t: f32) -> Point {
        Point::new(lerp(self.x, other.x, t), lerp(self.y, other.y, t))
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn unlerp(a: f32, b: f32, v: f32) -> f32 {
    (v - a) / (b - a)
}

#[inline]
fn quad_bezier(a: f32, c: f32, b: f32, t: f32) -> f32 {
    lerp(lerp(a, c, t), lerp(c, b, t), t)
}

#[inline]
fn cubic_bezier(a: f32, c1: f32, c2: f32, b: f32, t: f32) -> f32 {
    quad_bezier(lerp(a, c1, t), lerp(c1, c2, t), lerp(c2, b, t), t)
}

/// Fill and stroke settings used by [`Path::draw`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            fill: Color::TRANSPARENT,
            stroke: Color::BLACK,
            stroke_width: 1.0,
        }
    }
}

impl PathStyle {
    fn has_fill(&self) -> bool {
        self.fill.is_visible()
    }

    /// Needs both a width and a visible color; either one alone strokes nothing
    fn has_stroke(&self) -> bool {
        self.stroke_width > 0.0 && self.stroke.is_visible()
    }
}

/// One continuous polyline of a [`Path`]
#[derive(Clone, Debug, PartialEq)]
pub struct Subpath {
    points: Vec<Point>,
    closed: bool,
}

impl Subpath {
    fn new(start: Point) -> Self {
        Self {
            points: vec![start],
            closed: false,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn last(&self) -> Point {
        // A subpath is created with its starting point and never shrinks
        self.points[self.points.len() - 1]
    }

    /// Consecutive point pairs, plus the closing segment when closed
    fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let closing = if self.closed && self.points.len() > 1 {
            Some((self.last(), self.points[0]))
        } else {
            None
        };
        self.points
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .chain(closing)
    }

    /// Total length, including the closing segment when closed
    pub fn length(&self) -> f32 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }

    /// Emit the `[start, end]` fraction of this subpath. Returns whether
    /// anything was emitted.
    fn trace<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        start: f32,
        end: f32,
        close_previous: bool,
    ) -> bool {
        if self.points.len() < 2 {
            return false;
        }

        let len = self.length();
        let fstart = start * len;
        let fend = end * len;

        let mut clen = 0.0;
        let mut began = false;

        for (from, to) in self.segments() {
            let dist = from.distance(to);

            if dist > 0.0 {
                let nlen = clen + dist;
                let s = unlerp(clen, nlen, fstart).clamp(0.0, 1.0);
                let e = unlerp(clen, nlen, fend).clamp(0.0, 1.0);

                if s != e {
                    if !began {
                        if close_previous {
                            canvas.close_path();
                        }
                        let p = from.lerp(to, s);
                        canvas.move_to(p.x, p.y);
                        canvas.path_winding(Winding::Hole);
                        began = true;
                    }
                    if e > 0.0 {
                        let p = from.lerp(to, e);
                        canvas.line_to(p.x, p.y);
                    }
                }
            }

            clen += dist;
        }

        began
    }
}

/// A renderable, measurable path made of flattened subpaths
#[derive(Clone, Debug, Default)]
pub struct Path {
    /// Fill and stroke used by [`Path::draw`]
    pub style: PathStyle,
    subpaths: SmallVec<[Subpath; 4]>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: PathStyle) -> Self {
        Self {
            style,
            subpaths: SmallVec::new(),
        }
    }

    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// Remove all subpaths
    pub fn clear(&mut self) {
        self.subpaths.clear();
    }

    fn open_subpath(&mut self) -> Result<&mut Subpath> {
        let subpath = self.subpaths.last_mut().ok_or(PathError::NoSubpath)?;
        if subpath.closed {
            return Err(PathError::SubpathClosed);
        }
        Ok(subpath)
    }

    /// Start a new subpath at the given point
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.subpaths.push(Subpath::new(Point::new(x, y)));
        self
    }

    /// Straight line from the current endpoint
    pub fn line_to(&mut self, x: f32, y: f32) -> Result<&mut Self> {
        self.open_subpath()?.points.push(Point::new(x, y));
        Ok(self)
    }

    /// Quadratic bezier, flattened into `segmentation` lines
    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32, segmentation: u32) -> Result<&mut Self> {
        let subpath = self.open_subpath()?;
        let start = subpath.last();

        for i in 1..=segmentation {
            let t = i as f32 / segmentation as f32;
            subpath.points.push(Point::new(
                quad_bezier(start.x, cx, x, t),
                quad_bezier(start.y, cy, y, t),
            ));
        }
        subpath.points.push(Point::new(x, y));
        Ok(self)
    }

    /// Cubic bezier, flattened into `segmentation` lines
    #[allow(clippy::too_many_arguments)]
    pub fn curve_to(
        &mut self,
        c1x: f32,
        c1y: f32,
        c2x: f32,
        c2y: f32,
        x: f32,
        y: f32,
        segmentation: u32,
    ) -> Result<&mut Self> {
        let subpath = self.open_subpath()?;
        let start = subpath.last();

        for i in 1..=segmentation {
            let t = i as f32 / segmentation as f32;
            subpath.points.push(Point::new(
                cubic_bezier(start.x, c1x, c2x, x, t),
                cubic_bezier(start.y, c1y, c2y, y, t),
            ));
        }
        subpath.points.push(Point::new(x, y));
        Ok(self)
    }

    /// Line towards the corner `(cx, cy)`, rounded with radius `r` so that the
    /// path turns towards `(ex, ey)`.
    ///
    /// The path ends where the arc ends, on the leg towards `(ex, ey)`; add a
    /// `line_to(ex, ey)` to reach the target itself. Corners that cannot be
    /// filleted (zero-length or collinear legs) become a plain line to the
    /// corner.
    pub fn arc_to(
        &mut self,
        cx: f32,
        cy: f32,
        ex: f32,
        ey: f32,
        r: f32,
        segmentation: u32,
    ) -> Result<&mut Self> {
        let subpath = self.open_subpath()?;
        let start = subpath.last();

        // m = S - C, n = E - C
        let (mx, my) = (start.x - cx, start.y - cy);
        let (nx, ny) = (ex - cx, ey - cy);
        let ml = (mx * mx + my * my).sqrt();
        let nl = (nx * nx + ny * ny).sqrt();

        if ml == 0.0 || nl == 0.0 {
            tracing::debug!(cx, cy, ex, ey, "arc_to with a zero-length leg, drawing a line");
            subpath.points.push(Point::new(cx, cy));
            return Ok(self);
        }

        let (ux, uy) = (mx / ml, my / ml);
        let (vx, vy) = (nx / nl, ny / nl);

        let cross = ux * vy - uy * vx;
        let dot = (ux * vx + uy * vy).clamp(-1.0, 1.0);

        if cross == 0.0 {
            tracing::debug!(cx, cy, ex, ey, "arc_to with collinear legs, drawing a line");
            subpath.points.push(Point::new(cx, cy));
            return Ok(self);
        }

        let angle = dot.acos();
        // cot(angle / 2)
        let cot = (1.0 + dot) / cross.abs();
        let sign = cross.signum();

        // Tangent point on the incoming leg, and the circle center beside it
        let spx = ux * cot * r + cx;
        let spy = uy * cot * r + cy;
        let ccx = spx - uy * sign * r;
        let ccy = spy + ux * sign * r;

        let sweep = (std::f32::consts::PI - angle) * -sign;
        let (ix, iy) = (spx - ccx, spy - ccy);

        subpath.points.push(Point::new(spx, spy));
        for i in 1..=segmentation {
            let t = i as f32 / segmentation as f32 * sweep;
            let (sin, cos) = t.sin_cos();
            subpath.points.push(Point::new(
                cos * ix - sin * iy + ccx,
                sin * ix + cos * iy + ccy,
            ));
        }
        Ok(self)
    }

    /// Close the current subpath
    pub fn close(&mut self) -> Result<&mut Self> {
        self.open_subpath()?.closed = true;
        Ok(self)
    }

    /// Emit the geometry of the `[start, end]` fraction of every subpath.
    ///
    /// Each subpath is measured on its own: `start` and `end` are fractions of
    /// that subpath's length, not of the whole path. A closed subpath is only
    /// emitted closed when it is drawn over the full `[0, 1]` range.
    pub fn trace<C: Canvas + ?Sized>(&self, canvas: &mut C, start: f32, end: f32) {
        let full = start <= 0.0 && end >= 1.0;
        let mut close_pending = false;

        for subpath in &self.subpaths {
            if subpath.trace(canvas, start, end, close_pending) {
                close_pending = subpath.closed && full;
            }
        }
        if close_pending {
            canvas.close_path();
        }
    }

    /// Fill and stroke the `[start, end]` fraction of this path with its style.
    ///
    /// Closed subpaths only get a `close_path` when the whole path is drawn,
    /// i.e. `start <= 0` and `end >= 1`. A partial draw leaves them open, so a
    /// draw-on stroke never jumps back to its starting point.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, start: f32, end: f32) {
        if self.subpaths.is_empty() {
            return;
        }

        let has_fill = self.style.has_fill();
        let has_stroke = self.style.has_stroke();
        if !has_fill && !has_stroke {
            return;
        }

        canvas.stroke_color(self.style.stroke);
        canvas.fill_color(self.style.fill);
        canvas.stroke_width(self.style.stroke_width);

        canvas.begin_path();
        self.trace(canvas, start, end);

        if has_fill {
            canvas.fill();
        }
        if has_stroke {
            canvas.stroke();
        }
    }
}
