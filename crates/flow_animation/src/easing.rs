//! Easing functions for animations
//!
//! An easing reshapes linear animation progress into eased progress. Inputs are
//! normally in `0.0..=1.0`, but values outside that range are accepted and
//! extrapolated where the curve allows it.

use std::fmt;
use std::sync::Arc;

/// Easing function type
#[derive(Clone, Default)]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    QuintIn,
    QuintOut,
    QuintInOut,
    SineIn,
    SineOut,
    SineInOut,
    /// 1D cubic bezier from 0 to 1 through the two control values
    CubicBezier1D(f64, f64),
    /// CSS `cubic-bezier(x1, y1, x2, y2)`; X control points are clamped to 0..=1
    CubicBezier(f64, f64, f64, f64),
    /// `t -> 1 - inner(1 - t)`: turns an in-easing into an out-easing and back
    Flip(Arc<Easing>),
    /// Mirrors an in (or out) easing into an in-out (or out-in) easing
    InOut(Arc<Easing>),
    /// Any user-provided curve
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl Easing {
    /// CSS `ease`
    pub const EASE: Easing = Easing::CubicBezier(0.25, 0.1, 0.25, 1.0);
    /// CSS `ease-in`
    pub const EASE_IN: Easing = Easing::CubicBezier(0.42, 0.0, 1.0, 1.0);
    /// CSS `ease-out`
    pub const EASE_OUT: Easing = Easing::CubicBezier(0.0, 0.0, 0.58, 1.0);
    /// CSS `ease-in-out`
    pub const EASE_IN_OUT: Easing = Easing::CubicBezier(0.42, 0.0, 0.58, 1.0);

    /// CSS-style cubic bezier easing. Use <https://cubic-bezier.com/> to design
    /// a curve and pass its four numbers here.
    pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Easing::CubicBezier(x1.clamp(0.0, 1.0), y1, x2.clamp(0.0, 1.0), y2)
    }

    pub fn cubic_bezier_1d(c1: f64, c2: f64) -> Self {
        Easing::CubicBezier1D(c1, c2)
    }

    pub fn custom(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Easing::Custom(Arc::new(f))
    }

    pub fn flip(self) -> Self {
        Easing::Flip(Arc::new(self))
    }

    pub fn to_in_out(self) -> Self {
        Easing::InOut(Arc::new(self))
    }

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn ease(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t.powi(2),
            Easing::QuadOut => 1.0 - (1.0 - t).powi(2),
            Easing::QuadInOut => in_out(t, |t| t.powi(2)),
            Easing::CubicIn => t.powi(3),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => in_out(t, |t| t.powi(3)),
            Easing::QuartIn => t.powi(4),
            Easing::QuartOut => 1.0 - (1.0 - t).powi(4),
            Easing::QuartInOut => in_out(t, |t| t.powi(4)),
            Easing::QuintIn => t.powi(5),
            Easing::QuintOut => 1.0 - (1.0 - t).powi(5),
            Easing::QuintInOut => in_out(t, |t| t.powi(5)),
            Easing::SineIn => 1.0 - (t * std::f64::consts::FRAC_PI_2).cos(),
            Easing::SineOut => (t * std::f64::consts::FRAC_PI_2).sin(),
            Easing::SineInOut => (1.0 - (t * std::f64::consts::PI).cos()) / 2.0,
            Easing::CubicBezier1D(c1, c2) => cubic(0.0, *c1, *c2, 1.0, t),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
            Easing::Flip(inner) => 1.0 - inner.ease(1.0 - t),
            Easing::InOut(inner) => in_out(t, |t| inner.ease(t)),
            Easing::Custom(f) => f(t),
        }
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => f.write_str("Linear"),
            Easing::QuadIn => f.write_str("QuadIn"),
            Easing::QuadOut => f.write_str("QuadOut"),
            Easing::QuadInOut => f.write_str("QuadInOut"),
            Easing::CubicIn => f.write_str("CubicIn"),
            Easing::CubicOut => f.write_str("CubicOut"),
            Easing::CubicInOut => f.write_str("CubicInOut"),
            Easing::QuartIn => f.write_str("QuartIn"),
            Easing::QuartOut => f.write_str("QuartOut"),
            Easing::QuartInOut => f.write_str("QuartInOut"),
            Easing::QuintIn => f.write_str("QuintIn"),
            Easing::QuintOut => f.write_str("QuintOut"),
            Easing::QuintInOut => f.write_str("QuintInOut"),
            Easing::SineIn => f.write_str("SineIn"),
            Easing::SineOut => f.write_str("SineOut"),
            Easing::SineInOut => f.write_str("SineInOut"),
            Easing::CubicBezier1D(c1, c2) => f.debug_tuple("CubicBezier1D").field(c1).field(c2).finish(),
            Easing::CubicBezier(x1, y1, x2, y2) => f
                .debug_tuple("CubicBezier")
                .field(x1)
                .field(y1)
                .field(x2)
                .field(y2)
                .finish(),
            Easing::Flip(inner) => f.debug_tuple("Flip").field(inner).finish(),
            Easing::InOut(inner) => f.debug_tuple("InOut").field(inner).finish(),
            Easing::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// First half `ease_in(2t) / 2`, second half mirrored
#[inline]
fn in_out(t: f64, ease_in: impl Fn(f64) -> f64) -> f64 {
    if t < 0.5 {
        ease_in(t * 2.0) / 2.0
    } else {
        1.0 - ease_in((1.0 - t) * 2.0) / 2.0
    }
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Quadratic bezier from `a` to `b` with control `c`
#[inline]
pub fn quad(a: f64, c: f64, b: f64, t: f64) -> f64 {
    lerp(lerp(a, c, t), lerp(c, b, t), t)
}

/// Cubic bezier from `a` to `b` with controls `c1`, `c2` (de Casteljau)
#[inline]
pub fn cubic(a: f64, c1: f64, c2: f64, b: f64, t: f64) -> f64 {
    quad(lerp(a, c1, t), lerp(c1, c2, t), lerp(c2, b, t), t)
}

/// CSS cubic bezier: find `u` with `Bx(u) == t`, then return `By(u)`.
fn cubic_bezier_ease(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let x1 = x1.clamp(0.0, 1.0);
    let x2 = x2.clamp(0.0, 1.0);
    let t = t.clamp(0.0, 1.0);

    let u = first_root(-t, x1 - t, x2 - t, 1.0 - t).unwrap_or_else(|| {
        tracing::trace!(t, x1, x2, "no cubic root in range, bisecting");
        bisect(t, x1, x2)
    });
    cubic(0.0, y1, y2, 1.0, u)
}

/// Bisection on the X polynomial. Clamped X controls make it non-decreasing,
/// so this always converges.
fn bisect(t: f64, x1: f64, x2: f64) -> f64 {
    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    for _ in 0..64 {
        let mid = (lo + hi) * 0.5;
        if cubic(0.0, x1, x2, 1.0, mid) < t {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo + hi) * 0.5
}

const ROOT_TOLERANCE: f64 = 1e-9;
const COEFF_EPSILON: f64 = 1e-12;

fn accept(u: f64) -> Option<f64> {
    (-ROOT_TOLERANCE..=1.0 + ROOT_TOLERANCE)
        .contains(&u)
        .then(|| u.clamp(0.0, 1.0))
}

/// First root in `0..=1` of the cubic bezier with control values
/// `pa, pb, pc, pd` (Cardano's method).
///
/// Falls back to the quadratic and linear solutions when the leading
/// coefficients vanish. Returns `None` when no root lies in range.
pub fn first_root(pa: f64, pb: f64, pc: f64, pd: f64) -> Option<f64> {
    // Power basis: d*u^3 + a*u^2 + b*u + c
    let mut a = 3.0 * pa - 6.0 * pb + 3.0 * pc;
    let mut b = -3.0 * pa + 3.0 * pb;
    let mut c = pa;
    let d = -pa + 3.0 * pb - 3.0 * pc + pd;

    if d.abs() < COEFF_EPSILON {
        if a.abs() < COEFF_EPSILON {
            if b.abs() < COEFF_EPSILON {
                return None;
            }
            return accept(-c / b);
        }

        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }
        let q = disc.sqrt();
        let a2 = 2.0 * a;
        return accept((q - b) / a2).or_else(|| accept((-b - q) / a2));
    }

    a /= d;
    b /= d;
    c /= d;

    let p = (3.0 * b - a * a) / 3.0;
    let p3 = p / 3.0;
    let q = (2.0 * a * a * a - 9.0 * a * b + 27.0 * c) / 27.0;
    let q2 = q / 2.0;
    let discriminant = q2 * q2 + p3 * p3 * p3;

    if discriminant < 0.0 {
        // Three real roots
        let mp3 = -p3;
        let r = (mp3 * mp3 * mp3).sqrt();
        let cosphi = (-q / (2.0 * r)).clamp(-1.0, 1.0);
        let phi = cosphi.acos();
        let t1 = 2.0 * r.cbrt();
        let tau = std::f64::consts::TAU;

        return accept(t1 * (phi / 3.0).cos() - a / 3.0)
            .or_else(|| accept(t1 * ((phi + tau) / 3.0).cos() - a / 3.0))
            .or_else(|| accept(t1 * ((phi + 2.0 * tau) / 3.0).cos() - a / 3.0));
    }

    if discriminant == 0.0 {
        // A single and a double root
        let u1 = if q2 < 0.0 { (-q2).cbrt() } else { -q2.cbrt() };
        return accept(2.0 * u1 - a / 3.0).or_else(|| accept(-u1 - a / 3.0));
    }

    // One real root
    let sd = discriminant.sqrt();
    let u1 = (sd - q2).cbrt();
    let v1 = (sd + q2).cbrt();
    accept(u1 - v1 - a / 3.0)
}
