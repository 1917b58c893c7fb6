//! 2D transforms and the owner-keyed transform stack
//!
//! Transform animations push a frame onto a node's [`TransformStack`] during the
//! apply pass and pop it again during the cleanup pass. Frames are keyed by a
//! [`FrameOwner`] so that a pop always removes the frame its owner pushed, even
//! when other owners pushed on top of it in the meantime.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::path::Point;

/// 2D affine transform
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: x,
            f: y,
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            a: sx,
            b: 0.0,
            c: 0.0,
            d: sy,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn rotate(angle: f32) -> Self {
        let cos = angle.cos();
        let sin = angle.sin();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// `self * other`: `other` is applied first, in the local space of `self`
    pub fn then(&self, other: &Transform2D) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.c * point.y + self.e,
            self.b * point.x + self.d * point.y + self.f,
        )
    }
}

/// Identity of whoever pushed a transform frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameOwner(u64);

impl FrameOwner {
    /// Allocate a fresh, process-unique owner key
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        FrameOwner(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Push/get/set/pop access to a node's local transform
pub trait TransformTarget {
    /// Push (or replace) the frame owned by `owner`
    fn push_transform(&mut self, owner: FrameOwner, transform: Transform2D);

    /// Remove the frame owned by `owner`. Returns false if it had none.
    fn pop_transform(&mut self, owner: FrameOwner) -> bool;

    /// The effective transform: the base with every pushed frame applied
    fn transform(&self) -> Transform2D;

    /// Replace the base transform, leaving pushed frames in place
    fn set_transform(&mut self, transform: Transform2D);
}

/// A base transform plus an ordered list of owner-keyed frames
#[derive(Clone, Debug, Default)]
pub struct TransformStack {
    base: Transform2D,
    frames: SmallVec<[(FrameOwner, Transform2D); 4]>,
}

impl TransformStack {
    pub fn new(base: Transform2D) -> Self {
        Self {
            base,
            frames: SmallVec::new(),
        }
    }

    pub fn base(&self) -> Transform2D {
        self.base
    }

    /// Number of frames currently pushed
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_pushed(&self, owner: FrameOwner) -> bool {
        self.frames.iter().any(|(o, _)| *o == owner)
    }
}

impl TransformTarget for TransformStack {
    fn push_transform(&mut self, owner: FrameOwner, transform: Transform2D) {
        // Applying twice in a frame keeps the original stacking position
        if let Some(frame) = self.frames.iter_mut().find(|(o, _)| *o == owner) {
            frame.1 = transform;
        } else {
            self.frames.push((owner, transform));
        }
    }

    fn pop_transform(&mut self, owner: FrameOwner) -> bool {
        match self.frames.iter().rposition(|(o, _)| *o == owner) {
            Some(index) => {
                self.frames.remove(index);
                true
            }
            None => {
                tracing::trace!(?owner, "pop_transform without a matching frame");
                false
            }
        }
    }

    fn transform(&self) -> Transform2D {
        self.frames
            .iter()
            .fold(self.base, |acc, (_, frame)| acc.then(frame))
    }

    fn set_transform(&mut self, transform: Transform2D) {
        self.base = transform;
    }
}
