//! Transform animations
//!
//! A [`TransformAnimation`] pushes a frame onto a node's transform stack while a
//! frame is rendered and pops it afterwards. Frames are keyed by the
//! animation's [`FrameOwner`], so overlapping animations on one node can be
//! cleaned up in any order.

use std::cell::RefCell;
use std::rc::Rc;

use flow_paint::transform::{FrameOwner, Transform2D, TransformTarget};

use crate::animation::Animate;

/// The transform a [`TransformAnimation`] moves towards
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Offset by `(x, y)`
    Translate { x: f32, y: f32 },
    /// Rotate by `angle` radians
    Rotate { angle: f32 },
    /// Scale by `(x, y)`
    Scale { x: f32, y: f32 },
}

impl Motion {
    /// The transform at progress `t`; `t = 0` is the identity
    pub fn at(&self, t: f32) -> Transform2D {
        match *self {
            Motion::Translate { x, y } => Transform2D::translate(x * t, y * t),
            Motion::Rotate { angle } => Transform2D::rotate(angle * t),
            Motion::Scale { x, y } => Transform2D::scale(1.0 + (x - 1.0) * t, 1.0 + (y - 1.0) * t),
        }
    }
}

/// Animates a node's local transform by pushing a [`Motion`] frame
pub struct TransformAnimation {
    node: Rc<RefCell<dyn TransformTarget>>,
    motion: Motion,
    owner: FrameOwner,
}

impl TransformAnimation {
    pub fn new(node: Rc<RefCell<dyn TransformTarget>>, motion: Motion) -> Self {
        Self {
            node,
            motion,
            owner: FrameOwner::next(),
        }
    }

    pub fn translate(node: Rc<RefCell<dyn TransformTarget>>, x: f32, y: f32) -> Self {
        Self::new(node, Motion::Translate { x, y })
    }

    pub fn rotate(node: Rc<RefCell<dyn TransformTarget>>, angle: f32) -> Self {
        Self::new(node, Motion::Rotate { angle })
    }

    pub fn scale(node: Rc<RefCell<dyn TransformTarget>>, x: f32, y: f32) -> Self {
        Self::new(node, Motion::Scale { x, y })
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Key of the frames this animation pushes
    pub fn owner(&self) -> FrameOwner {
        self.owner
    }

    fn push(&self, t: f64) {
        match self.node.try_borrow_mut() {
            Ok(mut node) => node.push_transform(self.owner, self.motion.at(t as f32)),
            Err(_) => tracing::warn!(owner = ?self.owner, "transform target busy, frame not pushed"),
        }
    }

    fn pop(&self) {
        match self.node.try_borrow_mut() {
            Ok(mut node) => {
                node.pop_transform(self.owner);
            }
            Err(_) => tracing::warn!(owner = ?self.owner, "transform target busy, frame not popped"),
        }
    }
}

impl std::fmt::Debug for TransformAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformAnimation")
            .field("motion", &self.motion)
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

impl Animate for TransformAnimation {
    fn apply(&mut self, t: f64) {
        self.push(t);
    }

    fn post_apply(&mut self, _settled: f64) {
        self.push(1.0);
    }

    fn unapply(&mut self, _t: f64) {
        self.pop();
    }

    fn post_unapply(&mut self) {
        self.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Animation;
    use crate::timeline::{shared, Timeline, Updater};
    use flow_paint::path::Point;
    use flow_paint::transform::TransformStack;

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn test_motion_starts_at_identity() {
        for motion in [
            Motion::Translate { x: 4.0, y: -2.0 },
            Motion::Rotate { angle: 1.0 },
            Motion::Scale { x: 3.0, y: 0.5 },
        ] {
            assert_eq!(motion.at(0.0).apply(Point::new(2.0, 3.0)), Point::new(2.0, 3.0));
        }
        assert_eq!(Motion::Scale { x: 3.0, y: 0.5 }.at(1.0), Transform2D::scale(3.0, 0.5));
    }

    #[test]
    fn test_translate_pushes_and_pops() {
        let node = Rc::new(RefCell::new(TransformStack::default()));
        let mut anim = Animation::new(TransformAnimation::translate(node.clone(), 10.0, 0.0))
            .start(0.0)
            .duration(1.0);

        anim.update(0.5);
        assert_eq!(node.borrow().depth(), 1);
        assert!(approx(node.borrow().transform().apply(Point::ZERO), Point::new(5.0, 0.0)));

        anim.post_update(0.5);
        assert_eq!(node.borrow().depth(), 0);

        // Settled at the end
        anim.update(3.0);
        assert!(approx(node.borrow().transform().apply(Point::ZERO), Point::new(10.0, 0.0)));
        anim.post_update(3.0);
        assert_eq!(node.borrow().transform(), Transform2D::identity());
    }

    #[test]
    fn test_overlapping_animations_clean_up_in_list_order() {
        let node = Rc::new(RefCell::new(TransformStack::default()));
        let moving = shared(
            Animation::new(TransformAnimation::translate(node.clone(), 10.0, 0.0))
                .start(0.0)
                .duration(1.0),
        );
        let turning = shared(
            Animation::new(TransformAnimation::rotate(node.clone(), std::f32::consts::PI))
                .start(0.0)
                .duration(1.0),
        );

        let mut timeline = Timeline::new();
        timeline.append(moving.clone());
        timeline.append(turning.clone());

        let during = timeline.frame(0.5, || {
            assert_eq!(node.borrow().depth(), 2);
            node.borrow().transform().apply(Point::new(1.0, 0.0))
        });

        // Translate (5, 0) then rotate a quarter turn locally
        assert!(approx(during, Point::new(5.0, 1.0)));
        assert_eq!(node.borrow().depth(), 0);
        assert_eq!(node.borrow().transform(), Transform2D::identity());
    }
}
