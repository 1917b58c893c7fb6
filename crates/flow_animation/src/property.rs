//! Property animations
//!
//! Each animation reads the property's current value in the apply pass, writes
//! the interpolated value, and restores what it read in the cleanup pass. The
//! property therefore only holds the animated value while a frame renders.

use flow_paint::color::lerp_argb;

use crate::animation::Animate;

/// Animates an `f32` property from its current value towards a target
pub struct FloatProperty {
    get: Box<dyn Fn() -> f32>,
    set: Box<dyn FnMut(f32)>,
    start: f32,
    target: f32,
}

impl FloatProperty {
    pub fn new(get: impl Fn() -> f32 + 'static, set: impl FnMut(f32) + 'static) -> Self {
        Self {
            get: Box::new(get),
            set: Box::new(set),
            start: 0.0,
            target: 0.0,
        }
    }

    pub fn target(mut self, value: f32) -> Self {
        self.target = value;
        self
    }

    pub fn target_value(&self) -> f32 {
        self.target
    }
}

impl std::fmt::Debug for FloatProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloatProperty")
            .field("start", &self.start)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl Animate for FloatProperty {
    fn apply(&mut self, t: f64) {
        self.start = (self.get)();
        let value = self.start + (self.target - self.start) * t as f32;
        (self.set)(value);
    }

    fn post_apply(&mut self, _settled: f64) {
        self.start = (self.get)();
        (self.set)(self.target);
    }

    fn unapply(&mut self, _t: f64) {
        (self.set)(self.start);
    }

    fn post_unapply(&mut self) {
        (self.set)(self.start);
    }
}

/// Animates a packed `0xAARRGGBB` color property channel by channel
pub struct ColorProperty {
    get: Box<dyn Fn() -> u32>,
    set: Box<dyn FnMut(u32)>,
    start: u32,
    target: u32,
}

impl ColorProperty {
    pub fn new(get: impl Fn() -> u32 + 'static, set: impl FnMut(u32) + 'static) -> Self {
        Self {
            get: Box::new(get),
            set: Box::new(set),
            start: 0,
            target: 0,
        }
    }

    pub fn target(mut self, argb: u32) -> Self {
        self.target = argb;
        self
    }

    pub fn target_value(&self) -> u32 {
        self.target
    }
}

impl std::fmt::Debug for ColorProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorProperty")
            .field("start", &format_args!("{:#010x}", self.start))
            .field("target", &format_args!("{:#010x}", self.target))
            .finish_non_exhaustive()
    }
}

impl Animate for ColorProperty {
    fn apply(&mut self, t: f64) {
        self.start = (self.get)();
        // Overshooting easings would wrap channels
        let t = (t as f32).clamp(0.0, 1.0);
        (self.set)(lerp_argb(self.start, self.target, t));
    }

    fn post_apply(&mut self, _settled: f64) {
        self.start = (self.get)();
        (self.set)(self.target);
    }

    fn unapply(&mut self, _t: f64) {
        (self.set)(self.start);
    }

    fn post_unapply(&mut self) {
        (self.set)(self.start);
    }
}

/// Calls a closure with the animation progress
pub struct Callback {
    f: Box<dyn FnMut(f64)>,
}

impl Callback {
    pub fn new(f: impl FnMut(f64) + 'static) -> Self {
        Self { f: Box::new(f) }
    }
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callback").finish_non_exhaustive()
    }
}

impl Animate for Callback {
    fn apply(&mut self, t: f64) {
        (self.f)(t);
    }

    fn post_apply(&mut self, settled: f64) {
        (self.f)(settled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Animation;
    use crate::direction::Direction;
    use crate::easing::Easing;
    use crate::timeline::Updater;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn float_cell(value: f32) -> (Rc<Cell<f32>>, FloatProperty) {
        let cell = Rc::new(Cell::new(value));
        let get = cell.clone();
        let set = cell.clone();
        let property = FloatProperty::new(move || get.get(), move |v| set.set(v));
        (cell, property)
    }

    #[test]
    fn test_float_property_interpolates_and_restores() {
        let (cell, property) = float_cell(10.0);
        let mut anim = Animation::new(property.target(20.0)).start(0.0).duration(2.0);

        anim.update(1.0);
        assert_eq!(cell.get(), 15.0);
        anim.post_update(1.0);
        assert_eq!(cell.get(), 10.0);

        anim.update(5.0);
        assert_eq!(cell.get(), 20.0);
        anim.post_update(5.0);
        assert_eq!(cell.get(), 10.0);
    }

    #[test]
    fn test_float_property_untouched_before_start() {
        let (cell, property) = float_cell(3.0);
        let mut anim = Animation::new(property.target(9.0)).start(1.0).duration(1.0);

        anim.update(0.5);
        assert_eq!(cell.get(), 3.0);
        anim.post_update(0.5);
        assert_eq!(cell.get(), 3.0);
    }

    #[test]
    fn test_same_order_cleanup_keeps_later_reader_value() {
        // Each restores what it read, so the later reader wins after cleanup
        let (cell, first) = float_cell(0.0);
        let get = cell.clone();
        let set = cell.clone();
        let second = FloatProperty::new(move || get.get(), move |v| set.set(v));

        let mut a = Animation::new(first.target(10.0)).start(0.0).duration(1.0);
        let mut b = Animation::new(second.target(20.0)).start(0.0).duration(1.0);

        a.update(0.5);
        b.update(0.5);
        assert_eq!(cell.get(), 12.5);

        a.post_update(0.5);
        b.post_update(0.5);
        assert_eq!(cell.get(), 5.0);
    }

    #[test]
    fn test_color_property_clamps_overshoot() {
        let cell = Rc::new(Cell::new(0xFF00_0000u32));
        let get = cell.clone();
        let set = cell.clone();
        let property = ColorProperty::new(move || get.get(), move |v| set.set(v)).target(0xFFFF_FFFF);
        let mut anim = Animation::new(property)
            .start(0.0)
            .duration(1.0)
            .easing(Easing::custom(|t| t * 2.0));

        anim.update(0.75);
        assert_eq!(cell.get(), 0xFFFF_FFFF);
        anim.post_update(0.75);
        assert_eq!(cell.get(), 0xFF00_0000);

        anim.update(0.25);
        assert_eq!(cell.get(), 0xFF80_8080);
        anim.post_update(0.25);
    }

    #[test]
    fn test_callback_receives_settled_direction() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut anim = Animation::new(Callback::new(move |t| sink.borrow_mut().push(t)))
            .start(0.0)
            .duration(1.0)
            .direction(Direction::Backward);

        anim.update(0.25);
        anim.update(2.0);

        assert_eq!(*seen.borrow(), vec![0.75, 0.0]);
    }
}
