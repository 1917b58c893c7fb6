//! Timeline orchestration for multiple animations
//!
//! A [`Timeline`] is an ordered list of shared [`Updater`]s. Each frame it runs
//! an apply pass ([`Timeline::run_animations`]) before rendering and a cleanup
//! pass ([`Timeline::cleanup_animations`]) after it. Both passes walk the list
//! in the same order: every updater undoes its own side effects, so cleanup is
//! not a stack unwind across entries.

use std::cell::RefCell;
use std::rc::Rc;

/// Anything evaluated twice per frame
pub trait Updater {
    /// Apply pass, before rendering
    fn update(&mut self, time: f64);

    /// Cleanup pass, after rendering
    fn post_update(&mut self, time: f64);
}

/// An updater shared between a timeline and whoever configured it
pub type SharedUpdater = Rc<RefCell<dyn Updater>>;

/// Wrap an updater for use in a [`Timeline`], keeping the concrete type
/// available to the caller.
pub fn shared<U: Updater + 'static>(updater: U) -> Rc<RefCell<U>> {
    Rc::new(RefCell::new(updater))
}

fn identity<U: ?Sized>(updater: &Rc<RefCell<U>>) -> *const () {
    Rc::as_ptr(updater).cast()
}

/// An ordered set of updaters, compared by identity
#[derive(Default)]
pub struct Timeline {
    updaters: Vec<SharedUpdater>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of updaters on the timeline
    pub fn animation_count(&self) -> usize {
        self.updaters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updaters.is_empty()
    }

    /// Position of `updater`, if present
    pub fn index_of<U: ?Sized>(&self, updater: &Rc<RefCell<U>>) -> Option<usize> {
        let key = identity(updater);
        self.updaters.iter().position(|u| identity(u) == key)
    }

    pub fn contains<U: ?Sized>(&self, updater: &Rc<RefCell<U>>) -> bool {
        self.index_of(updater).is_some()
    }

    /// Add to the end, moving it there if already present
    pub fn append(&mut self, updater: SharedUpdater) {
        self.insert(usize::MAX, updater);
    }

    /// Add to the front, moving it there if already present
    pub fn prepend(&mut self, updater: SharedUpdater) {
        self.insert(0, updater);
    }

    /// Insert at `index`, moving it there if already present.
    ///
    /// The index refers to the list after the updater was taken out, and is
    /// clamped to its length.
    pub fn insert(&mut self, index: usize, updater: SharedUpdater) {
        self.remove(&updater);
        let index = index.min(self.updaters.len());
        tracing::debug!(index, count = self.updaters.len() + 1, "timeline insert");
        self.updaters.insert(index, updater);
    }

    /// Remove by identity. Returns whether it was present.
    pub fn remove<U: ?Sized>(&mut self, updater: &Rc<RefCell<U>>) -> bool {
        match self.index_of(updater) {
            Some(index) => {
                self.updaters.remove(index);
                true
            }
            None => false,
        }
    }

    /// Insert directly before `target`. Returns false, without changing
    /// anything, if `target` is not on this timeline.
    pub fn insert_before<T: ?Sized>(&mut self, target: &Rc<RefCell<T>>, updater: SharedUpdater) -> bool {
        self.insert_relative(target, updater, 0)
    }

    /// Insert directly after `target`. Returns false, without changing
    /// anything, if `target` is not on this timeline.
    pub fn insert_after<T: ?Sized>(&mut self, target: &Rc<RefCell<T>>, updater: SharedUpdater) -> bool {
        self.insert_relative(target, updater, 1)
    }

    fn insert_relative<T: ?Sized>(
        &mut self,
        target: &Rc<RefCell<T>>,
        updater: SharedUpdater,
        offset: usize,
    ) -> bool {
        if !self.contains(target) {
            return false;
        }
        if identity(target) == identity(&updater) {
            // Already next to itself
            return true;
        }

        self.remove(&updater);
        match self.index_of(target) {
            Some(index) => {
                self.insert(index + offset, updater);
                true
            }
            None => false,
        }
    }

    /// Remove every updater
    pub fn clear(&mut self) {
        self.updaters.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedUpdater> {
        self.updaters.iter()
    }

    /// Apply pass: `update(time)` on every updater, in list order
    pub fn run_animations(&self, time: f64) {
        tracing::trace!(time, count = self.updaters.len(), "run animations");
        for updater in &self.updaters {
            match updater.try_borrow_mut() {
                Ok(mut updater) => updater.update(time),
                Err(_) => tracing::warn!(time, "updater busy during apply pass, skipped"),
            }
        }
    }

    /// Cleanup pass: `post_update(time)` on every updater, in list order
    pub fn cleanup_animations(&self, time: f64) {
        tracing::trace!(time, count = self.updaters.len(), "cleanup animations");
        for updater in &self.updaters {
            match updater.try_borrow_mut() {
                Ok(mut updater) => updater.post_update(time),
                Err(_) => tracing::warn!(time, "updater busy during cleanup pass, skipped"),
            }
        }
    }

    /// Run one frame: apply pass, `render`, cleanup pass
    pub fn frame<R>(&self, time: f64, render: impl FnOnce() -> R) -> R {
        self.run_animations(time);
        let out = render();
        self.cleanup_animations(time);
        out
    }
}
