//! Time-interval animations
//!
//! An [`Animation`] maps absolute timeline time onto one of three phases:
//! before its start, active (possibly repeating), and after its end. Active
//! time is wrapped into a single cycle, remapped by the [`Direction`] and then
//! shaped by the [`Easing`]. The result is dispatched to the [`Animate`] hooks.
//!
//! Every frame the timeline calls [`Updater::update`] (the apply pass), renders,
//! then calls [`Updater::post_update`] (the cleanup pass). Hooks can therefore
//! push temporary state in `apply` and undo it in `unapply`, so that the next
//! frame starts from a clean scene.

use crate::direction::Direction;
use crate::easing::Easing;
use crate::timeline::Updater;

/// Repeat count passed to [`Animation::repeat`] for endless repetition
pub const REPEAT_INFINITE: i32 = 0;

/// Repeat count passed to [`Animation::repeat`] to play once (the default)
pub const REPEAT_OFF: i32 = 1;

/// How many cycles an animation plays
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Times(u32),
    Infinite,
}

impl Default for Repeat {
    fn default() -> Self {
        Repeat::from(REPEAT_OFF)
    }
}

impl From<i32> for Repeat {
    /// Zero and negative counts mean infinite
    fn from(count: i32) -> Self {
        if count <= REPEAT_INFINITE {
            Repeat::Infinite
        } else {
            Repeat::Times(count as u32)
        }
    }
}

/// Where an animation is at a given time
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// Not started yet
    Before,
    /// Running, with eased progress for the current cycle
    Active(f64),
    /// Finished all cycles (or an instantaneous animation at/after its time)
    After,
}

/// The hooks an animation drives.
///
/// The apply family runs in the apply pass, the unapply family in the cleanup
/// pass of the same frame. Boundary hooks receive no progress.
pub trait Animate {
    /// Before the start, apply pass
    fn pre_apply(&mut self) {}

    /// Active, apply pass. `t` is eased progress of the current cycle.
    fn apply(&mut self, t: f64);

    /// After the end, apply pass. `settled` is where the direction comes to
    /// rest, `direction(1.0)`, before easing.
    fn post_apply(&mut self, settled: f64) {
        let _ = settled;
    }

    /// Before the start, cleanup pass
    fn pre_unapply(&mut self) {}

    /// Active, cleanup pass
    fn unapply(&mut self, t: f64) {
        let _ = t;
    }

    /// After the end, cleanup pass
    fn post_unapply(&mut self) {}
}

/// An animation: timing configuration plus the hooks it drives
#[derive(Debug)]
pub struct Animation<A> {
    start: f64,
    end: f64,
    repeat: Repeat,
    direction: Direction,
    easing: Easing,
    hooks: A,
}

impl<A> Animation<A> {
    /// Create an instantaneous, non-repeating animation at time 0
    pub fn new(hooks: A) -> Self {
        Self {
            start: 0.0,
            end: 0.0,
            repeat: Repeat::default(),
            direction: Direction::Forward,
            easing: Easing::Linear,
            hooks,
        }
    }

    /// Builder: set the start time. The end moves along if it would precede it.
    pub fn start(mut self, start: f64) -> Self {
        self.set_start(start);
        self
    }

    /// Builder: set the end time. The start moves along if it would follow it.
    pub fn end(mut self, end: f64) -> Self {
        self.set_end(end);
        self
    }

    /// Builder: set the duration relative to the current start.
    ///
    /// A negative duration keeps the current start as the end and moves the
    /// start back by `|duration|`.
    pub fn duration(mut self, duration: f64) -> Self {
        self.set_duration(duration);
        self
    }

    /// Builder: set the repeat count. See [`REPEAT_INFINITE`] and [`REPEAT_OFF`].
    pub fn repeat(mut self, count: i32) -> Self {
        self.set_repeat(count);
        self
    }

    /// Builder: set the playback direction
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Builder: set the easing
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn set_start(&mut self, start: f64) {
        self.start = start;
        self.end = self.end.max(start);
    }

    pub fn set_end(&mut self, end: f64) {
        self.end = end;
        self.start = self.start.min(end);
    }

    pub fn set_duration(&mut self, duration: f64) {
        if duration < 0.0 {
            self.end = self.start;
            self.start = self.end + duration;
        } else {
            self.end = self.start + duration;
        }
    }

    pub fn set_repeat(&mut self, count: i32) {
        self.repeat = Repeat::from(count);
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    pub fn start_time(&self) -> f64 {
        self.start
    }

    pub fn end_time(&self) -> f64 {
        self.end
    }

    /// Length of one cycle
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn repeat_mode(&self) -> Repeat {
        self.repeat
    }

    pub fn direction_fn(&self) -> &Direction {
        &self.direction
    }

    pub fn easing_fn(&self) -> &Easing {
        &self.easing
    }

    /// Time at which the last cycle ends.
    ///
    /// Infinite for endless animations, and for instantaneous ones, which never
    /// run a cycle and only have a before and after state.
    pub fn repeated_end(&self) -> f64 {
        match self.repeat {
            _ if self.start == self.end => f64::INFINITY,
            Repeat::Infinite => f64::INFINITY,
            Repeat::Times(count) => self.start + self.span() * count as f64,
        }
    }

    /// Total time covered by all cycles
    pub fn repeated_span(&self) -> f64 {
        self.repeated_end() - self.start
    }

    /// Evaluate the phase at `time`
    pub fn phase(&self, time: f64) -> Phase {
        if self.start == self.end {
            return if time < self.start {
                Phase::Before
            } else {
                Phase::After
            };
        }

        let t = (time - self.start) / (self.end - self.start);
        if t < 0.0 {
            return Phase::Before;
        }

        let active = match self.repeat {
            Repeat::Infinite => true,
            Repeat::Times(count) => t < count as f64,
        };
        if active {
            // Each cycle replays the same 0..1 progress
            Phase::Active(self.easing.ease(self.direction.apply(t % 1.0)))
        } else {
            Phase::After
        }
    }

    pub fn hooks(&self) -> &A {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut A {
        &mut self.hooks
    }
}

impl<A: Animate> Updater for Animation<A> {
    fn update(&mut self, time: f64) {
        match self.phase(time) {
            Phase::Before => self.hooks.pre_apply(),
            Phase::Active(t) => self.hooks.apply(t),
            Phase::After => {
                let settled = self.direction.apply(1.0);
                self.hooks.post_apply(settled)
            }
        }
    }

    fn post_update(&mut self, time: f64) {
        match self.phase(time) {
            Phase::Before => self.hooks.pre_unapply(),
            Phase::Active(t) => self.hooks.unapply(t),
            Phase::After => self.hooks.post_unapply(),
        }
    }
}
