//! Playback directions
//!
//! A direction remaps linear time inside one animation cycle before easing is
//! applied, e.g. to play an animation backwards or there and back again.

use std::fmt;
use std::sync::Arc;

/// Playback direction for animations
#[derive(Clone, Default)]
pub enum Direction {
    /// Play forward (0.0 -> 1.0)
    #[default]
    Forward,
    /// Play in reverse (1.0 -> 0.0)
    Backward,
    /// Play forward at double speed, then back at double speed
    ForwardBackward,
    /// Any pure user-provided remapping of `0.0..=1.0`
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl Direction {
    pub fn custom(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Direction::Custom(Arc::new(f))
    }

    /// Remap linear cycle progress
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Direction::Forward => t,
            Direction::Backward => 1.0 - t,
            Direction::ForwardBackward => {
                if t < 0.5 {
                    t * 2.0
                } else {
                    1.0 - (t - 0.5) * 2.0
                }
            }
            Direction::Custom(f) => f(t),
        }
    }
}

impl fmt::Debug for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => f.write_str("Forward"),
            Direction::Backward => f.write_str("Backward"),
            Direction::ForwardBackward => f.write_str("ForwardBackward"),
            Direction::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_boundaries() {
        assert_eq!(Direction::Forward.apply(0.0), 0.0);
        assert_eq!(Direction::Forward.apply(1.0), 1.0);
    }

    #[test]
    fn test_backward_boundaries() {
        assert_eq!(Direction::Backward.apply(0.0), 1.0);
        assert_eq!(Direction::Backward.apply(1.0), 0.0);
    }

    #[test]
    fn test_forward_backward_turns_at_half() {
        let dir = Direction::ForwardBackward;
        assert_eq!(dir.apply(0.0), 0.0);
        assert_eq!(dir.apply(0.25), 0.5);
        assert_eq!(dir.apply(0.5), 1.0);
        assert_eq!(dir.apply(0.75), 0.5);
        assert_eq!(dir.apply(1.0), 0.0);
    }

    #[test]
    fn test_custom_direction() {
        let dir = Direction::custom(|t| t * t);
        assert_eq!(dir.apply(0.5), 0.25);
    }
}
