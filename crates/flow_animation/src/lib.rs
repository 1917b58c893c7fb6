//! Flow Animation System
//!
//! Time-interval animations, easing, and timeline orchestration.
//!
//! # Features
//!
//! - **Easing**: Polynomial, sine and CSS cubic-bezier curves, composable
//! - **Directions**: Forward, backward, ping-pong or custom remapping
//! - **Animations**: Apply/unapply hooks driven by start, end and repeat count
//! - **Timelines**: Ordered apply and cleanup passes around each rendered frame
//! - **Frame Clock**: Frame counter to timeline time for offline rendering

pub mod animation;
pub mod clock;
pub mod direction;
pub mod easing;
pub mod property;
pub mod timeline;
pub mod transform;

pub use animation::{Animate, Animation, Phase, Repeat, REPEAT_INFINITE, REPEAT_OFF};
pub use clock::FrameClock;
pub use direction::Direction;
pub use easing::Easing;
pub use property::{Callback, ColorProperty, FloatProperty};
pub use timeline::{shared, SharedUpdater, Timeline, Updater};
pub use transform::{Motion, TransformAnimation};
