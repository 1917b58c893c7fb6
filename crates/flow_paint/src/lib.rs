//! Flow Paint
//!
//! The drawing side of the Flow animation engine.
//!
//! # Features
//!
//! - **Colors**: straight RGBA colors with packed ARGB interop
//! - **Transforms**: 2D affine transforms and an owner-keyed transform stack
//! - **Canvas**: a NanoVG-style path canvas trait plus a recording implementation
//! - **Paths**: flattened multi-subpath paths with arc-length partial drawing

pub mod canvas;
pub mod color;
pub mod error;
pub mod path;
pub mod transform;

pub use canvas::{Canvas, PaintCommand, RecordingCanvas, TransformedCanvas, Winding};
pub use color::Color;
pub use error::{PathError, Result};
pub use path::{Path, PathStyle, Point};
pub use transform::{FrameOwner, Transform2D, TransformStack, TransformTarget};
