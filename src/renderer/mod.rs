//! Rendering module
//!
//! `shapes` turns a simulation snapshot into flat primitives on any target;
//! `canvas` paints them with the browser's 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use shapes::{Align, Color, Shape, build_scene};
