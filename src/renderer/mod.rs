//! Rendering module
//!
//! Scenes are plain draw-command lists; the canvas backend replays them.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::{DrawCmd, dino_scene, snake_scene};
