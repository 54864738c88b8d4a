//! Browser platform layer (wasm only)
//!
//! - `scheduler`: requestAnimationFrame and setInterval handles that
//!   cancel deterministically
//! - `http`: leaderboard API over `fetch`
//! - `dom`: small element helpers for the page chrome
//!
//! LocalStorage lives with `Settings`.

pub mod dom;
pub mod http;
pub mod scheduler;

pub use scheduler::{FrameLoop, Interval};
