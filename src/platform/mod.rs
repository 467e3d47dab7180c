//! Platform abstraction layer
//!
//! Handles:
//! - Input events (held keys, edges, per-game bindings)
//! - Time (frame steps, resize debouncing)
//! - Browser canvas, storage and listener handles (wasm only)

pub mod clock;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clock::{FrameClock, ResizeDebounce};
pub use input::{Action, Bindings, KeyState};
