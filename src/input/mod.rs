//! Input handling with gamepad support
//!
//! Provides an action-based input system that works with both keyboard
//! and gamepad controllers, reduced each frame to an `InputSnapshot`.
//!
//! Native: Uses gilrs crate for cross-platform gamepad input
//! WASM: Keyboard only

mod actions;
mod gamepad;
mod state;

pub use actions::*;
pub use gamepad::{Gamepad, button};
pub use state::*;
