//! Game core
//!
//! Movement with collision veto, the puzzle chain and its interaction
//! registry, the follow camera, and the per-frame session that ties them
//! together. Rendering and HUD read the session; they never write to it.
//!
//! Per tick:
//! - Movement: rotate, translate, veto against walls
//! - Idle animation for the final prop
//! - Interaction: nearest prop, hover pulse, optional unlock
//! - Camera: follow and pull in front of walls

pub mod puzzle;
pub mod event;
pub mod collision;
pub mod controller;
pub mod interaction;
pub mod camera;
pub mod runtime;
pub mod renderer;
pub mod hud;

pub use puzzle::{GameProgress, PuzzleKind, UnlockOutcome};
pub use event::Events;
pub use interaction::{Interactable, InteractionRegistry};
pub use runtime::{GamePhase, GameSession};
pub use renderer::draw_scene;
pub use hud::Hud;
