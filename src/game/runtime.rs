//! Game Runtime
//!
//! One `GameSession` per play-through. `tick` runs the core in a fixed
//! order every frame:
//! input → movement (collision veto) → idle animation → interaction → camera
//!
//! Everything is single-threaded and owned here; the presentation layer
//! reads the results and drains `events` after each tick.

use crate::input::InputSnapshot;
use crate::world::{Level, World, WorldError};
use super::camera::{CameraPose, CameraRig};
use super::controller::PlayerController;
use super::event::Events;
use super::interaction::InteractionRegistry;
use super::puzzle::UnlockOutcome;

/// Longest frame delta the simulation accepts (seconds).
/// Longer stalls (window drag, breakpoint) are treated as this long.
pub const MAX_DELTA: f32 = 0.1;

/// Where the play-through stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Playing,
    /// The final object opened; the ending is on screen and the player is frozen
    Ending,
}

/// Per-tick results for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// An interactable was triggered this tick
    pub triggered: bool,
    pub camera: CameraPose,
}

pub struct GameSession {
    world: World,
    player: PlayerController,
    interactions: InteractionRegistry,
    camera: CameraRig,
    phase: GamePhase,
    /// Event queues for the presentation layer
    pub events: Events,
}

impl GameSession {
    /// Build the world and registry for `level`. Fails fast on any
    /// configuration defect.
    pub fn from_level(level: &Level) -> Result<Self, WorldError> {
        let world = level.build_world()?;
        let interactions = level.build_registry()?;
        let player = PlayerController::new(level.spawn, level.spawn_yaw, level.player_settings.clone());
        let camera = CameraRig::new(level.camera_settings.clone());
        log::info!(
            "session started in '{}': {} walls, {} interactables",
            level.name,
            world.wall_count(),
            interactions.items().len()
        );

        Ok(Self {
            world,
            player,
            interactions,
            camera,
            phase: GamePhase::Playing,
            events: Events::new(),
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn interactions(&self) -> &InteractionRegistry {
        &self.interactions
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Run one frame of the core
    pub fn tick(&mut self, input: &InputSnapshot, delta_time: f32) -> TickReport {
        let dt = delta_time.clamp(0.0, MAX_DELTA);
        let input = match self.phase {
            GamePhase::Playing => *input,
            GamePhase::Ending => InputSnapshot::default(),
        };

        self.player.update(&input, dt, &self.world, &mut self.events);

        self.interactions.animate_idle(dt);
        let position = self.player.state().position;
        let triggered = self.interactions.evaluate(position, input.interact, &mut self.events);

        let unlocked = triggered
            && self.events.interaction.iter().last().map(|e| e.outcome) == Some(UnlockOutcome::Unlocked);
        if unlocked && self.phase == GamePhase::Playing {
            log::info!("final lock opened");
            self.phase = GamePhase::Ending;
        }

        let camera = self.camera.follow(self.player.state(), &self.world, dt);
        TickReport { triggered, camera }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::world::default_level;

    const DT: f32 = 1.0 / 60.0;

    fn walk(session: &mut GameSession, ticks: usize) {
        let input = InputSnapshot { forward: true, ..Default::default() };
        for _ in 0..ticks {
            session.tick(&input, DT);
            session.events.clear_all();
        }
    }

    #[test]
    fn test_tick_moves_and_follows() {
        let mut session = GameSession::from_level(&default_level()).unwrap();
        let report = session.tick(&InputSnapshot { forward: true, ..Default::default() }, DT);

        let p = session.player().state().position;
        assert!((p.z + 0.25).abs() < 1e-5);
        assert!(!report.triggered);
        assert_eq!(report.camera.target, p + Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_walking_into_end_of_lounge_stops_at_shoulder() {
        // Facing -X toward the lounge side wall at x = -14
        let mut level = default_level();
        level.spawn_yaw = std::f32::consts::FRAC_PI_2;
        let mut session = GameSession::from_level(&level).unwrap();
        walk(&mut session, 240);

        let bounds = session.player().bounds();
        assert!(bounds.min.x > -14.0);
        assert!(bounds.min.x < -13.0);
        for wall in session.world().walls() {
            assert!(!wall.bounds.intersects(&bounds));
        }
    }

    #[test]
    fn test_interact_without_target_is_noop() {
        let mut session = GameSession::from_level(&default_level()).unwrap();
        let report = session.tick(&InputSnapshot { interact: true, ..Default::default() }, DT);
        assert!(!report.triggered);
        assert!(session.events.interaction.is_empty());
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_walkthrough_reaches_ending() {
        use crate::game::puzzle::messages;
        use crate::world::PropDef;
        use crate::game::PuzzleKind;

        // Props in a straight line down the middle of the house
        let mut level = default_level();
        level.props = [(PuzzleKind::Chest, -5.0), (PuzzleKind::Note, -25.0), (PuzzleKind::Safe, -45.0), (PuzzleKind::Heart, -65.0)]
            .into_iter()
            .map(|(kind, z)| PropDef {
                kind,
                name: kind.default_name().to_string(),
                position: Vec3::new(0.0, 2.0, z),
            })
            .collect();
        let mut session = GameSession::from_level(&level).unwrap();
        let press = InputSnapshot { interact: true, ..Default::default() };

        let mut outcomes = Vec::new();
        for ticks in [20, 80, 80, 80] {
            walk(&mut session, ticks);
            assert!(session.tick(&press, DT).triggered);
            outcomes.extend(session.events.interaction.drain().map(|e| e.outcome));
        }

        assert_eq!(
            outcomes,
            vec![
                UnlockOutcome::Message(messages::FOUND_GLASS),
                UnlockOutcome::Message(messages::CODE),
                UnlockOutcome::Message(messages::FOUND_KEY),
                UnlockOutcome::Unlocked,
            ]
        );
        assert!(session.interactions().progress().is_chain_complete());
        assert_eq!(session.phase(), GamePhase::Ending);

        // The player is frozen once the ending is up
        let before = session.player().state().position;
        walk(&mut session, 10);
        assert_eq!(session.player().state().position, before);
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut session = GameSession::from_level(&default_level()).unwrap();
        session.tick(&InputSnapshot { forward: true, ..Default::default() }, 5.0);
        let p = session.player().state().position;
        assert!((p.z + 15.0 * MAX_DELTA).abs() < 1e-4);
    }
}
