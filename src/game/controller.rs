//! Player Controller
//!
//! Integrates turn and walk input into a tentative transform each tick and
//! asks the collision resolver whether the move may stand. Rotation is
//! applied before translation and is never reverted; only the position is
//! collision-checked.

use crate::input::InputSnapshot;
use crate::math::{Aabb, Vec3};
use crate::world::{PlayerSettings, World};
use super::collision::CollisionResolver;
use super::event::{Events, FootstepEvent, WallHitEvent};

/// Position and facing of the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    /// Feet position
    pub position: Vec3,
    /// Rotation about the vertical axis (radians)
    pub yaw: f32,
}

impl PlayerState {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    /// Unit vector the player faces (local -Z)
    pub fn forward(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, -1.0).rotate_y(self.yaw)
    }
}

/// Owns the player state; the only code that mutates it
#[derive(Debug, Clone)]
pub struct PlayerController {
    state: PlayerState,
    settings: PlayerSettings,
    /// Time in motion since the last footstep
    step_timer: f32,
}

impl PlayerController {
    pub fn new(spawn: Vec3, yaw: f32, settings: PlayerSettings) -> Self {
        let step_timer = settings.footstep_interval;
        Self {
            state: PlayerState::new(spawn, yaw),
            settings,
            // Ready: the first moving tick steps immediately
            step_timer,
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    /// Current collision box
    pub fn bounds(&self) -> Aabb {
        self.settings.collider_at(self.state.position)
    }

    /// Advance one tick.
    ///
    /// Conflicting inputs cancel: left and right together leave yaw
    /// unchanged, forward and backward together leave position unchanged.
    pub fn update(&mut self, input: &InputSnapshot, delta_time: f32, world: &World, events: &mut Events) {
        let start = self.state.position;
        let timing = self.settings.timing;

        let turn = timing.step(self.settings.turn_speed, delta_time);
        if input.turn_left {
            self.state.yaw += turn;
        }
        if input.turn_right {
            self.state.yaw -= turn;
        }

        let stride = timing.step(self.settings.walk_speed, delta_time);
        let forward = self.state.forward();
        if input.forward {
            self.state.position += forward * stride;
        }
        if input.backward {
            self.state.position += -forward * stride;
        }

        if self.state.position != start {
            let resolver = CollisionResolver::new(world.walls(), &self.settings);
            if resolver.test_move(start, self.state.position) {
                let wall = resolver.blocking_along(start, self.state.position).unwrap_or_default();
                events.wall_hit.send(WallHitEvent { wall, position: self.state.position });
                self.state.position = start;
            }
        }

        self.tick_footsteps(input, delta_time, events);
    }

    fn tick_footsteps(&mut self, input: &InputSnapshot, delta_time: f32, events: &mut Events) {
        if !input.is_moving() {
            self.step_timer = self.settings.footstep_interval;
            return;
        }
        self.step_timer += delta_time;
        if self.step_timer >= self.settings.footstep_interval {
            self.step_timer = 0.0;
            events.footstep.send(FootstepEvent { position: self.state.position });
        }
    }
}
