//! Collision System
//!
//! Accept/reject collision for the player against static wall volumes.
//! The player is a feet-anchored box; a move whose box overlaps any wall is
//! vetoed outright. No sliding and no penetration resolution, so the player
//! stops dead on contact.

use crate::math::Vec3;
use crate::world::{PlayerSettings, WallVolume};

/// Upper bound on collision checks for one move
const MAX_SUBSTEPS: usize = 256;

/// Tests proposed player positions against a borrowed wall list
#[derive(Debug, Clone, Copy)]
pub struct CollisionResolver<'a> {
    walls: &'a [WallVolume],
    settings: &'a PlayerSettings,
}

impl<'a> CollisionResolver<'a> {
    pub fn new(walls: &'a [WallVolume], settings: &'a PlayerSettings) -> Self {
        Self { walls, settings }
    }

    /// Index of the first wall (registration order) the player box at
    /// `position` overlaps
    pub fn first_blocking(&self, position: Vec3) -> Option<usize> {
        let player_box = self.settings.collider_at(position);
        self.walls.iter().position(|wall| wall.bounds.intersects(&player_box))
    }

    /// First wall hit anywhere along the straight move from `current` to
    /// `proposed`. The move is checked in steps no longer than the collider
    /// half-width, so consecutive boxes overlap and a long stride cannot
    /// hop over a thin wall. `proposed` itself is always checked.
    pub fn blocking_along(&self, current: Vec3, proposed: Vec3) -> Option<usize> {
        let delta = proposed - current;
        let max_step = self.settings.collider_half_width;
        let steps = ((delta.len() / max_step).ceil() as usize).clamp(1, MAX_SUBSTEPS);
        (1..=steps).find_map(|i| self.first_blocking(current.lerp(proposed, i as f32 / steps as f32)))
    }

    /// Returns true when moving to `proposed` is blocked.
    ///
    /// `current` is where the move starts; the box is swept from there so
    /// fast moves still stop at the first wall in the way.
    pub fn test_move(&self, current: Vec3, proposed: Vec3) -> bool {
        match self.blocking_along(current, proposed) {
            Some(wall) => {
                log::debug!(
                    "hit wall {} moving ({:.2},{:.2},{:.2}) -> ({:.2},{:.2},{:.2})",
                    wall, current.x, current.y, current.z, proposed.x, proposed.y, proposed.z
                );
                true
            }
            None => false,
        }
    }
}
