//! World geometry
//!
//! Static collision volumes, registered explicitly while the level is built
//! and read-only once play starts. Collision and camera code borrow the
//! wall list; nothing infers collidability from shape attributes.

mod settings;
mod layout;
mod level;

pub use settings::*;
pub use layout::*;
pub use level::*;

use thiserror::Error;
use crate::math::Aabb;
use crate::game::PuzzleKind;

/// Configuration defects found while constructing a world.
/// None of these are recoverable at runtime.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("wall {index} has malformed bounds {bounds:?}")]
    MalformedWall { index: usize, bounds: Aabb },
    #[error("player spawn overlaps wall {wall}")]
    SpawnBlocked { wall: usize },
    #[error("no interactable registered for {0:?}")]
    MissingPuzzle(PuzzleKind),
    #[error("{0:?} registered more than once")]
    DuplicatePuzzle(PuzzleKind),
    #[error("interactable '{name}' has a non-finite position")]
    MalformedProp { name: String },
    #[error("interaction radius must be positive, got {0}")]
    InvalidRadius(f32),
}

/// A static axis-aligned collision volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallVolume {
    pub bounds: Aabb,
}

/// Immutable wall list for one level
#[derive(Debug, Clone, Default)]
pub struct World {
    walls: Vec<WallVolume>,
}

impl World {
    pub fn builder() -> WorldBuilder {
        WorldBuilder::default()
    }

    /// Walls in registration order
    pub fn walls(&self) -> &[WallVolume] {
        &self.walls
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }
}

/// Collects wall volumes before play begins
#[derive(Debug, Default)]
pub struct WorldBuilder {
    walls: Vec<WallVolume>,
}

impl WorldBuilder {
    /// Register a wall. Rejects boxes that are inverted or non-finite.
    pub fn add_wall(&mut self, bounds: Aabb) -> Result<usize, WorldError> {
        let index = self.walls.len();
        if !bounds.is_well_formed() {
            return Err(WorldError::MalformedWall { index, bounds });
        }
        self.walls.push(WallVolume { bounds });
        Ok(index)
    }

    pub fn build(self) -> World {
        log::debug!("world built with {} walls", self.walls.len());
        World { walls: self.walls }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn test_builder_keeps_order() {
        let mut builder = World::builder();
        let a = builder.add_wall(Aabb::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0))).unwrap();
        let b = builder.add_wall(Aabb::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(6.0, 1.0, 1.0))).unwrap();
        let world = builder.build();

        assert_eq!((a, b), (0, 1));
        assert_eq!(world.wall_count(), 2);
        assert_eq!(world.walls()[1].bounds.min.x, 5.0);
    }

    #[test]
    fn test_builder_rejects_malformed_wall() {
        let mut builder = World::builder();
        builder.add_wall(Aabb::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0))).unwrap();
        let err = builder
            .add_wall(Aabb::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0)))
            .unwrap_err();
        assert!(matches!(err, WorldError::MalformedWall { index: 1, .. }));
    }
}
