//! Level layout
//!
//! A level is a list of rooms (floor, ceiling and two side walls each),
//! free-standing wall boxes, round tables and puzzle props. Building a level
//! registers every collider with a `WorldBuilder` and every prop with the
//! interaction registry.

use serde::{Serialize, Deserialize};
use crate::math::{Aabb, Vec3};
use crate::game::{GameProgress, Interactable, InteractionRegistry, PuzzleKind};
use super::{CameraSettings, PlayerSettings, World, WorldError};

/// Height of every room wall
pub const WALL_HEIGHT: f32 = 12.0;
/// Thickness of room side walls
pub const WALL_THICKNESS: f32 = 2.0;
/// Height of a table top above the floor
pub const TABLE_HEIGHT: f32 = 2.0;
/// Thickness of a table top
pub const TABLE_TOP_THICKNESS: f32 = 0.2;

/// A rectangular room centered on (center_x, center_z).
/// Only the two side walls (at ±width/2 on X) collide; openings along Z are
/// closed off by free-standing walls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDef {
    pub name: String,
    pub center_x: f32,
    pub center_z: f32,
    pub width: f32,
    pub depth: f32,
    /// Light tint (RGB)
    pub color: [u8; 3],
}

impl RoomDef {
    pub fn side_walls(&self) -> [Aabb; 2] {
        let half_w = self.width / 2.0;
        let size = Vec3::new(WALL_THICKNESS, WALL_HEIGHT, self.depth);
        [
            Aabb::from_center_size(Vec3::new(self.center_x - half_w, WALL_HEIGHT / 2.0, self.center_z), size),
            Aabb::from_center_size(Vec3::new(self.center_x + half_w, WALL_HEIGHT / 2.0, self.center_z), size),
        ]
    }
}

/// A free-standing box wall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxDef {
    pub center: Vec3,
    pub size: Vec3,
}

impl BoxDef {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.center, self.size)
    }
}

/// A round table; its top collides as its bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    pub x: f32,
    pub z: f32,
    pub radius: f32,
}

impl TableDef {
    pub fn top_bounds(&self) -> Aabb {
        Aabb::from_center_size(
            Vec3::new(self.x, TABLE_HEIGHT, self.z),
            Vec3::new(self.radius * 2.0, TABLE_TOP_THICKNESS, self.radius * 2.0),
        )
    }
}

/// A puzzle prop placed in the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropDef {
    pub kind: PuzzleKind,
    pub name: String,
    /// Anchor (center of the prop) used for proximity
    pub position: Vec3,
}

/// A complete playable level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub spawn: Vec3,
    pub spawn_yaw: f32,
    pub rooms: Vec<RoomDef>,
    pub walls: Vec<BoxDef>,
    pub tables: Vec<TableDef>,
    pub props: Vec<PropDef>,
    #[serde(default)]
    pub player_settings: PlayerSettings,
    #[serde(default)]
    pub camera_settings: CameraSettings,
}

impl Level {
    /// Every collider, in registration order: room side walls, free walls, tables
    pub fn collider_bounds(&self) -> Vec<Aabb> {
        let mut out = Vec::with_capacity(self.rooms.len() * 2 + self.walls.len() + self.tables.len());
        for room in &self.rooms {
            out.extend(room.side_walls());
        }
        out.extend(self.walls.iter().map(BoxDef::bounds));
        out.extend(self.tables.iter().map(TableDef::top_bounds));
        out
    }

    /// Register all colliders and check the spawn point is clear
    pub fn build_world(&self) -> Result<World, WorldError> {
        let mut builder = World::builder();
        for bounds in self.collider_bounds() {
            builder.add_wall(bounds)?;
        }
        let world = builder.build();

        let spawn_box = self.player_settings.collider_at(self.spawn);
        if let Some(wall) = world.walls().iter().position(|w| w.bounds.intersects(&spawn_box)) {
            return Err(WorldError::SpawnBlocked { wall });
        }
        Ok(world)
    }

    /// Register the props with a fresh registry and fresh progress
    pub fn build_registry(&self) -> Result<InteractionRegistry, WorldError> {
        let items = self
            .props
            .iter()
            .map(|p| Interactable::new(p.kind, p.name.clone(), p.position))
            .collect();
        InteractionRegistry::new(items, GameProgress::new(), self.player_settings.interaction_radius)
    }
}

/// The built-in house: Lounge → Hallway → Sanctuary
pub fn default_level() -> Level {
    let room = |name: &str, center_z: f32, width: f32, depth: f32, color: [u8; 3]| RoomDef {
        name: name.to_string(),
        center_x: 0.0,
        center_z,
        width,
        depth,
        color,
    };
    let wall = |x: f32, z: f32, w: f32, d: f32| BoxDef {
        center: Vec3::new(x, WALL_HEIGHT / 2.0, z),
        size: Vec3::new(w, WALL_HEIGHT, d),
    };
    let prop = |kind: PuzzleKind, x: f32, y: f32, z: f32| PropDef {
        kind,
        name: kind.default_name().to_string(),
        position: Vec3::new(x, y, z),
    };

    Level {
        name: "House".to_string(),
        spawn: Vec3::ZERO,
        spawn_yaw: 0.0,
        rooms: vec![
            room("Lounge", 0.0, 30.0, 30.0, [255, 85, 255]),
            room("Hallway", -30.0, 10.0, 30.0, [85, 255, 255]),
            room("Sanctuary", -65.0, 40.0, 40.0, [255, 85, 85]),
        ],
        walls: vec![
            // Lounge back wall
            wall(0.0, 15.0, 30.0, 2.0),
            // Lounge → Hallway shoulders
            wall(10.0, -15.0, 10.0, 2.0),
            wall(-10.0, -15.0, 10.0, 2.0),
            // Hallway → Sanctuary shoulders
            wall(12.5, -45.0, 15.0, 2.0),
            wall(-12.5, -45.0, 15.0, 2.0),
            // Sanctuary end wall
            wall(0.0, -85.0, 40.0, 2.0),
        ],
        tables: vec![
            TableDef { x: 3.5, z: -30.0, radius: 1.0 },
            TableDef { x: -8.0, z: 5.0, radius: 3.0 },
            TableDef { x: 8.0, z: -5.0, radius: 3.0 },
        ],
        props: vec![
            prop(PuzzleKind::Chest, -8.0, 2.7, 5.0),
            prop(PuzzleKind::Note, 3.5, 2.61, -30.0),
            prop(PuzzleKind::Safe, 8.0, 2.95, -5.0),
            prop(PuzzleKind::Heart, 0.0, 4.0, -65.0),
        ],
        player_settings: PlayerSettings::default(),
        camera_settings: CameraSettings::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_builds() {
        let level = default_level();
        let world = level.build_world().expect("default level is valid");
        // 3 rooms * 2 side walls + 6 free walls + 3 tables
        assert_eq!(world.wall_count(), 15);

        let registry = level.build_registry().expect("all puzzles registered");
        assert_eq!(registry.items().len(), 4);
    }

    #[test]
    fn test_room_side_walls() {
        let lounge = &default_level().rooms[0];
        let [left, right] = lounge.side_walls();
        assert_eq!(left.min, Vec3::new(-16.0, 0.0, -15.0));
        assert_eq!(left.max, Vec3::new(-14.0, 12.0, 15.0));
        assert_eq!(right.center().x, 15.0);
    }

    #[test]
    fn test_blocked_spawn_is_rejected() {
        let mut level = default_level();
        level.spawn = Vec3::new(-8.0, 0.0, 5.0); // under the lounge table
        assert!(matches!(level.build_world(), Err(WorldError::SpawnBlocked { .. })));
    }

    #[test]
    fn test_missing_prop_is_rejected() {
        let mut level = default_level();
        level.props.retain(|p| p.kind != PuzzleKind::Safe);
        assert!(matches!(
            level.build_registry(),
            Err(WorldError::MissingPuzzle(PuzzleKind::Safe))
        ));
    }
}
