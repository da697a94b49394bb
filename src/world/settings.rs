//! Player and camera tuning
//!
//! Stored on the level so each level file carries its own feel.

use serde::{Serialize, Deserialize};
use crate::math::{Aabb, Vec3};

/// Frame rate the per-frame increments were tuned at
pub const REFERENCE_FPS: f32 = 60.0;

/// How speeds turn into per-tick steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionTiming {
    /// Scale by measured frame delta (frame-rate independent)
    #[default]
    PerSecond,
    /// Fixed step per tick, as if every frame lasted 1/60 s.
    /// Faster machines move faster.
    PerFrame,
}

impl MotionTiming {
    /// Amount to advance this tick for a rate given in units per second
    pub fn step(self, rate_per_second: f32, delta_time: f32) -> f32 {
        match self {
            MotionTiming::PerSecond => rate_per_second * delta_time,
            MotionTiming::PerFrame => rate_per_second / REFERENCE_FPS,
        }
    }
}

/// Player movement, collision and interaction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Collision box half extent on X and Z
    pub collider_half_width: f32,
    /// Collision box height above the feet
    pub collider_height: f32,
    /// Forward/backward speed (units per second)
    pub walk_speed: f32,
    /// Turn rate (radians per second)
    pub turn_speed: f32,
    /// Per-second or per-frame stepping
    pub timing: MotionTiming,
    /// Seconds between footstep events while moving
    pub footstep_interval: f32,
    /// Interactables further than this are never selected
    pub interaction_radius: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            collider_half_width: 1.0,
            collider_height: 4.0,
            walk_speed: 15.0,   // 0.25 per frame at 60 Hz
            turn_speed: 4.8,    // 0.08 rad per frame at 60 Hz
            timing: MotionTiming::default(),
            footstep_interval: 0.4,
            interaction_radius: 8.0,
        }
    }
}

impl PlayerSettings {
    /// Collision box for a player standing at `position` (feet)
    pub fn collider_at(&self, position: Vec3) -> Aabb {
        let hw = self.collider_half_width;
        Aabb::new(
            Vec3::new(position.x - hw, position.y, position.z - hw),
            Vec3::new(position.x + hw, position.y + self.collider_height, position.z + hw),
        )
    }
}

/// Third-person follow camera settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Offset from the player in the player's local frame (up and behind)
    pub offset: Vec3,
    /// Height above the feet the occlusion ray starts from
    pub ray_height: f32,
    /// Distance kept in front of an obstructing wall
    pub backoff: f32,
    /// Fraction of the remaining distance covered per 60 Hz frame
    pub follow_blend: f32,
    /// Look-at height above the feet
    pub look_height: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 5.0, 8.0),
            ray_height: 2.0,
            backoff: 0.5,
            follow_blend: 0.1,
            look_height: 1.0,
        }
    }
}
