//! Follow Camera
//!
//! Third-person camera that sits up and behind the player, rotated with the
//! player's yaw. A short ray from above the player toward the desired spot
//! pulls the camera in front of any wall in between, so it never ends up
//! on the far side of geometry in tight corridors.

use crate::math::{ray_aabb_intersection, Ray, Vec3};
use crate::world::{CameraSettings, World, REFERENCE_FPS};
use super::controller::PlayerState;

/// Where the camera is and what it looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

#[derive(Debug, Clone)]
pub struct CameraRig {
    settings: CameraSettings,
    position: Vec3,
    /// False until the first follow places the camera
    placed: bool,
}

impl CameraRig {
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            settings,
            position: Vec3::ZERO,
            placed: false,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unobstructed camera spot: player position plus the yaw-rotated offset
    pub fn desired_position(&self, player: &PlayerState) -> Vec3 {
        player.position + self.settings.offset.rotate_y(player.yaw)
    }

    /// Start of the occlusion ray, raised to stay clear of the floor
    pub fn ray_origin(&self, player: &PlayerState) -> Vec3 {
        player.position + Vec3::new(0.0, self.settings.ray_height, 0.0)
    }

    /// Desired spot, pulled in front of the nearest wall the ray crosses
    pub fn resolve_target(&self, player: &PlayerState, world: &World) -> Vec3 {
        self.clamp_in_front(self.ray_origin(player), self.desired_position(player), world)
    }

    /// `point`, or the spot `backoff` short of the first wall crossed on
    /// the way to it from `origin`
    fn clamp_in_front(&self, origin: Vec3, point: Vec3, world: &World) -> Vec3 {
        let to_point = point - origin;
        let length = to_point.len();
        if length <= f32::EPSILON {
            return point;
        }

        let ray = Ray::new(origin, to_point);
        let nearest_hit = world
            .walls()
            .iter()
            .filter_map(|wall| ray_aabb_intersection(&ray, &wall.bounds))
            .filter(|&t| t < length)
            .fold(None, |best: Option<f32>, t| Some(best.map_or(t, |b| b.min(t))));

        match nearest_hit {
            Some(t) => ray.at((t - self.settings.backoff).max(0.0)),
            None => point,
        }
    }

    /// Point the camera looks at (torso rather than feet)
    pub fn look_target(&self, player: &PlayerState) -> Vec3 {
        player.position + Vec3::new(0.0, self.settings.look_height, 0.0)
    }

    /// Blend factor for this frame, equal to `follow_blend` at 60 Hz
    fn blend_factor(&self, delta_time: f32) -> f32 {
        let keep = (1.0 - self.settings.follow_blend).clamp(0.0, 1.0);
        1.0 - keep.powf(delta_time.max(0.0) * REFERENCE_FPS)
    }

    /// Move toward the resolved target and re-aim at the player.
    /// The first call places the camera directly on the target.
    ///
    /// The blended spot is clamped again from the ray origin, since the
    /// straight path from the old position can cut through a wall when the
    /// player turns near a corner.
    pub fn follow(&mut self, player: &PlayerState, world: &World, delta_time: f32) -> CameraPose {
        let target = self.resolve_target(player, world);
        if self.placed {
            let blended = self.position.lerp(target, self.blend_factor(delta_time));
            self.position = self.clamp_in_front(self.ray_origin(player), blended, world);
        } else {
            self.position = target;
            self.placed = true;
        }
        CameraPose {
            position: self.position,
            target: self.look_target(player),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Aabb;
    use std::f32::consts::TAU;

    /// A closed 8x8 box around the origin; inner faces at ±4
    fn closet() -> World {
        let mut builder = World::builder();
        let h = 12.0;
        builder.add_wall(Aabb::new(Vec3::new(-6.0, 0.0, -6.0), Vec3::new(6.0, h, -4.0))).unwrap();
        builder.add_wall(Aabb::new(Vec3::new(-6.0, 0.0, 4.0), Vec3::new(6.0, h, 6.0))).unwrap();
        builder.add_wall(Aabb::new(Vec3::new(-6.0, 0.0, -4.0), Vec3::new(-4.0, h, 4.0))).unwrap();
        builder.add_wall(Aabb::new(Vec3::new(4.0, 0.0, -4.0), Vec3::new(6.0, h, 4.0))).unwrap();
        builder.build()
    }

    #[test]
    fn test_unobstructed_target_is_desired() {
        let rig = CameraRig::new(CameraSettings::default());
        let player = PlayerState::new(Vec3::new(1.0, 0.0, 2.0), 0.0);
        let world = World::builder().build();
        assert_eq!(rig.resolve_target(&player, &world), Vec3::new(1.0, 5.0, 10.0));
    }

    #[test]
    fn test_offset_follows_yaw() {
        let rig = CameraRig::new(CameraSettings::default());
        let player = PlayerState::new(Vec3::ZERO, std::f32::consts::PI);
        let desired = rig.desired_position(&player);
        // Facing +Z, the camera sits on the -Z side
        assert!((desired.z + 8.0).abs() < 1e-4);
        assert!(desired.x.abs() < 1e-4);
    }

    #[test]
    fn test_wall_pulls_camera_in_for_any_yaw() {
        let rig = CameraRig::new(CameraSettings::default());
        let world = closet();
        let steps = 64;
        for i in 0..steps {
            let yaw = TAU * i as f32 / steps as f32;
            let player = PlayerState::new(Vec3::ZERO, yaw);
            let target = rig.resolve_target(&player, &world);

            assert!(target.x.abs() < 4.0 && target.z.abs() < 4.0, "yaw {} -> {:?}", yaw, target);
            // The ray meets an inner face at least 4 away; the backoff is 0.5
            let dist_to_origin = (target - rig.ray_origin(&player)).len();
            assert!(dist_to_origin >= 3.5 - 1e-3);
        }
    }

    #[test]
    fn test_turning_at_doorway_keeps_camera_out_of_walls() {
        let world = crate::world::default_level().build_world().unwrap();
        let mut rig = CameraRig::new(CameraSettings::default());
        // Just inside the lounge, beside the shoulder walls of the hallway door
        let mut player = PlayerState::new(Vec3::new(0.0, 0.0, -12.0), std::f32::consts::FRAC_PI_2);
        for _ in 0..120 {
            rig.follow(&player, &world, 1.0 / 60.0);
        }

        for frame in 0..160 {
            player.yaw += 0.08;
            let pose = rig.follow(&player, &world, 1.0 / 60.0);
            let eye = Aabb::new(pose.position, pose.position);
            for (index, wall) in world.walls().iter().enumerate() {
                assert!(
                    !wall.bounds.intersects(&eye),
                    "frame {}: camera {:?} inside wall {}",
                    frame,
                    pose.position,
                    index
                );
            }
        }
    }

    #[test]
    fn test_follow_blends() {
        let mut rig = CameraRig::new(CameraSettings::default());
        let world = World::builder().build();
        let mut player = PlayerState::new(Vec3::ZERO, 0.0);

        let first = rig.follow(&player, &world, 1.0 / 60.0);
        assert_eq!(first.position, Vec3::new(0.0, 5.0, 8.0));
        assert_eq!(first.target, Vec3::new(0.0, 1.0, 0.0));

        player.position = Vec3::new(10.0, 0.0, 0.0);
        let pose = rig.follow(&player, &world, 1.0 / 60.0);
        assert!((pose.position.x - 1.0).abs() < 1e-3);

        // Two half-length frames cover the same ground as one full frame
        let mut split = CameraRig::new(CameraSettings::default());
        split.follow(&PlayerState::new(Vec3::ZERO, 0.0), &world, 1.0 / 60.0);
        split.follow(&player, &world, 1.0 / 120.0);
        let pose = split.follow(&player, &world, 1.0 / 120.0);
        assert!((pose.position.x - 1.0).abs() < 1e-3);
    }
}
