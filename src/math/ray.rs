//! Ray casting against axis-aligned boxes
//!
//! Used by the camera rig to find the first wall between the player and the
//! desired camera position.

use super::{Aabb, Vec3};

/// A 3D ray with origin and direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,  // Normalized
}

impl Ray {
    /// Create a new ray, normalizing the direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize()
        }
    }

    /// Get point at distance t along ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Slab test of a ray against a box.
///
/// Returns the distance along the ray where it enters the box, or None if
/// the box is missed or lies entirely behind the origin. An origin inside
/// the box reports a hit at distance 0.
pub fn ray_aabb_intersection(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    let axes = [
        (ray.origin.x, ray.direction.x, aabb.min.x, aabb.max.x),
        (ray.origin.y, ray.direction.y, aabb.min.y, aabb.max.y),
        (ray.origin.z, ray.direction.z, aabb.min.z, aabb.max.z),
    ];

    for (origin, dir, lo, hi) in axes {
        if dir.abs() < 1e-8 {
            // Parallel to this slab: must already be between its planes
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }
        let inv = 1.0 / dir;
        let mut t0 = (lo - origin) * inv;
        let mut t1 = (hi - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }

    if t_max < 0.0 {
        return None;  // Box behind ray origin
    }

    Some(t_min.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> Aabb {
        Aabb::new(Vec3::new(-5.0, 0.0, 4.0), Vec3::new(5.0, 12.0, 6.0))
    }

    #[test]
    fn test_ray_hits_wall_front_face() {
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        let t = ray_aabb_intersection(&ray, &wall()).expect("should hit");
        assert!((t - 4.0).abs() < 1e-5);
        assert!((ray.at(t).z - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses() {
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(ray_aabb_intersection(&ray, &wall()).is_none());

        let above = Ray::new(Vec3::new(0.0, 20.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(ray_aabb_intersection(&above, &wall()).is_none());
    }

    #[test]
    fn test_ray_origin_inside() {
        let ray = Ray::new(Vec3::new(0.0, 2.0, 5.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(ray_aabb_intersection(&ray, &wall()), Some(0.0));
    }
}
