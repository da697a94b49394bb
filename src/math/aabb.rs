//! Axis-aligned bounding boxes

use serde::{Serialize, Deserialize};
use super::Vec3;

/// Axis-aligned box given by its min and max corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` with full edge lengths `size`
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Overlap test. Touching faces count as overlapping.
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(other.max.x < self.min.x || other.min.x > self.max.x
            || other.max.y < self.min.y || other.min.y > self.max.y
            || other.max.z < self.min.z || other.min.z > self.max.z)
    }

    /// Finite corners with min <= max on every axis
    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
            && self.min.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::from_center_size(Vec3::new(x, y, z), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_intersects() {
        let a = unit_at(0.0, 0.0, 0.0);
        assert!(a.intersects(&unit_at(0.5, 0.0, 0.0)));
        // Touching faces
        assert!(a.intersects(&unit_at(1.0, 0.0, 0.0)));
        assert!(!a.intersects(&unit_at(1.01, 0.0, 0.0)));
        assert!(!a.intersects(&unit_at(0.0, 0.0, -3.0)));
    }

    #[test]
    fn test_well_formed() {
        assert!(unit_at(0.0, 0.0, 0.0).is_well_formed());
        let inverted = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 1.0));
        assert!(!inverted.is_well_formed());
        let nan = Aabb::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(!nan.is_well_formed());
    }
}
