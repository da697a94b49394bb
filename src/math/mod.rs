//! Vector math, boxes and rays for the gameplay core
//!
//! Kept free of macroquad types so collision, camera and interaction logic
//! stay testable without a window.

mod vec;
mod aabb;
mod ray;

pub use vec::Vec3;
pub use aabb::Aabb;
pub use ray::{Ray, ray_aabb_intersection};
