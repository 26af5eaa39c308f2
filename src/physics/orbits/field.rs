//! Point queries against the gravity field of the body set.
//!
//! A pure query with no side effects: callers hand in a point and the body
//! slice and get back the net pull plus the nearest body by *surface*
//! distance. Tests use it directly without a live simulation.

use bevy::math::Vec3;
use itertools::Itertools;

use super::components::BodyId;
use super::nbody::{Body, MIN_DISTANCE_SQUARED};

/// Result of sampling the gravity field at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravitySample {
    /// Net attractive acceleration from all bodies.
    pub acceleration: Vec3,
    /// Body with the smallest surface distance, `None` for an empty world.
    pub nearest: Option<BodyId>,
    /// Surface distance to `nearest`, infinite for an empty world.
    pub surface_distance: f32,
}

impl GravitySample {
    /// The sentinel returned when no bodies exist: zero pull, no nearest.
    pub const EMPTY: Self = Self {
        acceleration: Vec3::ZERO,
        nearest: None,
        surface_distance: f32::INFINITY,
    };
}

/// Sample the net gravitational acceleration and nearest body at `point`.
///
/// Nearest is decided by surface distance (center distance minus radius), so
/// larger bodies reach out further than their centers suggest. Ties go to the
/// first body in iteration order.
pub fn sample(point: Vec3, bodies: &[Body], g: f32) -> GravitySample {
    let mut acceleration = Vec3::ZERO;
    let mut surface_distances = Vec::with_capacity(bodies.len());

    for body in bodies {
        let offset = body.position() - point;
        let sqr_distance = offset.length_squared();
        surface_distances.push(sqr_distance.sqrt() - body.radius());
        // Same degenerate-pair policy as the body integrator.
        if sqr_distance < MIN_DISTANCE_SQUARED {
            continue;
        }
        acceleration += offset.normalize() * (g * body.mass() / sqr_distance);
    }

    match surface_distances
        .iter()
        .position_min_by(|a, b| a.total_cmp(*b))
    {
        Some(index) => GravitySample {
            acceleration,
            nearest: Some(BodyId(index)),
            surface_distance: surface_distances[index],
        },
        None => GravitySample::EMPTY,
    }
}
