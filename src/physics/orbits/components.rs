#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use bevy::{ecs::component::Component, math::Vec3};
use derive_more::{Add, AddAssign, Sub, SubAssign, Sum};

/// Indicates that an entity emits a gravitational field.
#[derive(Component, Default, Debug, Clone, Copy)]
pub struct GravitationalField;

/// The mass of an entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Add, Sub, AddAssign, SubAssign, Sum)]
pub struct Mass(pub f32);

/// The velocity of an entity in units per second.
#[derive(Component, Debug, Clone, Copy, PartialEq, Add, Sub, AddAssign, SubAssign)]
pub struct Velocity(pub Vec3);

/// The radius of a body, used for surface-distance queries, not collision.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Radius(pub f32);

/// The constant acceleration a body applies to a traveler standing on it.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGravity(pub f32);

impl SurfaceGravity {
    /// Surface gravity consistent with a body's mass and radius.
    pub fn from_mass_radius(mass: Mass, radius: Radius, g: f32) -> Self {
        SurfaceGravity(g * mass.0 / (radius.0 * radius.0))
    }
}

/// Cosmetic spin about the body's local Y axis, in radians per second.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpinSpeed(pub f32);

/// Index of a body in the simulator's roster.
///
/// The body set is fixed for the whole run, so an index is a stable,
/// non-owning reference to a body. Also attached to the body's entity so
/// collaborators can map entities back to simulator state.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub usize);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn surface_gravity_from_mass_radius() {
        let sg = SurfaceGravity::from_mass_radius(Mass(1000.0), Radius(10.0), 1.0);
        assert_relative_eq!(sg.0, 10.0);
    }

    #[test]
    fn mass_sums() {
        let total: Mass = [Mass(1.0), Mass(2.0), Mass(3.0)].into_iter().sum();
        assert_relative_eq!(total.0, 6.0);
    }
}
