//! Body entities.
//!
//! The simulator's roster is the authoritative physics state; each body also
//! gets an entity carrying the queryable components and a `Transform` kept in
//! sync every tick for rendering and camera collaborators. The mesh itself
//! comes from the procedural-sphere subsystem, which must use the same radius
//! the physics does.

use bevy::prelude::*;

use crate::physics::orbits::components::{
    BodyId, GravitationalField, Mass, Radius, SpinSpeed, SurfaceGravity, Velocity,
};
use crate::physics::orbits::nbody::{OrbitSet, SolarSystem};

/// A plugin that spawns the body entities and keeps them in sync.
pub struct BodiesPlugin;

impl Plugin for BodiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, Self::spawn_bodies);
        app.add_systems(
            FixedUpdate,
            (Self::sync_transforms, Self::spin_bodies)
                .chain()
                .after(OrbitSet),
        );
    }
}

impl BodiesPlugin {
    /// One entity per configured body, indexed back into the simulator by
    /// [`BodyId`].
    fn spawn_bodies(mut commands: Commands, system: Res<SolarSystem>) {
        info!("spawning {} bodies", system.bodies().len());
        for (index, body) in system.bodies().iter().enumerate() {
            debug!(
                "body {}: mass {}, radius {}, surface gravity {}",
                body.name(),
                body.mass(),
                body.radius(),
                body.surface_gravity()
            );
            commands.spawn((
                BodyId(index),
                Name::new(body.name().to_owned()),
                Mass(body.mass()),
                Radius(body.radius()),
                SurfaceGravity(body.surface_gravity()),
                Velocity(body.velocity()),
                SpinSpeed(body.spin_speed()),
                GravitationalField,
                SpatialBundle {
                    transform: Transform::from_translation(body.position()),
                    ..Default::default()
                },
            ));
        }
    }

    /// Copy simulator positions and velocities onto the entities after each
    /// integration step.
    fn sync_transforms(
        system: Res<SolarSystem>,
        mut bodies: Query<(&BodyId, &mut Transform, &mut Velocity)>,
    ) {
        for (id, mut transform, mut velocity) in bodies.iter_mut() {
            let body = system.body(*id);
            transform.translation = body.position();
            velocity.0 = body.velocity();
        }
    }

    /// Cosmetic spin about each body's local Y axis.
    fn spin_bodies(
        system: Res<SolarSystem>,
        mut bodies: Query<(&SpinSpeed, &mut Transform), With<BodyId>>,
    ) {
        let dt = system.time_step();
        for (spin, mut transform) in bodies.iter_mut() {
            if spin.0 != 0.0 {
                transform.rotate_local_y(spin.0 * dt);
            }
        }
    }
}
