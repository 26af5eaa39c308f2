//! N-body orbital simulation.
//!
//! Every fixed step, velocities are updated first for *all* bodies using
//! accelerations computed from the pre-step positions, then positions are
//! advanced in a second pass from the finalized velocities (semi-implicit
//! Euler). No body's motion within a step depends on another body's
//! already-updated position in the same step.

use bevy::prelude::*;

use crate::config::{BodyConfig, ConfigError, WorldConfig};

use super::components::BodyId;

/// Gravitational constant, folded to 1 by convention. Worlds override it
/// through [`WorldConfig::g`].
pub const G: f32 = 1.0;

/// Pairs closer than this contribute no acceleration. The direction between
/// coincident bodies is undefined and the inverse-square term has no finite
/// value there, so the pair is skipped instead of propagating NaN.
pub const MIN_DISTANCE_SQUARED: f32 = 1e-6;

/// A massive body participating in gravity.
///
/// Mass, radius, surface gravity and spin are fixed at construction except
/// through [`Body::rescale`]. Position and velocity change only inside the
/// integration step.
#[derive(Debug, Clone)]
pub struct Body {
    name: String,
    position: Vec3,
    velocity: Vec3,
    mass: f32,
    radius: f32,
    surface_gravity: f32,
    spin_speed: f32,
}

impl Body {
    pub fn new(name: &str, position: Vec3, velocity: Vec3, mass: f32, radius: f32) -> Self {
        debug_assert!(mass > 0.0, "body {} has non-positive mass", name);
        debug_assert!(radius >= 0.0, "body {} has negative radius", name);
        Self {
            name: name.to_owned(),
            position,
            velocity,
            mass,
            radius,
            surface_gravity: 0.0,
            spin_speed: 0.0,
        }
    }

    pub fn with_surface_gravity(mut self, surface_gravity: f32) -> Self {
        debug_assert!(surface_gravity >= 0.0);
        self.surface_gravity = surface_gravity;
        self
    }

    pub fn with_spin_speed(mut self, spin_speed: f32) -> Self {
        self.spin_speed = spin_speed;
        self
    }

    pub fn from_config(config: &BodyConfig) -> Self {
        Self::new(
            &config.name,
            Vec3::from_array(config.position),
            Vec3::from_array(config.velocity),
            config.mass,
            config.radius,
        )
        .with_surface_gravity(config.surface_gravity)
        .with_spin_speed(config.spin_speed)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// The constant acceleration this body applies to a grounded traveler.
    pub fn surface_gravity(&self) -> f32 {
        self.surface_gravity
    }

    pub fn spin_speed(&self) -> f32 {
        self.spin_speed
    }

    /// Replace mass and radius, e.g. after the visual mesh is rebuilt at a
    /// different scale. The physics radius must keep matching the mesh.
    pub fn rescale(&mut self, mass: f32, radius: f32) {
        debug_assert!(mass > 0.0, "body {} rescaled to non-positive mass", self.name);
        debug_assert!(radius >= 0.0, "body {} rescaled to negative radius", self.name);
        self.mass = mass;
        self.radius = radius;
    }
}

/// Net gravitational acceleration on each body from every other body,
/// evaluated at the current positions.
pub fn accumulate_accelerations(bodies: &[Body], g: f32) -> Vec<Vec3> {
    let mut accelerations = vec![Vec3::ZERO; bodies.len()];
    for i in 0..bodies.len() {
        for j in 0..bodies.len() {
            if i == j {
                continue;
            }
            let offset = bodies[j].position - bodies[i].position;
            let sqr_distance = offset.length_squared();
            if sqr_distance < MIN_DISTANCE_SQUARED {
                continue;
            }
            accelerations[i] += offset.normalize() * (g * bodies[j].mass / sqr_distance);
        }
    }
    accelerations
}

/// Advance all bodies by one fixed step.
pub fn step(bodies: &mut [Body], g: f32, dt: f32) {
    let accelerations = accumulate_accelerations(bodies, g);
    for (body, acceleration) in bodies.iter_mut().zip(accelerations.iter()) {
        body.velocity += *acceleration * dt;
    }
    for body in bodies.iter_mut() {
        body.position += body.velocity * dt;
    }
}

/// The body roster and the constants driving their mutual attraction.
///
/// Owns and exclusively mutates all [`Body`] state; every other consumer gets
/// an immutable view. The roster is fixed for the duration of a run.
#[derive(Resource, Debug, Clone)]
pub struct SolarSystem {
    bodies: Vec<Body>,
    g: f32,
    time_step: f32,
}

impl SolarSystem {
    pub fn new(bodies: Vec<Body>, g: f32, time_step: f32) -> Self {
        debug_assert!(!bodies.is_empty(), "solar system with no bodies");
        debug_assert!(time_step > 0.0, "non-positive time step");
        Self {
            bodies,
            g,
            time_step,
        }
    }

    /// Build a validated system from configuration.
    pub fn from_config(config: &WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(
            config.bodies.iter().map(Body::from_config).collect(),
            config.g,
            config.time_step,
        ))
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> &Body {
        &self.bodies[id.0]
    }

    pub fn g(&self) -> f32 {
        self.g
    }

    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    /// Advance the whole system by one fixed step.
    pub fn step(&mut self) {
        step(&mut self.bodies, self.g, self.time_step);
    }

    /// Total linear momentum of the body set.
    pub fn total_momentum(&self) -> Vec3 {
        self.bodies
            .iter()
            .map(|body| body.velocity * body.mass)
            .sum()
    }
}

/// All body integration for a tick runs in this set, strictly before any
/// traveler work in the same tick.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrbitSet;

/// Plugin to set up nbody physics.
pub struct NBodyPlugin;

impl Plugin for NBodyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<crate::physics::util::clock::SimClock>();
        app.add_systems(
            FixedUpdate,
            (NBodyPlugin::advance_clock, NBodyPlugin::step_bodies)
                .chain()
                .in_set(OrbitSet),
        );
    }
}

impl NBodyPlugin {
    fn advance_clock(
        mut clock: ResMut<crate::physics::util::clock::SimClock>,
        system: Res<SolarSystem>,
    ) {
        clock.advance(system.time_step());
    }

    fn step_bodies(mut system: ResMut<SolarSystem>) {
        system.step();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn two_equal_bodies(separation: f32) -> Vec<Body> {
        vec![
            Body::new("a", Vec3::new(-separation / 2.0, 0.0, 0.0), Vec3::ZERO, 5.0, 1.0),
            Body::new("b", Vec3::new(separation / 2.0, 0.0, 0.0), Vec3::ZERO, 5.0, 1.0),
        ]
    }

    #[test]
    fn equal_masses_get_equal_opposite_kicks() {
        let mut bodies = two_equal_bodies(10.0);
        step(&mut bodies, 1.0, 0.01);

        let dv_a = bodies[0].velocity;
        let dv_b = bodies[1].velocity;
        assert_relative_eq!(dv_a.length(), dv_b.length(), epsilon = 1e-6);
        assert_relative_eq!((dv_a + dv_b).length(), 0.0, epsilon = 1e-6);
        // Both kicks point toward the other body.
        assert!(dv_a.x > 0.0);
        assert!(dv_b.x < 0.0);
    }

    #[test]
    fn momentum_stays_near_zero_from_rest() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bodies: Vec<Body> = (0..6)
            .map(|i| {
                let position = Vec3::new(
                    rng.gen_range(-100.0..100.0),
                    rng.gen_range(-100.0..100.0),
                    rng.gen_range(-100.0..100.0),
                );
                Body::new(&format!("b{}", i), position, Vec3::ZERO, rng.gen_range(1.0..50.0), 1.0)
            })
            .collect();

        for _ in 0..200 {
            step(&mut bodies, 1.0, 0.01);
        }

        let momentum: Vec3 = bodies.iter().map(|b| b.velocity * b.mass).sum();
        assert!(
            momentum.length() < 1e-2,
            "net momentum drifted: {:?}",
            momentum
        );
    }

    #[test]
    fn coincident_bodies_stay_finite() {
        let position = Vec3::new(3.0, -2.0, 1.0);
        let mut bodies = vec![
            Body::new("a", position, Vec3::ZERO, 10.0, 1.0),
            Body::new("b", position, Vec3::ZERO, 10.0, 1.0),
        ];
        step(&mut bodies, 1.0, 0.01);

        for body in &bodies {
            assert!(body.position.is_finite(), "position went non-finite");
            assert!(body.velocity.is_finite(), "velocity went non-finite");
            // The degenerate pair contributes nothing at all.
            assert_relative_eq!(body.velocity.length(), 0.0);
        }
    }

    /// Max deviation of the satellite's orbit radius from its initial value
    /// over `steps` steps of size `dt`.
    fn orbit_radius_drift(dt: f32, steps: usize) -> f32 {
        let central_mass = 1000.0;
        let orbit_radius = 10.0;
        // Analytic circular-orbit speed around a (nearly) fixed central mass.
        let speed = (central_mass / orbit_radius).sqrt();
        let mut bodies = vec![
            Body::new("star", Vec3::ZERO, Vec3::ZERO, central_mass, 2.0),
            Body::new(
                "moon",
                Vec3::new(orbit_radius, 0.0, 0.0),
                Vec3::new(0.0, 0.0, speed),
                1e-3,
                0.1,
            ),
        ];

        let mut drift: f32 = 0.0;
        for _ in 0..steps {
            step(&mut bodies, 1.0, dt);
            let radius = (bodies[1].position - bodies[0].position).length();
            drift = drift.max((radius - orbit_radius).abs());
        }
        drift
    }

    #[test]
    fn circular_orbit_radius_stays_bounded() {
        // About one full orbit (period ~ 2*pi*r/v ~ 6.28).
        let drift = orbit_radius_drift(0.001, 7000);
        assert!(drift < 0.1, "orbit radius drifted by {}", drift);
    }

    #[test]
    fn halving_dt_tightens_orbit_drift() {
        let coarse = orbit_radius_drift(0.002, 3500);
        let fine = orbit_radius_drift(0.001, 7000);
        assert!(
            fine < coarse,
            "halving dt did not reduce drift: {} vs {}",
            fine,
            coarse
        );
    }

    #[test]
    fn system_steps_through_resource_wrapper() {
        let mut system = SolarSystem::new(two_equal_bodies(10.0), 1.0, 0.01);
        system.step();
        assert!(system.body(BodyId(0)).velocity().x > 0.0);
        assert_relative_eq!(system.total_momentum().length(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn rescale_replaces_mass_and_radius() {
        let mut body = Body::new("a", Vec3::ZERO, Vec3::ZERO, 10.0, 1.0);
        body.rescale(20.0, 2.0);
        assert_relative_eq!(body.mass(), 20.0);
        assert_relative_eq!(body.radius(), 2.0);
    }
}
