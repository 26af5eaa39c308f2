//! The traveler controller: stance state machine, re-orientation and
//! locomotion.
//!
//! The stepping logic is pure functions over [`TravelerState`] and the body
//! slice; the Bevy systems below are thin wrappers that feed them the current
//! tick's data. Within one fixed tick the body integration ([`OrbitSet`])
//! completes before anything here runs, so the traveler always observes the
//! current tick's body positions.

use bevy::prelude::*;
use strum_macros::Display;

use crate::config::TravelerConfig;
use crate::physics::orbits::components::BodyId;
use crate::physics::orbits::field::{self, GravitySample};
use crate::physics::orbits::nbody::{Body, OrbitSet, SolarSystem};
use crate::physics::util::clock::SimClock;
use crate::physics::util::math;

use super::input::TravelerInput;

/// All traveler systems for a tick run in this set, after [`OrbitSet`].
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TravelerSet;

/// Whether the traveler is standing on a body or falling between them.
#[derive(Debug, Clone, Copy, PartialEq, Display)]
pub enum Stance {
    /// Standing on `home`, the body treated as the local "down" reference.
    Grounded {
        /// Index of the body the traveler is standing on.
        home: BodyId,
    },
    /// No ground reference; yaw input is locked.
    Airborne,
}

impl Stance {
    pub fn is_grounded(&self) -> bool {
        matches!(self, Stance::Grounded { .. })
    }

    /// The current home body, if any.
    pub fn home(&self) -> Option<BodyId> {
        match self {
            Stance::Grounded { home } => Some(*home),
            Stance::Airborne => None,
        }
    }
}

/// Locomotion tunables, fixed for a session.
#[derive(Resource, Debug, Clone, Copy)]
pub struct TravelerTunables {
    pub spawn_position: Vec3,
    pub movement_speed: f32,
    pub running_speed: f32,
    pub jump_impulse: f32,
    /// Radians per second of turn at full yaw input.
    pub yaw_sensitivity: f32,
    /// Time constant of the locomotion smoothing, in seconds.
    pub smooth_time: f32,
    /// Radius of the traveler's contact volume.
    pub body_radius: f32,
}

impl From<&TravelerConfig> for TravelerTunables {
    fn from(config: &TravelerConfig) -> Self {
        Self {
            spawn_position: Vec3::from_array(config.position),
            movement_speed: config.movement_speed,
            running_speed: config.running_speed,
            jump_impulse: config.jump_impulse,
            yaw_sensitivity: config.yaw_sensitivity,
            smooth_time: config.smooth_time,
            body_radius: config.body_radius,
        }
    }
}

/// Report that the traveler's contact volume reached a body's surface.
///
/// The sole trigger of the airborne-to-grounded transition. Emitted by the
/// built-in detector below, or by an external collision source.
#[derive(Event, Debug, Clone, Copy)]
pub struct GroundContact {
    pub body: BodyId,
}

/// The traveler's full physical state.
#[derive(Component, Debug, Clone)]
pub struct TravelerState {
    pub position: Vec3,
    /// World-space velocity from gravity, riding the home body, and impulses.
    /// Smoothed locomotion is carried separately in `smooth_velocity`.
    pub velocity: Vec3,
    pub orientation: Quat,
    pub stance: Stance,
    smooth_velocity: Vec3,
    damp_velocity: Vec3,
}

impl TravelerState {
    /// A traveler at `position`, airborne until a ground contact arrives.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            stance: Stance::Airborne,
            smooth_velocity: Vec3::ZERO,
            damp_velocity: Vec3::ZERO,
        }
    }

    /// Local up in world space.
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    /// Smoothed locomotion velocity, world space.
    pub fn smooth_velocity(&self) -> Vec3 {
        self.smooth_velocity
    }

    /// The body currently treated as "down", if grounded.
    pub fn home_body(&self) -> Option<BodyId> {
        self.stance.home()
    }
}

/// Push the traveler out of the body it is standing in and cancel any
/// remaining inward motion relative to that body. Never pulls the traveler
/// down; the stick acceleration does that.
fn support_on_surface(state: &mut TravelerState, body: &Body, body_radius: f32) {
    let offset = state.position - body.position();
    let distance = offset.length();
    let stand_distance = body.radius() + body_radius;
    if distance >= stand_distance || distance <= f32::EPSILON {
        return;
    }
    let normal = offset / distance;
    state.position = body.position() + normal * stand_distance;
    let inward = (state.velocity - body.velocity()).dot(normal);
    if inward < 0.0 {
        state.velocity -= normal * inward;
    }
}

/// The airborne-to-grounded edge: adopt `home` as the down reference, stop
/// relative to it, and come to rest on its surface.
pub fn land(state: &mut TravelerState, home: BodyId, bodies: &[Body], body_radius: f32) {
    let body = &bodies[home.0];
    state.stance = Stance::Grounded { home };
    state.velocity = body.velocity();
    support_on_surface(state, body, body_radius);
}

/// Advance the traveler by one fixed step.
///
/// Orientation follows the full multi-body pull in both stances; the grounded
/// "stick" acceleration comes from the home body's surface-gravity constant
/// alone, so a distant massive body cannot yank a grounded traveler off a
/// small moon mid-step. With no bodies at all this degrades to coasting on
/// the last velocity with no re-orientation.
pub fn step_traveler(
    state: &mut TravelerState,
    input: TravelerInput,
    bodies: &[Body],
    g: f32,
    tunables: &TravelerTunables,
    dt: f32,
) {
    let sample = field::sample(state.position, bodies, g);

    reorient_from_sample(state, &sample, input.yaw, tunables.yaw_sensitivity, dt);

    // Locomotion target in the local frame, smoothed toward rather than
    // applied instantaneously.
    let speed = if input.running {
        tunables.running_speed
    } else {
        tunables.movement_speed
    };
    let local = Vec3::new(input.right, 0.0, -input.forward);
    let target = state.orientation * local.normalize_or_zero() * speed;
    state.smooth_velocity = math::smooth_damp(
        state.smooth_velocity,
        target,
        &mut state.damp_velocity,
        tunables.smooth_time,
        dt,
    );

    let up = state.up();
    match (state.stance, sample.nearest) {
        (Stance::Grounded { .. }, Some(nearest)) => {
            // The down reference follows the field's nearest body every step;
            // on a normal stand this is the body under the feet.
            let home = nearest;
            state.stance = Stance::Grounded { home };
            let body = &bodies[home.0];
            if input.jump {
                state.velocity = body.velocity() + up * tunables.jump_impulse;
                state.stance = Stance::Airborne;
                state.position += (state.velocity + state.smooth_velocity) * dt;
            } else {
                // Ride the home body; its surface-gravity constant presses
                // the traveler onto the surface, and the surface pushes back.
                state.velocity = body.velocity() - up * body.surface_gravity() * dt;
                state.position += (state.velocity + state.smooth_velocity) * dt;
                support_on_surface(state, body, tunables.body_radius);
            }
        }
        (Stance::Grounded { .. }, None) => {
            // Grounded with no bodies left to stand on cannot normally
            // happen; degrade to coasting rather than crash.
            state.stance = Stance::Airborne;
            state.position += (state.velocity + state.smooth_velocity) * dt;
        }
        (Stance::Airborne, _) => {
            state.velocity += sample.acceleration * dt;
            state.position += (state.velocity + state.smooth_velocity) * dt;
        }
    }
}

/// Blend local up toward the negated net pull; yaw only with ground under
/// the feet.
fn reorient_from_sample(
    state: &mut TravelerState,
    sample: &GravitySample,
    yaw_input: f32,
    yaw_sensitivity: f32,
    dt: f32,
) {
    let Some(direction) = sample.acceleration.try_normalize() else {
        // Zero-gravity sentinel: keep the last orientation.
        return;
    };
    let yaw = if state.stance.is_grounded() {
        yaw_input * yaw_sensitivity * dt
    } else {
        0.0
    };
    state.orientation = math::reorient(state.orientation, -direction, yaw);
}

/// Plugin wiring the traveler into the fixed-step loop.
pub struct TravelerPlugin;

impl Plugin for TravelerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TravelerInput>();
        app.add_event::<GroundContact>();
        app.configure_sets(FixedUpdate, TravelerSet.after(OrbitSet));
        app.add_systems(Startup, TravelerPlugin::spawn_traveler);
        app.add_systems(
            FixedUpdate,
            (
                TravelerPlugin::detect_ground_contact,
                TravelerPlugin::land_on_contact,
                TravelerPlugin::step,
                TravelerPlugin::sync_transform,
            )
                .chain()
                .in_set(TravelerSet),
        );
    }
}

impl TravelerPlugin {
    fn spawn_traveler(mut commands: Commands, tunables: Res<TravelerTunables>) {
        info!("spawning traveler at {}", tunables.spawn_position);
        commands.spawn((
            TravelerState::new(tunables.spawn_position),
            SpatialBundle {
                transform: Transform::from_translation(tunables.spawn_position),
                ..Default::default()
            },
        ));
    }

    /// Built-in contact source: reports the nearest body once the traveler's
    /// contact volume reaches its surface. A collision backend can replace
    /// this by writing [`GroundContact`] events itself.
    fn detect_ground_contact(
        traveler: Query<&TravelerState>,
        system: Res<SolarSystem>,
        tunables: Res<TravelerTunables>,
        mut contacts: EventWriter<GroundContact>,
    ) {
        let Ok(state) = traveler.get_single() else {
            return;
        };
        if state.stance.is_grounded() {
            return;
        }
        let sample = field::sample(state.position, system.bodies(), system.g());
        if let Some(body) = sample.nearest {
            if sample.surface_distance <= tunables.body_radius {
                contacts.send(GroundContact { body });
            }
        }
    }

    fn land_on_contact(
        mut traveler: Query<&mut TravelerState>,
        system: Res<SolarSystem>,
        tunables: Res<TravelerTunables>,
        clock: Res<SimClock>,
        mut contacts: EventReader<GroundContact>,
    ) {
        let Ok(mut state) = traveler.get_single_mut() else {
            return;
        };
        for contact in contacts.read() {
            if state.stance.is_grounded() {
                continue;
            }
            land(&mut state, contact.body, system.bodies(), tunables.body_radius);
            debug!(
                "tick {}: landed on {}",
                clock.tick(),
                system.body(contact.body).name()
            );
        }
    }

    fn step(
        mut traveler: Query<&mut TravelerState>,
        mut input: ResMut<TravelerInput>,
        system: Res<SolarSystem>,
        tunables: Res<TravelerTunables>,
        clock: Res<SimClock>,
    ) {
        let Ok(mut state) = traveler.get_single_mut() else {
            return;
        };
        let mut tick_input = *input;
        tick_input.jump = input.take_jump() && state.stance.is_grounded();
        if tick_input.jump {
            debug!("tick {}: jumped, stance {} -> Airborne", clock.tick(), state.stance);
        }
        step_traveler(
            &mut state,
            tick_input,
            system.bodies(),
            system.g(),
            &tunables,
            system.time_step(),
        );
    }

    fn sync_transform(mut traveler: Query<(&TravelerState, &mut Transform)>) {
        for (state, mut transform) in traveler.iter_mut() {
            transform.translation = state.position;
            transform.rotation = state.orientation;
        }
    }
}
