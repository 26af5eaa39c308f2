//! Whole-world tests: config through plugins through fixed ticks.

use bevy::prelude::*;

use solar_walker::config::{BodyConfig, TravelerConfig, WorldConfig};
use solar_walker::entities::EntitiesPluginGroup;
use solar_walker::physics::orbits::components::BodyId;
use solar_walker::physics::orbits::nbody::SolarSystem;
use solar_walker::physics::traveler::controller::{Stance, TravelerState, TravelerTunables};
use solar_walker::physics::traveler::input::TravelerInput;
use solar_walker::physics::PhysicsPluginGroup;

/// One static planet with a traveler dropped a little above its surface.
fn drop_world() -> WorldConfig {
    WorldConfig {
        g: 1.0,
        time_step: 0.02,
        bodies: vec![BodyConfig {
            name: "Home".into(),
            position: [0.0, 0.0, 0.0],
            velocity: [0.0, 0.0, 0.0],
            mass: 1000.0,
            radius: 10.0,
            surface_gravity: 10.0,
            spin_speed: 0.1,
        }],
        traveler: TravelerConfig {
            position: [0.0, 13.0, 0.0],
            movement_speed: 8.0,
            running_speed: 14.0,
            jump_impulse: 8.0,
            yaw_sensitivity: 2.0,
            smooth_time: 0.15,
            body_radius: 0.5,
        },
    }
}

fn build_app(config: &WorldConfig) -> App {
    let system = SolarSystem::from_config(config).expect("test world must validate");
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(system)
        .insert_resource(TravelerTunables::from(&config.traveler))
        .add_plugins(PhysicsPluginGroup)
        .add_plugins(EntitiesPluginGroup);
    // Run the startup schedules once so the entities exist.
    app.update();
    app
}

/// Drive the fixed-step loop directly for determinism.
fn tick(app: &mut App, count: usize) {
    for _ in 0..count {
        app.world.run_schedule(FixedUpdate);
    }
}

fn traveler_state(app: &mut App) -> TravelerState {
    let mut query = app.world.query::<&TravelerState>();
    query.single(&app.world).clone()
}

#[test]
fn bodies_spawn_with_components_and_synced_transforms() {
    let mut config = drop_world();
    config.bodies[0].velocity = [2.0, 0.0, 0.0];
    let mut app = build_app(&config);

    tick(&mut app, 1);

    let mut query = app.world.query::<(&BodyId, &Name, &Transform)>();
    let (id, name, transform) = query.single(&app.world);
    assert_eq!(*id, BodyId(0));
    assert_eq!(name.as_str(), "Home");

    // The entity transform mirrors the post-step simulator position.
    let translation = transform.translation;
    let system = app.world.resource::<SolarSystem>();
    assert_eq!(translation, system.body(BodyId(0)).position());
    assert!(translation.x > 0.0, "body did not move");
}

#[test]
fn dropped_traveler_lands_and_adopts_the_home_body() {
    let mut app = build_app(&drop_world());

    let before = traveler_state(&mut app);
    assert_eq!(before.stance, Stance::Airborne);

    tick(&mut app, 300);

    let state = traveler_state(&mut app);
    assert_eq!(state.stance, Stance::Grounded { home: BodyId(0) });
    assert_eq!(state.home_body(), Some(BodyId(0)));
    let stand_distance = 10.0 + 0.5;
    assert!(
        (state.position.length() - stand_distance).abs() < 1e-2,
        "not resting on the surface: {:?}",
        state.position
    );
}

#[test]
fn jump_through_the_full_stack_round_trips() {
    let mut app = build_app(&drop_world());
    tick(&mut app, 300);
    assert!(traveler_state(&mut app).stance.is_grounded());

    app.world.resource_mut::<TravelerInput>().jump = true;
    tick(&mut app, 1);
    assert_eq!(traveler_state(&mut app).stance, Stance::Airborne);
    // The press was consumed by the step that used it.
    assert!(!app.world.resource::<TravelerInput>().jump);

    tick(&mut app, 500);
    let state = traveler_state(&mut app);
    assert!(state.stance.is_grounded(), "traveler never landed again");
    let up = state.up();
    assert!(
        (up - Vec3::Y).length() < 1e-2,
        "did not stand back up: {:?}",
        up
    );
}

#[test]
fn traveler_transform_tracks_state() {
    let mut app = build_app(&drop_world());
    tick(&mut app, 10);

    let mut query = app.world.query::<(&TravelerState, &Transform)>();
    let (state, transform) = query.single(&app.world);
    assert_eq!(transform.translation, state.position);
    assert_eq!(transform.rotation, state.orientation);
}
