use bevy::prelude::*;

use solar_walker::config::WorldConfig;
use solar_walker::entities::EntitiesPluginGroup;
use solar_walker::physics::orbits::nbody::SolarSystem;
use solar_walker::physics::traveler::controller::TravelerTunables;
use solar_walker::physics::traveler::input::TravelerInput;
use solar_walker::physics::PhysicsPluginGroup;

fn main() {
    let config = load_config();
    let system = match SolarSystem::from_config(&config) {
        Ok(system) => system,
        Err(err) => {
            eprintln!("invalid world configuration: {}", err);
            std::process::exit(1);
        }
    };

    App::new()
        .add_plugins(DefaultPlugins)
        .insert_resource(Time::<Fixed>::from_seconds(config.time_step as f64))
        .insert_resource(system)
        .insert_resource(TravelerTunables::from(&config.traveler))
        .add_plugins(PhysicsPluginGroup)
        .add_plugins(EntitiesPluginGroup)
        .add_systems(Update, read_keyboard_input)
        .run();
}

/// The world file given on the command line, or the built-in demo world.
fn load_config() -> WorldConfig {
    let Some(path) = std::env::args().nth(1) else {
        return WorldConfig::demo();
    };
    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("cannot read world file {}: {}", path, err);
            std::process::exit(1);
        }
    };
    match WorldConfig::from_yaml(&source) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("cannot parse world file {}: {}", path, err);
            std::process::exit(1);
        }
    }
}

/// Maps keyboard state onto the traveler input interface. Any other input
/// backend can replace this system by writing [`TravelerInput`] itself.
fn read_keyboard_input(keyboard: Res<Input<KeyCode>>, mut input: ResMut<TravelerInput>) {
    let axis = |negative: KeyCode, positive: KeyCode| -> f32 {
        let mut value = 0.0;
        if keyboard.pressed(positive) {
            value += 1.0;
        }
        if keyboard.pressed(negative) {
            value -= 1.0;
        }
        value
    };

    input.forward = axis(KeyCode::S, KeyCode::W);
    input.right = axis(KeyCode::A, KeyCode::D);
    input.yaw = axis(KeyCode::E, KeyCode::Q);
    input.running = keyboard.pressed(KeyCode::ShiftLeft);
    if keyboard.just_pressed(KeyCode::Space) {
        input.jump = true;
    }
}
