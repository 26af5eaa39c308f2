//! This module contains all the physics related code.
//!
//! When contributing to this module, please keep the following things in mind:
//! * The stepping and query functions are plain functions over plain data so
//!   they stay usable without a running app. Bevy systems are thin wrappers
//!   around them.
//! * Physics should be highly unit tested.

use bevy::app::{PluginGroup, PluginGroupBuilder};

pub mod orbits;
pub mod traveler;
pub mod util;

pub struct PhysicsPluginGroup;

impl PluginGroup for PhysicsPluginGroup {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(orbits::nbody::NBodyPlugin)
            .add(traveler::controller::TravelerPlugin)
    }
}
