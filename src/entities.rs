//! This module contains all the top level entities used in the game world.

use bevy::app::{PluginGroup, PluginGroupBuilder};

pub mod bodies;

pub struct EntitiesPluginGroup;

impl PluginGroup for EntitiesPluginGroup {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>().add(bodies::BodiesPlugin)
    }
}
