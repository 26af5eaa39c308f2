//! A small solar system you can walk on.
//!
//! A handful of massive bodies orbit each other under Newtonian gravity while
//! a traveler walks on whichever body currently owns the strongest local pull,
//! re-orienting to stand upright on its changing "down" direction.

pub mod config;
pub mod entities;
pub mod physics;

pub use config::{BodyConfig, ConfigError, TravelerConfig, WorldConfig};
pub use physics::orbits::field::{sample, GravitySample};
pub use physics::orbits::nbody::{Body, SolarSystem};
pub use physics::orbits::components::BodyId;
pub use physics::traveler::controller::{Stance, TravelerState};
