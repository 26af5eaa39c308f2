//! The traveler: a physically simulated agent standing on, walking over and
//! jumping between the bodies of the solar system.

pub mod controller;
pub mod input;
