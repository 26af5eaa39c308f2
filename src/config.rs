//! World configuration: the body roster, physics constants, and traveler
//! tunables, loadable from YAML at startup.
//!
//! # YAML format
//!
//! ```yaml
//! g: 1.0                      # gravitational constant
//! time_step: 0.02             # fixed physics step in seconds
//!
//! bodies:
//!   - name: "Sun"
//!     position: [0.0, 0.0, 0.0]
//!     velocity: [0.0, 0.0, 0.0]
//!     mass: 20000.0
//!     radius: 60.0
//!     surface_gravity: 100.0
//!     spin_speed: 0.04
//!   - name: "Earth"
//!     position: [400.0, 0.0, 0.0]
//!     velocity: [0.0, 0.0, 7.07]
//!     mass: 1000.0
//!     radius: 20.0
//!     surface_gravity: 100.0
//!     spin_speed: 0.1
//!
//! traveler:
//!   position: [400.0, 21.0, 0.0]
//!   movement_speed: 8.0
//!   running_speed: 14.0
//!   jump_impulse: 12.0
//!   yaw_sensitivity: 2.0
//!   smooth_time: 0.15
//!   body_radius: 0.9
//! ```
//!
//! All values are validated once by [`WorldConfig::validate`] before the
//! simulation schedule starts; nothing inside the fixed-step loop reports
//! configuration errors.

use serde::Deserialize;
use thiserror::Error;

/// A configuration value that failed validation at startup.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("body `{0}` has non-positive mass {1}")]
    NonPositiveMass(String, f32),

    #[error("body `{0}` has negative radius {1}")]
    NegativeRadius(String, f32),

    #[error("body `{0}` has negative surface gravity {1}")]
    NegativeSurfaceGravity(String, f32),

    #[error("body `{0}` has a non-finite field: {1}")]
    NonFinite(String, &'static str),

    #[error("time step must be positive, got {0}")]
    NonPositiveTimeStep(f32),

    #[error("at least one body must be configured")]
    NoBodies,

    #[error("traveler smooth time must be positive, got {0}")]
    NonPositiveSmoothTime(f32),
}

/// Initial state for one massive body.
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    pub mass: f32,
    pub radius: f32,
    /// Constant "stick" acceleration applied to a grounded traveler.
    pub surface_gravity: f32,
    /// Cosmetic spin about the body's local Y axis, in radians per second.
    #[serde(default)]
    pub spin_speed: f32,
}

/// Locomotion tunables and spawn point for the traveler.
#[derive(Deserialize, Debug, Clone)]
pub struct TravelerConfig {
    pub position: [f32; 3],
    pub movement_speed: f32,
    pub running_speed: f32,
    pub jump_impulse: f32,
    pub yaw_sensitivity: f32,
    /// Time constant of the locomotion smoothing, in seconds.
    pub smooth_time: f32,
    /// Radius of the traveler's contact volume.
    pub body_radius: f32,
}

/// Top-level world configuration.
#[derive(Deserialize, Debug, Clone)]
pub struct WorldConfig {
    /// Gravitational constant, folded to 1.0 by convention.
    pub g: f32,
    /// Fixed physics step in seconds.
    pub time_step: f32,
    pub bodies: Vec<BodyConfig>,
    pub traveler: TravelerConfig,
}

impl WorldConfig {
    /// Parse a world configuration from YAML.
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    /// Reject invalid setups before the simulation loop starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bodies.is_empty() {
            return Err(ConfigError::NoBodies);
        }
        if !(self.time_step > 0.0) {
            return Err(ConfigError::NonPositiveTimeStep(self.time_step));
        }
        if !(self.traveler.smooth_time > 0.0) {
            return Err(ConfigError::NonPositiveSmoothTime(self.traveler.smooth_time));
        }
        for body in &self.bodies {
            if !(body.mass > 0.0) {
                return Err(ConfigError::NonPositiveMass(body.name.clone(), body.mass));
            }
            if body.radius < 0.0 {
                return Err(ConfigError::NegativeRadius(body.name.clone(), body.radius));
            }
            if body.surface_gravity < 0.0 {
                return Err(ConfigError::NegativeSurfaceGravity(
                    body.name.clone(),
                    body.surface_gravity,
                ));
            }
            let finite = body.position.iter().all(|v| v.is_finite())
                && body.velocity.iter().all(|v| v.is_finite());
            if !finite {
                return Err(ConfigError::NonFinite(body.name.clone(), "position/velocity"));
            }
            if !body.mass.is_finite() || !body.radius.is_finite() {
                return Err(ConfigError::NonFinite(body.name.clone(), "mass/radius"));
            }
        }
        Ok(())
    }

    /// A small two-body demo world, used when no YAML file is supplied.
    pub fn demo() -> Self {
        Self {
            g: 1.0,
            time_step: 0.02,
            bodies: vec![
                BodyConfig {
                    name: "Sun".into(),
                    position: [0.0, 0.0, 0.0],
                    velocity: [0.0, 0.0, 0.0],
                    mass: 20000.0,
                    radius: 60.0,
                    surface_gravity: 100.0,
                    spin_speed: 0.04,
                },
                BodyConfig {
                    name: "Earth".into(),
                    position: [400.0, 0.0, 0.0],
                    velocity: [0.0, 0.0, 7.07],
                    mass: 1000.0,
                    radius: 20.0,
                    surface_gravity: 100.0,
                    spin_speed: 0.1,
                },
            ],
            traveler: TravelerConfig {
                position: [400.0, 21.0, 0.0],
                movement_speed: 8.0,
                running_speed: 14.0,
                jump_impulse: 12.0,
                yaw_sensitivity: 2.0,
                smooth_time: 0.15,
                body_radius: 0.9,
            },
        }
    }
}
