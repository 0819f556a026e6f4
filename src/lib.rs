//! Fixed-step ballistic trajectory engine.
//!
//! A point-mass projectile is advanced under a configurable set of forces
//! (gravity, altitude-dependent drag, wind, Coriolis and spin deflection)
//! until a termination condition holds. Two integrators can be coupled in a
//! [`sim::Duel`] with a steering callback from [`gnc`].

pub mod error;
pub mod physics;
pub mod dynamics;
pub mod vehicle;
pub mod sim;
pub mod gnc;
pub mod io;

pub use error::{Result, SimError};

pub mod types {
    pub use crate::dynamics::state::{KinematicState, SimConfig, EARTH_RADIUS, EARTH_ROTATION_RATE, G0};
    pub use crate::dynamics::forces::ForceConfig;
    pub use crate::physics::environment::{EnvironmentParams, Wind};
    pub use crate::sim::config::RunConfig;
    pub use crate::sim::termination::TerminationCondition;
    pub use crate::vehicle::{LaunchConditions, ProjectileParams};
}
