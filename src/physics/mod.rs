pub mod aerodynamics;
pub mod atmosphere;
pub mod environment;
pub mod gravity;

pub use atmosphere::{Atmo, AtmosphereModel};
pub use environment::{EnvironmentParams, Wind};
pub use gravity::{gravity_accel, GravityModel};
