pub mod launch;
pub mod projectile;

pub use launch::LaunchConditions;
pub use projectile::{presets, ProjectileParams};
