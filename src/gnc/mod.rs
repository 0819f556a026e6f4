pub mod controller;
pub mod guidance;

pub use controller::Guidance;
pub use guidance::{HeadingBiasGuidance, PursuitGuidance, WeaveManeuver};
