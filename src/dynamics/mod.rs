pub mod forces;
pub mod state;

pub use forces::{CoriolisTerm, DeflectionAxis, ForceConfig, ForceKind, ForceModel, LatitudeSource, SpinTerm, TermSign};
pub use state::{KinematicState, SimConfig, EARTH_RADIUS, EARTH_ROTATION_RATE, G0};
