use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::dynamics::state::EARTH_RADIUS;

/// How surface gravity varies with altitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GravityModel {
    /// Constant `-g` on the vertical axis (flat earth).
    #[default]
    Uniform,
    /// `g * (R / (R + h))^2`, needs a planetary radius.
    InverseSquare,
}

/// Gravitational acceleration (y-up frame) at a given altitude.
pub fn gravity_accel(model: GravityModel, g: f64, altitude: f64, radius: Option<f64>) -> Vector3<f64> {
    let g = match model {
        GravityModel::Uniform => g,
        GravityModel::InverseSquare => {
            let r = radius.unwrap_or(EARTH_RADIUS);
            let alt = altitude.max(0.0);
            g * (r / (r + alt)).powi(2)
        }
    };
    Vector3::new(0.0, -g, 0.0)
}
