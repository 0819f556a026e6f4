use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::dynamics::state::{EARTH_RADIUS, EARTH_ROTATION_RATE, G0};
use crate::error::{check, Result};
use crate::physics::gravity::GravityModel;

/// Constant wind. Direction is measured in the horizontal plane from +x
/// (blowing downrange) toward +z (blowing left to right).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,     // m/s
    pub direction: f64, // rad
}

impl Wind {
    pub fn new(speed: f64, direction: f64) -> Self {
        Self { speed, direction }
    }

    pub fn calm() -> Self {
        Self::default()
    }

    /// Air velocity vector.
    pub fn velocity(&self) -> Vector3<f64> {
        Vector3::new(
            self.speed * self.direction.cos(),
            0.0,
            self.speed * self.direction.sin(),
        )
    }

    /// Component pushing along +z.
    pub fn crosswind(&self) -> f64 {
        self.speed * self.direction.sin()
    }

    /// Component along +x (tailwind positive).
    pub fn tailwind(&self) -> f64 {
        self.speed * self.direction.cos()
    }
}

/// Atmosphere, gravity and planet description for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentParams {
    pub sea_level_temperature: f64, // K
    pub sea_level_pressure: f64,    // Pa
    pub lapse_rate: f64,            // K/m, caller supplies the sign
    pub gas_constant: f64,          // J/(kg·K)
    pub gravity: f64,               // m/s^2 at the surface
    pub gravity_model: GravityModel,
    pub use_barometric_pressure_correction: bool,
    pub wind: Wind,
    pub planetary_angular_velocity: Option<f64>, // rad/s
    pub planetary_radius: Option<f64>,           // m
}

impl Default for EnvironmentParams {
    fn default() -> Self {
        Self {
            sea_level_temperature: 288.15,
            sea_level_pressure: 101_325.0,
            lapse_rate: -0.0065,
            gas_constant: 287.05,
            gravity: G0,
            gravity_model: GravityModel::Uniform,
            use_barometric_pressure_correction: false,
            wind: Wind::calm(),
            planetary_angular_velocity: None,
            planetary_radius: None,
        }
    }
}

impl EnvironmentParams {
    /// Standard atmosphere on a rotating Earth with barometric pressure.
    pub fn earth() -> Self {
        Self {
            use_barometric_pressure_correction: true,
            planetary_angular_velocity: Some(EARTH_ROTATION_RATE),
            planetary_radius: Some(EARTH_RADIUS),
            ..Self::default()
        }
    }

    /// No air to speak of: zero sea-level pressure gives zero density.
    pub fn vacuum(gravity: f64) -> Self {
        Self { gravity, sea_level_pressure: 0.0, ..Self::default() }
    }

    pub fn with_wind(mut self, wind: Wind) -> Self {
        self.wind = wind;
        self
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check(
            "sea_level_temperature",
            self.sea_level_temperature,
            self.sea_level_temperature > 0.0,
            "must be positive",
        )?;
        check(
            "sea_level_pressure",
            self.sea_level_pressure,
            self.sea_level_pressure >= 0.0,
            "must be non-negative",
        )?;
        check("lapse_rate", self.lapse_rate, true, "")?;
        check("gas_constant", self.gas_constant, self.gas_constant > 0.0, "must be positive")?;
        check("gravity", self.gravity, self.gravity >= 0.0, "must be non-negative")?;
        check("wind.speed", self.wind.speed, self.wind.speed >= 0.0, "must be non-negative")?;
        check("wind.direction", self.wind.direction, true, "")?;
        if let Some(omega) = self.planetary_angular_velocity {
            check("planetary_angular_velocity", omega, true, "")?;
        }
        if let Some(r) = self.planetary_radius {
            check("planetary_radius", r, r > 0.0, "must be positive")?;
        }
        Ok(())
    }
}
