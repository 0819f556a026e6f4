use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::dynamics::state::KinematicState;
use crate::error::{check, Result, SimError};

/// How the projectile leaves the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchConditions {
    pub speed: f64, // m/s
    pub angle: f64, // rad above the horizontal
    #[serde(default)]
    pub height: f64, // m above `origin`
    #[serde(default)]
    pub azimuth: f64, // rad, from +x toward +z
    #[serde(default = "zero_origin")]
    pub origin: Vector3<f64>,
}

fn zero_origin() -> Vector3<f64> {
    Vector3::zeros()
}

impl LaunchConditions {
    pub fn new(speed: f64, angle: f64, height: f64) -> Self {
        Self { speed, angle, height, azimuth: 0.0, origin: Vector3::zeros() }
    }

    pub fn with_azimuth(mut self, azimuth: f64) -> Self {
        self.azimuth = azimuth;
        self
    }

    pub fn with_origin(mut self, origin: Vector3<f64>) -> Self {
        self.origin = origin;
        self
    }

    /// Launch from `from` aimed straight at `to`.
    pub fn toward(from: Vector3<f64>, to: Vector3<f64>, speed: f64) -> Result<Self> {
        let los = to - from;
        let horizontal = los.x.hypot(los.z);
        if los.norm() == 0.0 {
            return Err(SimError::invalid("launch.toward", "start and aim point coincide"));
        }
        Ok(Self {
            speed,
            angle: los.y.atan2(horizontal),
            height: 0.0,
            azimuth: los.z.atan2(los.x),
            origin: from,
        })
    }

    /// Speed that reaches `range` on flat ground in vacuum: v = sqrt(g R / sin 2θ).
    pub fn for_vacuum_range(range: f64, angle: f64, gravity: f64) -> Result<Self> {
        let s = (2.0 * angle).sin();
        if s <= 0.0 {
            return Err(SimError::invalid("launch.angle", "vacuum range needs 0 < angle < 90°"));
        }
        check("range", range, range >= 0.0, "must be non-negative")?;
        Ok(Self::new((gravity * range / s).sqrt(), angle, 0.0))
    }

    pub fn velocity(&self) -> Vector3<f64> {
        let (sin_e, cos_e) = self.angle.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        Vector3::new(
            self.speed * cos_e * cos_a,
            self.speed * sin_e,
            self.speed * cos_e * sin_a,
        )
    }

    pub fn initial_state(&self) -> KinematicState {
        KinematicState::new(self.origin + Vector3::new(0.0, self.height, 0.0), self.velocity())
    }

    pub fn validate(&self) -> Result<()> {
        check("launch.speed", self.speed, self.speed >= 0.0, "must be non-negative")?;
        check("launch.angle", self.angle, true, "")?;
        check("launch.height", self.height, true, "")?;
        check("launch.azimuth", self.azimuth, true, "")?;
        if !self.origin.iter().all(|c| c.is_finite()) {
            return Err(SimError::invalid("launch.origin", "must be finite"));
        }
        Ok(())
    }
}

impl Default for LaunchConditions {
    fn default() -> Self {
        Self::new(100.0, 45f64.to_radians(), 1.0)
    }
}
