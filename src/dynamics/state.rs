use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{check, Result};

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const G0: f64 = 9.80665; // standard gravity, m/s^2
pub const EARTH_RADIUS: f64 = 6_371_000.0; // mean Earth radius, m
pub const EARTH_ROTATION_RATE: f64 = 7.292_115_9e-5; // sidereal, rad/s

// ---------------------------------------------------------------------------
// Kinematic state: position, velocity, elapsed time
// ---------------------------------------------------------------------------

/// Point-mass state at a single instant.
/// Frame: x downrange, y up, z crossrange (right), origin at launch site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicState {
    pub time: f64,         // s
    pub pos: Vector3<f64>, // m
    pub vel: Vector3<f64>, // m/s
}

impl KinematicState {
    pub fn new(pos: Vector3<f64>, vel: Vector3<f64>) -> Self {
        Self { time: 0.0, pos, vel }
    }

    pub fn altitude(&self) -> f64 {
        self.pos.y
    }

    pub fn speed(&self) -> f64 {
        self.vel.norm()
    }

    /// Horizontal distance from the origin (x-z plane).
    pub fn ground_distance(&self) -> f64 {
        self.pos.x.hypot(self.pos.z)
    }

    pub fn distance_to(&self, other: &KinematicState) -> f64 {
        (self.pos - other.pos).norm()
    }

    pub fn is_finite(&self) -> bool {
        self.time.is_finite()
            && self.pos.iter().all(|c| c.is_finite())
            && self.vel.iter().all(|c| c.is_finite())
    }
}

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub dt: f64,          // integration timestep, s
    pub max_steps: usize, // hard stop
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        check("dt", self.dt, self.dt > 0.0, "must be positive")?;
        if self.max_steps == 0 {
            return Err(crate::SimError::invalid("max_steps", "must be at least 1"));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,             // 100 Hz, matches the reference scripts
            max_steps: 1_000_000, // ~2.8 h of flight at 100 Hz
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_and_distances() {
        let a = KinematicState::new(Vector3::new(3.0, 10.0, 4.0), Vector3::new(0.0, 3.0, 4.0));
        assert!((a.speed() - 5.0).abs() < 1e-12);
        assert!((a.ground_distance() - 5.0).abs() < 1e-12);
        let b = KinematicState::new(Vector3::new(3.0, 10.0, 0.0), Vector3::zeros());
        assert!((a.distance_to(&b) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn non_finite_state_detected() {
        let s = KinematicState::new(Vector3::new(f64::NAN, 0.0, 0.0), Vector3::zeros());
        assert!(!s.is_finite());
    }

    #[test]
    fn sim_config_rejects_bad_step() {
        assert!(SimConfig { dt: 0.0, max_steps: 10 }.validate().is_err());
        assert!(SimConfig { dt: f64::INFINITY, max_steps: 10 }.validate().is_err());
        assert!(SimConfig { dt: 0.01, max_steps: 0 }.validate().is_err());
        assert!(SimConfig::default().validate().is_ok());
    }
}
