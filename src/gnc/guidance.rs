use std::f64::consts::TAU;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::dynamics::forces::DeflectionAxis;
use crate::dynamics::state::KinematicState;
use crate::error::{check, Result};
use crate::gnc::controller::Guidance;

// ---------------------------------------------------------------------------
// Heuristic steering laws
// ---------------------------------------------------------------------------

/// Velocity pursuit of the other body's current position.
///
/// Commands `gain * (|v| * los - v)`, turning the velocity toward the line
/// of sight at constant speed. Magnitude clamped to `max_accel`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PursuitGuidance {
    /// 1/s.
    pub gain: f64,
    pub max_accel: f64,
}

impl PursuitGuidance {
    pub fn new(gain: f64) -> Self {
        Self { gain, max_accel: f64::INFINITY }
    }

    /// Bound the commanded magnitude, m/s^2. Must be finite and non-negative.
    pub fn with_max_accel(mut self, max_accel: f64) -> Result<Self> {
        check("max_accel", max_accel, max_accel >= 0.0, "must be non-negative")?;
        self.max_accel = max_accel;
        Ok(self)
    }
}

impl Guidance for PursuitGuidance {
    fn command(&mut self, own: &KinematicState, other: &KinematicState, _dt: f64) -> Vector3<f64> {
        let los = other.pos - own.pos;
        let dist = los.norm();
        if dist < 1e-9 || self.gain == 0.0 {
            return Vector3::zeros();
        }
        let desired = los / dist * own.speed();
        clamp_norm(self.gain * (desired - own.vel), self.max_accel)
    }

    fn name(&self) -> &str {
        "pursuit"
    }
}

/// Constant-speed steering in the horizontal plane: heading is the line of
/// sight bearing plus `bias_per_meter * distance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadingBiasGuidance {
    pub speed: f64,
    /// rad/m.
    pub bias_per_meter: f64,
}

impl HeadingBiasGuidance {
    pub fn new(speed: f64) -> Self {
        Self { speed, bias_per_meter: 0.01 }
    }
}

impl Guidance for HeadingBiasGuidance {
    fn command(&mut self, own: &KinematicState, other: &KinematicState, dt: f64) -> Vector3<f64> {
        let dx = other.pos.x - own.pos.x;
        let dz = other.pos.z - own.pos.z;
        let dist = dx.hypot(dz);
        let heading = dz.atan2(dx) + self.bias_per_meter * dist;
        let desired = Vector3::new(heading.cos(), 0.0, heading.sin()) * self.speed;
        let mut dv = desired - own.vel;
        dv.y = 0.0;
        // reach the desired horizontal velocity in one step
        dv / dt
    }

    fn name(&self) -> &str {
        "heading-bias"
    }
}

/// Sinusoidal lateral acceleration `amplitude * sin(2π f t)`.
///
/// Ignores the other body; meant for the target side of a duel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaveManeuver {
    pub amplitude: f64,
    /// Hz.
    pub frequency: f64,
    pub axis: DeflectionAxis,
}

impl Default for WeaveManeuver {
    fn default() -> Self {
        Self { amplitude: 0.1, frequency: 1.0, axis: DeflectionAxis::Crossrange }
    }
}

impl Guidance for WeaveManeuver {
    fn command(&mut self, own: &KinematicState, _other: &KinematicState, _dt: f64) -> Vector3<f64> {
        self.axis.unit() * (self.amplitude * (TAU * self.frequency * own.time).sin())
    }

    fn name(&self) -> &str {
        "weave"
    }
}

fn clamp_norm(v: Vector3<f64>, max: f64) -> Vector3<f64> {
    let n = v.norm();
    if n > max {
        v * (max / n)
    } else {
        v
    }
}
