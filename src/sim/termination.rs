use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::dynamics::state::KinematicState;
use crate::error::{check, Result, SimError};
use crate::physics::environment::EnvironmentParams;

/// Predicate that ends a run. Exactly one per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TerminationCondition {
    /// Altitude drops below zero.
    GroundImpact,
    /// Altitude drops below a reference level.
    BelowAltitude { altitude: f64 },
    /// Below the curved planetary surface: `|(x, R + y)| < R`.
    SurfaceImpact,
    /// Within `epsilon` of a fixed point.
    WithinDistance { target: Vector3<f64>, epsilon: f64 },
}

impl Default for TerminationCondition {
    fn default() -> Self {
        TerminationCondition::GroundImpact
    }
}

/// Termination bound to the environment it is evaluated in.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Terminator {
    condition: TerminationCondition,
    radius: f64,
}

impl TerminationCondition {
    pub fn validate(&self, env: &EnvironmentParams) -> Result<()> {
        match self {
            TerminationCondition::GroundImpact => Ok(()),
            TerminationCondition::BelowAltitude { altitude } => {
                check("termination.altitude", *altitude, true, "")
            }
            TerminationCondition::SurfaceImpact if env.planetary_radius.is_none() => Err(
                SimError::invalid("termination", "surface impact needs planetary_radius"),
            ),
            TerminationCondition::SurfaceImpact => Ok(()),
            TerminationCondition::WithinDistance { target, epsilon } => {
                if !target.iter().all(|c| c.is_finite()) {
                    return Err(SimError::invalid("termination.target", "must be finite"));
                }
                check("termination.epsilon", *epsilon, *epsilon > 0.0, "must be positive")
            }
        }
    }

    /// Altitude whose downward crossing ends the run, if the condition is
    /// a flat level.
    pub fn crossing_altitude(&self) -> Option<f64> {
        match self {
            TerminationCondition::GroundImpact => Some(0.0),
            TerminationCondition::BelowAltitude { altitude } => Some(*altitude),
            _ => None,
        }
    }

    pub(crate) fn bind(&self, env: &EnvironmentParams) -> Result<Terminator> {
        self.validate(env)?;
        Ok(Terminator {
            condition: self.clone(),
            radius: env.planetary_radius.unwrap_or(0.0),
        })
    }
}

impl Terminator {
    pub fn condition(&self) -> &TerminationCondition {
        &self.condition
    }

    pub fn is_met(&self, state: &KinematicState) -> bool {
        match &self.condition {
            TerminationCondition::GroundImpact => state.pos.y < 0.0,
            TerminationCondition::BelowAltitude { altitude } => state.pos.y < *altitude,
            TerminationCondition::SurfaceImpact => surface_altitude(state, self.radius) < 0.0,
            TerminationCondition::WithinDistance { target, epsilon } => {
                (state.pos - target).norm() <= *epsilon
            }
        }
    }

    /// True when the current motion carries the state away from the
    /// termination region.
    pub fn is_receding(&self, state: &KinematicState) -> bool {
        match &self.condition {
            TerminationCondition::GroundImpact
            | TerminationCondition::BelowAltitude { .. }
            | TerminationCondition::SurfaceImpact => state.vel.y >= 0.0,
            TerminationCondition::WithinDistance { target, .. } => {
                (state.pos - target).dot(&state.vel) >= 0.0
            }
        }
    }
}

/// Height above a spherical surface of radius `r` centred at (0, -r, 0).
pub fn surface_altitude(state: &KinematicState, r: f64) -> f64 {
    state.pos.x.hypot(r + state.pos.y) - r
}
