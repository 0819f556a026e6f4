use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dynamics::forces::ForceConfig;
use crate::dynamics::state::SimConfig;
use crate::error::Result;
use crate::physics::environment::EnvironmentParams;
use crate::sim::termination::TerminationCondition;
use crate::vehicle::{presets, LaunchConditions, ProjectileParams};

/// Everything one trajectory run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub launch: LaunchConditions,
    pub projectile: ProjectileParams,
    #[serde(default)]
    pub environment: EnvironmentParams,
    #[serde(default)]
    pub forces: ForceConfig,
    #[serde(default)]
    pub termination: TerminationCondition,
    #[serde(default)]
    pub sim: SimConfig,
}

fn default_name() -> String {
    "scenario".into()
}

impl RunConfig {
    pub fn new(launch: LaunchConditions, projectile: ProjectileParams) -> Self {
        Self {
            name: default_name(),
            launch,
            projectile,
            environment: EnvironmentParams::default(),
            forces: ForceConfig::default(),
            termination: TerminationCondition::default(),
            sim: SimConfig::default(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_forces(mut self, forces: ForceConfig) -> Self {
        self.forces = forces;
        self
    }

    pub fn with_environment(mut self, environment: EnvironmentParams) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_termination(mut self, termination: TerminationCondition) -> Self {
        self.termination = termination;
        self
    }

    pub fn with_sim(mut self, sim: SimConfig) -> Self {
        self.sim = sim;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for RunConfig {
    /// Sphere bullet at 45°, drag only, ground impact.
    fn default() -> Self {
        Self::new(LaunchConditions::default(), presets::sphere_bullet())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn minimal_json_fills_defaults() {
        let json = r#"{
            "launch": { "speed": 800.0, "angle": 0.7853981633974483 },
            "projectile": { "mass": 0.01, "area": 7.85e-5, "drag_coefficient": 0.47 }
        }"#;
        let cfg = RunConfig::from_json_str(json).unwrap();
        assert_eq!(cfg.name, "scenario");
        assert_eq!(cfg.launch.height, 0.0);
        assert_eq!(cfg.forces, ForceConfig::drag_only());
        assert_eq!(cfg.termination, TerminationCondition::GroundImpact);
        assert_eq!(cfg.sim, SimConfig::default());
    }

    #[test]
    fn json_round_trip_preserves_config() {
        let cfg = RunConfig::default().named("full").with_forces(ForceConfig::full());
        let back = RunConfig::from_json_str(&cfg.to_json().unwrap()).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = RunConfig::from_json_str("{ \"launch\": 3 }").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }
}
