//! Force composition for the point-mass model.
//!
//! [`ForceModel`] sums independently toggled contributions:
//!
//! 1. Gravity, uniform or inverse-square.
//! 2. Quadratic drag against the air-relative velocity, with density from
//!    [`AtmosphereModel`] at the current altitude.
//! 3. Wind, which only enters through the relative velocity used by drag.
//! 4. Coriolis deflection `sign * 2 ω v_y cos(lat)` along a chosen axis.
//! 5. Spin deflection `sign * k * spin² * sin(2 lat) / m` along a chosen axis.
//!
//! Terms 4 and 5 are simplified empirical corrections with explicitly
//! configured signs and axes. They are not a validated rotating-frame or
//! gyroscopic-drift model.

use std::f64::consts::FRAC_PI_4;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::dynamics::state::KinematicState;
use crate::error::{check, Result, SimError};
use crate::physics::aerodynamics::drag_accel;
use crate::physics::atmosphere::AtmosphereModel;
use crate::physics::environment::EnvironmentParams;
use crate::physics::gravity::{gravity_accel, GravityModel};
use crate::vehicle::ProjectileParams;

// ---------------------------------------------------------------------------
// Term configuration
// ---------------------------------------------------------------------------

/// Axis a deflection term acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeflectionAxis {
    Downrange,
    Vertical,
    Crossrange,
}

impl DeflectionAxis {
    pub fn unit(self) -> Vector3<f64> {
        match self {
            DeflectionAxis::Downrange => Vector3::x(),
            DeflectionAxis::Vertical => Vector3::y(),
            DeflectionAxis::Crossrange => Vector3::z(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TermSign {
    Positive,
    Negative,
}

impl TermSign {
    pub fn factor(self) -> f64 {
        match self {
            TermSign::Positive => 1.0,
            TermSign::Negative => -1.0,
        }
    }
}

/// Where the latitude-like angle of the deflection terms comes from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LatitudeSource {
    /// Fixed angle, rad.
    Fixed(f64),
    /// `atan2(y, sqrt(x² + (R + y)²))`, needs a planetary radius.
    FromPosition,
}

impl LatitudeSource {
    fn angle(self, state: &KinematicState, radius: Option<f64>) -> f64 {
        match (self, radius) {
            (LatitudeSource::Fixed(lat), _) => lat,
            (LatitudeSource::FromPosition, Some(r)) => {
                let (x, y) = (state.pos.x, state.pos.y);
                y.atan2(x.hypot(r + y))
            }
            // rejected at construction
            (LatitudeSource::FromPosition, None) => 0.0,
        }
    }

    fn validate(self, name: &'static str, radius: Option<f64>) -> Result<()> {
        match self {
            LatitudeSource::Fixed(lat) => check(name, lat, true, ""),
            LatitudeSource::FromPosition if radius.is_none() => Err(SimError::invalid(
                name,
                "position-derived latitude needs planetary_radius",
            )),
            LatitudeSource::FromPosition => Ok(()),
        }
    }
}

/// Coriolis deflection: `sign * 2 ω v_y cos(lat)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoriolisTerm {
    pub sign: TermSign,
    pub axis: DeflectionAxis,
    pub latitude: LatitudeSource,
}

impl Default for CoriolisTerm {
    /// Reduces to `+2 ω v_y` on the crossrange axis.
    fn default() -> Self {
        Self {
            sign: TermSign::Positive,
            axis: DeflectionAxis::Crossrange,
            latitude: LatitudeSource::Fixed(0.0),
        }
    }
}

/// Spin deflection: `sign * k * spin² * sin(2 lat) / m`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinTerm {
    /// `k`, m. Defaults to the projectile's equivalent radius.
    pub coefficient: Option<f64>,
    pub sign: TermSign,
    pub axis: DeflectionAxis,
    pub latitude: LatitudeSource,
}

impl Default for SpinTerm {
    fn default() -> Self {
        Self {
            coefficient: None,
            sign: TermSign::Positive,
            axis: DeflectionAxis::Crossrange,
            latitude: LatitudeSource::Fixed(FRAC_PI_4),
        }
    }
}

/// Which forces act during a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    pub gravity: bool,
    pub drag: bool,
    pub wind: bool,
    pub coriolis: Option<CoriolisTerm>,
    pub spin: Option<SpinTerm>,
}

impl ForceConfig {
    /// Nothing acts; straight-line motion unless guidance commands it.
    pub fn none() -> Self {
        Self { gravity: false, drag: false, wind: false, coriolis: None, spin: None }
    }

    pub fn vacuum() -> Self {
        Self { gravity: true, ..Self::none() }
    }

    pub fn drag_only() -> Self {
        Self { drag: true, ..Self::vacuum() }
    }

    pub fn with_wind() -> Self {
        Self { wind: true, ..Self::drag_only() }
    }

    pub fn with_coriolis() -> Self {
        Self { coriolis: Some(CoriolisTerm::default()), ..Self::with_wind() }
    }

    pub fn full() -> Self {
        Self { spin: Some(SpinTerm::default()), ..Self::with_coriolis() }
    }

    /// True when something other than guidance can bend the vertical
    /// velocity back toward the ground.
    pub fn can_reverse_vertical(&self) -> bool {
        let vertical = |axis: DeflectionAxis| axis == DeflectionAxis::Vertical;
        self.gravity
            || self.coriolis.map_or(false, |c| vertical(c.axis))
            || self.spin.map_or(false, |s| vertical(s.axis))
    }
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self::drag_only()
    }
}

// ---------------------------------------------------------------------------
// Force model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceKind {
    Gravity,
    Drag,
    Coriolis,
    Spin,
}

/// Validated, immutable force composition for one run.
#[derive(Debug, Clone)]
pub struct ForceModel {
    config: ForceConfig,
    atmosphere: AtmosphereModel,
    gravity_model: GravityModel,
    gravity: f64,
    wind: Vector3<f64>,
    planetary_radius: Option<f64>,
    angular_velocity: f64,
    mass: f64,
    cd: f64,
    area: f64,
    spin_rate: f64,
    spin_coefficient: f64,
}

impl ForceModel {
    pub fn new(config: &ForceConfig, projectile: &ProjectileParams, env: &EnvironmentParams) -> Result<Self> {
        projectile.validate()?;
        env.validate()?;

        if env.gravity_model == GravityModel::InverseSquare && env.planetary_radius.is_none() {
            return Err(SimError::invalid(
                "gravity_model",
                "inverse-square gravity needs planetary_radius",
            ));
        }

        let angular_velocity = match (config.coriolis, env.planetary_angular_velocity) {
            (Some(term), Some(omega)) => {
                term.latitude.validate("coriolis.latitude", env.planetary_radius)?;
                omega
            }
            (Some(_), None) => {
                return Err(SimError::invalid(
                    "planetary_angular_velocity",
                    "Coriolis term enabled without a planetary rotation rate",
                ))
            }
            (None, _) => 0.0,
        };

        let (spin_rate, spin_coefficient) = match (config.spin, projectile.spin_rate) {
            (Some(term), Some(rate)) => {
                term.latitude.validate("spin.latitude", env.planetary_radius)?;
                let k = term.coefficient.unwrap_or_else(|| projectile.equivalent_radius());
                check("spin.coefficient", k, true, "")?;
                (rate, k)
            }
            (Some(_), None) => {
                return Err(SimError::invalid("spin_rate", "spin term enabled on a non-spinning projectile"))
            }
            (None, _) => (0.0, 0.0),
        };

        if config.wind && !config.drag && env.wind.speed > 0.0 {
            log::warn!("wind enabled without drag; it has no effect on the trajectory");
        }

        log::debug!(
            "force model: gravity={} drag={} wind={} coriolis={} spin={}",
            config.gravity,
            config.drag,
            config.wind,
            config.coriolis.is_some(),
            config.spin.is_some()
        );

        Ok(Self {
            config: *config,
            atmosphere: AtmosphereModel::from_environment(env),
            gravity_model: env.gravity_model,
            gravity: env.gravity,
            wind: if config.wind { env.wind.velocity() } else { Vector3::zeros() },
            planetary_radius: env.planetary_radius,
            angular_velocity,
            mass: projectile.mass,
            cd: projectile.drag_coefficient,
            area: projectile.area,
            spin_rate,
            spin_coefficient,
        })
    }

    pub fn config(&self) -> &ForceConfig {
        &self.config
    }

    pub fn atmosphere(&self) -> &AtmosphereModel {
        &self.atmosphere
    }

    /// True when some term can change the direction of the velocity.
    /// Drag in still air only shortens it.
    pub fn can_turn_velocity(&self) -> bool {
        self.config.gravity
            || (self.config.drag && self.wind != Vector3::zeros())
            || self.config.coriolis.is_some()
            || self.config.spin.is_some()
    }

    /// Air-relative velocity seen by the drag term.
    pub fn relative_velocity(&self, state: &KinematicState) -> Vector3<f64> {
        state.vel - self.wind
    }

    /// Net acceleration at `state`, m/s^2.
    pub fn acceleration(&self, state: &KinematicState) -> Result<Vector3<f64>> {
        let mut accel = Vector3::zeros();
        for kind in [ForceKind::Gravity, ForceKind::Drag, ForceKind::Coriolis, ForceKind::Spin] {
            if let Some(a) = self.term(kind, state)? {
                accel += a;
            }
        }
        Ok(accel)
    }

    /// Individual contributions of every enabled term, in summation order.
    pub fn breakdown(&self, state: &KinematicState) -> Result<Vec<(ForceKind, Vector3<f64>)>> {
        let mut out = Vec::with_capacity(4);
        for kind in [ForceKind::Gravity, ForceKind::Drag, ForceKind::Coriolis, ForceKind::Spin] {
            if let Some(a) = self.term(kind, state)? {
                out.push((kind, a));
            }
        }
        Ok(out)
    }

    fn term(&self, kind: ForceKind, state: &KinematicState) -> Result<Option<Vector3<f64>>> {
        let a = match kind {
            ForceKind::Gravity if self.config.gravity => {
                gravity_accel(self.gravity_model, self.gravity, state.pos.y, self.planetary_radius)
            }
            ForceKind::Drag if self.config.drag => {
                let rho = self.atmosphere.density(state.pos.y)?;
                drag_accel(&self.relative_velocity(state), rho, self.cd, self.area, self.mass)
            }
            ForceKind::Coriolis => match self.config.coriolis {
                Some(term) => {
                    let lat = term.latitude.angle(state, self.planetary_radius);
                    let mag = 2.0 * self.angular_velocity * state.vel.y * lat.cos();
                    term.axis.unit() * (term.sign.factor() * mag)
                }
                None => return Ok(None),
            },
            ForceKind::Spin => match self.config.spin {
                Some(term) => {
                    let lat = term.latitude.angle(state, self.planetary_radius);
                    let force = self.spin_coefficient * self.spin_rate.powi(2) * (2.0 * lat).sin();
                    term.axis.unit() * (term.sign.factor() * force / self.mass)
                }
                None => return Ok(None),
            },
            _ => return Ok(None),
        };
        Ok(Some(a))
    }
}
