use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{check, Result};

// ---------------------------------------------------------------------------
// Projectile physical parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileParams {
    pub mass: f64,             // kg
    pub area: f64,             // cross-sectional reference area, m^2
    pub drag_coefficient: f64, // dimensionless
    #[serde(default)]
    pub spin_rate: Option<f64>, // rad/s
    #[serde(default)]
    pub radius: Option<f64>, // m, when the area was derived from it
}

impl ProjectileParams {
    pub fn new(mass: f64, area: f64, drag_coefficient: f64) -> Self {
        Self { mass, area, drag_coefficient, spin_rate: None, radius: None }
    }

    /// Circular cross-section of the given radius.
    pub fn from_radius(mass: f64, radius: f64, drag_coefficient: f64) -> Self {
        Self {
            mass,
            area: PI * radius * radius,
            drag_coefficient,
            spin_rate: None,
            radius: Some(radius),
        }
    }

    pub fn with_spin(mut self, rad_per_s: f64) -> Self {
        self.spin_rate = Some(rad_per_s);
        self
    }

    pub fn with_spin_rpm(self, rpm: f64) -> Self {
        self.with_spin(rpm * 2.0 * PI / 60.0)
    }

    /// Radius of a circle with the reference area (or the declared radius).
    pub fn equivalent_radius(&self) -> f64 {
        self.radius.unwrap_or_else(|| (self.area / PI).sqrt())
    }

    /// Cd·A / m, the drag sensitivity of the body.
    pub fn drag_factor(&self) -> f64 {
        self.drag_coefficient * self.area / self.mass
    }

    pub fn validate(&self) -> Result<()> {
        check("mass", self.mass, self.mass > 0.0, "must be positive")?;
        check("area", self.area, self.area > 0.0, "must be positive")?;
        check(
            "drag_coefficient",
            self.drag_coefficient,
            self.drag_coefficient >= 0.0,
            "must be non-negative",
        )?;
        if let Some(spin) = self.spin_rate {
            check("spin_rate", spin, true, "")?;
        }
        if let Some(r) = self.radius {
            check("radius", r, r > 0.0, "must be positive")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Preset projectiles
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// 10 g sphere, 5 mm radius.
    pub fn sphere_bullet() -> ProjectileParams {
        ProjectileParams::from_radius(0.01, 0.005, 0.47)
    }

    /// 50 g spin-stabilised round, 5 mm radius.
    pub fn rifle_bullet() -> ProjectileParams {
        ProjectileParams::from_radius(0.05, 0.005, 0.47).with_spin_rpm(500.0)
    }

    /// Heavy interceptor airframe.
    pub fn interceptor() -> ProjectileParams {
        ProjectileParams::new(1000.0, 20.0, 0.5)
    }

    /// Lighter target rocket.
    pub fn target_rocket() -> ProjectileParams {
        ProjectileParams::new(500.0, 10.0, 0.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_from_radius() {
        let p = ProjectileParams::from_radius(0.01, 0.005, 0.47);
        assert!((p.area - 7.853_981_6e-5).abs() < 1e-12);
        assert!((p.equivalent_radius() - 0.005).abs() < 1e-15);
    }

    #[test]
    fn equivalent_radius_without_declared_radius() {
        let p = ProjectileParams::new(1.0, PI * 0.04, 0.3);
        assert!((p.equivalent_radius() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn rpm_conversion() {
        let p = presets::rifle_bullet();
        let spin = p.spin_rate.unwrap();
        assert!((spin - 52.359_877_6).abs() < 1e-6);
    }

    #[test]
    fn rejects_non_physical_bodies() {
        assert!(ProjectileParams::new(0.0, 0.01, 0.3).validate().is_err());
        assert!(ProjectileParams::new(1.0, -0.01, 0.3).validate().is_err());
        assert!(ProjectileParams::new(1.0, 0.01, -0.1).validate().is_err());
        assert!(ProjectileParams::new(1.0, 0.01, 0.0).validate().is_ok());
        assert!(ProjectileParams::new(1.0, 0.01, 0.3).with_spin(f64::NAN).validate().is_err());
    }
}
