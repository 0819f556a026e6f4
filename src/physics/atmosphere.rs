use crate::error::{Result, SimError};
use crate::physics::environment::EnvironmentParams;

// ---------------------------------------------------------------------------
// Lapse-rate atmosphere (single gradient layer)
// ---------------------------------------------------------------------------

const GAMMA: f64 = 1.4; // ratio of specific heats

/// Atmospheric properties at a given altitude.
#[derive(Debug, Clone, Copy)]
pub struct Atmo {
    pub density: f64,     // kg/m^3
    pub pressure: f64,    // Pa
    pub temperature: f64, // K
    pub sound_speed: f64, // m/s
}

/// Ideal-gas atmosphere with a linear temperature profile.
///
/// `T = T0 + lapse_rate * h`, `rho = P / (R * T)`. Pressure is either held
/// at the sea-level value or corrected with the barometric formula,
/// selected by `use_barometric_pressure_correction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereModel {
    pub sea_level_temperature: f64,
    pub sea_level_pressure: f64,
    pub lapse_rate: f64,
    pub gas_constant: f64,
    pub gravity: f64,
    pub use_barometric_pressure_correction: bool,
}

impl AtmosphereModel {
    pub fn from_environment(env: &EnvironmentParams) -> Self {
        Self {
            sea_level_temperature: env.sea_level_temperature,
            sea_level_pressure: env.sea_level_pressure,
            lapse_rate: env.lapse_rate,
            gas_constant: env.gas_constant,
            gravity: env.gravity,
            use_barometric_pressure_correction: env.use_barometric_pressure_correction,
        }
    }

    /// Local temperature, K. May be non-physical; see [`Self::density`].
    pub fn temperature(&self, altitude: f64) -> f64 {
        self.sea_level_temperature + self.lapse_rate * altitude
    }

    /// Local static pressure, Pa.
    pub fn pressure(&self, altitude: f64) -> Result<f64> {
        let t = self.checked_temperature(altitude)?;
        if !self.use_barometric_pressure_correction {
            return Ok(self.sea_level_pressure);
        }
        let t0 = self.sea_level_temperature;
        let p = if self.lapse_rate == 0.0 {
            isothermal_pressure(self.sea_level_pressure, altitude, t0, self.gas_constant, self.gravity)
        } else {
            gradient_pressure(self.sea_level_pressure, t, t0, self.lapse_rate, self.gas_constant, self.gravity)
        };
        if p.is_finite() {
            Ok(p)
        } else {
            Err(SimError::Domain { quantity: "pressure", value: p, altitude })
        }
    }

    /// Air density, kg/m^3. Fails when the temperature at `altitude` is not
    /// positive; callers abort rather than clamp.
    pub fn density(&self, altitude: f64) -> Result<f64> {
        let t = self.checked_temperature(altitude)?;
        let p = self.pressure(altitude)?;
        Ok(p / (self.gas_constant * t))
    }

    pub fn sample(&self, altitude: f64) -> Result<Atmo> {
        let temperature = self.checked_temperature(altitude)?;
        let pressure = self.pressure(altitude)?;
        Ok(Atmo {
            density: pressure / (self.gas_constant * temperature),
            pressure,
            temperature,
            sound_speed: (GAMMA * self.gas_constant * temperature).sqrt(),
        })
    }

    fn checked_temperature(&self, altitude: f64) -> Result<f64> {
        let t = self.temperature(altitude);
        if t > 0.0 && t.is_finite() {
            Ok(t)
        } else {
            Err(SimError::Domain { quantity: "temperature", value: t, altitude })
        }
    }
}

impl Default for AtmosphereModel {
    fn default() -> Self {
        Self::from_environment(&EnvironmentParams::default())
    }
}

// ---------------------------------------------------------------------------
// Pressure helpers
// ---------------------------------------------------------------------------

/// Gradient layer: P = P0 * (T / T0)^(-g / (R * L))
fn gradient_pressure(p0: f64, t: f64, t0: f64, lapse: f64, r: f64, g: f64) -> f64 {
    p0 * (t / t0).powf(-g / (r * lapse))
}

/// Isothermal layer: pressure decays exponentially
fn isothermal_pressure(p0: f64, h: f64, t0: f64, r: f64, g: f64) -> f64 {
    p0 * ((-g / (r * t0)) * h).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn barometric() -> AtmosphereModel {
        AtmosphereModel { use_barometric_pressure_correction: true, ..AtmosphereModel::default() }
    }

    #[test]
    fn sea_level_standard_values() {
        let a = barometric().sample(0.0).unwrap();
        assert!((a.temperature - 288.15).abs() < 0.01);
        assert!((a.pressure - 101_325.0).abs() < 1.0);
        assert!((a.density - 1.225).abs() < 0.001);
        assert!((a.sound_speed - 340.29).abs() < 0.2);
    }

    #[test]
    fn barometric_density_decreases() {
        let atm = barometric();
        let rho_0 = atm.density(0.0).unwrap();
        let rho_1k = atm.density(1_000.0).unwrap();
        let rho_10k = atm.density(10_000.0).unwrap();
        assert!(rho_0 > rho_1k);
        assert!(rho_1k > rho_10k);
        assert!(rho_10k > 0.0);
    }

    #[test]
    fn simple_variant_keeps_pressure() {
        let atm = AtmosphereModel::default();
        assert_eq!(atm.pressure(3_000.0).unwrap(), 101_325.0);
        let expected = 101_325.0 / (287.05 * (288.15 - 0.0065 * 3_000.0));
        assert!((atm.density(3_000.0).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn isothermal_layer_when_lapse_is_zero() {
        let atm = AtmosphereModel { lapse_rate: 0.0, ..barometric() };
        let p = atm.pressure(8_000.0).unwrap();
        assert!(p < 101_325.0 && p > 30_000.0);
        assert_eq!(atm.temperature(8_000.0), 288.15);
    }

    #[test]
    fn non_positive_temperature_is_domain_error() {
        let atm = AtmosphereModel::default();
        // 288.15 / 0.0065 ≈ 44.3 km
        let err = atm.density(50_000.0).unwrap_err();
        assert!(matches!(err, SimError::Domain { quantity: "temperature", .. }));
        assert!(barometric().density(50_000.0).is_err());
    }
}
