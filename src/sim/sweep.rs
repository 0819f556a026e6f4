use rayon::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::sim::config::RunConfig;
use crate::sim::runner::simulate;
use crate::sim::summary::TrajectorySummary;

// ---------------------------------------------------------------------------
// Launch-angle sweep
// ---------------------------------------------------------------------------

/// Outcome of one sweep point. `summary` is `None` when the run aborted.
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub angle: f64,
    pub summary: Option<TrajectorySummary>,
}

/// Run `base` once per elevation angle (rad), in parallel.
///
/// Every point gets its own integrator built from a clone of `base`.
/// Construction errors are returned; aborted runs yield `summary: None`.
pub fn sweep_launch_angles(base: &RunConfig, angles: &[f64]) -> Result<Vec<SweepPoint>> {
    log::debug!("sweeping {} launch angles for `{}`", angles.len(), base.name);
    angles
        .par_iter()
        .map(|&angle| {
            let mut cfg = base.clone();
            cfg.launch.angle = angle;
            let report = simulate(&cfg)?;
            let summary = if report.is_completed() { report.summary() } else { None };
            Ok(SweepPoint { angle, summary })
        })
        .collect()
}

/// Completed sweep point with the greatest range.
pub fn max_range_angle(points: &[SweepPoint]) -> Option<&SweepPoint> {
    points
        .iter()
        .filter(|p| p.summary.is_some())
        .max_by(|a, b| {
            let ra = a.summary.map_or(0.0, |s| s.range);
            let rb = b.summary.map_or(0.0, |s| s.range);
            ra.total_cmp(&rb)
        })
}

/// `n` evenly spaced angles from `start` to `end` inclusive.
pub fn angle_grid(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..n).map(|i| start + (end - start) * i as f64 / (n - 1) as f64).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::forces::ForceConfig;
    use crate::physics::environment::EnvironmentParams;
    use crate::vehicle::{presets, LaunchConditions};

    fn base(forces: ForceConfig) -> RunConfig {
        RunConfig::new(LaunchConditions::new(100.0, 0.0, 0.0), presets::sphere_bullet())
            .with_forces(forces)
            .with_environment(EnvironmentParams::default().with_gravity(9.8))
    }

    #[test]
    fn vacuum_optimum_is_near_45_degrees() {
        let angles = angle_grid(20f64.to_radians(), 70f64.to_radians(), 51);
        let points = sweep_launch_angles(&base(ForceConfig::vacuum()), &angles).unwrap();
        assert_eq!(points.len(), 51);
        let best = max_range_angle(&points).unwrap();
        assert!((best.angle.to_degrees() - 45.0).abs() <= 2.0);
    }

    #[test]
    fn drag_lowers_the_optimum() {
        let angles = angle_grid(20f64.to_radians(), 60f64.to_radians(), 41);
        let points = sweep_launch_angles(&base(ForceConfig::drag_only()), &angles).unwrap();
        let best = max_range_angle(&points).unwrap();
        assert!(best.angle.to_degrees() < 45.0);
    }

    #[test]
    fn invalid_base_is_an_error() {
        let mut cfg = base(ForceConfig::vacuum());
        cfg.projectile.mass = 0.0;
        assert!(sweep_launch_angles(&cfg, &[0.5]).is_err());
    }

    #[test]
    fn grid_endpoints() {
        let g = angle_grid(0.0, 1.0, 5);
        assert_eq!(g, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(angle_grid(0.0, 1.0, 0).is_empty());
    }
}
