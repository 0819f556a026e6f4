use serde::Serialize;

use crate::dynamics::state::KinematicState;

/// Headline numbers of one trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectorySummary {
    /// Horizontal distance from launch to the crossing point, m.
    /// Linearly interpolated between the last two samples when the run
    /// ended on a flat altitude crossing.
    pub range: f64,
    /// Highest altitude reached, m.
    pub apex: f64,
    pub apex_time: f64,
    pub flight_time: f64,
    pub impact_speed: f64,
    /// Final crossrange offset, m.
    pub lateral_drift: f64,
}

impl TrajectorySummary {
    /// `None` for an empty sample list.
    pub fn from_samples(samples: &[KinematicState], crossing: Option<f64>) -> Option<Self> {
        let first = samples.first()?;
        let last = samples.last()?;

        let apex_state = samples
            .iter()
            .fold(first, |best, s| if s.pos.y > best.pos.y { s } else { best });

        let end = match (crossing, samples.len()) {
            (Some(level), n) if n >= 2 => {
                let prev = &samples[n - 2];
                let dy = last.pos.y - prev.pos.y;
                if prev.pos.y >= level && last.pos.y < level && dy != 0.0 {
                    let f = (level - prev.pos.y) / dy;
                    prev.pos + (last.pos - prev.pos) * f
                } else {
                    last.pos
                }
            }
            _ => last.pos,
        };
        let dx = end.x - first.pos.x;
        let dz = end.z - first.pos.z;

        Some(Self {
            range: dx.hypot(dz),
            apex: apex_state.pos.y,
            apex_time: apex_state.time,
            flight_time: last.time - first.time,
            impact_speed: last.speed(),
            lateral_drift: end.z - first.pos.z,
        })
    }
}
