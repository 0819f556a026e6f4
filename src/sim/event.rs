use serde::Serialize;

use crate::dynamics::state::KinematicState;

// ---------------------------------------------------------------------------
// Trajectory events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EventKind {
    Apogee,
    AltitudeCrossing { altitude: f64, ascending: bool },
}

/// A discrete event found between two consecutive samples.
#[derive(Debug, Clone, Serialize)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
    pub state: KinematicState,
}

/// Passive detector fed with consecutive samples.
pub trait EventDetector {
    fn check(&mut self, prev: &KinematicState, current: &KinematicState) -> Option<EventKind>;
}

/// Vertical velocity turning from positive to non-positive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApogeeDetector {
    /// Ignore turnovers below this altitude.
    pub min_altitude: f64,
}

impl EventDetector for ApogeeDetector {
    fn check(&mut self, prev: &KinematicState, current: &KinematicState) -> Option<EventKind> {
        if prev.vel.y > 0.0 && current.vel.y <= 0.0 && current.pos.y >= self.min_altitude {
            Some(EventKind::Apogee)
        } else {
            None
        }
    }
}

/// Fires once when the altitude crosses a level in the given direction.
#[derive(Debug, Clone)]
pub struct AltitudeDetector {
    pub altitude: f64,
    pub ascending: bool,
    fired: bool,
}

impl AltitudeDetector {
    pub fn new(altitude: f64, ascending: bool) -> Self {
        Self { altitude, ascending, fired: false }
    }
}

impl EventDetector for AltitudeDetector {
    fn check(&mut self, prev: &KinematicState, current: &KinematicState) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        let crossed = if self.ascending {
            prev.pos.y < self.altitude && current.pos.y >= self.altitude
        } else {
            prev.pos.y > self.altitude && current.pos.y <= self.altitude
        };
        if crossed {
            self.fired = true;
            Some(EventKind::AltitudeCrossing { altitude: self.altitude, ascending: self.ascending })
        } else {
            None
        }
    }
}

/// Run every detector over a finished sample list.
pub fn detect_events(samples: &[KinematicState], detectors: &mut [Box<dyn EventDetector>]) -> Vec<SimEvent> {
    let mut events = Vec::new();
    for w in samples.windows(2) {
        for det in detectors.iter_mut() {
            if let Some(kind) = det.check(&w[0], &w[1]) {
                log::debug!("event {:?} at t={:.3}", kind, w[1].time);
                events.push(SimEvent { time: w[1].time, kind, state: w[1] });
            }
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn make_state(alt: f64, vy: f64) -> KinematicState {
        KinematicState::new(Vector3::new(0.0, alt, 0.0), Vector3::new(0.0, vy, 0.0))
    }

    #[test]
    fn apogee_detected() {
        let mut det = ApogeeDetector { min_altitude: 100.0 };
        assert_eq!(det.check(&make_state(500.0, 1.0), &make_state(500.1, -0.1)), Some(EventKind::Apogee));
        assert!(det.check(&make_state(50.0, 1.0), &make_state(50.1, -0.1)).is_none());
    }

    #[test]
    fn altitude_detector_fires_once() {
        let mut det = AltitudeDetector::new(1000.0, false);
        let prev = make_state(1010.0, -20.0);
        let curr = make_state(990.0, -20.0);
        assert!(det.check(&prev, &curr).is_some());
        assert!(det.check(&prev, &curr).is_none());
    }

    #[test]
    fn detect_over_arc() {
        let samples: Vec<_> = (0..=20)
            .map(|i| {
                let t = i as f64;
                make_state(100.0 * t - 5.0 * t * t, 100.0 - 10.0 * t)
            })
            .collect();
        let mut dets: Vec<Box<dyn EventDetector>> =
            vec![Box::new(ApogeeDetector::default()), Box::new(AltitudeDetector::new(300.0, true))];
        let events = detect_events(&samples, &mut dets);
        assert_eq!(events.len(), 2);
        assert!(events.iter().any(|e| e.kind == EventKind::Apogee && e.state.pos.y == 500.0));
    }
}
