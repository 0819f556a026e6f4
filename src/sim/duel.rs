use crate::dynamics::state::KinematicState;
use crate::error::{check, Result, SimError};
use crate::gnc::Guidance;
use crate::sim::runner::{RunStatus, TrajectoryIntegrator};

// ---------------------------------------------------------------------------
// Two-body engagement
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum DuelOutcome {
    /// Separation dropped to the kill radius.
    Intercepted,
    /// Interceptor met its own termination condition first.
    InterceptorTerminated,
    TargetTerminated,
    Aborted(SimError),
}

#[derive(Debug, Clone)]
pub struct DuelReport {
    pub outcome: DuelOutcome,
    /// Closest approach over the whole engagement, m.
    pub min_distance: f64,
    pub final_distance: f64,
    /// Ticks taken, launch tick included.
    pub steps: usize,
    pub interceptor_track: Vec<KinematicState>,
    pub target_track: Vec<KinematicState>,
}

impl DuelReport {
    pub fn is_intercepted(&self) -> bool {
        self.outcome == DuelOutcome::Intercepted
    }
}

/// Interceptor and target integrators advanced on a shared clock.
///
/// After every tick the guidance callback sees both states and commands the
/// interceptor's acceleration for the next tick. An optional target
/// guidance does the same for the target.
pub struct Duel<'a> {
    interceptor: TrajectoryIntegrator,
    target: TrajectoryIntegrator,
    guidance: Box<dyn Guidance + 'a>,
    target_guidance: Option<Box<dyn Guidance + 'a>>,
    kill_radius: f64,
}

impl<'a> Duel<'a> {
    pub fn new(
        interceptor: TrajectoryIntegrator,
        target: TrajectoryIntegrator,
        guidance: impl Guidance + 'a,
    ) -> Result<Self> {
        if interceptor.dt() != target.dt() {
            return Err(SimError::invalid(
                "dt",
                format!("interceptor and target steps differ ({} vs {})", interceptor.dt(), target.dt()),
            ));
        }
        for (name, it) in [("interceptor", &interceptor), ("target", &target)] {
            if *it.status() != RunStatus::Ready {
                return Err(SimError::invalid(name, "integrator has already been stepped"));
            }
        }
        Ok(Self {
            interceptor,
            target,
            guidance: Box::new(guidance),
            target_guidance: None,
            kill_radius: 1.0,
        })
    }

    pub fn with_target_guidance(mut self, guidance: impl Guidance + 'a) -> Self {
        self.target_guidance = Some(Box::new(guidance));
        self
    }

    pub fn with_kill_radius(mut self, kill_radius: f64) -> Result<Self> {
        check("kill_radius", kill_radius, kill_radius > 0.0, "must be positive")?;
        self.kill_radius = kill_radius;
        Ok(self)
    }

    pub fn kill_radius(&self) -> f64 {
        self.kill_radius
    }

    /// Run the engagement to an outcome.
    ///
    /// Both guidance callbacks are reset before the first tick.
    pub fn run(mut self) -> DuelReport {
        let dt = self.interceptor.dt();
        self.guidance.reset();
        if let Some(g) = self.target_guidance.as_mut() {
            g.reset();
        }
        log::debug!(
            "duel: guidance={} target guidance={} kill radius={}",
            self.guidance.name(),
            self.target_guidance.as_ref().map_or("none", |g| g.name()),
            self.kill_radius
        );

        let mut interceptor_track = Vec::new();
        let mut target_track = Vec::new();
        let mut min_distance = f64::INFINITY;
        let mut final_distance = f64::INFINITY;
        let mut steps = 0;

        let outcome = loop {
            let own = match self.interceptor.step() {
                Some(Ok(s)) => s,
                Some(Err(e)) => break DuelOutcome::Aborted(e),
                None => break DuelOutcome::InterceptorTerminated,
            };
            let other = match self.target.step() {
                Some(Ok(s)) => s,
                Some(Err(e)) => break DuelOutcome::Aborted(e),
                None => break DuelOutcome::TargetTerminated,
            };
            interceptor_track.push(own);
            target_track.push(other);
            steps += 1;

            final_distance = own.distance_to(&other);
            min_distance = min_distance.min(final_distance);

            if final_distance <= self.kill_radius {
                break DuelOutcome::Intercepted;
            }
            if *self.interceptor.status() == RunStatus::Completed {
                break DuelOutcome::InterceptorTerminated;
            }
            if *self.target.status() == RunStatus::Completed {
                break DuelOutcome::TargetTerminated;
            }

            self.interceptor.set_command(self.guidance.command(&own, &other, dt));
            if let Some(g) = self.target_guidance.as_mut() {
                self.target.set_command(g.command(&other, &own, dt));
            }
        };

        match &outcome {
            DuelOutcome::Aborted(e) => log::warn!("duel aborted after {} ticks: {}", steps, e),
            o => log::info!("duel ended after {} ticks: {:?}, miss {:.2} m", steps, o, min_distance),
        }

        DuelReport { outcome, min_distance, final_distance, steps, interceptor_track, target_track }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::forces::ForceConfig;
    use crate::dynamics::state::SimConfig;
    use crate::gnc::PursuitGuidance;
    use crate::sim::config::RunConfig;
    use crate::vehicle::{presets, LaunchConditions};
    use nalgebra::Vector3;
    use std::cell::Cell;
    use std::rc::Rc;

    fn coasting(launch: LaunchConditions, dt: f64) -> TrajectoryIntegrator {
        let cfg = RunConfig::new(launch, presets::interceptor())
            .with_forces(ForceConfig::none())
            .with_sim(SimConfig { dt, max_steps: 2_000 });
        TrajectoryIntegrator::new(&cfg).unwrap()
    }

    fn parked(x: f64) -> TrajectoryIntegrator {
        coasting(LaunchConditions::new(0.0, 0.0, 0.0).with_origin(Vector3::new(x, 0.0, 0.0)), 0.01)
    }

    #[test]
    fn mismatched_steps_rejected() {
        let a = coasting(LaunchConditions::new(10.0, 0.0, 0.0), 0.01);
        let b = coasting(LaunchConditions::new(10.0, 0.0, 0.0), 0.02);
        let err = Duel::new(a, b, PursuitGuidance::new(1.0)).err().unwrap();
        assert!(matches!(err, SimError::InvalidParameter { name: "dt", .. }));
    }

    #[test]
    fn stepped_integrator_rejected() {
        let mut a = parked(0.0);
        a.step();
        assert!(Duel::new(a, parked(10.0), PursuitGuidance::new(1.0)).is_err());
    }

    #[test]
    fn kill_radius_must_be_positive() {
        let duel = Duel::new(parked(0.0), parked(10.0), PursuitGuidance::new(1.0)).unwrap();
        assert_eq!(duel.kill_radius(), 1.0);
        assert!(duel.with_kill_radius(0.0).is_err());
    }

    #[test]
    fn head_on_closure_intercepts() {
        let interceptor = coasting(LaunchConditions::new(100.0, 0.0, 0.0), 0.01);
        let duel = Duel::new(interceptor, parked(100.0), |_: &KinematicState, _: &KinematicState, _: f64| {
            Vector3::zeros()
        })
        .unwrap();
        let report = duel.run();
        assert!(report.is_intercepted());
        assert!(report.min_distance <= 1.0);
        assert_eq!(report.interceptor_track.len(), report.steps);
        assert_eq!(report.target_track.len(), report.steps);
    }

    #[test]
    fn falling_interceptor_terminates() {
        let cfg = RunConfig::new(LaunchConditions::new(10.0, 0.0, 1.0), presets::interceptor())
            .with_forces(ForceConfig::vacuum());
        let interceptor = TrajectoryIntegrator::new(&cfg).unwrap();
        let report = Duel::new(interceptor, parked(5_000.0), PursuitGuidance::new(0.0)).unwrap().run();
        assert_eq!(report.outcome, DuelOutcome::InterceptorTerminated);
        assert!(report.interceptor_track.last().unwrap().pos.y < 0.0);
    }

    struct CountingGuidance {
        resets: Rc<Cell<usize>>,
        calls: usize,
    }

    impl Guidance for CountingGuidance {
        fn command(&mut self, _: &KinematicState, _: &KinematicState, _: f64) -> Vector3<f64> {
            // commands issued before a reset would leak into the next engagement
            assert_eq!(self.calls, 0, "reset must precede the first command");
            Vector3::zeros()
        }

        fn reset(&mut self) {
            self.resets.set(self.resets.get() + 1);
            self.calls = 0;
        }
    }

    #[test]
    fn run_resets_both_guidances_once() {
        let own = Rc::new(Cell::new(0));
        let theirs = Rc::new(Cell::new(0));
        let interceptor = coasting(LaunchConditions::new(100.0, 0.0, 0.0), 0.01);
        let report = Duel::new(interceptor, parked(100.0), CountingGuidance { resets: own.clone(), calls: 7 })
            .unwrap()
            .with_target_guidance(CountingGuidance { resets: theirs.clone(), calls: 3 })
            .run();
        assert!(report.is_intercepted());
        assert_eq!(own.get(), 1);
        assert_eq!(theirs.get(), 1);
    }

    #[test]
    fn step_limit_aborts_duel() {
        let interceptor = coasting(LaunchConditions::new(1.0, 0.0, 0.0).with_azimuth(1.0), 0.01);
        let report = Duel::new(interceptor, parked(1_000.0), PursuitGuidance::new(0.0)).unwrap().run();
        assert!(matches!(report.outcome, DuelOutcome::Aborted(ref e) if e.is_step_limit()));
        assert_eq!(report.steps, 2_001);
    }
}
