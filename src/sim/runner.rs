use std::iter::FusedIterator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use nalgebra::Vector3;

use crate::dynamics::forces::ForceModel;
use crate::dynamics::state::{KinematicState, SimConfig};
use crate::error::{Result, SimError};
use crate::sim::config::RunConfig;
use crate::sim::integrator::euler_step;
use crate::sim::summary::TrajectorySummary;
use crate::sim::termination::{TerminationCondition, Terminator};

// ---------------------------------------------------------------------------
// Run status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum RunStatus {
    Ready,
    Running,
    Completed,
    Aborted(SimError),
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Aborted(_))
    }
}

// ---------------------------------------------------------------------------
// Trajectory integrator
// ---------------------------------------------------------------------------

/// Fixed-step time-marching loop over one projectile.
///
/// The integrator is an iterator of samples: the launch state first, then
/// one sample per step until the termination condition holds. An abort
/// yields a single `Err` and ends the sequence. It cannot be restarted.
#[derive(Debug)]
pub struct TrajectoryIntegrator {
    forces: ForceModel,
    terminator: Terminator,
    sim: SimConfig,
    state: KinematicState,
    steps: usize,
    status: RunStatus,
    command: Vector3<f64>,
    cancel: Option<Arc<AtomicBool>>,
}

impl TrajectoryIntegrator {
    pub fn new(config: &RunConfig) -> Result<Self> {
        config.sim.validate()?;
        config.launch.validate()?;
        let forces = ForceModel::new(&config.forces, &config.projectile, &config.environment)?;
        let terminator = config.termination.bind(&config.environment)?;
        log::debug!(
            "integrator `{}`: dt={} max_steps={} termination={:?}",
            config.name,
            config.sim.dt,
            config.sim.max_steps,
            config.termination
        );
        Ok(Self {
            forces,
            terminator,
            sim: config.sim,
            state: config.launch.initial_state(),
            steps: 0,
            status: RunStatus::Ready,
            command: Vector3::zeros(),
            cancel: None,
        })
    }

    /// Abort with [`SimError::Cancelled`] once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn status(&self) -> &RunStatus {
        &self.status
    }

    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn dt(&self) -> f64 {
        self.sim.dt
    }

    pub fn forces(&self) -> &ForceModel {
        &self.forces
    }

    pub fn termination(&self) -> &TerminationCondition {
        self.terminator.condition()
    }

    /// Additive acceleration applied from the next step on.
    pub fn set_command(&mut self, accel: Vector3<f64>) {
        self.command = accel;
    }

    pub fn command(&self) -> Vector3<f64> {
        self.command
    }

    /// Produce the next sample, or `None` once the run is over.
    pub fn step(&mut self) -> Option<Result<KinematicState>> {
        match self.status {
            RunStatus::Completed | RunStatus::Aborted(_) => return None,
            RunStatus::Ready => {
                self.status = RunStatus::Running;
                return Some(Ok(self.state));
            }
            RunStatus::Running => {}
        }

        if self.cancel.as_ref().map_or(false, |f| f.load(Ordering::Relaxed)) {
            return Some(Err(self.abort(SimError::Cancelled { step: self.steps })));
        }
        if self.steps >= self.sim.max_steps {
            let err = self.step_limit_error();
            return Some(Err(self.abort(err)));
        }

        let accel = match self.forces.acceleration(&self.state) {
            Ok(a) => a + self.command,
            Err(e) => return Some(Err(self.abort(e))),
        };
        let next = euler_step(&self.state, &accel, self.sim.dt);
        if !next.is_finite() {
            let err = SimError::NonFiniteState { step: self.steps + 1 };
            return Some(Err(self.abort(err)));
        }

        self.state = next;
        self.steps += 1;
        log::trace!(
            "step {} t={:.3} pos=({:.2}, {:.2}, {:.2})",
            self.steps,
            next.time,
            next.pos.x,
            next.pos.y,
            next.pos.z
        );

        if self.terminator.is_met(&self.state) {
            log::info!("run completed after {} steps at t={:.3} s", self.steps, self.state.time);
            self.status = RunStatus::Completed;
        }
        Some(Ok(self.state))
    }

    /// Drain the remaining samples.
    pub fn run(mut self) -> RunReport {
        let mut samples = Vec::with_capacity(self.sim.max_steps.min(100_000) + 1);
        while let Some(item) = self.step() {
            match item {
                Ok(s) => samples.push(s),
                Err(_) => break,
            }
        }
        RunReport {
            samples,
            status: self.status,
            crossing_altitude: self.terminator.condition().crossing_altitude(),
        }
    }

    fn abort(&mut self, err: SimError) -> SimError {
        log::warn!("run aborted at step {}: {}", self.steps, err);
        self.status = RunStatus::Aborted(err.clone());
        err
    }

    fn step_limit_error(&self) -> SimError {
        let max_steps = self.sim.max_steps;
        let can_return = match self.terminator.condition() {
            TerminationCondition::WithinDistance { .. } => self.forces.can_turn_velocity(),
            _ => self.forces.config().can_reverse_vertical(),
        };
        let stuck = self.terminator.is_receding(&self.state) && !can_return && self.command == Vector3::zeros();
        if stuck {
            SimError::UnreachableTermination { max_steps }
        } else {
            SimError::StepLimitExceeded { max_steps }
        }
    }
}

impl Iterator for TrajectoryIntegrator {
    type Item = Result<KinematicState>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

impl FusedIterator for TrajectoryIntegrator {}

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

/// Samples and terminal status of a drained run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub samples: Vec<KinematicState>,
    pub status: RunStatus,
    crossing_altitude: Option<f64>,
}

impl RunReport {
    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }

    pub fn error(&self) -> Option<&SimError> {
        match &self.status {
            RunStatus::Aborted(e) => Some(e),
            _ => None,
        }
    }

    pub fn last(&self) -> Option<&KinematicState> {
        self.samples.last()
    }

    pub fn summary(&self) -> Option<TrajectorySummary> {
        TrajectorySummary::from_samples(&self.samples, self.crossing_altitude)
    }

    /// Samples of a completed run, or the abort reason.
    pub fn into_result(self) -> Result<Vec<KinematicState>> {
        match self.status {
            RunStatus::Aborted(e) => Err(e),
            _ => Ok(self.samples),
        }
    }
}

/// Build an integrator for `config` and drain it.
pub fn simulate(config: &RunConfig) -> Result<RunReport> {
    Ok(TrajectoryIntegrator::new(config)?.run())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::forces::ForceConfig;
    use crate::physics::environment::{EnvironmentParams, Wind};
    use crate::vehicle::{presets, LaunchConditions};

    fn vacuum_shot() -> RunConfig {
        RunConfig::new(LaunchConditions::new(100.0, 45f64.to_radians(), 0.0), presets::sphere_bullet())
            .with_forces(ForceConfig::vacuum())
            .with_environment(EnvironmentParams::default().with_gravity(9.8))
    }

    #[test]
    fn state_machine_transitions() {
        let mut it = TrajectoryIntegrator::new(&vacuum_shot()).unwrap();
        assert_eq!(*it.status(), RunStatus::Ready);
        let first = it.step().unwrap().unwrap();
        assert_eq!(first.time, 0.0);
        assert_eq!(*it.status(), RunStatus::Running);
        for item in it.by_ref() {
            assert!(item.is_ok());
        }
        assert_eq!(*it.status(), RunStatus::Completed);
        assert!(it.step().is_none());
        assert!(it.state().pos.y < 0.0);
    }

    #[test]
    fn last_sample_is_first_below_ground() {
        let report = simulate(&vacuum_shot()).unwrap();
        assert!(report.is_completed());
        let n = report.samples.len();
        assert!(report.samples[n - 1].pos.y < 0.0);
        assert!(report.samples[..n - 1].iter().all(|s| s.pos.y >= 0.0));
    }

    #[test]
    fn samples_are_evenly_spaced_in_time() {
        let report = simulate(&vacuum_shot()).unwrap();
        for w in report.samples.windows(2) {
            assert!((w[1].time - w[0].time - 0.01).abs() < 1e-9);
        }
    }

    #[test]
    fn step_limit_aborts() {
        let cfg = vacuum_shot().with_sim(SimConfig { dt: 0.01, max_steps: 10 });
        let mut it = TrajectoryIntegrator::new(&cfg).unwrap();
        let items: Vec<_> = it.by_ref().collect();
        assert_eq!(items.len(), 12); // launch + 10 steps + error
        assert!(items[..11].iter().all(|i| i.is_ok()));
        assert_eq!(items[11], Err(SimError::StepLimitExceeded { max_steps: 10 }));
        assert_eq!(*it.status(), RunStatus::Aborted(SimError::StepLimitExceeded { max_steps: 10 }));
    }

    #[test]
    fn upward_flight_without_gravity_is_unreachable() {
        let cfg = RunConfig::new(LaunchConditions::new(50.0, 90f64.to_radians(), 0.0), presets::sphere_bullet())
            .with_forces(ForceConfig { gravity: false, ..ForceConfig::drag_only() })
            .with_sim(SimConfig { dt: 0.01, max_steps: 500 });
        let report = simulate(&cfg).unwrap();
        assert_eq!(report.samples.len(), 501);
        let err = report.error().unwrap();
        assert_eq!(*err, SimError::UnreachableTermination { max_steps: 500 });
        assert!(err.is_step_limit());
    }

    #[test]
    fn cancellation_flag_stops_run() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut it = TrajectoryIntegrator::new(&vacuum_shot()).unwrap().with_cancel_flag(flag.clone());
        it.step();
        it.step();
        flag.store(true, Ordering::Relaxed);
        assert_eq!(it.step(), Some(Err(SimError::Cancelled { step: 1 })));
        assert!(it.step().is_none());
    }

    #[test]
    fn invalid_step_fails_before_running() {
        let cfg = vacuum_shot().with_sim(SimConfig { dt: -0.01, max_steps: 10 });
        let err = TrajectoryIntegrator::new(&cfg).unwrap_err();
        assert!(matches!(err, SimError::InvalidParameter { name: "dt", .. }));
    }

    #[test]
    fn domain_error_aborts_run() {
        // starts above the height where the simple atmosphere's temperature hits zero
        let cfg = RunConfig::new(LaunchConditions::new(10.0, 0.0, 50_000.0), presets::sphere_bullet());
        let report = simulate(&cfg).unwrap();
        assert_eq!(report.samples.len(), 1);
        assert!(matches!(report.error(), Some(SimError::Domain { quantity: "temperature", .. })));
    }

    #[test]
    fn command_adds_acceleration() {
        let cfg = RunConfig::new(LaunchConditions::new(0.0, 0.0, 10.0), presets::sphere_bullet())
            .with_forces(ForceConfig::none())
            .with_sim(SimConfig { dt: 0.1, max_steps: 5 });
        let mut it = TrajectoryIntegrator::new(&cfg).unwrap();
        it.step();
        it.set_command(Vector3::new(2.0, 0.0, 0.0));
        let s = it.step().unwrap().unwrap();
        assert!((s.vel.x - 0.2).abs() < 1e-12);
    }

    fn target_behind(forces: ForceConfig, max_steps: usize) -> RunConfig {
        let env = EnvironmentParams::default().with_wind(Wind::new(50.0, std::f64::consts::PI));
        RunConfig::new(LaunchConditions::new(10.0, 0.0, 0.0), presets::sphere_bullet())
            .with_forces(forces)
            .with_environment(env)
            .with_termination(TerminationCondition::WithinDistance {
                target: Vector3::new(-100.0, 0.0, 0.0),
                epsilon: 1.0,
            })
            .with_sim(SimConfig { dt: 0.01, max_steps })
    }

    #[test]
    fn headwind_can_carry_back_to_target() {
        let forces = ForceConfig { gravity: false, ..ForceConfig::with_wind() };
        let short = simulate(&target_behind(forces, 3)).unwrap();
        assert_eq!(short.error(), Some(&SimError::StepLimitExceeded { max_steps: 3 }));
        assert!(simulate(&target_behind(forces, 100_000)).unwrap().is_completed());
    }

    #[test]
    fn still_air_cannot_turn_back_to_target() {
        let forces = ForceConfig { gravity: false, ..ForceConfig::drag_only() };
        let report = simulate(&target_behind(forces, 3)).unwrap();
        assert_eq!(report.error(), Some(&SimError::UnreachableTermination { max_steps: 3 }));
    }

    #[test]
    fn overflow_aborts_with_comparable_status() {
        let cfg = RunConfig::new(LaunchConditions::new(1e307, 0.0, 0.0), presets::sphere_bullet())
            .with_forces(ForceConfig::none())
            .with_sim(SimConfig { dt: 0.01, max_steps: 5_000 });
        let a = simulate(&cfg).unwrap();
        let b = simulate(&cfg).unwrap();
        assert!(matches!(a.error(), Some(SimError::NonFiniteState { .. })));
        assert!(a.error().unwrap().is_domain());
        assert!(a.samples.iter().all(|s| s.is_finite()));
        assert_eq!(a.status, b.status);
        assert_eq!(a.samples, b.samples);
    }
}
