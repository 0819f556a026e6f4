pub mod config;
pub mod duel;
pub mod event;
pub mod integrator;
pub mod runner;
pub mod summary;
pub mod sweep;
pub mod termination;

pub use config::RunConfig;
pub use duel::{Duel, DuelOutcome, DuelReport};
pub use integrator::euler_step;
pub use runner::{simulate, RunReport, RunStatus, TrajectoryIntegrator};
pub use summary::TrajectorySummary;
pub use termination::TerminationCondition;
