use nalgebra::Vector3;

use crate::dynamics::state::KinematicState;

// ---------------------------------------------------------------------------
// Explicit Euler step, velocity first
// ---------------------------------------------------------------------------

/// Advance `state` by `dt` under an acceleration evaluated at `state`.
///
/// Velocity is updated first and the new velocity moves the position,
/// the ordering every reference trajectory was produced with.
pub fn euler_step(state: &KinematicState, accel: &Vector3<f64>, dt: f64) -> KinematicState {
    let vel = state.vel + accel * dt;
    KinematicState {
        time: state.time + dt,
        pos: state.pos + vel * dt,
        vel,
    }
}
