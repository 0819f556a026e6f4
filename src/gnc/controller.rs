use nalgebra::Vector3;

use crate::dynamics::state::KinematicState;

/// Steering callback for a duel.
///
/// Guidance sees only the two kinematic states. It returns the additive
/// acceleration the controlled body should apply over the next step.
pub trait Guidance {
    /// Commanded acceleration for `own`, given the `other` body, m/s^2.
    fn command(&mut self, own: &KinematicState, other: &KinematicState, dt: f64) -> Vector3<f64>;

    /// Reset internal state between engagements.
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

impl<F> Guidance for F
where
    F: FnMut(&KinematicState, &KinematicState, f64) -> Vector3<f64>,
{
    fn command(&mut self, own: &KinematicState, other: &KinematicState, dt: f64) -> Vector3<f64> {
        self(own, other, dt)
    }

    fn name(&self) -> &str {
        "closure"
    }
}
