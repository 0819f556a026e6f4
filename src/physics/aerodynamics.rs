use nalgebra::Vector3;

/// Quadratic drag force (N) opposing the air-relative velocity.
///
/// Returns zero when the relative speed is exactly zero.
pub fn drag_force(v_rel: &Vector3<f64>, density: f64, cd: f64, area: f64) -> Vector3<f64> {
    let speed = v_rel.norm();
    if speed > 0.0 {
        let q_dyn = 0.5 * density * speed * speed;
        let drag_mag = q_dyn * cd * area;
        -(v_rel / speed) * drag_mag
    } else {
        Vector3::zeros()
    }
}

/// Drag acceleration for a body of the given mass.
pub fn drag_accel(v_rel: &Vector3<f64>, density: f64, cd: f64, area: f64, mass: f64) -> Vector3<f64> {
    drag_force(v_rel, density, cd, area) / mass
}
