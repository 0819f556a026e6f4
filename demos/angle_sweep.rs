use ballistic_sim::dynamics::ForceConfig;
use ballistic_sim::physics::EnvironmentParams;
use ballistic_sim::sim::sweep::{angle_grid, max_range_angle, sweep_launch_angles};
use ballistic_sim::sim::RunConfig;
use ballistic_sim::vehicle::{presets, LaunchConditions};

fn main() -> ballistic_sim::Result<()> {
    env_logger::init();

    let angles = angle_grid(5f64.to_radians(), 85f64.to_radians(), 81);
    for (label, forces) in [("vacuum", ForceConfig::vacuum()), ("drag", ForceConfig::drag_only())] {
        let base = RunConfig::new(LaunchConditions::new(300.0, 0.0, 0.0), presets::sphere_bullet())
            .named(label)
            .with_forces(forces)
            .with_environment(EnvironmentParams::earth());
        let points = sweep_launch_angles(&base, &angles)?;
        match max_range_angle(&points) {
            Some(best) => println!(
                "{label:>7}: best elevation {:>5.1} deg, range {:>8.1} m",
                best.angle.to_degrees(),
                best.summary.map_or(0.0, |s| s.range)
            ),
            None => println!("{label:>7}: every run aborted"),
        }
    }
    Ok(())
}
