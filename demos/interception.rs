use nalgebra::Vector3;

use ballistic_sim::dynamics::ForceConfig;
use ballistic_sim::gnc::{HeadingBiasGuidance, PursuitGuidance, WeaveManeuver};
use ballistic_sim::sim::{Duel, RunConfig, TrajectoryIntegrator};
use ballistic_sim::types::SimConfig;
use ballistic_sim::vehicle::{presets, LaunchConditions};

fn integrators() -> ballistic_sim::Result<(TrajectoryIntegrator, TrajectoryIntegrator)> {
    let sim = SimConfig { dt: 0.01, max_steps: 6_000 };
    let interceptor = RunConfig::new(
        LaunchConditions::new(300.0, 40f64.to_radians(), 0.0),
        presets::interceptor(),
    )
    .named("interceptor")
    .with_forces(ForceConfig::vacuum())
    .with_sim(sim);
    let target = RunConfig::new(
        LaunchConditions::new(250.0, 45f64.to_radians(), 0.0)
            .with_azimuth(180f64.to_radians())
            .with_origin(Vector3::new(6_000.0, 0.0, 300.0)),
        presets::target_rocket(),
    )
    .named("target")
    .with_forces(ForceConfig::vacuum())
    .with_sim(sim);
    Ok((TrajectoryIntegrator::new(&interceptor)?, TrajectoryIntegrator::new(&target)?))
}

fn main() -> ballistic_sim::Result<()> {
    env_logger::init();

    println!("{:>6}  {:>10}  {:>8}  outcome", "gain", "miss (m)", "ticks");
    for gain in [0.0, 0.5, 1.0, 2.0, 4.0] {
        let (interceptor, target) = integrators()?;
        let report = Duel::new(interceptor, target, PursuitGuidance::new(gain).with_max_accel(200.0)?)?
            .with_target_guidance(WeaveManeuver { amplitude: 20.0, ..Default::default() })
            .with_kill_radius(10.0)?
            .run();
        println!("{gain:>6.1}  {:>10.2}  {:>8}  {:?}", report.min_distance, report.steps, report.outcome);
    }

    let (interceptor, target) = integrators()?;
    let report = Duel::new(interceptor, target, HeadingBiasGuidance::new(300.0))?
        .with_kill_radius(10.0)?
        .run();
    println!("\nheading-bias: miss {:.2} m after {} ticks, {:?}", report.min_distance, report.steps, report.outcome);
    Ok(())
}
