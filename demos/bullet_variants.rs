use ballistic_sim::dynamics::{CoriolisTerm, DeflectionAxis, ForceConfig, ForceKind, ForceModel, TermSign};
use ballistic_sim::physics::{EnvironmentParams, Wind};
use ballistic_sim::sim::event::{detect_events, AltitudeDetector, ApogeeDetector, EventDetector};
use ballistic_sim::sim::{simulate, RunConfig};
use ballistic_sim::vehicle::{presets, LaunchConditions};

/// Same rifle shot with the deflection terms flipped between the two sign
/// conventions found in the reference calculators.
fn main() -> ballistic_sim::Result<()> {
    env_logger::init();

    let env = EnvironmentParams::earth().with_wind(Wind::new(8.0, 60f64.to_radians()));
    let launch = LaunchConditions::new(850.0, 2f64.to_radians(), 1.5);
    let base = RunConfig::new(launch, presets::rifle_bullet()).with_environment(env.clone());

    let flipped = ForceConfig {
        coriolis: Some(CoriolisTerm { sign: TermSign::Negative, axis: DeflectionAxis::Downrange, ..Default::default() }),
        ..ForceConfig::full()
    };

    for (label, forces) in [("with wind", ForceConfig::with_wind()), ("full", ForceConfig::full()), ("flipped", flipped)] {
        let config = base.clone().named(label).with_forces(forces);
        let report = simulate(&config)?;
        let Some(s) = report.summary() else { continue };
        println!(
            "{label:>10}: range {:>8.1} m  drift {:>7.3} m  tof {:>5.2} s  status {:?}",
            s.range, s.lateral_drift, s.flight_time, report.status
        );

        let mut detectors: Vec<Box<dyn EventDetector>> =
            vec![Box::new(ApogeeDetector::default()), Box::new(AltitudeDetector::new(1.5, false))];
        for event in detect_events(&report.samples, &mut detectors) {
            println!("{:>12} t={:.3}s {:?}", "", event.time, event.kind);
        }
    }

    // Term-by-term view at the muzzle
    let model = ForceModel::new(&ForceConfig::full(), &presets::rifle_bullet(), &env)?;
    println!("\nAcceleration breakdown at the muzzle:");
    for (kind, a) in model.breakdown(&launch.initial_state())? {
        let label = match kind {
            ForceKind::Gravity => "gravity",
            ForceKind::Drag => "drag",
            ForceKind::Coriolis => "coriolis",
            ForceKind::Spin => "spin",
        };
        println!("  {label:>9}: ({:>10.4}, {:>10.4}, {:>10.4}) m/s^2", a.x, a.y, a.z);
    }
    Ok(())
}
