use std::process::ExitCode;

use ballistic_sim::dynamics::ForceConfig;
use ballistic_sim::io;
use ballistic_sim::physics::{EnvironmentParams, Wind};
use ballistic_sim::sim::{simulate, RunConfig, RunReport};
use ballistic_sim::vehicle::{presets, LaunchConditions};
use ballistic_sim::Result;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let outcome = match args.first() {
        Some(scenario) => run_scenario(scenario, args.get(1).map(String::as_str)),
        None => compare_force_sets(),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

// ---------------------------------------------------------------------------
// Single scenario from a JSON file
// ---------------------------------------------------------------------------

fn run_scenario(path: &str, csv_out: Option<&str>) -> Result<()> {
    let config = RunConfig::from_json_file(path)?;
    let report = simulate(&config)?;

    print_header(&format!("TRAJECTORY — {}", config.name));
    print_parameters(&config);
    print_report(&config, &report);
    print_table(&config, &report);

    if let Some(csv) = csv_out {
        io::write_samples_file(csv, &report.samples)?;
        println!("  Trajectory written to {csv}");
    }
    println!("====================================================================");
    println!();

    match report.error() {
        Some(e) => Err(e.clone()),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Built-in comparison: same shot under progressively richer force sets
// ---------------------------------------------------------------------------

fn compare_force_sets() -> Result<()> {
    let launch = LaunchConditions::new(800.0, 30f64.to_radians(), 0.0);
    let env = EnvironmentParams::earth().with_wind(Wind::new(5.0, 90f64.to_radians()));
    let variants = [
        ("vacuum", ForceConfig::vacuum()),
        ("drag", ForceConfig::drag_only()),
        ("drag+wind", ForceConfig::with_wind()),
        ("+coriolis", ForceConfig::with_coriolis()),
        ("full", ForceConfig::full()),
    ];

    print_header("BALLISTIC FORCE-SET COMPARISON — rifle bullet");
    let base = RunConfig::new(launch, presets::rifle_bullet()).with_environment(env);
    print_parameters(&base);

    println!("  Results");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:<11} {:>9} {:>9} {:>8} {:>9} {:>9}",
        "forces", "range (m)", "apex (m)", "tof (s)", "v_imp m/s", "drift (m)"
    );
    println!("  {}", "─".repeat(60));

    for (label, forces) in variants {
        let config = base.clone().named(label).with_forces(forces);
        let report = simulate(&config)?;
        match report.summary() {
            Some(s) if report.is_completed() => println!(
                "  {:<11} {:>9.1} {:>9.1} {:>8.2} {:>9.1} {:>9.3}",
                label, s.range, s.apex, s.flight_time, s.impact_speed, s.lateral_drift
            ),
            _ => println!(
                "  {:<11} aborted: {}",
                label,
                report.error().map(ToString::to_string).unwrap_or_default()
            ),
        }
    }
    println!();
    println!("====================================================================");
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// Console report
// ---------------------------------------------------------------------------

fn print_header(title: &str) {
    println!();
    println!("====================================================================");
    println!("  {title}");
    println!("====================================================================");
    println!();
}

fn print_parameters(config: &RunConfig) {
    let p = &config.projectile;
    let l = &config.launch;
    println!("  Projectile & Launch");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Mass:          {:>8.3} kg    Cd:           {:>8.3}",
        p.mass, p.drag_coefficient
    );
    println!(
        "  Area:          {:>8.2e} m^2   Spin:         {:>8.1} rad/s",
        p.area,
        p.spin_rate.unwrap_or(0.0)
    );
    println!(
        "  Speed:         {:>8.1} m/s   Elevation:    {:>8.1} deg",
        l.speed,
        l.angle.to_degrees()
    );
    println!(
        "  Height:        {:>8.1} m     Azimuth:      {:>8.1} deg",
        l.height,
        l.azimuth.to_degrees()
    );
    println!("  dt:            {:>8.4} s     Max steps:    {:>8}", config.sim.dt, config.sim.max_steps);
    println!();
}

fn print_report(config: &RunConfig, report: &RunReport) {
    println!("  Flight Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    match report.summary() {
        Some(s) => {
            let atmosphere = ballistic_sim::physics::AtmosphereModel::from_environment(&config.environment);
            let mach = |speed: f64, alt: f64| {
                atmosphere.sample(alt).map(|a| speed / a.sound_speed).unwrap_or(f64::NAN)
            };
            println!("  APEX      t={:>6.2}s   alt={:>8.1}m", s.apex_time, s.apex);
            if let Some(last) = report.last() {
                println!(
                    "  END       t={:>6.2}s   vel={:>7.1}m/s   Mach {:.2}",
                    last.time,
                    s.impact_speed,
                    mach(s.impact_speed, last.pos.y.max(0.0))
                );
            }
            println!("  Range:         {:>8.1} m", s.range);
            println!("  Lateral drift: {:>8.3} m", s.lateral_drift);
        }
        None => println!("  (no samples)"),
    }
    match report.error() {
        Some(e) => println!("  Status:        ABORTED ({e})"),
        None => println!("  Status:        completed"),
    }
    println!();
}

fn print_table(config: &RunConfig, report: &RunReport) {
    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>9}  {:>9}  {:>9}  {:>9}",
        "t (s)", "x (m)", "alt (m)", "z (m)", "vel (m/s)"
    );
    println!("  {}", "─".repeat(56));

    let samples = &report.samples;
    let sample_interval = (samples.len() / 30).max(1);
    for (i, s) in samples.iter().enumerate() {
        if i % sample_interval != 0 && i != samples.len() - 1 {
            continue;
        }
        println!(
            "  {:>7.2}  {:>9.1}  {:>9.1}  {:>9.2}  {:>9.1}",
            s.time,
            s.pos.x,
            s.pos.y,
            s.pos.z,
            s.speed()
        );
    }

    println!();
    println!("  Simulation: {} samples, dt={} s", samples.len(), config.sim.dt);
}
