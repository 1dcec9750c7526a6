use std::path::{Path, PathBuf};

use anyhow::anyhow;
use asteroid_impact_calculator::core::vector::Vector3;
use asteroid_impact_calculator::export::{sidecar, trajectory as export_trajectory, writer_for_path};
use asteroid_impact_calculator::propagator::{
    self, ENERGY_DRIFT_TOLERANCE, PropagationRequest, Trajectory, approach,
};
use asteroid_impact_calculator::scenario::propagation_request;
use clap::Parser;

#[path = "common/shared.rs"]
mod shared;

const DEFAULT_POSITION_M: Vector3 = [0.0, 1.0e7, 0.0];
const DEFAULT_VELOCITY_M_S: Vector3 = [6_000.0, 1_000.0, 200.0];

/// Propagate a body around Earth with RK4 until it hits the surface or the step budget runs out.
#[derive(Parser, Debug)]
#[command(author, version, about = "Two-body orbital propagator with impact detection")]
struct Cli {
    /// Initial position in metres, as x,y,z
    #[arg(long, value_parser = parse_vector, allow_hyphen_values = true)]
    position: Option<Vector3>,

    /// Initial velocity in m/s, as x,y,z
    #[arg(long, value_parser = parse_vector, allow_hyphen_values = true, conflicts_with = "speed")]
    velocity: Option<Vector3>,

    /// Draw an inbound velocity of this magnitude (m/s) instead of giving one
    #[arg(long)]
    speed: Option<f64>,

    /// Seed for --speed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Timestep in seconds
    #[arg(long)]
    dt: Option<f64>,

    /// Maximum number of integration steps
    #[arg(long)]
    max_steps: Option<usize>,

    /// Keep integrating through the surface
    #[arg(long, default_value_t = false)]
    no_crash: bool,

    /// Write the trajectory CSV here (`-` for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Take the initial state from a named catalog scenario
    #[arg(long)]
    scenario: Option<String>,

    /// Scenario catalog (TOML file, directory of TOML files, or YAML list)
    #[arg(long, default_value = shared::DEFAULT_CATALOG)]
    catalog: PathBuf,
}

fn parse_vector(raw: &str) -> Result<Vector3, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected three comma-separated numbers, got '{raw}'"));
    };
    let parse = |s: &str| {
        s.parse::<f64>()
            .map_err(|err| format!("invalid component '{s}': {err}"))
    };
    Ok([parse(*x)?, parse(*y)?, parse(*z)?])
}

fn main() -> anyhow::Result<()> {
    shared::init_logging();
    let cli = Cli::parse();
    let request = build_request(&cli)?;

    let trajectory = propagator::propagate(&request)?;
    let csv_to_stdout = cli.csv.as_deref() == Some(Path::new("-"));
    if !csv_to_stdout {
        print_summary(&trajectory);
    }

    if let Some(path) = &cli.csv {
        let mut writer = writer_for_path(path)?;
        export_trajectory::write_trajectory(writer.as_mut(), &trajectory)?;
        if !csv_to_stdout {
            let summary =
                sidecar::write_trajectory_summary(path, cli.scenario.as_deref(), &trajectory)?;
            log::info!("wrote {} and {}", path.display(), summary.display());
        }
    }
    Ok(())
}

fn build_request(cli: &Cli) -> anyhow::Result<PropagationRequest> {
    let mut request = match &cli.scenario {
        Some(name) => {
            let scenario = shared::scenario(&cli.catalog, name)?;
            let section = scenario
                .propagation
                .as_ref()
                .ok_or_else(|| anyhow!("scenario '{}' has no propagation section", scenario.name))?;
            propagation_request(section)
        }
        None => PropagationRequest::new(DEFAULT_POSITION_M, DEFAULT_VELOCITY_M_S),
    };

    if let Some(position) = cli.position {
        request.initial.position_m = position;
    }
    if let Some(velocity) = cli.velocity {
        request.initial.velocity_m_s = velocity;
    }
    if let Some(speed) = cli.speed {
        let mut rng = approach::seeded_rng(cli.seed);
        request.initial.velocity_m_s =
            approach::synthesize_inbound_velocity(&request.initial.position_m, speed, &mut rng);
        log::debug!("synthesized velocity {:?}", request.initial.velocity_m_s);
    }
    if let Some(dt) = cli.dt {
        request.timestep_s = dt;
    }
    if let Some(max_steps) = cli.max_steps {
        request.max_steps = max_steps;
    }
    if cli.no_crash {
        request.crash_on_surface = false;
    }
    Ok(request)
}

fn print_summary(trajectory: &Trajectory) {
    let end = &trajectory.termination;
    if end.crashed {
        println!(
            "Impact after {:.1} s ({} steps)",
            end.final_time_s, end.steps
        );
    } else {
        println!("No impact within {} steps ({:.1} s)", end.steps, end.final_time_s);
    }
    println!("Final distance: {:.0} m", end.final_distance_m);
    if let Some(min) = trajectory.min_distance_m() {
        println!("Closest recorded approach: {:.0} m", min);
    }
    let drift = trajectory.energy_drift();
    println!(
        "Energy drift: {:.6}% ({})",
        drift * 100.0,
        if drift < ENERGY_DRIFT_TOLERANCE {
            "within tolerance"
        } else {
            "exceeds tolerance"
        }
    );
}
