use std::path::PathBuf;

use anyhow::anyhow;
use asteroid_impact_calculator::effects::{self, AsteroidBody, ImpactReport};
use asteroid_impact_calculator::export::sidecar;
use asteroid_impact_calculator::scenario::asteroid_body;
use clap::Parser;

#[path = "common/shared.rs"]
mod shared;

/// Estimate energy, crater, seismic and damage radii for an asteroid impact.
#[derive(Parser, Debug)]
#[command(author, version, about = "Asteroid impact effect calculator")]
struct Cli {
    /// Asteroid diameter in km
    #[arg(long)]
    diameter_km: Option<f64>,

    /// Impact velocity in km/s
    #[arg(long)]
    velocity_km_s: Option<f64>,

    /// Impact angle from the horizontal in degrees
    #[arg(long, default_value_t = 45.0)]
    angle_deg: f64,

    /// Bulk density in kg/m³
    #[arg(long, default_value_t = 3000.0)]
    density: f64,

    /// Impact latitude in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    lat: f64,

    /// Impact longitude in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    lon: f64,

    /// Take the asteroid from a named catalog scenario instead
    #[arg(long)]
    scenario: Option<String>,

    /// Scenario catalog (TOML file, directory of TOML files, or YAML list)
    #[arg(long, default_value = shared::DEFAULT_CATALOG)]
    catalog: PathBuf,

    /// Write the full report as JSON (`-` for stdout)
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    shared::init_logging();
    let cli = Cli::parse();

    let body = match &cli.scenario {
        Some(name) => {
            let scenario = shared::scenario(&cli.catalog, name)?;
            let asteroid = scenario
                .asteroid
                .as_ref()
                .ok_or_else(|| anyhow!("scenario '{}' has no asteroid section", scenario.name))?;
            asteroid_body(asteroid)
        }
        None => {
            let (Some(diameter), Some(velocity)) = (cli.diameter_km, cli.velocity_km_s) else {
                return Err(anyhow!(
                    "--diameter-km and --velocity-km-s are required unless --scenario is given"
                ));
            };
            AsteroidBody::new(diameter, velocity)
                .with_angle(cli.angle_deg)
                .with_density(cli.density)
                .at(cli.lat, cli.lon)
        }
    };

    let report = effects::evaluate(&body)?;
    print_report(&report);

    if let Some(path) = &cli.json {
        sidecar::write_report(path, "impact", &report)?;
        if path.as_os_str() != "-" {
            log::info!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn print_report(report: &ImpactReport) {
    let energy = &report.impact_energy;
    println!(
        "Impact energy: {:.3e} J ({:.3} Mt TNT, {:.0}x Hiroshima)",
        energy.joules, energy.megatons, report.comparison.hiroshima_equivalent
    );
    if report.crater.airburst {
        println!("Crater: none (airburst)");
    } else {
        println!(
            "Crater: {:.2} km wide, {:.2} km deep",
            report.crater.diameter_km, report.crater.depth_km
        );
    }
    println!(
        "Seismic magnitude: {:.2} ({})",
        report.seismic.magnitude, report.seismic.description
    );
    println!("Blast radius: {:.1} km", report.damage_zones.blast_radius_km);
    println!("Thermal radius: {:.1} km", report.damage_zones.thermal_radius_km);
    match report.damage_zones.ocean_basin {
        Some(basin) => println!(
            "Tsunami risk: {} ({})",
            report.damage_zones.tsunami_risk.as_str(),
            basin
        ),
        None => println!(
            "Tsunami risk: {}",
            report.damage_zones.tsunami_risk.as_str()
        ),
    }
    println!("Severity: {}", report.comparison.severity_label);
}
