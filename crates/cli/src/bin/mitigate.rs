use std::path::PathBuf;

use anyhow::anyhow;
use asteroid_impact_calculator::export::sidecar;
use asteroid_impact_calculator::mitigation::{
    self, KineticImpactor, MitigationMethod, MitigationReport,
};
use asteroid_impact_calculator::scenario::kinetic_impactor;
use clap::Parser;

#[path = "common/shared.rs"]
mod shared;

/// Evaluate deflection strategies for an incoming asteroid.
#[derive(Parser, Debug)]
#[command(author, version, about = "Asteroid deflection feasibility")]
struct Cli {
    /// Asteroid diameter in km
    #[arg(long)]
    diameter_km: Option<f64>,

    /// Asteroid velocity in km/s
    #[arg(long)]
    velocity_km_s: Option<f64>,

    /// Warning time before impact in years
    #[arg(long)]
    lead_years: Option<f64>,

    /// kinetic_impactor, gravity_tractor, or all
    #[arg(long)]
    method: Option<String>,

    /// Take asteroid and mitigation settings from a named catalog scenario
    #[arg(long)]
    scenario: Option<String>,

    /// Scenario catalog (TOML file, directory of TOML files, or YAML list)
    #[arg(long, default_value = shared::DEFAULT_CATALOG)]
    catalog: PathBuf,

    /// Write the report(s) as JSON (`-` for stdout)
    #[arg(long)]
    json: Option<PathBuf>,
}

struct Inputs {
    diameter_km: f64,
    velocity_km_s: f64,
    lead_years: f64,
    method: String,
    impactor: KineticImpactor,
}

fn main() -> anyhow::Result<()> {
    shared::init_logging();
    let cli = Cli::parse();
    let inputs = resolve_inputs(&cli)?;

    let reports = if inputs.method.trim() == "all" {
        mitigation::compare_strategies_with(
            inputs.diameter_km,
            inputs.velocity_km_s,
            inputs.lead_years,
            &inputs.impactor,
        )?
    } else {
        let method: MitigationMethod = inputs.method.parse()?;
        vec![mitigation::evaluate_mitigation_with(
            inputs.diameter_km,
            inputs.velocity_km_s,
            inputs.lead_years,
            method,
            &inputs.impactor,
        )?]
    };

    for report in &reports {
        print_report(report);
    }

    if let Some(path) = &cli.json {
        sidecar::write_report(path, "mitigation", &reports)?;
    }
    Ok(())
}

fn resolve_inputs(cli: &Cli) -> anyhow::Result<Inputs> {
    if let Some(name) = &cli.scenario {
        let scenario = shared::scenario(&cli.catalog, name)?;
        let asteroid = scenario
            .asteroid
            .as_ref()
            .ok_or_else(|| anyhow!("scenario '{}' has no asteroid section", scenario.name))?;
        let section = scenario
            .mitigation
            .as_ref()
            .ok_or_else(|| anyhow!("scenario '{}' has no mitigation section", scenario.name))?;
        return Ok(Inputs {
            diameter_km: asteroid.diameter_km,
            velocity_km_s: asteroid.velocity_km_s,
            lead_years: cli.lead_years.unwrap_or(section.lead_time_years),
            method: cli.method.clone().unwrap_or_else(|| section.method.clone()),
            impactor: section
                .impactor
                .as_ref()
                .map(kinetic_impactor)
                .unwrap_or_default(),
        });
    }

    let (Some(diameter_km), Some(velocity_km_s), Some(lead_years)) =
        (cli.diameter_km, cli.velocity_km_s, cli.lead_years)
    else {
        return Err(anyhow!(
            "--diameter-km, --velocity-km-s and --lead-years are required unless --scenario is given"
        ));
    };
    Ok(Inputs {
        diameter_km,
        velocity_km_s,
        lead_years,
        method: cli
            .method
            .clone()
            .unwrap_or_else(|| MitigationMethod::KineticImpactor.to_string()),
        impactor: KineticImpactor::default(),
    })
}

fn print_report(report: &MitigationReport) {
    println!("Method: {}", report.method());
    match report {
        MitigationReport::KineticImpactor(k) => {
            println!("  Delta-v: {:.3e} m/s", k.delta_v_m_s);
            println!("  Deflection: {:.1} km", k.deflection_km);
        }
        MitigationReport::GravityTractor(g) => {
            println!("  Required lead time: {:.1} years", g.required_years);
        }
    }
    println!(
        "  Success: {} ({:.1}%)",
        if report.success() { "yes" } else { "no" },
        report.success_probability()
    );
    println!("  Cost: ${:.2}B", report.cost_billion_usd());
    println!("  {}", report.description());
}
