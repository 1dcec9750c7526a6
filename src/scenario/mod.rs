//! Turn catalog entries into domain requests and run them.

use serde::Serialize;

use crate::Error;
use crate::config::{AsteroidConfig, ImpactorConfig, PropagationConfig, ScenarioConfig};
use crate::core::units::kms_to_ms;
use crate::effects::{self, AsteroidBody, ImpactReport};
use crate::mitigation::{self, KineticImpactor, MitigationMethod, MitigationReport};
use crate::propagator::{self, PropagationRequest, Trajectory};

pub fn asteroid_body(config: &AsteroidConfig) -> AsteroidBody {
    AsteroidBody::new(config.diameter_km, config.velocity_km_s)
        .with_angle(config.angle_deg)
        .with_density(config.density_kg_m3)
        .at(config.latitude, config.longitude)
}

pub fn kinetic_impactor(config: &ImpactorConfig) -> KineticImpactor {
    KineticImpactor {
        mass_kg: config.mass_kg,
        speed_m_s: kms_to_ms(config.speed_km_s),
        beta: config.beta,
    }
}

pub fn propagation_request(config: &PropagationConfig) -> PropagationRequest {
    PropagationRequest::new(config.position_m, config.velocity_m_s)
        .with_timestep(config.timestep_s)
        .with_max_steps(config.max_steps)
        .with_mass(config.mass_kg)
        .with_crash_detection(config.crash_on_surface)
}

/// Everything a scenario asked for; sections absent from the manifest stay `None`.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub impact: Option<ImpactReport>,
    pub mitigation: Option<MitigationReport>,
    #[serde(skip)]
    pub trajectory: Option<Trajectory>,
}

/// Evaluate each section of `config` in turn.
pub fn run_scenario(config: &ScenarioConfig) -> Result<ScenarioOutcome, Error> {
    let body = config.asteroid.as_ref().map(asteroid_body);

    let impact = body.as_ref().map(effects::evaluate).transpose()?;

    let mitigation = match &config.mitigation {
        Some(section) => {
            let body = body
                .as_ref()
                .ok_or_else(|| Error::MissingAsteroid(config.name.clone()))?;
            let method: MitigationMethod = section.method.parse()?;
            let impactor = section
                .impactor
                .as_ref()
                .map(kinetic_impactor)
                .unwrap_or_default();
            Some(mitigation::evaluate_mitigation_with(
                body.diameter_km,
                body.velocity_km_s,
                section.lead_time_years,
                method,
                &impactor,
            )?)
        }
        None => None,
    };

    let trajectory = config
        .propagation
        .as_ref()
        .map(|section| propagator::propagate(&propagation_request(section)))
        .transpose()?;

    log::info!(
        "scenario `{}`: impact={} mitigation={} trajectory={}",
        config.name,
        impact.is_some(),
        mitigation.is_some(),
        trajectory.is_some()
    );
    Ok(ScenarioOutcome {
        name: config.name.clone(),
        impact,
        mitigation,
        trajectory,
    })
}
