//! Deflection strategy evaluation.
//!
//! Two methods are modelled: a single kinetic impactor that nudges the
//! asteroid by momentum transfer, and a gravity tractor that needs a minimum
//! amount of warning time. Both are coarse heuristics intended for comparing
//! options, not for mission design.

use std::fmt;
use std::str::FromStr;

use impact_core::body::sphere_mass;
use impact_core::constants::EARTH_RADIUS_KM;
use impact_core::density::MITIGATION_ASSUMED;
use impact_core::time::years_to_seconds;
use impact_core::units::{km_to_m, m_to_km};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ceiling on the kinetic-impactor success probability (percent).
pub const KINETIC_MAX_PROBABILITY: f64 = 95.0;
/// Ceiling on the gravity-tractor success probability (percent).
pub const TRACTOR_MAX_PROBABILITY: f64 = 90.0;
/// Gravity tractors never need less than this much warning.
pub const TRACTOR_MIN_YEARS: f64 = 10.0;
/// Warning time a gravity tractor needs per kilometre of diameter.
pub const TRACTOR_YEARS_PER_KM: f64 = 5.0;

/// Recognised deflection methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MitigationMethod {
    KineticImpactor,
    GravityTractor,
}

impl MitigationMethod {
    pub const ALL: [MitigationMethod; 2] =
        [MitigationMethod::KineticImpactor, MitigationMethod::GravityTractor];

    pub fn as_str(self) -> &'static str {
        match self {
            MitigationMethod::KineticImpactor => "kinetic_impactor",
            MitigationMethod::GravityTractor => "gravity_tractor",
        }
    }
}

impl fmt::Display for MitigationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MitigationMethod {
    type Err = MitigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "kinetic_impactor" => Ok(MitigationMethod::KineticImpactor),
            "gravity_tractor" => Ok(MitigationMethod::GravityTractor),
            other => Err(MitigationError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// Spacecraft used for a kinetic deflection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KineticImpactor {
    pub mass_kg: f64,
    pub speed_m_s: f64,
    /// Momentum enhancement from ejecta recoil.
    pub beta: f64,
}

impl Default for KineticImpactor {
    fn default() -> Self {
        Self {
            mass_kg: 500.0,
            speed_m_s: 10_000.0,
            beta: 2.0,
        }
    }
}

impl KineticImpactor {
    /// Velocity change imparted on a body of `target_mass_kg` (m/s).
    pub fn delta_v_m_s(&self, target_mass_kg: f64) -> f64 {
        if target_mass_kg <= 0.0 {
            return 0.0;
        }
        self.beta * self.mass_kg * self.speed_m_s / target_mass_kg
    }

    /// Reject impactors with a non-finite or non-positive parameter.
    pub fn validate(&self) -> Result<(), MitigationError> {
        for (field, value) in [
            ("mass_kg", self.mass_kg),
            ("speed_m_s", self.speed_m_s),
            ("beta", self.beta),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(MitigationError::InvalidImpactor { field, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KineticImpactorReport {
    pub delta_v_m_s: f64,
    pub deflection_km: f64,
    pub success_probability: f64,
    pub success: bool,
    pub cost_billion_usd: f64,
    pub time_required_years: f64,
    pub velocity_km_s: f64,
    pub impactor: KineticImpactor,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GravityTractorReport {
    pub required_years: f64,
    pub success_probability: f64,
    pub success: bool,
    pub cost_billion_usd: f64,
    pub time_required_years: f64,
    pub velocity_km_s: f64,
    pub description: String,
}

/// Outcome of evaluating one method, tagged by `method` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum MitigationReport {
    KineticImpactor(KineticImpactorReport),
    GravityTractor(GravityTractorReport),
}

impl MitigationReport {
    pub fn method(&self) -> MitigationMethod {
        match self {
            MitigationReport::KineticImpactor(_) => MitigationMethod::KineticImpactor,
            MitigationReport::GravityTractor(_) => MitigationMethod::GravityTractor,
        }
    }

    pub fn success(&self) -> bool {
        match self {
            MitigationReport::KineticImpactor(r) => r.success,
            MitigationReport::GravityTractor(r) => r.success,
        }
    }

    /// Percent, in `[0, 95]` or `[0, 90]` depending on the method.
    pub fn success_probability(&self) -> f64 {
        match self {
            MitigationReport::KineticImpactor(r) => r.success_probability,
            MitigationReport::GravityTractor(r) => r.success_probability,
        }
    }

    pub fn cost_billion_usd(&self) -> f64 {
        match self {
            MitigationReport::KineticImpactor(r) => r.cost_billion_usd,
            MitigationReport::GravityTractor(r) => r.cost_billion_usd,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            MitigationReport::KineticImpactor(r) => &r.description,
            MitigationReport::GravityTractor(r) => &r.description,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MitigationError {
    #[error("unsupported mitigation method `{0}` (expected kinetic_impactor or gravity_tractor)")]
    UnsupportedMethod(String),
    #[error("diameter must be a positive number of kilometres (got {0})")]
    InvalidDiameter(f64),
    #[error("velocity must be a positive number of km/s (got {0})")]
    InvalidVelocity(f64),
    #[error("lead time must be a positive number of years (got {0})")]
    InvalidLeadTime(f64),
    #[error("kinetic impactor {field} must be a positive finite number (got {value})")]
    InvalidImpactor { field: &'static str, value: f64 },
}

fn validate(diameter_km: f64, velocity_km_s: f64, lead_time_years: f64) -> Result<(), MitigationError> {
    if !(diameter_km.is_finite() && diameter_km > 0.0) {
        return Err(MitigationError::InvalidDiameter(diameter_km));
    }
    if !(velocity_km_s.is_finite() && velocity_km_s > 0.0) {
        return Err(MitigationError::InvalidVelocity(velocity_km_s));
    }
    if !(lead_time_years.is_finite() && lead_time_years > 0.0) {
        return Err(MitigationError::InvalidLeadTime(lead_time_years));
    }
    Ok(())
}

/// Evaluate `method` using the reference kinetic impactor.
///
/// `method` is matched exactly (after trimming); anything other than
/// `kinetic_impactor` or `gravity_tractor` is rejected.
pub fn evaluate_mitigation(
    diameter_km: f64,
    velocity_km_s: f64,
    lead_time_years: f64,
    method: &str,
) -> Result<MitigationReport, MitigationError> {
    let method = method.parse::<MitigationMethod>()?;
    evaluate_mitigation_with(
        diameter_km,
        velocity_km_s,
        lead_time_years,
        method,
        &KineticImpactor::default(),
    )
}

/// Evaluate `method` with an explicit impactor; the impactor is ignored for
/// the gravity tractor.
pub fn evaluate_mitigation_with(
    diameter_km: f64,
    velocity_km_s: f64,
    lead_time_years: f64,
    method: MitigationMethod,
    impactor: &KineticImpactor,
) -> Result<MitigationReport, MitigationError> {
    validate(diameter_km, velocity_km_s, lead_time_years)?;
    if method == MitigationMethod::KineticImpactor {
        impactor.validate()?;
    }
    let report = match method {
        MitigationMethod::KineticImpactor => MitigationReport::KineticImpactor(kinetic_impactor(
            diameter_km,
            velocity_km_s,
            lead_time_years,
            impactor,
        )),
        MitigationMethod::GravityTractor => MitigationReport::GravityTractor(gravity_tractor(
            diameter_km,
            velocity_km_s,
            lead_time_years,
        )),
    };
    log::debug!(
        "{} for d={diameter_km} km, lead {lead_time_years} y: p={:.1}% success={}",
        method,
        report.success_probability(),
        report.success()
    );
    Ok(report)
}

/// Evaluate every method and order by success probability, best first.
pub fn compare_strategies(
    diameter_km: f64,
    velocity_km_s: f64,
    lead_time_years: f64,
) -> Result<Vec<MitigationReport>, MitigationError> {
    compare_strategies_with(
        diameter_km,
        velocity_km_s,
        lead_time_years,
        &KineticImpactor::default(),
    )
}

/// Like [`compare_strategies`], with `impactor` driving the kinetic option.
pub fn compare_strategies_with(
    diameter_km: f64,
    velocity_km_s: f64,
    lead_time_years: f64,
    impactor: &KineticImpactor,
) -> Result<Vec<MitigationReport>, MitigationError> {
    let mut reports = MitigationMethod::ALL
        .iter()
        .map(|&method| {
            evaluate_mitigation_with(diameter_km, velocity_km_s, lead_time_years, method, impactor)
        })
        .collect::<Result<Vec<_>, _>>()?;
    reports.sort_by(|a, b| b.success_probability().total_cmp(&a.success_probability()));
    Ok(reports)
}

fn kinetic_impactor(
    diameter_km: f64,
    velocity_km_s: f64,
    lead_time_years: f64,
    impactor: &KineticImpactor,
) -> KineticImpactorReport {
    let asteroid_mass = sphere_mass(km_to_m(diameter_km), MITIGATION_ASSUMED);
    let delta_v_m_s = impactor.delta_v_m_s(asteroid_mass);
    let deflection_km = m_to_km(delta_v_m_s * years_to_seconds(lead_time_years));
    let success_probability =
        (15.0 * lead_time_years + deflection_km / 1_000.0).min(KINETIC_MAX_PROBABILITY);

    KineticImpactorReport {
        delta_v_m_s,
        deflection_km,
        success_probability,
        success: deflection_km > EARTH_RADIUS_KM,
        cost_billion_usd: 0.5 + 0.1 * lead_time_years,
        time_required_years: lead_time_years,
        velocity_km_s,
        impactor: *impactor,
        description: format!(
            "A {} kg impactor would deflect the asteroid by {:.1} km",
            impactor.mass_kg, deflection_km
        ),
    }
}

/// Minimum warning time for a gravity tractor to work on a body this size.
pub fn tractor_required_years(diameter_km: f64) -> f64 {
    (TRACTOR_YEARS_PER_KM * diameter_km).max(TRACTOR_MIN_YEARS)
}

fn gravity_tractor(
    diameter_km: f64,
    velocity_km_s: f64,
    lead_time_years: f64,
) -> GravityTractorReport {
    let required_years = tractor_required_years(diameter_km);
    GravityTractorReport {
        required_years,
        success_probability: (100.0 * lead_time_years / required_years)
            .min(TRACTOR_MAX_PROBABILITY),
        success: lead_time_years >= required_years,
        cost_billion_usd: 0.2 * lead_time_years,
        time_required_years: lead_time_years,
        velocity_km_s,
        description: format!(
            "Requires at least {:.1} years for this asteroid size",
            required_years
        ),
    }
}
