//! Impact effect estimates for an asteroid striking Earth.
//!
//! [`compute_impact_effects`] validates its inputs and produces an
//! [`ImpactReport`]: released energy, crater, seismic magnitude, blast and
//! thermal radii, tsunami risk and an overall severity band. All formulas are
//! closed-form; see [`scaling`] for the constants.

pub mod classify;
pub mod scaling;
pub mod tsunami;

use impact_core::body::sphere_mass;
use impact_core::constants::HIROSHIMA_MEGATONS;
use impact_core::density::DEFAULT_IMPACTOR;
use impact_core::units::{joules_to_megatons, km_to_m, kms_to_ms, megatons_to_kilotons};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use classify::{SeismicClass, Severity};
pub use tsunami::TsunamiRisk;

/// Default impact angle from the horizontal (degrees).
pub const DEFAULT_ANGLE_DEG: f64 = 45.0;

/// Physical description of the incoming body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsteroidBody {
    pub diameter_km: f64,
    pub velocity_km_s: f64,
    /// Angle from the horizontal, in (0, 90].
    pub angle_deg: f64,
    pub density_kg_m3: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl AsteroidBody {
    /// Body with the default angle, density and an equatorial impact point.
    pub fn new(diameter_km: f64, velocity_km_s: f64) -> Self {
        Self {
            diameter_km,
            velocity_km_s,
            angle_deg: DEFAULT_ANGLE_DEG,
            density_kg_m3: DEFAULT_IMPACTOR,
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    pub fn with_angle(mut self, angle_deg: f64) -> Self {
        self.angle_deg = angle_deg;
        self
    }

    pub fn with_density(mut self, density_kg_m3: f64) -> Self {
        self.density_kg_m3 = density_kg_m3;
        self
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    /// Mass of the body assuming a homogeneous sphere (kg); negative inputs
    /// count as zero.
    pub fn mass_kg(&self) -> f64 {
        sphere_mass(km_to_m(self.diameter_km.max(0.0)), self.density_kg_m3.max(0.0))
    }

    /// Reject inputs the formulas are not defined for.
    pub fn validate(&self) -> Result<(), ImpactError> {
        if !(self.diameter_km.is_finite() && self.diameter_km > 0.0) {
            return Err(ImpactError::InvalidDiameter(self.diameter_km));
        }
        if !(self.velocity_km_s.is_finite() && self.velocity_km_s > 0.0) {
            return Err(ImpactError::InvalidVelocity(self.velocity_km_s));
        }
        if !(self.density_kg_m3.is_finite() && self.density_kg_m3 > 0.0) {
            return Err(ImpactError::InvalidDensity(self.density_kg_m3));
        }
        if !(self.angle_deg > 0.0 && self.angle_deg <= 90.0) {
            return Err(ImpactError::InvalidAngle(self.angle_deg));
        }
        if !(self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude))
            || !self.longitude.is_finite()
        {
            return Err(ImpactError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            });
        }
        Ok(())
    }
}

/// Input validation failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ImpactError {
    #[error("diameter must be a positive number of kilometres (got {0})")]
    InvalidDiameter(f64),
    #[error("velocity must be a positive number of km/s (got {0})")]
    InvalidVelocity(f64),
    #[error("density must be a positive number of kg/m³ (got {0})")]
    InvalidDensity(f64),
    #[error("impact angle must lie in (0, 90] degrees (got {0})")]
    InvalidAngle(f64),
    #[error("impact location ({latitude}, {longitude}) is not a valid coordinate")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

/// Released kinetic energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactEnergy {
    pub joules: f64,
    pub megatons: f64,
    pub kilotons: f64,
}

/// Ground crater; both dimensions are zero for an airburst.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Crater {
    pub diameter_km: f64,
    pub depth_km: f64,
    pub airburst: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Seismic {
    pub magnitude: f64,
    pub class: SeismicClass,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DamageZones {
    pub blast_radius_km: f64,
    pub thermal_radius_km: f64,
    pub tsunami_risk: TsunamiRisk,
    /// Ocean basin the impact point falls in, if any.
    pub ocean_basin: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub hiroshima_equivalent: f64,
    pub severity: Severity,
    pub severity_label: &'static str,
}

/// Echo of the inputs plus the derived mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AsteroidParams {
    pub mass_kg: f64,
    pub diameter_km: f64,
    pub velocity_km_s: f64,
    pub angle_deg: f64,
    pub density_kg_m3: f64,
}

/// Complete set of impact consequences for one body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactReport {
    pub impact_energy: ImpactEnergy,
    pub crater: Crater,
    pub seismic: Seismic,
    pub damage_zones: DamageZones,
    pub impact_location: ImpactLocation,
    pub comparison: Comparison,
    pub asteroid_params: AsteroidParams,
}

impl ImpactReport {
    /// Evaluate every effect for `body` without validating it.
    ///
    /// Zero diameter or speed yields zero energy and floor values everywhere;
    /// callers facing untrusted input should go through [`compute_impact_effects`].
    pub fn from_body(body: &AsteroidBody) -> Self {
        let diameter_m = km_to_m(body.diameter_km.max(0.0));
        let velocity_m_s = kms_to_ms(body.velocity_km_s.max(0.0));
        let mass_kg = body.mass_kg();

        let joules = scaling::kinetic_energy_joules(mass_kg, velocity_m_s);
        let megatons = joules_to_megatons(joules);

        let airburst = scaling::is_airburst(body.diameter_km, body.density_kg_m3);
        let diameter_km = if airburst {
            0.0
        } else {
            scaling::final_crater_diameter_km(
                diameter_m,
                velocity_m_s,
                body.density_kg_m3,
                body.angle_deg,
            )
        };

        let magnitude = scaling::seismic_magnitude(joules);
        let class = SeismicClass::from_magnitude(magnitude);
        let (tsunami_risk, basin) = tsunami::assess(body.latitude, body.longitude, magnitude);
        let severity = Severity::from_megatons(megatons);

        ImpactReport {
            impact_energy: ImpactEnergy {
                joules,
                megatons,
                kilotons: megatons_to_kilotons(megatons),
            },
            crater: Crater {
                diameter_km,
                depth_km: diameter_km * scaling::CRATER_DEPTH_FRACTION,
                airburst,
            },
            seismic: Seismic {
                magnitude,
                class,
                description: class.description(),
            },
            damage_zones: DamageZones {
                blast_radius_km: scaling::blast_radius_km(megatons),
                thermal_radius_km: scaling::thermal_radius_km(megatons),
                tsunami_risk,
                ocean_basin: basin.map(|b| b.name),
            },
            impact_location: ImpactLocation {
                latitude: body.latitude,
                longitude: body.longitude,
            },
            comparison: Comparison {
                hiroshima_equivalent: megatons / HIROSHIMA_MEGATONS,
                severity,
                severity_label: severity.label(),
            },
            asteroid_params: AsteroidParams {
                mass_kg,
                diameter_km: body.diameter_km,
                velocity_km_s: body.velocity_km_s,
                angle_deg: body.angle_deg,
                density_kg_m3: body.density_kg_m3,
            },
        }
    }
}

/// Validate the inputs and compute the full impact report.
pub fn compute_impact_effects(
    diameter_km: f64,
    velocity_km_s: f64,
    angle_deg: f64,
    density_kg_m3: f64,
    latitude: f64,
    longitude: f64,
) -> Result<ImpactReport, ImpactError> {
    let body = AsteroidBody {
        diameter_km,
        velocity_km_s,
        angle_deg,
        density_kg_m3,
        latitude,
        longitude,
    };
    evaluate(&body)
}

/// Validate an [`AsteroidBody`] and compute its impact report.
pub fn evaluate(body: &AsteroidBody) -> Result<ImpactReport, ImpactError> {
    body.validate()?;
    let report = ImpactReport::from_body(body);
    log::debug!(
        "impact d={:.3} km v={:.2} km/s -> {:.3e} Mt, crater {:.2} km, M{:.2}, {:?}",
        body.diameter_km,
        body.velocity_km_s,
        report.impact_energy.megatons,
        report.crater.diameter_km,
        report.seismic.magnitude,
        report.comparison.severity,
    );
    Ok(report)
}

#[cfg(test)]
mod proptest_effects;
