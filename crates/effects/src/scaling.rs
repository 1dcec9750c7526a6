//! Empirical scaling laws used by the impact report.
//!
//! Every function here is total over non-negative inputs: zero size or speed
//! collapses to zero energy and zero radii instead of producing NaN.

use impact_core::constants::SURFACE_GRAVITY;
use impact_core::density::TARGET_ROCK;

/// Size below which a stony body is assumed to break up in the atmosphere (km).
pub const AIRBURST_DIAMETER_KM: f64 = 0.1;
/// Bodies at or above this density survive entry regardless of size (kg/m³).
pub const AIRBURST_MAX_DENSITY: f64 = 3_500.0;
/// Leading coefficient of the transient-crater pi-scaling law.
pub const TRANSIENT_CRATER_COEFFICIENT: f64 = 1.161;
/// Rim-collapse factor from transient to final simple crater.
pub const FINAL_CRATER_FACTOR: f64 = 1.25;
/// Depth as a fraction of final crater diameter.
pub const CRATER_DEPTH_FRACTION: f64 = 0.2;
/// Seismic magnitude slope, `M = a log10(E) + b`.
pub const SEISMIC_SLOPE: f64 = 0.67;
/// Seismic magnitude offset.
pub const SEISMIC_OFFSET: f64 = -5.87;
/// Overpressure radius per cube-root megaton (km).
pub const BLAST_COEFFICIENT_KM: f64 = 2.2;
/// Thermal radius per cube-root megaton (km).
pub const THERMAL_COEFFICIENT_KM: f64 = 0.14;

/// Kinetic energy `½ m v²` in joules.
#[inline]
pub fn kinetic_energy_joules(mass_kg: f64, velocity_m_s: f64) -> f64 {
    0.5 * mass_kg * velocity_m_s * velocity_m_s
}

/// Transient crater diameter in metres.
///
/// `D_tc = 1.161 (ρi/ρt)^(1/3) L^0.78 v^0.44 g^-0.22 sin(θ)^(1/3)` with the
/// projectile diameter `L` in metres, speed `v` in m/s and `θ` measured from
/// the horizontal.
pub fn transient_crater_diameter_m(
    diameter_m: f64,
    velocity_m_s: f64,
    density_kg_m3: f64,
    angle_deg: f64,
) -> f64 {
    if diameter_m <= 0.0 || velocity_m_s <= 0.0 || density_kg_m3 <= 0.0 {
        return 0.0;
    }
    let density_ratio = (density_kg_m3 / TARGET_ROCK).cbrt();
    let angle_term = angle_deg.to_radians().sin().max(0.0).cbrt();
    TRANSIENT_CRATER_COEFFICIENT
        * density_ratio
        * diameter_m.powf(0.78)
        * velocity_m_s.powf(0.44)
        * SURFACE_GRAVITY.powf(-0.22)
        * angle_term
}

/// Final (post-collapse) crater diameter in kilometres.
pub fn final_crater_diameter_km(
    diameter_m: f64,
    velocity_m_s: f64,
    density_kg_m3: f64,
    angle_deg: f64,
) -> f64 {
    FINAL_CRATER_FACTOR
        * transient_crater_diameter_m(diameter_m, velocity_m_s, density_kg_m3, angle_deg)
        / 1_000.0
}

/// Whether the body disintegrates before reaching the ground.
#[inline]
pub fn is_airburst(diameter_km: f64, density_kg_m3: f64) -> bool {
    diameter_km < AIRBURST_DIAMETER_KM && density_kg_m3 < AIRBURST_MAX_DENSITY
}

/// Richter-like magnitude of the ground shaking; zero for non-positive energy.
pub fn seismic_magnitude(energy_joules: f64) -> f64 {
    if energy_joules > 0.0 {
        SEISMIC_SLOPE * energy_joules.log10() + SEISMIC_OFFSET
    } else {
        0.0
    }
}

/// Severe-overpressure radius in kilometres.
#[inline]
pub fn blast_radius_km(megatons: f64) -> f64 {
    BLAST_COEFFICIENT_KM * megatons.max(0.0).cbrt()
}

/// Third-degree-burn radius in kilometres.
#[inline]
pub fn thermal_radius_km(megatons: f64) -> f64 {
    THERMAL_COEFFICIENT_KM * megatons.max(0.0).cbrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crater_for_kilometre_rock_is_ten_to_twenty_km() {
        let d = final_crater_diameter_km(1_000.0, 20_000.0, 3_000.0, 45.0);
        assert!((10.0..20.0).contains(&d), "crater {d} km");
    }

    #[test]
    fn vertical_impacts_dig_wider_craters() {
        let shallow = transient_crater_diameter_m(500.0, 17_000.0, 2_600.0, 15.0);
        let vertical = transient_crater_diameter_m(500.0, 17_000.0, 2_600.0, 90.0);
        assert!(vertical > shallow);
    }

    #[test]
    fn degenerate_inputs_give_zero_crater() {
        assert_eq!(transient_crater_diameter_m(0.0, 20_000.0, 3_000.0, 45.0), 0.0);
        assert_eq!(transient_crater_diameter_m(100.0, 0.0, 3_000.0, 45.0), 0.0);
        assert_eq!(transient_crater_diameter_m(100.0, 20_000.0, 3_000.0, 0.0), 0.0);
    }

    #[test]
    fn seismic_magnitude_never_takes_log_of_zero() {
        assert_eq!(seismic_magnitude(0.0), 0.0);
        assert_eq!(seismic_magnitude(-1.0), 0.0);
        assert!((seismic_magnitude(1.0e20) - (0.67 * 20.0 - 5.87)).abs() < 1e-12);
    }

    #[test]
    fn thermal_radius_is_inside_blast_radius() {
        for mt in [1e-6, 0.015, 1.0, 100.0, 1e6] {
            assert!(thermal_radius_km(mt) < blast_radius_km(mt));
        }
        assert_eq!(blast_radius_km(0.0), 0.0);
        assert_eq!(thermal_radius_km(0.0), 0.0);
    }

    #[test]
    fn airburst_threshold() {
        assert!(is_airburst(0.05, 3_000.0));
        assert!(!is_airburst(0.05, 7_800.0));
        assert!(!is_airburst(0.1, 3_000.0));
        assert!(!is_airburst(1.0, 3_000.0));
    }
}
