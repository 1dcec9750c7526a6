use proptest::prelude::*;

use super::{AsteroidBody, ImpactReport, Severity, compute_impact_effects};

fn body_strategy() -> impl Strategy<Value = AsteroidBody> {
    (
        0.01f64..20.0,
        5.0f64..70.0,
        1.0f64..=90.0,
        1_000.0f64..8_000.0,
        -90.0f64..=90.0,
        -180.0f64..180.0,
    )
        .prop_map(|(d, v, angle, rho, lat, lon)| {
            AsteroidBody::new(d, v)
                .with_angle(angle)
                .with_density(rho)
                .at(lat, lon)
        })
}

proptest! {
    #[test]
    fn outputs_are_finite_and_non_negative(body in body_strategy()) {
        let report = ImpactReport::from_body(&body);
        let values = [
            report.impact_energy.joules,
            report.impact_energy.megatons,
            report.crater.diameter_km,
            report.crater.depth_km,
            report.seismic.magnitude,
            report.damage_zones.blast_radius_km,
            report.damage_zones.thermal_radius_km,
        ];
        for value in values {
            prop_assert!(value.is_finite() && value >= 0.0, "{value} in {report:?}");
        }
        prop_assert!(report.crater.depth_km <= report.crater.diameter_km);
        prop_assert!(report.damage_zones.thermal_radius_km < report.damage_zones.blast_radius_km);
    }

    #[test]
    fn validated_path_matches_kernel(body in body_strategy()) {
        let checked = compute_impact_effects(
            body.diameter_km,
            body.velocity_km_s,
            body.angle_deg,
            body.density_kg_m3,
            body.latitude,
            body.longitude,
        );
        prop_assert_eq!(checked, Ok(ImpactReport::from_body(&body)));
    }

    #[test]
    fn larger_bodies_never_rank_lower(body in body_strategy(), growth in 1.0f64..5.0) {
        let small = ImpactReport::from_body(&body);
        let mut bigger = body;
        bigger.diameter_km *= growth;
        let large = ImpactReport::from_body(&bigger);
        prop_assert!(large.impact_energy.joules >= small.impact_energy.joules);
        prop_assert!(large.seismic.magnitude >= small.seismic.magnitude);
        prop_assert!(large.comparison.severity >= small.comparison.severity);
    }

    #[test]
    fn severity_is_monotonic_in_energy(a in 0.0f64..1.0e6, b in 0.0f64..1.0e6) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(Severity::from_megatons(lo) <= Severity::from_megatons(hi));
    }
}
