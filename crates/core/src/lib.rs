//! Core units, constants, and shared primitives for the asteroid impact calculator workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Newtonian gravitational constant (m³/(kg·s²)).
    pub const G: f64 = 6.674_30e-11;
    /// Earth mass (kg).
    pub const EARTH_MASS_KG: f64 = 5.972e24;
    /// Earth mean radius (m).
    pub const EARTH_RADIUS_M: f64 = 6.371e6;
    /// Earth mean radius (km).
    pub const EARTH_RADIUS_KM: f64 = 6_371.0;
    /// Standard gravity at Earth's surface (m/s²).
    pub const SURFACE_GRAVITY: f64 = 9.81;
    /// Joules released by one megaton of TNT.
    pub const JOULES_PER_MEGATON: f64 = 4.184e15;
    /// Hiroshima yield in megatons (15 kt).
    pub const HIROSHIMA_MEGATONS: f64 = 0.015;
    /// Seconds per day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Seconds per (365-day) year, the year length used by deflection estimates.
    pub const SECONDS_PER_YEAR: f64 = 365.0 * SECONDS_PER_DAY;
}

/// Reference bulk densities (kg/m³).
pub mod density {
    /// Default impactor density for effect estimates.
    pub const DEFAULT_IMPACTOR: f64 = 3_000.0;
    /// Density assumed when sizing an asteroid for mitigation studies.
    pub const MITIGATION_ASSUMED: f64 = 3_000.0;
    /// Crustal target rock density used by crater scaling.
    pub const TARGET_ROCK: f64 = 2_500.0;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::JOULES_PER_MEGATON;

    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert metres per second to kilometres per second.
    #[inline]
    pub fn ms_to_kms(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert kilometres per second to metres per second.
    #[inline]
    pub fn kms_to_ms(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert joules to megatons of TNT.
    #[inline]
    pub fn joules_to_megatons(joules: f64) -> f64 {
        joules / JOULES_PER_MEGATON
    }

    /// Convert megatons to kilotons.
    #[inline]
    pub fn megatons_to_kilotons(megatons: f64) -> f64 {
        megatons * 1_000.0
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::SECONDS_PER_YEAR;

    /// Convert years to seconds.
    #[inline]
    pub fn years_to_seconds(years: f64) -> f64 {
        years * SECONDS_PER_YEAR
    }
}

/// Mass properties of a homogeneous spherical body.
pub mod body {
    use std::f64::consts::PI;

    /// Volume of a sphere of the given diameter (m³ when the diameter is in metres).
    #[inline]
    pub fn sphere_volume(diameter_m: f64) -> f64 {
        let radius = diameter_m * 0.5;
        (4.0 / 3.0) * PI * radius.powi(3)
    }

    /// Mass of a sphere of the given diameter (m) and bulk density (kg/m³).
    #[inline]
    pub fn sphere_mass(diameter_m: f64, density_kg_m3: f64) -> f64 {
        sphere_volume(diameter_m) * density_kg_m3
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in metres or m/s depending on context.
    pub type Vector3 = [f64; 3];

    /// The zero vector.
    pub const ZERO: Vector3 = [0.0, 0.0, 0.0];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Cross product of two vectors.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// `a + b * s`, the fused form used by the integrator stages.
    #[inline]
    pub fn add_scaled(a: &Vector3, b: &Vector3, s: f64) -> Vector3 {
        [a[0] + b[0] * s, a[1] + b[1] * s, a[2] + b[2] * s]
    }

    /// True when every component is finite.
    #[inline]
    pub fn is_finite(v: &Vector3) -> bool {
        v.iter().all(|c| c.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_mass_of_one_kilometre_rock() {
        let mass = body::sphere_mass(1_000.0, 3_000.0);
        assert!((mass - 1.570_796_326_8e12).abs() / mass < 1e-9);
    }

    #[test]
    fn vector_operations() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        assert_eq!(vector::add(&a, &b), [5.0, 7.0, 9.0]);
        assert!((vector::dot(&a, &b) - 32.0).abs() < 1e-12);
        assert_eq!(vector::cross(&a, &b), [-3.0, 6.0, -3.0]);
        assert_eq!(vector::add_scaled(&a, &b, 2.0), [9.0, 12.0, 15.0]);
        assert!((vector::norm(&[3.0, 4.0, 0.0]) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn megaton_conversion() {
        assert!((units::joules_to_megatons(4.184e15) - 1.0).abs() < 1e-12);
        assert!((units::megatons_to_kilotons(0.015) - 15.0).abs() < 1e-12);
        assert!((time::years_to_seconds(1.0) - 31_536_000.0).abs() < 1e-6);
    }
}
