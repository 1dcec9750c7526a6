//! Point-mass Earth gravity and the classic fourth-order Runge-Kutta step.

use impact_core::constants::{EARTH_MASS_KG, EARTH_RADIUS_M, G};
use impact_core::units::{m_to_km, ms_to_kms};
use impact_core::vector::{self, Vector3};
use serde::{Deserialize, Serialize};

use crate::PropagationError;

/// Gravitational parameter of Earth (m³/s²).
pub const MU_EARTH: f64 = G * EARTH_MASS_KG;

/// Position and velocity in an Earth-centred frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalState {
    pub position_m: Vector3,
    pub velocity_m_s: Vector3,
}

impl OrbitalState {
    pub fn new(position_m: Vector3, velocity_m_s: Vector3) -> Self {
        Self {
            position_m,
            velocity_m_s,
        }
    }

    /// Distance from Earth's centre (m).
    pub fn distance_m(&self) -> f64 {
        vector::norm(&self.position_m)
    }

    pub fn speed_m_s(&self) -> f64 {
        vector::norm(&self.velocity_m_s)
    }

    /// Height above the mean surface; negative once inside the sphere.
    pub fn altitude_km(&self) -> f64 {
        m_to_km(self.distance_m() - EARTH_RADIUS_M)
    }

    pub fn speed_km_s(&self) -> f64 {
        ms_to_kms(self.speed_m_s())
    }

    pub fn is_finite(&self) -> bool {
        vector::is_finite(&self.position_m) && vector::is_finite(&self.velocity_m_s)
    }
}

/// Acceleration toward Earth's centre, `-μ r̂ / |r|²`.
///
/// Returns zero at the exact centre instead of dividing by zero.
pub fn gravitational_acceleration(position_m: &Vector3) -> Vector3 {
    let r = vector::norm(position_m);
    if r == 0.0 {
        return vector::ZERO;
    }
    vector::scale(position_m, -MU_EARTH / (r * r * r))
}

/// Kinetic plus potential energy of a body of `mass_kg` (J).
pub fn mechanical_energy(state: &OrbitalState, mass_kg: f64) -> f64 {
    let kinetic = 0.5 * mass_kg * vector::dot(&state.velocity_m_s, &state.velocity_m_s);
    let r = state.distance_m();
    let potential = if r > 0.0 { -MU_EARTH * mass_kg / r } else { 0.0 };
    kinetic + potential
}

/// Fixed-step RK4 integrator for the two-body problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rk4Integrator {
    dt_s: f64,
}

impl Rk4Integrator {
    pub fn new(dt_s: f64) -> Result<Self, PropagationError> {
        if !(dt_s.is_finite() && dt_s > 0.0) {
            return Err(PropagationError::InvalidTimestep(dt_s));
        }
        Ok(Self { dt_s })
    }

    pub fn dt_s(&self) -> f64 {
        self.dt_s
    }

    /// Advance `state` by one timestep.
    pub fn step(&self, state: OrbitalState) -> OrbitalState {
        let dt = self.dt_s;
        let p = state.position_m;
        let v = state.velocity_m_s;

        let k1_p = v;
        let k1_v = gravitational_acceleration(&p);

        let k2_p = vector::add_scaled(&v, &k1_v, 0.5 * dt);
        let k2_v = gravitational_acceleration(&vector::add_scaled(&p, &k1_p, 0.5 * dt));

        let k3_p = vector::add_scaled(&v, &k2_v, 0.5 * dt);
        let k3_v = gravitational_acceleration(&vector::add_scaled(&p, &k2_p, 0.5 * dt));

        let k4_p = vector::add_scaled(&v, &k3_v, dt);
        let k4_v = gravitational_acceleration(&vector::add_scaled(&p, &k3_p, dt));

        OrbitalState {
            position_m: combine(&p, [&k1_p, &k2_p, &k3_p, &k4_p], dt),
            velocity_m_s: combine(&v, [&k1_v, &k2_v, &k3_v, &k4_v], dt),
        }
    }
}

fn combine(base: &Vector3, k: [&Vector3; 4], dt: f64) -> Vector3 {
    let mut out = *base;
    for i in 0..3 {
        out[i] += dt / 6.0 * (k[0][i] + 2.0 * k[1][i] + 2.0 * k[2][i] + k[3][i]);
    }
    out
}
