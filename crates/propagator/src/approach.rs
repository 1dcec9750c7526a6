//! Approach velocity synthesis for when only a scalar speed is known.
//!
//! Randomness always comes from a caller-supplied generator; use
//! [`seeded_rng`] for reproducible runs.

use std::f64::consts::TAU;

use impact_core::vector::{self, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Velocity of magnitude `speed_m_s` in a direction drawn uniformly from the unit sphere.
pub fn synthesize_velocity<R: Rng + ?Sized>(speed_m_s: f64, rng: &mut R) -> Vector3 {
    let z: f64 = rng.gen_range(-1.0..=1.0);
    let phi: f64 = rng.gen_range(0.0..TAU);
    let ring = (1.0 - z * z).max(0.0).sqrt();
    [
        speed_m_s * ring * phi.cos(),
        speed_m_s * ring * phi.sin(),
        speed_m_s * z,
    ]
}

/// Like [`synthesize_velocity`], but flipped if needed so the body is closing on Earth.
pub fn synthesize_inbound_velocity<R: Rng + ?Sized>(
    position_m: &Vector3,
    speed_m_s: f64,
    rng: &mut R,
) -> Vector3 {
    let v = synthesize_velocity(speed_m_s, rng);
    if vector::dot(&v, position_m) > 0.0 {
        vector::scale(&v, -1.0)
    } else {
        v
    }
}
