//! Two-body trajectory propagation around Earth.
//!
//! [`propagate`] integrates a body under point-mass gravity with a fixed-step
//! RK4 scheme, recording every state until the step budget runs out or the
//! body reaches the surface. Each call owns its state; nothing is shared
//! between runs.

pub mod approach;
pub mod integrator;

use impact_core::constants::EARTH_RADIUS_M;
use impact_core::vector::{self, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use integrator::{
    MU_EARTH, OrbitalState, Rk4Integrator, gravitational_acceleration, mechanical_energy,
};

pub const DEFAULT_TIMESTEP_S: f64 = 0.5;
pub const DEFAULT_MAX_STEPS: usize = 20_000;
pub const DEFAULT_BODY_MASS_KG: f64 = 1.0e5;
/// Relative energy drift above which a run is reported as suspect.
pub const ENERGY_DRIFT_TOLERANCE: f64 = 0.01;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PropagationError {
    #[error("timestep must be a positive number of seconds (got {0})")]
    InvalidTimestep(f64),
    #[error("initial position and velocity must be finite")]
    NonFiniteState,
    #[error("body mass must be a positive number of kilograms (got {0})")]
    InvalidMass(f64),
}

/// Inputs for a single propagation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropagationRequest {
    pub initial: OrbitalState,
    pub timestep_s: f64,
    pub max_steps: usize,
    /// Only used for the energy diagnostics.
    pub mass_kg: f64,
    pub crash_on_surface: bool,
}

impl PropagationRequest {
    pub fn new(position_m: Vector3, velocity_m_s: Vector3) -> Self {
        Self {
            initial: OrbitalState::new(position_m, velocity_m_s),
            timestep_s: DEFAULT_TIMESTEP_S,
            max_steps: DEFAULT_MAX_STEPS,
            mass_kg: DEFAULT_BODY_MASS_KG,
            crash_on_surface: true,
        }
    }

    pub fn with_timestep(mut self, timestep_s: f64) -> Self {
        self.timestep_s = timestep_s;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_mass(mut self, mass_kg: f64) -> Self {
        self.mass_kg = mass_kg;
        self
    }

    pub fn with_crash_detection(mut self, enabled: bool) -> Self {
        self.crash_on_surface = enabled;
        self
    }
}

/// One recorded integration step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectorySample {
    pub time_s: f64,
    pub state: OrbitalState,
    pub acceleration_m_s2: Vector3,
    pub altitude_km: f64,
    pub speed_km_s: f64,
    /// Energy relative to the initial state, `(E - E0) / |E0|`.
    pub energy_change: f64,
}

/// How and where a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TerminationRecord {
    pub crashed: bool,
    pub steps: usize,
    /// Distance from the centre of the state that ended the run (m).
    pub final_distance_m: f64,
    pub final_time_s: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    pub samples: Vec<TrajectorySample>,
    pub termination: TerminationRecord,
    pub mass_kg: f64,
    pub initial_energy_j: f64,
    /// Energy of the last recorded sample, or the initial energy if none were recorded.
    pub final_energy_j: f64,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn states(&self) -> impl Iterator<Item = &OrbitalState> + '_ {
        self.samples.iter().map(|s| &s.state)
    }

    pub fn last_state(&self) -> Option<&OrbitalState> {
        self.samples.last().map(|s| &s.state)
    }

    /// Relative change in mechanical energy between the first and last recorded states.
    pub fn energy_drift(&self) -> f64 {
        relative_change(self.initial_energy_j, self.final_energy_j).abs()
    }

    pub fn within_energy_tolerance(&self) -> bool {
        self.energy_drift() < ENERGY_DRIFT_TOLERANCE
    }

    /// Closest approach to Earth's centre among the recorded states (m).
    pub fn min_distance_m(&self) -> Option<f64> {
        self.states().map(OrbitalState::distance_m).reduce(f64::min)
    }
}

fn relative_change(reference: f64, value: f64) -> f64 {
    if reference == 0.0 {
        if value == 0.0 { 0.0 } else { f64::INFINITY }
    } else {
        (value - reference) / reference.abs()
    }
}

/// Convenience wrapper using the default body mass and surface crash detection.
pub fn propagate_orbit(
    position_m: Vector3,
    velocity_m_s: Vector3,
    timestep_s: f64,
    max_steps: usize,
) -> Result<Trajectory, PropagationError> {
    propagate(
        &PropagationRequest::new(position_m, velocity_m_s)
            .with_timestep(timestep_s)
            .with_max_steps(max_steps),
    )
}

/// Integrate `request` until its step budget is spent or the body reaches the surface.
///
/// The state that triggers the crash is not recorded; the last sample is the
/// final pre-impact position.
pub fn propagate(request: &PropagationRequest) -> Result<Trajectory, PropagationError> {
    let rk4 = Rk4Integrator::new(request.timestep_s)?;
    if !request.initial.is_finite() {
        return Err(PropagationError::NonFiniteState);
    }
    if !(request.mass_kg.is_finite() && request.mass_kg > 0.0) {
        return Err(PropagationError::InvalidMass(request.mass_kg));
    }

    let mass = request.mass_kg;
    let initial_energy = mechanical_energy(&request.initial, mass);
    let mut samples = Vec::with_capacity(request.max_steps.min(DEFAULT_MAX_STEPS));
    let mut state = request.initial;
    let mut steps = 0usize;
    let mut crashed = false;

    while steps < request.max_steps {
        if request.crash_on_surface && state.distance_m() <= EARTH_RADIUS_M {
            crashed = true;
            break;
        }

        let time_s = steps as f64 * rk4.dt_s();
        let energy = mechanical_energy(&state, mass);
        samples.push(TrajectorySample {
            time_s,
            state,
            acceleration_m_s2: gravitational_acceleration(&state.position_m),
            altitude_km: state.altitude_km(),
            speed_km_s: state.speed_km_s(),
            energy_change: relative_change(initial_energy, energy),
        });
        log::trace!(
            "t={time_s:.1}s r={:.0} m v={:.1} m/s",
            state.distance_m(),
            state.speed_m_s()
        );

        state = rk4.step(state);
        steps += 1;
    }

    let final_energy = samples
        .last()
        .map(|s| mechanical_energy(&s.state, mass))
        .unwrap_or(initial_energy);
    let trajectory = Trajectory {
        termination: TerminationRecord {
            crashed,
            steps,
            final_distance_m: vector::norm(&state.position_m),
            final_time_s: steps as f64 * rk4.dt_s(),
        },
        samples,
        mass_kg: mass,
        initial_energy_j: initial_energy,
        final_energy_j: final_energy,
    };

    log::debug!(
        "propagation finished after {} steps (crashed: {}, final distance {:.0} m)",
        trajectory.termination.steps,
        trajectory.termination.crashed,
        trajectory.termination.final_distance_m
    );
    if !trajectory.within_energy_tolerance() {
        log::warn!(
            "energy drift {:.3}% exceeds {:.1}% tolerance; consider a smaller timestep",
            trajectory.energy_drift() * 100.0,
            ENERGY_DRIFT_TOLERANCE * 100.0
        );
    }
    Ok(trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circular_speed(r: f64) -> f64 {
        (MU_EARTH / r).sqrt()
    }

    #[test]
    fn decaying_orbit_crashes_with_small_drift() {
        let trajectory = propagate_orbit([0.0, 1.0e7, 0.0], [3_000.0, 0.0, 0.0], 0.5, 20_000).unwrap();
        let end = trajectory.termination;
        assert!(end.crashed);
        assert!(end.steps > 1_000 && end.steps < 20_000, "{end:?}");
        assert_eq!(trajectory.len(), end.steps);
        assert!(end.final_distance_m <= EARTH_RADIUS_M);
        let last = trajectory.last_state().unwrap();
        assert!(last.distance_m() > EARTH_RADIUS_M);
        assert!(trajectory.energy_drift() < ENERGY_DRIFT_TOLERANCE);
    }

    #[test]
    fn samples_are_time_ordered() {
        let trajectory = propagate_orbit([0.0, 1.0e7, 0.0], [3_000.0, 0.0, 0.0], 0.5, 500).unwrap();
        assert_eq!(trajectory.len(), 500);
        assert!(!trajectory.termination.crashed);
        for (i, pair) in trajectory.samples.windows(2).enumerate() {
            assert!(pair[1].time_s > pair[0].time_s, "sample {i}");
        }
        assert_eq!(trajectory.samples[0].time_s, 0.0);
        assert_eq!(trajectory.samples[0].energy_change, 0.0);
    }

    #[test]
    fn circular_orbit_runs_to_step_limit() {
        let r = 7.0e6;
        let trajectory =
            propagate_orbit([r, 0.0, 0.0], [0.0, circular_speed(r), 0.0], 0.5, 1_000).unwrap();
        let end = trajectory.termination;
        assert!(!end.crashed);
        assert_eq!(end.steps, 1_000);
        assert_eq!(trajectory.len(), 1_000);
        assert!((end.final_distance_m - r).abs() / r < 1e-6);
        assert!(trajectory.energy_drift() < 1e-9);
        assert!((end.final_time_s - 500.0).abs() < 1e-9);
    }

    #[test]
    fn start_below_surface_crashes_immediately() {
        let trajectory = propagate_orbit([0.0, 0.0, 1.0e6], [0.0, 0.0, 0.0], 0.5, 100).unwrap();
        assert!(trajectory.is_empty());
        assert!(trajectory.termination.crashed);
        assert_eq!(trajectory.termination.steps, 0);
        assert_eq!(trajectory.termination.final_distance_m, 1.0e6);
        assert_eq!(trajectory.energy_drift(), 0.0);
    }

    #[test]
    fn crash_detection_can_be_disabled() {
        let request = PropagationRequest::new([0.0, 1.0e7, 0.0], [3_000.0, 0.0, 0.0])
            .with_max_steps(6_000)
            .with_crash_detection(false);
        let trajectory = propagate(&request).unwrap();
        assert!(!trajectory.termination.crashed);
        assert_eq!(trajectory.len(), 6_000);
        assert!(trajectory.min_distance_m().unwrap() < EARTH_RADIUS_M);
    }

    #[test]
    fn zero_step_budget_records_nothing() {
        let trajectory = propagate_orbit([7.0e6, 0.0, 0.0], [0.0, 7_500.0, 0.0], 0.5, 0).unwrap();
        assert!(trajectory.is_empty());
        assert!(!trajectory.termination.crashed);
        assert_eq!(trajectory.termination.final_distance_m, 7.0e6);
    }

    #[test]
    fn invalid_requests_are_rejected() {
        assert_eq!(
            propagate_orbit([7.0e6, 0.0, 0.0], [0.0, 7_500.0, 0.0], 0.0, 10),
            Err(PropagationError::InvalidTimestep(0.0))
        );
        assert_eq!(
            propagate_orbit([f64::NAN, 0.0, 0.0], [0.0, 7_500.0, 0.0], 0.5, 10),
            Err(PropagationError::NonFiniteState)
        );
        let heavy = PropagationRequest::new([7.0e6, 0.0, 0.0], [0.0, 7_500.0, 0.0]).with_mass(-1.0);
        assert_eq!(propagate(&heavy), Err(PropagationError::InvalidMass(-1.0)));
    }

    #[test]
    fn samples_carry_consistent_diagnostics() {
        let trajectory = propagate_orbit([0.0, 1.0e7, 0.0], [3_000.0, 0.0, 0.0], 0.5, 10).unwrap();
        let first = trajectory.samples[0];
        assert!((first.altitude_km - (1.0e4 - 6_371.0)).abs() < 1e-9);
        assert!((first.speed_km_s - 3.0).abs() < 1e-12);
        assert_eq!(first.acceleration_m_s2, gravitational_acceleration(&[0.0, 1.0e7, 0.0]));
    }

    #[test]
    fn concurrent_runs_are_independent() {
        let request = PropagationRequest::new([0.0, 1.0e7, 0.0], [3_000.0, 0.0, 0.0]).with_max_steps(2_000);
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(move || propagate(&request)))
            .collect();
        let reference = propagate(&request).unwrap();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), reference);
        }
    }
}
