use thiserror::Error;

use crate::{config, effects, mitigation, propagator};

/// Any failure surfaced by the library crates.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Impact(#[from] effects::ImpactError),
    #[error(transparent)]
    Mitigation(#[from] mitigation::MitigationError),
    #[error(transparent)]
    Propagation(#[from] propagator::PropagationError),
    #[error("scenario `{0}` has a mitigation section but no asteroid to deflect")]
    MissingAsteroid(String),
}
