//! Asteroid impact effects, deflection options and orbital decay in one place.
//!
//! Each concern lives in its own crate; this façade re-exports them under
//! short module names and adds [`scenario`] for running catalog entries end
//! to end. Front-ends (the CLI binaries, tests) depend on this crate only.

pub use impact_config as config;
pub use impact_core as core;
pub use impact_effects as effects;
pub use impact_export as export;
pub use impact_mitigation as mitigation;
pub use impact_propagator as propagator;

pub mod scenario;

mod error;

pub use error::Error;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
