use std::path::Path;

use anyhow::anyhow;
use asteroid_impact_calculator::config::{ScenarioConfig, load_scenario};

/// Catalog searched when `--catalog` is not given.
pub const DEFAULT_CATALOG: &str = "configs/scenarios";

/// `info` and above unless `RUST_LOG` says otherwise; logs go to stderr.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();
}

pub fn scenario(catalog: &Path, name: &str) -> anyhow::Result<ScenarioConfig> {
    load_scenario(catalog, name)
        .map_err(|err| anyhow!("{} (catalog: {})", err, catalog.display()))
}
