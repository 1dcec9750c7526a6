//! Scenario manifests for the asteroid impact calculator.
//!
//! A catalog is either a single TOML file holding one scenario, a directory
//! of such files (read in file-name order), or a YAML file holding a list.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// One named scenario. Every section is optional so a manifest can describe
/// only the part of the pipeline it cares about.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub asteroid: Option<AsteroidConfig>,
    #[serde(default)]
    pub mitigation: Option<MitigationConfig>,
    #[serde(default)]
    pub propagation: Option<PropagationConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AsteroidConfig {
    pub diameter_km: f64,
    pub velocity_km_s: f64,
    #[serde(default = "default_angle_deg")]
    pub angle_deg: f64,
    #[serde(default = "default_density")]
    pub density_kg_m3: f64,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MitigationConfig {
    pub lead_time_years: f64,
    #[serde(default = "default_method")]
    pub method: String,
    /// Overrides the reference kinetic impactor.
    #[serde(default)]
    pub impactor: Option<ImpactorConfig>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ImpactorConfig {
    pub mass_kg: f64,
    pub speed_km_s: f64,
    pub beta: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PropagationConfig {
    pub position_m: [f64; 3],
    pub velocity_m_s: [f64; 3],
    #[serde(default = "default_timestep")]
    pub timestep_s: f64,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    #[serde(default = "default_body_mass")]
    pub mass_kg: f64,
    #[serde(default = "default_true")]
    pub crash_on_surface: bool,
}

fn default_angle_deg() -> f64 {
    45.0
}

fn default_density() -> f64 {
    3_000.0
}

fn default_method() -> String {
    "kinetic_impactor".to_string()
}

fn default_timestep() -> f64 {
    0.5
}

fn default_max_steps() -> usize {
    20_000
}

fn default_body_mass() -> f64 {
    1.0e5
}

fn default_true() -> bool {
    true
}

/// Errors that can occur while loading scenario manifests.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("scenario `{0}` not found in catalog")]
    NotFound(String),
}

/// Load every scenario from a file or directory.
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioConfig>, ConfigError> {
    load_records(path)
}

/// Load the catalog at `path` and pick the scenario called `name`.
pub fn load_scenario<P: AsRef<Path>>(path: P, name: &str) -> Result<ScenarioConfig, ConfigError> {
    let scenarios = load_scenarios(path)?;
    find_scenario(&scenarios, name)
        .cloned()
        .ok_or_else(|| ConfigError::NotFound(name.to_string()))
}

/// Case-insensitive lookup by scenario name.
pub fn find_scenario<'a>(scenarios: &'a [ScenarioConfig], name: &str) -> Option<&'a ScenarioConfig> {
    let wanted = name.trim();
    scenarios
        .iter()
        .find(|scenario| scenario.name.eq_ignore_ascii_case(wanted))
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    let mut records = Vec::with_capacity(entries.len());
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        records.push(toml::from_str(&contents)?);
    }
    Ok(records)
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}
