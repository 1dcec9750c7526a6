//! Qualitative classification bands for yield and ground shaking.

use serde::Serialize;

/// Upper bounds (exclusive, megatons TNT) of the severity bands below `ExtinctionLevel`.
pub const SEVERITY_BOUNDS_MT: [f64; 4] = [0.01, 1.0, 100.0, 10_000.0];

/// Overall consequence band, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minimal,
    Localized,
    SevereRegional,
    CatastrophicGlobal,
    ExtinctionLevel,
}

impl Severity {
    /// Band for a given yield. NaN falls into `Minimal`.
    pub fn from_megatons(megatons: f64) -> Self {
        let [minimal, localized, regional, global] = SEVERITY_BOUNDS_MT;
        if megatons.is_nan() || megatons < minimal {
            Severity::Minimal
        } else if megatons < localized {
            Severity::Localized
        } else if megatons < regional {
            Severity::SevereRegional
        } else if megatons < global {
            Severity::CatastrophicGlobal
        } else {
            Severity::ExtinctionLevel
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Minimal => "Minimal - Local damage only",
            Severity::Localized => "Localized - City-scale destruction",
            Severity::SevereRegional => "Severe Regional - Regional catastrophe",
            Severity::CatastrophicGlobal => "Catastrophic Global - Continental damage",
            Severity::ExtinctionLevel => "Extinction Level - Global mass extinction",
        }
    }
}

/// Descriptive band for a Richter-like magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeismicClass {
    Minor,
    Light,
    Moderate,
    Strong,
    Major,
    Great,
}

impl SeismicClass {
    pub fn from_magnitude(magnitude: f64) -> Self {
        if magnitude.is_nan() || magnitude < 4.0 {
            SeismicClass::Minor
        } else if magnitude < 5.0 {
            SeismicClass::Light
        } else if magnitude < 6.0 {
            SeismicClass::Moderate
        } else if magnitude < 7.0 {
            SeismicClass::Strong
        } else if magnitude < 8.0 {
            SeismicClass::Major
        } else {
            SeismicClass::Great
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SeismicClass::Minor => "Minor - Often felt, rarely causes damage",
            SeismicClass::Light => "Light - Noticeable shaking, slight damage",
            SeismicClass::Moderate => "Moderate - Can cause damage to buildings",
            SeismicClass::Strong => "Strong - Serious damage over large areas",
            SeismicClass::Major => "Major - Widespread heavy damage",
            SeismicClass::Great => "Great - Catastrophic destruction",
        }
    }
}
