//! Ocean-basin lookup and tsunami risk categories.
//!
//! Basins are coarse latitude/longitude rectangles. They are good enough to
//! tell open ocean from continental interiors, not to resolve coastlines.

use serde::Serialize;

/// Magnitude at or above which an ocean impact is rated `High`.
pub const HIGH_RISK_MAGNITUDE: f64 = 7.5;
/// Magnitude at or above which an ocean impact is rated `Moderate`.
pub const MODERATE_RISK_MAGNITUDE: f64 = 6.0;

/// Three-level tsunami risk category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TsunamiRisk {
    Low,
    Moderate,
    High,
}

impl TsunamiRisk {
    pub fn as_str(self) -> &'static str {
        match self {
            TsunamiRisk::Low => "low",
            TsunamiRisk::Moderate => "moderate",
            TsunamiRisk::High => "high",
        }
    }
}

/// Axis-aligned ocean rectangle in degrees, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OceanBasin {
    pub name: &'static str,
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl OceanBasin {
    const fn new(name: &'static str, lat: (f64, f64), lon: (f64, f64)) -> Self {
        Self {
            name,
            lat_min: lat.0,
            lat_max: lat.1,
            lon_min: lon.0,
            lon_max: lon.1,
        }
    }

    /// Whether the (already normalised) coordinate lies inside the rectangle.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&latitude)
            && (self.lon_min..=self.lon_max).contains(&longitude)
    }
}

/// Recognised ocean basins. The Pacific is split at the antimeridian.
pub const OCEAN_BASINS: &[OceanBasin] = &[
    OceanBasin::new("North Pacific (west)", (0.0, 55.0), (145.0, 180.0)),
    OceanBasin::new("North Pacific (east)", (0.0, 55.0), (-180.0, -125.0)),
    OceanBasin::new("South Pacific", (-60.0, 0.0), (-180.0, -80.0)),
    OceanBasin::new("North Atlantic", (10.0, 60.0), (-60.0, -15.0)),
    OceanBasin::new("South Atlantic", (-60.0, 5.0), (-35.0, 8.0)),
    OceanBasin::new("Indian Ocean", (-60.0, 5.0), (50.0, 100.0)),
    OceanBasin::new("Southern Ocean", (-70.0, -60.0), (-180.0, 180.0)),
    OceanBasin::new("Arctic Ocean", (75.0, 90.0), (-180.0, 180.0)),
];

/// Wrap a longitude into `[-180, 180)`.
pub fn normalize_longitude(longitude: f64) -> f64 {
    (longitude + 180.0).rem_euclid(360.0) - 180.0
}

/// First basin containing the coordinate, if any.
pub fn ocean_basin_at(latitude: f64, longitude: f64) -> Option<&'static OceanBasin> {
    let longitude = normalize_longitude(longitude);
    OCEAN_BASINS
        .iter()
        .find(|basin| basin.contains(latitude, longitude))
}

/// Rate tsunami risk for an impact at the coordinate with the given seismic magnitude.
///
/// Land impacts are always `Low`; ocean impacts are graded by magnitude.
pub fn assess(
    latitude: f64,
    longitude: f64,
    magnitude: f64,
) -> (TsunamiRisk, Option<&'static OceanBasin>) {
    let Some(basin) = ocean_basin_at(latitude, longitude) else {
        return (TsunamiRisk::Low, None);
    };
    let risk = if magnitude >= HIGH_RISK_MAGNITUDE {
        TsunamiRisk::High
    } else if magnitude >= MODERATE_RISK_MAGNITUDE {
        TsunamiRisk::Moderate
    } else {
        TsunamiRisk::Low
    };
    (risk, Some(basin))
}
