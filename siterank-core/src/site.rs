//! Candidate evacuation sites and their raw criterion values.
//!
//! Coordinates are WGS84 with `x = longitude` and `y = latitude`. Each
//! criterion value is an explicit `Option<f64>`: absent columns in the
//! source dataset stay absent here, and the normaliser decides how to
//! impute them.

use geo::Coord;

use crate::Criterion;

/// A facility under consideration as an evacuation centre.
///
/// # Examples
/// ```
/// use siterank_core::{CandidateSite, Criterion};
///
/// let site = CandidateSite::new(1, "Central School", 14.5995, 120.9842)
///     .with_value(Criterion::FacilityCapacity, 850.0);
///
/// assert_eq!(site.raw(Criterion::FacilityCapacity), Some(850.0));
/// assert_eq!(site.raw(Criterion::RiskLevel), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSite {
    /// Identifier, stable and unique within a dataset.
    pub id: u64,
    /// Human-readable facility name.
    pub name: String,
    /// Geospatial position (`x` = longitude, `y` = latitude).
    pub location: Coord<f64>,
    /// Population density served by the site.
    pub population_density: Option<f64>,
    /// Ease of reaching the site by road.
    pub accessibility: Option<f64>,
    /// Exposure of the site to hazards.
    pub risk_level: Option<f64>,
    /// Shelter capacity of the facility.
    pub facility_capacity: Option<f64>,
    /// Share of demand already covered by the site's service area.
    pub service_coverage: Option<f64>,
}

impl CandidateSite {
    /// Construct a site with no criterion values.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            name: name.into(),
            location: Coord {
                x: longitude,
                y: latitude,
            },
            population_density: None,
            accessibility: None,
            risk_level: None,
            facility_capacity: None,
            service_coverage: None,
        }
    }

    /// Set a raw criterion value while returning `self` for chaining.
    #[must_use]
    pub fn with_value(mut self, criterion: Criterion, value: f64) -> Self {
        self.set_value(criterion, Some(value));
        self
    }

    /// Insert or clear a raw criterion value.
    ///
    /// Non-finite values are stored as absent: a `NaN` in a source dataset
    /// marks a missing measurement, not a measurement of `NaN`.
    pub const fn set_value(&mut self, criterion: Criterion, value: Option<f64>) {
        let value = match value {
            Some(raw) if raw.is_finite() => Some(raw),
            _ => None,
        };
        match criterion {
            Criterion::PopulationDensity => self.population_density = value,
            Criterion::Accessibility => self.accessibility = value,
            Criterion::RiskLevel => self.risk_level = value,
            Criterion::FacilityCapacity => self.facility_capacity = value,
            Criterion::ServiceCoverage => self.service_coverage = value,
        }
    }

    /// Return the raw value for a criterion, if present.
    #[must_use]
    pub const fn raw(&self, criterion: Criterion) -> Option<f64> {
        match criterion {
            Criterion::PopulationDensity => self.population_density,
            Criterion::Accessibility => self.accessibility,
            Criterion::RiskLevel => self.risk_level,
            Criterion::FacilityCapacity => self.facility_capacity,
            Criterion::ServiceCoverage => self.service_coverage,
        }
    }

    /// Report whether the site carries a value for any recognised criterion.
    #[must_use]
    pub fn has_any_criterion(&self) -> bool {
        Criterion::ALL
            .into_iter()
            .any(|criterion| self.raw(criterion).is_some())
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }
}
