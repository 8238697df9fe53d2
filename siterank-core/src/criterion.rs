//! Evaluation criteria for candidate evacuation sites.
//!
//! The enum offers compile-time safety for criterion lookups and carries
//! the direction policy used during normalisation.
//!
//! # Examples
//! ```
//! use siterank_core::{Criterion, Direction};
//!
//! assert_eq!(Criterion::RiskLevel.as_str(), "risk_level");
//! assert_eq!(Criterion::RiskLevel.direction(), Direction::LowerIsBetter);
//! assert_eq!(Criterion::Accessibility.to_string(), "accessibility");
//! ```

/// Whether a larger raw value makes a site more or less desirable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Larger raw values score higher.
    HigherIsBetter,
    /// Larger raw values score lower.
    LowerIsBetter,
}

/// A recognised evaluation criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Criterion {
    /// Population density served by the site.
    PopulationDensity,
    /// Ease of reaching the site by road.
    Accessibility,
    /// Exposure of the site to hazards.
    RiskLevel,
    /// Shelter capacity of the facility.
    FacilityCapacity,
    /// Share of demand already covered by the site's service area.
    ServiceCoverage,
}

impl Criterion {
    /// Every recognised criterion, in canonical order.
    pub const ALL: [Self; 5] = [
        Self::PopulationDensity,
        Self::Accessibility,
        Self::RiskLevel,
        Self::FacilityCapacity,
        Self::ServiceCoverage,
    ];

    /// Return the criterion as its snake_case column name.
    ///
    /// # Examples
    /// ```
    /// use siterank_core::Criterion;
    ///
    /// assert_eq!(Criterion::FacilityCapacity.as_str(), "facility_capacity");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PopulationDensity => "population_density",
            Self::Accessibility => "accessibility",
            Self::RiskLevel => "risk_level",
            Self::FacilityCapacity => "facility_capacity",
            Self::ServiceCoverage => "service_coverage",
        }
    }

    /// Return the direction policy applied when normalising this criterion.
    ///
    /// Risk is the only criterion where a smaller raw value is preferable.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::RiskLevel => Direction::LowerIsBetter,
            _ => Direction::HigherIsBetter,
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Criterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "population_density" => Ok(Self::PopulationDensity),
            "accessibility" => Ok(Self::Accessibility),
            "risk_level" => Ok(Self::RiskLevel),
            "facility_capacity" => Ok(Self::FacilityCapacity),
            "service_coverage" => Ok(Self::ServiceCoverage),
            _ => Err(format!("unknown criterion '{s}'")),
        }
    }
}
