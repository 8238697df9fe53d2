//! CSV import of raw candidate sites and export of ranked results.
//!
//! The export is a flat delimited table: identity columns, the raw
//! criterion columns (missing values as empty fields), one
//! `normalized_<criterion>` column per criterion, then `total_score`,
//! `rank`, and `recommended`, ordered by rank ascending. An exported file
//! re-imports losslessly without re-running evaluation.

use std::collections::BTreeMap;
use std::fs::File;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CandidateSite, Criterion, EvaluatedSite, RankedBatch};

/// Errors raised while reading or writing CSV files.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Opening the input file failed.
    #[error("failed to open {path}")]
    Open {
        /// Requested input path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: io::Error,
    },
    /// Creating the output file failed.
    #[error("failed to create {path}")]
    Create {
        /// Requested output path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: io::Error,
    },
    /// Reading or deserialising a row failed.
    #[error("failed to read CSV row")]
    Read {
        /// Source error from the `csv` crate.
        #[source]
        source: csv::Error,
    },
    /// Serialising or writing a row failed.
    #[error("failed to write CSV row")]
    Write {
        /// Source error from the `csv` crate.
        #[source]
        source: csv::Error,
    },
}

/// One row of a raw candidate-site file.
///
/// Only `name`, `latitude`, and `longitude` are required; `id` falls back
/// to the row number and absent criterion columns stay absent.
#[derive(Debug, Deserialize)]
struct RawSiteRecord {
    id: Option<u64>,
    name: String,
    #[serde(alias = "lat")]
    latitude: f64,
    #[serde(alias = "lon", alias = "lng")]
    longitude: f64,
    population_density: Option<f64>,
    accessibility: Option<f64>,
    risk_level: Option<f64>,
    facility_capacity: Option<f64>,
    service_coverage: Option<f64>,
}

impl RawSiteRecord {
    fn into_site(self, fallback_id: u64) -> CandidateSite {
        let mut site = CandidateSite::new(
            self.id.unwrap_or(fallback_id),
            self.name,
            self.latitude,
            self.longitude,
        );
        site.set_value(Criterion::PopulationDensity, self.population_density);
        site.set_value(Criterion::Accessibility, self.accessibility);
        site.set_value(Criterion::RiskLevel, self.risk_level);
        site.set_value(Criterion::FacilityCapacity, self.facility_capacity);
        site.set_value(Criterion::ServiceCoverage, self.service_coverage);
        site
    }
}

/// One row of a ranked-result file.
#[derive(Debug, Serialize, Deserialize)]
struct RankedSiteRecord {
    id: u64,
    name: String,
    latitude: f64,
    longitude: f64,
    population_density: Option<f64>,
    accessibility: Option<f64>,
    risk_level: Option<f64>,
    facility_capacity: Option<f64>,
    service_coverage: Option<f64>,
    normalized_population_density: Option<f64>,
    normalized_accessibility: Option<f64>,
    normalized_risk_level: Option<f64>,
    normalized_facility_capacity: Option<f64>,
    normalized_service_coverage: Option<f64>,
    total_score: f64,
    rank: usize,
    recommended: bool,
}

impl From<&EvaluatedSite> for RankedSiteRecord {
    fn from(evaluated: &EvaluatedSite) -> Self {
        let site = &evaluated.site;
        Self {
            id: site.id,
            name: site.name.clone(),
            latitude: site.latitude(),
            longitude: site.longitude(),
            population_density: site.population_density,
            accessibility: site.accessibility,
            risk_level: site.risk_level,
            facility_capacity: site.facility_capacity,
            service_coverage: site.service_coverage,
            normalized_population_density: evaluated
                .normalised_score(Criterion::PopulationDensity),
            normalized_accessibility: evaluated.normalised_score(Criterion::Accessibility),
            normalized_risk_level: evaluated.normalised_score(Criterion::RiskLevel),
            normalized_facility_capacity: evaluated
                .normalised_score(Criterion::FacilityCapacity),
            normalized_service_coverage: evaluated
                .normalised_score(Criterion::ServiceCoverage),
            total_score: evaluated.total_score,
            rank: evaluated.rank,
            recommended: evaluated.recommended,
        }
    }
}

impl RankedSiteRecord {
    fn into_evaluated(self) -> EvaluatedSite {
        let mut site = CandidateSite::new(self.id, self.name, self.latitude, self.longitude);
        site.set_value(Criterion::PopulationDensity, self.population_density);
        site.set_value(Criterion::Accessibility, self.accessibility);
        site.set_value(Criterion::RiskLevel, self.risk_level);
        site.set_value(Criterion::FacilityCapacity, self.facility_capacity);
        site.set_value(Criterion::ServiceCoverage, self.service_coverage);

        let mut normalised = BTreeMap::new();
        let columns = [
            (Criterion::PopulationDensity, self.normalized_population_density),
            (Criterion::Accessibility, self.normalized_accessibility),
            (Criterion::RiskLevel, self.normalized_risk_level),
            (Criterion::FacilityCapacity, self.normalized_facility_capacity),
            (Criterion::ServiceCoverage, self.normalized_service_coverage),
        ];
        for (criterion, value) in columns {
            if let Some(score) = value {
                normalised.insert(criterion, score);
            }
        }

        EvaluatedSite {
            site,
            normalised,
            total_score: self.total_score,
            rank: self.rank,
            recommended: self.recommended,
        }
    }
}

/// Read raw candidate sites from CSV.
///
/// Rows missing an `id` column receive their 1-based row number.
///
/// # Errors
/// Returns [`CsvError::Read`] when a row cannot be parsed or a required
/// column (`name`, `latitude`, `longitude`) is absent.
pub fn read_sites<R: io::Read>(reader: R) -> Result<Vec<CandidateSite>, CsvError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut sites = Vec::new();
    let mut row_number: u64 = 0;
    for row in csv_reader.deserialize::<RawSiteRecord>() {
        row_number += 1;
        let record = row.map_err(|source| CsvError::Read { source })?;
        sites.push(record.into_site(row_number));
    }
    Ok(sites)
}

/// Read raw candidate sites from a CSV file on disk.
///
/// # Errors
/// Returns [`CsvError::Open`] when the file cannot be opened and
/// propagates row errors from [`read_sites`].
pub fn read_sites_path(path: &Utf8Path) -> Result<Vec<CandidateSite>, CsvError> {
    let file = File::open(path.as_std_path()).map_err(|source| CsvError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_sites(file)
}

/// Write a ranked batch as CSV, best rank first.
///
/// # Errors
/// Returns [`CsvError::Write`] when a row cannot be serialised or written.
pub fn write_ranked<W: io::Write>(batch: &RankedBatch, writer: W) -> Result<(), CsvError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for evaluated in batch {
        let record = RankedSiteRecord::from(evaluated);
        csv_writer
            .serialize(record)
            .map_err(|source| CsvError::Write { source })?;
    }
    csv_writer
        .flush()
        .map_err(|source| CsvError::Write {
            source: csv::Error::from(source),
        })
}

/// Write a ranked batch to a CSV file on disk.
///
/// # Errors
/// Returns [`CsvError::Create`] when the file cannot be created and
/// propagates row errors from [`write_ranked`].
pub fn write_ranked_path(batch: &RankedBatch, path: &Utf8Path) -> Result<(), CsvError> {
    let file = File::create(path.as_std_path()).map_err(|source| CsvError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_ranked(batch, file)
}

/// Read a previously exported ranked batch back from CSV.
///
/// The derived columns are taken verbatim; nothing is re-evaluated.
///
/// # Errors
/// Returns [`CsvError::Read`] when a row cannot be parsed.
pub fn read_ranked<R: io::Read>(reader: R) -> Result<RankedBatch, CsvError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut sites = Vec::new();
    for row in csv_reader.deserialize::<RankedSiteRecord>() {
        let record = row.map_err(|source| CsvError::Read { source })?;
        sites.push(record.into_evaluated());
    }
    Ok(RankedBatch::new(sites))
}

/// Read a previously exported ranked batch from a CSV file on disk.
///
/// # Errors
/// Returns [`CsvError::Open`] when the file cannot be opened and
/// propagates row errors from [`read_ranked`].
pub fn read_ranked_path(path: &Utf8Path) -> Result<RankedBatch, CsvError> {
    let file = File::open(path.as_std_path()).map_err(|source| CsvError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_ranked(file)
}
