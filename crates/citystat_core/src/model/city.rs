//! City statistics domain model.
//!
//! # Responsibility
//! - Define the canonical row shape shared by storage, services and views.
//! - Provide the ordered in-memory table and its read projections.
//!
//! # Invariants
//! - Column order is fixed as (name, population, area_km2).
//! - Population and area are non-negative integers (`u64`).
//! - Table order is insertion order; duplicate names are permitted.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Header label for the name column.
pub const CITY_COLUMN: &str = "City";
/// Header label for the population column.
pub const POPULATION_COLUMN: &str = "Population";
/// Header label for the area column.
pub const AREA_COLUMN: &str = "Area (km²)";

/// Fixed header row, in column order.
pub const TABLE_HEADERS: [&str; 3] = [CITY_COLUMN, POPULATION_COLUMN, AREA_COLUMN];

/// Title of the population bar chart.
pub const CHART_TITLE: &str = "Population of Major Moroccan Cities";
/// Category axis label of the population chart.
pub const CHART_X_LABEL: &str = CITY_COLUMN;
/// Value axis label of the population chart.
pub const CHART_Y_LABEL: &str = POPULATION_COLUMN;

/// Form step hint for population input.
pub const POPULATION_STEP: u64 = 1000;
/// Form step hint for area input.
pub const AREA_STEP: u64 = 1;

/// Validation error for city rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityValidationError {
    /// Name is empty or whitespace only.
    EmptyName,
    /// Name has leading or trailing whitespace, which CSV reads drop.
    UntrimmedName,
    /// Population is absent or zero.
    MissingPopulation,
    /// Area is absent or zero.
    MissingArea,
}

impl Display for CityValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "city name cannot be empty"),
            Self::UntrimmedName => {
                write!(f, "city name cannot start or end with whitespace")
            }
            Self::MissingPopulation => write!(f, "population is required and must be non-zero"),
            Self::MissingArea => write!(f, "area is required and must be non-zero"),
        }
    }
}

impl Error for CityValidationError {}

/// One row of the city dataset.
///
/// Serialized with the CSV header labels as field names so the backing file
/// and download stream share one wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRecord {
    #[serde(rename = "City")]
    pub name: String,
    #[serde(rename = "Population")]
    pub population: u64,
    #[serde(rename = "Area (km²)")]
    pub area_km2: u64,
}

impl CityRecord {
    pub fn new(name: impl Into<String>, population: u64, area_km2: u64) -> Self {
        Self {
            name: name.into(),
            population,
            area_km2,
        }
    }

    /// Checks the structural row invariant: a non-blank, trimmed name.
    ///
    /// Zero population/area is structurally valid here; the append path
    /// applies the stricter form policy.
    pub fn validate(&self) -> Result<(), CityValidationError> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            return Err(CityValidationError::EmptyName);
        }
        if trimmed.len() != self.name.len() {
            return Err(CityValidationError::UntrimmedName);
        }
        Ok(())
    }
}

/// One bar of the population chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: u64,
}

/// Ordered in-memory city dataset for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityTable {
    records: Vec<CityRecord>,
}

impl CityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table preserving the given record order.
    pub fn from_records(records: Vec<CityRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CityRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CityRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CityRecord> {
        self.records.get(index)
    }

    pub fn last(&self) -> Option<&CityRecord> {
        self.records.last()
    }

    /// Appends one record at the end and returns its row index.
    ///
    /// Crate-private: only the append service mutates a session table.
    pub(crate) fn push(&mut self, record: CityRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    /// Returns `(name, population)` pairs in table order for bar charts.
    pub fn population_series(&self) -> Vec<ChartPoint> {
        self.records
            .iter()
            .map(|record| ChartPoint {
                label: record.name.clone(),
                value: record.population,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a CityTable {
    type Item = &'a CityRecord;
    type IntoIter = std::slice::Iter<'a, CityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
