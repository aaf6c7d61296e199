//! City table use-case service.
//!
//! # Responsibility
//! - Resolve the session table (stored data, or the persisted default).
//! - Validate and append new rows, persisting after every mutation.
//! - Produce the CSV download stream.
//!
//! # Invariants
//! - A rejected append leaves the table untouched and writes nothing.
//! - A successful append always calls `save` exactly once.
//! - Zero population or area is treated as missing input.

use crate::model::city::{CityRecord, CityTable, CityValidationError};
use crate::seed::{initialize_default, SeedError};
use crate::store::csv_codec::encode_table;
use crate::store::{CityStore, StoreError, StoreResult};
use log::{error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Service error for the append use-case.
#[derive(Debug)]
pub enum AppendError {
    /// Form input failed validation; nothing was changed.
    Validation(CityValidationError),
    /// Row was appended in memory but persistence failed.
    Store(StoreError),
}

impl Display for AppendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppendError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<CityValidationError> for AppendError {
    fn from(value: CityValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for AppendError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Service error for resolving the session table.
#[derive(Debug)]
pub enum LoadError {
    /// Stored data could not be read for a non-recoverable reason.
    Store(StoreError),
    /// Default table was built but not persisted; the table is still usable.
    Seed(SeedError),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Seed(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Seed(err) => Some(err),
        }
    }
}

impl From<StoreError> for LoadError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<SeedError> for LoadError {
    fn from(value: SeedError) -> Self {
        Self::Seed(value)
    }
}

/// Raw form submission for a new city.
///
/// Numeric fields are `None` when the form left them empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCity {
    pub name: String,
    pub population: Option<u64>,
    pub area_km2: Option<u64>,
}

impl NewCity {
    pub fn new(name: impl Into<String>, population: u64, area_km2: u64) -> Self {
        Self {
            name: name.into(),
            population: Some(population),
            area_km2: Some(area_km2),
        }
    }

    /// Applies the form policy and builds the record to append.
    ///
    /// # Errors
    /// - `EmptyName` for empty or blank names.
    /// - `MissingPopulation` / `MissingArea` for absent or zero values.
    pub fn into_record(self) -> Result<CityRecord, CityValidationError> {
        let name = normalize_city_name(&self.name);
        if name.is_empty() {
            return Err(CityValidationError::EmptyName);
        }
        let population = self
            .population
            .filter(|value| *value != 0)
            .ok_or(CityValidationError::MissingPopulation)?;
        let area_km2 = self
            .area_km2
            .filter(|value| *value != 0)
            .ok_or(CityValidationError::MissingArea)?;

        Ok(CityRecord::new(name, population, area_km2))
    }
}

/// Result of a committed append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendReceipt {
    /// Normalized name of the appended city.
    pub name: String,
    /// Zero-based row position of the appended city.
    pub row_index: usize,
}

/// City service facade over a store implementation.
pub struct CityService<S: CityStore> {
    store: S,
}

impl<S: CityStore> CityService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the session table, seeding the persisted default on a miss.
    ///
    /// # Contract
    /// - `NotFound` and `MalformedData` fall back to the default table,
    ///   which is saved before being returned.
    /// - A failed default save yields `LoadError::Seed`, still carrying the
    ///   default table.
    /// - Any other store error is returned as `LoadError::Store`.
    pub fn get_table(&self) -> Result<CityTable, LoadError> {
        match self.store.load() {
            Ok(table) => Ok(table),
            Err(err) if err.is_recoverable() => {
                warn!(
                    "event=table_fallback module=service status=fallback reason={}",
                    fallback_reason(&err)
                );
                Ok(initialize_default(&self.store)?)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Validates `input`, appends it to `table` and persists the result.
    ///
    /// # Contract
    /// - Validation failure: `table` unchanged, no `save`.
    /// - Save failure: the row stays in `table`; durability is not
    ///   guaranteed and `AppendError::Store` is returned.
    pub fn append(
        &self,
        table: &mut CityTable,
        input: NewCity,
    ) -> Result<AppendReceipt, AppendError> {
        let record = match input.into_record() {
            Ok(record) => record,
            Err(err) => {
                info!(
                    "event=city_append module=service status=rejected reason={:?}",
                    err
                );
                return Err(err.into());
            }
        };

        let name = record.name.clone();
        let row_index = table.push(record);

        if let Err(err) = self.store.save(table) {
            error!(
                "event=city_append module=service status=error row_index={} error_code=save_failed error={}",
                row_index, err
            );
            return Err(err.into());
        }

        info!(
            "event=city_append module=service status=ok row_index={} rows={}",
            row_index,
            table.len()
        );
        Ok(AppendReceipt { name, row_index })
    }

    /// Encodes `table` as the CSV download stream.
    pub fn export_csv(&self, table: &CityTable) -> StoreResult<Vec<u8>> {
        encode_table(table)
    }
}

/// Trims a city name and collapses internal whitespace runs.
pub fn normalize_city_name(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw.trim(), " ").into_owned()
}

fn fallback_reason(err: &StoreError) -> &'static str {
    match err {
        StoreError::NotFound(_) => "not_found",
        StoreError::MalformedData { .. } => "malformed_data",
        _ => "other",
    }
}
