//! Built-in default city table.
//!
//! # Responsibility
//! - Supply the five-city table used when no readable backing data exists.
//! - Make the default durable on first use.
//!
//! # Invariants
//! - Row order and values are fixed.

use crate::model::city::{CityRecord, CityTable};
use crate::store::{CityStore, StoreError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_CITIES: [(&str, u64, u64); 5] = [
    ("Casablanca", 3_369_000, 220),
    ("Rabat", 577_827, 118),
    ("Marrakech", 928_850, 230),
    ("Fez", 1_112_072, 320),
    ("Tangier", 947_952, 144),
];

/// Default table that was built but could not be persisted.
///
/// Carries the table so callers can still serve it for the session.
#[derive(Debug)]
pub struct SeedError {
    table: CityTable,
    source: StoreError,
}

impl SeedError {
    /// Returns the unsaved default table.
    pub fn table(&self) -> &CityTable {
        &self.table
    }

    /// Returns the save failure.
    pub fn store_error(&self) -> &StoreError {
        &self.source
    }

    /// Splits into the unsaved table and the save failure.
    pub fn into_parts(self) -> (CityTable, StoreError) {
        (self.table, self.source)
    }
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "default city table not saved: {}", self.source)
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Returns the fixed five-city default table.
pub fn default_table() -> CityTable {
    CityTable::from_records(
        DEFAULT_CITIES
            .iter()
            .map(|(name, population, area_km2)| CityRecord::new(*name, *population, *area_km2))
            .collect(),
    )
}

/// Builds the default table and immediately persists it through `store`.
///
/// # Side effects
/// - Overwrites any existing backing content.
///
/// # Errors
/// - `SeedError` when the save fails; it still holds the default table.
pub fn initialize_default<S: CityStore>(store: &S) -> Result<CityTable, SeedError> {
    let table = default_table();
    if let Err(source) = store.save(&table) {
        error!(
            "event=seed_default module=seed status=error error_code=save_failed error={}",
            source
        );
        return Err(SeedError { table, source });
    }
    info!(
        "event=seed_default module=seed status=ok rows={}",
        table.len()
    );
    Ok(table)
}
