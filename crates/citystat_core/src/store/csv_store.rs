//! CSV file-backed city store.
//!
//! # Responsibility
//! - Read and overwrite the backing file named by `StoreConfig`.
//! - Map file-system outcomes onto the store error taxonomy.
//!
//! # Invariants
//! - Missing or zero-length files map to `NotFound`, never to `Io`.
//! - No locking: concurrent writers race with last-writer-wins.

use super::csv_codec::{decode_table, encode_table};
use super::{CityStore, StoreConfig, StoreError, StoreResult};
use crate::model::city::CityTable;
use log::{error, info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

/// City store persisting to one CSV file.
#[derive(Debug, Clone)]
pub struct CsvCityStore {
    config: StoreConfig,
}

impl CsvCityStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Returns the configured backing file path.
    pub fn path(&self) -> &Path {
        self.config.path.as_path()
    }

    fn read_table(&self) -> StoreResult<CityTable> {
        let path = self.path();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(path.to_path_buf()));
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if bytes.is_empty() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }

        decode_table(bytes.as_slice())
    }

    fn write_table(&self, table: &CityTable) -> StoreResult<()> {
        let bytes = encode_table(table)?;
        fs::write(self.path(), bytes).map_err(|source| StoreError::Io {
            path: self.path().to_path_buf(),
            source,
        })
    }
}

impl CityStore for CsvCityStore {
    /// Loads the full table from the backing file.
    ///
    /// # Side effects
    /// - Emits `store_load` logging events with duration and status.
    fn load(&self) -> StoreResult<CityTable> {
        let started_at = Instant::now();
        info!("event=store_load module=store status=start mode=csv");

        match self.read_table() {
            Ok(table) => {
                info!(
                    "event=store_load module=store status=ok mode=csv duration_ms={} rows={}",
                    started_at.elapsed().as_millis(),
                    table.len()
                );
                Ok(table)
            }
            Err(err) if err.is_recoverable() => {
                warn!(
                    "event=store_load module=store status=miss mode=csv duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error mode=csv duration_ms={} error_code=store_read_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Overwrites the backing file with `table`.
    ///
    /// # Side effects
    /// - Replaces previous file content entirely.
    /// - Emits `store_save` logging events with duration and status.
    fn save(&self, table: &CityTable) -> StoreResult<()> {
        let started_at = Instant::now();
        info!("event=store_save module=store status=start mode=csv");

        match self.write_table(table) {
            Ok(()) => {
                info!(
                    "event=store_save module=store status=ok mode=csv duration_ms={} rows={}",
                    started_at.elapsed().as_millis(),
                    table.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=store status=error mode=csv duration_ms={} error_code=store_write_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
