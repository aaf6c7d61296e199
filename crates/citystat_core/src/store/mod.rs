//! Storage adapter contracts and flat-file implementations.
//!
//! # Responsibility
//! - Define the load/save contract for the city table.
//! - Keep CSV encoding details inside the persistence boundary.
//!
//! # Invariants
//! - `load` reports recoverable absence (`NotFound`) and unreadable content
//!   (`MalformedData`) separately from real I/O faults (`Io`).
//! - `save` replaces the whole backing content; it never merges.

use crate::model::city::{CityTable, CityValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub mod csv_codec;
mod csv_store;
mod memory;

pub use csv_store::CsvCityStore;
pub use memory::MemoryCityStore;

/// Relative filename used when no explicit path is configured.
pub const DEFAULT_DATA_FILE_NAME: &str = "city_data.csv";

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage error for city table persistence.
#[derive(Debug)]
pub enum StoreError {
    /// Backing file is absent or has zero length.
    NotFound(PathBuf),
    /// Backing content cannot be parsed into city rows.
    MalformedData { line: Option<u64>, message: String },
    /// Read or write failure on the backing file.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A row breaks the record invariant and would not load back.
    InvalidRecord {
        row_index: usize,
        source: CityValidationError,
    },
    /// Table could not be serialized.
    Encode(String),
}

impl StoreError {
    /// Returns whether the orchestrator may recover by seeding defaults.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::MalformedData { .. })
    }

    pub(crate) fn malformed(line: Option<u64>, message: impl Into<String>) -> Self {
        Self::MalformedData {
            line,
            message: message.into(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "city data not found at `{}`", path.display()),
            Self::MalformedData {
                line: Some(line),
                message,
            } => write!(f, "malformed city data at line {line}: {message}"),
            Self::MalformedData {
                line: None,
                message,
            } => write!(f, "malformed city data: {message}"),
            Self::Io { path, source } => {
                write!(f, "i/o error on `{}`: {source}", path.display())
            }
            Self::InvalidRecord { row_index, source } => {
                write!(f, "invalid city row {row_index}: {source}")
            }
            Self::Encode(message) => write!(f, "failed to encode city data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidRecord { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Location of the backing file, resolved once by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses the default filename inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_DATA_FILE_NAME))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE_NAME)
    }
}

/// Storage interface for the city table.
pub trait CityStore {
    fn load(&self) -> StoreResult<CityTable>;
    fn save(&self, table: &CityTable) -> StoreResult<()>;
}

impl<S: CityStore + ?Sized> CityStore for &S {
    fn load(&self) -> StoreResult<CityTable> {
        (**self).load()
    }

    fn save(&self, table: &CityTable) -> StoreResult<()> {
        (**self).save(table)
    }
}
