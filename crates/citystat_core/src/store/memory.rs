//! In-memory city store.
//!
//! Holds encoded CSV bytes instead of a file so callers and tests share the
//! exact wire behavior of `CsvCityStore` without touching disk.

use super::csv_codec::{decode_table, encode_table};
use super::{CityStore, StoreError, StoreResult};
use crate::model::city::CityTable;
use std::cell::{Cell, RefCell};
use std::io::ErrorKind;
use std::path::PathBuf;

const MEMORY_PATH: &str = ":memory:";

/// City store backed by an in-process byte buffer.
#[derive(Debug, Default)]
pub struct MemoryCityStore {
    content: RefCell<Option<Vec<u8>>>,
    read_only: Cell<bool>,
}

impl MemoryCityStore {
    /// Creates a store with no backing content (`load` reports `NotFound`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with raw CSV bytes.
    pub fn with_content(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: RefCell::new(Some(content.into())),
            read_only: Cell::new(false),
        }
    }

    /// Returns a copy of the current backing bytes.
    pub fn content(&self) -> Option<Vec<u8>> {
        self.content.borrow().clone()
    }

    /// When set, every `save` fails with a permission-denied `Io` error.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }
}

impl CityStore for MemoryCityStore {
    fn load(&self) -> StoreResult<CityTable> {
        match self.content.borrow().as_deref() {
            None | Some([]) => Err(StoreError::NotFound(PathBuf::from(MEMORY_PATH))),
            Some(bytes) => decode_table(bytes),
        }
    }

    fn save(&self, table: &CityTable) -> StoreResult<()> {
        if self.read_only.get() {
            return Err(StoreError::Io {
                path: PathBuf::from(MEMORY_PATH),
                source: std::io::Error::new(ErrorKind::PermissionDenied, "store is read-only"),
            });
        }

        let bytes = encode_table(table)?;
        *self.content.borrow_mut() = Some(bytes);
        Ok(())
    }
}
