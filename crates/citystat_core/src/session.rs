//! Per-user session entry point.
//!
//! # Responsibility
//! - Load the table once per session and own it for the session lifetime.
//! - Convert every service error into a user-visible notice.
//!
//! # Invariants
//! - No error escapes as a panic or aborts the process.
//! - The table is only mutated through `CityService::append`.
//! - A session whose stored table could not be read never writes.

use crate::model::city::{ChartPoint, CityTable};
use crate::service::city_service::{AppendError, CityService, LoadError, NewCity};
use crate::store::CityStore;
use log::{error, warn};

/// Suggested file name for the CSV download.
pub const DOWNLOAD_FILE_NAME: &str = "city_data.csv";
/// MIME type of the CSV download.
pub const DOWNLOAD_MIME: &str = "text/csv";

const VALIDATION_MESSAGE: &str = "Please fill out all fields to add a new city.";
const DEGRADED_MESSAGE: &str =
    "City data could not be loaded; adding cities is disabled for this session.";

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Message rendered to the user after an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// One user's interaction lifetime with the city table.
pub struct Session<S: CityStore> {
    service: CityService<S>,
    table: CityTable,
    degraded: bool,
}

impl<S: CityStore> Session<S> {
    /// Starts a session by resolving the table through the service.
    ///
    /// # Contract
    /// - Unsaved default table: the session serves it and reports the save
    ///   failure as an error notice.
    /// - Unreadable stored table: the session starts degraded with an empty
    ///   table and an error notice; `submit` then refuses to write.
    pub fn start(service: CityService<S>) -> (Self, Option<Notice>) {
        match service.get_table() {
            Ok(table) => (Self::with_table(service, table, false), None),
            Err(LoadError::Seed(err)) => {
                warn!(
                    "event=session_start module=session status=error error_code=seed_save_failed error={}",
                    err
                );
                let (table, source) = err.into_parts();
                let notice = Notice::error(format!("Failed to save city data: {source}"));
                (Self::with_table(service, table, false), Some(notice))
            }
            Err(LoadError::Store(err)) => {
                error!(
                    "event=session_start module=session status=error error_code=load_failed error={}",
                    err
                );
                let notice = Notice::error(format!("An error occurred: {err}"));
                (Self::with_table(service, CityTable::new(), true), Some(notice))
            }
        }
    }

    fn with_table(service: CityService<S>, table: CityTable, degraded: bool) -> Self {
        Self {
            service,
            table,
            degraded,
        }
    }

    /// Returns whether the stored table failed to load for this session.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn table(&self) -> &CityTable {
        &self.table
    }

    pub fn service(&self) -> &CityService<S> {
        &self.service
    }

    /// Handles one form submission.
    pub fn submit(&mut self, input: NewCity) -> Notice {
        if self.degraded {
            warn!("event=city_append module=session status=rejected reason=degraded_session");
            return Notice::error(DEGRADED_MESSAGE);
        }
        match self.service.append(&mut self.table, input) {
            Ok(receipt) => Notice::success(format!("Added {} to the database.", receipt.name)),
            Err(AppendError::Validation(_)) => Notice::error(VALIDATION_MESSAGE),
            Err(AppendError::Store(err)) => {
                Notice::error(format!("Failed to save city data: {err}"))
            }
        }
    }

    /// Returns the chart series for the current table.
    pub fn chart(&self) -> Vec<ChartPoint> {
        self.table.population_series()
    }

    /// Returns the CSV download bytes, or an error notice.
    pub fn download(&self) -> Result<Vec<u8>, Notice> {
        self.service.export_csv(&self.table).map_err(|err| {
            Notice::error(format!("Error generating download: {err}"))
        })
    }

    /// Ends the session, returning the final in-memory table.
    pub fn into_table(self) -> CityTable {
        self.table
    }
}
