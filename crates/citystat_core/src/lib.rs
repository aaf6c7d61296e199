//! Core domain logic for the city statistics dashboard.
//! This crate is the single source of truth for city table invariants.

pub mod logging;
pub mod model;
pub mod seed;
pub mod service;
pub mod session;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::city::{
    ChartPoint, CityRecord, CityTable, CityValidationError, AREA_STEP, CHART_TITLE,
    CHART_X_LABEL, CHART_Y_LABEL, POPULATION_STEP, TABLE_HEADERS,
};
pub use seed::{default_table, initialize_default, SeedError};
pub use service::city_service::{AppendError, AppendReceipt, CityService, LoadError, NewCity};
pub use session::{Notice, NoticeLevel, Session, DOWNLOAD_FILE_NAME, DOWNLOAD_MIME};
pub use store::{
    CityStore, CsvCityStore, MemoryCityStore, StoreConfig, StoreError, StoreResult,
    DEFAULT_DATA_FILE_NAME,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
