use citystat_core::{
    default_table, CityRecord, CityStore, CityTable, CsvCityStore, StoreConfig, StoreError,
    DEFAULT_DATA_FILE_NAME,
};
use std::fs;

fn store_in(dir: &tempfile::TempDir) -> CsvCityStore {
    CsvCityStore::new(StoreConfig::in_dir(dir.path()))
}

#[test]
fn default_config_uses_relative_data_file() {
    let config = StoreConfig::default();
    assert_eq!(config.path, std::path::PathBuf::from(DEFAULT_DATA_FILE_NAME));
    assert!(config.path.is_relative());
}

#[test]
fn load_missing_file_returns_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::NotFound(ref path) if path == store.path()));
    assert!(err.is_recoverable());
}

#[test]
fn load_zero_length_file_returns_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::write(store.path(), b"").unwrap();

    assert!(matches!(store.load(), Err(StoreError::NotFound(_))));
}

#[test]
fn load_unparsable_row_returns_malformed_data() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::write(
        store.path(),
        "City,Population,Area (km²)\nRabat,577827,118\nFez,lots,320\n",
    )
    .unwrap();

    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::MalformedData { line: Some(3), .. }));
    assert!(err.is_recoverable());
}

#[test]
fn save_writes_header_and_rows_without_index_column() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.save(&default_table()).unwrap();

    let text = fs::read_to_string(store.path()).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("City,Population,Area (km²)"));
    assert_eq!(lines.next(), Some("Casablanca,3369000,220"));
    assert_eq!(lines.count(), 4);
}

#[test]
fn save_replaces_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save(&default_table()).unwrap();

    let smaller = CityTable::from_records(vec![CityRecord::new("Oujda", 494_252, 20)]);
    store.save(&smaller).unwrap();

    assert_eq!(store.load().unwrap(), smaller);
}

#[test]
fn loading_twice_from_unmodified_file_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save(&default_table()).unwrap();

    let first = store.load().unwrap();
    let second = store.load().unwrap();
    assert_eq!(first, second);
}

#[test]
fn names_with_delimiters_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let table = CityTable::from_records(vec![
        CityRecord::new("Salé, Rabat-Salé", 890_403, 118),
        CityRecord::new("\"Old\" Medina", 1, 1),
    ]);

    store.save(&table).unwrap();
    assert_eq!(store.load().unwrap(), table);
}

#[test]
fn save_into_missing_directory_returns_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvCityStore::new(StoreConfig::new(
        dir.path().join("missing").join(DEFAULT_DATA_FILE_NAME),
    ));

    let err = store.save(&default_table()).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    assert!(!err.is_recoverable());
}

#[test]
fn load_directory_path_returns_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvCityStore::new(StoreConfig::new(dir.path()));

    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
}

#[test]
fn save_rejects_names_that_would_not_round_trip_and_keeps_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save(&default_table()).unwrap();

    for name in [" ", " Fez ", "Fez\t"] {
        let table = CityTable::from_records(vec![
            CityRecord::new("Rabat", 1, 1),
            CityRecord::new(name, 2, 2),
        ]);
        let err = store.save(&table).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord { row_index: 1, .. }));
        assert!(!err.is_recoverable());
    }

    assert_eq!(store.load().unwrap(), default_table());
}

#[test]
fn names_with_inner_spacing_and_line_breaks_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let table = CityTable::from_records(vec![
        CityRecord::new("Beni  Mellal", 192_676, 39),
        CityRecord::new("Ksar\nEl Kebir", 126_617, 12),
    ]);

    store.save(&table).unwrap();
    assert_eq!(store.load().unwrap(), table);
}
