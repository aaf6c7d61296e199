use citystat_core::{
    ChartPoint, CityRecord, CityTable, CityValidationError, CHART_TITLE, CHART_X_LABEL,
    CHART_Y_LABEL, TABLE_HEADERS,
};

#[test]
fn table_preserves_insertion_order_and_duplicates() {
    let table = CityTable::from_records(vec![
        CityRecord::new("Fez", 1_112_072, 320),
        CityRecord::new("Rabat", 577_827, 118),
        CityRecord::new("Fez", 1, 1),
    ]);

    assert_eq!(table.len(), 3);
    assert_eq!(table.get(0).unwrap().name, "Fez");
    assert_eq!(table.get(2).unwrap().population, 1);
    assert_eq!(table.last().unwrap(), &CityRecord::new("Fez", 1, 1));
}

#[test]
fn population_series_pairs_names_with_population() {
    let table = CityTable::from_records(vec![
        CityRecord::new("Casablanca", 3_369_000, 220),
        CityRecord::new("Rabat", 577_827, 118),
    ]);

    assert_eq!(
        table.population_series(),
        vec![
            ChartPoint {
                label: "Casablanca".to_string(),
                value: 3_369_000,
            },
            ChartPoint {
                label: "Rabat".to_string(),
                value: 577_827,
            },
        ]
    );
    assert!(CityTable::new().population_series().is_empty());
}

#[test]
fn record_validate_rejects_blank_name_only() {
    assert_eq!(
        CityRecord::new("  ", 10, 10).validate(),
        Err(CityValidationError::EmptyName)
    );
    assert!(CityRecord::new("Ifrane", 0, 0).validate().is_ok());
}

#[test]
fn record_serialization_uses_column_header_names() {
    let record = CityRecord::new("Tangier", 947_952, 144);

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json[TABLE_HEADERS[0]], "Tangier");
    assert_eq!(json[TABLE_HEADERS[1]], 947_952);
    assert_eq!(json[TABLE_HEADERS[2]], 144);

    let decoded: CityRecord = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn chart_labels_follow_column_headers() {
    assert_eq!(CHART_TITLE, "Population of Major Moroccan Cities");
    assert_eq!(CHART_X_LABEL, TABLE_HEADERS[0]);
    assert_eq!(CHART_Y_LABEL, TABLE_HEADERS[1]);
}

#[test]
fn record_validate_rejects_surrounding_whitespace() {
    assert_eq!(
        CityRecord::new(" Fez ", 1, 1).validate(),
        Err(CityValidationError::UntrimmedName)
    );
    assert!(CityRecord::new("Beni Mellal", 1, 1).validate().is_ok());
}
