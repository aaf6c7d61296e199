//! CSV wire codec for the city table.
//!
//! # Responsibility
//! - Encode a table as `City,Population,Area (km²)` header plus rows.
//! - Decode backing-file bytes into validated city rows.
//!
//! # Invariants
//! - Integers are written unquoted; text is quoted only when necessary.
//! - No index column is ever written.
//! - Encoding refuses rows that decoding would reject or alter.
//! - Decoding rejects any header other than the fixed column header.

use crate::model::city::{CityRecord, CityTable, TABLE_HEADERS};
use crate::store::{StoreError, StoreResult};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};
use std::io::Read;

/// Serializes `table` into CSV bytes (header row first).
///
/// Used for both the backing file and the download stream.
///
/// # Errors
/// - `InvalidRecord` when a row fails `CityRecord::validate`; such rows
///   would make the written file unreadable.
pub fn encode_table(table: &CityTable) -> StoreResult<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .quote(b'"')
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(TABLE_HEADERS).map_err(encode_error)?;
    for (row_index, record) in table.iter().enumerate() {
        record
            .validate()
            .map_err(|source| StoreError::InvalidRecord { row_index, source })?;
        writer.serialize(record).map_err(encode_error)?;
    }

    writer
        .into_inner()
        .map_err(|err| StoreError::Encode(err.to_string()))
}

/// Parses CSV content into a table, preserving row order.
///
/// # Errors
/// - `MalformedData` when the header differs from the fixed header.
/// - `MalformedData` when a row has the wrong field count, a non-integer or
///   negative number, or a blank name.
pub fn decode_table<R: Read>(input: R) -> StoreResult<CityTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .quote(b'"')
        .trim(Trim::All)
        .from_reader(input);

    let headers = reader.headers().map_err(decode_error)?.clone();
    if !headers.iter().eq(TABLE_HEADERS.iter().copied()) {
        return Err(StoreError::malformed(
            Some(1),
            format!(
                "unexpected header `{}`; expected `{}`",
                headers.iter().collect::<Vec<_>>().join(","),
                TABLE_HEADERS.join(",")
            ),
        ));
    }

    let mut raw = StringRecord::new();
    let mut records = Vec::new();
    while reader.read_record(&mut raw).map_err(decode_error)? {
        let line = raw.position().map(|position| position.line());
        let record: CityRecord = raw
            .deserialize(Some(&headers))
            .map_err(|err| StoreError::malformed(line, err.to_string()))?;
        record
            .validate()
            .map_err(|err| StoreError::malformed(line, err.to_string()))?;
        records.push(record);
    }

    Ok(CityTable::from_records(records))
}

fn encode_error(err: csv::Error) -> StoreError {
    StoreError::Encode(err.to_string())
}

fn decode_error(err: csv::Error) -> StoreError {
    let line = err.position().map(|position| position.line());
    StoreError::malformed(line, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{decode_table, encode_table};
    use crate::model::city::{CityRecord, CityTable, CityValidationError};
    use crate::store::StoreError;

    #[test]
    fn encode_writes_header_and_unquoted_integers() {
        let table = CityTable::from_records(vec![CityRecord::new("Rabat", 577_827, 118)]);

        let bytes = encode_table(&table).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "City,Population,Area (km²)\nRabat,577827,118\n"
        );
    }

    #[test]
    fn encode_empty_table_still_writes_header() {
        let bytes = encode_table(&CityTable::new()).unwrap();
        assert_eq!(bytes, "City,Population,Area (km²)\n".as_bytes());
    }

    #[test]
    fn encode_quotes_names_containing_delimiter() {
        let table = CityTable::from_records(vec![CityRecord::new("Sale, Rabat", 10, 2)]);

        let text = String::from_utf8(encode_table(&table).unwrap()).unwrap();
        assert!(text.ends_with("\"Sale, Rabat\",10,2\n"));

        let decoded = decode_table(text.as_bytes()).unwrap();
        assert_eq!(decoded, table);
    }

    #[test]
    fn encode_rejects_rows_that_would_not_load_back() {
        let blank = CityTable::from_records(vec![
            CityRecord::new("Rabat", 1, 1),
            CityRecord::new(" ", 2, 2),
        ]);
        let err = encode_table(&blank).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidRecord {
                row_index: 1,
                source: CityValidationError::EmptyName,
            }
        ));

        let padded = CityTable::from_records(vec![CityRecord::new(" Fez ", 3, 3)]);
        let err = encode_table(&padded).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidRecord {
                row_index: 0,
                source: CityValidationError::UntrimmedName,
            }
        ));
    }

    #[test]
    fn decode_header_only_yields_empty_table() {
        let table = decode_table("City,Population,Area (km²)\n".as_bytes()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn decode_rejects_unknown_header() {
        let err = decode_table("Name,Pop,Area\nRabat,1,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, StoreError::MalformedData { line: Some(1), .. }));
    }

    #[test]
    fn decode_rejects_missing_field() {
        let err = decode_table("City,Population,Area (km²)\nRabat,577827\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, StoreError::MalformedData { .. }));
    }

    #[test]
    fn decode_rejects_negative_and_non_integer_values() {
        let negative = decode_table("City,Population,Area (km²)\nRabat,-1,118\n".as_bytes());
        assert!(matches!(negative, Err(StoreError::MalformedData { .. })));

        let fractional = decode_table("City,Population,Area (km²)\nRabat,10,11.5\n".as_bytes());
        assert!(matches!(fractional, Err(StoreError::MalformedData { .. })));
    }

    #[test]
    fn decode_rejects_blank_name_with_line_number() {
        let err = decode_table("City,Population,Area (km²)\nRabat,1,2\n  ,3,4\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, StoreError::MalformedData { line: Some(3), .. }));
    }
}
