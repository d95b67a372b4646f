#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use approx::assert_relative_eq;
use horizons_query::response::{ParseOutcome, QueryKind, ResponseParser, ResponseTable};

/// Read a recorded Horizons answer from `tests/data`.
pub fn read_fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("cannot read {}: {err}", path.display()))
}

/// Parse a fixture and require a table out of it.
pub fn parse_fixture(name: &str, kind: QueryKind) -> ResponseTable {
    let parser = ResponseParser::new(kind, name);
    match parser.parse(&read_fixture(name)).unwrap() {
        ParseOutcome::Table(table) => table,
        ParseOutcome::Malformed(reason) => panic!("{name} is malformed: {reason:?}"),
    }
}

pub fn assert_field_close(table: &ResponseTable, row: usize, field: &str, expected: f64, epsilon: f64) {
    let actual = table
        .get(row, field)
        .and_then(|value| value.as_f64())
        .unwrap_or_else(|| panic!("no float in field {field}, row {row}"));
    assert_relative_eq!(actual, expected, epsilon = epsilon);
}

/// Route the crate's tracing output to the test harness; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
