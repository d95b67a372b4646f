//! Splitting of header and data lines into cells, and decoding of data rows against a
//! discovered [`Schema`].

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::constants::NOT_AVAILABLE;

use super::schema::{CellSource, Decoder, FieldSpec, Schema};
use super::table::Value;

/// Split one comma-delimited line into its raw cells.
///
/// Cells are kept untrimmed: the presence flags of an observer table are single
/// characters where a lone space is meaningful.
pub fn split_cells(line: &str) -> Vec<String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => record.iter().map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

/// Decode the raw text of one cell.
pub fn decode_cell(raw: &str, decoder: &Decoder) -> Value {
    match decoder {
        Decoder::Text => Value::Text(raw.trim().to_string()),
        Decoder::Float { scale } => Value::Float(
            raw.trim()
                .parse::<f64>()
                .map(|value| value * scale)
                .unwrap_or(f64::NAN),
        ),
        Decoder::Integer => Value::Integer(raw.trim().parse::<i64>().ok()),
        Decoder::Label(map) => Value::Label(
            map.iter()
                .find(|(key, _)| *key == raw)
                .map(|(_, label)| *label)
                .unwrap_or(NOT_AVAILABLE),
        ),
    }
}

fn raw_text<'a>(cells: &'a [String], field: &FieldSpec) -> &'a str {
    let Some(cell) = cells.get(field.cell_index()) else {
        return "";
    };
    match field.source {
        CellSource::Offset(_) => cell,
        CellSource::Token(token) => cell.split_whitespace().nth(token).unwrap_or(""),
    }
}

/// Decode one data row.
///
/// Arguments
/// -----------------
/// * `cells` – the row split with [`split_cells`].
/// * `schema` – the layout discovered from the header.
///
/// Return
/// ----------
/// * One value per schema field, or `None` when the row is narrower than
///   [`Schema::min_width`].
pub fn decode_row(cells: &[String], schema: &Schema) -> Option<Vec<Value>> {
    if cells.len() < schema.min_width {
        return None;
    }
    Some(
        schema
            .fields
            .iter()
            .map(|field| decode_cell(raw_text(cells, field), &field.decoder))
            .collect(),
    )
}

#[cfg(test)]
mod row_test {
    use super::*;
    use crate::response::schema::{discover, ELONGATION_FLAG, SOLAR_PRESENCE};
    use crate::response::QueryKind;
    use approx::assert_relative_eq;

    #[test]
    fn test_split_cells_keeps_spaces() {
        assert_eq!(
            split_cells(" 2451544.5,*, , 188.7,"),
            vec![" 2451544.5", "*", " ", " 188.7", ""]
        );
        assert!(split_cells("").is_empty());
    }

    #[test]
    fn test_decode_cell() {
        assert_eq!(
            decode_cell(" 2000-Jan-01 00:00 ", &Decoder::Text),
            Value::Text("2000-Jan-01 00:00".into())
        );
        assert_eq!(
            decode_cell("-20.5230", &Decoder::PLAIN),
            Value::Float(-20.5230)
        );
        assert!(decode_cell(" n.a.", &Decoder::PLAIN)
            .as_f64()
            .unwrap()
            .is_nan());
        assert_eq!(decode_cell(" 42", &Decoder::Integer), Value::Integer(Some(42)));
        assert_eq!(decode_cell("4.2", &Decoder::Integer), Value::Integer(None));
        assert_eq!(
            decode_cell("*", &Decoder::Label(SOLAR_PRESENCE)),
            Value::Label("daylight")
        );
        assert_eq!(
            decode_cell(" ", &Decoder::Label(SOLAR_PRESENCE)),
            Value::Label("dark")
        );
        assert_eq!(
            decode_cell("/?", &Decoder::Label(ELONGATION_FLAG)),
            Value::Label("n.a.")
        );

        let rate = decode_cell("34.82655", &Decoder::Float { scale: 1.0 / 3600.0 });
        assert_relative_eq!(rate.as_f64().unwrap(), 34.82655 / 3600.0, max_relative = 1e-12);
    }

    #[test]
    fn test_decode_row_with_tokens() {
        let schema = discover(" Date_________JDUT, , , S-O-T,/r    S-T-O,", QueryKind::Ephemeris);
        let cells = split_cells(" 2451544.5,C,m, 95.3997,/T   22.5690,");
        let row = decode_row(&cells, &schema).unwrap();
        assert_eq!(
            row,
            vec![
                Value::Float(2451544.5),
                Value::Label("civil twilight"),
                Value::Label("moonlight"),
                Value::Float(95.3997),
                Value::Label("trailing"),
                Value::Float(22.5690),
            ]
        );
    }

    #[test]
    fn test_decode_row_too_narrow() {
        let schema = discover(" Date_________JDUT, , , S-O-T,", QueryKind::Ephemeris);
        assert_eq!(schema.min_width, 4);
        assert!(decode_row(&split_cells(" 2451544.5,*, "), &schema).is_none());
    }
}
