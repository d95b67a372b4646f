//! # Horizons response parsing
//!
//! Converts the text body returned by JPL Horizons into a typed [`ResponseTable`].
//!
//! ## Overview
//!
//! The parse runs in three stages, one module each:
//!
//! 1. [`block::extract`] – one scan over the lines: header, data rows, target name, `H`/`G`,
//!    target resolution failures.
//! 2. [`schema::discover`] – header cells → canonical fields, via the ordered rule table of
//!    the [`QueryKind`].
//! 3. [`row::decode_row`] – each data row → one value per field, with per-field fallbacks
//!    (`NaN`, `Integer(None)`, `"n.a."`).
//!
//! `targetname`, `H` and `G` are appended to every row from the values captured in stage 1.
//!
//! ## Outcomes
//!
//! | situation                                  | result                                          |
//! |--------------------------------------------|-------------------------------------------------|
//! | Horizons reports several matching bodies   | `Err(HorizonsError::AmbiguousTarget)`           |
//! | Horizons reports no matching body          | `Err(HorizonsError::UnknownTarget)`             |
//! | no header line for the kind                | `Ok(ParseOutcome::Malformed(MissingHeader))`    |
//! | no `$$SOE` sentinel                        | `Ok(ParseOutcome::Malformed(MissingDataBlock))` |
//! | rows present, none decodable               | `Ok(ParseOutcome::Malformed(NoDecodableRows))`  |
//! | empty data block                           | `Ok(ParseOutcome::Table(..))` with zero rows    |
//!
//! ## Example
//!
//! ```rust
//! use horizons_query::response::{ParseOutcome, QueryKind, ResponseParser};
//!
//! let text = "\
//! *******************************************************************************
//!  Target body name: Io (501)                       {source: jup365_merged}
//!             JDTDB,            Calendar Date (TDB),     EC,     QR,     IN,     OM,      W,     Tp,      N,     MA,     TA,      A,     AD,     PR,
//! $$SOE
//! 2451545.0, A.D. 2000-Jan-01 12:00:00.0000, 3.65E-03, 2.81E-03, 2.21, 336.85, 62.18, 2451545.10, 203.1, 237.38, 237.03, 2.82E-03, 2.83E-03, 1.77,
//! $$EOE
//! ";
//!
//! let parser = ResponseParser::new(QueryKind::Elements, "Io");
//! let ParseOutcome::Table(table) = parser.parse(text).unwrap() else {
//!     panic!("expected a table");
//! };
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.texts("targetname"), Some(vec!["Io (501)"]));
//! ```

pub mod block;
pub mod fields;
pub mod row;
pub mod schema;
pub mod table;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::NOT_AVAILABLE;
use crate::horizons_errors::HorizonsError;

pub use block::{ExtractedBlock, SlopeParameters};
pub use schema::Schema;
pub use table::{Column, ResponseTable, Value, ValueKind};

/// Table type requested from Horizons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryKind {
    /// Observer table (`TABLE_TYPE='OBSERVER'`).
    Ephemeris,
    /// Osculating orbital elements (`TABLE_TYPE='ELEMENTS'`).
    Elements,
}

/// Why a response could not be turned into a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    MissingHeader,
    MissingDataBlock,
    /// The block held rows but every one of them was rejected.
    NoDecodableRows { rejected: usize },
}

/// Result of parsing a response that named a single target.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Table(ResponseTable),
    Malformed(MalformedReason),
}

impl ParseOutcome {
    /// The table, if the parse produced one.
    pub fn table(self) -> Option<ResponseTable> {
        match self {
            ParseOutcome::Table(table) => Some(table),
            ParseOutcome::Malformed(_) => None,
        }
    }
}

/// Parser for one kind of Horizons text response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseParser {
    kind: QueryKind,
    query: String,
}

impl ResponseParser {
    /// Arguments
    /// -----------------
    /// * `kind` – table type the response was requested as.
    /// * `query` – description of the request, reported in target resolution errors.
    pub fn new(kind: QueryKind, query: impl Into<String>) -> Self {
        ResponseParser {
            kind,
            query: query.into(),
        }
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    /// Parse a complete response body.
    ///
    /// Return
    /// ----------
    /// * `Err` for unresolved targets, `Ok(ParseOutcome)` otherwise; see the module table.
    #[tracing::instrument(skip(self, text), fields(kind = ?self.kind, input_len = text.len()))]
    pub fn parse(&self, text: &str) -> Result<ParseOutcome, HorizonsError> {
        let block = block::extract(text, self.kind, &self.query)?;

        let Some(header) = block.header else {
            warn!("no header line in response");
            return Ok(ParseOutcome::Malformed(MalformedReason::MissingHeader));
        };
        if !block.block_found {
            warn!("no data block in response");
            return Ok(ParseOutcome::Malformed(MalformedReason::MissingDataBlock));
        }

        let schema = schema::discover(header, self.kind);
        let mut columns = schema.columns();
        columns.extend([
            Column {
                name: "targetname",
                kind: ValueKind::Text,
            },
            Column {
                name: "H",
                kind: ValueKind::Float,
            },
            Column {
                name: "G",
                kind: ValueKind::Float,
            },
        ]);
        let mut table = ResponseTable::new(columns);

        let target = block
            .target_label
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let SlopeParameters { h, g } = block.slope_params;

        let mut rejected = 0;
        for line in &block.rows {
            let cells = row::split_cells(line);
            let Some(mut values) = row::decode_row(&cells, &schema) else {
                debug!(width = cells.len(), min_width = schema.min_width, "row too narrow, dropped");
                rejected += 1;
                continue;
            };
            values.extend([
                Value::Text(target.clone()),
                Value::Float(h.unwrap_or(f64::NAN)),
                Value::Float(g.unwrap_or(f64::NAN)),
            ]);
            if !table.push_row(values) {
                rejected += 1;
            }
        }

        if rejected > 0 {
            warn!(rejected, kept = table.len(), "rows rejected while decoding");
        }
        if table.is_empty() && rejected > 0 {
            return Ok(ParseOutcome::Malformed(MalformedReason::NoDecodableRows {
                rejected,
            }));
        }

        debug!(rows = table.len(), fields = table.columns().len(), "response parsed");
        Ok(ParseOutcome::Table(table))
    }
}
