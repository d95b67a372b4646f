//! # Column schema discovery
//!
//! Horizons varies the set and the order of its columns with the requested quantities, the
//! observer location and the table type. The header line is therefore matched cell by cell
//! against an ordered rule table to find out which canonical field lives where.
//!
//! ## Overview
//!
//! * The header is split on commas. For every cell the rules of the table are tried in
//!   order and the **first** one whose [`LabelTest`] accepts the cell wins.
//! * A rule emits one or more [`FieldRule`]s. Each reads either the cell at a fixed offset
//!   from the header position ([`CellSource::Offset`]) or one whitespace-separated token of
//!   the header position's cell ([`CellSource::Token`]).
//! * A canonical field already claimed by an earlier column is not emitted again.
//! * The resulting [`Schema`] records the smallest row width able to serve every field.
//!
//! ## Rule tables
//!
//! * [`EPHEMERIS_RULES`] – observer tables (`Date__(UT)__HR:MN, ..., R.A._(ICRF), ...`).
//! * [`ELEMENTS_RULES`] – osculating elements (`JDTDB, ..., EC, QR, IN, OM, W, ...`).
//!   The short labels `A`, `W`, `N`, `AD`, ... are matched by trimmed equality so that
//!   `A` never claims the `AD` column and `W` never claims anything longer.

use tracing::{debug, trace};

use crate::constants::{DAYS_PER_YEAR, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

use super::row::split_cells;
use super::table::{Column, ValueKind};
use super::QueryKind;

/// Predicate applied to one header cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelTest {
    /// The raw cell contains the text.
    Contains(&'static str),
    /// The trimmed cell equals the text.
    Trimmed(&'static str),
    /// The trimmed cell equals the first text and the next cell, trimmed, starts with the
    /// second one (`r` directly followed by `rdot`).
    TrimmedFollowedBy(&'static str, &'static str),
    /// The raw cell contains every text.
    ContainsAll(&'static [&'static str]),
}

impl LabelTest {
    /// Evaluate the predicate on `cells[index]`.
    pub fn matches(&self, cells: &[String], index: usize) -> bool {
        let Some(cell) = cells.get(index) else {
            return false;
        };
        match self {
            LabelTest::Contains(text) => cell.contains(text),
            LabelTest::Trimmed(text) => cell.trim() == *text,
            LabelTest::TrimmedFollowedBy(text, next) => {
                cell.trim() == *text
                    && cells
                        .get(index + 1)
                        .is_some_and(|following| following.trim().starts_with(next))
            }
            LabelTest::ContainsAll(texts) => texts.iter().all(|text| cell.contains(text)),
        }
    }
}

/// Lookup table of an enumerated column: raw cell → label.
pub type LabelMap = &'static [(&'static str, &'static str)];

/// How the raw text of a cell becomes a [`super::table::Value`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decoder {
    /// Trimmed text.
    Text,
    /// Floating-point number multiplied by `scale`; `NaN` when the cell does not parse.
    Float { scale: f64 },
    /// Integer; `None` when the cell does not parse.
    Integer,
    /// Enumerated label looked up in the map, `"n.a."` when absent.
    Label(LabelMap),
}

impl Decoder {
    pub const PLAIN: Decoder = Decoder::Float { scale: 1.0 };

    pub fn kind(&self) -> ValueKind {
        match self {
            Decoder::Text => ValueKind::Text,
            Decoder::Float { .. } => ValueKind::Float,
            Decoder::Integer => ValueKind::Integer,
            Decoder::Label(_) => ValueKind::Label,
        }
    }
}

/// Where a field takes its raw text from, relative to the matched header position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSource {
    /// The cell `n` positions to the right.
    Offset(usize),
    /// Whitespace-separated token `n` of the cell at the matched position.
    Token(usize),
}

/// One canonical field produced by a [`ColumnRule`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    pub name: &'static str,
    pub source: CellSource,
    pub decoder: Decoder,
}

/// A label test and the fields it produces when it matches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRule {
    pub test: LabelTest,
    pub fields: &'static [FieldRule],
}

/// A field bound to an absolute header position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub column: usize,
    pub source: CellSource,
    pub decoder: Decoder,
}

impl FieldSpec {
    /// Index of the row cell this field reads.
    pub fn cell_index(&self) -> usize {
        match self.source {
            CellSource::Offset(offset) => self.column + offset,
            CellSource::Token(_) => self.column,
        }
    }
}

/// Field layout discovered from one header line.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub fields: Vec<FieldSpec>,
    /// Rows with fewer cells cannot be decoded.
    pub min_width: usize,
}

impl Schema {
    /// Columns produced by the row decoder for this schema.
    pub fn columns(&self) -> Vec<Column> {
        self.fields
            .iter()
            .map(|field| Column {
                name: field.name,
                kind: field.decoder.kind(),
            })
            .collect()
    }
}

pub const SOLAR_PRESENCE: LabelMap = &[
    ("*", "daylight"),
    ("C", "civil twilight"),
    ("N", "nautical twilight"),
    ("A", "astronomical twilight"),
    (" ", "dark"),
    ("t", "transiting"),
];

pub const LUNAR_PRESENCE: LabelMap = &[("m", "moonlight"), (" ", "dark")];

pub const ELONGATION_FLAG: LabelMap = &[("/L", "leading"), ("/T", "trailing")];

macro_rules! single {
    ($name:literal, $decoder:expr) => {
        FieldRule {
            name: $name,
            source: CellSource::Offset(0),
            decoder: $decoder,
        }
    };
}

const fn rule(test: LabelTest, fields: &'static [FieldRule]) -> ColumnRule {
    ColumnRule { test, fields }
}

const ARCSEC_PER_SECOND: Decoder = Decoder::Float {
    scale: 1.0 / SECONDS_PER_HOUR,
};

const MINUTES_TO_SECONDS: Decoder = Decoder::Float {
    scale: SECONDS_PER_MINUTE,
};

const DAYS_TO_YEARS: Decoder = Decoder::Float {
    scale: 1.0 / DAYS_PER_YEAR,
};

/// Observer table rules, tried in this order for every header cell.
pub const EPHEMERIS_RULES: &[ColumnRule] = &[
    rule(
        LabelTest::Contains("Date__(UT)__HR:MN"),
        &[single!("datetime", Decoder::Text)],
    ),
    rule(
        LabelTest::Contains("Date_________JDUT"),
        &[
            single!("datetime_jd", Decoder::PLAIN),
            FieldRule {
                name: "solar_presence",
                source: CellSource::Offset(1),
                decoder: Decoder::Label(SOLAR_PRESENCE),
            },
            FieldRule {
                name: "lunar_presence",
                source: CellSource::Offset(2),
                decoder: Decoder::Label(LUNAR_PRESENCE),
            },
        ],
    ),
    rule(LabelTest::Contains("RA_3sigma"), &[single!("RA_3sigma", Decoder::PLAIN)]),
    rule(LabelTest::Contains("DEC_3sigma"), &[single!("DEC_3sigma", Decoder::PLAIN)]),
    rule(LabelTest::Contains("R.A._"), &[single!("RA", Decoder::PLAIN)]),
    rule(LabelTest::Contains("DEC_"), &[single!("DEC", Decoder::PLAIN)]),
    rule(LabelTest::Contains("dRA*cosD"), &[single!("RA_rate", ARCSEC_PER_SECOND)]),
    rule(LabelTest::Contains("d(DEC)/dt"), &[single!("DEC_rate", ARCSEC_PER_SECOND)]),
    rule(LabelTest::Contains("Azi_(a-app)"), &[single!("AZ", Decoder::PLAIN)]),
    rule(LabelTest::Contains("Elev_(a-app)"), &[single!("EL", Decoder::PLAIN)]),
    rule(LabelTest::Contains("a-mass"), &[single!("airmass", Decoder::PLAIN)]),
    rule(LabelTest::Contains("mag_ex"), &[single!("magextinct", Decoder::PLAIN)]),
    rule(LabelTest::Contains("APmag"), &[single!("V", Decoder::PLAIN)]),
    rule(LabelTest::Contains("T-mag"), &[single!("V", Decoder::PLAIN)]),
    rule(LabelTest::Contains("Illu%"), &[single!("illumination", Decoder::PLAIN)]),
    rule(LabelTest::Contains("hEcl-Lon"), &[single!("EclLon", Decoder::PLAIN)]),
    rule(LabelTest::Contains("hEcl-Lat"), &[single!("EclLat", Decoder::PLAIN)]),
    rule(LabelTest::Contains("ObsEcLon"), &[single!("ObsEclLon", Decoder::PLAIN)]),
    rule(LabelTest::Contains("ObsEcLat"), &[single!("ObsEclLat", Decoder::PLAIN)]),
    rule(
        LabelTest::TrimmedFollowedBy("r", "rdot"),
        &[single!("r", Decoder::PLAIN)],
    ),
    rule(LabelTest::Contains("rdot"), &[single!("r_rate", Decoder::PLAIN)]),
    rule(LabelTest::Trimmed("delta"), &[single!("delta", Decoder::PLAIN)]),
    rule(LabelTest::Contains("deldot"), &[single!("delta_rate", Decoder::PLAIN)]),
    rule(
        LabelTest::Contains("1-way_LT"),
        &[single!("lighttime", MINUTES_TO_SECONDS)],
    ),
    rule(LabelTest::Contains("S-O-T"), &[single!("elong", Decoder::PLAIN)]),
    // space-based observers: "/r    S-T-O" in one cell
    rule(
        LabelTest::ContainsAll(&["/r", "S-T-O"]),
        &[
            FieldRule {
                name: "elongFlag",
                source: CellSource::Token(0),
                decoder: Decoder::Label(ELONGATION_FLAG),
            },
            FieldRule {
                name: "alpha",
                source: CellSource::Token(1),
                decoder: Decoder::PLAIN,
            },
        ],
    ),
    rule(LabelTest::Contains("S-T-O"), &[single!("alpha", Decoder::PLAIN)]),
    rule(
        LabelTest::Contains("/r"),
        &[single!("elongFlag", Decoder::Label(ELONGATION_FLAG))],
    ),
    rule(LabelTest::Contains("PsAng"), &[single!("sunTargetPA", Decoder::PLAIN)]),
    rule(LabelTest::Contains("PsAMV"), &[single!("velocityPA", Decoder::PLAIN)]),
    rule(LabelTest::Contains("GlxLon"), &[single!("GlxLon", Decoder::PLAIN)]),
    rule(LabelTest::Contains("GlxLat"), &[single!("GlxLat", Decoder::PLAIN)]),
];

/// Osculating elements rules, tried in this order for every header cell.
pub const ELEMENTS_RULES: &[ColumnRule] = &[
    rule(LabelTest::Contains("JDTDB"), &[single!("datetime_jd", Decoder::PLAIN)]),
    rule(LabelTest::Trimmed("EC"), &[single!("e", Decoder::PLAIN)]),
    rule(LabelTest::Trimmed("QR"), &[single!("p", Decoder::PLAIN)]),
    rule(LabelTest::Trimmed("IN"), &[single!("incl", Decoder::PLAIN)]),
    rule(LabelTest::Trimmed("OM"), &[single!("node", Decoder::PLAIN)]),
    rule(LabelTest::Trimmed("W"), &[single!("argper", Decoder::PLAIN)]),
    rule(LabelTest::Trimmed("Tp"), &[single!("Tp", Decoder::PLAIN)]),
    rule(LabelTest::Trimmed("MA"), &[single!("meananomaly", Decoder::PLAIN)]),
    rule(LabelTest::Trimmed("TA"), &[single!("trueanomaly", Decoder::PLAIN)]),
    rule(LabelTest::Trimmed("A"), &[single!("a", Decoder::PLAIN)]),
    rule(LabelTest::Trimmed("AD"), &[single!("Q", Decoder::PLAIN)]),
    rule(
        LabelTest::Trimmed("PR"),
        &[single!("period", DAYS_TO_YEARS)],
    ),
];

impl QueryKind {
    /// Rule table of this response kind.
    pub fn rules(&self) -> &'static [ColumnRule] {
        match self {
            QueryKind::Ephemeris => EPHEMERIS_RULES,
            QueryKind::Elements => ELEMENTS_RULES,
        }
    }
}

/// Discover the schema of a header line.
///
/// Arguments
/// -----------------
/// * `header` – the raw header line, e.g. `" Date__(UT)__HR:MN, Date_________JDUT, , , ..."`.
/// * `kind` – selects the rule table.
///
/// Return
/// ----------
/// * The ordered field layout; empty when no cell matched any rule.
pub fn discover(header: &str, kind: QueryKind) -> Schema {
    let cells = split_cells(header);
    let rules = kind.rules();

    let mut fields: Vec<FieldSpec> = Vec::new();
    for column in 0..cells.len() {
        let Some(matched) = rules.iter().find(|rule| rule.test.matches(&cells, column)) else {
            continue;
        };
        trace!(column, label = %cells[column].trim(), "header cell matched");

        for field in matched.fields {
            if fields.iter().any(|known| known.name == field.name) {
                debug!(field = field.name, column, "field already claimed, skipped");
                continue;
            }
            fields.push(FieldSpec {
                name: field.name,
                column,
                source: field.source,
                decoder: field.decoder,
            });
        }
    }

    let min_width = fields
        .iter()
        .map(|field| field.cell_index() + 1)
        .max()
        .unwrap_or(0);

    debug!(fields = fields.len(), min_width, "schema discovered");
    Schema { fields, min_width }
}

#[cfg(test)]
mod schema_test {
    use super::*;

    const EPHEMERIS_HEADER: &str = " Date__(UT)__HR:MN, Date_________JDUT, , , R.A._(ICRF/J2000.0), DEC_(ICRF/J2000.0), dRA*cosD, d(DEC)/dt, Azi_(a-app), Elev_(a-app), a-mass, mag_ex, APmag, S-brt, Illu%, hEcl-Lon, hEcl-Lat,  r, rdot, delta, deldot, 1-way_LT, S-O-T,/r, S-T-O, PsAng, PsAMV, GlxLon, GlxLat, RA_3sigma, DEC_3sigma,";

    const ELEMENTS_HEADER: &str = "            JDTDB,            Calendar Date (TDB),                     EC,                     QR,                     IN,                     OM,                      W,                     Tp,                      N,                     MA,                     TA,                      A,                     AD,                     PR,";

    fn names(schema: &Schema) -> Vec<&'static str> {
        schema.fields.iter().map(|field| field.name).collect()
    }

    fn field<'a>(schema: &'a Schema, name: &str) -> &'a FieldSpec {
        schema
            .fields
            .iter()
            .find(|field| field.name == name)
            .unwrap()
    }

    #[test]
    fn test_label_tests() {
        let cells: Vec<String> = [" r", " rdot", "/r    S-T-O", "A", " AD"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(LabelTest::TrimmedFollowedBy("r", "rdot").matches(&cells, 0));
        assert!(!LabelTest::TrimmedFollowedBy("r", "rdot").matches(&cells, 1));
        assert!(LabelTest::ContainsAll(&["/r", "S-T-O"]).matches(&cells, 2));
        assert!(LabelTest::Trimmed("A").matches(&cells, 3));
        assert!(!LabelTest::Trimmed("A").matches(&cells, 4));
        assert!(!LabelTest::Contains("x").matches(&cells, 10));
    }

    #[test]
    fn test_discover_ephemeris() {
        let schema = discover(EPHEMERIS_HEADER, QueryKind::Ephemeris);
        assert_eq!(
            names(&schema),
            vec![
                "datetime",
                "datetime_jd",
                "solar_presence",
                "lunar_presence",
                "RA",
                "DEC",
                "RA_rate",
                "DEC_rate",
                "AZ",
                "EL",
                "airmass",
                "magextinct",
                "V",
                "illumination",
                "EclLon",
                "EclLat",
                "r",
                "r_rate",
                "delta",
                "delta_rate",
                "lighttime",
                "elong",
                "elongFlag",
                "alpha",
                "sunTargetPA",
                "velocityPA",
                "GlxLon",
                "GlxLat",
                "RA_3sigma",
                "DEC_3sigma",
            ]
        );

        assert_eq!(field(&schema, "solar_presence").cell_index(), 2);
        assert_eq!(field(&schema, "lunar_presence").cell_index(), 3);
        assert_eq!(field(&schema, "elongFlag").cell_index(), 23);
        assert_eq!(field(&schema, "alpha").cell_index(), 24);
        assert_eq!(schema.min_width, 31);
    }

    #[test]
    fn test_combined_elongation_cell() {
        let header = " Date_________JDUT, , , S-O-T,/r    S-T-O,";
        let schema = discover(header, QueryKind::Ephemeris);
        let flag = field(&schema, "elongFlag");
        let alpha = field(&schema, "alpha");
        assert_eq!((flag.column, flag.source), (4, CellSource::Token(0)));
        assert_eq!((alpha.column, alpha.source), (4, CellSource::Token(1)));
    }

    #[test]
    fn test_field_emitted_once() {
        let schema = discover(" APmag, T-mag,", QueryKind::Ephemeris);
        assert_eq!(names(&schema), vec!["V"]);
        assert_eq!(field(&schema, "V").column, 0);
    }

    #[test]
    fn test_r_requires_rdot() {
        let schema = discover(" r, delta,", QueryKind::Ephemeris);
        assert_eq!(names(&schema), vec!["delta"]);
    }

    #[test]
    fn test_discover_elements() {
        let schema = discover(ELEMENTS_HEADER, QueryKind::Elements);
        assert_eq!(
            names(&schema),
            vec![
                "datetime_jd",
                "e",
                "p",
                "incl",
                "node",
                "argper",
                "Tp",
                "meananomaly",
                "trueanomaly",
                "a",
                "Q",
                "period",
            ]
        );
        assert_eq!(field(&schema, "a").column, 11);
        assert_eq!(field(&schema, "Q").column, 12);
        assert_eq!(schema.min_width, 14);
    }

    #[test]
    fn test_unknown_header() {
        let schema = discover("foo, bar,", QueryKind::Elements);
        assert!(schema.fields.is_empty());
        assert_eq!(schema.min_width, 0);
    }
}
