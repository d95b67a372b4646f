//! # Data block extraction
//!
//! A Horizons text report is mostly narrative: target summary, physical parameters,
//! observer settings and footnotes. The machine-readable part sits between the `$$SOE`
//! and `$$EOE` sentinels, and its column labels are on a header line above it.
//!
//! [`extract`] walks the lines once and collects:
//!
//! * the header line (first line carrying the kind's header marker),
//! * the raw data rows found between the sentinels,
//! * the target name (`Target body name: ...`, characters 18..50),
//! * the photometric parameters `H` and `G`, read two lines below the
//!   `rotational period in hours)` line,
//!
//! and stops with an error as soon as Horizons reports an ambiguous or an unknown target.

use tracing::{debug, warn};

use crate::constants::{
    BLOCK_END, BLOCK_START, ELEMENTS_HEADER_MARKER, EPHEMERIS_HEADER_MARKER,
    MULTIPLE_MAJOR_BODIES_MARKER, NO_MATCHES_MARKER, PHOTOMETRY_LINE_OFFSET,
    ROTATION_PERIOD_MARKER, SMALL_BODY_MATCH_MARKER, TARGET_NAME_COLUMNS, TARGET_NAME_MARKER,
};
use crate::horizons_errors::HorizonsError;

use super::QueryKind;

/// Absolute magnitude and slope parameter of the target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SlopeParameters {
    pub h: Option<f64>,
    pub g: Option<f64>,
}

/// Everything [`extract`] finds in one response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedBlock<'a> {
    pub header: Option<&'a str>,
    pub rows: Vec<&'a str>,
    pub target_label: Option<String>,
    pub slope_params: SlopeParameters,
    /// `true` once `$$SOE` was seen, even if no row followed.
    pub block_found: bool,
}

impl QueryKind {
    /// `true` if `line` is the column header of this kind of table.
    pub fn is_header(&self, line: &str) -> bool {
        match self {
            QueryKind::Ephemeris => line.contains(EPHEMERIS_HEADER_MARKER),
            QueryKind::Elements => {
                let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
                compact.contains(ELEMENTS_HEADER_MARKER)
            }
        }
    }
}

fn target_label(line: &str) -> Option<String> {
    let label: String = line
        .chars()
        .skip(TARGET_NAME_COLUMNS.start)
        .take(TARGET_NAME_COLUMNS.len())
        .collect();
    let label = label.trim();
    (!label.is_empty()).then(|| label.to_string())
}

/// Parse a line of `key= value` pairs such as `   H= 3.34     G= .120     B-V= .713`.
///
/// Values that are missing, `n.a.` or not numeric yield `None`.
pub fn parse_slope_parameters(line: &str) -> SlopeParameters {
    let parts: Vec<&str> = line.split('=').collect();
    let mut params = SlopeParameters::default();

    for pair in parts.windows(2) {
        let Some(key) = pair[0].split_whitespace().last() else {
            continue;
        };
        let value = pair[1]
            .split_whitespace()
            .next()
            .and_then(|token| token.parse::<f64>().ok());
        match key {
            "H" => params.h = value,
            "G" => params.g = value,
            _ => {}
        }
    }
    params
}

/// Check a line for Horizons' target resolution failures.
fn check_target_resolution(
    lines: &[&str],
    index: usize,
    query: &str,
) -> Result<(), HorizonsError> {
    let line = lines[index];
    if line.contains(MULTIPLE_MAJOR_BODIES_MARKER) {
        return Err(HorizonsError::AmbiguousTarget {
            query: query.to_string(),
        });
    }
    if line.contains(SMALL_BODY_MATCH_MARKER) {
        let next = lines[index + 1..]
            .iter()
            .find(|candidate| !candidate.trim().is_empty());
        return match next {
            Some(next) if !next.contains(NO_MATCHES_MARKER) => {
                Err(HorizonsError::AmbiguousTarget {
                    query: query.to_string(),
                })
            }
            _ => Err(HorizonsError::UnknownTarget {
                query: query.to_string(),
            }),
        };
    }
    Ok(())
}

/// Scan a Horizons text response.
///
/// Arguments
/// -----------------
/// * `text` – the full response body.
/// * `kind` – selects the header marker.
/// * `query` – the query that produced `text`, carried by resolution errors.
///
/// Return
/// ----------
/// * The [`ExtractedBlock`], or `AmbiguousTarget` / `UnknownTarget` when Horizons could not
///   resolve the target to a single body.
pub fn extract<'a>(
    text: &'a str,
    kind: QueryKind,
    query: &str,
) -> Result<ExtractedBlock<'a>, HorizonsError> {
    let lines: Vec<&str> = text.lines().collect();
    let mut block = ExtractedBlock::default();
    let mut in_block = false;

    for (index, &line) in lines.iter().enumerate() {
        check_target_resolution(&lines, index, query)?;

        let marker = line.trim();
        if marker.starts_with(BLOCK_START) {
            in_block = true;
            block.block_found = true;
            continue;
        }
        if marker.starts_with(BLOCK_END) {
            in_block = false;
            continue;
        }
        if in_block {
            block.rows.push(line);
            continue;
        }

        if block.header.is_none() && kind.is_header(line) {
            block.header = Some(line);
        }
        if block.target_label.is_none() && line.contains(TARGET_NAME_MARKER) {
            block.target_label = target_label(line);
        }
        if line.contains(ROTATION_PERIOD_MARKER) {
            match lines.get(index + PHOTOMETRY_LINE_OFFSET) {
                Some(photometry) => block.slope_params = parse_slope_parameters(photometry),
                None => warn!("photometry line missing after physical parameters"),
            }
        }
    }

    debug!(
        header = block.header.is_some(),
        rows = block.rows.len(),
        target = ?block.target_label,
        "response scanned"
    );
    Ok(block)
}
