//! # Constants for Horizons queries and responses
//!
//! This module centralizes the **text markers**, **unit conversion factors** and
//! **service defaults** shared by the query builder and the response parser.
//!
//! ## Overview
//!
//! - Sentinels and narrative markers emitted by JPL Horizons in its text reports
//! - Column-independent sentinel values (`"n.a."`)
//! - Unit conversions applied while decoding rows
//! - Service endpoint and request limits

// -------------------------------------------------------------------------------------------------
// Response markers
// -------------------------------------------------------------------------------------------------

/// Start of the data block ("start of ephemeris").
pub const BLOCK_START: &str = "$$SOE";

/// End of the data block ("end of ephemeris").
pub const BLOCK_END: &str = "$$EOE";

/// Header marker of an observer (ephemeris) table.
pub const EPHEMERIS_HEADER_MARKER: &str = "Date__(UT)__HR:MN";

/// Header marker of an osculating elements table, matched against the line
/// with every whitespace character removed.
pub const ELEMENTS_HEADER_MARKER: &str = "EC,QR,IN,OM,";

/// Line holding the resolved target name.
pub const TARGET_NAME_MARKER: &str = "Target body name";

/// Character range of the target name on the [`TARGET_NAME_MARKER`] line.
pub const TARGET_NAME_COLUMNS: std::ops::Range<usize> = 18..50;

/// Physical parameter block; the `H= ... G= ...` line follows two lines below.
pub const ROTATION_PERIOD_MARKER: &str = "rotational period in hours)";

/// Number of lines between [`ROTATION_PERIOD_MARKER`] and the photometry line.
pub const PHOTOMETRY_LINE_OFFSET: usize = 2;

/// Several major bodies matched the command string.
pub const MULTIPLE_MAJOR_BODIES_MARKER: &str = "Multiple major-bodies match string";

/// Start of the small-body search result list.
pub const SMALL_BODY_MATCH_MARKER: &str = "Matching small-bodies";

/// The small-body search returned nothing.
pub const NO_MATCHES_MARKER: &str = "No matches found";

/// Literal substituted for labels that cannot be resolved and for absent text.
pub const NOT_AVAILABLE: &str = "n.a.";

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Seconds per hour; rates are reported in arcsec/hour and exposed in arcsec/second.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Seconds per minute; one-way light time is reported in minutes.
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Days per Earth year used to express the orbital period.
pub const DAYS_PER_YEAR: f64 = 365.256;

// -------------------------------------------------------------------------------------------------
// Service defaults
// -------------------------------------------------------------------------------------------------

/// Horizons file API endpoint (batch input posted as a form field).
pub const HORIZONS_FILE_API: &str = "https://ssd.jpl.nasa.gov/api/horizons_file.api";

/// Horizons truncates discrete epoch lists beyond this length.
pub const MAX_DISCRETE_EPOCHS: usize = 15;

/// Observer table quantities requested for ephemerides.
pub const EPHEMERIS_QUANTITIES: &str = "1,3,4,8,9,10,18,19,20,21,23,24,27,31,33,36";

/// Default center for osculating elements (Sun body center).
pub const DEFAULT_ELEMENTS_CENTER: &str = "500@10";

/// Airmass values at or above this limit are not sent to the service.
pub const AIRMASS_NO_LIMIT: f64 = 99.0;
