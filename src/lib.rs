//! # horizons_query
//!
//! Small-body target resolution and parsing of JPL Horizons text tables.
//!
//! * [`target`] – classify a free-form identifier (`"P/1994 N2 (McNaught-Hartley)"`,
//!   `"(228195) 6675 P-L"`, `"900191"`, ...) into a canonical [`target::TargetIdentifier`]
//!   and render it as a Horizons `COMMAND`.
//! * [`response`] – turn a Horizons observer or elements report into a typed
//!   [`response::ResponseTable`].
//! * [`query`] and [`horizons`] – build the batch input and fetch it from the file API.

pub mod constants;
pub mod designation;
pub mod horizons;
pub mod horizons_errors;
pub mod query;
pub mod response;
pub mod target;
