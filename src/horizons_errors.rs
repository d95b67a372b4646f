//! Errors raised while building, sending and reading Horizons queries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HorizonsError {
    #[error("Ambiguous target name; check query: {query}")]
    AmbiguousTarget { query: String },

    #[error("Unknown target; check query: {query}")]
    UnknownTarget { query: String },

    #[error("No epoch information given for target {0}")]
    MissingEpochs(String),

    #[error("Invalid epoch specification: {0}")]
    InvalidEpochs(String),

    #[error("HTTP reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Unable to export the response table: {0}")]
    CsvExportError(#[from] csv::Error),
}

impl PartialEq for HorizonsError {
    fn eq(&self, other: &Self) -> bool {
        use HorizonsError::*;
        match (self, other) {
            (AmbiguousTarget { query: a }, AmbiguousTarget { query: b }) => a == b,
            (UnknownTarget { query: a }, UnknownTarget { query: b }) => a == b,
            (MissingEpochs(a), MissingEpochs(b)) => a == b,
            (InvalidEpochs(a), InvalidEpochs(b)) => a == b,

            // foreign errors are not comparable: same variant means equal
            (ReqwestError(_), ReqwestError(_)) => true,
            (CsvExportError(_), CsvExportError(_)) => true,

            _ => false,
        }
    }
}
