//! # Horizons client
//!
//! [`Horizons`] holds the HTTP client and the service settings shared by every request,
//! posts a [`HorizonsQuery`] to the JPL Horizons file API and hands the text answer to the
//! [`ResponseParser`].
//!
//! ## Overview
//!
//! * One POST per call, `format=text`, the batch input in the `input` form field.
//! * No retry: transport failures surface as [`HorizonsError::ReqwestError`], unresolved
//!   targets as [`HorizonsError::AmbiguousTarget`] / [`HorizonsError::UnknownTarget`].
//! * The client is cheap to clone and meant to be reused across queries.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use horizons_query::horizons::{Horizons, HorizonsConfig};
//! use horizons_query::query::{EphemerisSettings, HorizonsQuery};
//!
//! # async fn run() -> Result<(), horizons_query::horizons_errors::HorizonsError> {
//! let horizons = Horizons::new(HorizonsConfig::default())?;
//!
//! let mut ceres = HorizonsQuery::new("Ceres");
//! ceres.set_discrete_epochs([2451544.5])?;
//!
//! let outcome = horizons
//!     .get_ephemerides(&ceres, &EphemerisSettings::new("568"))
//!     .await?;
//! if let Some(table) = outcome.table() {
//!     println!("{table}");
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::constants::{DEFAULT_ELEMENTS_CENTER, HORIZONS_FILE_API};
use crate::horizons_errors::HorizonsError;
use crate::query::{EphemerisSettings, HorizonsQuery};
use crate::response::{ParseOutcome, QueryKind, ResponseParser};

/// Service settings of a [`Horizons`] client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HorizonsConfig {
    /// Endpoint receiving the batch input.
    pub api_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for HorizonsConfig {
    fn default() -> Self {
        HorizonsConfig {
            api_url: HORIZONS_FILE_API.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Client for the JPL Horizons file API.
#[derive(Debug, Clone)]
pub struct Horizons {
    http_client: Client,
    config: HorizonsConfig,
}

impl Horizons {
    /// Build a client with the given settings.
    ///
    /// Return
    /// ----------
    /// * `Err(HorizonsError::ReqwestError)` if the HTTP client cannot be initialised.
    pub fn new(config: HorizonsConfig) -> Result<Self, HorizonsError> {
        let http_client = Client::builder().timeout(config.timeout).build()?;
        Ok(Horizons {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &HorizonsConfig {
        &self.config
    }

    /// Post a batch input and return the raw text answer.
    pub async fn post_input(&self, input: &str) -> Result<String, HorizonsError> {
        debug!(url = %self.config.api_url, "posting Horizons batch input");
        let text = self
            .http_client
            .post(&self.config.api_url)
            .form(&[("format", "text"), ("input", input)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!(response_len = text.len(), "Horizons answered");
        Ok(text)
    }

    /// Observer table for the query epochs, seen from `settings.observatory_code`.
    ///
    /// Arguments
    /// -----------------
    /// * `query` – target and epochs.
    /// * `settings` – observer, airmass and elongation limits.
    ///
    /// Return
    /// ----------
    /// * The [`ParseOutcome`] of the answer, or the first error met.
    ///
    /// See also
    /// ------------
    /// * [`HorizonsQuery::ephemeris_input`] – the posted input.
    pub async fn get_ephemerides(
        &self,
        query: &HorizonsQuery,
        settings: &EphemerisSettings,
    ) -> Result<ParseOutcome, HorizonsError> {
        let input = query.ephemeris_input(settings)?;
        info!(body = query.target(), observer = %settings.observatory_code, "requesting ephemerides");
        let text = self.post_input(&input).await?;
        ResponseParser::new(QueryKind::Ephemeris, describe(query)).parse(&text)
    }

    /// Osculating elements for the query epochs, relative to `center`
    /// (defaults to [`DEFAULT_ELEMENTS_CENTER`]).
    pub async fn get_elements(
        &self,
        query: &HorizonsQuery,
        center: Option<&str>,
    ) -> Result<ParseOutcome, HorizonsError> {
        let center = center.unwrap_or(DEFAULT_ELEMENTS_CENTER);
        let input = query.elements_input(center)?;
        info!(body = query.target(), center, "requesting orbital elements");
        let text = self.post_input(&input).await?;
        ResponseParser::new(QueryKind::Elements, describe(query)).parse(&text)
    }
}

fn describe(query: &HorizonsQuery) -> String {
    format!("{} (COMMAND='{}')", query.target(), query.command())
}
