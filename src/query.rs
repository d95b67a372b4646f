//! # Horizons query builder
//!
//! [`HorizonsQuery`] gathers everything needed to ask Horizons about one target: the raw
//! target string, the body-kind hints, the epochs, and the closest-apparition switch for
//! comets. It renders the batch input posted to the file API:
//!
//! ```text
//! !$$SOF
//! COMMAND='DES=2001 AT1;'
//! TABLE_TYPE='OBSERVER'
//! ...
//! START_TIME='2016-02-23 00:00'
//! STOP_TIME='2016-02-24 00:00'
//! STEP_SIZE='1h'
//! ```
//!
//! The target is classified on demand through [`crate::target::classify`]; the query itself
//! stores only what the caller gave.
//!
//! ## Example
//!
//! ```rust
//! use horizons_query::query::{EphemerisSettings, HorizonsQuery};
//!
//! let mut ceres = HorizonsQuery::new("Ceres");
//! ceres
//!     .set_epoch_range("2016-02-23 00:00", "2016-02-24 00:00", "1h")
//!     .unwrap();
//!
//! let input = ceres
//!     .ephemeris_input(&EphemerisSettings::new("568"))
//!     .unwrap();
//! assert!(input.contains("COMMAND='Ceres;'"));
//! assert!(input.contains("CENTER='568'"));
//! ```

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{AIRMASS_NO_LIMIT, EPHEMERIS_QUANTITIES, MAX_DISCRETE_EPOCHS};
use crate::horizons_errors::HorizonsError;
use crate::target::{classify, BodyHints, TargetIdentifier};

/// A single epoch of a discrete epoch list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EpochValue {
    /// Julian Date.
    JulianDate(f64),
    /// Calendar date understood by Horizons, e.g. `2016-02-23 00:00`.
    Text(String),
}

impl From<f64> for EpochValue {
    fn from(jd: f64) -> Self {
        EpochValue::JulianDate(jd)
    }
}

impl From<&str> for EpochValue {
    fn from(date: &str) -> Self {
        EpochValue::Text(date.to_string())
    }
}

impl From<String> for EpochValue {
    fn from(date: String) -> Self {
        EpochValue::Text(date)
    }
}

impl fmt::Display for EpochValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EpochValue::JulianDate(jd) => write!(f, "{jd}"),
            EpochValue::Text(date) => write!(f, "{date}"),
        }
    }
}

/// Epochs of a query: a regular range or an explicit list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EpochSpec {
    Range {
        start: String,
        stop: String,
        step: String,
    },
    DiscreteList(Vec<EpochValue>),
}

impl EpochSpec {
    /// Batch input lines selecting these epochs.
    fn input_lines(&self) -> String {
        match self {
            EpochSpec::Range { start, stop, step } => {
                format!("START_TIME='{start}'\nSTOP_TIME='{stop}'\nSTEP_SIZE='{step}'\n")
            }
            EpochSpec::DiscreteList(epochs) => {
                format!("TLIST={}\n", epochs.iter().map(|e| format!("'{e}'")).join(" "))
            }
        }
    }
}

impl fmt::Display for EpochSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EpochSpec::Range { start, stop, step } => {
                write!(f, "epoch range from {start} to {stop} in steps of {step}")
            }
            EpochSpec::DiscreteList(epochs) => {
                write!(f, "discrete epochs: {}", epochs.iter().join(" "))
            }
        }
    }
}

/// Observer-table settings of an ephemeris request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisSettings {
    /// MPC observatory code or Horizons center, e.g. `568` or `500`.
    pub observatory_code: String,
    /// Only epochs with an airmass below this value; not sent at or above 99.
    pub airmass_lessthan: f64,
    /// Solar elongation window in degrees.
    pub solar_elongation: (f64, f64),
    /// Drop epochs during daylight at the observer.
    pub skip_daylight: bool,
}

impl EphemerisSettings {
    pub fn new(observatory_code: impl Into<String>) -> Self {
        EphemerisSettings {
            observatory_code: observatory_code.into(),
            ..Default::default()
        }
    }

    pub fn airmass_lessthan(mut self, airmass: f64) -> Self {
        self.airmass_lessthan = airmass;
        self
    }

    pub fn solar_elongation(mut self, min: f64, max: f64) -> Self {
        self.solar_elongation = (min, max);
        self
    }

    pub fn skip_daylight(mut self, skip: bool) -> Self {
        self.skip_daylight = skip;
        self
    }
}

impl Default for EphemerisSettings {
    fn default() -> Self {
        EphemerisSettings {
            observatory_code: "500".to_string(),
            airmass_lessthan: AIRMASS_NO_LIMIT,
            solar_elongation: (0.0, 180.0),
            skip_daylight: false,
        }
    }
}

/// One Horizons request in the making.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonsQuery {
    target: String,
    hints: BodyHints,
    closest_apparition: bool,
    epochs: Option<EpochSpec>,
}

impl HorizonsQuery {
    /// New query for a small body with no epochs set.
    pub fn new(target: impl Into<String>) -> Self {
        HorizonsQuery {
            target: target.into(),
            hints: BodyHints::default(),
            closest_apparition: false,
            epochs: None,
        }
    }

    /// `false` for planets, satellites and spacecraft; their name is sent verbatim.
    pub fn smallbody(mut self, smallbody: bool) -> Self {
        self.hints.smallbody = smallbody;
        self
    }

    pub fn comet(mut self, comet: bool) -> Self {
        self.hints.comet = comet;
        self
    }

    pub fn asteroid(mut self, asteroid: bool) -> Self {
        self.hints.asteroid = asteroid;
        self
    }

    /// For comets, request the orbit solution closest to the present epoch.
    pub fn closest_apparition(mut self, cap: bool) -> Self {
        self.closest_apparition = cap;
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn epochs(&self) -> Option<&EpochSpec> {
        self.epochs.as_ref()
    }

    /// Query a regular range of epochs.
    ///
    /// Arguments
    /// -----------------
    /// * `start`, `stop` – dates understood by Horizons (`YYYY-MM-DD [HH:MM[:SS]]`).
    /// * `step` – step size with unit (`1h`, `10m`, `2d`).
    ///
    /// Return
    /// ----------
    /// * `Err(HorizonsError::InvalidEpochs)` if any of the three is blank.
    pub fn set_epoch_range(
        &mut self,
        start: &str,
        stop: &str,
        step: &str,
    ) -> Result<&mut Self, HorizonsError> {
        if [start, stop, step].iter().any(|part| part.trim().is_empty()) {
            return Err(HorizonsError::InvalidEpochs(format!(
                "incomplete epoch range: start='{start}' stop='{stop}' step='{step}'"
            )));
        }
        self.epochs = Some(EpochSpec::Range {
            start: start.trim().to_string(),
            stop: stop.trim().to_string(),
            step: step.trim().to_string(),
        });
        Ok(self)
    }

    /// Query an explicit list of epochs (Julian Dates or calendar dates).
    ///
    /// Horizons truncates long lists; a warning is logged above
    /// [`MAX_DISCRETE_EPOCHS`] entries.
    pub fn set_discrete_epochs<E, I>(&mut self, epochs: I) -> Result<&mut Self, HorizonsError>
    where
        E: Into<EpochValue>,
        I: IntoIterator<Item = E>,
    {
        let epochs: Vec<EpochValue> = epochs.into_iter().map(Into::into).collect();
        if epochs.is_empty() {
            return Err(HorizonsError::InvalidEpochs(
                "empty discrete epoch list".to_string(),
            ));
        }
        if epochs.len() > MAX_DISCRETE_EPOCHS {
            warn!(
                count = epochs.len(),
                limit = MAX_DISCRETE_EPOCHS,
                "more than {MAX_DISCRETE_EPOCHS} discrete epochs provided; output may be truncated"
            );
        }
        self.epochs = Some(EpochSpec::DiscreteList(epochs));
        Ok(self)
    }

    /// Canonical identifier of the target.
    pub fn identifier(&self) -> TargetIdentifier {
        classify(&self.target, self.hints)
    }

    /// The `COMMAND` value sent to Horizons.
    pub fn command(&self) -> String {
        self.identifier().horizons_command(self.closest_apparition)
    }

    fn epoch_lines(&self) -> Result<String, HorizonsError> {
        self.epochs
            .as_ref()
            .map(EpochSpec::input_lines)
            .ok_or_else(|| HorizonsError::MissingEpochs(self.target.clone()))
    }

    /// Batch input of an observer-table request.
    ///
    /// Return
    /// ----------
    /// * `Err(HorizonsError::MissingEpochs)` when no epochs were set.
    pub fn ephemeris_input(&self, settings: &EphemerisSettings) -> Result<String, HorizonsError> {
        let epochs = self.epoch_lines()?;
        let (elong_min, elong_max) = settings.solar_elongation;

        let mut input = format!(
            "
!$$SOF
COMMAND='{}'
OBJ_DATA='YES'
MAKE_EPHEM='YES'
TABLE_TYPE='OBSERVER'
CENTER='{}'
QUANTITIES='{}'
CSV_FORMAT='YES'
ANG_FORMAT='DEG'
CAL_FORMAT='BOTH'
SOLAR_ELONG='{},{}'
{}",
            self.command(),
            settings.observatory_code,
            EPHEMERIS_QUANTITIES,
            elong_min,
            elong_max,
            epochs
        );
        if settings.airmass_lessthan < AIRMASS_NO_LIMIT {
            input.push_str(&format!("AIRMASS='{}'\n", settings.airmass_lessthan));
        }
        input.push_str(if settings.skip_daylight {
            "SKIP_DAYLT='YES'\n"
        } else {
            "SKIP_DAYLT='NO'\n"
        });
        Ok(input)
    }

    /// Batch input of an osculating elements request.
    ///
    /// Arguments
    /// -----------------
    /// * `center` – Horizons center code, see [`crate::constants::DEFAULT_ELEMENTS_CENTER`].
    pub fn elements_input(&self, center: &str) -> Result<String, HorizonsError> {
        let epochs = self.epoch_lines()?;
        Ok(format!(
            "
!$$SOF
COMMAND='{}'
OBJ_DATA='YES'
MAKE_EPHEM='YES'
TABLE_TYPE='ELEMENTS'
CENTER='{}'
CSV_FORMAT='YES'
OUT_UNITS='AU-D'
REF_PLANE='ECLIPTIC'
REF_SYSTEM='ICRF'
TP_TYPE='ABSOLUTE'
ELEM_LABELS='YES'
{}",
            self.command(),
            center,
            epochs
        ))
    }
}

impl fmt::Display for HorizonsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "targetname: {}", self.target)?;
        if let Some(epochs) = &self.epochs {
            write!(f, "\n{epochs}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod query_test {
    use super::*;

    #[test]
    fn test_missing_epochs() {
        let query = HorizonsQuery::new("Ceres");
        assert_eq!(
            query.elements_input("500@10"),
            Err(HorizonsError::MissingEpochs("Ceres".into()))
        );
        assert_eq!(
            query.ephemeris_input(&EphemerisSettings::default()),
            Err(HorizonsError::MissingEpochs("Ceres".into()))
        );
    }

    #[test]
    fn test_invalid_epochs() {
        let mut query = HorizonsQuery::new("Ceres");
        assert!(matches!(
            query.set_epoch_range("2016-02-23", " ", "1h"),
            Err(HorizonsError::InvalidEpochs(_))
        ));
        assert!(matches!(
            query.set_discrete_epochs(Vec::<f64>::new()),
            Err(HorizonsError::InvalidEpochs(_))
        ));
        assert_eq!(query.epochs(), None);
    }

    #[test]
    fn test_discrete_epochs_input() {
        let mut query = HorizonsQuery::new("900191");
        query.set_discrete_epochs([2451544.5, 2451545.0]).unwrap();
        let input = query.elements_input("500@10").unwrap();
        assert!(input.contains("COMMAND='900191;'"));
        assert!(input.contains("TABLE_TYPE='ELEMENTS'"));
        assert!(input.contains("TLIST='2451544.5' '2451545'\n"));
    }

    #[test]
    fn test_ephemeris_input_options() {
        let mut query = HorizonsQuery::new("9P").closest_apparition(true);
        query.set_discrete_epochs(["2000-01-01"]).unwrap();

        let settings = EphemerisSettings::new("G37")
            .airmass_lessthan(2.5)
            .solar_elongation(60.0, 180.0)
            .skip_daylight(true);
        let input = query.ephemeris_input(&settings).unwrap();
        assert!(input.contains("COMMAND='DES=9P;CAP;'"));
        assert!(input.contains("CENTER='G37'"));
        assert!(input.contains("SOLAR_ELONG='60,180'"));
        assert!(input.contains("AIRMASS='2.5'"));
        assert!(input.contains("SKIP_DAYLT='YES'"));

        let input = query
            .ephemeris_input(&EphemerisSettings::new("G37"))
            .unwrap();
        assert!(!input.contains("AIRMASS"));
        assert!(input.contains("SKIP_DAYLT='NO'"));
    }

    #[test]
    fn test_major_body_command() {
        let query = HorizonsQuery::new("501").smallbody(false);
        assert_eq!(query.command(), "501");
    }

    #[test]
    fn test_display() {
        let mut query = HorizonsQuery::new("Ceres");
        assert_eq!(query.to_string(), "targetname: Ceres");
        query
            .set_epoch_range("2016-02-23 00:00", "2016-02-24 00:00", "1h")
            .unwrap();
        assert_eq!(
            query.to_string(),
            "targetname: Ceres\nepoch range from 2016-02-23 00:00 to 2016-02-24 00:00 in steps of 1h"
        );
    }
}
