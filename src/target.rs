//! # Target identifiers
//!
//! Turns a free-form target string plus the caller's body-kind hints into one canonical
//! [`TargetIdentifier`], and renders that identifier as a Horizons `COMMAND` value.
//!
//! ## Overview
//!
//! Classification is pure and total: every input yields exactly one variant.
//!
//! ```text
//! smallbody = false ─────────────────────────────▶ OpaqueName { exact: true }
//! 6 digits starting with 9 ──────────────────────▶ OrbitRecord
//! comet hint, or comet prefix/designation found ─▶ CometDesignation
//! asteroid hint, or any asteroid field found ────▶ AsteroidDesignation
//! anything else ─────────────────────────────────▶ OpaqueName { exact: false }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use horizons_query::target::{classify, BodyHints, TargetIdentifier};
//!
//! let target = classify("C/2015 V2 (Johnson)", BodyHints::default());
//! assert!(matches!(target, TargetIdentifier::CometDesignation(_)));
//! assert_eq!(target.horizons_command(false), "DES=2015 V2;");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::designation::{parse_asteroid, parse_comet, AsteroidDesignation, CometDesignation};

/// Canonical form of a query target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetIdentifier {
    /// JPL orbit-record number (six digits, leading `9`).
    OrbitRecord { record: u32 },
    /// Comet, with at least one component present.
    CometDesignation(CometDesignation),
    /// Asteroid; all components may be absent when the caller forced this kind.
    AsteroidDesignation(AsteroidDesignation),
    /// Anything else. `exact` is set for major bodies and spacecraft, whose string is
    /// forwarded to Horizons untouched.
    OpaqueName { raw: String, exact: bool },
}

/// What the caller knows about the kind of body behind a target string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyHints {
    /// `false` for planets, satellites and spacecraft.
    pub smallbody: bool,
    /// Force the comet grammar.
    pub comet: bool,
    /// Force the asteroid grammar.
    pub asteroid: bool,
}

impl Default for BodyHints {
    fn default() -> Self {
        BodyHints {
            smallbody: true,
            comet: false,
            asteroid: false,
        }
    }
}

/// `true` for six ASCII digits starting with `9` (surrounding whitespace ignored).
pub fn is_orbit_record(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.len() == 6
        && trimmed.starts_with('9')
        && trimmed.bytes().all(|b| b.is_ascii_digit())
}

/// Classify a raw target string.
///
/// Arguments
/// -----------------
/// * `raw` – target string as given by the user.
/// * `hints` – body kind hints; see [`BodyHints`].
///
/// Return
/// ----------
/// * The single [`TargetIdentifier`] describing `raw`.
#[tracing::instrument(skip(raw), fields(raw = %raw))]
pub fn classify(raw: &str, hints: BodyHints) -> TargetIdentifier {
    if !hints.smallbody {
        return TargetIdentifier::OpaqueName {
            raw: raw.to_string(),
            exact: true,
        };
    }

    if is_orbit_record(raw) {
        if let Ok(record) = raw.trim().parse() {
            return TargetIdentifier::OrbitRecord { record };
        }
    }

    let comet = parse_comet(raw);
    let comet_applies = hints.comet
        || (!hints.asteroid && comet.as_ref().is_some_and(CometDesignation::is_designated));
    if comet_applies {
        if let Some(comet) = comet {
            debug!(?comet, "classified as comet");
            return TargetIdentifier::CometDesignation(comet);
        }
    }

    let asteroid = parse_asteroid(raw);
    if hints.asteroid || !asteroid.is_empty() {
        debug!(?asteroid, "classified as asteroid");
        return TargetIdentifier::AsteroidDesignation(asteroid);
    }

    debug!("no designation found, target kept opaque");
    TargetIdentifier::OpaqueName {
        raw: raw.to_string(),
        exact: false,
    }
}

impl TargetIdentifier {
    /// Horizons `COMMAND` value for this target.
    ///
    /// `closest_apparition` appends `CAP` to designated comets so that Horizons picks the
    /// orbit solution closest to the present instead of reporting several records.
    pub fn horizons_command(&self, closest_apparition: bool) -> String {
        match self {
            TargetIdentifier::OpaqueName { raw, exact: true } => raw.clone(),
            TargetIdentifier::OpaqueName { raw, exact: false } => format!("{raw};"),
            TargetIdentifier::OrbitRecord { record } => format!("{record};"),
            TargetIdentifier::CometDesignation(comet) => {
                match comet.designation.as_ref().or(comet.prefix.as_ref()) {
                    Some(des) if closest_apparition => format!("DES={des};CAP;"),
                    Some(des) => format!("DES={des};"),
                    None => format!("{};", comet.name.as_deref().unwrap_or_default()),
                }
            }
            TargetIdentifier::AsteroidDesignation(asteroid) => {
                match (&asteroid.designation, asteroid.number, &asteroid.name) {
                    (Some(des), _, _) => format!("DES={des};"),
                    (None, Some(number), _) => format!("{number};"),
                    (None, None, Some(name)) => format!("{name};"),
                    (None, None, None) => ";".to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod target_test {
    use super::*;

    fn hints(smallbody: bool, comet: bool, asteroid: bool) -> BodyHints {
        BodyHints {
            smallbody,
            comet,
            asteroid,
        }
    }

    #[test]
    fn test_orbit_record() {
        assert!(is_orbit_record("900191"));
        assert!(is_orbit_record(" 900191 "));
        assert!(!is_orbit_record("800191"));
        assert!(!is_orbit_record("9001911"));
        assert!(!is_orbit_record("90019a"));

        assert_eq!(
            classify("900191", BodyHints::default()),
            TargetIdentifier::OrbitRecord { record: 900191 }
        );
    }

    #[test]
    fn test_major_body_is_exact() {
        let target = classify("Io", hints(false, false, false));
        assert_eq!(
            target,
            TargetIdentifier::OpaqueName {
                raw: "Io".into(),
                exact: true
            }
        );
        assert_eq!(target.horizons_command(false), "Io");
    }

    #[test]
    fn test_comet_and_asteroid_routes() {
        assert!(matches!(
            classify("73P-C/Schwassmann Wachmann 3 C", BodyHints::default()),
            TargetIdentifier::CometDesignation(_)
        ));
        assert!(matches!(
            classify("(2) Pallas", BodyHints::default()),
            TargetIdentifier::AsteroidDesignation(_)
        ));

        // a name alone does not make a comet
        assert!(matches!(
            classify("Halley", BodyHints::default()),
            TargetIdentifier::AsteroidDesignation(_)
        ));
        assert!(matches!(
            classify("Halley", hints(true, true, false)),
            TargetIdentifier::CometDesignation(_)
        ));

        // asteroid hint overrides the comet grammar
        assert!(matches!(
            classify("1P/Halley", hints(true, false, true)),
            TargetIdentifier::AsteroidDesignation(_)
        ));
    }

    #[test]
    fn test_forced_empty_asteroid() {
        assert_eq!(
            classify("x", hints(true, false, true)),
            TargetIdentifier::AsteroidDesignation(AsteroidDesignation::default())
        );
        assert_eq!(
            classify("x", BodyHints::default()),
            TargetIdentifier::OpaqueName {
                raw: "x".into(),
                exact: false
            }
        );
    }

    #[test]
    fn test_commands() {
        let default = BodyHints::default();
        assert_eq!(classify("900191", default).horizons_command(false), "900191;");
        assert_eq!(classify("9P", default).horizons_command(true), "DES=9P;CAP;");
        assert_eq!(classify("9P", default).horizons_command(false), "DES=9P;");
        assert_eq!(
            classify("Halley", hints(true, true, false)).horizons_command(true),
            "Halley;"
        );
        assert_eq!(classify("2001 AT1", default).horizons_command(false), "DES=2001 AT1;");
        assert_eq!(classify("(2) Pallas", default).horizons_command(false), "2;");
        assert_eq!(classify("Ceres", default).horizons_command(false), "Ceres;");
        assert_eq!(classify("x", default).horizons_command(false), "x;");
    }
}
