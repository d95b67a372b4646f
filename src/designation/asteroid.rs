//! # Asteroid designations
//!
//! Parses asteroid identifiers such as `(2) Pallas`, `2001 AT1`, `(228195) 6675 P-L`,
//! `4015 Wilson-Harrington (1979 VA)` and the MPC packed forms `J95X00A`, `K07Tf8A`,
//! `PLS2040` or `G3693`.
//!
//! ## Overview
//!
//! The input is normalised once (parentheses become spaces, whitespace is collapsed) and
//! then handed through a fixed sequence of rules. Every rule that matches **consumes** the
//! text it used, so later rules never see it again: the `2001` of `2001 AT1` is not also
//! read as a number, and the `P-L` of a survey designation is not read as a name.
//!
//! | order | rule                  | field         |
//! |-------|-----------------------|---------------|
//! | 0     | comet fragment (drop) | none          |
//! | 1     | survey                | `designation` |
//! | 2     | provisional           | `designation` |
//! | 3     | packed survey         | `designation` |
//! | 4     | packed provisional    | `designation` |
//! | 5     | packed number         | `number`      |
//! | 6     | number                | `number`      |
//! | 7     | name                  | `name`        |
//!
//! A field set by an earlier rule is never overwritten by a later one.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::packed::{unpack_number, unpack_provisional, unpack_survey};

#[allow(clippy::expect_used)]
static COMET_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[12][0-9]{0,3} [A-Z][0-9]*\b").expect("comet fragment regex is valid")
});

#[allow(clippy::expect_used)]
static SURVEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[1-9][0-9]{3} (?:P-L|T-[123])\b").expect("survey designation regex is valid")
});

#[allow(clippy::expect_used)]
static PROVISIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[12][0-9]{1,3} [A-Z]{1,2}[0-9]{0,3}(?:-[0-9A-Z]{1,2})?\b")
        .expect("provisional designation regex is valid")
});

#[allow(clippy::expect_used)]
static PACKED_SURVEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:PLS|T[123]S)[0-9]{4}\b").expect("packed survey regex is valid")
});

#[allow(clippy::expect_used)]
static PACKED_PROVISIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[0-9A-Za-z][0-9]{2}[A-Z][0-9A-Za-z][0-9][A-Z]\b")
        .expect("packed provisional regex is valid")
});

#[allow(clippy::expect_used)]
static PACKED_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z][0-9]{4}\b").expect("packed number regex is valid"));

#[allow(clippy::expect_used)]
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]+\b").expect("number regex is valid"));

#[allow(clippy::expect_used)]
static NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z][A-Za-z0-9'.\-]*(?: [A-Za-z][A-Za-z0-9'.\-]*)*")
        .expect("asteroid name regex is valid")
});

/// Components extracted from an asteroid identifier.
///
/// Packed forms are stored unpacked. Fields that cannot be derived stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AsteroidDesignation {
    /// Provisional or survey designation, e.g. `1979 VA`, `6675 P-L`.
    pub designation: Option<String>,
    /// Permanent MPC number.
    pub number: Option<u32>,
    /// Name, e.g. `Wilson-Harrington`.
    pub name: Option<String>,
}

impl AsteroidDesignation {
    /// `true` when no field could be derived.
    pub fn is_empty(&self) -> bool {
        self.designation.is_none() && self.number.is_none() && self.name.is_none()
    }
}

/// Replace `(` and `)` with spaces and collapse runs of whitespace.
pub fn normalize(input: &str) -> String {
    input
        .replace(['(', ')'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove the first match of `pattern` from `text` and return it.
fn consume(text: &mut String, pattern: &Regex) -> Option<String> {
    let found = pattern.find(text)?;
    let range = found.range();
    let matched = found.as_str().to_string();
    text.replace_range(range, " ");
    Some(matched)
}

/// Drop comet-style designations (`1994 N2`) that would otherwise pass for asteroid ones.
///
/// A match directly followed by `-` belongs to a longer token (`1234 P-L`) and is kept.
pub fn strip_comet_fragments(text: &str) -> String {
    let mut kept = String::with_capacity(text.len());
    let mut last = 0;
    for found in COMET_FRAGMENT.find_iter(text) {
        if text[found.end()..].starts_with('-') {
            continue;
        }
        kept.push_str(&text[last..found.start()]);
        kept.push(' ');
        last = found.end();
    }
    kept.push_str(&text[last..]);
    kept
}

/// `6675 P-L`, `3138 T-1`.
pub fn survey(text: &mut String) -> Option<String> {
    consume(text, &SURVEY)
}

/// `2001 AT1`, `1979 VA`, `2007 TA418`.
pub fn provisional(text: &mut String) -> Option<String> {
    consume(text, &PROVISIONAL)
}

/// `PLS2040`, `T1S3138`.
pub fn packed_survey(text: &mut String) -> Option<String> {
    consume(text, &PACKED_SURVEY).and_then(|packed| unpack_survey(&packed))
}

/// `J95X00A`, `K07Tf8A`.
pub fn packed_provisional(text: &mut String) -> Option<String> {
    consume(text, &PACKED_PROVISIONAL).and_then(|packed| unpack_provisional(&packed))
}

/// `G3693`.
pub fn packed_number(text: &mut String) -> Option<u32> {
    consume(text, &PACKED_NUMBER).and_then(|packed| unpack_number(&packed))
}

/// First whole-word positive integer.
pub fn number(text: &str) -> Option<u32> {
    NUMBER
        .find_iter(text)
        .filter_map(|found| found.as_str().parse::<u32>().ok())
        .find(|&n| n > 0)
}

/// First run of words starting with a letter that contains an uppercase letter and is
/// longer than one character.
pub fn name(text: &str) -> Option<String> {
    NAME.find_iter(text)
        .map(|found| found.as_str().trim())
        .find(|candidate| {
            candidate.chars().count() > 1 && candidate.chars().any(|c| c.is_ascii_uppercase())
        })
        .map(str::to_string)
}

/// Apply the asteroid grammar to `input`.
///
/// Arguments
/// -----------------
/// * `input` – free-form identifier (`"(228195) 6675 P-L"`).
///
/// Return
/// ----------
/// * The extracted components; every field is `None` when nothing matched.
#[tracing::instrument(level = "trace", skip(input), fields(input_len = input.len()))]
pub fn parse_asteroid(input: &str) -> AsteroidDesignation {
    let mut text = strip_comet_fragments(&normalize(input));
    let mut asteroid = AsteroidDesignation::default();

    asteroid.designation = survey(&mut text)
        .or_else(|| provisional(&mut text))
        .or_else(|| packed_survey(&mut text))
        .or_else(|| packed_provisional(&mut text));

    asteroid.number = packed_number(&mut text).or_else(|| number(&text));
    asteroid.name = name(&text);

    trace!(
        designation = ?asteroid.designation,
        number = ?asteroid.number,
        name = ?asteroid.name,
        "parsed asteroid identifier"
    );
    asteroid
}

#[cfg(test)]
mod asteroid_test {
    use super::*;

    fn triple(input: &str) -> (Option<String>, Option<u32>, Option<String>) {
        let a = parse_asteroid(input);
        (a.designation, a.number, a.name)
    }

    fn s(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  (2)   Pallas "), "2 Pallas");
        assert_eq!(normalize("4015 Wilson-Harrington (1979 VA)"), "4015 Wilson-Harrington 1979 VA");
    }

    #[test]
    fn test_strip_comet_fragments() {
        assert_eq!(strip_comet_fragments("1994 N2").trim(), "");
        assert_eq!(strip_comet_fragments("1234 P-L"), "1234 P-L");
        assert_eq!(strip_comet_fragments("2001 AT1"), "2001 AT1");
    }

    #[test]
    fn test_individual_rules() {
        let mut text = String::from("228195 6675 P-L");
        assert_eq!(survey(&mut text), s("6675 P-L"));
        assert_eq!(number(&text), Some(228195));

        let mut text = String::from("PLS2040");
        assert_eq!(packed_survey(&mut text), s("2040 P-L"));

        let mut text = String::from("K07Tf8A");
        assert_eq!(packed_provisional(&mut text), s("2007 TA418"));
        assert_eq!(text.trim(), "");

        assert_eq!(name("4015 Wilson-Harrington"), s("Wilson-Harrington"));
        assert_eq!(name("1714 Sy"), s("Sy"));
        assert_eq!(name("2 x"), None);
        assert_eq!(number("0 Pallas"), None);
    }

    #[test]
    fn test_asteroid_table() {
        assert_eq!(triple("1"), (None, Some(1), None));
        assert_eq!(triple("(2) Pallas"), (None, Some(2), s("Pallas")));
        assert_eq!(triple("(2001) Einstein"), (None, Some(2001), s("Einstein")));
        assert_eq!(triple("2001 AT1"), (s("2001 AT1"), None, None));
        assert_eq!(triple("(1714) Sy"), (None, Some(1714), s("Sy")));
        assert_eq!(triple("1714 SY"), (s("1714 SY"), None, None));
        assert_eq!(triple("2014 MU69"), (s("2014 MU69"), None, None));
        assert_eq!(triple("(228195) 6675 P-L"), (s("6675 P-L"), Some(228195), None));
        assert_eq!(
            triple("4015 Wilson-Harrington (1979 VA)"),
            (s("1979 VA"), Some(4015), s("Wilson-Harrington"))
        );
        assert_eq!(triple("J95X00A"), (s("1995 XA"), None, None));
        assert_eq!(triple("K07Tf8A"), (s("2007 TA418"), None, None));
        assert_eq!(triple("G3693"), (None, Some(163693), None));
    }

    #[test]
    fn test_survey_forms() {
        assert_eq!(triple("T1S3138"), (s("3138 T-1"), None, None));
        assert_eq!(triple("2040 P-L"), (s("2040 P-L"), None, None));
    }

    #[test]
    fn test_nothing_derivable() {
        assert!(parse_asteroid("").is_empty());
        assert!(parse_asteroid("x").is_empty());
        assert!(parse_asteroid("1994 N2").is_empty());
    }
}
