//! # Comet designations
//!
//! Parses the textual forms under which comets are known:
//!
//! * periodic numbers with optional fragment (`1P`, `73P-C`, `73P-BB`),
//! * orbit-class prefixes followed by a provisional designation (`C/2013 US10`,
//!   `P/1994 N2`, `C/-146 P1`, `C/2001 A2-A`),
//! * 8-character MPC packed comets (`PJ94N020`),
//! * a trailing name, optionally parenthesised (`9P/Tempel 1`, `C/2015 V2 (Johnson)`).
//!
//! ## Overview
//!
//! The grammar is a fixed sequence of named sub-rules. Each sub-rule contributes at most one
//! field of [`CometDesignation`] and works on whatever the previous rules left behind:
//!
//! 1. [`numbered_prefix`]
//! 2. [`class_prefix`] (only when 1. did not match)
//! 3. [`provisional`] (only after a prefix)
//! 4. [`packed`] (only when nothing above matched)
//! 5. [`trailing_name`]

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::packed::unpack_comet;

#[allow(clippy::expect_used)]
static NUMBERED_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([1-9][0-9]*[PDCXAI](?:-[A-Z]{1,2})?)(?:/|\s+|$)")
        .expect("numbered comet prefix regex is valid")
});

#[allow(clippy::expect_used)]
static CLASS_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([PDCXAI])/").expect("comet class prefix regex is valid"));

#[allow(clippy::expect_used)]
static PROVISIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-?[0-9]{3,4})[ _]([A-Z]{1,2}[0-9]{1,3}(?:-[0-9A-Z]{1,2})?)(?:\s+|$)")
        .expect("comet provisional designation regex is valid")
});

#[allow(clippy::expect_used)]
static NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9 '.\-]+$").expect("comet name regex is valid")
});

/// Components extracted from a comet identifier.
///
/// At least one field is set whenever [`parse_comet`] returns `Some`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CometDesignation {
    /// Provisional designation without class prefix, e.g. `2015 V2`.
    pub designation: Option<String>,
    /// Periodic number with class and fragment (`73P-C`), or the bare class letter (`C`).
    pub prefix: Option<String>,
    /// Discoverer name, e.g. `Tempel 1`.
    pub name: Option<String>,
}

impl CometDesignation {
    /// `true` when a prefix or a designation was found; a bare name does not count.
    pub fn is_designated(&self) -> bool {
        self.prefix.is_some() || self.designation.is_some()
    }
}

/// `1P`, `73P-C/...`, `322P`. Returns the prefix and the remaining text.
pub fn numbered_prefix(input: &str) -> Option<(String, &str)> {
    let caps = NUMBERED_PREFIX.captures(input)?;
    let whole = caps.get(0)?;
    Some((caps[1].to_string(), &input[whole.end()..]))
}

/// `C/`, `P/`, ... Returns the class letter and the remaining text.
pub fn class_prefix(input: &str) -> Option<(String, &str)> {
    let caps = CLASS_PREFIX.captures(input)?;
    let whole = caps.get(0)?;
    Some((caps[1].to_string(), &input[whole.end()..]))
}

/// `1994 N2`, `-146 P1`, `2001 A2-A` at the start of `input`.
///
/// An underscore separator is accepted and normalised to a space.
pub fn provisional(input: &str) -> Option<(String, &str)> {
    let caps = PROVISIONAL.captures(input)?;
    let whole = caps.get(0)?;
    Some((
        format!("{} {}", &caps[1], &caps[2]),
        &input[whole.end()..],
    ))
}

/// 8-character packed comet covering the whole input.
pub fn packed(input: &str) -> Option<(String, String)> {
    unpack_comet(input).map(|(class, designation)| (class.to_string(), designation))
}

/// Name left over after the designation rules, without one enclosing pair of parentheses.
pub fn trailing_name(remainder: &str) -> Option<String> {
    let mut name = remainder.trim();
    if let Some(inner) = name.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        name = inner.trim();
    }
    NAME.is_match(name).then(|| name.to_string())
}

/// Apply the comet grammar to `input`.
///
/// Arguments
/// -----------------
/// * `input` – free-form identifier (`"P/1994 N2 (McNaught-Hartley)"`).
///
/// Return
/// ----------
/// * `Some(CometDesignation)` when any field could be extracted, `None` otherwise.
///
/// See also
/// ------------
/// * [`crate::target::classify`] – decides whether this grammar applies at all.
#[tracing::instrument(level = "trace", skip(input), fields(input_len = input.len()))]
pub fn parse_comet(input: &str) -> Option<CometDesignation> {
    let input = input.trim();
    let mut comet = CometDesignation::default();

    let mut remainder = input;
    if let Some((prefix, rest)) = numbered_prefix(input).or_else(|| class_prefix(input)) {
        trace!(prefix = %prefix, "found comet prefix");
        comet.prefix = Some(prefix);
        remainder = rest.trim_start();

        if let Some((designation, rest)) = provisional(remainder) {
            trace!(designation = %designation, "found comet provisional designation");
            comet.designation = Some(designation);
            remainder = rest;
        }
    } else if let Some((class, designation)) = packed(input) {
        trace!(designation = %designation, "unpacked comet designation");
        comet.prefix = Some(class);
        comet.designation = Some(designation);
        remainder = "";
    }

    comet.name = trailing_name(remainder);

    if comet.prefix.is_none() && comet.designation.is_none() && comet.name.is_none() {
        return None;
    }
    Some(comet)
}

#[cfg(test)]
mod comet_test {
    use super::*;

    fn triple(input: &str) -> (Option<String>, Option<String>, Option<String>) {
        let c = parse_comet(input).unwrap_or_default();
        (c.designation, c.prefix, c.name)
    }

    fn s(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_numbered_prefix() {
        assert_eq!(numbered_prefix("1P/Halley"), Some(("1P".into(), "Halley")));
        assert_eq!(numbered_prefix("73P-BB"), Some(("73P-BB".into(), "")));
        assert_eq!(numbered_prefix("322P"), Some(("322P".into(), "")));
        assert_eq!(numbered_prefix("2001 AT1"), None);
        assert_eq!(numbered_prefix("12"), None);
    }

    #[test]
    fn test_class_prefix() {
        assert_eq!(class_prefix("C/2013 US10"), Some(("C".into(), "2013 US10")));
        assert_eq!(class_prefix("Ceres"), None);
    }

    #[test]
    fn test_provisional() {
        assert_eq!(provisional("-146 P1"), Some(("-146 P1".into(), "")));
        assert_eq!(provisional("2001_A2-A"), Some(("2001 A2-A".into(), "")));
        assert_eq!(
            provisional("1994 N2 (McNaught-Hartley)"),
            Some(("1994 N2".into(), "(McNaught-Hartley)"))
        );
        assert_eq!(provisional("Tempel 1"), None);
    }

    #[test]
    fn test_trailing_name() {
        assert_eq!(trailing_name(" (LINEAR) "), s("LINEAR"));
        assert_eq!(trailing_name("Tempel 1"), s("Tempel 1"));
        assert_eq!(trailing_name("C"), None);
        assert_eq!(trailing_name("3 C"), None);
        assert_eq!(trailing_name(""), None);
    }

    #[test]
    fn test_numbered_comets() {
        assert_eq!(triple("1P/Halley"), (None, s("1P"), s("Halley")));
        assert_eq!(triple("3D/Biela"), (None, s("3D"), s("Biela")));
        assert_eq!(triple("9P/Tempel 1"), (None, s("9P"), s("Tempel 1")));
        assert_eq!(
            triple("73P/Schwassmann Wachmann 3 C"),
            (None, s("73P"), s("Schwassmann Wachmann 3 C"))
        );
        assert_eq!(
            triple("73P-C/Schwassmann Wachmann 3 C"),
            (None, s("73P-C"), s("Schwassmann Wachmann 3 C"))
        );
        assert_eq!(triple("73P-BB"), (None, s("73P-BB"), None));
        assert_eq!(triple("322P"), (None, s("322P"), None));
    }

    #[test]
    fn test_provisional_comets() {
        assert_eq!(triple("X/1106 C1"), (s("1106 C1"), s("X"), None));
        assert_eq!(
            triple("P/1994 N2 (McNaught-Hartley)"),
            (s("1994 N2"), s("P"), s("McNaught-Hartley"))
        );
        assert_eq!(
            triple("P/2001 YX127 (LINEAR)"),
            (s("2001 YX127"), s("P"), s("LINEAR"))
        );
        assert_eq!(triple("C/-146 P1"), (s("-146 P1"), s("C"), None));
        assert_eq!(
            triple("C/2001 A2-A (LINEAR)"),
            (s("2001 A2-A"), s("C"), s("LINEAR"))
        );
        assert_eq!(triple("C/2013 US10"), (s("2013 US10"), s("C"), None));
        assert_eq!(
            triple("C/2015 V2 (Johnson)"),
            (s("2015 V2"), s("C"), s("Johnson"))
        );
    }

    #[test]
    fn test_packed_comets() {
        assert_eq!(triple("PJ94N020"), (s("1994 N2"), s("P"), None));
        assert_eq!(triple("CK13U10S"), (s("2013 US10"), s("C"), None));
        assert_eq!(triple("PK01A02a"), (s("2001 A2-A"), s("P"), None));
    }

    #[test]
    fn test_name_only_and_nothing() {
        let halley = parse_comet("Halley").unwrap();
        assert!(!halley.is_designated());
        assert_eq!(halley.name, s("Halley"));

        assert_eq!(parse_comet("2001 AT1"), None);
        assert_eq!(parse_comet(""), None);
    }
}
