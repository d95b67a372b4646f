//! # MPC packed designations
//!
//! Decoding (and encoding) of the fixed-width **Minor Planet Center packed forms**:
//!
//! | packed      | unpacked       | kind                               |
//! |-------------|----------------|------------------------------------|
//! | `J95X00A`   | `1995 XA`      | 7-char provisional designation     |
//! | `K07Tf8A`   | `2007 TA418`   | 7-char provisional, cycle ≥ 100    |
//! | `G3693`     | `163693`       | 5-char permanent number            |
//! | `PLS2040`   | `2040 P-L`     | Palomar-Leiden survey              |
//! | `T1S3138`   | `3138 T-1`     | Trojan surveys (`T1S`/`T2S`/`T3S`) |
//! | `PJ94N020`  | `P/1994 N2`    | 8-char comet designation           |
//!
//! Every packed form encodes its leading "century" (or ten-thousands) digit and its cycle
//! count with the same 62-symbol alphabet, decoded by [`packed_char_value`] and encoded by
//! [`packed_char`]. Nothing else in the crate maps packed characters to integers.
//!
//! ## See also
//! ------------
//! * [`crate::designation::asteroid`] – uses the provisional, number and survey decoders.
//! * [`crate::designation::comet`] – uses [`unpack_comet`].

/// Value of one packed-alphabet character.
///
/// Digits map to `0..=9`, uppercase letters to `10..=35` and lowercase letters to
/// `36..=61`; anything else is rejected.
pub fn packed_char_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + 10),
        'a'..='z' => Some(c as u32 - 'a' as u32 + 36),
        _ => None,
    }
}

/// Inverse of [`packed_char_value`].
pub fn packed_char(value: u32) -> Option<char> {
    match value {
        0..=9 => char::from_digit(value, 10),
        10..=35 => char::from_u32('A' as u32 + value - 10),
        36..=61 => char::from_u32('a' as u32 + value - 36),
        _ => None,
    }
}

fn digit(c: char) -> Option<u32> {
    c.to_digit(10)
}

fn fixed_chars<const N: usize>(packed: &str) -> Option<[char; N]> {
    let chars: Vec<char> = packed.chars().collect();
    chars.try_into().ok()
}

/// Format `year half-month [order] [cycle]`, omitting a zero cycle.
fn provisional_string(year: u32, half_month: char, order: Option<char>, cycle: u32) -> String {
    let mut designation = format!("{year} {half_month}");
    if let Some(order) = order {
        designation.push(order);
    }
    if cycle > 0 {
        designation.push_str(&cycle.to_string());
    }
    designation
}

/// Unpack a 7-character provisional designation.
///
/// Layout: `<century><yy><half-month><cycle char><cycle digit><order letter>`. The
/// year is `value(century) * 100 + yy` and the cycle count is
/// `value(cycle char) * 10 + cycle digit`.
///
/// Arguments
/// -----------------
/// * `packed` – exactly seven characters, e.g. `"K07Tf8A"`.
///
/// Return
/// ----------
/// * The unpacked designation (`"2007 TA418"`), or `None` if `packed` does not have the
///   7-character layout.
pub fn unpack_provisional(packed: &str) -> Option<String> {
    let [century, y1, y2, half_month, cycle_hi, cycle_lo, order] = fixed_chars::<7>(packed)?;
    if !half_month.is_ascii_uppercase() || !order.is_ascii_uppercase() {
        return None;
    }

    let year = packed_char_value(century)? * 100 + digit(y1)? * 10 + digit(y2)?;
    let cycle = packed_char_value(cycle_hi)? * 10 + digit(cycle_lo)?;

    Some(provisional_string(year, half_month, Some(order), cycle))
}

/// Pack an unpacked provisional designation (`"2007 TA418"` → `"K07Tf8A"`).
///
/// Returns `None` for anything outside the representable range (year beyond the
/// alphabet, cycle above 619, missing half-month or order letter).
pub fn pack_provisional(designation: &str) -> Option<String> {
    let (year, rest) = designation.trim().split_once(' ')?;
    if year.is_empty() || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year: u32 = year.parse().ok()?;

    let mut rest = rest.chars();
    let half_month = rest.next().filter(char::is_ascii_uppercase)?;
    let order = rest.next().filter(char::is_ascii_uppercase)?;
    let cycle: String = rest.collect();
    let cycle: u32 = if cycle.is_empty() {
        0
    } else if cycle.chars().all(|c| c.is_ascii_digit()) {
        cycle.parse().ok()?
    } else {
        return None;
    };

    Some(format!(
        "{}{:02}{}{}{}{}",
        packed_char(year / 100)?,
        year % 100,
        half_month,
        packed_char(cycle / 10)?,
        cycle % 10,
        order
    ))
}

/// Unpack a 5-character permanent number (`"G3693"` → `163693`).
pub fn unpack_number(packed: &str) -> Option<u32> {
    let [lead, rest @ ..] = fixed_chars::<5>(packed)?;
    if !lead.is_ascii_alphabetic() {
        return None;
    }
    let low = rest
        .iter()
        .try_fold(0u32, |acc, &c| digit(c).map(|d| acc * 10 + d))?;
    Some(packed_char_value(lead)? * 10_000 + low)
}

/// Pack a permanent number; only numbers from 100000 up have a packed form.
pub fn pack_number(number: u32) -> Option<String> {
    if number < 100_000 {
        return None;
    }
    Some(format!("{}{:04}", packed_char(number / 10_000)?, number % 10_000))
}

/// Unpack the Palomar-Leiden and Trojan survey forms (`"PLS2040"` → `"2040 P-L"`).
///
/// These are a fixed prefix rewrite, not the general provisional algorithm.
pub fn unpack_survey(packed: &str) -> Option<String> {
    if packed.len() != 7 || !packed.is_ascii() {
        return None;
    }
    let (prefix, number) = packed.split_at(3);
    if !number.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let survey = match prefix {
        "PLS" => "P-L",
        "T1S" => "T-1",
        "T2S" => "T-2",
        "T3S" => "T-3",
        _ => return None,
    };
    Some(format!("{number} {survey}"))
}

/// Unpack an 8-character comet designation into its orbit class and designation.
///
/// Layout: `<class><century><yy><half-month><cycle char><cycle digit><last>`, where
/// `last` is `0` (no fragment), a lowercase fragment letter (`-A`), or an uppercase
/// order letter for comets carrying an asteroid-style designation.
///
/// ```rust
/// use horizons_query::designation::packed::unpack_comet;
///
/// assert_eq!(unpack_comet("PJ94N020"), Some(('P', "1994 N2".to_string())));
/// assert_eq!(unpack_comet("PK01A02a"), Some(('P', "2001 A2-A".to_string())));
/// assert_eq!(unpack_comet("CK13U10S"), Some(('C', "2013 US10".to_string())));
/// ```
pub fn unpack_comet(packed: &str) -> Option<(char, String)> {
    let [class, century, y1, y2, half_month, cycle_hi, cycle_lo, last] = fixed_chars::<8>(packed)?;
    if !"PDCXAI".contains(class) || !half_month.is_ascii_uppercase() {
        return None;
    }

    let year = packed_char_value(century)? * 100 + digit(y1)? * 10 + digit(y2)?;
    let number = packed_char_value(cycle_hi)? * 10 + digit(cycle_lo)?;

    let designation = match last {
        '0' => format!("{year} {half_month}{number}"),
        'a'..='z' => format!(
            "{year} {half_month}{number}-{}",
            last.to_ascii_uppercase()
        ),
        'A'..='Z' => provisional_string(year, half_month, Some(last), number),
        _ => return None,
    };
    Some((class, designation))
}
