//! Public column names of parsed tables and their meaning.

/// Columns an observer (ephemeris) table can carry, in discovery order.
pub const EPHEMERIS_FIELDS: &[(&str, &str)] = &[
    ("datetime", "epoch date and time, UT (text, YYYY-Mon-DD HH:MM:SS)"),
    ("datetime_jd", "epoch as Julian Date, UT"),
    ("solar_presence", "presence of the Sun at the observer (label)"),
    ("lunar_presence", "presence of the Moon at the observer (label)"),
    ("RA", "target right ascension (deg, ICRF)"),
    ("DEC", "target declination (deg, ICRF)"),
    ("RA_rate", "RA rate including cos(DEC) (arcsec/s)"),
    ("DEC_rate", "DEC rate (arcsec/s)"),
    ("AZ", "azimuth, measured East (90) of North (0) (deg)"),
    ("EL", "elevation above the horizon (deg)"),
    ("airmass", "optical airmass"),
    ("magextinct", "V magnitude extinction due to airmass (mag)"),
    ("V", "V magnitude; total magnitude for comets (mag)"),
    ("illumination", "illuminated fraction of the disk (%)"),
    ("EclLon", "heliocentric ecliptic longitude (deg)"),
    ("EclLat", "heliocentric ecliptic latitude (deg)"),
    ("ObsEclLon", "observer-centric ecliptic longitude (deg)"),
    ("ObsEclLat", "observer-centric ecliptic latitude (deg)"),
    ("r", "heliocentric distance (au)"),
    ("r_rate", "heliocentric radial rate (km/s)"),
    ("delta", "distance from the observer (au)"),
    ("delta_rate", "observer-centric radial rate (km/s)"),
    ("lighttime", "one-way light time (s)"),
    ("elong", "solar elongation (deg)"),
    ("elongFlag", "apparent position relative to the Sun, leading or trailing (label)"),
    ("alpha", "solar phase angle (deg)"),
    ("sunTargetPA", "position angle of the Sun to target vector, East of North (deg)"),
    ("velocityPA", "position angle of the negative velocity vector, East of North (deg)"),
    ("GlxLon", "galactic longitude (deg)"),
    ("GlxLat", "galactic latitude (deg)"),
    ("RA_3sigma", "3-sigma positional uncertainty in RA (arcsec)"),
    ("DEC_3sigma", "3-sigma positional uncertainty in DEC (arcsec)"),
    ("targetname", "resolved target name as reported by Horizons"),
    ("H", "absolute magnitude in V (mag)"),
    ("G", "photometric slope parameter"),
];

/// Columns an osculating elements table can carry, in discovery order.
pub const ELEMENTS_FIELDS: &[(&str, &str)] = &[
    ("datetime_jd", "epoch as Julian Date, TDB"),
    ("e", "eccentricity"),
    ("p", "periapsis distance (au)"),
    ("incl", "inclination (deg)"),
    ("node", "longitude of the ascending node (deg)"),
    ("argper", "argument of perifocus (deg)"),
    ("Tp", "time of periapsis (Julian Date, TDB)"),
    ("meananomaly", "mean anomaly (deg)"),
    ("trueanomaly", "true anomaly (deg)"),
    ("a", "semi-major axis (au)"),
    ("Q", "apoapsis distance (au)"),
    ("period", "sidereal orbital period (Earth years)"),
    ("targetname", "resolved target name as reported by Horizons"),
    ("H", "absolute magnitude in V (mag)"),
    ("G", "photometric slope parameter"),
];

/// Human description of a public column name, from either catalogue.
///
/// ```rust
/// use horizons_query::response::fields::describe_field;
///
/// assert_eq!(describe_field("alpha"), Some("solar phase angle (deg)"));
/// assert_eq!(describe_field("unknown"), None);
/// ```
pub fn describe_field(name: &str) -> Option<&'static str> {
    EPHEMERIS_FIELDS
        .iter()
        .chain(ELEMENTS_FIELDS)
        .find(|(field, _)| *field == name)
        .map(|(_, description)| *description)
}
