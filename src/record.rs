//! Record normalization.
//!
//! A raw record is a field-name→string mapping, produced either from a CSV
//! row or from a flattened JSON row (see [`extract`](crate::extract)). This
//! module turns one such mapping into a typed entity, applying the data
//! set's documented quirks:
//!
//! - blank names mean "no name", not "empty name";
//! - a diameter that fails to parse means "unknown", encoded as
//!   [`f64::NAN`] rather than an error, because the source documents
//!   diameters as sometimes unavailable;
//! - the hazard flag coerces to `bool` by string non-emptiness. The NASA
//!   export writes `"N"`, `"Y"`, or nothing, so any non-empty value —
//!   including a literal `"N"` — coerces to `true`. Downstream behavior
//!   depends on this exact rule; do not reinterpret it as semantic
//!   true/false parsing.
//!
//! Approach distance and velocity get no such tolerance: the source never
//! documents them as unknown, so a parse failure there is a structural
//! error that aborts the load, as is any missing required key.

use std::collections::HashMap;

use crate::approach::CloseApproach;
use crate::error::StructuralError;
use crate::neo::NearEarthObject;
use crate::time::parse_calendar;

/// NEO CSV column holding the primary designation.
pub const NEO_DESIGNATION: &str = "pdes";
/// NEO CSV column holding the IAU name.
pub const NEO_NAME: &str = "name";
/// NEO CSV column holding the diameter in kilometers.
pub const NEO_DIAMETER: &str = "diameter";
/// NEO CSV column holding the potentially-hazardous flag.
pub const NEO_HAZARDOUS: &str = "pha";

/// Approach field holding the primary designation.
pub const CAD_DESIGNATION: &str = "des";
/// Approach field holding the formatted calendar date of closest approach.
pub const CAD_TIME: &str = "cd";
/// Approach field holding the nominal approach distance in au.
pub const CAD_DISTANCE: &str = "dist";
/// Approach field holding the relative velocity in km/s.
pub const CAD_VELOCITY: &str = "v_rel";

/// A raw record: one row of a source file, keyed by field name.
pub type RawRecord = HashMap<String, String>;

/// Normalizes one raw NEO record into a [`NearEarthObject`].
///
/// Malformed individual fields never fail the record: a blank name becomes
/// `None` and an unparsable diameter becomes [`f64::NAN`].
///
/// # Errors
///
/// Returns [`StructuralError::MissingField`] if any required key is absent
/// from the mapping; that means the input file violated its schema, and the
/// whole load aborts.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use neodb::record::normalize_neo;
///
/// let fields: HashMap<String, String> = [
///     ("pdes", "433"),
///     ("name", "Eros"),
///     ("diameter", "16.84"),
///     ("pha", "N"),
/// ]
/// .into_iter()
/// .map(|(k, v)| (k.to_string(), v.to_string()))
/// .collect();
///
/// let eros = normalize_neo(&fields).unwrap();
/// assert_eq!(eros.fullname(), "433 (Eros)");
/// ```
pub fn normalize_neo(fields: &RawRecord) -> Result<NearEarthObject, StructuralError> {
    let designation = require(fields, NEO_DESIGNATION)?.trim();
    let name = require(fields, NEO_NAME)?.trim();
    let diameter_raw = require(fields, NEO_DIAMETER)?;
    let hazardous_raw = require(fields, NEO_HAZARDOUS)?;

    let name = if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    };

    // Unknown diameters are a documented gap in the source, encoded as NaN
    // so downstream arithmetic propagates "unknown" on its own.
    let diameter = diameter_raw.trim().parse::<f64>().unwrap_or(f64::NAN);

    let hazardous = !hazardous_raw.is_empty();

    Ok(NearEarthObject::new(designation, name, diameter, hazardous))
}

/// Normalizes one raw close-approach record into a [`CloseApproach`].
///
/// The returned approach is unlinked (`neo` is `None`) until a database
/// resolves it.
///
/// # Errors
///
/// Returns [`StructuralError::MissingField`] for an absent required key,
/// [`StructuralError::InvalidCalendarDate`] for an unparsable approach
/// time, and [`StructuralError::InvalidNumber`] for an unparsable distance
/// or velocity. All three are fatal for the load; unlike NEO diameters, the
/// source never documents these fields as unknown.
pub fn normalize_approach(fields: &RawRecord) -> Result<CloseApproach, StructuralError> {
    let designation = require(fields, CAD_DESIGNATION)?.trim();
    let time = parse_calendar(require(fields, CAD_TIME)?)?;
    let distance = parse_number(fields, CAD_DISTANCE)?;
    let velocity = parse_number(fields, CAD_VELOCITY)?;

    Ok(CloseApproach::new(designation, time, distance, velocity))
}

fn require<'a>(fields: &'a RawRecord, field: &str) -> Result<&'a str, StructuralError> {
    fields
        .get(field)
        .map(String::as_str)
        .ok_or_else(|| StructuralError::MissingField {
            field: field.to_string(),
        })
}

fn parse_number(fields: &RawRecord, field: &str) -> Result<f64, StructuralError> {
    let raw = require(fields, field)?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| StructuralError::InvalidNumber {
            field: field.to_string(),
            value: raw.to_string(),
        })
}
