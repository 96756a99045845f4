//! The near-Earth object entity.
//!
//! An NEO carries the semantic and physical parameters of one object from
//! the NASA export: its primary designation (required, unique), IAU name
//! (optional), diameter in kilometers (sometimes unknown), and whether it
//! is flagged as potentially hazardous.
//!
//! Each NEO also maintains the collection of its close approaches. The
//! collection starts empty and is populated by [`NeoDatabase`] during
//! linking; references are expressed as [`ApproachId`] arena indices rather
//! than pointers, so the cyclic NEO ⇄ approach graph stays ownership-free
//! and trivially serializable.
//!
//! [`NeoDatabase`]: crate::database::NeoDatabase

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::approach::ApproachId;

/// Arena index of a [`NearEarthObject`] within its owning database.
///
/// Stable for the lifetime of the [`NeoDatabase`] that produced it; ids
/// from one database are meaningless in another.
///
/// [`NeoDatabase`]: crate::database::NeoDatabase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NeoId(usize);

impl NeoId {
    /// Creates an id from a raw arena index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NeoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "neo:{}", self.0)
    }
}

/// A near-Earth object (NEO).
///
/// Scalar fields are immutable once constructed; the only post-construction
/// mutation is the linker appending to `approaches`.
///
/// # Examples
///
/// ```
/// use neodb::NearEarthObject;
///
/// let eros = NearEarthObject::new("433", Some("Eros".to_string()), 16.84, true);
/// assert_eq!(eros.fullname(), "433 (Eros)");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearEarthObject {
    /// Primary designation, the unique identifier for linking.
    pub designation: String,

    /// IAU name; `None` when the source row carried no name.
    pub name: Option<String>,

    /// Diameter in kilometers; `f64::NAN` means unknown.
    pub diameter: f64,

    /// Whether the object is flagged as potentially hazardous.
    pub hazardous: bool,

    /// Close approaches attributed to this NEO, in encounter order during
    /// linking. Empty until a database links it.
    #[serde(default)]
    pub approaches: Vec<ApproachId>,
}

impl NearEarthObject {
    /// Creates a new NEO from already-coerced values.
    ///
    /// Coercion of raw source strings (blank names, unknown diameters, the
    /// hazard flag) is the normalizer's job; see
    /// [`normalize_neo`](crate::record::normalize_neo).
    #[must_use]
    pub fn new(
        designation: impl Into<String>,
        name: Option<String>,
        diameter: f64,
        hazardous: bool,
    ) -> Self {
        Self {
            designation: designation.into(),
            name,
            diameter,
            hazardous,
            approaches: Vec::new(),
        }
    }

    /// Returns the full name of this NEO: the uppercased designation,
    /// followed by the title-cased IAU name in parentheses when one exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use neodb::NearEarthObject;
    ///
    /// let named = NearEarthObject::new("433", Some("eros".to_string()), 16.84, false);
    /// assert_eq!(named.fullname(), "433 (Eros)");
    ///
    /// let unnamed = NearEarthObject::new("2000 SG344", None, f64::NAN, false);
    /// assert_eq!(unnamed.fullname(), "2000 SG344");
    /// ```
    #[must_use]
    pub fn fullname(&self) -> String {
        let mut fullname = self.designation.to_uppercase();
        if let Some(name) = &self.name {
            fullname.push_str(" (");
            fullname.push_str(&title_case(name));
            fullname.push(')');
        }
        fullname
    }

    /// Returns true if this NEO's diameter is unknown.
    #[must_use]
    pub fn diameter_is_unknown(&self) -> bool {
        self.diameter.is_nan()
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let is_or_is_not = if self.hazardous { "is" } else { "is not" };
        write!(
            f,
            "{} has a diameter of {:.2} km and {} potentially hazardous",
            self.fullname(),
            self.diameter,
            is_or_is_not
        )
    }
}

/// Title-cases a name: the first letter of each alphabetic run is
/// uppercased, the rest lowercased. Digits and punctuation break runs,
/// matching how IAU names are conventionally rendered.
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_word = false;
    for ch in name.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}
