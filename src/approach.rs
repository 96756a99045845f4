//! The close-approach entity.
//!
//! A close approach records one pass of an NEO near Earth: the UTC date and
//! time of closest approach, the nominal approach distance in astronomical
//! units, and the relative velocity in kilometers per second.
//!
//! Each approach keeps the primary designation of the NEO it was attributed
//! to in the source data. The [`neo`](CloseApproach::neo) back-reference
//! starts out `None` and is resolved by [`NeoDatabase`] during linking; an
//! approach whose designation matches no loaded NEO stays unresolved (an
//! orphan) rather than erroring.
//!
//! [`NeoDatabase`]: crate::database::NeoDatabase

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::neo::{NearEarthObject, NeoId};
use crate::time::format_timestamp;

/// Arena index of a [`CloseApproach`] within its owning database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApproachId(usize);

impl ApproachId {
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

impl fmt::Display for ApproachId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "approach:{}", self.0)
    }
}

/// A close approach to Earth by an NEO.
///
/// Scalar fields are immutable once constructed; the only post-construction
/// mutation is the linker resolving `neo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseApproach {
    /// Primary designation of the approaching NEO, as attributed by the
    /// source. Kept for lookup during linking and as the display fallback
    /// when no matching NEO was loaded.
    pub designation: String,

    /// UTC date and time of closest approach.
    pub time: DateTime<Utc>,

    /// Nominal approach distance in astronomical units.
    pub distance: f64,

    /// Relative approach velocity in kilometers per second.
    pub velocity: f64,

    /// Arena index of the owning NEO; `None` until linked, and `None`
    /// forever for orphans.
    #[serde(default)]
    pub neo: Option<NeoId>,
}

impl CloseApproach {
    /// Creates a new, unlinked close approach.
    #[must_use]
    pub fn new(
        designation: impl Into<String>,
        time: DateTime<Utc>,
        distance: f64,
        velocity: f64,
    ) -> Self {
        Self {
            designation: designation.into(),
            time,
            distance,
            velocity,
            neo: None,
        }
    }

    /// Returns the approach time formatted at minute precision.
    ///
    /// The internal timestamp may be finer-grained; display strings and
    /// serialized reports drop sub-minute figures because the input data
    /// set never carries them.
    #[must_use]
    pub fn time_str(&self) -> String {
        format_timestamp(self.time)
    }

    /// Returns true once the linker has resolved this approach to an NEO.
    #[must_use]
    pub const fn is_linked(&self) -> bool {
        self.neo.is_some()
    }

    /// Renders the human-readable description of this approach.
    ///
    /// When the resolved NEO is supplied its fullname identifies the
    /// object; otherwise the raw designation stands in, so orphans degrade
    /// gracefully instead of failing to render. [`NeoDatabase`] resolves
    /// the NEO for callers via
    /// [`describe_approach`](crate::database::NeoDatabase::describe_approach).
    ///
    /// [`NeoDatabase`]: crate::database::NeoDatabase
    #[must_use]
    pub fn describe(&self, neo: Option<&NearEarthObject>) -> String {
        let subject = neo.map_or_else(|| self.designation.clone(), NearEarthObject::fullname);
        format!(
            "On {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.time_str(),
            subject,
            self.distance,
            self.velocity
        )
    }
}

impl fmt::Display for CloseApproach {
    /// Renders with the raw designation. The entity does not own its NEO
    /// (references are arena indices), so `Display` always takes the
    /// unlinked form; use [`CloseApproach::describe`] or the database's
    /// `describe_approach` for the linked rendering.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe(None))
    }
}
