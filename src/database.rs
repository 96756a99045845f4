//! The linked NEO database.
//!
//! [`NeoDatabase`] is the linker and registry: it owns the two entity
//! collections, builds a designation-keyed index over the NEOs, and wires
//! the bidirectional references between them. NEOs and approaches are
//! stored in arenas and reference each other by [`NeoId`] / [`ApproachId`]
//! index, so the cyclic forward/back pair needs no shared ownership and the
//! whole graph serializes cleanly.
//!
//! The index is owned by the database value, not ambient state, so multiple
//! independently loaded datasets can coexist in one process.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::approach::{ApproachId, CloseApproach};
use crate::neo::{NearEarthObject, NeoId};

/// A cross-referenced dataset of NEOs and their close approaches.
///
/// Construction performs the single linking pass; the dataset is read-only
/// afterwards.
///
/// # Examples
///
/// ```
/// use neodb::{CloseApproach, NearEarthObject, NeoDatabase};
/// use neodb::time::parse_calendar;
///
/// let eros = NearEarthObject::new("433", Some("Eros".to_string()), 16.84, true);
/// let pass = CloseApproach::new(
///     "433",
///     parse_calendar("1900-Jan-01 00:11").unwrap(),
///     0.0921795123769547,
///     16.7523040362574,
/// );
///
/// let db = NeoDatabase::new(vec![eros], vec![pass]);
/// let eros = db.get_neo_by_designation("433").unwrap();
/// assert_eq!(eros.approaches.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeoDatabase {
    neos: Vec<NearEarthObject>,
    approaches: Vec<CloseApproach>,
    index: HashMap<String, NeoId>,
}

impl NeoDatabase {
    /// Builds a linked database from the two loaded collections.
    ///
    /// Every approach is resolved against the designation index: on a
    /// match, its `neo` back-reference is set and it is appended to that
    /// NEO's forward collection, in input order. An approach whose
    /// designation matches no NEO stays unlinked but remains in the
    /// approach collection (orphan policy, not an error).
    ///
    /// Designations are expected to be unique; on duplicates the last one
    /// wins the index and earlier ones receive no links. Forward
    /// collections and back-references are reset before linking, so
    /// constructing from previously linked entities cannot double-append.
    #[must_use]
    pub fn new(mut neos: Vec<NearEarthObject>, mut approaches: Vec<CloseApproach>) -> Self {
        let mut index = HashMap::with_capacity(neos.len());
        for (i, neo) in neos.iter_mut().enumerate() {
            neo.approaches.clear();
            index.insert(neo.designation.clone(), NeoId::new(i));
        }

        for (i, approach) in approaches.iter_mut().enumerate() {
            approach.neo = index.get(&approach.designation).copied();
            if let Some(neo_id) = approach.neo {
                neos[neo_id.index()].approaches.push(ApproachId::new(i));
            }
        }

        Self {
            neos,
            approaches,
            index,
        }
    }

    /// All loaded NEOs, in load order.
    #[must_use]
    pub fn neos(&self) -> &[NearEarthObject] {
        &self.neos
    }

    /// All loaded close approaches, in load order, orphans included.
    #[must_use]
    pub fn approaches(&self) -> &[CloseApproach] {
        &self.approaches
    }

    /// The designation→NEO index built during linking.
    #[must_use]
    pub const fn designation_index(&self) -> &HashMap<String, NeoId> {
        &self.index
    }

    /// Looks up an NEO by arena id.
    #[must_use]
    pub fn get_neo(&self, id: NeoId) -> Option<&NearEarthObject> {
        self.neos.get(id.index())
    }

    /// Looks up a close approach by arena id.
    #[must_use]
    pub fn get_approach(&self, id: ApproachId) -> Option<&CloseApproach> {
        self.approaches.get(id.index())
    }

    /// Looks up an NEO by its primary designation.
    #[must_use]
    pub fn get_neo_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        self.index.get(designation).and_then(|id| self.get_neo(*id))
    }

    /// Returns the NEO a given approach resolved to, if any.
    #[must_use]
    pub fn neo_for_approach(&self, approach: &CloseApproach) -> Option<&NearEarthObject> {
        approach.neo.and_then(|id| self.get_neo(id))
    }

    /// Renders the human-readable description of an approach, identifying
    /// the object by its linked NEO's fullname or, for orphans, by the raw
    /// designation.
    #[must_use]
    pub fn describe_approach(&self, id: ApproachId) -> Option<String> {
        let approach = self.get_approach(id)?;
        Some(approach.describe(self.neo_for_approach(approach)))
    }

    /// Number of loaded NEOs.
    #[must_use]
    pub fn neo_count(&self) -> usize {
        self.neos.len()
    }

    /// Number of loaded close approaches.
    #[must_use]
    pub fn approach_count(&self) -> usize {
        self.approaches.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_calendar;

    fn neo(designation: &str, name: Option<&str>) -> NearEarthObject {
        NearEarthObject::new(designation, name.map(String::from), f64::NAN, false)
    }

    fn approach(designation: &str, cd: &str) -> CloseApproach {
        CloseApproach::new(designation, parse_calendar(cd).unwrap(), 0.1, 10.0)
    }

    #[test]
    fn test_link_sets_back_reference_and_forward_collection() {
        let db = NeoDatabase::new(
            vec![neo("433", Some("Eros"))],
            vec![approach("433", "1900-Jan-01 00:11")],
        );

        let pass = &db.approaches()[0];
        assert!(pass.is_linked());

        let eros = db.neo_for_approach(pass).unwrap();
        assert_eq!(eros.designation, "433");
        assert_eq!(eros.approaches, vec![ApproachId::new(0)]);
    }

    #[test]
    fn test_link_preserves_input_order() {
        let db = NeoDatabase::new(
            vec![neo("433", None)],
            vec![
                approach("433", "1900-Jan-01 00:11"),
                approach("433", "1950-Jun-15 08:30"),
                approach("433", "2000-Dec-01 17:45"),
            ],
        );

        let eros = db.get_neo_by_designation("433").unwrap();
        assert_eq!(
            eros.approaches,
            vec![ApproachId::new(0), ApproachId::new(1), ApproachId::new(2)]
        );
    }

    #[test]
    fn test_orphan_stays_unlinked_but_present() {
        let db = NeoDatabase::new(
            vec![neo("433", None)],
            vec![approach("999999", "2020-Jan-01 00:00")],
        );

        assert_eq!(db.approach_count(), 1);
        let orphan = &db.approaches()[0];
        assert!(!orphan.is_linked());
        assert!(db.get_neo_by_designation("433").unwrap().approaches.is_empty());
    }

    #[test]
    fn test_every_approach_is_linked_once_or_orphaned() {
        let db = NeoDatabase::new(
            vec![neo("433", None), neo("2000 SG344", None)],
            vec![
                approach("433", "1900-Jan-01 00:11"),
                approach("2000 SG344", "2030-May-05 05:05"),
                approach("999999", "2020-Jan-01 00:00"),
                approach("433", "1950-Jun-15 08:30"),
            ],
        );

        for (i, pass) in db.approaches().iter().enumerate() {
            let id = ApproachId::new(i);
            match pass.neo {
                Some(neo_id) => {
                    let owner = db.get_neo(neo_id).unwrap();
                    let hits = owner.approaches.iter().filter(|a| **a == id).count();
                    assert_eq!(hits, 1, "approach {i} linked other than exactly once");
                }
                None => {
                    for owner in db.neos() {
                        assert!(!owner.approaches.contains(&id));
                    }
                }
            }
        }
    }

    #[test]
    fn test_lookup_by_designation() {
        let db = NeoDatabase::new(vec![neo("433", Some("Eros"))], vec![]);
        assert!(db.get_neo_by_designation("433").is_some());
        assert!(db.get_neo_by_designation("434").is_none());
        assert_eq!(db.designation_index().len(), 1);
    }

    #[test]
    fn test_duplicate_designation_last_wins() {
        let mut second = neo("433", Some("Eros"));
        second.diameter = 16.84;
        let db = NeoDatabase::new(
            vec![neo("433", None), second],
            vec![approach("433", "1900-Jan-01 00:11")],
        );

        let winner = db.get_neo_by_designation("433").unwrap();
        assert_eq!(winner.name.as_deref(), Some("Eros"));
        assert_eq!(winner.approaches.len(), 1);
        // The shadowed duplicate receives no links.
        assert!(db.neos()[0].approaches.is_empty());
    }

    #[test]
    fn test_relinking_resets_forward_collections() {
        let db = NeoDatabase::new(
            vec![neo("433", None)],
            vec![approach("433", "1900-Jan-01 00:11")],
        );

        // Rebuild from the already-linked entities; nothing doubles up.
        let relinked = NeoDatabase::new(db.neos.clone(), db.approaches.clone());
        let eros = relinked.get_neo_by_designation("433").unwrap();
        assert_eq!(eros.approaches.len(), 1);
    }

    #[test]
    fn test_describe_approach_linked_and_orphan() {
        let mut eros = neo("433", Some("Eros"));
        eros.diameter = 16.84;
        let db = NeoDatabase::new(
            vec![eros],
            vec![
                CloseApproach::new(
                    "433",
                    parse_calendar("1900-Jan-01 00:11").unwrap(),
                    0.092_179_512_376_954_7,
                    16.752_304_036_257_4,
                ),
                approach("999999", "2020-Jan-01 00:00"),
            ],
        );

        assert_eq!(
            db.describe_approach(ApproachId::new(0)).unwrap(),
            "On 1900-01-01 00:11, '433 (Eros)' approaches Earth at a distance of \
             0.09 au and a velocity of 16.75 km/s."
        );
        let orphaned = db.describe_approach(ApproachId::new(1)).unwrap();
        assert!(orphaned.contains("'999999'"));
        assert!(db.describe_approach(ApproachId::new(2)).is_none());
    }

    #[test]
    fn test_empty_database() {
        let db = NeoDatabase::new(vec![], vec![]);
        assert_eq!(db.neo_count(), 0);
        assert_eq!(db.approach_count(), 0);
        assert!(db.designation_index().is_empty());
    }

    #[test]
    fn test_serialization_round_trip() {
        // A NaN diameter would serialize to JSON null, so use a known one.
        let mut eros = neo("433", Some("Eros"));
        eros.diameter = 16.84;
        let db = NeoDatabase::new(
            vec![eros],
            vec![approach("433", "1900-Jan-01 00:11")],
        );
        let json = serde_json::to_string(&db).unwrap();
        let restored: NeoDatabase = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.neo_count(), 1);
        assert!(restored.approaches()[0].is_linked());
    }
}
