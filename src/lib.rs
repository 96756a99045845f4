//! # NeoDB — near-Earth objects and their close approaches
//!
//! NeoDB ingests the two NASA exports describing near-Earth objects (NEOs)
//! and their close approaches to Earth, normalizes their loosely-typed
//! records into a typed object model, and links the two collections into a
//! cross-referenced dataset keyed by primary designation.
//!
//! ## Core concepts
//!
//! - **NearEarthObject**: one object from the NEO export — designation,
//!   optional IAU name, diameter (sometimes unknown), hazard flag.
//! - **CloseApproach**: one recorded pass near Earth — approach time,
//!   distance, and relative velocity, attributed to an NEO by designation.
//! - **NeoDatabase**: the linker and registry; owns both collections and
//!   the designation index, and wires the NEO ⇄ approach references.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use neodb::{load_approaches, load_neos, NeoDatabase};
//!
//! let neos = load_neos("data/neos.csv")?;
//! let approaches = load_approaches("data/cad.json")?;
//! let db = NeoDatabase::new(neos, approaches);
//!
//! let eros = db.get_neo_by_designation("433").unwrap();
//! println!("{eros}");
//! ```
//!
//! The data set has documented quirks — blank names, unknown diameters, a
//! hazard flag that coerces by string non-emptiness — whose handling lives
//! in [`record`]; see that module for the exact policy.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod approach;
pub mod database;
pub mod error;
pub mod extract;
pub mod neo;
pub mod record;
pub mod time;

// Re-export primary types at crate root for convenience
pub use approach::{ApproachId, CloseApproach};
pub use database::NeoDatabase;
pub use error::{ExtractError, NeoError, NeoResult, StructuralError};
pub use extract::{load_approaches, load_neos};
pub use neo::{NearEarthObject, NeoId};
pub use record::{normalize_approach, normalize_neo, RawRecord};
