//! Loaders for the two raw source files.
//!
//! NEO data arrives as a CSV export with one header row; close-approach
//! data arrives as a JSON document of the form
//! `{"fields": [...], "data": [[...], ...]}`. Both loaders reduce their
//! input to the same shape — one field-name→string mapping per row — and
//! hand each mapping to the [`record`](crate::record) normalizer, so all
//! coercion policy lives in one place.
//!
//! Any I/O, CSV, or JSON failure is fatal, as is any structural error from
//! normalization: a source file that violates its schema aborts the load.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::approach::CloseApproach;
use crate::error::{ExtractError, NeoResult};
use crate::neo::NearEarthObject;
use crate::record::{normalize_approach, normalize_neo, RawRecord};

/// Loads near-Earth objects from a CSV file.
///
/// The file's header row names the fields; columns beyond the ones the
/// normalizer needs are carried in the mapping and ignored.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid CSV, or if
/// any row fails normalization structurally.
pub fn load_neos<P: AsRef<Path>>(neo_csv_path: P) -> NeoResult<Vec<NearEarthObject>> {
    let mut reader = csv::Reader::from_path(neo_csv_path).map_err(ExtractError::from)?;
    let headers = reader.headers().map_err(ExtractError::from)?.clone();

    let mut neos = Vec::new();
    for row in reader.records() {
        let row = row.map_err(ExtractError::from)?;
        let fields: RawRecord = headers
            .iter()
            .zip(row.iter())
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        neos.push(normalize_neo(&fields)?);
    }
    Ok(neos)
}

/// The close-approach JSON document: a column-name list plus row tuples.
#[derive(Debug, Deserialize)]
struct CadDocument {
    fields: Vec<String>,
    data: Vec<Vec<serde_json::Value>>,
}

/// Loads close approaches from a JSON file.
///
/// Each data row is zipped against the field-name list to produce the same
/// field-name→string mapping the CSV path yields, then normalized. The
/// returned approaches are unlinked; hand them to
/// [`NeoDatabase::new`](crate::database::NeoDatabase::new) together with
/// the loaded NEOs.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON of the
/// expected shape, if a data row's width disagrees with the field list, or
/// if any row fails normalization structurally.
pub fn load_approaches<P: AsRef<Path>>(cad_json_path: P) -> NeoResult<Vec<CloseApproach>> {
    let file = File::open(cad_json_path).map_err(ExtractError::from)?;
    let document: CadDocument =
        serde_json::from_reader(BufReader::new(file)).map_err(ExtractError::from)?;

    let mut approaches = Vec::with_capacity(document.data.len());
    for row in &document.data {
        if row.len() != document.fields.len() {
            return Err(ExtractError::MalformedTable {
                expected: document.fields.len(),
                actual: row.len(),
            }
            .into());
        }
        let fields: RawRecord = document
            .fields
            .iter()
            .zip(row)
            .map(|(key, value)| (key.clone(), value_to_string(value)))
            .collect();
        approaches.push(normalize_approach(&fields)?);
    }
    Ok(approaches)
}

/// Flattens a JSON scalar to the string form the normalizer expects. The
/// export writes everything as strings, but numbers and nulls show up in
/// hand-built fixtures and older dumps.
fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    fn write_fixture(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const NEO_CSV: &str = "\
id,pdes,name,diameter,pha,orbit_class\n\
a0000433,433,Eros,16.84,N,AMO\n\
bK00SG4M,2000 SG344,,,,ATE\n";

    #[test]
    fn test_load_neos_from_csv() {
        let file = write_fixture(NEO_CSV);
        let neos = load_neos(file.path()).unwrap();
        assert_eq!(neos.len(), 2);

        assert_eq!(neos[0].fullname(), "433 (Eros)");
        assert!(neos[0].hazardous);

        assert_eq!(neos[1].designation, "2000 SG344");
        assert_eq!(neos[1].name, None);
        assert!(neos[1].diameter.is_nan());
        assert!(!neos[1].hazardous);
    }

    #[test]
    fn test_load_neos_missing_column_is_fatal() {
        let file = write_fixture("id,pdes,name,pha\na0000433,433,Eros,N\n");
        let err = load_neos(file.path()).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_load_neos_missing_file() {
        let err = load_neos("/nonexistent/neos.csv").unwrap_err();
        assert!(err.is_extract());
    }

    const CAD_JSON: &str = r#"{
        "fields": ["des", "orbit_id", "cd", "dist", "v_rel"],
        "data": [
            ["433", "105", "1900-Jan-01 00:11", "0.0921795123769547", "16.7523040362574"],
            ["999999", "1", "2020-Jan-01 00:00", "0.5", "22.3"]
        ]
    }"#;

    #[test]
    fn test_load_approaches_from_json() {
        let file = write_fixture(CAD_JSON);
        let approaches = load_approaches(file.path()).unwrap();
        assert_eq!(approaches.len(), 2);

        assert_eq!(approaches[0].designation, "433");
        assert_eq!(approaches[0].time_str(), "1900-01-01 00:11");
        assert!(!approaches[0].is_linked());
    }

    #[test]
    fn test_load_approaches_numeric_values_are_flattened() {
        let file = write_fixture(
            r#"{
                "fields": ["des", "cd", "dist", "v_rel"],
                "data": [["433", "1900-Jan-01 00:11", 0.25, 16.5]]
            }"#,
        );
        let approaches = load_approaches(file.path()).unwrap();
        assert!((approaches[0].distance - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_approaches_ragged_row_is_fatal() {
        let file = write_fixture(
            r#"{
                "fields": ["des", "cd", "dist", "v_rel"],
                "data": [["433", "1900-Jan-01 00:11"]]
            }"#,
        );
        let err = load_approaches(file.path()).unwrap_err();
        assert!(err.is_extract());
    }

    #[test]
    fn test_load_approaches_bad_date_is_fatal() {
        let file = write_fixture(
            r#"{
                "fields": ["des", "cd", "dist", "v_rel"],
                "data": [["433", "later", "0.5", "22.3"]]
            }"#,
        );
        let err = load_approaches(file.path()).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_load_approaches_invalid_json() {
        let file = write_fixture("not json at all");
        let err = load_approaches(file.path()).unwrap_err();
        assert!(err.is_extract());
    }
}
