use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::error::StorageError;
use crate::model::{Institution, LookupTable};

/// Loads a lookup table from a JSON file.
///
/// The file holds an array of institutions:
///
/// ```json
/// [{ "name": "GJU", "programs": 10, "ugcFollowed": "Yes",
///    "ugPrograms": { "number": 3, "percentage": 30 }, ... }]
/// ```
///
/// Entry order is preserved. Returns [`StorageError::EmptyLookupTable`] for an
/// empty array and [`StorageError::DuplicateInstitution`] if a name repeats.
pub fn load_lookup_table(path: &Path) -> Result<LookupTable, StorageError> {
    let raw = fs::read_to_string(path)?;
    let entries: Vec<Institution> = serde_json::from_str(&raw)?;

    if entries.is_empty() {
        return Err(StorageError::EmptyLookupTable(path.to_path_buf()));
    }

    let mut seen = HashSet::new();
    for entry in &entries {
        if !seen.insert(entry.name.as_str()) {
            return Err(StorageError::DuplicateInstitution(entry.name.clone()));
        }
    }

    Ok(LookupTable::new(entries))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn write_table(dir: &Path, entries: &[Institution]) -> std::path::PathBuf {
        let path = dir.join("institutions.json");
        fs::write(&path, serde_json::to_string_pretty(entries).unwrap()).unwrap();
        path
    }

    #[test]
    fn loads_builtin_table_written_to_disk() {
        let dir = tempdir().unwrap();
        let builtin = LookupTable::builtin();
        let path = write_table(dir.path(), builtin.entries());
        let loaded = load_lookup_table(&path).unwrap();
        assert_eq!(loaded, builtin);
    }

    #[test]
    fn preserves_entry_order() {
        let dir = tempdir().unwrap();
        let mut entries = LookupTable::builtin().entries().to_vec();
        entries.reverse();
        let path = write_table(dir.path(), &entries);
        let loaded = load_lookup_table(&path).unwrap();
        let names: Vec<&str> = loaded.institutions().collect();
        assert_eq!(names, vec!["DCRUST", "Manav Rachna", "GJU", "JCBUST"]);
    }

    #[test]
    fn empty_array_is_rejected() {
        let dir = tempdir().unwrap();
        let path = write_table(dir.path(), &[]);
        let err = load_lookup_table(&path).unwrap_err();
        assert!(matches!(err, StorageError::EmptyLookupTable(p) if p == path));
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let dir = tempdir().unwrap();
        let mut entries = LookupTable::builtin().entries().to_vec();
        entries.push(entries[0].clone());
        let path = write_table(dir.path(), &entries);
        let err = load_lookup_table(&path).unwrap_err();
        assert!(matches!(err, StorageError::DuplicateInstitution(name) if name == "JCBUST"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_lookup_table(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("institutions.json");
        fs::write(&path, "[{\"name\": \"GJU\"}]").unwrap();
        let err = load_lookup_table(&path).unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }

    #[test]
    fn custom_institution_is_looked_up() {
        let dir = tempdir().unwrap();
        let mut entry = LookupTable::builtin().entries()[0].clone();
        entry.name = "Kurukshetra University".into();
        entry.record.programs = 42;
        let path = write_table(dir.path(), &[entry]);
        let loaded = load_lookup_table(&path).unwrap();
        assert_eq!(loaded.lookup("Kurukshetra University").unwrap().programs, 42);
        assert!(loaded.lookup("JCBUST").is_none());
    }
}
