use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde_json::Value;

use mockgrid_core::Library;

use crate::errors::GenerationError;

/// Built-in names, places, organizations and derived composites.
const DEFAULT_LIBRARY_JSON: &str = include_str!("../assets/default_library.json");

/// Parsed copy of the built-in library, shared read-only.
pub fn default_library() -> Result<&'static Library, GenerationError> {
    static LIBRARY: OnceLock<Result<Library, String>> = OnceLock::new();
    LIBRARY
        .get_or_init(|| parse_library(DEFAULT_LIBRARY_JSON, "default_library.json"))
        .as_ref()
        .map_err(|err| GenerationError::Asset(err.clone()))
}

/// Load a library override file (a JSON object of pools and composites).
pub fn load_library_file(path: &Path) -> Result<Library, GenerationError> {
    let contents = fs::read_to_string(path).map_err(|err| {
        GenerationError::Asset(format!("failed to read library {}: {}", path.display(), err))
    })?;
    parse_library(&contents, &path.display().to_string()).map_err(GenerationError::Asset)
}

fn parse_library(contents: &str, origin: &str) -> Result<Library, String> {
    let value: Value = serde_json::from_str(contents)
        .map_err(|err| format!("invalid json library {origin}: {err}"))?;
    if !value.is_object() {
        return Err(format!("library {origin} must be a JSON object"));
    }
    Ok(Library::from_json(&value))
}

#[cfg(test)]
mod tests {
    use mockgrid_core::LibraryEntry;

    use super::*;

    #[test]
    fn default_library_parses() {
        let library = default_library().expect("default library");
        assert!(matches!(
            library.lookup("firstName"),
            Some(LibraryEntry::Pool(_))
        ));
        assert!(matches!(
            library.lookup("fullName_formal"),
            Some(LibraryEntry::Composite(_))
        ));
        assert!(
            library
                .iter()
                .all(|(_, entry)| !matches!(entry, LibraryEntry::Unusable))
        );
    }

    #[test]
    fn library_must_be_an_object() {
        assert!(parse_library("[1, 2]", "inline").is_err());
        assert!(parse_library("{\"foo\": [\"bar\"]}", "inline").is_ok());
    }
}
