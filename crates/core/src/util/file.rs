use crate::error::{BinderError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Write a value as indented UTF-8 JSON, creating parent directories as needed
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_atomic(path, json.as_bytes())?;
    debug!("Wrote JSON to {:?}", path);
    Ok(())
}

/// Replace `path` with `bytes` in one rename.
///
/// The content goes to a temp file in the same directory first, so an
/// interrupted write never leaves a truncated file under the final name.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| BinderError::file_io(path, e))?;
    tmp.write_all(bytes)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| BinderError::file_io(path, e))?;
    tmp.persist(path)
        .map_err(|e| BinderError::file_io(path, e.error))?;
    Ok(())
}

/// Read and parse a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| BinderError::file_io(path, e))?;
    serde_json::from_str(&content).map_err(|e| BinderError::file_json(path, e))
}

/// Create the parent directory of `path` if it has one
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Turn an API resource path into a flat, filesystem-safe file stem
pub fn sanitize_file_stem(resource: &str) -> String {
    let stem: String = resource
        .trim_matches('/')
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() { "_".to_string() } else { stem }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_write_json_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.json");
        let value = json!({"sections": {"kanto": {"title": {"en": "Kanto"}}}});

        write_json(&path, &value).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n"), "output should be indented");
        let back: Value = read_json(&path).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_write_atomic_replaces_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.png");
        std::fs::write(&path, b"old and much longer content").unwrap();

        write_atomic(&path, b"new").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"new");
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_read_json_errors_keep_path_and_source() {
        use std::error::Error as _;

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = read_json::<Value>(&missing).unwrap_err();
        assert!(matches!(err, BinderError::FileIo { .. }));
        assert!(err.to_string().contains("missing.json"));
        assert!(err.source().is_some());

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{not json").unwrap();
        let err = read_json::<Value>(&broken).unwrap_err();
        assert!(matches!(err, BinderError::FileJson { .. }));
        assert!(err.source().is_some());
        assert!(!err.is_config());
    }

    #[test]
    fn test_sanitize_file_stem() {
        assert_eq!(sanitize_file_stem("pokemon-species/25"), "pokemon-species_25");
        assert_eq!(sanitize_file_stem("/en/cards/base1-44"), "en_cards_base1-44");
        assert_eq!(sanitize_file_stem("A?b=c"), "a_b_c");
        assert_eq!(sanitize_file_stem("/"), "_");
    }
}
