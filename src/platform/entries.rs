// LogLens - platform/entries.rs
//
// Loading a request-log export (JSON array of `api_logs` rows) from disk.

use crate::core::model::RequestLogEntry;
use crate::util::constants::MAX_ENTRIES_FILE_SIZE;
use crate::util::error::EntriesError;
use std::path::Path;

/// Read and parse a request-log export.
///
/// Rows are returned newest first, matching the backend's listing order.
pub fn load_entries(path: &Path) -> Result<Vec<RequestLogEntry>, EntriesError> {
    let size = std::fs::metadata(path)
        .map_err(|source| EntriesError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    if size > MAX_ENTRIES_FILE_SIZE {
        return Err(EntriesError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: MAX_ENTRIES_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| EntriesError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut entries: Vec<RequestLogEntry> =
        serde_json::from_str(&content).map_err(|source| EntriesError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    tracing::info!(
        path = %path.display(),
        entries = entries.len(),
        "Request log loaded"
    );
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_sorts_newest_first() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("api_logs.json");
        std::fs::write(
            &path,
            r#"[
                {"uuid":"a","method":"GET","status":200,"endpoint":"/a",
                 "ip_address":"1.1.1.1","created_at":"2024-05-01T10:00:00Z"},
                {"uuid":"b","user_uuid":"u-9","method":"POST","status":201,"endpoint":"/b",
                 "ip_address":"1.1.1.2","user_agent":"curl/8","created_at":"2024-05-01T11:00:00Z"}
            ]"#,
        )
        .unwrap();

        let entries = load_entries(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].uuid, "b");
        assert_eq!(entries[0].user_uuid.as_deref(), Some("u-9"));
        assert_eq!(entries[1].user_agent, None);
    }

    #[test]
    fn test_load_rejects_non_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"uuid":"a"}"#).unwrap();
        assert!(matches!(load_entries(&path), Err(EntriesError::Json { .. })));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_entries(&dir.path().join("missing.json")),
            Err(EntriesError::Io { .. })
        ));
    }
}
