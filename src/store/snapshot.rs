//! Whole-store snapshots encoded with bitcode.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::error::RepositoryError;
use super::tables::Tables;

/// Load a snapshot. A missing file means an empty store.
pub fn read(path: &Path) -> Result<Option<Tables>, RepositoryError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(RepositoryError::Snapshot(format!(
                "read {}: {err}",
                path.display()
            )))
        }
    };
    let tables = bitcode::deserialize(&bytes)
        .map_err(|e| RepositoryError::Snapshot(format!("snapshot deserialize: {e}")))?;
    Ok(Some(tables))
}

/// Write through a sibling temp file so a crash never leaves a torn snapshot.
pub fn write(path: &Path, tables: &Tables) -> Result<(), RepositoryError> {
    let bytes = bitcode::serialize(tables)
        .map_err(|e| RepositoryError::Snapshot(format!("snapshot serialize: {e}")))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| RepositoryError::Snapshot(format!("create {}: {e}", parent.display())))?;
    }

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes)
        .map_err(|e| RepositoryError::Snapshot(format!("write {}: {e}", tmp.display())))?;
    fs::rename(&tmp, path)
        .map_err(|e| RepositoryError::Snapshot(format!("rename {}: {e}", path.display())))?;
    Ok(())
}
