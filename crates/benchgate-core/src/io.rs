//! Artifact I/O shared by the baseline and threshold stores.

use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{BenchError, BenchResult};
use crate::record::strip_bom;

/// Read a JSON document that may legitimately be absent.
///
/// Missing, unreadable and malformed documents all come back as `None`;
/// the latter two are logged.
pub(crate) fn read_optional_json<T: DeserializeOwned>(path: &Path, what: &str) -> Option<T> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no {} present", what);
            return None;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read {}", what);
            return None;
        }
    };

    let parsed = std::str::from_utf8(strip_bom(&bytes))
        .map_err(|e| e.to_string())
        .and_then(|text| serde_json::from_str::<T>(text).map_err(|e| e.to_string()));

    match parsed {
        Ok(doc) => Some(doc),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed {}", what);
            None
        }
    }
}

/// Mode for artifacts that did not exist before.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Permissions the replacement file should carry: those of the file being
/// replaced, or `NEW_FILE_MODE` for a new one.
fn target_permissions(path: &Path) -> Option<std::fs::Permissions> {
    if let Ok(meta) = std::fs::metadata(path) {
        return Some(meta.permissions());
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(std::fs::Permissions::from_mode(NEW_FILE_MODE))
    }
    #[cfg(not(unix))]
    {
        None
    }
}

/// Write `content` to `path` via a temp file in the same directory, then
/// rename it into place. The temp file is created owner-only; it takes the
/// target's permissions before the rename.
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> BenchResult<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| BenchError::io(dir, e))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| BenchError::io(dir, e))?;
    tmp.write_all(content)
        .map_err(|e| BenchError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| BenchError::io(tmp.path(), e))?;
    if let Some(perms) = target_permissions(path) {
        tmp.as_file()
            .set_permissions(perms)
            .map_err(|e| BenchError::io(tmp.path(), e))?;
    }
    tmp.persist(path).map_err(|e| BenchError::io(path, e.error))?;
    Ok(())
}
