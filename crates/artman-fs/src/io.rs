//! File reads and locked, atomic writes

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Replace `path` with `content` in one step.
///
/// Bytes go to a sibling temp file held under an `fs2` exclusive lock,
/// then the temp file is renamed over `path`. Readers see the old file or
/// the new one, never a mix. Missing parent directories are created.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file lives next to the target so the rename stays on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    if let Err(err) = fill_and_swap(temp_file, &temp_path, &native_path, content) {
        if let Err(cleanup) = fs::remove_file(&temp_path) {
            tracing::warn!(path = %temp_path.display(), error = %cleanup, "Could not remove temp file");
        }
        return Err(err);
    }
    tracing::debug!(path = %path, bytes = content.len(), "Wrote file atomically");

    Ok(())
}

/// Write `content` to the locked temp file and rename it over `target`.
fn fill_and_swap(
    mut temp_file: fs::File,
    temp_path: &Path,
    target: &Path,
    content: &[u8],
) -> Result<()> {
    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;
    drop(temp_file);

    fs::rename(temp_path, target).map_err(|e| Error::io(target, e))
}

/// Read a UTF-8 file, reporting the path on failure.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}
