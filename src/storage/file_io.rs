//! File I/O utilities with atomic writes
//!
//! Output files are either completely written or not touched at all: data
//! goes to a sibling temp file that is renamed over the destination only
//! after it has been flushed and synced.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, ConvertResult};

/// Temp file used while writing `path` (same directory, for an atomic rename)
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write a file atomically (write to temp, then rename)
///
/// The destination's directory must already exist. On any failure the temp
/// file is removed and the destination is left as it was.
pub fn write_atomic<T, F>(path: impl AsRef<Path>, write: F) -> ConvertResult<T>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<T, String>,
{
    let path = path.as_ref();
    let temp_path = temp_path_for(path);

    let result = write_and_sync(&temp_path, write).and_then(|value| {
        fs::rename(&temp_path, path)
            .map_err(|e| format!("failed to rename temp file: {}", e))
            .map(|()| value)
    });

    result.map_err(|reason| {
        // Best effort; the temp file may never have been created
        let _ = fs::remove_file(&temp_path);
        ConvertError::write(path, reason)
    })
}

fn write_and_sync<T, F>(temp_path: &Path, write: F) -> Result<T, String>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<T, String>,
{
    let file = File::create(temp_path).map_err(|e| e.to_string())?;

    let mut writer = BufWriter::new(file);
    let value = write(&mut writer)?;

    writer
        .flush()
        .map_err(|e| format!("failed to flush data: {}", e))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| format!("failed to sync data: {}", e))?;

    Ok(value)
}
