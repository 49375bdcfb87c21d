use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Write a record as pretty JSON, atomically replacing any previous file.
///
/// Creates the parent directory if it doesn't exist.
pub fn write_json_record<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory at {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, record)
        .with_context(|| format!("Failed to serialize record for {}", path.display()))?;

    file.commit()
        .with_context(|| format!("Failed to save record at {}", path.display()))?;

    Ok(())
}
