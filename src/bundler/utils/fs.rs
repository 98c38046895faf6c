//! File system utilities for writing generated ninja files.
//!
//! Ninja re-reads its build files whenever their timestamp changes, so
//! generated files are only rewritten when their content actually differs.

use crate::bundler::error::{Context, Result};
use std::{io, path::Path};
use tokio::fs;

/// Writes `contents` to `path`, creating any parent directories as needed.
///
/// Leaves the file untouched if it already holds exactly `contents`.
/// Returns whether the file was written.
pub async fn write_if_changed(path: &Path, contents: &str) -> Result<bool> {
    match fs::read(path).await {
        Ok(existing) if existing == contents.as_bytes() => {
            log::debug!("{} is up to date", path.display());
            return Ok(false);
        }
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .context(format!("failed to create directory {}", parent.display()))?;
        }
    }
    fs::write(path, contents).await?;
    log::info!("Wrote {}", path.display());
    Ok(true)
}
