use std::fs;
use std::path::Path;

use crate::error::{ExportError, Result};

/// Writes report text to `path`, creating missing parent directories.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the directory or file cannot be written.
pub fn write_report(text: &str, path: &Path) -> Result<()> {
    let io_err = |target: &Path| {
        let target = target.to_path_buf();
        move |source| ExportError::Io {
            path: target,
            source,
        }
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    fs::write(path, text).map_err(io_err(path))?;
    tracing::info!(path = %path.display(), "design report exported");
    Ok(())
}
