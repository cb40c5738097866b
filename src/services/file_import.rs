use std::path::Path;

use crate::error::{ImportError, Result};

/// Largest file the importer accepts (5 MiB).
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 2] = ["txt", "csv"];

/// Lowercased text after the last `.` of the file name.
fn extension_of(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

/// Extension is checked first, then size.
pub fn validate_file(path: &Path, size: u64) -> std::result::Result<(), ImportError> {
    let ext = extension_of(path);
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(ImportError::UnsupportedExtension(ext));
    }

    if size > MAX_FILE_SIZE {
        return Err(ImportError::TooLarge(size));
    }

    Ok(())
}

/// Validate and read a whole file as UTF-8 text.
///
/// Returns `Ok(None)` when the file is empty, so callers leave their input alone.
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub async fn import_file(path: &Path) -> Result<Option<String>> {
    let metadata = tokio::fs::metadata(path).await?;
    validate_file(path, metadata.len())?;

    let bytes = tokio::fs::read(path).await?;
    let content = String::from_utf8_lossy(&bytes).into_owned();

    tracing::debug!("Imported {} bytes from {}", bytes.len(), path.display());

    if content.is_empty() {
        Ok(None)
    } else {
        Ok(Some(content))
    }
}
