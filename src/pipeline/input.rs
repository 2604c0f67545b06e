//! Input validation: read the user-supplied PDF into memory.
//!
//! The processor endpoint takes document bytes inline, so the whole file is
//! read up front. We validate the PDF magic bytes (`%PDF`) before building
//! the request so callers get a meaningful local error rather than an
//! opaque `INVALID_ARGUMENT` from the API after a full upload.

use crate::error::ExtractError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read a local PDF, validating existence, readability, and magic bytes.
pub fn read_pdf(path: impl AsRef<Path>) -> Result<Vec<u8>, ExtractError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ExtractError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ExtractError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(ExtractError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    };

    check_magic(&bytes, path)?;

    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Verify the `%PDF` magic bytes.
fn check_magic(bytes: &[u8], path: &Path) -> Result<(), ExtractError> {
    let mut magic = [0u8; 4];
    let head = &bytes[..bytes.len().min(4)];
    magic[..head.len()].copy_from_slice(head);
    if &magic != b"%PDF" {
        return Err(ExtractError::NotAPdf {
            path: PathBuf::from(path),
            magic,
        });
    }
    Ok(())
}
