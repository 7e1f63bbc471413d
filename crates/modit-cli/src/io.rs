//! File and stdin reading with UTF-8 validation.
//!
//! This module is the single entry point for all input I/O in the `modit`
//! binary; `modit-core` never touches the filesystem. All failures are
//! converted to [`CliError`] variants that name the source.
use std::io::Read as _;
use std::path::Path;

use crate::cli::PathOrStdin;
use crate::error::CliError;

/// Reads the entire contents of `source` into a `String`.
///
/// # Errors
///
/// Returns a [`CliError`] for a missing or unreadable file, a stdin read
/// failure, or input that is not valid UTF-8 (with the byte offset of the
/// first bad sequence).
pub fn read_input(source: &PathOrStdin) -> Result<String, CliError> {
    match source {
        PathOrStdin::Path(path) => read_file(path),
        PathOrStdin::Stdin => read_stdin(),
    }
}

/// Reads a disk file, enforcing the UTF-8 requirement.
fn read_file(path: &Path) -> Result<String, CliError> {
    let bytes = std::fs::read(path).map_err(|e| io_error_to_cli(&e, path))?;
    bytes_to_string(bytes, &path.display().to_string())
}

/// Reads all of stdin.
fn read_stdin() -> Result<String, CliError> {
    let mut bytes = Vec::new();
    std::io::stdin()
        .lock()
        .read_to_end(&mut bytes)
        .map_err(|e| CliError::StdinReadError {
            detail: e.to_string(),
        })?;
    bytes_to_string(bytes, "-")
}

/// Maps a `std::io::Error` from a disk-file operation to a [`CliError`].
fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    if e.kind() == std::io::ErrorKind::NotFound {
        CliError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else if e.kind() == std::io::ErrorKind::PermissionDenied {
        CliError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        }
    }
}

/// Validates UTF-8, reporting the first invalid byte offset on failure.
fn bytes_to_string(bytes: Vec<u8>, source: &str) -> Result<String, CliError> {
    String::from_utf8(bytes).map_err(|e| CliError::InvalidUtf8 {
        source: source.to_owned(),
        byte_offset: e.utf8_error().valid_up_to(),
    })
}
