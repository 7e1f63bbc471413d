//! CLI error type with its exit-code mapping.
//!
//! [`CliError`] is the top-level error type for the `modit` binary. The
//! tool's contract is a two-value exit code: **0** when mining ran to
//! completion, **1** for everything else — bad arguments, unreadable input,
//! malformed graph files, bounds that admit nothing. [`CliError::message`]
//! is the line printed to stderr before exiting.
use std::fmt;
use std::path::PathBuf;

use modit_core::{ParseError, SolverError};

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions the `modit` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    /// The input file could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read the input file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// A human-readable label for the source (`"-"` for stdin).
        source: String,
        /// The byte offset of the first invalid byte sequence.
        byte_offset: usize,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// A generic I/O error not covered by the variants above.
    IoError {
        /// A human-readable label for the source.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The graph file is malformed.
    Parse {
        /// A human-readable label for the source.
        source: String,
        /// The reader's diagnosis, carrying the offending line number.
        error: ParseError,
    },

    /// The size bounds cannot admit any occurrence.
    Bounds {
        /// The solver's rejection.
        error: SolverError,
    },
}

impl CliError {
    /// Returns the process exit code for this error: always `1`; success
    /// is the only `0`.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Returns a human-readable error message suitable for printing to
    /// stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => {
                format!(
                    "error: invalid UTF-8 in {source}: first invalid byte at offset {byte_offset}"
                )
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error reading {source}: {detail}")
            }
            Self::Parse { source, error } => {
                format!("error: {source}: {error}")
            }
            Self::Bounds { error } => {
                format!("error: {error}")
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
