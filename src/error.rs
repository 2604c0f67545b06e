//! Error types for the pdf2fields library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ExtractError`] — the extraction run cannot produce a result (bad input
//!   file, missing credentials, API failure, output write failure). Returned
//!   as `Err(ExtractError)` from the top-level `extract*` functions.
//!
//! * [`FlattenError`] — the analysis response itself is malformed (a text
//!   segment points outside the document text, a table arrived without a
//!   header row). These originate in the pure flattening pipeline and are
//!   wrapped into [`ExtractError::Flatten`] with the page number attached,
//!   so a caller always knows *where* in the document the data went bad.
//!
//! No flattening error is recoverable: the response data is wrong, retrying
//! the same request would return the same bytes, and producing partial output
//! would silently hide the corruption. The run either fully succeeds or
//! reports a specific error kind.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2fields library.
#[derive(Debug, Error)]
pub enum ExtractError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── Request errors ────────────────────────────────────────────────────
    /// No access token could be resolved from config or environment.
    #[error("No Document AI access token configured.\n{hint}")]
    MissingToken { hint: String },

    /// The HTTP request to the processor endpoint failed before a response
    /// arrived (DNS, connect, TLS, timeout).
    #[error("Request to '{endpoint}' failed: {reason}")]
    RequestFailed { endpoint: String, reason: String },

    /// The processor endpoint returned a non-success status.
    #[error("Document AI returned {status} ({code}): {message}")]
    ApiError {
        status: u16,
        code: String,
        message: String,
    },

    /// The response body could not be deserialised as a process response.
    #[error("Failed to decode Document AI response: {detail}")]
    MalformedResponse { detail: String },

    // ── Flattening errors ─────────────────────────────────────────────────
    /// The analysis result for one page could not be flattened.
    #[error("Page {page}: {source}")]
    Flatten {
        page: u32,
        #[source]
        source: FlattenError,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output JSON file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised by the pure flattening pipeline.
///
/// These always indicate malformed upstream data, never a bug in the caller:
/// Document AI guarantees segment offsets fall inside the document text and
/// that every table carries at least one header row. When either guarantee is
/// broken we fail fast with a named error instead of truncating or panicking
/// on an index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlattenError {
    /// A text segment's offsets fall outside the document text, or do not
    /// land on UTF-8 character boundaries.
    #[error(
        "text segment {start}..{end} is out of bounds for document text of length {len} \
         (or not on a character boundary)"
    )]
    SegmentOutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },

    /// A table has zero header rows, so no column names exist to key the
    /// body rows against.
    #[error("table has no header rows")]
    MissingHeader,
}
