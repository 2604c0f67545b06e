//! Flattened output types: the shapes that reach `results.json`.
//!
//! [`ExtractionResult`] is the persisted external contract — exactly
//! `{"pageCount": n, "pages": [...], "text": s}` with tables flattened to
//! header lists + row objects and form fields to name/value pairs. Field
//! order on the structs is the key order in the serialised file, and row
//! maps are [`IndexMap`]s, so serialising the same result twice is
//! byte-identical.
//!
//! [`ExtractStats`] is *not* part of the contract; it exists for logging and
//! the CLI summary line and is never written to the output file.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The flattened document: the top-level object written to `results.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Number of pages in the processed document.
    #[serde(rename = "pageCount")]
    pub page_count: usize,

    /// Flattened pages, in document order.
    pub pages: Vec<FlatPage>,

    /// The full extracted document text, unmodified.
    pub text: String,
}

/// One flattened page: its tables then its form fields, both in detection
/// order, never reordered or filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatPage {
    pub tables: Vec<FlatTable>,
    pub fields: Vec<FlatField>,
}

/// A flattened table: column headers plus one map per body row.
///
/// Row maps are keyed by header text in header order. A body row shorter
/// than the header list yields a map with only its first N columns; extra
/// trailing cells beyond the header count are dropped. Both follow from
/// strict positional pairing and are intentional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatTable {
    /// Trimmed header cell texts, from the table's first header row.
    pub headers: Vec<String>,

    /// One `header → trimmed cell text` map per body row.
    pub data: Vec<IndexMap<String, String>>,
}

/// A flattened form field. Name and value are resolved verbatim — unlike
/// table cells they are not trimmed, preserving the upstream contract's
/// asymmetry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatField {
    pub name: String,
    pub value: String,
}

/// Timing and volume statistics for one extraction run.
///
/// Returned alongside the result by [`crate::extract`]; useful for logging
/// and the CLI summary but never serialised into `results.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractStats {
    /// Pages in the processed document.
    pub page_count: usize,
    /// Tables found across all pages.
    pub table_count: usize,
    /// Form fields found across all pages.
    pub field_count: usize,
    /// Size of the uploaded PDF in bytes.
    pub input_bytes: usize,
    /// Wall-clock time of the Document AI request.
    pub request_duration_ms: u64,
    /// Wall-clock time of the flattening pass.
    pub flatten_duration_ms: u64,
    /// Total run time including file I/O.
    pub total_duration_ms: u64,
}

/// Everything [`crate::extract`] produces for one run.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractOutput {
    /// The flattened document (the `results.json` payload).
    pub result: ExtractionResult,
    /// Run statistics.
    pub stats: ExtractStats,
}
