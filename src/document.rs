//! Wire model of the Document AI process response.
//!
//! This mirrors the subset of `google.cloud.documentai.v1.Document` the form
//! processor populates: the full extracted text plus per-page tables and form
//! fields whose string values are *offset references* into that text rather
//! than inline copies. Resolving those references is the flattening
//! pipeline's job ([`crate::pipeline::flatten`]); this module only gets the
//! bytes off the wire faithfully.
//!
//! ## Protobuf-JSON quirks
//!
//! The REST API speaks proto3 JSON, which has two traps for a naive serde
//! model:
//!
//! * int64 fields (`startIndex`, `endIndex`) are encoded as JSON *strings*
//!   (`"endIndex": "47"`), because 2^53 < 2^63 and JavaScript. Numbers are
//!   accepted too, so the deserialiser takes either.
//! * Zero-valued fields are omitted entirely. A segment starting at offset 0
//!   arrives with no `startIndex` key at all; every field below therefore
//!   carries `#[serde(default)]`.

use serde::{Deserialize, Deserializer, Serialize};

/// A processed document: the full extracted text and the per-page structure
/// referencing it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// The full document text. All segment offsets index into this string.
    #[serde(default)]
    pub text: String,

    /// Visual pages, in document order.
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// One page of the processed document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-based page number.
    #[serde(default)]
    pub page_number: u32,

    /// Tables detected on this page, in detection order.
    #[serde(default)]
    pub tables: Vec<Table>,

    /// Form fields detected on this page, in detection order.
    #[serde(default)]
    pub form_fields: Vec<FormField>,
}

/// A table: header rows and body rows of layout-referencing cells.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default)]
    pub header_rows: Vec<TableRow>,
    #[serde(default)]
    pub body_rows: Vec<TableRow>,
}

/// One row of a table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

/// One table cell; its text lives behind the layout's anchor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    #[serde(default)]
    pub layout: Layout,
}

/// A name/value pair detected by the form processor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    #[serde(default)]
    pub field_name: Layout,
    #[serde(default)]
    pub field_value: Layout,
}

/// Visual element layout. Only the text anchor matters for flattening;
/// bounding polygons and confidence scores are ignored by serde.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    #[serde(default)]
    pub text_anchor: TextAnchor,
}

/// A reference to one or more ranges of [`Document::text`].
///
/// A single logical value may span non-contiguous ranges (a cell wrapping
/// across a line break, for instance); its materialised string is the
/// concatenation of the referenced substrings in segment order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnchor {
    #[serde(default)]
    pub text_segments: Vec<TextSegment>,
}

/// A half-open byte range `start_index..end_index` into [`Document::text`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSegment {
    #[serde(default, deserialize_with = "int64_from_string_or_number")]
    pub start_index: u64,
    #[serde(default, deserialize_with = "int64_from_string_or_number")]
    pub end_index: u64,
}

impl TextSegment {
    pub fn new(start_index: u64, end_index: u64) -> Self {
        Self {
            start_index,
            end_index,
        }
    }
}

/// Accept proto3-JSON int64 as either `"47"` or `47`.
fn int64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        Number(u64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::String(s) => s.parse::<u64>().map_err(serde::de::Error::custom),
    }
}

// ── Request types ────────────────────────────────────────────────────────

/// Body of the `processors/{id}:process` request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub raw_document: RawDocument,
}

/// Inline document content: base64-encoded bytes plus their MIME type.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    pub content: String,
    pub mime_type: String,
}

/// Successful response envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    #[serde(default)]
    pub document: Document,
}

/// Error response envelope (`{"error": {"code": .., "message": .., "status": ..}}`).
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub error: ApiErrorBody,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}
