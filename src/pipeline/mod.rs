//! Pipeline stages for PDF form-and-table extraction.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. point `request` at a mock endpoint) without
//! touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ encode ──▶ request ──▶ flatten
//! (path)   (base64)   (Document AI)  (result)
//! ```
//!
//! 1. [`input`]   — validate the user-supplied path and read the PDF bytes
//! 2. [`encode`]  — wrap the bytes as a base64 raw-document payload
//! 3. [`request`] — POST to the processor endpoint; the only stage with
//!    network I/O
//! 4. [`flatten`] — resolve text-anchor offsets and flatten tables and form
//!    fields into plain string maps; pure functions, no I/O

pub mod encode;
pub mod flatten;
pub mod input;
pub mod request;
