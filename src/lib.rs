//! # pdf2fields
//!
//! Extract tables and form fields from PDF documents using Google Cloud
//! Document AI's form processor.
//!
//! ## Why this crate?
//!
//! A form processor does the hard visual work — finding tables, pairing
//! field labels with their values — but what it returns is awkward to
//! consume: a deeply nested document where every string is an *offset
//! reference* into one shared text buffer rather than an inline value.
//! This crate ships a PDF to the processor, resolves all those references,
//! and flattens the result into plain JSON: header lists, row objects, and
//! name/value field pairs, ready for a spreadsheet import or a downstream
//! ETL job.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input    validate the local file (%PDF magic) and read its bytes
//!  ├─ 2. Encode   bytes → base64 rawDocument payload
//!  ├─ 3. Request  POST to the regional processors/{id}:process endpoint
//!  ├─ 4. Flatten  resolve text anchors; tables → header/row maps,
//!  │              form fields → name/value pairs
//!  └─ 5. Output   { "pageCount", "pages", "text" } → results.json
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2fields::{extract, ProcessorConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Token read from DOCAI_ACCESS_TOKEN / GOOGLE_ACCESS_TOKEN
//!     let config = ProcessorConfig::builder()
//!         .project_id("my-project")
//!         .location("us")
//!         .processor_id("a1b2c3d4e5")
//!         .build()?;
//!
//!     let output = extract("invoice.pdf", &config).await?;
//!     for page in &output.result.pages {
//!         for field in &page.fields {
//!             println!("{} = {}", field.name.trim(), field.value.trim());
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2fields` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! pdf2fields = { version = "0.1", default-features = false }
//! ```
//!
//! ## Guarantees
//!
//! - The output contract is stable: the top-level JSON object always has
//!   exactly `pageCount`, `pages`, `text`, in that key order, and row maps
//!   keep their columns in header order.
//! - Flattening is deterministic: the same response flattens to
//!   byte-identical JSON every time.
//! - Malformed responses (out-of-range text segments, header-less tables)
//!   fail fast with a named error; nothing is silently truncated.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ProcessorConfig, ProcessorConfigBuilder};
pub use document::Document;
pub use error::{ExtractError, FlattenError};
pub use extract::{extract, extract_sync, extract_to_file, write_result};
pub use output::{ExtractOutput, ExtractStats, ExtractionResult, FlatField, FlatPage, FlatTable};
pub use pipeline::flatten::{assemble, flatten_field, flatten_page, flatten_table, resolve_layout};
