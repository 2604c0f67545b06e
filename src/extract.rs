//! Eager (full-document) extraction entry points.
//!
//! One call does the whole run: read the PDF, ship it to the processor,
//! flatten the response, and hand back the result with timing stats. There
//! is deliberately no streaming or per-page recovery — online processing
//! returns the entire analysis in one response, and a malformed response
//! aborts the run rather than producing partial output.

use crate::config::ProcessorConfig;
use crate::error::ExtractError;
use crate::output::{ExtractOutput, ExtractStats, ExtractionResult};
use crate::pipeline::{encode, flatten, input, request};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Extract tables and form fields from a local PDF.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `pdf_path` — local path to a PDF file
/// * `config`   — processor identity and request settings
///
/// # Errors
/// Any failure is fatal: bad input file, missing token, request or API
/// failure, or a malformed analysis result. No partial output is produced.
pub async fn extract(
    pdf_path: impl AsRef<Path>,
    config: &ProcessorConfig,
) -> Result<ExtractOutput, ExtractError> {
    let total_start = Instant::now();
    let pdf_path = pdf_path.as_ref();
    info!("Starting extraction: {}", pdf_path.display());

    // ── Step 1: Read and validate the input ──────────────────────────────
    let bytes = input::read_pdf(pdf_path)?;
    let input_bytes = bytes.len();

    // ── Step 2: Encode the request payload ───────────────────────────────
    let process_request = encode::encode_request(&bytes, &config.mime_type);

    // ── Step 3: Call Document AI ─────────────────────────────────────────
    let request_start = Instant::now();
    let document = request::process_document(config, &process_request).await?;
    let request_duration_ms = request_start.elapsed().as_millis() as u64;
    info!(
        "Processed {} pages in {}ms",
        document.pages.len(),
        request_duration_ms
    );

    // ── Step 4: Flatten the analysis result ──────────────────────────────
    let flatten_start = Instant::now();
    let result = flatten::assemble(&document)?;
    let flatten_duration_ms = flatten_start.elapsed().as_millis() as u64;

    let stats = ExtractStats {
        page_count: result.page_count,
        table_count: result.pages.iter().map(|p| p.tables.len()).sum(),
        field_count: result.pages.iter().map(|p| p.fields.len()).sum(),
        input_bytes,
        request_duration_ms,
        flatten_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    debug!(
        "Flattened {} tables and {} fields across {} pages",
        stats.table_count, stats.field_count, stats.page_count
    );

    Ok(ExtractOutput { result, stats })
}

/// Extract a PDF and write the flattened result to a JSON file.
///
/// Uses atomic write (temp file + rename) to prevent partial files. The
/// file receives compact JSON — exactly the `results.json` contract shape.
pub async fn extract_to_file(
    pdf_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ProcessorConfig,
) -> Result<ExtractStats, ExtractError> {
    let output = extract(pdf_path, config).await?;
    write_result(&output.result, output_path, false)?;
    Ok(output.stats)
}

/// Serialise a result to a JSON file atomically (temp file + rename).
pub fn write_result(
    result: &ExtractionResult,
    output_path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), ExtractError> {
    let path = output_path.as_ref();

    let json = if pretty {
        serde_json::to_string_pretty(result)
    } else {
        serde_json::to_string(result)
    }
    .map_err(|e| ExtractError::Internal(format!("result serialisation failed: {e}")))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| ExtractError::OutputWriteFailed {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, &json).map_err(|source| ExtractError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    })?;

    std::fs::rename(&tmp_path, path).map_err(|source| ExtractError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Wrote {} bytes to {}", json.len(), path.display());
    Ok(())
}

/// Synchronous wrapper around [`extract`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_sync(
    pdf_path: impl AsRef<Path>,
    config: &ProcessorConfig,
) -> Result<ExtractOutput, ExtractError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ExtractError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(extract(pdf_path, config))
}
