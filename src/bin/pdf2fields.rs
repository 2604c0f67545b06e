//! CLI binary for pdf2fields.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ProcessorConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use pdf2fields::{extract, write_result, ProcessorConfig};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic extraction (writes results.json)
  pdf2fields invoice.pdf

  # Choose the output file
  pdf2fields invoice.pdf -o invoice-fields.json

  # Pretty-printed JSON to stdout
  pdf2fields --stdout --pretty invoice.pdf

  # Explicit processor identity
  pdf2fields --project my-project --location eu --processor a1b2c3d4 form.pdf

  # Everything from the environment
  export DOCAI_PROJECT_ID=my-project
  export DOCAI_LOCATION=us
  export DOCAI_PROCESSOR_ID=a1b2c3d4
  export GOOGLE_ACCESS_TOKEN=$(gcloud auth print-access-token)
  pdf2fields form.pdf

OUTPUT SHAPE:
  { "pageCount": <int>,
    "pages": [ { "tables": [ { "headers": [...], "data": [ {header: value}, ... ] } ],
                 "fields": [ { "name": ..., "value": ... } ] } ],
    "text": <full document text> }

  Table cells are whitespace-trimmed; form field names and values are not.

ENVIRONMENT VARIABLES:
  DOCAI_PROJECT_ID        Google Cloud project that owns the processor
  DOCAI_LOCATION          Processor region: us or eu
  DOCAI_PROCESSOR_ID      Processor identifier (create one before running)
  DOCAI_ACCESS_TOKEN      OAuth2 bearer token for Document AI
  GOOGLE_ACCESS_TOKEN     Fallback token variable (gcloud auth print-access-token)

SETUP:
  1. Create a form-parser processor in the Cloud console.
  2. export GOOGLE_ACCESS_TOKEN=$(gcloud auth print-access-token)
  3. pdf2fields form.pdf -o results.json
"#;

/// Extract tables and form fields from PDFs via Google Document AI.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2fields",
    version,
    about = "Extract tables and form fields from PDFs via Google Document AI",
    long_about = "Send a PDF to a Google Cloud Document AI form processor and flatten the \
analysis result — tables as header/row objects, form fields as name/value pairs — \
into a single JSON file.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path.
    input: PathBuf,

    /// Write JSON to this file.
    #[arg(short, long, env = "PDF2FIELDS_OUTPUT", default_value = "results.json")]
    output: PathBuf,

    /// Google Cloud project that owns the processor.
    #[arg(long, env = "DOCAI_PROJECT_ID")]
    project: Option<String>,

    /// Processor region: us or eu.
    #[arg(long, env = "DOCAI_LOCATION")]
    location: Option<String>,

    /// Document AI processor identifier.
    #[arg(long, env = "DOCAI_PROCESSOR_ID")]
    processor: Option<String>,

    /// OAuth2 bearer token (overrides DOCAI_ACCESS_TOKEN / GOOGLE_ACCESS_TOKEN).
    #[arg(long, env = "DOCAI_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Override the full endpoint URL (for mock servers and testing).
    #[arg(long, env = "DOCAI_ENDPOINT")]
    endpoint: Option<String>,

    /// MIME type of the uploaded document.
    #[arg(long, env = "PDF2FIELDS_MIME_TYPE", default_value = "application/pdf")]
    mime_type: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "PDF2FIELDS_TIMEOUT", default_value_t = 120)]
    timeout: u64,

    /// Print JSON to stdout instead of writing a file.
    #[arg(long, env = "PDF2FIELDS_STDOUT")]
    stdout: bool,

    /// Pretty-print the JSON output.
    #[arg(long, env = "PDF2FIELDS_PRETTY")]
    pretty: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2FIELDS_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2FIELDS_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let config = build_config(&cli)?;

    // ── Run extraction ───────────────────────────────────────────────────
    let output = extract(&cli.input, &config)
        .await
        .context("Extraction failed")?;

    if cli.stdout {
        let json = if cli.pretty {
            serde_json::to_string_pretty(&output.result)
        } else {
            serde_json::to_string(&output.result)
        }
        .context("Failed to serialise result")?;

        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(json.as_bytes())
            .context("Failed to write to stdout")?;
        handle.write_all(b"\n").ok();
    } else {
        write_result(&output.result, &cli.output, cli.pretty)
            .context("Failed to write output file")?;
    }

    // ── Summary ──────────────────────────────────────────────────────────
    if !cli.quiet {
        let stats = &output.stats;
        let destination = if cli.stdout {
            "stdout".to_string()
        } else {
            cli.output.display().to_string()
        };
        eprintln!(
            "{}  {} pages, {} tables, {} fields  →  {}",
            green("✔"),
            bold(&stats.page_count.to_string()),
            stats.table_count,
            stats.field_count,
            bold(&destination),
        );
        eprintln!(
            "   {} request  /  {}ms total",
            dim(&format!("{}ms", stats.request_duration_ms)),
            stats.total_duration_ms,
        );
    }

    Ok(())
}

/// Map CLI args to `ProcessorConfig`.
///
/// Flags (and their bound env vars) take precedence; anything unset falls
/// back to `ProcessorConfig::from_env`, which also honours the legacy
/// lowercase variable names.
fn build_config(cli: &Cli) -> Result<ProcessorConfig> {
    let mut builder = ProcessorConfig::builder()
        .mime_type(cli.mime_type.as_str())
        .timeout_secs(cli.timeout);

    if let Some(ref endpoint) = cli.endpoint {
        builder = builder.endpoint(endpoint.as_str());
    } else {
        let env_fallback = ProcessorConfig::from_env().ok();
        let project = cli
            .project
            .clone()
            .or_else(|| env_fallback.as_ref().map(|c| c.project_id.clone()))
            .context("Missing --project (or DOCAI_PROJECT_ID)")?;
        let location = cli
            .location
            .clone()
            .or_else(|| env_fallback.as_ref().map(|c| c.location.clone()))
            .context("Missing --location (or DOCAI_LOCATION)")?;
        let processor = cli
            .processor
            .clone()
            .or_else(|| env_fallback.as_ref().map(|c| c.processor_id.clone()))
            .context("Missing --processor (or DOCAI_PROCESSOR_ID)")?;

        builder = builder
            .project_id(project)
            .location(location)
            .processor_id(processor);
    }

    if let Some(ref token) = cli.token {
        builder = builder.access_token(token.as_str());
    }

    builder.build().context("Invalid configuration")
}
