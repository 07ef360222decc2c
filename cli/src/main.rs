//! PRISM audit tooling.
//!
//! Appends to, verifies and inspects the orchestrator's signed memory log.
//! The signing key is read from `PRISM_SIGNING_KEY` (or the variable named in
//! the config file).
//!
//! Usage:
//!   prism-audit --store memory.jsonl append --payload '{"action":"route_task","actor":"bot-1"}'
//!   prism-audit --config audit.toml verify --verbose
//!   prism-audit tail --limit 5

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use prism_audit::{tail, AuditConfig, ChainVerifier, FileAuditWriter};
use prism_contracts::{
    error::{PrismError, PrismResult},
    payload::Payload,
    verification::VerificationResult,
};
use prism_core::traits::Redactor;
use prism_redact::PiiRedactor;

// ── CLI definition ────────────────────────────────────────────────────────────

/// PRISM audit log tooling.
#[derive(Parser)]
#[command(
    name = "prism-audit",
    about = "Append to, verify and inspect the PRISM signed audit log",
    long_about = "Works on the hash-chained, HMAC-signed memory.jsonl written by the\n\
                  PRISM orchestrator.  The signing key comes from PRISM_SIGNING_KEY\n\
                  unless the config file names another variable."
)]
struct Cli {
    /// TOML audit configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store path, overriding the configuration.
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Append one JSON object payload as a new signed entry.
    Append {
        /// Payload as a JSON object, e.g. '{"action":"route_task"}'.
        #[arg(long)]
        payload: String,

        /// Skip redaction; the append guard still refuses raw PII.
        #[arg(long)]
        no_redact: bool,
    },
    /// Verify the whole chain and report the first divergence.
    Verify {
        /// Print one line per entry.
        #[arg(long)]
        verbose: bool,
    },
    /// Print the most recent entries.
    Tail {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    // Initialize structured logging.  Set RUST_LOG=info for per-append output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("prism-audit: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> PrismResult<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => AuditConfig::from_file(path)?,
        None => AuditConfig::new(prism_audit::config::DEFAULT_STORE_PATH),
    };
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    debug!(store = %config.store_path.display(), "audit config loaded");

    match cli.command {
        Command::Append { payload, no_redact } => append(&config, &payload, no_redact),
        Command::Verify { verbose } => verify(&config, verbose),
        Command::Tail { limit } => print_tail(&config, limit),
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn append(config: &AuditConfig, raw: &str, no_redact: bool) -> PrismResult<ExitCode> {
    let payload = Payload::from_json_str(raw).map_err(|e| PrismError::ConfigError {
        reason: format!("payload must be a JSON object without floats: {}", e),
    })?;

    let redactor = Arc::new(PiiRedactor::new()?);
    let payload = if no_redact {
        payload
    } else {
        redactor.redact(&payload)?
    };

    let key = config.resolve_signing_key()?;
    let writer = FileAuditWriter::open(config, key, redactor)?;
    let entry = writer.append(&payload)?;

    println!("{}", to_json(&entry)?);
    Ok(ExitCode::SUCCESS)
}

fn verify(config: &AuditConfig, verbose: bool) -> PrismResult<ExitCode> {
    let key = config.resolve_signing_key()?;
    let verifier = ChainVerifier::from_config(config, key);

    if verbose {
        for verdict in verifier.stream()? {
            let verdict = verdict?;
            let sequence = verdict
                .sequence
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  [{:>6}] seq {:>6}  {}",
                verdict.index,
                sequence,
                verdict.status.describe()
            );
        }
    }

    let result = verifier.verify()?;
    print_report(config, &result);

    match result.ensure_intact() {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(finding) => {
            eprintln!("SECURITY FINDING: {}", finding);
            Ok(ExitCode::from(2))
        }
    }
}

fn print_tail(config: &AuditConfig, limit: usize) -> PrismResult<ExitCode> {
    for entry in tail(&config.store_path, limit)? {
        println!("{}", to_json(&entry)?);
    }
    Ok(ExitCode::SUCCESS)
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_report(config: &AuditConfig, result: &VerificationResult) {
    println!();
    println!("PRISM audit chain verification");
    println!("==============================");
    println!("  store:    {}", config.store_path.display());
    println!("  entries:  {}", result.entries);
    if result.intact {
        println!("  status:   PASS (chain intact)");
        if let Some(hash) = &result.terminal_hash {
            println!("  terminal: {}", hash);
        }
    } else {
        println!("  status:   FAIL");
        println!("  flagged:  {}", result.flagged);
        if let Some(d) = &result.first_divergence {
            println!("  first divergence: entry {} ({})", d.index, d.status.describe());
        }
    }
    println!();
}

fn to_json<T: serde::Serialize>(value: &T) -> PrismResult<String> {
    serde_json::to_string(value).map_err(|e| PrismError::StorageError {
        reason: format!("failed to render entry as JSON: {}", e),
    })
}
