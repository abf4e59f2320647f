//! SEO Auditor main entry point
//!
//! This is the command-line interface for the page auditor.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use seo_auditor::analyzer::{analyze_html, Analyzer};
use seo_auditor::config::{load_config_with_hash, Config};
use seo_auditor::output::{
    format_markdown_report, format_stored_report, load_statistics, print_statistics,
    write_markdown_report,
};
use seo_auditor::storage::{check_quota, open_storage, AuditStore, StoredAudit};
use seo_auditor::{AnalyzeError, AuditError, AuditResult};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use url::Url;

/// SEO Auditor: technical SEO audits of single pages
///
/// Fetches a page as a self-identifying bot, inspects its title, meta
/// description, headings, images and links, and scores it.
#[derive(Parser, Debug)]
#[command(name = "seo-auditor")]
#[command(version = "1.0.0")]
#[command(about = "Technical SEO audits of single pages", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Audit a URL
    Audit {
        /// Absolute http(s) URL to audit
        url: String,

        /// Caller identity, subject to the daily quota
        #[arg(long)]
        user: Option<i64>,

        /// Print the audit as JSON instead of markdown
        #[arg(long)]
        json: bool,

        /// Do not store the audit
        #[arg(long)]
        no_save: bool,

        /// Also write the markdown report to this file
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,

        /// Audit this saved HTML instead of fetching the URL
        #[arg(long, value_name = "FILE")]
        html: Option<PathBuf>,

        /// Load time to report for --html, in milliseconds
        #[arg(long, value_name = "MS", default_value_t = 0, requires = "html")]
        load_time: u64,
    },

    /// List stored audits, newest first
    History {
        /// Only show this user's audits
        #[arg(long)]
        user: Option<i64>,
    },

    /// Show a stored audit by ID or share ID
    Show {
        /// Numeric audit ID or 16-character share ID
        id: String,

        /// Print as JSON instead of markdown
        #[arg(long)]
        json: bool,
    },

    /// Show statistics over all stored audits
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    match cli.command {
        Command::Audit {
            url,
            user,
            json,
            no_save,
            report,
            html,
            load_time,
        } => {
            let options = AuditOptions {
                user,
                json,
                save: !no_save,
                report,
                html,
                load_time,
            };
            handle_audit(&config, &url, options).await
        }
        Command::History { user } => handle_history(&config, user),
        Command::Show { id, json } => handle_show(&config, &id, json),
        Command::Stats => handle_stats(&config),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seo_auditor=info,warn"),
            1 => EnvFilter::new("seo_auditor=debug,info"),
            2 => EnvFilter::new("seo_auditor=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

struct AuditOptions {
    user: Option<i64>,
    json: bool,
    save: bool,
    report: Option<PathBuf>,
    html: Option<PathBuf>,
    load_time: u64,
}

/// Checks that the target is an absolute http(s) URL with a host
fn validate_target(url: &str) -> Result<(), AuditError> {
    let invalid = |reason: &str| AuditError::InvalidTarget {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let parsed = Url::parse(url).map_err(|e| invalid(&e.to_string()))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(invalid("scheme must be http or https"));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host"));
    }
    Ok(())
}

/// Handles the `audit` command
async fn handle_audit(config: &Config, url: &str, options: AuditOptions) -> anyhow::Result<()> {
    validate_target(url)?;

    let mut storage = if options.save {
        let storage = open_storage(Path::new(&config.output.database_path))?;
        check_quota(
            &storage,
            options.user,
            config.quota.daily_audits_per_user,
            chrono::Utc::now(),
        )?;
        Some(storage)
    } else {
        None
    };

    let audit = match &options.html {
        Some(path) => {
            let html = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            analyze_html(url, &html, options.load_time)?
        }
        None => run_live_audit(config, url).await?,
    };

    let stored = match storage.as_mut() {
        Some(storage) => {
            let stored = storage.save_audit(options.user, &audit)?;
            tracing::info!("Saved audit {} (share ID {})", stored.id, stored.public_id);
            Some(stored)
        }
        None => None,
    };

    if let Some(path) = &options.report {
        let record = stored.clone().unwrap_or_else(|| unsaved(&audit));
        write_markdown_report(&record, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("Report written to {}", path.display());
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&audit)?);
    } else {
        match &stored {
            Some(stored) => print!("{}", format_stored_report(stored)),
            None => print!("{}", format_markdown_report(&audit)),
        }
    }

    Ok(())
}

/// Fetches and audits a live URL, explaining bot blocks
async fn run_live_audit(config: &Config, url: &str) -> anyhow::Result<AuditResult> {
    let analyzer = Analyzer::new(config).context("failed to build HTTP client")?;

    match analyzer.analyze(url).await {
        Ok(audit) => Ok(audit),
        Err(err @ AnalyzeError::BotProtectionDetected { .. }) => {
            tracing::error!(
                "{}. Save the page source and re-run with --html <FILE>",
                err
            );
            Err(err.into())
        }
        Err(err) => {
            tracing::error!("Audit failed ({}): {}", err.kind(), err);
            Err(err.into())
        }
    }
}

/// Placeholder record for reports of audits that were not stored
fn unsaved(audit: &AuditResult) -> StoredAudit {
    StoredAudit {
        id: 0,
        user_id: None,
        public_id: "unsaved".to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
        audit: audit.clone(),
    }
}

/// Handles the `history` command
fn handle_history(config: &Config, user: Option<i64>) -> anyhow::Result<()> {
    let storage = open_storage(Path::new(&config.output.database_path))?;

    let audits = match user {
        Some(user_id) => storage.list_audits_for_user(user_id)?,
        None => storage.list_audits()?,
    };

    if audits.is_empty() {
        println!("No audits recorded yet.");
        return Ok(());
    }

    println!("{:>6}  {:<16}  {:>5}  {:<24}  URL", "ID", "SHARE ID", "SCORE", "CREATED");
    for stored in &audits {
        println!(
            "{:>6}  {:<16}  {:>5}  {:<24}  {}",
            stored.id, stored.public_id, stored.audit.score, stored.created_at, stored.audit.url
        );
    }

    Ok(())
}

/// Handles the `show` command
fn handle_show(config: &Config, id: &str, json: bool) -> anyhow::Result<()> {
    let storage = open_storage(Path::new(&config.output.database_path))?;

    // Share IDs are hex and may be all digits, so fall back to them
    let by_row = match id.parse::<i64>() {
        Ok(numeric) => storage.get_audit(numeric)?,
        Err(_) => None,
    };
    let stored = match by_row {
        Some(stored) => stored,
        None => match storage.get_audit_by_public_id(id)? {
            Some(stored) => stored,
            None => match id.parse::<i64>() {
                Ok(numeric) => return Err(AuditError::NotFound(numeric).into()),
                Err(_) => bail!("no audit with share ID '{}'", id),
            },
        },
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&stored.audit)?);
    } else {
        print!("{}", format_stored_report(&stored));
    }

    Ok(())
}

/// Handles the `stats` command
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let storage = open_storage(Path::new(&config.output.database_path))?;
    let stats = load_statistics(&storage)?;
    print_statistics(&stats);

    Ok(())
}
