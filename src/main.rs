//! bucketwise - cost-saving recommendations for object-storage buckets.
//!
//! Usage:
//!   bucketwise report -i inventory.json [BUCKET...]      Full report
//!   bucketwise summary -i inventory.json [BUCKET...]     Storage totals only
//!   bucketwise recommend -i inventory.json [BUCKET...]   Suggestions only
//!   bucketwise --help                                    Show help
//!
//! Pass no bucket names, or `*`, to cover every bucket in the inventory.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use itertools::Itertools;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bucketwise_analyze::Recommendation;
use bucketwise_core::{BucketSelection, EstimatedSavings};
use bucketwise_report::{Pipeline, Report, Settings, StorageSummary};
use bucketwise_scan::{InMemoryProvider, Inventory};

const DEFAULT_LOG_FILTER: &str = "bucketwise=info";

#[derive(Parser)]
#[command(
    name = "bucketwise",
    version,
    about = "Cost-saving recommendations for object-storage buckets",
    long_about = "bucketwise scans bucket listings and configuration, flags data that \
                  costs more than it should, and suggests what to change.\n\n\
                  Buckets are read from an inventory file exported as JSON."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan, analyze and print the full report
    Report(RunArgs),

    /// Print storage totals per bucket, without analysis
    Summary(RunArgs),

    /// Print only the recommendations
    Recommend(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Inventory file describing the buckets (JSON)
    #[arg(short, long)]
    inventory: PathBuf,

    /// Settings file (TOML) with [scan], [analyze] and [prices] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Buckets to analyze ("*" or none for all)
    buckets: Vec<String>,

    /// Keep going when a bucket fails and report it as partial
    #[arg(short, long)]
    keep_going: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let env_filter = env_filter(std::env::var("RUST_LOG").ok().as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Report(args) => run_report(&args).await?,
        Command::Summary(args) => run_summary(&args).await?,
        Command::Recommend(args) => run_recommend(&args).await?,
    }

    Ok(())
}

/// Log filter from `RUST_LOG`, or `bucketwise=info` when unset or invalid.
fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Build a pipeline from the command-line arguments.
fn build_pipeline(args: &RunArgs) -> Result<(Pipeline, BucketSelection)> {
    let mut settings =
        Settings::load_or_default(args.config.as_deref()).context("Invalid settings")?;
    if args.keep_going {
        settings.scan.fail_fast = false;
    }

    let inventory = Inventory::load(&args.inventory).context("Invalid inventory")?;
    let provider = InMemoryProvider::from(inventory);
    info!(
        buckets = provider.len(),
        inventory = %args.inventory.display(),
        "loaded inventory"
    );

    let pipeline = Pipeline::from_settings(Arc::new(provider), &settings);
    let selection = BucketSelection::from_names(&args.buckets);
    Ok((pipeline, selection))
}

/// Run the full pipeline and print the report.
async fn run_report(args: &RunArgs) -> Result<()> {
    let (pipeline, selection) = build_pipeline(args)?;
    let report = pipeline.run(&selection).await.context("Run failed")?;

    match args.format {
        OutputFormat::Text => print_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

/// Print storage totals only.
async fn run_summary(args: &RunArgs) -> Result<()> {
    let (pipeline, selection) = build_pipeline(args)?;
    let summary = pipeline
        .summarize(&selection)
        .await
        .context("Summary failed")?;

    match args.format {
        OutputFormat::Text => print_storage_summary(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}

/// Print recommendations only.
async fn run_recommend(args: &RunArgs) -> Result<()> {
    let (pipeline, selection) = build_pipeline(args)?;
    let report = pipeline.run(&selection).await.context("Run failed")?;

    match args.format {
        OutputFormat::Text => {
            print_header("Recommendations");
            for rec in &report.recommendations {
                print_recommendation(rec);
            }
            print_failures(&report);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report.recommendations)?);
        }
    }
    Ok(())
}

fn print_report(report: &Report) {
    print_storage_summary(&report.storage_summary);

    print_header("Findings");
    for scan in &report.buckets {
        println!(
            " {} ({}, {})",
            scan.name(),
            scan.summary.object_count,
            format_size(scan.summary.total_size)
        );
        println!(
            "   versioning: {}, lifecycle rules: {}, classes: {}",
            scan.config.versioning_status,
            scan.config.lifecycle_rules.len(),
            scan.config.storage_classes.iter().join(", ")
        );
        for finding in scan.findings.iter().filter(|f| f.has_findings()) {
            println!(
                "   {:<28} {:>6} objects {:>10}  {}",
                finding.category.to_string(),
                finding.object_count,
                format_size(finding.total_size),
                format_savings(finding.estimated_savings)
            );
        }
    }
    println!();

    print_header("Recommendations");
    for rec in &report.recommendations {
        print_recommendation(rec);
    }

    println!("{}", "─".repeat(70));
    println!(
        " Total potential savings: {}",
        format_savings(report.total_potential_savings)
    );
    println!(
        " Status: {} (scanned in {:.2}s)",
        report.status,
        report.scan_duration.as_secs_f64()
    );
    println!("{}", "─".repeat(70));

    print_failures(report);
}

fn print_storage_summary(summary: &StorageSummary) {
    print_header("Storage Summary");
    println!(
        " {} buckets, {} objects, {}",
        summary.bucket_count,
        summary.total_objects,
        format_size(summary.total_size)
    );
    println!(
        " Average per bucket: {} objects, {}",
        summary.average_objects,
        format_size(summary.average_size)
    );
    println!();

    let largest = summary.largest().map_or(0, |b| b.total_size);
    for bucket in summary.buckets.iter().rev() {
        let ratio = if largest > 0 {
            bucket.total_size as f64 / largest as f64
        } else {
            0.0
        };
        let modified = bucket
            .last_modified
            .map_or_else(|| "never".to_string(), |t| t.format("%Y-%m-%d").to_string());
        println!(
            "   {:<32} {:>10} {:>8} objects  {}  {}",
            truncate(&bucket.name, 32),
            format_size(bucket.total_size),
            bucket.object_count,
            modified,
            make_bar(ratio, 10)
        );
    }
    println!();
}

fn print_recommendation(rec: &Recommendation) {
    println!(" {}", rec.category_name);
    if rec.has_targets() {
        println!("   Buckets: {}", rec.target_resources.iter().join(", "));
        if !rec.estimated_savings.is_zero() {
            println!("   Estimated savings: {}", format_savings(rec.estimated_savings));
        }
    }
    for tier in &rec.tiers {
        println!("   {}: {}", tier.level, tier.text);
    }
    println!();
}

fn print_failures(report: &Report) {
    if report.failures.is_empty() {
        return;
    }
    println!();
    println!("{} bucket(s) could not be scanned:", report.failures.len());
    for failure in &report.failures {
        println!("   {}: {}", failure.bucket, failure.message);
    }
}

fn print_header(title: &str) {
    println!();
    println!("{}", "─".repeat(70));
    println!(" {}", title);
    println!("{}", "─".repeat(70));
    println!();
}

/// Format a monthly savings range in dollars.
fn format_savings(savings: EstimatedSavings) -> String {
    if savings.monthly_min == savings.monthly_max {
        format!("${:.2}/month", savings.monthly_max)
    } else {
        format!(
            "${:.2}-${:.2}/month",
            savings.monthly_min, savings.monthly_max
        )
    }
}

/// Create a simple ASCII bar.
fn make_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Truncate a string to max length.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 1).collect();
        format!("{kept}…")
    }
}
