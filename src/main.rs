use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc::unbounded_channel;
use tracing::{error, info, warn};

use intentcsv::application::BatchSubmitter;
use intentcsv::domain::error::Result;
use intentcsv::domain::report::IngestReport;
use intentcsv::domain::SubmissionRecord;
use intentcsv::infrastructure::config::Settings;
use intentcsv::infrastructure::csv::CsvReader;
use intentcsv::infrastructure::intent_api::{IntentApi, IntentApiClient};

/// Batch-create chat intents from a loosely-structured CSV export.
#[derive(Parser, Debug)]
#[command(name = "intentcsv", version)]
struct Cli {
    /// CSV file to ingest
    csv: PathBuf,

    /// Parse, validate and preview without submitting anything
    #[arg(long)]
    dry_run: bool,

    /// Pause between submissions, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Target page id (overrides configuration)
    #[arg(long)]
    page_id: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Run aborted");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load()?;
    if let Some(delay_ms) = cli.delay_ms {
        settings.request_delay_ms = delay_ms;
    }
    if let Some(page_id) = cli.page_id {
        settings.page_id = page_id;
    }

    let content = CsvReader::read_file(&cli.csv)?;
    let report = intentcsv::ingest(&content)?;
    print_ingest_summary(&report);

    if report.accepted.is_empty() {
        println!("No usable rows; nothing to submit.");
        return Ok(());
    }

    if cli.dry_run {
        print_preview(&report.accepted);
        println!("Dry run; no requests were sent.");
        return Ok(());
    }

    settings.validate_for_submission()?;

    let api: Arc<dyn IntentApi> = Arc::new(IntentApiClient::new(&settings));
    let submitter = BatchSubmitter::new(api, Duration::from_millis(settings.request_delay_ms));

    // Ctrl-C raises the flag; the batch stops before its next send.
    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Cancellation requested; finishing the in-flight row");
            cancel_on_signal.store(true, Ordering::SeqCst);
        }
    });

    let (progress_tx, mut progress_rx) =
        unbounded_channel::<intentcsv::domain::report::BatchProgress>();
    let renderer = tokio::spawn(async move {
        while let Some(snapshot) = progress_rx.recv().await {
            match snapshot.last_outcome {
                Some(outcome) if outcome.success => info!(
                    intent = %outcome.conversation_name,
                    completed = snapshot.completed,
                    failed = snapshot.failed,
                    total = snapshot.total,
                    "Intent created"
                ),
                Some(outcome) => warn!(
                    intent = %outcome.conversation_name,
                    error = outcome.error.as_deref().unwrap_or("unknown"),
                    "Intent failed"
                ),
                None => info!("{}", snapshot.current),
            }
        }
    });

    let results = submitter
        .submit_all(&report.accepted, &cancel, Some(&progress_tx))
        .await;
    drop(progress_tx);
    let _ = renderer.await;

    let successful = results.iter().filter(|r| r.success).count();
    let failed = results.len() - successful;
    println!(
        "Submitted {} of {} rows: {} succeeded, {} failed.",
        results.len(),
        report.accepted.len(),
        successful,
        failed
    );
    if results.len() < report.accepted.len() {
        println!("Stopped early at the operator's request.");
    }

    Ok(())
}

fn print_ingest_summary(report: &IngestReport) {
    let d = &report.diagnostics;
    println!("CSV read finished:");
    println!("  total lines:   {}", d.total_lines);
    println!("  parsed rows:   {}", d.parsed_lines);
    println!("  valid rows:    {}", d.valid_lines);
    if d.skipped_lines > 0 {
        println!("  skipped lines: {} (unreadable or merged)", d.skipped_lines);
    }

    if !report.rejected.is_empty() {
        println!("{} row(s) failed validation:", report.rejected.len());
        for row in report.rejected.iter().take(3) {
            println!("  row {}: {}", row.row_number, row.rejected.reasons.join(", "));
        }
        if report.rejected.len() > 3 {
            println!("  ... and {} more", report.rejected.len() - 3);
        }
        println!("Only valid rows will be submitted.");
    }
}

fn print_preview(records: &[SubmissionRecord]) {
    println!("Preview ({} rows):", records.len());
    for record in records.iter().take(10) {
        println!(
            "  {} | {} | {}",
            record.intentname,
            truncate(&record.q_val, 40),
            truncate(&record.message, 40)
        );
    }
    if records.len() > 10 {
        println!("  ... and {} more", records.len() - 10);
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let shortened: String = text.chars().take(max_chars).collect();
        format!("{}...", shortened)
    }
}
