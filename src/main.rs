use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use verdict::{
    read_transcript, render_report_text, segment_transcript, tag_topics, topic_counts,
    write_report, AnthropicClient, AnthropicConfig, CriteriaTable, InterviewRecord, JsonFileStore,
    MemoryStore, Pipeline, PipelineConfig, ReportStatus, RetryConfig, StorageClient,
};

#[derive(Parser)]
#[command(name = "verdict")]
#[command(author, version, about = "Interview transcript evaluation pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an interview transcript and produce a scored report
    Evaluate {
        /// Input transcript file (line-oriented Interviewer:/Candidate: text)
        #[arg(short, long)]
        input: PathBuf,

        /// Name of the candidate being evaluated
        #[arg(short, long)]
        candidate: String,

        /// Interview ID (generated when omitted)
        #[arg(long)]
        interview_id: Option<String>,

        /// Output file for the JSON report (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for a human-readable scorecard
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Directory for persisted interview records (in-memory when omitted)
        #[arg(long)]
        store_dir: Option<PathBuf>,

        /// Timeout per model call in seconds
        #[arg(long, default_value = "60")]
        timeout_secs: u64,

        /// Maximum retries per model call
        #[arg(long, default_value = "2")]
        max_retries: u32,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze a transcript's structure and topics without calling a model
    Analyze {
        /// Input transcript file
        #[arg(short, long)]
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            input,
            candidate,
            interview_id,
            output,
            human_readable,
            store_dir,
            timeout_secs,
            max_retries,
            verbose,
        } => {
            setup_logging(verbose);
            evaluate_transcript(
                input,
                candidate,
                interview_id,
                output,
                human_readable,
                store_dir,
                timeout_secs,
                max_retries,
            )
            .await
        }
        Commands::Analyze { input, verbose } => {
            setup_logging(verbose);
            analyze_transcript(input)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn evaluate_transcript(
    input: PathBuf,
    candidate: String,
    interview_id: Option<String>,
    output: Option<PathBuf>,
    human_readable: Option<PathBuf>,
    store_dir: Option<PathBuf>,
    timeout_secs: u64,
    max_retries: u32,
) -> Result<()> {
    info!("Loading transcript from {:?}", input);
    let transcript = read_transcript(&input).context("Failed to read input transcript")?;

    let interview_id =
        interview_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let api_config = AnthropicConfig::from_env()?;
    let model = AnthropicClient::new(api_config);

    let config = PipelineConfig {
        retry: RetryConfig {
            request_timeout: Duration::from_secs(timeout_secs),
            max_retries,
            ..Default::default()
        },
        criteria_table: CriteriaTable::default(),
    };

    let report = match store_dir {
        Some(dir) => {
            let storage = JsonFileStore::new(&dir);
            register_interview(&storage, &interview_id, &candidate);
            let pipeline = Pipeline::new(model, storage, config);
            pipeline.run(&interview_id, &candidate, &transcript).await
        }
        None => {
            info!("No store directory given, results are not persisted");
            let pipeline = Pipeline::new(model, MemoryStore::new(), config);
            pipeline.run(&interview_id, &candidate, &transcript).await
        }
    };

    match report.status {
        ReportStatus::Success => {
            if let Some(score) = report.overall_score {
                info!("Evaluation completed with overall score {:.1}/10", score);
            }
        }
        ReportStatus::Partial => {
            warn!("Evaluation completed but no summary was generated");
        }
        ReportStatus::Error => {
            warn!(
                "Evaluation failed: {}",
                report.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    match &output {
        Some(path) => {
            write_report(&report, path)?;
            info!("Report written to {:?}", path);
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if let Some(path) = &human_readable {
        std::fs::write(path, render_report_text(&report))
            .with_context(|| format!("Failed to write {path:?}"))?;
        info!("Human-readable report written to {:?}", path);
    }

    if report.status == ReportStatus::Error {
        anyhow::bail!(
            "evaluation failed: {}",
            report.error.unwrap_or_else(|| "unknown error".to_string())
        );
    }

    Ok(())
}

fn register_interview(storage: &JsonFileStore, interview_id: &str, candidate: &str) {
    match storage.get_interview(interview_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            if let Err(e) = storage.create_interview(&InterviewRecord::new(interview_id, candidate))
            {
                warn!("Failed to register interview record: {}", e);
            }
        }
        Err(e) => warn!("Failed to look up interview record: {}", e),
    }
}

fn analyze_transcript(input: PathBuf) -> Result<()> {
    info!("Analyzing transcript from {:?}", input);
    let transcript = read_transcript(&input).context("Failed to read input transcript")?;

    let mut exchanges = segment_transcript(&transcript);
    tag_topics(&mut exchanges);

    println!("Transcript Analysis");
    println!("==================");
    println!("Transcript length: {} chars", transcript.len());
    println!("Exchanges: {}", exchanges.len());
    println!(
        "Follow-up questions: {}",
        exchanges.iter().filter(|e| e.is_follow_up()).count()
    );
    println!(
        "Exchanges with code: {}",
        exchanges.iter().filter(|e| e.contains_code).count()
    );
    println!();

    println!("Technical Areas");
    println!("---------------");
    for (topic, count) in topic_counts(&exchanges) {
        println!("{}: {} exchanges", topic, count);
    }
    println!();

    println!("Criteria");
    println!("--------");
    let criteria = CriteriaTable::default().resolve_criteria(&exchanges);
    for criterion in &criteria {
        println!("{}: {}", criterion.name, criterion.description);
    }

    Ok(())
}
