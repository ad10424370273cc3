use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use letter_bias::discovery::{self, DiscoveryConfig};
use letter_bias::reader::{LetterReader, ReaderConfig};
use letter_bias::{Analyzer, AnalyzerConfig, Assessment};

#[derive(Parser, Debug)]
#[command(name = "letter-bias")]
#[command(about = "Flags gender-biased language patterns in recommendation letters")]
#[command(version)]
struct Args {
    /// Letter files, or directories to scan for *.txt letters
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Publication mentions a letter needs (each quoted title counts 0.25)
    #[arg(long)]
    min_publications: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Abort on first unreadable letter or failing detector
    #[arg(long)]
    fail_fast: bool,

    /// Suppress console progress bar
    #[arg(long)]
    no_progress: bool,

    /// JSON configuration file; command-line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replacement effort word list (one entry per line)
    #[arg(long)]
    effort_words: Option<PathBuf>,

    /// Replacement accomplishment word list (one entry per line)
    #[arg(long)]
    accomplishment_words: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Result for one letter in the run output
#[derive(Debug, Serialize)]
struct LetterOutcome {
    path: String,
    bias_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    assessment: Option<Assessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    // WHY: JSON lines keep logs machine-readable when runs are collected
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(args: &Args) -> Result<AnalyzerConfig> {
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::from_json_path(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    if let Some(min) = args.min_publications {
        config.min_publications = min;
    }
    if let Some(path) = &args.effort_words {
        config.effort_words = Some(path.clone());
    }
    if let Some(path) = &args.accomplishment_words {
        config.accomplishment_words = Some(path.clone());
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn progress_bar(total: u64, hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} letters {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("##-"),
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    Ok(bar)
}

fn print_text(outcomes: &[LetterOutcome]) {
    for outcome in outcomes {
        println!("== {} ==", outcome.path);
        if let Some(error) = &outcome.error {
            println!("  ERROR: {error}");
            continue;
        }
        if let Some(assessment) = &outcome.assessment {
            for report in &assessment.reports {
                print!("{report}");
            }
            for failure in &assessment.failures {
                println!("  DETECTOR FAILED: {failure}");
            }
        }
        println!("Bias score: {:+.2}", outcome.bias_score);
        println!();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_json);

    info!("Starting letter-bias");
    info!(?args, "Parsed CLI arguments");

    let config = load_config(&args)?;
    let analyzer = Analyzer::default_detectors(&config).context("Failed to set up detectors")?;

    let discovery_config = DiscoveryConfig {
        fail_fast: args.fail_fast,
        ..Default::default()
    };
    let discovered = discovery::collect_discovered_letters(args.paths.clone(), discovery_config)
        .await
        .context("Letter discovery failed")?;

    let mut outcomes = Vec::with_capacity(discovered.len());
    let mut readable = Vec::new();
    for letter in discovered {
        match letter.error {
            Some(error) => outcomes.push(LetterOutcome {
                path: letter.path.display().to_string(),
                bias_score: 0.0,
                assessment: None,
                error: Some(error),
            }),
            None => readable.push(letter.path),
        }
    }
    if readable.is_empty() && outcomes.is_empty() {
        anyhow::bail!("No letters found under the given paths");
    }
    info!("Discovered {} letters", readable.len());

    let reader = LetterReader::new(ReaderConfig {
        fail_fast: args.fail_fast,
        ..Default::default()
    });
    let reads = reader
        .read_letters_batch(&readable)
        .await
        .context("Failed to read letters")?;

    let bar = progress_bar(reads.len() as u64, args.no_progress)?;
    for read in reads {
        let path = read.stats.file_path.clone();
        bar.set_message(path.clone());
        let outcome = match read.document {
            Some(document) => {
                let assessment = analyzer.analyze_parallel(&document);
                if args.fail_fast {
                    if let Some(failure) = assessment.failures.first() {
                        bar.abandon();
                        anyhow::bail!("Analysis of {} failed: {}", path, failure);
                    }
                }
                LetterOutcome {
                    path,
                    bias_score: assessment.bias_score(),
                    assessment: Some(assessment),
                    error: None,
                }
            }
            None => LetterOutcome {
                path,
                bias_score: 0.0,
                assessment: None,
                error: read.stats.read_error,
            },
        };
        bar.inc(1);
        outcomes.push(outcome);
    }
    bar.finish_and_clear();

    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
    if failed > 0 {
        warn!("{} letters could not be analyzed", failed);
    }

    match args.format {
        OutputFormat::Text => print_text(&outcomes),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&outcomes).context("Failed to serialize results")?;
            println!("{json}");
        }
    }

    info!("Analyzed {} letters", outcomes.len() - failed);
    Ok(())
}
