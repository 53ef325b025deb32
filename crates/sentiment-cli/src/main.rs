use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use sentiment_core::analytics::PerformanceSummary;
use sentiment_core::config::{ConfigLoader, SentimentConfig};
use sentiment_core::drift::{generate_drift_report, load_production_data, load_reference_data};
use sentiment_core::export::{export_predictions, export_stats};
use sentiment_core::model::{ModelLoader, SentimentModel};
use sentiment_core::recorder::log_prediction;
use sentiment_core::store::PredictionLog;
use sentiment_server::{shutdown_signal, SentimentServer, DEFAULT_RECENT_LIMIT};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

mod report;

#[derive(Parser, Debug)]
#[clap(
    name = "sentiment",
    author,
    version,
    about = "Serve and monitor the IMDB review sentiment model"
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(long, short, default_value = "sentiment.yaml", help = "Path to the YAML configuration file")]
    config: PathBuf,

    #[clap(long, help = "Prediction log database (overrides the configuration file)")]
    database: Option<PathBuf>,

    #[clap(long, short, help = "Log level (defaults to the configured level)")]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the REST API
    Serve {
        #[clap(long, help = "Server bind address (overrides the configuration file)")]
        bind_addr: Option<String>,

        #[clap(long, help = "Start even if the model cannot be loaded")]
        allow_missing_model: bool,
    },
    /// Score a review offline with the configured model
    Predict {
        text: String,

        #[clap(long, help = "Record the prediction in the prediction log")]
        log: bool,
    },
    /// Aggregate statistics of the prediction log
    Stats,
    /// Most recent predictions, newest first
    Recent {
        #[clap(short, default_value_t = DEFAULT_RECENT_LIMIT)]
        n: usize,
    },
    /// Logged predictions, optionally since a date
    History {
        #[clap(long, help = "Only predictions on or after this date (YYYY-MM-DD)")]
        since: Option<String>,
    },
    /// Volume, confidence and per-class breakdowns of the prediction log
    Performance {
        #[clap(long, help = "Print JSON instead of a text report")]
        json: bool,
    },
    /// Compare logged traffic against the training reference data
    Drift {
        #[clap(long, help = "Write the report as JSON to the configured report path")]
        save: bool,

        #[clap(long, help = "Write the report to this path instead (implies --save)")]
        output: Option<PathBuf>,
    },
    /// Write the prediction log, or its statistics, to a CSV file
    Export {
        #[clap(long, short, help = "Destination CSV file")]
        output: PathBuf,

        #[clap(long, help = "Export the aggregate statistics table instead of every prediction")]
        stats: bool,
    },
    /// Delete every logged prediction
    Clear {
        #[clap(long, help = "Confirm the deletion")]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::load_or_default(&cli.config).await?;

    env_logger::Builder::new()
        .filter_level(log_level(cli.log_level.as_deref(), &config))
        .init();

    if let Some(database) = cli.database {
        config.storage.database_path = database;
    }

    match cli.command {
        Commands::Serve {
            bind_addr,
            allow_missing_model,
        } => {
            if let Some(addr) = bind_addr {
                config.server.bind_addr = addr;
            }
            let server = SentimentServer::from_config(&config, !allow_missing_model)?;
            println!("Serving on http://{}", server.config().bind_addr);
            server.serve_with_shutdown(shutdown_signal()).await?;
        }
        Commands::Predict { text, log } => predict(&config, &text, log)?,
        Commands::Stats => {
            let stats = open_log(&config)?.stats()?;
            print!("{}", report::render_stats(&stats));
        }
        Commands::Recent { n } => {
            let records = open_log(&config)?.recent_predictions(n)?;
            print!("{}", report::render_records(&records));
        }
        Commands::History { since } => {
            let since = since
                .as_deref()
                .map(|s| {
                    NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
                })
                .transpose()?;
            let records = open_log(&config)?.predictions_since(since)?;
            print!("{}", report::render_records(&records));
            println!("{} predictions", records.len());
        }
        Commands::Performance { json } => {
            let records = open_log(&config)?.all_predictions(None)?;
            let summary = PerformanceSummary::from_records(&records);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", report::render_performance(&summary));
            }
        }
        Commands::Drift { save, output } => drift(&config, save, output)?,
        Commands::Export { output, stats } => export(&config, &output, stats)?,
        Commands::Clear { yes } => {
            if !yes {
                anyhow::bail!("Refusing to delete the prediction log without --yes");
            }
            let deleted = open_log(&config)?.clear_all_predictions()?;
            println!("Deleted {} predictions", deleted);
        }
    }

    Ok(())
}

/// The `--log-level` flag wins over the configured level; unparseable levels fall back to info.
fn log_level(flag: Option<&str>, config: &SentimentConfig) -> LevelFilter {
    flag.unwrap_or(config.logging.level.as_str())
        .parse()
        .unwrap_or(LevelFilter::Info)
}

fn open_log(config: &SentimentConfig) -> Result<PredictionLog> {
    let path = &config.storage.database_path;
    PredictionLog::open(path)
        .with_context(|| format!("Failed to open prediction log {}", path.display()))
}

fn predict(config: &SentimentConfig, text: &str, record: bool) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("Text must not be empty");
    }
    let settings = &config.model;
    let model = ModelLoader::load(&settings.dir, &settings.metrics_path, settings.version.clone())
        .with_context(|| format!("Failed to load model from {}", settings.dir.display()))?;

    let start = Instant::now();
    let prediction = model.predict(text)?;
    let response_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    print!("{}", report::render_prediction(text, &prediction));

    if record {
        let id = log_prediction(&open_log(config)?, text, &prediction, Some(response_time_ms))?;
        println!("Logged as prediction {}", id);
    }
    Ok(())
}

fn drift(config: &SentimentConfig, save: bool, output: Option<PathBuf>) -> Result<()> {
    let settings = &config.drift;
    let reference = load_reference_data(&settings.reference_path, settings.sample_size, settings.seed)
        .with_context(|| {
            format!(
                "Failed to load reference data from {}",
                settings.reference_path.display()
            )
        })?;
    let production = load_production_data(&open_log(config)?)?;
    let report = generate_drift_report(&reference, &production, &settings.thresholds)?;
    print!("{}", report::render_drift(&report));

    if save || output.is_some() {
        let path = output.unwrap_or_else(|| settings.report_path.clone());
        report.save(&path)?;
        println!("\nReport saved to {}", path.display());
    }
    Ok(())
}

fn export(config: &SentimentConfig, output: &Path, stats: bool) -> Result<()> {
    let log = open_log(config)?;
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let writer = BufWriter::new(file);
    if stats {
        export_stats(&log.stats()?, writer)?;
        println!("Statistics written to {}", output.display());
    } else {
        let exported = export_predictions(&log.all_predictions(None)?, writer)?;
        println!("Exported {} predictions to {}", exported, output.display());
    }
    Ok(())
}
