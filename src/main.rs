use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use lectern::{
    parse_presentation_file, write_report_file, EngineConfig, FeedbackEngine, GeminiClient,
};

#[derive(Parser)]
#[command(name = "lectern")]
#[command(author, version, about = "Presentation feedback synthesis engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the analysis endpoint over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze a single presentation input file and write the report
    Analyze {
        /// Input presentation file (JSON with presentation_id and segments)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the feedback report (JSON); stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, verbose } => {
            setup_logging(verbose);
            let engine = build_engine()?;
            lectern::server::serve(engine, port).await
        }
        Commands::Analyze {
            input,
            output,
            verbose,
        } => {
            setup_logging(verbose);
            let engine = build_engine()?;
            analyze_file(&engine, input, output).await
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn build_engine() -> Result<Arc<FeedbackEngine<GeminiClient>>> {
    let config = EngineConfig::from_env()?;
    info!(
        "engine configured: model={}, timeout={}s, retries={}",
        config.model, config.timeout_secs, config.max_retries
    );
    let client = GeminiClient::new(config.clone())?;
    Ok(Arc::new(FeedbackEngine::new(client, config)))
}

async fn analyze_file(
    engine: &FeedbackEngine<GeminiClient>,
    input: PathBuf,
    output: Option<PathBuf>,
) -> Result<()> {
    info!("Loading presentation from {:?}", input);
    let raw = parse_presentation_file(&input).context("Failed to parse input presentation")?;

    let report = engine
        .analyze(raw)
        .await
        .context("Failed to analyze presentation")?;

    match output {
        Some(path) => {
            write_report_file(&report, &path)?;
            info!("Report written to {:?}", path);
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
