use clap::Parser;
use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use boardreport::models::ReportOutcome;
use boardreport::report::{format_preview, format_summary_table};
use boardreport::{
    Config, Error, MondayClient, PipelineConfig, ReportConfig, ReportExporter, ReportPipeline,
};

#[derive(Parser, Debug)]
#[command(name = "boardreport")]
#[command(version = "0.1.0")]
#[command(about = "Export board items and per-geography status counts as CSV")]
struct Args {
    /// Board configuration document
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Directory receiving raw_items.csv and summary_by_geo.csv
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Maximum number of board items to fetch (overrides MAX_ITEMS)
    #[arg(long)]
    max_items: Option<usize>,

    /// Items requested per page (overrides PAGE_SIZE)
    #[arg(long)]
    page_size: Option<u32>,

    /// Per-request timeout in seconds (overrides REQUEST_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Wall-clock budget for the whole run, in seconds
    #[arg(long, default_value = "170")]
    deadline_secs: u64,

    /// Print a ranked preview of the top N geographies
    #[arg(long)]
    preview: Option<usize>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {:#}", e);
    }

    let args = Args::parse();
    let deadline = Duration::from_secs(args.deadline_secs);

    let result = match tokio::time::timeout(deadline, run(&args)).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout(deadline)),
    };

    match result {
        Ok(outcome) => {
            print_outcome(&outcome, &args);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_logging() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("boardreport=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

async fn run(args: &Args) -> boardreport::Result<ReportOutcome> {
    // Configuration first: nothing touches the network before both are valid
    let report = ReportConfig::load(&args.config)?;
    let mut config = Config::from_env()?;

    if let Some(max_items) = args.max_items {
        config.max_items = max_items;
    }
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    if let Some(secs) = args.timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
    }
    config.validate()?;

    let client = MondayClient::new(&config)?;
    let pipeline = ReportPipeline::from_config(
        client,
        &report,
        PipelineConfig::new(&report, &config),
        ReportExporter::new(&args.output_dir),
    );

    pipeline.run().await
}

fn print_outcome(outcome: &ReportOutcome, args: &Args) {
    println!("{}", format_summary_table(&outcome.summary));

    if let Some(top) = args.preview {
        println!("{}\n", format_preview(&outcome.summary, top));
    }

    if outcome.is_empty() {
        println!(
            "No items survived filtering ({} fetched), empty report written.",
            outcome.fetched
        );
    }

    println!("Files saved:");
    println!(" - {}", outcome.paths.raw_items.display());
    println!(" - {}", outcome.paths.summary_by_geo.display());
    tracing::info!(
        "Report for board '{}' generated at {}",
        outcome.board_name,
        outcome.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}
