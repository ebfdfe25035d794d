use std::path::PathBuf;
use std::sync::{Arc, Once};

use clap::{Parser, Subcommand};
use nf_extract::StrategyRegistry;
use nf_scheduler::{CrawlScheduler, SchedulerSettings};
use nf_storage::{JsonConfigStore, JsonlEventStore};
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(name = "newsfeeder", about = "Periodic news source crawler", version)]
struct Cli {
    /// JSON file with the source configurations
    #[arg(long, default_value = "sources.json")]
    sources: PathBuf,

    /// JSON-lines file the crawled articles are appended to
    #[arg(long, default_value = "articles.jsonl")]
    out: PathBuf,

    /// Minutes to wait between two sweeps
    #[arg(long, default_value_t = 60)]
    wait_minutes: u64,

    /// Boot with the crawl service disabled
    #[arg(long)]
    disabled: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the crawl loop until Ctrl-C
    Run,
    /// Do a single sweep and exit
    Once,
    /// List the registered strategy identifiers
    Strategies,
}

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .init();
    });
}

fn build_scheduler(cli: &Cli) -> CrawlScheduler {
    let settings = SchedulerSettings {
        enabled: !cli.disabled,
        ..SchedulerSettings::with_wait_minutes(cli.wait_minutes)
    };
    CrawlScheduler::new(
        Arc::new(JsonConfigStore::new(&cli.sources)),
        Arc::new(JsonlEventStore::new(&cli.out)),
        Arc::new(StrategyRegistry::with_defaults()),
        settings,
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Strategies => {
            for name in StrategyRegistry::with_defaults().names() {
                println!("{name}");
            }
        }
        Command::Once => {
            let scheduler = build_scheduler(&cli);
            let stats = scheduler.run_once().await;
            println!(
                "crawled {} sources ({} skipped): {} listed, {} new, {} saved",
                stats.sources, stats.skipped, stats.listed, stats.fresh, stats.saved
            );
        }
        Command::Run => {
            let scheduler = build_scheduler(&cli);
            scheduler.start().await;
            tokio::signal::ctrl_c().await?;
            info!("interrupt received, shutting down");
            scheduler.stop().await;
        }
    }

    Ok(())
}
