mod fetcher;
mod input;
mod output;
mod parser;
mod pipeline;
mod settings;
mod text;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::info;

use fetcher::HttpFetcher;
use pipeline::RunOptions;
use settings::Settings;

#[derive(Parser)]
#[command(
    name = "cluster_scraper",
    about = "Scrape description, video URL and transcript for each cluster page"
)]
struct Cli {
    /// Input CSV with Cluster/URL (or Cluster Name/Cluster URL) columns
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Output CSV path (parent directories are created)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
    /// Max clusters to scrape (default: all rows)
    #[arg(short = 'n', long)]
    limit: Option<usize>,
}

impl Cli {
    fn apply(self, mut settings: Settings) -> (Settings, Option<usize>) {
        if let Some(input) = self.input {
            settings.input = input;
        }
        if let Some(output) = self.output {
            settings.output = output;
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_secs = timeout.max(1);
        }
        (settings, self.limit)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let (settings, limit) = cli.apply(Settings::load()?);
    info!(
        input = %settings.input.display(),
        output = %settings.output.display(),
        timeout_secs = settings.timeout_secs,
        "Starting cluster scrape"
    );

    let fetcher = HttpFetcher::new(&settings.user_agent, settings.timeout())?;
    let opts = RunOptions {
        input: settings.input,
        output: settings.output,
        limit,
    };
    pipeline::run(&fetcher, &opts).await?;

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }
    Ok(())
}
