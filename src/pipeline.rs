use std::path::PathBuf;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::fetcher::PageSource;
use crate::input::{self, ClusterRow};
use crate::output::{self, ClusterResult};
use crate::parser::{self, PageFields};

/// Pipeline stages, entered strictly in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Idle,
    Loading,
    Iterating,
    Writing,
    Done,
}

fn enter(stage: &mut Stage, next: Stage) {
    debug_assert!(next > *stage, "stage {:?} after {:?}", next, stage);
    debug!(from = ?*stage, to = ?next, "pipeline stage");
    *stage = next;
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Only iterate the first `limit` input rows.
    pub limit: Option<usize>,
}

/// Row counts for one run. `total == ok + failed + skipped`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub total: usize,
    pub ok: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Load the input table, scrape every cluster, write the output table.
/// Only an unreadable input or an unwritable output aborts the run.
pub async fn run<S: PageSource + ?Sized>(source: &S, opts: &RunOptions) -> Result<RunStats> {
    let mut stage = Stage::Idle;

    enter(&mut stage, Stage::Loading);
    let table = input::read_clusters(&opts.input)?;
    println!("CSV Headers: {:?}", table.headers);

    let mut rows = table.rows;
    if let Some(limit) = opts.limit {
        rows.truncate(limit);
    }

    enter(&mut stage, Stage::Iterating);
    let pb = ProgressBar::new(rows.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] {bar:40} {pos}/{len} clusters ({per_sec})")?
            .progress_chars("=> "),
    );
    pb.set_message("Scraping Cluster Data");
    let (results, stats) = scrape_clusters(source, rows, &pb).await;
    pb.finish_and_clear();

    enter(&mut stage, Stage::Writing);
    output::write_results(&opts.output, &results)?;

    enter(&mut stage, Stage::Done);
    println!("Data saved to {}", opts.output.display());
    println!(
        "{} clusters ({} ok, {} fetch errors, {} skipped)",
        stats.total, stats.ok, stats.failed, stats.skipped
    );
    info!(
        total = stats.total,
        ok = stats.ok,
        failed = stats.failed,
        skipped = stats.skipped,
        "Run complete"
    );
    Ok(stats)
}

/// Fetch and extract each row in order, one request at a time. Rows missing
/// a name or URL are dropped; failed fetches keep their row with every
/// field absent.
pub async fn scrape_clusters<S: PageSource + ?Sized>(
    source: &S,
    rows: Vec<ClusterRow>,
    pb: &ProgressBar,
) -> (Vec<ClusterResult>, RunStats) {
    let mut stats = RunStats {
        total: rows.len(),
        ..Default::default()
    };
    let mut results = Vec::with_capacity(rows.len());

    for row in rows {
        let line = row.line;
        let Some(cluster) = row.into_input() else {
            pb.suspend(|| warn!("Skipping line {}: missing 'Cluster' or 'URL' value", line));
            stats.skipped += 1;
            pb.inc(1);
            continue;
        };

        let fields = match source.fetch(&cluster.url).await {
            Ok(html) => {
                stats.ok += 1;
                parser::extract(&html)
            }
            Err(e) => {
                pb.suspend(|| warn!("Fetch failed: {}", e));
                stats.failed += 1;
                PageFields::missing()
            }
        };

        results.push(ClusterResult::new(cluster.name, fields));
        pb.inc(1);
    }

    (results, stats)
}
