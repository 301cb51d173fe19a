// src/cli.rs
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};

use crate::config::consts::{GROUND_Y, LANDS_MARKER_SET, MARKERS_URL, STORE_DIR};
use crate::config::options::{FeedSource, IngestOptions, MarkerSets, RunOptions};
use crate::progress::Progress;

/// Scrape BlueMap Lands markers into territories, nations and totals.
#[derive(Debug, Parser)]
#[command(name = "lands_scrape", version, about)]
pub struct Args {
    /// Markers feed URL
    #[arg(long, default_value = MARKERS_URL, conflicts_with_all = ["input", "offline"])]
    pub url: String,

    /// Read the feed from a local JSON file instead of fetching
    #[arg(short, long, conflicts_with = "offline")]
    pub input: Option<PathBuf>,

    /// Replay the last fetched feed from the store
    #[arg(long)]
    pub offline: bool,

    /// Marker set key inside the feed
    #[arg(long, default_value = LANDS_MARKER_SET, conflicts_with = "all_sets")]
    pub marker_set: String,

    /// Ingest every marker set in the feed
    #[arg(long)]
    pub all_sets: bool,

    /// Y for shape vertices that carry none
    #[arg(long, default_value_t = GROUND_Y)]
    pub ground_y: f64,

    /// Cache and log directory
    #[arg(long, default_value = STORE_DIR)]
    pub store_dir: PathBuf,

    /// Do not cache the fetched feed
    #[arg(long)]
    pub no_cache: bool,

    /// Print the full report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Debug logging for this crate
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn to_options(&self) -> RunOptions {
        let source = if self.offline {
            FeedSource::Cache
        } else if let Some(path) = &self.input {
            FeedSource::File(path.clone())
        } else {
            FeedSource::Url(self.url.clone())
        };

        let marker_sets = if self.all_sets {
            MarkerSets::All
        } else {
            MarkerSets::Named(self.marker_set.clone())
        };

        RunOptions {
            source,
            ingest: IngestOptions { marker_sets, ground_y: self.ground_y },
            store_dir: self.store_dir.clone(),
            cache_feed: !self.no_cache,
        }
    }
}

/// Counts markers and logs the outcome of the pass.
#[derive(Default)]
struct CliProgress {
    total: usize,
    done: usize,
    failed: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        info!("{msg}");
    }
    fn item_done(&mut self, _id: &str) {
        self.done += 1;
    }
    fn item_failed(&mut self, id: &str, reason: &str) {
        self.failed += 1;
        debug!(marker = id, reason, "marker failed");
    }
    fn finish(&mut self) {
        let msg = format!("processed {}/{} markers ({} skipped)", self.done, self.total, self.failed);
        self.log(&msg);
    }
}

pub fn run(args: Args) -> crate::Result<()> {
    let opts = args.to_options();
    crate::log::init(&opts.store_dir, args.verbose)?;

    let mut progress = CliProgress::default();
    let report = crate::runner::run(&opts, Some(&mut progress))?;

    if args.json {
        let mut out = io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, &report)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(out))
            .map_err(|e| crate::Error::io("<stdout>", e))?;
    }
    Ok(())
}
