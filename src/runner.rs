// src/runner.rs
use std::fs;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    config::consts::FETCH_TIMEOUT_SECS,
    config::options::{FeedSource, IngestOptions, RunOptions},
    core::net,
    error::{Error, Result},
    feed::parse_feed,
    model::SummaryReport,
    progress::Progress,
    scrape::{self, Aggregate},
    store,
};

/// Everything one run produced, ready for external writers.
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    #[serde(flatten)]
    pub data: Aggregate,
    pub summary: SummaryReport,
}

/// Top-level runner: acquire the feed, ingest it, summarize.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(opts: &RunOptions, progress: Option<&mut dyn Progress>) -> Result<RunReport> {
    let text = acquire_feed(opts)?;
    run_text(&text, &opts.ingest, progress)
}

/// Ingest an already fetched feed document.
pub fn run_text(
    text: &str,
    opts: &IngestOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<RunReport> {
    let feed = parse_feed(text, &opts.marker_sets)?;
    info!(
        markers = feed.len(),
        sets = ?feed.set_names().collect::<Vec<_>>(),
        "feed decoded"
    );

    // Collected so progress gets an exact total
    let markers: Vec<_> = feed.markers().collect();
    let data = scrape::ingest(markers, opts, progress);
    let summary = scrape::summarize(&data);

    log_statistics(&summary);
    Ok(RunReport { data, summary })
}

/// Raw feed text from the configured source.
/// A fetched feed is also written to the store; failing that only warns.
pub fn acquire_feed(opts: &RunOptions) -> Result<String> {
    match &opts.source {
        FeedSource::Url(url) => {
            info!(%url, "fetching markers");
            let text = net::http_get(url, Duration::from_secs(FETCH_TIMEOUT_SECS))?;
            if opts.cache_feed {
                match store::save_feed(&opts.store_dir, &text) {
                    Ok(path) => info!(path = %path.display(), bytes = text.len(), "feed cached"),
                    Err(e) => warn!("could not cache feed: {e}"),
                }
            }
            Ok(text)
        }
        FeedSource::File(path) => {
            info!(path = %path.display(), "reading markers");
            fs::read_to_string(path).map_err(|e| Error::io(path, e))
        }
        FeedSource::Cache => {
            info!(path = %store::feed_path(&opts.store_dir).display(), "replaying cached markers");
            store::load_feed(&opts.store_dir)
        }
    }
}

fn log_statistics(s: &SummaryReport) {
    info!("=== FINAL STATISTICS ===");
    info!("  {} coordinate points", fmt_thousands(s.total_coordinates as u64));
    info!("  {} nations", s.total_nations);
    info!("  {} territories", s.total_territories);
    info!("  ${} total balance", fmt_money(s.total_balance));
    info!("  {} claimed chunks", fmt_thousands(s.total_chunks));
    info!("  {} players ({} unique)", fmt_thousands(s.total_players as u64), s.unique_players);
    if s.skipped_markers > 0 {
        warn!("{} markers skipped", s.skipped_markers);
    }
    if !s.coordinate_validation {
        warn!(
            per_territory = s.coordinate_count_sum,
            raw = s.total_coordinates,
            "coordinate counts differ; some territories span several markers"
        );
    }
}

/// `1234567` → `"1,234,567"`
fn fmt_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1234.5` → `"1,234.50"`
fn fmt_money(v: f64) -> String {
    let cents = (v.abs() * 100.0).round() as u64;
    let sign = if v < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{}.{:02}", fmt_thousands(cents / 100), cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands() {
        assert_eq!(fmt_thousands(0), "0");
        assert_eq!(fmt_thousands(999), "999");
        assert_eq!(fmt_thousands(1000), "1,000");
        assert_eq!(fmt_thousands(1234567), "1,234,567");
    }

    #[test]
    fn money() {
        assert_eq!(fmt_money(0.0), "0.00");
        assert_eq!(fmt_money(12345.67), "12,345.67");
        assert_eq!(fmt_money(1234.5), "1,234.50");
    }

    #[test]
    fn run_text_rejects_bad_feed() {
        let err = run_text("[]", &IngestOptions::default(), None).unwrap_err();
        assert!(matches!(err, Error::Feed(_)));
    }

    #[test]
    fn run_text_empty_set_yields_valid_report() {
        let doc = r#"{ "me.angeschossen.lands": { "markers": {} } }"#;
        let report = run_text(doc, &IngestOptions::default(), None).unwrap();
        assert_eq!(report.summary.total_territories, 0);
        assert!(report.summary.coordinate_validation);
    }
}
