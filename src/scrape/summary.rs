// src/scrape/summary.rs
use std::collections::HashSet;

use crate::model::{CoordinatePoint, Nation, SummaryReport, Territory};

use super::aggregate::Aggregate;

/// Cross-checked totals over a finished pass.
pub fn summarize(agg: &Aggregate) -> SummaryReport {
    let mut report = summarize_parts(&agg.territories, &agg.nations, &agg.coordinates);
    report.skipped_markers = agg.skipped;
    report
}

/// Totals over the three output collections.
///
/// `coordinate_validation` compares the per-territory vertex counts with the raw
/// vertex list. A territory fed by several shaped markers keeps one polygon but
/// adds every marker's vertices to the list, so `false` here means "repeated
/// markers were folded", not corrupt data. It is left to the caller to surface.
pub fn summarize_parts(
    territories: &[Territory],
    nations: &[Nation],
    coordinates: &[CoordinatePoint],
) -> SummaryReport {
    let mut unique: HashSet<&str> = HashSet::new();
    let mut report = SummaryReport {
        total_territories: territories.len(),
        total_nations: nations.len(),
        total_coordinates: coordinates.len(),
        ..SummaryReport::default()
    };

    for t in territories {
        report.total_balance += t.balance;
        report.total_chunks = report.total_chunks.saturating_add(t.chunks);
        report.total_players += t.player_count;
        report.coordinate_count_sum += t.coordinate_count;
        unique.extend(t.players.iter().map(String::as_str));
    }

    report.unique_players = unique.len();
    report.coordinate_validation = report.coordinate_count_sum == report.total_coordinates;
    report
}
