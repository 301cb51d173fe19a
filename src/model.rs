// src/model.rs
//
// Output records of one ingestion pass. All of them are plain data and derive
// `Serialize`; writers outside this crate decide on the file format.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::consts::CHUNK_AREA;

/// Marker anchor point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One polygon vertex as the map service sends it. `y` is usually absent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapePoint {
    pub x: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    pub z: f64,
}

/// A claimed land parcel, deduplicated by `name`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Territory {
    pub name: String,
    pub position: Option<Position>,
    pub level: Option<String>,
    pub balance: f64,
    pub chunks: u64,
    pub territory_area: u64,
    pub players: BTreeSet<String>,
    pub player_count: usize,
    pub nation_name: Option<String>,
    pub nation_level: Option<String>,
    pub nation_capital: Option<String>,
    pub shape_coordinates: Vec<ShapePoint>,
    pub coordinate_count: usize,
    /// Raw popup markup of the first marker that carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_html: Option<String>,
}

impl Territory {
    /// Fold another marker of the same territory into this one.
    ///
    /// Chunks and balance add up, players union. Optional fields keep their
    /// first-seen value and are only filled when still absent. The shape stays
    /// the first marker's, so `coordinate_count` counts one polygon. Chunk and
    /// area sums saturate at `u64::MAX`.
    pub fn merge(&mut self, other: Territory) {
        debug_assert_eq!(self.name, other.name);

        self.chunks = self.chunks.saturating_add(other.chunks);
        self.territory_area = self.chunks.saturating_mul(CHUNK_AREA);
        self.balance += other.balance;
        self.players.extend(other.players);
        self.player_count = self.players.len();

        fill(&mut self.position, other.position);
        fill(&mut self.level, other.level);
        fill(&mut self.nation_name, other.nation_name);
        fill(&mut self.nation_level, other.nation_level);
        fill(&mut self.nation_capital, other.nation_capital);
        fill(&mut self.detail_html, other.detail_html);
    }

    /// Shoelace area of the raw shape in blocks². Zero below three vertices.
    pub fn shape_area(&self) -> f64 {
        let pts = &self.shape_coordinates;
        if pts.len() < 3 {
            return 0.0;
        }
        let twice: f64 = pts
            .iter()
            .zip(pts.iter().cycle().skip(1))
            .map(|(a, b)| a.x * b.z - b.x * a.z)
            .sum();
        twice.abs() / 2.0
    }
}

fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

/// Territories grouped under one owning nation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Nation {
    pub name: String,
    pub level: Option<String>,
    pub capital: Option<String>,
    pub territories: BTreeSet<String>,
    pub total_chunks: u64,
    pub total_balance: f64,
    pub all_players: BTreeSet<String>,
    pub unique_players: usize,
}

/// One shape vertex of one raw marker, with `y` resolved.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CoordinatePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CoordinatePoint {
    pub fn from_shape(p: &ShapePoint, ground_y: f64) -> Self {
        Self { x: p.x, y: p.y.unwrap_or(ground_y), z: p.z }
    }
}

/// Totals over a finished pass.
///
/// `coordinate_count_sum` counts one polygon per deduplicated territory while
/// `total_coordinates` counts every vertex of every raw marker. The two agree
/// only when no territory had more than one marker with a shape, which is what
/// `coordinate_validation` reports.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SummaryReport {
    pub total_territories: usize,
    pub total_nations: usize,
    pub total_coordinates: usize,
    pub skipped_markers: usize,
    pub total_balance: f64,
    pub total_chunks: u64,
    pub total_players: usize,
    pub unique_players: usize,
    pub coordinate_count_sum: usize,
    pub coordinate_validation: bool,
}
