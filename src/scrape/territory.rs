// src/scrape/territory.rs
use std::collections::BTreeSet;

use serde_json::Value;
use tracing::debug;

use crate::config::consts::{CHUNK_AREA, UNKNOWN_TERRITORY};
use crate::error::MarkerError;
use crate::feed::RawMarker;
use crate::model::Territory;
use crate::specs::detail::parse_detail;

/// Decode one marker from the feed and build its territory record.
pub fn build_territory(id: &str, value: &Value) -> Result<Territory, MarkerError> {
    let marker = RawMarker::decode(id, value)?;
    from_marker(id, &marker)
}

/// Territory record for an already decoded marker.
///
/// A marker without a label lands in the shared `"Unknown"` territory; a label
/// that is present but blank is rejected.
pub fn from_marker(id: &str, marker: &RawMarker) -> Result<Territory, MarkerError> {
    let name = match marker.label.as_deref().map(str::trim) {
        None => s!(UNKNOWN_TERRITORY),
        Some("") => return Err(MarkerError::EmptyLabel { id: s!(id) }),
        Some(label) => s!(label),
    };

    let d = parse_detail(marker.detail.as_deref().unwrap_or_default());

    let players: BTreeSet<String> = d.players.into_iter().collect();
    if let Some(declared) = d.player_count {
        if declared as usize != players.len() {
            debug!(marker = id, territory = %name, declared, listed = players.len(), "player count differs from roster");
        }
    }

    let chunks = d.chunks.unwrap_or(0);
    let territory_area = chunks
        .checked_mul(CHUNK_AREA)
        .ok_or_else(|| MarkerError::ChunkOverflow { id: s!(id), chunks })?;
    let shape = marker.shape().to_vec();

    Ok(Territory {
        name,
        position: marker.position,
        level: d.level,
        balance: d.balance.unwrap_or(0.0),
        chunks,
        territory_area,
        player_count: players.len(),
        players,
        nation_name: d.nation_name,
        nation_level: d.nation_level,
        nation_capital: d.nation_capital,
        coordinate_count: shape.len(),
        shape_coordinates: shape,
        detail_html: marker.detail.clone(),
    })
}
