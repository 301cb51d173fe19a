// src/scrape/aggregate.rs
use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::options::IngestOptions;
use crate::error::MarkerError;
use crate::model::{CoordinatePoint, Nation, Territory};
use crate::progress::Progress;

use super::territory::build_territory;

/// Finished pass: deduplicated territories, nations, and every raw vertex.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Aggregate {
    pub territories: Vec<Territory>,
    pub nations: Vec<Nation>,
    pub coordinates: Vec<CoordinatePoint>,
    pub skipped: usize,
}

/// Nation as seen during the pass. Totals are rolled up in `finish`.
#[derive(Debug)]
struct NationEntry {
    name: String,
    level: Option<String>,
    capital: Option<String>,
    /// Member territories, first-seen order.
    members: Vec<String>,
    member_set: HashSet<String>,
}

/// Running state of one ingestion pass. Lives for a single `ingest` call.
#[derive(Debug)]
pub struct IngestContext {
    ground_y: f64,
    territories: Vec<Territory>,
    territory_ix: HashMap<String, usize>,
    nations: Vec<NationEntry>,
    nation_ix: HashMap<String, usize>,
    coordinates: Vec<CoordinatePoint>,
    skipped: usize,
}

impl IngestContext {
    pub fn new(opts: &IngestOptions) -> Self {
        Self {
            ground_y: opts.ground_y,
            territories: Vec::new(),
            territory_ix: HashMap::new(),
            nations: Vec::new(),
            nation_ix: HashMap::new(),
            coordinates: Vec::new(),
            skipped: 0,
        }
    }

    /// Fold one raw marker into the pass. A malformed marker is counted and
    /// handed back; nothing else is touched.
    pub fn push_marker(&mut self, id: &str, value: &Value) -> Result<(), MarkerError> {
        let territory = match build_territory(id, value) {
            Ok(t) => t,
            Err(e) => {
                self.skipped += 1;
                return Err(e);
            }
        };
        self.push_territory(territory);
        Ok(())
    }

    /// Fold one built territory into the pass.
    pub fn push_territory(&mut self, territory: Territory) {
        // Every raw occurrence contributes its vertices, duplicates included
        let ground_y = self.ground_y;
        self.coordinates.extend(
            territory
                .shape_coordinates
                .iter()
                .map(|p| CoordinatePoint::from_shape(p, ground_y)),
        );

        if let Some(nation) = territory.nation_name.as_deref() {
            self.record_membership(nation, &territory);
        }

        match self.territory_ix.get(&territory.name) {
            Some(&ix) => {
                debug!(territory = %territory.name, "merging repeated marker");
                self.territories[ix].merge(territory);
            }
            None => {
                self.territory_ix.insert(territory.name.clone(), self.territories.len());
                self.territories.push(territory);
            }
        }
    }

    fn record_membership(&mut self, nation: &str, territory: &Territory) {
        let ix = match self.nation_ix.get(nation) {
            Some(&ix) => ix,
            None => {
                self.nations.push(NationEntry {
                    name: s!(nation),
                    level: None,
                    capital: None,
                    members: Vec::new(),
                    member_set: HashSet::new(),
                });
                self.nation_ix.insert(s!(nation), self.nations.len() - 1);
                self.nations.len() - 1
            }
        };

        let entry = &mut self.nations[ix];
        if entry.level.is_none() {
            entry.level = territory.nation_level.clone();
        }
        if entry.capital.is_none() {
            entry.capital = territory.nation_capital.clone();
        }
        // Guard: a territory joins a nation once, however many markers it has
        if entry.member_set.insert(territory.name.clone()) {
            entry.members.push(territory.name.clone());
        }
    }

    /// Close the pass. Nation totals come from the merged territories, so each
    /// member counts exactly once with all of its markers folded in.
    ///
    /// A territory belongs to the nation its merged record names. When markers
    /// of one territory disagree on the owner, the other nations drop it.
    pub fn finish(self) -> Aggregate {
        let IngestContext { territories, territory_ix, nations, coordinates, skipped, .. } = self;

        let nations = nations
            .into_iter()
            .map(|entry| {
                let mut members = BTreeSet::new();
                let mut total_chunks: u64 = 0;
                let mut total_balance = 0.0;
                let mut all_players = BTreeSet::new();

                for member in &entry.members {
                    let Some(t) = territory_ix.get(member).map(|&ix| &territories[ix]) else {
                        continue;
                    };
                    if t.nation_name.as_deref() != Some(entry.name.as_str()) {
                        debug!(
                            territory = %t.name,
                            nation = %entry.name,
                            owner = t.nation_name.as_deref().unwrap_or_default(),
                            "conflicting owner, territory not counted"
                        );
                        continue;
                    }
                    members.insert(t.name.clone());
                    total_chunks = total_chunks.saturating_add(t.chunks);
                    total_balance += t.balance;
                    all_players.extend(t.players.iter().cloned());
                }

                Nation {
                    name: entry.name,
                    level: entry.level,
                    capital: entry.capital,
                    territories: members,
                    total_chunks,
                    total_balance,
                    unique_players: all_players.len(),
                    all_players,
                }
            })
            .collect();

        Aggregate { territories, nations, coordinates, skipped }
    }
}

/// Run one ingestion pass over `markers` in order.
pub fn ingest<'a, I>(
    markers: I,
    opts: &IngestOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Aggregate
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    let markers = markers.into_iter();
    if let Some(p) = progress.as_deref_mut() {
        p.begin(markers.size_hint().0);
    }

    let mut ctx = IngestContext::new(opts);
    for (id, value) in markers {
        match ctx.push_marker(id, value) {
            Ok(()) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(id);
                }
            }
            Err(e) => {
                warn!("skipping marker: {e}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(id, &e.to_string());
                }
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    ctx.finish()
}
