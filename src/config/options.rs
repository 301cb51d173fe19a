// src/config/options.rs
use std::path::PathBuf;
use super::consts::*;

#[derive(Clone, Debug, PartialEq)]
pub struct RunOptions {
    pub source: FeedSource,
    pub ingest: IngestOptions,
    pub store_dir: PathBuf,
    /// Write a fetched feed to the store so `FeedSource::Cache` can replay it.
    pub cache_feed: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            source: FeedSource::default(),
            ingest: IngestOptions::default(),
            store_dir: PathBuf::from(STORE_DIR),
            cache_feed: true,
        }
    }
}

/// Where the raw `markers.json` comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedSource {
    Url(String),
    File(PathBuf),
    /// Last feed saved under the store dir.
    Cache,
}

impl Default for FeedSource {
    fn default() -> Self {
        FeedSource::Url(s!(MARKERS_URL))
    }
}

/// Which top-level marker sets of the document are ingested.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkerSets {
    Named(String),
    All,
}

impl Default for MarkerSets {
    fn default() -> Self {
        MarkerSets::Named(s!(LANDS_MARKER_SET))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IngestOptions {
    pub marker_sets: MarkerSets,
    /// Y used for shape vertices that carry none.
    pub ground_y: f64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            marker_sets: MarkerSets::default(),
            ground_y: GROUND_Y,
        }
    }
}
