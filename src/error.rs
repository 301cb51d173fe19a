// src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The feed document itself is unusable. Aborts the run.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("feed top level is not a JSON object")]
    NotAnObject,

    #[error("marker set '{0}' not found in feed")]
    MissingMarkerSet(String),

    #[error("marker set '{0}' has no markers object")]
    MissingMarkers(String),

    #[error("feed contains no marker sets")]
    NoMarkerSets,
}

/// One marker could not be turned into a territory. The marker is skipped.
#[derive(Debug, Error)]
pub enum MarkerError {
    #[error("marker {id}: malformed: {source}")]
    Malformed {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("marker {id}: empty label")]
    EmptyLabel { id: String },

    #[error("marker {id}: {chunks} chunks is out of range")]
    ChunkOverflow { id: String, chunks: u64 },
}

impl MarkerError {
    pub fn id(&self) -> &str {
        match self {
            MarkerError::Malformed { id, .. }
            | MarkerError::EmptyLabel { id }
            | MarkerError::ChunkOverflow { id, .. } => id,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("fetch failed for {url}: {source}")]
    Net {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("logging setup failed: {0}")]
    Log(String),
}

impl Error {
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Error::Io { path: path.as_ref().display().to_string(), source }
    }
}
