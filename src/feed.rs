// src/feed.rs
//
// BlueMap `markers.json` layout:
//
//   { "<marker-set>": { "label": …, "markers": { "<marker-id>": { marker }, … } }, … }
//
// Each marker carries `label`, `position`, `shape` (polygon vertices) and a
// `detail` HTML popup. Marker ids carry no meaning and are only used in logs.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::consts::MARKERS_FIELD;
use crate::config::options::MarkerSets;
use crate::error::{FeedError, MarkerError};
use crate::model::{Position, ShapePoint};

/// One marker as sent by the map service. Unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawMarker {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub shape: Option<Vec<ShapePoint>>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl RawMarker {
    pub fn decode(id: &str, value: &Value) -> Result<Self, MarkerError> {
        RawMarker::deserialize(value).map_err(|source| MarkerError::Malformed { id: s!(id), source })
    }

    pub fn shape(&self) -> &[ShapePoint] {
        self.shape.as_deref().unwrap_or_default()
    }
}

/// Marker containers pulled out of a feed document, in document order.
#[derive(Clone, Debug, Default)]
pub struct Feed {
    sets: Vec<(String, Map<String, Value>)>,
}

impl Feed {
    /// Every marker of every selected set, in feed order.
    pub fn markers(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.sets
            .iter()
            .flat_map(|(_, markers)| markers.iter().map(|(id, v)| (id.as_str(), v)))
    }

    pub fn len(&self) -> usize {
        self.sets.iter().map(|(_, m)| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|(name, _)| name.as_str())
    }
}

/// Decode the feed document and select its marker sets.
/// Anything short of a usable markers object is fatal.
pub fn parse_feed(text: &str, sets: &MarkerSets) -> Result<Feed, FeedError> {
    let Value::Object(mut root) = serde_json::from_str::<Value>(text)? else {
        return Err(FeedError::NotAnObject);
    };

    let mut out = Vec::new();
    match sets {
        MarkerSets::Named(key) => {
            let set = root
                .remove(key)
                .ok_or_else(|| FeedError::MissingMarkerSet(key.clone()))?;
            let markers = take_markers(set).ok_or_else(|| FeedError::MissingMarkers(key.clone()))?;
            out.push((key.clone(), markers));
        }
        MarkerSets::All => {
            for (key, set) in root {
                if let Some(markers) = take_markers(set) {
                    out.push((key, markers));
                }
            }
            if out.is_empty() {
                return Err(FeedError::NoMarkerSets);
            }
        }
    }

    Ok(Feed { sets: out })
}

fn take_markers(set: Value) -> Option<Map<String, Value>> {
    match set {
        Value::Object(mut obj) => match obj.remove(MARKERS_FIELD)? {
            Value::Object(markers) => Some(markers),
            _ => None,
        },
        _ => None,
    }
}
