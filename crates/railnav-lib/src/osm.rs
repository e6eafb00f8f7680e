//! Raw OpenStreetMap element model as returned by the Overpass API.
//!
//! Only the parts of the `[out:json]` document the graph builder consumes are
//! modelled: nodes with coordinates and tags, and ways as ordered node lists.
//! Any other element type is accepted and ignored.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::GeoPoint;

/// Free-form OSM tag mapping.
pub type Tags = BTreeMap<String, String>;

/// Tag/value combinations that mark a node as a railway station.
const STATION_TAGS: [(&str, &str); 4] = [
    ("railway", "station"),
    ("station", "rail"),
    ("public_transport", "station"),
    ("railway", "halt"),
];

/// Point record with coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsmNode {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: Tags,
}

impl OsmNode {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    pub fn is_station(&self) -> bool {
        is_station(&self.tags)
    }
}

/// Line record referencing an ordered list of node identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsmWay {
    pub id: i64,
    #[serde(default)]
    pub nodes: Vec<i64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: Tags,
}

/// Heterogeneous element of an Overpass result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OsmElement {
    Node(OsmNode),
    Way(OsmWay),
    #[serde(other)]
    Other,
}

/// Top-level Overpass JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OsmElement>,
}

impl OverpassResponse {
    /// Parse an Overpass JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Load a previously cached Overpass JSON document from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => Error::NetworkDataNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Io(err),
        })?;
        Self::from_json_str(&raw)
    }

    pub fn node_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|element| matches!(element, OsmElement::Node(_)))
            .count()
    }

    pub fn way_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|element| matches!(element, OsmElement::Way(_)))
            .count()
    }
}

/// Whether the tags describe a railway station, halt or public-transport station.
pub fn is_station(tags: &Tags) -> bool {
    STATION_TAGS
        .iter()
        .any(|(key, value)| tags.get(*key).map(String::as_str) == Some(*value))
}
