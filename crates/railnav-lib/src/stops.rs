//! User-defined stops that live independently of the loaded graph.
//!
//! Stops are addressed by their position in the registry and are only tied to
//! a graph node when a route is planned, so the same stop may resolve to a
//! different node after the network is reloaded.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::graph::{Graph, NodeId};

/// Default file name for persisted stops inside the data directory.
pub const STOPS_FILENAME: &str = "stops.json";

/// A user-created stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Stop {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }

    /// Create a stop, rejecting coordinates that cannot be stored or snapped.
    pub fn try_new(name: impl Into<String>, lat: f64, lon: f64) -> Result<Self> {
        let stop = Self::new(name, lat, lon);
        stop.validate()?;
        Ok(stop)
    }

    /// Check that both coordinates are finite and within their degree ranges.
    pub fn validate(&self) -> Result<()> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lon_ok = self.lon.is_finite() && (-180.0..=180.0).contains(&self.lon);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(Error::InvalidStopCoordinates {
                name: self.name.clone(),
                lat: self.lat,
                lon: self.lon,
            })
        }
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// Append-only list of stops with stable positional identifiers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopRegistry {
    stops: Vec<Stop>,
}

impl StopRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_stops(stops: Vec<Stop>) -> Self {
        Self { stops }
    }

    /// Append a stop and return its index.
    pub fn push(&mut self, stop: Stop) -> usize {
        self.stops.push(stop);
        self.stops.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Stop> {
        self.stops.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stop> {
        self.stops.iter()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Snap the stop at `index` to the nearest node of `graph`.
    ///
    /// Returns `None` when the index is out of range or the graph is empty.
    pub fn resolve_to_node(&self, index: usize, graph: &Graph) -> Option<NodeId> {
        let stop = self.stops.get(index)?;
        graph.nearest_node(&stop.position())
    }

    /// Serialize all stops as a pretty-printed JSON array.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.stops)?)
    }

    /// Append stops from a JSON array and return how many were added.
    ///
    /// Entries are not deduplicated against existing stops.
    pub fn import_json(&mut self, raw: &str) -> Result<usize> {
        let value: Value = serde_json::from_str(raw)?;
        if !value.is_array() {
            return Err(Error::StopImportNotList);
        }
        let imported: Vec<Stop> = serde_json::from_value(value)?;
        imported.iter().try_for_each(Stop::validate)?;
        let count = imported.len();
        self.stops.extend(imported);
        debug!(count, total = self.stops.len(), "imported stops");
        Ok(count)
    }

    /// Load persisted stops.
    ///
    /// A missing file yields an empty registry. An unreadable or corrupt file
    /// is logged and also yields an empty registry. Individual entries that
    /// fail to parse or carry invalid coordinates are logged and skipped.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Self::new(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read stops; starting empty");
                return Self::new();
            }
        };

        let entries = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring corrupt stops file");
                return Self::new();
            }
        };

        let stops = entries
            .into_iter()
            .enumerate()
            .filter_map(|(position, entry)| {
                let parsed = serde_json::from_value::<Stop>(entry)
                    .map_err(Error::from)
                    .and_then(|stop| stop.validate().map(|()| stop));
                match parsed {
                    Ok(stop) => Some(stop),
                    Err(err) => {
                        warn!(
                            path = %path.display(),
                            position,
                            error = %err,
                            "skipping invalid stop"
                        );
                        None
                    }
                }
            })
            .collect();
        Self::from_stops(stops)
    }

    /// Persist all stops to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.stops.iter().try_for_each(Stop::validate)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.export_json()?)?;
        debug!(path = %path.display(), count = self.stops.len(), "saved stops");
        Ok(())
    }
}
