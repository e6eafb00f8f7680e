//! Turn raw Overpass elements into a routable [`RailNetwork`].
//!
//! Ways contribute edges between consecutive vertices; point records only
//! become graph nodes when a way references them. Station-tagged points are
//! collected afterwards and snapped to their nearest graph node.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::geo::GeoPoint;
use crate::graph::{Graph, NodeId};
use crate::osm::{OsmElement, OsmNode};

/// Minimum Jaro-Winkler similarity for a station name to be suggested.
const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

/// Named railway station snapped to the routing graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: i64,
    pub name: String,
    pub position: GeoPoint,
    /// Nearest graph node at build time; `None` when the graph is empty.
    pub node: Option<NodeId>,
}

/// Graph and stations produced by a single data load.
#[derive(Debug, Clone, Default)]
pub struct RailNetwork {
    pub graph: Graph,
    /// Stations in input element order.
    pub stations: Vec<Station>,
}

impl RailNetwork {
    /// Lookup a station by its exact name. The first station in input order wins.
    pub fn station_by_name(&self, name: &str) -> Option<&Station> {
        self.stations.iter().find(|station| station.name == name)
    }

    /// First station snapped to `node`, if any.
    pub fn station_at_node(&self, node: NodeId) -> Option<&Station> {
        self.stations
            .iter()
            .find(|station| station.node == Some(node))
    }

    /// Stations that can serve as route endpoints: snapped to a node, one per node.
    pub fn selectable_stations(&self) -> Vec<&Station> {
        let mut seen = HashSet::new();
        self.stations
            .iter()
            .filter(|station| match station.node {
                Some(node) => seen.insert(node),
                None => false,
            })
            .collect()
    }

    /// Station names similar to `name`, best match first, at most `limit` entries.
    pub fn fuzzy_station_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .stations
            .iter()
            .map(|station| {
                let score = strsim::jaro_winkler(&needle, &station.name.to_lowercase());
                (score, station.name.as_str())
            })
            .filter(|(score, _)| *score >= FUZZY_MATCH_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));

        let mut names: Vec<String> = Vec::new();
        for (_, candidate) in scored {
            if names.len() == limit {
                break;
            }
            if !names.iter().any(|existing| existing == candidate) {
                names.push(candidate.to_string());
            }
        }
        names
    }
}

/// Build the routing graph and station list from raw elements.
///
/// Segments whose vertices are missing from the element set are skipped with a
/// warning; the remainder of the way is still used.
pub fn build_network(elements: &[OsmElement]) -> RailNetwork {
    let points: HashMap<i64, &OsmNode> = elements
        .iter()
        .filter_map(|element| match element {
            OsmElement::Node(node) => Some((node.id, node)),
            _ => None,
        })
        .collect();

    let mut graph = Graph::new();
    let mut skipped_segments = 0usize;

    for element in elements {
        let OsmElement::Way(way) = element else {
            continue;
        };
        for pair in way.nodes.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (Some(point_a), Some(point_b)) = (points.get(&a), points.get(&b)) else {
                warn!(way = way.id, from = a, to = b, "skipping segment with unknown vertex");
                skipped_segments += 1;
                continue;
            };
            graph.insert_edge(a, point_a.position(), b, point_b.position());
        }
    }

    let stations: Vec<Station> = elements
        .iter()
        .filter_map(|element| match element {
            OsmElement::Node(node) if node.is_station() => Some(snap_station(&graph, node)),
            _ => None,
        })
        .collect();

    info!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        stations = stations.len(),
        skipped_segments,
        "built rail network"
    );

    RailNetwork { graph, stations }
}

fn snap_station(graph: &Graph, point: &OsmNode) -> Station {
    let position = point.position();
    let node = graph.nearest_node(&position);
    let name = point
        .tags
        .get("name")
        .cloned()
        .unwrap_or_else(|| format!("Station {}", point.id));
    debug!(station = point.id, name = %name, node = ?node, "snapped station");

    Station {
        id: point.id,
        name,
        position,
        node,
    }
}
