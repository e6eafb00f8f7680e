//! Route planning between graph nodes and user stops.
//!
//! This module provides:
//! - [`Endpoint`] - A route endpoint, either a graph node or a stop reference
//! - [`RouteRequest`] - Pair of endpoints to connect
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//! - [`resolve_endpoint_query`] - Turn user text into an [`Endpoint`]
//!
//! # Example
//!
//! ```ignore
//! use railnav_lib::{build_network, plan_route, Endpoint, OverpassResponse, RouteRequest, StopRegistry};
//!
//! let response = OverpassResponse::from_path("network.json".as_ref())?;
//! let network = build_network(&response.elements);
//! let request = RouteRequest::new(Endpoint::Node(1), Endpoint::Stop(0));
//! let plan = plan_route(&network.graph, &StopRegistry::new(), &request)?;
//! println!("Route: {} hops, {:.0} m", plan.hop_count(), plan.distance_meters);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info};

use crate::builder::RailNetwork;
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::path::{find_route_dijkstra, route_distance};
use crate::stops::StopRegistry;

/// Maximum number of station names suggested for an unknown name.
const MAX_SUGGESTIONS: usize = 3;

/// Reference to a route endpoint.
///
/// Stop references are positions in a [`StopRegistry`] and are not graph node
/// ids; they are resolved against the current graph when a route is planned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Node(NodeId),
    Stop(usize),
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Node(id) => write!(f, "node:{}", id),
            Endpoint::Stop(index) => write!(f, "stop:{}", index),
        }
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    /// Accepts `node:<id>`, `stop:<index>`, the legacy `cs:<index>`, or a bare node id.
    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        let invalid = || Error::InvalidEndpoint {
            value: s.to_string(),
        };

        if let Some(index) = value
            .strip_prefix("stop:")
            .or_else(|| value.strip_prefix("cs:"))
        {
            return index.parse().map(Endpoint::Stop).map_err(|_| invalid());
        }
        if let Some(id) = value.strip_prefix("node:") {
            return id.parse().map(Endpoint::Node).map_err(|_| invalid());
        }
        value.parse().map(Endpoint::Node).map_err(|_| invalid())
    }
}

/// Resolve user-supplied endpoint text against a loaded network.
///
/// Prefixed references (`node:`, `stop:`, `cs:`) are parsed as such. A bare
/// integer is a node id when the graph has that node or no station is named
/// after it. Anything else is treated as an exact station name and mapped to
/// the station's node.
pub fn resolve_endpoint_query(network: &RailNetwork, text: &str) -> Result<Endpoint> {
    let value = text.trim();
    if ["stop:", "cs:", "node:"]
        .iter()
        .any(|prefix| value.starts_with(prefix))
    {
        return value.parse();
    }
    // Bare integers are node ids unless only a station carries that name.
    if let Ok(id) = value.parse::<NodeId>() {
        if network.graph.contains(id) || network.station_by_name(value).is_none() {
            return Ok(Endpoint::Node(id));
        }
    }

    let Some(station) = network.station_by_name(value) else {
        return Err(Error::UnknownStation {
            name: value.to_string(),
            suggestions: network.fuzzy_station_matches(value, MAX_SUGGESTIONS),
        });
    };

    station
        .node
        .map(Endpoint::Node)
        .ok_or_else(|| Error::StationNotLinked {
            name: station.name.clone(),
        })
}

/// High-level route planning request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRequest {
    pub start: Endpoint,
    pub goal: Endpoint,
}

impl RouteRequest {
    pub fn new(start: Endpoint, goal: Endpoint) -> Self {
        Self { start, goal }
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub start: Endpoint,
    pub goal: Endpoint,
    /// Node sequence from the resolved start to the resolved goal, inclusive.
    pub steps: Vec<NodeId>,
    /// Sum of great-circle edge lengths along `steps`.
    pub distance_meters: f64,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Resolve an endpoint to a node of `graph`.
///
/// Node references must exist in the graph; stop references snap to the
/// nearest node. Returns `None` when neither applies.
pub fn resolve_endpoint(
    endpoint: Endpoint,
    graph: &Graph,
    stops: &StopRegistry,
) -> Option<NodeId> {
    match endpoint {
        Endpoint::Node(id) => graph.contains(id).then_some(id),
        Endpoint::Stop(index) => stops.resolve_to_node(index, graph),
    }
}

/// Compute the shortest route between the two endpoints of `request`.
///
/// Fails with [`Error::UnresolvedEndpoint`] when an endpoint has no node in the
/// current graph and with [`Error::RouteNotFound`] when the resolved nodes are
/// not connected.
pub fn plan_route(
    graph: &Graph,
    stops: &StopRegistry,
    request: &RouteRequest,
) -> Result<RoutePlan> {
    let start = resolve_endpoint(request.start, graph, stops).ok_or(Error::UnresolvedEndpoint {
        endpoint: request.start,
    })?;
    let goal = resolve_endpoint(request.goal, graph, stops).ok_or(Error::UnresolvedEndpoint {
        endpoint: request.goal,
    })?;
    debug!(
        start = %request.start,
        start_node = start,
        goal = %request.goal,
        goal_node = goal,
        "resolved endpoints"
    );

    let not_found = || Error::RouteNotFound {
        start: request.start,
        goal: request.goal,
    };
    let steps = find_route_dijkstra(graph, start, goal).ok_or_else(not_found)?;
    let distance_meters = route_distance(graph, &steps).ok_or_else(not_found)?;

    info!(nodes = steps.len(), distance_meters, "route found");

    Ok(RoutePlan {
        start: request.start,
        goal: request.goal,
        steps,
        distance_meters,
    })
}
