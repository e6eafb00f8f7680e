use serde::Serialize;

use crate::builder::RailNetwork;
use crate::error::{Error, Result};
use crate::graph::NodeId;
use crate::routing::{Endpoint, RoutePlan};
use crate::stops::StopRegistry;

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteEndpoint {
    pub reference: Endpoint,
    pub node: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Node visited along a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
}

/// Structured representation of a planned route for display layers.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub hops: usize,
    pub distance_meters: f64,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with coordinates and station names.
    pub fn from_plan(
        network: &RailNetwork,
        stops: &StopRegistry,
        plan: &RoutePlan,
    ) -> Result<Self> {
        let steps = plan
            .steps
            .iter()
            .enumerate()
            .map(|(index, &id)| {
                let position = network
                    .graph
                    .position(id)
                    .ok_or(Error::UnresolvedEndpoint {
                        endpoint: Endpoint::Node(id),
                    })?;
                Ok(RouteStep {
                    index,
                    id,
                    lat: position.lat,
                    lon: position.lon,
                    station: network
                        .station_at_node(id)
                        .map(|station| station.name.clone()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let (Some(first), Some(last)) = (steps.first(), steps.last()) else {
            return Err(Error::EmptyRoutePlan);
        };

        let start = endpoint_summary(plan.start, first, stops);
        let goal = endpoint_summary(plan.goal, last, stops);

        Ok(Self {
            hops: plan.hop_count(),
            distance_meters: plan.distance_meters,
            start,
            goal,
            steps,
        })
    }
}

fn endpoint_summary(
    reference: Endpoint,
    step: &RouteStep,
    stops: &StopRegistry,
) -> RouteEndpoint {
    let name = match reference {
        Endpoint::Stop(index) => stops.get(index).map(|stop| stop.name.clone()),
        Endpoint::Node(_) => step.station.clone(),
    };
    RouteEndpoint {
        reference,
        node: step.id,
        name,
    }
}

/// Selectable route endpoint with a human-readable label.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EndpointChoice {
    pub endpoint: Endpoint,
    pub label: String,
}

/// Every endpoint a user may pick: snapped stations first, then all stops.
pub fn endpoint_choices(network: &RailNetwork, stops: &StopRegistry) -> Vec<EndpointChoice> {
    let stations = network.selectable_stations().into_iter().filter_map(|station| {
        station.node.map(|node| EndpointChoice {
            endpoint: Endpoint::Node(node),
            label: format!(
                "{} ({:.4},{:.4})",
                station.name, station.position.lat, station.position.lon
            ),
        })
    });
    let custom = stops.iter().enumerate().map(|(index, stop)| EndpointChoice {
        endpoint: Endpoint::Stop(index),
        label: format!("{} (custom)", stop.name),
    });
    stations.chain(custom).collect()
}

/// One-line status after loading a network.
pub fn network_status(network: &RailNetwork) -> String {
    format!(
        "Loaded {} nodes, {} stations",
        network.graph.len(),
        network.stations.len()
    )
}

/// Format a distance in meters, switching to kilometres above 1 km.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.0} m", meters)
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_short_and_long_distances() {
        assert_eq!(format_distance(0.0), "0 m");
        assert_eq!(format_distance(999.4), "999 m");
        assert_eq!(format_distance(1234.0), "1.23 km");
    }

    #[test]
    fn status_counts_nodes_and_stations() {
        assert_eq!(
            network_status(&RailNetwork::default()),
            "Loaded 0 nodes, 0 stations"
        );
    }
}
