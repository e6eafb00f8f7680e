//! railnav library entry points.
//!
//! This crate fetches railway data from OpenStreetMap, assembles it into an
//! undirected track graph weighted by great-circle distance, snaps stations
//! and user stops onto that graph, and runs shortest-path searches between
//! them. Higher-level consumers (the CLI) should only depend on the functions
//! exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod builder;
pub mod error;
pub mod geo;
pub mod graph;
pub mod osm;
pub mod output;
pub mod overpass;
pub mod path;
pub mod routing;
pub mod stops;
pub mod storage;

pub use builder::{build_network, RailNetwork, Station};
pub use error::{Error, Result};
pub use geo::{haversine_distance, GeoPoint, EARTH_RADIUS_METERS};
pub use graph::{Edge, Graph, Node, NodeId};
pub use osm::{is_station, OsmElement, OsmNode, OsmWay, OverpassResponse, Tags};
pub use output::{
    endpoint_choices, format_distance, network_status, EndpointChoice, RouteEndpoint, RouteStep,
    RouteSummary,
};
pub use overpass::{build_query, fetch_elements, save_response, BoundingBox};
pub use path::{find_route_dijkstra, route_distance};
pub use routing::{
    plan_route, resolve_endpoint, resolve_endpoint_query, Endpoint, RoutePlan, RouteRequest,
};
pub use stops::{Stop, StopRegistry};
pub use storage::{network_path, resolve_data_dir, stops_path};
