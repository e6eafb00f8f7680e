//! Common test utilities and fixture helpers.
//!
//! This module provides shared test infrastructure for integration tests,
//! including the checked-in Overpass fixture and builders for synthetic
//! element lists with known edge weights.

use std::f64::consts::PI;
use std::path::PathBuf;

use railnav_lib::{
    build_network, OsmElement, OsmNode, OsmWay, OverpassResponse, RailNetwork, Tags,
    EARTH_RADIUS_METERS,
};

/// Meters spanned by one degree of longitude on the equator.
#[allow(dead_code)]
pub const METERS_PER_DEGREE: f64 = EARTH_RADIUS_METERS * PI / 180.0;

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the checked-in Overpass response fixture.
#[allow(dead_code)]
pub fn fixture_network_path() -> PathBuf {
    fixtures_dir().join("network.json")
}

/// Load and build the fixture network.
#[allow(dead_code)]
pub fn fixture_network() -> RailNetwork {
    let response =
        OverpassResponse::from_path(&fixture_network_path()).expect("load network fixture");
    build_network(&response.elements)
}

#[allow(dead_code)]
pub fn node(id: i64, lat: f64, lon: f64) -> OsmElement {
    OsmElement::Node(OsmNode {
        id,
        lat,
        lon,
        tags: Tags::new(),
    })
}

/// Node on the equator `meters` east of the prime meridian.
#[allow(dead_code)]
pub fn equator_node(id: i64, meters: f64) -> OsmElement {
    node(id, 0.0, meters / METERS_PER_DEGREE)
}

#[allow(dead_code)]
pub fn tagged_node(id: i64, lat: f64, lon: f64, pairs: &[(&str, &str)]) -> OsmElement {
    OsmElement::Node(OsmNode {
        id,
        lat,
        lon,
        tags: pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    })
}

#[allow(dead_code)]
pub fn way(id: i64, nodes: &[i64]) -> OsmElement {
    OsmElement::Way(OsmWay {
        id,
        nodes: nodes.to_vec(),
        tags: Tags::new(),
    })
}

/// Line A(1)–B(2)–C(3)–D(4) with weights 10, 20 and 30 meters, plus a
/// disconnected segment E(5)–F(6).
#[allow(dead_code)]
pub fn line_with_island() -> RailNetwork {
    build_network(&[
        equator_node(1, 0.0),
        equator_node(2, 10.0),
        equator_node(3, 30.0),
        equator_node(4, 60.0),
        node(5, 10.0, 10.0),
        node(6, 10.0, 10.001),
        way(100, &[1, 2, 3, 4]),
        way(101, &[5, 6]),
    ])
}

/// Diamond cycle A(1)–B(2)–C(3)–D(4)–A(1) with four exactly equal edges,
/// mirrored across the equator.
#[allow(dead_code)]
pub fn diamond() -> RailNetwork {
    let delta = 10.0 / (METERS_PER_DEGREE * 2f64.sqrt());
    build_network(&[
        node(1, 0.0, 0.0),
        node(2, delta, delta),
        node(3, 0.0, 2.0 * delta),
        node(4, -delta, delta),
        way(100, &[1, 2]),
        way(101, &[2, 3]),
        way(102, &[3, 4]),
        way(103, &[4, 1]),
    ])
}
