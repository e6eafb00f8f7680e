mod common;

use common::{diamond, fixture_network, line_with_island};
use railnav_lib::{
    find_route_dijkstra, plan_route, resolve_endpoint_query, route_distance, Endpoint, Error,
    RouteRequest, Stop, StopRegistry,
};

fn edge_weight(network: &railnav_lib::RailNetwork, a: i64, b: i64) -> f64 {
    route_distance(&network.graph, &[a, b]).expect("nodes are adjacent")
}

#[test]
fn line_route_follows_every_segment() {
    let network = line_with_island();
    let stops = StopRegistry::new();

    let plan = plan_route(
        &network.graph,
        &stops,
        &RouteRequest::new(Endpoint::Node(1), Endpoint::Node(4)),
    )
    .expect("route exists");

    assert_eq!(plan.steps, vec![1, 2, 3, 4]);
    assert_eq!(plan.hop_count(), 3);
    assert!((plan.distance_meters - 60.0).abs() < 1e-6, "{}", plan.distance_meters);
    assert!((edge_weight(&network, 1, 2) - 10.0).abs() < 1e-6);
    assert!((edge_weight(&network, 2, 3) - 20.0).abs() < 1e-6);
    assert!((edge_weight(&network, 3, 4) - 30.0).abs() < 1e-6);
}

#[test]
fn route_to_self_is_single_node() {
    let network = line_with_island();
    let plan = plan_route(
        &network.graph,
        &StopRegistry::new(),
        &RouteRequest::new(Endpoint::Node(1), Endpoint::Node(1)),
    )
    .expect("trivial route");

    assert_eq!(plan.steps, vec![1]);
    assert_eq!(plan.hop_count(), 0);
    assert_eq!(plan.distance_meters, 0.0);
}

#[test]
fn disconnected_component_is_route_not_found() {
    let network = line_with_island();
    let err = plan_route(
        &network.graph,
        &StopRegistry::new(),
        &RouteRequest::new(Endpoint::Node(1), Endpoint::Node(5)),
    )
    .expect_err("components are disconnected");

    assert!(matches!(
        err,
        Error::RouteNotFound {
            start: Endpoint::Node(1),
            goal: Endpoint::Node(5)
        }
    ));
    assert_eq!(find_route_dijkstra(&network.graph, 1, 5), None);
}

#[test]
fn unknown_node_is_unresolved() {
    let network = line_with_island();
    let err = plan_route(
        &network.graph,
        &StopRegistry::new(),
        &RouteRequest::new(Endpoint::Node(1), Endpoint::Node(999)),
    )
    .expect_err("node 999 is absent");

    assert!(matches!(
        err,
        Error::UnresolvedEndpoint {
            endpoint: Endpoint::Node(999)
        }
    ));
}

#[test]
fn out_of_range_stop_is_unresolved() {
    let network = line_with_island();
    let mut stops = StopRegistry::new();
    stops.push(Stop::new("Only", 0.0, 0.0));

    for (start, goal) in [
        (Endpoint::Stop(1), Endpoint::Node(1)),
        (Endpoint::Node(1), Endpoint::Stop(7)),
    ] {
        let err = plan_route(&network.graph, &stops, &RouteRequest::new(start, goal))
            .expect_err("stop index out of range");
        assert!(matches!(err, Error::UnresolvedEndpoint { .. }));
    }
}

#[test]
fn stops_snap_to_the_current_graph() {
    let network = line_with_island();
    let mut stops = StopRegistry::new();
    // Near node 4 on the equator line, and near node 6 on the island.
    let near_four = stops.push(Stop::new("East end", 0.00001, 0.00054));
    let near_six = stops.push(Stop::new("Island", 10.0, 10.0011));

    let plan = plan_route(
        &network.graph,
        &stops,
        &RouteRequest::new(Endpoint::Node(2), Endpoint::Stop(near_four)),
    )
    .expect("stop resolves onto the line");
    assert_eq!(plan.steps, vec![2, 3, 4]);
    assert_eq!(plan.goal, Endpoint::Stop(near_four));

    let plan = plan_route(
        &network.graph,
        &stops,
        &RouteRequest::new(Endpoint::Stop(near_six), Endpoint::Node(5)),
    )
    .expect("stop resolves onto the island");
    assert_eq!(plan.steps, vec![6, 5]);

    // After a reload with a different graph the same stop snaps elsewhere.
    let reloaded = diamond();
    assert_eq!(stops.resolve_to_node(near_four, &reloaded.graph), Some(3));
}

#[test]
fn empty_graph_leaves_every_endpoint_unresolved() {
    let network = railnav_lib::build_network(&[]);
    let mut stops = StopRegistry::new();
    stops.push(Stop::new("Anywhere", 1.0, 1.0));

    let err = plan_route(
        &network.graph,
        &stops,
        &RouteRequest::new(Endpoint::Stop(0), Endpoint::Stop(0)),
    )
    .expect_err("nothing to snap to");
    assert!(matches!(err, Error::UnresolvedEndpoint { .. }));
}

#[test]
fn equal_cost_cycle_prefers_lower_node_id() {
    let network = diamond();
    let plan = plan_route(
        &network.graph,
        &StopRegistry::new(),
        &RouteRequest::new(Endpoint::Node(1), Endpoint::Node(3)),
    )
    .expect("route exists");

    assert_eq!(plan.steps.len(), 3);
    assert!((plan.distance_meters - 20.0).abs() < 1e-6, "{}", plan.distance_meters);

    let via_two = edge_weight(&network, 1, 2) + edge_weight(&network, 2, 3);
    let via_four = edge_weight(&network, 1, 4) + edge_weight(&network, 4, 3);
    assert_eq!(via_two, via_four, "diamond arms must weigh exactly the same");
    assert_eq!(plan.steps, vec![1, 2, 3]);

    let again = find_route_dijkstra(&network.graph, 1, 3).expect("route exists");
    assert_eq!(again, plan.steps, "tie-break is deterministic");
}

#[test]
fn route_is_no_longer_than_any_alternative() {
    let network = fixture_network();
    let plan = plan_route(
        &network.graph,
        &StopRegistry::new(),
        &RouteRequest::new(Endpoint::Node(1), Endpoint::Node(4)),
    )
    .expect("route exists");

    assert_eq!(plan.steps, vec![1, 2, 3, 4]);
    let other_way = route_distance(&network.graph, &[1, 5, 4]).expect("walkable");
    assert!(plan.distance_meters < other_way);
}

#[test]
fn station_names_resolve_to_snapped_nodes() {
    let network = fixture_network();

    assert_eq!(
        resolve_endpoint_query(&network, "Westkreuz").unwrap(),
        Endpoint::Node(1)
    );
    assert_eq!(
        resolve_endpoint_query(&network, "stop:2").unwrap(),
        Endpoint::Stop(2)
    );
    assert_eq!(
        resolve_endpoint_query(&network, " 21 ").unwrap(),
        Endpoint::Node(21)
    );

    let err = resolve_endpoint_query(&network, "Westkreutz").expect_err("typo");
    let message = err.to_string();
    assert!(message.contains("unknown station name"), "{message}");
    assert!(message.contains("Did you mean"), "{message}");
    assert!(message.contains("'Westkreuz'"), "{message}");

    assert!(matches!(
        resolve_endpoint_query(&network, "stop:x"),
        Err(Error::InvalidEndpoint { .. })
    ));
}

#[test]
fn unlinked_station_cannot_be_an_endpoint() {
    let network = railnav_lib::build_network(&[common::tagged_node(
        1,
        0.0,
        0.0,
        &[("railway", "station"), ("name", "Ghost")],
    )]);

    assert!(matches!(
        resolve_endpoint_query(&network, "Ghost"),
        Err(Error::StationNotLinked { .. })
    ));
}

#[test]
fn numeric_station_names_resolve_when_no_such_node_exists() {
    let network = railnav_lib::build_network(&[
        common::node(10, 0.0, 0.0),
        common::node(11, 0.0, 0.001),
        common::way(100, &[10, 11]),
        common::tagged_node(500, 0.0, 0.0011, &[("railway", "halt"), ("name", "7")]),
        common::tagged_node(501, 0.0, 0.0012, &[("railway", "halt"), ("name", "10")]),
    ]);

    assert_eq!(
        resolve_endpoint_query(&network, "7").unwrap(),
        Endpoint::Node(11)
    );
    // A graph node with the same id takes precedence over the station name.
    assert_eq!(
        resolve_endpoint_query(&network, "10").unwrap(),
        Endpoint::Node(10)
    );
    assert_eq!(
        resolve_endpoint_query(&network, "99").unwrap(),
        Endpoint::Node(99)
    );
    assert_eq!(
        resolve_endpoint_query(&network, "node:7").unwrap(),
        Endpoint::Node(7)
    );
}
