use std::collections::btree_map::{BTreeMap, Entry};

use crate::geo::GeoPoint;

/// Identifier of a graph vertex, taken from the OSM node id.
pub type NodeId = i64;

/// Edge within the routing graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    /// Great-circle length of the track segment in meters.
    pub distance: f64,
}

/// Graph vertex with its coordinates and incident edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: GeoPoint,
    pub edges: Vec<Edge>,
}

/// Undirected weighted track graph used by pathfinding algorithms.
///
/// Nodes are kept in ascending id order. Every consumer that breaks ties by
/// iteration order (nearest-node snapping, frontier selection) relies on it.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: BTreeMap<NodeId, Node>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of undirected edges (each stored once per endpoint).
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.edges.len()).sum::<usize>() / 2
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn position(&self, id: NodeId) -> Option<GeoPoint> {
        self.nodes.get(&id).map(|node| node.position)
    }

    /// Iterate nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Return the neighbours for a given node identifier.
    pub fn neighbours(&self, id: NodeId) -> &[Edge] {
        self.nodes
            .get(&id)
            .map(|node| node.edges.as_slice())
            .unwrap_or(&[])
    }

    /// Insert a symmetric edge, creating either endpoint on first sight.
    ///
    /// Existing nodes keep the coordinates they were created with. The weight
    /// is computed from the stored coordinates so both directions agree.
    /// Duplicate edges are kept as given.
    pub fn insert_edge(
        &mut self,
        a: NodeId,
        a_pos: GeoPoint,
        b: NodeId,
        b_pos: GeoPoint,
    ) -> f64 {
        let a_pos = self.ensure_node(a, a_pos);
        let b_pos = self.ensure_node(b, b_pos);
        let distance = a_pos.distance_to(&b_pos);

        self.push_edge(a, b, distance);
        self.push_edge(b, a, distance);
        distance
    }

    /// Find the node closest to `point` by great-circle distance.
    ///
    /// Linear scan in ascending id order with a strict comparison, so the
    /// lowest id wins an exact tie. Returns `None` for an empty graph.
    pub fn nearest_node(&self, point: &GeoPoint) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for node in self.nodes.values() {
            let distance = point.distance_to(&node.position);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((node.id, distance)),
            }
        }
        best.map(|(id, _)| id)
    }

    fn ensure_node(&mut self, id: NodeId, position: GeoPoint) -> GeoPoint {
        match self.nodes.entry(id) {
            Entry::Occupied(entry) => entry.get().position,
            Entry::Vacant(entry) => {
                entry.insert(Node {
                    id,
                    position,
                    edges: Vec::new(),
                });
                position
            }
        }
    }

    fn push_edge(&mut self, from: NodeId, to: NodeId, distance: f64) {
        if let Some(node) = self.nodes.get_mut(&from) {
            node.edges.push(Edge {
                target: to,
                distance,
            });
        }
    }
}
