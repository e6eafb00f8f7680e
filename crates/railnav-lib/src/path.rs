use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::graph::{Graph, NodeId};

/// Run Dijkstra's algorithm to find the lowest-cost path from `start` to `goal`.
///
/// Edge weights are great-circle lengths and therefore non-negative. The
/// frontier pops the lowest tentative distance first and, among equal
/// distances, the lowest node id. A neighbour's predecessor only changes on a
/// strict improvement, so among equally short paths the one discovered first
/// wins. Returns `None` when either node is absent or they are disconnected.
pub fn find_route_dijkstra(graph: &Graph, start: NodeId, goal: NodeId) -> Option<Vec<NodeId>> {
    if !graph.contains(start) || !graph.contains(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let mut distances: HashMap<NodeId, f64> = HashMap::new();
    let mut parents: HashMap<NodeId, Option<NodeId>> = HashMap::new();
    let mut queue = BinaryHeap::new();

    distances.insert(start, 0.0);
    parents.insert(start, None);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        let current_distance = match distances.get(&entry.node) {
            Some(distance) if *distance < entry.cost.0 => continue,
            Some(distance) => *distance,
            None => continue,
        };

        if entry.node == goal {
            return Some(reconstruct_path(&parents, start, goal));
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.target;
            let next_cost = current_distance + edge.distance;
            if next_cost < *distances.get(&next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                parents.insert(next, Some(entry.node));
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    None
}

/// Total length in meters of walking `path` through `graph`.
///
/// Parallel edges contribute their shortest weight. Returns `None` when two
/// consecutive nodes are not adjacent.
pub fn route_distance(graph: &Graph, path: &[NodeId]) -> Option<f64> {
    path.windows(2).try_fold(0.0, |total, pair| {
        graph
            .neighbours(pair[0])
            .iter()
            .filter(|edge| edge.target == pair[1])
            .map(|edge| edge.distance)
            .min_by(|a, b| a.total_cmp(b))
            .map(|distance| total + distance)
    })
}

fn reconstruct_path(
    parents: &HashMap<NodeId, Option<NodeId>>,
    start: NodeId,
    goal: NodeId,
) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then id.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
