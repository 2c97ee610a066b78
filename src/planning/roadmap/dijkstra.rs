//! Dijkstra's shortest path over a roadmap.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::graph::{EdgeState, Roadmap};

/// State for Dijkstra's algorithm priority queue.
#[derive(Clone, Copy, Debug)]
struct DijkstraState {
    cost: f32,
    node: usize,
}

impl PartialEq for DijkstraState {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.node == other.node
    }
}

impl Eq for DijkstraState {}

impl Ord for DijkstraState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for DijkstraState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of a Dijkstra search.
#[derive(Clone, Debug)]
pub struct DijkstraResult {
    /// Sequence of node indices from start to goal
    pub path: Vec<usize>,
    /// Total path distance
    pub distance: f32,
}

/// Shortest path from `start` to `goal`, ignoring [`EdgeState::Invalid`]
/// edges. Unchecked edges are treated as traversable.
pub fn shortest_path(roadmap: &Roadmap, start: usize, goal: usize) -> Option<DijkstraResult> {
    let n = roadmap.len();
    if start >= n || goal >= n {
        return None;
    }
    if start == goal {
        return Some(DijkstraResult {
            path: vec![start],
            distance: 0.0,
        });
    }

    let mut dist = vec![f32::INFINITY; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    dist[start] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(DijkstraState {
        cost: 0.0,
        node: start,
    });

    while let Some(DijkstraState { cost, node }) = heap.pop() {
        if cost > dist[node] {
            continue;
        }
        if node == goal {
            break;
        }

        for edge in roadmap.neighbors(node) {
            if edge.state == EdgeState::Invalid {
                continue;
            }
            let new_dist = cost + edge.weight;
            if new_dist < dist[edge.to] {
                dist[edge.to] = new_dist;
                prev[edge.to] = Some(node);
                heap.push(DijkstraState {
                    cost: new_dist,
                    node: edge.to,
                });
            }
        }
    }

    prev[goal]?;

    let mut path = vec![goal];
    let mut current = goal;
    while let Some(p) = prev[current] {
        path.push(p);
        current = p;
    }
    path.reverse();

    Some(DijkstraResult {
        path,
        distance: dist[goal],
    })
}
