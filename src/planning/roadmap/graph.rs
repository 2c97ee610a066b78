//! Roadmap graph storage.

use std::collections::HashMap;

use crate::core::{Edge, GridCoord};

/// Collision status of a roadmap edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeState {
    /// Not collision-checked yet (Lazy PRM)
    #[default]
    Unchecked,
    /// Known collision-free
    Valid,
    /// Known to cross an obstacle; ignored by queries
    Invalid,
}

/// One direction of an undirected roadmap edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoadmapEdge {
    /// Neighbor node index
    pub to: usize,
    /// Euclidean length
    pub weight: f32,
    /// Collision status
    pub state: EdgeState,
}

/// Undirected graph over free cells.
///
/// Node 0 is the start and node 1 the goal. Every edge is stored once in
/// each endpoint's adjacency list and the two copies always share a state.
#[derive(Clone, Debug)]
pub struct Roadmap {
    nodes: Vec<GridCoord>,
    adjacency: Vec<Vec<RoadmapEdge>>,
    index: HashMap<GridCoord, usize>,
    lines: Vec<Edge>,
}

impl Roadmap {
    /// Index of the start node
    pub const START: usize = 0;
    /// Index of the goal node
    pub const GOAL: usize = 1;

    /// Create a roadmap holding only start and goal.
    pub fn new(start: GridCoord, goal: GridCoord) -> Self {
        let mut index = HashMap::new();
        index.insert(start, Self::START);
        index.entry(goal).or_insert(Self::GOAL);
        Self {
            nodes: vec![start, goal],
            adjacency: vec![Vec::new(), Vec::new()],
            index,
            lines: Vec::new(),
        }
    }

    /// Number of nodes, start and goal included
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, i: usize) -> GridCoord {
        self.nodes[i]
    }

    pub fn nodes(&self) -> &[GridCoord] {
        &self.nodes
    }

    /// True if some node already sits on `point`
    pub fn contains(&self, point: GridCoord) -> bool {
        self.index.contains_key(&point)
    }

    /// Append a node and return its index.
    pub fn add_node(&mut self, point: GridCoord) -> usize {
        let i = self.nodes.len();
        self.nodes.push(point);
        self.adjacency.push(Vec::new());
        self.index.entry(point).or_insert(i);
        i
    }

    /// Outgoing edges of node `i`
    pub fn neighbors(&self, i: usize) -> &[RoadmapEdge] {
        &self.adjacency[i]
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.adjacency[a].iter().any(|e| e.to == b)
    }

    pub fn edge_state(&self, a: usize, b: usize) -> Option<EdgeState> {
        self.adjacency[a].iter().find(|e| e.to == b).map(|e| e.state)
    }

    /// Add the undirected edge `a - b`. Returns false if it already exists.
    pub fn add_edge(&mut self, a: usize, b: usize, state: EdgeState) -> bool {
        if a == b || self.has_edge(a, b) {
            return false;
        }
        let weight = self.nodes[a].distance(&self.nodes[b]);
        self.adjacency[a].push(RoadmapEdge {
            to: b,
            weight,
            state,
        });
        self.adjacency[b].push(RoadmapEdge {
            to: a,
            weight,
            state,
        });
        self.lines.push(Edge::new(self.nodes[a], self.nodes[b]));
        true
    }

    /// Set the state of both directions of `a - b`.
    pub fn set_state(&mut self, a: usize, b: usize, state: EdgeState) {
        for (from, to) in [(a, b), (b, a)] {
            if let Some(edge) = self.adjacency[from].iter_mut().find(|e| e.to == to) {
                edge.state = state;
            }
        }
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.lines.len()
    }

    /// Every undirected edge in insertion order, as drawn by the
    /// visualization hook.
    pub fn lines(&self) -> &[Edge] {
        &self.lines
    }

    /// Node indices within `radius` of node `i`, closest first (ties by
    /// index), excluding `i` itself.
    pub fn within_radius(&self, i: usize, radius: f32) -> Vec<(usize, f32)> {
        let center = self.nodes[i];
        let mut found: Vec<(usize, f32)> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(j, p)| (j, center.distance(p)))
            .filter(|&(_, d)| d <= radius)
            .collect();
        // Stable, and candidates arrive in index order
        found.sort_by(|a, b| a.1.total_cmp(&b.1));
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Roadmap {
        let mut roadmap = Roadmap::new(GridCoord::new(0, 0), GridCoord::new(3, 3));
        roadmap.add_node(GridCoord::new(3, 0));
        roadmap.add_node(GridCoord::new(0, 3));
        roadmap
    }

    #[test]
    fn test_start_and_goal_first() {
        let roadmap = square();
        assert_eq!(roadmap.len(), 4);
        assert_eq!(roadmap.node(Roadmap::START), GridCoord::new(0, 0));
        assert_eq!(roadmap.node(Roadmap::GOAL), GridCoord::new(3, 3));
        assert!(roadmap.contains(GridCoord::new(3, 0)));
        assert!(!roadmap.contains(GridCoord::new(1, 1)));
    }

    #[test]
    fn test_edges_added_once() {
        let mut roadmap = square();
        assert!(roadmap.add_edge(0, 2, EdgeState::Valid));
        assert!(!roadmap.add_edge(2, 0, EdgeState::Valid));
        assert!(!roadmap.add_edge(1, 1, EdgeState::Valid));
        assert_eq!(roadmap.edge_count(), 1);
        assert_eq!(roadmap.neighbors(0).len(), 1);
        assert_eq!(roadmap.neighbors(2).len(), 1);
        assert_relative_eq!(roadmap.neighbors(2)[0].weight, 3.0);
    }

    #[test]
    fn test_set_state_both_directions() {
        let mut roadmap = square();
        roadmap.add_edge(0, 3, EdgeState::Unchecked);
        roadmap.set_state(3, 0, EdgeState::Invalid);
        assert_eq!(roadmap.edge_state(0, 3), Some(EdgeState::Invalid));
        assert_eq!(roadmap.edge_state(3, 0), Some(EdgeState::Invalid));
        assert_eq!(roadmap.edge_state(0, 1), None);
    }

    #[test]
    fn test_within_radius_order() {
        let roadmap = square();
        // From start: (3,0) and (0,3) tie at 3.0, goal at 4.24
        let found = roadmap.within_radius(0, 5.0);
        let ids: Vec<_> = found.iter().map(|&(j, _)| j).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert!(roadmap.within_radius(0, 2.0).is_empty());
    }
}
