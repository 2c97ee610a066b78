//! Arena-backed search tree.
//!
//! Nodes live in a `Vec` and refer to their parent by index. Removing a node
//! only clears its `alive` flag, so a [`NodeId`] stays valid for the whole
//! planning call even after Dynamic RRT prunes part of the tree.

use crate::core::{Edge, GridCoord};
use crate::geometry::line_of_sight;
use crate::grid::OccupancyGrid;

/// Index of a node in a [`Tree`].
pub type NodeId = usize;

/// A single tree node.
#[derive(Clone, Debug)]
pub struct TreeNode {
    /// Cell occupied by the node
    pub point: GridCoord,
    /// Parent node (`None` for the root)
    pub parent: Option<NodeId>,
    /// Cost-to-come from the root
    pub cost: f32,
    alive: bool,
}

/// Outcome of [`Tree::prune_invalid`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Number of nodes removed, descendants included
    pub removed: usize,
    /// The root itself became invalid
    pub root_removed: bool,
}

/// Rooted tree over grid cells.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    live: usize,
}

impl Tree {
    /// Id of the root node
    pub const ROOT: NodeId = 0;

    /// Create a tree holding only `root`.
    pub fn new(root: GridCoord) -> Self {
        Self {
            nodes: vec![TreeNode {
                point: root,
                parent: None,
                cost: 0.0,
                alive: true,
            }],
            live: 1,
        }
    }

    /// Number of live nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    /// True if no node is alive
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Root cell
    pub fn root_point(&self) -> GridCoord {
        self.nodes[Self::ROOT].point
    }

    /// Node by id (live or removed)
    #[inline]
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    #[inline]
    pub fn point(&self, id: NodeId) -> GridCoord {
        self.nodes[id].point
    }

    #[inline]
    pub fn cost(&self, id: NodeId) -> f32 {
        self.nodes[id].cost
    }

    #[inline]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes[id].alive
    }

    /// Iterate over live node ids in insertion order
    pub fn live_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.alive)
            .map(|(id, _)| id)
    }

    /// Insert a node under `parent`.
    pub fn add(&mut self, point: GridCoord, parent: NodeId, cost: f32) -> NodeId {
        self.nodes.push(TreeNode {
            point,
            parent: Some(parent),
            cost,
            alive: true,
        });
        self.live += 1;
        self.nodes.len() - 1
    }

    /// Re-parent a node and overwrite its cost.
    ///
    /// Descendant costs are left untouched.
    pub fn set_parent(&mut self, id: NodeId, parent: NodeId, cost: f32) {
        let node = &mut self.nodes[id];
        node.parent = Some(parent);
        node.cost = cost;
    }

    /// Live node closest to `target`. Ties go to the earliest inserted node.
    pub fn nearest(&self, target: GridCoord) -> Option<NodeId> {
        let mut best: Option<(NodeId, f32)> = None;
        for id in self.live_ids() {
            let d = self.nodes[id].point.distance_squared(&target);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Live nodes within `radius` of `target`, in insertion order.
    pub fn within_radius(&self, target: GridCoord, radius: f32) -> Vec<NodeId> {
        self.live_ids()
            .filter(|&id| self.nodes[id].point.distance(&target) <= radius)
            .collect()
    }

    /// Cells from the root down to `id`.
    pub fn path_to_root(&self, id: NodeId) -> Vec<GridCoord> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id];
            path.push(node.point);
            current = node.parent;
        }
        path.reverse();
        path
    }

    /// Parent → child edge of every live non-root node.
    pub fn edges(&self) -> Vec<Edge> {
        self.nodes
            .iter()
            .filter(|n| n.alive)
            .filter_map(|n| n.parent.map(|p| Edge::new(self.nodes[p].point, n.point)))
            .collect()
    }

    /// Remove nodes that are no longer valid on `grid`, plus everything
    /// hanging off them.
    ///
    /// A node is invalid when its cell is out of bounds or occupied, or when
    /// the segment to its parent has lost line of sight.
    pub fn prune_invalid(&mut self, grid: &OccupancyGrid) -> PruneReport {
        let mut remove = vec![false; self.nodes.len()];

        for (id, node) in self.nodes.iter().enumerate() {
            if !node.alive {
                continue;
            }
            let parent_ok = node
                .parent
                .is_none_or(|p| line_of_sight(grid, self.nodes[p].point, node.point));
            remove[id] = !grid.is_free(node.point) || !parent_ok;
        }

        // Rewiring can point a node at a later-inserted parent, so a single
        // forward pass is not enough.
        let mut changed = true;
        while changed {
            changed = false;
            for (id, node) in self.nodes.iter().enumerate() {
                if !node.alive || remove[id] {
                    continue;
                }
                if node.parent.is_some_and(|p| remove[p] || !self.nodes[p].alive) {
                    remove[id] = true;
                    changed = true;
                }
            }
        }

        let mut report = PruneReport {
            root_removed: remove[Self::ROOT],
            ..Default::default()
        };
        for (node, removed) in self.nodes.iter_mut().zip(remove) {
            if removed && node.alive {
                node.alive = false;
                report.removed += 1;
            }
        }
        self.live -= report.removed;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellState;
    use approx::assert_relative_eq;

    fn chain() -> Tree {
        // root (0,0) -> (1,0) -> (2,0) -> (3,0), plus (0,1) under root
        let mut tree = Tree::new(GridCoord::new(0, 0));
        let a = tree.add(GridCoord::new(1, 0), Tree::ROOT, 1.0);
        let b = tree.add(GridCoord::new(2, 0), a, 2.0);
        tree.add(GridCoord::new(3, 0), b, 3.0);
        tree.add(GridCoord::new(0, 1), Tree::ROOT, 1.0);
        tree
    }

    #[test]
    fn test_nearest_prefers_first_inserted() {
        let mut tree = Tree::new(GridCoord::new(0, 0));
        tree.add(GridCoord::new(2, 0), Tree::ROOT, 2.0);
        // (1, 0) is equidistant from both
        assert_eq!(tree.nearest(GridCoord::new(1, 0)), Some(Tree::ROOT));
        assert_eq!(tree.nearest(GridCoord::new(5, 0)), Some(1));
    }

    #[test]
    fn test_within_radius() {
        let tree = chain();
        assert_eq!(tree.within_radius(GridCoord::new(0, 0), 1.0), vec![0, 1, 4]);
        assert_eq!(tree.within_radius(GridCoord::new(3, 0), 1.5), vec![2, 3]);
    }

    #[test]
    fn test_path_to_root() {
        let tree = chain();
        let path = tree.path_to_root(3);
        assert_eq!(
            path,
            vec![
                GridCoord::new(0, 0),
                GridCoord::new(1, 0),
                GridCoord::new(2, 0),
                GridCoord::new(3, 0)
            ]
        );
        assert_eq!(tree.path_to_root(Tree::ROOT), vec![GridCoord::new(0, 0)]);
    }

    #[test]
    fn test_edges_skip_root() {
        let tree = chain();
        let edges = tree.edges();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[0], Edge::new(GridCoord::new(0, 0), GridCoord::new(1, 0)));
    }

    #[test]
    fn test_set_parent_keeps_descendants() {
        let mut tree = chain();
        tree.set_parent(2, Tree::ROOT, 0.5);
        assert_eq!(tree.node(2).parent, Some(Tree::ROOT));
        assert_relative_eq!(tree.cost(2), 0.5);
        assert_relative_eq!(tree.cost(3), 3.0);
    }

    #[test]
    fn test_prune_removes_descendants() {
        let mut tree = chain();
        let mut grid = OccupancyGrid::new(5);
        grid.set(GridCoord::new(1, 0), CellState::Obstacle);

        let report = tree.prune_invalid(&grid);
        assert_eq!(report.removed, 3);
        assert!(!report.root_removed);
        assert_eq!(tree.len(), 2);
        assert!(!tree.is_alive(3));
        assert!(tree.is_alive(4));
        assert_eq!(tree.edges().len(), 1);
        assert_eq!(tree.nearest(GridCoord::new(3, 0)), Some(Tree::ROOT));
    }

    #[test]
    fn test_prune_follows_later_parents() {
        // x -> y -> z -> root, inserted in that order
        let mut tree = Tree::new(GridCoord::new(0, 0));
        let x = tree.add(GridCoord::new(2, 3), Tree::ROOT, 0.0);
        let y = tree.add(GridCoord::new(2, 2), Tree::ROOT, 0.0);
        let z = tree.add(GridCoord::new(2, 0), Tree::ROOT, 2.0);
        tree.set_parent(y, z, 4.0);
        tree.set_parent(x, y, 5.0);

        let mut grid = OccupancyGrid::new(4);
        grid.set(GridCoord::new(1, 0), CellState::Obstacle);
        let report = tree.prune_invalid(&grid);
        assert_eq!(report.removed, 3);
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_alive(x));
    }

    #[test]
    fn test_prune_blocked_parent_edge() {
        let mut tree = Tree::new(GridCoord::new(0, 0));
        tree.add(GridCoord::new(4, 0), Tree::ROOT, 4.0);
        let mut grid = OccupancyGrid::new(5);
        grid.set(GridCoord::new(2, 0), CellState::Obstacle);

        let report = tree.prune_invalid(&grid);
        assert_eq!(report.removed, 1);
        assert!(tree.edges().is_empty());
    }

    #[test]
    fn test_prune_root() {
        let mut tree = chain();
        let mut grid = OccupancyGrid::new(5);
        grid.set(GridCoord::new(0, 0), CellState::Obstacle);

        let report = tree.prune_invalid(&grid);
        assert!(report.root_removed);
        assert_eq!(report.removed, 5);
        assert!(tree.is_empty());
        assert_eq!(tree.nearest(GridCoord::new(1, 1)), None);
    }
}
