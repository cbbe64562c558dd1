//! Search tree with arena allocation and slot reuse.
//!
//! Nodes live in a contiguous Vec and are referenced by NodeId indices.
//! Re-rooting frees every discarded subtree back to a free list; the old
//! roots stay behind as a single-child spine so the complete move history
//! remains reachable through `parent` links.

use crate::board::{Move, Pos};

use super::node::{NodeId, TreeNode};

/// Search tree rooted at the live position.
#[derive(Debug)]
pub struct Tree {
    /// Arena storing all nodes, live or free
    nodes: Vec<TreeNode>,

    /// Slots available for reuse
    free: Vec<NodeId>,

    /// Node of the position that is actually on the board
    root: NodeId,

    /// Node of the first move of the game
    origin: NodeId,
}

impl Tree {
    /// Create a tree holding only the first move of the game.
    pub fn new(first: Move) -> Self {
        Self {
            nodes: vec![TreeNode::new_root(first)],
            free: Vec::new(),
            root: NodeId(0),
            origin: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get the node of the first move.
    #[inline]
    pub fn origin(&self) -> NodeId {
        self.origin
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.index()]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.index()]
    }

    /// Store a node, reusing a freed slot when one exists.
    fn allocate(&mut self, node: TreeNode) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = node;
            id
        } else {
            #[allow(clippy::cast_possible_truncation)]
            let id = NodeId(self.nodes.len() as u32);
            self.nodes.push(node);
            id
        }
    }

    /// Append a child to `parent` and return its ID.
    pub fn add_child(&mut self, parent: NodeId, mv: Move) -> NodeId {
        let child = self.allocate(TreeNode::new_child(parent, mv));
        self.get_mut(parent).children.push(child);
        child
    }

    /// Child of `node` that played `pos`, if it was generated.
    pub fn find_child(&self, node: NodeId, pos: Pos) -> Option<NodeId> {
        self.get(node)
            .children
            .iter()
            .copied()
            .find(|&child| self.get(child).mv.pos == pos)
    }

    /// Make `child` the new root, freeing every other subtree of the old root.
    /// Returns the number of nodes freed.
    pub fn reroot(&mut self, child: NodeId) -> usize {
        let old_root = self.root;
        debug_assert_eq!(self.get(child).parent, Some(old_root));

        let siblings = std::mem::take(&mut self.get_mut(old_root).children);
        let mut freed = 0;
        for sibling in siblings {
            if sibling != child {
                freed += self.free_subtree(sibling);
            }
        }

        self.get_mut(old_root).children.push(child);
        self.root = child;
        freed
    }

    /// Release a node and all its descendants.
    fn free_subtree(&mut self, id: NodeId) -> usize {
        let mut stack = vec![id];
        let mut freed = 0;
        while let Some(current) = stack.pop() {
            let node = self.get_mut(current);
            stack.append(&mut node.children);
            node.parent = None;
            self.free.push(current);
            freed += 1;
        }
        freed
    }

    /// Walk from `id` up through its parents to the first move.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(id),
        }
    }

    /// Moves from the first move of the game to the root, in play order.
    pub fn history(&self) -> Vec<Move> {
        let mut moves: Vec<Move> = self
            .ancestors(self.root)
            .map(|id| self.get(id).mv)
            .collect();
        moves.reverse();
        moves
    }

    /// Number of live nodes (spine plus live subtree).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Never true: the first move is always stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            live_nodes: self.len(),
            free_slots: self.free.len(),
            root_children: root.children.len(),
            max_depth: self.compute_max_depth(self.root),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId) -> u32 {
        let mut max_depth = 0;
        let mut stack = vec![(node_id, 0u32)];
        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for &child in &self.get(id).children {
                stack.push((child, depth + 1));
            }
        }
        max_depth
    }
}

/// Iterator over a node and its ancestors, nearest first.
pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.get(current).parent;
        Some(current)
    }
}

/// Statistics about a search tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub live_nodes: usize,
    pub free_slots: usize,
    pub root_children: usize,
    /// Plies below the root
    pub max_depth: u32,
}
