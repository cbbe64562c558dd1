//! Search tree node representation.
//!
//! Each node stands for one placed mark and the continuations explored
//! after it. Values are always from the agent's perspective.

use crate::board::Move;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Parent node (None for the first move of the game).
    /// Non-owning: only walked to rebuild the path of played cells.
    pub parent: Option<NodeId>,

    /// Move that led to this node
    pub mv: Move,

    /// Children in generation order, which is also alpha-beta's visiting
    /// order. Empty until the node is expanded.
    pub children: Vec<NodeId>,

    /// Minimax value, or static value at leaves.
    /// Internal nodes only hold a meaningful value after an alpha-beta pass.
    pub value: i32,

    /// Win, loss or draw reached at this node. Terminal nodes never get children.
    pub is_terminal: bool,

    /// Value was computed by the latest alpha-beta pass over the parent
    /// (false for siblings skipped by a cutoff).
    pub prune_safe: bool,
}

impl TreeNode {
    /// Create a node with no parent.
    pub fn new_root(mv: Move) -> Self {
        Self {
            parent: None,
            mv,
            children: Vec::new(),
            value: 0,
            is_terminal: false,
            prune_safe: false,
        }
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, mv: Move) -> Self {
        Self {
            parent: Some(parent),
            ..Self::new_root(mv)
        }
    }

    /// Check if this is a leaf node (terminal or not expanded).
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
