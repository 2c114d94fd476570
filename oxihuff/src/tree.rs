//! Huffman tree construction.
//!
//! The tree is an arena of [`Node`]s addressed by [`NodeId`]. Children are
//! owned by index from their parent; there are no back-references since
//! every traversal runs root to leaf.
//!
//! # Construction
//!
//! The greedy algorithm keeps a min-heap keyed by `(weight, id)`. Node ids
//! are handed out in arrival order (leaves in ascending symbol order, then
//! merged nodes as they are created), so equal weights are extracted
//! oldest first and the result is fully deterministic.

use crate::config::{PSEUDO_EOF, SYMBOL_COUNT};
use crate::frequency::FrequencyTable;
use log::trace;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Index of a node inside a [`HuffTree`].
pub type NodeId = usize;

/// A tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// A symbol leaf.
    Leaf {
        /// Symbol value (0-256).
        symbol: u16,
        /// Occurrence count, 0 for trees read from a header.
        weight: u64,
    },
    /// An internal node with exactly two children.
    Internal {
        /// Sum of the children's weights, 0 for trees read from a header.
        weight: u64,
        /// Child taken on a `0` bit.
        left: NodeId,
        /// Child taken on a `1` bit.
        right: NodeId,
    },
}

impl Node {
    /// Node weight.
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }

    /// Returns `true` for leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// A strictly binary Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffTree {
    /// Build an optimal tree from symbol frequencies.
    ///
    /// Every symbol with a non-zero count gets a leaf. When pseudo-EOF is
    /// the only such symbol (empty input), a zero-weight leaf for symbol 0
    /// is added so the root is always an internal node and every codeword
    /// is at least one bit long.
    pub fn from_frequencies(freq: &FrequencyTable) -> Self {
        let mut nodes: Vec<Node> = freq
            .present()
            .map(|(symbol, weight)| Node::Leaf { symbol, weight })
            .collect();

        if nodes.len() < 2 {
            // Only pseudo-EOF is present; keep ascending symbol order
            nodes.insert(0, Node::Leaf { symbol: 0, weight: 0 });
        }

        let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = nodes
            .iter()
            .enumerate()
            .map(|(id, node)| Reverse((node.weight(), id)))
            .collect();

        while let (Some(Reverse((lw, left))), Some(Reverse((rw, right)))) =
            (heap.pop(), heap.pop())
        {
            let id = nodes.len();
            let weight = lw + rw;
            nodes.push(Node::Internal {
                weight,
                left,
                right,
            });
            heap.push(Reverse((weight, id)));
        }

        // The loop exits after popping the last node alone
        let root = nodes.len() - 1;
        let tree = Self { nodes, root };

        trace!(
            "built tree: {} leaves, {} nodes, depth {}, root weight {}",
            tree.leaf_count(),
            tree.nodes.len(),
            tree.depth(),
            tree.nodes[root].weight()
        );

        tree
    }

    /// Assemble a tree from an arena and its root.
    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> Self {
        debug_assert!(root < nodes.len());
        Self { nodes, root }
    }

    /// Root node id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Returns `true` if some leaf carries `symbol`.
    pub fn contains(&self, symbol: u16) -> bool {
        self.nodes
            .iter()
            .any(|node| matches!(*node, Node::Leaf { symbol: s, .. } if s == symbol))
    }

    /// Returns `true` if the tree has a pseudo-EOF leaf.
    pub fn has_eof(&self) -> bool {
        self.contains(PSEUDO_EOF)
    }

    /// Depth of the deepest leaf; 0 for a lone root leaf.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { .. } => deepest = deepest.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }
        deepest
    }

    /// Depth of every leaf, indexed by symbol. Absent symbols are `None`.
    pub fn leaf_depths(&self) -> Vec<Option<usize>> {
        let mut depths = vec![None; SYMBOL_COUNT];
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id] {
                Node::Leaf { symbol, .. } => {
                    if let Some(slot) = depths.get_mut(symbol as usize) {
                        *slot = Some(depth);
                    }
                }
                Node::Internal { left, right, .. } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }
        depths
    }
}
