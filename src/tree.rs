//! Greedy construction of a Huffman tree from a [`FrequencyTable`], and a
//! read-only view of the result for renderers.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
    hash::Hash,
};

use tracing::debug;

use crate::frequency::FrequencyTable;

/// Index of a node within its [`HuffmanTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node<S> {
    Leaf {
        symbol: S,
        weight: u64,
    },
    /// Both children are owned by this node alone.
    Internal {
        weight: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl<S> Node<S> {
    fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }
}

/// A strict binary tree: every internal node has exactly two children.
///
/// Nodes live in an arena; a parent always has a higher index than its
/// children, so the root is the last node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S> {
    nodes: Vec<Node<S>>,
}

/// Priority queue entry. Lower weight pops first, then lower index, which
/// keeps tie-breaking independent of hash order.
#[derive(PartialEq, Eq)]
struct Pending {
    weight: u64,
    id: NodeId,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.weight, self.id).cmp(&(other.weight, other.id))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Eq + Hash + Ord + Clone> HuffmanTree<S> {
    /// Build the tree by repeatedly merging the two lightest nodes.
    ///
    /// An empty table gives an empty tree, and a single symbol gives a tree
    /// that is just one leaf.
    pub fn build(freqs: &FrequencyTable<S>) -> Self {
        let mut leaves: Vec<(&S, u64)> = freqs.iter().map(|(s, &w)| (s, w)).collect();
        leaves.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut nodes = Vec::with_capacity(leaves.len().saturating_mul(2));
        let mut heap = BinaryHeap::with_capacity(leaves.len());
        for (symbol, weight) in leaves {
            let id = NodeId(nodes.len());
            nodes.push(Node::Leaf {
                symbol: symbol.clone(),
                weight,
            });
            heap.push(Reverse(Pending { weight, id }));
        }

        while heap.len() > 1 {
            let (Some(Reverse(a)), Some(Reverse(b))) = (heap.pop(), heap.pop()) else {
                unreachable!("heap holds at least two nodes");
            };

            let id = NodeId(nodes.len());
            // Bounded by the table's total, which fits in a u64.
            let weight = a.weight + b.weight;
            nodes.push(Node::Internal {
                weight,
                left: a.id,
                right: b.id,
            });
            heap.push(Reverse(Pending { weight, id }));
        }

        let tree = Self { nodes };
        debug!(
            symbols = tree.leaf_count(),
            nodes = tree.len(),
            total_weight = tree.total_weight(),
            "built huffman tree"
        );
        tree
    }
}

impl<S> HuffmanTree<S> {
    /// `None` if the tree was built from empty input.
    pub fn root(&self) -> Option<NodeRef<'_, S>> {
        self.nodes.len().checked_sub(1).map(|i| NodeRef {
            tree: self,
            id: NodeId(i),
        })
    }

    /// `None` if `id` is out of range for this tree. An id taken from a
    /// different tree may still name some unrelated node of this one.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, S>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Total number of nodes, leaves and internal.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        // A strict binary tree with n leaves has n - 1 internal nodes.
        (self.nodes.len() + 1) / 2
    }

    /// Weight of the root, i.e. the length of the counted sequence.
    pub fn total_weight(&self) -> u64 {
        self.root().map_or(0, |root| root.weight())
    }

    /// Visit every node in pre-order (node, then left subtree, then right
    /// subtree).
    pub fn walk(&self) -> Walk<'_, S> {
        let stack = self
            .root()
            .map(|root| Visit {
                node: root,
                parent: None,
                depth: 0,
            })
            .into_iter()
            .collect();
        Walk { stack }
    }
}

/// Borrowed handle on one node of a [`HuffmanTree`].
pub struct NodeRef<'a, S> {
    tree: &'a HuffmanTree<S>,
    id: NodeId,
}

// Manual impls: a derive would require `S: Clone`.
impl<S> Clone for NodeRef<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for NodeRef<'_, S> {}

impl<'a, S> NodeRef<'a, S> {
    fn inner(&self) -> &'a Node<S> {
        &self.tree.nodes[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.inner(), Node::Leaf { .. })
    }

    /// The symbol of a leaf; `None` for internal nodes.
    pub fn symbol(&self) -> Option<&'a S> {
        match self.inner() {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Internal { .. } => None,
        }
    }

    pub fn weight(&self) -> u64 {
        self.inner().weight()
    }

    /// The `0` branch; `None` for leaves.
    pub fn left(&self) -> Option<NodeRef<'a, S>> {
        self.children().map(|(left, _)| left)
    }

    /// The `1` branch; `None` for leaves.
    pub fn right(&self) -> Option<NodeRef<'a, S>> {
        self.children().map(|(_, right)| right)
    }

    pub fn children(&self) -> Option<(NodeRef<'a, S>, NodeRef<'a, S>)> {
        match *self.inner() {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => {
                let child = |id| NodeRef {
                    tree: self.tree,
                    id,
                };
                Some((child(left), child(right)))
            }
        }
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for NodeRef<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("node", self.inner())
            .finish()
    }
}

/// One step of a [`Walk`].
#[derive(Debug)]
pub struct Visit<'a, S> {
    pub node: NodeRef<'a, S>,
    /// `None` for the root. Together with `node.id()` this is an edge.
    pub parent: Option<NodeId>,
    /// Distance from the root.
    pub depth: usize,
}

/// Pre-order iterator over a tree, using an explicit stack.
pub struct Walk<'a, S> {
    stack: Vec<Visit<'a, S>>,
}

impl<'a, S> Iterator for Walk<'a, S> {
    type Item = Visit<'a, S>;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = self.stack.pop()?;
        if let Some((left, right)) = visit.node.children() {
            let parent = Some(visit.node.id());
            let depth = visit.depth + 1;
            // Right first, so the left subtree comes out first.
            self.stack.push(Visit {
                node: right,
                parent,
                depth,
            });
            self.stack.push(Visit {
                node: left,
                parent,
                depth,
            });
        }
        Some(visit)
    }
}
