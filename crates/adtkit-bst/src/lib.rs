//! Binary Search Tree implementation for adtkit.
//!
//! Nodes live in an arena and refer to each other through [`NodeId`]s, so
//! parent links need no shared ownership. Nodes are never removed, which
//! keeps every handed-out id valid for the life of the tree.
//!
//! Accessors taking a [`NodeId`] index straight into the arena and panic on
//! an id issued by a different, larger tree. Use [`BinarySearchTree::get`]
//! when the id's origin is not known.

use adtkit_error::{AdtError, ErrorCategory};
use std::fmt;
use thiserror::Error;

/// BST errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BstError {
    #[error("node not found")]
    NodeNotFound,
}

impl From<BstError> for AdtError {
    fn from(err: BstError) -> Self {
        AdtError::from_source(ErrorCategory::NotFound, err).with_context("structure", "binary_search_tree")
    }
}

/// Handle to a node of one [`BinarySearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root is always the first node allocated.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Unbalanced binary search tree holding distinct values.
#[derive(Debug, Clone)]
pub struct BinarySearchTree<T> {
    nodes: Vec<Node<T>>,
}

impl<T: Ord> BinarySearchTree<T> {
    /// Tree holding just `root`.
    pub fn new(root: T) -> Self {
        Self {
            nodes: vec![Node {
                value: root,
                parent: None,
                left: None,
                right: None,
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree is created with its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    /// Insert `item`. Returns the node holding it; an existing equal item is
    /// left untouched.
    pub fn insert(&mut self, item: T) -> NodeId {
        let mut current = NodeId::ROOT;
        loop {
            let node = self.node(current);
            let next = match item.cmp(&node.value) {
                std::cmp::Ordering::Less => node.left,
                std::cmp::Ordering::Greater => node.right,
                std::cmp::Ordering::Equal => return current,
            };
            match next {
                Some(child) => current = child,
                None => break,
            }
        }

        let id = NodeId(self.nodes.len());
        let goes_left = item < self.node(current).value;
        self.nodes.push(Node {
            value: item,
            parent: Some(current),
            left: None,
            right: None,
        });
        let parent = &mut self.nodes[current.0];
        if goes_left {
            parent.left = Some(id);
        } else {
            parent.right = Some(id);
        }
        id
    }

    /// Node holding a value equal to `item`.
    pub fn search(&self, item: &T) -> Result<NodeId, BstError> {
        let mut current = Some(NodeId::ROOT);
        while let Some(id) = current {
            let node = self.node(id);
            current = match item.cmp(&node.value) {
                std::cmp::Ordering::Less => node.left,
                std::cmp::Ordering::Greater => node.right,
                std::cmp::Ordering::Equal => return Ok(id),
            };
        }
        Err(BstError::NodeNotFound)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.search(item).is_ok()
    }

    /// Value stored at `id`, or `None` when `id` is not a node of this tree.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id.0).map(|node| &node.value)
    }

    /// Value stored at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn value(&self, id: NodeId) -> &T {
        &self.node(id).value
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree, as do `is_leaf`,
    /// `is_root`, `predecessor` and `successor`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        let node = self.node(id);
        node.left.is_none() && node.right.is_none()
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        self.node(id).parent.is_none()
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    /// Node with the smallest value.
    pub fn min(&self) -> NodeId {
        self.leftmost(NodeId::ROOT)
    }

    /// Node with the largest value.
    pub fn max(&self) -> NodeId {
        self.rightmost(NodeId::ROOT)
    }

    /// In-order predecessor of `id`.
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.node(id).left {
            return Some(self.rightmost(left));
        }
        // Climb until we arrive from a right child.
        let mut child = id;
        let mut parent = self.node(id).parent;
        while let Some(p) = parent {
            if self.node(p).right == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.node(p).parent;
        }
        None
    }

    /// In-order successor of `id`.
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.node(id).right {
            return Some(self.leftmost(right));
        }
        let mut child = id;
        let mut parent = self.node(id).parent;
        while let Some(p) = parent {
            if self.node(p).left == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.node(p).parent;
        }
        None
    }

    /// Values in ascending order.
    pub fn inorder(&self) -> Vec<&T> {
        let mut values = Vec::with_capacity(self.nodes.len());
        let mut next = Some(self.min());
        while let Some(id) = next {
            values.push(self.value(id));
            next = self.successor(id);
        }
        values
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        (0..self.nodes.len())
            .filter(|&index| self.is_leaf(NodeId(index)))
            .map(|index| {
                let mut depth = 1;
                let mut current = self.nodes[index].parent;
                while let Some(p) = current {
                    depth += 1;
                    current = self.node(p).parent;
                }
                depth
            })
            .max()
            .unwrap_or(0)
    }
}
