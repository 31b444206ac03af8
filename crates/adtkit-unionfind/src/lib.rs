//! Union-find (disjoint-set) containers for adtkit.
//!
//! Items are mapped to dense indices once, at construction; the forest is a
//! plain `Vec<usize>` of parent indices. How `find` shortens paths is a
//! strategy parameter:
//!
//! - [`PathHalving`]: every visited node skips to its grandparent.
//! - [`PathCompression`]: a second pass points every visited node at the root.
//!
//! Unions are weighted: the root of the smaller tree goes under the root of
//! the larger one.

use adtkit_error::{AdtError, ErrorCategory};
use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;
use thiserror::Error;

/// Union-find errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UnionFindError {
    #[error("item is not part of the union-find structure")]
    UnknownItem,
    #[error("items already belong to the same set")]
    AlreadyUnified,
}

impl From<UnionFindError> for AdtError {
    fn from(err: UnionFindError) -> Self {
        let category = match err {
            UnionFindError::UnknownItem => ErrorCategory::NotFound,
            UnionFindError::AlreadyUnified => ErrorCategory::Conflict,
        };
        AdtError::from_source(category, err).with_context("structure", "union_find")
    }
}

/// Path shortening applied by `find`.
pub trait Compression {
    /// Return the root of `index`, rewriting `parent` along the way.
    fn find_root(parent: &mut [usize], index: usize) -> usize;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PathHalving;

impl Compression for PathHalving {
    fn find_root(parent: &mut [usize], mut index: usize) -> usize {
        while parent[index] != index {
            parent[index] = parent[parent[index]];
            index = parent[index];
        }
        index
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PathCompression;

impl Compression for PathCompression {
    fn find_root(parent: &mut [usize], index: usize) -> usize {
        let root = PathHalving::find_root(parent, index);

        let mut current = index;
        while parent[current] != current {
            let next = parent[current];
            parent[current] = root;
            current = next;
        }
        root
    }
}

/// Disjoint-set forest over arbitrary hashable items.
#[derive(Debug, Clone)]
pub struct DisjointSet<T, C = PathCompression> {
    to_index: HashMap<T, usize>,
    items: Vec<T>,
    parent: Vec<usize>,
    weight: Vec<usize>,
    sets: usize,
    _compression: PhantomData<C>,
}

/// Union-find with path halving only.
pub type SimpleUnionFind<T> = DisjointSet<T, PathHalving>;

/// Weighted union-find with full path compression.
pub type UnionFind<T> = DisjointSet<T, PathCompression>;

impl<T: Hash + Eq + Clone, C: Compression> DisjointSet<T, C> {
    /// Every item starts in its own singleton set. Repeated items are kept
    /// once.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        let mut set = Self {
            to_index: HashMap::new(),
            items: Vec::new(),
            parent: Vec::new(),
            weight: Vec::new(),
            sets: 0,
            _compression: PhantomData,
        };
        for item in items {
            set.insert(item);
        }
        set
    }

    /// Add `item` as a new singleton set. Returns false if already present.
    pub fn insert(&mut self, item: T) -> bool {
        if self.to_index.contains_key(&item) {
            return false;
        }
        let index = self.items.len();
        self.to_index.insert(item.clone(), index);
        self.items.push(item);
        self.parent.push(index);
        self.weight.push(1);
        self.sets += 1;
        true
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    pub fn contains(&self, item: &T) -> bool {
        self.to_index.contains_key(item)
    }

    fn index_of(&self, item: &T) -> Result<usize, UnionFindError> {
        self.to_index
            .get(item)
            .copied()
            .ok_or(UnionFindError::UnknownItem)
    }

    fn root_of(&mut self, item: &T) -> Result<usize, UnionFindError> {
        let index = self.index_of(item)?;
        Ok(C::find_root(&mut self.parent, index))
    }

    /// Representative of the set containing `item`.
    pub fn find(&mut self, item: &T) -> Result<&T, UnionFindError> {
        let root = self.root_of(item)?;
        Ok(&self.items[root])
    }

    /// Join the sets containing `a` and `b`, returning the new
    /// representative.
    pub fn union(&mut self, a: &T, b: &T) -> Result<&T, UnionFindError> {
        let root_a = self.root_of(a)?;
        let root_b = self.root_of(b)?;
        if root_a == root_b {
            return Err(UnionFindError::AlreadyUnified);
        }

        let (root, child) = if self.weight[root_a] >= self.weight[root_b] {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.parent[child] = root;
        self.weight[root] += self.weight[child];
        self.sets -= 1;
        Ok(&self.items[root])
    }

    /// Whether `a` and `b` are in the same set.
    pub fn connected(&mut self, a: &T, b: &T) -> Result<bool, UnionFindError> {
        Ok(self.root_of(a)? == self.root_of(b)?)
    }

    /// Size of the set containing `item`.
    pub fn set_size(&mut self, item: &T) -> Result<usize, UnionFindError> {
        let root = self.root_of(item)?;
        Ok(self.weight[root])
    }

    /// Longest parent chain, for checking that paths stay short.
    pub fn max_depth(&self) -> usize {
        (0..self.parent.len())
            .map(|mut index| {
                let mut depth = 0;
                while self.parent[index] != index {
                    index = self.parent[index];
                    depth += 1;
                }
                depth
            })
            .max()
            .unwrap_or(0)
    }
}

impl<T: Hash + Eq + Clone, C: Compression> FromIterator<T> for DisjointSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}
