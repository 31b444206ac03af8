//! Array-backed binary heap for adtkit.
//!
//! The heap keeps its elements in a flat `Vec` addressed as a complete
//! binary tree (children of `i` live at `2i + 1` and `2i + 2`). The ordering
//! is a strategy value implementing [`HeapPredicate`]: [`MinOrder`],
//! [`MaxOrder`], the runtime-selectable [`HeapOrder`], or any closure wrapped
//! in [`FnPredicate`].
//!
//! Extracted elements are not dropped from the backing storage. The logical
//! size shrinks and the stale slot is overwritten by the next insert, so
//! storage is reused across extract/insert cycles.

use adtkit_error::{AdtError, ErrorCategory};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Heap errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// `peek` or `extract` on a heap with no live elements.
    #[error("heap is empty")]
    Empty,
}

impl From<HeapError> for AdtError {
    fn from(err: HeapError) -> Self {
        AdtError::from_source(ErrorCategory::Empty, err).with_context("structure", "heap")
    }
}

/// Heap-order strategy.
pub trait HeapPredicate<T> {
    /// Returns true when `parent` must not sit above `child`.
    fn violates(&self, parent: &T, child: &T) -> bool;
}

/// Parent must be less than or equal to its children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinOrder;

/// Parent must be greater than or equal to its children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxOrder;

impl<T: PartialOrd> HeapPredicate<T> for MinOrder {
    fn violates(&self, parent: &T, child: &T) -> bool {
        parent > child
    }
}

impl<T: PartialOrd> HeapPredicate<T> for MaxOrder {
    fn violates(&self, parent: &T, child: &T) -> bool {
        parent < child
    }
}

/// Ordering mode chosen at runtime, e.g. from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeapOrder {
    Min,
    #[default]
    Max,
}

impl<T: PartialOrd> HeapPredicate<T> for HeapOrder {
    fn violates(&self, parent: &T, child: &T) -> bool {
        match self {
            HeapOrder::Min => MinOrder.violates(parent, child),
            HeapOrder::Max => MaxOrder.violates(parent, child),
        }
    }
}

/// Adapts a closure `Fn(&parent, &child) -> bool` into a [`HeapPredicate`].
#[derive(Debug, Clone, Copy)]
pub struct FnPredicate<F>(pub F);

impl<T, F> HeapPredicate<T> for FnPredicate<F>
where
    F: Fn(&T, &T) -> bool,
{
    fn violates(&self, parent: &T, child: &T) -> bool {
        (self.0)(parent, child)
    }
}

/// A binary heap over a flat array (max-heap by default).
#[derive(Debug, Clone)]
pub struct BinaryHeap<T, P = MaxOrder> {
    data: Vec<T>,
    size: usize,
    predicate: P,
}

pub type MinHeap<T> = BinaryHeap<T, MinOrder>;
pub type MaxHeap<T> = BinaryHeap<T, MaxOrder>;

impl<T, P: HeapPredicate<T> + Default> Default for BinaryHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: HeapPredicate<T> + Default> BinaryHeap<T, P> {
    /// Create a new empty heap.
    pub fn new() -> Self {
        Self::with_predicate(P::default())
    }

    /// Build a heap from an arbitrary sequence in linear time.
    pub fn heapify(data: Vec<T>) -> Self {
        Self::heapify_with(data, P::default())
    }
}

impl<T, P: HeapPredicate<T>> BinaryHeap<T, P> {
    /// Create an empty heap ordered by `predicate`.
    pub fn with_predicate(predicate: P) -> Self {
        Self {
            data: Vec::new(),
            size: 0,
            predicate,
        }
    }

    /// Build a heap ordered by `predicate` from an arbitrary sequence.
    pub fn heapify_with(data: Vec<T>, predicate: P) -> Self {
        let size = data.len();
        let mut heap = Self {
            data,
            size,
            predicate,
        };
        heap.heapify_in_place();
        heap
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Length of the backing storage, stale slots included.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Live elements in storage order.
    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.size]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn predicate(&self) -> &P {
        &self.predicate
    }

    /// Root element without removing it.
    pub fn peek(&self) -> Result<&T, HeapError> {
        self.as_slice().first().ok_or(HeapError::Empty)
    }

    /// Insert an element, reusing a stale slot when one is available.
    pub fn insert(&mut self, item: T) {
        if self.size < self.data.len() {
            self.data[self.size] = item;
        } else {
            self.data.push(item);
        }
        self.size += 1;
        self.sift_up(self.size - 1);
    }

    /// Check the heap-order invariant over every live parent/child pair.
    pub fn is_heap(&self) -> bool {
        (1..self.size).all(|child| {
            let parent = (child - 1) / 2;
            !self.predicate.violates(&self.data[parent], &self.data[child])
        })
    }

    /// Forget all elements. Storage is kept for reuse.
    pub fn clear(&mut self) {
        self.size = 0;
    }

    fn heapify_in_place(&mut self) {
        let last_parent = self.size.div_ceil(2);
        for index in (0..last_parent).rev() {
            self.sift_down(index);
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index + 1) / 2 - 1;
            if !self.predicate.violates(&self.data[parent], &self.data[index]) {
                break;
            }
            self.data.swap(parent, index);
            index = parent;
        }
    }

    /// Pick the node that should root the subtree at `index`. The left child
    /// is compared first; the right child only wins against the current pick.
    fn promote_child(&self, index: usize) -> usize {
        let left = index * 2 + 1;
        let right = left + 1;
        let mut candidate = index;

        if left < self.size && self.predicate.violates(&self.data[candidate], &self.data[left]) {
            candidate = left;
        }
        if right < self.size && self.predicate.violates(&self.data[candidate], &self.data[right])
        {
            candidate = right;
        }
        candidate
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let child = self.promote_child(index);
            if child == index {
                break;
            }
            self.data.swap(index, child);
            index = child;
        }
    }
}

impl<T: Clone, P: HeapPredicate<T>> BinaryHeap<T, P> {
    /// Remove and return the root element.
    ///
    /// The former root is swapped into the last live slot, which then
    /// becomes stale storage; the new root is sifted down.
    pub fn extract(&mut self) -> Result<T, HeapError> {
        if self.size == 0 {
            return Err(HeapError::Empty);
        }
        self.size -= 1;
        self.data.swap(0, self.size);
        self.sift_down(0);
        Ok(self.data[self.size].clone())
    }

    /// Drain the heap in extraction order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut result = Vec::with_capacity(self.size);
        while let Ok(item) = self.extract() {
            result.push(item);
        }
        result
    }
}

impl<T, P: HeapPredicate<T>> Extend<T> for BinaryHeap<T, P> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T, P: HeapPredicate<T> + Default> FromIterator<T> for BinaryHeap<T, P> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::heapify(iter.into_iter().collect())
    }
}
