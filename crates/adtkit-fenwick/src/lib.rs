//! Fenwick tree (binary indexed tree) for adtkit.
//!
//! The lighter alternative to a sum segment tree: point updates and prefix
//! sums in `O(log n)` over `n + 1` slots, with no merge strategy to carry.

use adtkit_error::{AdtError, ErrorCategory};
use std::ops::{Add, Sub};
use thiserror::Error;

/// Fenwick tree errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FenwickError {
    #[error("index {index} is outside [0, {length})")]
    IndexOutOfBounds { index: usize, length: usize },
    #[error("invalid interval [{start}, {end}]: expected start <= end within [0, {length})")]
    InvalidRange {
        start: usize,
        end: usize,
        length: usize,
    },
}

impl From<FenwickError> for AdtError {
    fn from(err: FenwickError) -> Self {
        AdtError::from_source(ErrorCategory::Range, err).with_context("structure", "fenwick_tree")
    }
}

/// A Fenwick Tree for prefix sum queries.
///
/// Supports:
/// - Point updates: O(log n)
/// - Prefix sum queries: O(log n)
/// - Range sum queries: O(log n)
#[derive(Debug, Clone)]
pub struct FenwickTree<T> {
    // 1-based; slot 0 is unused.
    data: Vec<T>,
    size: usize,
}

impl<T> FenwickTree<T>
where
    T: Copy + Default + Add<Output = T> + Sub<Output = T>,
{
    /// Creates a tree of `size` zeros.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![T::default(); size + 1],
            size,
        }
    }

    /// Creates a tree from a slice of values in `O(n)`.
    pub fn from_slice(slice: &[T]) -> Self {
        let size = slice.len();
        let mut tree = Self::new(size);
        tree.data[1..].copy_from_slice(slice);

        for i in 1..=size {
            let parent = i + lowest_bit(i);
            if parent <= size {
                tree.data[parent] = tree.data[parent] + tree.data[i];
            }
        }

        tree
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    fn check_index(&self, index: usize) -> Result<(), FenwickError> {
        if index >= self.size {
            return Err(FenwickError::IndexOutOfBounds {
                index,
                length: self.size,
            });
        }
        Ok(())
    }

    /// Adds `delta` to the element at `index`.
    pub fn add(&mut self, index: usize, delta: T) -> Result<(), FenwickError> {
        self.check_index(index)?;
        let mut i = index + 1;
        while i <= self.size {
            self.data[i] = self.data[i] + delta;
            i += lowest_bit(i);
        }
        Ok(())
    }

    /// Sets the element at `index` to `value`.
    ///
    /// Every node on the update path covers `index`, so it holds at least
    /// the current element; unsigned trees never underflow here.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), FenwickError> {
        let current = self.get(index)?;
        let mut i = index + 1;
        while i <= self.size {
            self.data[i] = self.data[i] - current + value;
            i += lowest_bit(i);
        }
        Ok(())
    }

    /// Sum of elements `[0, index]`.
    pub fn prefix_sum(&self, index: usize) -> Result<T, FenwickError> {
        self.check_index(index)?;
        Ok(self.prefix(index + 1))
    }

    // Sum of the first `count` elements.
    fn prefix(&self, mut count: usize) -> T {
        let mut result = T::default();
        while count > 0 {
            result = result + self.data[count];
            count -= lowest_bit(count);
        }
        result
    }

    /// Sum of elements in `[start, end]` (inclusive).
    pub fn range_sum(&self, start: usize, end: usize) -> Result<T, FenwickError> {
        if start > end || end >= self.size {
            return Err(FenwickError::InvalidRange {
                start,
                end,
                length: self.size,
            });
        }
        Ok(self.prefix(end + 1) - self.prefix(start))
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Result<T, FenwickError> {
        self.check_index(index)?;
        Ok(self.prefix(index + 1) - self.prefix(index))
    }
}

impl<T> FenwickTree<T>
where
    T: Copy + Default + Add<Output = T> + Sub<Output = T> + PartialOrd,
{
    /// Smallest index whose prefix sum is `>= target`, assuming no negative
    /// elements. `None` when the total is below `target`.
    pub fn lower_bound(&self, mut target: T) -> Option<usize> {
        if self.size == 0 {
            return None;
        }
        if target <= T::default() {
            return Some(0);
        }
        if target > self.prefix(self.size) {
            return None;
        }

        let mut idx = 0;
        let mut step = self.size.next_power_of_two();
        while step > 0 {
            let next = idx + step;
            if next <= self.size && self.data[next] < target {
                idx = next;
                target = target - self.data[next];
            }
            step >>= 1;
        }

        Some(idx)
    }
}

fn lowest_bit(i: usize) -> usize {
    i & i.wrapping_neg()
}
