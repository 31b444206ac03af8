//! Skip list implementation for adtkit.
//!
//! An ordered set stored as an arena: every node owns one forward link per
//! level it participates in, and links are indices into the node vector.
//! Node heights come from independent coin flips on an owned [`StdRng`].

use adtkit_error::{AdtError, ErrorCategory};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

/// Skip list errors
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SkipListError {
    #[error("promotion probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
    #[error("max level must be at least 1")]
    ZeroMaxLevel,
}

impl From<SkipListError> for AdtError {
    fn from(err: SkipListError) -> Self {
        AdtError::from_source(ErrorCategory::Range, err).with_context("structure", "skip_list")
    }
}

/// Shape parameters for node heights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkipListConfig {
    /// Upper bound on node height.
    pub max_level: usize,
    /// Chance that a node is promoted one more level.
    pub probability: f64,
}

impl Default for SkipListConfig {
    fn default() -> Self {
        Self {
            max_level: 16,
            probability: 0.5,
        }
    }
}

impl SkipListConfig {
    pub fn validate(&self) -> Result<(), SkipListError> {
        if self.max_level == 0 {
            return Err(SkipListError::ZeroMaxLevel);
        }
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(SkipListError::InvalidProbability(self.probability));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    forward: Vec<Option<usize>>,
}

/// Ordered set backed by a skip list.
///
/// Links are `None`-terminated; a `None` origin stands for the head.
#[derive(Debug, Clone)]
pub struct SkipList<T> {
    head: Vec<Option<usize>>,
    nodes: Vec<Node<T>>,
    level: usize,
    config: SkipListConfig,
    rng: StdRng,
}

impl<T: Ord> SkipList<T> {
    /// Empty list with the default config, seeded from the OS.
    pub fn new() -> Self {
        Self::build(SkipListConfig::default(), StdRng::from_os_rng())
    }

    /// Empty list whose coin flips are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(SkipListConfig::default(), StdRng::seed_from_u64(seed))
    }

    pub fn with_config(config: SkipListConfig) -> Result<Self, SkipListError> {
        config.validate()?;
        Ok(Self::build(config, StdRng::from_os_rng()))
    }

    pub fn with_config_and_seed(config: SkipListConfig, seed: u64) -> Result<Self, SkipListError> {
        config.validate()?;
        Ok(Self::build(config, StdRng::seed_from_u64(seed)))
    }

    fn build(config: SkipListConfig, rng: StdRng) -> Self {
        Self {
            head: vec![None; config.max_level],
            nodes: Vec::new(),
            level: 0,
            config,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Height of the tallest node.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn config(&self) -> &SkipListConfig {
        &self.config
    }

    fn forward(&self, from: Option<usize>, level: usize) -> Option<usize> {
        match from {
            None => self.head[level],
            Some(index) => self.nodes[index].forward[level],
        }
    }

    fn set_forward(&mut self, from: Option<usize>, level: usize, to: Option<usize>) {
        match from {
            None => self.head[level] = to,
            Some(index) => self.nodes[index].forward[level] = to,
        }
    }

    /// Last node strictly before `item` on every level.
    fn predecessors(&self, item: &T) -> Vec<Option<usize>> {
        let mut update = vec![None; self.config.max_level];
        let mut current = None;
        for level in (0..self.level).rev() {
            while let Some(next) = self.forward(current, level) {
                if self.nodes[next].value < *item {
                    current = Some(next);
                } else {
                    break;
                }
            }
            update[level] = current;
        }
        update
    }

    fn position(&self, update: &[Option<usize>], item: &T) -> Option<usize> {
        self.forward(update[0], 0)
            .filter(|&index| self.nodes[index].value.cmp(item) == Ordering::Equal)
    }

    fn random_height(&mut self) -> usize {
        let mut height = 1;
        while height < self.config.max_level && self.rng.random_bool(self.config.probability) {
            height += 1;
        }
        height
    }

    /// Insert `item`, replacing an equal item in place. Returns true when a
    /// new node was created.
    pub fn add(&mut self, item: T) -> bool {
        let update = self.predecessors(&item);
        if let Some(existing) = self.position(&update, &item) {
            self.nodes[existing].value = item;
            return false;
        }

        let height = self.random_height();
        let index = self.nodes.len();
        let forward = (0..height)
            .map(|level| self.forward(update[level], level))
            .collect();
        self.nodes.push(Node {
            value: item,
            forward,
        });
        for (level, &from) in update.iter().enumerate().take(height) {
            self.set_forward(from, level, Some(index));
        }
        self.level = self.level.max(height);
        true
    }

    /// The stored item equal to `item`.
    pub fn find(&self, item: &T) -> Option<&T> {
        let update = self.predecessors(item);
        self.position(&update, item)
            .map(|index| &self.nodes[index].value)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.find(item).is_some()
    }

    /// Unlink and return the item equal to `item`.
    pub fn remove(&mut self, item: &T) -> Option<T> {
        let update = self.predecessors(item);
        let target = self.position(&update, item)?;

        for level in 0..self.nodes[target].forward.len() {
            let next = self.nodes[target].forward[level];
            self.set_forward(update[level], level, next);
        }

        // The last node moves into the freed slot; repoint its predecessors.
        let last = self.nodes.len() - 1;
        if target != last {
            let moved = self.predecessors(&self.nodes[last].value);
            for level in 0..self.nodes[last].forward.len() {
                self.set_forward(moved[level], level, Some(target));
            }
        }
        let removed = self.nodes.swap_remove(target);

        while self.level > 0 && self.head[self.level - 1].is_none() {
            self.level -= 1;
        }
        Some(removed.value)
    }

    /// Remove every item, keeping the config and RNG.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head.iter_mut().for_each(|link| *link = None);
        self.level = 0;
    }

    pub fn first(&self) -> Option<&T> {
        self.head[0].map(|index| &self.nodes[index].value)
    }

    /// Items in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: self.head[0],
        }
    }
}

impl<T: Ord> Default for SkipList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Extend<T> for SkipList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T: Ord> FromIterator<T> for SkipList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

/// Ascending iterator over a [`SkipList`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    list: &'a SkipList<T>,
    next: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.list.nodes[self.next?];
        self.next = node.forward[0];
        Some(&node.value)
    }
}

impl<'a, T: Ord> IntoIterator for &'a SkipList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
