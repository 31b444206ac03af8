//! Range query factory: maps a query-kind tag to a merge and its identity.

use crate::{SegmentTree, SegmentTreeError};
use adtkit_logging::{LogEntry, LogFacade, LogLevel, NoticeSink};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

/// Log component used for notices emitted by the factory.
pub const COMPONENT: &str = "adtkit::segment";

/// Segment tree built by [`SegmentTreeFactory`].
pub type RangeQueryTree<T> = SegmentTree<T, fn(&T, &T) -> T>;

/// Element types usable with the bundled range queries.
///
/// Sums use the type's own `+`. For fixed-width integers a sum that leaves
/// the type's range panics in debug builds and wraps in release builds, so
/// pick an element type wide enough for the largest range total.
pub trait Aggregate: Copy + PartialOrd + Add<Output = Self> {
    /// Identity of addition.
    const ZERO: Self;
    /// Identity of `min`: positive infinity or the type's maximum.
    const POS_INFINITY: Self;
    /// Identity of `max`: negative infinity or the type's minimum.
    const NEG_INFINITY: Self;
}

macro_rules! impl_aggregate_int {
    ($($t:ty),*) => {
        $(impl Aggregate for $t {
            const ZERO: Self = 0;
            const POS_INFINITY: Self = <$t>::MAX;
            const NEG_INFINITY: Self = <$t>::MIN;
        })*
    };
}

macro_rules! impl_aggregate_float {
    ($($t:ty),*) => {
        $(impl Aggregate for $t {
            const ZERO: Self = 0.0;
            const POS_INFINITY: Self = <$t>::INFINITY;
            const NEG_INFINITY: Self = <$t>::NEG_INFINITY;
        })*
    };
}

impl_aggregate_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_aggregate_float!(f32, f64);

/// Kind of range query a factory-built tree answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateKind {
    Sum,
    Min,
    Max,
}

impl AggregateKind {
    /// Every supported kind, in the order they are reported to callers.
    pub const ALL: [AggregateKind; 3] = [AggregateKind::Sum, AggregateKind::Min, AggregateKind::Max];

    pub fn as_str(self) -> &'static str {
        match self {
            AggregateKind::Sum => "sum",
            AggregateKind::Min => "min",
            AggregateKind::Max => "max",
        }
    }

    /// Comma-separated list of supported tags.
    pub fn supported() -> String {
        Self::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Merge function for this kind.
    pub fn merge<T: Aggregate>(self) -> fn(&T, &T) -> T {
        match self {
            AggregateKind::Sum => merge_sum::<T>,
            AggregateKind::Min => merge_min::<T>,
            AggregateKind::Max => merge_max::<T>,
        }
    }

    /// Identity value returned for empty sub-ranges.
    pub fn identity<T: Aggregate>(self) -> T {
        match self {
            AggregateKind::Sum => T::ZERO,
            AggregateKind::Min => T::POS_INFINITY,
            AggregateKind::Max => T::NEG_INFINITY,
        }
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregateKind {
    type Err = SegmentTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| SegmentTreeError::UnsupportedAggregateKind {
                kind: s.to_string(),
                supported: Self::supported(),
            })
    }
}

fn merge_sum<T: Aggregate>(a: &T, b: &T) -> T {
    *a + *b
}

fn merge_min<T: Aggregate>(a: &T, b: &T) -> T {
    if *b < *a { *b } else { *a }
}

fn merge_max<T: Aggregate>(a: &T, b: &T) -> T {
    if *b > *a { *b } else { *a }
}

/// Builds segment trees for a query-kind tag.
///
/// One tree answers one kind of query; build several trees over the same
/// array to answer several kinds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentTreeFactory;

impl SegmentTreeFactory {
    /// Build a tree for `kind` (`"sum"`, `"min"` or `"max"`).
    ///
    /// Sum trees emit an advisory through the `log` facade recommending a
    /// Fenwick tree.
    ///
    /// # Panics
    ///
    /// In debug builds, a `"sum"` tree over a fixed-width integer type panics
    /// while building if the total of `array` overflows `T`; release builds
    /// wrap. See [`Aggregate`].
    pub fn create<T: Aggregate>(
        array: &[T],
        kind: &str,
    ) -> Result<RangeQueryTree<T>, SegmentTreeError> {
        Self::create_with_sink(array, kind, &mut LogFacade)
    }

    /// Like [`create`](Self::create), sending advisories to `sink`.
    pub fn create_with_sink<T: Aggregate, S: NoticeSink + ?Sized>(
        array: &[T],
        kind: &str,
        sink: &mut S,
    ) -> Result<RangeQueryTree<T>, SegmentTreeError> {
        let kind: AggregateKind = kind.parse()?;
        Ok(Self::create_kind(array, kind, sink))
    }

    /// Build a tree for an already parsed kind.
    pub fn create_kind<T: Aggregate, S: NoticeSink + ?Sized>(
        array: &[T],
        kind: AggregateKind,
        sink: &mut S,
    ) -> RangeQueryTree<T> {
        if kind == AggregateKind::Sum {
            sink.notice(LogEntry::with_component(
                LogLevel::Warn,
                COMPONENT,
                "for range sum queries a Fenwick tree (adtkit_fenwick::FenwickTree) is simpler, faster and smaller",
            ));
        }
        SegmentTree::new(array, kind.merge::<T>(), kind.identity::<T>())
    }
}
