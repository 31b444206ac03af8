//! Classic abstract data types.
//!
//! Each structure lives in its own crate and is re-exported here. Every
//! crate-level error converts into [`AdtError`], so mixed code can use
//! [`Result`] and `?` throughout.
//!
//! ```
//! use adtkit::prelude::*;
//!
//! fn smallest_window_sum(values: &[i64]) -> adtkit::Result<i64> {
//!     let mut heap: MinHeap<i64> = values.iter().copied().collect();
//!     let low = heap.extract()?;
//!     let tree = SegmentTreeFactory::create(values, "sum")?;
//!     Ok(low + tree.query(0, values.len() - 1)?)
//! }
//!
//! assert_eq!(smallest_window_sum(&[4, 1, 3]).unwrap(), 9);
//! assert!(smallest_window_sum(&[]).unwrap_err().is_empty_error());
//! ```

pub use adtkit_error::{AdtError, ErrorCategory, Result};

pub use adtkit_bst as bst;
pub use adtkit_fenwick as fenwick;
pub use adtkit_heap as heap;
pub use adtkit_logging as logging;
pub use adtkit_segment as segment;
pub use adtkit_skiplist as skiplist;
pub use adtkit_unionfind as unionfind;

pub mod prelude {
    pub use adtkit_bst::{BinarySearchTree, NodeId};
    pub use adtkit_error::{AdtError, ErrorCategory};
    pub use adtkit_fenwick::FenwickTree;
    pub use adtkit_heap::{BinaryHeap, HeapOrder, HeapPredicate, MaxHeap, MinHeap};
    pub use adtkit_logging::{LogCollector, NoticeSink};
    pub use adtkit_segment::{AggregateKind, SegmentTree, SegmentTreeFactory};
    pub use adtkit_skiplist::{SkipList, SkipListConfig};
    pub use adtkit_unionfind::{SimpleUnionFind, UnionFind};
}
