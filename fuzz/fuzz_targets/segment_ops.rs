//! Fuzz harness for segment tree queries and updates
//!
//! The first byte picks the aggregate kind and the array length; the rest
//! drives interleaved updates and queries, each checked against a naive fold
//! over a shadow copy of the array. Out-of-domain positions must be rejected
//! rather than panic.

#![no_main]

use adtkit_logging::LogCollector;
use adtkit_segment::{AggregateKind, SegmentTreeFactory};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&head, rest)) = data.split_first() else {
        return;
    };
    let kind = AggregateKind::ALL[usize::from(head % 3)];
    let length = usize::from(head / 3 % 33);
    let mut shadow: Vec<i64> = rest.iter().take(length).map(|b| i64::from(*b) - 128).collect();
    let rest = &rest[shadow.len()..];

    let mut tree = SegmentTreeFactory::create_kind(&shadow, kind, &mut LogCollector::new());
    let merge = kind.merge::<i64>();

    for op in rest.chunks_exact(3) {
        let a = usize::from(op[1]) % (shadow.len() + 2);
        let b = usize::from(op[2]) % (shadow.len() + 2);
        if op[0] % 2 == 0 {
            let value = i64::from(op[2]) - 128;
            let result = tree.update(a, value);
            if a < shadow.len() {
                assert!(result.is_ok());
                shadow[a] = value;
            } else {
                assert!(result.is_err());
            }
        } else {
            let result = tree.query(a, b);
            if a <= b && b < shadow.len() {
                let expected = shadow[a..=b]
                    .iter()
                    .fold(kind.identity::<i64>(), |acc, v| merge(&acc, v));
                assert_eq!(result, Ok(expected));
            } else {
                assert!(result.is_err());
            }
        }
    }
});
