//! Version ordering for index entries
//!
//! Versions are compared segment by segment on their numeric value, so
//! `10.0.0` ranks above `2.9.9`. A missing segment counts as zero and a
//! segment's value is its leading run of digits (`0-rc1` ranks as `0`).
//! Pre-release and build suffixes carry no weight.

use std::cmp::Ordering;

/// Compare two version strings by dot-separated numeric segments
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left: Vec<u64> = a.split('.').map(segment_value).collect();
    let right: Vec<u64> = b.split('.').map(segment_value).collect();

    let len = left.len().max(right.len());
    for i in 0..len {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

fn segment_value(segment: &str) -> u64 {
    let digits: &str = {
        let end = segment
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(segment.len());
        &segment[..end]
    };
    digits.parse().unwrap_or(if digits.is_empty() { 0 } else { u64::MAX })
}
