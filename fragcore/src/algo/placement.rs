//! The three fit policies. Each one looks at the partition table as it
//! stands and returns the index of the partition that should receive a
//! process of the given size, or `None` if no free partition is big
//! enough.
//!
//! All three traverse partitions in creation order. Comparisons are
//! strict, so among equally good candidates the earliest-created one
//! wins.

use crate::utils::*;

/// Smallest leftover (`partition.size - size`) wins.
pub fn best_fit(partitions: &PartitionTable, size: MemUnits) -> Option<usize> {
    let mut smallest_gap = MemUnits::INFINITY;
    let mut best: Option<usize> = None;
    for (idx, p) in partitions.values().enumerate() {
        if p.accepts(size) {
            let gap = p.size - size;
            if gap < smallest_gap {
                smallest_gap = gap;
                best = Some(idx);
            }
        }
    }

    best
}

/// Largest partition wins.
pub fn worst_fit(partitions: &PartitionTable, size: MemUnits) -> Option<usize> {
    let mut largest = MemUnits::NEG_INFINITY;
    let mut worst: Option<usize> = None;
    for (idx, p) in partitions.values().enumerate() {
        if p.accepts(size) && p.size > largest {
            largest = p.size;
            worst = Some(idx);
        }
    }

    worst
}

/// First one that fits wins.
pub fn first_fit(partitions: &PartitionTable, size: MemUnits) -> Option<usize> {
    partitions
        .values()
        .position(|p| p.accepts(size))
}
