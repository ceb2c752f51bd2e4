// ============================================================================
// FILE: src/utils.rs
// ============================================================================

//! Utility functions used across the library.

/// Round `value` up to the next multiple of `multiple` (`multiple` of 0 is treated as 1).
///
/// Saturates at the largest multiple representable in `usize`.
#[inline(always)]
#[must_use]
pub const fn round_up_to_multiple(value: usize, multiple: usize) -> usize {
    let m = if multiple == 0 { 1 } else { multiple };
    match value % m {
        0 => value,
        rem => match value.checked_add(m - rem) {
            Some(v) => v,
            None => value - rem,
        },
    }
}

/// Length of each statically partitioned slot range.
///
/// `count` slots are split over `workers` ranges; every range except possibly the last
/// holds a multiple of `min_keys` slots, so no backend chunk straddles two workers.
#[must_use]
pub fn partition_len(count: usize, workers: usize, min_keys: usize) -> usize {
    let per_worker = count.div_ceil(workers.max(1)).max(1);
    round_up_to_multiple(per_worker, min_keys)
}

/// Worker count reported by the OS, or 1 when unavailable.
#[must_use]
pub fn available_workers() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding() {
        assert_eq!(round_up_to_multiple(0, 4), 0);
        assert_eq!(round_up_to_multiple(1, 4), 4);
        assert_eq!(round_up_to_multiple(8, 4), 8);
        assert_eq!(round_up_to_multiple(9, 1), 9);
        assert_eq!(round_up_to_multiple(5, 0), 5);
    }

    #[test]
    fn partitions_cover_all_slots() {
        for count in 1..50 {
            for workers in 1..6 {
                for min_keys in [1, 4] {
                    let len = partition_len(count, workers, min_keys);
                    assert_eq!(len % min_keys, 0);
                    assert!(count.div_ceil(len) <= workers);
                }
            }
        }
    }
}
