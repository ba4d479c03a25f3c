//! Previous/next smaller value arrays, derived from a suffix array.
//!
//! For every text position `p`, `psv[p]` and `nsv[p]` are the closest
//! suffixes (by rank, not by text position) that are lexicographically
//! smaller than the suffix starting at `p`, one occurring before it in the
//! suffix array and one after; `-1` marks the absence of a candidate at
//! either end. This is the PSV/NSV array described in Kärkkäinen, Kempa &
//! Puglisi's linear-time LZ factorization and built with the monotonic
//! stack pass from `build_psvnsv_array` in `salz.c`.

/// Builds the PSV and NSV arrays for a suffix array of `len` entries.
///
/// `sa` must be a permutation of `0..len`. Runs in `O(len)` using a stack
/// seeded with a virtual `-1` sentinel on both ends.
pub fn build_psv_nsv(sa: &[i32], len: usize) -> (Vec<i32>, Vec<i32>) {
    debug_assert_eq!(sa.len(), len);

    let mut psv = vec![-1i32; len];
    let mut nsv = vec![-1i32; len];
    let mut stack: Vec<i32> = Vec::with_capacity(len + 1);
    stack.push(-1);

    for i in 0..=len {
        let cur = if i < len { sa[i] } else { -1 };
        while *stack.last().unwrap() > cur {
            let top = stack.pop().unwrap();
            psv[top as usize] = *stack.last().unwrap();
            nsv[top as usize] = cur;
        }
        stack.push(cur);
    }

    (psv, nsv)
}
