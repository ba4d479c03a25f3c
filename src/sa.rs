//! Suffix array construction.
//!
//! The factorizer ([`crate::block::factorize`]) treats the suffix array as
//! an external, already-sorted input — in the reference C implementation
//! this is `libsais`. This crate has no equivalent third-party binding
//! available, so it carries its own builder: a prefix-doubling rank sort
//! (Manber & Myers), `O(n log^2 n)`. It is a complexity step down from
//! `libsais`'s linear-time construction, but self-contained and simple to
//! audit; see `DESIGN.md` for the tradeoff.

/// Builds the suffix array of `src`: a permutation of `0..src.len()` listing
/// every suffix start position in ascending lexicographic order of the
/// suffix.
///
/// Fails only if `src` is too large to index with `i32` (the suffix and
/// PSV/NSV arrays downstream are `i32`-typed, mirroring `libsais`'s API).
pub fn build(src: &[u8]) -> Result<Vec<i32>, ()> {
    let n = src.len();
    if n > i32::MAX as usize {
        return Err(());
    }
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut sa: Vec<i32> = (0..n as i32).collect();
    let mut rank: Vec<i32> = src.iter().map(|&b| b as i32).collect();
    let mut next_rank = vec![0i32; n];

    let mut k = 1usize;
    loop {
        let key_at = |i: usize| -> (i32, i32) {
            let hi = if i + k < n { rank[i + k] } else { -1 };
            (rank[i], hi)
        };

        sa.sort_unstable_by_key(|&p| key_at(p as usize));

        next_rank[sa[0] as usize] = 0;
        for i in 1..n {
            let prev = sa[i - 1] as usize;
            let cur = sa[i] as usize;
            let bump = if key_at(prev) == key_at(cur) { 0 } else { 1 };
            next_rank[cur] = next_rank[prev] + bump;
        }
        rank.copy_from_slice(&next_rank);

        if rank[sa[n - 1] as usize] as usize == n - 1 {
            break;
        }
        if k >= n {
            break;
        }
        k *= 2;
    }

    Ok(sa)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_sa(src: &[u8]) -> Vec<i32> {
        let mut idx: Vec<i32> = (0..src.len() as i32).collect();
        idx.sort_by(|&a, &b| src[a as usize..].cmp(&src[b as usize..]));
        idx
    }

    #[test]
    fn matches_naive_on_varied_inputs() {
        let cases: &[&[u8]] = &[
            b"",
            b"a",
            b"banana",
            b"abracadabra",
            b"mississippi",
            b"aaaaaaaaaaaa",
            b"the quick brown fox jumps over the lazy dog",
        ];
        for &src in cases {
            let sa = build(src).unwrap();
            assert_eq!(sa, naive_sa(src), "mismatch for {:?}", String::from_utf8_lossy(src));
        }
    }

    #[test]
    fn sa_is_a_permutation() {
        let src = b"abababababab".to_vec();
        let sa = build(&src).unwrap();
        let mut sorted = sa.clone();
        sorted.sort_unstable();
        let expected: Vec<i32> = (0..src.len() as i32).collect();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn single_byte_repeated() {
        let src = vec![b'x'; 37];
        let sa = build(&src).unwrap();
        assert_eq!(sa, naive_sa(&src));
    }
}
