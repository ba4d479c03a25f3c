//! Cost-minimal parse selection.
//!
//! A backward dynamic program (single-source shortest path over "cost to
//! encode the remainder of the text from this position") picks, for every
//! position, the cheapest of: a literal, the PSV candidate, or the NSV
//! candidate. Ties are broken in that same order (literal, then PSV, then
//! NSV) by only ever replacing the running minimum on a strictly smaller
//! cost. Grounded on `optimize_factorization` in `salz.c`, which cites
//! Utoslahti (2022) §3.5.4.

use super::factorize::Candidates;
use super::vlc::vnibble_size;
use crate::{FACTOR_LENGTH_MIN, FACTOR_OFFSET_MIN};

/// The chosen factor (or literal, when `factor_len == 1`) at every
/// position.
pub struct Parse {
    pub factor_offset: Vec<u32>,
    pub factor_len: Vec<u32>,
}

fn factor_offs_bitsize(val: u32) -> u32 {
    8 + 4 * vnibble_size((val - FACTOR_OFFSET_MIN) >> 8) as u32
}

fn gr3_bitsize(val: u32) -> u32 {
    (val >> 3) + 1 + 3
}

fn factor_len_bitsize(val: u32) -> u32 {
    gr3_bitsize(val - FACTOR_LENGTH_MIN)
}

/// Runs the backward cost DP over `cands` and returns the chosen parse.
pub fn optimize(src_len: usize, cands: &Candidates) -> Parse {
    let mut factor_offset = vec![0u32; src_len];
    let mut factor_len = vec![1u32; src_len];
    let mut cost = vec![0i64; src_len + 1];

    for src_pos in (1..src_len).rev() {
        let mut best_cost = 9i64 + cost[src_pos + 1];
        let mut best_offset = 0u32;
        let mut best_len = 1u32;

        let psv_len = cands.psv_len[src_pos];
        if psv_len >= FACTOR_LENGTH_MIN {
            let psv_offset = cands.psv_offset[src_pos];
            let alt_cost = 1
                + factor_offs_bitsize(psv_offset) as i64
                + factor_len_bitsize(psv_len) as i64
                + cost[src_pos + psv_len as usize];
            if alt_cost < best_cost {
                best_cost = alt_cost;
                best_offset = psv_offset;
                best_len = psv_len;
            }
        }

        let nsv_len = cands.nsv_len[src_pos];
        if nsv_len >= FACTOR_LENGTH_MIN {
            let nsv_offset = cands.nsv_offset[src_pos];
            let alt_cost = 1
                + factor_offs_bitsize(nsv_offset) as i64
                + factor_len_bitsize(nsv_len) as i64
                + cost[src_pos + nsv_len as usize];
            if alt_cost < best_cost {
                best_cost = alt_cost;
                best_offset = nsv_offset;
                best_len = nsv_len;
            }
        }

        factor_offset[src_pos] = best_offset;
        factor_len[src_pos] = best_len;
        cost[src_pos] = best_cost;
    }

    // Position 0 has no predecessor to extend from (see `factorize`);
    // it is always emitted as a literal.
    if src_len > 0 {
        factor_len[0] = 1;
    }

    Parse {
        factor_offset,
        factor_len,
    }
}
