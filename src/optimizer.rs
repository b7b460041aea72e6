//! The optimal-parse search: a dynamic-programming scan over every legal
//! parse of `input[skip..]` into a sequence of (literal-run, back-reference)
//! blocks, minimizing the total encoded bit length under the ZX0 cost model.
//!
//! This is the hard part of the crate — see DESIGN.md for how each piece
//! below is grounded.

use std::sync::Arc;

use rayon::prelude::*;
use rayon::ThreadPool;

use crate::block::Block;
use crate::config::INITIAL_OFFSET;

/// `eliasGammaBits(v) = 1 + 2*floor(log2(v))` for `v >= 1`. Bit-accounting
/// only — this never emits bits, it just counts how many the encoder would.
#[inline]
pub fn elias_gamma_bits(v: u32) -> u32 {
    debug_assert!(v >= 1, "elias_gamma_bits is undefined for 0");
    1 + 2 * (31 - v.leading_zeros())
}

/// `offsetCeiling(i, limit) = min(max(i, 1), limit)`.
///
/// Ensures offsets never exceed either the number of bytes already seen or
/// the format's configured maximum.
#[inline]
pub fn offset_ceiling(i: usize, limit: usize) -> usize {
    i.max(1).min(limit)
}

/// Resolves the block ending at `i` (which may be `skip - 1`, the origin) to
/// an `Arc<Block>` reference. `optimal[j]` is only ever read for `j < index`
/// of the step currently being computed, so it is always already populated.
#[inline]
fn block_at(origin: &Arc<Block>, optimal: &[Option<Arc<Block>>], skip: usize, i: isize) -> Arc<Block> {
    if i == skip as isize - 1 {
        origin.clone()
    } else {
        optimal[i as usize]
            .clone()
            .expect("optimal[] must be populated for every index below the current scan position")
    }
}

#[inline]
fn consider(best: &mut Option<Arc<Block>>, candidate: &Arc<Block>) {
    let better = match best {
        None => true,
        Some(b) => candidate.bits < b.bits,
    };
    if better {
        *best = Some(candidate.clone());
    }
}

/// Runs the optimizer's per-offset transition rules for one shard of
/// offsets at one scan index, returning the shard-local minimum-cost block
/// (or `None` if no offset in this shard produced a candidate this index).
///
/// `start_offset` is the (1-based) offset of `last_literal[0]`/`last_match[0]`
/// /`match_length[0]` in this shard — the slices are disjoint views into the
/// full per-offset arrays, partitioned by the caller.
#[allow(clippy::too_many_arguments)]
fn process_shard(
    input: &[u8],
    skip: usize,
    index: usize,
    start_offset: usize,
    last_literal: &mut [Option<Arc<Block>>],
    last_match: &mut [Option<Arc<Block>>],
    match_length: &mut [usize],
    optimal: &[Option<Arc<Block>>],
    origin: &Arc<Block>,
) -> Option<Arc<Block>> {
    let mut best: Option<Arc<Block>> = None;

    // bestLength[] is per-task (per shard, per index) as the design notes
    // recommend: reset here rather than shared across all shards, so no
    // write-idempotence argument is needed. Sized for the longest possible
    // match length reachable at this index (bounded by index - skip + 1).
    let cap = index - skip + 2;
    let mut best_length = vec![0usize; cap];
    if cap > 2 {
        best_length[2] = 2;
    }
    let mut best_length_size = 2usize;

    for (i, ((ll, lm), ml)) in last_literal
        .iter_mut()
        .zip(last_match.iter_mut())
        .zip(match_length.iter_mut())
        .enumerate()
    {
        let o = start_offset + i;

        let continues =
            index != skip && index >= o && input[index] == input[index - o];

        if continues {
            // A1. Repeat-offset literal-to-match.
            if let Some(lit) = ll.as_ref() {
                let length = index - lit.index as usize;
                let bits = lit.bits + 1 + elias_gamma_bits(length as u32) as i64;
                let blk = Arc::new(Block {
                    bits,
                    index: index as isize,
                    offset: o,
                    chain: Some(lit.clone()),
                });
                consider(&mut best, &blk);
                *lm = Some(blk);
            }

            // A2. New-offset match.
            *ml += 1;
            if *ml > 1 {
                let mut l = best_length_size;
                let mut bits1 = block_at(origin, optimal, skip, index as isize - best_length[l] as isize).bits
                    + elias_gamma_bits((best_length[l] - 1) as u32) as i64;
                while l < *ml {
                    l += 1;
                    let bits2 = block_at(origin, optimal, skip, index as isize - l as isize).bits
                        + elias_gamma_bits((l - 1) as u32) as i64;
                    if bits2 <= bits1 {
                        best_length[l] = l;
                        bits1 = bits2;
                    } else {
                        best_length[l] = best_length[l - 1];
                    }
                }
                best_length_size = l;

                let length = best_length[*ml];
                let offset_high = (o - 1) / 128 + 1;
                let chain_block = block_at(origin, optimal, skip, index as isize - length as isize);
                let bits = chain_block.bits
                    + 8
                    + elias_gamma_bits(offset_high as u32) as i64
                    + elias_gamma_bits((length - 1) as u32) as i64;

                let should_update = match lm.as_ref() {
                    None => true,
                    Some(existing) => existing.index != index as isize || existing.bits > bits,
                };
                let blk = Arc::new(Block {
                    bits,
                    index: index as isize,
                    offset: o,
                    chain: Some(chain_block),
                });
                consider(&mut best, &blk);
                if should_update {
                    *lm = Some(blk);
                }
            }
        } else {
            // Case B — mismatch (or out of range, or index == skip).
            *ml = 0;
            if let Some(m) = lm.as_ref() {
                let length = index - m.index as usize;
                let bits = m.bits + 1 + elias_gamma_bits(length as u32) as i64 + 8 * length as i64;
                let blk = Arc::new(Block {
                    bits,
                    index: index as isize,
                    offset: 0,
                    chain: Some(m.clone()),
                });
                consider(&mut best, &blk);
                *ll = Some(blk);
            }
        }
    }

    best
}

/// Partitions `[1, max_offset]` into disjoint, mutable per-offset shards,
/// then runs [`process_shard`] over each — sequentially when `threads == 1`,
/// otherwise via `pool`.
#[allow(clippy::too_many_arguments)]
fn process_index(
    input: &[u8],
    skip: usize,
    index: usize,
    max_offset: usize,
    threads: usize,
    pool: Option<&ThreadPool>,
    last_literal: &mut [Option<Arc<Block>>],
    last_match: &mut [Option<Arc<Block>>],
    match_length: &mut [usize],
    optimal: &[Option<Arc<Block>>],
    origin: &Arc<Block>,
) -> Arc<Block> {
    let shard_size = max_offset / threads + 1;

    let ll_chunks = last_literal[1..=max_offset].chunks_mut(shard_size);
    let lm_chunks = last_match[1..=max_offset].chunks_mut(shard_size);
    let ml_chunks = match_length[1..=max_offset].chunks_mut(shard_size);

    let mut shards = Vec::new();
    let mut start = 1usize;
    for ((ll, lm), ml) in ll_chunks.zip(lm_chunks).zip(ml_chunks) {
        let len = ll.len();
        shards.push((start, ll, lm, ml));
        start += len;
    }

    let run = |shards: Vec<(usize, &mut [Option<Arc<Block>>], &mut [Option<Arc<Block>>], &mut [usize])>| {
        shards
            .into_iter()
            .map(|(start, ll, lm, ml)| {
                process_shard(input, skip, index, start, ll, lm, ml, optimal, origin)
            })
            .collect::<Vec<_>>()
    };

    let results = if threads > 1 {
        let par = || {
            shards
                .into_par_iter()
                .map(|(start, ll, lm, ml)| {
                    process_shard(input, skip, index, start, ll, lm, ml, optimal, origin)
                })
                .collect::<Vec<_>>()
        };
        match pool {
            Some(p) => p.install(par),
            None => par(),
        }
    } else {
        run(shards)
    };

    let mut best: Option<Arc<Block>> = None;
    for r in results {
        if let Some(b) = r {
            consider(&mut best, &b);
        }
    }
    best.expect("every index has at least one reachable block (offset 1 from the origin)")
}

/// Runs the optimal-parse search over `input[skip..]`.
///
/// `offset_limit` caps how far back a match may reach; `threads` controls
/// the per-index parallel fan-out; when `verbose` is set, progress dots are
/// written to stderr via the crate's display-level facility as the scan
/// advances.
///
/// Preconditions are programmer errors, not recoverable conditions:
/// `skip < input.len()`, `offset_limit >= 1`, `threads >= 1`.
pub fn optimize(input: &[u8], skip: usize, offset_limit: usize, threads: usize, verbose: bool) -> Arc<Block> {
    let n = input.len();
    assert!(n > 0, "input must not be empty");
    assert!(skip < n, "skip ({skip}) must be less than input length ({n})");
    assert!(offset_limit >= 1, "offset_limit must be >= 1");
    assert!(threads >= 1, "threads must be >= 1");

    let ceiling = offset_ceiling(n - 1, offset_limit);

    let mut last_literal: Vec<Option<Arc<Block>>> = (0..=ceiling).map(|_| None).collect();
    let mut last_match: Vec<Option<Arc<Block>>> = (0..=ceiling).map(|_| None).collect();
    let mut match_length: Vec<usize> = vec![0; ceiling + 1];
    let mut optimal: Vec<Option<Arc<Block>>> = (0..n).map(|_| None).collect();

    let origin = Block::origin(skip, INITIAL_OFFSET);
    last_match[INITIAL_OFFSET] = Some(origin.clone());

    let pool = if threads > 1 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .ok()
    } else {
        None
    };

    if verbose {
        crate::displaylevel!(2, "[");
    }
    let mut dots: u32 = 2;

    for index in skip..n {
        let max_offset = offset_ceiling(index, offset_limit);
        let best = process_index(
            input,
            skip,
            index,
            max_offset,
            threads,
            pool.as_ref(),
            &mut last_literal,
            &mut last_match,
            &mut match_length,
            &optimal,
            &origin,
        );
        optimal[index] = Some(best);

        if verbose {
            let threshold = ((index * 50) / n) as u32;
            while threshold > dots && dots < 50 {
                crate::displaylevel!(2, ".");
                dots += 1;
            }
        }
    }

    if verbose {
        crate::displaylevel!(2, "]\n");
    }

    optimal[n - 1].clone().expect("terminal block must exist")
}
