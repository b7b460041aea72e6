//! A single cut point in the parse DAG built by [`crate::optimizer::optimize`].
//!
//! Blocks are immutable once constructed and shared by reference: many later
//! blocks point back to the same predecessor via `chain`. A [`std::sync::Arc`]
//! gives cheap, thread-safe sharing across the optimizer's parallel per-index
//! shards without needing an arena keyed by integer handle — see DESIGN.md for
//! why this was chosen over an arena-of-indices alternative.

use std::sync::Arc;

/// A node in the parse DAG: "a parse ending at byte `index` with cumulative
/// cost `bits`, reached via a literal run or a match at `offset`".
#[derive(Debug)]
pub struct Block {
    /// Cumulative encoded length in bits of the parse ending at this block.
    /// The synthetic origin block uses the sentinel `-1`, absorbing the one
    /// bit of overhead the format would otherwise charge for the very first
    /// token's flag bit.
    pub bits: i64,
    /// Byte position where this block ends. The origin uses `skip as isize - 1`.
    pub index: isize,
    /// `0` means this block ended a literal run; otherwise the back-reference
    /// offset used to reach it.
    pub offset: usize,
    /// The predecessor block, or `None` for the origin.
    pub chain: Option<Arc<Block>>,
}

impl Block {
    /// Builds the synthetic origin block installed at `lastMatch[INITIAL_OFFSET]`
    /// before the scan begins.
    pub fn origin(skip: usize, initial_offset: usize) -> Arc<Block> {
        Arc::new(Block {
            bits: -1,
            index: skip as isize - 1,
            offset: initial_offset,
            chain: None,
        })
    }

    /// Walks `chain` from `self` back to the origin and returns the blocks in
    /// forward order (origin first, `self` last) so callers can iterate
    /// consecutive `(prev, cur)` pairs directly.
    pub fn chain_forward(self: &Arc<Block>) -> Vec<Arc<Block>> {
        let mut rev = Vec::new();
        let mut cur = self.clone();
        loop {
            let next = cur.chain.clone();
            rev.push(cur);
            match next {
                Some(p) => cur = p,
                None => break,
            }
        }
        rev.reverse();
        rev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_has_sentinel_bits() {
        let o = Block::origin(0, 1);
        assert_eq!(o.bits, -1);
        assert_eq!(o.index, -1);
        assert_eq!(o.offset, 1);
        assert!(o.chain.is_none());
    }

    #[test]
    fn origin_index_reflects_skip() {
        let o = Block::origin(10, 1);
        assert_eq!(o.index, 9);
    }

    #[test]
    fn chain_forward_single_block() {
        let origin = Block::origin(0, 1);
        let b = Arc::new(Block {
            bits: 9,
            index: 0,
            offset: 0,
            chain: Some(origin.clone()),
        });
        let chain = b.chain_forward();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].index, -1);
        assert_eq!(chain[1].index, 0);
    }

    #[test]
    fn chain_forward_monotone_indices() {
        let origin = Block::origin(0, 1);
        let b1 = Arc::new(Block {
            bits: 9,
            index: 0,
            offset: 0,
            chain: Some(origin.clone()),
        });
        let b2 = Arc::new(Block {
            bits: 20,
            index: 4,
            offset: 2,
            chain: Some(b1.clone()),
        });
        let chain = b2.chain_forward();
        let indices: Vec<isize> = chain.iter().map(|b| b.index).collect();
        assert_eq!(indices, vec![-1, 0, 4]);
        for w in chain.windows(2) {
            assert!(w[0].bits <= w[1].bits);
        }
    }
}
