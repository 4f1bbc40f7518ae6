//! Hybrid8: two 64-bit words per 8-block chunk, ~16 bits/block amortized.

mod pack;

use crate::block_index::{BlockIndex, DataMask};
use crate::error::{IndexError, Result};
use pack::{hsum, lsum};

/// Chunk-packed block index: one 8-block chunk is stored as exactly two
/// 64-bit words, `H` and `L`. Each word holds 8 lanes — the chunk's base
/// offset in lane 7, one size field per block 0..6 in lanes 6..0 — split
/// into a high part (`HBITS` wide, word `H`) and a low part (`LBITS == 8`
/// wide, word `L`). Block 7's size is never stored directly; it is implied
/// by the difference between consecutive chunk base offsets (or the live
/// write cursor, for the chunk currently under construction).
///
/// `DIMS` is the array dimensionality the compressor is indexing (`1..=4`),
/// fixed at compile time so the bit-shift amounts it implies (`HBITS = 2 *
/// (DIMS - 1)`) fold into the generated code rather than being recomputed on
/// every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hybrid8Index<const DIMS: usize> {
    data: Vec<u64>,
    blocks: usize,
    block: usize,
    /// Bit offset at the start of the chunk currently being filled.
    ptr: u64,
    /// Bit offset just past the last recorded block.
    end: u64,
    /// Staged sizes for the in-progress chunk.
    buffer: [usize; 8],
}

/// Recommended for 1-D arrays (e.g. time series).
pub type Hybrid8Index1 = Hybrid8Index<1>;
/// Recommended for 2-D arrays.
pub type Hybrid8Index2 = Hybrid8Index<2>;
/// Recommended for 3-D arrays.
pub type Hybrid8Index3 = Hybrid8Index<3>;
/// Recommended for 4-D arrays.
pub type Hybrid8Index4 = Hybrid8Index<4>;

impl<const DIMS: usize> Hybrid8Index<DIMS> {
    /// 64 bits partitioned 7:1 into low/high parts; the low-part width is
    /// fixed regardless of dimension.
    const LBITS: u32 = 8;
    /// `2 * (dims - 1)`: per-block high-part width, derived from the array
    /// dimension so the per-block ceiling `2^(HBITS + LBITS)` tracks the
    /// compressor's worst-case block entropy.
    const HBITS: u32 = 2 * (DIMS as u32 - 1);

    const DIMS_IN_RANGE: () = assert!(
        DIMS >= 1 && DIMS <= 4,
        "Hybrid8Index dimension must be 1, 2, 3, or 4"
    );

    fn capacity(blocks: usize) -> usize {
        2 * blocks.div_ceil(8)
    }

    /// Number of blocks this index was sized for.
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    /// `k`th size field in a chunk, `0 <= k <= 6`.
    fn size(h: u64, l: u64, k: u32) -> u64 {
        let h = (h >> ((6 - k) * Self::HBITS)) & ((1u64 << Self::HBITS) - 1);
        let l = (l >> ((6 - k) * Self::LBITS)) & ((1u64 << Self::LBITS) - 1);
        (h << Self::LBITS) + l
    }

    /// `k`th offset in a chunk, `0 <= k <= 7`.
    fn offset(h: u64, l: u64, k: u32) -> u64 {
        let base = h >> (8 * Self::HBITS);
        let h = h - (base << (8 * Self::HBITS));
        let h = hsum(h >> ((7 - k) * Self::HBITS), Self::HBITS);
        let l = lsum(l >> ((7 - k) * Self::LBITS));
        (((base << Self::HBITS) + h) << Self::LBITS) + l
    }

    fn words(&self, chunk: usize) -> (u64, u64) {
        (self.data[2 * chunk], self.data[2 * chunk + 1])
    }
}

impl<const DIMS: usize> crate::block_index::sealed::Sealed for Hybrid8Index<DIMS> {}

impl<const DIMS: usize> BlockIndex for Hybrid8Index<DIMS> {
    const VARIABLE_RATE: bool = true;

    fn new(blocks: usize) -> Self {
        let () = Self::DIMS_IN_RANGE;

        let mut index = Self {
            data: Vec::new(),
            blocks: 0,
            block: 0,
            ptr: 0,
            end: 0,
            buffer: [0; 8],
        };
        index.resize(blocks);
        index
    }

    fn resize(&mut self, blocks: usize) {
        self.blocks = blocks;
        self.data = vec![0u64; Self::capacity(blocks)];
        self.clear();
    }

    fn clear(&mut self) {
        self.block = 0;
        self.ptr = 0;
        self.end = 0;
    }

    fn flush(&mut self) {
        while self.block % 8 != 0 {
            // Zero-size padding can never trip the overflow or ceiling
            // checks in `set_block_size`, so this cannot fail.
            let _ = self.set_block_size(self.block, 0);
        }
    }

    fn set_uniform_block_size(&mut self, size: usize) -> Result<()> {
        self.clear();
        while self.block < self.blocks {
            self.set_block_size(self.block, size)?;
        }
        self.flush();
        self.clear();
        Ok(())
    }

    fn set_block_size(&mut self, block_index: usize, size: usize) -> Result<()> {
        if block_index != self.block {
            return Err(IndexError::SequentialBuildRequired {
                expected: self.block,
                got: block_index,
            });
        }
        // Zero-size padding blocks past `blocks` are permitted — they only
        // occur inside `flush` to complete a partial chunk and never grow
        // `end`.
        if self.block >= self.blocks && size != 0 {
            return Err(IndexError::Overflow {
                blocks: self.blocks,
            });
        }
        if size >> (Self::HBITS + Self::LBITS) != 0 {
            return Err(IndexError::RepresentationOverflow(
                "block size too large for hybrid index",
            ));
        }

        self.end += size as u64;

        let chunk = self.block / 8;
        let which = self.block % 8;
        self.buffer[which] = size;
        self.block += 1;

        if which == 7 {
            let h = self.ptr >> Self::LBITS;
            let l = self.ptr - (h << Self::LBITS);
            let mut hi = h << (7 * Self::HBITS);
            let mut lo = l << (7 * Self::LBITS);

            if (hi >> (7 * Self::HBITS)) != h {
                return Err(IndexError::RepresentationOverflow(
                    "chunk base offset too large for hybrid index",
                ));
            }

            let mut ptr = self.ptr;
            for k in 0..7u32 {
                let size_k = self.buffer[k as usize] as u64;
                ptr += size_k;
                let h = size_k >> Self::LBITS;
                let l = size_k - (h << Self::LBITS);
                hi += h << ((6 - k) * Self::HBITS);
                lo += l << ((6 - k) * Self::LBITS);
            }
            ptr += self.buffer[7] as u64;

            self.ptr = ptr;
            self.data[2 * chunk] = hi;
            self.data[2 * chunk + 1] = lo;
        }

        Ok(())
    }

    fn block_offset(&self, i: usize) -> usize {
        if i == self.block {
            self.end as usize
        } else {
            let chunk = i / 8;
            let which = (i % 8) as u32;
            let (h, l) = self.words(chunk);
            Self::offset(h, l, which) as usize
        }
    }

    fn block_size(&self, i: usize) -> usize {
        let chunk = i / 8;
        let which = i % 8;

        if which == 7 {
            let next = if i + 1 == self.block {
                self.ptr as usize
            } else {
                self.block_offset(i + 1)
            };
            next - self.block_offset(i)
        } else {
            let (h, l) = self.words(chunk);
            Self::size(h, l, which as u32) as usize
        }
    }

    fn data_size(&self) -> usize {
        self.end as usize
    }

    fn size_bytes(&self, mask: DataMask) -> usize {
        let mut size = 0;
        if mask.contains(DataMask::INDEX) {
            size += Self::capacity(self.blocks) * size_of::<u64>();
        }
        if mask.contains(DataMask::META) {
            size += size_of::<Self>();
        }
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dim2_eight_blocks() {
        let mut index = Hybrid8Index::<2>::new(8);
        for (i, &size) in [1, 2, 3, 4, 5, 6, 7, 8].iter().enumerate() {
            index.set_block_size(i, size).unwrap();
        }

        let offsets: Vec<_> = (0..=8).map(|i| index.block_offset(i)).collect();
        assert_eq!(offsets, [0, 1, 3, 6, 10, 15, 21, 28, 36]);
        assert_eq!(index.data_size(), 36);
    }

    #[test]
    fn dim2_nine_blocks_with_flush() {
        let mut index = Hybrid8Index::<2>::new(9);
        for (i, &size) in [100, 100, 100, 100, 100, 100, 100, 100, 50]
            .iter()
            .enumerate()
        {
            index.set_block_size(i, size).unwrap();
        }
        index.flush();

        assert_eq!(index.block_offset(9), 850);
        assert_eq!(Hybrid8Index::<2>::capacity(9), 4);
    }

    #[test]
    fn dim1_zero_hbits_ceiling() {
        let mut index = Hybrid8Index::<1>::new(16);
        assert!(index.set_block_size(0, 256).is_err());

        for i in 0..16 {
            index.set_block_size(i, 255).unwrap();
        }
        index.flush();

        assert_eq!(index.data_size(), 4080);
    }

    #[test]
    fn dim1_every_size_below_256_succeeds() {
        let mut index = Hybrid8Index::<1>::new(8);
        for i in 0..8 {
            index.set_block_size(i, 255).unwrap();
        }
        assert_eq!(index.data_size(), 8 * 255);
    }

    #[test]
    fn sequential_violation() {
        let mut index = Hybrid8Index::<2>::new(4);
        let err = index.set_block_size(1, 10).unwrap_err();
        assert_eq!(
            err,
            IndexError::SequentialBuildRequired {
                expected: 0,
                got: 1
            }
        );
    }

    #[test]
    fn in_progress_query_returns_running_total() {
        let mut index = Hybrid8Index::<2>::new(8);
        index.set_block_size(0, 10).unwrap();
        index.set_block_size(1, 20).unwrap();

        assert_eq!(index.block_offset(2), 30);
    }

    #[test]
    fn flush_is_idempotent() {
        let mut index = Hybrid8Index::<2>::new(8);
        for i in 0..8 {
            index.set_block_size(i, 4).unwrap();
        }
        index.flush();
        let data_before = index.data.clone();
        index.flush();

        assert_eq!(index.data, data_before);
    }

    #[test]
    fn size_bytes_additivity() {
        let index = Hybrid8Index::<3>::new(16);
        let meta = index.size_bytes(DataMask::META);
        let data = index.size_bytes(DataMask::INDEX);
        let all = index.size_bytes(DataMask::ALL);

        assert_eq!(data, 4 * size_of::<u64>());
        assert_eq!(meta + data, all);
    }

    #[test]
    fn deep_copy_is_independent() {
        let mut index = Hybrid8Index::<2>::new(12);
        index.set_block_size(0, 4).unwrap();
        index.set_block_size(1, 8).unwrap();
        index.set_block_size(2, 16).unwrap();

        // chunk 1 (words 2, 3) is still untouched: cursor is at block 3, chunk 0.
        assert_eq!(index.data[2], 0);
        assert_eq!(index.data[3], 0);

        let mut copy = index.clone();
        for i in 3..12 {
            copy.set_block_size(i, 2).unwrap();
        }
        copy.flush();

        // finalizing chunk 1 on the copy must not reach back into the original.
        assert_eq!(index.data[2], 0);
        assert_eq!(index.data[3], 0);
        assert_eq!(index.block_offset(3), 28);
        assert_eq!(index.data_size(), 28);

        assert_ne!(copy.data[2], 0);
        assert_eq!(copy.data_size(), 28 + 9 * 2);
    }
}
