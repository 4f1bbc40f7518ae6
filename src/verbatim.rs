use crate::block_index::{BlockIndex, DataMask};
use crate::error::{IndexError, Result};

/// Full-offset block index: stores every block boundary verbatim as a 64-bit
/// offset. Supports arbitrary per-block bit lengths at a flat cost of 64
/// bits/block — the variant to fall back to when a more compact encoding's
/// preconditions (e.g. [`Hybrid8Index`](crate::Hybrid8Index)'s dimension
/// ceiling) can't be guaranteed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbatimIndex {
    data: Vec<u64>,
    blocks: usize,
    block: usize,
}

impl VerbatimIndex {
    fn capacity(blocks: usize) -> usize {
        blocks + 1
    }

    /// Number of blocks this index was sized for.
    pub fn blocks(&self) -> usize {
        self.blocks
    }
}

impl crate::block_index::sealed::Sealed for VerbatimIndex {}

impl BlockIndex for VerbatimIndex {
    const VARIABLE_RATE: bool = true;

    fn new(blocks: usize) -> Self {
        let mut index = Self {
            data: Vec::new(),
            blocks: 0,
            block: 0,
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
    }

    fn set_uniform_block_size(&mut self, size: usize) -> Result<()> {
        self.clear();
        while self.block < self.blocks {
            self.set_block_size(self.block, size)?;
        }
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
        if self.block == self.blocks {
            return Err(IndexError::Overflow {
                blocks: self.blocks,
            });
        }
        self.data[self.block + 1] = self.data[self.block] + size as u64;
        self.block += 1;
        Ok(())
    }

    fn block_offset(&self, i: usize) -> usize {
        self.data[i] as usize
    }

    fn block_size(&self, i: usize) -> usize {
        (self.data[i + 1] - self.data[i]) as usize
    }

    fn data_size(&self) -> usize {
        self.data[self.blocks] as usize
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
