use crate::block_index::{BlockIndex, DataMask};
use crate::error::Result;

/// Constant-rate block index: every block has the same, fixed bit length.
///
/// Carries no per-block storage at all — `block_offset`/`block_size` are
/// computed directly from `bits_per_block`. This is the index used when a
/// compressor runs in a fixed-rate mode where random access never needs
/// anything beyond a multiplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImplicitIndex {
    blocks: usize,
    bits_per_block: usize,
}

impl ImplicitIndex {
    /// Number of blocks this index was sized for.
    pub fn blocks(&self) -> usize {
        self.blocks
    }
}

impl crate::block_index::sealed::Sealed for ImplicitIndex {}

impl BlockIndex for ImplicitIndex {
    const VARIABLE_RATE: bool = false;

    fn new(blocks: usize) -> Self {
        let mut index = Self::default();
        index.resize(blocks);
        index
    }

    fn resize(&mut self, blocks: usize) {
        self.blocks = blocks;
    }

    // There is no construction cursor to reset: a faithful port keeps it
    // that way rather than inventing a `block` field this variant never
    // needed in the first place.
    fn clear(&mut self) {
        self.bits_per_block = 0;
    }

    fn set_uniform_block_size(&mut self, size: usize) -> Result<()> {
        self.bits_per_block = size;
        Ok(())
    }

    /// Ignored for performance reasons: a fixed-rate build never needs to
    /// examine individual block sizes, so this is a deliberate no-op rather
    /// than an error.
    fn set_block_size(&mut self, _block_index: usize, _size: usize) -> Result<()> {
        Ok(())
    }

    fn block_offset(&self, i: usize) -> usize {
        self.bits_per_block * i
    }

    fn block_size(&self, _i: usize) -> usize {
        self.bits_per_block
    }

    fn data_size(&self) -> usize {
        self.bits_per_block * self.blocks
    }

    fn size_bytes(&self, mask: DataMask) -> usize {
        if mask.contains(DataMask::META) {
            size_of::<Self>()
        } else {
            0
        }
    }
}
