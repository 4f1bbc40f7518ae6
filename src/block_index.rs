use crate::error::Result;

bitflags::bitflags! {
    /// Selects which components of an index's storage cost [`BlockIndex::size_bytes`] reports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DataMask: u32 {
        /// Backing storage for offsets/sizes (zero for [`ImplicitIndex`](crate::ImplicitIndex)).
        const INDEX = 0b01;
        /// `size_of` the index object's own metadata.
        const META  = 0b10;
        /// Both components.
        const ALL   = Self::INDEX.bits() | Self::META.bits();
    }
}

/// Common contract shared by the three block-index variants.
///
/// An index is built by calling [`resize`](Self::resize) with the total
/// block count, then [`set_block_size`](Self::set_block_size) once per block
/// index in strictly ascending order starting from `0`. After construction,
/// [`block_offset`](Self::block_offset) and [`block_size`](Self::block_size)
/// are valid for every `i` in `0..blocks`, and `block_offset(blocks)` returns
/// the total bit length of the indexed stream.
///
/// This is a small capability trait in the same spirit as this crate's
/// lineage uses for swappable fixed-shape storage: one trait, a handful of
/// concrete implementors, no runtime dispatch required by callers that know
/// their variant at compile time. Sealed: the three variants in this crate
/// are the only block-offset encodings it knows how to reason about, so
/// downstream crates cannot add a fourth.
pub trait BlockIndex: sealed::Sealed + Sized {
    /// Whether this variant can represent blocks of differing bit length.
    ///
    /// `false` for [`ImplicitIndex`](crate::ImplicitIndex), `true` for
    /// [`VerbatimIndex`](crate::VerbatimIndex) and
    /// [`Hybrid8Index`](crate::Hybrid8Index).
    const VARIABLE_RATE: bool;

    /// Construct an index for `blocks` blocks. Equivalent to calling
    /// [`resize`](Self::resize) on a default-initialized instance.
    fn new(blocks: usize) -> Self;

    /// Set the capacity to `blocks` blocks, reallocating backing storage and
    /// resetting the construction cursor. Capacity-only; does not populate
    /// any block sizes.
    fn resize(&mut self, blocks: usize);

    /// Reset the construction cursor and running totals to empty. Capacity
    /// (and any previously stored backing words) is unaffected; callers must
    /// refill every block before querying again.
    fn clear(&mut self);

    /// Finalize any buffered partial chunk. A no-op for variants that never
    /// buffer ([`ImplicitIndex`](crate::ImplicitIndex),
    /// [`VerbatimIndex`](crate::VerbatimIndex)).
    fn flush(&mut self) {}

    /// Fill every block with the same size: reset, write `size` to every
    /// block in sequence, flush, then reset again. Used for fixed-rate
    /// modes. Each variant provides its own implementation, since
    /// [`ImplicitIndex`](crate::ImplicitIndex) never actually loops over
    /// blocks — it has no per-block cursor to advance.
    fn set_uniform_block_size(&mut self, size: usize) -> Result<()>;

    /// Record the bit length of block `block_index`, which must equal the
    /// next block awaiting construction.
    fn set_block_size(&mut self, block_index: usize, size: usize) -> Result<()>;

    /// Bit offset of block `i`. When `i` equals the number of blocks filled
    /// so far, returns the current write cursor — a correctness-critical
    /// case that lets a writer observe its own progress mid-build.
    fn block_offset(&self, i: usize) -> usize;

    /// Bit length of block `i`.
    fn block_size(&self, i: usize) -> usize;

    /// Total bits occupied by all completed blocks.
    fn data_size(&self) -> usize;

    /// Byte cost of the components selected by `mask`.
    fn size_bytes(&self, mask: DataMask) -> usize;
}

pub(crate) mod sealed {
    pub trait Sealed {}
}
