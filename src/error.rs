use thiserror::Error;

/// Error returned by a fallible [`BlockIndex`](crate::BlockIndex) operation.
///
/// All three kinds are fatal to the current build step: the index is left
/// exactly as far advanced as before the failing call and must be `resize`d
/// afresh before it can be reused. There is no partial-state repair and no
/// retry path — the caller either aborts compression or reconfigures (for
/// example by switching from [`Hybrid8Index`](crate::Hybrid8Index) to
/// [`VerbatimIndex`](crate::VerbatimIndex)).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    /// `set_block_size(block_index, _)` was called with `block_index` other
    /// than the next block in sequence.
    #[error("sequential build required: expected block {expected}, got {got}")]
    SequentialBuildRequired { expected: usize, got: usize },

    /// An append was attempted past the declared block count.
    #[error("index overflow: all {blocks} blocks have already been written")]
    Overflow { blocks: usize },

    /// A Hybrid8 block size or chunk base offset does not fit in the packed
    /// representation.
    #[error("{0}")]
    RepresentationOverflow(&'static str),
}

pub type Result<T> = std::result::Result<T, IndexError>;
