//! # blockidx — random-access block index for variable-rate bitstreams
//!
//! A floating-point array compressor that stores its output as fixed-shape
//! blocks of variable-length compressed bits needs a way to seek to any
//! block without decoding the ones before it. This crate is that index: a
//! mapping from a block's logical ordinal to its bit offset and bit length
//! within the underlying bitstream, built once by appending block sizes in
//! order and thereafter queried in O(1).
//!
//! Three variants trade index size against flexibility:
//!
//! - [`ImplicitIndex`] — 0 bits/block. Every block has the same fixed size;
//!   offsets are a multiplication.
//! - [`VerbatimIndex`] — 64 bits/block. Arbitrary per-block sizes, stored as
//!   a full prefix-sum array.
//! - [`Hybrid8Index`] — ~16 bits/block amortized. Arbitrary per-block sizes
//!   up to a dimension-dependent ceiling, packed 8 blocks at a time into two
//!   64-bit words.
//!
//! All three implement the common [`BlockIndex`] trait, selected at the
//! type-parameter level by the caller — there is no dynamic dispatch.
//!
//! ## Usage
//!
//! ```
//! use blockidx::{BlockIndex, VerbatimIndex};
//!
//! let mut index = VerbatimIndex::new(3);
//! index.set_block_size(0, 42).unwrap();
//! index.set_block_size(1, 17).unwrap();
//! index.set_block_size(2, 64).unwrap();
//!
//! assert_eq!(index.block_offset(1), 42);
//! assert_eq!(index.block_size(1), 17);
//! assert_eq!(index.data_size(), 123);
//! ```
//!
//! ## Construction discipline
//!
//! Every index is built append-only: call [`BlockIndex::resize`] with the
//! total block count, then [`BlockIndex::set_block_size`] once per block
//! index in strictly ascending order. [`Hybrid8Index`] additionally
//! requires [`BlockIndex::flush`] after the last append to drain a partial
//! 8-block chunk. Out-of-order or past-capacity appends return
//! [`IndexError`] rather than corrupting the index; once an append fails,
//! the index is considered poisoned and must be `resize`d afresh.

mod block_index;
mod error;
mod hybrid8;
mod implicit;
mod verbatim;

pub use block_index::{BlockIndex, DataMask};
pub use error::IndexError;
pub use hybrid8::{Hybrid8Index, Hybrid8Index1, Hybrid8Index2, Hybrid8Index3, Hybrid8Index4};
pub use implicit::ImplicitIndex;
pub use verbatim::VerbatimIndex;
