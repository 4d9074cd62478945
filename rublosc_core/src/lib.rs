//! Codec-agnostic core of the rublosc Blosc v2 implementation.
//!
//! This crate owns everything about the format except the compression
//! backends themselves:
//!
//! - [`format`] — the 16-byte little-endian frame header, flag semantics,
//!   and the [`CodecId`] / [`ShuffleMode`] identifier types.
//! - [`shuffle`] — byte- and bit-level shuffle transforms with their exact
//!   inverses, SSE2-accelerated on x86_64 for the 4-byte hot path.
//! - [`codec`] — the [`Codec`] capability trait implemented by the
//!   adapters in the `rublosc` crate.
//! - [`pipeline`] — [`compress_frame`] / [`decompress_frame`] gluing the
//!   pieces together: shuffle, codec, memcpy fallback, header assembly,
//!   and untrusted-input validation.
//!
//! All operations are synchronous pure functions over the input bytes and
//! are safe to call concurrently with disjoint buffers; the only
//! process-wide state is the one-shot SIMD capability probe.

pub mod codec;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod shuffle;

pub use codec::Codec;
pub use error::{Error, Result};
pub use format::{CodecId, Header, ShuffleMode, FORMAT_VERSION, HEADER_SIZE};
pub use pipeline::{compress_frame, decompress_frame, Options, MAX_INPUT_SIZE};
pub use shuffle::{
    bit_shuffle, bit_unshuffle, shuffle, shuffle_in_place, unshuffle, unshuffle_in_place,
};
