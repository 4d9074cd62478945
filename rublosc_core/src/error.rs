use thiserror::Error;

/// Every failure the library can return.
///
/// Variants are comparable so callers can match on the failure kind
/// programmatically. Errors are always returned, never logged; malformed
/// input never panics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input is empty, or the frame's declared compressed size disagrees
    /// with the bytes actually present.
    #[error("invalid compressed data")]
    InvalidData,

    /// Fewer than 16 bytes were supplied where a frame header is required.
    #[error("invalid header: need at least 16 bytes")]
    InvalidHeader,

    /// The header's version byte is not the supported format version.
    #[error("unsupported format version {0}, expected 2")]
    InvalidVersion(u8),

    /// The codec id is not registered, at encode-time lookup or
    /// decode-time dispatch.
    #[error("unsupported codec id {0}")]
    InvalidCodec(u8),

    /// The decompressed (and unshuffled) output length disagrees with the
    /// header's original size.
    #[error("decompressed size mismatch: got {got}, expected {expected}")]
    SizeMismatch {
        /// Bytes actually produced.
        got: usize,
        /// Bytes the header promised.
        expected: usize,
    },

    /// Input exceeds the u32 size range the frame header can express.
    #[error("data too large: {0} bytes exceeds the u32 frame limit")]
    DataTooLarge(usize),

    /// The underlying codec reported a compression error.
    #[error("compression failed: {0}")]
    CompressionFailed(String),

    /// The underlying codec reported a decompression error, typically on a
    /// corrupted payload.
    #[error("decompression failed: {0}")]
    DecompressionFailed(String),
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;
