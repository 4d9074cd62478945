use crate::error::Result;
use crate::format::CodecId;

/// Core compression capability.
///
/// Each `Codec` implementation:
/// - Is identified by a stable [`CodecId`] stored in the frame header's
///   `versionlz` byte.
/// - Produces a self-delimiting codec-specific blob with no Blosc framing
///   of its own; the frame header carries the sizes.
/// - Owns the mapping from the user-facing 1..=9 effort scale to its
///   native level range. The pipeline passes the level through unchanged.
/// - Must be safe to invoke concurrently from multiple threads
///   (`Send + Sync`); adapters over libraries without concurrency-safe
///   contexts must pool or serialize access internally.
pub trait Codec: Send + Sync {
    /// Stable codec id written to the frame header.
    fn id(&self) -> CodecId;

    /// Stable lower-case identifier for display (`"lz4"`, `"zstd"`, ...).
    fn name(&self) -> &'static str;

    /// Compress `data` at the given effort level.
    ///
    /// Adapters whose backend signals "no gain" by writing zero bytes must
    /// return the input verbatim; the pipeline independently decides
    /// whether the whole frame falls back to the memcpy path.
    fn compress(&self, data: &[u8], level: i32) -> Result<Vec<u8>>;

    /// Decompress `data`, which is expected to decode to exactly
    /// `expected_size` bytes. Fails with
    /// [`Error::DecompressionFailed`](crate::Error::DecompressionFailed)
    /// on malformed input.
    fn decompress(&self, data: &[u8], expected_size: usize) -> Result<Vec<u8>>;
}
