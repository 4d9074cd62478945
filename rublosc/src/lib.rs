//! Pure-Rust implementation of the Blosc v2 compressed frame format.
//!
//! Blosc is a compressor optimized for typed binary arrays (float32,
//! int64, ...), widely used in scientific computing and VFX pipelines. It
//! combines a byte- or bit-level *shuffle* preprocessing pass with a fast
//! general-purpose codec and wraps the result in a 16-byte header. This
//! crate reads and writes single-block Blosc v2 frames interoperably with
//! other implementations, over LZ4, LZ4-HC, ZSTD, zlib and Snappy.
//!
//! # Basic usage
//!
//! ```
//! use rublosc::{CodecId, ShuffleMode};
//!
//! let data: Vec<u8> = (0u32..1000).flat_map(|v| v.to_le_bytes()).collect();
//!
//! let frame = rublosc::compress(&data, CodecId::LZ4, 5, ShuffleMode::Byte, 4)?;
//! assert!(frame.len() < data.len());
//!
//! let restored = rublosc::decompress(&frame)?;
//! assert_eq!(restored, data);
//! # Ok::<(), rublosc::Error>(())
//! ```
//!
//! # Shuffle modes
//!
//! - [`ShuffleMode::None`] — compress the bytes as-is.
//! - [`ShuffleMode::Byte`] — group bytes by position within each element;
//!   the right default for typed numeric data.
//! - [`ShuffleMode::Bit`] — transpose down to the bit level; strongest on
//!   data whose patterns sit in individual bits (e.g. float exponents).
//!
//! # Thread safety
//!
//! Every function here may be called concurrently with disjoint buffers.
//! Codec registration ([`register_codec`]) is intended as a one-time setup
//! step before compression traffic starts.

mod lz4;
mod lz4hc;
mod registry;
mod snappy;
mod zlib;
mod zstd;

pub use self::lz4::Lz4Codec;
pub use self::lz4hc::Lz4hcCodec;
pub use self::registry::{get_codec, list_codecs, register_codec};
pub use self::snappy::SnappyCodec;
pub use self::zlib::ZlibCodec;
pub use self::zstd::ZstdCodec;

pub use rublosc_core::{
    bit_shuffle, bit_unshuffle, shuffle, shuffle_in_place, unshuffle, unshuffle_in_place, Codec,
    CodecId, Error, Header, Options, Result, ShuffleMode, FORMAT_VERSION, HEADER_SIZE,
    MAX_INPUT_SIZE,
};

use rublosc_core::format;

/// Compress `data` into a Blosc v2 frame.
///
/// `level` is the 1..=9 effort scale (clamped), `type_size` the element
/// size in bytes the shuffle should use. See [`compress_with_options`] for
/// the full option set.
pub fn compress(
    data: &[u8],
    codec: CodecId,
    level: i32,
    shuffle: ShuffleMode,
    type_size: usize,
) -> Result<Vec<u8>> {
    compress_with_options(
        data,
        &Options {
            codec,
            level,
            shuffle,
            type_size,
            ..Options::default()
        },
    )
}

/// Compress `data` using explicit [`Options`].
///
/// Fails with [`Error::InvalidData`] on empty input,
/// [`Error::InvalidCodec`] when `opts.codec` has no registered
/// implementation, and [`Error::DataTooLarge`] when the frame would
/// overflow the format's 32-bit sizes.
pub fn compress_with_options(data: &[u8], opts: &Options) -> Result<Vec<u8>> {
    let codec = registry::get_codec(opts.codec).ok_or(Error::InvalidCodec(opts.codec.0))?;
    rublosc_core::compress_frame(data, codec.as_ref(), opts)
}

/// Decompress a Blosc v2 frame, taking the shuffle type size from the
/// frame header.
pub fn decompress(frame: &[u8]) -> Result<Vec<u8>> {
    decompress_with_size(frame, 0)
}

/// Decompress with an explicit type-size override for the inverse shuffle;
/// `0` means "use the header's value".
///
/// The override exists for frames whose producer recorded a nominal type
/// size different from the element layout actually shuffled. A mismatched
/// override yields permuted output, not a detectable error — the header
/// cannot distinguish the two.
pub fn decompress_with_size(frame: &[u8], type_size: usize) -> Result<Vec<u8>> {
    let header = Header::parse(frame)?;

    let nbytes_comp = header.nbytes_comp as usize;
    if nbytes_comp < HEADER_SIZE || nbytes_comp > frame.len() {
        return Err(Error::InvalidData);
    }

    // Memcpy frames decode without touching the registry; everything else
    // dispatches on the header's codec id.
    let codec = if header.is_memcpy() {
        None
    } else {
        Some(registry::get_codec(header.codec).ok_or(Error::InvalidCodec(header.codec.0))?)
    };

    rublosc_core::decompress_frame(frame, codec.as_deref(), type_size)
}

/// Parse and return a frame's header without decompressing anything.
pub fn info(frame: &[u8]) -> Result<Header> {
    Header::parse(frame)
}

/// The original (uncompressed) size a frame will decompress to, read from
/// the header without invoking any codec.
pub fn decompressed_size(frame: &[u8]) -> Result<usize> {
    Ok(Header::parse(frame)?.nbytes_orig as usize)
}

// Keep the flag constants reachable for header-level consumers (tests,
// tooling) without re-exporting the whole format module at the root.
pub use format::{FLAG_BITSHUFFLE, FLAG_MEMCPY, FLAG_SHUFFLE, FLAG_SPLIT};
