use std::fmt;

use crate::error::Error;

/// Fixed size of the Blosc v2 frame header in bytes.
///   version:u8 + versionlz:u8 + flags:u8 + typesize:u8
///   + nbytes_orig:u32 + block_size:u32 + nbytes_comp:u32
///   = 1 + 1 + 1 + 1 + 4 + 4 + 4 = 16
pub const HEADER_SIZE: usize = 16;

/// Frame format version this implementation reads and writes.
pub const FORMAT_VERSION: u8 = 2;

// ── Flags ──────────────────────────────────────────────────────────────────

/// Byte shuffle was applied before compression.
pub const FLAG_SHUFFLE: u8 = 0x1;

/// Payload is the raw data verbatim — no codec was applied.
pub const FLAG_MEMCPY: u8 = 0x2;

/// Bit shuffle was applied before compression.
pub const FLAG_BITSHUFFLE: u8 = 0x4;

/// Split blocks. Defined by the format, never produced here; ignored on
/// decode under the single-block assumption.
pub const FLAG_SPLIT: u8 = 0x8;

// ── Codec identifiers ──────────────────────────────────────────────────────

/// Codec identifier stored in the header's `versionlz` byte.
///
/// The set is open: any `u8` is a valid identifier on the wire, so custom
/// codecs can be registered beyond the well-known constants below. An id
/// with no registered implementation fails decompression with
/// [`Error::InvalidCodec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodecId(pub u8);

impl CodecId {
    /// BloscLZ — recognized on the wire, no implementation provided.
    pub const BLOSCLZ: CodecId = CodecId(0);
    /// LZ4 fast mode.
    pub const LZ4: CodecId = CodecId(1);
    /// LZ4 high-compression mode.
    pub const LZ4HC: CodecId = CodecId(2);
    /// Snappy.
    pub const SNAPPY: CodecId = CodecId(3);
    /// zlib (deflate with zlib framing).
    pub const ZLIB: CodecId = CodecId(4);
    /// Zstandard.
    pub const ZSTD: CodecId = CodecId(5);
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CodecId::BLOSCLZ => f.write_str("blosclz"),
            CodecId::LZ4 => f.write_str("lz4"),
            CodecId::LZ4HC => f.write_str("lz4hc"),
            CodecId::SNAPPY => f.write_str("snappy"),
            CodecId::ZLIB => f.write_str("zlib"),
            CodecId::ZSTD => f.write_str("zstd"),
            CodecId(other) => write!(f, "unknown({other})"),
        }
    }
}

// ── Shuffle modes ──────────────────────────────────────────────────────────

/// Preprocessing transform applied to the data before compression.
///
/// The numeric values are the API-level identifiers; the on-wire encoding
/// is a pair of independent header flag bits ([`FLAG_SHUFFLE`],
/// [`FLAG_BITSHUFFLE`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ShuffleMode {
    /// Data is compressed as-is.
    None = 0,
    /// Byte shuffle: group bytes by their position within each element.
    #[default]
    Byte = 1,
    /// Bit shuffle: 8×8 bit-matrix transpose per byte position.
    Bit = 2,
}

impl fmt::Display for ShuffleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShuffleMode::None => f.write_str("noshuffle"),
            ShuffleMode::Byte => f.write_str("shuffle"),
            ShuffleMode::Bit => f.write_str("bitshuffle"),
        }
    }
}

// ── Header ─────────────────────────────────────────────────────────────────

/// Decoded representation of the 16-byte Blosc v2 frame header.
///
/// Every compressed frame starts with this header; the payload follows
/// immediately and runs to `nbytes_comp` bytes from the frame start.
/// Headers are plain values: parsing allocates nothing and frames are
/// immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Frame format version; always [`FORMAT_VERSION`] for frames we emit.
    pub version: u8,
    /// Codec identifier (the format's `versionlz` byte).
    pub codec: CodecId,
    /// Shuffle and memcpy flag bits.
    pub flags: u8,
    /// Element size in bytes the shuffle was applied with (1..=255).
    pub typesize: u8,
    /// Original (uncompressed) data size in bytes.
    pub nbytes_orig: u32,
    /// Block size used for compression. Single-block frames carry
    /// `block_size == nbytes_orig`.
    pub block_size: u32,
    /// Total frame size in bytes, header included.
    pub nbytes_comp: u32,
}

impl Header {
    /// Parse a header from the first [`HEADER_SIZE`] bytes of `data`.
    ///
    /// Fails with [`Error::InvalidHeader`] when fewer than 16 bytes are
    /// supplied and with [`Error::InvalidVersion`] when the version byte is
    /// not [`FORMAT_VERSION`]. All other fields are accepted as-is;
    /// semantic validation (size bounds, codec lookup) happens in the
    /// pipeline.
    pub fn parse(data: &[u8]) -> Result<Self, Error> {
        if data.len() < HEADER_SIZE {
            return Err(Error::InvalidHeader);
        }
        let version = data[0];
        if version != FORMAT_VERSION {
            return Err(Error::InvalidVersion(version));
        }
        Ok(Self {
            version,
            codec: CodecId(data[1]),
            flags: data[2],
            typesize: data[3],
            nbytes_orig: u32::from_le_bytes(data[4..8].try_into().unwrap()),
            block_size: u32::from_le_bytes(data[8..12].try_into().unwrap()),
            nbytes_comp: u32::from_le_bytes(data[12..16].try_into().unwrap()),
        })
    }

    /// Serialize to exactly [`HEADER_SIZE`] bytes, little-endian.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0] = self.version;
        buf[1] = self.codec.0;
        buf[2] = self.flags;
        buf[3] = self.typesize;
        buf[4..8].copy_from_slice(&self.nbytes_orig.to_le_bytes());
        buf[8..12].copy_from_slice(&self.block_size.to_le_bytes());
        buf[12..16].copy_from_slice(&self.nbytes_comp.to_le_bytes());
        buf
    }

    /// True if byte shuffle was applied.
    #[inline]
    pub fn has_shuffle(&self) -> bool {
        self.flags & FLAG_SHUFFLE != 0
    }

    /// True if bit shuffle was applied.
    #[inline]
    pub fn has_bitshuffle(&self) -> bool {
        self.flags & FLAG_BITSHUFFLE != 0
    }

    /// True if the payload is stored uncompressed.
    #[inline]
    pub fn is_memcpy(&self) -> bool {
        self.flags & FLAG_MEMCPY != 0
    }

    /// Shuffle mode encoded in the flags. Bit shuffle takes priority over
    /// byte shuffle if both bits are (spuriously) set.
    pub fn shuffle_mode(&self) -> ShuffleMode {
        if self.has_bitshuffle() {
            ShuffleMode::Bit
        } else if self.has_shuffle() {
            ShuffleMode::Byte
        } else {
            ShuffleMode::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> Header {
        Header {
            version: FORMAT_VERSION,
            codec: CodecId::LZ4,
            flags: FLAG_SHUFFLE,
            typesize: 4,
            nbytes_orig: 4000,
            block_size: 4000,
            nbytes_comp: 1234,
        }
    }

    #[test]
    fn header_roundtrip() {
        let h = sample_header();
        let parsed = Header::parse(&h.to_bytes()).unwrap();
        assert_eq!(parsed, h);
    }

    #[test]
    fn header_layout_is_little_endian() {
        let h = Header {
            nbytes_orig: 0x0403_0201,
            ..sample_header()
        };
        let bytes = h.to_bytes();
        assert_eq!(&bytes[4..8], &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn parse_rejects_short_input() {
        assert_eq!(Header::parse(&[]), Err(Error::InvalidHeader));
        assert_eq!(
            Header::parse(&[FORMAT_VERSION, 1, 0, 4]),
            Err(Error::InvalidHeader)
        );
    }

    #[test]
    fn parse_rejects_wrong_version() {
        let mut bytes = sample_header().to_bytes();
        bytes[0] = 99;
        assert_eq!(Header::parse(&bytes), Err(Error::InvalidVersion(99)));
    }

    #[test]
    fn parse_accepts_trailing_bytes() {
        let mut frame = sample_header().to_bytes().to_vec();
        frame.extend_from_slice(&[0xAA; 32]);
        assert_eq!(Header::parse(&frame), Ok(sample_header()));
    }

    #[test]
    fn bitshuffle_takes_priority_over_shuffle() {
        let h = Header {
            flags: FLAG_SHUFFLE | FLAG_BITSHUFFLE,
            ..sample_header()
        };
        assert_eq!(h.shuffle_mode(), ShuffleMode::Bit);
    }

    #[test]
    fn split_flag_does_not_affect_shuffle_mode() {
        let h = Header {
            flags: FLAG_SPLIT,
            ..sample_header()
        };
        assert_eq!(h.shuffle_mode(), ShuffleMode::None);
        assert!(!h.is_memcpy());
    }

    #[test]
    fn shuffle_display_names() {
        assert_eq!(ShuffleMode::None.to_string(), "noshuffle");
        assert_eq!(ShuffleMode::Byte.to_string(), "shuffle");
        assert_eq!(ShuffleMode::Bit.to_string(), "bitshuffle");
    }

    #[test]
    fn codec_display_names() {
        assert_eq!(CodecId::LZ4.to_string(), "lz4");
        assert_eq!(CodecId::LZ4HC.to_string(), "lz4hc");
        assert_eq!(CodecId::SNAPPY.to_string(), "snappy");
        assert_eq!(CodecId::ZLIB.to_string(), "zlib");
        assert_eq!(CodecId::ZSTD.to_string(), "zstd");
        assert_eq!(CodecId(42).to_string(), "unknown(42)");
    }
}
