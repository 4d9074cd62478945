use std::borrow::Cow;

use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::format::{
    CodecId, Header, ShuffleMode, FLAG_BITSHUFFLE, FLAG_MEMCPY, FLAG_SHUFFLE, FORMAT_VERSION,
    HEADER_SIZE,
};
use crate::shuffle;

/// Largest input the 32-bit `nbytes_comp` field can express once the
/// header is accounted for.
pub const MAX_INPUT_SIZE: usize = u32::MAX as usize - HEADER_SIZE;

// ── Options ────────────────────────────────────────────────────────────────

/// Compression options.
///
/// `level` is the user-facing 1..=9 effort scale; each codec adapter owns
/// the translation to its native range. Out-of-range values are clamped,
/// not rejected.
#[derive(Debug, Clone)]
pub struct Options {
    /// Codec identifier written to the frame header.
    pub codec: CodecId,
    /// Compression level, clamped to 1..=9.
    pub level: i32,
    /// Shuffle preprocessing mode.
    pub shuffle: ShuffleMode,
    /// Element size in bytes for the shuffle; clamped to 1..=255 so the
    /// header's `typesize` byte and the transform always agree.
    pub type_size: usize,
    /// Block size in bytes; 0 = automatic. Single-block frames are emitted
    /// regardless, so this is accepted and ignored.
    pub block_size: usize,
    /// Reserved for future use; accepted and ignored.
    pub num_threads: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            codec: CodecId::LZ4,
            level: 5,
            shuffle: ShuffleMode::Byte,
            type_size: 4,
            block_size: 0,
            num_threads: 0,
        }
    }
}

// ── Compression ────────────────────────────────────────────────────────────

/// Compress `data` into a single-block frame using the supplied codec.
///
/// The pipeline shuffles (per `opts.shuffle` when the effective type size
/// exceeds 1), invokes the codec, and falls back to storing the raw
/// original bytes — with the `MEMCPY` flag — whenever compression would
/// not shrink the data. The header's shuffle flags always reflect the
/// *requested* mode so encoder and decoder agree on the inverse transform.
pub fn compress_frame(data: &[u8], codec: &dyn Codec, opts: &Options) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(Error::InvalidData);
    }
    if data.len() > MAX_INPUT_SIZE {
        return Err(Error::DataTooLarge(data.len()));
    }

    let type_size = opts.type_size.clamp(1, 255);
    let level = opts.level.clamp(1, 9);

    let shuffled: Cow<'_, [u8]> = match opts.shuffle {
        ShuffleMode::Byte if type_size > 1 => Cow::Owned(shuffle::shuffle(data, type_size)),
        ShuffleMode::Bit if type_size > 1 => Cow::Owned(shuffle::bit_shuffle(data, type_size)),
        _ => Cow::Borrowed(data),
    };

    let compressed = codec.compress(&shuffled, level)?;

    // Frame-level incompressible fallback: the payload becomes the raw
    // original bytes (not the shuffled bytes), so decoders skip both the
    // codec and the inverse transform.
    let use_memcpy = compressed.len() >= data.len();
    let payload: &[u8] = if use_memcpy { data } else { &compressed };

    let mut flags = match opts.shuffle {
        ShuffleMode::None => 0,
        ShuffleMode::Byte => FLAG_SHUFFLE,
        ShuffleMode::Bit => FLAG_BITSHUFFLE,
    };
    if use_memcpy {
        flags |= FLAG_MEMCPY;
    }

    let header = Header {
        version: FORMAT_VERSION,
        codec: codec.id(),
        flags,
        typesize: type_size as u8,
        nbytes_orig: data.len() as u32,
        block_size: data.len() as u32,
        nbytes_comp: (HEADER_SIZE + payload.len()) as u32,
    };

    let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
    frame.extend_from_slice(&header.to_bytes());
    frame.extend_from_slice(payload);
    Ok(frame)
}

// ── Decompression ──────────────────────────────────────────────────────────

/// Decompress a frame previously produced by [`compress_frame`] (or any
/// interoperable single-block encoder).
///
/// `codec` is the implementation matching the header's codec id; `None` is
/// acceptable only for memcpy frames and otherwise fails with
/// [`Error::InvalidCodec`]. `type_size_override` replaces the header's
/// type size for the inverse shuffle when greater than zero.
pub fn decompress_frame(
    frame: &[u8],
    codec: Option<&dyn Codec>,
    type_size_override: usize,
) -> Result<Vec<u8>> {
    let header = Header::parse(frame)?;

    let nbytes_comp = header.nbytes_comp as usize;
    if nbytes_comp < HEADER_SIZE || nbytes_comp > frame.len() {
        return Err(Error::InvalidData);
    }
    let payload = &frame[HEADER_SIZE..nbytes_comp];

    let mut decoded = if header.is_memcpy() {
        payload.to_vec()
    } else {
        let codec = codec.ok_or(Error::InvalidCodec(header.codec.0))?;
        codec.decompress(payload, header.nbytes_orig as usize)?
    };

    let type_size = if type_size_override > 0 {
        type_size_override
    } else {
        header.typesize as usize
    };

    // Memcpy payloads hold the raw original bytes, so the inverse
    // transform applies only to data that went through a codec.
    if !header.is_memcpy() && type_size > 1 {
        decoded = match header.shuffle_mode() {
            ShuffleMode::Bit => shuffle::bit_unshuffle(&decoded, type_size),
            ShuffleMode::Byte => shuffle::unshuffle(&decoded, type_size),
            ShuffleMode::None => decoded,
        };
    }

    if decoded.len() != header.nbytes_orig as usize {
        return Err(Error::SizeMismatch {
            got: decoded.len(),
            expected: header.nbytes_orig as usize,
        });
    }

    Ok(decoded)
}
