use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use rublosc_core::{Codec, CodecId, Error, Result};

/// zlib (deflate) codec.
///
/// The only adapter whose level passes straight through to the backend:
/// zlib's native scale is already 0..=9, with `-1` selecting the library
/// default. Anything outside `-1..=9` is rejected — reachable only through
/// direct [`Codec`] use, since the pipeline clamps levels to 1..=9 first.
pub struct ZlibCodec;

impl Codec for ZlibCodec {
    fn id(&self) -> CodecId {
        CodecId::ZLIB
    }

    fn name(&self) -> &'static str {
        "zlib"
    }

    fn compress(&self, data: &[u8], level: i32) -> Result<Vec<u8>> {
        let compression = match level {
            -1 => Compression::default(),
            0..=9 => Compression::new(level as u32),
            _ => {
                return Err(Error::CompressionFailed(format!(
                    "zlib: level {level} out of range -1..=9"
                )))
            }
        };

        let mut encoder = ZlibEncoder::new(Vec::new(), compression);
        encoder
            .write_all(data)
            .map_err(|e| Error::CompressionFailed(format!("zlib: {e}")))?;
        encoder
            .finish()
            .map_err(|e| Error::CompressionFailed(format!("zlib: {e}")))
    }

    fn decompress(&self, data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(expected_size);
        ZlibDecoder::new(data)
            .read_to_end(&mut out)
            .map_err(|e| Error::DecompressionFailed(format!("zlib: {e}")))?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let data = b"zlib deflate stream roundtrip ".repeat(40);
        let codec = ZlibCodec;
        for level in [-1, 1, 6, 9] {
            let compressed = codec.compress(&data, level).unwrap();
            assert!(compressed.len() < data.len());
            let restored = codec.decompress(&compressed, data.len()).unwrap();
            assert_eq!(restored, data, "zlib roundtrip failed at level {level}");
        }
    }

    #[test]
    fn out_of_range_level_is_an_error() {
        let err = ZlibCodec.compress(b"x", 10).unwrap_err();
        assert!(matches!(err, Error::CompressionFailed(_)));
        let err = ZlibCodec.compress(b"x", -2).unwrap_err();
        assert!(matches!(err, Error::CompressionFailed(_)));
    }

    #[test]
    fn corrupt_payload_is_an_error() {
        let err = ZlibCodec.decompress(b"\x00\x01garbage", 64).unwrap_err();
        assert!(matches!(err, Error::DecompressionFailed(_)));
    }
}
