use rublosc_core::{Codec, CodecId, Error, Result};

/// Zstandard codec.
///
/// Uses the single-shot `bulk` entry points: each call owns its own
/// compression context, so concurrent invocations never contend or share
/// mutable state. The 1..=9 effort scale collapses onto four native speed
/// classes.
pub struct ZstdCodec;

impl ZstdCodec {
    /// Map the 1..=9 effort scale onto native zstd levels:
    /// fastest / default / better / best.
    fn native_level(level: i32) -> i32 {
        match level {
            l if l <= 2 => 1,
            l if l <= 4 => 3,
            l if l <= 6 => 9,
            _ => 19,
        }
    }
}

impl Codec for ZstdCodec {
    fn id(&self) -> CodecId {
        CodecId::ZSTD
    }

    fn name(&self) -> &'static str {
        "zstd"
    }

    fn compress(&self, data: &[u8], level: i32) -> Result<Vec<u8>> {
        zstd::bulk::compress(data, Self::native_level(level))
            .map_err(|e| Error::CompressionFailed(format!("zstd: {e}")))
    }

    fn decompress(&self, data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
        zstd::bulk::decompress(data, expected_size)
            .map_err(|e| Error::DecompressionFailed(format!("zstd: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_level_classes() {
        let data = b"zstandard compresses structured data well ".repeat(50);
        let codec = ZstdCodec;
        for level in 1..=9 {
            let compressed = codec.compress(&data, level).unwrap();
            assert!(compressed.len() < data.len());
            let restored = codec.decompress(&compressed, data.len()).unwrap();
            assert_eq!(restored, data, "zstd roundtrip failed at level {level}");
        }
    }

    #[test]
    fn corrupt_payload_is_an_error() {
        let err = ZstdCodec.decompress(b"not a zstd frame", 64).unwrap_err();
        assert!(matches!(err, Error::DecompressionFailed(_)));
    }

    #[test]
    fn level_classes() {
        assert_eq!(ZstdCodec::native_level(1), 1);
        assert_eq!(ZstdCodec::native_level(2), 1);
        assert_eq!(ZstdCodec::native_level(3), 3);
        assert_eq!(ZstdCodec::native_level(4), 3);
        assert_eq!(ZstdCodec::native_level(5), 9);
        assert_eq!(ZstdCodec::native_level(6), 9);
        assert_eq!(ZstdCodec::native_level(7), 19);
        assert_eq!(ZstdCodec::native_level(9), 19);
    }
}
