use rublosc_core::{Codec, CodecId, Error, Result};

/// LZ4 high-compression codec.
///
/// Compresses through liblz4's HC entry point; the output is an ordinary
/// LZ4 block, so decompression is identical to [`Lz4Codec`]'s and HC
/// frames remain readable by any LZ4 decoder.
///
/// [`Lz4Codec`]: crate::Lz4Codec
pub struct Lz4hcCodec;

impl Lz4hcCodec {
    /// Map the 1..=9 effort scale onto the HC level ladder.
    fn native_level(level: i32) -> i32 {
        match level {
            l if l <= 3 => 1,
            l if l <= 5 => 5,
            l if l <= 7 => 7,
            _ => 9,
        }
    }
}

impl Codec for Lz4hcCodec {
    fn id(&self) -> CodecId {
        CodecId::LZ4HC
    }

    fn name(&self) -> &'static str {
        "lz4hc"
    }

    fn compress(&self, data: &[u8], level: i32) -> Result<Vec<u8>> {
        let mode = lz4::block::CompressionMode::HIGHCOMPRESSION(Self::native_level(level));
        let compressed = lz4::block::compress(data, Some(mode), false)
            .map_err(|e| Error::CompressionFailed(format!("lz4hc: {e}")))?;
        if compressed.is_empty() {
            return Ok(data.to_vec());
        }
        Ok(compressed)
    }

    fn decompress(&self, data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
        lz4_flex::block::decompress(data, expected_size)
            .map_err(|e| Error::DecompressionFailed(format!("lz4hc: {e}")))
    }
}
