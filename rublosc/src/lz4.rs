use rublosc_core::{Codec, CodecId, Error, Result};

/// LZ4 block codec, fast mode.
///
/// Fastest decompression of the bundled codecs. The payload is a raw LZ4
/// block with no length prefix — the frame header carries the uncompressed
/// size, which the decoder passes back in. LZ4 fast mode has a single
/// speed point, so the level is ignored.
pub struct Lz4Codec;

impl Codec for Lz4Codec {
    fn id(&self) -> CodecId {
        CodecId::LZ4
    }

    fn name(&self) -> &'static str {
        "lz4"
    }

    fn compress(&self, data: &[u8], _level: i32) -> Result<Vec<u8>> {
        let compressed = lz4_flex::block::compress(data);
        if compressed.is_empty() {
            // Backend signaled "no gain"; hand back the input and let the
            // frame-level memcpy comparison decide.
            return Ok(data.to_vec());
        }
        Ok(compressed)
    }

    fn decompress(&self, data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
        lz4_flex::block::decompress(data, expected_size)
            .map_err(|e| Error::DecompressionFailed(format!("lz4: {e}")))
    }
}
