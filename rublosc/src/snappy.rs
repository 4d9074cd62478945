use rublosc_core::{Codec, CodecId, Error, Result};

/// Snappy codec.
///
/// Raw Snappy block format (`snap::raw`), not the framed streaming format
/// — matching what other Blosc implementations store. Snappy has no
/// compression levels, so the level is ignored.
pub struct SnappyCodec;

impl Codec for SnappyCodec {
    fn id(&self) -> CodecId {
        CodecId::SNAPPY
    }

    fn name(&self) -> &'static str {
        "snappy"
    }

    fn compress(&self, data: &[u8], _level: i32) -> Result<Vec<u8>> {
        snap::raw::Encoder::new()
            .compress_vec(data)
            .map_err(|e| Error::CompressionFailed(format!("snappy: {e}")))
    }

    fn decompress(&self, data: &[u8], _expected_size: usize) -> Result<Vec<u8>> {
        snap::raw::Decoder::new()
            .decompress_vec(data)
            .map_err(|e| Error::DecompressionFailed(format!("snappy: {e}")))
    }
}
