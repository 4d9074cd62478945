use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock, RwLock};

use rublosc_core::{Codec, CodecId};

use crate::{Lz4Codec, Lz4hcCodec, SnappyCodec, ZlibCodec, ZstdCodec};

/// Process-wide codec table, pre-populated with the five bundled codecs.
///
/// Registration is a one-time configuration event (typically before any
/// compression traffic); steady-state access is concurrent read-locked
/// lookups. BloscLZ (id 0) is deliberately absent — frames using it fail
/// decompression with `InvalidCodec`.
static REGISTRY: LazyLock<RwLock<BTreeMap<CodecId, Arc<dyn Codec>>>> = LazyLock::new(|| {
    let mut codecs: BTreeMap<CodecId, Arc<dyn Codec>> = BTreeMap::new();
    codecs.insert(CodecId::LZ4, Arc::new(Lz4Codec));
    codecs.insert(CodecId::LZ4HC, Arc::new(Lz4hcCodec));
    codecs.insert(CodecId::SNAPPY, Arc::new(SnappyCodec));
    codecs.insert(CodecId::ZLIB, Arc::new(ZlibCodec));
    codecs.insert(CodecId::ZSTD, Arc::new(ZstdCodec));
    RwLock::new(codecs)
});

/// Register (or replace) the codec for `id`.
///
/// Frames produced afterwards with `id` dispatch to `codec`, as do frames
/// whose header names `id` on decompression.
pub fn register_codec(id: CodecId, codec: Arc<dyn Codec>) {
    REGISTRY
        .write()
        .expect("codec registry poisoned")
        .insert(id, codec);
}

/// Look up the codec registered for `id`.
pub fn get_codec(id: CodecId) -> Option<Arc<dyn Codec>> {
    REGISTRY
        .read()
        .expect("codec registry poisoned")
        .get(&id)
        .cloned()
}

/// All registered codec ids, in ascending order.
pub fn list_codecs() -> Vec<CodecId> {
    REGISTRY
        .read()
        .expect("codec registry poisoned")
        .keys()
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_codecs_are_registered() {
        for id in [
            CodecId::LZ4,
            CodecId::LZ4HC,
            CodecId::SNAPPY,
            CodecId::ZLIB,
            CodecId::ZSTD,
        ] {
            let codec = get_codec(id).expect("bundled codec missing");
            assert_eq!(codec.id(), id);
        }
        assert!(get_codec(CodecId::BLOSCLZ).is_none());
    }

    #[test]
    fn listing_is_sorted() {
        let ids = list_codecs();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert!(ids.contains(&CodecId::LZ4));
    }
}
