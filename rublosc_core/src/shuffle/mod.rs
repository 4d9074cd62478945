//! Byte- and bit-level shuffle transforms.
//!
//! Shuffling rearranges typed binary data before compression so that bytes
//! (or bits) occupying the same position within each element end up
//! adjacent — similar bytes compress far better once grouped. Both
//! transforms are exact permutations: output length always equals input
//! length, and each has an exact inverse.
//!
//! The `type_size == 4` byte shuffle — the float32/int32 hot path — is
//! vectorized with SSE2 on x86_64. The vector routine handles whole
//! 16-element chunks and the scalar reference finishes the tail, so the
//! observable result is defined entirely by the scalar algorithm. CPU
//! capability is probed exactly once, at first use, and is read-only
//! afterwards.

mod generic;
#[cfg(target_arch = "x86_64")]
mod sse2;

use crate::format::ShuffleMode;

/// True when the SSE2 fast path may be used. Probed once per process.
#[cfg(target_arch = "x86_64")]
fn sse2_available() -> bool {
    use std::sync::LazyLock;
    static AVAILABLE: LazyLock<bool> = LazyLock::new(|| is_x86_feature_detected!("sse2"));
    *AVAILABLE
}

/// Vector-shuffle as many whole chunks as the hardware path supports,
/// returning the number of elements handled (0 when the path is bypassed:
/// unsupported shape, input below one chunk, or no SSE2).
#[cfg(target_arch = "x86_64")]
fn vector_shuffle(src: &[u8], dst: &mut [u8], type_size: usize, elements: usize) -> usize {
    if type_size == 4 && elements >= sse2::CHUNK_ELEMENTS && sse2_available() {
        // SAFETY: SSE2 was detected, and both slices cover `elements * 4`
        // bytes by construction.
        unsafe { sse2::shuffle4(src, dst, elements) }
    } else {
        0
    }
}

#[cfg(not(target_arch = "x86_64"))]
fn vector_shuffle(_src: &[u8], _dst: &mut [u8], _type_size: usize, _elements: usize) -> usize {
    0
}

/// Inverse counterpart of [`vector_shuffle`].
#[cfg(target_arch = "x86_64")]
fn vector_unshuffle(src: &[u8], dst: &mut [u8], type_size: usize, elements: usize) -> usize {
    if type_size == 4 && elements >= sse2::CHUNK_ELEMENTS && sse2_available() {
        // SAFETY: as in `vector_shuffle`.
        unsafe { sse2::unshuffle4(src, dst, elements) }
    } else {
        0
    }
}

#[cfg(not(target_arch = "x86_64"))]
fn vector_unshuffle(_src: &[u8], _dst: &mut [u8], _type_size: usize, _elements: usize) -> usize {
    0
}

/// Copy the trailing `len % type_size` bytes through unchanged.
fn copy_remainder(src: &[u8], dst: &mut [u8], type_size: usize) {
    let whole = (src.len() / type_size) * type_size;
    dst[whole..].copy_from_slice(&src[whole..]);
}

/// Byte-shuffle `src` with the given element size.
///
/// The first `len / type_size` elements are transposed from
/// array-of-structures to structure-of-arrays layout; trailing bytes that
/// do not form a whole element are copied through at the end. Inputs with
/// `type_size <= 1` or shorter than one element are returned unchanged.
pub fn shuffle(src: &[u8], type_size: usize) -> Vec<u8> {
    if type_size <= 1 || src.len() < type_size {
        return src.to_vec();
    }

    let elements = src.len() / type_size;
    let mut dst = vec![0u8; src.len()];

    let done = vector_shuffle(src, &mut dst, type_size, elements);
    generic::shuffle_span(src, &mut dst, type_size, done, elements);

    copy_remainder(src, &mut dst, type_size);
    dst
}

/// Inverse of [`shuffle`]. Applies the same degenerate-input and
/// trailing-remainder rules, so it is an exact identity wherever the
/// forward transform was.
pub fn unshuffle(src: &[u8], type_size: usize) -> Vec<u8> {
    if type_size <= 1 || src.len() < type_size {
        return src.to_vec();
    }

    let elements = src.len() / type_size;
    let mut dst = vec![0u8; src.len()];

    let done = vector_unshuffle(src, &mut dst, type_size, elements);
    generic::unshuffle_span(src, &mut dst, type_size, done, elements);

    copy_remainder(src, &mut dst, type_size);
    dst
}

/// Bit-shuffle `src` with the given element size.
///
/// Within each group of 8 consecutive elements, the 8 bytes at each byte
/// position are transposed as an 8×8 bit matrix. Elements outside complete
/// groups and trailing remainder bytes pass through verbatim. Degenerate
/// inputs are returned unchanged, as with [`shuffle`].
pub fn bit_shuffle(src: &[u8], type_size: usize) -> Vec<u8> {
    if type_size <= 1 || src.len() < type_size {
        return src.to_vec();
    }
    let mut dst = vec![0u8; src.len()];
    generic::bit_shuffle_into(src, &mut dst, type_size);
    copy_remainder(src, &mut dst, type_size);
    dst
}

/// Inverse of [`bit_shuffle`], mirroring its partial-group rule.
pub fn bit_unshuffle(src: &[u8], type_size: usize) -> Vec<u8> {
    if type_size <= 1 || src.len() < type_size {
        return src.to_vec();
    }
    let mut dst = vec![0u8; src.len()];
    generic::bit_unshuffle_into(src, &mut dst, type_size);
    copy_remainder(src, &mut dst, type_size);
    dst
}

/// Apply the forward transform for `mode` in place.
///
/// Equivalent to computing the transform into a fresh buffer and copying
/// it back; [`ShuffleMode::None`] leaves the buffer untouched.
pub fn shuffle_in_place(buf: &mut [u8], type_size: usize, mode: ShuffleMode) {
    let result = match mode {
        ShuffleMode::Byte => shuffle(buf, type_size),
        ShuffleMode::Bit => bit_shuffle(buf, type_size),
        ShuffleMode::None => return,
    };
    buf.copy_from_slice(&result);
}

/// Apply the inverse transform for `mode` in place.
pub fn unshuffle_in_place(buf: &mut [u8], type_size: usize, mode: ShuffleMode) {
    let result = match mode {
        ShuffleMode::Byte => unshuffle(buf, type_size),
        ShuffleMode::Bit => bit_unshuffle(buf, type_size),
        ShuffleMode::None => return,
    };
    buf.copy_from_slice(&result);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic byte generator (LCG), so tests need no rand crate.
    fn pseudo_random_bytes(len: usize, mut seed: u64) -> Vec<u8> {
        (0..len)
            .map(|_| {
                seed = seed
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                (seed >> 56) as u8
            })
            .collect()
    }

    /// Textbook nested-loop shuffle, kept separate from the production
    /// scalar code so the vector path is checked against an independent
    /// statement of the algorithm.
    fn naive_shuffle(src: &[u8], ts: usize) -> Vec<u8> {
        if ts <= 1 || src.len() < ts {
            return src.to_vec();
        }
        let e = src.len() / ts;
        let mut dst = vec![0u8; src.len()];
        for i in 0..e {
            for j in 0..ts {
                dst[j * e + i] = src[i * ts + j];
            }
        }
        dst[e * ts..].copy_from_slice(&src[e * ts..]);
        dst
    }

    #[test]
    fn roundtrip_all_type_sizes() {
        for ts in [1usize, 2, 3, 4, 7, 8, 16] {
            for len in [0usize, 1, 5, 63, 64, 65, 1000, 4096] {
                let data = pseudo_random_bytes(len, (ts * 1000 + len) as u64);
                assert_eq!(
                    unshuffle(&shuffle(&data, ts), ts),
                    data,
                    "byte shuffle roundtrip failed for ts={ts} len={len}"
                );
                assert_eq!(
                    bit_unshuffle(&bit_shuffle(&data, ts), ts),
                    data,
                    "bit shuffle roundtrip failed for ts={ts} len={len}"
                );
            }
        }
    }

    #[test]
    fn length_is_always_preserved() {
        for ts in [1usize, 2, 4, 8, 16] {
            for len in [0usize, 1, 3, 31, 32, 33, 100, 257] {
                let data = pseudo_random_bytes(len, 7);
                assert_eq!(shuffle(&data, ts).len(), len);
                assert_eq!(bit_shuffle(&data, ts).len(), len);
            }
        }
    }

    #[test]
    fn degenerate_shapes_are_identity_both_ways() {
        let data = pseudo_random_bytes(100, 42);
        assert_eq!(shuffle(&data, 1), data);
        assert_eq!(unshuffle(&data, 1), data);
        assert_eq!(bit_shuffle(&data, 1), data);
        assert_eq!(bit_unshuffle(&data, 1), data);

        let short = pseudo_random_bytes(3, 43);
        assert_eq!(shuffle(&short, 8), short);
        assert_eq!(unshuffle(&short, 8), short);
        assert_eq!(bit_shuffle(&short, 8), short);
        assert_eq!(bit_unshuffle(&short, 8), short);
    }

    #[test]
    fn remainder_bytes_pass_through_at_the_end() {
        // 2 elements of 4 bytes plus 3 remainder bytes.
        let data = [1, 2, 3, 4, 5, 6, 7, 8, 0xAA, 0xBB, 0xCC];
        let out = shuffle(&data, 4);
        assert_eq!(&out[8..], &[0xAA, 0xBB, 0xCC]);
        assert_eq!(&out[..8], &[1, 5, 2, 6, 3, 7, 4, 8]);
    }

    #[test]
    fn vector_path_matches_scalar_reference() {
        // Sizes straddling the 16-element SSE2 chunk boundary, plus sizes
        // with element remainders and trailing bytes.
        for elements in [0usize, 1, 15, 16, 17, 31, 32, 33, 100, 1024] {
            for extra in [0usize, 1, 3] {
                let len = elements * 4 + extra;
                let data = pseudo_random_bytes(len, len as u64 + 11);
                assert_eq!(
                    shuffle(&data, 4),
                    naive_shuffle(&data, 4),
                    "shuffle diverged from reference at {elements} elements + {extra}"
                );
                assert_eq!(
                    unshuffle(&naive_shuffle(&data, 4), 4),
                    data,
                    "unshuffle diverged from reference at {elements} elements + {extra}"
                );
            }
        }
    }

    #[test]
    fn bit_shuffle_boundary_sizes_roundtrip() {
        // 28 bytes at ts=4 is 7 elements: no complete 8-element group, so
        // the transform must be the identity and still invert cleanly.
        let data = pseudo_random_bytes(28, 3);
        assert_eq!(bit_shuffle(&data, 4), data);
        assert_eq!(bit_unshuffle(&data, 4), data);

        // 36 bytes at ts=4 is 9 elements: one transposed group + 1 element
        // passed through.
        let data = pseudo_random_bytes(36, 4);
        let out = bit_shuffle(&data, 4);
        assert_eq!(&out[32..], &data[32..]);
        assert_eq!(bit_unshuffle(&out, 4), data);
    }

    #[test]
    fn bit_shuffle_groups_exponent_bits() {
        // 8 identical elements: every transposed plane byte must be either
        // 0x00 or 0xFF (all 8 elements agree on every bit).
        let data: Vec<u8> = [0x3F, 0x80, 0x01, 0x02].repeat(8);
        let out = bit_shuffle(&data, 4);
        assert!(out.iter().all(|&b| b == 0x00 || b == 0xFF));
    }

    #[test]
    fn in_place_variants_match_allocating_ones() {
        let data = pseudo_random_bytes(256, 9);
        for mode in [ShuffleMode::None, ShuffleMode::Byte, ShuffleMode::Bit] {
            let mut buf = data.clone();
            shuffle_in_place(&mut buf, 4, mode);
            let expected = match mode {
                ShuffleMode::None => data.clone(),
                ShuffleMode::Byte => shuffle(&data, 4),
                ShuffleMode::Bit => bit_shuffle(&data, 4),
            };
            assert_eq!(buf, expected, "in-place forward, mode {mode}");

            unshuffle_in_place(&mut buf, 4, mode);
            assert_eq!(buf, data, "in-place inverse, mode {mode}");
        }
    }
}
