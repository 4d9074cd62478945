//! SSE2 fast path for the `type_size == 4` byte shuffle.
//!
//! Both routines process whole 16-element (64-byte) chunks and report how
//! many elements they handled; the scalar span routines complete the tail.
//! Keeping the vector loop straight-line — no masked epilogue — is what
//! makes the remainder hand-off worthwhile.

use core::arch::x86_64::*;

/// Elements consumed per vector iteration (4 × 16-byte loads).
pub(super) const CHUNK_ELEMENTS: usize = 16;

/// Shuffle the first whole chunks of `src` (4-byte elements) into `dst`,
/// writing each byte plane at stride `elements`. Returns the number of
/// elements processed, always a multiple of [`CHUNK_ELEMENTS`].
///
/// Sixteen elements form a 16×4 byte matrix; three rounds of byte
/// interleaves followed by a 64-bit interleave transpose it into the four
/// 16-byte plane rows.
///
/// # Safety
///
/// - SSE2 must be available (callers gate on the one-shot capability probe).
/// - `src` must hold at least `elements * 4` bytes and `dst` at least
///   `4 * elements` bytes. Unaligned loads/stores are used throughout.
#[target_feature(enable = "sse2")]
pub(super) unsafe fn shuffle4(src: &[u8], dst: &mut [u8], elements: usize) -> usize {
    let vectorizable = elements - elements % CHUNK_ELEMENTS;
    let sp = src.as_ptr();
    let dp = dst.as_mut_ptr();

    let mut i = 0;
    while i < vectorizable {
        let base = sp.add(i * 4);
        let x0 = _mm_loadu_si128(base as *const __m128i);
        let x1 = _mm_loadu_si128(base.add(16) as *const __m128i);
        let x2 = _mm_loadu_si128(base.add(32) as *const __m128i);
        let x3 = _mm_loadu_si128(base.add(48) as *const __m128i);

        // Round 1: pair elements 8 apart.
        let a0 = _mm_unpacklo_epi8(x0, x1);
        let a1 = _mm_unpackhi_epi8(x0, x1);
        let a2 = _mm_unpacklo_epi8(x2, x3);
        let a3 = _mm_unpackhi_epi8(x2, x3);

        // Round 2: pair elements 4 apart.
        let b0 = _mm_unpacklo_epi8(a0, a1);
        let b1 = _mm_unpackhi_epi8(a0, a1);
        let b2 = _mm_unpacklo_epi8(a2, a3);
        let b3 = _mm_unpackhi_epi8(a2, a3);

        // Round 3: each half-register now holds one plane of 8 elements.
        let c0 = _mm_unpacklo_epi8(b0, b1);
        let c1 = _mm_unpackhi_epi8(b0, b1);
        let c2 = _mm_unpacklo_epi8(b2, b3);
        let c3 = _mm_unpackhi_epi8(b2, b3);

        // Join the low/high element halves of each plane and store.
        _mm_storeu_si128(dp.add(i) as *mut __m128i, _mm_unpacklo_epi64(c0, c2));
        _mm_storeu_si128(
            dp.add(elements + i) as *mut __m128i,
            _mm_unpackhi_epi64(c0, c2),
        );
        _mm_storeu_si128(
            dp.add(2 * elements + i) as *mut __m128i,
            _mm_unpacklo_epi64(c1, c3),
        );
        _mm_storeu_si128(
            dp.add(3 * elements + i) as *mut __m128i,
            _mm_unpackhi_epi64(c1, c3),
        );

        i += CHUNK_ELEMENTS;
    }

    vectorizable
}

/// Inverse of [`shuffle4`]: gather 16 bytes from each of the four planes
/// and interleave them back into element order. Returns the number of
/// elements processed, always a multiple of [`CHUNK_ELEMENTS`].
///
/// # Safety
///
/// Same contract as [`shuffle4`], with `src` holding the planes at stride
/// `elements` and `dst` receiving `elements * 4` element-major bytes.
#[target_feature(enable = "sse2")]
pub(super) unsafe fn unshuffle4(src: &[u8], dst: &mut [u8], elements: usize) -> usize {
    let vectorizable = elements - elements % CHUNK_ELEMENTS;
    let sp = src.as_ptr();
    let dp = dst.as_mut_ptr();

    let mut i = 0;
    while i < vectorizable {
        let x0 = _mm_loadu_si128(sp.add(i) as *const __m128i);
        let x1 = _mm_loadu_si128(sp.add(elements + i) as *const __m128i);
        let x2 = _mm_loadu_si128(sp.add(2 * elements + i) as *const __m128i);
        let x3 = _mm_loadu_si128(sp.add(3 * elements + i) as *const __m128i);

        // Pair byte 0 with byte 1 and byte 2 with byte 3 of each element,
        // then zip the pairs into whole elements.
        let lo01 = _mm_unpacklo_epi8(x0, x1);
        let hi01 = _mm_unpackhi_epi8(x0, x1);
        let lo23 = _mm_unpacklo_epi8(x2, x3);
        let hi23 = _mm_unpackhi_epi8(x2, x3);

        let out = dp.add(i * 4);
        _mm_storeu_si128(out as *mut __m128i, _mm_unpacklo_epi16(lo01, lo23));
        _mm_storeu_si128(
            out.add(16) as *mut __m128i,
            _mm_unpackhi_epi16(lo01, lo23),
        );
        _mm_storeu_si128(
            out.add(32) as *mut __m128i,
            _mm_unpacklo_epi16(hi01, hi23),
        );
        _mm_storeu_si128(
            out.add(48) as *mut __m128i,
            _mm_unpackhi_epi16(hi01, hi23),
        );

        i += CHUNK_ELEMENTS;
    }

    vectorizable
}
