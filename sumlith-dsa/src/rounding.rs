//! Power2Round, Decompose and the hint functions.
//!
//! Decompose is specialized to gamma2 = (q-1)/32, where high parts live in
//! [0, 15].

use crate::params::{D, GAMMA2, Q};

/// Split r in [0, q-1] as r1 * 2^d + r0 with r0 in (-2^(d-1), 2^(d-1)].
#[inline]
pub fn power2round(r: i32) -> (i32, i32) {
    let r1 = (r + (1 << (D - 1)) - 1) >> D;
    (r1, r - (r1 << D))
}

/// Split r in [0, q-1] as r1 * 2 * gamma2 + r0 with r0 in (-gamma2, gamma2].
///
/// The one value that would give r1 = 16 is folded to r1 = 0 with r0 - 1.
#[inline]
pub fn decompose(r: i32) -> (i32, i32) {
    // ceil(r / 128), then divide by 4092 with multiply-shift
    let mut r1 = (r + 127) >> 7;
    r1 = (r1 * 1025 + (1 << 21)) >> 22;
    r1 &= 15;

    let mut r0 = r - r1 * 2 * GAMMA2;
    r0 -= (((Q - 1) / 2 - r0) >> 31) & Q;
    (r1, r0)
}

#[inline]
pub fn highbits(r: i32) -> i32 {
    decompose(r).0
}

#[inline]
pub fn lowbits(r: i32) -> i32 {
    decompose(r).1
}

/// Hint bit telling the verifier that the high part of `r` differs from
/// that of `r_shifted`. Both inputs in [0, q-1].
#[inline]
pub fn make_hint(r: i32, r_shifted: i32) -> bool {
    highbits(r) != highbits(r_shifted)
}

/// Recover the signer's high bits from r in [0, q-1] and a hint.
#[inline]
pub fn use_hint(hint: bool, r: i32) -> i32 {
    let (r1, r0) = decompose(r);
    if !hint {
        r1
    } else if r0 > 0 {
        (r1 + 1) & 15
    } else {
        (r1 - 1) & 15
    }
}
