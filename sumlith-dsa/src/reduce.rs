//! Modular arithmetic modulo q = 8380417 = 2^23 - 2^13 + 1.

use crate::params::Q;

/// q^(-1) mod 2^32
pub const QINV: i32 = 58_728_449;

/// 2^32 mod q (Montgomery R)
pub const MONT_R: i32 = 4_193_792;

/// Montgomery reduction: a * 2^(-32) mod q.
///
/// Input: |a| <= 2^31 * q. Output: |r| < q.
#[inline]
pub const fn montgomery_reduce(a: i64) -> i32 {
    let t = (a as i32).wrapping_mul(QINV);
    ((a - (t as i64) * (Q as i64)) >> 32) as i32
}

/// Montgomery multiplication: a * b * 2^(-32) mod q.
#[inline]
pub const fn montgomery_mul(a: i32, b: i32) -> i32 {
    montgomery_reduce((a as i64) * (b as i64))
}

/// Reduce to a representative in [-6283008, 6283008].
///
/// Input: a <= 2^31 - 2^22 - 1.
#[inline]
pub const fn reduce32(a: i32) -> i32 {
    let t = (a + (1 << 22)) >> 23;
    a - t * Q
}

/// Add q if a is negative.
#[inline]
pub const fn caddq(a: i32) -> i32 {
    a + ((a >> 31) & Q)
}

/// Canonical representative in [0, q-1].
#[inline]
pub const fn freeze(a: i32) -> i32 {
    caddq(reduce32(a))
}

/// Centered representative in [-(q-1)/2, (q-1)/2].
#[inline]
pub const fn center(a: i32) -> i32 {
    let r = freeze(a);
    r - ((((Q - 1) / 2 - r) >> 31) & Q)
}
