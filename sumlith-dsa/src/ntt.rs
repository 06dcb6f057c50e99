//! Number Theoretic Transform over Z_q[X]/(X^256 + 1).
//!
//! The primitive 512th root of unity is 1753. Twiddle factors are the
//! bit-reversed powers of it in Montgomery form, computed at compile time.

use crate::params::{N, Q};
use crate::reduce::{montgomery_mul, MONT_R};

/// Primitive 512th root of unity modulo q.
pub const ZETA: i32 = 1753;

/// mont^2 / 256: undoes the 1/N scaling and leaves the result in normal form
/// after a Montgomery product.
pub const INV_N_MONT: i32 = 41_978;

/// zetas[i] = ZETA^brv8(i) * 2^32 mod q, centered. zetas[0] is never read.
pub const ZETAS: [i32; N] = compute_zetas();

const fn compute_zetas() -> [i32; N] {
    let q = Q as i64;
    let mut powers = [0i64; N];
    powers[0] = 1;
    let mut e = 1;
    while e < N {
        powers[e] = powers[e - 1] * ZETA as i64 % q;
        e += 1;
    }

    let mut zetas = [0i32; N];
    let mut i = 0;
    while i < N {
        let brv = (i as u8).reverse_bits() as usize;
        let z = powers[brv] * MONT_R as i64 % q;
        zetas[i] = if z > (q - 1) / 2 { (z - q) as i32 } else { z as i32 };
        i += 1;
    }
    zetas
}

/// Forward NTT, in place. Output is in bit-reversed order.
///
/// No reductions are done; for inputs below 2^23 in absolute value the
/// output stays below 9q.
pub fn ntt(a: &mut [i32; N]) {
    let mut k = 0;
    let mut len = 128;
    while len > 0 {
        for start in (0..N).step_by(2 * len) {
            k += 1;
            let zeta = ZETAS[k];
            for j in start..start + len {
                let t = montgomery_mul(zeta, a[j + len]);
                a[j + len] = a[j] - t;
                a[j] += t;
            }
        }
        len >>= 1;
    }
}

/// Inverse NTT, in place.
///
/// Inputs must be below q in absolute value; outputs are as well. When the
/// input is a product of two Montgomery multiplications' worth of scaling
/// (a pointwise product of two transforms), the output is in normal form.
pub fn inv_ntt(a: &mut [i32; N]) {
    let mut k = N;
    let mut len = 1;
    while len < N {
        for start in (0..N).step_by(2 * len) {
            k -= 1;
            let zeta = -ZETAS[k];
            for j in start..start + len {
                let t = a[j];
                a[j] = t + a[j + len];
                a[j + len] = montgomery_mul(zeta, t - a[j + len]);
            }
        }
        len <<= 1;
    }
    for c in a.iter_mut() {
        *c = montgomery_mul(INV_N_MONT, *c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce::freeze;

    #[test]
    fn test_zetas_table() {
        assert_eq!(ZETAS[1], 25847);
        assert_eq!(ZETAS[2], -2_608_894);
        assert_eq!(ZETAS[3], -518_909);
        assert_eq!(ZETAS[254], -846_154);
        assert_eq!(ZETAS[255], 1_976_782);
    }

    #[test]
    fn test_zeta_order() {
        let q = Q as i64;
        let mut z = 1i64;
        for _ in 0..256 {
            z = z * ZETA as i64 % q;
        }
        assert_eq!(z, q - 1);
    }

    #[test]
    fn test_roundtrip_scales_by_mont() {
        let mut a = [0i32; N];
        for (i, c) in a.iter_mut().enumerate() {
            *c = (i as i32 * 7919) % Q;
        }
        let original = a;
        ntt(&mut a);
        for c in a.iter_mut() {
            *c = crate::reduce::reduce32(*c);
        }
        inv_ntt(&mut a);
        // Without a pointwise product in between, one factor of 2^32 remains.
        for i in 0..N {
            let expected = (original[i] as i64 * MONT_R as i64 % Q as i64) as i32;
            assert_eq!(freeze(a[i]), expected, "coefficient {i}");
        }
    }

    #[test]
    fn test_multiplication_matches_schoolbook() {
        let mut a = [0i32; N];
        let mut b = [0i32; N];
        a[1] = 1; // X
        b[N - 1] = 3; // 3X^255
        ntt(&mut a);
        ntt(&mut b);
        let mut c = [0i32; N];
        for i in 0..N {
            c[i] = montgomery_mul(a[i], b[i]);
        }
        inv_ntt(&mut c);
        // X * 3X^255 = 3X^256 = -3
        assert_eq!(freeze(c[0]), Q - 3);
        assert!(c[1..].iter().all(|&x| freeze(x) == 0));
    }
}
