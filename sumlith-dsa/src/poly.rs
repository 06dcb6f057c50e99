//! Polynomials in R_q = Z_q[X] / (X^256 + 1), vectors of them, and the
//! public matrix.

use crate::ntt::{inv_ntt, ntt};
use crate::params::{K, L, N};
use crate::reduce::{center, freeze, montgomery_mul, reduce32};
use subtle::{Choice, ConstantTimeLess};
use zeroize::Zeroize;

/// A polynomial with 256 coefficients.
#[derive(Clone, Zeroize)]
pub struct Poly {
    pub coeffs: [i32; N],
}

impl Default for Poly {
    fn default() -> Self {
        Self::zero()
    }
}

impl Poly {
    #[inline]
    pub const fn zero() -> Self {
        Self { coeffs: [0; N] }
    }

    pub fn ntt(&mut self) {
        ntt(&mut self.coeffs);
    }

    pub fn inv_ntt(&mut self) {
        inv_ntt(&mut self.coeffs);
    }

    pub fn reduce(&mut self) {
        self.map(reduce32);
    }

    pub fn freeze(&mut self) {
        self.map(freeze);
    }

    pub fn center(&mut self) {
        self.map(center);
    }

    /// Apply `f` to every coefficient.
    #[inline]
    pub fn map(&mut self, f: impl Fn(i32) -> i32) {
        for c in &mut self.coeffs {
            *c = f(*c);
        }
    }

    pub fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a += b;
        }
    }

    pub fn sub_assign(&mut self, other: &Self) {
        for (a, b) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *a -= b;
        }
    }

    /// Pointwise Montgomery product of two transforms.
    #[must_use]
    pub fn pointwise_mul(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        for i in 0..N {
            r.coeffs[i] = montgomery_mul(self.coeffs[i], other.coeffs[i]);
        }
        r
    }

    /// self += a * b, pointwise.
    pub fn pointwise_mul_acc(&mut self, a: &Self, b: &Self) {
        for i in 0..N {
            self.coeffs[i] += montgomery_mul(a.coeffs[i], b.coeffs[i]);
        }
    }

    /// Product with `other` in the normal domain, centered.
    ///
    /// Both operands must already be transforms.
    #[must_use]
    pub fn mul_centered(&self, other: &Self) -> Self {
        let mut r = self.pointwise_mul(other);
        r.inv_ntt();
        r.center();
        r
    }

    /// `Choice(1)` iff every coefficient satisfies |c| < bound.
    ///
    /// Coefficients must be centered.
    pub fn norm_below(&self, bound: i32) -> Choice {
        debug_assert!(bound > 0);
        let mut ok = Choice::from(1u8);
        for &c in &self.coeffs {
            let sign = c >> 31;
            let abs = ((c ^ sign) - sign) as u32;
            ok &= abs.ct_lt(&(bound as u32));
        }
        ok
    }
}

/// Vector of `M` polynomials.
#[derive(Clone, Zeroize)]
pub struct PolyVec<const M: usize> {
    pub polys: [Poly; M],
}

/// Length-L vector (s1, y, z).
pub type VecL = PolyVec<L>;

/// Length-K vector (s2, t, w, hints).
pub type VecK = PolyVec<K>;

impl<const M: usize> Default for PolyVec<M> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const M: usize> PolyVec<M> {
    pub fn zero() -> Self {
        Self {
            polys: core::array::from_fn(|_| Poly::zero()),
        }
    }

    pub fn ntt(&mut self) {
        self.polys.iter_mut().for_each(Poly::ntt);
    }

    pub fn inv_ntt(&mut self) {
        self.polys.iter_mut().for_each(Poly::inv_ntt);
    }

    pub fn freeze(&mut self) {
        self.polys.iter_mut().for_each(Poly::freeze);
    }

    pub fn center(&mut self) {
        self.polys.iter_mut().for_each(Poly::center);
    }

    pub fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(other.polys.iter()) {
            a.add_assign(b);
        }
    }

    pub fn sub_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(other.polys.iter()) {
            a.sub_assign(b);
        }
    }

    /// Transform of every polynomial, leaving `self` untouched.
    #[must_use]
    pub fn to_ntt(&self) -> Self {
        let mut r = self.clone();
        r.ntt();
        r
    }

    /// Multiply each entry by the transformed scalar `c_hat`; result is
    /// centered in the normal domain.
    #[must_use]
    pub fn scale_centered(&self, c_hat: &Poly) -> Self {
        Self {
            polys: core::array::from_fn(|i| c_hat.mul_centered(&self.polys[i])),
        }
    }

    pub fn norm_below(&self, bound: i32) -> Choice {
        self.polys
            .iter()
            .fold(Choice::from(1u8), |ok, p| ok & p.norm_below(bound))
    }
}

/// The public K x L matrix A, stored in the NTT domain.
pub struct Matrix {
    pub rows: [VecL; K],
}

impl Matrix {
    /// A * v for `v` in the NTT domain. Output is reduced but still in the
    /// NTT domain.
    pub fn mul_vec(&self, v: &VecL) -> VecK {
        let mut out = VecK::zero();
        for (row, acc) in self.rows.iter().zip(out.polys.iter_mut()) {
            for (a, b) in row.polys.iter().zip(v.polys.iter()) {
                acc.pointwise_mul_acc(a, b);
            }
            acc.reduce();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Q;

    #[test]
    fn test_norm_below() {
        let mut p = Poly::zero();
        assert!(bool::from(p.norm_below(1)));

        p.coeffs[0] = 100;
        assert!(bool::from(p.norm_below(101)));
        assert!(!bool::from(p.norm_below(100)));

        p.coeffs[0] = 0;
        p.coeffs[200] = -100;
        assert!(bool::from(p.norm_below(101)));
        assert!(!bool::from(p.norm_below(100)));
    }

    #[test]
    fn test_vec_norm_checks_every_entry() {
        let mut v = VecK::zero();
        assert!(bool::from(v.norm_below(1)));
        v.polys[K - 1].coeffs[N - 1] = -7;
        assert!(!bool::from(v.norm_below(7)));
        assert!(bool::from(v.norm_below(8)));
    }

    #[test]
    fn test_mul_centered_small_product() {
        // (1 + X) * (1 - X) = 1 - X^2
        let mut a = Poly::zero();
        a.coeffs[0] = 1;
        a.coeffs[1] = 1;
        let mut b = Poly::zero();
        b.coeffs[0] = 1;
        b.coeffs[1] = -1;
        a.ntt();
        b.ntt();
        let r = a.mul_centered(&b);
        assert_eq!(r.coeffs[0], 1);
        assert_eq!(r.coeffs[1], 0);
        assert_eq!(r.coeffs[2], -1);
        assert!(r.coeffs[3..].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_freeze_and_center() {
        let mut p = Poly::zero();
        p.coeffs[0] = -1;
        p.coeffs[1] = Q + 3;
        p.freeze();
        assert_eq!(p.coeffs[0], Q - 1);
        assert_eq!(p.coeffs[1], 3);
        p.center();
        assert_eq!(p.coeffs[0], -1);
        assert_eq!(p.coeffs[1], 3);
    }
}
