//! Byte encodings of polynomials, keys and signatures.
//!
//! Every polynomial encoding is a little-endian bit stream of fixed-width
//! fields, one per coefficient, after an affine map into [0, 2^bits).

use crate::params::{
    C_TILDE_BYTES, CRH_BYTES, D, ETA, ETA_BITS, GAMMA1, K, L, N, OMEGA, PK_BYTES,
    POLY_ETA_PACKED_BYTES, POLY_T0_PACKED_BYTES, POLY_W1_PACKED_BYTES, POLY_Z_PACKED_BYTES,
    SEED_BYTES, SIG_BYTES, SK_BYTES, T0_BITS, T1_BITS, W1_BITS, Z_BITS,
};
use crate::poly::{Poly, PolyVec, VecK, VecL};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Offset that maps a t0 coefficient in (-2^(d-1), 2^(d-1)] into [0, 2^d).
const T0_OFFSET: i32 = 1 << (D - 1);

/// Write `poly` into `out` with `bits` bits per coefficient.
///
/// `map` must send every coefficient into [0, 2^bits).
pub fn pack_bits(poly: &Poly, bits: u32, out: &mut [u8], map: impl Fn(i32) -> i32) {
    debug_assert_eq!(out.len(), N * bits as usize / 8);
    let mut acc: u64 = 0;
    let mut acc_bits = 0;
    let mut pos = 0;
    for &c in &poly.coeffs {
        let v = map(c) as u32;
        debug_assert!(u64::from(v) < 1 << bits);
        acc |= u64::from(v) << acc_bits;
        acc_bits += bits;
        while acc_bits >= 8 {
            out[pos] = acc as u8;
            pos += 1;
            acc >>= 8;
            acc_bits -= 8;
        }
    }
}

/// Read `bits`-wide fields from `bytes` into `poly`, passing each through
/// `map`.
pub fn unpack_bits(bytes: &[u8], bits: u32, poly: &mut Poly, map: impl Fn(i32) -> i32) {
    debug_assert_eq!(bytes.len(), N * bits as usize / 8);
    let mask = (1u64 << bits) - 1;
    let mut acc: u64 = 0;
    let mut acc_bits = 0;
    let mut idx = 0;
    for &b in bytes {
        acc |= u64::from(b) << acc_bits;
        acc_bits += 8;
        while acc_bits >= bits {
            poly.coeffs[idx] = map((acc & mask) as i32);
            idx += 1;
            acc >>= bits;
            acc_bits -= bits;
        }
    }
}

fn pack_vec<const M: usize>(
    v: &PolyVec<M>,
    bits: u32,
    out: &mut [u8],
    map: impl Fn(i32) -> i32 + Copy,
) {
    let width = N * bits as usize / 8;
    for (poly, chunk) in v.polys.iter().zip(out.chunks_exact_mut(width)) {
        pack_bits(poly, bits, chunk, map);
    }
}

fn unpack_vec<const M: usize>(
    bytes: &[u8],
    bits: u32,
    map: impl Fn(i32) -> i32 + Copy,
) -> PolyVec<M> {
    let width = N * bits as usize / 8;
    let mut v = PolyVec::<M>::zero();
    for (poly, chunk) in v.polys.iter_mut().zip(bytes.chunks_exact(width)) {
        unpack_bits(chunk, bits, poly, map);
    }
    v
}

/// w1Encode: high parts in [0, 15], four bits each.
pub fn pack_w1(w1: &VecK, out: &mut [u8; K * POLY_W1_PACKED_BYTES]) {
    pack_vec(w1, W1_BITS, out, |c| c);
}

// ---------------------------------------------------------------------------
// Public key: rho || t1
// ---------------------------------------------------------------------------

pub fn pack_public_key(pk: &mut [u8; PK_BYTES], rho: &[u8; SEED_BYTES], t1: &VecK) {
    let (rho_out, t1_out) = pk.split_at_mut(SEED_BYTES);
    rho_out.copy_from_slice(rho);
    pack_vec(t1, T1_BITS, t1_out, |c| c);
}

pub fn unpack_public_key(pk: &[u8; PK_BYTES]) -> ([u8; SEED_BYTES], VecK) {
    let mut rho = [0u8; SEED_BYTES];
    rho.copy_from_slice(&pk[..SEED_BYTES]);
    let t1 = unpack_vec(&pk[SEED_BYTES..], T1_BITS, |c| c);
    (rho, t1)
}

// ---------------------------------------------------------------------------
// Secret key: rho || key || tr || s1 || s2 || t0
// ---------------------------------------------------------------------------

/// Decoded secret key. Wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    pub rho: [u8; SEED_BYTES],
    pub key: [u8; SEED_BYTES],
    pub tr: [u8; CRH_BYTES],
    pub s1: VecL,
    pub s2: VecK,
    pub t0: VecK,
}

const S1_OFFSET: usize = 2 * SEED_BYTES + CRH_BYTES;
const S2_OFFSET: usize = S1_OFFSET + L * POLY_ETA_PACKED_BYTES;
const T0_SK_OFFSET: usize = S2_OFFSET + K * POLY_ETA_PACKED_BYTES;

const _: () = assert!(T0_SK_OFFSET + K * POLY_T0_PACKED_BYTES == SK_BYTES);

impl SecretKey {
    pub fn pack(&self, sk: &mut [u8; SK_BYTES]) {
        sk[..SEED_BYTES].copy_from_slice(&self.rho);
        sk[SEED_BYTES..2 * SEED_BYTES].copy_from_slice(&self.key);
        sk[2 * SEED_BYTES..S1_OFFSET].copy_from_slice(&self.tr);
        pack_vec(&self.s1, ETA_BITS, &mut sk[S1_OFFSET..S2_OFFSET], |c| ETA - c);
        pack_vec(&self.s2, ETA_BITS, &mut sk[S2_OFFSET..T0_SK_OFFSET], |c| ETA - c);
        pack_vec(&self.t0, T0_BITS, &mut sk[T0_SK_OFFSET..], |c| T0_OFFSET - c);
    }

    /// Decode without validating coefficient ranges; a private key is
    /// trusted input.
    pub fn unpack(sk: &[u8; SK_BYTES]) -> Self {
        let mut out = Self {
            rho: [0u8; SEED_BYTES],
            key: [0u8; SEED_BYTES],
            tr: [0u8; CRH_BYTES],
            s1: unpack_vec(&sk[S1_OFFSET..S2_OFFSET], ETA_BITS, |t| ETA - t),
            s2: unpack_vec(&sk[S2_OFFSET..T0_SK_OFFSET], ETA_BITS, |t| ETA - t),
            t0: unpack_vec(&sk[T0_SK_OFFSET..], T0_BITS, |t| T0_OFFSET - t),
        };
        out.rho.copy_from_slice(&sk[..SEED_BYTES]);
        out.key.copy_from_slice(&sk[SEED_BYTES..2 * SEED_BYTES]);
        out.tr.copy_from_slice(&sk[2 * SEED_BYTES..S1_OFFSET]);
        out
    }
}

// ---------------------------------------------------------------------------
// Signature: c~ || z || h
// ---------------------------------------------------------------------------

const Z_OFFSET: usize = C_TILDE_BYTES;
const H_OFFSET: usize = Z_OFFSET + L * POLY_Z_PACKED_BYTES;

const _: () = assert!(H_OFFSET + OMEGA + K == SIG_BYTES);

/// Encode a signature. `hints` holds 0/1 flags with at most OMEGA ones.
pub fn pack_signature(
    sig: &mut [u8; SIG_BYTES],
    c_tilde: &[u8; C_TILDE_BYTES],
    z: &VecL,
    hints: &VecK,
) {
    sig[..Z_OFFSET].copy_from_slice(c_tilde);
    pack_vec(z, Z_BITS, &mut sig[Z_OFFSET..H_OFFSET], |c| GAMMA1 - c);

    let h = &mut sig[H_OFFSET..];
    h.fill(0);
    let mut count = 0;
    for (i, poly) in hints.polys.iter().enumerate() {
        for (j, &flag) in poly.coeffs.iter().enumerate() {
            if flag != 0 {
                h[count] = j as u8;
                count += 1;
            }
        }
        h[OMEGA + i] = count as u8;
    }
}

/// Decoded signature.
pub struct Signature {
    pub c_tilde: [u8; C_TILDE_BYTES],
    pub z: VecL,
    pub hints: VecK,
}

/// Decode a signature, rejecting non-canonical hint encodings.
///
/// Within each polynomial the hint positions must be strictly increasing,
/// the running counts must be non-decreasing and at most OMEGA, and unused
/// position slots must be zero. Anything else would make signatures
/// malleable.
pub fn unpack_signature(sig: &[u8; SIG_BYTES]) -> Option<Signature> {
    let mut c_tilde = [0u8; C_TILDE_BYTES];
    c_tilde.copy_from_slice(&sig[..Z_OFFSET]);
    let z = unpack_vec(&sig[Z_OFFSET..H_OFFSET], Z_BITS, |t| GAMMA1 - t);

    let h = &sig[H_OFFSET..];
    let mut hints = VecK::zero();
    let mut start = 0;
    for (i, poly) in hints.polys.iter_mut().enumerate() {
        let end = usize::from(h[OMEGA + i]);
        if end < start || end > OMEGA {
            return None;
        }
        for idx in start..end {
            if idx > start && h[idx] <= h[idx - 1] {
                return None;
            }
            poly.coeffs[usize::from(h[idx])] = 1;
        }
        start = end;
    }
    if h[start..OMEGA].iter().any(|&b| b != 0) {
        return None;
    }

    Some(Signature { c_tilde, z, hints })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::POLY_T1_PACKED_BYTES;

    fn sample_poly(lo: i32, hi: i32, salt: i32) -> Poly {
        let mut p = Poly::zero();
        let span = hi - lo + 1;
        for (i, c) in p.coeffs.iter_mut().enumerate() {
            *c = lo + ((i as i32 * 7919 + salt * 104_729).rem_euclid(span));
        }
        p
    }

    #[test]
    fn test_pack_bits_layout() {
        // 10-bit fields: 0x3FF then 0x001 -> bytes ff 07 00 ...
        let mut p = Poly::zero();
        p.coeffs[0] = 0x3FF;
        p.coeffs[1] = 0x001;
        let mut out = [0u8; POLY_T1_PACKED_BYTES];
        pack_bits(&p, T1_BITS, &mut out, |c| c);
        assert_eq!(&out[..3], &[0xFF, 0x07, 0x00]);
    }

    #[test]
    fn test_t0_codec_extremes() {
        let mut p = Poly::zero();
        p.coeffs[0] = -(1 << 12) + 1;
        p.coeffs[1] = 1 << 12;
        let mut out = [0u8; POLY_T0_PACKED_BYTES];
        pack_bits(&p, T0_BITS, &mut out, |c| T0_OFFSET - c);
        let mut back = Poly::zero();
        unpack_bits(&out, T0_BITS, &mut back, |t| T0_OFFSET - t);
        assert_eq!(back.coeffs, p.coeffs);
    }

    #[test]
    fn test_secret_key_codec() {
        let sk = SecretKey {
            rho: [1u8; SEED_BYTES],
            key: [2u8; SEED_BYTES],
            tr: [3u8; CRH_BYTES],
            s1: VecL {
                polys: core::array::from_fn(|i| sample_poly(-ETA, ETA, i as i32)),
            },
            s2: VecK {
                polys: core::array::from_fn(|i| sample_poly(-ETA, ETA, 10 + i as i32)),
            },
            t0: VecK {
                polys: core::array::from_fn(|i| sample_poly(-(1 << 12) + 1, 1 << 12, i as i32)),
            },
        };
        let mut bytes = [0u8; SK_BYTES];
        sk.pack(&mut bytes);
        let back = SecretKey::unpack(&bytes);
        assert_eq!(back.rho, sk.rho);
        assert_eq!(back.key, sk.key);
        assert_eq!(back.tr, sk.tr);
        for (a, b) in back.s1.polys.iter().zip(sk.s1.polys.iter()) {
            assert_eq!(a.coeffs, b.coeffs);
        }
        for (a, b) in back.t0.polys.iter().zip(sk.t0.polys.iter()) {
            assert_eq!(a.coeffs, b.coeffs);
        }
    }

    #[test]
    fn test_public_key_starts_with_rho() {
        let rho = [0xABu8; SEED_BYTES];
        let t1 = VecK {
            polys: core::array::from_fn(|i| sample_poly(0, 1023, i as i32)),
        };
        let mut pk = [0u8; PK_BYTES];
        pack_public_key(&mut pk, &rho, &t1);
        assert_eq!(&pk[..SEED_BYTES], &rho);
        let (rho_back, t1_back) = unpack_public_key(&pk);
        assert_eq!(rho_back, rho);
        assert_eq!(t1_back.polys[5].coeffs, t1.polys[5].coeffs);
    }

    fn signature_with_hints(positions: &[(usize, usize)]) -> [u8; SIG_BYTES] {
        let mut hints = VecK::zero();
        for &(i, j) in positions {
            hints.polys[i].coeffs[j] = 1;
        }
        let mut sig = [0u8; SIG_BYTES];
        pack_signature(&mut sig, &[7u8; C_TILDE_BYTES], &VecL::zero(), &hints);
        sig
    }

    #[test]
    fn test_signature_hints_decode() {
        let sig = signature_with_hints(&[(0, 3), (0, 200), (2, 0), (5, 255)]);
        let decoded = unpack_signature(&sig).expect("canonical");
        assert_eq!(decoded.c_tilde, [7u8; C_TILDE_BYTES]);
        assert_eq!(decoded.hints.polys[0].coeffs[3], 1);
        assert_eq!(decoded.hints.polys[0].coeffs[200], 1);
        assert_eq!(decoded.hints.polys[2].coeffs[0], 1);
        assert_eq!(decoded.hints.polys[5].coeffs[255], 1);
        let total: i32 = decoded.hints.polys.iter().flat_map(|p| p.coeffs.iter()).sum();
        assert_eq!(total, 4);
        assert!(decoded.z.polys.iter().all(|p| p.coeffs.iter().all(|&c| c == 0)));
    }

    #[test]
    fn test_signature_rejects_unordered_hints() {
        let mut sig = signature_with_hints(&[(0, 3), (0, 200)]);
        sig.swap(H_OFFSET, H_OFFSET + 1);
        assert!(unpack_signature(&sig).is_none());
    }

    #[test]
    fn test_signature_rejects_duplicate_hints() {
        let mut sig = signature_with_hints(&[(0, 3), (0, 200)]);
        sig[H_OFFSET + 1] = 3;
        assert!(unpack_signature(&sig).is_none());
    }

    #[test]
    fn test_signature_rejects_dirty_padding() {
        let mut sig = signature_with_hints(&[(1, 9)]);
        sig[H_OFFSET + OMEGA - 1] = 1;
        assert!(unpack_signature(&sig).is_none());
    }

    #[test]
    fn test_signature_rejects_bad_counts() {
        let mut sig = signature_with_hints(&[(1, 9), (1, 10)]);
        // decreasing running count
        sig[H_OFFSET + OMEGA + 2] = 1;
        assert!(unpack_signature(&sig).is_none());

        let mut sig = signature_with_hints(&[]);
        sig[H_OFFSET + OMEGA + K - 1] = OMEGA as u8 + 1;
        assert!(unpack_signature(&sig).is_none());
    }
}
