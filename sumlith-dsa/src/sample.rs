//! Sampling: ExpandA, ExpandS, ExpandMask and SampleInBall.

use sha3::digest::XofReader;

use crate::hash::{shake128_stream, shake256_stream};
use crate::packing::unpack_bits;
use crate::params::{
    C_TILDE_BYTES, CRH_BYTES, ETA, GAMMA1, L, N, POLY_Z_PACKED_BYTES, Q, SEED_BYTES, TAU, Z_BITS,
};
use crate::poly::{Matrix, Poly, VecK, VecL};
use zeroize::Zeroize;

/// SHAKE128 block size; the matrix sampler squeezes whole blocks.
const SHAKE128_RATE: usize = 168;

/// SHAKE256 block size.
const SHAKE256_RATE: usize = 136;

/// Uniform polynomial in the NTT domain by rejection on 23-bit values.
fn sample_ntt(rho: &[u8; SEED_BYTES], i: u8, j: u8) -> Poly {
    let mut xof = shake128_stream(rho, i, j);
    let mut poly = Poly::zero();
    let mut buf = [0u8; SHAKE128_RATE];
    let mut ctr = 0;

    while ctr < N {
        xof.read(&mut buf);
        for chunk in buf.chunks_exact(3) {
            let t = i32::from(chunk[0])
                | (i32::from(chunk[1]) << 8)
                | (i32::from(chunk[2] & 0x7F) << 16);
            if t < Q {
                poly.coeffs[ctr] = t;
                ctr += 1;
                if ctr == N {
                    break;
                }
            }
        }
    }
    poly
}

/// Expand the public matrix from `rho`, directly in the NTT domain.
pub fn expand_a(rho: &[u8; SEED_BYTES]) -> Matrix {
    Matrix {
        rows: core::array::from_fn(|i| VecL {
            polys: core::array::from_fn(|j| sample_ntt(rho, i as u8, j as u8)),
        }),
    }
}

/// Polynomial with coefficients in [-4, 4], from nibbles below 9.
fn sample_eta(rho_prime: &[u8; CRH_BYTES], nonce: u16) -> Poly {
    let mut xof = shake256_stream(&[rho_prime, &nonce.to_le_bytes()]);
    let mut poly = Poly::zero();
    let mut buf = [0u8; SHAKE256_RATE];
    let mut ctr = 0;

    'squeeze: loop {
        xof.read(&mut buf);
        for &byte in &buf {
            for nibble in [byte & 0x0F, byte >> 4] {
                if i32::from(nibble) <= 2 * ETA {
                    poly.coeffs[ctr] = ETA - i32::from(nibble);
                    ctr += 1;
                    if ctr == N {
                        break 'squeeze;
                    }
                }
            }
        }
    }
    poly
}

/// Secret vectors s1 (nonces 0..L) and s2 (nonces L..L+K).
pub fn expand_s(rho_prime: &[u8; CRH_BYTES]) -> (VecL, VecK) {
    let s1 = VecL {
        polys: core::array::from_fn(|i| sample_eta(rho_prime, i as u16)),
    };
    let s2 = VecK {
        polys: core::array::from_fn(|i| sample_eta(rho_prime, (L + i) as u16)),
    };
    (s1, s2)
}

/// Masking vector y for rejection round `kappa`, coefficients in
/// (-gamma1, gamma1].
pub fn expand_mask(rho_prime: &[u8; CRH_BYTES], kappa: u16) -> VecL {
    let mut y = VecL::zero();
    let mut buf = [0u8; POLY_Z_PACKED_BYTES];
    for (i, poly) in y.polys.iter_mut().enumerate() {
        let nonce = kappa * L as u16 + i as u16;
        shake256_stream(&[rho_prime, &nonce.to_le_bytes()]).read(&mut buf);
        unpack_bits(&buf, Z_BITS, poly, |t| GAMMA1 - t);
    }
    buf.zeroize();
    y
}

/// Challenge polynomial with exactly TAU coefficients in {-1, 1}.
pub fn sample_in_ball(c_tilde: &[u8; C_TILDE_BYTES]) -> Poly {
    let mut xof = shake256_stream(&[c_tilde]);
    let mut sign_bytes = [0u8; 8];
    xof.read(&mut sign_bytes);
    let mut signs = u64::from_le_bytes(sign_bytes);

    let mut c = Poly::zero();
    let mut byte = [0u8; 1];
    for i in N - TAU..N {
        let j = loop {
            xof.read(&mut byte);
            let j = usize::from(byte[0]);
            if j <= i {
                break j;
            }
        };
        c.coeffs[i] = c.coeffs[j];
        c.coeffs[j] = 1 - 2 * (signs & 1) as i32;
        signs >>= 1;
    }
    c
}
