//! Key generation, signing and verification.
//!
//! Keys are generated either from a random `xi` alone or with `rho` pinned
//! to a caller-chosen seed. Signing is deterministic: the per-signature
//! randomness is fixed to zero, so the same key and message always give the
//! same signature.

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::hash::{challenge_seed, hash_public_key, message_representative, shake256};
use crate::packing::{
    pack_public_key, pack_signature, pack_w1, unpack_public_key, unpack_signature, SecretKey,
};
use crate::params::{
    BETA, CRH_BYTES, D, GAMMA1, GAMMA2, K, L, MAX_SIGN_ATTEMPTS, N, OMEGA,
    PK_BYTES, POLY_W1_PACKED_BYTES, SEED_BYTES, SIG_BYTES, SK_BYTES,
};
use crate::poly::{Matrix, VecK, VecL};
use crate::reduce::freeze;
use crate::rounding::{highbits, lowbits, make_hint, power2round, use_hint};
use crate::sample::{expand_a, expand_mask, expand_s, sample_in_ball};

// ---------------------------------------------------------------------------
// Key generation
// ---------------------------------------------------------------------------

/// Derive a key pair from its three seeds.
fn keygen_internal(
    pk: &mut [u8; PK_BYTES],
    sk: &mut [u8; SK_BYTES],
    rho: &[u8; SEED_BYTES],
    rho_prime: &[u8; CRH_BYTES],
    key: &[u8; SEED_BYTES],
) {
    let a = expand_a(rho);
    let (s1, s2) = expand_s(rho_prime);

    // t = A * s1 + s2
    let s1_hat = Zeroizing::new(s1.to_ntt());
    let mut t = Zeroizing::new(a.mul_vec(&s1_hat));
    t.inv_ntt();
    t.add_assign(&s2);
    t.freeze();

    let mut t1 = VecK::zero();
    let mut t0 = VecK::zero();
    for i in 0..K {
        for j in 0..N {
            let (hi, lo) = power2round(t.polys[i].coeffs[j]);
            t1.polys[i].coeffs[j] = hi;
            t0.polys[i].coeffs[j] = lo;
        }
    }

    pack_public_key(pk, rho, &t1);

    let secret = SecretKey {
        rho: *rho,
        key: *key,
        tr: hash_public_key(pk),
        s1,
        s2,
        t0,
    };
    secret.pack(sk);
}

/// Key pair from a random 32-byte `xi`.
///
/// (rho, rho', key) = H(xi || k || l, 128)
pub fn keypair(pk: &mut [u8; PK_BYTES], sk: &mut [u8; SK_BYTES], xi: &[u8; SEED_BYTES]) {
    let mut expanded = Zeroizing::new([0u8; 2 * SEED_BYTES + CRH_BYTES]);
    shake256(&[xi, &[K as u8, L as u8]], &mut expanded[..]);

    let mut rho = [0u8; SEED_BYTES];
    let mut rho_prime = Zeroizing::new([0u8; CRH_BYTES]);
    let mut key = Zeroizing::new([0u8; SEED_BYTES]);
    rho.copy_from_slice(&expanded[..SEED_BYTES]);
    rho_prime.copy_from_slice(&expanded[SEED_BYTES..SEED_BYTES + CRH_BYTES]);
    key.copy_from_slice(&expanded[SEED_BYTES + CRH_BYTES..]);

    keygen_internal(pk, sk, &rho, &rho_prime, &key);
}

/// Key pair whose public matrix seed is `rho`.
///
/// The secret seeds are bound to both `xi` and `rho`:
/// (rho', key) = H(xi || rho || k || l, 96)
pub fn keypair_with_rho(
    pk: &mut [u8; PK_BYTES],
    sk: &mut [u8; SK_BYTES],
    rho: &[u8; SEED_BYTES],
    xi: &[u8; SEED_BYTES],
) {
    let mut expanded = Zeroizing::new([0u8; CRH_BYTES + SEED_BYTES]);
    shake256(&[xi, rho, &[K as u8, L as u8]], &mut expanded[..]);

    let mut rho_prime = Zeroizing::new([0u8; CRH_BYTES]);
    let mut key = Zeroizing::new([0u8; SEED_BYTES]);
    rho_prime.copy_from_slice(&expanded[..CRH_BYTES]);
    key.copy_from_slice(&expanded[CRH_BYTES..]);

    keygen_internal(pk, sk, rho, &rho_prime, &key);
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Secret-key material in the NTT domain, shared by every signing attempt.
struct SigningContext<'a> {
    a: &'a Matrix,
    mu: &'a [u8; CRH_BYTES],
    rho_prime: &'a [u8; CRH_BYTES],
    s1_hat: &'a VecL,
    s2_hat: &'a VecK,
    t0_hat: &'a VecK,
}

impl SigningContext<'_> {
    /// One round of rejection sampling. Writes `sig` and returns `true` if
    /// the candidate passes every bound.
    fn attempt(&self, sig: &mut [u8; SIG_BYTES], kappa: u16) -> bool {
        let y = Zeroizing::new(expand_mask(self.rho_prime, kappa));
        let y_hat = Zeroizing::new(y.to_ntt());

        // w = A * y, w1 = HighBits(w)
        let mut w = Zeroizing::new(self.a.mul_vec(&y_hat));
        w.inv_ntt();
        w.freeze();

        let mut w1 = VecK::zero();
        for (hi, full) in w1.polys.iter_mut().zip(w.polys.iter()) {
            for (h, &c) in hi.coeffs.iter_mut().zip(full.coeffs.iter()) {
                *h = highbits(c);
            }
        }
        let mut w1_packed = [0u8; K * POLY_W1_PACKED_BYTES];
        pack_w1(&w1, &mut w1_packed);
        let c_tilde = challenge_seed(self.mu, &w1_packed);

        let mut c_hat = sample_in_ball(&c_tilde);
        c_hat.ntt();

        // z = y + c * s1
        let cs1 = Zeroizing::new(self.s1_hat.scale_centered(&c_hat));
        let mut z = Zeroizing::new(VecL::clone(&y));
        z.add_assign(&cs1);
        z.center();
        if !bool::from(z.norm_below(GAMMA1 - BETA)) {
            return false;
        }

        // r = w - c * s2, and its low part must stay clear of the rounding edge
        let cs2 = Zeroizing::new(self.s2_hat.scale_centered(&c_hat));
        let mut r = Zeroizing::new(VecK::clone(&w));
        r.sub_assign(&cs2);
        r.freeze();

        let mut r0 = Zeroizing::new(VecK::clone(&r));
        r0.polys.iter_mut().for_each(|p| p.map(lowbits));
        if !bool::from(r0.norm_below(GAMMA2 - BETA)) {
            return false;
        }

        let ct0 = Zeroizing::new(self.t0_hat.scale_centered(&c_hat));
        if !bool::from(ct0.norm_below(GAMMA2)) {
            return false;
        }

        // The verifier sees r + c * t0; hint where that changes the high part.
        let Some(hints) = compute_hints(&r, &ct0) else {
            return false;
        };

        pack_signature(sig, &c_tilde, &z, &hints);
        true
    }
}

/// 0/1 flags marking where HighBits(r + ct0) != HighBits(r), or `None` if
/// more than OMEGA are needed.
fn compute_hints(r: &VecK, ct0: &VecK) -> Option<VecK> {
    let mut hints = VecK::zero();
    let mut count = 0;
    for i in 0..K {
        for j in 0..N {
            let target = r.polys[i].coeffs[j];
            let seen = freeze(target + ct0.polys[i].coeffs[j]);
            if make_hint(seen, target) {
                count += 1;
                if count > OMEGA {
                    return None;
                }
                hints.polys[i].coeffs[j] = 1;
            }
        }
    }
    Some(hints)
}

/// Sign `message` with the packed secret key `sk`.
///
/// Returns the number of rejection rounds used, or `None` if
/// [`MAX_SIGN_ATTEMPTS`] rounds were exhausted; `sig` is then left zeroed.
pub fn sign(sig: &mut [u8; SIG_BYTES], message: &[u8], sk: &[u8; SK_BYTES]) -> Option<u32> {
    let secret = SecretKey::unpack(sk);
    let a = expand_a(&secret.rho);
    let mu = message_representative(&secret.tr, message);

    // rho'' = H(key || rnd || mu, 64) with rnd = 0
    let mut rho_prime = Zeroizing::new([0u8; CRH_BYTES]);
    shake256(&[&secret.key, &[0u8; SEED_BYTES], &mu], &mut rho_prime[..]);

    let s1_hat = Zeroizing::new(secret.s1.to_ntt());
    let s2_hat = Zeroizing::new(secret.s2.to_ntt());
    let t0_hat = Zeroizing::new(secret.t0.to_ntt());

    let ctx = SigningContext {
        a: &a,
        mu: &mu,
        rho_prime: &rho_prime,
        s1_hat: &s1_hat,
        s2_hat: &s2_hat,
        t0_hat: &t0_hat,
    };

    for kappa in 0..MAX_SIGN_ATTEMPTS {
        if ctx.attempt(sig, kappa as u16) {
            tracing::trace!(attempts = kappa + 1, "signature accepted");
            return Some(kappa + 1);
        }
    }

    tracing::warn!(attempts = MAX_SIGN_ATTEMPTS, "rejection sampling exhausted");
    sig.zeroize();
    None
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Verify `sig` over `message` against the packed public key `pk`.
///
/// Any length other than [`SIG_BYTES`] is rejected.
pub fn verify(sig: &[u8], message: &[u8], pk: &[u8; PK_BYTES]) -> bool {
    let Ok(sig) = <&[u8; SIG_BYTES]>::try_from(sig) else {
        return false;
    };
    let Some(decoded) = unpack_signature(sig) else {
        return false;
    };
    if !bool::from(decoded.z.norm_below(GAMMA1 - BETA)) {
        return false;
    }

    let (rho, t1) = unpack_public_key(pk);
    let tr = hash_public_key(pk);
    let mu = message_representative(&tr, message);

    let mut c_hat = sample_in_ball(&decoded.c_tilde);
    c_hat.ntt();

    // w' = A * z - c * t1 * 2^d
    let a = expand_a(&rho);
    let mut w = a.mul_vec(&decoded.z.to_ntt());
    let mut t1_hat = t1;
    t1_hat.polys.iter_mut().for_each(|p| p.map(|c| c << D));
    t1_hat.ntt();
    for (w_poly, t_poly) in w.polys.iter_mut().zip(t1_hat.polys.iter()) {
        w_poly.sub_assign(&c_hat.pointwise_mul(t_poly));
        w_poly.reduce();
    }
    w.inv_ntt();
    w.freeze();

    let mut w1 = VecK::zero();
    for i in 0..K {
        for j in 0..N {
            let hint = decoded.hints.polys[i].coeffs[j] != 0;
            w1.polys[i].coeffs[j] = use_hint(hint, w.polys[i].coeffs[j]);
        }
    }
    let mut w1_packed = [0u8; K * POLY_W1_PACKED_BYTES];
    pack_w1(&w1, &mut w1_packed);
    let c_tilde = challenge_seed(&mu, &w1_packed);

    bool::from(decoded.c_tilde[..].ct_eq(&c_tilde[..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::C_TILDE_BYTES;
    use crate::poly::Poly;

    fn fresh_keys(xi: u8) -> ([u8; PK_BYTES], [u8; SK_BYTES]) {
        let mut pk = [0u8; PK_BYTES];
        let mut sk = [0u8; SK_BYTES];
        keypair(&mut pk, &mut sk, &[xi; SEED_BYTES]);
        (pk, sk)
    }

    #[test]
    fn test_keypair_deterministic() {
        let (pk1, sk1) = fresh_keys(1);
        let (pk2, sk2) = fresh_keys(1);
        assert_eq!(pk1, pk2);
        assert_eq!(sk1, sk2);
        let (pk3, _) = fresh_keys(2);
        assert_ne!(pk1, pk3);
    }

    #[test]
    fn test_secret_key_embeds_rho_and_tr() {
        let (pk, sk) = fresh_keys(3);
        assert_eq!(&sk[..SEED_BYTES], &pk[..SEED_BYTES]);
        assert_eq!(&sk[2 * SEED_BYTES..2 * SEED_BYTES + CRH_BYTES], &hash_public_key(&pk));
    }

    #[test]
    fn test_keypair_with_rho_pins_seed() {
        let rho = [0x42u8; SEED_BYTES];
        let mut pk1 = [0u8; PK_BYTES];
        let mut sk1 = [0u8; SK_BYTES];
        let mut pk2 = [0u8; PK_BYTES];
        let mut sk2 = [0u8; SK_BYTES];
        keypair_with_rho(&mut pk1, &mut sk1, &rho, &[1u8; SEED_BYTES]);
        keypair_with_rho(&mut pk2, &mut sk2, &rho, &[2u8; SEED_BYTES]);

        assert_eq!(&pk1[..SEED_BYTES], &rho);
        assert_eq!(&pk2[..SEED_BYTES], &rho);
        // Same matrix, different secrets.
        assert_ne!(pk1[SEED_BYTES..], pk2[SEED_BYTES..]);
    }

    #[test]
    fn test_sign_verify() {
        let (pk, sk) = fresh_keys(4);
        let mut sig = [0u8; SIG_BYTES];
        let attempts = sign(&mut sig, b"message", &sk).expect("signing succeeds");
        assert!(attempts >= 1);
        assert!(verify(&sig, b"message", &pk));
        assert!(!verify(&sig, b"messagf", &pk));
    }

    #[test]
    fn test_sign_is_deterministic() {
        let (_, sk) = fresh_keys(5);
        let mut a = [0u8; SIG_BYTES];
        let mut b = [0u8; SIG_BYTES];
        sign(&mut a, b"same", &sk).expect("signing succeeds");
        sign(&mut b, b"same", &sk).expect("signing succeeds");
        assert_eq!(a, b);
    }

    #[test]
    fn test_verify_rejects_lengths() {
        let (pk, sk) = fresh_keys(6);
        let mut sig = [0u8; SIG_BYTES];
        sign(&mut sig, b"", &sk).expect("signing succeeds");
        assert!(verify(&sig, b"", &pk));
        assert!(!verify(&sig[..SIG_BYTES - 1], b"", &pk));
        assert!(!verify(&[], b"", &pk));

        let mut long = [0u8; SIG_BYTES + 1];
        long[..SIG_BYTES].copy_from_slice(&sig);
        assert!(!verify(&long, b"", &pk));
    }

    #[test]
    fn test_verify_rejects_oversized_z() {
        let (pk, sk) = fresh_keys(7);
        let mut sig = [0u8; SIG_BYTES];
        sign(&mut sig, b"z", &sk).expect("signing succeeds");
        // A packed field of 0xFFFFF decodes to GAMMA1 - (2^20 - 1), far out of range.
        sig[C_TILDE_BYTES] = 0xFF;
        sig[C_TILDE_BYTES + 1] = 0xFF;
        sig[C_TILDE_BYTES + 2] |= 0x0F;
        assert!(!verify(&sig, b"z", &pk));
    }

    #[test]
    fn test_compute_hints_limit() {
        let r = VecK::zero();
        let mut ct0 = VecK::zero();
        assert!(compute_hints(&r, &ct0).is_some());

        // Pushing many coefficients across a rounding edge needs too many hints.
        let mut r = VecK::zero();
        for p in &mut r.polys {
            p.coeffs.iter_mut().for_each(|c| *c = GAMMA2);
        }
        for p in &mut ct0.polys {
            p.coeffs.iter_mut().for_each(|c| *c = 1);
        }
        assert!(compute_hints(&r, &ct0).is_none());
    }

    #[test]
    fn test_zeroed_poly_is_default() {
        assert_eq!(Poly::default().coeffs, [0; N]);
    }
}
