//! Module-lattice signature engine with seed binding
//!
//! A pure Rust signature engine with ML-DSA-65 dimensions and a 128-byte
//! challenge seed, usable as a [`SignatureEngine`] by the `sumlith` façade.
//!
//! Besides ordinary key generation it can pin the public matrix seed `rho`
//! to a caller-chosen 32-byte value, so that anyone holding the seed can
//! check that a public key was derived from it.
//!
//! | Item | Size |
//! |------|------|
//! | Public key | 1,952 bytes |
//! | Private key | 4,032 bytes |
//! | Signature | 3,389 bytes |
//!
//! Signing is deterministic.
//!
//! # Example
//!
//! ```
//! use sumlith_core::sizes::{PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE, SIG_SIZE};
//! use sumlith_core::SignatureEngine;
//! use sumlith_dsa::Dsa65;
//!
//! let mut rng = rand::rng();
//! let mut pk = [0u8; PUBLIC_KEY_SIZE];
//! let mut sk = [0u8; PRIVATE_KEY_SIZE];
//! Dsa65::keypair_from_seed(&mut pk, &mut sk, &[7u8; 32], &mut rng);
//! assert_eq!(&pk[..32], &[7u8; 32]);
//!
//! let mut sig = [0u8; SIG_SIZE];
//! assert_eq!(Dsa65::sign(&mut sig, b"hello", &sk), SIG_SIZE);
//! assert!(Dsa65::verify(&sig, b"hello", &pk));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::module_name_repetitions,
    clippy::needless_range_loop
)]

mod hash;
mod ntt;
mod packing;
mod params;
mod poly;
mod reduce;
mod rounding;
mod sample;
mod sign;

use rand_core::CryptoRng;
use sumlith_core::sizes::{PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE, SEED_SIZE, SIG_SIZE};
use sumlith_core::SignatureEngine;
use zeroize::Zeroizing;

pub use params::MAX_SIGN_ATTEMPTS;

/// The bundled signature engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dsa65;

impl Dsa65 {
    /// Key pair from an explicit 32-byte `xi` instead of an RNG.
    ///
    /// Same `xi`, same keys. Meant for reproducible test vectors.
    pub fn keypair_from_xi(
        pk: &mut [u8; PUBLIC_KEY_SIZE],
        sk: &mut [u8; PRIVATE_KEY_SIZE],
        xi: &[u8; SEED_SIZE],
    ) {
        sign::keypair(pk, sk, xi);
    }

    /// Seeded key pair from an explicit 32-byte `xi`.
    pub fn keypair_from_seed_and_xi(
        pk: &mut [u8; PUBLIC_KEY_SIZE],
        sk: &mut [u8; PRIVATE_KEY_SIZE],
        seed: &[u8; SEED_SIZE],
        xi: &[u8; SEED_SIZE],
    ) {
        sign::keypair_with_rho(pk, sk, seed, xi);
    }
}

impl SignatureEngine for Dsa65 {
    fn keypair(
        pk: &mut [u8; PUBLIC_KEY_SIZE],
        sk: &mut [u8; PRIVATE_KEY_SIZE],
        rng: &mut impl CryptoRng,
    ) {
        let mut xi = Zeroizing::new([0u8; SEED_SIZE]);
        rng.fill_bytes(&mut xi[..]);
        sign::keypair(pk, sk, &xi);
    }

    fn keypair_from_seed(
        pk: &mut [u8; PUBLIC_KEY_SIZE],
        sk: &mut [u8; PRIVATE_KEY_SIZE],
        seed: &[u8; SEED_SIZE],
        rng: &mut impl CryptoRng,
    ) {
        let mut xi = Zeroizing::new([0u8; SEED_SIZE]);
        rng.fill_bytes(&mut xi[..]);
        sign::keypair_with_rho(pk, sk, seed, &xi);
    }

    fn sign(sig: &mut [u8; SIG_SIZE], message: &[u8], sk: &[u8; PRIVATE_KEY_SIZE]) -> usize {
        match sign::sign(sig, message, sk) {
            Some(_) => SIG_SIZE,
            None => 0,
        }
    }

    fn verify(sig: &[u8], message: &[u8], pk: &[u8; PUBLIC_KEY_SIZE]) -> bool {
        sign::verify(sig, message, pk)
    }
}
