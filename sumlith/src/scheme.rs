//! Key generation, signing, verification and seed binding.

use core::marker::PhantomData;

use rand_core::CryptoRng;
use subtle::ConstantTimeEq;
use sumlith_core::sizes::{PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE, SEED_SIZE, SIG_SIZE};
use sumlith_core::{Error, Result, SignatureEngine};
use sumlith_dsa::Dsa65;

use crate::keys::{PrivateKey, PublicKey, Seed, Signature};

/// Typed, size-checked signature operations over an engine `E`.
///
/// The scheme holds no state; every method is an associated function and
/// may be called from any number of threads at once.
///
/// # Example
///
/// ```
/// use sumlith::{Dsa65Scheme, Seed};
///
/// let seed = Seed::from([42u8; 32]);
/// let (sk, pk) = Dsa65Scheme::generate_keypair_from_seed(&seed);
///
/// let sig = Dsa65Scheme::sign(&sk, b"payload");
/// Dsa65Scheme::verify(&pk, b"payload", sig.as_bytes()).unwrap();
/// Dsa65Scheme::verify_seed_binding(&pk, &seed).unwrap();
/// ```
///
/// Calls through the bare `SignatureScheme::` path cannot infer `E`; name
/// the engine or use [`Dsa65Scheme`].
pub struct SignatureScheme<E: SignatureEngine = Dsa65>(PhantomData<E>);

/// [`SignatureScheme`] over the bundled [`Dsa65`] engine.
pub type Dsa65Scheme = SignatureScheme<Dsa65>;

impl<E: SignatureEngine> SignatureScheme<E> {
    /// Generate a key pair from the thread-local RNG.
    pub fn generate_keypair() -> (PrivateKey, PublicKey) {
        Self::generate_keypair_with_rng(&mut rand::rng())
    }

    /// Generate a key pair, drawing secret material from `rng`.
    pub fn generate_keypair_with_rng<R: CryptoRng>(rng: &mut R) -> (PrivateKey, PublicKey) {
        let mut sk = PrivateKey([0u8; PRIVATE_KEY_SIZE]);
        let mut pk = PublicKey([0u8; PUBLIC_KEY_SIZE]);
        E::keypair(&mut pk.0, &mut sk.0, rng);
        tracing::trace!("generated key pair");
        (sk, pk)
    }

    /// Generate a key pair whose public key embeds `seed` as `rho`.
    ///
    /// The public key's first [`SEED_SIZE`] bytes equal `seed`, so
    /// [`verify_seed_binding`](Self::verify_seed_binding) accepts the pair.
    /// The private half is still random.
    pub fn generate_keypair_from_seed(seed: &Seed) -> (PrivateKey, PublicKey) {
        Self::generate_keypair_from_seed_with_rng(seed, &mut rand::rng())
    }

    /// Seeded key generation with an explicit `rng`.
    pub fn generate_keypair_from_seed_with_rng<R: CryptoRng>(
        seed: &Seed,
        rng: &mut R,
    ) -> (PrivateKey, PublicKey) {
        let mut sk = PrivateKey([0u8; PRIVATE_KEY_SIZE]);
        let mut pk = PublicKey([0u8; PUBLIC_KEY_SIZE]);
        E::keypair_from_seed(&mut pk.0, &mut sk.0, &seed.0, rng);
        debug_assert_eq!(pk.0[..SEED_SIZE], seed.0, "engine did not embed seed");
        tracing::trace!(rho = %hex::encode(seed.0), "generated seeded key pair");
        (sk, pk)
    }

    /// Sign `message` with `sk`.
    ///
    /// # Errors
    ///
    /// [`Error::IntegrityFault`] if the engine reports a length other than
    /// [`SIG_SIZE`]. The partially written buffer is discarded.
    pub fn try_sign(sk: &PrivateKey, message: &[u8]) -> Result<Signature> {
        let mut sig = Signature([0u8; SIG_SIZE]);
        let written = E::sign(&mut sig.0, message, &sk.0);
        if written != SIG_SIZE {
            return Err(Error::IntegrityFault {
                expected: SIG_SIZE,
                actual: written,
            });
        }
        Ok(sig)
    }

    /// Sign `message` with `sk`.
    ///
    /// # Panics
    ///
    /// Panics when the engine produces a signature of the wrong length.
    /// That only happens if the engine was built against different sizes,
    /// and no usable signature exists in that case. Use
    /// [`try_sign`](Self::try_sign) to handle it as an error instead.
    pub fn sign(sk: &PrivateKey, message: &[u8]) -> Signature {
        match Self::try_sign(sk, message) {
            Ok(sig) => sig,
            Err(err) => {
                tracing::error!(%err, "signing engine integrity fault");
                panic!("{err}");
            }
        }
    }

    /// Verify `sig` over `message` against `pk`.
    ///
    /// `sig` is taken as a slice so that truncated or padded signatures can
    /// be rejected rather than failing to type-check.
    ///
    /// # Errors
    ///
    /// [`Error::BadSignature`] for an empty, wrong-length or invalid
    /// signature. An empty `sig` is rejected before the engine is called.
    pub fn verify(pk: &PublicKey, message: &[u8], sig: &[u8]) -> Result<()> {
        if sig.is_empty() {
            tracing::debug!("rejecting empty signature");
            return Err(Error::BadSignature);
        }
        if E::verify(sig, message, &pk.0) {
            Ok(())
        } else {
            tracing::debug!(sig_len = sig.len(), "signature rejected");
            Err(Error::BadSignature)
        }
    }

    /// Check that `pk` embeds `seed` as its leading `rho` bytes.
    ///
    /// This is a structural check only. It says nothing about who holds
    /// the matching private key.
    ///
    /// # Errors
    ///
    /// [`Error::RhoMismatch`] when the prefix differs.
    pub fn verify_seed_binding(pk: &PublicKey, seed: &Seed) -> Result<()> {
        if bool::from(pk.0[..SEED_SIZE].ct_eq(&seed.0)) {
            Ok(())
        } else {
            Err(Error::RhoMismatch)
        }
    }
}

impl PrivateKey {
    /// Shorthand for [`SignatureScheme::sign`] with the bundled engine.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Dsa65Scheme::sign(self, message)
    }
}

impl PublicKey {
    /// Shorthand for [`SignatureScheme::verify`] with the bundled engine.
    ///
    /// # Errors
    ///
    /// See [`SignatureScheme::verify`].
    pub fn verify(&self, message: &[u8], sig: &[u8]) -> Result<()> {
        Dsa65Scheme::verify(self, message, sig)
    }

    /// Shorthand for [`SignatureScheme::verify_seed_binding`].
    ///
    /// # Errors
    ///
    /// See [`SignatureScheme::verify_seed_binding`].
    pub fn verify_seed_binding(&self, seed: &Seed) -> Result<()> {
        Dsa65Scheme::verify_seed_binding(self, seed)
    }
}
