//! Engine traits.
//!
//! An engine is the mathematical primitive behind the façade: it owns the
//! compression function or the lattice arithmetic and nothing else. The
//! façade owns the contract (snapshots, size checks, error mapping).

use crate::sizes::{
    BLOCK_SIZE, DIGEST_SIZE, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE, SEED_SIZE, SIG_SIZE,
};
use rand_core::CryptoRng;

/// Incremental hash engine with a 64-byte output.
///
/// The engine is a pure function of the bytes fed so far. Its state must be
/// cheap enough to clone once per digest request, because the façade never
/// finalizes the live state.
///
/// # Example
///
/// ```ignore
/// use sumlith_core::HashEngine;
///
/// let mut state = MyHash::State::default();
/// MyHash::init(&mut state);
/// MyHash::update(&mut state, b"abc");
/// let mut out = [0u8; 64];
/// MyHash::finalize(&mut state, &mut out);
/// ```
pub trait HashEngine {
    /// Running state. Never inspected by the façade, only cloned.
    type State: Clone + Default;

    /// Size of the output in bytes.
    const DIGEST_SIZE: usize = DIGEST_SIZE;

    /// Size of an input block in bytes.
    const BLOCK_SIZE: usize = BLOCK_SIZE;

    /// Reset `state` to the initial (unsalted) state.
    fn init(state: &mut Self::State);

    /// Reset `state` to the initial state of the salted mode.
    fn init_salted(state: &mut Self::State, salt: &[u8; BLOCK_SIZE]);

    /// Absorb `data` into `state`. The empty slice must leave `state` unchanged.
    fn update(state: &mut Self::State, data: &[u8]);

    /// Pad and finalize `state`, writing the hash value to `out`.
    ///
    /// `state` is consumed logically; it is only valid for [`init`](Self::init)
    /// afterwards.
    fn finalize(state: &mut Self::State, out: &mut [u8; DIGEST_SIZE]);
}

/// Lattice signature engine operating on fixed-size buffers.
///
/// The only structural promise beyond the buffer sizes is that
/// [`keypair_from_seed`](Self::keypair_from_seed) writes `seed` as the first
/// [`SEED_SIZE`] bytes of the public key.
pub trait SignatureEngine {
    /// Generate a fresh key pair.
    ///
    /// # Arguments
    ///
    /// * `pk` - Output buffer for the public key.
    /// * `sk` - Output buffer for the private key.
    /// * `rng` - A cryptographically secure random number generator.
    fn keypair(
        pk: &mut [u8; PUBLIC_KEY_SIZE],
        sk: &mut [u8; PRIVATE_KEY_SIZE],
        rng: &mut impl CryptoRng,
    );

    /// Generate a key pair whose public key embeds `seed` as `rho`.
    ///
    /// The remaining secret material is drawn from `rng`.
    fn keypair_from_seed(
        pk: &mut [u8; PUBLIC_KEY_SIZE],
        sk: &mut [u8; PRIVATE_KEY_SIZE],
        seed: &[u8; SEED_SIZE],
        rng: &mut impl CryptoRng,
    );

    /// Sign `message` with `sk`, writing the signature into `sig`.
    ///
    /// # Returns
    ///
    /// The number of bytes written. Anything other than [`SIG_SIZE`] means
    /// the engine failed.
    fn sign(sig: &mut [u8; SIG_SIZE], message: &[u8], sk: &[u8; PRIVATE_KEY_SIZE]) -> usize;

    /// Verify `sig` over `message` against `pk`.
    ///
    /// `sig` may have any length; engines reject lengths other than
    /// [`SIG_SIZE`].
    fn verify(sig: &[u8], message: &[u8], pk: &[u8; PUBLIC_KEY_SIZE]) -> bool;
}
