//! SHAKE128 / SHAKE256 helpers.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake128Reader, Shake256, Shake256Reader};

use crate::params::{C_TILDE_BYTES, CRH_BYTES, SEED_BYTES};

/// SHAKE256 over the concatenation of `parts`, as a stream.
pub fn shake256_stream(parts: &[&[u8]]) -> Shake256Reader {
    let mut hasher = Shake256::default();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize_xof()
}

/// SHAKE256 over the concatenation of `parts`, filling `out`.
pub fn shake256(parts: &[&[u8]], out: &mut [u8]) {
    shake256_stream(parts).read(out);
}

/// SHAKE128 stream for entry (i, j) of the public matrix.
pub fn shake128_stream(rho: &[u8; SEED_BYTES], i: u8, j: u8) -> Shake128Reader {
    let mut hasher = Shake128::default();
    hasher.update(rho);
    hasher.update(&[j, i]);
    hasher.finalize_xof()
}

/// tr = H(pk, 64)
pub fn hash_public_key(pk: &[u8]) -> [u8; CRH_BYTES] {
    let mut tr = [0u8; CRH_BYTES];
    shake256(&[pk], &mut tr);
    tr
}

/// mu = H(tr || M, 64)
pub fn message_representative(tr: &[u8; CRH_BYTES], message: &[u8]) -> [u8; CRH_BYTES] {
    let mut mu = [0u8; CRH_BYTES];
    shake256(&[tr, message], &mut mu);
    mu
}

/// c~ = H(mu || w1Encode(w1), 128)
pub fn challenge_seed(mu: &[u8; CRH_BYTES], w1_packed: &[u8]) -> [u8; C_TILDE_BYTES] {
    let mut c_tilde = [0u8; C_TILDE_BYTES];
    shake256(&[mu, w1_packed], &mut c_tilde);
    c_tilde
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_concatenate() {
        let mut a = [0u8; 48];
        let mut b = [0u8; 48];
        shake256(&[b"abc", b"def"], &mut a);
        shake256(&[b"abcdef"], &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_shake256_empty_known_answer() {
        let mut out = [0u8; 32];
        shake256(&[], &mut out);
        assert_eq!(
            hex::encode(out),
            "46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f"
        );
    }

    #[test]
    fn test_matrix_streams_differ() {
        let rho = [7u8; SEED_BYTES];
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        shake128_stream(&rho, 0, 1).read(&mut a);
        shake128_stream(&rho, 1, 0).read(&mut b);
        assert_ne!(a, b);
    }
}
