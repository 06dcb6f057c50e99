//! Fuzz target for the streaming digest.
//!
//! Any chunking of the input, with digests taken between chunks, must give
//! the one-shot hash.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use sumlith::{sumhash512, sumhash512_salted, StreamingDigest};

#[derive(Debug, Arbitrary)]
struct DigestInput {
    chunks: Vec<Vec<u8>>,
    salt: Option<[u8; 32]>,
    peek_every: u8,
}

fuzz_target!(|input: DigestInput| {
    let salt = input.salt.map(|half| {
        let mut salt = [0u8; 64];
        salt[..32].copy_from_slice(&half);
        salt[32..].copy_from_slice(&half);
        salt
    });

    let mut h = match &salt {
        Some(salt) => StreamingDigest::new_salted(salt),
        None => StreamingDigest::new(),
    };
    let mut all = Vec::new();

    for (i, chunk) in input.chunks.iter().enumerate() {
        h.absorb(chunk);
        all.extend_from_slice(chunk);
        if input.peek_every != 0 && i % usize::from(input.peek_every) == 0 {
            let _ = h.digest(chunk);
        }
    }

    let expected = match &salt {
        Some(salt) => sumhash512_salted(&all, salt),
        None => sumhash512(&all),
    };
    assert_eq!(h.digest_array(), expected);
});
