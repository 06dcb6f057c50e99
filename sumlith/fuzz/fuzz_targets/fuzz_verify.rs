//! Fuzz target for signature verification.
//!
//! Verify must never panic, must accept an untouched signature and must
//! reject a changed message or any signature of the wrong length.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand::rngs::StdRng;
use rand::SeedableRng;

use sumlith::sizes::SIG_SIZE;
use sumlith::{Dsa65Scheme, Seed};

#[derive(Debug, Arbitrary)]
struct VerifyInput {
    rng_seed: u64,
    rho: Option<[u8; 32]>,
    message: Vec<u8>,
    corruption: Option<Corruption>,
}

#[derive(Debug, Arbitrary)]
enum Corruption {
    Signature { position: usize, xor_value: u8 },
    Message { position: usize, xor_value: u8 },
    Truncate { len: usize },
    Replace { bytes: Vec<u8> },
}

fuzz_target!(|input: VerifyInput| {
    if input.message.len() > 10000 {
        return;
    }

    let mut rng = StdRng::seed_from_u64(input.rng_seed);
    let (sk, pk) = match input.rho {
        Some(rho) => {
            let seed = Seed::from(rho);
            let pair = Dsa65Scheme::generate_keypair_from_seed_with_rng(&seed, &mut rng);
            assert!(pair.1.verify_seed_binding(&seed).is_ok());
            pair
        }
        None => Dsa65Scheme::generate_keypair_with_rng(&mut rng),
    };

    let sig = sk.sign(&input.message);
    let mut sig_bytes = sig.as_bytes().to_vec();
    let mut msg = input.message.clone();

    match input.corruption {
        None => {
            assert!(pk.verify(&msg, &sig_bytes).is_ok(), "valid signature rejected");
        }
        Some(Corruption::Signature { position, xor_value }) => {
            if position < sig_bytes.len() && xor_value != 0 {
                sig_bytes[position] ^= xor_value;
                let _ = pk.verify(&msg, &sig_bytes);
            }
        }
        Some(Corruption::Message { position, xor_value }) => {
            if position < msg.len() && xor_value != 0 {
                msg[position] ^= xor_value;
                assert!(pk.verify(&msg, &sig_bytes).is_err(), "changed message accepted");
            }
        }
        Some(Corruption::Truncate { len }) => {
            sig_bytes.truncate(len % SIG_SIZE);
            assert!(pk.verify(&msg, &sig_bytes).is_err(), "short signature accepted");
        }
        Some(Corruption::Replace { bytes }) => {
            let result = pk.verify(&msg, &bytes);
            if bytes.len() != SIG_SIZE {
                assert!(result.is_err(), "wrong-length signature accepted");
            }
        }
    }
});
