//! Fixed byte sizes of every value crossing an engine boundary.
//!
//! The engines and the façade are both compiled against these numbers.
//! An engine that disagrees with them is miscompiled, not misconfigured.

/// Hash output size in bytes.
pub const DIGEST_SIZE: usize = 64;

/// Hash block size in bytes.
pub const BLOCK_SIZE: usize = 64;

/// Signature size in bytes.
pub const SIG_SIZE: usize = 3389;

/// Public key size in bytes.
pub const PUBLIC_KEY_SIZE: usize = 1952;

/// Private key size in bytes.
pub const PRIVATE_KEY_SIZE: usize = 4032;

/// Seed (`rho`) size in bytes. A seeded public key starts with these bytes.
pub const SEED_SIZE: usize = 32;
