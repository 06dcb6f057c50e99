//! Parameter set
//!
//! ML-DSA-65 dimensions with a 128-byte challenge seed. Every byte length
//! below is derived, and checked at compile time against
//! [`sumlith_core::sizes`].

use sumlith_core::sizes;

/// Ring dimension
pub const N: usize = 256;

/// Modulus q = 8380417
pub const Q: i32 = 8_380_417;

/// Rows of the public matrix A
pub const K: usize = 6;

/// Columns of the public matrix A
pub const L: usize = 5;

/// Secret coefficient bound
pub const ETA: i32 = 4;

/// Number of ±1 coefficients in the challenge
pub const TAU: usize = 49;

/// TAU * ETA
pub const BETA: i32 = 196;

/// Masking range for y
pub const GAMMA1: i32 = 1 << 19;

/// Low-order rounding range
pub const GAMMA2: i32 = (Q - 1) / 32; // 261888

/// Maximum number of hint ones
pub const OMEGA: usize = 55;

/// Dropped bits of t
pub const D: u32 = 13;

/// Seed sizes in bytes
pub const SEED_BYTES: usize = 32;
pub const CRH_BYTES: usize = 64;

/// Challenge seed c~ in bytes
pub const C_TILDE_BYTES: usize = 128;

/// Bits per packed coefficient
pub const T1_BITS: u32 = 10;
pub const T0_BITS: u32 = D;
pub const ETA_BITS: u32 = 4;
pub const Z_BITS: u32 = 20;
pub const W1_BITS: u32 = 4;

/// Packed polynomial sizes
pub const POLY_T1_PACKED_BYTES: usize = N * T1_BITS as usize / 8;
pub const POLY_T0_PACKED_BYTES: usize = N * T0_BITS as usize / 8;
pub const POLY_ETA_PACKED_BYTES: usize = N * ETA_BITS as usize / 8;
pub const POLY_Z_PACKED_BYTES: usize = N * Z_BITS as usize / 8;
pub const POLY_W1_PACKED_BYTES: usize = N * W1_BITS as usize / 8;

/// Public key: rho || t1
pub const PK_BYTES: usize = SEED_BYTES + K * POLY_T1_PACKED_BYTES;

/// Secret key: rho || key || tr || s1 || s2 || t0
pub const SK_BYTES: usize = 2 * SEED_BYTES
    + CRH_BYTES
    + (L + K) * POLY_ETA_PACKED_BYTES
    + K * POLY_T0_PACKED_BYTES;

/// Signature: c~ || z || h
pub const SIG_BYTES: usize = C_TILDE_BYTES + L * POLY_Z_PACKED_BYTES + OMEGA + K;

/// Upper bound on rejection-sampling rounds before signing gives up.
///
/// The expected number of rounds is about five.
pub const MAX_SIGN_ATTEMPTS: u32 = 10_000;

const _: () = assert!(PK_BYTES == sizes::PUBLIC_KEY_SIZE);
const _: () = assert!(SK_BYTES == sizes::PRIVATE_KEY_SIZE);
const _: () = assert!(SIG_BYTES == sizes::SIG_SIZE);
const _: () = assert!(SEED_BYTES == sizes::SEED_SIZE);
const _: () = assert!(BETA == TAU as i32 * ETA);
const _: () = assert!((MAX_SIGN_ATTEMPTS as usize) * L <= u16::MAX as usize);
