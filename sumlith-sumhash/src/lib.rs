//! # Sumlith Sumhash
//!
//! Sumhash512, a 512-bit hash built from a subset-sum compression
//! function over `Z_{2^64}`.
//!
//! Each 64-byte block is compressed together with the current chaining
//! value: the 1024 input bits select columns of a fixed 8 × 1024 matrix,
//! and every output word is the wrapping sum of the selected entries of one
//! row. The matrix is expanded from SHAKE256 once per process.
//!
//! ## Example
//!
//! ```
//! use sumlith_sumhash::{sumhash512, SumhashState};
//!
//! let mut state = SumhashState::new();
//! state.update(b"ab");
//! state.update(b"c");
//! let mut out = [0u8; 64];
//! state.finalize_into(&mut out);
//!
//! assert_eq!(out, sumhash512(b"abc"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod matrix;
mod state;

pub use matrix::{Matrix, COLUMNS, ROWS};
pub use state::SumhashState;

use sumlith_core::sizes::{BLOCK_SIZE, DIGEST_SIZE};
use sumlith_core::HashEngine;

/// Sumhash512 as a [`HashEngine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Sumhash512;

impl HashEngine for Sumhash512 {
    type State = SumhashState;

    fn init(state: &mut SumhashState) {
        *state = SumhashState::new();
    }

    fn init_salted(state: &mut SumhashState, salt: &[u8; BLOCK_SIZE]) {
        *state = SumhashState::new_salted(salt);
    }

    fn update(state: &mut SumhashState, data: &[u8]) {
        state.update(data);
    }

    fn finalize(state: &mut SumhashState, out: &mut [u8; DIGEST_SIZE]) {
        state.finalize_into(out);
    }
}

/// Hash `data` in one call.
pub fn sumhash512(data: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut state = SumhashState::new();
    state.update(data);
    let mut out = [0u8; DIGEST_SIZE];
    state.finalize_into(&mut out);
    out
}

/// Hash `data` in one call using the salted mode.
pub fn sumhash512_salted(data: &[u8], salt: &[u8; BLOCK_SIZE]) -> [u8; DIGEST_SIZE] {
    let mut state = SumhashState::new_salted(salt);
    state.update(data);
    let mut out = [0u8; DIGEST_SIZE];
    state.finalize_into(&mut out);
    out
}
