//! Running Sumhash512 state: chaining value, length counter and block buffer.

use crate::matrix::{Matrix, INPUT_BYTES, ROWS};
use sumlith_core::sizes::{BLOCK_SIZE, DIGEST_SIZE};

/// Bytes of the final block occupied by the 128-bit message length.
const LENGTH_BYTES: usize = 16;

/// Incremental Sumhash512 state.
///
/// Cloning is cheap (a few hundred bytes); the matrix is shared.
#[derive(Clone)]
pub struct SumhashState {
    chain: [u64; ROWS],
    bit_len: u128,
    buf: [u8; BLOCK_SIZE],
    salt: Option<[u8; BLOCK_SIZE]>,
}

impl SumhashState {
    /// Fresh unsalted state.
    pub fn new() -> Self {
        Self {
            chain: [0u64; ROWS],
            bit_len: 0,
            buf: [0u8; BLOCK_SIZE],
            salt: None,
        }
    }

    /// Fresh salted state.
    ///
    /// Every block is XORed with `salt` before compression, and one block of
    /// zeros is absorbed up front.
    pub fn new_salted(salt: &[u8; BLOCK_SIZE]) -> Self {
        let mut state = Self {
            salt: Some(*salt),
            ..Self::new()
        };
        state.update(&[0u8; BLOCK_SIZE]);
        state
    }

    /// The salt, if this state runs in salted mode.
    pub fn salt(&self) -> Option<&[u8; BLOCK_SIZE]> {
        self.salt.as_ref()
    }

    /// Bytes absorbed so far, including the salted-mode prefix block.
    pub fn absorbed_len(&self) -> u128 {
        self.bit_len >> 3
    }

    fn buffered(&self) -> usize {
        (self.absorbed_len() % BLOCK_SIZE as u128) as usize
    }

    fn compress(&mut self, block: &[u8; BLOCK_SIZE]) {
        let mut input = [0u8; INPUT_BYTES];
        let (chain, tail) = input.split_at_mut(DIGEST_SIZE);
        for (dst, word) in chain.chunks_exact_mut(8).zip(self.chain.iter()) {
            dst.copy_from_slice(&word.to_le_bytes());
        }
        match &self.salt {
            Some(salt) => {
                for ((dst, b), s) in tail.iter_mut().zip(block.iter()).zip(salt.iter()) {
                    *dst = b ^ s;
                }
            }
            None => tail.copy_from_slice(block),
        }
        self.chain = Matrix::shared().compress(&input);
    }

    /// Absorb `data`. An empty slice leaves the state untouched.
    pub fn update(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        let used = self.buffered();
        self.bit_len = self.bit_len.wrapping_add((data.len() as u128) << 3);

        let room = BLOCK_SIZE - used;
        if data.len() < room {
            self.buf[used..used + data.len()].copy_from_slice(data);
            return;
        }

        let (head, rest) = data.split_at(room);
        self.buf[used..].copy_from_slice(head);
        let block = self.buf;
        self.compress(&block);

        let mut blocks = rest.chunks_exact(BLOCK_SIZE);
        let mut block = [0u8; BLOCK_SIZE];
        for chunk in &mut blocks {
            block.copy_from_slice(chunk);
            self.compress(&block);
        }
        let tail = blocks.remainder();
        self.buf[..tail.len()].copy_from_slice(tail);
    }

    /// Pad, compress the final block(s) and write the digest to `out`.
    ///
    /// The state is spent afterwards; start over with [`SumhashState::new`]
    /// or a clone taken before finalizing.
    pub fn finalize_into(&mut self, out: &mut [u8; DIGEST_SIZE]) {
        let used = self.buffered();
        let mut block = self.buf;
        block[used] = 0x80;
        block[used + 1..].fill(0);

        if used >= BLOCK_SIZE - LENGTH_BYTES {
            self.compress(&block);
            block = [0u8; BLOCK_SIZE];
        }

        let low = self.bit_len as u64;
        let high = (self.bit_len >> 64) as u64;
        block[BLOCK_SIZE - LENGTH_BYTES..BLOCK_SIZE - 8].copy_from_slice(&low.to_le_bytes());
        block[BLOCK_SIZE - 8..].copy_from_slice(&high.to_le_bytes());
        self.compress(&block);

        for (dst, word) in out.chunks_exact_mut(8).zip(self.chain.iter()) {
            dst.copy_from_slice(&word.to_le_bytes());
        }
    }
}

// Bytes past the fill point are leftovers from earlier blocks.
impl PartialEq for SumhashState {
    fn eq(&self, other: &Self) -> bool {
        let used = self.buffered();
        self.chain == other.chain
            && self.bit_len == other.bit_len
            && self.salt == other.salt
            && self.buf[..used] == other.buf[..used]
    }
}

impl Eq for SumhashState {}

impl Default for SumhashState {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for SumhashState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SumhashState")
            .field("absorbed_len", &self.absorbed_len())
            .field("salted", &self.salt.is_some())
            .finish_non_exhaustive()
    }
}
