//! Streaming digest front end.

use std::fmt;
use std::io;

use ::digest::consts::U64;
use ::digest::{FixedOutput, FixedOutputReset, HashMarker, Output, OutputSizeUser, Reset, Update};
use sumlith_core::sizes::{BLOCK_SIZE, DIGEST_SIZE};
use sumlith_core::HashEngine;
use sumlith_sumhash::Sumhash512;

/// Incremental 64-byte hash over an engine `E`.
///
/// `digest` never disturbs the running state: it finalizes a copy, so the
/// same instance can be asked for intermediate digests and keep absorbing.
///
/// # Example
///
/// ```
/// use sumlith::StreamingDigest;
///
/// let mut h = StreamingDigest::new();
/// h.absorb(b"ab");
/// let early = h.digest(&[]);
/// h.absorb(b"c");
///
/// assert_eq!(early, sumlith::sumhash512(b"ab"));
/// assert_eq!(h.digest_array(), sumlith::sumhash512(b"abc"));
/// ```
pub struct StreamingDigest<E: HashEngine = Sumhash512> {
    state: E::State,
    salt: Option<[u8; BLOCK_SIZE]>,
}

impl StreamingDigest {
    /// A sumhash512 digest in its initial state.
    pub fn new() -> Self {
        Self::with_engine()
    }

    /// A sumhash512 digest in its salted initial state.
    ///
    /// [`reset`](Self::reset) returns to this salted state, not the
    /// unsalted one.
    pub fn new_salted(salt: &[u8; BLOCK_SIZE]) -> Self {
        Self::with_engine_salted(salt)
    }
}

impl<E: HashEngine> StreamingDigest<E> {
    /// A digest in the initial state of engine `E`.
    pub fn with_engine() -> Self {
        let mut state = E::State::default();
        E::init(&mut state);
        Self { state, salt: None }
    }

    /// A digest in the salted initial state of engine `E`.
    pub fn with_engine_salted(salt: &[u8; BLOCK_SIZE]) -> Self {
        let mut state = E::State::default();
        E::init_salted(&mut state, salt);
        Self {
            state,
            salt: Some(*salt),
        }
    }

    /// Discard everything absorbed so far.
    pub fn reset(&mut self) {
        match &self.salt {
            Some(salt) => E::init_salted(&mut self.state, salt),
            None => E::init(&mut self.state),
        }
    }

    /// Feed `data` into the digest.
    pub fn absorb(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        E::update(&mut self.state, data);
    }

    /// `suffix` followed by the hash of everything absorbed so far.
    pub fn digest(&self, suffix: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(suffix.len() + DIGEST_SIZE);
        out.extend_from_slice(suffix);
        out.extend_from_slice(&self.digest_array());
        out
    }

    /// Hash of everything absorbed so far.
    pub fn digest_array(&self) -> [u8; DIGEST_SIZE] {
        let mut snapshot = self.state.clone();
        let mut out = [0u8; DIGEST_SIZE];
        E::finalize(&mut snapshot, &mut out);
        out
    }

    /// Output size in bytes.
    pub fn size(&self) -> usize {
        E::DIGEST_SIZE
    }

    /// Input block size in bytes.
    pub fn block_size(&self) -> usize {
        E::BLOCK_SIZE
    }

    /// Whether this digest was created with a salt.
    pub fn is_salted(&self) -> bool {
        self.salt.is_some()
    }
}

impl<E: HashEngine> Default for StreamingDigest<E> {
    fn default() -> Self {
        Self::with_engine()
    }
}

impl<E: HashEngine> Clone for StreamingDigest<E> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            salt: self.salt,
        }
    }
}

impl<E: HashEngine> fmt::Debug for StreamingDigest<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamingDigest")
            .field("salted", &self.salt.is_some())
            .finish_non_exhaustive()
    }
}

impl<E: HashEngine> io::Write for StreamingDigest<E> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.absorb(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// RustCrypto `digest` traits, so the type works wherever a `Digest` is
// expected (HMAC, generic helpers, ...).

impl<E: HashEngine> HashMarker for StreamingDigest<E> {}

impl<E: HashEngine> OutputSizeUser for StreamingDigest<E> {
    type OutputSize = U64;
}

impl<E: HashEngine> Update for StreamingDigest<E> {
    fn update(&mut self, data: &[u8]) {
        self.absorb(data);
    }
}

impl<E: HashEngine> FixedOutput for StreamingDigest<E> {
    fn finalize_into(self, out: &mut Output<Self>) {
        out.copy_from_slice(&self.digest_array());
    }
}

impl<E: HashEngine> Reset for StreamingDigest<E> {
    fn reset(&mut self) {
        StreamingDigest::reset(self);
    }
}

impl<E: HashEngine> FixedOutputReset for StreamingDigest<E> {
    fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
        out.copy_from_slice(&self.digest_array());
        StreamingDigest::reset(self);
    }
}
