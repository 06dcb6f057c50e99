//! Error types for sumlith operations.

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during signature and key operations.
///
/// Hashing never fails and has no error variants here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The signature did not verify: empty, wrong length, or tampered
    /// signature or message bytes.
    #[error("bad signature")]
    BadSignature,

    /// The public key's embedded `rho` differs from the supplied seed.
    #[error("public key rho does not match seed")]
    RhoMismatch,

    /// The signing engine wrote a signature of unexpected length.
    ///
    /// This is never a caller mistake: the engine's compiled constants have
    /// drifted from [`crate::sizes`].
    #[error("signing engine wrote {actual} bytes, expected {expected}")]
    IntegrityFault {
        /// Expected length in bytes.
        expected: usize,
        /// Length reported by the engine.
        actual: usize,
    },

    /// Invalid key length provided.
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Invalid seed length provided.
    #[error("invalid seed length: expected {expected}, got {actual}")]
    InvalidSeedLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Invalid signature length provided.
    #[error("invalid signature length: expected {expected}, got {actual}")]
    InvalidSignatureLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },
}
