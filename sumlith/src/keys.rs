//! Fixed-size key, signature and seed types.

use std::fmt;

use sumlith_core::sizes::{PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE, SEED_SIZE, SIG_SIZE};
use sumlith_core::{Error, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Generate a byte-array newtype with `from_bytes`, `as_bytes` and the
/// usual conversions.
macro_rules! define_byte_type {
    (
        $(#[$meta:meta])*
        $name:ident, $size:expr, $err:ident
    ) => {
        $(#[$meta])*
        pub struct $name(pub(crate) [u8; $size]);

        impl $name {
            /// Size in bytes.
            pub const SIZE: usize = $size;

            /// Create from a slice of exactly [`Self::SIZE`] bytes.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                let array: [u8; $size] =
                    bytes.try_into().map_err(|_| Error::$err {
                        expected: $size,
                        actual: bytes.len(),
                    })?;
                Ok(Self(array))
            }

            /// Get the raw bytes.
            pub fn as_bytes(&self) -> &[u8; $size] {
                &self.0
            }
        }

        impl From<[u8; $size]> for $name {
            fn from(bytes: [u8; $size]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

define_byte_type! {
    /// Private (signing) key. Wiped on drop.
    #[derive(Clone, Zeroize, ZeroizeOnDrop)]
    PrivateKey, PRIVATE_KEY_SIZE, InvalidKeyLength
}

define_byte_type! {
    /// Public (verification) key. The first [`SEED_SIZE`] bytes are `rho`.
    #[derive(Clone, PartialEq, Eq, Hash)]
    PublicKey, PUBLIC_KEY_SIZE, InvalidKeyLength
}

define_byte_type! {
    /// Detached signature.
    #[derive(Clone, PartialEq, Eq, Hash)]
    Signature, SIG_SIZE, InvalidSignatureLength
}

define_byte_type! {
    /// Caller-supplied 32-byte seed that a public key can be bound to.
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    Seed, SEED_SIZE, InvalidSeedLength
}

impl PublicKey {
    /// The embedded matrix seed.
    pub fn rho(&self) -> [u8; SEED_SIZE] {
        let mut rho = [0u8; SEED_SIZE];
        rho.copy_from_slice(&self.0[..SEED_SIZE]);
        rho
    }
}

impl Seed {
    /// The seed embedded in `pk`.
    ///
    /// For a key from
    /// [`generate_keypair_from_seed`](crate::SignatureScheme::generate_keypair_from_seed)
    /// this is the seed it was generated from.
    pub fn rho_of(pk: &PublicKey) -> Self {
        Self(pk.rho())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(rho={}..)", hex::encode(self.rho()))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}..)", hex::encode(&self.0[..16]))
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({})", hex::encode(self.0))
    }
}
