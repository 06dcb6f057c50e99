//! # Sumlith
//!
//! Two unrelated primitives behind fixed-size byte types:
//!
//! - [`StreamingDigest`]: an incremental 64-byte hash (sumhash512 by
//!   default) whose [`digest`](StreamingDigest::digest) can be taken at any
//!   point without ending the stream.
//! - [`SignatureScheme`]: a module-lattice signature scheme whose public
//!   keys can be bound to a caller-supplied 32-byte [`Seed`].
//!
//! Both are generic over an engine trait from `sumlith-core`, with the
//! bundled engines ([`Sumhash512`], [`Dsa65`]) as defaults.
//!
//! ## Example
//!
//! ```
//! use sumlith::{Dsa65Scheme, Seed, StreamingDigest};
//!
//! let mut h = StreamingDigest::new();
//! h.absorb(b"application ");
//! h.absorb(b"data");
//! let seed = Seed::from(<[u8; 32]>::try_from(&h.digest_array()[..32]).unwrap());
//!
//! let (sk, pk) = Dsa65Scheme::generate_keypair_from_seed(&seed);
//! let sig = sk.sign(b"message");
//!
//! pk.verify(b"message", sig.as_bytes()).unwrap();
//! pk.verify_seed_binding(&seed).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod keys;
mod scheme;
mod streaming;

pub use keys::{PrivateKey, PublicKey, Seed, Signature};
pub use scheme::{Dsa65Scheme, SignatureScheme};
pub use streaming::StreamingDigest;

pub use sumlith_core::{sizes, Error, HashEngine, Result, SignatureEngine};
pub use sumlith_dsa::Dsa65;
pub use sumlith_sumhash::{sumhash512, sumhash512_salted, Sumhash512};
