//! # Sumlith Core
//!
//! Shared vocabulary for the sumlith crates.
//!
//! This crate provides:
//! - The byte-size constants every key, signature and digest is built on
//! - The common error type
//! - The engine traits (`HashEngine`, `SignatureEngine`) that the façade
//!   in `sumlith` is generic over
//!
//! Nothing in here performs cryptography. Engines live in
//! `sumlith-sumhash` and `sumlith-dsa`, or in any downstream crate that
//! implements the traits.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
pub mod sizes;
mod traits;

pub use error::{Error, Result};
pub use traits::{HashEngine, SignatureEngine};
