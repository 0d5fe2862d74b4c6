//! # Relay Crypto
//!
//! BLS12-381 threshold-signature verification for the interchain message
//! relay.
//!
//! ## Purpose
//!
//! A committee of node operators collectively signs the digest of each
//! message batch; the relay core accepts a batch only if the single
//! aggregate signature verifies against the chain's registered group public
//! key. This crate holds the curve types and the pairing check; the relay
//! core never touches `blst` directly.
//!
//! ## Implementation Details
//!
//! This uses blst's `min_sig` variant:
//! - Signatures are on G1 (48 bytes compressed)
//! - Public keys are on G2 (96 bytes compressed)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;

// Re-exports
pub use domain::bls::{
    aggregate_public_keys, aggregate_signatures, verify_signature, DST,
};
pub use domain::entities::{BlsPublicKey, BlsSignature};
pub use domain::errors::SignatureError;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
