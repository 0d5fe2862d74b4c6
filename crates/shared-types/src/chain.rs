//! # Chain Identity
//!
//! Chains are identified by the Keccak-256 hash of their human-readable
//! name. The hash is the map key everywhere so that string comparison never
//! appears on a hot path, and so the identity is stable across deployments.

use sha3::{Digest, Keccak256};

use crate::entities::Hash;

/// Reserved name of the Mainnet chain.
///
/// The derived hash is a sentinel: Mainnet can never be connected,
/// disconnected, or killed through the ordinary chain lifecycle.
pub const MAINNET_NAME: &str = "Mainnet";

/// Derive the canonical chain id from a chain name.
pub fn chain_hash(name: &str) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(name.as_bytes());
    hasher.finalize().into()
}

/// The reserved Mainnet chain id.
pub fn mainnet_hash() -> Hash {
    chain_hash(MAINNET_NAME)
}
