//! # Shared Types Crate
//!
//! Primitive aliases and chain identity helpers shared across the relay
//! subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-subsystem types are defined here.
//! - **Hash-Keyed Identity**: chains are addressed by the Keccak-256 hash of
//!   their human-readable name everywhere; strings never key storage.

pub mod chain;
pub mod entities;

pub use chain::{chain_hash, mainnet_hash, MAINNET_NAME};
pub use entities::{Address, Hash, ZERO_ADDRESS};
