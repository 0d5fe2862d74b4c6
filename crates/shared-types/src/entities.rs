//! # Core Entities
//!
//! Primitive byte types used by every relay subsystem.

/// A 32-byte hash (Keccak-256).
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style contract or account address.
pub type Address = [u8; 20];

/// The zero address. Never a valid peer contract.
pub const ZERO_ADDRESS: Address = [0u8; 20];
