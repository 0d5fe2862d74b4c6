//! # Adapters Module
//!
//! Concrete implementations of the outbound ports.

pub mod publisher;
pub mod receivers;
pub mod verifier;

pub use publisher::*;
pub use receivers::*;
pub use verifier::*;
