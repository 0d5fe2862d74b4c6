//! # Domain Module
//!
//! Curve types, errors, and the pairing check.

pub mod bls;
pub mod entities;
pub mod errors;

pub use bls::*;
pub use entities::*;
pub use errors::*;
