//! # Signature Errors
//!
//! Error types for BLS verification and aggregation.

use thiserror::Error;

/// Errors that can occur while parsing or verifying BLS material.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// The signature is not a valid compressed G1 point of the right length.
    #[error("Malformed BLS signature")]
    MalformedSignature,

    /// The public key is not a valid compressed G2 point of the right length.
    #[error("Malformed BLS public key")]
    MalformedPublicKey,

    /// Cannot aggregate an empty list of signatures or keys.
    #[error("Cannot aggregate empty list")]
    EmptyAggregation,

    /// Point addition failed during aggregation.
    #[error("BLS aggregation failed")]
    AggregationFailed,
}
