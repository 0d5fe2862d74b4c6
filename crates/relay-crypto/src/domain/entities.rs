//! # Curve Entities
//!
//! Compressed-point wrappers for BLS signatures and group public keys.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

use super::errors::SignatureError;

/// BLS signature (G1 point, 48 bytes compressed).
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlsSignature {
    /// G1 point (48 bytes compressed)
    #[serde_as(as = "Bytes")]
    pub bytes: [u8; 48],
}

impl BlsSignature {
    /// Parse a signature from raw bytes submitted by a relayer.
    ///
    /// # Errors
    /// * `MalformedSignature` if the slice is not exactly 48 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SignatureError> {
        let bytes: [u8; 48] = bytes
            .try_into()
            .map_err(|_| SignatureError::MalformedSignature)?;
        Ok(Self { bytes })
    }
}

/// BLS group public key (G2 point, 96 bytes compressed).
///
/// For a schain this is the key established by the committee's DKG
/// ceremony; the relay only verifies against it and never takes part in key
/// generation.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlsPublicKey {
    /// G2 point (96 bytes compressed)
    #[serde_as(as = "Bytes")]
    pub bytes: [u8; 96],
}

impl BlsPublicKey {
    /// Parse a public key from raw bytes.
    ///
    /// # Errors
    /// * `MalformedPublicKey` if the slice is not exactly 96 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SignatureError> {
        let bytes: [u8; 96] = bytes
            .try_into()
            .map_err(|_| SignatureError::MalformedPublicKey)?;
        Ok(Self { bytes })
    }
}
