//! BLS Verifier Adapter
//!
//! Implements the `BatchVerifier` port with the real BLS12-381 pairing
//! check from `relay-crypto`.

use relay_crypto::{verify_signature, BlsPublicKey, BlsSignature, SignatureError};
use shared_types::Hash;

use crate::ports::outbound::BatchVerifier;

/// Pairing-backed batch verifier.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlsBatchVerifier;

impl BlsBatchVerifier {
    /// Create the verifier.
    pub fn new() -> Self {
        Self
    }
}

impl BatchVerifier for BlsBatchVerifier {
    fn verify(
        &self,
        public_key: &BlsPublicKey,
        digest: &Hash,
        signature: &BlsSignature,
    ) -> Result<bool, SignatureError> {
        verify_signature(digest, signature, public_key)
    }
}
