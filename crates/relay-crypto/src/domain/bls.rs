//! # BLS Verification (BLS12-381)
//!
//! Pure pairing logic for aggregate-signature verification.
//!
//! ## Notes
//!
//! The relay accepts a message batch iff
//! `e(signature, G2_generator) == e(H(digest), groupPublicKey)`.
//! A malformed point is a distinct failure from a signature that simply does
//! not verify: the first is `Err(SignatureError::...)`, the second `Ok(false)`.

use blst::min_sig::{AggregatePublicKey, AggregateSignature, PublicKey, Signature};
use blst::BLST_ERROR;

use super::entities::{BlsPublicKey, BlsSignature};
use super::errors::SignatureError;

/// Domain Separation Tag for relay attestations (Ethereum 2.0 style).
pub const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Verify an aggregate BLS signature over a batch digest against a chain's
/// group public key.
///
/// # Arguments
/// * `digest` - The batch digest that was signed
/// * `signature` - The aggregate signature (G1, 48 bytes)
/// * `public_key` - The group public key (G2, 96 bytes)
///
/// # Errors
/// * `MalformedSignature` / `MalformedPublicKey` if either point fails to
///   decompress or is not in the prime-order subgroup
pub fn verify_signature(
    digest: &[u8],
    signature: &BlsSignature,
    public_key: &BlsPublicKey,
) -> Result<bool, SignatureError> {
    let sig = Signature::from_bytes(&signature.bytes)
        .map_err(|_| SignatureError::MalformedSignature)?;

    let pk = PublicKey::from_bytes(&public_key.bytes)
        .map_err(|_| SignatureError::MalformedPublicKey)?;

    // Pairing check; group checks on both points are requested explicitly.
    let result = sig.verify(true, digest, DST, &[], &pk, true);
    Ok(result == BLST_ERROR::BLST_SUCCESS)
}

/// Aggregate committee-member signatures over the same digest into one.
///
/// # Errors
/// * `EmptyAggregation` if the input list is empty
/// * `MalformedSignature` if any signature fails to parse
pub fn aggregate_signatures(
    signatures: &[BlsSignature],
) -> Result<BlsSignature, SignatureError> {
    if signatures.is_empty() {
        return Err(SignatureError::EmptyAggregation);
    }

    let first = Signature::from_bytes(&signatures[0].bytes)
        .map_err(|_| SignatureError::MalformedSignature)?;

    let mut aggregate = AggregateSignature::from_signature(&first);

    for sig in &signatures[1..] {
        let parsed = Signature::from_bytes(&sig.bytes)
            .map_err(|_| SignatureError::MalformedSignature)?;
        aggregate
            .add_signature(&parsed, true)
            .map_err(|_| SignatureError::AggregationFailed)?;
    }

    Ok(BlsSignature {
        bytes: aggregate.to_signature().to_bytes(),
    })
}

/// Aggregate committee-member public keys into the group public key.
///
/// # Errors
/// * `EmptyAggregation` if the input list is empty
/// * `MalformedPublicKey` if any key fails to parse
pub fn aggregate_public_keys(
    public_keys: &[BlsPublicKey],
) -> Result<BlsPublicKey, SignatureError> {
    if public_keys.is_empty() {
        return Err(SignatureError::EmptyAggregation);
    }

    let pks: Result<Vec<PublicKey>, SignatureError> = public_keys
        .iter()
        .map(|pk| PublicKey::from_bytes(&pk.bytes).map_err(|_| SignatureError::MalformedPublicKey))
        .collect();
    let pks = pks?;
    let pk_refs: Vec<&PublicKey> = pks.iter().collect();

    let aggregate = AggregatePublicKey::aggregate(&pk_refs, true)
        .map_err(|_| SignatureError::AggregationFailed)?;

    Ok(BlsPublicKey {
        bytes: aggregate.to_public_key().to_bytes(),
    })
}
