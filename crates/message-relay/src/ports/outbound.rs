//! # Outbound Ports
//!
//! Traits for the relay's external dependencies: destination-contract
//! dispatch, signature verification, and event publication. Mock
//! implementations for unit tests live here next to the traits.

use async_trait::async_trait;
use relay_crypto::{BlsPublicKey, BlsSignature, SignatureError};
use shared_types::{Address, Hash};
use thiserror::Error;

use crate::domain::RelayEvent;

/// Failure reported by a destination contract's handler.
///
/// Recorded per message inside an accepted batch; never aborts the batch.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ReceiverError(pub String);

/// Destination-contract capability - outbound port.
///
/// The relay holds only addresses; concrete receivers are resolved through
/// a [`ReceiverResolver`] so the core stays decoupled from them.
#[async_trait]
pub trait MessageReceiver: Send + Sync {
    /// Handle a message delivered from another chain.
    async fn handle(
        &self,
        source_chain: Hash,
        sender: Address,
        payload: &[u8],
    ) -> Result<(), ReceiverError>;
}

/// Resolver from contract address to receiver capability - outbound port.
pub trait ReceiverResolver: Send + Sync {
    /// Resolve a destination contract, if one is registered.
    fn resolve(&self, contract: Address) -> Option<std::sync::Arc<dyn MessageReceiver>>;
}

/// Batch-signature verifier - outbound port.
///
/// Isolates the pairing check so the relay's control flow is testable with
/// a fake verifier.
pub trait BatchVerifier: Send + Sync {
    /// Verify an aggregate signature over a batch digest.
    ///
    /// `Ok(false)` means a well-formed signature that does not verify;
    /// `Err` means malformed curve material.
    fn verify(
        &self,
        public_key: &BlsPublicKey,
        digest: &Hash,
        signature: &BlsSignature,
    ) -> Result<bool, SignatureError>;
}

/// Event sink - outbound port.
///
/// Consumed by the off-core relayer network.
pub trait EventPublisher: Send + Sync {
    /// Publish one relay event.
    fn publish(&self, event: RelayEvent);
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock verifier with a fixed verdict.
#[derive(Clone, Debug)]
pub struct MockVerifier {
    /// Verdict returned for every digest.
    pub accept: bool,
}

impl MockVerifier {
    /// A verifier that accepts everything.
    pub fn accepting() -> Self {
        Self { accept: true }
    }

    /// A verifier that rejects everything.
    pub fn rejecting() -> Self {
        Self { accept: false }
    }
}

impl BatchVerifier for MockVerifier {
    fn verify(
        &self,
        _public_key: &BlsPublicKey,
        _digest: &Hash,
        _signature: &BlsSignature,
    ) -> Result<bool, SignatureError> {
        Ok(self.accept)
    }
}

/// Mock receiver that records every delivery.
#[derive(Default)]
pub struct CountingReceiver {
    /// Recorded deliveries: (source chain, sender, payload).
    pub received: parking_lot::Mutex<Vec<(Hash, Address, Vec<u8>)>>,
}

impl CountingReceiver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of deliveries handled so far.
    pub fn count(&self) -> usize {
        self.received.lock().len()
    }
}

#[async_trait]
impl MessageReceiver for CountingReceiver {
    async fn handle(
        &self,
        source_chain: Hash,
        sender: Address,
        payload: &[u8],
    ) -> Result<(), ReceiverError> {
        self.received
            .lock()
            .push((source_chain, sender, payload.to_vec()));
        Ok(())
    }
}

/// Mock receiver whose handler always fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingReceiver;

#[async_trait]
impl MessageReceiver for FailingReceiver {
    async fn handle(
        &self,
        _source_chain: Hash,
        _sender: Address,
        _payload: &[u8],
    ) -> Result<(), ReceiverError> {
        Err(ReceiverError("handler rejected message".to_string()))
    }
}
