//! Receiver Registry Adapter
//!
//! Implements the `ReceiverResolver` port with an in-memory map from
//! contract address to receiver capability.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared_types::Address;
use tracing::debug;

use crate::ports::outbound::{MessageReceiver, ReceiverResolver};

/// In-memory receiver registry.
///
/// In production the resolver fronts the host ledger's contract table; this
/// adapter backs unit and integration tests and embedded deployments.
#[derive(Default)]
pub struct InMemoryReceiverRegistry {
    receivers: RwLock<HashMap<Address, Arc<dyn MessageReceiver>>>,
}

impl InMemoryReceiverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a receiver under a contract address, replacing any previous
    /// registration.
    pub fn register(&self, contract: Address, receiver: Arc<dyn MessageReceiver>) {
        debug!(contract = ?contract, "registering message receiver");
        self.receivers.write().insert(contract, receiver);
    }

    /// Remove a receiver registration.
    pub fn unregister(&self, contract: Address) {
        self.receivers.write().remove(&contract);
    }
}

impl ReceiverResolver for InMemoryReceiverRegistry {
    fn resolve(&self, contract: Address) -> Option<Arc<dyn MessageReceiver>> {
        self.receivers.read().get(&contract).cloned()
    }
}
