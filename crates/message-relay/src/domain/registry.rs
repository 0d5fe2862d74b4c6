//! # Chain Registry
//!
//! The per-chain record store. All mutation funnels through the documented
//! methods; chain ids are hashes of chain names and Mainnet's id is a
//! reserved sentinel that can never be connected or disconnected here.

use relay_crypto::BlsPublicKey;
use shared_types::{mainnet_hash, Address, Hash, MAINNET_NAME};
use tracing::info;

use super::entities::Chain;
use super::errors::RelayError;

/// Registry of chains known to this deployment, keyed by chain-id hash.
#[derive(Debug, Default)]
pub struct ChainRegistry {
    chains: std::collections::HashMap<Hash, Chain>,
}

impl ChainRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the implicit Mainnet record on a schain-side deployment.
    ///
    /// Mainnet carries no key of its own; `attestation_key` is the local
    /// committee's group key, used to verify batches arriving from Mainnet.
    pub fn seed_mainnet(&mut self, owner: Address, attestation_key: Option<BlsPublicKey>) {
        self.chains
            .insert(mainnet_hash(), Chain::new(MAINNET_NAME, owner, attestation_key));
    }

    /// Connect a chain.
    ///
    /// A record that already exists but is disconnected is reconnected and
    /// RESUMES its old counters; only `set_counters_to_zero` resets them.
    /// A reconnect refreshes the owner and group key.
    ///
    /// # Errors
    /// * `ReservedChainId` for the Mainnet sentinel
    /// * `AlreadyConnected` if the chain is currently connected
    pub fn connect(
        &mut self,
        chain: Hash,
        name: impl Into<String>,
        owner: Address,
        group_public_key: Option<BlsPublicKey>,
    ) -> Result<(), RelayError> {
        if chain == mainnet_hash() {
            return Err(RelayError::ReservedChainId);
        }
        match self.chains.get_mut(&chain) {
            Some(existing) if existing.connected => Err(RelayError::AlreadyConnected),
            Some(existing) => {
                info!(
                    chain = existing.name,
                    outgoing = existing.outgoing_counter,
                    incoming = existing.incoming_counter,
                    "reconnecting chain with preserved counters"
                );
                existing.connected = true;
                existing.owner = owner;
                existing.group_public_key = group_public_key;
                Ok(())
            }
            None => {
                let name = name.into();
                info!(chain = name, "connecting chain");
                self.chains.insert(chain, Chain::new(name, owner, group_public_key));
                Ok(())
            }
        }
    }

    /// Disconnect a chain, preserving its counters and kill status.
    ///
    /// # Errors
    /// * `ReservedChainId` for the Mainnet sentinel
    /// * `NotConnected` if the chain is not currently connected
    pub fn disconnect(&mut self, chain: Hash) -> Result<(), RelayError> {
        if chain == mainnet_hash() {
            return Err(RelayError::ReservedChainId);
        }
        match self.chains.get_mut(&chain) {
            Some(existing) if existing.connected => {
                info!(chain = existing.name, "disconnecting chain");
                existing.connected = false;
                Ok(())
            }
            _ => Err(RelayError::NotConnected),
        }
    }

    /// Check connection state. Mainnet always reports connected.
    pub fn is_connected(&self, chain: Hash) -> bool {
        if chain == mainnet_hash() && !self.chains.contains_key(&chain) {
            return true;
        }
        self.chains.get(&chain).is_some_and(|c| c.connected)
    }

    /// Look up a chain record, connected or not.
    pub fn get(&self, chain: Hash) -> Option<&Chain> {
        self.chains.get(&chain)
    }

    /// Mutable lookup of a chain record.
    pub fn get_mut(&mut self, chain: Hash) -> Option<&mut Chain> {
        self.chains.get_mut(&chain)
    }
}
