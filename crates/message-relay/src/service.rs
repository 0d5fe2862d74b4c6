//! # Message Relay Service
//!
//! Application service implementing the `MessageRelayApi` and `LinkerApi`
//! inbound ports.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Holds the chain registry and the authorized-caller set
//! - Uses the outbound ports for signature verification, destination
//!   dispatch, and event publication
//! - Delegates state-machine rules to the domain layer
//!
//! The host ledger serializes every call; the locks below only make the
//! service `Sync`, they are never contended within a transaction.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use relay_crypto::{BlsPublicKey, BlsSignature};
use shared_types::{chain_hash, mainnet_hash, Address, Hash, ZERO_ADDRESS};
use tracing::{debug, info, warn};

use crate::domain::{
    batch_digest, ChainRegistry, DeploymentSide, KillParty, KillStatus, Message, RelayError,
    RelayEvent,
};
use crate::ports::inbound::{LinkerApi, MessageRelayApi};
use crate::ports::outbound::{BatchVerifier, EventPublisher, ReceiverResolver};

/// Static configuration of one relay deployment.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// Which side of the relay this deployment runs on.
    pub side: DeploymentSide,
    /// Name of the chain this deployment runs on; the batch digest binds
    /// incoming batches to its hash.
    pub local_chain_name: String,
    /// Relay admin. Owner of all administrative entry points and the
    /// node-operator party of the kill protocol.
    pub admin: Address,
    /// Identity used as sender of relay-originated announcements.
    pub linker_address: Address,
    /// Schain side only: the local committee's group key, used to verify
    /// batches arriving from Mainnet (which has no key of its own).
    pub mainnet_group_key: Option<BlsPublicKey>,
}

impl RelayConfig {
    /// Configuration for a Mainnet-side deployment.
    pub fn mainnet(admin: Address, linker_address: Address) -> Self {
        Self {
            side: DeploymentSide::Mainnet,
            local_chain_name: shared_types::MAINNET_NAME.to_string(),
            admin,
            linker_address,
            mainnet_group_key: None,
        }
    }

    /// Configuration for a schain-side deployment.
    pub fn schain(
        name: impl Into<String>,
        admin: Address,
        linker_address: Address,
        mainnet_group_key: BlsPublicKey,
    ) -> Self {
        Self {
            side: DeploymentSide::Schain,
            local_chain_name: name.into(),
            admin,
            linker_address,
            mainnet_group_key: Some(mainnet_group_key),
        }
    }
}

/// The relay core: message bus, chain registry, kill protocol, linker.
pub struct MessageRelayService {
    config: RelayConfig,
    local_chain: Hash,
    registry: RwLock<ChainRegistry>,
    authorized: RwLock<HashSet<Address>>,
    verifier: Arc<dyn BatchVerifier>,
    resolver: Arc<dyn ReceiverResolver>,
    publisher: Arc<dyn EventPublisher>,
}

impl MessageRelayService {
    /// Create a relay service.
    ///
    /// On a schain-side deployment the Mainnet record is seeded
    /// immediately: Mainnet is implicitly connected and is never the
    /// subject of `connect_schain`.
    pub fn new(
        config: RelayConfig,
        verifier: Arc<dyn BatchVerifier>,
        resolver: Arc<dyn ReceiverResolver>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        let mut registry = ChainRegistry::new();
        if config.side == DeploymentSide::Schain {
            registry.seed_mainnet(config.admin, config.mainnet_group_key.clone());
        }
        let local_chain = chain_hash(&config.local_chain_name);
        Self {
            config,
            local_chain,
            registry: RwLock::new(registry),
            authorized: RwLock::new(HashSet::new()),
            verifier,
            resolver,
            publisher,
        }
    }

    /// The local chain id that incoming batch digests are bound to.
    pub fn local_chain(&self) -> Hash {
        self.local_chain
    }

    fn require_admin(&self, caller: Address) -> Result<(), RelayError> {
        if caller != self.config.admin {
            return Err(RelayError::AdminRequired);
        }
        Ok(())
    }

    /// Assign the next sequence number toward a destination and emit the
    /// message. Connection and kill checks apply; authorization is the
    /// public entry point's concern.
    fn post_outgoing_from(
        &self,
        sender: Address,
        destination_chain: Hash,
        destination_contract: Address,
        payload: Vec<u8>,
    ) -> Result<u64, RelayError> {
        let sequence = {
            let mut registry = self.registry.write();
            let chain = registry
                .get_mut(destination_chain)
                .filter(|c| c.connected)
                .ok_or(RelayError::DestinationNotConnected)?;
            if chain.is_killed() {
                return Err(RelayError::ChainKilled);
            }
            let sequence = chain.outgoing_counter;
            chain.outgoing_counter += 1;
            sequence
        };

        debug!(
            destination = ?destination_chain,
            sequence,
            payload_len = payload.len(),
            "posted outgoing message"
        );
        self.publisher.publish(RelayEvent::OutgoingMessagePosted {
            destination_chain,
            sequence,
            sender,
            destination_contract,
            payload,
        });
        Ok(sequence)
    }
}

#[async_trait]
impl MessageRelayApi for MessageRelayService {
    fn post_outgoing_message(
        &self,
        caller: Address,
        destination_chain: Hash,
        destination_contract: Address,
        payload: Vec<u8>,
    ) -> Result<u64, RelayError> {
        // Any schain-side contract may originate messages; the Mainnet
        // side restricts origination to registered contracts.
        if self.config.side == DeploymentSide::Mainnet && !self.is_authorized_caller(caller) {
            return Err(RelayError::UnauthorizedSender);
        }
        self.post_outgoing_from(caller, destination_chain, destination_contract, payload)
    }

    async fn post_incoming_messages(
        &self,
        source_chain: Hash,
        starting_sequence: u64,
        messages: Vec<Message>,
        signature: BlsSignature,
    ) -> Result<(), RelayError> {
        // Preconditions, in order, while the registry lock is held. The
        // lock is released across the handler awaits below; the host ledger
        // serializes submissions, so no second batch can pass this check at
        // the same offset in the meantime.
        let public_key = {
            let registry = self.registry.read();
            let chain = registry
                .get(source_chain)
                .filter(|c| c.connected)
                .ok_or(RelayError::SourceNotConnected)?;
            if chain.is_killed() {
                return Err(RelayError::ChainKilled);
            }
            if starting_sequence != chain.incoming_counter {
                return Err(RelayError::SequenceMismatch {
                    expected: chain.incoming_counter,
                    got: starting_sequence,
                });
            }
            chain
                .group_public_key
                .clone()
                .ok_or(RelayError::NoPublicKey)?
        };

        let digest = batch_digest(&self.local_chain, starting_sequence, &messages);
        if !self.verifier.verify(&public_key, &digest, &signature)? {
            return Err(RelayError::InvalidSignature);
        }

        // Dispatch. A handler failure is recorded and never aborts the
        // batch: one stuck destination must not stall the relay.
        let mut delivered = 0usize;
        let mut failed = 0usize;
        for (index, message) in messages.iter().enumerate() {
            let sequence = starting_sequence + index as u64;
            let outcome = match self.resolver.resolve(message.destination_contract) {
                Some(receiver) => receiver
                    .handle(source_chain, message.sender, &message.payload)
                    .await
                    .map_err(|e| e.to_string()),
                None => Err("no receiver registered for destination contract".to_string()),
            };
            match outcome {
                Ok(()) => delivered += 1,
                Err(reason) => {
                    failed += 1;
                    warn!(
                        source = ?source_chain,
                        sequence,
                        destination = ?message.destination_contract,
                        reason,
                        "message delivery failed inside accepted batch"
                    );
                    self.publisher.publish(RelayEvent::MessageDeliveryFailed {
                        source_chain,
                        sequence,
                        destination_contract: message.destination_contract,
                        reason,
                    });
                }
            }
        }

        // The counter advances by the full batch length regardless of
        // per-message outcomes.
        {
            let mut registry = self.registry.write();
            if let Some(chain) = registry.get_mut(source_chain) {
                chain.incoming_counter += messages.len() as u64;
            }
        }

        info!(
            source = ?source_chain,
            starting_sequence,
            delivered,
            failed,
            "applied incoming batch"
        );
        self.publisher.publish(RelayEvent::IncomingBatchApplied {
            source_chain,
            starting_sequence,
            delivered,
            failed,
        });
        Ok(())
    }

    fn get_outgoing_messages_counter(&self, chain: Hash) -> Result<u64, RelayError> {
        self.registry
            .read()
            .get(chain)
            .map(|c| c.outgoing_counter)
            .ok_or(RelayError::NotConnected)
    }

    fn get_incoming_messages_counter(&self, chain: Hash) -> Result<u64, RelayError> {
        self.registry
            .read()
            .get(chain)
            .map(|c| c.incoming_counter)
            .ok_or(RelayError::NotConnected)
    }

    fn is_connected_chain(&self, chain: Hash) -> bool {
        self.registry.read().is_connected(chain)
    }

    fn is_authorized_caller(&self, address: Address) -> bool {
        self.authorized.read().contains(&address)
    }

    fn set_counters_to_zero(&self, caller: Address, chain: Hash) -> Result<(), RelayError> {
        self.require_admin(caller)?;
        {
            let mut registry = self.registry.write();
            let record = registry.get_mut(chain).ok_or(RelayError::NotConnected)?;
            record.outgoing_counter = 0;
            record.incoming_counter = 0;
        }
        info!(chain = ?chain, "reset both message counters");
        self.publisher.publish(RelayEvent::CountersReset { chain });
        Ok(())
    }

    fn move_incoming_counter(&self, caller: Address, chain: Hash) -> Result<(), RelayError> {
        self.require_admin(caller)?;
        let new_value = {
            let mut registry = self.registry.write();
            let record = registry.get_mut(chain).ok_or(RelayError::NotConnected)?;
            record.incoming_counter += 1;
            record.incoming_counter
        };
        info!(
            chain = ?chain,
            new_value,
            "advanced incoming counter without a signed batch"
        );
        self.publisher
            .publish(RelayEvent::IncomingCounterMoved { chain, new_value });
        Ok(())
    }
}

impl LinkerApi for MessageRelayService {
    fn connect_schain(
        &self,
        caller: Address,
        name: &str,
        schain_owner: Address,
        group_public_key: Option<BlsPublicKey>,
        peer_addresses: &[Address],
    ) -> Result<(), RelayError> {
        self.require_admin(caller)?;

        // Either no peers, or one per registered mainnet contract.
        let expected = self.authorized.read().len();
        if !peer_addresses.is_empty() && peer_addresses.len() != expected {
            return Err(RelayError::IncorrectAddressCount {
                expected,
                got: peer_addresses.len(),
            });
        }
        if peer_addresses.contains(&ZERO_ADDRESS) {
            return Err(RelayError::IncorrectPeerAddress);
        }

        self.registry
            .write()
            .connect(chain_hash(name), name, schain_owner, group_public_key)
    }

    fn unconnect_schain(&self, caller: Address, chain: Hash) -> Result<(), RelayError> {
        self.require_admin(caller)?;
        self.registry.write().disconnect(chain)
    }

    fn register_mainnet_contract(
        &self,
        caller: Address,
        contract: Address,
    ) -> Result<(), RelayError> {
        self.require_admin(caller)?;
        // Idempotent: re-registering is a no-op success.
        self.authorized.write().insert(contract);
        debug!(contract = ?contract, "registered mainnet contract");
        Ok(())
    }

    fn remove_mainnet_contract(
        &self,
        caller: Address,
        contract: Address,
    ) -> Result<(), RelayError> {
        self.require_admin(caller)?;
        // Idempotent: removing an absent entry is a no-op success.
        self.authorized.write().remove(&contract);
        debug!(contract = ?contract, "removed mainnet contract");
        Ok(())
    }

    fn kill(&self, caller: Address, chain: Hash) -> Result<(), RelayError> {
        // Mainnet can never be killed, even where the admin is recorded as
        // its owner (schain-side seeding).
        if chain == mainnet_hash() {
            return Err(RelayError::ReservedChainId);
        }
        let status = {
            let mut registry = self.registry.write();
            let record = registry.get_mut(chain).ok_or(RelayError::NotConnected)?;
            if record.interchain_connections_allowed {
                return Err(RelayError::InterchainConnectionsOn);
            }

            let is_owner = caller == record.owner;
            let is_operator = caller == self.config.admin;
            let party = match record.kill_status {
                KillStatus::Active | KillStatus::ApprovedByNode if is_owner => {
                    KillParty::SchainOwner
                }
                KillStatus::Active | KillStatus::ApprovedBySchainOwner if is_operator => {
                    KillParty::NodeOperator
                }
                _ => return Err(RelayError::AlreadyKilledOrWrongCaller),
            };
            let next = record
                .kill_status
                .record_approval(party)
                .ok_or(RelayError::AlreadyKilledOrWrongCaller)?;
            record.kill_status = next;
            next
        };

        info!(chain = ?chain, ?status, "kill approval recorded");
        self.publisher
            .publish(RelayEvent::KillStatusChanged { chain, status });
        Ok(())
    }

    fn allow_interchain_connections(
        &self,
        caller: Address,
        chain: Hash,
    ) -> Result<(), RelayError> {
        self.require_admin(caller)?;
        if chain == mainnet_hash() {
            return Err(RelayError::ReservedChainId);
        }
        {
            let mut registry = self.registry.write();
            let record = registry
                .get_mut(chain)
                .filter(|c| c.connected)
                .ok_or(RelayError::DestinationNotInitialized)?;
            if !record.kill_status.is_active() {
                return Err(RelayError::KillInProgress);
            }
            record.interchain_connections_allowed = true;
        }

        info!(chain = ?chain, "interchain connections allowed");
        self.publisher
            .publish(RelayEvent::InterchainConnectionsAllowed { chain });

        // Zero-length, self-addressed receipt through the ordinary
        // outgoing path, so the peer observes the opening like any other
        // message.
        self.post_outgoing_from(
            self.config.linker_address,
            chain,
            self.config.linker_address,
            Vec::new(),
        )?;
        Ok(())
    }

    fn is_not_killed(&self, chain: Hash) -> bool {
        self.registry
            .read()
            .get(chain)
            .map(|c| !c.is_killed())
            .unwrap_or(true)
    }

    fn interchain_connections_allowed(&self, chain: Hash) -> bool {
        self.registry
            .read()
            .get(chain)
            .map(|c| c.interchain_connections_allowed)
            .unwrap_or(false)
    }
}
