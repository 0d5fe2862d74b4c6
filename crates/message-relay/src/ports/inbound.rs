//! # Inbound Ports
//!
//! API traits defining what the message relay can do. Every mutating entry
//! point takes the caller's address; the host ledger serializes calls, so
//! there is no in-process concurrency to reason about.

use async_trait::async_trait;
use relay_crypto::{BlsPublicKey, BlsSignature};
use shared_types::{Address, Hash};

use crate::domain::{Message, RelayError};

/// Message bus - inbound port.
///
/// Ordered message posting and signature-gated batch application.
#[async_trait]
pub trait MessageRelayApi: Send + Sync {
    /// Post an outgoing message toward a destination chain.
    ///
    /// Returns the assigned sequence number (starting at 0 per
    /// destination). On the Mainnet side the caller must be a registered
    /// mainnet contract; the schain side has no such restriction.
    fn post_outgoing_message(
        &self,
        caller: Address,
        destination_chain: Hash,
        destination_contract: Address,
        payload: Vec<u8>,
    ) -> Result<u64, RelayError>;

    /// Apply a signed batch of incoming messages.
    ///
    /// All-or-nothing with one documented exception: a handler failure
    /// inside an accepted batch is recorded per message and never aborts
    /// the batch. On success the incoming counter advances by exactly the
    /// batch length.
    async fn post_incoming_messages(
        &self,
        source_chain: Hash,
        starting_sequence: u64,
        messages: Vec<Message>,
        signature: BlsSignature,
    ) -> Result<(), RelayError>;

    /// Outgoing counter for a chain that has been connected at some point.
    fn get_outgoing_messages_counter(&self, chain: Hash) -> Result<u64, RelayError>;

    /// Incoming counter for a chain that has been connected at some point.
    fn get_incoming_messages_counter(&self, chain: Hash) -> Result<u64, RelayError>;

    /// Check connection state; Mainnet always reports connected.
    fn is_connected_chain(&self, chain: Hash) -> bool;

    /// Check membership in the authorized-caller registry.
    fn is_authorized_caller(&self, address: Address) -> bool;

    /// Reset both counters for chain re-initialization. Admin only.
    fn set_counters_to_zero(&self, caller: Address, chain: Hash) -> Result<(), RelayError>;

    /// Skip one permanently undeliverable message by advancing the incoming
    /// counter by exactly one without a signed batch. Admin only.
    fn move_incoming_counter(&self, caller: Address, chain: Hash) -> Result<(), RelayError>;
}

/// Linker - inbound port.
///
/// Chain lifecycle, the authorized-caller registry, and the kill protocol.
pub trait LinkerApi: Send + Sync {
    /// Connect a schain by name.
    ///
    /// `peer_addresses` must be empty or carry exactly one address per
    /// registered mainnet contract, none of them the zero address.
    /// `schain_owner` becomes the owner party of the kill protocol.
    fn connect_schain(
        &self,
        caller: Address,
        name: &str,
        schain_owner: Address,
        group_public_key: Option<BlsPublicKey>,
        peer_addresses: &[Address],
    ) -> Result<(), RelayError>;

    /// Disconnect a schain. Counters are preserved.
    fn unconnect_schain(&self, caller: Address, chain: Hash) -> Result<(), RelayError>;

    /// Add a contract to the authorized-caller registry. Idempotent.
    fn register_mainnet_contract(&self, caller: Address, contract: Address)
        -> Result<(), RelayError>;

    /// Remove a contract from the authorized-caller registry. Idempotent.
    fn remove_mainnet_contract(&self, caller: Address, contract: Address)
        -> Result<(), RelayError>;

    /// Record one party's kill approval for a chain.
    fn kill(&self, caller: Address, chain: Hash) -> Result<(), RelayError>;

    /// Open bidirectional interchain trust for a chain and announce it
    /// through the ordinary outgoing-message path.
    fn allow_interchain_connections(&self, caller: Address, chain: Hash)
        -> Result<(), RelayError>;

    /// Check that a chain has not completed the kill protocol.
    /// Unknown chains report `true` (status defaults to Active).
    fn is_not_killed(&self, chain: Hash) -> bool;

    /// Check whether interchain connections were opened for a chain.
    fn interchain_connections_allowed(&self, chain: Hash) -> bool;
}
