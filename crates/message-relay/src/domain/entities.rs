//! # Domain Entities
//!
//! The per-chain record, the wire-shaped message value, and the batch
//! digest that signatures commit to.

use relay_crypto::BlsPublicKey;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use shared_types::{Address, Hash};

use super::value_objects::KillStatus;

/// Per-chain record held by the registry.
///
/// Created on connect; disconnect and terminal kill only mark the record,
/// they never delete it, so counters survive for reconciliation and a later
/// reconnect resumes them (see `ChainRegistry::connect`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Chain {
    /// Human-readable chain name (the hash of which keys the registry).
    pub name: String,
    /// Whether the chain may currently exchange messages.
    pub connected: bool,
    /// Sequence number to assign to the next outgoing message.
    pub outgoing_counter: u64,
    /// Sequence number expected from the next incoming batch.
    pub incoming_counter: u64,
    /// Group public key attesting batches from this chain.
    ///
    /// `None` for chains whose key was never announced; incoming batches
    /// from such a chain cannot be verified.
    pub group_public_key: Option<BlsPublicKey>,
    /// Whether bidirectional interchain trust has been opened.
    pub interchain_connections_allowed: bool,
    /// Kill-protocol state.
    pub kill_status: KillStatus,
    /// Designated schain owner (a party to the kill protocol).
    pub owner: Address,
}

impl Chain {
    /// Create a freshly connected chain record.
    pub fn new(name: impl Into<String>, owner: Address, group_public_key: Option<BlsPublicKey>) -> Self {
        Self {
            name: name.into(),
            connected: true,
            outgoing_counter: 0,
            incoming_counter: 0,
            group_public_key,
            interchain_connections_allowed: false,
            kill_status: KillStatus::Active,
            owner,
        }
    }

    /// Check if the kill protocol completed for this chain.
    pub fn is_killed(&self) -> bool {
        self.kill_status.is_killed()
    }
}

/// A relayed message.
///
/// Shaped identically on the outgoing and incoming side: the emitting chain
/// assigns a sequence number and the receiving chain dispatches the payload
/// to `destination_contract`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Originating contract on the source chain.
    pub sender: Address,
    /// Contract to dispatch to on the destination chain.
    pub destination_contract: Address,
    /// Opaque payload; the relay never interprets it.
    pub payload: Vec<u8>,
}

impl Message {
    /// Create a message.
    pub fn new(sender: Address, destination_contract: Address, payload: Vec<u8>) -> Self {
        Self {
            sender,
            destination_contract,
            payload,
        }
    }
}

/// Digest an incoming batch for signature verification.
///
/// Commits to the destination chain id and the batch offset as well as every
/// message, so a valid batch cannot be replayed against another chain or at
/// another offset. Payloads are length-prefixed to keep message boundaries
/// unambiguous.
pub fn batch_digest(destination_chain: &Hash, starting_sequence: u64, messages: &[Message]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(destination_chain);
    hasher.update(starting_sequence.to_be_bytes());
    for message in messages {
        hasher.update(message.sender);
        hasher.update(message.destination_contract);
        hasher.update((message.payload.len() as u64).to_be_bytes());
        hasher.update(&message.payload);
    }
    hasher.finalize().into()
}
