//! # Relay Events
//!
//! Notifications emitted for the off-core relayer network: every accepted
//! outgoing message, batch application outcomes, kill-state transitions,
//! and counter maintenance.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash};

use super::value_objects::KillStatus;

/// Events published by the relay core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayEvent {
    /// An outgoing message was accepted and assigned a sequence number.
    ///
    /// Relayers collect these, batch them, and obtain a committee signature.
    OutgoingMessagePosted {
        /// Destination chain id.
        destination_chain: Hash,
        /// Assigned sequence number (starts at 0 per destination).
        sequence: u64,
        /// Originating contract.
        sender: Address,
        /// Contract to dispatch to on the destination chain.
        destination_contract: Address,
        /// Opaque payload.
        payload: Vec<u8>,
    },

    /// A verified incoming batch was applied and the counter advanced.
    IncomingBatchApplied {
        /// Source chain id.
        source_chain: Hash,
        /// Offset the batch was applied at.
        starting_sequence: u64,
        /// Messages whose handler completed.
        delivered: usize,
        /// Messages whose handler failed (swallowed, batch still applied).
        failed: usize,
    },

    /// A single message inside an accepted batch failed to deliver.
    MessageDeliveryFailed {
        /// Source chain id.
        source_chain: Hash,
        /// Sequence number of the failed message.
        sequence: u64,
        /// Contract the dispatch was addressed to.
        destination_contract: Address,
        /// Handler failure description.
        reason: String,
    },

    /// A kill-protocol approval was recorded or completed.
    KillStatusChanged {
        /// Affected chain id.
        chain: Hash,
        /// Resulting status.
        status: KillStatus,
    },

    /// Bidirectional interchain trust was opened for a chain.
    InterchainConnectionsAllowed {
        /// Affected chain id.
        chain: Hash,
    },

    /// The incoming counter was advanced without a signed batch.
    ///
    /// Distinct from `IncomingBatchApplied` so reconciliation can tell a
    /// skipped message from a delivered one.
    IncomingCounterMoved {
        /// Affected chain id.
        chain: Hash,
        /// Counter value after the move.
        new_value: u64,
    },

    /// Both counters were reset to zero for chain re-initialization.
    CountersReset {
        /// Affected chain id.
        chain: Hash,
    },
}
