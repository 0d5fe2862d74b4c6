//! # Domain Errors
//!
//! Error taxonomy for the message relay.
//!
//! Authorization errors are surfaced and never retried automatically;
//! state-precondition errors require the caller to resynchronize (re-read
//! counters) before retrying; cryptographic errors are fatal for the
//! submission that carried them.

use relay_crypto::SignatureError;
use thiserror::Error;

/// Message relay error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelayError {
    /// Chain is already connected.
    #[error("Chain is already connected")]
    AlreadyConnected,

    /// The Mainnet chain id is a reserved sentinel.
    #[error("Mainnet chain id is reserved")]
    ReservedChainId,

    /// Chain was never connected.
    #[error("Chain is not connected")]
    NotConnected,

    /// Destination chain of an outgoing message is not connected.
    #[error("Destination chain is not connected")]
    DestinationNotConnected,

    /// Source chain of an incoming batch is not connected.
    #[error("Source chain is not connected")]
    SourceNotConnected,

    /// Caller is not a registered mainnet contract.
    #[error("Sender is not an authorized caller")]
    UnauthorizedSender,

    /// Administrative operation attempted by a non-admin caller.
    #[error("Caller is not the relay admin")]
    AdminRequired,

    /// Batch offset does not match the chain's incoming counter.
    ///
    /// Rejects both replays of already-applied batches and gapped batches;
    /// the relayer must re-read the counter and retry at the right offset.
    #[error("Starting sequence {got} does not match incoming counter {expected}")]
    SequenceMismatch {
        /// Current incoming counter
        expected: u64,
        /// Submitted starting sequence
        got: u64,
    },

    /// Aggregate signature does not verify over the batch digest.
    #[error("Aggregate signature does not verify")]
    InvalidSignature,

    /// No group public key registered for the source chain.
    #[error("No group public key registered for chain")]
    NoPublicKey,

    /// Malformed curve point or wrong component length.
    #[error(transparent)]
    MalformedSignature(#[from] SignatureError),

    /// Chain has completed the kill protocol; no new traffic is accepted.
    #[error("Chain is killed")]
    ChainKilled,

    /// A chain with open interchain connections cannot be killed.
    #[error("Interchain connections turned on")]
    InterchainConnectionsOn,

    /// Kill caller is not a party to the protocol, or its approval was
    /// already recorded, or the chain is already killed.
    #[error("Already killed or incorrect sender")]
    AlreadyKilledOrWrongCaller,

    /// Interchain connections cannot be opened once a kill approval exists.
    #[error("Schain is in kill process")]
    KillInProgress,

    /// `allow_interchain_connections` on a chain that was never connected.
    #[error("Destination chain is not initialized")]
    DestinationNotInitialized,

    /// Peer-address count must be zero or match the registered contracts.
    #[error("Incorrect number of addresses: expected 0 or {expected}, got {got}")]
    IncorrectAddressCount {
        /// Number of registered mainnet contracts
        expected: usize,
        /// Number of supplied peer addresses
        got: usize,
    },

    /// The zero address is not a valid peer contract.
    #[error("Incorrect peer contract address")]
    IncorrectPeerAddress,
}
