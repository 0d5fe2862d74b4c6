//! # Message Relay Core
//!
//! Ordered, authenticated message exchange between Mainnet and schains.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Let contracts on two independently operated ledgers exchange messages
//! without a trusted intermediary:
//! - Per-chain monotonic counters for exactly-once, in-order delivery
//! - BLS threshold-signature gating of incoming batches
//! - Two-party kill protocol (schain owner + node operator) for safe
//!   channel termination
//!
//! ## Module Structure
//!
//! ```text
//! message-relay/
//! ├── domain/          # Chain, Message, KillStatus, ChainRegistry, errors
//! ├── ports/           # MessageRelayApi, LinkerApi, receiver/verifier traits
//! ├── adapters/        # BLS verifier, receiver registry, event publishers
//! └── service.rs       # MessageRelayService (application service)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{
    BlsBatchVerifier, BroadcastPublisher, InMemoryReceiverRegistry, NoOpPublisher,
    RecordingPublisher,
};
pub use domain::{
    batch_digest, Chain, ChainRegistry, DeploymentSide, KillParty, KillStatus, Message,
    RelayError, RelayEvent,
};
pub use ports::{
    BatchVerifier, CountingReceiver, EventPublisher, FailingReceiver, LinkerApi, MessageReceiver,
    MessageRelayApi, MockVerifier, ReceiverError, ReceiverResolver,
};
pub use service::{MessageRelayService, RelayConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
