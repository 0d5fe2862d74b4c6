//! # Domain Value Objects
//!
//! Immutable value types: deployment side and the kill-protocol state
//! machine.

use serde::{Deserialize, Serialize};

/// Which side of the relay this deployment runs on.
///
/// The Mainnet side restricts message origination to registered contracts;
/// the schain side lets any local contract originate messages toward
/// Mainnet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentSide {
    /// Mainnet deployment (no group public key of its own).
    Mainnet,
    /// Schain deployment.
    Schain,
}

/// A party to the two-party kill protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillParty {
    /// The designated owner of the schain.
    SchainOwner,
    /// The node operator (relay admin).
    NodeOperator,
}

/// Kill-protocol state machine.
///
/// Both parties must independently approve before a chain is killed; the
/// order of approvals does not matter and `Killed` is terminal.
///
/// ```text
/// Active ──owner──▶ ApprovedBySchainOwner ──node──▶ Killed
///   └────node────▶ ApprovedByNode ────────owner──▶ Killed
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillStatus {
    /// No approval recorded; message flow is permitted.
    #[default]
    Active,
    /// Schain owner approved; awaiting the node operator.
    ApprovedBySchainOwner,
    /// Node operator approved; awaiting the schain owner.
    ApprovedByNode,
    /// Both parties approved. Terminal.
    Killed,
}

impl KillStatus {
    /// Record one party's approval, returning the next state.
    ///
    /// Returns `None` for a duplicate approval or any call after `Killed`.
    pub fn record_approval(self, party: KillParty) -> Option<KillStatus> {
        match (self, party) {
            (Self::Active, KillParty::SchainOwner) => Some(Self::ApprovedBySchainOwner),
            (Self::Active, KillParty::NodeOperator) => Some(Self::ApprovedByNode),
            (Self::ApprovedBySchainOwner, KillParty::NodeOperator) => Some(Self::Killed),
            (Self::ApprovedByNode, KillParty::SchainOwner) => Some(Self::Killed),
            _ => None,
        }
    }

    /// Check if the kill protocol completed.
    pub fn is_killed(&self) -> bool {
        matches!(self, Self::Killed)
    }

    /// Check if no approval has been recorded yet.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}
