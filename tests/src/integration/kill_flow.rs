//! # Kill Protocol Scenarios
//!
//! Two-party channel termination: the schain owner and the node operator
//! must independently approve, in either order, before a chain stops
//! accepting traffic.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use message_relay::{
        InMemoryReceiverRegistry, KillStatus, LinkerApi, MessageRelayApi, MessageRelayService,
        MockVerifier, RecordingPublisher, RelayConfig, RelayError, RelayEvent,
    };
    use relay_crypto::BlsSignature;
    use shared_types::{chain_hash, Address, Hash};

    use crate::fixtures::{ADMIN, DEPOSIT_BOX, LINKER, SCHAIN_NAME, SCHAIN_OWNER};

    fn relay_with_owner(owner: Address) -> (MessageRelayService, Arc<RecordingPublisher>) {
        let publisher = Arc::new(RecordingPublisher::new());
        let service = MessageRelayService::new(
            RelayConfig::mainnet(ADMIN, LINKER),
            Arc::new(MockVerifier::accepting()),
            Arc::new(InMemoryReceiverRegistry::new()),
            publisher.clone(),
        );
        service.register_mainnet_contract(ADMIN, DEPOSIT_BOX).unwrap();
        service
            .connect_schain(ADMIN, SCHAIN_NAME, owner, None, &[])
            .unwrap();
        (service, publisher)
    }

    fn schain_id() -> Hash {
        chain_hash(SCHAIN_NAME)
    }

    #[test]
    fn test_owner_then_operator_kills() {
        let (relay, _) = relay_with_owner(SCHAIN_OWNER);

        relay.kill(SCHAIN_OWNER, schain_id()).unwrap();
        assert!(relay.is_not_killed(schain_id()));

        relay.kill(ADMIN, schain_id()).unwrap();
        assert!(!relay.is_not_killed(schain_id()));
    }

    #[test]
    fn test_operator_then_owner_kills() {
        let (relay, _) = relay_with_owner(SCHAIN_OWNER);

        relay.kill(ADMIN, schain_id()).unwrap();
        assert!(relay.is_not_killed(schain_id()));

        relay.kill(SCHAIN_OWNER, schain_id()).unwrap();
        assert!(!relay.is_not_killed(schain_id()));
    }

    #[test]
    fn test_one_party_alone_cannot_kill() {
        let (relay, _) = relay_with_owner(SCHAIN_OWNER);

        relay.kill(SCHAIN_OWNER, schain_id()).unwrap();
        assert_eq!(
            relay.kill(SCHAIN_OWNER, schain_id()),
            Err(RelayError::AlreadyKilledOrWrongCaller)
        );
        assert!(relay.is_not_killed(schain_id()));
    }

    #[test]
    fn test_stranger_cannot_participate() {
        let (relay, _) = relay_with_owner(SCHAIN_OWNER);

        assert_eq!(
            relay.kill([0xEE; 20], schain_id()),
            Err(RelayError::AlreadyKilledOrWrongCaller)
        );
    }

    #[test]
    fn test_kill_after_killed_rejected() {
        let (relay, _) = relay_with_owner(SCHAIN_OWNER);

        relay.kill(SCHAIN_OWNER, schain_id()).unwrap();
        relay.kill(ADMIN, schain_id()).unwrap();
        assert_eq!(
            relay.kill(SCHAIN_OWNER, schain_id()),
            Err(RelayError::AlreadyKilledOrWrongCaller)
        );
        assert_eq!(
            relay.kill(ADMIN, schain_id()),
            Err(RelayError::AlreadyKilledOrWrongCaller)
        );
    }

    // A chain whose owner is the relay admin can be killed by that one
    // account in two calls: the first records the owner approval, the
    // second completes as the operator.
    #[test]
    fn test_dual_role_caller_completes_in_two_calls() {
        let (relay, _) = relay_with_owner(ADMIN);

        relay.kill(ADMIN, schain_id()).unwrap();
        assert!(relay.is_not_killed(schain_id()));

        relay.kill(ADMIN, schain_id()).unwrap();
        assert!(!relay.is_not_killed(schain_id()));
    }

    #[test]
    fn test_kill_emits_status_events() {
        let (relay, publisher) = relay_with_owner(SCHAIN_OWNER);

        relay.kill(SCHAIN_OWNER, schain_id()).unwrap();
        relay.kill(ADMIN, schain_id()).unwrap();

        let statuses: Vec<KillStatus> = publisher
            .snapshot()
            .iter()
            .filter_map(|event| match event {
                RelayEvent::KillStatusChanged { status, .. } => Some(*status),
                _ => None,
            })
            .collect();
        assert_eq!(
            statuses,
            vec![KillStatus::ApprovedBySchainOwner, KillStatus::Killed]
        );
    }

    #[tokio::test]
    async fn test_killed_chain_refuses_traffic_both_ways() {
        let (relay, _) = relay_with_owner(SCHAIN_OWNER);
        relay
            .post_outgoing_message(DEPOSIT_BOX, schain_id(), [0x77; 20], vec![0x01])
            .unwrap();

        relay.kill(SCHAIN_OWNER, schain_id()).unwrap();
        relay.kill(ADMIN, schain_id()).unwrap();

        assert_eq!(
            relay.post_outgoing_message(DEPOSIT_BOX, schain_id(), [0x77; 20], vec![0x02]),
            Err(RelayError::ChainKilled)
        );
        assert_eq!(
            relay
                .post_incoming_messages(
                    schain_id(),
                    0,
                    vec![],
                    BlsSignature { bytes: [2u8; 48] },
                )
                .await,
            Err(RelayError::ChainKilled)
        );

        // Counters stay readable for reconciliation.
        assert_eq!(relay.get_outgoing_messages_counter(schain_id()).unwrap(), 1);
        assert_eq!(relay.get_incoming_messages_counter(schain_id()).unwrap(), 0);
    }

    #[test]
    fn test_unknown_chain_reports_not_killed() {
        let (relay, _) = relay_with_owner(SCHAIN_OWNER);
        // Kill status defaults to Active for chains never seen.
        assert!(relay.is_not_killed(chain_hash("never-connected")));
    }

    #[test]
    fn test_open_interchain_blocks_kill_and_vice_versa() {
        // Open-then-kill on one chain.
        let (relay, _) = relay_with_owner(SCHAIN_OWNER);
        relay
            .allow_interchain_connections(ADMIN, schain_id())
            .unwrap();
        assert_eq!(
            relay.kill(SCHAIN_OWNER, schain_id()),
            Err(RelayError::InterchainConnectionsOn)
        );

        // Kill-then-open on a fresh chain.
        let (relay, _) = relay_with_owner(SCHAIN_OWNER);
        relay.kill(SCHAIN_OWNER, schain_id()).unwrap();
        assert_eq!(
            relay.allow_interchain_connections(ADMIN, schain_id()),
            Err(RelayError::KillInProgress)
        );
    }
}
