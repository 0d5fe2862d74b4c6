//! # End-to-End Relay Flow
//!
//! Full delivery path with real BLS12-381 committee signatures:
//!
//! 1. **Origination**: a registered contract posts an outgoing message and
//!    the relay assigns the next sequence number
//! 2. **Attestation**: the committee signs the batch digest off-chain and a
//!    relayer submits the batch with the aggregate signature
//! 3. **Delivery**: the receiving relay verifies the aggregate against the
//!    chain's group public key and dispatches to destination contracts

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use message_relay::{
        batch_digest, BroadcastPublisher, CountingReceiver, InMemoryReceiverRegistry, LinkerApi,
        Message, MessageRelayApi, MessageRelayService, MockVerifier, RelayConfig, RelayError,
        RelayEvent,
    };
    use relay_crypto::BlsSignature;
    use shared_types::{chain_hash, mainnet_hash, Hash};

    use crate::fixtures::{
        Committee, RelayHarness, ADMIN, DEPOSIT_BOX, LINKER, SCHAIN_NAME, SCHAIN_OWNER,
    };

    const TOKEN_MANAGER: [u8; 20] = [0x77; 20];

    /// Reassemble relayer-shaped messages from published outgoing events.
    /// Events are recorded in posting order, so sequence order is preserved.
    fn collect_outgoing(events: &[RelayEvent], destination: Hash) -> Vec<Message> {
        events
            .iter()
            .filter_map(|event| match event {
                RelayEvent::OutgoingMessagePosted {
                    destination_chain,
                    sender,
                    destination_contract,
                    payload,
                    ..
                } if *destination_chain == destination => Some(Message::new(
                    *sender,
                    *destination_contract,
                    payload.clone(),
                )),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_mainnet_to_schain_end_to_end() {
        let committee = Committee::generate(4);
        let mainnet = RelayHarness::mainnet(committee.group_public_key());
        let schain = RelayHarness::schain(committee.group_public_key());

        let receiver = Arc::new(CountingReceiver::new());
        schain.receivers.register(TOKEN_MANAGER, receiver.clone());

        // Origination on Mainnet.
        let schain_id = chain_hash(SCHAIN_NAME);
        mainnet
            .service
            .post_outgoing_message(DEPOSIT_BOX, schain_id, TOKEN_MANAGER, vec![0x01])
            .unwrap();
        mainnet
            .service
            .post_outgoing_message(DEPOSIT_BOX, schain_id, TOKEN_MANAGER, vec![0x02, 0x03])
            .unwrap();

        // Relayer picks up the events and the committee attests the batch.
        let messages = collect_outgoing(&mainnet.publisher.snapshot(), schain_id);
        assert_eq!(messages.len(), 2);

        let digest = batch_digest(&schain.service.local_chain(), 0, &messages);
        let signature = committee.sign(&digest);

        // Delivery on the schain.
        schain
            .service
            .post_incoming_messages(mainnet_hash(), 0, messages, signature)
            .await
            .unwrap();

        assert_eq!(receiver.count(), 2);
        assert_eq!(
            schain
                .service
                .get_incoming_messages_counter(mainnet_hash())
                .unwrap(),
            2
        );
        let received = receiver.received.lock();
        assert_eq!(received[0], (mainnet_hash(), DEPOSIT_BOX, vec![0x01]));
        assert_eq!(received[1], (mainnet_hash(), DEPOSIT_BOX, vec![0x02, 0x03]));
    }

    #[tokio::test]
    async fn test_schain_to_mainnet_round_trip() {
        let committee = Committee::generate(4);
        let mainnet = RelayHarness::mainnet(committee.group_public_key());
        let schain = RelayHarness::schain(committee.group_public_key());

        let receiver = Arc::new(CountingReceiver::new());
        mainnet.receivers.register(DEPOSIT_BOX, receiver.clone());

        // Any schain contract may originate toward Mainnet.
        schain
            .service
            .post_outgoing_message(TOKEN_MANAGER, mainnet_hash(), DEPOSIT_BOX, vec![0xEE])
            .unwrap();

        let messages = collect_outgoing(&schain.publisher.snapshot(), mainnet_hash());
        let digest = batch_digest(&mainnet.service.local_chain(), 0, &messages);
        let signature = committee.sign(&digest);

        mainnet
            .service
            .post_incoming_messages(chain_hash(SCHAIN_NAME), 0, messages, signature)
            .await
            .unwrap();

        assert_eq!(receiver.count(), 1);
        assert_eq!(
            mainnet
                .service
                .get_incoming_messages_counter(chain_hash(SCHAIN_NAME))
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_tampered_batch_rejected() {
        let committee = Committee::generate(4);
        let schain = RelayHarness::schain(committee.group_public_key());

        let mut messages = vec![Message::new(DEPOSIT_BOX, TOKEN_MANAGER, vec![0x01])];
        let digest = batch_digest(&schain.service.local_chain(), 0, &messages);
        let signature = committee.sign(&digest);

        // Payload altered after signing.
        messages[0].payload[0] ^= 0xFF;
        assert_eq!(
            schain
                .service
                .post_incoming_messages(mainnet_hash(), 0, messages, signature)
                .await,
            Err(RelayError::InvalidSignature)
        );
    }

    #[tokio::test]
    async fn test_signature_bound_to_destination_chain() {
        let committee = Committee::generate(4);
        let schain = RelayHarness::schain(committee.group_public_key());

        let messages = vec![Message::new(DEPOSIT_BOX, TOKEN_MANAGER, vec![0x01])];
        // Digest computed for a different destination chain.
        let foreign_digest = batch_digest(&chain_hash("other-chain"), 0, &messages);
        let signature = committee.sign(&foreign_digest);

        assert_eq!(
            schain
                .service
                .post_incoming_messages(mainnet_hash(), 0, messages, signature)
                .await,
            Err(RelayError::InvalidSignature)
        );
    }

    #[tokio::test]
    async fn test_partial_committee_signature_rejected() {
        let committee = Committee::generate(4);
        let schain = RelayHarness::schain(committee.group_public_key());

        let messages = vec![Message::new(DEPOSIT_BOX, TOKEN_MANAGER, vec![0x01])];
        let digest = batch_digest(&schain.service.local_chain(), 0, &messages);
        // One signer short of the full group key.
        let signature = committee.sign_subset(3, &digest);

        assert_eq!(
            schain
                .service
                .post_incoming_messages(mainnet_hash(), 0, messages, signature)
                .await,
            Err(RelayError::InvalidSignature)
        );
    }

    #[tokio::test]
    async fn test_garbage_signature_reports_malformed() {
        let committee = Committee::generate(4);
        let schain = RelayHarness::schain(committee.group_public_key());

        let messages = vec![Message::new(DEPOSIT_BOX, TOKEN_MANAGER, vec![0x01])];
        let garbage = BlsSignature { bytes: [0xFF; 48] };

        assert!(matches!(
            schain
                .service
                .post_incoming_messages(mainnet_hash(), 0, messages, garbage)
                .await,
            Err(RelayError::MalformedSignature(_))
        ));
    }

    #[tokio::test]
    async fn test_skipped_message_resumes_delivery() {
        let committee = Committee::generate(4);
        let mainnet = RelayHarness::mainnet(committee.group_public_key());
        let schain = RelayHarness::schain(committee.group_public_key());

        let receiver = Arc::new(CountingReceiver::new());
        mainnet.receivers.register(DEPOSIT_BOX, receiver.clone());

        // Message 0 is permanently undeliverable (say, a malformed payload
        // the committee refuses to attest). The admin skips it.
        schain
            .service
            .post_outgoing_message(TOKEN_MANAGER, mainnet_hash(), DEPOSIT_BOX, vec![0xBA, 0xD0])
            .unwrap();
        schain
            .service
            .post_outgoing_message(TOKEN_MANAGER, mainnet_hash(), DEPOSIT_BOX, vec![0x60])
            .unwrap();

        let schain_id = chain_hash(SCHAIN_NAME);
        mainnet
            .service
            .move_incoming_counter(ADMIN, schain_id)
            .unwrap();

        // Delivery resumes at sequence 1 with only the second message.
        let messages = collect_outgoing(&schain.publisher.snapshot(), mainnet_hash());
        let batch = vec![messages[1].clone()];
        let digest = batch_digest(&mainnet.service.local_chain(), 1, &batch);
        let signature = committee.sign(&digest);

        mainnet
            .service
            .post_incoming_messages(schain_id, 1, batch, signature)
            .await
            .unwrap();

        assert_eq!(receiver.count(), 1);
        assert_eq!(
            mainnet
                .service
                .get_incoming_messages_counter(schain_id)
                .unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn test_broadcast_publisher_feeds_relayer() {
        let publisher = Arc::new(BroadcastPublisher::new(16));
        let service = MessageRelayService::new(
            RelayConfig::mainnet(ADMIN, LINKER),
            Arc::new(MockVerifier::accepting()),
            Arc::new(InMemoryReceiverRegistry::new()),
            publisher.clone(),
        );
        service.register_mainnet_contract(ADMIN, DEPOSIT_BOX).unwrap();
        service
            .connect_schain(ADMIN, SCHAIN_NAME, SCHAIN_OWNER, None, &[])
            .unwrap();

        let mut relayer = publisher.subscribe();
        service
            .post_outgoing_message(DEPOSIT_BOX, chain_hash(SCHAIN_NAME), TOKEN_MANAGER, vec![0xAB])
            .unwrap();

        let event = relayer.recv().await.expect("relayer receives event");
        match event {
            RelayEvent::OutgoingMessagePosted {
                sequence, payload, ..
            } => {
                assert_eq!(sequence, 0);
                assert_eq!(payload, vec![0xAB]);
            }
            other => panic!("expected OutgoingMessagePosted, got {:?}", other),
        }
    }
}
