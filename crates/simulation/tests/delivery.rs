//! Delivery properties of the message bus.
//!
//! These run real clock peers over the bus under many seeds, since delivery
//! order is the only thing that varies between runs.

use pvtp_core::{Outbox, RoutingError};
use pvtp_peer::{ClockPeer, ReplyPolicy};
use pvtp_simulation::{DeliveryError, MessageBus, PeerTable};
use pvtp_test_helpers::{
    clock_peer_at, clock_table, peer_ids, stamped_envelope, MisroutingDirectory,
};
use pvtp_types::{Content, LogicalClock, PeerId, Stamped};
use tracing_test::traced_test;

const NAMES: [&str; 4] = ["A", "B", "C", "D"];

/// Every peer greets every other peer through the first peer's clock.
fn seed_greetings(bus: &mut MessageBus<Stamped>, peers: &mut PeerTable<ClockPeer>) {
    let ids = peer_ids(&NAMES);
    let first = peers.get_index_mut(0).unwrap();
    for id in ids {
        first.send(id, Content::text("hi!"), bus);
    }
}

#[test]
fn test_deliver_one_conserves_envelopes() {
    for seed in 0..50 {
        let mut bus = MessageBus::new(seed);
        let mut peers = clock_table(&NAMES, ReplyPolicy::Silent);
        seed_greetings(&mut bus, &mut peers);

        while !bus.is_empty() {
            let before: Vec<_> = bus.pending().map(|e| e.payload().clock).collect();
            let receipt = bus.deliver_one(&mut peers).unwrap().unwrap();
            let after: Vec<_> = bus.pending().map(|e| e.payload().clock).collect();

            assert_eq!(before.len(), after.len() + 1);
            // Clocks from one sender are unique, so they identify envelopes
            let delivered = receipt.clock.unwrap();
            assert!(before.contains(&delivered));
            assert!(!after.contains(&delivered));
        }
    }
}

#[test]
fn test_deliver_all_is_bounded_by_snapshot() {
    for seed in 0..20 {
        let mut bus = MessageBus::new(seed);
        let mut peers = clock_table(&NAMES, ReplyPolicy::AckEverything);
        seed_greetings(&mut bus, &mut peers);

        // Every receipt replies, so the pending count never shrinks
        for _ in 0..10 {
            let k = bus.pending_len();
            let delivered_before = bus.stats().delivered;

            let receipts = bus.deliver_all(&mut peers).unwrap();

            assert_eq!(receipts.len(), k);
            assert_eq!(bus.stats().delivered - delivered_before, k as u64);
            assert_eq!(bus.pending_len(), k);
        }
        assert_eq!(bus.stats().rounds, 10);
    }
}

#[test]
fn test_replies_wait_for_next_step() {
    let mut bus = MessageBus::new(9);
    let mut peers = clock_table(&["A", "B"], ReplyPolicy::AckNonTerminal);
    bus.push(stamped_envelope("A", "B", 1, "hi"));

    let receipts = bus.deliver_all(&mut peers).unwrap();

    // The ack from B is pending, not delivered in the same round
    assert_eq!(receipts.len(), 1);
    assert_eq!(bus.pending_len(), 1);
    let ack = bus.pending().next().unwrap();
    assert_eq!(ack.destination(), &PeerId::from("A"));
    assert_eq!(ack.payload().content, Content::Ack);
}

#[test]
fn test_deliver_forever_drains_terminal_protocol() {
    for seed in 0..20 {
        let mut bus = MessageBus::new(seed);
        let mut peers = clock_table(&NAMES, ReplyPolicy::AckNonTerminal);
        seed_greetings(&mut bus, &mut peers);

        let steps = bus.deliver_forever(&mut peers).unwrap();

        // Four greetings, four acks, and nothing acknowledges an ack
        assert_eq!(steps, 8);
        assert!(bus.is_empty());
    }
}

#[test]
fn test_deliver_until_idle_caps_endless_protocol() {
    let mut bus = MessageBus::new(5);
    let mut peers = clock_table(&NAMES, ReplyPolicy::AckEverything);
    seed_greetings(&mut bus, &mut peers);

    let steps = bus.deliver_until_idle(&mut peers, 100).unwrap();

    assert_eq!(steps, 100);
    assert_eq!(bus.pending_len(), 4);
}

#[test]
fn test_clocks_monotonic_under_random_schedules() {
    for seed in 0..30 {
        let mut bus = MessageBus::new(seed);
        let mut peers = clock_table(&NAMES, ReplyPolicy::AckEverything);
        seed_greetings(&mut bus, &mut peers);

        let mut last: Vec<LogicalClock> = peers.iter().map(ClockPeer::clock).collect();
        for _ in 0..200 {
            let receipt = bus.deliver_one(&mut peers).unwrap().unwrap();
            let receiver = peers.get(&receipt.to).unwrap();
            assert!(receiver.clock() >= receipt.clock.unwrap());

            let now: Vec<LogicalClock> = peers.iter().map(ClockPeer::clock).collect();
            for (before, after) in last.iter().zip(&now) {
                assert!(after >= before);
            }
            last = now;
        }
    }
}

#[test]
fn test_misrouted_envelope_is_rejected() {
    let mut bus = MessageBus::new(1);
    let mut wrong = MisroutingDirectory::new(clock_peer_at("C", 4, ReplyPolicy::AckNonTerminal));
    bus.push(stamped_envelope("A", "B", 9, "for B"));

    let err = bus.deliver_one(&mut wrong).unwrap_err();

    assert_eq!(
        err,
        DeliveryError::Routing(RoutingError::Misaddressed {
            receiver: PeerId::from("C"),
            source_peer: PeerId::from("A"),
            destination: PeerId::from("B"),
        })
    );
    assert_eq!(wrong.peer.clock(), LogicalClock(4));
    assert!(bus.is_empty());
}

#[traced_test]
#[test]
fn test_gap_surfaces_through_bus() {
    let mut bus = MessageBus::new(2);
    let mut peers = PeerTable::new();
    peers
        .insert(clock_peer_at("C", 5, ReplyPolicy::Silent))
        .unwrap();
    bus.push(stamped_envelope("A", "C", 9, "late"));

    let receipt = bus.deliver_one(&mut peers).unwrap().unwrap();

    assert_eq!(receipt.lost_count(), 3);
    assert_eq!(peers.get(&PeerId::from("C")).unwrap().clock(), LogicalClock(9));
    assert!(logs_contain("Delivering envelope"));
}
