//! End-to-end scenarios for the BitActor stack.
//!
//! These tests drive the full pipeline — Compile → Assemble → Tick →
//! Verify — through the harness, checking the literal outcomes each
//! scenario pins down.

use pretty_assertions::assert_eq;

use bitactor_aot::NanoRegex;
use bitactor_foundation::{fnv1a64, ActorSlot};
use bitactor_learning::{LearningMatrix, LearningMode};
use bitactor_tests::TestHarness;

/// Single actor, single tick, no signals: the hot path runs once, sets
/// the validity bit, leaves the pending-signal bit clear, and advances
/// the counters by exactly one.
#[test]
fn test_single_actor_single_tick_no_signals() {
    let mut harness = TestHarness::from_spec("noop_spec");
    let actor_ref = harness.add_actor(0x00, None);

    let executed = harness.tick(&[]);
    assert_eq!(executed, 1);

    let actor = harness.actor(actor_ref);
    assert_eq!(actor.tick_count(), 1);
    assert_eq!(actor.causal_vector(), 1);
    assert_ne!(actor.meaning() & 0x02, 0, "validity bit must be set");
    assert_eq!(actor.meaning() & 0x20, 0, "no pending signal was offered");
}

/// A feed pattern matches its own hash and the trigger-detect hop sees
/// the match on the next tick, for every actor in the domain.
#[test]
fn test_nanoregex_match_drives_trigger_detect() {
    let mut harness = TestHarness::from_spec("feed_spec");
    let a = harness.add_actor(0x00, None);
    let b = harness.add_actor(0x00, None);
    let h = harness.add_feed_pattern("benchmark_pattern");

    harness
        .domain_mut()
        .feed_mut()
        .update(&[h, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(harness.domain().feed().match_count(), 1);

    harness.tick(&[h, 0, 0, 0, 0, 0, 0, 0]);
    assert_ne!(harness.actor(a).hop_mask() & 0x01, 0);
    assert_ne!(harness.actor(b).hop_mask() & 0x01, 0);
}

/// Bounded propagation: a three-hop signal applies its payload to the
/// target with a decremented hop budget; driving the budget to zero
/// drops the signal into the rejection counter.
#[test]
fn test_bounded_propagation_chain() {
    let mut harness = TestHarness::from_spec("entangle_spec");
    harness.add_actor(0x00, None);
    let target = harness.add_actor(0x00, None);
    let oracle = harness.domain_mut().oracle_mut();
    oracle
        .create(ActorSlot::new(0), ActorSlot::new(1), 0xFF)
        .unwrap();

    let enqueued = oracle.propagate_signal(ActorSlot::new(0), 0xFF, 3);
    assert_eq!(enqueued, 1);
    assert_eq!(oracle.peek_tail().unwrap().hop_count, 2);

    harness.domain_mut().process_entanglement();
    assert_eq!(harness.actor(target).meaning() & 0xFF, 0xFF);

    // Drive the hop budget down to zero; the spent signal is dropped and
    // counted, never applied.
    let oracle = harness.domain_mut().oracle_mut();
    oracle.propagate_signal(ActorSlot::new(0), 0xFF, 2);
    harness.domain_mut().process_entanglement();

    let oracle = harness.domain_mut().oracle_mut();
    oracle.propagate_signal(ActorSlot::new(0), 0xFF, 1);
    assert_eq!(oracle.peek_tail().unwrap().hop_count, 0);
    harness.domain_mut().process_entanglement();

    assert_eq!(harness.domain().oracle().metrics().bounded_rejections, 1);
}

/// A dark triple with threshold one activates on its first matching
/// signal and mutates its target actor.
#[test]
fn test_dark_triple_activation() {
    let mut harness = TestHarness::from_spec("dark_spec");
    harness.add_actor(0x00, None);
    harness.add_actor(0x00, None);
    let target = harness.add_actor(0x00, None);

    let slot = harness
        .matrix_mut()
        .dark_triples_mut()
        .register(0x80, 0xFF, target, 1)
        .unwrap();

    harness.tick(&[0x80]);

    let dark = harness.matrix().dark_triples();
    assert!(dark.triple(slot).unwrap().is_active);
    assert_eq!(dark.metrics().total_activations, 1);
    assert_ne!(harness.actor(target).meaning() & 0x80, 0);
}

/// Sixteen adapting learning actors over a thousand ticks: the learning
/// step never costs the hot path its sub-100ns budget, and any actor that
/// did breach would have had its learning disabled.
#[test]
fn test_learning_preserves_budget() {
    let manifest = bitactor_aot::compile("adaptive_fleet_spec").unwrap();
    let mut matrix = LearningMatrix::new();
    let mut slots = Vec::new();
    for i in 0..16u8 {
        let slot = matrix.add_ls_actor(i, &manifest).unwrap();
        matrix
            .add_pattern(slot, &[i, i ^ 0xFF, 0x10, 0x01], 0.8)
            .unwrap();
        matrix.set_learning_mode(slot, LearningMode::Adapt).unwrap();
        slots.push(slot);
    }

    // Deterministic pseudo-random signal stream (xorshift).
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    for _ in 0..1000 {
        let signals = [next(), next(), next(), next()];
        assert_eq!(matrix.tick(&signals), 16);
    }

    assert!(matrix.performance().sub_100ns_ratio() >= 0.9);
    for slot in slots {
        let actor = matrix.actor(slot).unwrap();
        let breached = actor.base().execution_cycles() > bitactor_foundation::TRINITY_MAX_CYCLES;
        if breached {
            assert_eq!(actor.mode(), LearningMode::Off);
        }
    }
}

/// Negative control for the hash=execution law: flipping one compiled
/// byte breaks the hash equality.
#[test]
fn test_manifest_hash_law_fails_on_tampering() {
    let manifest = bitactor_aot::compile("tamper_control_spec").unwrap();
    assert!(manifest.verify());
    assert_eq!(fnv1a64(manifest.bytecode()), manifest.spec_hash());

    let mut tampered = manifest.bytecode().to_vec();
    tampered[0] ^= 0x40;
    assert_ne!(fnv1a64(&tampered), manifest.spec_hash());
}

/// Registry round-trip through the embedding API: names bound at actor
/// creation resolve back to the same references.
#[test]
fn test_registry_symbolic_addressing() {
    let mut harness = TestHarness::from_spec("registry_spec");
    let triage = harness.add_actor(0x01, Some("triage"));
    let billing = harness.add_actor(0x02, Some("billing"));

    assert_eq!(harness.matrix().registry().lookup("triage"), Some(triage));
    assert_eq!(harness.matrix().registry().lookup("billing"), Some(billing));
    assert_eq!(harness.matrix().registry().lookup("unknown"), None);
}

/// Telemetry spans bracket every hot-path execution.
#[test]
fn test_telemetry_spans_emitted_per_tick() {
    let mut harness = TestHarness::from_spec("telemetry_spec");
    let actor = harness.add_actor(0x00, None);

    harness.run_ticks(3);

    let sink = harness.sink();
    let events = sink.events(actor);
    // Per tick: start, opcode span, end.
    assert_eq!(events.len(), 9);
    assert_eq!(sink.total_violations(), 0);
}

/// A pattern longer than the inline slot is rejected at compile time.
#[test]
fn test_pattern_too_long_rejected() {
    let long = "p".repeat(65);
    assert!(matches!(
        NanoRegex::compile(&long),
        Err(bitactor_aot::CompileError::PatternTooLong { .. })
    ));
}
