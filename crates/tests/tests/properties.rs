//! Property tests for the BitActor stack invariants.
//!
//! Each property quantifies over generated specifications, signal
//! streams, or topologies and checks one contract of the runtime: the
//! hash=execution law, budget accounting, bounded propagation, tick
//! monotonicity, registry injectivity, dark-triple mask conservation,
//! and the learning layer's non-regression and self-protection.

use proptest::prelude::*;

use bitactor_aot::compile;
use bitactor_foundation::{fnv1a64, ActorSlot, CounterSource, TRINITY_MAX_CYCLES};
use bitactor_learning::{LearningActor, LearningMode};
use bitactor_runtime::{
    BitActor, EntanglementOracle, Matrix, NullSink, Registry, RuntimeError,
};
use bitactor_tests::{StridedSource, TestHarness};

fn actor_pool(spec: &str, n: usize) -> Vec<BitActor> {
    let manifest = compile(spec).unwrap();
    (0..n).map(|_| BitActor::new(0, manifest.clone())).collect()
}

proptest! {
    /// Hash=Execution: every compiled manifest's bytecode hashes to its
    /// spec hash, for any non-empty specification text.
    #[test]
    fn prop_hash_equals_execution(spec in "[ -~]{1,512}") {
        let manifest = compile(&spec).unwrap();
        prop_assert!(manifest.verify());
        prop_assert_eq!(fnv1a64(manifest.bytecode()), manifest.spec_hash());
        prop_assert!(manifest.size() <= 256);
    }

    /// Compilation is reproducible: the same text yields the same
    /// manifest every time.
    #[test]
    fn prop_compilation_reproducible(spec in "[ -~]{1,300}") {
        let a = compile(&spec).unwrap();
        let b = compile(&spec).unwrap();
        prop_assert_eq!(a.spec_hash(), b.spec_hash());
        prop_assert_eq!(a.bytecode(), b.bytecode());
    }

    /// Monotonic Tick: the global tick increases by exactly one per call.
    #[test]
    fn prop_monotonic_tick(ticks in 1u64..64) {
        let mut harness = TestHarness::from_spec("monotonic_spec");
        harness.add_actor(0, None);
        for expected in 1..=ticks {
            harness.tick(&[]);
            prop_assert_eq!(harness.matrix().global_tick(), expected);
        }
    }

    /// Idempotence of signal_pending: after any tick, every actor's
    /// pending flag is consumed.
    #[test]
    fn prop_signal_pending_consumed(n_actors in 1usize..8, with_signals in any::<bool>()) {
        let mut harness = TestHarness::from_spec("pending_spec");
        let refs: Vec<_> = (0..n_actors).map(|_| harness.add_actor(0, None)).collect();

        let signals: &[u64] = if with_signals { &[1, 2, 3] } else { &[] };
        harness.tick(signals);

        for actor in refs {
            prop_assert!(!harness.actor(actor).signal_pending());
        }
    }

    /// Bounded Propagation: hop budgets outside 1..=8 never reach a
    /// target; spent signals are rejected at processing time.
    #[test]
    fn prop_bounded_propagation(max_hops in 0u8..20) {
        let mut pool = actor_pool("bounded_spec", 2);
        let mut oracle = EntanglementOracle::new();
        oracle.create(ActorSlot::new(0), ActorSlot::new(1), 0xFF).unwrap();

        let enqueued = oracle.propagate_signal(ActorSlot::new(0), 0x0F, max_hops);
        oracle.process_signals(pool.as_mut_slice());

        if max_hops == 0 || max_hops > 8 {
            prop_assert_eq!(enqueued, 0);
            prop_assert_eq!(pool[1].meaning(), 0);
            prop_assert_eq!(oracle.metrics().bounded_rejections, 1);
        } else if max_hops == 1 {
            // Enqueued with a spent budget, dropped at processing.
            prop_assert_eq!(enqueued, 1);
            prop_assert_eq!(pool[1].meaning(), 0);
            prop_assert_eq!(oracle.metrics().bounded_rejections, 1);
        } else {
            prop_assert_eq!(enqueued, 1);
            prop_assert_eq!(pool[1].meaning() & 0x0F, 0x0F);
            prop_assert_eq!(oracle.metrics().bounded_rejections, 0);
        }
    }

    /// No Infinite Loops: signals processed in one drain never exceed
    /// the drain bound, regardless of topology density.
    #[test]
    fn prop_processing_is_bounded(
        edges in prop::collection::vec((0u16..4, 0u16..4), 0..32),
        rounds in 1usize..8,
    ) {
        let mut pool = actor_pool("loop_spec", 4);
        let mut oracle = EntanglementOracle::new();
        for (src, tgt) in edges {
            let _ = oracle.create(ActorSlot::new(src), ActorSlot::new(tgt), 0xFF);
        }

        for _ in 0..rounds {
            oracle.propagate_signal(ActorSlot::new(0), 0xFF, 8);
            let before = oracle.metrics().signals_processed;
            let drained = oracle.process_signals(pool.as_mut_slice());
            prop_assert!(drained <= 8);
            prop_assert!(oracle.metrics().signals_processed - before <= 8);
        }
        // Even a saturated run stays under the per-tick ceiling.
        let ceiling = (4 * 8 + 256) as u64;
        prop_assert!(oracle.metrics().signals_processed <= ceiling * rounds as u64);
    }

    /// Registry Injectivity: every registered name resolves to exactly
    /// the actor it was bound to, and rebinding is rejected.
    #[test]
    fn prop_registry_injectivity(
        names in prop::collection::hash_set("[a-z]{1,12}", 1..24),
    ) {
        let mut registry = Registry::new();
        let names: Vec<_> = names.into_iter().collect();
        let refs: Vec<_> = (0..names.len())
            .map(|i| bitactor_foundation::ActorRef::new(
                bitactor_foundation::DomainId::new(0),
                ActorSlot::new(i as u16),
            ))
            .collect();

        for (name, actor) in names.iter().zip(&refs) {
            registry.register(name, *actor).unwrap();
        }
        for (name, actor) in names.iter().zip(&refs) {
            prop_assert_eq!(registry.lookup(name), Some(*actor));
        }
        prop_assert!(matches!(
            registry.register(&names[0], refs[0]),
            Err(RuntimeError::DuplicateName(_))
        ));
    }

    /// Dark Triple Conservation: dormant and active masks always
    /// partition the registered triples.
    #[test]
    fn prop_dark_triple_conservation(
        thresholds in prop::collection::vec(1u8..4, 1..32),
        signals in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut harness = TestHarness::from_spec("conservation_spec");
        let target = harness.add_actor(0, None);
        for &threshold in &thresholds {
            harness
                .matrix_mut()
                .dark_triples_mut()
                .register(0x01, 0x0F, target, threshold)
                .unwrap();
        }

        for chunk in signals.chunks(4) {
            let words: Vec<u64> = chunk.iter().map(|&s| s as u64).collect();
            harness.tick(&words);

            let dark = harness.matrix().dark_triples();
            let total = dark.dormant_mask().count_ones() + dark.active_mask().count_ones();
            prop_assert_eq!(total as usize, dark.triple_count());
        }
    }

    /// Cycle Budget: any measured execution either fits the trinity
    /// budget or leaves the actor marked non-compliant.
    #[test]
    fn prop_budget_violation_marks_actor(stride in 1u64..64) {
        let mut harness = TestHarness::with_cycle_source(
            "budget_spec",
            Box::new(StridedSource::new(stride)),
        );
        let actor = harness.add_actor(0, None);
        harness.tick(&[]);

        let actor = harness.actor(actor);
        prop_assert!(
            actor.execution_cycles() <= TRINITY_MAX_CYCLES || !actor.trinity_compliant()
        );
        if stride > TRINITY_MAX_CYCLES {
            prop_assert!(!actor.trinity_compliant());
            prop_assert!(harness.sink().total_violations() > 0);
        }
    }

    /// Learning Non-Regression: Observe mode changes neither meaning nor
    /// bytecode offset relative to base execution on the same inputs.
    #[test]
    fn prop_observe_mode_is_transparent(ticks in 1u64..48, meaning in any::<u8>()) {
        let manifest = compile("observe_spec").unwrap();
        let mut base = BitActor::new(meaning, manifest.clone());
        let mut learning = LearningActor::new(BitActor::new(meaning, manifest));
        learning.set_mode(LearningMode::Observe);

        let actor_ref = bitactor_foundation::ActorRef::new(
            bitactor_foundation::DomainId::new(0),
            ActorSlot::new(0),
        );
        let cycles_a = CounterSource::new();
        let cycles_b = CounterSource::new();
        let mut sink = NullSink;
        for tick in 1..=ticks {
            base.execute_hot_path(actor_ref, tick, &cycles_a, &mut sink);
            learning.execute_hot_path_ls(actor_ref, tick, &cycles_b, &mut sink);
        }

        prop_assert_eq!(base.meaning(), learning.base().meaning());
        prop_assert_eq!(base.bytecode_offset(), learning.base().bytecode_offset());
    }

    /// Learning Self-Protection: a learning step that breaches the
    /// budget turns that actor's learning off.
    #[test]
    fn prop_learning_disables_on_breach(stride in 3u64..64, mode_adapt in any::<bool>()) {
        let manifest = compile("protect_spec").unwrap();
        let mut learning = LearningActor::new(BitActor::new(0, manifest));
        learning.add_pattern(&[1, 2], 0.5, 0).unwrap();
        learning.set_mode(if mode_adapt {
            LearningMode::Adapt
        } else {
            LearningMode::Observe
        });

        let actor_ref = bitactor_foundation::ActorRef::new(
            bitactor_foundation::DomainId::new(0),
            ActorSlot::new(0),
        );
        let cycles = StridedSource::new(stride);
        let mut sink = NullSink;
        let elapsed = learning.execute_hot_path_ls(actor_ref, 1, &cycles, &mut sink);

        if elapsed > TRINITY_MAX_CYCLES {
            prop_assert_eq!(learning.mode(), LearningMode::Off);
        } else {
            prop_assert!(learning.mode() != LearningMode::Off);
        }
    }
}

/// Executed-count accounting stays exact across mixed domain layouts.
#[test]
fn test_executed_count_across_domains() {
    let manifest = compile("multi_domain_spec").unwrap();
    let mut matrix = Matrix::new();
    let d0 = matrix.create_domain().unwrap();
    let d1 = matrix.create_domain().unwrap();
    for _ in 0..3 {
        matrix.add_actor(d0, 0, &manifest, None).unwrap();
    }
    for _ in 0..2 {
        matrix.add_actor(d1, 0, &manifest, None).unwrap();
    }

    assert_eq!(matrix.tick(&[]), 5);
    assert_eq!(matrix.performance().total_executions, 5);
}
