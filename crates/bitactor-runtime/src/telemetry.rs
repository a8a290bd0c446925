//! Telemetry sink - execution span output abstraction.
//!
//! The sink is the runtime's only outward-facing observability boundary:
//! the core calls into it to mark tick starts/ends, opcode spans, and
//! budget violations, and **never reads back from it**. A sink need not be
//! present at all — [`NullSink`] is a valid implementation.
//!
//! # Sink Trait
//!
//! All sinks implement [`TelemetrySink`]:
//! - `on_tick_start` / `on_tick_end` — bracket one actor's hot-path execution
//! - `on_opcode_span` — the opcode consumed during that execution
//! - `on_budget_violation` — a hot-path invocation exceeded its cycle budget
//!
//! # Implementations
//!
//! - [`NullSink`] — discard everything (default)
//! - [`RecordingSink`] — retain spans per actor in deterministic order,
//!   for tests and diagnostics

use indexmap::IndexMap;

use bitactor_foundation::ActorRef;

/// Receiver for execution spans emitted by the runtime.
///
/// Implementations must tolerate being called once per actor per tick;
/// anything slower than an append belongs behind a buffer.
pub trait TelemetrySink {
    /// An actor's hot-path execution is starting.
    fn on_tick_start(&mut self, actor: ActorRef, tick: u64);

    /// An actor's hot-path execution finished in `elapsed_cycles`.
    fn on_tick_end(&mut self, actor: ActorRef, tick: u64, elapsed_cycles: u64);

    /// An opcode was consumed between two ticks (start == end for the
    /// single-byte hot path).
    fn on_opcode_span(&mut self, actor: ActorRef, opcode_id: u8, start_tick: u64, end_tick: u64);

    /// A hot-path invocation exceeded its cycle budget.
    fn on_budget_violation(&mut self, actor: ActorRef, elapsed: u64, budget: u64);
}

/// Null sink - discards all spans.
#[derive(Debug, Default)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn on_tick_start(&mut self, _actor: ActorRef, _tick: u64) {}

    fn on_tick_end(&mut self, _actor: ActorRef, _tick: u64, _elapsed_cycles: u64) {}

    fn on_opcode_span(&mut self, _actor: ActorRef, _opcode_id: u8, _start: u64, _end: u64) {}

    fn on_budget_violation(&mut self, _actor: ActorRef, _elapsed: u64, _budget: u64) {}
}

/// Shared-handle sink: lets an embedder keep a handle on a sink after
/// handing it to the matrix.
impl<S: TelemetrySink> TelemetrySink for std::rc::Rc<std::cell::RefCell<S>> {
    fn on_tick_start(&mut self, actor: ActorRef, tick: u64) {
        self.borrow_mut().on_tick_start(actor, tick);
    }

    fn on_tick_end(&mut self, actor: ActorRef, tick: u64, elapsed_cycles: u64) {
        self.borrow_mut().on_tick_end(actor, tick, elapsed_cycles);
    }

    fn on_opcode_span(&mut self, actor: ActorRef, opcode_id: u8, start_tick: u64, end_tick: u64) {
        self.borrow_mut()
            .on_opcode_span(actor, opcode_id, start_tick, end_tick);
    }

    fn on_budget_violation(&mut self, actor: ActorRef, elapsed: u64, budget: u64) {
        self.borrow_mut().on_budget_violation(actor, elapsed, budget);
    }
}

/// One recorded span event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanEvent {
    /// Hot path started at `tick`.
    TickStart {
        /// Global tick number.
        tick: u64,
    },
    /// Hot path ended at `tick` after `elapsed_cycles`.
    TickEnd {
        /// Global tick number.
        tick: u64,
        /// Measured cycle delta.
        elapsed_cycles: u64,
    },
    /// An opcode span.
    OpcodeSpan {
        /// The opcode byte consumed.
        opcode_id: u8,
        /// First tick of the span.
        start_tick: u64,
        /// Last tick of the span.
        end_tick: u64,
    },
    /// A budget violation.
    BudgetViolation {
        /// Measured cycles.
        elapsed: u64,
        /// The budget that was exceeded.
        budget: u64,
    },
}

/// Recording sink - retains every span per actor.
///
/// Iteration order over actors is insertion order (first span wins), so
/// test assertions and diagnostic dumps are deterministic.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: IndexMap<ActorRef, Vec<SpanEvent>>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All events recorded for one actor, in emission order.
    pub fn events(&self, actor: ActorRef) -> &[SpanEvent] {
        self.events.get(&actor).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Actors seen so far, in first-span order.
    pub fn actors(&self) -> impl Iterator<Item = ActorRef> + '_ {
        self.events.keys().copied()
    }

    /// Count of budget violations recorded for one actor.
    pub fn violation_count(&self, actor: ActorRef) -> usize {
        self.events(actor)
            .iter()
            .filter(|e| matches!(e, SpanEvent::BudgetViolation { .. }))
            .count()
    }

    /// Total budget violations across all actors.
    pub fn total_violations(&self) -> usize {
        self.events
            .values()
            .flatten()
            .filter(|e| matches!(e, SpanEvent::BudgetViolation { .. }))
            .count()
    }

    /// Drop all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TelemetrySink for RecordingSink {
    fn on_tick_start(&mut self, actor: ActorRef, tick: u64) {
        self.events
            .entry(actor)
            .or_default()
            .push(SpanEvent::TickStart { tick });
    }

    fn on_tick_end(&mut self, actor: ActorRef, tick: u64, elapsed_cycles: u64) {
        self.events.entry(actor).or_default().push(SpanEvent::TickEnd {
            tick,
            elapsed_cycles,
        });
    }

    fn on_opcode_span(&mut self, actor: ActorRef, opcode_id: u8, start_tick: u64, end_tick: u64) {
        self.events
            .entry(actor)
            .or_default()
            .push(SpanEvent::OpcodeSpan {
                opcode_id,
                start_tick,
                end_tick,
            });
    }

    fn on_budget_violation(&mut self, actor: ActorRef, elapsed: u64, budget: u64) {
        self.events
            .entry(actor)
            .or_default()
            .push(SpanEvent::BudgetViolation { elapsed, budget });
    }
}
