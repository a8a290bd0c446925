//! Learning actors - BitActors with an adaptation extension.
//!
//! A learning actor wraps a base [`BitActor`] with a pattern store and a
//! learning mode. The hot path stays O(1) and branch-light: Observe
//! shifts one meaning bit into a state vector, Adapt XORs one precompiled
//! logic byte into the meaning. Everything else — pattern compilation,
//! discovery, adaptation — is slow-path setup work.
//!
//! # Self-protection
//!
//! The extended hot path re-measures its own cycle cost. The first time
//! it exceeds the trinity budget, learning for that actor switches `Off`
//! permanently (non-fatal): the base actor keeps executing, the extension
//! gets out of the way.

use tracing::warn;

use bitactor_foundation::{
    ActorRef, CycleSource, PatternId, MAX_PATTERNS_PER_ACTOR, TRINITY_MAX_CYCLES,
};
use bitactor_runtime::{BitActor, RuntimeError, TelemetrySink};

use crate::pattern::{discover, LearningPattern};

/// Learning participation per actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LearningMode {
    /// No learning work on the hot path.
    #[default]
    Off,
    /// Record a meaning-bit history; never mutate execution state.
    Observe,
    /// Apply the lowest active pattern's logic byte each step.
    Adapt,
}

/// A BitActor extended with the learning layer.
#[derive(Debug)]
pub struct LearningActor {
    base: BitActor,
    mode: LearningMode,
    pattern_active_mask: u8,
    current_pattern_id: u8,
    learning_tick_count: u64,
    patterns: Vec<LearningPattern>,
    learning_state_vector: u64,
    adaptation_threshold: u16,
    observation_window: u32,
}

impl LearningActor {
    /// Wrap a base actor with an empty learning extension (mode `Off`).
    pub fn new(base: BitActor) -> Self {
        Self {
            base,
            mode: LearningMode::Off,
            pattern_active_mask: 0,
            current_pattern_id: 0,
            learning_tick_count: 0,
            patterns: Vec::new(),
            learning_state_vector: 0,
            adaptation_threshold: 4,
            observation_window: 64,
        }
    }

    /// Execute one extended hot-path step.
    ///
    /// Delegates to the base hot path, applies the learning step for the
    /// current mode, and re-measures the combined cycle cost. Exceeding
    /// the trinity budget disables learning for this actor.
    ///
    /// Returns the measured cycle delta for the whole step.
    pub fn execute_hot_path_ls(
        &mut self,
        actor: ActorRef,
        tick: u64,
        cycles: &dyn CycleSource,
        sink: &mut dyn TelemetrySink,
    ) -> u64 {
        let start = cycles.now();
        self.base.execute_hot_path(actor, tick, cycles, sink);

        match self.mode {
            LearningMode::Off => {}
            LearningMode::Observe => {
                self.learning_state_vector =
                    (self.learning_state_vector << 1) | (self.base.meaning() & 1) as u64;
                self.learning_tick_count += 1;
            }
            LearningMode::Adapt => {
                if self.pattern_active_mask != 0 {
                    let id = self.pattern_active_mask.trailing_zeros() as usize;
                    self.current_pattern_id = id as u8;
                    let pattern = &mut self.patterns[id];
                    self.base.xor_meaning(pattern.hot_byte());
                    pattern.record_activation();
                    self.learning_state_vector = self
                        .learning_state_vector
                        .wrapping_add(pattern.pattern_hash());
                    self.learning_tick_count += 1;
                }
            }
        }

        let elapsed = cycles.now().saturating_sub(start);
        if elapsed > TRINITY_MAX_CYCLES && self.mode != LearningMode::Off {
            warn!(%actor, elapsed, "learning exceeded hot-path budget, disabling");
            self.mode = LearningMode::Off;
        }
        elapsed
    }

    /// Compile and install a pattern from raw logic bytes.
    ///
    /// Data beyond 32 bytes is truncated into the logic slot. The new
    /// pattern joins the active mask immediately.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::CapacityExceeded`] past eight patterns.
    pub fn add_pattern(
        &mut self,
        data: &[u8],
        initial_confidence: f32,
        now: u64,
    ) -> Result<PatternId, RuntimeError> {
        if self.patterns.len() >= MAX_PATTERNS_PER_ACTOR {
            return Err(RuntimeError::CapacityExceeded {
                what: "learning patterns",
                capacity: MAX_PATTERNS_PER_ACTOR,
            });
        }
        let id = self.patterns.len();
        self.patterns
            .push(LearningPattern::from_data(data, initial_confidence, now));
        self.pattern_active_mask |= 1u8 << id;
        Ok(PatternId::new(id as u8))
    }

    /// Invalidate a pattern and remove it from the active mask.
    pub fn remove_pattern(&mut self, id: PatternId) {
        if let Some(pattern) = self.patterns.get_mut(id.index()) {
            pattern.invalidate();
            self.pattern_active_mask &= !(1u8 << id.index());
        }
    }

    /// Run discovery over a meaning history and install what it finds.
    ///
    /// Returns the number of patterns installed (bounded by remaining
    /// slots). Slow path; may take arbitrary time.
    pub fn discover_patterns(&mut self, history: &[u8], window: usize, now: u64) -> usize {
        let mut installed = 0usize;
        for candidate in discover(history, window) {
            if self
                .add_pattern(&candidate.data, candidate.confidence, now)
                .is_err()
            {
                break;
            }
            installed += 1;
        }
        installed
    }

    /// Adapt a pattern toward new data with a feedback score in `[0, 1]`.
    pub fn adapt_pattern(&mut self, id: PatternId, new_data: &[u8], feedback: f32) {
        if let Some(pattern) = self.patterns.get_mut(id.index()) {
            pattern.adapt(new_data, feedback);
        }
    }

    /// Refresh all active patterns from accumulated activations (the
    /// Adapt cognitive hop). Returns `true` iff any pattern changed.
    pub(crate) fn refresh_adaptations(&mut self, now: u64) -> bool {
        let mut changed = false;
        for id in 0..self.patterns.len() {
            if self.pattern_active_mask & (1u8 << id) != 0 {
                changed |= self.patterns[id].refresh(now);
            }
        }
        changed
    }

    /// Install a copy of a pattern shared from another actor.
    pub(crate) fn install_shared(
        &mut self,
        pattern: LearningPattern,
    ) -> Result<PatternId, RuntimeError> {
        if self.patterns.len() >= MAX_PATTERNS_PER_ACTOR {
            return Err(RuntimeError::CapacityExceeded {
                what: "learning patterns",
                capacity: MAX_PATTERNS_PER_ACTOR,
            });
        }
        let id = self.patterns.len();
        self.patterns.push(pattern);
        self.pattern_active_mask |= 1u8 << id;
        Ok(PatternId::new(id as u8))
    }

    /// Set the learning mode.
    pub fn set_mode(&mut self, mode: LearningMode) {
        self.mode = mode;
    }

    /// Current learning mode.
    pub fn mode(&self) -> LearningMode {
        self.mode
    }

    /// The wrapped base actor.
    pub fn base(&self) -> &BitActor {
        &self.base
    }

    /// The wrapped base actor, mutable.
    pub fn base_mut(&mut self) -> &mut BitActor {
        &mut self.base
    }

    /// Installed patterns (valid and invalidated).
    pub fn patterns(&self) -> &[LearningPattern] {
        &self.patterns
    }

    /// A pattern by id.
    pub fn pattern(&self, id: PatternId) -> Option<&LearningPattern> {
        self.patterns.get(id.index())
    }

    /// Bitmask of active pattern slots.
    pub fn pattern_active_mask(&self) -> u8 {
        self.pattern_active_mask
    }

    /// Pattern id applied by the most recent Adapt step.
    pub fn current_pattern_id(&self) -> u8 {
        self.current_pattern_id
    }

    /// Learning steps taken since creation.
    pub fn learning_tick_count(&self) -> u64 {
        self.learning_tick_count
    }

    /// The observation/adaptation state vector.
    pub fn learning_state_vector(&self) -> u64 {
        self.learning_state_vector
    }

    /// Activations required before an adaptation window closes.
    pub fn adaptation_threshold(&self) -> u16 {
        self.adaptation_threshold
    }

    /// Observation history length in bits.
    pub fn observation_window(&self) -> u32 {
        self.observation_window
    }
}
