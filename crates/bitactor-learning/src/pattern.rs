//! Learning patterns and pattern discovery.
//!
//! A learning pattern is a compiled artifact: up to 32 bytes of adaptation
//! logic plus bookkeeping (confidence, success rate, activation history).
//! Patterns are built and adapted in the slow path only; the hot path
//! reads `compiled_logic[0]` and increments a counter, nothing more.
//!
//! Confidence and success rate are fixed-point in `0..=65535` so the hot
//! path never touches floating point.

use bitactor_foundation::{fnv1a64, MAX_PATTERN_LOGIC};

/// Fixed-point one (confidence/success-rate scale).
pub const CONFIDENCE_SCALE: u16 = u16::MAX;

/// Repetitions a candidate must reach before discovery admits it.
const DISCOVERY_MIN_REPEATS: usize = 3;

/// A compiled adaptation pattern owned by one learning actor.
#[derive(Debug, Clone)]
pub struct LearningPattern {
    pattern_hash: u64,
    activation_count: u32,
    confidence: u16,
    valid: bool,
    priority: u8,
    first_seen: u64,
    last_activated: u64,
    success_rate: u16,
    adaptation_count: u32,
    compiled_logic: [u8; MAX_PATTERN_LOGIC],
    logic_size: u8,
    trinity_compliant: bool,
    execution_cycles: u64,
}

impl LearningPattern {
    /// Compile a pattern from raw logic bytes.
    ///
    /// `data` is truncated to the 32-byte logic slot; `initial_confidence`
    /// is clamped to `[0, 1]` and scaled to fixed point. The pattern hash
    /// is deterministic over the stored logic bytes.
    pub fn from_data(data: &[u8], initial_confidence: f32, now: u64) -> Self {
        let size = data.len().min(MAX_PATTERN_LOGIC);
        let mut compiled_logic = [0u8; MAX_PATTERN_LOGIC];
        compiled_logic[..size].copy_from_slice(&data[..size]);

        Self {
            pattern_hash: fnv1a64(&compiled_logic[..size]),
            activation_count: 0,
            confidence: scale_unit(initial_confidence),
            valid: true,
            priority: 0,
            first_seen: now,
            last_activated: 0,
            success_rate: CONFIDENCE_SCALE / 2,
            adaptation_count: 0,
            compiled_logic,
            logic_size: size as u8,
            trinity_compliant: true,
            execution_cycles: 0,
        }
    }

    /// Blend in new logic bytes and a feedback score.
    ///
    /// Confidence moves to the average of its current value and the
    /// feedback; the success rate tracks the same average; logic bytes are
    /// averaged element-wise against the new data.
    pub fn adapt(&mut self, new_data: &[u8], feedback: f32) {
        let feedback = scale_unit(feedback);
        self.confidence = midpoint(self.confidence, feedback);
        self.success_rate = midpoint(self.success_rate, feedback);
        for (logic, &new) in self
            .compiled_logic
            .iter_mut()
            .take(self.logic_size as usize)
            .zip(new_data)
        {
            *logic = (((*logic as u16) + (new as u16)) / 2) as u8;
        }
        self.adaptation_count += 1;
    }

    /// Recompute the confidence from accumulated activations and reset
    /// the activation window (the Adapt cognitive hop).
    ///
    /// Returns `true` iff any activations were folded in.
    pub fn refresh(&mut self, now: u64) -> bool {
        if self.activation_count == 0 {
            return false;
        }
        // Saturating fold: each window's activations nudge confidence up.
        let boost = (self.activation_count.min(64) as u32 * 256) as u16;
        self.confidence = self.confidence.saturating_add(boost).min(CONFIDENCE_SCALE);
        self.success_rate = midpoint(self.success_rate, self.confidence);
        self.activation_count = 0;
        self.last_activated = now;
        true
    }

    /// Copy this pattern for another actor, resetting activation state.
    pub fn shared_copy(&self, now: u64) -> Self {
        let mut copy = self.clone();
        copy.activation_count = 0;
        copy.adaptation_count = 0;
        copy.first_seen = now;
        copy.last_activated = 0;
        copy
    }

    /// Record one hot-path activation.
    pub(crate) fn record_activation(&mut self) {
        self.activation_count += 1;
    }

    /// Invalidate the pattern (removal).
    pub(crate) fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Deterministic hash over the logic bytes.
    pub fn pattern_hash(&self) -> u64 {
        self.pattern_hash
    }

    /// Hot-path activations since the last refresh.
    pub fn activation_count(&self) -> u32 {
        self.activation_count
    }

    /// Fixed-point confidence in `0..=65535`.
    pub fn confidence(&self) -> u16 {
        self.confidence
    }

    /// Whether the pattern is live.
    pub fn valid(&self) -> bool {
        self.valid
    }

    /// Fixed-point success rate in `0..=65535`.
    pub fn success_rate(&self) -> u16 {
        self.success_rate
    }

    /// Adaptations applied since creation.
    pub fn adaptation_count(&self) -> u32 {
        self.adaptation_count
    }

    /// Tick at which this pattern was first seen by its current owner.
    pub fn first_seen(&self) -> u64 {
        self.first_seen
    }

    /// The compiled logic bytes.
    pub fn logic(&self) -> &[u8] {
        &self.compiled_logic[..self.logic_size as usize]
    }

    /// The byte the hot path XORs into the meaning.
    pub fn hot_byte(&self) -> u8 {
        self.compiled_logic[0]
    }
}

/// A pattern candidate produced by discovery.
#[derive(Debug, Clone, PartialEq)]
pub struct Discovered {
    /// The repeating subsequence.
    pub data: Vec<u8>,
    /// Discovery confidence in `[0, 1]`:
    /// `repetitions / (history_len / window)`.
    pub confidence: f32,
}

/// Sliding-window repeating-subsequence detector.
///
/// Any window-sized subsequence repeating at least three times within the
/// history is reported, strongest first. Slow path only.
pub fn discover(history: &[u8], window: usize) -> Vec<Discovered> {
    if window == 0 || history.len() < window {
        return Vec::new();
    }

    let mut found: Vec<(Vec<u8>, usize)> = Vec::new();
    for start in 0..=(history.len() - window) {
        let candidate = &history[start..start + window];
        if found.iter().any(|(data, _)| data == candidate) {
            continue;
        }
        let repetitions = history
            .windows(window)
            .filter(|chunk| *chunk == candidate)
            .count();
        if repetitions >= DISCOVERY_MIN_REPEATS {
            found.push((candidate.to_vec(), repetitions));
        }
    }

    found.sort_by(|a, b| b.1.cmp(&a.1));
    let windows_in_history = (history.len() / window).max(1) as f32;
    found
        .into_iter()
        .map(|(data, repetitions)| Discovered {
            data,
            confidence: (repetitions as f32 / windows_in_history).min(1.0),
        })
        .collect()
}

fn scale_unit(value: f32) -> u16 {
    (value.clamp(0.0, 1.0) * CONFIDENCE_SCALE as f32) as u16
}

fn midpoint(a: u16, b: u16) -> u16 {
    (((a as u32) + (b as u32)) / 2) as u16
}
