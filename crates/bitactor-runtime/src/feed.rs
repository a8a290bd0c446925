//! Per-domain input adapter.
//!
//! The feed actor sits at a domain's input edge: raw 64-bit signals come
//! in at tick boundaries, compiled NanoRegex patterns turn them into a
//! per-tick match count, and the cognitive cycle's trigger-detect hop
//! reads that count. It is mutated exactly once per tick, before any
//! actor in its domain executes.

use bitactor_aot::NanoRegex;
use bitactor_foundation::MAX_FEED_PATTERNS;

use crate::error::{Result, RuntimeError};

/// Input adapter holding up to eight compiled patterns.
#[derive(Debug, Default)]
pub struct FeedActor {
    patterns: Vec<NanoRegex>,
    match_count: u32,
}

impl FeedActor {
    /// Creates a feed with no patterns (match count stays zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a compiled pattern.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::CapacityExceeded`] past eight patterns.
    pub fn add_pattern(&mut self, pattern: NanoRegex) -> Result<()> {
        if self.patterns.len() >= MAX_FEED_PATTERNS {
            return Err(RuntimeError::CapacityExceeded {
                what: "feed patterns",
                capacity: MAX_FEED_PATTERNS,
            });
        }
        self.patterns.push(pattern);
        Ok(())
    }

    /// Hot-path update: first pattern against the first signal.
    ///
    /// The pattern slots hold up to eight matchers, but the per-tick path
    /// evaluates only the first against the first signal word; the rest
    /// participate via [`FeedActor::update_all`] in setup-phase flows.
    pub fn update(&mut self, signals: &[u64]) {
        self.match_count = match (self.patterns.first(), signals.first()) {
            (Some(pattern), Some(&signal)) => (signal == pattern.pattern_hash()) as u32,
            _ => 0,
        };
    }

    /// Setup-phase update: every pattern against every signal position.
    ///
    /// Match count is the total number of matching positions across all
    /// patterns. May take arbitrary time; never called inside a tick.
    pub fn update_all(&mut self, signals: &[u64]) {
        self.match_count = self
            .patterns
            .iter()
            .map(|p| p.matches(signals).count_ones())
            .sum();
    }

    /// Matches seen by the most recent update.
    pub fn match_count(&self) -> u32 {
        self.match_count
    }

    /// Installed pattern count.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}
