//! Fixed-capacity pattern matchers over 64-bit signal words.
//!
//! A NanoRegex is compiled once from pattern text and read-only
//! thereafter. Matching is hash equality: a raw signal word matches iff it
//! equals the pattern's precomputed hash. That keeps the per-tick cost at
//! one comparison per signal, short-circuited by the signal count — no
//! backtracking, no state machine.

use bitactor_foundation::{fnv1a64, MAX_PATTERN_DATA};
use tracing::trace;

use crate::error::{CompileError, Result};

/// A compiled signal pattern.
///
/// Holds the pattern hash used for matching plus the source bytes in a
/// fixed inline slot. Patterns longer than the slot are rejected at
/// compile time; there is no spill path.
#[derive(Debug, Clone)]
pub struct NanoRegex {
    pattern_hash: u64,
    match_mask: u64,
    pattern_len: u16,
    pattern_data: [u8; MAX_PATTERN_DATA],
}

impl NanoRegex {
    /// Compile pattern text into a matcher.
    ///
    /// Deterministic: the same text always yields the same hash and mask.
    ///
    /// # Errors
    ///
    /// [`CompileError::PatternTooLong`] if the text exceeds the inline
    /// data slot.
    pub fn compile(pattern_text: &str) -> Result<Self> {
        let bytes = pattern_text.as_bytes();
        if bytes.len() > MAX_PATTERN_DATA {
            return Err(CompileError::PatternTooLong {
                len: bytes.len(),
                max: MAX_PATTERN_DATA,
            });
        }

        let pattern_hash = fnv1a64(bytes);
        let mut pattern_data = [0u8; MAX_PATTERN_DATA];
        pattern_data[..bytes.len()].copy_from_slice(bytes);

        trace!(pattern_hash, len = bytes.len(), "pattern compiled");
        Ok(Self {
            pattern_hash,
            // All signal lanes participate; the mask narrows match positions
            // when a feed only watches a subset.
            match_mask: u64::MAX,
            pattern_len: bytes.len() as u16,
            pattern_data,
        })
    }

    /// The precomputed pattern hash signals are compared against.
    pub fn pattern_hash(&self) -> u64 {
        self.pattern_hash
    }

    /// Pattern length in bytes.
    pub fn pattern_len(&self) -> u16 {
        self.pattern_len
    }

    /// The pattern source bytes.
    pub fn pattern_data(&self) -> &[u8] {
        &self.pattern_data[..self.pattern_len as usize]
    }

    /// Match raw signals against this pattern.
    ///
    /// Bit `i` of the result is set iff `signals[i]` equals the pattern
    /// hash, for positions `i < 64`. Cost is one comparison per signal,
    /// bounded by the signal count.
    pub fn matches(&self, signals: &[u64]) -> u64 {
        let mut mask = 0u64;
        for (i, &signal) in signals.iter().take(64).enumerate() {
            mask |= ((signal == self.pattern_hash) as u64) << i;
        }
        mask & self.match_mask
    }
}
