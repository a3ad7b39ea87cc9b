#![forbid(unsafe_code)]

//! Count-down latch joining independently timed animations.
//!
//! A transition runs several animations with unrelated durations and must
//! act once, after the last of them. Each animation [`arrive`]s once; the
//! arrival that brings the count to zero reports the release.
//!
//! [`arrive`]: CompletionLatch::arrive

/// A join barrier over a fixed number of parties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionLatch {
    parties: usize,
    remaining: usize,
}

impl CompletionLatch {
    /// Latch waiting for `parties` arrivals. Zero parties is released already.
    #[must_use]
    pub const fn new(parties: usize) -> Self {
        Self {
            parties,
            remaining: parties,
        }
    }

    /// Record one arrival. Returns `true` only for the arrival that released
    /// the latch; arrivals after release are ignored.
    pub fn arrive(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    #[must_use]
    pub const fn is_released(&self) -> bool {
        self.remaining == 0
    }

    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    #[must_use]
    pub const fn parties(&self) -> usize {
        self.parties
    }
}
