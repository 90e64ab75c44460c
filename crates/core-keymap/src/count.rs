//! Repeat count accumulation (`12j`, `3dd`).

use tracing::trace;

/// Saturation point for accumulated counts.
pub const COUNT_LIMIT: u32 = 999_999;

/// Digit-by-digit repeat count.
///
/// A leading `0` never starts a count (it is the first-column motion), but once
/// a nonzero digit has been folded in, `0` extends the count like any digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatCount {
    value: u32,
    limit: u32,
}

impl Default for RepeatCount {
    fn default() -> Self {
        Self::with_limit(COUNT_LIMIT)
    }
}

impl RepeatCount {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            value: 0,
            limit: limit.max(1),
        }
    }

    /// Whether `digit` may start or extend this count.
    pub fn accepts(&self, digit: u32) -> bool {
        self.value > 0 || digit > 0
    }

    /// Fold a decimal digit into the count (`count * 10 + digit`), saturating.
    pub fn push_digit(&mut self, digit: u32) {
        self.value = self
            .value
            .saturating_mul(10)
            .saturating_add(digit)
            .min(self.limit);
        trace!(target: "input.count", count = self.value, digit, "count_extend");
    }

    /// Raw accumulated value (0 when unset).
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_set(&self) -> bool {
        self.value > 0
    }

    /// Count handed to commands and motions: 1 when unset.
    pub fn effective(&self) -> u32 {
        self.value.max(1)
    }

    pub fn clear(&mut self) {
        self.value = 0;
    }
}
