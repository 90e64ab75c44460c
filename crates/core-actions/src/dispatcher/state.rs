//! Transient parse state owned by one dispatcher.

use crate::Command;
use core_keymap::{KeySequence, RepeatCount};
use smallvec::SmallVec;
use std::fmt;
use std::rc::Rc;

/// Command adopted by Tier 1 and awaiting its argument (or secondary count).
#[derive(Clone)]
pub struct PendingCommand {
    pub name: KeySequence,
    pub command: Rc<dyn Command>,
}

impl fmt::Debug for PendingCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingCommand")
            .field("name", &self.name)
            .field("takes_argument", &self.command.takes_argument())
            .field("secondary_count", &self.command.supports_secondary_count())
            .finish()
    }
}

/// Everything typed since the last completed or rejected sequence.
#[derive(Debug, Clone, Default)]
pub struct DispatcherState {
    /// Primary count, or the secondary count once `secondary_started` is set.
    pub count: RepeatCount,
    pub secondary_started: bool,
    pub pending: Option<PendingCommand>,
    /// Tier 1 buffer: command name keys, then the argument key.
    pub command_keys: KeySequence,
    /// Tier 2 buffer: motion key followed by its trailing chars.
    pub motion_keys: SmallVec<[char; 4]>,
}

impl DispatcherState {
    pub fn with_count_limit(limit: u32) -> Self {
        Self {
            count: RepeatCount::with_limit(limit),
            ..Self::default()
        }
    }

    /// Clear all transient input. The count limit is kept.
    pub fn reset(&mut self) {
        self.count.clear();
        self.secondary_started = false;
        self.pending = None;
        self.command_keys.clear();
        self.motion_keys.clear();
    }

    pub fn is_idle(&self) -> bool {
        !self.count.is_set()
            && !self.secondary_started
            && self.pending.is_none()
            && self.command_keys.is_empty()
            && self.motion_keys.is_empty()
    }

    /// Fold a digit as a secondary count: the first one discards the prefix count.
    pub(crate) fn push_secondary_digit(&mut self, digit: u32) {
        if !self.secondary_started {
            self.count.clear();
            self.secondary_started = true;
        }
        self.count.push_digit(digit);
    }
}
