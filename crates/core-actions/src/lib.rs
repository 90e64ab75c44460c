//! Normal-mode key interpretation: commands, motions and the two-tier
//! dispatcher that turns key events into them.
//!
//! Grammar handled by [`KeyDispatcher`]:
//!
//! ```text
//! [count] command-name [secondary-count] [argument]   (Tier 1, Command table)
//! [count] motion-key [trailing chars]                 (Tier 2, Motion table)
//! ```
//!
//! Commands are looked up first. When the keys typed so far neither name a
//! command nor start one, the key falls through to the motion table.
//! All transient parse state lives in [`DispatcherState`], owned by the
//! dispatcher instance, and is cleared after every completed or rejected
//! sequence.

pub mod command;
pub mod commands;
pub mod controller;
pub mod dispatcher;
pub mod eol;
pub mod motion;
pub mod selection;

pub use command::{Command, FnCommand};
pub use controller::{ModalController, ModeHooks, NoopHooks};
pub use dispatcher::{DispatcherState, KeyDispatcher, PendingCommand};
pub use eol::caret_off_eol;
pub use motion::{BuiltinMotion, Motion};
pub use selection::select_lines;

use core_state::RequestedMode;

/// Result of feeding one key event to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Input retained: count digit, command prefix, awaited argument, or a
    /// motion that asked to keep its trailing keys.
    Pending,
    /// A command ran and requested `mode`.
    Executed { mode: RequestedMode },
    /// A motion ran and state was reset.
    Moved,
    /// Sequence matched nothing; state was reset without side effects.
    Rejected,
}

impl KeyOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, KeyOutcome::Pending)
    }

    /// Whether a command or motion acted on the surface.
    pub fn acted(&self) -> bool {
        matches!(self, KeyOutcome::Executed { .. } | KeyOutcome::Moved)
    }
}
