//! Two-tier key dispatcher.
//!
//! Tier 1 (`handle_command_key`) accumulates counts and resolves command
//! names through the command trie, then buffers the argument key for commands
//! that take one. When the keys typed so far neither name nor start a command,
//! Tier 1 defers and Tier 2 (`handle_motion_key`) resolves the same event
//! against the single-key motion table.
//!
//! Prefix shadowing: a key that starts a registered two-key command is held
//! by Tier 1, so a motion bound to the same key only runs when the following
//! key fails to complete the command (and then the motion sees that following
//! key, not the held one). This matches the classic behavior and is kept on
//! purpose.
//!
//! While a motion is collecting trailing keys, digits belong to Tier 2 and
//! form its secondary count, and a key that only starts a command name is
//! handed to the motion as a trailing char.
//!
//! The off-end-of-line correction runs before and after every command and
//! motion, except while the last requested mode is insert-like.

use crate::{Command, KeyOutcome, Motion, caret_off_eol};
use core_config::DispatchConfig;
use core_events::{KeyCode, KeyEvent};
use core_keymap::{KeyChord, KeyTrie, Resolution};
use core_state::{EditorSurface, RequestedMode};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, trace};

mod state;
pub use state::{DispatcherState, PendingCommand};

/// What Tier 1 decided for one event.
enum CommandStep {
    Done(KeyOutcome),
    Deferred,
}

pub struct KeyDispatcher {
    commands: KeyTrie<Rc<dyn Command>>,
    motions: HashMap<KeyChord, Box<dyn Motion>>,
    state: DispatcherState,
    requested_mode: RequestedMode,
    max_command_keys: usize,
}

impl Default for KeyDispatcher {
    fn default() -> Self {
        Self::new(&DispatchConfig::default())
    }
}

impl KeyDispatcher {
    /// Dispatcher with the built-in motion table and no commands.
    pub fn new(cfg: &DispatchConfig) -> Self {
        let mut dispatcher = Self {
            commands: KeyTrie::new(),
            motions: HashMap::new(),
            state: DispatcherState::with_count_limit(cfg.count_limit),
            requested_mode: RequestedMode::None,
            max_command_keys: cfg.max_command_keys.max(1),
        };
        for (key, motion) in crate::motion::builtin_motions(cfg.page_jump) {
            dispatcher.register_motion(key, motion);
        }
        dispatcher
    }

    /// Dispatcher with built-in motions and the standard command set.
    pub fn with_standard_commands(cfg: &DispatchConfig) -> Self {
        let mut dispatcher = Self::new(cfg);
        for (name, command) in crate::commands::standard_commands() {
            dispatcher.commands.insert(&name, command);
        }
        dispatcher
    }

    /// Bind `command` to a one or two key name. Re-binding replaces.
    pub fn register_command(&mut self, name: &[KeyChord], command: impl Command + 'static) {
        self.commands.insert(name, Rc::new(command));
    }

    /// Bind `motion` to a single key. Re-binding replaces.
    pub fn register_motion(&mut self, key: KeyChord, motion: impl Motion + 'static) {
        self.motions.insert(key, Box::new(motion));
    }

    pub fn state(&self) -> &DispatcherState {
        &self.state
    }

    /// Drop all buffered input.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Mode requested by the most recent command.
    pub fn requested_mode(&self) -> RequestedMode {
        self.requested_mode
    }

    pub fn set_requested_mode(&mut self, mode: RequestedMode) {
        self.requested_mode = mode;
    }

    /// Hand the requested mode to the mode controller, leaving `None` behind.
    pub fn take_requested_mode(&mut self) -> RequestedMode {
        std::mem::take(&mut self.requested_mode)
    }

    /// Feed one key event through Tier 1, then Tier 2 when Tier 1 defers.
    pub fn handle_key(&mut self, surface: &mut dyn EditorSurface, event: &KeyEvent) -> KeyOutcome {
        match self.handle_command_key(surface, event) {
            CommandStep::Done(outcome) => outcome,
            CommandStep::Deferred => self.handle_motion_key(surface, event),
        }
    }

    fn handle_command_key(
        &mut self,
        surface: &mut dyn EditorSurface,
        event: &KeyEvent,
    ) -> CommandStep {
        let secondary_allowed = self
            .state
            .pending
            .as_ref()
            .is_some_and(|p| p.command.supports_secondary_count());

        if let Some(digit) = event.digit() {
            let idle_tiers = self.state.pending.is_none() && self.state.motion_keys.is_empty();
            if idle_tiers && self.state.count.accepts(digit) {
                self.state.count.push_digit(digit);
                return CommandStep::Done(KeyOutcome::Pending);
            }
            if secondary_allowed {
                self.state.push_secondary_digit(digit);
                return CommandStep::Done(KeyOutcome::Pending);
            }
        }

        self.state.command_keys.push(KeyChord::from(event));

        if self.state.pending.is_none() {
            let keys = &self.state.command_keys;
            let command = match self.commands.resolve(keys) {
                Resolution::Matched { value, .. } => Rc::clone(value),
                _ if keys.len() > self.max_command_keys => {
                    debug!(
                        target: "input.dispatch",
                        keys = keys.len(),
                        "command_sequence_rejected"
                    );
                    self.state.reset();
                    return CommandStep::Done(KeyOutcome::Rejected);
                }
                Resolution::NeedMore if self.state.motion_keys.is_empty() => {
                    trace!(target: "input.dispatch", key = %event, "command_prefix");
                    return CommandStep::Done(KeyOutcome::Pending);
                }
                Resolution::NeedMore | Resolution::NoMatch => {
                    self.state.command_keys.clear();
                    return CommandStep::Deferred;
                }
            };
            let name = std::mem::take(&mut self.state.command_keys);
            debug!(target: "input.dispatch", name = ?name, "command_pending");
            let takes_argument = command.takes_argument();
            self.state.pending = Some(PendingCommand { name, command });
            if takes_argument {
                return CommandStep::Done(KeyOutcome::Pending);
            }
        }

        let Some(pending) = self.state.pending.take() else {
            return CommandStep::Done(KeyOutcome::Pending);
        };
        let argument = if pending.command.takes_argument() {
            match self.state.command_keys.as_slice() {
                [key] => key.char_value(),
                _ => {
                    self.state.pending = Some(pending);
                    return CommandStep::Done(KeyOutcome::Pending);
                }
            }
        } else {
            None
        };

        let count = self.state.count.effective();
        caret_off_eol(surface, self.requested_mode);
        let mode = pending.command.execute(surface, count, argument);
        self.requested_mode = mode;
        self.state.reset();
        caret_off_eol(surface, self.requested_mode);
        debug!(
            target: "input.dispatch",
            name = ?pending.name,
            count,
            argument = ?argument,
            mode = ?mode,
            "command_executed"
        );
        CommandStep::Done(KeyOutcome::Executed { mode })
    }

    fn handle_motion_key(
        &mut self,
        surface: &mut dyn EditorSurface,
        event: &KeyEvent,
    ) -> KeyOutcome {
        let token = match event.code {
            KeyCode::Named(_) => {
                self.state.motion_keys.clear();
                self.state.count.clear();
                KeyChord::from(event)
            }
            KeyCode::Char(c) => {
                if let Some(digit) = event.digit() {
                    if self.state.motion_keys.is_empty() && self.state.count.accepts(digit) {
                        self.state.count.push_digit(digit);
                        return KeyOutcome::Pending;
                    }
                    if self.state.motion_keys.len() == 1 {
                        self.state.push_secondary_digit(digit);
                        return KeyOutcome::Pending;
                    }
                }
                self.state.motion_keys.push(c);
                KeyChord::char(self.state.motion_keys[0]).with_ctrl(event.is_ctrl())
            }
        };

        let Some(motion) = self.motions.get(&token) else {
            debug!(target: "input.dispatch", key = %token, "motion_rejected");
            self.state.reset();
            return KeyOutcome::Rejected;
        };

        let count = self.state.count.effective();
        let trailing: Vec<char> = self.state.motion_keys.iter().skip(1).copied().collect();
        caret_off_eol(surface, self.requested_mode);
        let reset = motion.execute(surface, count, &trailing);
        if reset {
            self.state.reset();
        }
        caret_off_eol(surface, self.requested_mode);
        debug!(target: "input.dispatch", key = %token, count, reset, "motion_executed");
        if reset {
            KeyOutcome::Moved
        } else {
            KeyOutcome::Pending
        }
    }
}
