//! Mode lifecycle around a [`KeyDispatcher`].

use crate::{KeyDispatcher, KeyOutcome};
use core_events::KeyEvent;
use core_state::{EditorSurface, RequestedMode};
use tracing::debug;

/// Host callbacks run when the mode is entered or left.
pub trait ModeHooks {
    fn activate(&mut self, _surface: &mut dyn EditorSurface) {}
    fn deactivate(&mut self, _surface: &mut dyn EditorSurface) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl ModeHooks for NoopHooks {}

pub struct ModalController<H = NoopHooks> {
    dispatcher: KeyDispatcher,
    hooks: H,
    active: bool,
}

impl ModalController<NoopHooks> {
    pub fn new(dispatcher: KeyDispatcher) -> Self {
        Self::with_hooks(dispatcher, NoopHooks)
    }
}

impl<H: ModeHooks> ModalController<H> {
    pub fn with_hooks(dispatcher: KeyDispatcher, hooks: H) -> Self {
        Self {
            dispatcher,
            hooks,
            active: false,
        }
    }

    pub fn dispatcher(&self) -> &KeyDispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut KeyDispatcher {
        &mut self.dispatcher
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enter the mode: drop any stale input, then run the host hook.
    pub fn activate(&mut self, surface: &mut dyn EditorSurface) {
        self.dispatcher.reset();
        self.dispatcher.set_requested_mode(RequestedMode::None);
        self.hooks.activate(surface);
        self.active = true;
        debug!(target: "input.dispatch", "mode_activated");
    }

    /// Leave the mode: run the host hook, then drop any buffered input.
    pub fn deactivate(&mut self, surface: &mut dyn EditorSurface) {
        self.hooks.deactivate(surface);
        self.dispatcher.reset();
        self.active = false;
        debug!(target: "input.dispatch", "mode_deactivated");
    }

    pub fn handle_key(&mut self, surface: &mut dyn EditorSurface, event: &KeyEvent) -> KeyOutcome {
        self.dispatcher.handle_key(surface, event)
    }

    /// Mode requested by the last command, if any. Leaves `None` behind.
    pub fn take_requested_mode(&mut self) -> Option<RequestedMode> {
        match self.dispatcher.take_requested_mode() {
            RequestedMode::None => None,
            mode => Some(mode),
        }
    }
}
