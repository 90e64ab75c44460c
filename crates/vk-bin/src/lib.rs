//! Replay session shared by the `vikey` binary and its tests.
//!
//! A [`Session`] owns one [`EditorState`] and a [`ModalController`] and plays
//! the role of the enclosing mode controller: it reads the mode requested
//! after each command, leaves the dispatcher while an insert-like mode is
//! active, and re-enters it on `<Esc>`.

use anyhow::{Context, Result};
use core_actions::{KeyDispatcher, KeyOutcome, ModalController, ModeHooks, caret_off_eol};
use core_config::DispatchConfig;
use core_events::{KeyCode, KeyEvent, NamedKey};
use core_state::{EditorState, EditorSurface, RequestedMode};
use core_text::Buffer;
use std::fmt;
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info};

/// Re-entering normal mode pulls the caret back onto the line, the same
/// correction the dispatcher applies around every action.
#[derive(Debug, Default)]
pub struct NormalModeHooks {
    pub entered: usize,
}

impl ModeHooks for NormalModeHooks {
    fn activate(&mut self, surface: &mut dyn EditorSurface) {
        self.entered += 1;
        caret_off_eol(surface, RequestedMode::Normal);
        info!(target: "runtime", line = surface.caret_line(), "normal_mode_enter");
    }

    fn deactivate(&mut self, surface: &mut dyn EditorSurface) {
        info!(target: "runtime", line = surface.caret_line(), "normal_mode_leave");
    }
}

/// Snapshot printed after a replay or each interactive key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub line: usize,
    pub column: usize,
    pub mode: RequestedMode,
    pub selection: Option<Range<usize>>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} col {} mode {:?}", self.line, self.column, self.mode)?;
        if let Some(sel) = &self.selection {
            write!(f, " selection {}..{}", sel.start, sel.end)?;
        }
        Ok(())
    }
}

pub struct Session {
    state: EditorState,
    controller: ModalController<NormalModeHooks>,
    mode: RequestedMode,
}

impl Session {
    pub fn new(buffer: Buffer, cfg: &DispatchConfig) -> Self {
        let mut state = EditorState::new(buffer);
        let dispatcher = KeyDispatcher::with_standard_commands(cfg);
        let mut controller = ModalController::with_hooks(dispatcher, NormalModeHooks::default());
        controller.activate(&mut state);
        Self {
            state,
            controller,
            mode: RequestedMode::Normal,
        }
    }

    pub fn open(path: &Path, cfg: &DispatchConfig) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "[buffer]".to_string());
        let buffer = Buffer::from_str(name, &text)?;
        info!(target: "runtime", lines = buffer.line_count(), "buffer_loaded");
        Ok(Self::new(buffer, cfg))
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn mode(&self) -> RequestedMode {
        self.mode
    }

    pub fn controller(&self) -> &ModalController<NormalModeHooks> {
        &self.controller
    }

    /// Feed one key. Returns `None` while the dispatcher is inactive.
    pub fn apply(&mut self, event: &KeyEvent) -> Option<KeyOutcome> {
        let esc = event.code == KeyCode::Named(NamedKey::Esc);
        if !self.controller.is_active() {
            if esc {
                self.controller.activate(&mut self.state);
                self.mode = RequestedMode::Normal;
            } else {
                debug!(target: "runtime", key = %event, "key_outside_dispatcher");
            }
            return None;
        }
        let idle = self.controller.dispatcher().state().is_idle();
        if esc && idle && self.mode != RequestedMode::Normal {
            self.state.selection.clear();
            self.mode = RequestedMode::Normal;
            return None;
        }

        let outcome = self.controller.handle_key(&mut self.state, event);
        if let Some(mode) = self.controller.take_requested_mode() {
            self.enter(mode);
        }
        Some(outcome)
    }

    pub fn replay(&mut self, keys: &[KeyEvent]) {
        for key in keys {
            self.apply(key);
        }
    }

    fn enter(&mut self, mode: RequestedMode) {
        debug!(target: "runtime", from = ?self.mode, to = ?mode, "mode_change");
        if mode.is_insert_like() {
            self.controller.deactivate(&mut self.state);
        } else if !matches!(mode, RequestedMode::Visual | RequestedMode::VisualLine) {
            self.state.selection.clear();
        }
        self.mode = mode;
    }

    pub fn report(&self) -> Report {
        let (line, column) = self.state.caret_position();
        Report {
            line,
            column,
            mode: self.mode,
            selection: self.state.selection.range.clone(),
        }
    }
}
