#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{FnCommand, KeyDispatcher, KeyOutcome};
use core_events::KeyEvent;
use core_state::{EditorState, EditorSurface, RequestedMode};
use core_text::Buffer;
use std::cell::RefCell;
use std::rc::Rc;

pub fn surface(text: &str) -> EditorState {
    EditorState::new(Buffer::from_str("t", text).unwrap())
}

/// `line 1` .. `line n`, one per line.
pub fn numbered(lines: usize) -> EditorState {
    let text = (1..=lines)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n");
    surface(&text)
}

/// Feed plain character keys, returning the outcome of each.
pub fn feed(d: &mut KeyDispatcher, s: &mut EditorState, keys: &str) -> Vec<KeyOutcome> {
    keys.chars()
        .map(|c| d.handle_key(s, &KeyEvent::char(c)))
        .collect()
}

pub fn press(d: &mut KeyDispatcher, s: &mut EditorState, ev: KeyEvent) -> KeyOutcome {
    d.handle_key(s, &ev)
}

pub type Calls = Rc<RefCell<Vec<(u32, Option<char>)>>>;

type RecordFn = Box<dyn Fn(&mut dyn EditorSurface, u32, Option<char>) -> RequestedMode>;

/// Command that records `(count, argument)` for every execution.
pub fn recording_command() -> (FnCommand<RecordFn>, Calls) {
    let calls: Calls = Rc::default();
    let sink = Rc::clone(&calls);
    let f: RecordFn = Box::new(
        move |_surface: &mut dyn EditorSurface, count: u32, argument: Option<char>| {
            sink.borrow_mut().push((count, argument));
            RequestedMode::Normal
        },
    );
    (FnCommand::new(f), calls)
}
