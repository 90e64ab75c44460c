mod common;
use common::*;

use core_actions::{KeyDispatcher, KeyOutcome};
use core_config::DispatchConfig;
use core_events::{KeyEvent, NamedKey};
use core_keymap::{KeyChord, seq};
use core_state::{EditorSurface, RequestedMode};
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn two_key_command_waits_for_its_argument() {
    let mut d = KeyDispatcher::default();
    let (cmd, calls) = recording_command();
    d.register_command(&seq("gx"), cmd.with_argument());
    let mut s = numbered(5);

    assert_eq!(
        feed(&mut d, &mut s, "gx"),
        vec![KeyOutcome::Pending, KeyOutcome::Pending]
    );
    assert!(calls.borrow().is_empty());
    assert!(d.state().pending.is_some());

    assert_eq!(
        feed(&mut d, &mut s, "q"),
        vec![KeyOutcome::Executed {
            mode: RequestedMode::Normal
        }]
    );
    assert_eq!(*calls.borrow(), vec![(1, Some('q'))]);
    assert!(d.state().is_idle());

    feed(&mut d, &mut s, "j");
    assert_eq!(calls.borrow().len(), 1, "argument consumed exactly once");
    assert_eq!(s.caret_line(), 2);
}

#[test]
fn secondary_count_replaces_prefix_count() {
    let mut d = KeyDispatcher::default();
    let (cmd, calls) = recording_command();
    d.register_command(&seq("q"), cmd.with_argument().with_secondary_count());
    let mut s = numbered(5);

    feed(&mut d, &mut s, "9q42x");
    feed(&mut d, &mut s, "9qx");
    assert_eq!(*calls.borrow(), vec![(42, Some('x')), (9, Some('x'))]);
}

#[test]
fn digit_is_an_argument_without_secondary_count() {
    let mut d = KeyDispatcher::default();
    let (cmd, calls) = recording_command();
    d.register_command(&seq("r"), cmd.with_argument());
    let mut s = numbered(5);

    feed(&mut d, &mut s, "3r5");
    assert_eq!(*calls.borrow(), vec![(3, Some('5'))]);
}

#[test]
fn named_argument_key_runs_without_argument() {
    let mut d = KeyDispatcher::default();
    let (cmd, calls) = recording_command();
    d.register_command(&seq("r"), cmd.with_argument());
    let mut s = numbered(5);

    feed(&mut d, &mut s, "r");
    press(&mut d, &mut s, KeyEvent::named(NamedKey::Esc));
    assert_eq!(*calls.borrow(), vec![(1, None)]);
}

#[test]
fn command_prefix_shadows_motion_on_same_key() {
    let mut d = KeyDispatcher::default();
    let (cmd, calls) = recording_command();
    d.register_command(&seq("gx"), cmd);
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    d.register_motion(
        KeyChord::char('g'),
        move |surface: &mut dyn EditorSurface, _count: u32, _trailing: &[char]| {
            flag.set(true);
            let last = surface.line_count();
            surface.set_caret_line(last);
            true
        },
    );
    let mut s = numbered(10);

    assert_eq!(feed(&mut d, &mut s, "g"), vec![KeyOutcome::Pending]);
    assert_eq!(feed(&mut d, &mut s, "j"), vec![KeyOutcome::Moved]);
    assert!(!fired.get(), "motion on a command prefix is never reached");
    assert_eq!(s.caret_line(), 2);
    assert!(calls.borrow().is_empty());

    feed(&mut d, &mut s, "gx");
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn overlong_unmatched_name_is_rejected() {
    let mut d = KeyDispatcher::default();
    let (cmd, calls) = recording_command();
    d.register_command(&seq("abc"), cmd);
    let mut s = numbered(5);

    assert_eq!(
        feed(&mut d, &mut s, "abx"),
        vec![KeyOutcome::Pending, KeyOutcome::Pending, KeyOutcome::Rejected]
    );
    assert!(d.state().is_idle());
    assert!(calls.borrow().is_empty());
}

#[test]
fn control_and_caret_keys_bind_separately() {
    let mut d = KeyDispatcher::default();
    let (plain, plain_calls) = recording_command();
    let (ctrl, ctrl_calls) = recording_command();
    d.register_command(&seq("w"), plain);
    d.register_command(&[KeyChord::ctrl('w')], ctrl);
    let mut s = surface("   indented");
    s.set_caret_column(8);

    press(&mut d, &mut s, KeyEvent::ctrl('w'));
    assert_eq!(ctrl_calls.borrow().len(), 1);
    assert!(plain_calls.borrow().is_empty());

    // literal '^' still reaches the first-non-blank motion
    assert_eq!(press(&mut d, &mut s, KeyEvent::char('^')), KeyOutcome::Moved);
    assert_eq!(s.caret_column(), 3);
}

#[test]
fn standard_commands_drive_mode_requests() {
    let mut d = KeyDispatcher::with_standard_commands(&DispatchConfig::default());
    let mut s = surface("one\n  two\nthree\nfour");

    assert_eq!(
        feed(&mut d, &mut s, "2gg"),
        vec![
            KeyOutcome::Pending,
            KeyOutcome::Pending,
            KeyOutcome::Executed {
                mode: RequestedMode::None
            }
        ]
    );
    assert_eq!(s.caret_position(), (2, 2));

    feed(&mut d, &mut s, "A");
    assert_eq!(d.take_requested_mode(), RequestedMode::Insert);
    assert_eq!(s.caret_position(), (2, 5), "insert modes keep the caret past the end");
    assert_eq!(d.requested_mode(), RequestedMode::None);

    feed(&mut d, &mut s, "2V");
    assert_eq!(d.requested_mode(), RequestedMode::VisualLine);
    assert_eq!(s.selection.range, Some(4..16));
}

#[test]
fn find_command_uses_its_argument() {
    let mut d = KeyDispatcher::with_standard_commands(&DispatchConfig::default());
    let mut s = surface("a,b,c,d");
    feed(&mut d, &mut s, "2f,");
    assert_eq!(s.caret_column(), 3);
    feed(&mut d, &mut s, "F,");
    assert_eq!(s.caret_column(), 1);
}

#[test]
fn g_prefix_falls_through_to_motion() {
    let mut d = KeyDispatcher::with_standard_commands(&DispatchConfig::default());
    let mut s = numbered(5);
    feed(&mut d, &mut s, "gj");
    assert_eq!(s.caret_line(), 2);
}
