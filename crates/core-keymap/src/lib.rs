//! core-keymap: normalized key tokens and lookup tables for the dispatcher.
//!
//! Design principles:
//! - Tokens are structural ([`KeyChord`]): base key plus the Control bit. There is
//!   no string composition, so a literal `^` key can never be confused with a
//!   Control-modified key.
//! - Tables are compiled into a small trie ([`KeyTrie`]) so multi-key command
//!   names and their prefixes are answered by one walk.
//! - Pure and deterministic: no side effects besides TRACE logging.

use core_events::{KeyCode, KeyEvent, NamedKey};
use smallvec::SmallVec;
use std::fmt;
use tracing::trace;

pub mod count;
pub use count::{COUNT_LIMIT, RepeatCount};

// -------------------------------------------------------------------------------------------------
// Tokens
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordKey {
    Char(char),
    Named(NamedKey),
}

/// Lookup token for command and motion tables.
///
/// Only the Control modifier is significant; Shift is already folded into the
/// character and other modifiers do not select different bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: ChordKey,
    pub ctrl: bool,
}

impl KeyChord {
    pub const fn char(c: char) -> Self {
        Self {
            key: ChordKey::Char(c),
            ctrl: false,
        }
    }

    pub const fn ctrl(c: char) -> Self {
        Self {
            key: ChordKey::Char(c),
            ctrl: true,
        }
    }

    pub const fn named(key: NamedKey) -> Self {
        Self {
            key: ChordKey::Named(key),
            ctrl: false,
        }
    }

    /// Same base key with the Control bit set.
    pub const fn with_ctrl(self, ctrl: bool) -> Self {
        Self { key: self.key, ctrl }
    }

    pub fn char_value(&self) -> Option<char> {
        match self.key {
            ChordKey::Char(c) => Some(c),
            ChordKey::Named(_) => None,
        }
    }
}

impl From<&KeyEvent> for KeyChord {
    fn from(ev: &KeyEvent) -> Self {
        let key = match ev.code {
            KeyCode::Char(c) => ChordKey::Char(c),
            KeyCode::Named(n) => ChordKey::Named(n),
        };
        Self {
            key,
            ctrl: ev.is_ctrl(),
        }
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = match self.key {
            ChordKey::Char(c) => c.to_string(),
            ChordKey::Named(n) => n.name(),
        };
        if self.ctrl {
            write!(f, "<C-{base}>")
        } else if matches!(self.key, ChordKey::Named(_)) {
            write!(f, "<{base}>")
        } else {
            f.write_str(&base)
        }
    }
}

/// Ordered key buffer; command names are at most two keys in practice.
pub type KeySequence = SmallVec<[KeyChord; 2]>;

/// Build a plain (unmodified) key sequence from a short name such as `"gg"`.
pub fn seq(name: &str) -> KeySequence {
    name.chars().map(KeyChord::char).collect()
}

// -------------------------------------------------------------------------------------------------
// Trie
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone)]
struct Edge {
    chord: KeyChord,
    next: usize,
}

#[derive(Debug, Clone)]
struct Node {
    terminal: Option<usize>, // index into values vec
    edges: SmallVec<[Edge; 4]>,
}

impl Node {
    fn new() -> Self {
        Self {
            terminal: None,
            edges: SmallVec::new(),
        }
    }
}

/// Exact-match lookup table keyed by key sequences.
#[derive(Debug)]
pub struct KeyTrie<T> {
    nodes: Vec<Node>,
    values: Vec<T>,
}

impl<T> Default for KeyTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of walking a key buffer through a [`KeyTrie`].
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution<'a, T> {
    /// The whole buffer names a binding. `ambiguous` is set when longer
    /// bindings share this prefix.
    Matched { value: &'a T, ambiguous: bool },
    /// Strict prefix of one or more bindings.
    NeedMore,
    /// No binding starts with this buffer.
    NoMatch,
}

impl<T> KeyTrie<T> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new()],
            values: Vec::new(),
        }
    }

    /// Register `value` under `sequence`. Re-binding a sequence replaces the
    /// previous value. Empty sequences are ignored.
    pub fn insert(&mut self, sequence: &[KeyChord], value: T) {
        if sequence.is_empty() {
            return;
        }
        let mut cur = 0usize;
        for chord in sequence {
            let next = if let Some(e) = self.nodes[cur].edges.iter().find(|e| e.chord == *chord) {
                e.next
            } else {
                let new_idx = self.nodes.len();
                self.nodes.push(Node::new());
                self.nodes[cur].edges.push(Edge {
                    chord: *chord,
                    next: new_idx,
                });
                new_idx
            };
            cur = next;
        }
        if let Some(existing) = self.nodes[cur].terminal {
            trace!(target: "input.map", node = cur, value_index = existing, "terminal_override");
            self.values[existing] = value;
            return;
        }
        self.nodes[cur].terminal = Some(self.values.len());
        self.values.push(value);
    }

    fn walk(&self, buffer: &[KeyChord]) -> Option<usize> {
        let mut node_idx = 0usize;
        for (i, chord) in buffer.iter().enumerate() {
            let edge = self.nodes[node_idx].edges.iter().find(|e| e.chord == *chord)?;
            node_idx = edge.next;
            trace!(target: "input.map", step = i, key = %chord, node = node_idx, "advance");
        }
        Some(node_idx)
    }

    pub fn resolve(&self, buffer: &[KeyChord]) -> Resolution<'_, T> {
        if buffer.is_empty() {
            return Resolution::NeedMore;
        }
        let Some(node_idx) = self.walk(buffer) else {
            return Resolution::NoMatch;
        };
        let node = &self.nodes[node_idx];
        match node.terminal {
            Some(vi) => Resolution::Matched {
                value: &self.values[vi],
                ambiguous: !node.edges.is_empty(),
            },
            None => Resolution::NeedMore,
        }
    }

    /// Exact lookup.
    pub fn get(&self, buffer: &[KeyChord]) -> Option<&T> {
        match self.resolve(buffer) {
            Resolution::Matched { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
