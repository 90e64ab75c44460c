//! Inbound key plumbing: terminal events and textual key notation, both
//! reduced to [`core_events::KeyEvent`].

mod key_token;
mod notation;

pub use key_token::{map_key_event, map_modifiers};
pub use notation::{NotationError, parse_keys};
