//! Command contract (Tier 1 bindings).

use core_state::{EditorSurface, RequestedMode};

/// A named action bound to a one or two key sequence.
pub trait Command {
    /// Waits for one more key whose character is passed as the argument.
    fn takes_argument(&self) -> bool {
        false
    }

    /// Digits typed after the name form a fresh count replacing the prefix count.
    fn supports_secondary_count(&self) -> bool {
        false
    }

    /// Run with an effective count (at least 1). `argument` is the char of the
    /// argument key, `None` when the command takes none or the key was a named key.
    fn execute(
        &self,
        surface: &mut dyn EditorSurface,
        count: u32,
        argument: Option<char>,
    ) -> RequestedMode;
}

/// Closure-backed [`Command`].
pub struct FnCommand<F> {
    f: F,
    takes_argument: bool,
    secondary_count: bool,
}

impl<F> FnCommand<F>
where
    F: Fn(&mut dyn EditorSurface, u32, Option<char>) -> RequestedMode,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            takes_argument: false,
            secondary_count: false,
        }
    }

    pub fn with_argument(mut self) -> Self {
        self.takes_argument = true;
        self
    }

    pub fn with_secondary_count(mut self) -> Self {
        self.secondary_count = true;
        self
    }
}

impl<F> Command for FnCommand<F>
where
    F: Fn(&mut dyn EditorSurface, u32, Option<char>) -> RequestedMode,
{
    fn takes_argument(&self) -> bool {
        self.takes_argument
    }

    fn supports_secondary_count(&self) -> bool {
        self.secondary_count
    }

    fn execute(
        &self,
        surface: &mut dyn EditorSurface,
        count: u32,
        argument: Option<char>,
    ) -> RequestedMode {
        (self.f)(surface, count, argument)
    }
}
