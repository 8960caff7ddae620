//! Listener sets owned by lexers and parsers.

use core::fmt;
use std::rc::Rc;

use crate::error::RecognitionError;
use crate::traits::ErrorListener;

/// Handle to a listener registered in an [`ErrorListeners`] set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

impl ListenerId {
    /// The [`ConsoleErrorListener`] every new set starts with.
    pub const CONSOLE: Self = Self(0);
}

/// Prints syntax errors to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleErrorListener;

impl ErrorListener for ConsoleErrorListener {
    fn syntax_error(&self, error: &RecognitionError) {
        eprintln!("{error}");
    }
}

/// Ordered set of error listeners.
///
/// A new set holds the console listener under [`ListenerId::CONSOLE`].
pub struct ErrorListeners {
    entries: Vec<(ListenerId, Rc<dyn ErrorListener>)>,
    next_id: u32,
}

impl ErrorListeners {
    /// A set holding only the console listener.
    pub fn new() -> Self {
        Self {
            entries: vec![(ListenerId::CONSOLE, Rc::new(ConsoleErrorListener))],
            next_id: 1,
        }
    }

    /// A set with no listeners at all.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn add(&mut self, listener: Rc<dyn ErrorListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forwards `error` to every listener in registration order.
    pub fn syntax_error(&self, error: &RecognitionError) {
        for (_, listener) in &self.entries {
            listener.syntax_error(error);
        }
    }
}

impl Default for ErrorListeners {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ErrorListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(id, _)| id))
            .finish()
    }
}
