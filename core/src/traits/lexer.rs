use std::rc::Rc;

use super::listener::ErrorListener;
use super::token::Token;
use crate::char_stream::CharStream;
use crate::error::RecognitionError;
use crate::listeners::{ErrorListeners, ListenerId};

/// Turns a [`CharStream`] into tokens.
///
/// # Contract
///
/// - `set_input` binds the lexer to a new input and restarts it.
/// - `next_token` yields tokens in source order. Once the input is exhausted
///   it returns an end-of-file token, and keeps returning one on every later
///   call.
/// - Lexing errors are reported to the lexer's listeners and returned.
pub trait Lexer {
    /// The token type produced by this lexer.
    type Token: Token;

    fn set_input(&mut self, input: CharStream);

    fn next_token(&mut self) -> Result<Self::Token, RecognitionError>;

    fn listeners(&self) -> &ErrorListeners;

    fn listeners_mut(&mut self) -> &mut ErrorListeners;

    /// Removes a listener; `ListenerId::CONSOLE` detaches the stderr printer.
    #[inline]
    fn remove_error_listener(&mut self, id: ListenerId) -> bool {
        self.listeners_mut().remove(id)
    }

    #[inline]
    fn add_error_listener(&mut self, listener: Rc<dyn ErrorListener>) -> ListenerId {
        self.listeners_mut().add(listener)
    }
}
