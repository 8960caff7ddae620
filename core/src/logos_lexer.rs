//! [`Lexer`] adapter for logos token enums.

use core::marker::PhantomData;
use std::collections::VecDeque;

use logos::Logos;

use crate::char_stream::CharStream;
use crate::error::RecognitionError;
use crate::listeners::ErrorListeners;
use crate::token::{Channel, CommonToken, Span, TokenType};
use crate::traits::Lexer;

/// A logos token enum usable with [`LogosLexer`].
///
/// # Example
///
/// ```ignore
/// #[derive(Logos, Debug, Clone, Copy, PartialEq)]
/// enum Kind {
///     #[regex(r"[ \t\n]+")]
///     Whitespace,
///     #[regex(r"[0-9]+")]
///     Number,
/// }
///
/// impl TokenKind for Kind {
///     fn token_type(&self) -> TokenType {
///         match self {
///             Kind::Whitespace => TokenType(1),
///             Kind::Number => TokenType(2),
///         }
///     }
///
///     fn channel(&self) -> Channel {
///         match self {
///             Kind::Whitespace => Channel::HIDDEN,
///             _ => Channel::DEFAULT,
///         }
///     }
/// }
/// ```
pub trait TokenKind: Sized + 'static + for<'s> Logos<'s, Source = str, Extras = ()> {
    fn token_type(&self) -> TokenType;

    #[inline]
    fn channel(&self) -> Channel {
        Channel::DEFAULT
    }
}

/// Runs a logos lexer over the whole input when it is set and hands the
/// results out one [`CommonToken`] at a time.
///
/// An unrecognized slice is reported to the listeners and returned from
/// [`Lexer::next_token`] in its source position.
pub struct LogosLexer<K> {
    pending: VecDeque<Result<CommonToken, RecognitionError>>,
    eof_offset: usize,
    listeners: ErrorListeners,
    _kind: PhantomData<fn() -> K>,
}

impl<K: TokenKind> LogosLexer<K> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            eof_offset: 0,
            listeners: ErrorListeners::new(),
            _kind: PhantomData,
        }
    }
}

impl<K: TokenKind> Default for LogosLexer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> core::fmt::Debug for LogosLexer<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LogosLexer")
            .field("pending", &self.pending.len())
            .field("eof_offset", &self.eof_offset)
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl<K: TokenKind> Lexer for LogosLexer<K> {
    type Token = CommonToken;

    fn set_input(&mut self, input: CharStream) {
        let text = input.as_str();
        let mut lex = K::lexer(text);

        self.pending.clear();
        while let Some(result) = lex.next() {
            let span = Span::from(lex.span());
            let slice = lex.slice();
            self.pending.push_back(match result {
                Ok(kind) => Ok(CommonToken::new(kind.token_type(), slice, span)
                    .with_channel(kind.channel())),
                Err(_) => Err(RecognitionError::new(
                    format!("token recognition error at: '{slice}'"),
                    span,
                )
                .with_offending(slice)),
            });
        }
        self.eof_offset = text.len();
    }

    fn next_token(&mut self) -> Result<CommonToken, RecognitionError> {
        match self.pending.pop_front() {
            Some(Ok(token)) => Ok(token),
            Some(Err(err)) => {
                self.listeners.syntax_error(&err);
                Err(err)
            }
            None => Ok(CommonToken::eof(self.eof_offset)),
        }
    }

    fn listeners(&self) -> &ErrorListeners {
        &self.listeners
    }

    fn listeners_mut(&mut self) -> &mut ErrorListeners {
        &mut self.listeners
    }
}
