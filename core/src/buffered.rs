//! Buffered token stream.
//!
//! A [`BufferedTokenStream`] drains its lexer up front and then hands out
//! tokens by position. The cursor is a [`Cell`], so one stream can be shared
//! through an `Rc` between the tokenizer (which rewinds it) and the parser
//! (which consumes it).
//!
//! Lookahead (`lt`, `la`, `consume`) only sees tokens on
//! [`Channel::DEFAULT`]. The end-of-file token is always visible, whatever
//! its channel.

use core::cell::Cell;

use crate::error::Error;
use crate::token::{Channel, TokenType};
use crate::traits::{Lexer, Token};

#[derive(Debug)]
pub struct BufferedTokenStream<T> {
    tokens: Vec<T>,
    cursor: Cell<usize>,
}

impl<T: Token> BufferedTokenStream<T> {
    /// Wraps already-lexed tokens. The cursor starts at the first visible
    /// token.
    pub fn from_tokens(tokens: Vec<T>) -> Self {
        let stream = Self {
            tokens,
            cursor: Cell::new(0),
        };
        stream.seek(0);
        stream
    }

    /// Drains `lexer` up to and including its end-of-file token.
    pub fn fill<L>(lexer: &mut L) -> Result<Self, Error>
    where
        L: Lexer<Token = T> + ?Sized,
    {
        Self::fill_limited(lexer, usize::MAX)
    }

    /// Like [`fill`](Self::fill), failing once more than `max_tokens` tokens
    /// have been buffered.
    pub fn fill_limited<L>(lexer: &mut L, max_tokens: usize) -> Result<Self, Error>
    where
        L: Lexer<Token = T> + ?Sized,
    {
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token().map_err(Error::Lex)?;
            let done = token.is_eof();
            tokens.push(token);
            if tokens.len() > max_tokens {
                return Err(Error::TokenLimitExceeded {
                    consumed: tokens.len(),
                    limit: max_tokens,
                });
            }
            if done {
                break;
            }
        }
        Ok(Self::from_tokens(tokens))
    }

    /// All buffered tokens, hidden ones included.
    #[inline]
    pub fn tokens(&self) -> &[T] {
        &self.tokens
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Current cursor position.
    #[inline]
    pub fn index(&self) -> usize {
        self.cursor.get()
    }

    /// Moves the cursor to `index`, then forward to the next visible token.
    /// Positions past the end clamp to the last token.
    pub fn seek(&self, index: usize) {
        let index = index.min(self.tokens.len().saturating_sub(1));
        self.cursor.set(self.next_visible(index));
    }

    /// The `k`-th visible token from the cursor, `k >= 1`.
    ///
    /// Lookahead past the end-of-file token keeps returning it.
    pub fn lt(&self, k: usize) -> Option<&T> {
        if k == 0 {
            return None;
        }
        let mut index = self.cursor.get();
        for _ in 1..k {
            match self.tokens.get(index) {
                Some(token) if !token.is_eof() => {
                    index = self.next_visible(index + 1);
                }
                _ => break,
            }
        }
        self.tokens.get(index).or_else(|| self.tokens.last())
    }

    /// Type of the `k`-th visible token, [`TokenType::EOF`] past the end.
    #[inline]
    pub fn la(&self, k: usize) -> TokenType {
        self.lt(k).map_or(TokenType::EOF, Token::token_type)
    }

    /// Returns the current visible token and advances past it.
    ///
    /// The cursor never moves past the end-of-file token.
    pub fn consume(&self) -> Option<&T> {
        let index = self.cursor.get();
        let token = self.tokens.get(index)?;
        if !token.is_eof() {
            self.cursor.set(self.next_visible(index + 1));
        }
        Some(token)
    }

    fn next_visible(&self, mut index: usize) -> usize {
        while let Some(token) = self.tokens.get(index) {
            if token.channel() == Channel::DEFAULT || token.is_eof() {
                break;
            }
            index += 1;
        }
        index
    }
}
