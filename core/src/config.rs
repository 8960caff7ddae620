//! Tokenizer configuration.
//!
//! [`TokenizerConfig`] tunes how a [`Tokenizer`](crate::Tokenizer) runs its
//! lex and parse passes. The defaults reproduce the standard facade
//! behavior: fast prediction with an exact-mode retry, the end-of-file token
//! moved to the hidden channel, and console listeners removed.
//!
//! # Example
//!
//! ```ignore
//! use lazyparse_core::{PredictionMode, TokenizerConfig};
//!
//! // Refuse inputs that lex to more than 10k tokens
//! let config = TokenizerConfig::new().with_max_tokens(10_000);
//!
//! // Skip the fast attempt entirely
//! let config = TokenizerConfig::new().with_prediction(PredictionMode::Ll);
//! ```

use crate::error::RecognitionError;
use crate::token::Span;
use crate::traits::PredictionMode;

/// Configuration for the lex and parse passes.
///
/// # Default Values
///
/// | Setting | Default | Effect |
/// |---------|---------|--------|
/// | `max_tokens` | `usize::MAX` | No limit on buffered tokens |
/// | `prediction` | `PredictionMode::Sll` | Fast attempt first, exact retry |
/// | `hide_eof` | `true` | EOF sentinel moved to the hidden channel |
/// | `keep_console_listeners` | `false` | Console listeners removed |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Maximum number of tokens the lex pass may buffer, EOF included.
    ///
    /// Exceeding it fails the lex pass with
    /// [`Error::TokenLimitExceeded`](crate::Error::TokenLimitExceeded).
    pub max_tokens: usize,

    /// Prediction mode for the first parse attempt.
    ///
    /// With `Sll` the parser runs in fast mode and is reset and retried once
    /// in `Ll` mode on failure. With `Ll` the fast attempt is skipped.
    pub prediction: PredictionMode,

    /// Move a trailing end-of-file token to the hidden channel when the
    /// token list is first read.
    pub hide_eof: bool,

    /// Leave the console listener installed on the lexer and parser.
    pub keep_console_listeners: bool,
}

impl Default for TokenizerConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TokenizerConfig {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self {
        max_tokens: usize::MAX,
        prediction: PredictionMode::Sll,
        hide_eof: true,
        keep_console_listeners: false,
    };

    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the maximum token count. Use `usize::MAX` to disable.
    #[inline]
    pub const fn with_max_tokens(mut self, count: usize) -> Self {
        self.max_tokens = count;
        self
    }

    #[inline]
    pub const fn with_prediction(mut self, mode: PredictionMode) -> Self {
        self.prediction = mode;
        self
    }

    #[inline]
    pub const fn with_hide_eof(mut self, hide: bool) -> Self {
        self.hide_eof = hide;
        self
    }

    /// Keeps the console listeners, so syntax errors are printed to stderr.
    #[inline]
    pub const fn keep_console_listeners(mut self) -> Self {
        self.keep_console_listeners = true;
        self
    }
}

/// Tracks rule nesting inside a recursive-descent parser.
///
/// Parsers are built by their [`Constructor`](crate::Constructor), so the
/// limit lives with the parser rather than in [`TokenizerConfig`].
///
/// # Example
///
/// ```ignore
/// fn unary(&mut self) -> Result<Expr, RecognitionError> {
///     self.depth.enter(self.max_depth, self.current_span())?;
///     let result = self.unary_inner();
///     self.depth.exit();
///     result
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecursionGuard {
    depth: usize,
}

impl RecursionGuard {
    /// Default nesting limit, matching serde_json.
    pub const DEFAULT_LIMIT: usize = 128;

    #[inline]
    pub const fn new() -> Self {
        Self { depth: 0 }
    }

    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Enters one nesting level.
    ///
    /// Fails once the new depth exceeds `limit`, reporting `span` as the
    /// offending position. The depth is left incremented either way.
    #[inline]
    pub fn enter(&mut self, limit: usize, span: Span) -> Result<(), RecognitionError> {
        self.depth = self.depth.saturating_add(1);
        if self.depth > limit {
            return Err(RecognitionError::new(
                format!("recursion limit exceeded: depth {} > limit {limit}", self.depth),
                span,
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Back to depth zero, e.g. when the parser is reset for a retry.
    #[inline]
    pub fn reset(&mut self) {
        self.depth = 0;
    }
}
